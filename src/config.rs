//! YAML configuration: discovery, loading, and the backup document format

use anyhow::{Context, Result};
use dockkit::{CurrentState, DesiredState, DownloadsSpec, DownloadsTile, LiveDownloads, Settings};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

// ============================================================================
// Document
// ============================================================================

/// On-disk Dock configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DockConfig {
    /// Pinned apps, in Dock order
    #[serde(default)]
    pub apps: Vec<String>,

    /// Absent → default tile, `null` → leave alone, `off` → remove
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub downloads: Option<Option<DownloadsEntry>>,

    #[serde(default)]
    pub settings: Settings,
}

/// `downloads:` value - either the keyword `off` or a tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DownloadsEntry {
    Keyword(DownloadsKeyword),
    Tile(DownloadsTile),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadsKeyword {
    Off,
}

/// Distinguish an explicit `null` from a missing key
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<DownloadsEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DownloadsEntry>::deserialize(deserializer).map(Some)
}

impl DockConfig {
    /// Parse YAML text; an empty document means all defaults
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: serde_yaml::Value =
            serde_yaml::from_str(content).context("Invalid YAML syntax")?;
        match value {
            serde_yaml::Value::Null => Ok(Self::default()),
            serde_yaml::Value::Mapping(_) => {
                serde_yaml::from_value(value).context("Invalid Dock configuration")
            }
            _ => anyhow::bail!("Configuration must be a YAML mapping"),
        }
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Write as YAML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_yaml()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration")
    }

    pub fn downloads_spec(&self) -> DownloadsSpec {
        match &self.downloads {
            None => DownloadsSpec::default(),
            Some(None) => DownloadsSpec::Unspecified,
            Some(Some(DownloadsEntry::Keyword(DownloadsKeyword::Off))) => DownloadsSpec::Off,
            Some(Some(DownloadsEntry::Tile(tile))) => DownloadsSpec::Present(tile.clone()),
        }
    }

    pub fn desired_state(&self) -> DesiredState {
        DesiredState {
            apps: self.apps.clone(),
            downloads: self.downloads_spec(),
            settings: self.settings,
        }
    }
}

impl From<&CurrentState> for DockConfig {
    fn from(state: &CurrentState) -> Self {
        let downloads = match &state.downloads {
            LiveDownloads::Absent => DownloadsEntry::Keyword(DownloadsKeyword::Off),
            LiveDownloads::Present(tile) => DownloadsEntry::Tile(tile.clone()),
        };

        Self {
            apps: state.apps.clone(),
            downloads: Some(Some(downloads)),
            settings: state.settings,
        }
    }
}

// ============================================================================
// Discovery
// ============================================================================

/// Where to look for a configuration
#[derive(Debug, Default, Clone)]
pub struct ConfigSource<'a> {
    /// `--file`
    pub file: Option<&'a Path>,
    /// `--profile`
    pub profile: Option<&'a str>,
    /// Value of `DOCK_CONFIG`
    pub env_config: Option<&'a str>,
}

/// Resolve the config file to use, in priority order
pub fn discover(source: &ConfigSource<'_>, home: &Path) -> Result<PathBuf> {
    if let Some(file) = source.file {
        log::debug!("Using config from --file: {}", file.display());
        return Ok(file.to_path_buf());
    }

    if let Some(profile) = source.profile {
        let dir = paths::profiles_dir(home);
        let yml = dir.join(format!("{profile}.yml"));
        let yaml = dir.join(format!("{profile}.yaml"));
        if !yml.exists() && yaml.exists() {
            return Ok(yaml);
        }
        // Loading reports the missing file
        return Ok(yml);
    }

    let mut candidates = Vec::new();
    if let Some(env) = source.env_config {
        candidates.push(paths::expand(env, home));
    }
    candidates.push(paths::user_config(home));
    candidates.push(PathBuf::from(paths::SYSTEM_CONFIG));

    if let Some(found) = candidates.iter().find(|p| p.exists()) {
        log::debug!("Using config: {}", found.display());
        return Ok(found.clone());
    }

    let checked = candidates
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");
    anyhow::bail!(
        "No configuration file found. Checked:\n{checked}\nUse --file or --profile to specify one."
    )
}
