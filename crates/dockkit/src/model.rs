//! Dock state values - what the Dock should look like, and what it looks like now

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default location of the Downloads tile
pub const DEFAULT_DOWNLOADS_PATH: &str = "~/Downloads";

/// Label dockutil uses for the Downloads tile
pub const DOWNLOADS_LABEL: &str = "Downloads";

/// Presentation style of the Downloads tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Stack, automatic view
    #[default]
    Classic,
    /// Stack, fan view
    Fan,
    /// Folder, grid view
    List,
}

impl Preset {
    /// The `(view, display)` pair dockutil expects for this preset
    pub fn view_display(self) -> (&'static str, &'static str) {
        match self {
            Self::Classic => ("auto", "stack"),
            Self::Fan => ("fan", "stack"),
            Self::List => ("grid", "folder"),
        }
    }

    /// Decode the `displayas` integer stored in the Dock preferences.
    ///
    /// Unknown codes fall back to `Fan`, which is what the Dock shows for a
    /// tile without an explicit style.
    pub fn from_display_code(code: i64) -> Self {
        match code {
            0 => Self::Classic,
            2 => Self::List,
            _ => Self::Fan,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Fan => "fan",
            Self::List => "list",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dock section the Downloads tile lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    AppsLeft,
    AppsRight,
    #[default]
    Others,
}

impl Section {
    /// The `--section` value dockutil expects
    pub fn dockutil_section(self) -> &'static str {
        match self {
            Self::AppsLeft => "left",
            Self::AppsRight => "right",
            Self::Others => "others",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AppsLeft => "apps-left",
            Self::AppsRight => "apps-right",
            Self::Others => "others",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete Downloads tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DownloadsTile {
    pub preset: Preset,
    pub path: String,
    pub section: Section,
}

impl Default for DownloadsTile {
    fn default() -> Self {
        Self {
            preset: Preset::Classic,
            path: DEFAULT_DOWNLOADS_PATH.to_string(),
            section: Section::Others,
        }
    }
}

/// What the configuration asks for regarding the Downloads tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadsSpec {
    /// Remove the tile if it exists
    Off,
    /// No opinion - whatever is in the Dock stays
    Unspecified,
    /// The tile must exist with exactly these properties
    Present(DownloadsTile),
}

impl Default for DownloadsSpec {
    fn default() -> Self {
        Self::Present(DownloadsTile::default())
    }
}

/// What the Dock actually shows for the Downloads tile
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LiveDownloads {
    #[default]
    Absent,
    Present(DownloadsTile),
}

impl LiveDownloads {
    pub fn tile(&self) -> Option<&DownloadsTile> {
        match self {
            Self::Absent => None,
            Self::Present(tile) => Some(tile),
        }
    }
}

/// Scalar Dock settings.
///
/// The delay is validated and rounded to two decimals on construction, so two
/// `Settings` can be compared with plain equality.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "SettingsRepr", into = "SettingsRepr")]
pub struct Settings {
    autohide: bool,
    autohide_delay: f64,
}

impl Settings {
    pub fn new(autohide: bool, autohide_delay: f64) -> Result<Self> {
        if !autohide_delay.is_finite() {
            return Err(Error::NonFiniteDelay(autohide_delay));
        }
        if autohide_delay < 0.0 {
            return Err(Error::NegativeDelay(autohide_delay));
        }

        Ok(Self {
            autohide,
            autohide_delay: round2(autohide_delay),
        })
    }

    pub fn autohide(&self) -> bool {
        self.autohide
    }

    /// Autohide delay in seconds
    pub fn autohide_delay(&self) -> f64 {
        self.autohide_delay
    }
}

/// Round to two decimals, ties to even. `-0.0` becomes `0.0`.
fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        // Too large to carry any fractional digits
        return value + 0.0;
    }
    scaled.round_ties_even() / 100.0 + 0.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsRepr {
    #[serde(default)]
    autohide: bool,
    #[serde(default)]
    autohide_delay: f64,
}

impl TryFrom<SettingsRepr> for Settings {
    type Error = Error;

    fn try_from(repr: SettingsRepr) -> Result<Self> {
        Self::new(repr.autohide, repr.autohide_delay)
    }
}

impl From<Settings> for SettingsRepr {
    fn from(settings: Settings) -> Self {
        Self {
            autohide: settings.autohide,
            autohide_delay: settings.autohide_delay,
        }
    }
}

/// The Dock as declared by configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesiredState {
    /// Pinned apps, in slot order
    pub apps: Vec<String>,
    pub downloads: DownloadsSpec,
    pub settings: Settings,
}

/// The Dock as observed on the running system
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurrentState {
    pub apps: Vec<String>,
    pub downloads: LiveDownloads,
    pub settings: Settings,
}

impl From<CurrentState> for DesiredState {
    /// Declare exactly what is currently observed
    fn from(current: CurrentState) -> Self {
        let downloads = match current.downloads {
            LiveDownloads::Absent => DownloadsSpec::Off,
            LiveDownloads::Present(tile) => DownloadsSpec::Present(tile),
        };

        Self {
            apps: current.apps,
            downloads,
            settings: current.settings,
        }
    }
}
