//! Path resolution for dock
//!
//! # Config Locations
//!
//! 1. `--file` on the command line
//! 2. `--profile NAME` → `~/.config/dock/profiles/NAME.yml` (or `.yaml`)
//! 3. `DOCK_CONFIG` environment variable, when it points at an existing file
//! 4. `~/.config/dock/config.yml`
//! 5. `/etc/dock/config.yml`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const ENV_CONFIG: &str = "DOCK_CONFIG";

/// System-wide config file
pub const SYSTEM_CONFIG: &str = "/etc/dock/config.yml";

/// Resolve the home directory once; everything else takes it as a parameter
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Could not determine home directory")
}

/// `~/.config/dock`
pub fn config_dir(home: &Path) -> PathBuf {
    home.join(".config").join("dock")
}

/// `~/.config/dock/config.yml`
pub fn user_config(home: &Path) -> PathBuf {
    config_dir(home).join("config.yml")
}

/// `~/.config/dock/profiles`
pub fn profiles_dir(home: &Path) -> PathBuf {
    config_dir(home).join("profiles")
}

/// Expand `~` in a user-supplied path
pub fn expand(path: &str, home: &Path) -> PathBuf {
    let expanded = shellexpand::tilde_with_context(path, || home.to_str());
    PathBuf::from(expanded.as_ref())
}
