pub mod backup;
pub mod reset;
pub mod show;
pub mod validate;

use anyhow::{Context, Result};
use dockkit::{CurrentState, DesiredState, validate as check};
use std::path::{Path, PathBuf};

use crate::adapters::{Dockutil, PlistStore};
use crate::cli::ConfigArgs;
use crate::config::{self, ConfigSource, DockConfig};
use crate::runner::CommandRunner;
use crate::state::StateReader;
use crate::ui;

/// Fail with an install hint when dockutil is missing
pub fn ensure_dockutil(dockutil: &Dockutil<'_>) -> Result<()> {
    if !dockutil.check_installed() {
        anyhow::bail!("dockutil is not installed\n  Install with: brew install dockutil");
    }
    Ok(())
}

/// Read the live Dock through dockutil and the preference file
pub fn read_current_state(runner: &dyn CommandRunner, home: &Path) -> Result<CurrentState> {
    let dockutil = Dockutil::new(runner, home.to_path_buf());
    ensure_dockutil(&dockutil)?;
    let prefs = PlistStore::for_home(home);

    StateReader::new(&dockutil, &prefs, home)
        .read()
        .context("Failed to read current Dock state")
}

/// Locate and parse the configuration named by `args`
pub fn load_config(args: &ConfigArgs, home: &Path) -> Result<(PathBuf, DockConfig)> {
    let source = ConfigSource {
        file: args.file.as_deref(),
        profile: args.profile.as_deref(),
        env_config: args.env_config.as_deref(),
    };
    let path = config::discover(&source, home)?;
    let config = DockConfig::load(&path)?;
    Ok((path, config))
}

/// Print validation warnings, returning how many there were
pub fn report_warnings(desired: &DesiredState, home: &Path) -> usize {
    let warnings = check(desired, home);
    for warning in &warnings {
        ui::warn(&warning.to_string());
    }
    warnings.len()
}
