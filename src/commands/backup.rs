use anyhow::Result;

use crate::Context;
use crate::cli::BackupArgs;
use crate::config::DockConfig;
use crate::runner::SystemRunner;
use crate::{paths, platform, ui};

pub fn run(ctx: &Context, args: &BackupArgs) -> Result<()> {
    platform::require_macos()?;
    let home = paths::home_dir()?;

    let current = super::read_current_state(&SystemRunner, &home)?;
    let path = paths::expand(&args.file.to_string_lossy(), &home);
    DockConfig::from(&current).save(&path)?;

    if !ctx.quiet {
        ui::success(&format!("Dock configuration backed up to: {}", path.display()));
    }
    Ok(())
}
