use anyhow::{Context as _, Result};

use crate::Context;
use crate::cli::{OutputFormat, ShowArgs};
use crate::config::DockConfig;
use crate::runner::SystemRunner;
use crate::{paths, platform, ui};

pub fn run(ctx: &Context, args: &ShowArgs) -> Result<()> {
    platform::require_macos()?;
    let home = paths::home_dir()?;

    let current = super::read_current_state(&SystemRunner, &home)?;
    let document = DockConfig::from(&current);

    match args.format {
        OutputFormat::Yaml => {
            if !ctx.quiet {
                ui::info("Current dock configuration:");
                println!();
            }
            print!("{}", document.to_yaml()?);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&document)
                .context("Failed to serialize configuration")?;
            println!("{json}");
        }
    }
    Ok(())
}
