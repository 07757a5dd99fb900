//! `dock validate` - schema and semantic checks, no Dock access

use anyhow::Result;

use crate::Context;
use crate::cli::ConfigArgs;
use crate::{paths, ui};

pub fn run(ctx: &Context, args: &ConfigArgs) -> Result<()> {
    let home = paths::home_dir()?;

    let (path, config) = super::load_config(args, &home)?;
    if !ctx.quiet {
        ui::info(&format!("Validating configuration: {}", path.display()));
    }

    let desired = config.desired_state();
    let warnings = super::report_warnings(&desired, &home);

    if ctx.verbose > 0 {
        ui::kv("apps", &desired.apps.len().to_string());
        ui::kv("downloads", &format!("{:?}", desired.downloads));
        ui::kv("autohide", &desired.settings.autohide().to_string());
        ui::kv("autohide_delay", &desired.settings.autohide_delay().to_string());
    }

    if warnings == 0 {
        ui::success("Configuration is valid!");
    } else {
        ui::success(&format!("Configuration is valid ({warnings} warning(s))"));
    }
    Ok(())
}
