//! `dock reset` - converge the Dock onto a configuration

use anyhow::{Context as _, Result};
use dockkit::{ExecuteOptions, Executor, calculate_diff, generate_plan};

use crate::Context;
use crate::adapters::{Dockutil, KillallRestarter, PlistStore};
use crate::cli::ResetArgs;
use crate::engine::{self, ConsoleProgress};
use crate::runner::SystemRunner;
use crate::state::StateReader;
use crate::{paths, platform, ui};

pub fn run(ctx: &Context, args: &ResetArgs) -> Result<()> {
    platform::require_macos()?;
    let home = paths::home_dir()?;

    let runner = SystemRunner;
    let dockutil = Dockutil::new(&runner, home.clone());
    super::ensure_dockutil(&dockutil)?;
    let prefs = PlistStore::for_home(&home);
    let restarter = KillallRestarter::new(&runner);

    let (path, config) = super::load_config(&args.config, &home)?;
    if !ctx.quiet {
        ui::info(&format!("Loading configuration from: {}", path.display()));
    }

    let desired = config.desired_state();
    super::report_warnings(&desired, &home);

    let current = StateReader::new(&dockutil, &prefs, &home)
        .read()
        .context("Failed to read current Dock state")?;

    let changes = calculate_diff(&desired, &current);
    if !changes.has_changes() {
        ui::success("Dock is already in desired state. No changes needed.");
        return Ok(());
    }

    if ctx.verbose > 0 {
        engine::display_changes(&changes);
    }

    let steps = generate_plan(&changes, &desired.apps);
    engine::display_plan(&steps, args.dry_run);

    if args.dry_run {
        println!();
        ui::info("Dry run complete. No changes were made.");
        return Ok(());
    }

    ui::section("Executing commands:");
    let executor = Executor::new(
        &dockutil,
        &prefs,
        &restarter,
        ExecuteOptions { dry_run: false },
    );
    let mut progress = ConsoleProgress::new(ctx.verbose > 0);
    let changed = executor.apply_with_progress(&changes, &mut progress)?;
    log::info!("{} operation(s) completed", progress.completed());

    println!();
    if changed {
        ui::success("Dock configuration applied successfully!");
    } else {
        ui::success("No changes were needed.");
    }
    Ok(())
}
