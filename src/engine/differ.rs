//! Diff display - dock-specific UI

use colored::Colorize;
use dockkit::{AppAction, ChangeSet, DownloadsChange};

/// Kind of line in the diff listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Add,
    Remove,
    Modify,
}

/// Flatten a change set into `(marker, text)` rows, grouped by area
pub fn describe_changes(changes: &ChangeSet) -> Vec<(&'static str, Vec<(Marker, String)>)> {
    let mut groups = Vec::new();

    let apps: Vec<_> = changes
        .app_changes
        .iter()
        .map(|change| match (change.action, change.position) {
            (AppAction::Add, Some(pos)) => {
                (Marker::Add, format!("{} (position {pos})", change.app_name))
            }
            (AppAction::Add, None) => (Marker::Add, change.app_name.clone()),
            (AppAction::Remove, _) => (Marker::Remove, change.app_name.clone()),
            (AppAction::Reorder, _) => (Marker::Modify, format!("{} (reorder)", change.app_name)),
        })
        .collect();
    if !apps.is_empty() {
        groups.push(("Apps", apps));
    }

    let settings: Vec<_> = changes
        .setting_changes
        .iter()
        .map(|change| {
            (
                Marker::Modify,
                format!("{}: {} → {}", change.name, change.old_value, change.new_value),
            )
        })
        .collect();
    if !settings.is_empty() {
        groups.push(("Settings", settings));
    }

    match &changes.downloads_change {
        DownloadsChange::NoChange => {}
        DownloadsChange::Off => {
            groups.push(("Downloads", vec![(Marker::Remove, "Downloads tile".to_string())]));
        }
        DownloadsChange::Present(tile) => groups.push((
            "Downloads",
            vec![(
                Marker::Add,
                format!("{} ({}, {})", tile.path, tile.preset, tile.section),
            )],
        )),
    }

    groups
}

/// Display a change set in a user-friendly format
pub fn display_changes(changes: &ChangeSet) {
    if !changes.has_changes() {
        println!();
        println!("  {} No changes needed", "✓".green());
        return;
    }

    println!();
    println!(
        "┌─ {} ─────────────────────────────────────────┐",
        "Dock Diff".bold()
    );
    println!("│");

    for (title, rows) in describe_changes(changes) {
        println!("│ {}", title.bold());
        for (marker, text) in rows {
            let symbol = match marker {
                Marker::Add => "+".green(),
                Marker::Remove => "-".red(),
                Marker::Modify => "~".yellow(),
            };
            println!("│   {symbol} {text}");
        }
        println!("│");
    }

    let summary = changes.summary();
    println!("├─────────────────────────────────────────────────────┤");
    println!(
        "│ Summary: {} changes ({} added, {} removed, {} reordered, {} settings)",
        summary.total().to_string().bold(),
        summary.additions.to_string().green(),
        summary.removals.to_string().red(),
        summary.reorders.to_string().yellow(),
        summary.settings
    );
    println!("└─────────────────────────────────────────────────────┘");
}
