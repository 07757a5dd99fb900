//! Diff computation between desired and current Dock state
//!
//! dockutil can append at a position and remove by name, but it cannot move an
//! entry in place. Whenever the apps present on both sides appear in a
//! different relative order, the whole list is rebuilt instead of attempting
//! a minimal sequence of moves.

use crate::model::{CurrentState, DesiredState, DownloadsSpec, DownloadsTile, LiveDownloads, Settings};
use std::collections::HashSet;
use std::fmt;

/// Kind of change to the pinned app list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Add,
    Remove,
    /// Cleared as part of a full rebuild
    Reorder,
}

/// A single change to the pinned app list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppChange {
    pub action: AppAction,
    pub app_name: String,
    /// 1-based Dock slot, set for additions
    pub position: Option<usize>,
}

impl AppChange {
    fn add(app_name: &str, position: usize) -> Self {
        Self {
            action: AppAction::Add,
            app_name: app_name.to_string(),
            position: Some(position),
        }
    }

    fn remove(app_name: &str) -> Self {
        Self {
            action: AppAction::Remove,
            app_name: app_name.to_string(),
            position: None,
        }
    }

    fn reorder(app_name: &str) -> Self {
        Self {
            action: AppAction::Reorder,
            app_name: app_name.to_string(),
            position: None,
        }
    }
}

/// Settings the Dock exposes to this tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingName {
    Autohide,
    AutohideDelay,
}

impl SettingName {
    /// Name as written in configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Autohide => "autohide",
            Self::AutohideDelay => "autohide_delay",
        }
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A setting value before or after a change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
}

impl SettingValue {
    /// Numeric view of the value; booleans read as 0 or 1
    pub fn as_number(self) -> f64 {
        match self {
            Self::Bool(value) => f64::from(u8::from(value)),
            Self::Number(value) => value,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

/// A change to one scalar setting
#[derive(Debug, Clone, PartialEq)]
pub struct SettingChange {
    pub name: SettingName,
    pub old_value: SettingValue,
    pub new_value: SettingValue,
}

/// What to do with the Downloads tile
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DownloadsChange {
    #[default]
    NoChange,
    /// Remove the tile
    Off,
    /// Add the tile, replacing any existing one
    Present(DownloadsTile),
}

impl DownloadsChange {
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Every change needed to converge the Dock
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangeSet {
    pub app_changes: Vec<AppChange>,
    pub setting_changes: Vec<SettingChange>,
    pub downloads_change: DownloadsChange,
}

impl ChangeSet {
    /// Whether applying this change set would touch the system at all
    pub fn has_changes(&self) -> bool {
        !self.app_changes.is_empty()
            || !self.setting_changes.is_empty()
            || self.downloads_change.is_change()
    }

    /// Whether the app list must be cleared and rebuilt
    pub fn needs_rebuild(&self) -> bool {
        self.app_changes
            .iter()
            .any(|c| c.action == AppAction::Reorder)
    }

    /// Apps to re-add during a rebuild, in slot order
    pub fn rebuild_order(&self) -> Vec<String> {
        let mut additions: Vec<&AppChange> = self
            .app_changes
            .iter()
            .filter(|c| c.action == AppAction::Add)
            .collect();
        additions.sort_by_key(|c| c.position.unwrap_or(0));
        additions.iter().map(|c| c.app_name.clone()).collect()
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary::from_changes(self)
    }
}

/// Diff summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub additions: usize,
    pub removals: usize,
    /// Apps cleared for a rebuild
    pub reorders: usize,
    pub settings: usize,
    pub downloads: bool,
}

impl DiffSummary {
    pub fn from_changes(changes: &ChangeSet) -> Self {
        let mut summary = Self {
            settings: changes.setting_changes.len(),
            downloads: changes.downloads_change.is_change(),
            ..Self::default()
        };
        for change in &changes.app_changes {
            match change.action {
                AppAction::Add => summary.additions += 1,
                AppAction::Remove => summary.removals += 1,
                AppAction::Reorder => summary.reorders += 1,
            }
        }
        summary
    }

    /// Total number of changes
    pub fn total(&self) -> usize {
        self.additions + self.removals + self.reorders + self.settings + usize::from(self.downloads)
    }
}

/// Compare desired against current state
pub fn calculate_diff(desired: &DesiredState, current: &CurrentState) -> ChangeSet {
    ChangeSet {
        app_changes: app_changes(&desired.apps, &current.apps),
        setting_changes: setting_changes(&desired.settings, &current.settings),
        downloads_change: downloads_change(&desired.downloads, &current.downloads),
    }
}

fn app_changes(desired: &[String], current: &[String]) -> Vec<AppChange> {
    let desired_set: HashSet<&str> = desired.iter().map(String::as_str).collect();
    let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();

    // Relative order of the apps both sides agree should exist
    let common_desired: Vec<&str> = desired
        .iter()
        .map(String::as_str)
        .filter(|app| current_set.contains(app))
        .collect();
    let common_current: Vec<&str> = current
        .iter()
        .map(String::as_str)
        .filter(|app| desired_set.contains(app))
        .collect();

    let mut changes = Vec::new();

    if common_desired != common_current {
        log::debug!(
            "App order differs ({:?} vs {:?}), rebuilding the whole list",
            common_desired,
            common_current
        );

        changes.extend(current.iter().map(|app| AppChange::reorder(app)));
        changes.extend(
            desired
                .iter()
                .enumerate()
                .map(|(idx, app)| AppChange::add(app, idx + 1)),
        );
        return changes;
    }

    changes.extend(
        current
            .iter()
            .filter(|app| !desired_set.contains(app.as_str()))
            .map(|app| AppChange::remove(app)),
    );
    changes.extend(
        desired
            .iter()
            .enumerate()
            .filter(|(_, app)| !current_set.contains(app.as_str()))
            .map(|(idx, app)| AppChange::add(app, idx + 1)),
    );

    changes
}

fn setting_changes(desired: &Settings, current: &Settings) -> Vec<SettingChange> {
    let mut changes = Vec::new();

    if desired.autohide() != current.autohide() {
        changes.push(SettingChange {
            name: SettingName::Autohide,
            old_value: SettingValue::Bool(current.autohide()),
            new_value: SettingValue::Bool(desired.autohide()),
        });
    }

    // Both delays are already rounded; compare exactly
    if desired
        .autohide_delay()
        .total_cmp(&current.autohide_delay())
        .is_ne()
    {
        changes.push(SettingChange {
            name: SettingName::AutohideDelay,
            old_value: SettingValue::Number(current.autohide_delay()),
            new_value: SettingValue::Number(desired.autohide_delay()),
        });
    }

    changes
}

fn downloads_change(desired: &DownloadsSpec, current: &LiveDownloads) -> DownloadsChange {
    match (desired, current) {
        (DownloadsSpec::Unspecified, _) | (DownloadsSpec::Off, LiveDownloads::Absent) => {
            DownloadsChange::NoChange
        }
        (DownloadsSpec::Off, LiveDownloads::Present(_)) => DownloadsChange::Off,
        (DownloadsSpec::Present(tile), LiveDownloads::Present(existing)) if tile == existing => {
            DownloadsChange::NoChange
        }
        (DownloadsSpec::Present(tile), _) => DownloadsChange::Present(tile.clone()),
    }
}
