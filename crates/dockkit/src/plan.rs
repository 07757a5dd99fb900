//! Execution planning - turns a change set into ordered operations
//!
//! The executor runs the list returned by [`operations`]; [`generate_plan`]
//! renders the same list for display. Order is app list edits, then setting
//! writes, then the Downloads tile, then a single Dock restart.

use crate::command::{self, DOCKUTIL};
use crate::diff::{AppAction, ChangeSet, DownloadsChange, SettingChange, SettingName, SettingValue};
use crate::model::DOWNLOADS_LABEL;

/// One side effect against the Dock
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Clear every pinned entry
    RemoveAll,
    RemoveApp { name: String },
    AddApp { name: String, position: Option<usize> },
    /// Remove a folder tile by label
    RemoveFolder { label: String },
    AddFolder {
        path: String,
        view: &'static str,
        display: &'static str,
        section: &'static str,
    },
    SetAutohide(bool),
    SetAutohideDelay(f64),
    /// Reload the Dock so the edits become visible
    Restart,
}

impl Operation {
    /// Human-readable description
    pub fn description(&self) -> String {
        match self {
            Self::RemoveAll => "Remove all dock items".to_string(),
            Self::RemoveApp { name } => format!("Remove {name}"),
            Self::AddApp {
                name,
                position: Some(pos),
            } => format!("Add {name} at position {pos}"),
            Self::AddApp {
                name,
                position: None,
            } => format!("Add {name}"),
            Self::RemoveFolder { label } => format!("Remove {label} folder"),
            Self::AddFolder { path, view, .. } => format!("Add {path} folder (view: {view})"),
            Self::SetAutohide(value) => format!("Set autohide to {value}"),
            Self::SetAutohideDelay(value) => format!("Set autohide delay to {value}s"),
            Self::Restart => "Restart Dock to apply changes".to_string(),
        }
    }

    /// Program and arguments this operation corresponds to
    pub fn argv(&self) -> (&'static str, Vec<String>) {
        match self {
            Self::RemoveAll => (DOCKUTIL, command::remove_all_args()),
            Self::RemoveApp { name } => (DOCKUTIL, command::remove_args(name)),
            Self::AddApp { name, position } => (DOCKUTIL, command::add_app_args(name, *position)),
            Self::RemoveFolder { label } => (DOCKUTIL, command::remove_args(label)),
            Self::AddFolder {
                path,
                view,
                display,
                section,
            } => (
                DOCKUTIL,
                command::add_folder_args(path, view, display, section),
            ),
            Self::SetAutohide(value) => (
                "defaults",
                command::defaults_bool_args(command::AUTOHIDE_KEY, *value),
            ),
            Self::SetAutohideDelay(value) => (
                "defaults",
                command::defaults_float_args(command::AUTOHIDE_DELAY_KEY, *value),
            ),
            Self::Restart => ("killall", command::restart_args()),
        }
    }

    /// Literal command line, suitable for a dry-run listing
    pub fn command_line(&self) -> String {
        let (program, args) = self.argv();
        command::render(program, &args)
    }

    pub fn kind(&self) -> StepKind {
        match self {
            Self::RemoveAll => StepKind::RemoveAll,
            Self::RemoveApp { .. }
            | Self::AddApp { .. }
            | Self::RemoveFolder { .. }
            | Self::AddFolder { .. } => StepKind::AddApp,
            Self::SetAutohide(_) | Self::SetAutohideDelay(_) => StepKind::SetPreference,
            Self::Restart => StepKind::Restart,
        }
    }
}

/// Category of a plan step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Clear the whole app list
    RemoveAll,
    /// A single-entry dockutil edit (add or remove)
    AddApp,
    /// A preference write
    SetPreference,
    Restart,
}

/// A displayable plan step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionStep {
    pub kind: StepKind,
    pub description: String,
    pub command: String,
}

impl From<&Operation> for ExecutionStep {
    fn from(op: &Operation) -> Self {
        Self {
            kind: op.kind(),
            description: op.description(),
            command: op.command_line(),
        }
    }
}

/// Operations the executor performs for this change set
pub fn operations(changes: &ChangeSet) -> Vec<Operation> {
    build(changes, &changes.rebuild_order())
}

/// Render the plan for display.
///
/// `desired_apps` is the declared app order, used for the re-add steps of a
/// full rebuild. The diff re-adds every desired app in exactly that order, so
/// this matches what [`operations`] yields.
pub fn generate_plan(changes: &ChangeSet, desired_apps: &[String]) -> Vec<ExecutionStep> {
    build(changes, desired_apps)
        .iter()
        .map(ExecutionStep::from)
        .collect()
}

fn build(changes: &ChangeSet, rebuild_order: &[String]) -> Vec<Operation> {
    let mut ops = Vec::new();

    if changes.needs_rebuild() {
        ops.push(Operation::RemoveAll);
        ops.extend(
            rebuild_order
                .iter()
                .enumerate()
                .map(|(idx, name)| Operation::AddApp {
                    name: name.clone(),
                    position: Some(idx + 1),
                }),
        );
    } else {
        // All removals before any addition, whatever order the diff listed them in
        ops.extend(
            changes
                .app_changes
                .iter()
                .filter(|c| c.action == AppAction::Remove)
                .map(|c| Operation::RemoveApp {
                    name: c.app_name.clone(),
                }),
        );
        ops.extend(
            changes
                .app_changes
                .iter()
                .filter(|c| c.action == AppAction::Add)
                .map(|c| Operation::AddApp {
                    name: c.app_name.clone(),
                    position: c.position,
                }),
        );
    }

    ops.extend(changes.setting_changes.iter().map(setting_operation));

    match &changes.downloads_change {
        DownloadsChange::NoChange => {}
        DownloadsChange::Off => ops.push(Operation::RemoveFolder {
            label: DOWNLOADS_LABEL.to_string(),
        }),
        DownloadsChange::Present(tile) => {
            let (view, display) = tile.preset.view_display();
            ops.push(Operation::AddFolder {
                path: tile.path.clone(),
                view,
                display,
                section: tile.section.dockutil_section(),
            });
        }
    }

    if !ops.is_empty() {
        ops.push(Operation::Restart);
    }

    ops
}

fn setting_operation(change: &SettingChange) -> Operation {
    match change.name {
        SettingName::Autohide => {
            Operation::SetAutohide(matches!(change.new_value, SettingValue::Bool(true)))
        }
        SettingName::AutohideDelay => Operation::SetAutohideDelay(change.new_value.as_number()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{AppChange, calculate_diff};
    use crate::model::{
        CurrentState, DesiredState, DownloadsSpec, DownloadsTile, LiveDownloads, Preset, Section,
        Settings,
    };

    fn apps(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn state(desired: &[&str], current: &[&str]) -> (DesiredState, CurrentState) {
        (
            DesiredState {
                apps: apps(desired),
                downloads: DownloadsSpec::Unspecified,
                settings: Settings::default(),
            },
            CurrentState {
                apps: apps(current),
                downloads: LiveDownloads::Absent,
                settings: Settings::default(),
            },
        )
    }

    fn kinds(steps: &[ExecutionStep]) -> Vec<StepKind> {
        steps.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_empty_changes_yield_empty_plan() {
        let changes = ChangeSet::default();
        assert!(generate_plan(&changes, &[]).is_empty());
        assert!(operations(&changes).is_empty());
    }

    #[test]
    fn test_rebuild_plan() {
        let (mut desired, current) = state(&["A", "B", "C"], &["C", "A", "B"]);
        desired.settings = Settings::new(true, 0.0).unwrap();
        let changes = calculate_diff(&desired, &current);

        let steps = generate_plan(&changes, &desired.apps);
        assert_eq!(
            kinds(&steps),
            vec![
                StepKind::RemoveAll,
                StepKind::AddApp,
                StepKind::AddApp,
                StepKind::AddApp,
                StepKind::SetPreference,
                StepKind::Restart,
            ]
        );
        assert_eq!(steps[0].command, "dockutil --remove all --no-restart");
        assert_eq!(steps[1].description, "Add A at position 1");
        assert_eq!(
            steps[3].command,
            "dockutil --add /Applications/C.app --position 3 --no-restart"
        );
        assert_eq!(
            steps[4].command,
            "defaults write com.apple.dock autohide -bool true"
        );
        assert_eq!(steps[5].command, "killall Dock");
    }

    #[test]
    fn test_rebuild_without_other_changes_ends_with_restart() {
        let (desired, current) = state(&["A", "B"], &["B", "A"]);
        let changes = calculate_diff(&desired, &current);

        let steps = generate_plan(&changes, &desired.apps);
        assert_eq!(steps.len(), 4);
        assert_eq!(steps.last().map(|s| s.kind), Some(StepKind::Restart));
        assert_eq!(
            steps.iter().filter(|s| s.kind == StepKind::Restart).count(),
            1
        );
    }

    #[test]
    fn test_plan_matches_executed_operations() {
        let (mut desired, current) = state(&["Mail", "Safari", "Notes"], &["Safari", "Mail"]);
        desired.downloads = DownloadsSpec::Present(DownloadsTile::default());
        let changes = calculate_diff(&desired, &current);

        let rendered: Vec<ExecutionStep> = operations(&changes).iter().map(ExecutionStep::from).collect();
        assert_eq!(generate_plan(&changes, &desired.apps), rendered);
    }

    #[test]
    fn test_incremental_plan_removes_before_adding() {
        let changes = ChangeSet {
            app_changes: vec![
                AppChange {
                    action: AppAction::Add,
                    app_name: "Notes".to_string(),
                    position: Some(2),
                },
                AppChange {
                    action: AppAction::Remove,
                    app_name: "Music".to_string(),
                    position: None,
                },
            ],
            ..ChangeSet::default()
        };

        let steps = generate_plan(&changes, &apps(&["Safari", "Notes"]));
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].description, "Remove Music");
        assert_eq!(steps[0].kind, StepKind::AddApp);
        assert_eq!(steps[0].command, "dockutil --remove Music --no-restart");
        assert_eq!(
            steps[1].command,
            "dockutil --add /Applications/Notes.app --position 2 --no-restart"
        );
        assert_eq!(steps[2].kind, StepKind::Restart);
    }

    #[test]
    fn test_downloads_presets_map_to_dockutil_flags() {
        let cases = [
            (Preset::Classic, Section::Others, "--view auto --display stack --section others"),
            (Preset::Fan, Section::AppsLeft, "--view fan --display stack --section left"),
            (Preset::List, Section::AppsRight, "--view grid --display folder --section right"),
        ];

        for (preset, section, flags) in cases {
            let changes = ChangeSet {
                downloads_change: DownloadsChange::Present(DownloadsTile {
                    preset,
                    path: "~/Downloads".to_string(),
                    section,
                }),
                ..ChangeSet::default()
            };
            let steps = generate_plan(&changes, &[]);
            assert_eq!(steps.len(), 2);
            assert_eq!(
                steps[0].command,
                format!("dockutil --add ~/Downloads {flags} --no-restart")
            );
        }
    }

    #[test]
    fn test_downloads_off_step() {
        let changes = ChangeSet {
            downloads_change: DownloadsChange::Off,
            ..ChangeSet::default()
        };
        let steps = generate_plan(&changes, &[]);
        assert_eq!(steps[0].command, "dockutil --remove Downloads --no-restart");
        assert_eq!(steps[1].kind, StepKind::Restart);
    }

    #[test]
    fn test_settings_before_downloads() {
        let (mut desired, current) = state(&[], &[]);
        desired.settings = Settings::new(false, 0.3).unwrap();
        desired.downloads = DownloadsSpec::Present(DownloadsTile::default());
        let changes = calculate_diff(&desired, &current);

        let steps = generate_plan(&changes, &desired.apps);
        assert_eq!(
            kinds(&steps),
            vec![StepKind::SetPreference, StepKind::AddApp, StepKind::Restart]
        );
        assert_eq!(
            steps[0].command,
            "defaults write com.apple.dock autohide-delay -float 0.3"
        );
        assert_eq!(steps[0].description, "Set autohide delay to 0.3s");
    }
}
