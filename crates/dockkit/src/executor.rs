//! Execution engine - applies a change set through the collaborators
//!
//! A run is a single linear pass: app list edits, setting writes, the
//! Downloads tile, then one restart. Nothing is retried and nothing already
//! applied is rolled back when a later step fails.

use crate::command::{AUTOHIDE_DELAY_KEY, AUTOHIDE_KEY};
use crate::context::{DockTool, NoProgress, PreferenceStore, ProgressCallback, Restarter};
use crate::diff::ChangeSet;
use crate::plan::{Operation, operations};
use anyhow::{Context, Result};

/// Options for execution
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Don't make changes, just report that there would be some
    pub dry_run: bool,
}

/// Applies change sets against the Dock
pub struct Executor<'a> {
    dock: &'a dyn DockTool,
    prefs: &'a dyn PreferenceStore,
    restarter: &'a dyn Restarter,
    opts: ExecuteOptions,
}

impl<'a> Executor<'a> {
    pub fn new(
        dock: &'a dyn DockTool,
        prefs: &'a dyn PreferenceStore,
        restarter: &'a dyn Restarter,
        opts: ExecuteOptions,
    ) -> Self {
        Self {
            dock,
            prefs,
            restarter,
            opts,
        }
    }

    /// Apply the change set.
    ///
    /// Returns `true` if anything was (or, in a dry run, would be) changed.
    pub fn apply_diff(&self, changes: &ChangeSet) -> Result<bool> {
        self.apply_with_progress(changes, &mut NoProgress)
    }

    /// Apply the change set, reporting each operation to `progress`
    pub fn apply_with_progress<P: ProgressCallback>(
        &self,
        changes: &ChangeSet,
        progress: &mut P,
    ) -> Result<bool> {
        if !changes.has_changes() {
            log::debug!("Dock already matches desired state");
            return Ok(false);
        }

        if self.opts.dry_run {
            log::info!("Dry run - skipping {} change(s)", changes.summary().total());
            return Ok(true);
        }

        for op in operations(changes) {
            progress.on_operation_start(&op);
            self.run(&op)?;
            progress.on_operation_complete(&op);
        }

        Ok(true)
    }

    fn run(&self, op: &Operation) -> Result<()> {
        log::info!("{}", op.description());

        match op {
            Operation::RemoveAll => self
                .dock
                .remove_all()
                .context("Failed to clear dock items"),
            Operation::RemoveApp { name } => self
                .dock
                .remove(name)
                .with_context(|| format!("Failed to remove {name} from dock")),
            Operation::AddApp { name, position } => self
                .dock
                .add_app(name, *position)
                .with_context(|| format!("Failed to add {name} to dock")),
            Operation::RemoveFolder { label } => self
                .dock
                .remove(label)
                .with_context(|| format!("Failed to remove {label} folder from dock")),
            Operation::AddFolder {
                path,
                view,
                display,
                section,
            } => self
                .dock
                .add_folder(path, view, display, section)
                .with_context(|| format!("Failed to add folder {path} to dock")),
            Operation::SetAutohide(value) => self
                .prefs
                .write_bool(AUTOHIDE_KEY, *value)
                .context("Failed to write autohide preference"),
            Operation::SetAutohideDelay(value) => self
                .prefs
                .write_number(AUTOHIDE_DELAY_KEY, *value)
                .context("Failed to write autohide-delay preference"),
            Operation::Restart => {
                // The Dock relaunches itself in most situations, so a failed
                // restart does not fail the run
                if let Err(e) = self.restarter.restart() {
                    log::warn!("Could not restart Dock: {e:#}");
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{AppAction, AppChange, DownloadsChange, calculate_diff};
    use crate::model::{
        CurrentState, DesiredState, DownloadsSpec, DownloadsTile, LiveDownloads, Settings,
    };
    use std::cell::RefCell;

    /// Records every collaborator call in order
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl Recorder {
        fn failing(prefix: &'static str) -> Self {
            Self {
                fail_on: Some(prefix),
                ..Self::default()
            }
        }

        fn record(&self, call: String) -> Result<()> {
            let fails = self.fail_on.is_some_and(|p| call.starts_with(p));
            self.calls.borrow_mut().push(call);
            if fails {
                anyhow::bail!("simulated failure");
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl DockTool for Recorder {
        fn add_app(&self, app_name: &str, position: Option<usize>) -> Result<()> {
            self.record(format!("add {app_name} {position:?}"))
        }

        fn remove(&self, label: &str) -> Result<()> {
            self.record(format!("remove {label}"))
        }

        fn remove_all(&self) -> Result<()> {
            self.record("remove_all".to_string())
        }

        fn add_folder(&self, path: &str, view: &str, display: &str, section: &str) -> Result<()> {
            self.record(format!("add_folder {path} {view} {display} {section}"))
        }
    }

    impl PreferenceStore for Recorder {
        fn read_bool(&self, _key: &str, default: bool) -> Result<bool> {
            Ok(default)
        }

        fn write_bool(&self, key: &str, value: bool) -> Result<()> {
            self.record(format!("write {key} {value}"))
        }

        fn read_number(&self, _key: &str, default: f64) -> Result<f64> {
            Ok(default)
        }

        fn write_number(&self, key: &str, value: f64) -> Result<()> {
            self.record(format!("write {key} {value}"))
        }
    }

    impl Restarter for Recorder {
        fn restart(&self) -> Result<()> {
            self.record("restart".to_string())
        }
    }

    fn apps(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn apply(recorder: &Recorder, changes: &ChangeSet, dry_run: bool) -> Result<bool> {
        let executor = Executor::new(recorder, recorder, recorder, ExecuteOptions { dry_run });
        executor.apply_diff(changes)
    }

    #[test]
    fn test_no_changes_is_noop() {
        let recorder = Recorder::default();
        let changed = apply(&recorder, &ChangeSet::default(), false).unwrap();

        assert!(!changed);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_dry_run_has_no_side_effects() {
        let recorder = Recorder::default();
        let changes = ChangeSet {
            downloads_change: DownloadsChange::Off,
            ..ChangeSet::default()
        };

        assert!(apply(&recorder, &changes, true).unwrap());
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_removal_issued_before_addition() {
        let recorder = Recorder::default();
        let changes = ChangeSet {
            app_changes: vec![
                AppChange {
                    action: AppAction::Add,
                    app_name: "Notes".to_string(),
                    position: Some(1),
                },
                AppChange {
                    action: AppAction::Remove,
                    app_name: "Music".to_string(),
                    position: None,
                },
            ],
            ..ChangeSet::default()
        };

        assert!(apply(&recorder, &changes, false).unwrap());
        assert_eq!(
            recorder.calls(),
            vec!["remove Music", "add Notes Some(1)", "restart"]
        );
    }

    #[test]
    fn test_rebuild_clears_then_adds_in_position_order() {
        let recorder = Recorder::default();
        let desired = DesiredState {
            apps: apps(&["A", "B", "C"]),
            downloads: DownloadsSpec::Unspecified,
            settings: Settings::default(),
        };
        let current = CurrentState {
            apps: apps(&["C", "A", "B"]),
            ..CurrentState::default()
        };

        let changes = calculate_diff(&desired, &current);
        assert!(apply(&recorder, &changes, false).unwrap());
        assert_eq!(
            recorder.calls(),
            vec![
                "remove_all",
                "add A Some(1)",
                "add B Some(2)",
                "add C Some(3)",
                "restart",
            ]
        );
    }

    #[test]
    fn test_settings_then_downloads_then_restart() {
        let recorder = Recorder::default();
        let desired = DesiredState {
            apps: Vec::new(),
            downloads: DownloadsSpec::Present(DownloadsTile::default()),
            settings: Settings::new(true, 0.5).unwrap(),
        };
        let current = CurrentState {
            downloads: LiveDownloads::Absent,
            ..CurrentState::default()
        };

        let changes = calculate_diff(&desired, &current);
        assert!(apply(&recorder, &changes, false).unwrap());
        assert_eq!(
            recorder.calls(),
            vec![
                "write autohide true",
                "write autohide-delay 0.5",
                "add_folder ~/Downloads auto stack others",
                "restart",
            ]
        );
    }

    #[test]
    fn test_downloads_off_removes_tile() {
        let recorder = Recorder::default();
        let changes = ChangeSet {
            downloads_change: DownloadsChange::Off,
            ..ChangeSet::default()
        };

        apply(&recorder, &changes, false).unwrap();
        assert_eq!(recorder.calls(), vec!["remove Downloads", "restart"]);
    }

    #[test]
    fn test_restart_failure_is_swallowed() {
        let recorder = Recorder::failing("restart");
        let changes = ChangeSet {
            downloads_change: DownloadsChange::Off,
            ..ChangeSet::default()
        };

        assert!(apply(&recorder, &changes, false).unwrap());
        assert_eq!(recorder.calls(), vec!["remove Downloads", "restart"]);
    }

    #[test]
    fn test_mutation_failure_propagates_without_restart() {
        let recorder = Recorder::failing("add Notes");
        let changes = ChangeSet {
            app_changes: vec![
                AppChange {
                    action: AppAction::Remove,
                    app_name: "Music".to_string(),
                    position: None,
                },
                AppChange {
                    action: AppAction::Add,
                    app_name: "Notes".to_string(),
                    position: Some(2),
                },
            ],
            ..ChangeSet::default()
        };

        let err = apply(&recorder, &changes, false).unwrap_err();
        assert!(err.to_string().contains("Failed to add Notes"));
        // The removal already happened and is not rolled back
        assert_eq!(recorder.calls(), vec!["remove Music", "add Notes Some(2)"]);
    }

    #[test]
    fn test_progress_sees_every_operation() {
        struct Collect(Vec<String>);

        impl ProgressCallback for Collect {
            fn on_operation_start(&mut self, _op: &Operation) {}

            fn on_operation_complete(&mut self, op: &Operation) {
                self.0.push(op.command_line());
            }
        }

        let recorder = Recorder::default();
        let changes = ChangeSet {
            downloads_change: DownloadsChange::Off,
            ..ChangeSet::default()
        };
        let executor = Executor::new(&recorder, &recorder, &recorder, ExecuteOptions::default());
        let mut progress = Collect(Vec::new());

        executor.apply_with_progress(&changes, &mut progress).unwrap();
        assert_eq!(
            progress.0,
            vec!["dockutil --remove Downloads --no-restart", "killall Dock"]
        );
    }
}
