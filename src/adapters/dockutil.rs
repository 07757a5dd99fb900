//! dockutil wrapper - lists and edits Dock items

use anyhow::Result;
use dockkit::command::{self, DOCKUTIL};
use dockkit::{DockTool, paths};
use std::path::PathBuf;

use crate::runner::{self, CommandRunner};

/// Section marker dockutil prints for permanently pinned apps
const PERSISTENT_APPS: &str = "persistentApps";

/// dockutil driven through a [`CommandRunner`]
pub struct Dockutil<'a> {
    runner: &'a dyn CommandRunner,
    home: PathBuf,
}

impl<'a> Dockutil<'a> {
    pub fn new(runner: &'a dyn CommandRunner, home: PathBuf) -> Self {
        Self { runner, home }
    }

    /// Check if dockutil is installed
    pub fn check_installed(&self) -> bool {
        runner::command_exists(self.runner, DOCKUTIL)
    }

    /// Pinned apps, in Dock order
    pub fn list_apps(&self) -> Result<Vec<String>> {
        let output = self.runner.run(DOCKUTIL, &["--list".to_string()])?;
        Ok(parse_list(&output))
    }

    fn run(&self, args: &[String]) -> Result<()> {
        self.runner.run(DOCKUTIL, args)?;
        Ok(())
    }
}

impl DockTool for Dockutil<'_> {
    fn add_app(&self, app_name: &str, position: Option<usize>) -> Result<()> {
        self.run(&command::add_app_args(app_name, position))
    }

    fn remove(&self, label: &str) -> Result<()> {
        self.run(&command::remove_args(label))
    }

    fn remove_all(&self) -> Result<()> {
        self.run(&command::remove_all_args())
    }

    fn add_folder(&self, path: &str, view: &str, display: &str, section: &str) -> Result<()> {
        // dockutil gets no shell, so `~` must be resolved here
        let expanded = paths::expand_home(path, &self.home)
            .to_string_lossy()
            .to_string();
        self.run(&command::add_folder_args(&expanded, view, display, section))
    }
}

/// Parse `dockutil --list` output.
///
/// Each line is `label<TAB>url<TAB>section<TAB>plist<TAB>bundle id`. Only rows
/// in the pinned-apps section are kept; running-but-unpinned apps and folder
/// tiles such as Downloads live in other sections.
pub fn parse_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 3 || fields[2].trim() != PERSISTENT_APPS {
                return None;
            }
            Some(fields[0].trim().to_string())
        })
        .filter(|name| !name.is_empty())
        .collect()
}
