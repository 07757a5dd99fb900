use anyhow::Result;
use dockkit::Restarter;
use dockkit::command;

use crate::runner::CommandRunner;

/// Restarts the Dock with `killall Dock`; launchd brings it back
pub struct KillallRestarter<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> KillallRestarter<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }
}

impl Restarter for KillallRestarter<'_> {
    fn restart(&self) -> Result<()> {
        self.runner.run("killall", &command::restart_args())?;
        Ok(())
    }
}
