use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Runs external programs on behalf of the adapters
pub trait CommandRunner {
    /// Run a command and capture stdout, failing on a non-zero exit
    fn run(&self, cmd: &str, args: &[String]) -> Result<String>;

    /// Run a command silently, returning success/failure
    fn run_quiet(&self, cmd: &str, args: &[String]) -> bool {
        self.run(cmd, args).is_ok()
    }
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &str, args: &[String]) -> Result<String> {
        log::debug!("Running: {} {}", cmd, args.join(" "));

        let output = Command::new(cmd)
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute: {} {}", cmd, args.join(" ")))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("{} failed: {}", cmd, stderr.trim())
        }
    }

    fn run_quiet(&self, cmd: &str, args: &[String]) -> bool {
        Command::new(cmd)
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

/// Check if a command exists
pub fn command_exists(runner: &dyn CommandRunner, cmd: &str) -> bool {
    runner.run_quiet("which", &[cmd.to_string()])
}
