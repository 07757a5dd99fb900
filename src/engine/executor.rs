//! Plan display and live progress output

use colored::Colorize;
use dockkit::{ExecutionStep, Operation, ProgressCallback, StepKind};

use crate::ui;

/// Print the execution plan, one command per step
pub fn display_plan(steps: &[ExecutionStep], dry_run: bool) {
    let title = if dry_run {
        "Execution plan (dry-run):"
    } else {
        "Execution plan:"
    };
    ui::section(title);

    for (i, step) in steps.iter().enumerate() {
        let marker = match step.kind {
            StepKind::RemoveAll => "!".red(),
            StepKind::AddApp => "•".blue(),
            StepKind::SetPreference => "~".yellow(),
            StepKind::Restart => "↻".cyan(),
        };
        println!(
            "  {} {} {}",
            format!("{:>2}.", i + 1).dimmed(),
            marker,
            step.description
        );
        ui::command(&step.command);
    }
}

/// Echoes each command as it runs
pub struct ConsoleProgress {
    verbose: bool,
    completed: usize,
}

impl ConsoleProgress {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            completed: 0,
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }
}

impl ProgressCallback for ConsoleProgress {
    fn on_operation_start(&mut self, op: &Operation) {
        ui::command(&op.command_line());
    }

    fn on_operation_complete(&mut self, op: &Operation) {
        self.completed += 1;
        if self.verbose {
            println!("    {} {}", "✓".green(), op.description().dimmed());
        }
    }
}
