use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::paths;

#[derive(Parser)]
#[command(name = "dock")]
#[command(version)]
#[command(about = "Manage the macOS Dock from YAML configuration", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reset the Dock to match a configuration file
    Reset(ResetArgs),

    /// Save the current Dock as a configuration file
    Backup(BackupArgs),

    /// Print the current Dock configuration
    Show(ShowArgs),

    /// Check a configuration file without touching the Dock
    Validate(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// How to locate the configuration file
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Config file path
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Profile name from ~/.config/dock/profiles/
    #[arg(long, conflicts_with = "file")]
    pub profile: Option<String>,

    /// Config file to use when neither --file nor --profile is given
    #[arg(long, env = paths::ENV_CONFIG, hide = true)]
    pub env_config: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ResetArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Show changes without applying
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct BackupArgs {
    /// Output file path
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}
