//! # Dockkit
//!
//! Declarative management of the macOS Dock.
//!
//! This crate compares a declared Dock layout against what the Dock currently
//! shows, and converges the two with as little churn as dockutil allows.
//!
//! ## Core Concepts
//!
//! - **DesiredState / CurrentState**: ordered pinned apps, the Downloads tile,
//!   and the autohide settings
//! - **ChangeSet**: the output of [`calculate_diff`]
//! - **Operation**: one side effect; [`operations`] orders them and
//!   [`generate_plan`] renders the same order for display
//! - **Executor**: runs the operations through collaborator traits
//!
//! ## Example
//!
//! ```ignore
//! use dockkit::{calculate_diff, generate_plan, ExecuteOptions, Executor};
//!
//! let changes = calculate_diff(&desired, &current);
//! for step in generate_plan(&changes, &desired.apps) {
//!     println!("$ {}", step.command);
//! }
//!
//! let executor = Executor::new(&dockutil, &prefs, &restarter, ExecuteOptions::default());
//! executor.apply_diff(&changes)?;
//! ```
//!
//! ## Ordering
//!
//! dockutil cannot move an item in place. If the apps present on both sides
//! appear in a different relative order, the app list is cleared and rebuilt;
//! otherwise only the missing and extra apps are touched, removals first.
//!
//! ## Provider Traits
//!
//! - [`DockTool`]: item list mutations
//! - [`PreferenceStore`]: Dock preference reads and writes
//! - [`Restarter`]: reloads the Dock
//! - [`ProgressCallback`]: receives per-operation progress

pub mod command;
pub mod context;
pub mod diff;
pub mod error;
pub mod executor;
pub mod model;
pub mod paths;
pub mod plan;
pub mod validate;

// Re-export main types at crate root
pub use context::{DockTool, NoProgress, PreferenceStore, ProgressCallback, Restarter};
pub use diff::{
    AppAction, AppChange, ChangeSet, DiffSummary, DownloadsChange, SettingChange, SettingName,
    SettingValue, calculate_diff,
};
pub use error::{Error, Result};
pub use executor::{ExecuteOptions, Executor};
pub use model::{
    CurrentState, DesiredState, DownloadsSpec, DownloadsTile, LiveDownloads, Preset, Section,
    Settings,
};
pub use plan::{ExecutionStep, Operation, StepKind, generate_plan, operations};
pub use validate::{Warning, validate};
