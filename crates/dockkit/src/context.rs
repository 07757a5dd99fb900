//! Collaborator traits the executor drives
//!
//! These traits let the reconciliation core run without depending on
//! dockutil, the preference file, or process signalling directly. The binary
//! wires in real implementations; tests use recording fakes.

use crate::plan::Operation;
use anyhow::Result;

/// Mutations of the Dock's item list
pub trait DockTool {
    /// Add an app, optionally at a 1-based position
    fn add_app(&self, app_name: &str, position: Option<usize>) -> Result<()>;

    /// Remove an item by label
    fn remove(&self, label: &str) -> Result<()>;

    /// Remove every item
    fn remove_all(&self) -> Result<()>;

    /// Add a folder tile
    fn add_folder(&self, path: &str, view: &str, display: &str, section: &str) -> Result<()>;
}

/// Persistent key-value preference store of the Dock
///
/// Reads return the supplied default when the key is missing.
pub trait PreferenceStore {
    fn read_bool(&self, key: &str, default: bool) -> Result<bool>;

    fn write_bool(&self, key: &str, value: bool) -> Result<()>;

    fn read_number(&self, key: &str, default: f64) -> Result<f64>;

    fn write_number(&self, key: &str, value: f64) -> Result<()>;
}

/// Reloads the Dock process
pub trait Restarter {
    fn restart(&self) -> Result<()>;
}

/// Progress callback for execution operations
///
/// Implement this trait to receive progress updates while changes are applied.
pub trait ProgressCallback {
    /// Called before an operation runs
    fn on_operation_start(&mut self, op: &Operation);

    /// Called after an operation succeeded
    fn on_operation_complete(&mut self, op: &Operation);
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_operation_start(&mut self, _op: &Operation) {}
    fn on_operation_complete(&mut self, _op: &Operation) {}
}
