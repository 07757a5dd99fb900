//! Semantic checks over a desired Dock state
//!
//! Checks here never fail a run; they produce warnings for the user.

use crate::model::{DesiredState, DownloadsSpec};
use crate::paths::expand_home;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// A non-fatal problem found in a configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The same app is listed more than once
    DuplicateApp(String),
    /// The Downloads tile points at a path that does not exist
    MissingDownloadsPath(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateApp(name) => write!(f, "Duplicate app name found: {name}"),
            Self::MissingDownloadsPath(path) => write!(f, "Downloads path does not exist: {path}"),
        }
    }
}

/// Validate a desired state, resolving `~` against `home`
pub fn validate(desired: &DesiredState, home: &Path) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let mut seen = HashSet::new();
    for app in &desired.apps {
        if !seen.insert(app.as_str()) {
            warnings.push(Warning::DuplicateApp(app.clone()));
        }
    }

    if let DownloadsSpec::Present(tile) = &desired.downloads
        && !expand_home(&tile.path, home).exists()
    {
        warnings.push(Warning::MissingDownloadsPath(tile.path.clone()));
    }

    warnings
}
