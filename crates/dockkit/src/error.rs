//! Error types for Dock state modelling.
//!
//! Collaborator failures (dockutil, the preference file, process spawning)
//! travel as `anyhow::Error`; this enum only covers values that can never be
//! represented in a [`DesiredState`](crate::DesiredState).

use thiserror::Error;

/// Errors raised while constructing Dock state values.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// `autohide_delay` was below zero
    #[error("autohide_delay must be non-negative, got {0}")]
    NegativeDelay(f64),

    /// `autohide_delay` was NaN or infinite
    #[error("autohide_delay must be a finite number, got {0}")]
    NonFiniteDelay(f64),
}

/// Result type for Dock state construction
pub type Result<T> = std::result::Result<T, Error>;
