//! Terminal presentation of the reconciliation engine
//!
//! 1. Diffing - show what differs between the config and the Dock
//! 2. Executing - show and run the ordered operations

pub mod differ;
pub mod executor;

pub use differ::display_changes;
pub use executor::{ConsoleProgress, display_plan};
