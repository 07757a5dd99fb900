//! Adapters between the reconciliation core and the running system

pub mod dockutil;
pub mod plist;
pub mod restart;

pub use dockutil::Dockutil;
pub use plist::PlistStore;
pub use restart::KillallRestarter;
