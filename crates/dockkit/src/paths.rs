//! Home-relative path helpers
//!
//! The home directory is always passed in, never looked up here.

use std::path::{Path, PathBuf};

/// Expand a leading `~` against `home`
pub fn expand_home(path: &str, home: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde_with_context(path, || home.to_str()).as_ref())
}

/// Shorten a path under `home` to `~/...`; other paths are returned unchanged
pub fn contract_home(path: &str, home: &Path) -> String {
    match Path::new(path).strip_prefix(home) {
        Ok(rel) if rel.as_os_str().is_empty() => "~".to_string(),
        Ok(rel) => format!("~/{}", rel.display()),
        Err(_) => path.to_string(),
    }
}
