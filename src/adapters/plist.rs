//! Dock preference file access

use anyhow::{Context, Result};
use dockkit::PreferenceStore;
use plist::{Dictionary, Value};
use std::path::{Path, PathBuf};

/// Location of the Dock preferences, relative to the home directory
pub const DOCK_PLIST: &str = "Library/Preferences/com.apple.dock.plist";

/// Reads and writes `com.apple.dock.plist` directly
pub struct PlistStore {
    path: PathBuf,
}

impl PlistStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store for the user owning `home`
    pub fn for_home(home: &Path) -> Self {
        Self::new(home.join(DOCK_PLIST))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole preference dictionary; a missing file reads as empty
    pub fn read_dict(&self) -> Result<Dictionary> {
        if !self.path.exists() {
            log::debug!("{} not found, using empty preferences", self.path.display());
            return Ok(Dictionary::new());
        }

        let value = Value::from_file(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        match value {
            Value::Dictionary(dict) => Ok(dict),
            _ => anyhow::bail!("Expected plist dictionary at root of {}", self.path.display()),
        }
    }

    /// Read a single value
    pub fn read_value(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_dict()?.remove(key))
    }

    /// Entries of the `persistent-others` array (folders and stacks)
    pub fn persistent_others(&self) -> Result<Vec<Value>> {
        match self.read_value("persistent-others")? {
            Some(Value::Array(items)) => Ok(items),
            _ => Ok(Vec::new()),
        }
    }

    fn write_value(&self, key: &str, value: Value) -> Result<()> {
        let mut dict = self.read_dict()?;
        dict.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        Value::Dictionary(dict)
            .to_file_binary(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

impl PreferenceStore for PlistStore {
    fn read_bool(&self, key: &str, default: bool) -> Result<bool> {
        Ok(match self.read_value(key)? {
            Some(Value::Boolean(value)) => value,
            Some(Value::Integer(value)) => value.as_signed().is_some_and(|n| n != 0),
            _ => default,
        })
    }

    fn write_bool(&self, key: &str, value: bool) -> Result<()> {
        self.write_value(key, Value::Boolean(value))
    }

    fn read_number(&self, key: &str, default: f64) -> Result<f64> {
        Ok(match self.read_value(key)? {
            Some(Value::Real(value)) => value,
            Some(Value::Integer(value)) => value.as_signed().map_or(default, |n| n as f64),
            _ => default,
        })
    }

    fn write_number(&self, key: &str, value: f64) -> Result<()> {
        self.write_value(key, Value::Real(value))
    }
}
