//! Reads what the Dock currently shows

use anyhow::{Context, Result};
use dockkit::command::{AUTOHIDE_DELAY_KEY, AUTOHIDE_KEY};
use dockkit::model::DOWNLOADS_LABEL;
use dockkit::{
    CurrentState, DownloadsTile, LiveDownloads, PreferenceStore, Preset, Section, Settings, paths,
};
use plist::{Dictionary, Value};
use std::path::{Path, PathBuf};

use crate::adapters::{Dockutil, PlistStore};

const DIRECTORY_TILE: &str = "directory-tile";

/// Builds a [`CurrentState`] from dockutil and the preference file
pub struct StateReader<'a> {
    dockutil: &'a Dockutil<'a>,
    prefs: &'a PlistStore,
    home: PathBuf,
}

impl<'a> StateReader<'a> {
    pub fn new(dockutil: &'a Dockutil<'a>, prefs: &'a PlistStore, home: &Path) -> Self {
        Self {
            dockutil,
            prefs,
            home: home.to_path_buf(),
        }
    }

    pub fn read(&self) -> Result<CurrentState> {
        log::debug!("Reading Dock preferences from {}", self.prefs.path().display());
        let apps = self
            .dockutil
            .list_apps()
            .context("Failed to list Dock apps")?;
        let settings = self.read_settings()?;
        let downloads = find_downloads_tile(&self.prefs.persistent_others()?, &self.home);

        log::debug!(
            "Current Dock: {} apps, downloads {:?}, settings {:?}",
            apps.len(),
            downloads,
            settings
        );

        Ok(CurrentState {
            apps,
            downloads,
            settings,
        })
    }

    fn read_settings(&self) -> Result<Settings> {
        let autohide = self.prefs.read_bool(AUTOHIDE_KEY, false)?;
        let delay = self.prefs.read_number(AUTOHIDE_DELAY_KEY, 0.0)?;
        Settings::new(autohide, delay)
            .with_context(|| format!("Invalid {AUTOHIDE_DELAY_KEY} in Dock preferences"))
    }
}

/// Find the Downloads folder tile among `persistent-others` entries
pub fn find_downloads_tile(items: &[Value], home: &Path) -> LiveDownloads {
    let tile_data = items.iter().filter_map(Value::as_dictionary).find_map(|item| {
        let is_directory = item
            .get("tile-type")
            .and_then(Value::as_string)
            .is_some_and(|t| t == DIRECTORY_TILE);
        let data = item.get("tile-data").and_then(Value::as_dictionary)?;
        let is_downloads = data
            .get("file-label")
            .and_then(Value::as_string)
            .is_some_and(|label| label == DOWNLOADS_LABEL);
        (is_directory && is_downloads).then_some(data)
    });

    match tile_data {
        Some(data) => LiveDownloads::Present(tile_from_data(data, home)),
        None => LiveDownloads::Absent,
    }
}

fn tile_from_data(data: &Dictionary, home: &Path) -> DownloadsTile {
    let preset = data
        .get("displayas")
        .and_then(Value::as_signed_integer)
        .map_or(Preset::Fan, Preset::from_display_code);

    let path = data
        .get("file-data")
        .and_then(Value::as_dictionary)
        .and_then(|file_data| file_data.get("_CFURLString"))
        .and_then(Value::as_string)
        .map_or_else(
            || DownloadsTile::default().path,
            |url| path_from_url(url, home),
        );

    DownloadsTile {
        preset,
        path,
        // Tiles read from persistent-others always belong to that section
        section: Section::Others,
    }
}

/// `file:///Users/me/Downloads/` → `~/Downloads`
fn path_from_url(url: &str, home: &Path) -> String {
    let path = url.strip_prefix("file://").unwrap_or(url);
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    paths::contract_home(path, home)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(label: &str, tile_type: &str, url: Option<&str>, displayas: Option<i64>) -> Value {
        let mut data = Dictionary::new();
        data.insert("file-label".to_string(), Value::String(label.to_string()));
        if let Some(url) = url {
            let mut file_data = Dictionary::new();
            file_data.insert("_CFURLString".to_string(), Value::String(url.to_string()));
            data.insert("file-data".to_string(), Value::Dictionary(file_data));
        }
        if let Some(code) = displayas {
            data.insert("displayas".to_string(), Value::Integer(code.into()));
        }

        let mut item = Dictionary::new();
        item.insert("tile-type".to_string(), Value::String(tile_type.to_string()));
        item.insert("tile-data".to_string(), Value::Dictionary(data));
        Value::Dictionary(item)
    }

    fn home() -> &'static Path {
        Path::new("/Users/test")
    }

    #[test]
    fn test_finds_downloads_tile() {
        let items = vec![tile(
            "Downloads",
            "directory-tile",
            Some("file:///Users/test/Downloads/"),
            Some(1),
        )];

        assert_eq!(
            find_downloads_tile(&items, home()),
            LiveDownloads::Present(DownloadsTile {
                preset: Preset::Fan,
                path: "~/Downloads".to_string(),
                section: Section::Others,
            })
        );
    }

    #[test]
    fn test_absent_when_no_tile() {
        assert_eq!(find_downloads_tile(&[], home()), LiveDownloads::Absent);

        let items = vec![
            tile(
                "Documents",
                "directory-tile",
                Some("file:///Users/test/Documents/"),
                Some(0),
            ),
            tile("Downloads", "url-tile", Some("https://example.com/"), None),
        ];
        assert_eq!(find_downloads_tile(&items, home()), LiveDownloads::Absent);
    }

    #[test]
    fn test_first_matching_tile_wins() {
        let items = vec![
            tile(
                "Downloads",
                "directory-tile",
                Some("file:///Users/test/Downloads/"),
                Some(2),
            ),
            tile(
                "Downloads",
                "directory-tile",
                Some("file:///Volumes/Data/Downloads/"),
                Some(0),
            ),
        ];

        let live = find_downloads_tile(&items, home());
        let tile = live.tile().unwrap();
        assert_eq!(tile.preset, Preset::List);
        assert_eq!(tile.path, "~/Downloads");
    }

    #[test]
    fn test_display_codes() {
        let cases = [
            (Some(0), Preset::Classic),
            (Some(1), Preset::Fan),
            (Some(2), Preset::List),
            (Some(7), Preset::Fan),
            (None, Preset::Fan),
        ];

        for (code, preset) in cases {
            let items = vec![tile("Downloads", "directory-tile", None, code)];
            let live = find_downloads_tile(&items, home());
            assert_eq!(live.tile().unwrap().preset, preset);
        }
    }

    #[test]
    fn test_missing_url_defaults_path() {
        let items = vec![tile("Downloads", "directory-tile", None, Some(1))];
        assert_eq!(
            find_downloads_tile(&items, home()).tile().unwrap().path,
            "~/Downloads"
        );
    }

    #[test]
    fn test_path_outside_home_is_kept() {
        let items = vec![tile(
            "Downloads",
            "directory-tile",
            Some("file:///Volumes/Data/Downloads/"),
            Some(1),
        )];
        assert_eq!(
            find_downloads_tile(&items, home()).tile().unwrap().path,
            "/Volumes/Data/Downloads"
        );
    }

    #[test]
    fn test_path_from_url() {
        assert_eq!(path_from_url("file:///Users/test/Downloads/", home()), "~/Downloads");
        assert_eq!(path_from_url("file:///Users/test/", home()), "~");
        assert_eq!(path_from_url("file:///", home()), "/");
    }
}
