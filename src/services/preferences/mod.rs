//! Durable application flags.
//!
//! A tiny key-value store: two booleans in a JSON file. Values are loaded
//! once at open and written through on every set, so the last write wins
//! and is immediately visible to subsequent reads.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::preferences::Preferences;

/// Injectable access to the persisted flags, shared by the settings dialog
/// and the boot path.
pub trait SettingsStore {
    fn auto_start_enabled(&self) -> bool;
    fn set_auto_start_enabled(&mut self, enabled: bool) -> Result<()>;
    fn first_launch(&self) -> bool;
    fn set_first_launch(&mut self, first: bool) -> Result<()>;
}

/// JSON-file-backed store.
pub struct FileSettingsStore {
    path: PathBuf,
    values: Preferences,
}

impl FileSettingsStore {
    /// Opens the store, falling back to defaults when the file is missing
    /// or unreadable. Opening never fails; only writes can.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = load_preferences(&path);
        Self { path, values }
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write preferences to {}", self.path.display()))
    }
}

fn load_preferences(path: &Path) -> Preferences {
    if !path.exists() {
        return Preferences::default();
    }
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(values) => values,
            Err(err) => {
                log::warn!(
                    "corrupt preferences file {}: {}; using defaults",
                    path.display(),
                    err
                );
                Preferences::default()
            }
        },
        Err(err) => {
            log::warn!(
                "failed to read preferences {}: {}; using defaults",
                path.display(),
                err
            );
            Preferences::default()
        }
    }
}

impl SettingsStore for FileSettingsStore {
    fn auto_start_enabled(&self) -> bool {
        self.values.auto_start_enabled
    }

    fn set_auto_start_enabled(&mut self, enabled: bool) -> Result<()> {
        self.values.auto_start_enabled = enabled;
        self.persist()
    }

    fn first_launch(&self) -> bool {
        self.values.first_launch
    }

    fn set_first_launch(&mut self, first: bool) -> Result<()> {
        self.values.first_launch = first;
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::open(dir.path().join("preferences.json"));
        assert!(!store.auto_start_enabled());
        assert!(store.first_launch());
    }

    #[test]
    fn writes_survive_a_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let mut store = FileSettingsStore::open(&path);
        store.set_auto_start_enabled(true).unwrap();
        store.set_first_launch(false).unwrap();

        let reopened = FileSettingsStore::open(&path);
        assert!(reopened.auto_start_enabled());
        assert!(!reopened.first_launch());
    }

    #[test]
    fn set_is_immediately_visible_to_reads() {
        let dir = tempdir().unwrap();
        let mut store = FileSettingsStore::open(dir.path().join("preferences.json"));
        store.set_auto_start_enabled(true).unwrap();
        assert!(store.auto_start_enabled());
        store.set_auto_start_enabled(false).unwrap();
        assert!(!store.auto_start_enabled());
    }

    #[test]
    fn corrupt_file_yields_defaults_without_failing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileSettingsStore::open(&path);
        assert!(!store.auto_start_enabled());
        assert!(store.first_launch());
    }

    #[test]
    fn parent_directories_are_created_on_first_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dir/preferences.json");
        let mut store = FileSettingsStore::open(&path);
        store.set_first_launch(false).unwrap();
        assert!(path.exists());
    }
}
