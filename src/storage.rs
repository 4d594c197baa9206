//! JSON persistence gateway.
//!
//! The store's snapshot is persisted as six independent documents under one
//! data directory, one JSON file per collection:
//!
//! ```text
//! <data_dir>/
//!   tasks.json               # Vec<Task>
//!   sessions.json            # Vec<PomodoroSession>
//!   weekly_goals.json        # Vec<WeeklyGoal>
//!   weekly_reflections.json  # Vec<WeeklyReflection>
//!   year_goals.json          # Vec<YearGoal>
//!   settings.json            # Settings
//! ```
//!
//! Key names are fixed constants: existing on-device data depends on them.
//! All persistence is best-effort. A missing or undecodable key loads as the
//! collection's default, and a failed write is logged and dropped; the
//! in-memory state stays authoritative and the next save reconciles storage.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::state::AppState;

pub const TASKS_KEY: &str = "tasks";
pub const SESSIONS_KEY: &str = "sessions";
pub const WEEKLY_GOALS_KEY: &str = "weekly_goals";
pub const WEEKLY_REFLECTIONS_KEY: &str = "weekly_reflections";
pub const YEAR_GOALS_KEY: &str = "year_goals";
pub const SETTINGS_KEY: &str = "settings";

/// All persisted keys, in save order.
pub const ALL_KEYS: [&str; 6] = [
    TASKS_KEY,
    SESSIONS_KEY,
    WEEKLY_GOALS_KEY,
    WEEKLY_REFLECTIONS_KEY,
    YEAR_GOALS_KEY,
    SETTINGS_KEY,
];

/// Storage gateway for the state snapshot
#[derive(Debug, Clone)]
pub struct Storage {
    /// Directory holding the six key files
    data_dir: PathBuf,
}

impl Storage {
    /// Create a gateway over an explicit data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Create a gateway over the platform's per-user data directory.
    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("dev", "momentum", "momentum")
            .ok_or(Error::DataDirUnavailable)?;
        Ok(Self::new(dirs.data_dir()))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file backing a storage key.
    pub fn key_file(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }

    // =========================================================================
    // Snapshot load / save
    // =========================================================================

    /// Read all six keys into a snapshot.
    ///
    /// Never fails: each key degrades independently to its default when the
    /// file is absent or does not decode.
    pub fn load(&self) -> AppState {
        AppState {
            tasks: self.read_key(TASKS_KEY),
            sessions: self.read_key(SESSIONS_KEY),
            weekly_goals: self.read_key(WEEKLY_GOALS_KEY),
            weekly_reflections: self.read_key(WEEKLY_REFLECTIONS_KEY),
            year_goals: self.read_key(YEAR_GOALS_KEY),
            settings: self.read_key(SETTINGS_KEY),
        }
    }

    /// Write the full snapshot to all six keys.
    pub fn save(&self, state: &AppState) -> Result<()> {
        self.write_key(TASKS_KEY, &state.tasks)?;
        self.write_key(SESSIONS_KEY, &state.sessions)?;
        self.write_key(WEEKLY_GOALS_KEY, &state.weekly_goals)?;
        self.write_key(WEEKLY_REFLECTIONS_KEY, &state.weekly_reflections)?;
        self.write_key(YEAR_GOALS_KEY, &state.year_goals)?;
        self.write_key(SETTINGS_KEY, &state.settings)?;
        Ok(())
    }

    /// Write the full snapshot, logging the outcome instead of returning it.
    /// A failed write is dropped; in-memory state stays the source of truth.
    pub(crate) fn save_logged(&self, snapshot: &AppState) {
        match self.save(snapshot) {
            Ok(()) => debug!(dir = %self.data_dir.display(), "state snapshot persisted"),
            Err(err) => warn!(
                dir = %self.data_dir.display(),
                error = %err,
                "dropping failed state save"
            ),
        }
    }

    /// Remove all six key files. Missing files are not an error.
    pub fn clear(&self) -> Result<()> {
        for key in ALL_KEYS {
            let path = self.key_file(key);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    // =========================================================================
    // Per-key I/O
    // =========================================================================

    fn read_key<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let path = self.key_file(key);
        if !path.exists() {
            return T::default();
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!(key, error = %err, "unreadable storage key, using defaults");
                return T::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "undecodable storage key, using defaults");
                T::default()
            }
        }
    }

    fn write_key<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.write_atomic(&self.key_file(key), json.as_bytes())
    }

    /// Write data atomically (write to temp, then rename) so a reader or a
    /// crash mid-write never observes a partial document.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_task() -> Task {
        Task {
            id: "t1".to_string(),
            title: "Water plants".to_string(),
            is_completed: false,
            is_top3: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
            completed_at: None,
            date: "2024-01-01".parse().unwrap(),
        }
    }

    #[test]
    fn key_files_live_under_the_data_dir() {
        let storage = Storage::new("/tmp/momentum-test");
        assert_eq!(
            storage.key_file(TASKS_KEY),
            PathBuf::from("/tmp/momentum-test/tasks.json")
        );
        assert_eq!(
            storage.key_file(SETTINGS_KEY),
            PathBuf::from("/tmp/momentum-test/settings.json")
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path());

        let mut state = AppState::default();
        state.tasks.push(sample_task());
        state.settings.dark_mode = true;

        storage.save(&state).unwrap();
        let loaded = storage.load();
        assert_eq!(loaded, state);
    }

    #[test]
    fn missing_keys_load_as_defaults() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path());

        assert_eq!(storage.load(), AppState::default());
    }

    #[test]
    fn undecodable_key_degrades_to_default_without_touching_others() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path());

        let mut state = AppState::default();
        state.tasks.push(sample_task());
        state.settings.user_name = Some("Dana".to_string());
        storage.save(&state).unwrap();

        fs::write(storage.key_file(TASKS_KEY), b"{ not json").unwrap();

        let loaded = storage.load();
        assert!(loaded.tasks.is_empty());
        assert_eq!(loaded.settings.user_name.as_deref(), Some("Dana"));
    }

    #[test]
    fn clear_removes_every_key_and_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path());

        let mut state = AppState::default();
        state.tasks.push(sample_task());
        storage.save(&state).unwrap();
        assert!(storage.key_file(TASKS_KEY).exists());

        storage.clear().unwrap();
        for key in ALL_KEYS {
            assert!(!storage.key_file(key).exists());
        }

        // Clearing an already-empty directory succeeds.
        storage.clear().unwrap();
        assert_eq!(storage.load(), AppState::default());
    }
}
