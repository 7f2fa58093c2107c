//! File-backed key-value storage for the persisted slices
//!
//! Each slice lives in its own JSON file under one data directory, the
//! desktop stand-in for a browser profile's local storage. Loads are
//! self-healing: a missing, corrupt, or invalid record degrades to the
//! caller's default instead of erroring, so one bad slice can never keep
//! the application from starting.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::schema::ValidationErrors;
use crate::schema::migrate::migrate_slice;

/// Slice keys used by the state containers
pub mod keys {
    pub const SURVEY_STATE: &str = "survey_state";
    pub const SCHEDULE_STATE: &str = "schedule_state";
    pub const CHAT_STATE: &str = "chat_state";
    pub const NAVIGATION_STATE: &str = "navigation_state";
}

/// Handle to one storage directory
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Open or create a storage directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).context("Failed to create storage directory")?;
        debug!(dir = %dir.display(), "Storage::open: ready");
        Ok(Self { dir })
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Persist one slice
    ///
    /// The value must already be validated; save serializes what it is
    /// given. Writes go through a sibling temp file and a rename so a crash
    /// mid-write cannot leave a half-written record behind.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.file_path(key);
        let json = serde_json::to_string_pretty(value).context("Failed to serialize slice")?;

        let tmp_path = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!(key, path = %path.display(), "Storage::save: wrote slice");
        Ok(())
    }

    /// Load one slice, falling back to `default` on any problem
    ///
    /// A record with a stale or missing version tag is migrated before
    /// validation. Failures are logged, never returned: missing file is the
    /// first-run case, everything else is corruption this layer absorbs.
    pub fn load<T>(
        &self,
        key: &str,
        default: T,
        validate: impl Fn(&Value) -> Result<T, ValidationErrors>,
    ) -> T {
        let path = self.file_path(key);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(key, "Storage::load: no stored record, using default");
                return default;
            }
            Err(e) => {
                warn!(key, error = %e, "Storage::load: unreadable record, using default");
                return default;
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Storage::load: corrupt JSON, using default");
                return default;
            }
        };

        match migrate_slice(&value, validate) {
            Ok(slice) => {
                debug!(key, "Storage::load: loaded slice");
                slice
            }
            Err(errors) => {
                warn!(key, %errors, "Storage::load: invalid record, using default");
                default
            }
        }
    }

    /// Whether a record exists for the key
    pub fn contains(&self, key: &str) -> bool {
        self.file_path(key).exists()
    }
}

/// Default storage directory under the platform data dir
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("studyweek"))
        .unwrap_or_else(|| PathBuf::from(".studyweek"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate_chat_state;
    use crate::state::ChatState;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let dir = TempDir::new().expect("temp dir");
        let storage = Storage::open(dir.path()).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_missing_key_returns_default() {
        let (_dir, storage) = storage();
        let state = storage.load(keys::CHAT_STATE, ChatState::default(), validate_chat_state);
        assert_eq!(state, ChatState::default());
        assert!(!storage.contains(keys::CHAT_STATE));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_dir, storage) = storage();
        let mut state = ChatState::default();
        state.onboarding_completed = true;
        storage.save(keys::CHAT_STATE, &state).unwrap();

        let loaded = storage.load(keys::CHAT_STATE, ChatState::default(), validate_chat_state);
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_corrupt_json_returns_default() {
        let (dir, storage) = storage();
        std::fs::write(dir.path().join("chat_state.json"), "{not json").unwrap();

        let state = storage.load(keys::CHAT_STATE, ChatState::default(), validate_chat_state);
        assert_eq!(state, ChatState::default());
    }

    #[test]
    fn test_invalid_record_returns_default() {
        let (dir, storage) = storage();
        std::fs::write(
            dir.path().join("chat_state.json"),
            r#"{"version":"1.0.0","messages":"oops"}"#,
        )
        .unwrap();

        let state = storage.load(keys::CHAT_STATE, ChatState::default(), validate_chat_state);
        assert_eq!(state, ChatState::default());
    }

    #[test]
    fn test_stale_version_is_migrated_on_load() {
        let (dir, storage) = storage();
        std::fs::write(
            dir.path().join("chat_state.json"),
            r#"{"version":"0.9.0","messages":[],"onboardingCompleted":true}"#,
        )
        .unwrap();

        let state = storage.load(keys::CHAT_STATE, ChatState::default(), validate_chat_state);
        assert_eq!(state.version, crate::schema::SCHEMA_VERSION);
        assert!(state.onboarding_completed);
    }
}
