//! Timer record stored as a JSON document on disk

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::Storage;
use crate::{error::StorageError, state::TimerState};

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Read the record, `None` if the file does not exist yet
    fn load(&self) -> Result<Option<TimerState>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut state: TimerState =
            serde_json::from_str(&content).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;
        state.normalize();
        Ok(Some(state))
    }
}

impl Storage for JsonFileStorage {
    fn get_or_create(&mut self, now: DateTime<Utc>) -> Result<TimerState, StorageError> {
        if let Some(state) = self.load()? {
            return Ok(state);
        }

        info!("No timer state at {}, creating one", self.path.display());
        let state = TimerState::new(now);
        self.save(&state)?;
        Ok(state)
    }

    fn save(&mut self, state: &TimerState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_string_pretty(state)?;

        // Write beside the target then rename so readers never see a partial file
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, content).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        debug!("Saved timer state to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_creates_file_on_first_access() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("timer.json");

        let mut storage = JsonFileStorage::new(&path);
        let state = storage.get_or_create(at(0)).unwrap();
        assert!(path.exists());
        assert!(!state.is_running);
        assert_eq!(state.elapsed_seconds, 0.0);
    }

    #[test]
    fn test_survives_reopen() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("timer.json");

        let mut state = JsonFileStorage::new(&path).get_or_create(at(0)).unwrap();
        state.start(at(5));
        state.pause(at(65));
        state.start(at(100));
        JsonFileStorage::new(&path).save(&state).unwrap();

        let reopened = JsonFileStorage::new(&path).get_or_create(at(200)).unwrap();
        assert_eq!(reopened, state);
        assert_eq!(reopened.elapsed_seconds, 60.0);
        assert_eq!(reopened.start_time, Some(at(100)));
    }

    #[test]
    fn test_inconsistent_record_is_normalized() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("timer.json");
        std::fs::write(
            &path,
            r#"{"start_time":null,"elapsed_seconds":42.5,"is_running":true,"updated_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        let state = JsonFileStorage::new(&path).get_or_create(at(0)).unwrap();
        assert!(!state.is_running);
        assert_eq!(state.elapsed_seconds, 42.5);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("timer.json");
        std::fs::write(&path, "not json").unwrap();

        let result = JsonFileStorage::new(&path).get_or_create(at(0));
        assert!(matches!(result, Err(StorageError::Parse { .. })));
    }
}
