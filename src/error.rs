//! Error types for the timer engine and its storage

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to access timer state at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse timer state at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize timer state: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum TimerError {
    #[error("Timer is already running")]
    AlreadyRunning,
    #[error("Timer is not running")]
    NotRunning,
    #[error("storage unavailable: {0}")]
    Storage(#[from] StorageError),
    #[error("timer lock poisoned")]
    LockPoisoned,
}

impl TimerError {
    /// Soft errors are reported to the client as a normal payload
    pub fn is_soft(&self) -> bool {
        matches!(self, TimerError::AlreadyRunning | TimerError::NotRunning)
    }
}
