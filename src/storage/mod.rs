//! Persistence for the single timer record
//!
//! The engine only needs get-or-create and save, so backends stay small.

pub mod json_file;
pub mod memory;

use chrono::{DateTime, Utc};

use crate::{error::StorageError, state::TimerState};

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

/// Backend holding the one timer record
pub trait Storage: Send {
    /// Load the record, creating a paused one stamped with `now` on first access
    fn get_or_create(&mut self, now: DateTime<Utc>) -> Result<TimerState, StorageError>;

    /// Persist the record
    fn save(&mut self, state: &TimerState) -> Result<(), StorageError>;
}
