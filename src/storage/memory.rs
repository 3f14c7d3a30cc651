//! In-process storage, lost on restart

use chrono::{DateTime, Utc};

use super::Storage;
use crate::{error::StorageError, state::TimerState};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: Option<TimerState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_or_create(&mut self, now: DateTime<Utc>) -> Result<TimerState, StorageError> {
        Ok(self.record.get_or_insert_with(|| TimerState::new(now)).clone())
    }

    fn save(&mut self, state: &TimerState) -> Result<(), StorageError> {
        self.record = Some(state.clone());
        Ok(())
    }
}
