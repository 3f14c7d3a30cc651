//! Start/pause/reset state machine over the persisted timer record

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{
    clock::{Clock, SystemClock},
    timer_state::{format_elapsed, TimerState},
};
use crate::{error::TimerError, storage::Storage};

/// Result of an elapsed-time query
#[derive(Debug, Clone, PartialEq)]
pub struct ElapsedReading {
    pub is_running: bool,
    pub elapsed_seconds: f64,
    pub formatted: String,
}

/// Owns the storage backend and serializes every read-modify-write against it
pub struct TimerEngine {
    storage: Mutex<Box<dyn Storage>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine").finish_non_exhaustive()
    }
}

impl TimerEngine {
    /// Create an engine on the wall clock
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: impl Storage + 'static, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage: Mutex::new(Box::new(storage)),
            clock,
        }
    }

    /// Run `op` on the record while holding the lock, saving only if it succeeds
    fn transact<T, F>(&self, op: F) -> Result<T, TimerError>
    where
        F: FnOnce(&mut TimerState, DateTime<Utc>) -> Result<T, TimerError>,
    {
        let mut storage = self.storage.lock().map_err(|_| TimerError::LockPoisoned)?;
        let now = self.clock.now();
        let mut record = storage.get_or_create(now)?;

        let output = op(&mut record, now)?;
        storage.save(&record)?;
        Ok(output)
    }

    /// Begin a run. Returns the run's start time.
    pub fn start(&self) -> Result<DateTime<Utc>, TimerError> {
        let started = self.transact(|record, now| {
            if record.is_running {
                return Err(TimerError::AlreadyRunning);
            }
            record.start(now);
            Ok(now)
        })?;

        info!("Timer started at {}", started.to_rfc3339());
        Ok(started)
    }

    /// End the current run. Returns the banked seconds.
    pub fn pause(&self) -> Result<f64, TimerError> {
        let elapsed = self.transact(|record, now| {
            if !record.is_running {
                return Err(TimerError::NotRunning);
            }
            Ok(record.pause(now))
        })?;

        info!("Timer paused with {:.3}s banked", elapsed);
        Ok(elapsed)
    }

    /// Banked time plus the in-progress run, without modifying the record
    pub fn elapsed(&self) -> Result<ElapsedReading, TimerError> {
        let record = self.snapshot()?;
        let elapsed_seconds = record.total_seconds(self.clock.now());

        debug!("Elapsed query: running={}, seconds={:.3}", record.is_running, elapsed_seconds);
        Ok(ElapsedReading {
            is_running: record.is_running,
            elapsed_seconds,
            formatted: format_elapsed(elapsed_seconds),
        })
    }

    /// Stop and zero the timer from any state
    pub fn reset(&self) -> Result<(), TimerError> {
        self.transact(|record, now| {
            record.reset(now);
            Ok(())
        })?;

        info!("Timer reset");
        Ok(())
    }

    /// Current stored record
    pub fn snapshot(&self) -> Result<TimerState, TimerError> {
        let mut storage = self.storage.lock().map_err(|_| TimerError::LockPoisoned)?;
        Ok(storage.get_or_create(self.clock.now())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::StorageError,
        state::clock::ManualClock,
        storage::{JsonFileStorage, MemoryStorage},
    };
    use chrono::{Duration, TimeZone};

    fn engine() -> (TimerEngine, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()));
        let engine = TimerEngine::with_clock(MemoryStorage::new(), clock.clone());
        (engine, clock)
    }

    #[test]
    fn test_start_twice_is_already_running() {
        let (engine, _) = engine();
        engine.start().unwrap();
        assert!(matches!(engine.start(), Err(TimerError::AlreadyRunning)));
    }

    #[test]
    fn test_pause_without_start_is_not_running() {
        let (engine, _) = engine();
        assert!(matches!(engine.pause(), Err(TimerError::NotRunning)));

        engine.start().unwrap();
        engine.pause().unwrap();
        assert!(matches!(engine.pause(), Err(TimerError::NotRunning)));
    }

    #[test]
    fn test_elapsed_right_after_start() {
        let (engine, clock) = engine();
        engine.start().unwrap();
        clock.advance(Duration::seconds(90));
        engine.pause().unwrap();

        engine.start().unwrap();
        let reading = engine.elapsed().unwrap();
        assert!(reading.is_running);
        assert_eq!(reading.elapsed_seconds, 90.0);
    }

    #[test]
    fn test_elapsed_includes_running_delta() {
        let (engine, clock) = engine();
        let started = engine.start().unwrap();
        assert_eq!(started, clock.now());

        clock.advance(Duration::milliseconds(3_661_500));
        let reading = engine.elapsed().unwrap();
        assert!(reading.is_running);
        assert_eq!(reading.elapsed_seconds, 3661.5);
        assert_eq!(reading.formatted, "01:01:01");
    }

    #[test]
    fn test_pause_round_trip() {
        let (engine, clock) = engine();
        engine.start().unwrap();
        clock.advance(Duration::seconds(25));
        let banked = engine.pause().unwrap();
        assert_eq!(banked, 25.0);

        // Time passing while paused adds nothing
        clock.advance(Duration::seconds(600));
        let reading = engine.elapsed().unwrap();
        assert!(!reading.is_running);
        assert_eq!(reading.elapsed_seconds, banked);
        assert_eq!(engine.snapshot().unwrap().elapsed_seconds, banked);
    }

    #[test]
    fn test_runs_accumulate() {
        let (engine, clock) = engine();
        for _ in 0..3 {
            engine.start().unwrap();
            clock.advance(Duration::seconds(10));
            engine.pause().unwrap();
            clock.advance(Duration::seconds(100));
        }
        assert_eq!(engine.elapsed().unwrap().elapsed_seconds, 30.0);
    }

    #[test]
    fn test_reset_from_any_state() {
        let (engine, clock) = engine();
        engine.reset().unwrap();
        assert_eq!(engine.elapsed().unwrap().elapsed_seconds, 0.0);

        engine.start().unwrap();
        clock.advance(Duration::seconds(42));
        engine.reset().unwrap();
        let reading = engine.elapsed().unwrap();
        assert!(!reading.is_running);
        assert_eq!(reading.elapsed_seconds, 0.0);
        assert_eq!(reading.formatted, "00:00:00");

        engine.start().unwrap();
        clock.advance(Duration::seconds(5));
        engine.pause().unwrap();
        engine.reset().unwrap();
        let record = engine.snapshot().unwrap();
        assert!(!record.is_running);
        assert!(record.start_time.is_none());
        assert_eq!(record.elapsed_seconds, 0.0);
        assert_eq!(record.updated_at, clock.now());
    }

    #[test]
    fn test_failed_transition_does_not_save() {
        let (engine, clock) = engine();
        engine.start().unwrap();
        let before = engine.snapshot().unwrap();
        clock.advance(Duration::seconds(3));
        assert!(engine.start().is_err());
        assert_eq!(engine.snapshot().unwrap(), before);
    }

    #[test]
    fn test_state_persists_across_engines() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("timer.json");
        let clock = Arc::new(ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()));

        let engine = TimerEngine::with_clock(JsonFileStorage::new(&path), clock.clone());
        engine.start().unwrap();
        clock.advance(Duration::seconds(30));
        drop(engine);

        let engine = TimerEngine::with_clock(JsonFileStorage::new(&path), clock.clone());
        assert!(matches!(engine.start(), Err(TimerError::AlreadyRunning)));
        assert_eq!(engine.pause().unwrap(), 30.0);
    }

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get_or_create(&mut self, _now: DateTime<Utc>) -> Result<TimerState, StorageError> {
            Err(StorageError::Io {
                path: "timer.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        fn save(&mut self, _state: &TimerState) -> Result<(), StorageError> {
            unreachable!()
        }
    }

    #[test]
    fn test_storage_failure_is_fatal() {
        let engine = TimerEngine::new(BrokenStorage);
        let err = engine.reset().unwrap_err();
        assert!(matches!(err, TimerError::Storage(_)));
        assert!(!err.is_soft());
        assert!(TimerError::AlreadyRunning.is_soft());
    }

    #[test]
    fn test_concurrent_starts_admit_one() {
        let (engine, _) = engine();
        let engine = Arc::new(engine);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.start().is_ok())
            })
            .collect();
        let started = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(started, 1);
    }
}
