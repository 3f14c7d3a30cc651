//! Pomodoro Timer - a persistent single-user elapsed-time tracker over HTTP
//!
//! This library provides the timer state machine, its storage backends, and the
//! HTTP API that exposes start, pause, elapsed and reset.

pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod api;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{StorageError, TimerError};
pub use state::{AppState, TimerEngine, TimerState};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
