//! State management module
//!
//! This module contains the timer record, the engine driving it, and the
//! shared server state handed to the HTTP handlers.

pub mod app_state;
pub mod clock;
pub mod timer_engine;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use clock::{Clock, SystemClock};
pub use timer_engine::{ElapsedReading, TimerEngine};
pub use timer_state::{format_elapsed, TimerState};
