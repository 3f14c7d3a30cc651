//! Timer record structure and accounting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single persisted timer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    /// Start of the current run, present only while running
    pub start_time: Option<DateTime<Utc>>,
    /// Seconds banked from completed runs
    pub elapsed_seconds: f64,
    pub is_running: bool,
    pub updated_at: DateTime<Utc>,
}

impl TimerState {
    /// Create a paused timer with nothing banked
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            start_time: None,
            elapsed_seconds: 0.0,
            is_running: false,
            updated_at: now,
        }
    }

    /// Begin a run at `now`
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.start_time = Some(now);
        self.is_running = true;
        self.updated_at = now;
    }

    /// Bank the current run and stop. Returns the new accumulator.
    pub fn pause(&mut self, now: DateTime<Utc>) -> f64 {
        self.elapsed_seconds += self.running_seconds(now);
        self.start_time = None;
        self.is_running = false;
        self.updated_at = now;
        self.elapsed_seconds
    }

    /// Drop all accumulated time and stop
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.start_time = None;
        self.elapsed_seconds = 0.0;
        self.is_running = false;
        self.updated_at = now;
    }

    /// Seconds spent in the current run, zero when paused.
    ///
    /// A start time in the future (wall clock stepped back) counts as zero so the
    /// accumulator never shrinks.
    pub fn running_seconds(&self, now: DateTime<Utc>) -> f64 {
        match (self.is_running, self.start_time) {
            (true, Some(start)) => {
                let millis = (now - start).num_milliseconds().max(0);
                millis as f64 / 1000.0
            }
            _ => 0.0,
        }
    }

    /// Banked time plus the in-progress run
    pub fn total_seconds(&self, now: DateTime<Utc>) -> f64 {
        self.elapsed_seconds + self.running_seconds(now)
    }

    /// Repair a record that breaks the running/start-time pairing
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;

        if self.is_running != self.start_time.is_some() {
            self.is_running = false;
            self.start_time = None;
            changed = true;
        }
        if !self.elapsed_seconds.is_finite() || self.elapsed_seconds < 0.0 {
            self.elapsed_seconds = 0.0;
            changed = true;
        }

        if changed {
            tracing::warn!("Normalized inconsistent timer record");
        }
        changed
    }
}

/// Format seconds as `HH:MM:SS`, flooring to whole seconds
pub fn format_elapsed(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
