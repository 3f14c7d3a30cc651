//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerState;

/// Either a success payload or a soft error, both sent with status 200
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Ok(T),
    Error(ErrorResponse),
}

impl<T> ApiResponse<T> {
    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorResponse {
            error: message.into(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartedResponse {
    pub status: String,
    pub start_time: DateTime<Utc>,
}

impl StartedResponse {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            status: "started".to_string(),
            start_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PausedResponse {
    pub status: String,
    pub elapsed_seconds: f64,
}

impl PausedResponse {
    pub fn new(elapsed_seconds: f64) -> Self {
        Self {
            status: "paused".to_string(),
            elapsed_seconds,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElapsedResponse {
    pub is_running: bool,
    pub elapsed_seconds: f64,
    pub elapsed_formatted: String,
}

/// Reset always reports an integral zero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub status: String,
    pub elapsed_seconds: u64,
}

impl ResetResponse {
    pub fn new() -> Self {
        Self {
            status: "reset".to_string(),
            elapsed_seconds: 0,
        }
    }
}

impl Default for ResetResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Server status with the raw timer record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
