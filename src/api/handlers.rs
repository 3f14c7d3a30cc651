//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, warn};

use crate::{error::TimerError, state::AppState};
use super::responses::{
    ApiResponse, ElapsedResponse, HealthResponse, PausedResponse, ResetResponse, RootResponse,
    StartedResponse, StatusResponse,
};

/// Turn an engine result into a soft error payload or a 500
fn respond<T, U>(
    action: &str,
    result: Result<T, TimerError>,
    ok: impl FnOnce(T) -> U,
) -> Result<Json<ApiResponse<U>>, StatusCode> {
    match result {
        Ok(value) => Ok(Json(ApiResponse::Ok(ok(value)))),
        Err(e) if e.is_soft() => {
            warn!("Timer {} rejected: {}", action, e);
            Ok(Json(ApiResponse::error(e.to_string())))
        }
        Err(e) => {
            error!("Timer {} failed: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET / - API banner
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Pomodoro Timer API".to_string(),
    })
}

/// Handle POST /timer/start - Begin a run
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<StartedResponse>>, StatusCode> {
    respond("start", state.engine.start(), StartedResponse::new)
}

/// Handle POST /timer/pause - Bank the current run
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<PausedResponse>>, StatusCode> {
    respond("pause", state.engine.pause(), PausedResponse::new)
}

/// Handle GET /timer/elapsed - Report total elapsed time
pub async fn elapsed_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ElapsedResponse>, StatusCode> {
    match state.engine.elapsed() {
        Ok(reading) => Ok(Json(ElapsedResponse {
            is_running: reading.is_running,
            elapsed_seconds: reading.elapsed_seconds,
            elapsed_formatted: reading.formatted,
        })),
        Err(e) => {
            error!("Failed to read elapsed time: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/reset - Zero the timer
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResetResponse>, StatusCode> {
    match state.engine.reset() {
        Ok(()) => Ok(Json(ResetResponse::new())),
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the stored record and server metadata
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.engine.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
