//! HTTP endpoint handlers

use std::{sync::Arc, time::Duration};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    display::{format_time_interval, picker_columns, PickerSelection},
    state::{AppState, CommandReply},
};
use super::responses::{
    ApiResponse, DismissResponse, HealthResponse, PickerRequest, PickerResponse, SecondsRequest,
    StatusResponse,
};

type ApiResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

fn bad_request(state: &AppState, message: String) -> (StatusCode, Json<ApiResponse>) {
    warn!("Rejected request: {}", message);
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message, state.get_snapshot())))
}

fn internal_error(state: &AppState, message: String) -> (StatusCode, Json<ApiResponse>) {
    error!("{}", message);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiResponse::error(message, state.get_snapshot())))
}

async fn apply_duration(state: &AppState, duration: Duration) -> ApiResult {
    let label = format_time_interval(duration);
    match state.set_duration(duration).await {
        Ok(CommandReply { applied: true, snapshot }) => {
            Ok(Json(ApiResponse::ok(format!("Duration set to {}", label), snapshot)))
        }
        Ok(CommandReply { applied: false, snapshot }) => {
            info!("Duration {} deferred until the countdown is reset", label);
            Ok(Json(ApiResponse::ignored(
                format!("Countdown running, duration {} will apply to the next run", label),
                snapshot,
            )))
        }
        Err(e) => Err(internal_error(state, format!("Failed to set duration: {}", e))),
    }
}

/// Handle POST /duration - Set the duration from a picker selection
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PickerRequest>,
) -> ApiResult {
    let selection = PickerSelection::new(request.minutes, request.seconds)
        .map_err(|e| bad_request(&state, e))?;
    apply_duration(&state, selection.duration()).await
}

/// Handle POST /duration/seconds - Set the duration in (fractional) seconds
pub async fn duration_seconds_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SecondsRequest>,
) -> ApiResult {
    let duration = Duration::try_from_secs_f64(request.seconds)
        .map_err(|e| bad_request(&state, format!("Invalid duration {}: {}", request.seconds, e)))?;
    apply_duration(&state, duration).await
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    match state.start().await {
        Ok(CommandReply { applied: true, snapshot }) => {
            info!("Start endpoint called - countdown started");
            Ok(Json(ApiResponse::ok("Countdown started".to_string(), snapshot)))
        }
        Ok(CommandReply { applied: false, snapshot }) => {
            Ok(Json(ApiResponse::ignored("Countdown already running".to_string(), snapshot)))
        }
        Err(e) => Err(internal_error(&state, format!("Failed to start countdown: {}", e))),
    }
}

/// Handle POST /reset - Reset the countdown to its full duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    match state.reset().await {
        Ok(reply) => {
            info!("Reset endpoint called - countdown reset");
            Ok(Json(ApiResponse::ok("Countdown reset".to_string(), reply.snapshot)))
        }
        Err(e) => Err(internal_error(&state, format!("Failed to reset countdown: {}", e))),
    }
}

/// Handle GET /status - Return the countdown and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let alert = match state.get_alert() {
        Ok(a) => a,
        Err(e) => {
            error!("Failed to get alert state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        countdown: state.get_snapshot(),
        alert,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /picker - Return the picker rows
pub async fn picker_handler() -> Json<PickerResponse> {
    Json(PickerResponse { columns: picker_columns() })
}

/// Handle POST /alert/dismiss - Dismiss the countdown-finished alert
pub async fn dismiss_alert_handler(State(state): State<Arc<AppState>>) -> Result<Json<DismissResponse>, StatusCode> {
    match state.dismiss_alert() {
        Ok(dismissed) => Ok(Json(DismissResponse { dismissed })),
        Err(e) => {
            error!("Failed to dismiss alert: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
