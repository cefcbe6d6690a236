//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Alert, TimerSnapshot};

/// Body of POST /duration, checked against the picker rows by the handler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerRequest {
    pub minutes: u32,
    pub seconds: u32,
}

/// Body of POST /duration/seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondsRequest {
    pub seconds: f64,
}

/// API response structure for countdown control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub countdown: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, countdown: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            countdown,
        }
    }

    /// The command took effect
    pub fn ok(message: String, countdown: TimerSnapshot) -> Self {
        Self::new("ok".to_string(), message, countdown)
    }

    /// The command was accepted but did not change the running countdown
    pub fn ignored(message: String, countdown: TimerSnapshot) -> Self {
        Self::new("ignored".to_string(), message, countdown)
    }

    /// Create an error response
    pub fn error(message: String, countdown: TimerSnapshot) -> Self {
        Self::new("error".to_string(), message, countdown)
    }
}

/// Status response with the countdown, alert and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub countdown: TimerSnapshot,
    pub alert: Option<Alert>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Picker rows for every component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerResponse {
    pub columns: Vec<Vec<String>>,
}

/// Response of POST /alert/dismiss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DismissResponse {
    pub dismissed: bool,
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
