//! Countdown-finished alert

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alert raised when a countdown reaches zero, shown until dismissed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Alert {
    pub fn countdown_finished() -> Self {
        Self {
            title: "Countdown finished".to_string(),
            message: "Your countdown is over.".to_string(),
            raised_at: Utc::now(),
        }
    }
}
