//! Countdown state and snapshot structures

use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::display::format_time_interval;

/// Lifecycle state of a countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    #[default]
    Reset,
    Started,
    Finished,
}

/// Point-in-time view of a countdown, as shown on the timer screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: CountdownState,
    pub duration_seconds: f64,
    pub remaining_seconds: f64,
    /// Duration that will apply to the next run, if one was set mid-run
    pub pending_duration_seconds: Option<f64>,
    pub time_label: String,
    pub start_enabled: bool,
}

impl TimerSnapshot {
    /// Build the snapshot for a countdown in `state`
    pub fn new(
        state: CountdownState,
        duration: Duration,
        remaining: Duration,
        pending_duration: Option<Duration>,
    ) -> Self {
        let label_time = match state {
            CountdownState::Started => remaining,
            CountdownState::Finished => Duration::ZERO,
            CountdownState::Reset => duration,
        };

        Self {
            state,
            duration_seconds: duration.as_secs_f64(),
            remaining_seconds: remaining.as_secs_f64(),
            pending_duration_seconds: pending_duration.map(|d| d.as_secs_f64()),
            time_label: format_time_interval(label_time),
            start_enabled: state != CountdownState::Started,
        }
    }

    pub fn is_started(&self) -> bool {
        self.state == CountdownState::Started
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::new(CountdownState::Reset, Duration::ZERO, Duration::ZERO, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn started_shows_remaining_and_disables_start() {
        let snapshot = TimerSnapshot::new(
            CountdownState::Started,
            Duration::from_secs(90),
            Duration::from_secs(42),
            None,
        );
        assert_eq!(snapshot.time_label, "00:00:42.00");
        assert!(!snapshot.start_enabled);
        assert!(snapshot.is_started());
    }

    #[test]
    fn finished_shows_zero() {
        let snapshot = TimerSnapshot::new(
            CountdownState::Finished,
            Duration::from_secs(90),
            Duration::ZERO,
            None,
        );
        assert_eq!(snapshot.time_label, "00:00:00.00");
        assert!(snapshot.start_enabled);
    }

    #[test]
    fn reset_shows_full_duration() {
        let snapshot = TimerSnapshot::new(
            CountdownState::Reset,
            Duration::from_secs(90),
            Duration::from_secs(90),
            None,
        );
        assert_eq!(snapshot.time_label, "00:01:30.00");
        assert!(snapshot.start_enabled);
    }

    #[test]
    fn state_serializes_lowercase() {
        let json = serde_json::to_string(&CountdownState::Finished).unwrap();
        assert_eq!(json, "\"finished\"");
    }
}
