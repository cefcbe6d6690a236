//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{info, warn};

use crate::display::PickerSelection;
use super::{Alert, CommandReply, CountdownCommand, CountdownEvent, TimerSnapshot};

const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 256;

/// State shared between HTTP handlers and the background tasks
///
/// The countdown itself lives inside the countdown task; everything here
/// talks to it through `commands_tx` and observes it through the snapshot
/// and event channels.
#[derive(Debug)]
pub struct AppState {
    /// Interval between countdown ticks
    pub tick_interval: Duration,
    /// Requests for the countdown task
    pub commands_tx: mpsc::Sender<CountdownCommand>,
    /// Latest countdown snapshot, republished after every command and tick
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
    /// Progress and finish notifications
    pub event_tx: broadcast::Sender<CountdownEvent>,
    /// Pending countdown-finished alert
    pub alert: Arc<Mutex<Option<Alert>>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create the shared state and the command receiver the countdown task
    /// must be given
    pub fn new(port: u16, host: String, tick_interval: Duration) -> (Self, mpsc::Receiver<CountdownCommand>) {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::default());
        let (event_tx, _) = broadcast::channel(EVENT_BUFFER);

        let state = Self {
            tick_interval,
            commands_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            event_tx,
            alert: Arc::new(Mutex::new(None)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        };
        (state, commands_rx)
    }

    /// Send a command to the countdown task and wait for it to be applied
    async fn send_command<F>(&self, action: &str, build: F) -> Result<CommandReply, String>
    where
        F: FnOnce(oneshot::Sender<CommandReply>) -> CountdownCommand,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands_tx
            .send(build(reply_tx))
            .await
            .map_err(|e| format!("Countdown task is not running: {}", e))?;

        let reply = reply_rx
            .await
            .map_err(|e| format!("Countdown task dropped the {} request: {}", action, e))?;

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(reply)
    }

    /// Set the countdown length
    pub async fn set_duration(&self, duration: Duration) -> Result<CommandReply, String> {
        info!("Setting countdown duration to {:?}", duration);
        self.send_command("duration", |reply| CountdownCommand::SetDuration { duration, reply })
            .await
    }

    /// Set the countdown length from a picker selection
    pub async fn set_picker(&self, selection: PickerSelection) -> Result<CommandReply, String> {
        self.set_duration(selection.duration()).await
    }

    pub async fn start(&self) -> Result<CommandReply, String> {
        info!("Starting countdown");
        self.send_command("start", |reply| CountdownCommand::Start { reply }).await
    }

    pub async fn reset(&self) -> Result<CommandReply, String> {
        info!("Resetting countdown");
        self.send_command("reset", |reply| CountdownCommand::Reset { reply }).await
    }

    /// Publish a fresh countdown snapshot
    pub fn publish_snapshot(&self, snapshot: TimerSnapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to publish countdown snapshot: {}", e);
        }
    }

    /// Get the latest countdown snapshot
    pub fn get_snapshot(&self) -> TimerSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribe to progress and finish notifications
    pub fn subscribe_events(&self) -> broadcast::Receiver<CountdownEvent> {
        self.event_tx.subscribe()
    }

    /// Raise the countdown-finished alert, replacing any undismissed one
    pub fn raise_alert(&self) -> Result<Alert, String> {
        let mut alert = self.alert.lock()
            .map_err(|e| format!("Failed to lock alert state: {}", e))?;

        let raised = Alert::countdown_finished();
        *alert = Some(raised.clone());
        Ok(raised)
    }

    /// Dismiss the pending alert, returning whether there was one
    pub fn dismiss_alert(&self) -> Result<bool, String> {
        let mut alert = self.alert.lock()
            .map_err(|e| format!("Failed to lock alert state: {}", e))?;

        Ok(alert.take().is_some())
    }

    /// Get the pending alert, if any
    pub fn get_alert(&self) -> Result<Option<Alert>, String> {
        self.alert.lock()
            .map(|alert| alert.clone())
            .map_err(|e| format!("Failed to lock alert state: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), Duration::from_millis(100)).0
    }

    #[test]
    fn alert_can_be_raised_and_dismissed_once() {
        let state = state();
        assert_eq!(state.get_alert().unwrap(), None);

        let raised = state.raise_alert().unwrap();
        assert_eq!(raised.title, "Countdown finished");
        assert_eq!(state.get_alert().unwrap(), Some(raised));

        assert!(state.dismiss_alert().unwrap());
        assert!(!state.dismiss_alert().unwrap());
    }

    #[test]
    fn initial_snapshot_is_reset_at_zero() {
        let snapshot = state().get_snapshot();
        assert_eq!(snapshot, TimerSnapshot::default());
        assert_eq!(snapshot.time_label, "00:00:00.00");
    }

    #[tokio::test]
    async fn commands_fail_when_task_is_gone() {
        let (state, commands_rx) = AppState::new(0, "127.0.0.1".to_string(), Duration::from_millis(100));
        drop(commands_rx);

        assert!(state.start().await.is_err());
        assert_eq!(state.get_last_action(), (None, None));
    }
}
