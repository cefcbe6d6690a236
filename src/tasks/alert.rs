//! Countdown-finished alert task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, trace, warn};

use crate::state::{AppState, CountdownEvent};

/// Background task that raises an alert whenever a countdown finishes
pub async fn alert_task(state: Arc<AppState>) {
    info!("Starting alert task");

    let mut events = state.subscribe_events();

    loop {
        match events.recv().await {
            Ok(CountdownEvent::Finished) => match state.raise_alert() {
                Ok(alert) => info!("{}: {}", alert.title, alert.message),
                Err(e) => warn!("Failed to raise countdown alert: {}", e),
            },
            Ok(CountdownEvent::Progress { remaining }) => {
                trace!("Countdown progress: {:?} remaining", remaining);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Alert task fell behind, skipped {} countdown events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Countdown event channel closed, stopping alert task");
                break;
            }
        }
    }
}
