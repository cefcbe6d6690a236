//! Messages flowing into and out of the countdown task

use std::time::Duration;
use tokio::sync::{broadcast, oneshot};
use tracing::trace;

use super::{CountdownObserver, TimerSnapshot};

/// Notification published by the countdown task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Progress { remaining: Duration },
    Finished,
}

/// Result of a command, sent back once the countdown task has applied it
#[derive(Debug, Clone)]
pub struct CommandReply {
    /// False when the command was a no-op (start while running) or was
    /// deferred (duration change while running)
    pub applied: bool,
    pub snapshot: TimerSnapshot,
}

/// Request handled by the countdown task
#[derive(Debug)]
pub enum CountdownCommand {
    SetDuration {
        duration: Duration,
        reply: oneshot::Sender<CommandReply>,
    },
    Start {
        reply: oneshot::Sender<CommandReply>,
    },
    Reset {
        reply: oneshot::Sender<CommandReply>,
    },
}

/// Observer that republishes countdown notifications on a broadcast channel
pub struct EventForwarder {
    event_tx: broadcast::Sender<CountdownEvent>,
}

impl EventForwarder {
    pub fn new(event_tx: broadcast::Sender<CountdownEvent>) -> Self {
        Self { event_tx }
    }

    fn publish(&self, event: CountdownEvent) {
        // No subscribers is fine; nobody is watching the countdown
        if self.event_tx.send(event).is_err() {
            trace!("Dropped {:?}, no subscribers", event);
        }
    }
}

impl CountdownObserver for EventForwarder {
    fn on_progress(&mut self, time_remaining: Duration) {
        self.publish(CountdownEvent::Progress { remaining: time_remaining });
    }

    fn on_finish(&mut self) {
        self.publish(CountdownEvent::Finished);
    }
}
