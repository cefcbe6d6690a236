//! Countdown background task
//!
//! Sole owner of the [`Countdown`]. Commands and ticks are handled one at a
//! time from a single `select!` loop, so the state machine never sees
//! concurrent mutation.

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::mpsc,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    clock::SystemClock,
    state::{AppState, CommandReply, Countdown, CountdownCommand, EventForwarder},
};

/// Background task that applies countdown commands and drives ticks
pub async fn countdown_task(state: Arc<AppState>, mut commands_rx: mpsc::Receiver<CountdownCommand>) {
    info!("Starting countdown task, ticking every {:?}", state.tick_interval);

    let observer = EventForwarder::new(state.event_tx.clone());
    let mut countdown = Countdown::new(SystemClock).with_observer(Box::new(observer));
    // Armed only while the countdown is started
    let mut ticker: Option<Interval> = None;

    state.publish_snapshot(countdown.snapshot());

    loop {
        tokio::select! {
            command = commands_rx.recv() => {
                let Some(command) = command else {
                    info!("Command channel closed, stopping countdown task");
                    break;
                };

                let (applied, reply) = match command {
                    CountdownCommand::SetDuration { duration, reply } => {
                        countdown.set_duration(duration);
                        (countdown.pending_duration().is_none(), reply)
                    }
                    CountdownCommand::Start { reply } => {
                        let started = countdown.start();
                        if started {
                            ticker = Some(new_ticker(state.tick_interval));
                        }
                        (started, reply)
                    }
                    CountdownCommand::Reset { reply } => {
                        countdown.reset();
                        ticker = None;
                        (true, reply)
                    }
                };

                let snapshot = countdown.snapshot();
                state.publish_snapshot(snapshot.clone());
                if reply.send(CommandReply { applied, snapshot }).is_err() {
                    debug!("Command requester went away before the reply");
                }
            }

            _ = next_tick(&mut ticker) => {
                countdown.tick();
                if !countdown.is_ticking() {
                    debug!("Countdown no longer running, cancelling ticker");
                    ticker = None;
                }
                state.publish_snapshot(countdown.snapshot());
            }
        }
    }
}

/// Periodic ticker whose first tick lands one period after the start
fn new_ticker(period: Duration) -> Interval {
    let period = period.max(Duration::from_millis(1));
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Wait for the next tick, or forever when no ticker is armed
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
