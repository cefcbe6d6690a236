//! Countdown state machine
//!
//! [`Countdown`] tracks elapsed time against a configured duration. It does
//! not own a timer: whoever drives it calls [`Countdown::tick`] periodically
//! while [`Countdown::is_ticking`] is true. Leaving the `Started` state
//! (through `reset` or finishing) is what cancels the periodic process, and
//! `tick` ignores calls made outside a run.

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use super::{CountdownState, TimerSnapshot};

/// Receives notifications from a running countdown
///
/// Both methods default to doing nothing, so an observer only interested in
/// completion can implement `on_finish` alone.
pub trait CountdownObserver: Send {
    /// Called on every tick while the countdown is started
    fn on_progress(&mut self, _time_remaining: Duration) {}

    /// Called once per run, when the remaining time first reaches zero
    fn on_finish(&mut self) {}
}

/// A single countdown timer
pub struct Countdown<C: Clock = SystemClock> {
    clock: C,
    duration: Duration,
    /// Duration set while started; applied on the next reset or start
    pending_duration: Option<Duration>,
    state: CountdownState,
    start_time: Option<Instant>,
    observer: Option<Box<dyn CountdownObserver>>,
}

impl<C: Clock> Countdown<C> {
    /// Create a countdown in the `Reset` state with a zero duration
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            duration: Duration::ZERO,
            pending_duration: None,
            state: CountdownState::Reset,
            start_time: None,
            observer: None,
        }
    }

    /// Register the observer, replacing any previous one
    pub fn set_observer(&mut self, observer: Box<dyn CountdownObserver>) {
        self.observer = Some(observer);
    }

    pub fn with_observer(mut self, observer: Box<dyn CountdownObserver>) -> Self {
        self.set_observer(observer);
        self
    }

    /// Set the countdown length
    ///
    /// While started the new length is held back and takes effect on the
    /// next `reset` or `start`; the running countdown is not disturbed.
    pub fn set_duration(&mut self, duration: Duration) {
        match self.state {
            CountdownState::Started => {
                debug!("Deferring duration change to {:?} until the next run", duration);
                self.pending_duration = Some(duration);
            }
            CountdownState::Reset | CountdownState::Finished => {
                self.pending_duration = None;
                self.duration = duration;
            }
        }
    }

    /// Begin counting down from the full duration
    ///
    /// Returns `false` (and changes nothing) if a run is already in progress.
    pub fn start(&mut self) -> bool {
        if self.state == CountdownState::Started {
            debug!("Start ignored, countdown already running");
            return false;
        }

        self.apply_pending_duration();
        self.start_time = Some(self.clock.now());
        self.state = CountdownState::Started;
        info!("Countdown started for {:?}", self.duration);
        true
    }

    /// Stop any run and return to the full duration
    pub fn reset(&mut self) {
        self.apply_pending_duration();
        self.start_time = None;
        self.state = CountdownState::Reset;
        info!("Countdown reset to {:?}", self.duration);
    }

    /// Re-evaluate elapsed time and notify the observer
    ///
    /// A no-op unless the countdown is started.
    pub fn tick(&mut self) {
        let Some(start_time) = self.start_time else {
            return;
        };
        if self.state != CountdownState::Started {
            return;
        }

        let elapsed = self.clock.now().saturating_duration_since(start_time);
        if elapsed >= self.duration {
            self.state = CountdownState::Finished;
            self.start_time = None;
            info!("Countdown finished");

            if let Some(observer) = self.observer.as_mut() {
                observer.on_progress(Duration::ZERO);
                observer.on_finish();
            }
        } else {
            let remaining = self.duration - elapsed;
            if let Some(observer) = self.observer.as_mut() {
                observer.on_progress(remaining);
            }
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn pending_duration(&self) -> Option<Duration> {
        self.pending_duration
    }

    /// Time left, read from the clock now rather than at the last tick
    ///
    /// While started this can reach zero before the tick that finishes the
    /// run; the state only changes on that tick.
    pub fn time_remaining(&self) -> Duration {
        match (self.state, self.start_time) {
            (CountdownState::Started, Some(start_time)) => {
                let elapsed = self.clock.now().saturating_duration_since(start_time);
                self.duration.saturating_sub(elapsed)
            }
            (CountdownState::Finished, _) => Duration::ZERO,
            _ => self.duration,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Whether the periodic tick process should be running
    pub fn is_ticking(&self) -> bool {
        self.state == CountdownState::Started
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::new(self.state, self.duration, self.time_remaining(), self.pending_duration)
    }

    fn apply_pending_duration(&mut self) {
        if let Some(duration) = self.pending_duration.take() {
            debug!("Applying deferred duration {:?}", duration);
            self.duration = duration;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::sync::{Arc, Mutex};
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Notification {
        Progress(Duration),
        Finish,
    }

    /// Observer that records every notification for later inspection
    #[derive(Clone, Default)]
    pub(crate) struct RecordingObserver {
        pub(crate) log: Arc<Mutex<Vec<Notification>>>,
    }

    impl RecordingObserver {
        pub(crate) fn notifications(&self) -> Vec<Notification> {
            self.log.lock().unwrap().clone()
        }

        pub(crate) fn finish_count(&self) -> usize {
            self.notifications().iter().filter(|n| **n == Notification::Finish).count()
        }
    }

    impl CountdownObserver for RecordingObserver {
        fn on_progress(&mut self, time_remaining: Duration) {
            self.log.lock().unwrap().push(Notification::Progress(time_remaining));
        }

        fn on_finish(&mut self) {
            self.log.lock().unwrap().push(Notification::Finish);
        }
    }

    fn countdown_with(secs: u64) -> (Countdown<ManualClock>, ManualClock, RecordingObserver) {
        let clock = ManualClock::new();
        let observer = RecordingObserver::default();
        let mut countdown = Countdown::new(clock.clone()).with_observer(Box::new(observer.clone()));
        countdown.set_duration(Duration::from_secs(secs));
        (countdown, clock, observer)
    }

    #[test]
    fn fresh_countdown_is_reset_with_zero_duration() {
        let countdown = Countdown::new(ManualClock::new());
        assert_eq!(countdown.state(), CountdownState::Reset);
        assert_eq!(countdown.duration(), Duration::ZERO);
        assert_eq!(countdown.time_remaining(), Duration::ZERO);
        assert!(!countdown.is_ticking());
    }

    #[test]
    fn tick_before_start_does_nothing() {
        let (mut countdown, clock, observer) = countdown_with(5);
        clock.advance(Duration::from_secs(10));
        countdown.tick();

        assert_eq!(countdown.state(), CountdownState::Reset);
        assert_eq!(countdown.time_remaining(), Duration::from_secs(5));
        assert!(observer.notifications().is_empty());
    }

    #[test]
    fn progress_reports_remaining_time() {
        let (mut countdown, clock, observer) = countdown_with(10);
        assert!(countdown.start());

        clock.advance(Duration::from_millis(2500));
        countdown.tick();

        assert_eq!(countdown.time_remaining(), Duration::from_millis(7500));
        assert_eq!(observer.notifications(), vec![Notification::Progress(Duration::from_millis(7500))]);
    }

    #[test]
    fn finishes_once_and_stops_ticking() {
        let (mut countdown, clock, observer) = countdown_with(3);
        countdown.start();

        clock.advance(Duration::from_secs(4));
        countdown.tick();
        countdown.tick();
        clock.advance(Duration::from_secs(4));
        countdown.tick();

        assert_eq!(countdown.state(), CountdownState::Finished);
        assert_eq!(countdown.time_remaining(), Duration::ZERO);
        assert!(!countdown.is_ticking());
        assert_eq!(
            observer.notifications(),
            vec![Notification::Progress(Duration::ZERO), Notification::Finish]
        );
    }

    #[test]
    fn remaining_follows_clock_between_ticks() {
        let (mut countdown, clock, observer) = countdown_with(10);
        countdown.start();

        clock.advance(Duration::from_millis(2500));
        assert_eq!(countdown.time_remaining(), Duration::from_millis(7500));
        assert_eq!(countdown.snapshot().remaining_seconds, 7.5);

        clock.advance(Duration::from_secs(20));
        assert_eq!(countdown.time_remaining(), Duration::ZERO);
        assert_eq!(countdown.state(), CountdownState::Started);
        assert!(observer.notifications().is_empty());

        countdown.tick();
        assert_eq!(countdown.state(), CountdownState::Finished);
        assert_eq!(observer.finish_count(), 1);
    }

    #[test]
    fn second_start_is_ignored() {
        let (mut countdown, clock, _observer) = countdown_with(10);
        assert!(countdown.start());
        clock.advance(Duration::from_secs(4));

        assert!(!countdown.start());
        countdown.tick();
        assert_eq!(countdown.time_remaining(), Duration::from_secs(6));
    }

    #[test]
    fn reset_mid_run_restores_duration_and_silences_ticks() {
        let (mut countdown, clock, observer) = countdown_with(10);
        countdown.start();
        clock.advance(Duration::from_secs(3));
        countdown.tick();

        countdown.reset();
        assert_eq!(countdown.state(), CountdownState::Reset);
        assert_eq!(countdown.time_remaining(), Duration::from_secs(10));

        clock.advance(Duration::from_secs(20));
        countdown.tick();
        assert_eq!(observer.notifications().len(), 1);
        assert_eq!(observer.finish_count(), 0);
    }

    #[test]
    fn restart_after_finish_runs_again() {
        let (mut countdown, clock, observer) = countdown_with(2);
        countdown.start();
        clock.advance(Duration::from_secs(2));
        countdown.tick();
        assert_eq!(countdown.state(), CountdownState::Finished);

        assert!(countdown.start());
        assert_eq!(countdown.time_remaining(), Duration::from_secs(2));
        clock.advance(Duration::from_secs(2));
        countdown.tick();
        assert_eq!(observer.finish_count(), 2);
    }

    #[test]
    fn zero_duration_finishes_on_first_tick() {
        let (mut countdown, _clock, observer) = countdown_with(0);
        countdown.start();
        countdown.tick();

        assert_eq!(countdown.state(), CountdownState::Finished);
        assert_eq!(observer.finish_count(), 1);
    }

    #[test]
    fn duration_change_while_started_is_deferred() {
        let (mut countdown, clock, _observer) = countdown_with(10);
        countdown.start();
        countdown.set_duration(Duration::from_secs(30));

        assert_eq!(countdown.duration(), Duration::from_secs(10));
        assert_eq!(countdown.pending_duration(), Some(Duration::from_secs(30)));

        clock.advance(Duration::from_secs(1));
        countdown.tick();
        assert_eq!(countdown.time_remaining(), Duration::from_secs(9));

        countdown.reset();
        assert_eq!(countdown.duration(), Duration::from_secs(30));
        assert_eq!(countdown.time_remaining(), Duration::from_secs(30));
        assert_eq!(countdown.pending_duration(), None);
    }

    #[test]
    fn deferred_duration_applies_on_restart_after_finish() {
        let (mut countdown, clock, _observer) = countdown_with(1);
        countdown.start();
        countdown.set_duration(Duration::from_secs(5));
        clock.advance(Duration::from_secs(1));
        countdown.tick();
        assert_eq!(countdown.state(), CountdownState::Finished);

        countdown.start();
        assert_eq!(countdown.duration(), Duration::from_secs(5));
        assert_eq!(countdown.time_remaining(), Duration::from_secs(5));
    }

    #[test]
    fn duration_change_while_finished_keeps_zero_remaining() {
        let (mut countdown, clock, _observer) = countdown_with(1);
        countdown.start();
        clock.advance(Duration::from_secs(1));
        countdown.tick();

        countdown.set_duration(Duration::from_secs(45));
        assert_eq!(countdown.state(), CountdownState::Finished);
        assert_eq!(countdown.time_remaining(), Duration::ZERO);
        assert_eq!(countdown.duration(), Duration::from_secs(45));
    }

    proptest! {
        #[test]
        fn reset_always_restores_duration(millis in 0u64..10_000_000) {
            let (mut countdown, _clock, _observer) = countdown_with(0);
            countdown.set_duration(Duration::from_millis(millis));
            countdown.reset();
            prop_assert_eq!(countdown.state(), CountdownState::Reset);
            prop_assert_eq!(countdown.time_remaining(), Duration::from_millis(millis));
        }

        #[test]
        fn remaining_stays_within_bounds(total in 1u64..10_000, elapsed in 0u64..20_000) {
            let (mut countdown, clock, observer) = countdown_with(0);
            countdown.set_duration(Duration::from_millis(total));
            countdown.start();
            clock.advance(Duration::from_millis(elapsed));
            countdown.tick();

            prop_assert!(countdown.time_remaining() <= countdown.duration());
            if elapsed >= total {
                prop_assert_eq!(countdown.state(), CountdownState::Finished);
                prop_assert_eq!(countdown.time_remaining(), Duration::ZERO);
                prop_assert_eq!(observer.finish_count(), 1);
            } else {
                prop_assert_eq!(countdown.time_remaining(), Duration::from_millis(total - elapsed));
                prop_assert_eq!(observer.finish_count(), 0);
            }
        }
    }
}
