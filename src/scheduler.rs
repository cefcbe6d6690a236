//! Manually advanced tick scheduler
//!
//! Drives a [`Countdown`] on a [`ManualClock`] without real delays. Ticks
//! fire at every interval boundary measured from the last `start`, exactly
//! as a periodic timer would, but only when the caller advances time.

use std::time::Duration;

use crate::{
    clock::ManualClock,
    state::{Countdown, CountdownObserver},
};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

pub struct ManualScheduler {
    countdown: Countdown<ManualClock>,
    clock: ManualClock,
    interval: Duration,
    /// Time elapsed since the last tick boundary
    phase: Duration,
}

impl ManualScheduler {
    /// Create a scheduler ticking every `interval` (clamped to at least 1ms)
    pub fn new(interval: Duration) -> Self {
        let clock = ManualClock::new();
        Self {
            countdown: Countdown::new(clock.clone()),
            clock,
            interval: interval.max(MIN_INTERVAL),
            phase: Duration::ZERO,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn CountdownObserver>) -> Self {
        self.countdown.set_observer(observer);
        self
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.countdown.set_duration(duration);
    }

    pub fn start(&mut self) -> bool {
        let started = self.countdown.start();
        if started {
            self.phase = Duration::ZERO;
        }
        started
    }

    pub fn reset(&mut self) {
        self.countdown.reset();
        self.phase = Duration::ZERO;
    }

    /// Move simulated time forward by `by`, firing any ticks that fall due
    ///
    /// Idle stretches are skipped in a single step; only a running countdown
    /// is walked interval by interval.
    pub fn advance(&mut self, by: Duration) {
        let mut left = by;
        while !left.is_zero() {
            if !self.countdown.is_ticking() {
                self.clock.advance(left);
                let phase = (self.phase + left).as_nanos() % self.interval.as_nanos();
                self.phase = Duration::from_nanos(phase as u64);
                break;
            }

            let step = left.min(self.interval - self.phase);
            self.clock.advance(step);
            self.phase += step;
            left -= step;

            if self.phase == self.interval {
                self.phase = Duration::ZERO;
                if self.countdown.is_ticking() {
                    self.countdown.tick();
                }
            }
        }
    }

    pub fn countdown(&self) -> &Countdown<ManualClock> {
        &self.countdown
    }
}
