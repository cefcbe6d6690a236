//! Time label formatting

use std::time::Duration;
use chrono::NaiveTime;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
const NANOS_PER_HUNDREDTH: u32 = 10_000_000;

/// Render a time span as `HH:MM:SS.ss`
///
/// The span is treated as a wall-clock time measured from a UTC midnight,
/// so hours wrap after 24 and fractional seconds are truncated to
/// hundredths.
pub fn format_time_interval(interval: Duration) -> String {
    let seconds = (interval.as_secs() % SECONDS_PER_DAY) as u32;
    let hundredths = interval.subsec_nanos() / NANOS_PER_HUNDREDTH;

    match NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0) {
        Some(time) => format!("{}.{:02}", time.format("%H:%M:%S"), hundredths),
        None => format!("00:00:00.{:02}", hundredths),
    }
}
