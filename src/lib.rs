//! Countdown - a countdown timer core with an HTTP control surface
//!
//! The [`state::Countdown`] state machine tracks elapsed time against a
//! configured duration and notifies a [`state::CountdownObserver`] of
//! progress and completion. The rest of the crate hosts it: a background
//! task drives it on the tokio clock and an axum router lets clients pick a
//! duration, start, reset and watch it.

pub mod api;
pub mod clock;
pub mod config;
pub mod display;
pub mod scheduler;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use scheduler::ManualScheduler;
pub use state::{AppState, Countdown, CountdownObserver, CountdownState};
pub use utils::signals::shutdown_signal;
