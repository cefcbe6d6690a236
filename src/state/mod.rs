//! State management module
//!
//! The countdown state machine and the shared state the HTTP host keeps
//! around it.

pub mod alert;
pub mod app_state;
pub mod countdown;
pub mod events;
pub mod timer_state;

// Re-export main types
pub use alert::Alert;
pub use app_state::AppState;
pub use countdown::{Countdown, CountdownObserver};
pub use events::{CommandReply, CountdownCommand, CountdownEvent, EventForwarder};
pub use timer_state::{CountdownState, TimerSnapshot};
