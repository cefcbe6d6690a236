//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod alert;
pub mod countdown_task;

// Re-export main functions
pub use alert::alert_task;
pub use countdown_task::countdown_task;
