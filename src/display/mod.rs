//! Presentation helpers
//!
//! Pure functions the host uses to turn picker rows into a duration and a
//! duration into a time label.

pub mod format;
pub mod picker;

pub use format::format_time_interval;
pub use picker::{picker_columns, PickerSelection};
