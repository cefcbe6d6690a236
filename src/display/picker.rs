//! Minutes/seconds picker model

use std::time::Duration;
use serde::{Deserialize, Serialize};

pub const MAX_MINUTES: u32 = 60;
pub const MAX_SECONDS: u32 = 59;

/// A selected row in each numeric picker component
///
/// Always within the picker's rows; deserializing goes through the same
/// range check as [`PickerSelection::new`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PickerRows")]
pub struct PickerSelection {
    minutes: u32,
    seconds: u32,
}

/// Unchecked wire form of a selection
#[derive(Deserialize)]
struct PickerRows {
    minutes: u32,
    seconds: u32,
}

impl TryFrom<PickerRows> for PickerSelection {
    type Error = String;

    fn try_from(rows: PickerRows) -> Result<Self, Self::Error> {
        Self::new(rows.minutes, rows.seconds)
    }
}

impl PickerSelection {
    /// Create a selection, rejecting rows the picker does not offer
    pub fn new(minutes: u32, seconds: u32) -> Result<Self, String> {
        if minutes > MAX_MINUTES {
            return Err(format!("minutes must be between 0 and {}, got {}", MAX_MINUTES, minutes));
        }
        if seconds > MAX_SECONDS {
            return Err(format!("seconds must be between 0 and {}, got {}", MAX_SECONDS, seconds));
        }
        Ok(Self { minutes, seconds })
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Total countdown length for this selection
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.minutes) * 60 + u64::from(self.seconds))
    }
}

/// Row titles for every picker component: minutes, "min", seconds, "sec"
pub fn picker_columns() -> Vec<Vec<String>> {
    let minutes = (0..=MAX_MINUTES).map(|m| m.to_string()).collect();
    let seconds = (0..=MAX_SECONDS).map(|s| s.to_string()).collect();
    vec![minutes, vec!["min".to_string()], seconds, vec!["sec".to_string()]]
}
