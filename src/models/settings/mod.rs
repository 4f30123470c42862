// Settings module
// User preferences that drive the lane grid

use serde::{Deserialize, Serialize};

use super::CalendarError;

/// Grid step in minutes; also the px/hour increment applied by one zoom action.
pub const STEP: u32 = 15;
/// Default horizontal scale in pixels per hour.
pub const HOUR_DURATION: u32 = 120;
/// Zoom-out floor, expressed as a multiple of `STEP`.
pub const MIN_RESIZE: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub id: Option<i64>,
    /// "12h" or "24h"
    pub time_format: String,
    pub hour_duration: u32,
    pub step_minutes: u32,
    pub min_resize: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: Some(1),
            time_format: "12h".to_string(),
            hour_duration: HOUR_DURATION,
            step_minutes: STEP,
            min_resize: MIN_RESIZE,
        }
    }
}

impl Settings {
    pub fn uses_24_hour_clock(&self) -> bool {
        self.time_format == "24h"
    }

    pub fn validate(&self) -> Result<(), CalendarError> {
        if self.time_format != "12h" && self.time_format != "24h" {
            return Err(CalendarError::InvalidSetting {
                field: "time_format",
                message: format!("expected 12h or 24h, got {}", self.time_format),
            });
        }

        if self.step_minutes == 0 || 60 % self.step_minutes != 0 {
            return Err(CalendarError::InvalidSetting {
                field: "step_minutes",
                message: format!("{} does not divide an hour", self.step_minutes),
            });
        }

        if self.min_resize == 0 {
            return Err(CalendarError::InvalidSetting {
                field: "min_resize",
                message: "must be at least 1".to_string(),
            });
        }

        if self.hour_duration < self.step_minutes * self.min_resize {
            return Err(CalendarError::InvalidSetting {
                field: "hour_duration",
                message: format!(
                    "{} is below the zoom floor of {}",
                    self.hour_duration,
                    self.step_minutes * self.min_resize
                ),
            });
        }

        Ok(())
    }
}
