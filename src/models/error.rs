//! Domain error type shared by the models and services.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Validation failures raised by the lane calendar domain.
///
/// I/O paths (database, scenario files) use `anyhow` and wrap these when a
/// stored value fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    #[error("Invalid time window: end {end} is not after start {start}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid setting {field}: {message}")]
    InvalidSetting { field: &'static str, message: String },
}
