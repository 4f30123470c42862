// Working hours module
// Opening hours of a location on one day

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Opening hours for one location on one day. Looked up, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub location_code: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WorkingHours {
    pub fn new(location_code: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            location_code: location_code.into(),
            start,
            end,
        }
    }

    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    pub fn span_minutes(&self) -> i64 {
        self.span().num_minutes()
    }

    /// Hour of day (UTC) at which the location opens.
    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }
}
