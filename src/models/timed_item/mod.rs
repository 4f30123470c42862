// Timed item module
// One interval drawn inside a lane

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::color::RgbColor;

/// Fixed id of the patient lane's item.
pub const PATIENT_ITEM_ID: &str = "patient";

/// A single interval belonging to a participant.
///
/// `start`/`end` are optional because the edit view can hold an instance whose
/// end has been cleared; such items stay in the structure but are not drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedItem {
    pub id: String,
    pub name: String,
    pub color: Option<RgbColor>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_number: Option<String>,
}

impl TimedItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
            start: Some(start),
            end: Some(end),
            patient_number: None,
        }
    }

    pub fn with_color(mut self, color: Option<RgbColor>) -> Self {
        self.color = color;
        self
    }

    pub fn is_patient(&self) -> bool {
        self.id == PATIENT_ITEM_ID
    }

    /// Both endpoints present and not inverted.
    pub fn is_renderable(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if end >= start)
    }

    /// Interval as a pair when both endpoints are set.
    pub fn interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.start?, self.end?))
    }

    pub fn duration(&self) -> Option<Duration> {
        self.interval().map(|(start, end)| end - start)
    }
}
