use chrono::{DateTime, Utc};

use crate::models::timed_item::TimedItem;
use crate::models::window::TimeWindow;
use crate::services::working_hours::GridMode;
use crate::utils::date::{minutes, minutes_between};

use super::INSTANCE_GAP_MINUTES;

/// One editable instance of the selected lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageEntry {
    /// Scheduling mode: wall-clock start and end on the appointment day.
    Clock {
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    },
    /// Availability mode: minutes after the window start, and a length.
    Offset { start_after: i64, duration: i64 },
}

impl ManageEntry {
    pub fn empty_clock() -> Self {
        Self::Clock {
            start: None,
            end: None,
        }
    }

    pub fn from_items(items: &[TimedItem], mode: GridMode, window: &TimeWindow) -> Vec<Self> {
        items
            .iter()
            .map(|item| match mode {
                GridMode::Scheduling => Self::Clock {
                    start: item.start,
                    end: item.end,
                },
                GridMode::Availability => Self::Offset {
                    start_after: item
                        .start
                        .map_or(0, |start| minutes_between(window.start, start).max(0)),
                    duration: item
                        .interval()
                        .map_or(INSTANCE_GAP_MINUTES, |(start, end)| minutes_between(start, end)),
                },
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Self::Clock { start, end } => start.is_some() && end.is_some(),
            Self::Offset { .. } => true,
        }
    }

    pub fn clock_end(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Clock { end, .. } => *end,
            Self::Offset { .. } => None,
        }
    }

    pub fn start_after(&self) -> Option<i64> {
        match self {
            Self::Offset { start_after, .. } => Some(*start_after),
            Self::Clock { .. } => None,
        }
    }

    pub fn duration(&self) -> Option<i64> {
        match self {
            Self::Offset { duration, .. } => Some(*duration),
            Self::Clock { .. } => None,
        }
    }

    /// Minutes after the window start at which an offset entry ends.
    pub fn offset_end(&self) -> Option<i64> {
        match self {
            Self::Offset {
                start_after,
                duration,
            } => Some(start_after + duration),
            Self::Clock { .. } => None,
        }
    }

    /// Absolute interval written back into the lane.
    pub fn interval(&self, window: &TimeWindow) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        match *self {
            Self::Clock { start, end } => (start, end),
            Self::Offset {
                start_after,
                duration,
            } => {
                let start = window.start + minutes(start_after);
                (Some(start), Some(start + minutes(duration)))
            }
        }
    }
}
