//! Working-hours lookup.
//!
//! The grid only shades out-of-hours time when a matching record is found;
//! `None` is a normal answer and means the grid lays out over the raw window.

mod repository;

pub use repository::WorkingHoursRepository;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::working_hours::WorkingHours;

/// Which flavour of grid is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// Editing an appointment against a location's opening hours.
    #[default]
    Scheduling,
    /// Searching a window for open slots.
    Availability,
}

impl GridMode {
    pub fn is_availability(&self) -> bool {
        matches!(self, GridMode::Availability)
    }
}

/// Find the working-hours record that applies to the grid.
///
/// In availability mode the record must also open on `reference_day` (the day
/// of the first availability item, or of the window start when there is none).
/// In scheduling mode the first record for the location wins.
pub fn resolve<'a>(
    hours: &'a [WorkingHours],
    location_code: &str,
    reference_day: NaiveDate,
    mode: GridMode,
) -> Option<&'a WorkingHours> {
    let found = match mode {
        GridMode::Availability => hours.iter().find(|entry| {
            entry.location_code == location_code && entry.start.date_naive() == reference_day
        }),
        GridMode::Scheduling => hours.iter().find(|entry| entry.location_code == location_code),
    };

    if found.is_none() {
        log::debug!(
            "No working hours for location {} on {} ({:?})",
            location_code,
            reference_day,
            mode
        );
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn hours(code: &str, day: u32, open: u32, close: u32) -> WorkingHours {
        WorkingHours::new(
            code,
            Utc.with_ymd_and_hms(2024, 3, day, open, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, day, close, 0, 0).unwrap(),
        )
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_scheduling_mode_first_match_by_location() {
        let list = vec![hours("LA", 11, 7, 15), hours("NYC", 12, 8, 17), hours("NYC", 11, 9, 18)];
        let found = resolve(&list, "NYC", day(11), GridMode::Scheduling).unwrap();
        assert_eq!(found, &list[1]);
    }

    #[test]
    fn test_availability_mode_requires_same_day() {
        let list = vec![hours("NYC", 12, 8, 17), hours("NYC", 11, 9, 18)];
        let found = resolve(&list, "NYC", day(11), GridMode::Availability).unwrap();
        assert_eq!(found, &list[1]);
        assert!(resolve(&list, "NYC", day(13), GridMode::Availability).is_none());
    }

    #[test]
    fn test_unknown_location_is_none() {
        let list = vec![hours("NYC", 11, 8, 17)];
        assert!(resolve(&list, "LA", day(11), GridMode::Scheduling).is_none());
        assert!(resolve(&[], "NYC", day(11), GridMode::Scheduling).is_none());
    }
}
