// Time choices offered by the scheduling edit view

use chrono::{DateTime, Utc};

use crate::utils::date::minutes;

use super::ManageEntry;

/// Granularity of the start/end choices.
pub const OPTION_INTERVAL_MINUTES: i64 = 5;

fn every_interval(from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let mut options = Vec::new();
    let mut at = from;
    while at <= to {
        options.push(at);
        at += minutes(OPTION_INTERVAL_MINUTES);
    }
    options
}

/// Start choices for entry `index`: after the previous instance and strictly
/// before the last possible end.
pub fn start_options(
    entries: &[ManageEntry],
    index: usize,
    bounds: (DateTime<Utc>, DateTime<Utc>),
) -> Vec<DateTime<Utc>> {
    let (first, last) = bounds;
    let from = index
        .checked_sub(1)
        .and_then(|prev| entries.get(prev))
        .and_then(ManageEntry::clock_end)
        .map_or(first, |prev_end| (prev_end + minutes(OPTION_INTERVAL_MINUTES)).max(first));

    every_interval(from, last - minutes(OPTION_INTERVAL_MINUTES))
}

/// End choices for entry `index`: after its own start, up to the bound.
pub fn end_options(
    entries: &[ManageEntry],
    index: usize,
    bounds: (DateTime<Utc>, DateTime<Utc>),
) -> Vec<DateTime<Utc>> {
    let (first, last) = bounds;
    let from = match entries.get(index) {
        Some(ManageEntry::Clock {
            start: Some(start), ..
        }) => *start,
        _ => first,
    };

    every_interval(from + minutes(OPTION_INTERVAL_MINUTES), last)
}

pub fn format_option(at: DateTime<Utc>, use_24_hour_clock: bool) -> String {
    if use_24_hour_clock {
        at.format("%-H:%M").to_string()
    } else {
        at.format("%-I:%M %p").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 11, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_start_options_follow_previous_instance() {
        let entries = [
            ManageEntry::Clock {
                start: Some(at(9, 0)),
                end: Some(at(9, 30)),
            },
            ManageEntry::empty_clock(),
        ];
        let options = start_options(&entries, 1, (at(8, 0), at(10, 0)));
        assert_eq!(options.first(), Some(&at(9, 35)));
        assert_eq!(options.last(), Some(&at(9, 55)));
    }

    #[test]
    fn test_end_options_start_after_own_start() {
        let entries = [ManageEntry::Clock {
            start: Some(at(9, 0)),
            end: None,
        }];
        let options = end_options(&entries, 0, (at(8, 0), at(9, 20)));
        assert_eq!(options, vec![at(9, 5), at(9, 10), at(9, 15), at(9, 20)]);
    }

    #[test]
    fn test_format_option_clock_styles() {
        assert_eq!(format_option(at(14, 5), true), "14:05");
        assert_eq!(format_option(at(14, 5), false), "2:05 PM");
    }
}
