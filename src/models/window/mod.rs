// Window module
// Visible time window of the lane grid

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::CalendarError;

/// The span of time the grid is asked to show, usually the appointment or
/// availability-search interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window without checking its ordering.
    ///
    /// Collapsed windows are a legitimate transient state while the user is
    /// picking times, so construction never fails here.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Build a window and reject zero-length or inverted spans.
    pub fn checked(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, CalendarError> {
        if end <= start {
            return Err(CalendarError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// True when the end is before or equal to the start.
    pub fn is_collapsed(&self) -> bool {
        self.end <= self.start
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whole minutes between start and end (negative for inverted windows).
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
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
    fn test_collapsed_when_equal_or_inverted() {
        assert!(TimeWindow::new(at(9, 0), at(9, 0)).is_collapsed());
        assert!(TimeWindow::new(at(10, 0), at(9, 0)).is_collapsed());
        assert!(!TimeWindow::new(at(9, 0), at(9, 30)).is_collapsed());
    }

    #[test]
    fn test_checked_rejects_inverted() {
        let err = TimeWindow::checked(at(10, 0), at(9, 0)).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidWindow { .. }));
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(TimeWindow::new(at(9, 0), at(10, 45)).duration_minutes(), 105);
    }
}
