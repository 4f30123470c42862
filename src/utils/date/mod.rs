// Date utility functions
// UTC day arithmetic used by the resolver and the grid layout

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

pub fn is_same_day(date1: DateTime<Utc>, date2: DateTime<Utc>) -> bool {
    date1.date_naive() == date2.date_naive()
}

/// Midnight (UTC) of the day containing `date`.
pub fn start_of_day(date: DateTime<Utc>) -> DateTime<Utc> {
    start_of_naive_day(date.date_naive())
}

pub fn start_of_naive_day(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN))
}

/// Signed whole minutes from `from` to `to`, truncated toward zero.
pub fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_minutes()
}

pub fn minutes(amount: i64) -> Duration {
    Duration::minutes(amount)
}
