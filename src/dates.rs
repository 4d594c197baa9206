//! Day-bucket keys.
//!
//! Day-scoped records (tasks, sessions) are partitioned by a canonical
//! `YYYY-MM-DD` key; week-scoped records (weekly goals, reflections) are
//! partitioned by the Monday key of their ISO week. Keys are parsed into
//! `NaiveDate` internally but keep the canonical text form at the storage
//! boundary.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Error;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar-day partition key in canonical `YYYY-MM-DD` form.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The current local calendar date.
    ///
    /// Computed fresh on every call; already-derived keys are not expected
    /// to track midnight or DST transitions.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// The Monday on or before this date (ISO week, Monday-first).
    ///
    /// Sunday maps to the Monday six days prior.
    pub fn week_start(self) -> Self {
        let days_from_monday = self.0.weekday().num_days_from_monday();
        Self(self.0 - Duration::days(i64::from(days_from_monday)))
    }

    /// The key `days` calendar days after this one.
    pub fn plus_days(self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        NaiveDate::parse_from_str(s.trim(), DATE_KEY_FORMAT)
            .map(DateKey)
            .map_err(|_| {
                Error::InvalidArgument(format!("Invalid date key '{}'. Expected YYYY-MM-DD", s))
            })
    }
}

/// The current local calendar date as a partition key.
pub fn today() -> DateKey {
    DateKey::today()
}

/// The Monday key of the ISO week containing `date`.
pub fn week_start(date: DateKey) -> DateKey {
    date.week_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn week_start_of_monday_is_itself() {
        // 2024-01-01 is a Monday.
        assert_eq!(key("2024-01-01").week_start(), key("2024-01-01"));
    }

    #[test]
    fn week_start_of_sunday_is_six_days_back() {
        // 2024-01-07 is the Sunday ending that week.
        assert_eq!(key("2024-01-07").week_start(), key("2024-01-01"));
    }

    #[test]
    fn week_start_of_midweek_day() {
        // 2024-01-04 is a Thursday.
        assert_eq!(key("2024-01-04").week_start(), key("2024-01-01"));
        // Crossing a month boundary: 2024-03-01 is a Friday.
        assert_eq!(key("2024-03-01").week_start(), key("2024-02-26"));
    }

    #[test]
    fn display_and_parse_round_trip() {
        let original = key("2024-02-29");
        assert_eq!(original.to_string(), "2024-02-29");
        assert_eq!(original.to_string().parse::<DateKey>().unwrap(), original);
    }

    #[test]
    fn parse_rejects_non_canonical_text() {
        assert!("2024/01/01".parse::<DateKey>().is_err());
        assert!("01-01-2024".parse::<DateKey>().is_err());
        assert!("not a date".parse::<DateKey>().is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&key("2024-01-01")).unwrap();
        assert_eq!(json, "\"2024-01-01\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key("2024-01-01"));
    }

    #[test]
    fn plus_days_and_ordering() {
        let start = key("2024-01-01");
        let end = start.plus_days(7);
        assert_eq!(end, key("2024-01-08"));
        assert!(key("2024-01-07") < end);
        assert!(key("2024-01-08") >= end);
    }

    #[test]
    fn week_start_of_today_is_consistent() {
        let today = today();
        let start = week_start(today);
        assert!(start <= today);
        assert!(today < start.plus_days(7));
        assert_eq!(start.week_start(), start);
    }
}
