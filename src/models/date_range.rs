//! Inclusive calendar date range for forecast queries

use crate::{Result, SnowcastError};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;

/// Wire format of a calendar date, "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive range of calendar days, always `from <= to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting an inverted one
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(SnowcastError::validation(format!(
                "start date {} must not be after end date {}",
                from.format(DATE_FORMAT),
                to.format(DATE_FORMAT)
            )));
        }
        Ok(Self { from, to })
    }

    /// A range covering one day
    #[must_use]
    pub fn single(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    /// Today's date as seen in `tz`
    #[must_use]
    pub fn today_in(tz: Tz) -> NaiveDate {
        Utc::now().with_timezone(&tz).date_naive()
    }

    /// Parse both ends from "YYYY-MM-DD" strings
    pub fn parse(from: &str, to: &str) -> Result<Self> {
        let from = parse_date("start", from)?;
        let to = parse_date("end", to)?;
        Self::new(from, to)
    }

    /// First day of the range
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.from
    }

    /// Last day of the range, inclusive
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.to
    }

    /// Number of days covered, both ends included
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    #[must_use]
    pub fn start_param(&self) -> String {
        self.from.format(DATE_FORMAT).to_string()
    }

    #[must_use]
    pub fn end_param(&self) -> String {
        self.to.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_param(), self.end_param())
    }
}

fn parse_date(label: &str, value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SnowcastError::validation(format!("{label} date is required")));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        SnowcastError::validation(format!(
            "{label} date '{value}' is not a valid YYYY-MM-DD date"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_range() {
        let range = DateRange::parse("2024-01-01", "2024-01-07").unwrap();
        assert_eq!(range.start(), date(2024, 1, 1));
        assert_eq!(range.end(), date(2024, 1, 7));
        assert_eq!(range.days(), 7);
        assert_eq!(range.to_string(), "2024-01-01..2024-01-07");
    }

    #[test]
    fn test_same_day_is_valid() {
        let range = DateRange::parse("2024-02-29", "2024-02-29").unwrap();
        assert_eq!(range.days(), 1);
        assert_eq!(range, DateRange::single(date(2024, 2, 29)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::new(date(2024, 1, 2), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, SnowcastError::Validation { .. }));
        assert!(err.to_string().contains("must not be after"));
    }

    #[rstest]
    #[case("", "2024-01-01", "start date is required")]
    #[case("2024-01-01", "  ", "end date is required")]
    #[case("2024/01/01", "2024-01-02", "not a valid YYYY-MM-DD")]
    #[case("2024-01-01", "2024-13-01", "not a valid YYYY-MM-DD")]
    #[case("2023-02-29", "2023-03-01", "not a valid YYYY-MM-DD")]
    fn test_parse_rejects_malformed(#[case] from: &str, #[case] to: &str, #[case] expected: &str) {
        let err = DateRange::parse(from, to).unwrap_err();
        assert!(matches!(err, SnowcastError::Validation { .. }));
        assert!(err.to_string().contains(expected), "{err}");
    }

    #[test]
    fn test_today_in_is_within_a_day_of_utc() {
        let utc_today = Utc::now().date_naive();
        let tokyo_today = DateRange::today_in(chrono_tz::Asia::Tokyo);
        assert!((tokyo_today - utc_today).num_days().abs() <= 1);
    }

    #[test]
    fn test_query_params() {
        let range = DateRange::parse(" 2024-12-30 ", "2025-01-02").unwrap();
        assert_eq!(range.start_param(), "2024-12-30");
        assert_eq!(range.end_param(), "2025-01-02");
    }
}
