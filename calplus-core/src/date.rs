//! Structured calendar dates.
//!
//! A `CalendarDate` is a validated (year, month, day) triple with a 1-based
//! month. Ordering is derived from the fields in that order, so comparisons
//! never go through string keys.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PlannerError, PlannerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// Build a date from explicit components. `month` is 1-based.
    pub fn new(year: i32, month: u32, day: u32) -> PlannerResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from_naive)
            .ok_or_else(|| PlannerError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        CalendarDate {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    /// Today's date on the local wall clock.
    pub fn today() -> Self {
        Self::from_naive(Local::now().date_naive())
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn day(self) -> u32 {
        self.day
    }

    pub fn to_naive(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .expect("CalendarDate components are validated on construction")
    }

    pub fn weekday(self) -> Weekday {
        self.to_naive().weekday()
    }

    /// Full weekday name, e.g. "Monday".
    pub fn weekday_name(self) -> String {
        self.to_naive().format("%A").to_string()
    }

    pub fn is_today(self) -> bool {
        self == Self::today()
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: CalendarDate) -> i64 {
        (other.to_naive() - self.to_naive()).num_days()
    }

    pub fn add_days(self, days: i64) -> Option<Self> {
        self.to_naive()
            .checked_add_signed(Duration::days(days))
            .map(Self::from_naive)
    }

    /// Format as a `YYYY-MM-DDTHH:MM` timestamp at the given wall-clock time.
    pub fn at(self, hour: u32, minute: u32) -> String {
        format!("{self}T{hour:02}:{minute:02}")
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self::from_naive)
            .map_err(|_| PlannerError::InvalidDate(s.to_string()))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_naive(date)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn ordering_uses_fields_not_strings() {
        // "2026-1-9" > "2026-1-10" as strings; fields must order correctly
        assert!(date(2026, 1, 9) < date(2026, 1, 10));
        assert!(date(2025, 12, 31) < date(2026, 1, 1));
        assert!(date(2026, 2, 1) > date(2026, 1, 31));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(CalendarDate::new(2026, 2, 29).is_err());
        assert!(CalendarDate::new(2026, 13, 1).is_err());
        assert!(CalendarDate::new(2026, 0, 1).is_err());
        assert!(CalendarDate::new(2028, 2, 29).is_ok());
    }

    #[test]
    fn parses_and_displays_zero_padded() {
        let d: CalendarDate = "2026-01-05".parse().unwrap();
        assert_eq!(d, date(2026, 1, 5));
        assert_eq!(d.to_string(), "2026-01-05");
        assert!("2026-1-5x".parse::<CalendarDate>().is_err());
        assert!("".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn weekday_and_day_arithmetic() {
        // 2026-01-12 is a Monday
        assert_eq!(date(2026, 1, 12).weekday(), Weekday::Mon);
        assert_eq!(date(2026, 1, 12).weekday_name(), "Monday");
        assert_eq!(date(2026, 1, 10).days_until(date(2026, 1, 12)), 2);
        assert_eq!(date(2026, 1, 12).days_until(date(2026, 1, 10)), -2);
        assert_eq!(date(2026, 1, 31).add_days(1), Some(date(2026, 2, 1)));
    }

    #[test]
    fn formats_timestamps_for_drafts() {
        assert_eq!(date(2026, 3, 7).at(9, 0), "2026-03-07T09:00");
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&date(2026, 1, 5)).unwrap();
        assert_eq!(json, "\"2026-01-05\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date(2026, 1, 5));
    }
}
