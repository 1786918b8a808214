//! Month grid layout and navigation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::date::CalendarDate;
use crate::error::{PlannerError, PlannerResult};

/// A calendar month, identified by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthView {
    first: CalendarDate,
}

impl MonthView {
    /// `month` is 1-based.
    pub fn new(year: i32, month: u32) -> PlannerResult<Self> {
        let first = CalendarDate::new(year, month, 1)
            .map_err(|_| PlannerError::InvalidMonth(format!("{year:04}-{month:02}")))?;
        Ok(MonthView { first })
    }

    pub fn containing(date: CalendarDate) -> Self {
        MonthView {
            first: CalendarDate::new(date.year(), date.month(), 1).unwrap_or(date),
        }
    }

    pub fn current() -> Self {
        Self::containing(CalendarDate::today())
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn first_day(self) -> CalendarDate {
        self.first
    }

    /// Move by `delta` months, crossing year boundaries as needed.
    pub fn shift(self, delta: i32) -> Self {
        let index = self.year() * 12 + (self.month() as i32 - 1) + delta;
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) as u32 + 1;
        Self::new(year, month).unwrap_or(self)
    }

    pub fn days_in_month(self) -> u32 {
        self.shift(1)
            .first
            .add_days(-1)
            .filter(|last| last.month() == self.month())
            .map_or(31, CalendarDate::day)
    }

    /// Number of empty cells before the 1st in a Sunday-first week grid.
    pub fn leading_blanks(self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn dates(self) -> impl Iterator<Item = CalendarDate> {
        (1..=self.days_in_month())
            .filter_map(move |day| CalendarDate::new(self.year(), self.month(), day).ok())
    }

    pub fn contains(self, date: CalendarDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Long name for headers, e.g. "January 2026".
    pub fn title(self) -> String {
        self.first.to_naive().format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthView {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map(|d| Self::containing(d.into()))
            .map_err(|_| PlannerError::InvalidMonth(s.to_string()))
    }
}
