pub mod add;
pub mod browse;
pub mod day;
pub mod done;
pub mod month;
pub mod remove;

use anyhow::{Context, Result};
use calplus_core::visibility::LevelFilter;
use calplus_core::{CalendarDate, Level};

/// Parse `YYYY-MM-DD` or one of "today", "tomorrow", "yesterday".
pub fn parse_date(input: &str) -> Result<CalendarDate> {
    let today = CalendarDate::today();
    let date = match input.trim().to_lowercase().as_str() {
        "today" => Some(today),
        "tomorrow" => today.add_days(1),
        "yesterday" => today.add_days(-1),
        other => Some(other.parse::<CalendarDate>()?),
    };
    date.context("Date out of range")
}

pub fn parse_date_or_today(input: Option<&str>) -> Result<CalendarDate> {
    input.map_or_else(|| Ok(CalendarDate::today()), parse_date)
}

pub fn level_filter(level: Option<u8>) -> Result<LevelFilter> {
    Ok(match level {
        Some(value) => LevelFilter::Only(Level::new(value)?),
        None => LevelFilter::All,
    })
}
