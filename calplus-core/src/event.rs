//! Event records as stored in the collection file.
//!
//! Timestamps are kept exactly as written (`YYYY-MM-DDTHH:MM`) so that a
//! load/save cycle reproduces the file, and are parsed on demand by
//! [`Event::span`]. Records written by older clients may lack `completed`;
//! it defaults to `false`. Elements that do not fit [`Event`] at all are
//! carried as [`Record::Malformed`] and written back untouched.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::date::CalendarDate;
use crate::error::{PlannerError, PlannerResult};
use crate::priority::Level;

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Opaque event identifier, derived from the creation time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EventId)
    }
}

/// Recurrence mode. Unrecognized values are kept verbatim and never match a day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Repeat {
    #[default]
    None,
    Daily,
    Weekly,
    Yearly,
    Other(String),
}

impl Repeat {
    pub fn as_str(&self) -> &str {
        match self {
            Repeat::None => "none",
            Repeat::Daily => "daily",
            Repeat::Weekly => "weekly",
            Repeat::Yearly => "yearly",
            Repeat::Other(s) => s,
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Repeat::None)
    }
}

impl From<String> for Repeat {
    fn from(value: String) -> Self {
        match value.as_str() {
            "none" => Repeat::None,
            "daily" => Repeat::Daily,
            "weekly" => Repeat::Weekly,
            "yearly" => Repeat::Yearly,
            _ => Repeat::Other(value),
        }
    }
}

impl From<Repeat> for String {
    fn from(value: Repeat) -> Self {
        match value {
            Repeat::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parsing for user input: only the four known modes are accepted.
impl FromStr for Repeat {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Repeat::from(s.trim().to_lowercase()) {
            Repeat::Other(_) => Err(PlannerError::InvalidRepeat(s.to_string())),
            known => Ok(known),
        }
    }
}

/// A calendar entry (the only persisted entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub start: String,
    pub end: String,
    pub repeat: Repeat,
    pub level: Level,
    /// `None` when the key is absent, `Some(None)` for an explicit `null`
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub desc: Option<Option<String>>,
    #[serde(default)]
    pub completed: bool,
    /// Fields written by other clients, preserved on re-save
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// One element of the persisted collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Event(Event),
    /// Anything that is not a valid event, kept verbatim
    Malformed(Value),
}

impl Record {
    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Record::Event(event) => Some(event),
            Record::Malformed(_) => None,
        }
    }

    pub fn as_event_mut(&mut self) -> Option<&mut Event> {
        match self {
            Record::Event(event) => Some(event),
            Record::Malformed(_) => None,
        }
    }

    /// The `id` as written in the record, `null` when there is none.
    pub fn raw_id(&self) -> Value {
        match self {
            Record::Event(event) => Value::from(event.id.0),
            Record::Malformed(value) => value.get("id").cloned().unwrap_or(Value::Null),
        }
    }
}

impl From<Event> for Record {
    fn from(event: Event) -> Self {
        Record::Event(event)
    }
}

/// Parsed start and end of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSpan {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl EventSpan {
    pub fn start_date(&self) -> CalendarDate {
        CalendarDate::from_naive(self.start.date())
    }

    pub fn end_date(&self) -> CalendarDate {
        CalendarDate::from_naive(self.end.date())
    }

    /// Extra calendar days covered after the start date (0 for same-day events).
    pub fn extra_days(&self) -> i64 {
        self.start_date().days_until(self.end_date()).max(0)
    }
}

impl Event {
    pub fn span(&self) -> PlannerResult<EventSpan> {
        Ok(EventSpan {
            start: parse_timestamp(&self.start)?,
            end: parse_timestamp(&self.end)?,
        })
    }

    /// The description text, if any.
    pub fn description(&self) -> Option<&str> {
        self.desc.as_ref().and_then(|d| d.as_deref())
    }

    /// Whether start and end fall on different calendar days (by the raw date part).
    pub fn is_multi_day(&self) -> bool {
        date_part(&self.start) != date_part(&self.end)
    }

    /// Time-of-day part of the start timestamp, e.g. "09:00".
    pub fn start_time(&self) -> &str {
        time_part(&self.start)
    }

    pub fn end_time(&self) -> &str {
        time_part(&self.end)
    }
}

/// Parse a local wall-clock timestamp (`YYYY-MM-DDTHH:MM`, seconds optional).
pub fn parse_timestamp(s: &str) -> PlannerResult<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
        .ok_or_else(|| PlannerError::InvalidTimestamp(s.to_string()))
}

fn date_part(timestamp: &str) -> &str {
    timestamp.split_once('T').map_or(timestamp, |(date, _)| date)
}

fn time_part(timestamp: &str) -> &str {
    timestamp.split_once('T').map_or(timestamp, |(_, time)| time)
}
