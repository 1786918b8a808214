//! Event creation input and its validation.

use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::{PlannerError, PlannerResult};
use crate::event::{Event, EventId, Repeat, parse_timestamp};
use crate::priority::Level;

/// Default time slot offered for a new event on the selected day.
const DEFAULT_START: (u32, u32) = (9, 0);
const DEFAULT_END: (u32, u32) = (11, 0);

/// Unvalidated event input, as entered in a form or on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub desc: Option<String>,
}

impl EventDraft {
    /// A draft on `date` from 09:00 to 11:00, not repeating, Normal priority.
    pub fn for_date(title: impl Into<String>, date: CalendarDate) -> Self {
        EventDraft {
            title: title.into(),
            start: date.at(DEFAULT_START.0, DEFAULT_START.1),
            end: date.at(DEFAULT_END.0, DEFAULT_END.1),
            repeat: Repeat::None,
            level: Level::NORMAL,
            desc: None,
        }
    }

    pub fn validate(&self) -> PlannerResult<()> {
        if self.title.trim().is_empty() {
            return Err(PlannerError::EmptyTitle);
        }
        let start = parse_timestamp(&self.start)?;
        let end = parse_timestamp(&self.end)?;
        if end <= start {
            return Err(PlannerError::InvalidSpan);
        }
        if !self.level.is_known() {
            return Err(PlannerError::InvalidLevel(self.level.value()));
        }
        if let Repeat::Other(mode) = &self.repeat {
            return Err(PlannerError::InvalidRepeat(mode.clone()));
        }
        Ok(())
    }

    /// Validate and turn the draft into a stored event with the given id.
    pub fn into_event(self, id: EventId) -> PlannerResult<Event> {
        self.validate()?;
        Ok(Event {
            id,
            title: self.title.trim().to_string(),
            start: self.start.trim().to_string(),
            end: self.end.trim().to_string(),
            repeat: self.repeat,
            level: self.level,
            desc: self.desc.filter(|d| !d.trim().is_empty()).map(Some),
            completed: false,
            extra: Default::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EventDraft {
        EventDraft::for_date("Review", CalendarDate::new(2026, 1, 10).unwrap())
    }

    #[test]
    fn defaults_follow_selected_date() {
        let d = draft();
        assert_eq!(d.start, "2026-01-10T09:00");
        assert_eq!(d.end, "2026-01-10T11:00");
        assert_eq!(d.repeat, Repeat::None);
        assert_eq!(d.level, Level::NORMAL);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn rejects_blank_title() {
        let mut d = draft();
        d.title = "   ".into();
        assert!(matches!(d.validate(), Err(PlannerError::EmptyTitle)));
    }

    #[test]
    fn rejects_end_not_after_start() {
        let mut d = draft();
        d.end = d.start.clone();
        assert!(matches!(d.validate(), Err(PlannerError::InvalidSpan)));
        d.end = "2026-01-10T08:59".into();
        assert!(matches!(d.validate(), Err(PlannerError::InvalidSpan)));
    }

    #[test]
    fn rejects_unparseable_timestamps_and_bad_levels() {
        let mut d = draft();
        d.start = "2026-01-10 9am".into();
        assert!(matches!(d.validate(), Err(PlannerError::InvalidTimestamp(_))));

        let mut d = draft();
        d.level = serde_json::from_str("9").unwrap();
        assert!(matches!(d.validate(), Err(PlannerError::InvalidLevel(9))));
    }

    #[test]
    fn into_event_trims_and_drops_blank_description() {
        let mut d = draft();
        d.title = "  Review  ".into();
        d.desc = Some("  ".into());
        let event = d.into_event(EventId(42)).unwrap();
        assert_eq!(event.title, "Review");
        assert_eq!(event.desc, None);
        assert!(!event.completed);
        assert_eq!(event.id, EventId(42));
    }
}
