//! Event visibility resolver.
//!
//! Decides which events occur on a calendar day, the order they are listed
//! in, how many are pending per priority level, and which colors mark the
//! day in the month grid. Everything here is a pure function of the
//! collection and the date.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::date::CalendarDate;
use crate::error::PlannerResult;
use crate::event::{Event, Record, Repeat};
use crate::month::MonthView;
use crate::priority::Level;

/// Most markers drawn in one day cell.
pub const MAX_DAY_COLORS: usize = 4;

/// Restricts the active list of a day view to one priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LevelFilter {
    #[default]
    All,
    Only(Level),
}

impl LevelFilter {
    pub fn matches(self, level: Level) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Only(wanted) => wanted == level,
        }
    }
}

/// Pending (not completed) events on a day, counted per level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityStats {
    /// Indexed by level value (0 = Remark .. 3 = Emergency)
    pub by_level: [usize; 4],
    pub total: usize,
}

impl PriorityStats {
    pub fn count(&self, level: Level) -> usize {
        self.by_level
            .get(usize::from(level.value()))
            .copied()
            .unwrap_or(0)
    }

    fn record(&mut self, level: Level) {
        if let Some(slot) = self.by_level.get_mut(usize::from(level.value())) {
            *slot += 1;
        }
        self.total += 1;
    }
}

/// Everything a day panel needs to render one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView<'a> {
    pub date: CalendarDate,
    /// Pending events after the level filter, most urgent first
    pub active: Vec<&'a Event>,
    /// Completed events, never filtered
    pub completed: Vec<&'a Event>,
    pub stats: PriorityStats,
    pub colors: Vec<&'static str>,
    /// Ids (as written) of records left out because they are not valid
    /// events or their timestamps could not be parsed
    pub skipped: Vec<Value>,
}

impl DayView<'_> {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.completed.is_empty()
    }
}

/// Whether `event` occurs on `date`.
///
/// Recurring events repeat their whole span: an occurrence anchored on day
/// `a` covers `a` through `a + extra_days`. Unknown recurrence modes never
/// match.
pub fn occurs_on(event: &Event, date: CalendarDate) -> PlannerResult<bool> {
    let span = event.span()?;
    let first = span.start_date();
    if date < first {
        return Ok(false);
    }
    let width = span.extra_days();

    let visible = match &event.repeat {
        Repeat::None => date <= span.end_date(),
        Repeat::Daily => true,
        Repeat::Weekly => {
            let back = (date.weekday().num_days_from_sunday() + 7
                - first.weekday().num_days_from_sunday())
                % 7;
            i64::from(back) <= width
        }
        Repeat::Yearly => yearly_anchor_covers(first, width, date),
        Repeat::Other(mode) => {
            tracing::debug!(id = %event.id, mode = %mode, "Ignoring event with unknown repeat mode");
            false
        }
    };

    Ok(visible)
}

/// Walk back through yearly anniversaries of `first` until one covers `date`
/// or the gap exceeds the span. Anniversaries that do not exist (Feb 29 in
/// common years) are skipped.
fn yearly_anchor_covers(first: CalendarDate, width: i64, date: CalendarDate) -> bool {
    for year in (first.year()..=date.year()).rev() {
        let Ok(anchor) = CalendarDate::new(year, first.month(), first.day()) else {
            continue;
        };
        if anchor > date {
            continue;
        }
        return anchor.days_until(date) <= width;
    }
    false
}

/// Display order: level descending, then start ascending. Stable.
pub fn sort_for_display(events: &mut [&Event]) {
    events.sort_by(|a, b| b.level.cmp(&a.level).then_with(|| a.start.cmp(&b.start)));
}

struct Visible<'a> {
    pending: Vec<&'a Event>,
    completed: Vec<&'a Event>,
    skipped: Vec<Value>,
}

fn collect_visible(records: &[Record], date: CalendarDate) -> Visible<'_> {
    let mut visible = Visible {
        pending: Vec::new(),
        completed: Vec::new(),
        skipped: Vec::new(),
    };

    for record in records {
        let Some(event) = record.as_event() else {
            visible.skipped.push(record.raw_id());
            continue;
        };
        match occurs_on(event, date) {
            Ok(true) if event.completed => visible.completed.push(event),
            Ok(true) => visible.pending.push(event),
            Ok(false) => {}
            Err(_) => visible.skipped.push(record.raw_id()),
        }
    }

    sort_for_display(&mut visible.pending);
    sort_for_display(&mut visible.completed);
    visible
}

fn colors_of(sorted_pending: &[&Event]) -> Vec<&'static str> {
    sorted_pending
        .iter()
        .filter_map(|event| event.level.color())
        .take(MAX_DAY_COLORS)
        .collect()
}

fn stats_of(pending: &[&Event]) -> PriorityStats {
    let mut stats = PriorityStats::default();
    for event in pending {
        stats.record(event.level);
    }
    stats
}

/// Resolve the full day view for `date`.
///
/// `filter` narrows only the active list; completed events, statistics and
/// colors always reflect the whole day.
pub fn resolve_day(records: &[Record], date: CalendarDate, filter: LevelFilter) -> DayView<'_> {
    let visible = collect_visible(records, date);

    for id in &visible.skipped {
        tracing::warn!(%id, %date, "Skipping malformed event");
    }

    let stats = stats_of(&visible.pending);
    let colors = colors_of(&visible.pending);
    let active = visible
        .pending
        .into_iter()
        .filter(|event| filter.matches(event.level))
        .collect();

    DayView {
        date,
        active,
        completed: visible.completed,
        stats,
        colors,
        skipped: visible.skipped,
    }
}

/// Up to [`MAX_DAY_COLORS`] marker colors for a day, most urgent first.
pub fn day_colors(records: &[Record], date: CalendarDate) -> Vec<&'static str> {
    colors_of(&collect_visible(records, date).pending)
}

/// Pending event counts per level for a day, ignoring any level filter.
pub fn priority_stats(records: &[Record], date: CalendarDate) -> PriorityStats {
    stats_of(&collect_visible(records, date).pending)
}

/// Marker colors for every day of `month` that has at least one.
pub fn month_markers(
    records: &[Record],
    month: MonthView,
) -> BTreeMap<CalendarDate, Vec<&'static str>> {
    month
        .dates()
        .map(|date| (date, day_colors(records, date)))
        .filter(|(_, colors)| !colors.is_empty())
        .collect()
}
