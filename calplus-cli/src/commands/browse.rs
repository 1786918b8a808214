//! Interactive month and day navigation.
//!
//! The month grid publishes every date selection on the planner's bus. The
//! day panel only learns about selections from that bus, keeps its own date
//! and level filter, and supplies the default date for new events.

use anyhow::Result;
use calplus_core::bus::UiMessage;
use calplus_core::draft::EventDraft;
use calplus_core::month::MonthView;
use calplus_core::planner::Planner;
use calplus_core::storage::EventStorage;
use calplus_core::visibility::{self, LevelFilter};
use calplus_core::{CalendarDate, Event, EventId, Level, Record};
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::commands::add::prompt_draft;
use crate::render::{Render, render_month};

pub struct DayPanel {
    date: CalendarDate,
    filter: LevelFilter,
    inbox: broadcast::Receiver<UiMessage>,
}

impl DayPanel {
    pub fn new(date: CalendarDate, inbox: broadcast::Receiver<UiMessage>) -> Self {
        DayPanel {
            date,
            filter: LevelFilter::All,
            inbox,
        }
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn filter(&self) -> LevelFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: LevelFilter) {
        self.filter = filter;
    }

    /// Apply pending selections; the latest one wins. Returns whether the date changed.
    pub fn sync(&mut self) -> bool {
        let before = self.date;
        loop {
            match self.inbox.try_recv() {
                Ok(UiMessage::DateSelected(date)) => self.date = date,
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::debug!(missed, "Day panel fell behind date selections");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        self.date != before
    }

    /// A new event defaults to the day on display.
    pub fn draft(&self, title: impl Into<String>) -> EventDraft {
        EventDraft::for_date(title, self.date)
    }

    pub fn render(&self, records: &[Record]) -> String {
        visibility::resolve_day(records, self.date, self.filter).render()
    }
}

#[derive(Clone, Copy)]
enum Action {
    PickDay,
    PreviousMonth,
    NextMonth,
    Today,
    Add,
    Toggle,
    Remove,
    Filter,
    Reload,
    Quit,
}

const ACTIONS: [(Action, &str); 10] = [
    (Action::PickDay, "Pick a day"),
    (Action::PreviousMonth, "← Previous month"),
    (Action::NextMonth, "→ Next month"),
    (Action::Today, "Today"),
    (Action::Add, "Add event"),
    (Action::Toggle, "Complete / reopen event"),
    (Action::Remove, "Delete event"),
    (Action::Filter, "Filter by priority"),
    (Action::Reload, "Reload from server"),
    (Action::Quit, "Quit"),
];

pub async fn run<S: EventStorage>(planner: &mut Planner<S>) -> Result<()> {
    let mut panel = DayPanel::new(planner.selected_date(), planner.subscribe());
    let mut month = MonthView::containing(planner.selected_date());

    loop {
        panel.sync();
        let markers = planner.month_markers(month);
        println!();
        println!("{}", render_month(month, &markers, planner.selected_date()));
        println!();
        println!("{}", panel.render(planner.events()));
        println!();

        let labels: Vec<&str> = ACTIONS.iter().map(|(_, label)| *label).collect();
        let chosen = Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        match ACTIONS[chosen].0 {
            Action::PickDay => {
                if let Some(date) = prompt_day(month)? {
                    planner.select_date(date);
                }
            }
            Action::PreviousMonth => month = month.shift(-1),
            Action::NextMonth => month = month.shift(1),
            Action::Today => {
                let today = CalendarDate::today();
                month = MonthView::containing(today);
                planner.select_date(today);
            }
            Action::Add => {
                let draft = prompt_draft(panel.draft(String::new()), panel.date())?;
                match planner.add(draft).await {
                    Ok(id) => println!("{}", format!("  Created #{id}").green()),
                    Err(e) => eprintln!("  {}", e.to_string().red()),
                }
            }
            Action::Toggle => {
                if let Some(id) = pick_event(planner.events(), &panel, "Toggle which event?")? {
                    if let Err(e) = planner.toggle_completed(id).await {
                        eprintln!("  {}", e.to_string().red());
                    }
                }
            }
            Action::Remove => {
                if let Some(id) = pick_event(planner.events(), &panel, "Delete which event?")? {
                    let confirmed = Confirm::new()
                        .with_prompt("Delete this event?")
                        .default(false)
                        .interact()?;
                    if confirmed {
                        if let Err(e) = planner.remove(id).await {
                            eprintln!("  {}", e.to_string().red());
                        }
                    }
                }
            }
            Action::Filter => panel.set_filter(prompt_filter(panel.filter())?),
            Action::Reload => {
                if let Err(e) = planner.reload().await {
                    eprintln!("  {}", e.to_string().red());
                }
            }
            Action::Quit => return Ok(()),
        }
    }
}

/// Ask for a day number in `month`. Empty input cancels.
fn prompt_day(month: MonthView) -> Result<Option<CalendarDate>> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("  Day of {} (1-{})", month.title(), month.days_in_month()))
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.trim().is_empty() {
            return Ok(None);
        }

        match input.trim().parse::<u32>() {
            Ok(day) => match CalendarDate::new(month.year(), month.month(), day) {
                Ok(date) => return Ok(Some(date)),
                Err(e) => eprintln!("  {}", e.to_string().red()),
            },
            Err(_) => eprintln!("  {}", "Enter a day number".red()),
        }
    }
}

/// Choose one of the events shown in the panel, pending first.
fn pick_event(records: &[Record], panel: &DayPanel, prompt: &str) -> Result<Option<EventId>> {
    let view = visibility::resolve_day(records, panel.date(), panel.filter());
    let choices: Vec<&Event> = view.active.iter().chain(&view.completed).copied().collect();

    if choices.is_empty() {
        println!("{}", "  Nothing to choose from".dimmed());
        return Ok(None);
    }

    let labels: Vec<String> = choices
        .iter()
        .map(|e| {
            let status = if e.completed { "✓" } else { " " };
            format!("{status} {} {} ({})", e.start_time(), e.title, e.level)
        })
        .collect();

    let chosen = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(chosen.map(|i| choices[i].id))
}

fn prompt_filter(current: LevelFilter) -> Result<LevelFilter> {
    let mut filters = vec![LevelFilter::All];
    filters.extend(Level::ALL.into_iter().map(LevelFilter::Only));

    let labels: Vec<&str> = filters
        .iter()
        .map(|f| match f {
            LevelFilter::All => "All",
            LevelFilter::Only(level) => level.label(),
        })
        .collect();
    let default = filters.iter().position(|f| *f == current).unwrap_or_default();

    let chosen = Select::new()
        .with_prompt("  Show pending events of")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(filters[chosen])
}

#[cfg(test)]
mod tests {
    use super::*;
    use calplus_core::bus::DateBus;

    fn day(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn panel_follows_the_latest_selection() {
        let bus = DateBus::new();
        let mut panel = DayPanel::new(day("2026-01-10"), bus.subscribe());

        assert!(!panel.sync());
        bus.publish(day("2026-01-12"));
        bus.publish(day("2026-01-20"));
        assert!(panel.sync());
        assert_eq!(panel.date(), day("2026-01-20"));
    }

    #[test]
    fn panel_keeps_its_date_when_nothing_is_published() {
        let bus = DateBus::new();
        let mut panel = DayPanel::new(day("2026-03-01"), bus.subscribe());
        panel.set_filter(LevelFilter::Only(Level::EMERGENCY));

        assert!(!panel.sync());
        assert_eq!(panel.date(), day("2026-03-01"));
        assert_eq!(panel.filter(), LevelFilter::Only(Level::EMERGENCY));
    }

    #[test]
    fn panel_survives_a_flood_of_selections() {
        let bus = DateBus::new();
        let mut panel = DayPanel::new(day("2026-01-01"), bus.subscribe());
        let start = day("2026-01-01");
        for offset in 1..=40 {
            bus.publish(start.add_days(offset).unwrap());
        }

        assert!(panel.sync());
        assert_eq!(panel.date(), day("2026-02-10"));
    }

    #[test]
    fn drafts_default_to_the_panel_date() {
        let bus = DateBus::new();
        let mut panel = DayPanel::new(day("2026-01-10"), bus.subscribe());
        bus.publish(day("2026-04-02"));
        panel.sync();

        let draft = panel.draft("Dentist");
        assert_eq!(draft.start, "2026-04-02T09:00");
        assert_eq!(draft.end, "2026-04-02T11:00");
    }
}
