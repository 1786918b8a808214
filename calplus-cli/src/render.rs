//! TUI rendering for calplus types.
//!
//! Extension traits and helpers that draw day panels, event cards and the
//! month grid with owo_colors, using each priority level's color.

use std::collections::BTreeMap;

use calplus_core::month::MonthView;
use calplus_core::priority::hex_to_rgb;
use calplus_core::visibility::{DayView, MAX_DAY_COLORS, PriorityStats};
use calplus_core::{CalendarDate, Event, Level};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

fn paint(text: &str, hex: Option<&str>) -> String {
    match hex.and_then(hex_to_rgb) {
        Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
        None => text.dimmed().to_string(),
    }
}

impl Render for Level {
    fn render(&self) -> String {
        paint(self.label(), Level::color(*self))
    }
}

impl Render for PriorityStats {
    fn render(&self) -> String {
        let mut chips = vec![format!("All {}", self.total).bold().to_string()];
        for level in Level::ALL {
            chips.push(paint(&format!("{} {}", level.label(), self.count(level)), level.color()));
        }
        chips.join("  ")
    }
}

/// One event as a short card: time range, title, tags and level.
pub fn render_event_card(event: &Event) -> String {
    let marker = paint("●", event.level.color());
    let time = format!("{} - {}", event.start_time(), event.end_time());

    let mut tags = Vec::new();
    if event.repeat.is_recurring() {
        tags.push(format!("[{}]", event.repeat));
    }
    if event.is_multi_day() {
        tags.push("[multi-day]".to_string());
    }

    let (title, time) = if event.completed {
        (
            event.title.strikethrough().dimmed().to_string(),
            time.dimmed().to_string(),
        )
    } else {
        (event.title.bold().to_string(), time)
    };

    let mut lines = vec![format!(
        "  {} {} {} {} {}",
        marker,
        time,
        title,
        tags.join(" ").yellow(),
        event.level.render()
    )];

    let id = format!("#{}", event.id);
    let span = format!(
        "{} → {}",
        event.start.replace('T', " "),
        event.end.replace('T', " ")
    );
    lines.push(format!("      {}  {}", id.dimmed(), span.dimmed()));

    let note = event.description().filter(|d| !d.trim().is_empty());
    lines.push(format!(
        "      {} {}",
        "note:".dimmed(),
        note.unwrap_or("none").dimmed()
    ));

    lines.join("\n")
}

impl Render for DayView<'_> {
    fn render(&self) -> String {
        let header = format!("{}, {}", self.date.weekday_name(), self.date);
        let mut lines = vec![header.bold().to_string(), format!("  {}", self.stats.render())];

        if self.is_empty() {
            lines.push(String::new());
            lines.push(format!("  {}", "☕ Nothing scheduled".dimmed()));
        }

        if !self.active.is_empty() {
            lines.push(String::new());
            lines.extend(self.active.iter().map(|e| render_event_card(e)));
        }

        if !self.completed.is_empty() {
            lines.push(String::new());
            lines.push(format!("  {}", "Completed".dimmed()));
            lines.extend(self.completed.iter().map(|e| render_event_card(e)));
        }

        if !self.skipped.is_empty() {
            lines.push(String::new());
            let ids: Vec<String> = self
                .skipped
                .iter()
                .map(|id| match id.as_str() {
                    Some(text) => format!("#{text}"),
                    None => format!("#{id}"),
                })
                .collect();
            let warning = format!(
                "Skipped {} that could not be read: {}",
                pluralize("event", self.skipped.len()),
                ids.join(", ")
            );
            lines.push(format!("  {}", warning.red()));
        }

        lines.join("\n")
    }
}

/// Width of one day cell in the month grid
const CELL_WIDTH: usize = 5;

/// Month grid with today, the selected day and up to four colored dots per day.
pub fn render_month(
    month: MonthView,
    markers: &BTreeMap<CalendarDate, Vec<&'static str>>,
    selected: CalendarDate,
) -> String {
    let mut lines = Vec::new();
    let title = month.title();
    let width = CELL_WIDTH * 7;
    lines.push(format!("{:^width$}", title).bold().to_string());
    lines.push(
        ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
            .iter()
            .map(|d| format!("{:>4} ", d).dimmed().to_string())
            .collect::<String>(),
    );

    let blank = " ".repeat(CELL_WIDTH);
    let mut days_row = blank.repeat(month.leading_blanks() as usize);
    let mut dots_row = days_row.clone();
    let mut column = month.leading_blanks() as usize;

    for date in month.dates() {
        let number = format!("{:>4}", date.day());
        let number = if date == selected {
            number.reversed().to_string()
        } else if date.is_today() {
            number.underline().bold().to_string()
        } else {
            number
        };
        days_row.push_str(&number);
        days_row.push(' ');

        let colors = markers.get(&date).map(Vec::as_slice).unwrap_or_default();
        let colors = &colors[..colors.len().min(MAX_DAY_COLORS)];
        dots_row.push(' ');
        for color in colors {
            dots_row.push_str(&paint("•", Some(*color)));
        }
        dots_row.push_str(&" ".repeat(CELL_WIDTH - 1 - colors.len()));

        column += 1;
        if column == 7 {
            lines.push(std::mem::take(&mut days_row));
            lines.push(std::mem::take(&mut dots_row));
            column = 0;
        }
    }

    if column > 0 {
        lines.push(days_row);
        lines.push(dots_row);
    }

    lines.join("\n")
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calplus_core::visibility::{LevelFilter, resolve_day};

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize("event", 1), "1 event");
        assert_eq!(pluralize("event", 3), "3 events");
    }

    #[test]
    fn empty_day_shows_placeholder() {
        let date = CalendarDate::new(2026, 1, 10).unwrap();
        let view = resolve_day(&[], date, LevelFilter::All);
        let out = view.render();
        assert!(out.contains("Saturday, 2026-01-10"));
        assert!(out.contains("Nothing scheduled"));
    }

    #[test]
    fn month_grid_has_a_row_pair_per_week() {
        let month = MonthView::new(2026, 1).unwrap();
        let selected = CalendarDate::new(2026, 1, 15).unwrap();
        let out = render_month(month, &BTreeMap::new(), selected);

        assert!(out.contains("January 2026"));
        assert!(out.contains("31"));
        // title, weekday header, then 5 weeks of numbers + dots
        assert_eq!(out.lines().count(), 2 + 5 * 2);
    }

    #[test]
    fn month_grid_draws_at_most_four_dots_per_day() {
        let month = MonthView::new(2026, 1).unwrap();
        let busy = CalendarDate::new(2026, 1, 15).unwrap();
        let markers = BTreeMap::from([(busy, vec!["#ff4d4f"; 6])]);

        let out = render_month(month, &markers, busy);
        assert_eq!(out.matches('•').count(), MAX_DAY_COLORS);
    }
}
