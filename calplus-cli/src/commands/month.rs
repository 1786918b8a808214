use anyhow::Result;
use calplus_core::CalendarDate;
use calplus_core::month::MonthView;
use calplus_core::planner::Planner;
use calplus_core::storage::EventStorage;
use calplus_core::visibility::LevelFilter;

use crate::render::{Render, render_month};

/// Print the month grid, then the selected day below it.
///
/// Without `--select` the selection is today when it falls in the month,
/// otherwise the first of the month.
pub fn run<S: EventStorage>(
    planner: &mut Planner<S>,
    month: MonthView,
    select: Option<CalendarDate>,
) -> Result<()> {
    let today = CalendarDate::today();
    let selected = select.unwrap_or(if month.contains(today) {
        today
    } else {
        month.first_day()
    });
    planner.select_date(selected);

    let markers = planner.month_markers(month);
    println!("{}", render_month(month, &markers, selected));
    println!();
    println!("{}", planner.day_view(LevelFilter::All).render());
    Ok(())
}
