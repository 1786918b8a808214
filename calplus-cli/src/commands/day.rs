use anyhow::Result;
use calplus_core::CalendarDate;
use calplus_core::planner::Planner;
use calplus_core::storage::EventStorage;
use calplus_core::visibility::LevelFilter;

use crate::render::Render;

pub fn run<S: EventStorage>(
    planner: &mut Planner<S>,
    date: CalendarDate,
    filter: LevelFilter,
) -> Result<()> {
    planner.select_date(date);
    println!("{}", planner.day_view(filter).render());
    Ok(())
}
