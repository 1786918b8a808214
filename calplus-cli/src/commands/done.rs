use anyhow::{Context, Result};
use calplus_core::EventId;
use calplus_core::planner::Planner;
use calplus_core::storage::EventStorage;
use owo_colors::OwoColorize;

pub async fn run<S: EventStorage>(planner: &mut Planner<S>, id: EventId) -> Result<()> {
    let title = planner
        .get(id)
        .map(|e| e.title.clone())
        .with_context(|| format!("No event with id {id}"))?;

    if planner.toggle_completed(id).await? {
        println!("{}", format!("  Completed: {title}").green());
    } else {
        println!("{}", format!("  Reopened: {title}").yellow());
    }

    Ok(())
}
