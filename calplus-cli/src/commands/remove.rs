use anyhow::{Context, Result};
use calplus_core::EventId;
use calplus_core::planner::Planner;
use calplus_core::storage::EventStorage;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::render::render_event_card;

pub async fn run<S: EventStorage>(planner: &mut Planner<S>, id: EventId, force: bool) -> Result<()> {
    let event = planner
        .get(id)
        .with_context(|| format!("No event with id {id}"))?;

    // Confirm unless --force
    if !force {
        println!("{}", render_event_card(event));
        println!();
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete \"{}\"?", event.title))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let removed = planner.remove(id).await?;
    println!("{}", format!("  Deleted: {}", removed.title).red());

    Ok(())
}
