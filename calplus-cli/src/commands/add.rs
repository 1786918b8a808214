use anyhow::Result;
use calplus_core::draft::EventDraft;
use calplus_core::event::parse_timestamp;
use calplus_core::planner::Planner;
use calplus_core::storage::EventStorage;
use calplus_core::{CalendarDate, Level, Repeat};
use chrono::NaiveTime;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

pub struct AddArgs {
    pub title: Option<String>,
    pub date: CalendarDate,
    pub start: Option<String>,
    pub end: Option<String>,
    pub repeat: Repeat,
    pub level: u8,
    pub desc: Option<String>,
}

pub async fn run<S: EventStorage>(planner: &mut Planner<S>, args: AddArgs) -> Result<()> {
    let interactive = args.title.is_none();

    let draft = if interactive {
        prompt_draft(EventDraft::for_date(String::new(), args.date), args.date)?
    } else {
        let mut draft = EventDraft::for_date(args.title.unwrap_or_default(), args.date);
        if let Some(start) = &args.start {
            draft.start = resolve_timestamp(start, args.date);
        }
        if let Some(end) = &args.end {
            draft.end = resolve_timestamp(end, args.date);
        }
        draft.repeat = args.repeat;
        draft.level = Level::new(args.level)?;
        draft.desc = args.desc;
        draft
    };

    let title = draft.title.trim().to_string();
    let id = planner.add(draft).await?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {title} (#{id})").green());

    Ok(())
}

/// `HH:MM` is taken as a time on `date`; anything else is passed through as a full timestamp.
pub fn resolve_timestamp(input: &str, date: CalendarDate) -> String {
    let input = input.trim();
    match NaiveTime::parse_from_str(input, "%H:%M") {
        Ok(time) => date.to_naive().and_time(time).format("%Y-%m-%dT%H:%M").to_string(),
        Err(_) => input.to_string(),
    }
}

/// Walk through every field of a new event on `date`, offering the draft's slot as the default.
pub fn prompt_draft(mut draft: EventDraft, date: CalendarDate) -> Result<EventDraft> {
    // --- Title ---
    draft.title = loop {
        let title: String = Input::new().with_prompt("  Title").interact_text()?;
        if !title.trim().is_empty() {
            break title;
        }
        eprintln!("  {}", "Title can't be empty".red());
    };

    // --- Start / End ---
    draft.start = prompt_timestamp("  Starts", &draft.start, date)?;
    draft.end = prompt_timestamp("  Ends", &draft.end, date)?;

    // --- Repeat ---
    let repeats = [Repeat::None, Repeat::Daily, Repeat::Weekly, Repeat::Yearly];
    let labels: Vec<&str> = repeats.iter().map(|r| r.as_str()).collect();
    let chosen = Select::new()
        .with_prompt("  Repeat")
        .items(&labels)
        .default(0)
        .interact()?;
    draft.repeat = repeats[chosen].clone();

    // --- Priority ---
    let levels = Level::ALL;
    let labels: Vec<&str> = levels.iter().map(|l| l.label()).collect();
    let default = levels
        .iter()
        .position(|l| *l == Level::NORMAL)
        .unwrap_or_default();
    let chosen = Select::new()
        .with_prompt("  Priority")
        .items(&labels)
        .default(default)
        .interact()?;
    draft.level = levels[chosen];

    // --- Description ---
    let desc: String = Input::new()
        .with_prompt("  Notes (skip)")
        .default(String::new())
        .show_default(false)
        .interact_text()?;
    draft.desc = if desc.trim().is_empty() { None } else { Some(desc) };

    Ok(draft)
}

/// Prompt with retry on parse errors. Empty input keeps `default`.
fn prompt_timestamp(prompt: &str, default: &str, date: CalendarDate) -> Result<String> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("{prompt} ({})", default.replace('T', " ")))
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.trim().is_empty() {
            return Ok(default.to_string());
        }

        let timestamp = resolve_timestamp(&input, date);
        match parse_timestamp(&timestamp) {
            Ok(_) => return Ok(timestamp),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}
