mod client;
mod commands;
mod render;

use anyhow::Result;
use calplus_core::EventId;
use calplus_core::config::PlannerConfig;
use calplus_core::month::MonthView;
use calplus_core::planner::Planner;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::client::HttpStorage;
use crate::commands::add::AddArgs;

#[derive(Parser)]
#[command(name = "calplus")]
#[command(about = "Browse your calendar and manage prioritized events")]
struct Cli {
    /// calplus-server URL (defaults to `server_url` from the config file)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the events of one day
    Day {
        /// YYYY-MM-DD, "today", "tomorrow" or "yesterday" (default: today)
        date: Option<String>,

        /// Only list pending events of this priority (0-3)
        #[arg(short, long)]
        level: Option<u8>,
    },
    /// Show a month grid with colored markers
    Month {
        /// YYYY-MM (default: this month)
        month: Option<String>,

        /// Day to highlight and show below the grid
        #[arg(long)]
        select: Option<String>,
    },
    /// Create an event
    Add {
        /// Prompted for when omitted
        title: Option<String>,

        /// Day of the event (default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Start as HH:MM on --date, or a full YYYY-MM-DDTHH:MM
        #[arg(short, long)]
        start: Option<String>,

        /// End as HH:MM on --date, or a full YYYY-MM-DDTHH:MM
        #[arg(short, long)]
        end: Option<String>,

        /// none, daily, weekly or yearly
        #[arg(short, long, default_value = "none")]
        repeat: String,

        /// 0 Remark, 1 Normal, 2 Priority, 3 Emergency
        #[arg(short, long, default_value_t = 1)]
        level: u8,

        #[arg(long)]
        desc: Option<String>,
    },
    /// Mark an event completed, or reopen it
    Done { id: u64 },
    /// Delete an event
    Rm {
        id: u64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Navigate months and days interactively
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PlannerConfig::load()?;
    let server_url = cli.server.unwrap_or(config.server_url);
    let mut planner = Planner::load(HttpStorage::new(&server_url)).await?;

    match cli.command {
        Commands::Day { date, level } => {
            let date = commands::parse_date_or_today(date.as_deref())?;
            let filter = commands::level_filter(level)?;
            commands::day::run(&mut planner, date, filter)
        }
        Commands::Month { month, select } => {
            let month = match month {
                Some(m) => m.parse()?,
                None => MonthView::current(),
            };
            let select = select.as_deref().map(commands::parse_date).transpose()?;
            commands::month::run(&mut planner, month, select)
        }
        Commands::Add {
            title,
            date,
            start,
            end,
            repeat,
            level,
            desc,
        } => {
            let args = AddArgs {
                title,
                date: commands::parse_date_or_today(date.as_deref())?,
                start,
                end,
                repeat: repeat.parse()?,
                level,
                desc,
            };
            commands::add::run(&mut planner, args).await
        }
        Commands::Done { id } => commands::done::run(&mut planner, EventId(id)).await,
        Commands::Rm { id, force } => commands::remove::run(&mut planner, EventId(id), force).await,
        Commands::Browse => commands::browse::run(&mut planner).await,
    }
}
