mod commands;
mod fetch;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use plandash_core::config::PlanDashConfig;
use plandash_core::store::DashboardStore;

use crate::commands::args::{AssignmentArgs, GoalArgs, ReminderArgs, ScheduleArgs};

#[derive(Parser)]
#[command(name = "plandash")]
#[command(about = "Plan your day: schedule blocks, goals, assignments and reminders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import assignments from a calendar feed (.ics)
    Import {
        /// Read the feed from a local file
        #[arg(long, conflicts_with = "url")]
        file: Option<PathBuf>,

        /// Download the feed from a URL (defaults to `feed_url` in the config)
        #[arg(long)]
        url: Option<String>,
    },
    /// Add a record
    Add {
        #[command(subcommand)]
        record: AddCommand,
    },
    /// Edit an existing record. Only the given fields change.
    Edit {
        #[command(subcommand)]
        record: EditCommand,
    },
    /// List records
    List {
        /// Only list this kind of record
        kind: Option<ListKind>,

        /// Only show schedule blocks on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Move an assignment to its next status
    Advance { id: String },
    /// Flip completion of a goal or reminder
    Toggle { kind: ToggleKind, id: String },
    /// Delete a record
    Delete { kind: RecordKind, id: String },
    /// Show today's overview
    Summary,
    /// Show where plandash keeps its files and the settings in effect
    Config,
    /// Clear the whole dashboard
    Reset {
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum AddCommand {
    Assignment(AssignmentArgs),
    Goal(GoalArgs),
    Reminder(ReminderArgs),
    Schedule(ScheduleArgs),
}

#[derive(Subcommand)]
pub enum EditCommand {
    Assignment {
        id: String,
        #[command(flatten)]
        args: AssignmentArgs,
    },
    Goal {
        id: String,
        #[command(flatten)]
        args: GoalArgs,
    },
    Reminder {
        id: String,
        #[command(flatten)]
        args: ReminderArgs,
    },
    Schedule {
        id: String,
        #[command(flatten)]
        args: ScheduleArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ListKind {
    Assignments,
    Goals,
    Reminders,
    Schedule,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ToggleKind {
    Goal,
    Reminder,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RecordKind {
    Assignment,
    Goal,
    Reminder,
    Schedule,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = PlanDashConfig::load()?;
    let tz = config.timezone()?;
    let mut store = DashboardStore::load(config.slot());

    match cli.command {
        Commands::Import { file, url } => {
            commands::import::run(&mut store, &config, file, url).await
        }
        Commands::Add { record } => commands::add::run(&mut store, record, &tz),
        Commands::Edit { record } => commands::edit::run(&mut store, record, &tz),
        Commands::List { kind, date } => commands::list::run(store.state(), kind, date, &tz),
        Commands::Advance { id } => commands::advance::run(&mut store, &id),
        Commands::Toggle { kind, id } => commands::toggle::run(&mut store, kind, &id),
        Commands::Delete { kind, id } => commands::delete::run(&mut store, kind, &id),
        Commands::Summary => commands::summary::run(store.state(), &tz),
        Commands::Config => commands::config::run(&config),
        Commands::Reset { yes } => commands::reset::run(&mut store, yes),
    }
}
