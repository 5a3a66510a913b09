//! Field flags shared by `add` and `edit`.
//!
//! Every flag is optional so `edit` can change a single field. Passing an
//! empty string to an optional text or date field clears it.

use anyhow::{Result, bail};
use chrono_tz::Tz;
use clap::{Args, ValueEnum};
use plandash_core::assignment::{AssignmentStatus, Priority};
use plandash_core::goal::GoalStatus;
use plandash_core::normalize::{AssignmentInput, GoalInput, ReminderInput, ScheduleInput};

use crate::utils::time::{parse_date, parse_optional_instant, parse_time};

#[derive(Args, Debug, Default)]
pub struct AssignmentArgs {
    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub course: Option<String>,

    /// Due date (e.g. "2025-03-20T23:59" or "2025-03-20")
    #[arg(short, long)]
    pub due: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub status: Option<StatusArg>,

    #[arg(short, long)]
    pub priority: Option<PriorityArg>,

    #[arg(short, long)]
    pub link: Option<String>,
}

impl AssignmentArgs {
    pub fn apply(self, mut input: AssignmentInput, tz: &Tz) -> Result<AssignmentInput> {
        if let Some(title) = self.title {
            input.title = title;
        }
        if let Some(course) = self.course {
            input.course = Some(course);
        }
        if let Some(due) = self.due {
            input.due_date = parse_optional_instant(&due, tz)?;
        }
        if let Some(description) = self.description {
            input.description = Some(description);
        }
        if let Some(status) = self.status {
            input.status = status.into();
        }
        if let Some(priority) = self.priority {
            input.priority = priority.into();
        }
        if let Some(link) = self.link {
            input.link = Some(link);
        }
        require_title(&input.title)?;
        Ok(input)
    }
}

#[derive(Args, Debug, Default)]
pub struct GoalArgs {
    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Target date (e.g. "2025-06-01")
    #[arg(short, long)]
    pub deadline: Option<String>,

    #[arg(short, long)]
    pub status: Option<GoalStatusArg>,

    /// Progress in percent, 0-100
    #[arg(short, long)]
    pub progress: Option<u8>,

    /// Comma-separated tags (e.g. "health, running")
    #[arg(long)]
    pub tags: Option<String>,
}

impl GoalArgs {
    pub fn apply(self, mut input: GoalInput, tz: &Tz) -> Result<GoalInput> {
        if let Some(title) = self.title {
            input.title = title;
        }
        if let Some(description) = self.description {
            input.description = Some(description);
        }
        if let Some(deadline) = self.deadline {
            input.deadline = parse_optional_instant(&deadline, tz)?;
        }
        if let Some(status) = self.status {
            input.status = status.into();
        }
        if let Some(progress) = self.progress {
            input.progress = progress;
        }
        if let Some(tags) = self.tags {
            input.tags = Some(tags);
        }
        require_title(&input.title)?;
        Ok(input)
    }
}

#[derive(Args, Debug, Default)]
pub struct ReminderArgs {
    #[arg(short, long)]
    pub title: Option<String>,

    /// When it's due (e.g. "2025-03-20T09:00")
    #[arg(short, long)]
    pub due: Option<String>,

    /// Id of the assignment this reminder is about
    #[arg(short, long)]
    pub related: Option<String>,

    #[arg(short, long)]
    pub notes: Option<String>,
}

impl ReminderArgs {
    pub fn apply(self, mut input: ReminderInput, tz: &Tz) -> Result<ReminderInput> {
        if let Some(title) = self.title {
            input.title = title;
        }
        if let Some(due) = self.due {
            input.due_date = parse_optional_instant(&due, tz)?;
        }
        if let Some(related) = self.related {
            input.related_id = Some(related);
        }
        if let Some(notes) = self.notes {
            input.notes = Some(notes);
        }
        require_title(&input.title)?;
        Ok(input)
    }
}

#[derive(Args, Debug, Default)]
pub struct ScheduleArgs {
    #[arg(short, long)]
    pub title: Option<String>,

    /// Day of the block (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Start time (HH:MM)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time (HH:MM); without it the block ends when it starts
    #[arg(short, long)]
    pub end: Option<String>,

    #[arg(short, long)]
    pub location: Option<String>,

    #[arg(short, long)]
    pub notes: Option<String>,
}

impl ScheduleArgs {
    /// A new block needs at least a title, a date and a start time.
    pub fn into_input(self) -> Result<ScheduleInput> {
        let (Some(date), Some(start)) = (self.date.as_deref(), self.start.as_deref()) else {
            bail!("A schedule block needs --date and --start");
        };

        let input = ScheduleInput {
            title: String::new(),
            date: parse_date(date)?,
            start_time: parse_time(start)?,
            end_time: None,
            location: None,
            notes: None,
        };

        self.apply(input)
    }

    pub fn apply(self, mut input: ScheduleInput) -> Result<ScheduleInput> {
        if let Some(title) = self.title {
            input.title = title;
        }
        if let Some(date) = self.date {
            input.date = parse_date(&date)?;
        }
        if let Some(start) = self.start {
            input.start_time = parse_time(&start)?;
        }
        if let Some(end) = self.end {
            input.end_time = if end.trim().is_empty() {
                None
            } else {
                Some(parse_time(&end)?)
            };
        }
        if let Some(location) = self.location {
            input.location = Some(location);
        }
        if let Some(notes) = self.notes {
            input.notes = Some(notes);
        }
        require_title(&input.title)?;
        Ok(input)
    }
}

fn require_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        bail!("A title is required (--title)");
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StatusArg {
    Planned,
    Started,
    Submitted,
    Graded,
}

impl From<StatusArg> for AssignmentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Planned => AssignmentStatus::Planned,
            StatusArg::Started => AssignmentStatus::Started,
            StatusArg::Submitted => AssignmentStatus::Submitted,
            StatusArg::Graded => AssignmentStatus::Graded,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum GoalStatusArg {
    NotStarted,
    InProgress,
    Complete,
}

impl From<GoalStatusArg> for GoalStatus {
    fn from(arg: GoalStatusArg) -> Self {
        match arg {
            GoalStatusArg::NotStarted => GoalStatus::NotStarted,
            GoalStatusArg::InProgress => GoalStatus::InProgress,
            GoalStatusArg::Complete => GoalStatus::Complete,
        }
    }
}
