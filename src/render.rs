//! Terminal rendering for plandash records.
//!
//! Extension traits that add colored output to plandash-core types using
//! owo_colors. Times are shown in the configured zone.

use chrono_tz::Tz;
use owo_colors::OwoColorize;
use plandash_core::assignment::{Assignment, AssignmentStatus, Priority};
use plandash_core::goal::{Goal, GoalStatus};
use plandash_core::reminder::Reminder;
use plandash_core::schedule_item::ScheduleItem;
use plandash_core::summary::OverviewSummary;

use crate::utils::time::{format_instant, format_time};

/// Characters of an id shown in listings.
const SHORT_ID_LEN: usize = 8;

const PROGRESS_BAR_WIDTH: usize = 10;

pub trait Render {
    fn render(&self, tz: &Tz) -> String;
}

pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

impl Render for AssignmentStatus {
    fn render(&self, _tz: &Tz) -> String {
        let label = format!("{:<9}", self.as_str());
        match self {
            AssignmentStatus::Planned => label.blue().to_string(),
            AssignmentStatus::Started => label.yellow().to_string(),
            AssignmentStatus::Submitted => label.cyan().to_string(),
            AssignmentStatus::Graded => label.green().to_string(),
        }
    }
}

impl Render for Priority {
    fn render(&self, _tz: &Tz) -> String {
        match self {
            Priority::High => "!!".red().to_string(),
            Priority::Medium => "! ".yellow().to_string(),
            Priority::Low => "  ".to_string(),
        }
    }
}

impl Render for Assignment {
    fn render(&self, tz: &Tz) -> String {
        let due = match &self.due_date {
            Some(due) => format!("due {}", format_instant(due, tz)),
            None => "no due date".to_string(),
        };

        let mut line = format!(
            "{} {} {} {} {}",
            short_id(&self.id).dimmed(),
            self.priority.render(tz),
            self.status.render(tz),
            self,
            due.dimmed()
        );

        if let Some(link) = &self.link {
            line.push_str(&format!("\n      {}", link.dimmed()));
        }

        line
    }
}

fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) * PROGRESS_BAR_WIDTH / 100;
    format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

impl Render for Goal {
    fn render(&self, tz: &Tz) -> String {
        let bar = format!("[{}] {:>3}%", progress_bar(self.progress), self.progress);
        let title = match self.status {
            GoalStatus::Complete => self.title.green().to_string(),
            GoalStatus::InProgress => self.title.clone(),
            GoalStatus::NotStarted => self.title.dimmed().to_string(),
        };

        let mut line = format!("{} {} {}", short_id(&self.id).dimmed(), bar, title);

        if let Some(deadline) = &self.deadline {
            line.push_str(&format!(" {}", format!("by {}", format_instant(deadline, tz)).dimmed()));
        }
        if !self.tags.is_empty() {
            line.push_str(&format!(" {}", self.tags.join(", ").cyan()));
        }

        line
    }
}

impl Render for Reminder {
    fn render(&self, tz: &Tz) -> String {
        let check = if self.completed { "[x]".green().to_string() } else { "[ ]".to_string() };
        let title = if self.completed {
            self.title.dimmed().to_string()
        } else {
            self.title.clone()
        };

        let mut line = format!("{} {} {}", short_id(&self.id).dimmed(), check, title);

        if let Some(due) = &self.due_date {
            line.push_str(&format!(" {}", format_instant(due, tz).dimmed()));
        }

        line
    }
}

impl Render for ScheduleItem {
    fn render(&self, tz: &Tz) -> String {
        let when = if self.end > self.start {
            format!(
                "{} - {}",
                format_instant(&self.start, tz),
                format_time(&self.end, tz)
            )
        } else {
            format_instant(&self.start, tz)
        };

        let mut line = format!(
            "{} {} {}",
            short_id(&self.id).dimmed(),
            when.yellow(),
            self.title
        );

        if let Some(location) = &self.location {
            line.push_str(&format!(" {}", format!("@ {location}").dimmed()));
        }

        line
    }
}

impl Render for OverviewSummary {
    fn render(&self, _tz: &Tz) -> String {
        [
            ("Focus blocks", self.focus_blocks),
            ("Deadlines today", self.deadlines),
            ("Goals on track", self.goals_on_track),
            ("Reminders today", self.reminders_due),
        ]
        .iter()
        .map(|(label, count)| format!("  {:<16} {}", label, count.bold()))
        .collect::<Vec<_>>()
        .join("\n")
    }
}
