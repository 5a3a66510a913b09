use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use plandash_core::DashboardState;
use plandash_core::schedule_item::ScheduleItem;

use crate::ListKind;
use crate::render::{Render, short_id};
use crate::utils::time::parse_date;

pub fn run(
    state: &DashboardState,
    kind: Option<ListKind>,
    date: Option<String>,
    tz: &Tz,
) -> Result<()> {
    let day = date.as_deref().map(parse_date).transpose()?;

    let sections = match kind {
        Some(kind) => vec![kind],
        None => vec![
            ListKind::Schedule,
            ListKind::Goals,
            ListKind::Assignments,
            ListKind::Reminders,
        ],
    };

    for (i, section) in sections.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        let lines = render_section(state, section, day, tz);
        println!("{}", heading(section, day, lines.len()));
        if lines.is_empty() {
            println!("   {}", "Nothing here yet".dimmed());
        }
        for line in lines {
            println!("   {line}");
        }
    }

    Ok(())
}

fn heading(kind: ListKind, day: Option<NaiveDate>, count: usize) -> String {
    let title = match (kind, day) {
        (ListKind::Assignments, _) => "Assignments".to_string(),
        (ListKind::Goals, _) => "Goals".to_string(),
        (ListKind::Reminders, _) => "Reminders".to_string(),
        (ListKind::Schedule, None) => "Schedule".to_string(),
        (ListKind::Schedule, Some(day)) => format!("Schedule for {}", day.format("%a %b %-d")),
    };
    format!("{} {}", title.bold(), format!("({count})").dimmed())
}

fn render_section(
    state: &DashboardState,
    kind: ListKind,
    day: Option<NaiveDate>,
    tz: &Tz,
) -> Vec<String> {
    match kind {
        ListKind::Assignments => by_due_date(&state.assignments, |a| a.due_date)
            .into_iter()
            .map(|a| a.render(tz))
            .collect(),
        ListKind::Goals => state.goals.iter().map(|g| g.render(tz)).collect(),
        ListKind::Reminders => by_due_date(&state.reminders, |r| r.due_date)
            .into_iter()
            .map(|reminder| {
                let line = reminder.render(tz);
                match (&reminder.related_id, reminder.related_assignment(state)) {
                    (_, Some(assignment)) => {
                        format!("{line} {}", format!("re: {}", assignment.title).cyan())
                    }
                    (Some(dangling), None) => format!(
                        "{line} {}",
                        format!("re: {} (deleted)", short_id(dangling)).dimmed()
                    ),
                    (None, None) => line,
                }
            })
            .collect(),
        ListKind::Schedule => schedule_on(&state.schedule, day, tz)
            .into_iter()
            .map(|item| item.render(tz))
            .collect(),
    }
}

/// Soonest first; records without a due date go last in their stored order.
fn by_due_date<T, F>(records: &[T], due: F) -> Vec<&T>
where
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    let mut sorted: Vec<&T> = records.iter().collect();
    sorted.sort_by_key(|record| {
        let when = due(*record);
        (when.is_none(), when)
    });
    sorted
}

/// Blocks starting on `day` in `tz` (all blocks without a day), by start time.
fn schedule_on<'a>(items: &'a [ScheduleItem], day: Option<NaiveDate>, tz: &Tz) -> Vec<&'a ScheduleItem> {
    let mut selected: Vec<&ScheduleItem> = items
        .iter()
        .filter(|item| day.is_none_or(|day| item.start.with_timezone(tz).date_naive() == day))
        .collect();
    selected.sort_by_key(|item| item.start);
    selected
}
