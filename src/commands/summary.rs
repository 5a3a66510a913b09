use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use plandash_core::DashboardState;
use plandash_core::summary::{OverviewSummary, day_bounds};

use crate::render::Render;

pub fn run(state: &DashboardState, tz: &Tz) -> Result<()> {
    let now = Utc::now();
    let summary = OverviewSummary::for_day(state, now, tz);

    println!(
        "{}",
        now.with_timezone(tz).format("%A, %B %-d").to_string().bold()
    );
    println!("{}", summary.render(tz));

    let (from, to) = day_bounds(now, tz);
    let mut today: Vec<_> = state
        .schedule
        .iter()
        .filter(|item| item.start >= from && item.start <= to)
        .collect();
    today.sort_by_key(|item| item.start);

    if !today.is_empty() {
        println!();
        println!("{}", "Today".bold());
        for item in today {
            println!("  {}", item.render(tz));
        }
    }

    Ok(())
}
