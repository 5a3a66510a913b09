use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::info;
use owo_colors::OwoColorize;
use plandash_core::actions;
use plandash_core::config::PlanDashConfig;
use plandash_core::feed::parse_feed_bytes;

use crate::commands::Store;
use crate::fetch::fetch_feed;
use crate::utils::tui::create_spinner;

pub async fn run(
    store: &mut Store,
    config: &PlanDashConfig,
    file: Option<PathBuf>,
    url: Option<String>,
) -> Result<()> {
    let bytes = match (file, url.or_else(|| config.feed_url.clone())) {
        (Some(path), _) => std::fs::read(&path)
            .with_context(|| format!("Could not read {}", path.display()))?,
        (None, Some(url)) => {
            let spinner = create_spinner("Fetching feed...".to_string());
            let result = fetch_feed(&url, Duration::from_secs(config.fetch_timeout_secs)).await;
            spinner.finish_and_clear();
            result?
        }
        (None, None) => bail!(
            "Nothing to import.\n\n\
            Import a calendar export with:\n  \
            plandash import --file <path.ics>\n\n\
            or a feed URL with:\n  \
            plandash import --url <url>\n\n\
            You can also set feed_url in {}",
            PlanDashConfig::config_path()?.display()
        ),
    };

    let events = parse_feed_bytes(&bytes)?;
    let found = events.len();
    info!("Parsed {found} events from feed");

    let before = store.state().assignments.len();
    let state = store.mutate(|state| actions::import_events(state, events));
    let added = state.assignments.len() - before;

    if added == 0 {
        println!(
            "{}",
            format!("  No new assignments ({found} already imported)").dimmed()
        );
    } else {
        println!(
            "{}",
            format!("  Imported {added} {}", pluralize("assignment", added)).green()
        );
        if found > added {
            println!(
                "{}",
                format!("  Skipped {} already on the board", found - added).dimmed()
            );
        }
    }

    Ok(())
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
