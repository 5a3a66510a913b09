//! Downloading calendar feeds.

use std::time::Duration;

use log::info;
use plandash_core::{PlanDashError, PlanDashResult};

const FILE_HINT: &str = "Download the .ics file and import it with `plandash import --file` instead";

/// Fetch the raw feed at `url`, giving up after `timeout`.
pub async fn fetch_feed(url: &str, timeout: Duration) -> PlanDashResult<Vec<u8>> {
    let url = http_url(url);
    info!("Fetching feed from {url}");

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(fetch_error)?;

    let response = client.get(&url).send().await.map_err(fetch_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(PlanDashError::FeedFetch(format!(
            "server answered {status}. {FILE_HINT}"
        )));
    }

    let body = response.bytes().await.map_err(fetch_error)?;
    info!("Fetched {} bytes", body.len());

    Ok(body.to_vec())
}

fn fetch_error(e: reqwest::Error) -> PlanDashError {
    let reason = if e.is_timeout() {
        "the request timed out".to_string()
    } else {
        e.to_string()
    };
    PlanDashError::FeedFetch(format!("{reason}. {FILE_HINT}"))
}

/// Subscription links are often handed out as `webcal://`; fetch them over HTTPS.
fn http_url(url: &str) -> String {
    let url = url.trim();
    match url.strip_prefix("webcal://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}
