//! Parsing and showing the wall-clock values typed on the command line.

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use plandash_core::normalize::combine_date_time;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => bail!("Invalid date '{}'. Use YYYY-MM-DD", input),
    }
}

pub fn parse_time(input: &str) -> Result<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .map_err(|_| anyhow!("Invalid time '{}'. Use HH:MM", input))
}

/// Parse a deadline-like value in `tz`.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM` / `YYYY-MM-DD HH:MM` (local), or a
/// bare `YYYY-MM-DD`, which means 23:59 local time that day.
pub fn parse_instant(input: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(combine_date_time(naive.date(), naive.time(), tz));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);
        return Ok(combine_date_time(date, end_of_day, tz));
    }

    bail!(
        "Invalid date/time '{}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM",
        input
    )
}

/// Like [`parse_instant`], but an empty value clears the field.
pub fn parse_optional_instant(input: &str, tz: &Tz) -> Result<Option<DateTime<Utc>>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_instant(input, tz).map(Some)
}

pub fn format_instant(instant: &DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).format("%a %b %-d, %H:%M").to_string()
}

pub fn format_time(instant: &DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).format("%H:%M").to_string()
}
