//! Feed generation, the inverse of [`super::parse_feed`] for the fields we keep.

use icalendar::{Calendar, Component};

use crate::calendar_event::CalendarEvent;

/// Generate .ics content with one VEVENT per calendar event.
///
/// Due dates are written as UTC `DTEND` values and the course as the first
/// `CATEGORIES` entry, which is where the parser looks first.
pub fn generate_feed(events: &[CalendarEvent]) -> String {
    let mut cal = Calendar::new();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.summary(&event.title);

        if let Some(due) = event.due_date {
            ics_event.add_property("DTEND", due.format("%Y%m%dT%H%M%SZ").to_string());
        }

        if let Some(ref desc) = event.description {
            ics_event.description(desc);
        }

        if let Some(ref url) = event.link {
            ics_event.add_property("URL", url);
        }

        if let Some(ref course) = event.course {
            ics_event.add_property("CATEGORIES", course);
        }

        cal.push(ics_event.done());
    }

    strip_ics_bloat(&cal.done().to_string())
}

/// Replace the icalendar crate's PRODID with ours and drop the default
/// CALSCALE line.
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:PLANDASH\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
