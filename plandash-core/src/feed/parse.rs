//! Feed parsing using the icalendar crate's parser.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone, Utc};
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, Property, read_calendar},
};
use log::debug;
use regex::Regex;

use crate::calendar_event::CalendarEvent;
use crate::error::{PlanDashError, PlanDashResult};

/// Course codes at the start of a title: `ENG101`, `CS 2110`, `MATH-221A`
static COURSE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,5}[ -]?\d{3,4}[A-Z]?\b").expect("valid regex"));

static HTTP_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"]+"#).expect("valid regex"));

/// Date properties that can carry the due date, in order of preference.
const DUE_PROPERTIES: [&str; 3] = ["DTEND", "DTSTART", "DUE"];

/// Parse raw feed bytes (e.g. an uploaded file).
pub fn parse_feed_bytes(bytes: &[u8]) -> PlanDashResult<Vec<CalendarEvent>> {
    let content = std::str::from_utf8(bytes)
        .map_err(|e| PlanDashError::FeedParse(format!("feed is not valid UTF-8 text: {e}")))?;
    parse_feed(content)
}

/// Parse feed text into calendar events.
///
/// Only fails when the text is not calendar content at all or contains no
/// event blocks. Events without a title are skipped; every other missing
/// field just stays `None`.
pub fn parse_feed(content: &str) -> PlanDashResult<Vec<CalendarEvent>> {
    let cleaned = clean_lines(&unfold_lines(content));
    if cleaned.is_empty() {
        return Err(PlanDashError::FeedParse("no calendar blocks found".into()));
    }

    let calendar = read_calendar(&cleaned).map_err(|e| PlanDashError::FeedParse(e.to_string()))?;

    let mut vevents = Vec::new();
    collect_vevents(&calendar.components, &mut vevents);

    if vevents.is_empty() {
        return Err(PlanDashError::FeedParse("no event blocks found".into()));
    }

    let events: Vec<CalendarEvent> = vevents.into_iter().filter_map(event_from_vevent).collect();
    debug!("Parsed {} events from feed", events.len());

    Ok(events)
}

/// Join continuation lines and normalize line endings to `\n`.
///
/// A line starting with a single space or tab continues the previous line;
/// exactly that one whitespace character is dropped.
fn unfold_lines(content: &str) -> String {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

    let mut result = String::with_capacity(normalized.len() + 1);
    for line in normalized.split('\n') {
        if let Some(rest) = line.strip_prefix([' ', '\t']) {
            result.push_str(rest);
            continue;
        }
        if line.is_empty() {
            continue;
        }
        if !result.is_empty() {
            result.push('\n');
        }
        result.push_str(line);
    }
    result.push('\n');

    result
}

/// Keep only lines icalendar can read.
///
/// Lines outside the outermost BEGIN/END block and lines that aren't
/// `NAME[;PARAMS]:VALUE` are dropped. Property and component names are
/// uppercased so they are matched (and TEXT-decoded) regardless of case.
/// CATEGORIES is cut to its first entry while its escapes are still visible.
fn clean_lines(unfolded: &str) -> String {
    let mut depth = 0usize;
    let mut result = String::with_capacity(unfolded.len());

    for line in unfolded.lines() {
        let Some(sep) = value_separator(line) else {
            debug!("Dropping feed line without a value: {line:?}");
            continue;
        };
        let (head, value) = (&line[..sep], &line[sep + 1..]);
        let name_end = head.find(';').unwrap_or(head.len());
        let (name, params) = head.split_at(name_end);

        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            debug!("Dropping malformed feed line: {line:?}");
            continue;
        }

        let name = name.to_ascii_uppercase();
        let cleaned = match name.as_str() {
            "BEGIN" => {
                depth += 1;
                format!("BEGIN:{}", value.trim().to_ascii_uppercase())
            }
            "END" if depth > 0 => {
                depth -= 1;
                format!("END:{}", value.trim().to_ascii_uppercase())
            }
            _ if depth == 0 => {
                debug!("Dropping feed line outside any block: {line:?}");
                continue;
            }
            "CATEGORIES" => format!("{name}{params}:{}", first_list_entry(value)),
            _ => format!("{name}{params}:{value}"),
        };

        result.push_str(&cleaned);
        result.push('\n');
    }

    result
}

/// Position of the `:` between a property's name/params and its value.
/// Colons inside quoted parameter values don't count.
fn value_separator(line: &str) -> Option<usize> {
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ':' if !quoted => return Some(i),
            _ => {}
        }
    }
    None
}

/// The raw value up to the first comma that isn't escaped.
fn first_list_entry(value: &str) -> &str {
    let mut chars = value.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            ',' => return &value[..i],
            _ => {}
        }
    }
    value
}

/// Find VEVENT blocks, whether or not they are wrapped in a VCALENDAR.
fn collect_vevents<'a, 'c>(components: &'c [Component<'a>], out: &mut Vec<&'c Component<'a>>) {
    for component in components {
        if component.name == "VEVENT" {
            out.push(component);
        } else {
            collect_vevents(&component.components, out);
        }
    }
}

fn event_from_vevent(vevent: &Component) -> Option<CalendarEvent> {
    let summary = vevent.find_prop("SUMMARY").map(text_value).unwrap_or_default();
    let (title, bracket_course) = split_bracket_course(&summary);

    if title.is_empty() {
        debug!("Skipping feed event without a title");
        return None;
    }

    let description = vevent.find_prop("DESCRIPTION").map(text_value).filter(|d| !d.is_empty());

    let link = vevent
        .find_prop("URL")
        .map(|p| p.val.as_ref().trim().to_string())
        .filter(|url| !url.is_empty())
        .or_else(|| description.as_deref().and_then(find_link));

    let course = vevent
        .find_prop("CATEGORIES")
        .and_then(|p| first_category(p.val.as_ref()))
        .or(bracket_course)
        .or_else(|| leading_course_code(&title));

    // The first date property present decides; an unparseable value leaves
    // the due date empty instead of falling through to the next one.
    let due_date = DUE_PROPERTIES
        .iter()
        .find_map(|name| vevent.find_prop(name))
        .and_then(to_instant);

    Some(CalendarEvent {
        title,
        course,
        due_date,
        description,
        link,
    })
}

/// SUMMARY, DESCRIPTION and CATEGORIES come back from icalendar already
/// TEXT-decoded.
fn text_value(prop: &Property) -> String {
    prop.val.as_ref().trim().to_string()
}

/// Canvas appends the course name to titles: `Essay Draft [ENG101 Spring]`.
/// Returns the title without the suffix, plus the course if one was found.
fn split_bracket_course(summary: &str) -> (String, Option<String>) {
    let summary = summary.trim();

    if let Some(without_close) = summary.strip_suffix(']') {
        if let Some(open) = without_close.rfind('[') {
            let title = without_close[..open].trim();
            let course = without_close[open + 1..].trim();
            if !title.is_empty() && !course.is_empty() {
                return (title.to_string(), Some(course.to_string()));
            }
        }
    }

    (summary.to_string(), None)
}

fn leading_course_code(title: &str) -> Option<String> {
    COURSE_CODE.find(title).map(|m| m.as_str().to_string())
}

fn first_category(value: &str) -> Option<String> {
    let category = value.trim();
    if category.is_empty() { None } else { Some(category.to_string()) }
}

fn find_link(text: &str) -> Option<String> {
    let found = HTTP_LINK.find(text)?;
    let link = found
        .as_str()
        .trim_end_matches(['.', ',', ';', ':', ')', ']', '}', '\'', '!', '?']);
    Some(link.to_string())
}

/// Convert a DTSTART/DTEND style property to an absolute instant.
///
/// All-day dates resolve to midnight UTC. Floating times and unknown TZIDs
/// are read as UTC.
fn to_instant(prop: &Property) -> Option<DateTime<Utc>> {
    let dpt = match DatePerhapsTime::try_from(prop) {
        Ok(dpt) => dpt,
        Err(_) => {
            debug!("Ignoring unparseable date value '{}'", prop.val.as_ref());
            return None;
        }
    };

    let instant = match dpt {
        DatePerhapsTime::Date(date) => date.and_time(NaiveTime::MIN).and_utc(),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => dt,
            CalendarDateTime::Floating(naive) => naive.and_utc(),
            CalendarDateTime::WithTimezone { date_time, tzid } => resolve_zoned(date_time, &tzid),
        },
    };

    Some(instant)
}

fn resolve_zoned(date_time: NaiveDateTime, tzid: &str) -> DateTime<Utc> {
    let tzid = tzid.trim_matches('"').trim_start_matches('/');

    match tzid.parse::<chrono_tz::Tz>() {
        Ok(tz) => match tz.from_local_datetime(&date_time).earliest() {
            Some(local) => local.with_timezone(&Utc),
            None => date_time.and_utc(),
        },
        Err(_) => {
            debug!("Unknown TZID '{tzid}', reading time as UTC");
            date_time.and_utc()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::generate_feed;
    use chrono::TimeZone;

    #[test]
    fn parses_events_with_and_without_due_date() {
        let ics = r#"BEGIN:VCALENDAR
VERSION:2.0
PRODID:TEST
BEGIN:VEVENT
UID:event-1
SUMMARY:Essay Draft
DTEND:20240301T235900Z
END:VEVENT
BEGIN:VEVENT
UID:event-2
SUMMARY:Reading Response
END:VEVENT
END:VCALENDAR"#;

        let events = parse_feed(ics).expect("Should parse");

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "Essay Draft");
        assert_eq!(
            events[0].due_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 0).unwrap())
        );
        assert_eq!(events[1].title, "Reading Response");
        assert_eq!(events[1].due_date, None);
    }

    #[test]
    fn falls_back_to_dtstart_when_dtend_missing() {
        let ics = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:Quiz\nDTSTART:20240410T130000Z\nEND:VEVENT\nEND:VCALENDAR";

        let events = parse_feed(ics).unwrap();

        assert_eq!(
            events[0].due_date,
            Some(Utc.with_ymd_and_hms(2024, 4, 10, 13, 0, 0).unwrap())
        );
    }

    #[test]
    fn all_day_date_resolves_to_midnight_utc() {
        let ics = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:Project due\nDTSTART;VALUE=DATE:20240315\nEND:VEVENT\nEND:VCALENDAR";

        let events = parse_feed(ics).unwrap();

        assert_eq!(
            events[0].due_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn tzid_times_convert_to_utc() {
        let ics = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:Problem Set 4\nDTEND;TZID=America/New_York:20240301T235900\nEND:VEVENT\nEND:VCALENDAR";

        let events = parse_feed(ics).unwrap();

        // EST is UTC-5 on March 1st
        assert_eq!(
            events[0].due_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 2, 4, 59, 0).unwrap())
        );
    }

    #[test]
    fn crlf_and_folded_lines_are_unfolded() {
        let ics = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Lab \r\n Report\r\n\
DESCRIPTION:Submit the\r\n\t full write-up\r\n\
DTEND:20240301T120000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let events = parse_feed(ics).unwrap();

        assert_eq!(events[0].title, "Lab Report");
        assert_eq!(events[0].description.as_deref(), Some("Submit the full write-up"));
    }

    #[test]
    fn description_escapes_are_undone() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
SUMMARY:Reading
DESCRIPTION:Chapters 1\, 2\; and 3\nBring notes
END:VEVENT
END:VCALENDAR"#;

        let events = parse_feed(ics).unwrap();

        assert_eq!(
            events[0].description.as_deref(),
            Some("Chapters 1, 2; and 3\nBring notes")
        );
    }

    #[test]
    fn link_prefers_url_field() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
DESCRIPTION:See https://example.com/other
URL:https://canvas.example.edu/courses/1/assignments/2
SUMMARY:Essay
END:VEVENT
END:VCALENDAR"#;

        let events = parse_feed(ics).unwrap();

        assert_eq!(
            events[0].link.as_deref(),
            Some("https://canvas.example.edu/courses/1/assignments/2")
        );
    }

    #[test]
    fn link_falls_back_to_first_url_in_description() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
SUMMARY:Essay
DESCRIPTION:Rubric (https://example.com/rubric). Also http://example.com/late
END:VEVENT
END:VCALENDAR"#;

        let events = parse_feed(ics).unwrap();

        assert_eq!(events[0].link.as_deref(), Some("https://example.com/rubric"));
    }

    #[test]
    fn course_from_canvas_bracket_suffix() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
SUMMARY:Essay Draft [ENG101 Spring 2024]
END:VEVENT
END:VCALENDAR"#;

        let events = parse_feed(ics).unwrap();

        assert_eq!(events[0].title, "Essay Draft");
        assert_eq!(events[0].course.as_deref(), Some("ENG101 Spring 2024"));
    }

    #[test]
    fn course_from_categories_wins() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
SUMMARY:CS 2110: Prelim
CATEGORIES:Algorithms,Exams
END:VEVENT
END:VCALENDAR"#;

        let events = parse_feed(ics).unwrap();

        assert_eq!(events[0].course.as_deref(), Some("Algorithms"));
    }

    #[test]
    fn course_from_leading_code() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
SUMMARY:CS 2110: Prelim
END:VEVENT
BEGIN:VEVENT
SUMMARY:Read 100 pages
END:VEVENT
END:VCALENDAR"#;

        let events = parse_feed(ics).unwrap();

        assert_eq!(events[0].title, "CS 2110: Prelim");
        assert_eq!(events[0].course.as_deref(), Some("CS 2110"));
        assert_eq!(events[1].course, None);
    }

    #[test]
    fn events_without_title_are_skipped() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
DTEND:20240301T120000Z
END:VEVENT
BEGIN:VEVENT
SUMMARY:Kept
X-UNKNOWN-FIELD;FOO=bar:whatever
END:VEVENT
END:VCALENDAR"#;

        let events = parse_feed(ics).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Kept");
    }

    #[test]
    fn bare_vevents_without_vcalendar_wrapper() {
        let ics = "BEGIN:VEVENT\nSUMMARY:Standalone\nEND:VEVENT\n";

        let events = parse_feed(ics).unwrap();

        assert_eq!(events.len(), 1);
    }

    #[test]
    fn calendar_without_events_is_an_error() {
        let ics = "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:TEST\nEND:VCALENDAR\n";

        let err = parse_feed(ics).unwrap_err();
        assert!(matches!(err, PlanDashError::FeedParse(_)));
    }

    #[test]
    fn non_calendar_text_is_an_error() {
        assert!(matches!(
            parse_feed("just some notes\nnothing to see"),
            Err(PlanDashError::FeedParse(_))
        ));
        assert!(matches!(parse_feed(""), Err(PlanDashError::FeedParse(_))));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let bytes = [0x42, 0x45, 0xff, 0xfe, 0x00];
        assert!(matches!(
            parse_feed_bytes(&bytes),
            Err(PlanDashError::FeedParse(_))
        ));
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let ics = "\u{feff}BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:With BOM\nEND:VEVENT\nEND:VCALENDAR\n";

        let events = parse_feed_bytes(ics.as_bytes()).unwrap();

        assert_eq!(events[0].title, "With BOM");
    }

    #[test]
    fn generated_feed_parses_back() {
        let events = vec![
            CalendarEvent {
                title: "Essay Draft".to_string(),
                course: Some("English".to_string()),
                due_date: Some(Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 0).unwrap()),
                description: Some("Five pages double spaced".to_string()),
                link: Some("https://example.com/essay".to_string()),
            },
            CalendarEvent {
                title: "Reading Response".to_string(),
                course: None,
                due_date: None,
                description: None,
                link: None,
            },
        ];

        let ics = generate_feed(&events);
        let parsed = parse_feed(&ics).expect("Should reparse generated feed");

        assert_eq!(parsed, events);
    }

    #[test]
    fn backslashes_are_decoded_once() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
SUMMARY:Backslash \\ title
DESCRIPTION:Save to C:\\new\\docs and 50\\50
END:VEVENT
END:VCALENDAR"#;

        let events = parse_feed(ics).unwrap();

        assert_eq!(events[0].title, "Backslash \\ title");
        assert_eq!(
            events[0].description.as_deref(),
            Some("Save to C:\\new\\docs and 50\\50")
        );
    }

    #[test]
    fn escaped_comma_stays_inside_the_category() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
SUMMARY:Office hours
CATEGORIES:Smith\, J.,Other
END:VEVENT
END:VCALENDAR"#;

        let events = parse_feed(ics).unwrap();

        assert_eq!(events[0].course.as_deref(), Some("Smith, J."));
    }

    #[test]
    fn special_characters_survive_generate_and_parse() {
        let events = vec![CalendarEvent {
            title: "Backslash \\ title".to_string(),
            course: Some("English, Lit".to_string()),
            due_date: None,
            description: Some("line1\nline2; a, b \\ c".to_string()),
            link: None,
        }];

        let parsed = parse_feed(&generate_feed(&events)).unwrap();

        assert_eq!(parsed, events);
    }

    #[test]
    fn stray_lines_are_ignored() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
SUMMARY:A
this line has no colon
END:VEVENT
not a property: but has a colon
BEGIN:VEVENT
SUMMARY:B
END:VEVENT
END:VCALENDAR
garbage trailing line without colon
more trailing: text"#;

        let events = parse_feed(ics).unwrap();

        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn text_before_the_calendar_is_ignored() {
        let ics = "Exported from Canvas\nBEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:Quiz\nEND:VEVENT\nEND:VCALENDAR\n";

        let events = parse_feed(ics).unwrap();

        assert_eq!(events.len(), 1);
    }

    #[test]
    fn property_names_are_case_insensitive() {
        let ics = "begin:vcalendar\nbegin:vevent\nsummary:lower\ndtend:20240301T120000Z\ncategories:Bio\\, Lab\nend:vevent\nend:vcalendar\n";

        let events = parse_feed(ics).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "lower");
        assert_eq!(events[0].course.as_deref(), Some("Bio, Lab"));
        assert_eq!(
            events[0].due_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn first_list_entry_respects_escapes() {
        assert_eq!(first_list_entry("a,b"), "a");
        assert_eq!(first_list_entry(r"a\,b,c"), r"a\,b");
        assert_eq!(first_list_entry(r"a\\,b"), r"a\\");
        assert_eq!(first_list_entry("single"), "single");
    }
}
