//! Calendar feed parsing.
//!
//! Converts the subset of iCalendar used by the armory calendar feed into a
//! [`ParseResult`]:
//!
//! ```text
//! text ──▶ envelope_body() ──▶ read_meta() ──▶ read_events() ──▶ ParseResult
//!                                  │                 │
//!                                  ▼ TZID            ├─▶ normalize_timestamp()
//!                           resolve_timezone() ──────┘   decode_attendee()
//! ```
//!
//! Folded lines, escaped text, recurrence rules and per-property `TZID`
//! parameters are not interpreted.
//!
//! # Example
//!
//! ```
//! use wowtools_core::ical::parse_calendar;
//!
//! let feed = "BEGIN:VCALENDAR\nTZID:Europe/Amsterdam\nBEGIN:VEVENT\n\
//!             SUMMARY:Raid\nEND:VEVENT\nEND:VCALENDAR";
//! let result = parse_calendar(feed).unwrap();
//! assert_eq!(result.events[0].summary(), Some("Raid"));
//! ```

mod attendee;
mod date;
mod error;
mod lines;

use chrono_tz::Tz;
use tracing::{debug, trace};

use crate::calendar::{Attendee, CalendarEvent, CalendarMeta, DATE_KEYS, ParseResult};

pub use attendee::{MAX_KEY_SEGMENTS, decode_attendee, is_attendee_key};
pub use date::{normalize_timestamp, resolve_timezone};
pub use error::{IcalError, IcalResult};
pub use lines::envelope_body;

use lines::split_property;

const BEGIN_EVENT: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";

/// Parses a calendar feed into its meta mapping and events.
///
/// # Errors
///
/// - [`IcalError::MalformedEnvelope`] if the text is not wrapped in
///   `BEGIN:VCALENDAR` / `END:VCALENDAR`
/// - [`IcalError::MissingTimezone`] if no `TZID` precedes the first event
/// - [`IcalError::UnknownTimezone`] if `TZID` is not an IANA zone name
/// - [`IcalError::MalformedDate`] if a `DTSTART`, `DTEND` or `DTSTAMP`
///   value has no `YYYYMMDDTHHMMSSZ` timestamp
pub fn parse_calendar(text: &str) -> IcalResult<ParseResult> {
    let body = envelope_body(text)?;
    let (meta, rest) = read_meta(&body);

    let tzid = meta.tzid().ok_or(IcalError::MissingTimezone)?;
    let tz = resolve_timezone(tzid)?;

    let events = read_events(rest, tz)?;
    debug!(tzid = %tzid, events = events.len(), "Parsed calendar feed");

    Ok(ParseResult { meta, events })
}

fn is_marker(line: &str, marker: &str) -> bool {
    line.eq_ignore_ascii_case(marker)
}

/// Reads `KEY:VALUE` lines up to the first `BEGIN:VEVENT`.
///
/// Returns the meta mapping and the lines from the first event onwards.
pub fn read_meta<'a, 'b>(lines: &'b [&'a str]) -> (CalendarMeta, &'b [&'a str]) {
    let split_at = lines
        .iter()
        .position(|line| is_marker(line, BEGIN_EVENT))
        .unwrap_or(lines.len());
    let (head, rest) = lines.split_at(split_at);

    let mut meta = CalendarMeta::new();
    for line in head {
        match split_property(line) {
            Some((key, value)) => meta.insert(key.to_uppercase(), value),
            None => trace!(line = %line, "Ignoring meta line without separator"),
        }
    }

    (meta, rest)
}

/// Reads `VEVENT` blocks from `lines`.
///
/// Lines outside a block are ignored, and a block still open when the lines
/// run out is dropped.
pub fn read_events(lines: &[&str], tz: Tz) -> IcalResult<Vec<CalendarEvent>> {
    let mut events = Vec::new();
    let mut current: Option<(CalendarEvent, Vec<Attendee>)> = None;

    for line in lines {
        if is_marker(line, BEGIN_EVENT) {
            if current.is_some() {
                trace!("Nested BEGIN:VEVENT, restarting event");
            }
            current = Some((CalendarEvent::new(), Vec::new()));
            continue;
        }

        if is_marker(line, END_EVENT) {
            match current.take() {
                Some((mut event, attendees)) => {
                    event.set_attendees(attendees);
                    trace!(summary = ?event.summary(), start = ?event.start(), "Parsed event");
                    events.push(event);
                }
                None => trace!("END:VEVENT without matching BEGIN:VEVENT"),
            }
            continue;
        }

        let Some((event, attendees)) = current.as_mut() else {
            trace!(line = %line, "Ignoring line outside event");
            continue;
        };
        let Some((key, value)) = split_property(line) else {
            continue;
        };

        if DATE_KEYS.contains(&key) {
            event.insert(key, normalize_timestamp(key, value, tz)?);
        } else if is_attendee_key(key) {
            attendees.push(decode_attendee(key, value));
        } else {
            event.insert(key.to_uppercase(), value);
        }
    }

    if current.is_some() {
        debug!("Calendar ended inside an event, dropping it");
    }

    Ok(events)
}
