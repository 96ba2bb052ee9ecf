//! Calendar data model.
//!
//! The feed format is open-ended, so calendar and event records are kept as
//! string maps keyed by upper-cased property name rather than fixed structs.
//! Well-known keys are exposed through accessors:
//!
//! - [`CalendarMeta`]: `TZID` (always present), `VERSION`, `PRODID`, ...
//! - [`CalendarEvent`]: `DTSTART`, `DTEND`, `DTSTAMP` (ISO-8601), `SUMMARY`, ...
//! - [`Attendee`]: `NOTE` plus the parameters of the `ATTENDEE` line.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key of the calendar timezone property.
pub const TZID: &str = "TZID";

/// Property keys whose values are timestamps.
pub const DATE_KEYS: [&str; 3] = ["DTEND", "DTSTART", "DTSTAMP"];

/// Calendar-level properties read before the first event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarMeta {
    properties: BTreeMap<String, String>,
}

impl CalendarMeta {
    /// Creates an empty meta mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a property. A repeated key overwrites the earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Returns the value of a property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns the declared timezone identifier.
    pub fn tzid(&self) -> Option<&str> {
        self.get(TZID)
    }

    /// Returns the number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if no properties were read.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// An attendee of an event.
///
/// `note` holds the value of the `ATTENDEE` line (usually a `mailto:`
/// address); `params` holds the `NAME=VALUE` pairs from the key, with names
/// kept exactly as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    #[serde(rename = "NOTE")]
    pub note: String,
    #[serde(flatten)]
    pub params: BTreeMap<String, String>,
}

impl Attendee {
    /// Creates an attendee with the given note and no parameters.
    pub fn new(note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            params: BTreeMap::new(),
        }
    }

    /// Returns a parameter value, or the note for the reserved `NOTE` name.
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == "NOTE" {
            return Some(&self.note);
        }
        self.params.get(name).map(String::as_str)
    }

    /// Returns the common name (`CN` parameter).
    pub fn common_name(&self) -> Option<&str> {
        self.get("CN")
    }

    /// Returns the participation role (`ROLE` parameter).
    pub fn role(&self) -> Option<&str> {
        self.get("ROLE")
    }
}

/// A single `VEVENT` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(flatten)]
    properties: BTreeMap<String, String>,
    /// Attendees, present only when the block had at least one attendee line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attendees: Option<Vec<Attendee>>,
}

impl CalendarEvent {
    /// Creates an empty event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a property. A repeated key overwrites the earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Attaches the attendee list. An empty list leaves the field absent.
    pub fn set_attendees(&mut self, attendees: Vec<Attendee>) {
        self.attendees = if attendees.is_empty() {
            None
        } else {
            Some(attendees)
        };
    }

    /// Returns the value of a property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn summary(&self) -> Option<&str> {
        self.get("SUMMARY")
    }

    /// Returns the normalized start timestamp.
    pub fn start(&self) -> Option<&str> {
        self.get("DTSTART")
    }

    /// Returns the normalized end timestamp.
    pub fn end(&self) -> Option<&str> {
        self.get("DTEND")
    }

    /// Returns the attendees, if any were listed.
    pub fn attendees(&self) -> Option<&[Attendee]> {
        self.attendees.as_deref()
    }

    /// Iterates over `(key, value)` property pairs in key order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Result of parsing a calendar feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub meta: CalendarMeta,
    pub events: Vec<CalendarEvent>,
}

impl ParseResult {
    /// Splits the result into its meta mapping and event sequence.
    pub fn into_parts(self) -> (CalendarMeta, Vec<CalendarEvent>) {
        (self.meta, self.events)
    }
}
