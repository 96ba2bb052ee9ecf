//! Error types for calendar feed parsing.

use thiserror::Error;

/// An error that aborted a calendar parse.
///
/// Every error is fatal: a parse either returns the full result or exactly
/// one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IcalError {
    /// The first or last line is not the `VCALENDAR` boundary marker.
    #[error("Ical data malformed, malformed start and end line")]
    MalformedEnvelope,

    /// No `TZID` property was found before the first event.
    #[error("Ical data malformed, missing TZID")]
    MissingTimezone,

    /// The `TZID` value does not name a known timezone.
    #[error("Ical data malformed, unknown timezone: {0}")]
    UnknownTimezone(String),

    /// A date-bearing property does not contain a `YYYYMMDDTHHMMSSZ` token.
    #[error("Ical data malformed, malformed date in {key}: {value}")]
    MalformedDate { key: String, value: String },
}

/// A specialized Result type for calendar parsing.
pub type IcalResult<T> = Result<T, IcalError>;
