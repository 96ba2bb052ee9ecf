//! Line splitting and envelope validation.

use super::error::{IcalError, IcalResult};

const BEGIN_CALENDAR: &str = "BEGIN:VCALENDAR";
const END_CALENDAR: &str = "END:VCALENDAR";

/// Splits `text` into trimmed, non-blank lines and strips the
/// `BEGIN:VCALENDAR` / `END:VCALENDAR` envelope.
///
/// Both markers are compared case-insensitively. The returned lines are the
/// calendar body, borrowed from `text`.
pub fn envelope_body(text: &str) -> IcalResult<Vec<&str>> {
    let mut lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let first = lines.first().copied();
    if !first.is_some_and(|line| line.eq_ignore_ascii_case(BEGIN_CALENDAR)) {
        return Err(IcalError::MalformedEnvelope);
    }
    lines.remove(0);

    match lines.pop() {
        Some(last) if last.eq_ignore_ascii_case(END_CALENDAR) => Ok(lines),
        _ => Err(IcalError::MalformedEnvelope),
    }
}

/// Splits a content line on its first `:`.
pub(crate) fn split_property(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
}
