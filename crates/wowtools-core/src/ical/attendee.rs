//! `ATTENDEE` line decoding.

use crate::calendar::Attendee;

/// Maximum number of `;`-separated segments read from an attendee key.
///
/// The fifth segment keeps the remainder of the key unsplit, so a sixth
/// parameter ends up inside the fifth parameter's value.
pub const MAX_KEY_SEGMENTS: usize = 5;

/// Returns true if `key` names an attendee (`ATTENDEE;` prefix, any case).
pub fn is_attendee_key(key: &str) -> bool {
    key.get(..9)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("ATTENDEE;"))
}

/// Decodes an attendee from its key (`ATTENDEE;CN=...;ROLE=...`) and value.
///
/// Segments without `=` (including the leading `ATTENDEE`) are skipped.
/// Parameter names are kept as written; a parameter literally named `NOTE`
/// replaces the value.
pub fn decode_attendee(key: &str, value: &str) -> Attendee {
    let mut attendee = Attendee::new(value);

    for segment in key.splitn(MAX_KEY_SEGMENTS, ';') {
        let Some((name, param)) = segment.split_once('=') else {
            continue;
        };
        if name == "NOTE" {
            attendee.note = param.to_string();
        } else {
            attendee.params.insert(name.to_string(), param.to_string());
        }
    }

    attendee
}
