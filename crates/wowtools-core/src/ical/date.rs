//! Timestamp normalization.
//!
//! Feed timestamps look like `20091201T100000Z`. Despite the trailing `Z`
//! the fields are read as wall-clock time in the calendar's `TZID` zone,
//! and rendered as ISO-8601 with that zone's offset.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use regex::Regex;

use super::error::{IcalError, IcalResult};

/// `date("c")` layout: seconds precision and a `+HH:MM` offset.
const ISO_8601: &str = "%Y-%m-%dT%H:%M:%S%:z";

static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})(\d{2})(\d{2})T(\d{2})(\d{2})(\d{2})Z").expect("timestamp regex is valid")
});

/// Resolves a `TZID` value to a timezone.
pub fn resolve_timezone(tzid: &str) -> IcalResult<Tz> {
    Tz::from_str(tzid.trim()).map_err(|_| IcalError::UnknownTimezone(tzid.to_string()))
}

/// Normalizes the timestamp found in `value` to ISO-8601 in zone `tz`.
///
/// Out-of-range fields roll over into the next unit, so month 13 is January
/// of the following year and `T240000` is midnight of the next day.
///
/// `key` is only used for the error report.
pub fn normalize_timestamp(key: &str, value: &str, tz: Tz) -> IcalResult<String> {
    let malformed = || IcalError::MalformedDate {
        key: key.to_string(),
        value: value.to_string(),
    };

    let caps = TIMESTAMP.captures(value).ok_or_else(malformed)?;
    let field = |i: usize| caps[i].parse::<i64>().map_err(|_| malformed());

    let naive = wall_clock(
        field(1)?,
        field(2)?,
        field(3)?,
        field(4)? * 3600 + field(5)? * 60 + field(6)?,
    )
    .ok_or_else(malformed)?;

    Ok(localize(naive, tz).format(ISO_8601).to_string())
}

/// Builds a wall-clock time from possibly out-of-range fields.
fn wall_clock(year: i64, month: i64, day: i64, seconds: i64) -> Option<NaiveDateTime> {
    let months = year * 12 + month - 1;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;

    NaiveDate::from_ymd_opt(year, month, 1)?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::days(day - 1))?
        .checked_add_signed(Duration::seconds(seconds))
}

/// Places a wall-clock time in `tz`.
///
/// Times inside a DST gap move forward by the width of the gap; times inside
/// a fold take the earlier instant.
fn localize(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let shifted = naive + gap_width(naive, tz);
            tz.from_local_datetime(&shifted)
                .earliest()
                .unwrap_or_else(|| tz.from_utc_datetime(&naive))
        }
    }
}

/// Offset change across the transition nearest to `naive`.
fn gap_width(naive: NaiveDateTime, tz: Tz) -> Duration {
    let offset_at = |at: NaiveDateTime| {
        i64::from(tz.offset_from_utc_datetime(&at).fix().local_minus_utc())
    };
    let width = offset_at(naive + Duration::days(1)) - offset_at(naive - Duration::days(1));

    if width > 0 {
        Duration::seconds(width)
    } else {
        Duration::hours(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amsterdam() -> Tz {
        resolve_timezone("Europe/Amsterdam").unwrap()
    }

    #[test]
    fn winter_time_uses_standard_offset() {
        let out = normalize_timestamp("DTSTART", "20091201T100000Z", amsterdam()).unwrap();
        assert_eq!(out, "2009-12-01T10:00:00+01:00");
    }

    #[test]
    fn summer_time_uses_daylight_offset() {
        let out = normalize_timestamp("DTSTART", "20090715T203000Z", amsterdam()).unwrap();
        assert_eq!(out, "2009-07-15T20:30:00+02:00");
    }

    #[test]
    fn output_parses_as_rfc3339() {
        let out = normalize_timestamp("DTEND", "20091231T235959Z", amsterdam()).unwrap();
        assert!(DateTime::parse_from_rfc3339(&out).is_ok());
    }

    #[test]
    fn utc_zone_keeps_wall_clock() {
        let tz = resolve_timezone("UTC").unwrap();
        let out = normalize_timestamp("DTSTAMP", "20091201T100000Z", tz).unwrap();
        assert_eq!(out, "2009-12-01T10:00:00+00:00");
    }

    #[test]
    fn dst_gap_moves_forward() {
        // 02:30 does not exist in Amsterdam on 2009-03-29.
        let out = normalize_timestamp("DTSTART", "20090329T023000Z", amsterdam()).unwrap();
        assert_eq!(out, "2009-03-29T03:30:00+02:00");
    }

    #[test]
    fn dst_fold_takes_earlier_instant() {
        // 02:30 occurs twice in Amsterdam on 2009-10-25.
        let out = normalize_timestamp("DTSTART", "20091025T023000Z", amsterdam()).unwrap();
        assert_eq!(out, "2009-10-25T02:30:00+02:00");
    }

    #[test]
    fn wrong_format_is_malformed() {
        let err = normalize_timestamp("DTSTART", "2009-12-01", amsterdam()).unwrap_err();
        assert_eq!(
            err,
            IcalError::MalformedDate {
                key: "DTSTART".to_string(),
                value: "2009-12-01".to_string(),
            }
        );
    }

    #[test]
    fn missing_z_is_malformed() {
        assert!(normalize_timestamp("DTSTART", "20091201T100000", amsterdam()).is_err());
    }

    #[test]
    fn out_of_range_fields_roll_over() {
        let cases = [
            ("20091341T100000Z", "2010-02-10T10:00:00+01:00"),
            ("20091201T240000Z", "2009-12-02T00:00:00+01:00"),
            ("20090230T100000Z", "2009-03-02T10:00:00+01:00"),
            ("20091201T106000Z", "2009-12-01T11:00:00+01:00"),
            ("20091200T100000Z", "2009-11-30T10:00:00+01:00"),
            ("20090015T100000Z", "2008-12-15T10:00:00+01:00"),
        ];
        for (value, expected) in cases {
            let out = normalize_timestamp("DTSTART", value, amsterdam()).unwrap();
            assert_eq!(out, expected, "{}", value);
        }
    }

    #[test]
    fn half_hour_dst_gap_moves_by_gap_width() {
        // Lord Howe Island springs forward from 02:00 to 02:30 on 2009-10-04.
        let tz = resolve_timezone("Australia/Lord_Howe").unwrap();
        let out = normalize_timestamp("DTSTART", "20091004T021500Z", tz).unwrap();
        assert_eq!(out, "2009-10-04T02:45:00+11:00");
    }

    #[test]
    fn unknown_timezone() {
        assert_eq!(
            resolve_timezone("Azeroth/Stormwind"),
            Err(IcalError::UnknownTimezone("Azeroth/Stormwind".to_string()))
        );
    }
}
