//! Zone qualifier resolution and fixed standard offsets.
//!
//! The static alias table is consulted first; ICU4X then covers Windows names
//! the table lacks and canonicalizes IANA aliases.

use chrono::{NaiveDate, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;

use super::alias;

/// Normalizes a `TZID` qualifier to an IANA name where possible.
///
/// Unrecognized qualifiers come back stripped but otherwise unchanged.
#[must_use]
pub fn normalize_tzid(tzid: &str) -> String {
    let trimmed = tzid.trim().trim_matches('"');

    // Strip common prefixes
    let stripped = trimmed
        .strip_prefix("/mozilla.org/")
        .or_else(|| trimmed.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(trimmed);

    if let Some(iana) = alias::lookup(stripped) {
        return iana.to_string();
    }

    // Windows names missing from the table
    let windows_parser = WindowsParser::new();
    if let Some(tz) = windows_parser.parse(stripped, None) {
        let iana_parser = IanaParserExtended::new();
        for entry in iana_parser.iter() {
            if entry.time_zone == tz {
                return entry.canonical.to_string();
            }
        }
    }

    // IANA canonicalization (handles aliases like Europe/Kiev -> Europe/Kyiv)
    let iana_parser = IanaParserExtended::new();
    let parsed = iana_parser.parse(stripped);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    stripped.to_string()
}

/// Resolves a `TZID` qualifier to a tz database zone.
#[must_use]
pub fn resolve_zone(tzid: &str) -> Option<Tz> {
    let normalized = normalize_tzid(tzid);
    normalized
        .parse::<Tz>()
        .ok()
        .or_else(|| tzid.trim().parse::<Tz>().ok())
}

/// Returns the zone's standard UTC offset, daylight saving excluded.
///
/// Taken as the smaller of the total offsets at 1 January and 1 July of
/// `year`, 00:00 UTC, so the answer never depends on the season of the value
/// being converted. Zones whose database rules use negative DST (Dublin)
/// still come out at their winter offset.
#[must_use]
pub fn standard_offset(tz: Tz, year: i32) -> Option<TimeDelta> {
    let total = |month: u32| -> Option<TimeDelta> {
        let reference = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
        let fixed = tz.offset_from_utc_datetime(&reference).fix();
        Some(TimeDelta::seconds(i64::from(fixed.local_minus_utc())))
    };
    Some(total(1)?.min(total(7)?))
}
