//! DATE and DATE-TIME lexing (RFC 5545 §3.3.4, §3.3.5).
//!
//! Only the three basic forms are accepted: `YYYYMMDD`, `YYYYMMDDTHHMMSSZ`
//! and `YYYYMMDDTHHMMSS`. Anything else is an error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::ical::parse::{ParseError, ParseErrorKind, ParseResult};

/// A lexed date or date-time value, before any zone is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTime {
    /// `YYYYMMDD`
    Date(NaiveDate),
    /// `YYYYMMDDTHHMMSSZ`
    Utc(NaiveDateTime),
    /// `YYYYMMDDTHHMMSS`
    Local(NaiveDateTime),
}

fn all_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

// Callers check the slice is ASCII digits of the right width first.
fn number(s: &str) -> u32 {
    s.bytes()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

/// Parses a DATE value.
///
/// Format: YYYYMMDD (e.g., "19970714")
///
/// ## Errors
/// Returns an error if the string is not 8 digits naming a real calendar date.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<NaiveDate> {
    if !all_digits(s, 8) {
        return Err(ParseError::new(ParseErrorKind::InvalidDate, line, col));
    }

    let year = i32::try_from(number(&s[0..4]))
        .map_err(|_e| ParseError::new(ParseErrorKind::InvalidDate, line, col))?;

    NaiveDate::from_ymd_opt(year, number(&s[4..6]), number(&s[6..8]))
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidDate, line, col))
}

/// Parses a TIME value, returning the time and whether it carried a `Z` suffix.
///
/// Format: HHMMSS[Z] (e.g., "133000", "133000Z")
///
/// ## Errors
/// Returns an error if the string is not 6 digits naming a valid time of day.
pub fn parse_time(s: &str, line: usize, col: usize) -> ParseResult<(NaiveTime, bool)> {
    let (time_str, is_utc) = if let Some(stripped) = s.strip_suffix('Z') {
        (stripped, true)
    } else {
        (s, false)
    };

    if !all_digits(time_str, 6) {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line, col));
    }

    let time = NaiveTime::from_hms_opt(
        number(&time_str[0..2]),
        number(&time_str[2..4]),
        number(&time_str[4..6]),
    )
    .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidTime, line, col))?;

    Ok((time, is_utc))
}

/// Lexes a raw DTSTART/DTEND value into one of the three accepted forms.
///
/// ## Errors
/// Returns an error if the value matches none of the forms.
pub fn parse_raw_time(s: &str, line: usize) -> ParseResult<RawTime> {
    let Some((date_str, time_str)) = s.split_once('T') else {
        return parse_date(s, line, 1).map(RawTime::Date);
    };

    if date_str.len() != 8 {
        return Err(ParseError::new(ParseErrorKind::InvalidDateTime, line, 1));
    }

    let date = parse_date(date_str, line, 1)?;
    let (time, is_utc) = parse_time(time_str, line, 10)?;
    let naive = date.and_time(time);

    Ok(if is_utc {
        RawTime::Utc(naive)
    } else {
        RawTime::Local(naive)
    })
}
