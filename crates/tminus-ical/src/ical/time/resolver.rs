//! Conversion of raw DTSTART/DTEND values to UTC instants.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Local, LocalResult, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use super::timezone::{resolve_zone, standard_offset};
use super::values::{RawTime, parse_raw_time};
use crate::ical::diagnostic::Diagnostic;
use crate::ical::parse::FieldMap;

/// How a local date-time without a usable zone qualifier is read.
///
/// A zone-less timestamp carries no information about where it was written;
/// this policy makes the assumption explicit instead of leaving it to the
/// process environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatingTimePolicy {
    /// The executing machine's local zone.
    #[default]
    SystemLocal,
    /// Treat the wall-clock value as UTC.
    Utc,
    /// A fixed tz database zone, DST-aware.
    Zone(Tz),
}

impl FloatingTimePolicy {
    /// Parses a policy name: `system`/`local`, `utc`, or any zone qualifier
    /// [`resolve_zone`] understands.
    #[must_use]
    pub fn from_setting(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" | "local" => Some(Self::SystemLocal),
            "utc" | "z" => Some(Self::Utc),
            _ => resolve_zone(s).map(Self::Zone),
        }
    }

    /// Converts a wall-clock value to UTC under this policy.
    ///
    /// Ambiguous times (DST fold) take the earlier instant; non-existent times
    /// (DST gap) are shifted forward one hour.
    #[must_use]
    pub fn localize(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::SystemLocal => from_local(&Local, naive),
            Self::Utc => Some(naive.and_utc()),
            Self::Zone(tz) => from_local(tz, naive),
        }
    }
}

fn from_local<Z: TimeZone>(zone: &Z, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
        LocalResult::None => zone
            .from_local_datetime(&(naive + TimeDelta::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

/// Outcome of resolving one raw time value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeResolution {
    /// Resolved exactly as the feed specified.
    Exact(DateTime<Utc>),
    /// Resolved under a fallback assumption; the diagnostic says why.
    Degraded {
        instant: DateTime<Utc>,
        diagnostic: Diagnostic,
    },
    /// The value matched none of the accepted forms.
    Unparseable,
}

impl TimeResolution {
    #[must_use]
    pub const fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Exact(instant) | Self::Degraded { instant, .. } => Some(*instant),
            Self::Unparseable => None,
        }
    }

    #[must_use]
    pub const fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Degraded { diagnostic, .. } => Some(diagnostic),
            Self::Exact(_) | Self::Unparseable => None,
        }
    }

    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

/// Resolves raw time values, caching zone lookups for the lifetime of one parse.
#[derive(Debug, Clone, Default)]
pub struct TimeResolver {
    floating: FloatingTimePolicy,
    zones: HashMap<String, Option<Tz>>,
}

impl TimeResolver {
    #[must_use]
    pub fn new(floating: FloatingTimePolicy) -> Self {
        Self {
            floating,
            zones: HashMap::new(),
        }
    }

    /// Resolves a zone qualifier, remembering misses as well as hits.
    pub fn zone(&mut self, tzid: &str) -> Option<Tz> {
        if let Some(cached) = self.zones.get(tzid) {
            return *cached;
        }
        let tz = resolve_zone(tzid);
        self.zones.insert(tzid.to_string(), tz);
        tz
    }

    /// ## Summary
    /// Resolves a raw DATE or DATE-TIME value with its optional `TZID`.
    ///
    /// - `YYYYMMDD`: midnight UTC of that date
    /// - `YYYYMMDDTHHMMSSZ`: that UTC wall-clock time
    /// - `YYYYMMDDTHHMMSS` with a known `TZID`: wall clock minus the zone's standard offset
    /// - `YYYYMMDDTHHMMSS` without `TZID`: the floating-time policy
    /// - `YYYYMMDDTHHMMSS` with an unknown `TZID`: the floating-time policy, as `Degraded`
    pub fn resolve(&mut self, raw: &str, tzid: Option<&str>) -> TimeResolution {
        let Ok(parsed) = parse_raw_time(raw.trim(), 0) else {
            return TimeResolution::Unparseable;
        };

        match parsed {
            RawTime::Date(date) => TimeResolution::Exact(date.and_time(NaiveTime::MIN).and_utc()),
            RawTime::Utc(naive) => TimeResolution::Exact(naive.and_utc()),
            RawTime::Local(naive) => self.resolve_local(naive, tzid),
        }
    }

    fn resolve_local(&mut self, naive: NaiveDateTime, tzid: Option<&str>) -> TimeResolution {
        let Some(tzid) = tzid.map(str::trim).filter(|t| !t.is_empty()) else {
            return self
                .floating
                .localize(naive)
                .map_or(TimeResolution::Unparseable, TimeResolution::Exact);
        };

        if let Some(instant) = self
            .zone(tzid)
            .and_then(|tz| standard_offset(tz, naive.year()))
            .and_then(|offset| naive.and_utc().checked_sub_signed(offset))
        {
            return TimeResolution::Exact(instant);
        }

        tracing::warn!(
            tzid,
            policy = ?self.floating,
            "Unrecognized timezone qualifier, using floating-time policy"
        );

        // The value itself is well-formed, so the event keeps an instant.
        let instant = self
            .floating
            .localize(naive)
            .unwrap_or_else(|| naive.and_utc());
        TimeResolution::Degraded {
            instant,
            diagnostic: Diagnostic::unknown_timezone(tzid),
        }
    }

    /// ## Summary
    /// Resolves the field `name` of a tokenized block, honouring its `TZID`.
    ///
    /// Returns `None` when the block has no such field. Diagnostics carry the
    /// field's source line.
    pub fn resolve_field(&mut self, fields: &FieldMap, name: &str) -> Option<TimeResolution> {
        let field = fields.get(name)?;
        let resolution = self.resolve(&field.content.raw_value, field.content.tzid());

        Some(match resolution {
            TimeResolution::Degraded {
                instant,
                diagnostic,
            } => TimeResolution::Degraded {
                instant,
                diagnostic: diagnostic.at_line(field.line),
            },
            other => other,
        })
    }
}

/// ## Summary
/// One-shot form of [`TimeResolver::resolve`].
#[must_use]
pub fn resolve_time(raw: &str, tzid: Option<&str>, floating: FloatingTimePolicy) -> TimeResolution {
    TimeResolver::new(floating).resolve(raw, tzid)
}
