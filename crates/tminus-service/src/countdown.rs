//! Countdown state of a single event.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use tminus_ical::ical::Event;

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Where `now` falls relative to an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Countdown {
    /// Not started; `remaining` until the start.
    Pending {
        #[serde(serialize_with = "serialize_secs")]
        remaining: TimeDelta,
    },
    /// Running; `remaining` until the end, `progress` in `0.0..=1.0`.
    InProgress {
        #[serde(serialize_with = "serialize_secs")]
        remaining: TimeDelta,
        progress: f64,
    },
    Finished,
    /// Start or end could not be resolved.
    Unknown,
}

impl Countdown {
    #[must_use]
    pub fn at(event: &Event, now: DateTime<Utc>) -> Self {
        let (Some(start), Some(end)) = (event.start, event.end) else {
            return Self::Unknown;
        };

        if now < start {
            Self::Pending {
                remaining: start - now,
            }
        } else if now < end {
            let total = (end - start).num_milliseconds();
            let elapsed = (now - start).num_milliseconds();
            #[expect(clippy::cast_precision_loss)]
            let progress = if total > 0 {
                (elapsed as f64 / total as f64).clamp(0.0, 1.0)
            } else {
                1.0
            };
            Self::InProgress {
                remaining: end - now,
                progress,
            }
        } else {
            Self::Finished
        }
    }

    /// Card label: "Starts in:" before the start, "Ends in:" while running.
    #[must_use]
    pub const fn label(&self) -> Option<&'static str> {
        match self {
            Self::Pending { .. } => Some("Starts in:"),
            Self::InProgress { .. } => Some("Ends in:"),
            Self::Finished | Self::Unknown => None,
        }
    }

    #[must_use]
    pub const fn remaining(&self) -> Option<TimeDelta> {
        match self {
            Self::Pending { remaining } | Self::InProgress { remaining, .. } => Some(*remaining),
            Self::Finished | Self::Unknown => None,
        }
    }

    /// Fraction of the event elapsed; zero before it starts.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        match self {
            Self::InProgress { progress, .. } => *progress,
            Self::Finished => 1.0,
            Self::Pending { .. } | Self::Unknown => 0.0,
        }
    }
}

fn serialize_secs<S: serde::Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(value.num_seconds())
}

/// Formats a countdown duration.
///
/// A day or more is shown as whole days rounded up ("1 day", "2 days");
/// anything shorter as `HHh MMm SSs`, each part floored and zero padded.
/// Negative durations format as zero.
#[must_use]
pub fn format_remaining(remaining: TimeDelta) -> String {
    let millis = u64::try_from(remaining.num_milliseconds()).unwrap_or(0);

    if millis >= MILLIS_PER_DAY {
        let days = millis.div_ceil(MILLIS_PER_DAY);
        return if days == 1 {
            "1 day".to_string()
        } else {
            format!("{days} days")
        };
    }

    let secs = millis / 1000;
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{hours:02}h {minutes:02}m {seconds:02}s")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tminus_ical::ical::Category;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 23, h, m, 0).unwrap()
    }

    fn event(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Event {
        Event {
            title: "Launch".to_string(),
            description: String::new(),
            location: String::new(),
            start,
            end,
            category: Category::Main,
        }
    }

    #[test]
    fn pending_before_start() {
        let countdown = Countdown::at(&event(Some(at(12, 0)), Some(at(13, 0))), at(11, 30));
        assert_eq!(
            countdown,
            Countdown::Pending {
                remaining: TimeDelta::minutes(30)
            }
        );
        assert_eq!(countdown.label(), Some("Starts in:"));
        assert!(countdown.progress().abs() < f64::EPSILON);
    }

    #[test]
    fn in_progress_reports_fraction() {
        let countdown = Countdown::at(&event(Some(at(12, 0)), Some(at(13, 0))), at(12, 15));
        let Countdown::InProgress {
            remaining,
            progress,
        } = countdown
        else {
            panic!("expected in-progress, got {countdown:?}");
        };
        assert_eq!(remaining, TimeDelta::minutes(45));
        assert!((progress - 0.25).abs() < 1e-9);
        assert_eq!(countdown.label(), Some("Ends in:"));
    }

    #[test]
    fn start_instant_counts_as_running() {
        let countdown = Countdown::at(&event(Some(at(12, 0)), Some(at(13, 0))), at(12, 0));
        assert!(matches!(countdown, Countdown::InProgress { .. }));
    }

    #[test]
    fn finished_at_end() {
        let countdown = Countdown::at(&event(Some(at(12, 0)), Some(at(13, 0))), at(13, 0));
        assert_eq!(countdown, Countdown::Finished);
        assert_eq!(countdown.label(), None);
    }

    #[test]
    fn end_before_start_is_tolerated() {
        let countdown = Countdown::at(&event(Some(at(13, 0)), Some(at(12, 0))), at(12, 30));
        assert_eq!(countdown, Countdown::Finished);
    }

    #[test]
    fn unknown_without_instants() {
        assert_eq!(
            Countdown::at(&event(None, Some(at(13, 0))), at(12, 0)),
            Countdown::Unknown
        );
        assert_eq!(
            Countdown::at(&event(Some(at(13, 0)), None), at(12, 0)),
            Countdown::Unknown
        );
    }

    #[test]
    fn formats_days_rounded_up() {
        assert_eq!(format_remaining(TimeDelta::seconds(90_061)), "2 days");
        assert_eq!(format_remaining(TimeDelta::seconds(86_400)), "1 day");
        assert_eq!(format_remaining(TimeDelta::seconds(86_401)), "2 days");
        assert_eq!(format_remaining(TimeDelta::days(3)), "3 days");
        assert_eq!(
            format_remaining(TimeDelta::seconds(86_400) + TimeDelta::milliseconds(500)),
            "2 days"
        );
    }

    #[test]
    fn formats_clock_below_a_day() {
        assert_eq!(format_remaining(TimeDelta::seconds(3661)), "01h 01m 01s");
        assert_eq!(format_remaining(TimeDelta::seconds(86_399)), "23h 59m 59s");
        assert_eq!(format_remaining(TimeDelta::milliseconds(1999)), "00h 00m 01s");
        assert_eq!(format_remaining(TimeDelta::zero()), "00h 00m 00s");
        assert_eq!(format_remaining(TimeDelta::seconds(-5)), "00h 00m 00s");
    }

    #[test]
    fn serializes_state_tag() {
        let json = serde_json::to_value(Countdown::Pending {
            remaining: TimeDelta::seconds(90),
        })
        .unwrap();
        assert_eq!(json["state"], "pending");
        assert_eq!(json["remaining"], 90);
    }
}
