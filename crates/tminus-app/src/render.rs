//! Terminal and JSON presentation of an agenda.

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tminus_ical::ical::{Category, Diagnostics, Event};
use tminus_service::{Agenda, Countdown, format_remaining};

use crate::dashboard::FeedFailure;
use crate::error::AppResult;

const PROGRESS_WIDTH: usize = 20;
/// Clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub show_description: bool,
}

fn heading(category: Category) -> &'static str {
    match category {
        Category::Main => "MAIN",
        Category::Secondary => "SECONDARY",
        Category::Tertiary => "TERTIARY",
    }
}

fn clock(instant: Option<DateTime<Utc>>) -> String {
    instant.map_or_else(
        || "--:--:--".to_string(),
        |instant| instant.with_timezone(&Local).format("%H:%M:%S").to_string(),
    )
}

/// Long date plus wall clock, e.g. `Friday, January 23, 2026  13:00:00`.
fn header(now: DateTime<Utc>) -> String {
    now.with_timezone(&Local)
        .format("%A, %B %-d, %Y  %H:%M:%S")
        .to_string()
}

fn progress_bar(progress: f64) -> String {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((progress.clamp(0.0, 1.0) * PROGRESS_WIDTH as f64).round() as usize).min(PROGRESS_WIDTH);
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled)
    )
}

fn card(
    f: &mut fmt::Formatter<'_>,
    event: &Event,
    now: DateTime<Utc>,
    options: RenderOptions,
) -> fmt::Result {
    let countdown = Countdown::at(event, now);

    writeln!(f, "  {}", event.title)?;
    if options.show_description && !event.description.is_empty() {
        for line in event.description.lines() {
            writeln!(f, "    {line}")?;
        }
    }
    if !event.location.is_empty() {
        writeln!(f, "    @ {}", event.location)?;
    }
    writeln!(f, "    {} - {}", clock(event.start), clock(event.end))?;

    match (countdown.label(), countdown.remaining()) {
        (Some(label), Some(remaining)) => {
            write!(f, "    {label} {}", format_remaining(remaining))?;
            if let Countdown::InProgress { progress, .. } = countdown {
                write!(f, "  {}", progress_bar(progress))?;
            }
            writeln!(f)
        }
        _ => writeln!(f, "    --:--:--"),
    }
}

struct TextView<'a> {
    agenda: &'a Agenda,
    failures: &'a [FeedFailure],
    diagnostics: &'a Diagnostics,
    now: DateTime<Utc>,
    options: RenderOptions,
}

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", header(self.now))?;
        writeln!(f)?;

        for tier in &self.agenda.tiers {
            writeln!(f, "== {} ==", heading(tier.category))?;
            for event in &tier.events {
                card(f, event, self.now, self.options)?;
            }
            for _ in 0..tier.placeholders {
                writeln!(f, "  .")?;
            }
            writeln!(f)?;
        }

        for failure in self.failures {
            writeln!(f, "Error loading {}: {}", failure.feed, failure.message)?;
        }

        if !self.diagnostics.is_empty() {
            write!(f, "Parse warnings: {}", self.diagnostics.len())?;
            let zones = self.diagnostics.unknown_zones();
            if !zones.is_empty() {
                let names: Vec<&str> = zones.iter().map(String::as_str).collect();
                write!(f, " (unknown timezones: {})", names.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// ## Summary
/// Renders the agenda as text cards under a date and clock header, one section
/// per tier, with a blank placeholder line for every empty slot. Failed feeds
/// get a line each and parse warnings a one-line summary.
#[must_use]
pub fn render_text(
    agenda: &Agenda,
    failures: &[FeedFailure],
    diagnostics: &Diagnostics,
    now: DateTime<Utc>,
    options: RenderOptions,
) -> String {
    TextView {
        agenda,
        failures,
        diagnostics,
        now,
        options,
    }
    .to_string()
}

#[derive(Debug, Serialize)]
struct EventView<'a> {
    #[serde(flatten)]
    event: &'a Event,
    countdown: Countdown,
}

#[derive(Debug, Serialize)]
struct TierView<'a> {
    category: Category,
    events: Vec<EventView<'a>>,
    placeholders: usize,
}

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    generated_at: DateTime<Utc>,
    tiers: Vec<TierView<'a>>,
    errors: Vec<ErrorView<'a>>,
    diagnostics: Vec<DiagnosticView<'a>>,
}

#[derive(Debug, Serialize)]
struct DiagnosticView<'a> {
    kind: &'static str,
    line: Option<usize>,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct ErrorView<'a> {
    feed: &'a str,
    message: &'a str,
}

/// ## Summary
/// Serializes the agenda with each event's countdown state, the failed feeds
/// and the parse diagnostics.
///
/// ## Errors
/// Returns `AppError::JsonError` if serialization fails.
pub fn render_json(
    agenda: &Agenda,
    failures: &[FeedFailure],
    diagnostics: &Diagnostics,
    now: DateTime<Utc>,
) -> AppResult<String> {
    let snapshot = Snapshot {
        generated_at: now,
        tiers: agenda
            .tiers
            .iter()
            .map(|tier| TierView {
                category: tier.category,
                events: tier
                    .events
                    .iter()
                    .map(|event| EventView {
                        event,
                        countdown: Countdown::at(event, now),
                    })
                    .collect(),
                placeholders: tier.placeholders,
            })
            .collect(),
        errors: failures
            .iter()
            .map(|failure| ErrorView {
                feed: &failure.feed,
                message: &failure.message,
            })
            .collect(),
        diagnostics: diagnostics
            .iter()
            .map(|diagnostic| DiagnosticView {
                kind: diagnostic.kind.as_str(),
                line: diagnostic.line,
                value: &diagnostic.value,
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&snapshot)?)
}
