//! Per-tier selection of the events worth counting down to.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tminus_core::config::DisplayConfig;
use tminus_ical::ical::{Category, Event};

/// How many cards each tier shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayLimits {
    pub main: usize,
    pub secondary: usize,
    pub tertiary: usize,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            main: 3,
            secondary: 3,
            tertiary: 1,
        }
    }
}

impl DisplayLimits {
    #[must_use]
    pub const fn limit(&self, category: Category) -> usize {
        match category {
            Category::Main => self.main,
            Category::Secondary => self.secondary,
            Category::Tertiary => self.tertiary,
        }
    }
}

impl From<&DisplayConfig> for DisplayLimits {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            main: config.main_limit,
            secondary: config.secondary_limit,
            tertiary: config.tertiary_limit,
        }
    }
}

/// The events shown in one tier, plus the number of empty slots left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tier {
    pub category: Category,
    pub events: Vec<Event>,
    pub placeholders: usize,
}

/// Upcoming and running events, grouped by tier in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agenda {
    pub generated_at: DateTime<Utc>,
    pub tiers: Vec<Tier>,
}

impl Agenda {
    /// ## Summary
    /// Selects the events to display at `now`.
    ///
    /// Events without an end, or whose end is at or before `now`, are dropped.
    /// The rest are ordered by start (events without a start last, ties kept
    /// in input order) and each tier is cut to its limit.
    #[must_use]
    pub fn build<I>(events: I, now: DateTime<Utc>, limits: &DisplayLimits) -> Self
    where
        I: IntoIterator<Item = Event>,
    {
        let mut upcoming: Vec<Event> = events
            .into_iter()
            .filter(|event| event.is_upcoming(now))
            .collect();
        upcoming.sort_by_key(|event| (event.start.is_none(), event.start));

        let tiers = Category::ALL
            .into_iter()
            .map(|category| {
                let limit = limits.limit(category);
                let events: Vec<Event> = upcoming
                    .iter()
                    .filter(|event| event.category == category)
                    .take(limit)
                    .cloned()
                    .collect();
                Tier {
                    category,
                    placeholders: limit.saturating_sub(events.len()),
                    events,
                }
            })
            .collect();

        let agenda = Self {
            generated_at: now,
            tiers,
        };
        tracing::debug!(
            upcoming = upcoming.len(),
            shown = agenda.len(),
            "Built agenda"
        );
        agenda
    }

    /// Returns the tier for `category`.
    #[must_use]
    pub fn tier(&self, category: Category) -> Option<&Tier> {
        self.tiers.iter().find(|tier| tier.category == category)
    }

    #[must_use]
    pub fn events(&self, category: Category) -> &[Event] {
        self.tier(category)
            .map_or(&[][..], |tier| tier.events.as_slice())
    }

    #[must_use]
    pub fn placeholders(&self, category: Category) -> usize {
        self.tier(category).map_or(0, |tier| tier.placeholders)
    }

    /// Total number of events shown across all tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.iter().map(|tier| tier.events.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
