//! Event record produced by the feed parser.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use tminus_core::types::Category;

/// One calendar event as extracted from a `VEVENT` block.
///
/// Instants are `None` when the feed value was missing or unparseable.
/// `start <= end` is not checked; malformed feeds can violate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub category: Category,
}

impl Event {
    /// Returns whether the event has a known end after `now`.
    ///
    /// Events without an end never count as upcoming.
    #[must_use]
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.end.is_some_and(|end| end > now)
    }
}
