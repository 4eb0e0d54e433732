//! Document-level entry points: feed text in, events and diagnostics out.

use tminus_core::constants::DEFAULT_EVENT_TITLE;

use super::core::{Category, Event, names};
use super::diagnostic::{Diagnostic, Diagnostics};
use super::parse::{EventBlock, FieldMap, segment};
use super::time::{FloatingTimePolicy, TimeResolution, TimeResolver};
use crate::error::{IcalError, IcalResult};

/// How the category of each parsed event is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryPolicy {
    /// Every event from the document gets this category.
    Fixed(Category),
    /// Read the first `CATEGORIES` value; anything that is not a tier name
    /// (or no value at all) gives `fallback`.
    FromFeed { fallback: Category },
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        Self::Fixed(Category::default())
    }
}

impl CategoryPolicy {
    fn category_of(self, fields: &FieldMap) -> Category {
        match self {
            Self::Fixed(category) => category,
            Self::FromFeed { fallback } => fields
                .text(names::CATEGORIES)
                .as_deref()
                .and_then(|value| value.split(',').next())
                .and_then(Category::parse)
                .unwrap_or(fallback),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub category: CategoryPolicy,
    pub floating: FloatingTimePolicy,
}

impl ParseOptions {
    #[must_use]
    pub const fn new(category: CategoryPolicy, floating: FloatingTimePolicy) -> Self {
        Self { category, floating }
    }

    #[must_use]
    pub const fn with_category(category: Category) -> Self {
        Self {
            category: CategoryPolicy::Fixed(category),
            floating: FloatingTimePolicy::SystemLocal,
        }
    }
}

/// Events recovered from a parse, with everything that went wrong on the way.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub events: Vec<Event>,
    pub diagnostics: Diagnostics,
}

impl ParseOutcome {
    /// Returns the events only if the parse was clean.
    ///
    /// ## Errors
    /// Returns [`IcalError::Diagnostics`] if any diagnostic was recorded.
    pub fn into_strict(self) -> IcalResult<Vec<Event>> {
        if self.diagnostics.is_empty() {
            Ok(self.events)
        } else {
            Err(IcalError::Diagnostics(self.diagnostics))
        }
    }

    /// Appends another outcome, keeping event order.
    pub fn merge(&mut self, other: Self) {
        self.events.extend(other.events);
        self.diagnostics.merge(other.diagnostics);
    }
}

/// ## Summary
/// Parses one feed document into events, in block order.
///
/// Never fails: malformed lines, unparseable times and unknown zones are
/// recorded in [`ParseOutcome::diagnostics`] and the event is still emitted
/// with whatever could be recovered.
#[tracing::instrument(skip(input, options), fields(input_len = input.len()))]
#[must_use]
pub fn parse_feed(input: &str, options: &ParseOptions) -> ParseOutcome {
    tracing::debug!("Parsing feed");

    let mut resolver = TimeResolver::new(options.floating);
    let mut outcome = ParseOutcome::default();

    for block in segment(input) {
        let event = build_event(&block, options.category, &mut resolver, &mut outcome.diagnostics);
        outcome.events.push(event);
    }

    if !outcome.diagnostics.is_empty() {
        tracing::warn!(
            count = outcome.diagnostics.len(),
            unknown_zones = ?outcome.diagnostics.unknown_zones(),
            "Feed parsed with diagnostics"
        );
    }
    tracing::debug!(events = outcome.events.len(), "Parsed feed");

    outcome
}

/// ## Summary
/// Parses several documents, each with its own category policy, and
/// concatenates the results in input order.
#[must_use]
pub fn parse_feeds<'a, I>(documents: I, floating: FloatingTimePolicy) -> ParseOutcome
where
    I: IntoIterator<Item = (&'a str, CategoryPolicy)>,
{
    let mut outcome = ParseOutcome::default();
    for (input, category) in documents {
        outcome.merge(parse_feed(input, &ParseOptions::new(category, floating)));
    }
    outcome
}

fn build_event(
    block: &EventBlock,
    category: CategoryPolicy,
    resolver: &mut TimeResolver,
    diagnostics: &mut Diagnostics,
) -> Event {
    tracing::trace!(line = block.begin_line(), "Building event");

    let fields = FieldMap::from_block(block);
    for err in fields.skipped() {
        tracing::warn!(error = %err, "Skipped malformed line");
        diagnostics.push(Diagnostic::malformed_line(err));
    }

    let title = fields
        .text(names::SUMMARY)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| DEFAULT_EVENT_TITLE.to_string());

    Event {
        title,
        description: fields.text(names::DESCRIPTION).unwrap_or_default(),
        location: fields.text(names::LOCATION).unwrap_or_default(),
        start: instant_of(&fields, names::DTSTART, resolver, diagnostics),
        end: instant_of(&fields, names::DTEND, resolver, diagnostics),
        category: category.category_of(&fields),
    }
}

fn instant_of(
    fields: &FieldMap,
    name: &str,
    resolver: &mut TimeResolver,
    diagnostics: &mut Diagnostics,
) -> Option<chrono::DateTime<chrono::Utc>> {
    match resolver.resolve_field(fields, name)? {
        TimeResolution::Exact(instant) => Some(instant),
        TimeResolution::Degraded {
            instant,
            diagnostic,
        } => {
            diagnostics.push(diagnostic);
            Some(instant)
        }
        TimeResolution::Unparseable => {
            let raw = fields.raw(name).unwrap_or_default();
            tracing::warn!(field = name, raw, "Unparseable date-time value");
            let mut diagnostic = Diagnostic::unparseable_time(raw);
            if let Some(field) = fields.get(name) {
                diagnostic = diagnostic.at_line(field.line);
            }
            diagnostics.push(diagnostic);
            None
        }
    }
}
