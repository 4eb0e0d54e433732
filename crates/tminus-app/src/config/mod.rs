pub use tminus_core::config::*;
use tminus_core::error::CoreError;
use tminus_ical::ical::{CategoryPolicy, FloatingTimePolicy, ParseOptions};
use tminus_service::DisplayLimits;

use crate::error::AppResult;

/// ## Summary
/// Reads the floating-time policy named in the parser settings.
///
/// ## Errors
/// Returns `CoreError::ConfigError` if the name is neither `system`, `utc`
/// nor a zone the resolver knows.
pub fn floating_policy(parser: &ParserConfig) -> AppResult<FloatingTimePolicy> {
    FloatingTimePolicy::from_setting(&parser.floating_time).ok_or_else(|| {
        CoreError::ConfigError(format!(
            "parser.floating_time: unknown zone '{}'",
            parser.floating_time
        ))
        .into()
    })
}

/// Category policy for one feed source.
#[must_use]
pub const fn category_policy(feed: &FeedConfig) -> CategoryPolicy {
    if feed.category_from_feed {
        CategoryPolicy::FromFeed {
            fallback: feed.category,
        }
    } else {
        CategoryPolicy::Fixed(feed.category)
    }
}

/// Parser options for one feed source.
#[must_use]
pub const fn parse_options(feed: &FeedConfig, floating: FloatingTimePolicy) -> ParseOptions {
    ParseOptions::new(category_policy(feed), floating)
}

#[must_use]
pub fn display_limits(settings: &Settings) -> DisplayLimits {
    DisplayLimits::from(&settings.display)
}

#[cfg(test)]
mod tests;
