//! iCalendar feed decoding (RFC 5545 subset).
//!
//! The pipeline is split the way the data flows:
//! - `parse`: line unfolding, content-line tokenizing, event segmentation, field extraction
//! - `time`: date/date-time lexing and timezone resolution
//! - `feed`: the document-level entry points that assemble [`Event`]s
//!
//! Nothing here fails on malformed content. Problems are reported through
//! [`Diagnostics`] alongside the events that could be recovered.

pub mod core;
pub mod diagnostic;
pub mod feed;
pub mod parse;
pub mod time;

pub use self::core::{Category, ContentLine, Event, Parameter};
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use feed::{CategoryPolicy, ParseOptions, ParseOutcome, parse_feed, parse_feeds};
pub use parse::{EventBlock, FieldMap, extract_field, extract_param, segment};
pub use time::{FloatingTimePolicy, TimeResolution, TimeResolver, resolve_time};
