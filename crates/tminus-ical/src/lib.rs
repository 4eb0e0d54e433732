//! Lenient iCalendar feed parsing for the countdown dashboard.
//!
//! ```rust
//! use tminus_ical::ical::{ParseOptions, parse_feed};
//!
//! let input = "\
//! BEGIN:VCALENDAR\r\n\
//! BEGIN:VEVENT\r\n\
//! SUMMARY:Launch\r\n\
//! DTSTART:20260123T140000Z\r\n\
//! DTEND:20260123T150000Z\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let outcome = parse_feed(input, &ParseOptions::default());
//! assert_eq!(outcome.events[0].title, "Launch");
//! ```

pub mod error;
pub mod ical;
