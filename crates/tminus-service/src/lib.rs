//! Agenda selection and countdown computation over parsed feed events.

pub mod agenda;
pub mod countdown;

pub use agenda::{Agenda, DisplayLimits, Tier};
pub use countdown::{Countdown, format_remaining};
