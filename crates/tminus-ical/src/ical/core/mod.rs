//! Data types shared across the feed pipeline.

mod event;
mod parameter;
mod property;

pub use event::{Category, Event};
pub use parameter::Parameter;
pub use property::{ContentLine, names};
