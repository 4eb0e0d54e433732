//! Time Resolver: raw DATE / DATE-TIME values to UTC instants.

pub mod alias;
mod resolver;
mod timezone;
mod values;

pub use resolver::{FloatingTimePolicy, TimeResolution, TimeResolver, resolve_time};
pub use timezone::{normalize_tzid, resolve_zone, standard_offset};
pub use values::{RawTime, parse_date, parse_raw_time, parse_time};
