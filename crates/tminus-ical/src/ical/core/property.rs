//! Content line type (RFC 5545 §3.1).

use super::Parameter;

/// A raw content line as tokenized from feed text.
///
/// Holds the value exactly as it appeared after unfolding, before unescaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Raw value string (after unfolding, before unescaping).
    pub raw_value: String,
}

impl ContentLine {
    /// Creates a content line with parameters.
    #[must_use]
    pub fn with_params(
        name: impl Into<String>,
        params: Vec<Parameter>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params,
            raw_value: value.into(),
        }
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    /// Returns the TZID parameter if present.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.get_param_value(names::TZID)
    }
}

/// Property and component names the feed pipeline reads.
pub mod names {
    pub const BEGIN: &str = "BEGIN";
    pub const END: &str = "END";
    pub const VEVENT: &str = "VEVENT";

    pub const SUMMARY: &str = "SUMMARY";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const LOCATION: &str = "LOCATION";
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const DTSTART: &str = "DTSTART";
    pub const DTEND: &str = "DTEND";

    pub const TZID: &str = "TZID";
}
