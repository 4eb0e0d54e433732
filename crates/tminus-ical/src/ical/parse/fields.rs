//! Field extraction for a single event block.
//!
//! Every line of the block is tokenized once into a [`ContentLine`]; lookups
//! then go through the resulting map rather than rescanning the text.

use std::collections::HashMap;

use super::error::ParseError;
use super::lexer::parse_content_line;
use super::segment::EventBlock;
use crate::ical::core::ContentLine;

/// A tokenized field together with the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub line: usize,
    pub content: ContentLine,
}

/// Map from field name to its first occurrence in a block.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    fields: HashMap<String, Field>,
    skipped: Vec<ParseError>,
}

impl FieldMap {
    /// Tokenizes every line of `block`.
    ///
    /// Lines that do not tokenize are skipped and kept in [`FieldMap::skipped`].
    /// When a name repeats, the first occurrence wins.
    #[must_use]
    pub fn from_block(block: &EventBlock) -> Self {
        let mut map = Self::default();

        for (line_num, line) in block.lines() {
            match parse_content_line(line, *line_num) {
                Ok(content) => {
                    map.fields
                        .entry(content.name.clone())
                        .or_insert(Field {
                            line: *line_num,
                            content,
                        });
                }
                Err(e) => {
                    tracing::trace!(error = %e, "Skipping malformed content line");
                    map.skipped.push(e);
                }
            }
        }

        map
    }

    /// Returns the field with the given (case-insensitive) name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(&name.to_ascii_uppercase())
    }

    /// Returns the field value as text: trimmed and unescaped.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(|field| unescape_text(field.content.raw_value.trim()))
    }

    /// Returns the trimmed raw value without unescaping.
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.get(name).map(|field| field.content.raw_value.trim())
    }

    /// Returns the value of parameter `param` on field `name`.
    #[must_use]
    pub fn param(&self, name: &str, param: &str) -> Option<&str> {
        self.get(name)?.content.get_param_value(param)
    }

    /// Lines that failed to tokenize.
    #[must_use]
    pub fn skipped(&self) -> &[ParseError] {
        &self.skipped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Returns the unescaped text value of the first `name` field in `block`.
#[must_use]
pub fn extract_field(block: &EventBlock, name: &str) -> Option<String> {
    FieldMap::from_block(block).text(name)
}

/// Returns parameter `param` of the first `field` line in `block`.
#[must_use]
pub fn extract_param(block: &EventBlock, field: &str, param: &str) -> Option<String> {
    FieldMap::from_block(block)
        .param(field, param)
        .map(str::to_string)
}

/// Unescapes text values (RFC 5545 §3.3.11).
///
/// Escape sequences: \\ \, \; \n \N
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(',') => result.push(','),
                Some(';') => result.push(';'),
                Some('\\') | None => result.push('\\'),
                Some(other) => {
                    // Invalid escape, preserve as-is
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}
