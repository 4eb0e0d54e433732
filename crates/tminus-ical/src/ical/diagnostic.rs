//! Non-fatal problems found while parsing a feed.

use std::collections::BTreeSet;
use std::fmt;

use super::parse::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A `TZID` qualifier matched neither the alias table nor the zone database.
    UnknownTimezone,
    /// A content line inside an event could not be tokenized.
    MalformedLine,
    /// A date or date-time field was present but not in a recognized form.
    UnparseableTime,
}

impl DiagnosticKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownTimezone => "unknown timezone",
            Self::MalformedLine => "malformed line",
            Self::UnparseableTime => "unparseable time",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Source line (1-based) when known.
    pub line: Option<usize>,
    /// The offending input: zone name, raw value or tokenizer message.
    pub value: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(kind: DiagnosticKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            line: None,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn unknown_timezone(tzid: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::UnknownTimezone, tzid)
    }

    #[must_use]
    pub fn unparseable_time(raw: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::UnparseableTime, raw)
    }

    #[must_use]
    pub fn malformed_line(err: &ParseError) -> Self {
        Self::new(DiagnosticKind::MalformedLine, err.to_string()).at_line(err.line)
    }

    #[must_use]
    pub const fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(line) = self.line {
            write!(f, " at line {line}")?;
        }
        write!(f, ": {}", self.value)
    }
}

/// Diagnostics collected over one or more parses.
///
/// Unknown zone qualifiers are also gathered into a de-duplicated set so a
/// caller can report each unrecognized `TZID` once per batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    unknown_zones: BTreeSet<String>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.kind == DiagnosticKind::UnknownTimezone {
            self.unknown_zones.insert(diagnostic.value.clone());
        }
        self.entries.push(diagnostic);
    }

    /// Appends everything from `other`.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
        self.unknown_zones.extend(other.unknown_zones);
    }

    #[must_use]
    pub fn unknown_zones(&self) -> &BTreeSet<String> {
        &self.unknown_zones
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}
