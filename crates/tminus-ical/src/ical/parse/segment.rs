//! Splits unfolded feed text into `VEVENT` blocks.

use super::lexer::split_lines;
use crate::ical::core::names;

/// The content lines of one `VEVENT`, in source order.
///
/// Lines belonging to components nested inside the event (`VALARM` and the
/// like) are left out, so every line here is one of the event's own fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBlock {
    begin_line: usize,
    lines: Vec<(usize, String)>,
}

impl EventBlock {
    /// Builds a block from already-unfolded lines.
    #[must_use]
    pub fn new(begin_line: usize, lines: Vec<(usize, String)>) -> Self {
        Self { begin_line, lines }
    }

    /// Source line number of the `BEGIN:VEVENT` marker.
    #[must_use]
    pub const fn begin_line(&self) -> usize {
        self.begin_line
    }

    /// Content lines with their 1-based source line numbers.
    #[must_use]
    pub fn lines(&self) -> &[(usize, String)] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    BeginEvent,
    EndEvent,
    BeginOther,
    EndOther,
}

fn marker(line: &str) -> Option<Marker> {
    let (name, value) = line.split_once(':')?;
    let is_event = value.trim().eq_ignore_ascii_case(names::VEVENT);
    if name.eq_ignore_ascii_case(names::BEGIN) {
        Some(if is_event {
            Marker::BeginEvent
        } else {
            Marker::BeginOther
        })
    } else if name.eq_ignore_ascii_case(names::END) {
        Some(if is_event {
            Marker::EndEvent
        } else {
            Marker::EndOther
        })
    } else {
        None
    }
}

/// Segments a feed document into event blocks.
///
/// Anything before the first `BEGIN:VEVENT` is discarded. A block ends at its
/// `END:VEVENT`; if that marker is missing the block runs until the next
/// `BEGIN:VEVENT` or the end of input. Input without markers yields no blocks.
#[must_use]
pub fn segment(text: &str) -> Vec<EventBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<EventBlock> = None;
    // Nesting depth of sub-components inside the open event.
    let mut depth = 0usize;

    for (line_num, line) in split_lines(text) {
        match marker(&line) {
            Some(Marker::BeginEvent) => {
                if let Some(open) = current.take() {
                    tracing::debug!(
                        line = open.begin_line,
                        "VEVENT without END:VEVENT, closing at next BEGIN"
                    );
                    blocks.push(open);
                }
                current = Some(EventBlock::new(line_num, Vec::new()));
                depth = 0;
            }
            Some(Marker::EndEvent) => {
                if let Some(open) = current.take() {
                    blocks.push(open);
                }
                depth = 0;
            }
            Some(Marker::BeginOther) if current.is_some() => depth += 1,
            Some(Marker::EndOther) if current.is_some() => depth = depth.saturating_sub(1),
            _ => {
                if let Some(open) = current.as_mut()
                    && depth == 0
                {
                    open.lines.push((line_num, line));
                }
            }
        }
    }

    if let Some(open) = current {
        tracing::debug!(
            line = open.begin_line,
            "VEVENT without END:VEVENT at end of input"
        );
        blocks.push(open);
    }

    tracing::trace!(count = blocks.len(), "Segmented event blocks");

    blocks
}
