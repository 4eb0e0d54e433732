//! Feed text decoding primitives.
//!
//! - Lexer: line-ending normalization, unfolding, content-line tokenizing
//! - Segment: splitting a document into `VEVENT` blocks
//! - Fields: per-block field maps and text unescaping

mod error;
mod fields;
mod lexer;
mod segment;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use fields::{Field, FieldMap, extract_field, extract_param, unescape_text};
pub use lexer::{normalize_line_endings, parse_content_line, split_lines};
pub use segment::{EventBlock, segment};
