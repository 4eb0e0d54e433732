//! Content line lexer (RFC 5545 §3.1).
//!
//! Handles line-ending normalization, unfolding and tokenization of content lines.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::CharIndices;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::ical::core::{ContentLine, Parameter};

/// Rewrites CRLF and bare CR line endings to LF, dropping a leading BOM.
#[must_use]
pub fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

/// Splits input into content lines, merging folded continuations.
///
/// Lines starting with SP/HTAB are continuations of the previous line. Per
/// RFC 5545 §3.1, unfolding removes the line break and that single whitespace
/// character; no space is inserted. Blank lines are dropped.
///
/// Each entry carries the 1-based source line number where the logical line began.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let normalized = normalize_line_endings(input);
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, line) in normalized.lines().enumerate() {
        if line.is_empty() {
            continue;
        }

        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(continuation);
            } else {
                lines.push((i + 1, continuation.to_string()));
            }
        } else {
            lines.push((i + 1, line.to_string()));
        }
    }

    lines
}

/// Parses a single content line.
///
/// Format: `name *(";" param) ":" value`
///
/// The value starts after the first colon that is not inside a quoted
/// parameter value, so values may themselves contain colons.
///
/// ## Errors
/// Returns an error if the line is malformed or contains invalid characters.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let mut chars = line.char_indices().peekable();
    let mut delimiter = None;

    // Find the property name (ends at ';' or ':')
    while let Some(&(i, c)) = chars.peek() {
        if c == ';' || c == ':' {
            delimiter = Some((i, c));
            chars.next();
            break;
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(ParseError::new(
                ParseErrorKind::InvalidPropertyName,
                line_num,
                i + 1,
            ));
        }
        chars.next();
    }

    let Some((name_end, delimiter)) = delimiter else {
        return Err(ParseError::new(
            ParseErrorKind::MissingColon,
            line_num,
            line.len(),
        ));
    };

    if name_end == 0 {
        return Err(ParseError::new(
            ParseErrorKind::MissingPropertyName,
            line_num,
            1,
        ));
    }

    let name = &line[..name_end];

    let mut params = Vec::new();
    let colon_pos = if delimiter == ':' {
        name_end
    } else {
        loop {
            let (param, colon) = parse_parameter(&mut chars, line, line_num)?;
            params.push(param);
            if let Some(pos) = colon {
                break pos;
            }
        }
    };

    Ok(ContentLine::with_params(
        name,
        params,
        &line[colon_pos + 1..],
    ))
}

/// Parses a single parameter from the character stream.
///
/// Returns the parameter and, when the parameter list ended, the byte index
/// of the colon that introduces the value.
fn parse_parameter(
    chars: &mut Peekable<CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<(Parameter, Option<usize>)> {
    let start = chars.peek().map_or(line.len(), |&(i, _)| i);

    // Parse parameter name (up to '=')
    let mut name_end = start;
    while let Some(&(i, c)) = chars.peek() {
        if c == '=' {
            name_end = i;
            chars.next();
            break;
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(ParseError::new(
                ParseErrorKind::InvalidParameter,
                line_num,
                i + 1,
            ));
        }
        chars.next();
    }

    if name_end == start {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            start + 1,
        ));
    }

    let param_name = line[start..name_end].to_ascii_uppercase();

    // Parse parameter values (comma-separated, may be quoted)
    let mut values = Vec::new();
    loop {
        values.push(parse_param_value(chars, line, line_num)?);

        match chars.peek() {
            Some(&(_, ',')) => {
                chars.next();
            }
            Some(&(_, ';')) => {
                chars.next();
                return Ok((Parameter::with_values(param_name, values), None));
            }
            Some(&(i, ':')) => {
                chars.next();
                return Ok((Parameter::with_values(param_name, values), Some(i)));
            }
            Some(&(i, c)) => {
                return Err(
                    ParseError::new(ParseErrorKind::InvalidParameter, line_num, i + 1)
                        .with_context(format!("unexpected character '{c}'")),
                );
            }
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingColon,
                    line_num,
                    line.len(),
                ));
            }
        }
    }
}

/// Parses a parameter value (possibly quoted).
fn parse_param_value(
    chars: &mut Peekable<CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<String> {
    let Some(&(start, first)) = chars.peek() else {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            line.len(),
        ));
    };

    if first != '"' {
        // Unquoted value (ends at ',' ';' or ':')
        let mut end = start;
        while let Some(&(i, c)) = chars.peek() {
            if c == ',' || c == ';' || c == ':' {
                break;
            }
            end = i + c.len_utf8();
            chars.next();
        }
        return Ok(line[start..end].to_string());
    }

    chars.next(); // opening quote
    let mut value = String::new();

    while let Some((_, c)) = chars.next() {
        match c {
            '"' => return Ok(value),
            // RFC 6868 caret encoding
            '^' => match chars.peek() {
                Some(&(_, '^')) => {
                    value.push('^');
                    chars.next();
                }
                Some(&(_, 'n')) => {
                    value.push('\n');
                    chars.next();
                }
                Some(&(_, '\'')) => {
                    value.push('"');
                    chars.next();
                }
                _ => value.push('^'),
            },
            _ => value.push(c),
        }
    }

    Err(ParseError::new(
        ParseErrorKind::UnclosedQuote,
        line_num,
        start + 1,
    ))
}
