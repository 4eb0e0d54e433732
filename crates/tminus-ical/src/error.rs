use thiserror::Error;

use crate::ical::diagnostic::Diagnostics;
use crate::ical::parse::ParseError;

/// Feed parsing errors.
///
/// The lenient entry points never return these; they surface only when a
/// caller opts into strict handling.
#[derive(Error, Debug)]
pub enum IcalError {
    #[error("Feed produced diagnostics: {0}")]
    Diagnostics(Diagnostics),

    #[error("Tokenize error: {0}")]
    Tokenize(#[from] ParseError),
}

pub type IcalResult<T> = std::result::Result<T, IcalError>;
