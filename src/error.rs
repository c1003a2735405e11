use std::fmt;

use crate::vocab::Symbol;

/// Errors raised while training a merge table.
///
/// Running out of pairs is not one of these: it ends training early and is
/// reported through [`crate::StopReason::EmptyStatistics`].
#[derive(Debug)]
pub enum TrainError {
    /// The requested iteration count was zero or negative.
    InvalidIterationCount(i64),
    /// A pair member had no token frequency, so its score is undefined.
    ZeroTokenFrequency { symbol: Symbol },
    /// A corpus line could not be decoded as text (1-based line number).
    MalformedCorpusLine { line_number: usize },
    /// The reporting sink failed to accept an iteration report.
    Report(std::io::Error),
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIterationCount(n) => {
                write!(f, "iteration count must be positive, got {n}")
            }
            Self::ZeroTokenFrequency { symbol } => {
                write!(f, "symbol {symbol:?} appears in a pair but has zero frequency")
            }
            Self::MalformedCorpusLine { line_number } => {
                write!(f, "corpus line {line_number} is not valid UTF-8")
            }
            Self::Report(e) => write!(f, "failed to write iteration report: {e}"),
        }
    }
}

impl std::error::Error for TrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Report(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrainError {
    fn from(e: std::io::Error) -> Self {
        Self::Report(e)
    }
}

/// Validates an iteration count coming from an untyped source such as a config file.
pub fn validate_iterations(iterations: i64) -> Result<usize, TrainError> {
    if iterations <= 0 {
        return Err(TrainError::InvalidIterationCount(iterations));
    }
    usize::try_from(iterations).map_err(|_| TrainError::InvalidIterationCount(iterations))
}
