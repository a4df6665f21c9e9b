//! Error type shared by every alignment operation.
//!
//! All checks run before any output is built, so an `Err` always means the
//! input alignment was left untouched and nothing partial was produced.

use thiserror::Error;

/// Errors that can occur while building or transforming an alignment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MsaError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Column index {index} is out of range for alignment width {width}")]
    IndexOutOfRange { index: usize, width: usize },

    #[error("Invalid column range {start}..{end} for alignment width {width}")]
    InvalidRange {
        start: usize,
        end: usize,
        width: usize,
    },

    #[error("Sequences have different lengths (min: {min}, max: {max}); an aligned set is required")]
    ShapeMismatch { min: usize, max: usize },

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Duplicate record identifier '{0}'")]
    DuplicateIdentifier(String),

    #[error("No record with identifier '{0}'")]
    UnknownRecord(String),

    #[error("Sequence of record '{0}' contains non-ASCII symbols")]
    NonAsciiSequence(String),

    #[error("Missing mandatory column '{0}'")]
    MissingColumn(String),

    #[error("Column '{column}' has {found} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        found: usize,
    },
}

/// Result type for alignment operations.
pub type MsaResult<T> = Result<T, MsaError>;

/// Checks that a fraction-valued setting lies in `[0, 1]` (NaN is rejected).
pub(crate) fn check_fraction(name: &str, value: f64) -> MsaResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MsaError::InvalidParameter(format!(
            "{} must be between 0 and 1 (got {})",
            name, value
        )))
    }
}
