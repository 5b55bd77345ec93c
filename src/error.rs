//! Error types for dictionary construction, corpus loading and lookup.

use std::io;

use thiserror::Error;

/// Errors reported by `symdel`.
///
/// A lookup that finds nothing is not an error, and neither is a missing
/// corpus file: `SymSpell::load_dictionary` reports that as `Ok(false)`.
#[derive(Error, Debug)]
pub enum SymSpellError {
    /// A construction or lookup parameter is out of range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Reading an already opened corpus failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A corpus line carries a count that is not an integer.
    #[error("line {line}: count `{value}` is not an integer")]
    Parse { line: usize, value: String },

    /// A corpus line has at least two fields but not the configured column.
    #[error("line {line}: no column at index {index}")]
    MissingColumn { line: usize, index: usize },
}

/// Result type alias for operations that may fail with [`SymSpellError`].
pub type Result<T> = std::result::Result<T, SymSpellError>;

impl SymSpellError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(name: &'static str, reason: S) -> Self {
        SymSpellError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
