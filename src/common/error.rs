//! Error types for studentdb.

use thiserror::Error;

use crate::common::StudentId;
use crate::record::Field;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors surfaced to callers of the engine.
///
/// Structural defects inside the tree are not represented here; those are
/// programmer errors reported by [`crate::index::InvariantViolation`].
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading or writing a snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Insert of an ID that is already in the index. Nothing was changed.
    #[error("The record with ID={0} already exists.")]
    DuplicateKey(StudentId),

    /// Lookup, update or delete of an ID that is not in the index.
    #[error("The record with ID={0} does not exist.")]
    NotFound(StudentId),

    /// A field value broke its type or range contract.
    ///
    /// Raised before any mutation is attempted.
    #[error("Invalid {field}: {reason}.")]
    ValidationFailed { field: Field, reason: String },

    /// Unrecognised command or malformed snapshot line.
    #[error("{0}")]
    Parse(String),
}

impl Error {
    /// Shorthand for building a [`Error::ValidationFailed`].
    pub(crate) fn invalid(field: Field, reason: impl Into<String>) -> Self {
        Error::ValidationFailed {
            field,
            reason: reason.into(),
        }
    }
}
