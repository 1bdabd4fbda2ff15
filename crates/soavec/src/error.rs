//! Error types for columnar containers and their views

use std::ops::Range;

use thiserror::Error;

/// Errors raised by selector resolution, column construction and range locks.
///
/// Every operation returning one of these leaves the container exactly as it
/// was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SoAError {
    /// A selector resolved outside of `[0, len)`
    #[error("index out of range: {start}..{end} is outside of a container of length {len}")]
    IndexOutOfRange {
        /// Resolved start of the selector
        start: usize,
        /// Resolved (exclusive) end of the selector
        end: usize,
        /// Length of the indexed container or view
        len: usize,
    },

    /// A column does not have the length it must have
    #[error("length mismatch on field `{field}`: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the offending field
        field: &'static str,
        /// Required length
        expected: usize,
        /// Length actually supplied
        got: usize,
    },

    /// A requested view overlaps a live view and one of them is exclusive
    #[error("borrow conflict: {requested:?} overlaps the live borrow of {held:?}")]
    BorrowConflict {
        /// Range of the rejected request
        requested: Range<usize>,
        /// Range of the live borrow it collides with
        held: Range<usize>,
    },

    /// A reordering lists the same source position more than once
    #[error("duplicate index {index} in a reordering")]
    DuplicateIndex {
        /// The repeated source position
        index: usize,
    },
}

impl SoAError {
    /// Error for a single position `index` in a container of length `len`.
    pub fn position(index: usize, len: usize) -> Self {
        SoAError::IndexOutOfRange {
            start: index,
            end: index.saturating_add(1),
            len,
        }
    }

    /// Whether this is an [`SoAError::IndexOutOfRange`].
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, SoAError::IndexOutOfRange { .. })
    }

    /// Whether this is an [`SoAError::LengthMismatch`].
    pub fn is_length_mismatch(&self) -> bool {
        matches!(self, SoAError::LengthMismatch { .. })
    }

    /// Whether this is an [`SoAError::BorrowConflict`].
    pub fn is_borrow_conflict(&self) -> bool {
        matches!(self, SoAError::BorrowConflict { .. })
    }

    /// Whether this is an [`SoAError::DuplicateIndex`].
    pub fn is_duplicate_index(&self) -> bool {
        matches!(self, SoAError::DuplicateIndex { .. })
    }
}

/// Result type alias for columnar operations
pub type Result<T> = std::result::Result<T, SoAError>;
