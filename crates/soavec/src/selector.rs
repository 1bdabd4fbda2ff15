//! Selector resolution
//!
//! Every range selector is resolved to a concrete half-open `start..end`
//! before any column is touched, so generated indexing code only ever slices
//! with a validated `Range<usize>`.

use std::ops::{Bound, Range, RangeBounds};

use crate::error::{Result, SoAError};

/// Resolve any `usize` range selector against a container of length `len`.
///
/// # Errors
///
/// Returns `IndexOutOfRange` if the resolved end is before the start, past
/// `len`, or not representable (an inclusive bound of `usize::MAX`).
///
/// # Example
///
/// ```
/// use soavec::resolve_range;
///
/// assert_eq!(resolve_range(1.., 4).unwrap(), 1..4);
/// assert_eq!(resolve_range(..=2, 4).unwrap(), 0..3);
/// assert_eq!(resolve_range(.., 0).unwrap(), 0..0);
/// assert!(resolve_range(2..5, 4).is_err());
/// ```
pub fn resolve_range<R: RangeBounds<usize>>(range: R, len: usize) -> Result<Range<usize>> {
    let start = match range.start_bound() {
        Bound::Included(&start) => Some(start),
        Bound::Excluded(&start) => start.checked_add(1),
        Bound::Unbounded => Some(0),
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.checked_add(1),
        Bound::Excluded(&end) => Some(end),
        Bound::Unbounded => Some(len),
    };

    match (start, end) {
        (Some(start), Some(end)) if start <= end && end <= len => Ok(start..end),
        (start, end) => Err(SoAError::IndexOutOfRange {
            start: start.unwrap_or(usize::MAX),
            end: end.unwrap_or(usize::MAX),
            len,
        }),
    }
}

/// Check that a single position addresses an existing element.
///
/// # Errors
///
/// Returns `IndexOutOfRange` if `index >= len`.
#[inline]
pub fn check_position(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(SoAError::position(index, len))
    }
}

/// Check that `index` is a valid insertion point, i.e. `index <= len`.
///
/// # Errors
///
/// Returns `IndexOutOfRange` if `index > len`.
#[inline]
pub fn check_insertion(index: usize, len: usize) -> Result<()> {
    if index <= len {
        Ok(())
    } else {
        Err(SoAError::position(index, len))
    }
}

/// Whether two half-open ranges share at least one position.
///
/// Empty ranges never overlap anything.
#[inline]
pub fn ranges_overlap(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < a.end && b.start < b.end && a.start < b.end && b.start < a.end
}
