//! RAII guards releasing their range lock when dropped

use std::fmt;
use std::ops::Range;

use super::SoACell;
use crate::raw::SoARaw;

/// Shared view guard returned by [`SoACell::borrow`].
///
/// # Example
///
/// ```
/// use soavec::{SoACell, StructOfArray};
///
/// #[derive(StructOfArray)]
/// pub struct Point {
///     pub x: f32,
/// }
///
/// let cell = SoACell::new(PointVec::try_from_columns(vec![1.0, 2.0, 3.0]).unwrap());
/// {
///     let first = cell.borrow(..2).unwrap();
///     let all = cell.borrow(..).unwrap();
///     assert_eq!(first.view().x, &[1.0, 2.0]);
///     assert_eq!(all.view().len(), 3);
///     assert_eq!(cell.live_borrows().len(), 2);
/// }
/// // both guards dropped, both locks released
/// assert!(cell.live_borrows().is_empty());
/// ```
pub struct RangeRef<'c, V> {
    cell: &'c SoACell<V>,
    id: u64,
    range: Range<usize>,
}

impl<'c, V: SoARaw> RangeRef<'c, V> {
    pub(super) fn new(cell: &'c SoACell<V>, id: u64, range: Range<usize>) -> Self {
        Self { cell, id, range }
    }

    /// The locked range, in container positions.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Shared view over the locked range.
    pub fn view(&self) -> V::Slice<'_> {
        // SAFETY: the range was resolved against the container length and is
        // locked in shared mode, so no exclusive view overlaps it while this
        // guard lives. Columns cannot be reallocated while `cell` is borrowed.
        unsafe { V::slice_raw(self.cell.as_ptr(), self.range.clone()) }
    }
}

impl<'c, V> Drop for RangeRef<'c, V> {
    fn drop(&mut self) {
        self.cell.release(self.id);
    }
}

impl<'c, V> fmt::Debug for RangeRef<'c, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeRef")
            .field("id", &self.id)
            .field("range", &self.range)
            .finish()
    }
}

/// Exclusive view guard returned by [`SoACell::borrow_mut`].
pub struct RangeMut<'c, V> {
    cell: &'c SoACell<V>,
    id: u64,
    range: Range<usize>,
}

impl<'c, V: SoARaw> RangeMut<'c, V> {
    pub(super) fn new(cell: &'c SoACell<V>, id: u64, range: Range<usize>) -> Self {
        Self { cell, id, range }
    }

    /// The locked range, in container positions.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Shared view over the locked range.
    pub fn view(&self) -> V::Slice<'_> {
        // SAFETY: the range is locked exclusively by this guard, and
        // `view_mut` cannot be called while the returned view borrows `self`.
        unsafe { V::slice_raw(self.cell.as_ptr(), self.range.clone()) }
    }

    /// Exclusive view over the locked range.
    pub fn view_mut(&mut self) -> V::SliceMut<'_> {
        // SAFETY: the range is locked exclusively by this guard, so no other
        // view overlaps it, and the `&mut self` borrow prevents a second view
        // from this guard.
        unsafe { V::slice_raw_mut(self.cell.as_ptr(), self.range.clone()) }
    }
}

impl<'c, V> Drop for RangeMut<'c, V> {
    fn drop(&mut self) {
        self.cell.release(self.id);
    }
}

impl<'c, V> fmt::Debug for RangeMut<'c, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeMut")
            .field("id", &self.id)
            .field("range", &self.range)
            .finish()
    }
}
