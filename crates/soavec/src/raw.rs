//! Traits linking element records to their generated columnar types

use std::ops::Range;

/// Associates an element record with its generated container.
///
/// Implemented by `#[derive(StructOfArray)]`, e.g.
/// `impl StructOfArray for Particle { type Type = ParticleVec; }`.
pub trait StructOfArray {
    /// The generated columnar container
    type Type;
}

/// Raw, unchecked construction of views over a generated container.
///
/// This is the seam [`SoACell`](crate::SoACell) uses to hand out views over
/// disjoint ranges of one container at the same time. The derive implements
/// it for every generated `…Vec`; the views are built from column pointers
/// obtained with `Vec::as_ptr`/`Vec::as_mut_ptr`, which never materialise a
/// reference to a whole column.
///
/// # Safety
///
/// Implementations must build views that cover exactly `range` of every
/// column and nothing else, and must report the shared column length from
/// [`SoARaw::len`].
pub unsafe trait SoARaw {
    /// Shared view type (`…Slice<'a>`)
    type Slice<'a>
    where
        Self: 'a;

    /// Exclusive view type (`…SliceMut<'a>`)
    type SliceMut<'a>
    where
        Self: 'a;

    /// Number of elements in every column.
    fn len(&self) -> usize;

    /// Whether the container holds no element.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a shared view over `range` of the container behind `this`.
    ///
    /// # Safety
    ///
    /// `this` must point to a live container, `range` must lie within its
    /// length, no exclusive view may overlap `range` during `'a`, and the
    /// columns must not be reallocated or dropped during `'a`.
    unsafe fn slice_raw<'a>(this: *const Self, range: Range<usize>) -> Self::Slice<'a>;

    /// Build an exclusive view over `range` of the container behind `this`.
    ///
    /// # Safety
    ///
    /// As for [`SoARaw::slice_raw`], and additionally no other view of any
    /// kind may overlap `range` during `'a`.
    unsafe fn slice_raw_mut<'a>(this: *mut Self, range: Range<usize>) -> Self::SliceMut<'a>;
}
