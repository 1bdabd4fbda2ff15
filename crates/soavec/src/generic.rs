//! Traits for writing code over any generated container or view
//!
//! The derive implements [`SoASlice`] for `…Slice<'a>`, [`SoASliceMut`] for
//! `…SliceMut<'a>` and all three traits for `…Vec`, so a function can take
//! "some struct of arrays of `Particle`" without naming the generated types.
//!
//! ```
//! use soavec::{SoASlice, SoAVec, StructOfArray};
//!
//! #[derive(Debug, Clone, PartialEq, StructOfArray)]
//! pub struct Particle {
//!     pub mass: f64,
//! }
//!
//! fn fill<V: SoAVec<Particle>>(masses: &[f64]) -> V {
//!     let mut particles = V::new();
//!     for &mass in masses {
//!         particles.push(Particle { mass });
//!     }
//!     particles
//! }
//!
//! let particles: ParticleVec = fill(&[1.0, 2.0]);
//! assert_eq!(SoASlice::len(&particles), 2);
//! ```

use std::ops::RangeBounds;

use crate::error::Result;
use crate::permutation::Permutation;
use crate::raw::StructOfArray;

/// Read access shared by containers and views of `T`.
pub trait SoASlice<T: StructOfArray> {
    /// Single-element reference (`…Ref<'t>`)
    type Ref<'t>
    where
        Self: 't;

    /// Shared view (`…Slice<'t>`)
    type Slice<'t>
    where
        Self: 't;

    /// Iterator over references (`…Iter<'t>`)
    type Iter<'t>: Iterator<Item = Self::Ref<'t>>
    where
        Self: 't;

    /// Number of elements
    fn len(&self) -> usize;

    /// Whether there is no element
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shared view over every element
    fn as_slice(&self) -> Self::Slice<'_>;

    /// Shared view over `range`.
    ///
    /// # Panics
    ///
    /// If `range` does not fit.
    fn slice<R: RangeBounds<usize>>(&self, range: R) -> Self::Slice<'_>;

    /// Reference to the element at `index`, or `None` past the end
    fn get(&self, index: usize) -> Option<Self::Ref<'_>>;

    /// Reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// If `index >= len`.
    fn index(&self, index: usize) -> Self::Ref<'_>;

    /// Iterate over references to the elements
    fn iter(&self) -> Self::Iter<'_>;

    /// Reference to the first element
    fn first(&self) -> Option<Self::Ref<'_>> {
        self.get(0)
    }

    /// Reference to the last element
    fn last(&self) -> Option<Self::Ref<'_>> {
        let last = self.len().checked_sub(1)?;
        self.get(last)
    }
}

/// Write access shared by containers and exclusive views of `T`.
pub trait SoASliceMut<T: StructOfArray>: SoASlice<T> {
    /// Single-element mutable reference (`…RefMut<'t>`)
    type RefMut<'t>
    where
        Self: 't;

    /// Exclusive view (`…SliceMut<'t>`)
    type SliceMut<'t>
    where
        Self: 't;

    /// Iterator over mutable references (`…IterMut<'t>`)
    type IterMut<'t>: Iterator<Item = Self::RefMut<'t>>
    where
        Self: 't;

    /// Exclusive view over every element
    fn as_mut_slice(&mut self) -> Self::SliceMut<'_>;

    /// Exclusive view over `range`.
    ///
    /// # Panics
    ///
    /// If `range` does not fit.
    fn slice_mut<R: RangeBounds<usize>>(&mut self, range: R) -> Self::SliceMut<'_>;

    /// Mutable reference to the element at `index`, or `None` past the end
    fn get_mut(&mut self, index: usize) -> Option<Self::RefMut<'_>>;

    /// Mutable reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// If `index >= len`.
    fn index_mut(&mut self, index: usize) -> Self::RefMut<'_>;

    /// Iterate over mutable references to the elements
    fn iter_mut(&mut self) -> Self::IterMut<'_>;

    /// Reorder every column with `permutation`.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if `permutation` does not have the length of
    /// `self`. Nothing is moved in that case.
    fn apply_permutation(&mut self, permutation: &Permutation) -> Result<()>;

    /// Reorder every column so that position `i` holds the element that was
    /// at `indices[i]`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `DuplicateIndex` if `indices` is not a
    /// reordering of `0..indices.len()`, and `LengthMismatch` if it does not
    /// have the length of `self`. Nothing is moved in either case.
    fn apply_index(&mut self, indices: &[usize]) -> Result<()> {
        let permutation = Permutation::from_order(indices.to_vec())?;
        self.apply_permutation(&permutation)
    }
}

/// The owning container of `T`, with the structural operations of `Vec`.
pub trait SoAVec<T: StructOfArray>: SoASliceMut<T> {
    /// Empty container
    fn new() -> Self;

    /// Empty container with room for `capacity` elements in every column
    fn with_capacity(capacity: usize) -> Self;

    /// Smallest capacity of all the columns
    fn capacity(&self) -> usize;

    /// Reserve room for `additional` more elements
    fn reserve(&mut self, additional: usize);

    /// Reserve room for exactly `additional` more elements
    fn reserve_exact(&mut self, additional: usize);

    /// Release unused capacity
    fn shrink_to_fit(&mut self);

    /// Keep the first `len` elements
    fn truncate(&mut self, len: usize);

    /// Append `element`
    fn push(&mut self, element: T);

    /// Remove and return the last element
    fn pop(&mut self) -> Option<T>;

    /// Insert `element` at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index > len`.
    fn insert(&mut self, index: usize, element: T) -> Result<()>;

    /// Remove and return the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len`.
    fn remove(&mut self, index: usize) -> Result<T>;

    /// Remove the element at `index`, moving the last one into its place.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len`.
    fn swap_remove(&mut self, index: usize) -> Result<T>;

    /// Overwrite the element at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len`.
    fn replace(&mut self, index: usize, element: T) -> Result<T>;

    /// Move every element of `other` to the end of `self`.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the columns of `other` differ in length.
    fn append(&mut self, other: &mut Self) -> Result<()>;

    /// Remove every element
    fn clear(&mut self);

    /// Split off the elements from `at` on.
    ///
    /// # Panics
    ///
    /// If `at > len`.
    fn split_off(&mut self, at: usize) -> Self;
}
