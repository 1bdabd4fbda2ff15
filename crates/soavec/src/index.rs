//! Selector traits implemented by the generated containers and views
//!
//! `usize` selectors produce a single-element reference (`…Ref` /
//! `…RefMut`); every `usize` range selector produces a slice view (`…Slice` /
//! `…SliceMut`). The derive implements both traits for all seven selectors on
//! `&…Vec`, `&mut …Vec`, `…Slice<'a>` and `…SliceMut<'a>`.

use crate::error::Result;

/// Non-mutating indexing of `T` with `Self` as the selector.
///
/// The only required method is [`SoAIndex::try_get`]; the other two are the
/// `Option` and panicking flavours of the same lookup.
pub trait SoAIndex<T> {
    /// The view produced by this selector.
    type RefOutput;

    /// Resolve the selector and build the view.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the selector does not fit in `soa`.
    fn try_get(self, soa: T) -> Result<Self::RefOutput>;

    /// Build the view, or `None` if the selector is out of range.
    #[inline]
    fn get(self, soa: T) -> Option<Self::RefOutput>
    where
        Self: Sized,
    {
        self.try_get(soa).ok()
    }

    /// Build the view.
    ///
    /// # Panics
    ///
    /// Panics with the `IndexOutOfRange` message if the selector does not
    /// fit in `soa`.
    #[inline]
    #[track_caller]
    fn index(self, soa: T) -> Self::RefOutput
    where
        Self: Sized,
    {
        match self.try_get(soa) {
            Ok(output) => output,
            Err(err) => panic!("{}", err),
        }
    }
}

/// Mutating indexing of `T` with `Self` as the selector.
pub trait SoAIndexMut<T> {
    /// The mutable view produced by this selector.
    type MutOutput;

    /// Resolve the selector and build the mutable view.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the selector does not fit in `soa`.
    fn try_get_mut(self, soa: T) -> Result<Self::MutOutput>;

    /// Build the mutable view, or `None` if the selector is out of range.
    #[inline]
    fn get_mut(self, soa: T) -> Option<Self::MutOutput>
    where
        Self: Sized,
    {
        self.try_get_mut(soa).ok()
    }

    /// Build the mutable view.
    ///
    /// # Panics
    ///
    /// Panics with the `IndexOutOfRange` message if the selector does not
    /// fit in `soa`.
    #[inline]
    #[track_caller]
    fn index_mut(self, soa: T) -> Self::MutOutput
    where
        Self: Sized,
    {
        match self.try_get_mut(soa) {
            Ok(output) => output,
            Err(err) => panic!("{}", err),
        }
    }
}
