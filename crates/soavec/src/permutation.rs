//! Reordering every column of a view the same way
//!
//! Sorting a struct of arrays cannot move whole records, so sorting first
//! computes the order of the elements and then applies that order to each
//! column in place.

use std::cmp::Ordering;

use crate::error::{Result, SoAError};

/// A reordering of `len` elements.
///
/// Applying it to a column puts the element found at `order()[i]` at
/// position `i`.
///
/// # Example
///
/// ```
/// use soavec::Permutation;
///
/// let permutation = Permutation::from_order(vec![2, 0, 1]).unwrap();
/// let mut column = vec!['a', 'b', 'c'];
/// permutation.apply(&mut column).unwrap();
/// assert_eq!(column, vec!['c', 'a', 'b']);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    order: Vec<usize>,
}

impl Permutation {
    /// The reordering that leaves `len` elements where they are.
    pub fn identity(len: usize) -> Self {
        Permutation {
            order: (0..len).collect(),
        }
    }

    /// Use `order` as the list of source positions, one per destination.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if a source position is not below
    /// `order.len()`, and `DuplicateIndex` if one appears twice.
    pub fn from_order(order: Vec<usize>) -> Result<Self> {
        let len = order.len();
        let mut seen = vec![false; len];
        for &index in &order {
            match seen.get_mut(index) {
                None => return Err(SoAError::position(index, len)),
                Some(true) => return Err(SoAError::DuplicateIndex { index }),
                Some(slot) => *slot = true,
            }
        }
        Ok(Permutation { order })
    }

    /// The stable sorting order of `len` elements compared by position.
    pub fn sort_by<F>(len: usize, mut compare: F) -> Self
    where
        F: FnMut(usize, usize) -> Ordering,
    {
        let mut order = (0..len).collect::<Vec<_>>();
        order.sort_by(|&a, &b| compare(a, b));
        Permutation { order }
    }

    /// The stable sorting order of `len` elements by the key of each
    /// position.
    pub fn sort_by_key<K, F>(len: usize, mut key: F) -> Self
    where
        K: Ord,
        F: FnMut(usize) -> K,
    {
        let mut order = (0..len).collect::<Vec<_>>();
        order.sort_by_key(|&index| key(index));
        Permutation { order }
    }

    /// Number of elements this reordering applies to
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether this reordering applies to no element
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Source position of every destination
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// The reordering that undoes this one.
    pub fn inverse(&self) -> Self {
        let mut order = vec![0; self.order.len()];
        for (destination, &source) in self.order.iter().enumerate() {
            order[source] = destination;
        }
        Permutation { order }
    }

    /// Check that this reordering fits a view of `len` elements.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the lengths differ.
    pub fn check_len(&self, len: usize) -> Result<()> {
        if self.order.len() == len {
            Ok(())
        } else {
            Err(SoAError::LengthMismatch {
                field: "permutation",
                expected: len,
                got: self.order.len(),
            })
        }
    }

    /// Reorder one column in place by following the cycles of the
    /// permutation.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if `column` does not have the length of this
    /// reordering. The column is left unchanged in that case.
    pub fn apply<T>(&self, column: &mut [T]) -> Result<()> {
        self.check_len(column.len())?;

        let mut done = vec![false; column.len()];
        for start in 0..column.len() {
            if done[start] {
                continue;
            }
            let mut current = start;
            loop {
                done[current] = true;
                let source = self.order[current];
                if source == start {
                    break;
                }
                column.swap(current, source);
                current = source;
            }
        }
        Ok(())
    }
}
