//! Runtime range locks over a shared container
//!
//! Plain `…Vec` containers rely on the borrow checker for view exclusivity.
//! `SoACell` is for the cases where that discipline has to be checked when
//! the view is created instead: it owns a container together with a table of
//! live range locks, and every view it hands out is an RAII guard holding one
//! entry of that table.
//!
//! ```text
//! borrow(2..5)     ─┐
//! borrow(3..4)     ─┼─ shared locks may overlap
//! borrow_mut(6..8) ─┘  exclusive locks may not overlap anything
//! ```

mod guard;

pub use guard::{RangeMut, RangeRef};

use std::cell::{RefCell, UnsafeCell};
use std::fmt;
use std::ops::{Range, RangeBounds};

use indexmap::IndexMap;

use crate::error::{Result, SoAError};
use crate::raw::SoARaw;
use crate::selector::{ranges_overlap, resolve_range};

/// Access mode of a live range lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowMode {
    /// Read-only view; any number may overlap
    Shared,

    /// Read-write view; overlaps nothing
    Exclusive,
}

/// One entry of the lock table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeLock {
    /// Locked half-open range
    pub range: Range<usize>,

    /// Access mode
    pub mode: BorrowMode,
}

/// Live locks in acquisition order, keyed by guard id.
#[derive(Debug, Default)]
struct LockTable {
    live: IndexMap<u64, RangeLock>,
    next_id: u64,
}

impl LockTable {
    fn acquire(&mut self, range: Range<usize>, mode: BorrowMode) -> Result<u64> {
        let conflict = self.live.values().find(|lock| {
            (mode == BorrowMode::Exclusive || lock.mode == BorrowMode::Exclusive)
                && ranges_overlap(&range, &lock.range)
        });

        if let Some(lock) = conflict {
            log::debug!(
                "rejecting {:?} borrow of {:?}: overlaps {:?} borrow of {:?}",
                mode,
                range,
                lock.mode,
                lock.range
            );
            return Err(SoAError::BorrowConflict {
                requested: range,
                held: lock.range.clone(),
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        log::trace!("acquired {:?} borrow #{} of {:?}", mode, id, range);
        self.live.insert(id, RangeLock { range, mode });
        Ok(id)
    }

    fn release(&mut self, id: u64) {
        if let Some(lock) = self.live.shift_remove(&id) {
            log::trace!("released {:?} borrow #{} of {:?}", lock.mode, id, lock.range);
        }
    }
}

/// A columnar container guarded by a per-container range-lock table.
///
/// # Example
///
/// ```
/// use soavec::{SoACell, StructOfArray};
///
/// #[derive(Debug, Clone, PartialEq, StructOfArray)]
/// pub struct Sample {
///     pub x: i32,
///     pub y: i32,
/// }
///
/// let columns = SampleVec::try_from_columns(vec![1, 2, 3, 4, 5, 6], vec![0; 6]).unwrap();
/// let cell = SoACell::new(columns);
///
/// let mut left = cell.borrow_mut(0..3).unwrap();
/// let mut right = cell.borrow_mut(3..).unwrap();
/// {
///     let mut view = left.view_mut();
///     view.y[0] = 10;
/// }
/// {
///     let mut view = right.view_mut();
///     view.y[0] = 40;
/// }
///
/// // overlaps `left`
/// assert!(cell.borrow(2..4).unwrap_err().is_borrow_conflict());
///
/// drop(left);
/// drop(right);
/// assert_eq!(cell.borrow(..).unwrap().view().y, &[10, 0, 0, 40, 0, 0]);
/// ```
pub struct SoACell<V> {
    value: UnsafeCell<V>,
    locks: RefCell<LockTable>,
}

impl<V: SoARaw> SoACell<V> {
    /// Wrap a container.
    pub fn new(value: V) -> Self {
        Self {
            value: UnsafeCell::new(value),
            locks: RefCell::new(LockTable::default()),
        }
    }

    /// Unwrap the container. No guard can be live since this takes `self`.
    pub fn into_inner(self) -> V {
        self.value.into_inner()
    }

    /// Exclusive access to the whole container, including structural
    /// mutation. No guard can be live since this takes `&mut self`.
    pub fn get_mut(&mut self) -> &mut V {
        self.value.get_mut()
    }

    /// Number of elements in the container.
    pub fn len(&self) -> usize {
        // SAFETY: only the column headers are read. Live views borrow column
        // buffers, never the headers, and the headers cannot change while
        // `&self` is held.
        unsafe { SoARaw::len(&*self.value.get()) }
    }

    /// Whether the container holds no element.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lock `range` for reading and return the guard.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `range` does not fit in the container,
    /// and `BorrowConflict` if it overlaps a live exclusive lock.
    pub fn borrow<R: RangeBounds<usize>>(&self, range: R) -> Result<RangeRef<'_, V>> {
        let range = resolve_range(range, self.len())?;
        let id = self
            .locks
            .borrow_mut()
            .acquire(range.clone(), BorrowMode::Shared)?;
        Ok(RangeRef::new(self, id, range))
    }

    /// Lock `range` for writing and return the guard.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `range` does not fit in the container,
    /// and `BorrowConflict` if it overlaps any live lock.
    pub fn borrow_mut<R: RangeBounds<usize>>(&self, range: R) -> Result<RangeMut<'_, V>> {
        let range = resolve_range(range, self.len())?;
        let id = self
            .locks
            .borrow_mut()
            .acquire(range.clone(), BorrowMode::Exclusive)?;
        Ok(RangeMut::new(self, id, range))
    }

    /// Snapshot of the live locks, oldest first.
    pub fn live_borrows(&self) -> Vec<RangeLock> {
        self.locks.borrow().live.values().cloned().collect()
    }
}

impl<V> SoACell<V> {
    fn release(&self, id: u64) {
        self.locks.borrow_mut().release(id);
    }

    fn as_ptr(&self) -> *mut V {
        self.value.get()
    }
}

impl<V: SoARaw + Default> Default for SoACell<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<V: SoARaw> From<V> for SoACell<V> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}

impl<V> fmt::Debug for SoACell<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locks = self.locks.borrow();
        f.debug_struct("SoACell")
            .field("live_borrows", &locks.live.values().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
