//! # soavec
//!
//! Struct-of-arrays containers generated from plain Rust structs.
//!
//! `#[derive(StructOfArray)]` on an element record such as
//!
//! ```
//! use soavec::StructOfArray;
//!
//! #[derive(Debug, Clone, PartialEq, StructOfArray)]
//! #[soa_derive(Debug, PartialEq)]
//! pub struct Particle {
//!     pub x: f64,
//!     pub y: f64,
//! }
//! ```
//!
//! generates a `ParticleVec` holding one `Vec` per field, the views
//! `ParticleSlice<'a>` / `ParticleSliceMut<'a>` over a contiguous range of
//! every column, the single-element references `ParticleRef<'a>` /
//! `ParticleRefMut<'a>`, iterators, and [`SoAIndex`] / [`SoAIndexMut`]
//! implementations for `usize` and every `usize` range type.
//!
//! ## Architecture
//!
//! - **Derive** (`soavec-derive`): token-to-token generation of the types above
//! - **Selectors** ([`SoAIndex`], [`SoAIndexMut`], [`resolve_range`]):
//!   positions and ranges, all validated before a column is touched
//! - **Errors** ([`SoAError`]): `IndexOutOfRange`, `LengthMismatch`,
//!   `BorrowConflict`
//! - **Range locks** ([`SoACell`]): runtime exclusivity for views handed out
//!   through a shared reference
//! - **Reordering** ([`Permutation`]): sorting and `apply_index` on exclusive
//!   views, applied column by column
//! - **Generic access** ([`SoASlice`], [`SoASliceMut`], [`SoAVec`]): code
//!   written once for every generated container and view
//!
//! ## Example
//!
//! ```
//! use soavec::StructOfArray;
//!
//! #[derive(Debug, Clone, PartialEq, StructOfArray)]
//! #[soa_derive(Debug, PartialEq)]
//! pub struct Sample {
//!     pub x: i32,
//!     pub y: i32,
//! }
//!
//! let samples = SampleVec::try_from_columns(vec![1, 2, 3], vec![10, 20, 30]).unwrap();
//!
//! let second = samples.index(1);
//! assert_eq!((*second.x, *second.y), (2, 20));
//!
//! let tail = samples.index(1..3);
//! assert_eq!(tail.x, &[2, 3]);
//! assert_eq!(tail.y, &[20, 30]);
//!
//! assert!(samples.get(5).is_none());
//! assert!(samples.try_get(5).unwrap_err().is_out_of_range());
//! ```
//!
//! Mutable views are exclusive by the borrow checker:
//!
//! ```compile_fail
//! use soavec::StructOfArray;
//!
//! #[derive(StructOfArray)]
//! pub struct Sample {
//!     pub x: i32,
//! }
//!
//! let mut samples = SampleVec::try_from_columns(vec![1, 2, 3, 4, 5]).unwrap();
//! let inner = samples.index_mut(3..4);
//! let outer = samples.index_mut(2..5);
//! inner.x[0] = outer.x[0];
//! ```
//!
//! When views must be handed out through a shared reference, wrap the
//! container in a [`SoACell`] to get the same guarantee checked at runtime.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cell;
pub mod error;
pub mod generic;
pub mod index;
pub mod permutation;
pub mod raw;
pub mod selector;

// Re-export main types
pub use cell::{BorrowMode, RangeLock, RangeMut, RangeRef, SoACell};
pub use error::{Result, SoAError};
pub use generic::{SoASlice, SoASliceMut, SoAVec};
pub use index::{SoAIndex, SoAIndexMut};
pub use permutation::Permutation;
pub use raw::{SoARaw, StructOfArray};
pub use selector::{check_insertion, check_position, ranges_overlap, resolve_range};

pub use soavec_derive::StructOfArray;

/// soavec version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
