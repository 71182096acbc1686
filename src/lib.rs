//! # mkqsort
//!
//! `mkqsort` implements **multi-key quicksort** (MKQS): an in-place sort for
//! an array of composite records by an ordered list of sort keys. It is a
//! drop-in accelerator for a general-purpose tuple sorter when (a) all input
//! fits in memory, (b) there are at least two sort keys, and (c) the leading
//! key is frequently duplicated (so that advancing to secondary keys pays
//! off).
//!
//! The algorithm blends Quicksort with a radix-style key-advance: like
//! Quicksort, it three-way partitions a slice into `< pivot`, `== pivot`, and
//! `> pivot` at the current key; like radix sort, once a run of tuples is
//! known equal at the current key, it moves on to the next key instead of
//! re-comparing what it already knows is equal. The approach follows Bentley
//! and Sedgewick, "Fast Algorithms for Sorting and Searching Strings" (1997).
//!
//! ## Key Features
//!
//! - **In-place**: no heap allocation inside the core; the caller's array is
//!   permuted directly.
//! - **Abbreviated-key aware**: the leading key stored in a tuple may be a
//!   lossy prefix or hash of the true value — [`accessor::TupleAccessor`]
//!   supports the two-stage compare this requires.
//! - **NULL-aware across depths**: null placement is configurable per key,
//!   and a `seen_null` flag is threaded down to the duplicate handler.
//! - **Duplicate handling**: an optional callback is invoked once per
//!   maximal run of tuples equal across every configured key.
//!
//! ## Usage
//!
//! Implement [`accessor::TupleAccessor`] for a type that can resolve deeper
//! key values and compare them, then call [`mk_qsort_tuple`]:
//!
//! ```rust
//! use mkqsort::accessor::TupleAccessor;
//! use mkqsort::core::{Datum, LeadingKind, NullOrder, SortKey, SortOrder, SortState, SortTuple};
//! use mkqsort::error::MkqsError;
//! use mkqsort::mk_qsort_tuple;
//! use std::cmp::Ordering;
//!
//! // Two-column rows, sorted by column 0 then column 1, both ascending.
//! struct Rows(Vec<(i64, i64)>);
//!
//! impl TupleAccessor for Rows {
//!     type Payload = usize;
//!
//!     fn get_datum(&self, tuple: &SortTuple<usize>, depth: usize) -> Result<(Datum, bool), MkqsError> {
//!         let row = self.0[tuple.payload];
//!         let value = if depth == 0 { row.0 } else { row.1 };
//!         Ok((value as u64, false))
//!     }
//!
//!     fn apply_generic(&self, d1: Datum, n1: bool, d2: Datum, n2: bool, key: &SortKey) -> Result<Ordering, MkqsError> {
//!         Ok(mkqsort::comparator::apply_signed(d1, n1, d2, n2, key))
//!     }
//!
//!     fn apply_abbrev_full(&self, _d1: Datum, _n1: bool, _d2: Datum, _n2: bool, _key: &SortKey) -> Result<Ordering, MkqsError> {
//!         unreachable!("this accessor never abbreviates the leading key")
//!     }
//! }
//!
//! let rows = Rows(vec![(2, 1), (1, 2), (2, 1), (1, 1)]);
//! let mut tuples: Vec<SortTuple<usize>> = rows
//!     .0
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &(k0, _))| SortTuple::new(k0 as u64, false, i))
//!     .collect();
//!
//! let keys = [
//!     SortKey::new(SortOrder::Ascending, NullOrder::Last),
//!     SortKey::new(SortOrder::Ascending, NullOrder::Last),
//! ];
//! let mut state = SortState::new(&keys, LeadingKind::Signed, &rows);
//! mk_qsort_tuple(&mut tuples, &mut state).unwrap();
//!
//! let sorted: Vec<(i64, i64)> = tuples.iter().map(|t| rows.0[t.payload]).collect();
//! assert_eq!(sorted, vec![(1, 1), (1, 2), (2, 1), (2, 1)]);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Best case**: close to O(N) when the leading key is nearly unique and
//!   the pre-order short-circuit fires.
//! - **Worst case**: O(N log N) like Quicksort, plus up to `n_keys` recursion
//!   levels for the fully-duplicated-leading-key case.
//! - **Memory overhead**: zero heap allocation inside the core; the caller's
//!   array is mutated in place.
//!
//! This is not a stable sort, does not handle out-of-memory inputs, and
//! expects the caller to route single-key input to a scalar quicksort
//! instead — see [`core::SortState::new`].

pub mod accessor;
pub mod algo;
pub mod comparator;
pub mod core;
pub mod error;
pub mod partition;
pub mod pivot;

pub use algo::mk_qsort_tuple;
pub use error::MkqsError;

pub mod prelude {
    pub use crate::accessor::{DuplicateHandler, Interrupts, TupleAccessor};
    pub use crate::core::{LeadingKind, NullOrder, SortKey, SortOrder, SortState, SortTuple};
    pub use crate::error::{MkqsError, Result};
    pub use crate::mk_qsort_tuple;
}
