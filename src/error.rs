//! Error types surfaced by the sort core.
//!
//! The core performs no retries and produces no partial results: a call either
//! completes with the array fully sorted, or an error propagates up unmodified
//! from whichever collaborator raised it.

use thiserror::Error;

/// Errors that can unwind a call to [`crate::mk_qsort_tuple`].
///
/// Both variants are produced by collaborator callbacks, never invented by the
/// core itself. On either variant the array is left in an unspecified
/// permutation of its original contents (the multiset of tuples is still
/// preserved, but the order is not).
#[derive(Error, Debug)]
pub enum MkqsError {
    /// Raised by the `check_interrupts` callback. The caller is expected to
    /// abort the entire sort, not retry.
    #[error("sort cancelled")]
    Cancelled,

    /// Raised by `get_datum`, `handle_duplicates`, or any comparator supplied
    /// through [`crate::accessor::TupleAccessor`].
    #[error("collaborator error: {0}")]
    Collaborator(String),
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, MkqsError>;
