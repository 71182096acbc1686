//! Data model shared by every module: sort tuples, per-key metadata, and the
//! sort state the recursive driver carries through a call.

use crate::accessor::{DuplicateHandler, Interrupts, TupleAccessor};

/// A leading-key value (or its abbreviation) as a machine word.
///
/// Mirrors a `Datum`-sized value: the bit pattern is reinterpreted by the
/// comparator selected for [`LeadingKind`] (unsigned, signed, or the low
/// 32 bits as a signed integer), or handed untouched to a collaborator's
/// generic comparator.
pub type Datum = u64;

/// Ascending or descending order for one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Where NULLs sort relative to non-NULL values for one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrder {
    First,
    Last,
}

/// Selects the specialized comparator used for the leading (depth-0) sort key.
///
/// `Generic` disables the full-tuple pre-order check: without a
/// specialized comparator the core cannot cheaply compare
/// whole tuples, so it falls back to a strict per-depth pre-order check
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadingKind {
    Unsigned,
    Signed,
    Int32,
    Generic,
}

/// Per-key comparison metadata.
///
/// `abbrev_converter` is only meaningful on `sort_keys[0]`: when set, the
/// `datum1` stored in every [`SortTuple`] is a lossy abbreviation, and a
/// two-stage compare (shortcut, then a full resolve on tie) is required.
#[derive(Debug, Clone, Copy)]
pub struct SortKey {
    pub order: SortOrder,
    pub null_order: NullOrder,
    pub abbrev_converter: bool,
}

impl SortKey {
    pub fn new(order: SortOrder, null_order: NullOrder) -> Self {
        Self {
            order,
            null_order,
            abbrev_converter: false,
        }
    }

    /// Marks this key (meaningful only for key 0) as carrying an abbreviated
    /// leading value, requiring the two-stage compare.
    pub fn with_abbrev_converter(mut self, abbrev: bool) -> Self {
        self.abbrev_converter = abbrev;
        self
    }
}

/// One element of the array the core sorts.
///
/// `datum1`/`isnull1` are always the value used for leading-key comparisons
/// in the fast path, even when abbreviated — the "true" leading-key value is
/// reachable only through [`crate::accessor::TupleAccessor::get_datum`].
/// `payload` is an opaque handle (an index, a pointer, a row id — whatever
/// the collaborator needs) letting the accessor recover the full row and any
/// deeper key.
#[derive(Debug, Clone, Copy)]
pub struct SortTuple<P: Copy> {
    pub datum1: Datum,
    pub isnull1: bool,
    pub payload: P,
}

impl<P: Copy> SortTuple<P> {
    pub fn new(datum1: Datum, isnull1: bool, payload: P) -> Self {
        Self {
            datum1,
            isnull1,
            payload,
        }
    }
}

/// A context carrying the per-call configuration and collaborator callbacks
/// the recursive driver needs.
///
/// `accessor` is resolved statically (see [`crate::accessor`] for why);
/// `handle_duplicates` and `check_interrupts` are optional and stored as
/// trait objects since they sit off the hottest inner loop. `n_keys` is
/// always `sort_keys.len()` and is bounded below at construction: mk qsort
/// needs at least two sort keys, or the caller should route to a scalar
/// quicksort instead (a Non-goal of this crate, not something it silently
/// degrades into).
pub struct SortState<'s, A: TupleAccessor> {
    pub(crate) n_keys: usize,
    pub(crate) sort_keys: &'s [SortKey],
    pub(crate) leading_kind: LeadingKind,
    pub(crate) accessor: &'s A,
    pub(crate) handle_duplicates: Option<&'s mut dyn DuplicateHandler<A::Payload>>,
    pub(crate) check_interrupts: Option<&'s dyn Interrupts>,
}

impl<'s, A: TupleAccessor> SortState<'s, A> {
    /// Builds a new sort state. Panics if fewer than two sort keys are given;
    /// a single key has no "equal partition" to advance into and should be
    /// sorted with a scalar quicksort instead.
    pub fn new(sort_keys: &'s [SortKey], leading_kind: LeadingKind, accessor: &'s A) -> Self {
        assert!(
            sort_keys.len() >= 2,
            "multi-key quicksort requires at least two sort keys"
        );
        Self {
            n_keys: sort_keys.len(),
            sort_keys,
            leading_kind,
            accessor,
            handle_duplicates: None,
            check_interrupts: None,
        }
    }

    /// Registers a duplicate handler. When set, the small-N insertion-sort
    /// fallback is suppressed (it cannot identify equal runs or surface the
    /// null-observed flag) and the handler is invoked once per maximal equal
    /// run found at the deepest key.
    pub fn with_duplicate_handler(
        mut self,
        handler: &'s mut dyn DuplicateHandler<A::Payload>,
    ) -> Self {
        self.handle_duplicates = Some(handler);
        self
    }

    /// Registers a cancellation probe, checked at the top of every recursive
    /// entry and once per outer partition loop iteration.
    pub fn with_interrupts(mut self, interrupts: &'s dyn Interrupts) -> Self {
        self.check_interrupts = Some(interrupts);
        self
    }

    pub fn n_keys(&self) -> usize {
        self.n_keys
    }

    pub fn sort_keys(&self) -> &[SortKey] {
        self.sort_keys
    }

    pub fn leading_kind(&self) -> LeadingKind {
        self.leading_kind
    }
}
