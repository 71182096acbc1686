//! Collaborator interfaces: the typed callbacks the core invokes into
//! the surrounding tuple-sort engine.
//!
//! [`TupleAccessor`] is the one required collaborator and sits on the hot
//! path, so it is a type parameter resolved at monomorphization time rather
//! than a trait object, letting the compiler inline comparisons through it.
//! [`DuplicateHandler`] and
//! [`Interrupts`] are called at most `O(log n)` and `O(n)` times respectively
//! per sort and are stored as trait objects in [`crate::core`]'s sort state,
//! since their call sites don't benefit from inlining the way the inner
//! comparison loop does.

use std::cmp::Ordering;

use crate::core::{Datum, SortKey, SortTuple};
use crate::error::Result;

/// Extracts key values from tuples at a given sort-key depth, and supplies
/// the comparators the core cannot provide itself because they require
/// domain knowledge of the stored value (deserializing a row, resolving an
/// abbreviation, applying a collation).
///
/// Implementations must be pure with respect to the array being sorted: they
/// may read tuples but must not reorder, insert, delete, or retain references
/// to them past the call.
pub trait TupleAccessor {
    /// Opaque per-row handle stored in [`SortTuple::payload`].
    type Payload: Copy;

    /// Extracts `(datum, is_null)` for one tuple at `depth`.
    ///
    /// Called only for `depth > 0` (the tiebreak path) or for `depth == 0`
    /// when the full, non-abbreviated leading value is needed.
    fn get_datum(&self, tuple: &SortTuple<Self::Payload>, depth: usize) -> Result<(Datum, bool)>;

    /// Two-tuple form of [`Self::get_datum`], letting implementations share
    /// row deserialization work between `t1` and `t2`.
    ///
    /// The default forwards to two independent calls; override it when
    /// fetching both datums at once is cheaper than fetching them one at a
    /// time (e.g. both rows live in the same decoded page).
    fn get_datum_pair(
        &self,
        t1: &SortTuple<Self::Payload>,
        t2: &SortTuple<Self::Payload>,
        depth: usize,
    ) -> Result<(Datum, bool, Datum, bool)> {
        let (d1, n1) = self.get_datum(t1, depth)?;
        let (d2, n2) = self.get_datum(t2, depth)?;
        Ok((d1, n1, d2, n2))
    }

    /// Generic comparator for `sort_keys[depth]`, honoring direction and
    /// null placement. Used for every depth when [`crate::core::LeadingKind`]
    /// is `Generic`, and for every depth beyond 0 regardless of
    /// `LeadingKind`.
    fn apply_generic(
        &self,
        d1: Datum,
        n1: bool,
        d2: Datum,
        n2: bool,
        key: &SortKey,
    ) -> Result<Ordering>;

    /// Resolver used only at `depth == 0` when `sort_keys[0].abbrev_converter`
    /// is set: equal abbreviations do not imply equal originals, so this
    /// must consult the full leading-key value.
    fn apply_abbrev_full(
        &self,
        d1: Datum,
        n1: bool,
        d2: Datum,
        n2: bool,
        key: &SortKey,
    ) -> Result<Ordering>;
}

/// Invoked at most once per maximal equal run at the deepest configured key
/// (`depth == n_keys - 1`), typically to enforce uniqueness or apply an
/// external tiebreak rule.
///
/// `seen_null` is true iff any key above the deepest key was NULL somewhere
/// in the run.
pub trait DuplicateHandler<P: Copy> {
    fn handle_duplicates(
        &mut self,
        run: &mut [SortTuple<P>],
        seen_null: bool,
    ) -> Result<()>;
}

/// Cancellation probe, checked at the top of every recursive entry and once
/// per outer partition loop iteration.
pub trait Interrupts {
    fn check(&self) -> Result<()>;
}
