//! Comparator dispatch and the range comparator.
//!
//! `apply_unsigned`/`apply_signed`/`apply_int32` are purely mechanical given
//! a `Datum` bit pattern plus direction/null-placement metadata, so — unlike
//! `apply_generic` and `apply_abbrev_full`, which need domain knowledge of
//! the stored value — they live here as free functions rather than methods a
//! collaborator must implement. See DESIGN.md for the rationale.

use std::cmp::Ordering;

use crate::accessor::TupleAccessor;
use crate::core::{Datum, NullOrder, SortKey, SortOrder, SortState, SortTuple};
use crate::error::Result;

#[inline]
fn compare_with_nulls(
    value_cmp: impl FnOnce() -> Ordering,
    n1: bool,
    n2: bool,
    key: &SortKey,
) -> Ordering {
    match (n1, n2) {
        (true, true) => Ordering::Equal,
        (true, false) => {
            if key.null_order == NullOrder::First {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (false, true) => {
            if key.null_order == NullOrder::First {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (false, false) => {
            let ord = value_cmp();
            if key.order == SortOrder::Descending {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}

/// Compares `datum1` values as unsigned 64-bit integers.
#[inline]
pub fn apply_unsigned(d1: Datum, n1: bool, d2: Datum, n2: bool, key: &SortKey) -> Ordering {
    compare_with_nulls(|| d1.cmp(&d2), n1, n2, key)
}

/// Compares `datum1` values as signed 64-bit integers (bit-reinterpreted).
#[inline]
pub fn apply_signed(d1: Datum, n1: bool, d2: Datum, n2: bool, key: &SortKey) -> Ordering {
    compare_with_nulls(|| (d1 as i64).cmp(&(d2 as i64)), n1, n2, key)
}

/// Compares `datum1` values as signed 32-bit integers held in the low 32 bits.
#[inline]
pub fn apply_int32(d1: Datum, n1: bool, d2: Datum, n2: bool, key: &SortKey) -> Ordering {
    compare_with_nulls(
        || (d1 as u32 as i32).cmp(&(d2 as u32 as i32)),
        n1,
        n2,
        key,
    )
}

/// Compares the leading key only, dispatching on `leading_kind`
/// ("shortcut compare").
#[inline]
fn shortcut_compare<A: TupleAccessor>(
    t1: &SortTuple<A::Payload>,
    t2: &SortTuple<A::Payload>,
    state: &SortState<A>,
) -> Result<Ordering> {
    use crate::core::LeadingKind;

    let key0 = &state.sort_keys[0];
    Ok(match state.leading_kind {
        LeadingKind::Unsigned => apply_unsigned(t1.datum1, t1.isnull1, t2.datum1, t2.isnull1, key0),
        LeadingKind::Signed => apply_signed(t1.datum1, t1.isnull1, t2.datum1, t2.isnull1, key0),
        LeadingKind::Int32 => apply_int32(t1.datum1, t1.isnull1, t2.datum1, t2.isnull1, key0),
        LeadingKind::Generic => {
            return state
                .accessor
                .apply_generic(t1.datum1, t1.isnull1, t2.datum1, t2.isnull1, key0);
        }
    })
}

/// Compares two tuples at `depth` with tiebreak.
///
/// At `depth == 0` this only resolves the full leading value when the
/// shortcut ties *and* the key is abbreviated; a non-abbreviated tie at
/// depth 0 returns `Equal` immediately, since `datum1` is then already the
/// true value.
pub fn compare_datum<A: TupleAccessor>(
    t1: &SortTuple<A::Payload>,
    t2: &SortTuple<A::Payload>,
    depth: usize,
    state: &SortState<A>,
) -> Result<Ordering> {
    if depth == 0 {
        let ret = shortcut_compare(t1, t2, state)?;
        if ret != Ordering::Equal {
            return Ok(ret);
        }
        if !state.sort_keys[0].abbrev_converter {
            return Ok(Ordering::Equal);
        }
    }

    let (d1, n1, d2, n2) = state.accessor.get_datum_pair(t1, t2, depth)?;

    if depth == 0 && state.sort_keys[0].abbrev_converter {
        state.accessor.apply_abbrev_full(d1, n1, d2, n2, &state.sort_keys[0])
    } else {
        state.accessor.apply_generic(d1, n1, d2, n2, &state.sort_keys[depth])
    }
}

/// Compares two tuples across every key from `depth` to `n_keys - 1`,
/// returning the first non-zero result or `Equal`.
///
/// Used by the small-N insertion sort and by the full-tuple pre-order check,
/// where comparing the whole tuple up front is cheaper than re-entering the
/// per-depth machinery for each adjacent pair.
pub fn compare_range<A: TupleAccessor>(
    t1: &SortTuple<A::Payload>,
    t2: &SortTuple<A::Payload>,
    depth: usize,
    state: &SortState<A>,
) -> Result<Ordering> {
    let mut depth = depth;

    if depth == 0 {
        let ret = shortcut_compare(t1, t2, state)?;
        if ret != Ordering::Equal {
            return Ok(ret);
        }

        if state.sort_keys[0].abbrev_converter {
            let (d1, n1, d2, n2) = state.accessor.get_datum_pair(t1, t2, 0)?;
            let ret = state
                .accessor
                .apply_abbrev_full(d1, n1, d2, n2, &state.sort_keys[0])?;
            if ret != Ordering::Equal {
                return Ok(ret);
            }
        }

        depth = 1;
    }

    while depth < state.n_keys {
        let (d1, n1, d2, n2) = state.accessor.get_datum_pair(t1, t2, depth)?;
        let ret = state
            .accessor
            .apply_generic(d1, n1, d2, n2, &state.sort_keys[depth])?;
        if ret != Ordering::Equal {
            return Ok(ret);
        }
        depth += 1;
    }

    Ok(Ordering::Equal)
}
