//! The recursive driver: pre-order short-circuit, small-N insertion
//! sort, three-way partition, and the three recursive calls — one of which
//! advances key depth instead of shrinking the slice.

use std::cmp::Ordering;

use crate::accessor::TupleAccessor;
use crate::comparator::{compare_datum, compare_range};
use crate::core::{LeadingKind, SortState, SortTuple};
use crate::error::Result;
use crate::partition::{partition, PartitionSizes};

/// Entry point: permutes `array` into non-decreasing order by the
/// configured sort-key sequence.
///
/// On completion either the array is sorted or cancellation was raised from
/// `check_interrupts`; in the latter case `array` holds an unspecified
/// permutation of its original contents (the multiset of tuples is still
/// intact).
pub fn mk_qsort_tuple<A: TupleAccessor>(
    array: &mut [SortTuple<A::Payload>],
    state: &mut SortState<A>,
) -> Result<()> {
    debug_assert!(
        state.n_keys() >= 2,
        "multi-key quicksort requires at least two sort keys; route single-key \
         input to a scalar quicksort instead"
    );
    mk_qsort_recursive(array, 0, state, false)
}

fn mk_qsort_recursive<A: TupleAccessor>(
    x: &mut [SortTuple<A::Payload>],
    depth: usize,
    state: &mut SortState<A>,
    seen_null: bool,
) -> Result<()> {
    let n = x.len();

    if n <= 1 || depth == state.n_keys() {
        return Ok(());
    }

    log::trace!("mk_qsort_tuple: depth={depth} n={n}");

    if let Some(interrupts) = state.check_interrupts {
        interrupts.check()?;
    }

    if pre_ordered(x, depth, state)? {
        return Ok(());
    }

    if n < 16 && state.handle_duplicates.is_none() {
        log::debug!("mk_qsort_tuple: insertion-sort fallback depth={depth} n={n}");
        insertion_sort(x, depth, state)?;
        return Ok(());
    }

    let PartitionSizes { less, equal, .. } = partition(x, depth, state)?;

    mk_qsort_recursive(&mut x[..less], depth, state, seen_null)?;

    let (_, rest) = x.split_at_mut(less);
    let (equal_slice, greater_slice) = rest.split_at_mut(equal);

    let depth_null = is_null_at(&equal_slice[0], depth, state)?;
    let seen_null_below = seen_null || depth_null;

    if depth < state.n_keys() - 1 {
        mk_qsort_recursive(equal_slice, depth + 1, state, seen_null_below)?;
    } else if equal_slice.len() > 1 {
        if let Some(handler) = state.handle_duplicates.as_mut() {
            log::debug!(
                "mk_qsort_tuple: handle_duplicates len={} seen_null={}",
                equal_slice.len(),
                seen_null_below
            );
            handler.handle_duplicates(equal_slice, seen_null_below)?;
        }
    }

    mk_qsort_recursive(greater_slice, depth, state, seen_null)?;

    debug_assert!(verify_sorted(x, depth, state)?);

    Ok(())
}

/// The pre-order short-circuit.
///
/// Non-`Generic` leading kinds get a full-tuple check at depth 0 only (a
/// specialized comparator makes comparing whole tuples cheap, and it can
/// accept non-strict increase because ties there are already resolved by
/// deeper keys). `Generic` has no cheap full-tuple comparator, so it checks
/// *this* depth only, and must require strict increase: an equal-at-this-
/// depth neighbor pair has not yet been resolved by deeper keys and cannot
/// be allowed to short-circuit the recursion.
fn pre_ordered<A: TupleAccessor>(
    x: &[SortTuple<A::Payload>],
    depth: usize,
    state: &SortState<A>,
) -> Result<bool> {
    let n = x.len();

    if state.leading_kind() != LeadingKind::Generic {
        debug_assert_ne!(state.leading_kind(), LeadingKind::Generic);
        if depth != 0 {
            return Ok(false);
        }
        for i in 0..n - 1 {
            if let Some(interrupts) = state.check_interrupts {
                interrupts.check()?;
            }
            if compare_range(&x[i], &x[i + 1], 0, state)? == Ordering::Greater {
                return Ok(false);
            }
        }
        log::debug!("mk_qsort_tuple: full-tuple pre-order short-circuit n={n}");
        Ok(true)
    } else {
        for i in 0..n - 1 {
            if let Some(interrupts) = state.check_interrupts {
                interrupts.check()?;
            }
            if compare_datum(&x[i], &x[i + 1], depth, state)? != Ordering::Less {
                return Ok(false);
            }
        }
        log::debug!("mk_qsort_tuple: strict pre-order short-circuit depth={depth} n={n}");
        Ok(true)
    }
}

/// Fallback for small partitions. Disabled whenever a duplicate
/// handler is registered: comparing by full range up front cannot identify
/// equal runs, and cannot surface the null-observed flag the handler needs.
fn insertion_sort<A: TupleAccessor>(
    x: &mut [SortTuple<A::Payload>],
    depth: usize,
    state: &SortState<A>,
) -> Result<()> {
    let n = x.len();
    for i in 1..n {
        let mut j = i;
        while j > 0 {
            if compare_range(&x[j - 1], &x[j], depth, state)? != Ordering::Greater {
                break;
            }
            x.swap(j, j - 1);
            j -= 1;
        }
    }
    Ok(())
}

/// Checks whether the representative tuple of an equal run is NULL at
/// `depth`; any tuple in the run suffices since all are equal there.
fn is_null_at<A: TupleAccessor>(
    t: &SortTuple<A::Payload>,
    depth: usize,
    state: &SortState<A>,
) -> Result<bool> {
    if depth == 0 {
        return Ok(t.isnull1);
    }
    let (_, isnull) = state.accessor.get_datum(t, depth)?;
    Ok(isnull)
}

/// Debug-only verification: confirms the slice is non-decreasing at
/// `depth` after the recursive driver returns. The `debug_assert!` wrapping
/// the call is what makes this a no-op outside assertion builds.
fn verify_sorted<A: TupleAccessor>(
    x: &[SortTuple<A::Payload>],
    depth: usize,
    state: &SortState<A>,
) -> Result<bool> {
    for i in 0..x.len().saturating_sub(1) {
        if compare_datum(&x[i], &x[i + 1], depth, state)? == Ordering::Greater {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::TupleAccessor;
    use crate::core::{NullOrder, SortKey, SortOrder};
    use std::cmp::Ordering;

    /// Sorts `(i64, i64)` pairs by key 0 then key 1, both ascending,
    /// nulls-last, no abbreviation — the configuration used by the
    /// end-to-end scenarios.
    struct PairAccessor {
        rows: Vec<(i64, i64)>,
    }

    impl TupleAccessor for PairAccessor {
        type Payload = usize;

        fn get_datum(&self, tuple: &SortTuple<usize>, depth: usize) -> Result<(u64, bool)> {
            let row = self.rows[tuple.payload];
            let v = if depth == 0 { row.0 } else { row.1 };
            Ok((v as u64, false))
        }

        fn apply_generic(
            &self,
            d1: u64,
            n1: bool,
            d2: u64,
            n2: bool,
            key: &SortKey,
        ) -> Result<Ordering> {
            Ok(crate::comparator::apply_signed(d1, n1, d2, n2, key))
        }

        fn apply_abbrev_full(
            &self,
            _d1: u64,
            _n1: bool,
            _d2: u64,
            _n2: bool,
            _key: &SortKey,
        ) -> Result<Ordering> {
            unreachable!("this accessor never abbreviates")
        }
    }

    fn build(rows: Vec<(i64, i64)>) -> (PairAccessor, Vec<SortTuple<usize>>) {
        let tuples = rows
            .iter()
            .enumerate()
            .map(|(i, &(k0, _))| SortTuple::new(k0 as u64, false, i))
            .collect();
        (PairAccessor { rows }, tuples)
    }

    fn sorted_pairs(accessor: &PairAccessor, tuples: &[SortTuple<usize>]) -> Vec<(i64, i64)> {
        tuples.iter().map(|t| accessor.rows[t.payload]).collect()
    }

    #[test]
    fn scenario_equals_folding() {
        let (accessor, mut tuples) = build(vec![(2, 1), (1, 2), (2, 1), (1, 1)]);
        let keys = [
            SortKey::new(SortOrder::Ascending, NullOrder::Last),
            SortKey::new(SortOrder::Ascending, NullOrder::Last),
        ];
        let mut state = SortState::new(&keys, LeadingKind::Signed, &accessor);
        mk_qsort_tuple(&mut tuples, &mut state).unwrap();
        assert_eq!(
            sorted_pairs(&accessor, &tuples),
            vec![(1, 1), (1, 2), (2, 1), (2, 1)]
        );
    }

    #[test]
    fn scenario_reversed_insertion_sort_fallback() {
        let (accessor, mut tuples) = build(vec![(5, 5), (4, 4), (3, 3), (2, 2), (1, 1)]);
        let keys = [
            SortKey::new(SortOrder::Ascending, NullOrder::Last),
            SortKey::new(SortOrder::Ascending, NullOrder::Last),
        ];
        let mut state = SortState::new(&keys, LeadingKind::Signed, &accessor);
        mk_qsort_tuple(&mut tuples, &mut state).unwrap();
        assert_eq!(
            sorted_pairs(&accessor, &tuples),
            vec![(1, 1), (2, 2), (3, 3), (4, 4), (5, 5)]
        );
    }

    #[test]
    fn boundary_empty_and_singleton() {
        let (accessor, mut tuples) = build(vec![]);
        let keys = [
            SortKey::new(SortOrder::Ascending, NullOrder::Last),
            SortKey::new(SortOrder::Ascending, NullOrder::Last),
        ];
        let mut state = SortState::new(&keys, LeadingKind::Signed, &accessor);
        mk_qsort_tuple(&mut tuples, &mut state).unwrap();
        assert!(tuples.is_empty());

        let (accessor, mut tuples) = build(vec![(1, 1)]);
        let mut state = SortState::new(&keys, LeadingKind::Signed, &accessor);
        mk_qsort_tuple(&mut tuples, &mut state).unwrap();
        assert_eq!(sorted_pairs(&accessor, &tuples), vec![(1, 1)]);
    }
}
