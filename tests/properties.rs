use mkqsort::accessor::TupleAccessor;
use mkqsort::comparator::apply_signed;
use mkqsort::core::{Datum, LeadingKind, NullOrder, SortKey, SortOrder, SortState, SortTuple};
use mkqsort::error::MkqsError;
use mkqsort::mk_qsort_tuple;
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

struct Rows(Vec<(i32, i32)>);

impl TupleAccessor for Rows {
    type Payload = usize;

    fn get_datum(&self, tuple: &SortTuple<usize>, depth: usize) -> Result<(Datum, bool), MkqsError> {
        let row = self.0[tuple.payload];
        let v = if depth == 0 { row.0 } else { row.1 };
        Ok((v as i64 as u64, false))
    }

    fn apply_generic(
        &self,
        d1: Datum,
        n1: bool,
        d2: Datum,
        n2: bool,
        key: &SortKey,
    ) -> Result<Ordering, MkqsError> {
        Ok(apply_signed(d1, n1, d2, n2, key))
    }

    fn apply_abbrev_full(
        &self,
        _d1: Datum,
        _n1: bool,
        _d2: Datum,
        _n2: bool,
        _key: &SortKey,
    ) -> Result<Ordering, MkqsError> {
        unreachable!("this harness never abbreviates")
    }
}

fn keys() -> [SortKey; 2] {
    [
        SortKey::new(SortOrder::Ascending, NullOrder::Last),
        SortKey::new(SortOrder::Ascending, NullOrder::Last),
    ]
}

fn run(rows: Vec<(i32, i32)>) -> (Rows, Vec<SortTuple<usize>>) {
    let n = rows.len();
    let accessor = Rows(rows.clone());
    let mut tuples: Vec<SortTuple<usize>> = (0..n)
        .map(|i| SortTuple::new(rows[i].0 as i64 as u64, false, i))
        .collect();
    let key_cfg = keys();
    let mut state = SortState::new(&key_cfg, LeadingKind::Signed, &accessor);
    mk_qsort_tuple(&mut tuples, &mut state).unwrap();
    (accessor, tuples)
}

proptest! {
    /// The output is a permutation of the input's row indices.
    #[test]
    fn permutation_preserved(rows in prop::collection::vec((-50i32..50, -50i32..50), 0..200)) {
        let n = rows.len();
        let (_, tuples) = run(rows);
        let mut payloads: Vec<usize> = tuples.iter().map(|t| t.payload).collect();
        payloads.sort_unstable();
        prop_assert_eq!(payloads, (0..n).collect::<Vec<_>>());
    }

    /// The output is non-decreasing by (key0, key1).
    #[test]
    fn output_is_ordered(rows in prop::collection::vec((-50i32..50, -50i32..50), 0..200)) {
        let (accessor, tuples) = run(rows);
        for w in tuples.windows(2) {
            let a = accessor.0[w[0].payload];
            let b = accessor.0[w[1].payload];
            prop_assert!(a <= b, "{:?} should not precede {:?}", a, b);
        }
    }

    /// Sorting an already-sorted array is a no-op on element order, and
    /// sorting twice yields the same permutation both times.
    #[test]
    fn idempotent_on_repeated_sort(rows in prop::collection::vec((-50i32..50, -50i32..50), 0..200)) {
        let (accessor, tuples) = run(rows);
        let sorted_once: Vec<(i32, i32)> = tuples.iter().map(|t| accessor.0[t.payload]).collect();

        let mut second_pass: Vec<SortTuple<usize>> = sorted_once
            .iter()
            .enumerate()
            .map(|(i, &(k0, _))| SortTuple::new(k0 as i64 as u64, false, i))
            .collect();
        let accessor2 = Rows(sorted_once.clone());
        let key_cfg = keys();
        let mut state2 = SortState::new(&key_cfg, LeadingKind::Signed, &accessor2);
        mk_qsort_tuple(&mut second_pass, &mut state2).unwrap();
        let sorted_twice: Vec<(i32, i32)> = second_pass.iter().map(|t| accessor2.0[t.payload]).collect();

        prop_assert_eq!(sorted_once, sorted_twice);
    }

    /// Sorting preserves the multiset of rows, not just the index permutation.
    #[test]
    fn multiset_preserved(rows in prop::collection::vec((-50i32..50, -50i32..50), 0..200)) {
        let original = rows.clone();
        let (accessor, tuples) = run(rows);
        let sorted: Vec<(i32, i32)> = tuples.iter().map(|t| accessor.0[t.payload]).collect();

        let mut before: HashMap<(i32, i32), usize> = HashMap::new();
        for r in &original {
            *before.entry(*r).or_default() += 1;
        }
        let mut after: HashMap<(i32, i32), usize> = HashMap::new();
        for r in &sorted {
            *after.entry(*r).or_default() += 1;
        }
        prop_assert_eq!(before, after);
    }
}
