//! Pivot selection: median-of-three, escalating to a ninther
//! (median-of-medians-of-three) for larger partitions.

use crate::accessor::TupleAccessor;
use crate::comparator::compare_datum;
use crate::core::{SortState, SortTuple};
use crate::error::Result;

/// Returns the median of the three indexed elements at `depth`, using
/// `compare_datum` for every comparison.
fn median_of_three<A: TupleAccessor>(
    x: &[SortTuple<A::Payload>],
    a: usize,
    b: usize,
    c: usize,
    depth: usize,
    state: &SortState<A>,
) -> Result<usize> {
    let ab = compare_datum(&x[a], &x[b], depth, state)?;
    let bc = compare_datum(&x[b], &x[c], depth, state)?;

    if ab.is_lt() {
        if bc.is_lt() {
            Ok(b)
        } else {
            let ac = compare_datum(&x[a], &x[c], depth, state)?;
            Ok(if ac.is_lt() { c } else { a })
        }
    } else if bc.is_gt() {
        Ok(b)
    } else {
        let ac = compare_datum(&x[a], &x[c], depth, state)?;
        Ok(if ac.is_lt() { a } else { c })
    }
}

/// Chooses a pivot index into `x` for a partition at `depth`:
///
/// - `n <= 7`: the middle index.
/// - `7 < n <= 40`: median-of-three over `{0, n/2, n-1}`.
/// - `n > 40`: ninther — median of three medians-of-three drawn from equally
///   spaced triples in the left, middle, and right thirds.
pub fn choose_pivot<A: TupleAccessor>(
    x: &[SortTuple<A::Payload>],
    depth: usize,
    state: &SortState<A>,
) -> Result<usize> {
    let n = x.len();

    if n <= 7 {
        return Ok(n / 2);
    }

    let mut l = 0;
    let mut m = n / 2;
    let mut r = n - 1;

    if n > 40 {
        let d = n / 8;
        l = median_of_three::<A>(x, l, l + d, l + 2 * d, depth, state)?;
        m = median_of_three::<A>(x, m - d, m, m + d, depth, state)?;
        r = median_of_three::<A>(x, r - 2 * d, r - d, r, depth, state)?;
    }

    median_of_three::<A>(x, l, m, r, depth, state)
}
