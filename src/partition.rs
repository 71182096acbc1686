//! Three-way Bentley–McIlroy partition.
//!
//! Groups a slice into `< pivot`, `== pivot` (at the current key depth), and
//! `> pivot`, in place. Equal elements are accumulated at both edges of the
//! working range during the scan, then folded into the middle with two
//! block swaps once the scan completes.

use std::cmp::Ordering;

use crate::accessor::TupleAccessor;
use crate::comparator::compare_datum;
use crate::core::{SortState, SortTuple};
use crate::error::Result;
use crate::pivot::choose_pivot;

/// Sizes of the three regions a partition call produces, in order.
pub struct PartitionSizes {
    pub less: usize,
    pub equal: usize,
    pub greater: usize,
}

#[inline]
fn swap<T>(x: &mut [T], a: usize, b: usize) {
    if a != b {
        x.swap(a, b);
    }
}

/// Swaps `size` consecutive elements starting at `a` with `size` consecutive
/// elements starting at `b`.
#[inline]
fn vec_swap<T>(x: &mut [T], a: usize, b: usize, size: usize) {
    for i in 0..size {
        swap(x, a + i, b + i);
    }
}

/// Partitions `x` around a chosen pivot at `depth`, returning the sizes of
/// the resulting `[less | equal | greater]` layout.
///
/// `x.len()` must be at least 2; the caller (the recursive driver) only
/// reaches this once the small-N and pre-order paths have been ruled out.
pub fn partition<A: TupleAccessor>(
    x: &mut [SortTuple<A::Payload>],
    depth: usize,
    state: &mut SortState<A>,
) -> Result<PartitionSizes> {
    let n = x.len();
    debug_assert!(n > 1);

    let pivot_idx = choose_pivot::<A>(x, depth, state)?;
    swap(x, 0, pivot_idx);
    let pivot = x[0];

    let mut less_start = 1usize;
    let mut less_end = 1usize;
    let mut greater_start = n - 1;
    let mut greater_end = n - 1;

    loop {
        if let Some(interrupts) = state.check_interrupts {
            interrupts.check()?;
        }

        while less_end <= greater_start {
            let dist = compare_datum(&x[less_end], &pivot, depth, state)?;
            if dist == Ordering::Greater {
                break;
            }
            if dist == Ordering::Equal {
                swap(x, less_end, less_start);
                less_start += 1;
            }
            less_end += 1;
        }

        while less_end <= greater_start {
            let dist = compare_datum(&x[greater_start], &pivot, depth, state)?;
            if dist == Ordering::Less {
                break;
            }
            if dist == Ordering::Equal {
                swap(x, greater_start, greater_end);
                greater_end -= 1;
            }
            greater_start -= 1;
        }

        if less_end > greater_start {
            break;
        }
        swap(x, less_end, greater_start);
        less_end += 1;
        greater_start -= 1;
    }

    // Layout is now [left_equals | less | greater | right_equals] with
    // greater_start < less_end. Fold the edge-equals regions to the middle.
    let left_equals = less_start.min(less_end - less_start);
    vec_swap(x, 0, less_end - left_equals, left_equals);

    let right_equals = (greater_end - greater_start).min(n - greater_end - 1);
    vec_swap(x, less_end, n - right_equals, right_equals);

    let less = less_end - less_start;
    let equal = less_start + n - greater_end - 1;
    let greater = greater_end - greater_start;

    debug_assert_eq!(less + equal + greater, n);

    Ok(PartitionSizes { less, equal, greater })
}
