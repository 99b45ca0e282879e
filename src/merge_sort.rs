// Purpose: Parallel merge sort over a contiguous slice.

use std::cmp::Ordering;

use crate::fork_join::{self, ParallelDepth};

/// Sorts `v` in ascending order. Stability is not guaranteed.
pub fn merge_sort<T>(v: &mut [T])
where
    T: Ord + Clone + Send,
{
    merge_sort_with(v, ParallelDepth::Auto, T::cmp);
}

pub fn merge_sort_by<T, F>(v: &mut [T], compare: F)
where
    T: Clone + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    merge_sort_with(v, ParallelDepth::Auto, compare);
}

/// Merge sort with an explicit fork ceiling.
///
/// Each level copies its range into a scratch buffer, sorts the two halves
/// of the scratch (in parallel while the depth is within the ceiling) and
/// merges them back into `v`.
pub fn merge_sort_with<T, F>(v: &mut [T], depth: ParallelDepth, compare: F)
where
    T: Clone + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    let ceiling = depth.ceiling(v.len());
    sort_range(v, &compare, ceiling, 0);
}

fn sort_range<T, F>(v: &mut [T], compare: &F, ceiling: Option<usize>, depth: usize)
where
    T: Clone + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    if v.len() < 2 {
        return;
    }

    let mut scratch = v.to_vec();
    let mid = scratch.len() / 2;
    let (left, right) = scratch.split_at_mut(mid);

    let fork = ceiling.is_some_and(|max| depth <= max);
    fork_join::join(
        fork,
        || sort_range(&mut *left, compare, ceiling, depth + 1),
        || sort_range(&mut *right, compare, ceiling, depth + 1),
    );

    merge_into(left, right, v, compare);
}

// Writes the merge of two sorted runs into `out`; equal keys come from `left` first.
fn merge_into<T, F>(left: &[T], right: &[T], out: &mut [T], compare: &F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    debug_assert_eq!(left.len() + right.len(), out.len());

    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        let take_right =
            j < right.len() && (i == left.len() || compare(&right[j], &left[i]) == Ordering::Less);
        if take_right {
            *slot = right[j].clone();
            j += 1;
        } else {
            *slot = left[i].clone();
            i += 1;
        }
    }
}
