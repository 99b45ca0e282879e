// Purpose: Parallel in-place quicksort over a contiguous slice.

use std::cmp::Ordering;

use crate::fork_join::{self, ParallelDepth};

/// Sorts `v` in ascending order, in place. Not stable.
///
/// The pivot is the element at the middle position, so sorted and
/// adversarial inputs get no protection from quadratic behavior.
pub fn quick_sort<T>(v: &mut [T])
where
    T: Ord + Clone + Send,
{
    quick_sort_with(v, ParallelDepth::Auto, T::cmp);
}

pub fn quick_sort_by<T, F>(v: &mut [T], compare: F)
where
    T: Clone + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    quick_sort_with(v, ParallelDepth::Auto, compare);
}

/// Quicksort with an explicit fork ceiling. The two partitions are disjoint
/// subslices, so forked halves never share memory.
pub fn quick_sort_with<T, F>(v: &mut [T], depth: ParallelDepth, compare: F)
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

    let boundary = partition(v, compare);
    let (left, right) = v.split_at_mut(boundary);

    let fork = ceiling.is_some_and(|max| depth <= max);
    fork_join::join(
        fork,
        || sort_range(left, compare, ceiling, depth + 1),
        || sort_range(right, compare, ceiling, depth + 1),
    );
}

/// Hoare partition around a copy of the middle element.
///
/// Two cursors converge from both ends, swapping out-of-order pairs. Returns
/// where the left cursor stopped: everything before it compares `<=` the
/// pivot and everything from it on compares `>=`. For `v.len() >= 2` the
/// result lies in `1..v.len()`, so both sides shrink.
pub(crate) fn partition<T, F>(v: &mut [T], compare: &F) -> usize
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    debug_assert!(v.len() >= 2);

    let is_less = |a: &T, b: &T| compare(a, b) == Ordering::Less;
    let pivot = v[v.len() / 2].clone();

    let mut left = 0;
    let mut right = v.len() - 1;
    loop {
        while is_less(&v[left], &pivot) {
            left += 1;
        }
        while is_less(&pivot, &v[right]) {
            right -= 1;
        }

        if left < right {
            v.swap(left, right);
            left += 1;
            right -= 1;
        } else {
            break;
        }
    }
    left
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_input() {
        let mut v = vec![42, -9, 15, 3, -21];
        quick_sort(&mut v);
        assert_eq!(v, vec![-21, -9, 3, 15, 42]);
    }

    #[test]
    fn test_partition_example() {
        let mut v = vec![42, -9, 15, 3, -21];
        let boundary = partition(&mut v, &i32::cmp);
        assert_eq!(boundary, 3);
        assert_eq!(v, vec![-21, -9, 3, 15, 42]);
    }

    #[test]
    fn test_partition_two_elements() {
        let mut v = vec![2, 1];
        assert_eq!(partition(&mut v, &i32::cmp), 1);
        assert_eq!(v, vec![1, 2]);

        let mut v = vec![1, 2];
        assert_eq!(partition(&mut v, &i32::cmp), 1);
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn test_partition_splits_around_pivot() {
        let mut v = vec![5, 1, 9, 5, 5, 0, 7, 5, 3];
        let boundary = partition(&mut v, &i32::cmp);
        assert!(boundary > 0 && boundary < v.len());
        let (low, high) = v.split_at(boundary);
        let low_max = low.iter().max().unwrap();
        let high_min = high.iter().min().unwrap();
        assert!(low_max <= high_min);
    }

    #[test]
    fn test_short_inputs() {
        let mut empty: Vec<u8> = vec![];
        quick_sort(&mut empty);
        assert!(empty.is_empty());

        let mut one = vec![1];
        quick_sort(&mut one);
        assert_eq!(one, vec![1]);
    }

    #[test]
    fn test_all_equal() {
        let mut v = vec![4; 500];
        quick_sort(&mut v);
        assert_eq!(v, vec![4; 500]);
    }

    #[test]
    fn test_already_sorted_and_reversed() {
        let mut v: Vec<i32> = (0..1000).collect();
        quick_sort(&mut v);
        assert_eq!(v, (0..1000).collect::<Vec<_>>());

        let mut v: Vec<i32> = (0..1000).rev().collect();
        quick_sort(&mut v);
        assert_eq!(v, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn test_depth_settings_agree() {
        let input: Vec<i64> = (0..3000).map(|i| (i * 104_729) % 2003 - 1000).collect();
        let mut expected = input.clone();
        expected.sort();

        for depth in [
            ParallelDepth::Auto,
            ParallelDepth::Fixed(0),
            ParallelDepth::Fixed(5),
            ParallelDepth::Sequential,
        ] {
            let mut v = input.clone();
            quick_sort_with(&mut v, depth, i64::cmp);
            assert_eq!(v, expected, "{depth:?}");
        }
    }

    #[test]
    fn test_by_key() {
        let mut v = vec![("c", 3), ("a", 1), ("b", 2)];
        quick_sort_by(&mut v, |x, y| x.1.cmp(&y.1));
        assert_eq!(v, vec![("a", 1), ("b", 2), ("c", 3)]);
    }

    #[test]
    #[should_panic(expected = "comparator failed")]
    fn test_comparator_panic_reaches_caller() {
        let mut v: Vec<i32> = (0..64).collect();
        quick_sort_with(&mut v, ParallelDepth::Fixed(4), |a, b| {
            if *a == 60 || *b == 60 {
                panic!("comparator failed");
            }
            a.cmp(b)
        });
    }
}
