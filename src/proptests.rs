//! Property-based tests for the deque and the sorts using proptest
//!
//! The deque is checked against `std::collections::VecDeque` as a model; the
//! sorts against `slice::sort`.

use crate::{
    DequeError, GrowthPolicy, ParallelDepth, RingDeque, merge_sort, merge_sort_with, quick_sort,
    quick_sort_with,
};
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    PushBack(i32),
    PushFront(i32),
    PopBack,
    PopFront,
    Reserve(usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::PushBack),
        4 => any::<i32>().prop_map(Op::PushFront),
        2 => Just(Op::PopBack),
        2 => Just(Op::PopFront),
        1 => (0usize..64).prop_map(Op::Reserve),
        1 => Just(Op::Clear),
    ]
}

fn as_vec(deque: &RingDeque<i32>) -> Vec<i32> {
    (0..deque.len()).map(|i| deque[i]).collect()
}

/// Property: the deque behaves like VecDeque under any operation sequence
#[cfg(test)]
mod deque_properties {
    use super::*;

    proptest! {
        #[test]
        fn test_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let mut deque = RingDeque::new();
            let mut model = VecDeque::new();

            for op in ops {
                match op {
                    Op::PushBack(v) => {
                        deque.push_back(v).unwrap();
                        model.push_back(v);
                    }
                    Op::PushFront(v) => {
                        deque.push_front(v).unwrap();
                        model.push_front(v);
                    }
                    Op::PopBack => {
                        let expected = model
                            .pop_back()
                            .ok_or(DequeError::Empty { op: "pop_back" });
                        prop_assert_eq!(deque.pop_back(), expected);
                    }
                    Op::PopFront => {
                        let expected = model
                            .pop_front()
                            .ok_or(DequeError::Empty { op: "pop_front" });
                        prop_assert_eq!(deque.pop_front(), expected);
                    }
                    Op::Reserve(n) => {
                        let before = deque.capacity();
                        deque.reserve(n).unwrap();
                        prop_assert_eq!(deque.capacity(), before.max(n));
                    }
                    Op::Clear => {
                        let before = deque.capacity();
                        deque.clear();
                        model.clear();
                        prop_assert!(deque.is_empty());
                        prop_assert_eq!(deque.capacity(), before);
                    }
                }

                prop_assert!(deque.len() <= deque.capacity());
                prop_assert_eq!(deque.len(), model.len());
            }

            let expected: Vec<i32> = model.iter().copied().collect();
            prop_assert_eq!(as_vec(&deque), expected.clone());
            prop_assert_eq!(deque.iter().copied().collect::<Vec<_>>(), expected.clone());
            let reversed: Vec<i32> = expected.iter().rev().copied().collect();
            prop_assert_eq!(deque.iter().rev().copied().collect::<Vec<_>>(), reversed);
        }

        #[test]
        fn test_reserve_preserves_sequence(
            front in prop::collection::vec(any::<i32>(), 0..20),
            back in prop::collection::vec(any::<i32>(), 0..20),
            extra in 0usize..50
        ) {
            let mut deque = RingDeque::new();
            for &v in &back {
                deque.push_back(v).unwrap();
            }
            for &v in &front {
                deque.push_front(v).unwrap();
            }
            let before = as_vec(&deque);

            deque.reserve(deque.capacity() + extra).unwrap();

            prop_assert_eq!(as_vec(&deque), before);
        }

        #[test]
        fn test_push_back_pop_back_reverses(values in prop::collection::vec(any::<i32>(), 0..100)) {
            let mut deque = RingDeque::new();
            for &v in &values {
                deque.push_back(v).unwrap();
            }
            let mut popped = Vec::new();
            while let Ok(v) = deque.pop_back() {
                popped.push(v);
            }
            let mut expected = values.clone();
            expected.reverse();
            prop_assert_eq!(popped, expected);
        }

        #[test]
        fn test_push_back_pop_front_preserves_order(values in prop::collection::vec(any::<i32>(), 0..100)) {
            let mut deque = RingDeque::new();
            for &v in &values {
                deque.push_back(v).unwrap();
            }
            let drained: Vec<i32> = std::iter::from_fn(|| deque.pop_front().ok()).collect();
            prop_assert_eq!(drained, values);
        }

        #[test]
        fn test_clone_is_independent(
            values in prop::collection::vec(any::<i32>(), 1..50),
            extra in any::<i32>()
        ) {
            let original: RingDeque<i32> = values.iter().copied().collect();
            let mut copy = original.clone();
            copy.push_front(extra).unwrap();
            let bumped = copy[1].wrapping_add(1);
            copy[1] = bumped;

            prop_assert_eq!(as_vec(&original), values);
        }

        #[test]
        fn test_fixed_never_exceeds_capacity(
            capacity in 0usize..16,
            values in prop::collection::vec(any::<i32>(), 0..40)
        ) {
            let mut deque = RingDeque::fixed(capacity);
            let mut accepted = 0;
            for v in values {
                match deque.push_back(v) {
                    Ok(()) => accepted += 1,
                    Err(err) => {
                        prop_assert_eq!(err, DequeError::CapacityExceeded { capacity });
                    }
                }
            }
            prop_assert_eq!(deque.len(), accepted);
            prop_assert!(deque.len() <= capacity);
            prop_assert_eq!(deque.capacity(), capacity);
            prop_assert_eq!(deque.growth_policy(), GrowthPolicy::Disabled);
        }

        #[test]
        fn test_display_lists_elements(values in prop::collection::vec(-100i32..100, 0..20)) {
            let deque = RingDeque::from(values.clone());
            let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            prop_assert_eq!(deque.to_string(), format!("[{}]", joined.join(", ")));
        }
    }
}

/// Property: both sorts produce the sorted permutation of their input
#[cfg(test)]
mod sort_properties {
    use super::*;

    proptest! {
        #[test]
        fn test_merge_sort_matches_std(mut values in prop::collection::vec(any::<i32>(), 0..500)) {
            let mut expected = values.clone();
            expected.sort();
            merge_sort(&mut values);
            prop_assert_eq!(values, expected);
        }

        #[test]
        fn test_quick_sort_matches_std(mut values in prop::collection::vec(any::<i32>(), 0..500)) {
            let mut expected = values.clone();
            expected.sort();
            quick_sort(&mut values);
            prop_assert_eq!(values, expected);
        }

        #[test]
        fn test_sorts_with_duplicates(
            values in prop::collection::vec(0u8..4, 0..300),
            depth in prop_oneof![
                Just(ParallelDepth::Auto),
                Just(ParallelDepth::Sequential),
                (0usize..4).prop_map(ParallelDepth::Fixed),
            ]
        ) {
            let mut expected = values.clone();
            expected.sort();

            let mut merged = values.clone();
            merge_sort_with(&mut merged, depth, u8::cmp);
            prop_assert_eq!(&merged, &expected);

            let mut quick = values;
            quick_sort_with(&mut quick, depth, u8::cmp);
            prop_assert_eq!(&quick, &expected);
        }
    }
}
