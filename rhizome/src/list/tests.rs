use super::*;
use crate::util::trace_init;
use std::{vec, vec::Vec};

fn collect_vals(list: &List<i32>) -> Vec<i32> {
    list.iter().copied().collect()
}

fn list_from_iter(vals: impl IntoIterator<Item = i32>) -> List<i32> {
    let mut list = List::new().with_validation(Validation::Enabled);
    for val in vals {
        list.push_back(val).unwrap();
    }
    list.assert_valid();
    list
}


#[test]
fn list_is_send_sync() {
    crate::util::assert_send_sync::<List<i32>>();
    crate::util::assert_send_sync::<Position>();
}

#[test]
fn push_and_drain() {
    let _trace = trace_init();

    let mut list = List::new();
    assert!(list.is_empty());

    list.push_front(5).unwrap();
    list.push_front(7).unwrap();
    list.push_front(31).unwrap();
    list.assert_valid();

    assert_eq!(list.len(), 3);
    assert_eq!(collect_vals(&list), vec![31, 7, 5]);

    assert_eq!(list.pop_back(), Some(5));
    assert_eq!(list.pop_back(), Some(7));
    assert_eq!(list.pop_back(), Some(31));
    assert_eq!(list.pop_back(), None);
    assert!(list.is_empty());
    list.assert_valid();
}

#[test]
fn pop_front() {
    let _trace = trace_init();

    let mut list = List::new();
    list.push_back(5).unwrap();
    list.assert_valid();
    list.push_back(7).unwrap();
    list.assert_valid();
    list.push_back(31).unwrap();
    list.assert_valid();

    assert_eq!(list.front(), Some(&5));
    assert_eq!(list.back(), Some(&31));

    assert_eq!(list.pop_front(), Some(5));
    list.assert_valid();
    assert_eq!(list.pop_front(), Some(7));
    list.assert_valid();
    assert_eq!(list.pop_front(), Some(31));
    list.assert_valid();
    assert_eq!(list.pop_front(), None);
    assert_eq!(list.front(), None);
    assert_eq!(list.back(), None);
}

#[test]
fn push_pop_push_pop() {
    let _trace = trace_init();

    let mut list = List::new();
    list.push_back(1).unwrap();
    list.assert_valid();
    assert_eq!(list.pop_front(), Some(1));
    list.assert_valid();
    assert!(list.is_empty());

    list.push_front(2).unwrap();
    list.assert_valid();
    assert_eq!(list.pop_back(), Some(2));
    list.assert_valid();
    assert!(list.is_empty());
}

#[test]
fn insert_before_middle() {
    let _trace = trace_init();

    let mut list = list_from_iter([1, 3]);
    let three = list.next(list.begin());
    let two = list.insert_before(three, 2).unwrap();
    list.assert_valid();

    assert_eq!(collect_vals(&list), vec![1, 2, 3]);
    assert_eq!(list.get(two), Some(&2));
    assert_eq!(list.next(two), three);
    assert_eq!(list.prev(three), two);
}

#[test]
fn insert_before_end_appends() {
    let _trace = trace_init();

    let mut list = list_from_iter([1, 2]);
    let three = list.insert_before(list.end(), 3).unwrap();
    list.assert_valid();

    assert_eq!(collect_vals(&list), vec![1, 2, 3]);
    assert_eq!(list.next(three), list.end());
    assert_eq!(list.prev(list.end()), three);
}

#[test]
fn remove_returns_following_position() {
    let _trace = trace_init();

    let mut list = list_from_iter([1, 2, 3]);
    let two = list.next(list.begin());
    let three = list.next(two);

    let (val, next) = list.remove(two).unwrap();
    list.assert_valid();
    assert_eq!(val, 2);
    assert_eq!(next, three);
    assert_eq!(collect_vals(&list), vec![1, 3]);

    let (val, next) = list.remove(three).unwrap();
    list.assert_valid();
    assert_eq!(val, 3);
    assert_eq!(next, list.end());
}

#[test]
fn end_is_stable() {
    let _trace = trace_init();

    let mut list = List::new();
    let end = list.end();
    assert_eq!(list.begin(), end);

    list.push_back(1).unwrap();
    list.push_front(0).unwrap();
    assert_eq!(list.end(), end);

    list.clear();
    list.assert_valid();
    assert_eq!(list.end(), end);
    assert_eq!(list.begin(), end);
}

#[test]
fn end_position_navigation() {
    let _trace = trace_init();

    let list = list_from_iter([1, 2, 3]);
    let end = list.end();
    assert!(end.is_end());
    assert_eq!(list.get(end), None);
    assert_eq!(list.next(end), end);
    assert_eq!(list.get(list.prev(end)), Some(&3));
    assert_eq!(list.prev(list.begin()), end);
}

#[test]
fn iter_both_ends() {
    let list = list_from_iter([1, 2, 3, 4]);
    let mut iter = list.iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&4));
    assert_eq!(iter.next(), Some(&2));
    assert_eq!(iter.next_back(), Some(&3));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);

    assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
}

#[test]
fn range_stops_at_to() {
    let list = list_from_iter([1, 2, 3, 4, 5]);
    let from = list.next(list.begin());
    let to = list.next(list.next(list.next(from)));

    let vals = list.range(from, to).map(|(_, v)| *v).collect::<Vec<_>>();
    assert_eq!(vals, vec![2, 3, 4]);

    let positions = list.range(from, to).map(|(pos, _)| pos).collect::<Vec<_>>();
    assert_eq!(positions[0], from);
    assert_eq!(list.next(positions[2]), to);

    assert_eq!(list.range(from, from).count(), 0);
    assert_eq!(list.range(list.begin(), list.end()).count(), 5);
}

#[test]
fn get_mut_updates_in_place() {
    let mut list = list_from_iter([1, 2, 3]);
    let two = list.next(list.begin());
    *list.get_mut(two).unwrap() = 20;
    assert_eq!(collect_vals(&list), vec![1, 20, 3]);
    assert_eq!(list.get_mut(list.end()), None);
}

#[test]
fn bounded_list_fails_when_full() {
    let _trace = trace_init();

    let mut list = List::bounded(2).unwrap();
    assert_eq!(list.capacity_limit(), Some(2));
    list.push_back("a").unwrap();
    list.push_back("b").unwrap();

    let err = list.push_back("c").unwrap_err();
    assert_eq!(err.error(), &AllocError::Full { capacity: 2 });
    assert_eq!(err.into_inner(), "c");
    assert_eq!(list.len(), 2);
    list.assert_valid();

    // freeing a slot makes room again
    assert_eq!(list.pop_front(), Some("a"));
    list.push_back("c").unwrap();
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["b", "c"]);
}

#[test]
fn oversized_lists_fail_to_construct() {
    assert!(matches!(
        List::<u8>::bounded(usize::MAX),
        Err(AllocError::TooLarge { .. })
    ));
    assert!(matches!(
        List::<u8>::try_with_capacity(usize::MAX),
        Err(AllocError::TooLarge { .. })
    ));
}

#[test]
#[cfg(target_pointer_width = "64")]
fn arena_byte_overflow_is_a_reserve_error() {
    // the arena's byte size overflows `isize`, so the allocator is never asked.
    assert!(matches!(
        List::<[u8; 1 << 32]>::try_with_capacity(1 << 31),
        Err(AllocError::Reserve(_))
    ));
}

#[test]
fn clear_empties_list() {
    let _trace = trace_init();

    let mut list = list_from_iter([1, 2, 3]);
    let first = list.begin();
    list.clear();
    list.assert_valid();

    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert!(!list.contains(first));

    list.push_back(4).unwrap();
    list.assert_valid();
    assert_eq!(collect_vals(&list), vec![4]);
}

#[derive(Debug)]
enum Op {
    PushFront,
    PopBack,
    PushBack,
    PopFront,
    Remove(usize),
    InsertBefore(usize),
}

use core::ops::Range as OpRange;
use proptest::collection::vec;
use proptest::num::usize::ANY;

/// Miri is slow enough that the default 0..100 ops per case is too much.
#[cfg(miri)]
const FUZZ_RANGE: OpRange<usize> = 0..10;

/// The default range for proptest's vec strategy is 0..100.
#[cfg(not(miri))]
const FUZZ_RANGE: OpRange<usize> = 0..100;

proptest::proptest! {
    #[test]
    fn fuzz_linked_list(ops in vec(ANY, FUZZ_RANGE)) {
        let ops = ops
            .iter()
            .map(|i| match i % 6 {
                0 => Op::PushFront,
                1 => Op::PopBack,
                2 => Op::PushBack,
                3 => Op::PopFront,
                4 => Op::Remove(i / 6),
                5 => Op::InsertBefore(i / 6),
                _ => unreachable!(),
            })
            .collect::<Vec<_>>();

        let _trace = trace_init();
        let _span = tracing::info_span!("fuzz").entered();
        tracing::info!(?ops);
        run_fuzz(ops);
    }
}

fn run_fuzz(ops: Vec<Op>) {
    use std::collections::VecDeque;

    let mut ll = List::<i32>::new().with_validation(Validation::Enabled);
    let mut reference = VecDeque::new();

    for (i, op) in ops.iter().enumerate() {
        let _span = tracing::info_span!("op", ?i, ?op).entered();
        tracing::info!(?op);
        let val = i as i32;
        match op {
            Op::PushFront => {
                reference.push_front(val);
                ll.push_front(val).unwrap();
            }
            Op::PopBack => {
                assert_eq!(reference.pop_back(), ll.pop_back());
            }
            Op::PushBack => {
                reference.push_back(val);
                ll.push_back(val).unwrap();
            }
            Op::PopFront => {
                assert_eq!(reference.pop_front(), ll.pop_front());
            }
            Op::Remove(n) => {
                if reference.is_empty() {
                    assert!(ll.is_empty());
                    tracing::debug!("skipping remove; list is empty");
                    continue;
                }

                let idx = n % reference.len();
                let expect = reference.remove(idx).unwrap();
                let pos = nth_position(&ll, idx);
                let (removed, next) = ll.remove(pos).unwrap();
                assert_eq!(expect, removed);
                assert_eq!(ll.get(next), reference.get(idx));
            }
            Op::InsertBefore(n) => {
                let idx = n % (reference.len() + 1);
                reference.insert(idx, val);
                let pos = nth_position(&ll, idx);
                let inserted = ll.insert_before(pos, val).unwrap();
                assert_eq!(ll.next(inserted), pos);
            }
        }
        assert_eq!(ll.len(), reference.len());
        assert!(ll.iter().eq(reference.iter()));
        ll.assert_valid();
    }
}

fn nth_position(list: &List<i32>, n: usize) -> Position {
    let mut pos = list.begin();
    for _ in 0..n {
        pos = list.next(pos);
    }
    pos
}
