use super::*;
use crate::{util::trace_init, AllocError, Builder, Capacity};
use proptest::{collection::vec, prelude::any, proptest};
use std::vec::Vec;

fn drain<T, C: Fn(&T, &T) -> Ordering>(queue: &mut PriorityQueue<T, C>) -> Vec<T> {
    let mut out = Vec::new();
    while let Some(val) = queue.dequeue() {
        out.push(val);
    }
    out
}

#[test]
fn priority_queue_is_send_sync() {
    crate::util::assert_send_sync::<PriorityQueue<i32>>();
}

#[test]
fn dequeues_in_priority_order() {
    let _trace = trace_init();

    let mut queue = PriorityQueue::new_min();
    queue.enqueue(5).unwrap();
    queue.enqueue(1).unwrap();
    queue.enqueue(3).unwrap();
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.peek(), Some(&1));

    assert_eq!(queue.dequeue(), Some(1));
    assert!(!queue.is_empty());
    assert_eq!(queue.dequeue(), Some(3));
    assert!(!queue.is_empty());
    assert_eq!(queue.dequeue(), Some(5));
    assert!(queue.is_empty());
}

#[test]
fn max_queue() {
    let mut queue = PriorityQueue::new_max();
    for i in [5, 1, 3] {
        queue.enqueue(i).unwrap();
    }
    assert_eq!(queue.peek(), Some(&5));
    assert_eq!(drain(&mut queue), vec![5, 3, 1]);
}

#[test]
fn empty_queue() {
    let mut queue = PriorityQueue::<u32>::new_min();
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
    assert_eq!(queue.peek(), None);
    assert_eq!(queue.dequeue(), None);
    assert_eq!(queue.erase(|_| true), None);

    queue.enqueue(1).unwrap();
    assert_eq!(queue.dequeue(), Some(1));
    assert_eq!(queue.dequeue(), None);
    assert_eq!(queue.peek(), None);
}

#[test]
fn erase_removes_first_match() {
    let _trace = trace_init();

    let mut queue = PriorityQueue::new_min();
    for i in [1, 2, 3] {
        queue.enqueue(i).unwrap();
    }

    assert_eq!(queue.erase(|&i| i == 2), Some(2));
    assert_eq!(queue.len(), 2);

    // erasing again finds nothing and leaves the queue alone.
    assert_eq!(queue.erase(|&i| i == 2), None);
    assert_eq!(queue.len(), 2);

    assert_eq!(drain(&mut queue), vec![1, 3]);
}

#[test]
fn erase_takes_highest_priority_match() {
    let mut queue = PriorityQueue::new_min();
    for i in [4, 8, 6, 7] {
        queue.enqueue(i).unwrap();
    }
    assert_eq!(queue.erase(|&i| i % 2 == 0), Some(4));
    assert_eq!(queue.erase(|&i| i > 6), Some(7));
    assert_eq!(drain(&mut queue), vec![6, 8]);
}

#[test]
fn clear_empties_queue() {
    let mut queue = PriorityQueue::new_min();
    for i in 0..10 {
        queue.enqueue(i).unwrap();
    }
    queue.clear();
    assert!(queue.is_empty());
    assert_eq!(queue.peek(), None);

    queue.enqueue(42).unwrap();
    assert_eq!(queue.peek(), Some(&42));
}

#[test]
fn equal_priorities_dequeue_newest_first() {
    let _trace = trace_init();

    let mut queue = PriorityQueue::new_with_cmp(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
    queue.enqueue((1, 'a')).unwrap();
    queue.enqueue((0, 'b')).unwrap();
    queue.enqueue((1, 'c')).unwrap();
    queue.enqueue((1, 'd')).unwrap();

    let order = drain(&mut queue)
        .into_iter()
        .map(|(_, name)| name)
        .collect::<Vec<_>>();
    assert_eq!(order, vec!['b', 'd', 'c', 'a']);
}

#[test]
fn full_queue_hands_back_element() {
    let _trace = trace_init();

    let mut queue = Builder::new()
        .capacity(Capacity::Bounded(1))
        .build_queue(i32::cmp)
        .unwrap();
    queue.enqueue(1).unwrap();

    let err = queue.enqueue(2).unwrap_err();
    assert_eq!(err.error(), &AllocError::Full { capacity: 1 });
    assert_eq!(err.into_inner(), 2);
    assert_eq!(queue.len(), 1);

    assert_eq!(queue.dequeue(), Some(1));
    queue.enqueue(2).unwrap();
    assert_eq!(queue.peek(), Some(&2));
}

#[test]
fn sorted_list_round_trip() {
    let mut list = SortedList::new_min();
    for i in [3, 1, 2] {
        list.insert(i);
    }
    let mut queue = PriorityQueue::from(list);
    assert_eq!(queue.peek(), Some(&1));
    assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);

    queue.dequeue();
    let list = queue.into_sorted_list();
    list.assert_valid();
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
}

proptest! {
    #[test]
    fn dequeue_order_is_priority_order(vals in vec(any::<u8>(), 0..64)) {
        let mut queue = PriorityQueue::new_with_cmp(|a: &(u8, usize), b: &(u8, usize)| a.0.cmp(&b.0));
        for (i, val) in vals.iter().copied().enumerate() {
            queue.enqueue((val, i)).unwrap();
        }
        proptest::prop_assert_eq!(queue.len(), vals.len());

        let mut expected = vals.iter().copied().enumerate().map(|(i, val)| (val, i)).collect::<Vec<_>>();
        expected.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
        proptest::prop_assert_eq!(drain(&mut queue), expected);
        proptest::prop_assert!(queue.is_empty());
    }

    #[test]
    fn erase_matches_reference(vals in vec(0u8..16, 0..32), erase in vec(0u8..16, 0..16)) {
        let mut queue = PriorityQueue::new_min();
        for val in vals.iter().copied() {
            queue.enqueue(val).unwrap();
        }
        let mut reference = vals.clone();
        reference.sort_unstable();

        for target in erase {
            let expected = reference.iter().position(|&v| v == target).map(|idx| reference.remove(idx));
            proptest::prop_assert_eq!(queue.erase(|&v| v == target), expected);
        }
        proptest::prop_assert_eq!(drain(&mut queue), reference);
    }
}
