#![cfg_attr(docsrs, doc = include_str!("../README.md"))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(missing_docs, rustdoc::broken_intra_doc_links)]
//! Comparator-driven sorted lists and priority queues.
//!
//! A [`SortedList`] keeps its elements in the order defined by a comparison
//! function supplied when the list is created, so the same container works
//! for any element type and any ordering policy. A [`PriorityQueue`] is a
//! thin policy layer over a sorted list: the front of the list is the
//! highest-priority element.
//!
//! Both are built on [`rhizome`]'s arena-backed linked list. Elements are
//! addressed by [`Position`]s, which stay valid until their element is
//! removed, and searches take half-open `[from, to)` position ranges.
//!
//! # Ordering
//!
//! Comparators follow [`Ord::cmp`]: `cmp(a, b)` returns
//! [`Ordering::Less`](core::cmp::Ordering::Less) if `a` belongs before `b`.
//! Comparing with [`Ord::cmp`] keeps the smallest element at the front
//! ([`SortedList::new_min`]); the reverse ordering keeps the largest element
//! at the front ([`SortedList::new_max`]).
//!
//! ```
//! use hyphae::PriorityQueue;
//!
//! let mut queue = PriorityQueue::new_min();
//! queue.enqueue(5).unwrap();
//! queue.enqueue(1).unwrap();
//! queue.enqueue(3).unwrap();
//!
//! assert_eq!(queue.peek(), Some(&1));
//! assert_eq!(queue.dequeue(), Some(1));
//! assert_eq!(queue.dequeue(), Some(3));
//! assert_eq!(queue.dequeue(), Some(5));
//! assert_eq!(queue.dequeue(), None);
//! ```
#[cfg(test)]
extern crate std;

#[macro_use]
pub(crate) mod util;

pub mod builder;
pub mod priority_queue;
pub mod sorted_list;

#[doc(inline)]
pub use self::{
    builder::{Builder, Capacity},
    priority_queue::PriorityQueue,
    sorted_list::SortedList,
};
#[doc(inline)]
pub use rhizome::{AllocError, InsertError, Position, Validation};
