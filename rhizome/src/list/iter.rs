use super::{List, Position, Resolved};
use crate::arena::{Arena, NIL};
use core::iter::FusedIterator;

/// Iterates over the elements of a [`List`] by reference.
///
/// Returned by [`List::iter`].
#[derive(Debug)]
pub struct Iter<'list, T> {
    arena: &'list Arena<T>,
    front: u32,
    back: u32,
    remaining: usize,
}

/// Iterates over the positions and elements of a range of a [`List`].
///
/// Returned by [`List::range`].
#[derive(Debug)]
pub struct Range<'list, T> {
    list: &'list List<T>,
    curr: Position,
    to: Position,
}

// === impl Iter ===

impl<'list, T> Iter<'list, T> {
    pub(super) fn new(list: &'list List<T>) -> Self {
        Self {
            arena: list.arena(),
            front: list.head(),
            back: list.tail(),
            remaining: list.len(),
        }
    }
}

impl<'list, T> Iterator for Iter<'list, T> {
    type Item = &'list T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        debug_assert_ne!(self.front, NIL);
        let node = self.arena.node(self.front);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        debug_assert_ne!(self.back, NIL);
        let node = self.arena.node(self.back);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

// === impl Range ===

impl<'list, T> Range<'list, T> {
    pub(super) fn new(list: &'list List<T>, from: Position, to: Position) -> Self {
        Self {
            list,
            curr: from,
            to,
        }
    }
}

impl<'list, T> Iterator for Range<'list, T> {
    type Item = (Position, &'list T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.curr == self.to {
            return None;
        }

        match self.list.resolve(self.curr, "List::range") {
            Some(Resolved::Node(slot)) => {
                let pos = self.curr;
                let node = self.list.arena().node(slot);
                self.curr = self.list.position_of(node.next);
                Some((pos, &node.value))
            }
            Some(Resolved::End) => {
                if self.list.validation().is_enabled() {
                    panic!(
                        "List::range: {:?} is not reachable from the start of the range",
                        self.to
                    );
                }
                self.curr = self.to;
                None
            }
            None => {
                self.curr = self.to;
                None
            }
        }
    }
}

impl<T> FusedIterator for Range<'_, T> {}
