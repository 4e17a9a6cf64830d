//! A priority queue backed by a [`SortedList`].
use crate::{InsertError, SortedList};
use core::{cmp::Ordering, fmt};
use rhizome::Iter;

#[cfg(test)]
mod tests;

/// A queue that always dequeues its highest-priority element first.
///
/// Priority is defined by a comparator, exactly as for [`SortedList`]: the
/// element that sorts first is the next one dequeued. With
/// [`PriorityQueue::new_min`] that is the smallest element, and with
/// [`PriorityQueue::new_max`] it is the largest.
///
/// [Enqueueing](PriorityQueue::enqueue) walks the queue to find the new
/// element's place, so it is _O_(_n_). [Peeking](PriorityQueue::peek) and
/// [dequeueing](PriorityQueue::dequeue) are _O_(1).
///
/// Elements of equal priority are dequeued most-recently-enqueued first.
///
/// # Examples
///
/// ```
/// use hyphae::PriorityQueue;
///
/// let mut queue = PriorityQueue::new_max();
/// for job in [2, 7, 4] {
///     queue.enqueue(job).unwrap();
/// }
///
/// // cancel a pending job
/// assert_eq!(queue.erase(|&job| job == 4), Some(4));
/// assert_eq!(queue.erase(|&job| job == 4), None);
///
/// assert_eq!(queue.dequeue(), Some(7));
/// assert_eq!(queue.dequeue(), Some(2));
/// assert!(queue.is_empty());
/// ```
pub struct PriorityQueue<T, C = fn(&T, &T) -> Ordering> {
    list: SortedList<T, C>,
}

// === impl PriorityQueue ===

impl<T: Ord> PriorityQueue<T> {
    /// Returns a new queue that dequeues its smallest element first.
    #[must_use]
    pub fn new_min() -> Self {
        Self::from_sorted_list(SortedList::new_min())
    }

    /// Returns a new queue that dequeues its largest element first.
    #[must_use]
    pub fn new_max() -> Self {
        Self::from_sorted_list(SortedList::new_max())
    }
}

impl<T, C> PriorityQueue<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Returns a new, empty queue that dequeues the element that sorts first
    /// according to `cmp`.
    #[must_use]
    pub fn new_with_cmp(cmp: C) -> Self {
        Self::from_sorted_list(SortedList::new_with_cmp(cmp))
    }

    /// Returns a queue whose elements are those of `list`.
    ///
    /// The front of the list becomes the head of the queue.
    #[must_use]
    pub fn from_sorted_list(list: SortedList<T, C>) -> Self {
        Self { list }
    }

    /// Returns a reference to the sorted list backing this queue.
    #[inline]
    #[must_use]
    pub fn as_sorted_list(&self) -> &SortedList<T, C> {
        &self.list
    }

    /// Consumes the queue, returning the sorted list that backs it.
    #[must_use]
    pub fn into_sorted_list(self) -> SortedList<T, C> {
        self.list
    }

    /// Adds `value` to the queue.
    ///
    /// `value` is placed ahead of any elements of equal priority.
    ///
    /// # Errors
    ///
    /// If the element could not be stored, it is handed back inside an
    /// [`InsertError`] and the queue is unchanged.
    pub fn enqueue(&mut self, value: T) -> Result<(), InsertError<T>> {
        self.list.try_insert(value).map(|_| ())
    }

    /// Removes the highest-priority element and returns it, or `None` if the
    /// queue is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    /// Returns a reference to the highest-priority element without removing
    /// it, or `None` if the queue is empty.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.list.get(self.list.begin())
    }

    /// Removes and returns the highest-priority element for which
    /// `predicate` returns `true`.
    ///
    /// Returns `None`, leaving the queue unchanged, if no element matches.
    pub fn erase<F>(&mut self, predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let end = self.list.end();
        let pos = self.list.find_if(self.list.begin(), end, predicate);
        if pos == end {
            trace!("PriorityQueue::erase: no match");
            return None;
        }
        self.list.take(pos)
    }

    /// Removes every element from the queue.
    pub fn clear(&mut self) {
        while self.list.pop_front().is_some() {}
    }

    /// Returns the number of elements in the queue.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the queue is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns an iterator over the elements of the queue, in the order they
    /// would be dequeued.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new_min()
    }
}

impl<T, C> From<SortedList<T, C>> for PriorityQueue<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn from(list: SortedList<T, C>) -> Self {
        Self::from_sorted_list(list)
    }
}

impl<T, C> fmt::Debug for PriorityQueue<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("list", &self.list)
            .finish()
    }
}

impl<'queue, T, C> IntoIterator for &'queue PriorityQueue<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    type Item = &'queue T;
    type IntoIter = Iter<'queue, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
