//! A list that keeps its elements in comparator order.
//!
//! See the [`SortedList`] type for details.
use crate::{AllocError, InsertError, Position, Validation};
use core::{
    any::type_name,
    cmp::Ordering::{self, Greater, Less},
    fmt,
};
use rhizome::{Iter, List};


/// A list whose elements are kept in the order defined by a comparator.
///
/// The comparator is a function `cmp(a, b) -> Ordering` in the [`Ord::cmp`]
/// sense. For any two adjacent elements `a` followed by `b`, `cmp(a, b)` is
/// never [`Greater`].
///
/// Elements are addressed by [`Position`]s. Insertion and search walk the
/// list, so they are _O_(_n_); removing at a known position is _O_(1).
/// Inserting or removing an element never invalidates the positions of
/// other elements.
///
/// # Examples
///
/// ```
/// use hyphae::SortedList;
///
/// let mut list = SortedList::new_max();
/// for i in [3, 9, 1, 4] {
///     list.insert(i);
/// }
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [9, 4, 3, 1]);
///
/// // positions support range searches
/// let even = list.find_if(list.begin(), list.end(), |&i| i % 2 == 0);
/// assert_eq!(list.get(even), Some(&4));
/// assert_eq!(list.pop_front(), Some(9));
/// ```
///
/// Ordering by a key, with a closure:
///
/// ```
/// use hyphae::SortedList;
///
/// let mut list = SortedList::new_with_cmp(|a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0));
/// list.insert((3, 'c'));
/// list.insert((1, 'a'));
/// list.insert((2, 'b'));
///
/// let names = list.iter().map(|&(_, name)| name).collect::<String>();
/// assert_eq!(names, "abc");
/// ```
pub struct SortedList<T, C = fn(&T, &T) -> Ordering> {
    list: List<T>,
    cmp: C,
}

fn invert_sort<T: Ord>(a: &T, b: &T) -> Ordering {
    b.cmp(a)
}

// === impl SortedList ===

impl<T: Ord> SortedList<T> {
    /// Returns a new list that keeps its smallest element at the front.
    #[must_use]
    pub fn new_min() -> Self {
        Self::new_with_cmp(T::cmp)
    }

    /// Returns a new list that keeps its largest element at the front.
    #[must_use]
    pub fn new_max() -> Self {
        Self::new_with_cmp(invert_sort::<T>)
    }
}

impl<T, C> SortedList<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Returns a new, empty list ordered by `cmp`.
    ///
    /// The list does not allocate until an element is inserted. To reserve
    /// or bound its storage, or to choose a [`Validation`] mode, use a
    /// [`Builder`](crate::Builder).
    #[must_use]
    pub fn new_with_cmp(cmp: C) -> Self {
        Self::from_list(List::new(), cmp)
    }

    pub(crate) fn from_list(list: List<T>, cmp: C) -> Self {
        debug_assert!(list.is_empty(), "a sorted list must start out empty");
        Self { list, cmp }
    }

    /// Returns a reference to this list's comparator.
    #[inline]
    #[must_use]
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns this list's [`Validation`] mode.
    #[inline]
    #[must_use]
    pub fn validation(&self) -> Validation {
        self.list.validation()
    }

    /// Returns the number of elements in the list.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the list is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the position of the first element, or [`SortedList::end`] if
    /// the list is empty.
    #[inline]
    #[must_use]
    pub fn begin(&self) -> Position {
        self.list.begin()
    }

    /// Returns the list's end position, one past the last element.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Position {
        self.list.end()
    }

    /// Returns the position following `pos`.
    #[inline]
    #[must_use]
    pub fn next(&self, pos: Position) -> Position {
        self.list.next(pos)
    }

    /// Returns the position preceding `pos`.
    #[inline]
    #[must_use]
    pub fn prev(&self, pos: Position) -> Position {
        self.list.prev(pos)
    }

    /// Returns a reference to the element at `pos`, or `None` if `pos` is
    /// the end position.
    #[inline]
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.list.get(pos)
    }

    /// Inserts `value` in sorted order, returning its position.
    ///
    /// The new element is placed before the first element that does not sort
    /// before it. An element that compares [`Equal`] to elements already in
    /// the list is therefore placed *ahead* of them: among equal elements,
    /// the most recently inserted comes first.
    ///
    /// If the element could not be stored, it is dropped and the end
    /// position is returned. Use [`SortedList::try_insert`] to get the
    /// element back instead.
    ///
    /// [`Equal`]: Ordering::Equal
    pub fn insert(&mut self, value: T) -> Position {
        match self.try_insert(value) {
            Ok(pos) => pos,
            Err(error) => {
                debug!(error = %error.error(), "SortedList::insert: dropping element");
                drop(error);
                self.list.end()
            }
        }
    }

    /// Inserts `value` in sorted order, returning its position.
    ///
    /// Equal elements are ordered as described in [`SortedList::insert`].
    ///
    /// # Errors
    ///
    /// If the element could not be stored, it is handed back inside an
    /// [`InsertError`] and the list is unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<Position, InsertError<T>> {
        let at = self.insert_position(&value);
        let pos = self.list.insert_before(at, value)?;
        trace!(?pos, before = ?at, "SortedList::insert");
        Ok(pos)
    }

    /// Removes the element at `pos`, returning the position that followed it.
    ///
    /// # Panics
    ///
    /// If validation is enabled and `pos` is the end position, stale, or
    /// belongs to another list. Otherwise, such positions are ignored and
    /// the end position is returned.
    pub fn remove(&mut self, pos: Position) -> Position {
        match self.list.remove(pos) {
            Some((_, next)) => next,
            None => self.list.end(),
        }
    }

    /// Removes the element at `pos` and returns it.
    ///
    /// Returns `None` if `pos` does not name an element.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`SortedList::remove`].
    pub fn take(&mut self, pos: Position) -> Option<T> {
        self.list.remove(pos).map(|(value, _)| value)
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    pub fn pop_front(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    /// Removes the last element and returns it, or `None` if the list is
    /// empty.
    pub fn pop_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }

    /// Returns the position of the first element in `[from, to)` that does
    /// not sort after `key`, or `to` if there is none.
    ///
    /// The walk skips every element for which the comparator returns
    /// [`Greater`] against `key`, and stops at the first element comparing
    /// [`Less`] or [`Equal`]. This is a linear scan.
    ///
    /// [`Equal`]: Ordering::Equal
    ///
    /// # Panics
    ///
    /// If validation is enabled and `from` or `to` does not belong to this
    /// list, or `to` is not reachable from `from`.
    #[must_use]
    pub fn find(&self, from: Position, to: Position, key: &T) -> Position {
        self.list
            .range(from, to)
            .find(|&(_, elem)| (self.cmp)(elem, key) != Greater)
            .map_or(to, |(pos, _)| pos)
    }

    /// Returns the position of the first element in `[from, to)` for which
    /// `predicate` returns `true`, or `to` if there is none.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`SortedList::find`].
    #[must_use]
    pub fn find_if<F>(&self, from: Position, to: Position, mut predicate: F) -> Position
    where
        F: FnMut(&T) -> bool,
    {
        self.list
            .range(from, to)
            .find(|&(_, elem)| predicate(elem))
            .map_or(to, |(pos, _)| pos)
    }

    /// Calls `action` on each element in `[from, to)`, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first element for which `action` fails, and returns that
    /// error.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`SortedList::find`].
    pub fn for_each<F, E>(&self, from: Position, to: Position, mut action: F) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        self.list
            .range(from, to)
            .try_for_each(|(_, elem)| action(elem))
    }

    /// Moves every element of `source` into this list, in sorted order.
    ///
    /// Both lists must be sorted by the same ordering; this is not checked.
    /// Afterwards, `source` is empty. Among equal elements, those that were
    /// already in this list come first.
    ///
    /// Runs of consecutive `source` elements that all belong in the same gap
    /// are spliced in one step. Each list owns its own node storage, so
    /// splicing a run of _k_ elements moves their values into this list's
    /// storage in _O_(_k_) rather than relinking them in _O_(1). Every element
    /// is still visited a constant number of times, so merging is
    /// _O_(_n_ + _m_) overall. Positions into `source` are invalidated;
    /// positions into this list are not.
    ///
    /// # Errors
    ///
    /// Room for all of `source` is reserved before anything is moved. If it
    /// cannot be reserved, an [`AllocError`] is returned and neither list is
    /// changed.
    pub fn merge<C2>(&mut self, source: &mut SortedList<T, C2>) -> Result<(), AllocError> {
        if source.list.is_empty() {
            return Ok(());
        }

        self.list.reserve(source.list.len()).map_err(|error| {
            debug!(%error, needed = source.list.len(), "SortedList::merge: allocation failed");
            error
        })?;

        let source = &mut source.list;
        let mut runner = self.list.begin();
        while let Some(head) = source.front() {
            // skip past everything that sorts at or before the head of the
            // source list.
            while let Some(curr) = self.list.get(runner) {
                if (self.cmp)(curr, head) == Greater {
                    break;
                }
                runner = self.list.next(runner);
            }

            let from = source.begin();
            let to = match self.list.get(runner) {
                None => source.end(),
                Some(bound) => {
                    // the head sorts before `bound`, so the run is never empty.
                    let mut to = source.next(from);
                    while let Some(elem) = source.get(to) {
                        if (self.cmp)(elem, bound) != Less {
                            break;
                        }
                        to = source.next(to);
                    }
                    to
                }
            };

            trace!(?from, ?to, before = ?runner, "SortedList::merge: moving run");
            self.list.splice_before(runner, source, from, to)?;
        }

        Ok(())
    }

    /// Returns an iterator over the elements of the list, in sorted order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    /// Asserts the underlying list's invariants, and that every element
    /// sorts at or after its predecessor.
    pub fn assert_valid(&self) {
        self.list.assert_valid();

        let mut iter = self.list.iter();
        let Some(mut prev) = iter.next() else {
            return;
        };
        for (i, curr) in iter.enumerate() {
            assert_ne!(
                (self.cmp)(prev, curr),
                Greater,
                "element {i} sorts after its successor"
            );
            prev = curr;
        }
    }

    /// Returns the position of the first element that does not sort before
    /// `value`.
    fn insert_position(&self, value: &T) -> Position {
        let end = self.list.end();
        self.list
            .range(self.list.begin(), end)
            .find(|&(_, existing)| (self.cmp)(existing, value) != Less)
            .map_or(end, |(pos, _)| pos)
    }
}

impl<T: Ord> Default for SortedList<T> {
    fn default() -> Self {
        Self::new_min()
    }
}

impl<T, C> fmt::Debug for SortedList<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedList")
            .field("list", &self.list)
            .field("cmp", &format_args!("{}", type_name::<C>()))
            .finish()
    }
}

impl<'list, T, C> IntoIterator for &'list SortedList<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    type Item = &'list T;
    type IntoIter = Iter<'list, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
