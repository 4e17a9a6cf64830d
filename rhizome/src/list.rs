//! An arena-backed doubly-linked list.
//!
//! See the [`List`] type for details.
use crate::{
    arena::{Arena, NIL},
    util::FmtSlot,
    AllocError, InsertError, Validation,
};
use core::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering::Relaxed},
};

mod iter;
pub use self::iter::{Iter, Range};

#[cfg(test)]
mod tests;

/// A doubly-linked list whose nodes live in an arena owned by the list.
///
/// Elements are addressed by [`Position`]s. Inserting before or removing at a
/// position is _O_(1); walking the list is _O_(_n_). Every list has a
/// distinguished [end position](List::end), which sits one past the last
/// element and is never dereferenceable.
///
/// Nodes may be moved from one list to another with
/// [`List::splice_before`]. Because each list owns its own arena, moving a
/// run of _k_ nodes costs _O_(_k_); positions into the source list are
/// invalidated, while positions into the destination list are not.
///
/// # Position Invalidation
///
/// A position stays valid until the element it names is removed from its
/// list. Inserting or removing *other* elements never invalidates it. Using a
/// stale position is detected: lookups return `None`, and when the list's
/// [`Validation`] is enabled, operations panic.
///
/// # Examples
///
/// Using a `List` as a double-ended queue:
///
/// ```
/// use rhizome::List;
///
/// let mut list = List::new();
/// for i in 0..5 {
///     list.push_back(i).unwrap();
/// }
///
/// for i in 0..5 {
///     assert_eq!(list.pop_front(), Some(i), "elements are dequeued in FIFO order");
/// }
///
/// assert!(list.is_empty());
/// ```
///
/// Walking a list by position:
///
/// ```
/// use rhizome::List;
///
/// let mut list = List::new();
/// list.push_back('a').unwrap();
/// list.push_back('c').unwrap();
///
/// let c = list.next(list.begin());
/// list.insert_before(c, 'b').unwrap();
///
/// let mut pos = list.begin();
/// let mut seen = String::new();
/// while pos != list.end() {
///     seen.push(*list.get(pos).unwrap());
///     pos = list.next(pos);
/// }
/// assert_eq!(seen, "abc");
/// ```
pub struct List<T> {
    arena: Arena<T>,
    head: u32,
    tail: u32,
    id: ListId,
    validation: Validation,
}

/// A handle naming one element's place in a [`List`], or a list's end.
///
/// Positions are `Copy`, do not borrow the list, and do not own the element
/// they name. Two positions are equal if they name the same slot, issued
/// under the same generation, by the same list.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    slot: u32,
    generation: u32,
    owner: ListId,
}

/// Uniquely identifies a [`List`] for the lifetime of the process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId(usize);

/// What a position refers to within a particular list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Resolved {
    End,
    Node(u32),
}

// === impl List ===

impl<T> List<T> {
    /// Returns a new, empty list with the default [`Validation`] mode.
    ///
    /// The list does not allocate until an element is inserted.
    #[must_use]
    pub fn new() -> Self {
        Self::from_arena(Arena::new())
    }

    /// Returns a new, empty list with room for at least `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns an [`AllocError`] if the storage could not be reserved.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Arena::with_capacity(capacity).map(Self::from_arena)
    }

    /// Returns a new, empty list that holds at most `capacity` elements.
    ///
    /// All storage is reserved up front. Once `capacity` elements are
    /// linked, further insertions fail with [`AllocError::Full`].
    ///
    /// # Errors
    ///
    /// Returns an [`AllocError`] if the storage could not be reserved.
    pub fn bounded(capacity: usize) -> Result<Self, AllocError> {
        Arena::bounded(capacity).map(Self::from_arena)
    }

    fn from_arena(arena: Arena<T>) -> Self {
        Self {
            arena,
            head: NIL,
            tail: NIL,
            id: ListId::next(),
            validation: Validation::default(),
        }
    }

    /// Sets this list's [`Validation`] mode.
    #[must_use]
    pub fn with_validation(self, validation: Validation) -> Self {
        Self { validation, ..self }
    }

    /// Returns this list's [`Validation`] mode.
    #[inline]
    #[must_use]
    pub fn validation(&self) -> Validation {
        self.validation
    }

    /// Returns the identity stamped into every position this list issues.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ListId {
        self.id
    }

    /// Returns the number of elements in the list.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if this list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        if self.head == NIL {
            debug_assert_eq!(
                self.tail, NIL,
                "inconsistent state: a list had a tail but no head!"
            );
            return true;
        }

        false
    }

    /// Returns the fixed capacity of a [bounded](List::bounded) list, or
    /// `None` if the list grows on demand.
    #[inline]
    #[must_use]
    pub fn capacity_limit(&self) -> Option<usize> {
        self.arena.limit()
    }

    /// Ensures that `additional` more elements can be inserted without an
    /// allocation failure.
    ///
    /// # Errors
    ///
    /// Returns an [`AllocError`] if the storage could not be reserved, or if
    /// a bounded list does not have `additional` free slots.
    pub fn reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        self.arena.reserve(additional)
    }

    /// Returns the position of the first element, or [`List::end`] if the
    /// list is empty.
    #[inline]
    #[must_use]
    pub fn begin(&self) -> Position {
        self.position_of(self.head)
    }

    /// Returns this list's end position.
    ///
    /// The end position sits one past the last element. It is never
    /// dereferenceable, and it stays the same for the lifetime of the list.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Position {
        Position {
            slot: NIL,
            generation: 0,
            owner: self.id,
        }
    }

    /// Returns the position following `pos`.
    ///
    /// The position after the last element is [`List::end`], and the end
    /// position is its own successor.
    #[must_use]
    pub fn next(&self, pos: Position) -> Position {
        match self.resolve(pos, "List::next") {
            Some(Resolved::Node(slot)) => self.position_of(self.arena.node(slot).next),
            Some(Resolved::End) | None => self.end(),
        }
    }

    /// Returns the position preceding `pos`.
    ///
    /// The position before the first element is [`List::end`], and the
    /// position before the end is the last element. This makes the end
    /// position behave like the "ghost" element of a circular cursor.
    #[must_use]
    pub fn prev(&self, pos: Position) -> Position {
        match self.resolve(pos, "List::prev") {
            Some(Resolved::Node(slot)) => self.position_of(self.arena.node(slot).prev),
            Some(Resolved::End) => self.position_of(self.tail),
            None => self.end(),
        }
    }

    /// Returns `true` if `pos` names a live element of this list.
    ///
    /// This never panics, regardless of the list's [`Validation`] mode.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.owner == self.id && pos.slot != NIL && self.arena.is_live(pos.slot, pos.generation)
    }

    /// Returns a reference to the element at `pos`.
    ///
    /// Returns `None` if `pos` is the end position, or if its element has been
    /// removed.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&T> {
        match self.resolve(pos, "List::get")? {
            Resolved::Node(slot) => Some(&self.arena.node(slot).value),
            Resolved::End => None,
        }
    }

    /// Returns a mutable reference to the element at `pos`.
    ///
    /// Returns `None` if `pos` is the end position, or if its element has been
    /// removed.
    #[must_use]
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        match self.resolve(pos, "List::get_mut")? {
            Resolved::Node(slot) => Some(&mut self.arena.node_mut(slot).value),
            Resolved::End => None,
        }
    }

    /// Returns a reference to the first element, if there is one.
    #[inline]
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        (self.head != NIL).then(|| &self.arena.node(self.head).value)
    }

    /// Returns a reference to the last element, if there is one.
    #[inline]
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        (self.tail != NIL).then(|| &self.arena.node(self.tail).value)
    }

    /// Inserts `value` immediately before `pos`, returning the new element's
    /// position.
    ///
    /// Inserting before [`List::end`] appends to the list.
    ///
    /// # Errors
    ///
    /// If no node could be allocated, the value is handed back inside an
    /// [`InsertError`] and the list is unchanged.
    ///
    /// # Panics
    ///
    /// If `pos` is stale or belongs to another list, since there is no place
    /// to insert the value.
    pub fn insert_before(&mut self, pos: Position, value: T) -> Result<Position, InsertError<T>> {
        let next = match self.resolve(pos, "List::insert_before") {
            Some(Resolved::End) => NIL,
            Some(Resolved::Node(slot)) => slot,
            None => panic!("List::insert_before: {pos:?} does not name an element of {:?}", self.id),
        };
        let prev = if next == NIL {
            self.tail
        } else {
            self.arena.node(next).prev
        };

        let slot = self.arena.alloc(value, prev, next).map_err(|error| {
            debug!(list = ?self.id, error = %error.error(), "List::insert_before: allocation failed");
            error
        })?;
        self.link(slot, prev, next);
        trace!(list = ?self.id, slot, prev = ?FmtSlot(prev), next = ?FmtSlot(next), "List::insert_before");
        Ok(self.position_of(slot))
    }

    /// Prepends `value` to the list.
    ///
    /// # Errors
    ///
    /// If no node could be allocated, the value is handed back inside an
    /// [`InsertError`].
    pub fn push_front(&mut self, value: T) -> Result<Position, InsertError<T>> {
        self.insert_before(self.begin(), value)
    }

    /// Appends `value` to the list.
    ///
    /// # Errors
    ///
    /// If no node could be allocated, the value is handed back inside an
    /// [`InsertError`].
    pub fn push_back(&mut self, value: T) -> Result<Position, InsertError<T>> {
        self.insert_before(self.end(), value)
    }

    /// Unlinks the element at `pos`, returning it along with the position that
    /// followed it.
    ///
    /// Returns `None` if `pos` is stale.
    ///
    /// # Panics
    ///
    /// If validation is enabled and `pos` is the end position, stale, or
    /// belongs to another list.
    pub fn remove(&mut self, pos: Position) -> Option<(T, Position)> {
        match self.resolve(pos, "List::remove")? {
            Resolved::Node(slot) => {
                let node = self.unlink(slot);
                trace!(list = ?self.id, slot, "List::remove");
                Some((node.value, self.position_of(node.next)))
            }
            Resolved::End => {
                if self.validation.is_enabled() {
                    panic!("List::remove: cannot remove the end position of {:?}", self.id);
                }
                None
            }
        }
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.head == NIL {
            return None;
        }
        Some(self.unlink(self.head).value)
    }

    /// Removes the last element and returns it, or `None` if the list is
    /// empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.tail == NIL {
            return None;
        }
        Some(self.unlink(self.tail).value)
    }

    /// Moves the run `[from, to)` out of `source` and into this list,
    /// immediately before `at`, preserving the run's order.
    ///
    /// Returns the number of elements moved. Storage for the whole run is
    /// reserved before anything is moved, so on error neither list is
    /// changed.
    ///
    /// Positions into `source` that named moved elements are invalidated;
    /// the moved elements are assigned fresh positions in this list.
    ///
    /// # Errors
    ///
    /// Returns an [`AllocError`] if this list cannot make room for the run.
    ///
    /// # Panics
    ///
    /// If `at` does not name an element of this list or its end. When
    /// validation is enabled, also if `from` or `to` do not belong to
    /// `source`, or `to` is not reachable from `from`.
    pub fn splice_before(
        &mut self,
        at: Position,
        source: &mut List<T>,
        from: Position,
        to: Position,
    ) -> Result<usize, AllocError> {
        let at = match self.resolve(at, "List::splice_before") {
            Some(Resolved::End) => NIL,
            Some(Resolved::Node(slot)) => slot,
            None => panic!("List::splice_before: {at:?} does not name an element of {:?}", self.id),
        };

        let count = source.range(from, to).count();
        if count == 0 {
            return Ok(0);
        }
        self.arena.reserve(count).map_err(|error| {
            debug!(list = ?self.id, count, %error, "List::splice_before: allocation failed");
            error
        })?;

        let Some(Resolved::Node(mut cursor)) = source.resolve(from, "List::splice_before") else {
            unreachable!("a non-empty range must start at an element");
        };
        for _ in 0..count {
            let node = source.unlink(cursor);
            cursor = node.next;

            let prev = if at == NIL {
                self.tail
            } else {
                self.arena.node(at).prev
            };
            let slot = self.arena.alloc_reserved(node.value, prev, at);
            self.link(slot, prev, at);
        }

        trace!(list = ?self.id, source = ?source.id, count, at = ?FmtSlot(at), "List::splice_before");
        Ok(count)
    }

    /// Removes every element from the list.
    ///
    /// Every outstanding position into the list becomes stale. The end
    /// position is unchanged.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Returns an iterator over the elements of the list, front to back.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns an iterator over the positions and elements in `[from, to)`.
    ///
    /// Iteration stops when `to` is reached. If the end of the list is
    /// reached first, `to` was not reachable from `from`: iteration stops,
    /// and when validation is enabled, this panics.
    ///
    /// # Panics
    ///
    /// If validation is enabled and `from` or `to` is stale or belongs to
    /// another list.
    #[must_use]
    pub fn range(&self, from: Position, to: Position) -> Range<'_, T> {
        let _ = self.resolve(to, "List::range");
        Range::new(self, from, to)
    }

    /// Asserts as many of the linked list's invariants as possible.
    pub fn assert_valid(&self) {
        self.arena.assert_valid();

        if self.head == NIL {
            assert_eq!(
                self.tail, NIL,
                "if the linked list's head is null, the tail must also be null"
            );
            assert_eq!(self.len(), 0, "an empty list must have a length of 0");
            return;
        }
        assert_ne!(
            self.tail, NIL,
            "if the linked list has a head, it must also have a tail"
        );
        assert_eq!(
            self.arena.node(self.head).prev,
            NIL,
            "head node must not have a prev link"
        );
        assert_eq!(
            self.arena.node(self.tail).next,
            NIL,
            "tail node must not have a next link"
        );

        let mut count = 0;
        let mut prev = NIL;
        let mut curr = self.head;
        while curr != NIL {
            assert!(
                count < self.len(),
                "list has more linked nodes than its length ({}); is there a cycle?",
                self.len()
            );
            let node = self.arena.node(curr);
            assert_eq!(
                node.prev,
                prev,
                "node #{curr}'s prev link must point at the node before it"
            );
            assert_ne!(node.next, curr, "node #{curr}'s next link cannot be to itself");
            prev = curr;
            curr = node.next;
            count += 1;
        }
        assert_eq!(prev, self.tail, "walking forward must end at the tail");
        assert_eq!(count, self.len(), "length must match the number of linked nodes");
    }

    /// Resolves `pos` against this list, enforcing the validation mode.
    ///
    /// Returns `None` if `pos` is stale or foreign and validation is disabled.
    pub(crate) fn resolve(&self, pos: Position, op: &'static str) -> Option<Resolved> {
        let validated = self.validation.is_enabled();
        if pos.owner != self.id {
            debug!(list = ?self.id, ?pos, op, "position belongs to another list");
            if validated {
                panic!("{op}: {pos:?} belongs to {:?}, not {:?}", pos.owner, self.id);
            }
            return None;
        }

        if pos.slot == NIL {
            return Some(Resolved::End);
        }

        if self.arena.is_live(pos.slot, pos.generation) {
            return Some(Resolved::Node(pos.slot));
        }

        if validated {
            debug!(list = ?self.id, ?pos, op, "stale position");
            panic!("{op}: {pos:?} is stale; its element was removed from {:?}", self.id);
        }
        None
    }

    #[inline]
    pub(crate) fn position_of(&self, slot: u32) -> Position {
        if slot == NIL {
            return self.end();
        }
        Position {
            slot,
            generation: self.arena.generation(slot),
            owner: self.id,
        }
    }

    #[inline]
    pub(crate) fn arena(&self) -> &Arena<T> {
        &self.arena
    }

    #[inline]
    pub(crate) fn head(&self) -> u32 {
        self.head
    }

    #[inline]
    pub(crate) fn tail(&self) -> u32 {
        self.tail
    }

    fn link(&mut self, slot: u32, prev: u32, next: u32) {
        if prev == NIL {
            self.head = slot;
        } else {
            self.arena.node_mut(prev).next = slot;
        }

        if next == NIL {
            self.tail = slot;
        } else {
            self.arena.node_mut(next).prev = slot;
        }
    }

    fn unlink(&mut self, slot: u32) -> crate::arena::Node<T> {
        let node = self.arena.free(slot);
        debug_assert_ne!(node.next, slot, "node must not be linked to itself");
        debug_assert_ne!(node.prev, slot, "node must not be linked to itself");

        if node.prev == NIL {
            self.head = node.next;
        } else {
            self.arena.node_mut(node.prev).next = node.next;
        }

        if node.next == NIL {
            self.tail = node.prev;
        } else {
            self.arena.node_mut(node.next).prev = node.prev;
        }

        node
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("id", &self.id)
            .field("len", &self.len())
            .field("head", &FmtSlot(self.head))
            .field("tail", &FmtSlot(self.tail))
            .field("validation", &self.validation)
            .finish()
    }
}

impl<'list, T> IntoIterator for &'list List<T> {
    type Item = &'list T;
    type IntoIter = Iter<'list, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// === impl Position ===

impl Position {
    /// Returns `true` if this is the end position of its list.
    #[inline]
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.slot == NIL
    }

    /// Returns the identity of the list that issued this position.
    #[inline]
    #[must_use]
    pub fn owner(&self) -> ListId {
        self.owner
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            return write!(f, "Position(end, list {})", self.owner.0);
        }
        write!(
            f,
            "Position(#{}v{}, list {})",
            self.slot, self.generation, self.owner.0
        )
    }
}

// === impl ListId ===

impl ListId {
    fn next() -> Self {
        static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
        Self(NEXT_ID.fetch_add(1, Relaxed))
    }
}
