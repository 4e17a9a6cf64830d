//! Configures new [`SortedList`]s and [`PriorityQueue`]s.
use crate::{AllocError, PriorityQueue, SortedList, Validation};
use core::cmp::Ordering;
use rhizome::List;

/// Builds a new [`SortedList`] or [`PriorityQueue`] with non-default
/// settings.
///
/// # Examples
///
/// ```
/// use hyphae::{AllocError, Builder, Capacity, Validation};
///
/// let mut queue = Builder::new()
///     .validation(Validation::Enabled)
///     .capacity(Capacity::Bounded(2))
///     .build_queue(u32::cmp)
///     .unwrap();
///
/// queue.enqueue(2).unwrap();
/// queue.enqueue(1).unwrap();
///
/// let err = queue.enqueue(3).unwrap_err();
/// assert_eq!(err.error(), &AllocError::Full { capacity: 2 });
/// assert_eq!(err.into_inner(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Builder {
    validation: Validation,
    capacity: Capacity,
}

/// How a new list's storage is allocated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Capacity {
    /// Allocate on demand, with no upper bound. This is the default.
    #[default]
    Unbounded,
    /// Reserve room for at least this many elements up front, and grow on
    /// demand beyond it.
    Reserve(usize),
    /// Reserve room for exactly this many elements up front, and never
    /// grow. Inserting into a full list fails with [`AllocError::Full`].
    Bounded(usize),
}

impl Builder {
    /// Returns a new builder with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the built list checks the positions passed to it.
    ///
    /// By default, validation is enabled when `debug_assertions` are on.
    #[must_use]
    pub fn validation(self, validation: Validation) -> Self {
        Self { validation, ..self }
    }

    /// Sets how the built list allocates its storage.
    ///
    /// By default, lists are [`Capacity::Unbounded`].
    #[must_use]
    pub fn capacity(self, capacity: Capacity) -> Self {
        Self { capacity, ..self }
    }

    /// Builds an empty [`SortedList`] ordered by `cmp`.
    ///
    /// # Errors
    ///
    /// Returns an [`AllocError`] if the requested capacity could not be
    /// reserved.
    pub fn build<T, C>(self, cmp: C) -> Result<SortedList<T, C>, AllocError>
    where
        C: Fn(&T, &T) -> Ordering,
    {
        let list = match self.capacity {
            Capacity::Unbounded => List::new(),
            Capacity::Reserve(capacity) => List::try_with_capacity(capacity)?,
            Capacity::Bounded(capacity) => List::bounded(capacity)?,
        };
        let list = list.with_validation(self.validation);
        debug!(
            list = ?list.id(),
            capacity = ?self.capacity,
            validation = ?self.validation,
            "built sorted list"
        );
        Ok(SortedList::from_list(list, cmp))
    }

    /// Builds an empty [`PriorityQueue`] ordered by `cmp`.
    ///
    /// # Errors
    ///
    /// Returns an [`AllocError`] if the requested capacity could not be
    /// reserved.
    pub fn build_queue<T, C>(self, cmp: C) -> Result<PriorityQueue<T, C>, AllocError>
    where
        C: Fn(&T, &T) -> Ordering,
    {
        self.build(cmp).map(PriorityQueue::from_sorted_list)
    }
}
