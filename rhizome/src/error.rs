//! Errors returned when a [`List`](crate::List) cannot make room for a node.
use alloc::collections::TryReserveError;
use core::fmt;

/// The list could not allocate storage for one or more nodes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    /// The list was created with a fixed capacity, and that capacity is used up.
    #[error("list is at its fixed capacity of {capacity} elements")]
    Full {
        /// The list's fixed capacity.
        capacity: usize,
    },

    /// The requested number of nodes cannot be addressed by a [`Position`].
    ///
    /// [`Position`]: crate::Position
    #[error("{requested} elements exceeds the maximum list size of {max}")]
    TooLarge {
        /// The total number of nodes that would have been needed.
        requested: usize,
        /// The largest number of nodes a list may hold.
        max: usize,
    },

    /// The allocator refused to grow the node arena.
    #[error("failed to reserve memory for list nodes")]
    Reserve(#[from] TryReserveError),
}

/// An element could not be inserted into a [`List`](crate::List).
///
/// The rejected element is handed back, and may be recovered with
/// [`InsertError::into_inner`].
#[derive(thiserror::Error)]
#[error("failed to insert element: {error}")]
pub struct InsertError<T> {
    value: T,
    #[source]
    error: AllocError,
}

// === impl InsertError ===

impl<T> InsertError<T> {
    pub(crate) fn new(value: T, error: AllocError) -> Self {
        Self { value, error }
    }

    /// Returns the element that could not be inserted.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Returns a reference to the element that could not be inserted.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the allocation failure that caused the insertion to fail.
    #[must_use]
    pub fn error(&self) -> &AllocError {
        &self.error
    }
}

impl<T> fmt::Debug for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("value", &format_args!("{}", core::any::type_name::<T>()))
            .field("error", &self.error)
            .finish()
    }
}
