#![cfg_attr(docsrs, doc = include_str!("../README.md"))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(missing_docs, rustdoc::broken_intra_doc_links)]
//! An arena-backed doubly-linked list.
//!
//! Nodes live in a slab owned by the [`List`], linked by index rather than by
//! pointer. Elements are addressed by [`Position`]s: small `Copy` handles that
//! name a slot, the generation of that slot, and the list that issued them.
//! Removing an element bumps its slot's generation, so a position outliving
//! its element is detected rather than silently aliasing whatever reuses the
//! slot.
//!
//! Every list has an *end* position, a sentinel one past the last element. It
//! is stable for the list's lifetime and is never dereferenceable; it is the
//! universal "not found" and "range end" marker.
//!
//! ```
//! use rhizome::List;
//!
//! let mut list = List::new();
//! let b = list.push_back(2).unwrap();
//! list.push_back(3).unwrap();
//! list.insert_before(b, 1).unwrap();
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
//! assert_eq!(list.get(list.end()), None);
//! ```
#[cfg(test)]
extern crate std;

extern crate alloc;

#[macro_use]
pub(crate) mod util;

mod arena;
pub mod error;
pub mod list;

#[doc(inline)]
pub use error::{AllocError, InsertError};
#[doc(inline)]
pub use list::{Iter, List, ListId, Position, Range};

/// Whether a list checks that the positions passed to it are its own.
///
/// When validation is [`Enabled`](Validation::Enabled), every position handed
/// to a list is checked against the list's [`ListId`] and against the
/// generation of the slot it names; a foreign, stale, or otherwise misused
/// position panics with a description of the contract violation.
///
/// When validation is [`Disabled`](Validation::Disabled), the same checks
/// run, but misuse is not reported: a foreign or stale position is treated
/// as naming nothing, and the operation degrades to returning the end
/// position or `None`. Either way, misuse never causes memory unsafety.
///
/// The default is `Enabled` when `debug_assertions` are on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Validation {
    /// Panic on contract violations.
    Enabled,
    /// Treat foreign and stale positions as naming nothing.
    Disabled,
}

impl Validation {
    /// Returns `true` if this is [`Validation::Enabled`].
    #[inline]
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl Default for Validation {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}
