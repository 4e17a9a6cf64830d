use crate::{AllocError, InsertError};
use alloc::vec::Vec;
use core::mem;

/// The nil link. Also the slot index of every list's end position.
pub(crate) const NIL: u32 = u32::MAX;

/// The largest number of slots an arena may hold; every index below `NIL` is
/// addressable.
pub(crate) const MAX_SLOTS: usize = NIL as usize;

#[cold]
#[inline(never)]
fn vacant_slot(slot: u32) -> ! {
    panic!("attempted to access the node in vacant slot #{slot}");
}

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: u32,
    pub(crate) next: u32,
}

#[derive(Debug)]
enum Entry<T> {
    Occupied(Node<T>),
    Vacant { next_free: u32 },
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    entry: Entry<T>,
}

/// Slab of list nodes. Vacant slots form an intrusive free list.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: u32,
    len: usize,
    limit: Option<usize>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: NIL,
            len: 0,
            limit: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let mut arena = Self::new();
        arena.reserve(capacity)?;
        Ok(arena)
    }

    pub(crate) fn bounded(capacity: usize) -> Result<Self, AllocError> {
        let mut arena = Self {
            limit: Some(capacity),
            ..Self::new()
        };
        arena.reserve(capacity)?;
        Ok(arena)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn limit(&self) -> Option<usize> {
        self.limit
    }

    #[inline]
    fn vacant(&self) -> usize {
        self.slots.len() - self.len
    }

    /// Ensures that `additional` more nodes can be allocated without failing.
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        let requested = self.len.saturating_add(additional);
        if let Some(capacity) = self.limit {
            if requested > capacity {
                return Err(AllocError::Full { capacity });
            }
        }

        if requested > MAX_SLOTS {
            return Err(AllocError::TooLarge {
                requested,
                max: MAX_SLOTS,
            });
        }

        let grow = additional.saturating_sub(self.vacant());
        self.slots.try_reserve(grow)?;
        Ok(())
    }

    pub(crate) fn alloc(&mut self, value: T, prev: u32, next: u32) -> Result<u32, InsertError<T>> {
        if let Err(error) = self.reserve(1) {
            return Err(InsertError::new(value, error));
        }
        Ok(self.alloc_reserved(value, prev, next))
    }

    /// Allocates a slot that a previous call to [`Arena::reserve`] made room
    /// for.
    pub(crate) fn alloc_reserved(&mut self, value: T, prev: u32, next: u32) -> u32 {
        let node = Entry::Occupied(Node { value, prev, next });
        self.len += 1;

        if self.free_head == NIL {
            debug_assert!(self.slots.len() < MAX_SLOTS, "arena slot count overflow");
            let slot = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                entry: node,
            });
            return slot;
        }

        let slot = self.free_head;
        let old = mem::replace(&mut self.slots[slot as usize].entry, node);
        match old {
            Entry::Vacant { next_free } => self.free_head = next_free,
            Entry::Occupied(_) => unreachable!("free list contained occupied slot #{slot}"),
        }
        slot
    }

    /// Vacates `slot`, returning its node and retiring its current generation.
    pub(crate) fn free(&mut self, slot: u32) -> Node<T> {
        assert!(
            self.is_occupied(slot),
            "attempted to free vacant slot #{slot}"
        );
        let free_head = mem::replace(&mut self.free_head, slot);
        let entry = &mut self.slots[slot as usize];
        entry.generation = entry.generation.wrapping_add(1);
        self.len -= 1;
        match mem::replace(&mut entry.entry, Entry::Vacant { next_free: free_head }) {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => vacant_slot(slot),
        }
    }

    /// Vacates every occupied slot. Generations are retired rather than reset,
    /// so positions issued before the clear stay stale.
    pub(crate) fn clear(&mut self) {
        self.free_head = NIL;
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if matches!(slot.entry, Entry::Occupied(_)) {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.entry = Entry::Vacant {
                next_free: self.free_head,
            };
            self.free_head = index as u32;
        }
        self.len = 0;
    }

    pub(crate) fn is_occupied(&self, slot: u32) -> bool {
        matches!(
            self.slots.get(slot as usize),
            Some(Slot {
                entry: Entry::Occupied(_),
                ..
            })
        )
    }

    /// Returns `true` if `slot` holds a node issued under `generation`.
    pub(crate) fn is_live(&self, slot: u32, generation: u32) -> bool {
        matches!(
            self.slots.get(slot as usize),
            Some(Slot {
                generation: g,
                entry: Entry::Occupied(_),
            }) if *g == generation
        )
    }

    #[inline]
    pub(crate) fn generation(&self, slot: u32) -> u32 {
        self.slots[slot as usize].generation
    }

    #[inline]
    pub(crate) fn node(&self, slot: u32) -> &Node<T> {
        match &self.slots[slot as usize].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => vacant_slot(slot),
        }
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, slot: u32) -> &mut Node<T> {
        match &mut self.slots[slot as usize].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => vacant_slot(slot),
        }
    }

    /// Asserts that the free list threads every vacant slot exactly once.
    pub(crate) fn assert_valid(&self) {
        let mut free = 0;
        let mut slot = self.free_head;
        while slot != NIL {
            assert!(
                free < self.vacant(),
                "free list is longer than the number of vacant slots ({})",
                self.vacant()
            );
            match &self.slots[slot as usize].entry {
                Entry::Vacant { next_free } => slot = *next_free,
                Entry::Occupied(_) => panic!("free list contains occupied slot #{slot}"),
            }
            free += 1;
        }
        assert_eq!(free, self.vacant(), "every vacant slot must be on the free list");

        if let Some(capacity) = self.limit {
            assert!(
                self.len <= capacity,
                "bounded arena holds {} nodes, but its capacity is {capacity}",
                self.len
            );
        }
    }
}
