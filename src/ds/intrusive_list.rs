//! Doubly linked chain whose nodes live in a [`SlotArena`].
//!
//! Nodes refer to their neighbours by [`SlotId`] rather than by pointer, so
//! a handle stays valid while its node is linked and the list owns no
//! reference cycles. [`LruCache`](crate::policy::lru::LruCache) keeps its
//! recency order here: the head is the most recently used entry, the tail
//! the least.
//!
//! ```text
//!   arena slot   value  prev    next
//!   ─────────────────────────────────
//!   #0           B      #2      #1
//!   #1           C      #0      -      ◄── tail
//!   #2           A      -       #0     ◄── head
//!
//!   head ─► [#2 A] ◄──► [#0 B] ◄──► [#1 C] ◄─ tail
//! ```
//!
//! Every structural change goes through two primitives: `splice` links a
//! node between two neighbours, `unsplice` closes the gap it leaves.
//! Neither allocates nor frees; `push_front`, `insert_at`, `remove` and
//! `move_to_front` add or drop the arena slot around them.
//!
//! Handle-based operations (`push_front`, `remove`, `move_to_front`) are
//! O(1). Positional ones (`insert_at`, `remove_at`, `get_at`, `id_at`,
//! `position`) walk from the head and are O(n).

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::ArrayError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed doubly linked list addressed by stable [`SlotId`] handles.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` while `id` names a linked node.
    #[inline]
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Handle of the tail node.
    #[inline]
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Walks `(handle, value)` pairs from head to tail.
    pub fn iter_entries(&self) -> Entries<'_, T> {
        Entries {
            arena: &self.arena,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    /// Walks handles from head to tail.
    pub fn iter_ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.iter_entries().map(|(id, _)| id)
    }

    /// Walks values from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter_entries().map(|(_, value)| value)
    }

    /// Handle of the node `index` steps from the head.
    pub fn id_at(&self, index: usize) -> Option<SlotId> {
        self.iter_ids().nth(index)
    }

    pub fn get_at(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Number of steps from the head to `id`.
    pub fn position(&self, id: SlotId) -> Option<usize> {
        self.iter_ids().position(|candidate| candidate == id)
    }

    /// Links a new node at the head and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let next = self.head;
        self.alloc_between(value, None, next)
    }

    /// Links `value` so it ends up `index` steps from the head.
    ///
    /// `index == len` appends at the tail; larger indices fail and leave
    /// the list unchanged.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<SlotId, ArrayError> {
        let len = self.len();
        if index > len {
            return Err(out_of_range(index, len));
        }
        let (prev, next) = if index == len {
            (self.tail, None)
        } else {
            let next = self.id_at(index).ok_or(out_of_range(index, len))?;
            (self.arena.get(next).and_then(|node| node.prev), Some(next))
        };
        Ok(self.alloc_between(value, prev, next))
    }

    /// Unlinks the node `index` steps from the head and returns its value.
    pub fn remove_at(&mut self, index: usize) -> Result<T, ArrayError> {
        let len = self.len();
        if len == 0 {
            return Err(ArrayError::EmptyContainer);
        }
        self.id_at(index)
            .and_then(|id| self.remove(id))
            .ok_or(out_of_range(index, len))
    }

    /// Unlinks `id`, frees its slot and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unsplice(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Relinks `id` at the head; `false` if `id` is not linked.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if self.head == Some(id) {
            return true;
        }
        if self.unsplice(id).is_none() {
            return false;
        }
        let next = self.head;
        self.splice(id, None, next);
        true
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    fn alloc_between(&mut self, value: T, prev: Option<SlotId>, next: Option<SlotId>) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.splice(id, prev, next);
        id
    }

    /// Links a detached `id` between adjacent nodes `prev` and `next`.
    /// `None` on either side means the corresponding end of the list.
    fn splice(&mut self, id: SlotId, prev: Option<SlotId>, next: Option<SlotId>) {
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = prev;
            node.next = next;
        }
        match prev.and_then(|p| self.arena.get_mut(p)) {
            Some(node) => node.next = Some(id),
            None => self.head = Some(id),
        }
        match next.and_then(|n| self.arena.get_mut(n)) {
            Some(node) => node.prev = Some(id),
            None => self.tail = Some(id),
        }
    }

    /// Joins the neighbours of `id` and clears its links.
    fn unsplice(&mut self, id: SlotId) -> Option<()> {
        let node = self.arena.get_mut(id)?;
        let (prev, next) = (node.prev.take(), node.next.take());
        match prev.and_then(|p| self.arena.get_mut(p)) {
            Some(node) => node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.arena.get_mut(n)) {
            Some(node) => node.prev = prev,
            None => self.tail = prev,
        }
        Some(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.head.is_none(), self.tail.is_none(), "head/tail disagree on emptiness");

        let mut expected_prev = None;
        let mut walked = 0usize;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            walked += 1;
            assert!(walked <= self.len(), "cycle detected after {} nodes", self.len());
            let Some(node) = self.arena.get(id) else {
                panic!("linked id {:?} has no arena slot", id);
            };
            assert_eq!(node.prev, expected_prev, "broken back link at {:?}", id);
            expected_prev = Some(id);
            cursor = node.next;
        }
        assert_eq!(self.tail, expected_prev, "tail is not the last node walked");
        assert_eq!(walked, self.len(), "arena holds unlinked nodes");
    }
}

fn out_of_range(index: usize, len: usize) -> ArrayError {
    ArrayError::IndexOutOfRange {
        index: isize::try_from(index).unwrap_or(isize::MAX),
        len,
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Head-to-tail iterator returned by [`IntrusiveList::iter_entries`].
pub struct Entries<'a, T> {
    arena: &'a SlotArena<Node<T>>,
    cursor: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.arena.get(id)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((id, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Entries<'_, T> {}
