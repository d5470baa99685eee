// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Slot-table storage backing the doubly-linked list.
//!
//! Nodes live in a contiguous `Vec` of slots; chain "pointers" are plain
//! indices into that table. Every slot carries the opaque identifier of the
//! list that owns it, and ownership checks compare identifiers rather than
//! addresses. Unlinking clears the owner tag but deliberately leaves the
//! slot's value and links untouched: a removed node's last-known
//! neighborhood stays readable through outstanding handles, and a slot is
//! never handed to a second node.

use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identifier distinguishing list instances.
///
/// Drawn from a process-wide counter so that a node created by one list can
/// never pass another list's ownership check, even across drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ListId(u64);

impl ListId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Index of a node slot inside one list's slot table.
///
/// Only meaningful together with the table it came from; the public
/// `NodeRef` handle pairs it with the owning storage.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeIndex(usize);

impl NodeIndex {
    #[inline(always)]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline(always)]
    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeIndex({})", self.0)
    }
}

/// One node's storage: the value, the chain links, and the ownership tag.
///
/// `owner` is `Some` exactly while the node is part of the chain. After an
/// unlink the links keep their last-known targets.
#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub(crate) value: T,
    pub(crate) prev: Option<NodeIndex>,
    pub(crate) next: Option<NodeIndex>,
    pub(crate) owner: Option<ListId>,
}

/// The chain state shared by a list, its node handles, and its cursors.
pub(crate) struct ListCore<T> {
    id: ListId,
    slots: Vec<Slot<T>>,
    pub(crate) first: Option<NodeIndex>,
    pub(crate) last: Option<NodeIndex>,
    pub(crate) len: usize,
}

impl<T> ListCore<T> {
    pub(crate) fn new() -> Self {
        Self {
            id: ListId::fresh(),
            slots: Vec::new(),
            first: None,
            last: None,
            len: 0,
        }
    }

    /// Allocates a fresh, not-yet-linked slot owned by this list.
    pub(crate) fn alloc(&mut self, value: T) -> NodeIndex {
        let index = NodeIndex::new(self.slots.len());
        self.slots.push(Slot {
            value,
            prev: None,
            next: None,
            owner: Some(self.id),
        });
        index
    }

    #[inline]
    pub(crate) fn slot(&self, index: NodeIndex) -> &Slot<T> {
        &self.slots[index.get()]
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, index: NodeIndex) -> &mut Slot<T> {
        &mut self.slots[index.get()]
    }

    /// Returns `true` if the slot is currently part of this list's chain.
    #[inline]
    pub(crate) fn is_owned(&self, index: NodeIndex) -> bool {
        self.slot(index).owner == Some(self.id)
    }

    /// Links `index` into the chain after `after`, or at the tail when no
    /// anchor is given.
    pub(crate) fn attach_after(&mut self, index: NodeIndex, after: Option<NodeIndex>) {
        match after.or(self.last) {
            Some(current) => {
                let old_next = self.slot(current).next;
                self.slot_mut(current).next = Some(index);
                self.slot_mut(index).prev = Some(current);
                match old_next {
                    Some(next) => {
                        self.slot_mut(index).next = Some(next);
                        self.slot_mut(next).prev = Some(index);
                    }
                    None => self.last = Some(index),
                }
            }
            None => {
                self.first = Some(index);
                self.last = Some(index);
            }
        }
        self.len += 1;
    }

    /// Links `index` into the chain before `before`, or at the head when no
    /// anchor is given.
    pub(crate) fn attach_before(&mut self, index: NodeIndex, before: Option<NodeIndex>) {
        match before.or(self.first) {
            Some(current) => {
                let old_prev = self.slot(current).prev;
                self.slot_mut(current).prev = Some(index);
                self.slot_mut(index).next = Some(current);
                match old_prev {
                    Some(prev) => {
                        self.slot_mut(index).prev = Some(prev);
                        self.slot_mut(prev).next = Some(index);
                    }
                    None => self.first = Some(index),
                }
            }
            None => {
                self.first = Some(index);
                self.last = Some(index);
            }
        }
        self.len += 1;
    }

    /// Splices `index` out of the chain and clears its owner tag.
    ///
    /// The slot's own links are left pointing at its former neighbors so
    /// outstanding handles can still inspect where the node used to sit.
    pub(crate) fn unlink(&mut self, index: NodeIndex) {
        debug_assert!(self.is_owned(index));
        let (prev, next) = {
            let slot = self.slot(index);
            (slot.prev, slot.next)
        };
        match prev {
            Some(prev) => self.slot_mut(prev).next = next,
            None => self.first = next,
        }
        match next {
            Some(next) => self.slot_mut(next).prev = prev,
            None => self.last = prev,
        }
        self.slot_mut(index).owner = None;
        self.len -= 1;
    }

    /// Swaps the chain endpoints; the caller has already mirrored the links.
    #[inline]
    pub(crate) fn swap_ends(&mut self) {
        std::mem::swap(&mut self.first, &mut self.last);
    }
}
