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

//! # Node Handles
//!
//! `NodeRef` is the public identity of one list node: a cheap, clonable
//! handle pairing the list's shared storage with the node's slot. Handles
//! compare equal exactly when they address the same node of the same list.
//!
//! A handle stays usable after its node is removed (the value remains
//! readable and writable, and `prev`/`next` keep reporting the node's
//! last-known neighbors), but a removed node is permanently rejected as an
//! anchor for structural operations. Holding a handle keeps the backing
//! storage alive, so these reads stay valid even once the list value
//! itself is gone.
//!
//! ## Usage
//!
//! ```rust
//! use capstan_list::list::DoublyLinkedList;
//!
//! let list: DoublyLinkedList<i32> = [1, 2, 3].into_iter().collect();
//! let node = list.first().unwrap().next().unwrap();
//! assert_eq!(*node.value(), 2);
//! node.set_value(20);
//! assert_eq!(*node.value(), 20);
//! ```

use crate::arena::{ListCore, NodeIndex};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// A handle to one node of a [`DoublyLinkedList`](crate::list::DoublyLinkedList).
///
/// Cloning a `NodeRef` clones the handle, not the node. The guards returned
/// by [`NodeRef::value`] and [`NodeRef::value_mut`] borrow the list's shared
/// storage and must be dropped before the list is mutated again.
pub struct NodeRef<T> {
    core: Rc<RefCell<ListCore<T>>>,
    index: NodeIndex,
}

impl<T> NodeRef<T> {
    pub(crate) fn new(core: Rc<RefCell<ListCore<T>>>, index: NodeIndex) -> Self {
        Self { core, index }
    }

    #[inline]
    pub(crate) fn core(&self) -> &Rc<RefCell<ListCore<T>>> {
        &self.core
    }

    #[inline]
    pub(crate) fn index(&self) -> NodeIndex {
        self.index
    }

    /// Reads the node's value.
    ///
    /// The returned guard borrows the list's storage; drop it before
    /// mutating the list.
    pub fn value(&self) -> Ref<'_, T> {
        Ref::map(self.core.borrow(), |core| &core.slot(self.index).value)
    }

    /// Mutably borrows the node's value in place.
    ///
    /// The returned guard borrows the list's storage exclusively; drop it
    /// before touching the list (or any other node) again.
    pub fn value_mut(&self) -> RefMut<'_, T> {
        RefMut::map(self.core.borrow_mut(), |core| {
            &mut core.slot_mut(self.index).value
        })
    }

    /// Replaces the node's value.
    pub fn set_value(&self, value: T) {
        *self.value_mut() = value;
    }

    /// Returns the neighboring node toward the front of the list.
    ///
    /// For a removed node this keeps reporting the neighbor it had when it
    /// was unlinked.
    pub fn prev(&self) -> Option<NodeRef<T>> {
        let index = self.core.borrow().slot(self.index).prev?;
        Some(NodeRef::new(Rc::clone(&self.core), index))
    }

    /// Returns the neighboring node toward the back of the list.
    ///
    /// For a removed node this keeps reporting the neighbor it had when it
    /// was unlinked.
    pub fn next(&self) -> Option<NodeRef<T>> {
        let index = self.core.borrow().slot(self.index).next?;
        Some(NodeRef::new(Rc::clone(&self.core), index))
    }
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
            index: self.index,
        }
    }
}

impl<T> PartialEq for NodeRef<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core) && self.index == other.index
    }
}

impl<T> Eq for NodeRef<T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for NodeRef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeRef({:?})", &*self.value())
    }
}
