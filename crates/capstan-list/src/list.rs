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

//! # The Doubly-Linked List
//!
//! A doubly-linked list with node-addressed insertion and removal, in-place
//! reversal, and live bidirectional traversal over both nodes and values.
//! There is deliberately no positional addressing: positions are named by
//! [`NodeRef`] handles, obtained from insertions, from `first`/`last`, or
//! from traversal.
//!
//! ## Ownership model
//!
//! Every node is owned by exactly one list at a time. The anchored
//! insertion operations (`append_after`, `prepend_before`, and their batch
//! forms) validate that the anchor currently belongs to the receiving list
//! and fail with [`InvalidNodeError`] *before* touching the chain; a stale
//! or foreign anchor is a caller bug that must surface. Removal by handle
//! is the deliberate mirror image: `remove_node` with a stale or foreign
//! handle is a harmless no-op, as is removing from either end of an empty
//! list.
//!
//! ## Mutation during traversal
//!
//! Traversal cursors chase the live chain and removed nodes retain their
//! last-known links (see the `seq` module), so callbacks may remove the
//! node they are visiting or insert ahead of the cursor without breaking
//! the walk.
//!
//! ## Usage
//!
//! ```rust
//! use capstan_list::list::DoublyLinkedList;
//! use capstan_seq::sequence::Sequence;
//!
//! let mut list: DoublyLinkedList<i32> = [1, 2, 5].into_iter().collect();
//! let two = list.first().unwrap().next().unwrap();
//! let _four = list.append_many_after([3, 4], &two).unwrap();
//!
//! assert_eq!(list.values().cursor().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
//! assert_eq!(
//!     list.values().backwards().cursor().collect::<Vec<_>>(),
//!     vec![5, 4, 3, 2, 1]
//! );
//! ```

use crate::arena::{ListCore, NodeIndex};
use crate::error::InvalidNodeError;
use crate::node::NodeRef;
use crate::seq::{Direction, NodeCursor, NodeSeq, ValueSeq};
use capstan_seq::expr::Bidirected;
use capstan_seq::sequence::Sequence;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

/// Inline capacity for buffered match sets in bulk removals.
const MATCH_BUF: usize = 8;

/// A doubly-linked list with owned, identity-bearing nodes.
///
/// Storage for removed nodes is retained (never recycled) while the list or
/// any [`NodeRef`] into it is alive, which is what keeps stale handles
/// readable and node identity unambiguous.
pub struct DoublyLinkedList<T> {
    core: Rc<RefCell<ListCore<T>>>,
}

impl<T> DoublyLinkedList<T> {
    /// Creates a new, empty list.
    pub fn new() -> Self {
        Self {
            core: Rc::new(RefCell::new(ListCore::new())),
        }
    }

    /// Returns the number of nodes in the list. O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.core.borrow().len
    }

    /// Returns `true` if the list has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the head node.
    pub fn first(&self) -> Option<NodeRef<T>> {
        let index = self.core.borrow().first?;
        Some(self.handle(index))
    }

    /// Returns the tail node.
    pub fn last(&self) -> Option<NodeRef<T>> {
        let index = self.core.borrow().last?;
        Some(self.handle(index))
    }

    /// Returns the live bidirectional sequence of node handles.
    ///
    /// Each traversal reads the chain as it is at traversal time. The
    /// returned sequence holds its own handle to the chain state, so the
    /// list itself stays free for mutation while traversals run.
    pub fn nodes(&self) -> Bidirected<NodeSeq<T>> {
        Bidirected::new(
            NodeSeq::new(Rc::clone(&self.core), Direction::Forward),
            NodeSeq::new(Rc::clone(&self.core), Direction::Backward),
        )
    }

    /// Returns the live bidirectional sequence of element values.
    ///
    /// Values are cloned out of the chain per pull, so the contract methods
    /// require `T: Clone`.
    pub fn values(&self) -> Bidirected<ValueSeq<T>> {
        Bidirected::new(
            ValueSeq::new(Rc::clone(&self.core), Direction::Forward),
            ValueSeq::new(Rc::clone(&self.core), Direction::Backward),
        )
    }

    /// Appends `value` at the back of the list and returns its node.
    pub fn append(&mut self, value: T) -> NodeRef<T> {
        self.insert_after(value, None)
    }

    /// Inserts `value` directly after `after` and returns its node.
    ///
    /// # Errors
    ///
    /// [`InvalidNodeError`] if `after` was removed or belongs to another
    /// list; the chain is untouched in that case.
    pub fn append_after(&mut self, value: T, after: &NodeRef<T>) -> Result<NodeRef<T>, InvalidNodeError> {
        let anchor = self.owned_index(after)?;
        Ok(self.insert_after(value, Some(anchor)))
    }

    /// Prepends `value` at the front of the list and returns its node.
    pub fn prepend(&mut self, value: T) -> NodeRef<T> {
        self.insert_before(value, None)
    }

    /// Inserts `value` directly before `before` and returns its node.
    ///
    /// # Errors
    ///
    /// [`InvalidNodeError`] if `before` was removed or belongs to another
    /// list; the chain is untouched in that case.
    pub fn prepend_before(&mut self, value: T, before: &NodeRef<T>) -> Result<NodeRef<T>, InvalidNodeError> {
        let anchor = self.owned_index(before)?;
        Ok(self.insert_before(value, Some(anchor)))
    }

    /// Appends every value of `values` at the back, preserving their order.
    ///
    /// Equivalent to appending the first value, then appending each next
    /// value after the previously inserted node. Returns the last inserted
    /// node, or `None` if `values` was empty.
    pub fn append_many<I>(&mut self, values: I) -> Option<NodeRef<T>>
    where
        I: IntoIterator<Item = T>,
    {
        self.extend_after(values, None)
    }

    /// Inserts every value of `values` directly after `after`, preserving
    /// their order. Returns the last inserted node, or `None` if `values`
    /// was empty.
    ///
    /// # Errors
    ///
    /// [`InvalidNodeError`] if `after` was removed or belongs to another
    /// list; nothing is consumed from `values` and the chain is untouched.
    pub fn append_many_after<I>(
        &mut self,
        values: I,
        after: &NodeRef<T>,
    ) -> Result<Option<NodeRef<T>>, InvalidNodeError>
    where
        I: IntoIterator<Item = T>,
    {
        let anchor = self.owned_index(after)?;
        Ok(self.extend_after(values, Some(anchor)))
    }

    /// Prepends every value of `values` at the front, preserving their
    /// order. Returns the first inserted node, or `None` if `values` was
    /// empty.
    pub fn prepend_many<I>(&mut self, values: I) -> Option<NodeRef<T>>
    where
        I: IntoIterator<Item = T>,
    {
        self.extend_before(values, None)
    }

    /// Inserts every value of `values` directly before `before`, preserving
    /// their order. Returns the first inserted node, or `None` if `values`
    /// was empty.
    ///
    /// # Errors
    ///
    /// [`InvalidNodeError`] if `before` was removed or belongs to another
    /// list; nothing is consumed from `values` and the chain is untouched.
    pub fn prepend_many_before<I>(
        &mut self,
        values: I,
        before: &NodeRef<T>,
    ) -> Result<Option<NodeRef<T>>, InvalidNodeError>
    where
        I: IntoIterator<Item = T>,
    {
        let anchor = self.owned_index(before)?;
        Ok(self.extend_before(values, Some(anchor)))
    }

    /// Reverses the list in place.
    ///
    /// Swaps the links of every chained node and then the endpoints: O(n)
    /// time, O(1) extra space, no node is moved or reallocated. Held
    /// [`NodeRef`]s stay valid and now sit at the mirrored position.
    pub fn reverse(&mut self) {
        let mut core = self.core.borrow_mut();
        let mut cursor = core.first;
        while let Some(index) = cursor {
            let slot = core.slot_mut(index);
            cursor = slot.next;
            std::mem::swap(&mut slot.prev, &mut slot.next);
        }
        core.swap_ends();
    }

    /// Removes **every** node whose value equals `value` and returns how
    /// many were unlinked.
    ///
    /// This is removal-by-value over the whole collection, not first-match
    /// removal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use capstan_list::list::DoublyLinkedList;
    /// # use capstan_seq::sequence::Sequence;
    /// let mut list: DoublyLinkedList<i32> =
    ///     [7, 1, 2, 3, 6, 4, 5, 6, 7, 7].into_iter().collect();
    /// assert_eq!(list.remove(&6), 2);
    /// assert_eq!(
    ///     list.values().cursor().collect::<Vec<_>>(),
    ///     vec![7, 1, 2, 3, 4, 5, 7, 7]
    /// );
    /// ```
    pub fn remove(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        let mut matches: SmallVec<[NodeIndex; MATCH_BUF]> = SmallVec::new();
        {
            let core = self.core.borrow();
            let mut cursor = core.first;
            while let Some(index) = cursor {
                let slot = core.slot(index);
                if slot.value == *value {
                    matches.push(index);
                }
                cursor = slot.next;
            }
        }
        let mut core = self.core.borrow_mut();
        for &index in &matches {
            core.unlink(index);
        }
        matches.len()
    }

    /// Removes exactly the given node.
    ///
    /// Returns `true` if the node was unlinked. A node that was already
    /// removed or belongs to a different list is left alone and `false` is
    /// returned; unlike the anchored insertions, handing a stale handle to
    /// `remove_node` is an expected, harmless condition.
    pub fn remove_node(&mut self, node: &NodeRef<T>) -> bool {
        match self.owned_index(node) {
            Ok(index) => {
                self.core.borrow_mut().unlink(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Removes every node equal to any of `values`; returns the total
    /// number unlinked.
    pub fn remove_many<'a, I>(&mut self, values: I) -> usize
    where
        T: PartialEq + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        values.into_iter().map(|value| self.remove(value)).sum()
    }

    /// Unlinks the head node and returns its (now detached) handle.
    ///
    /// No-op returning `None` on an empty list.
    pub fn remove_first(&mut self) -> Option<NodeRef<T>> {
        let index = self.core.borrow().first?;
        self.core.borrow_mut().unlink(index);
        Some(self.handle(index))
    }

    /// Unlinks the tail node and returns its (now detached) handle.
    ///
    /// No-op returning `None` on an empty list.
    pub fn remove_last(&mut self) -> Option<NodeRef<T>> {
        let index = self.core.borrow().last?;
        self.core.borrow_mut().unlink(index);
        Some(self.handle(index))
    }

    /// Unlinks every node, front to back, leaving the list empty.
    pub fn remove_all(&mut self) {
        let mut core = self.core.borrow_mut();
        while let Some(index) = core.first {
            core.unlink(index);
        }
    }

    /// Unlinks exactly the nodes for which `predicate` holds and returns
    /// how many were removed.
    ///
    /// The predicate runs once per node in forward order over the live
    /// chain; matching nodes are collected first and unlinked afterwards.
    pub fn remove_all_where<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&NodeRef<T>, usize) -> bool,
    {
        let mut matches: SmallVec<[NodeIndex; MATCH_BUF]> = SmallVec::new();
        let mut cursor = self.core.borrow().first;
        let mut index = 0usize;
        while let Some(node_index) = cursor {
            cursor = self.core.borrow().slot(node_index).next;
            let node = self.handle(node_index);
            if predicate(&node, index) {
                matches.push(node_index);
            }
            index += 1;
        }
        let mut core = self.core.borrow_mut();
        for &node_index in &matches {
            core.unlink(node_index);
        }
        matches.len()
    }

    #[inline]
    fn handle(&self, index: NodeIndex) -> NodeRef<T> {
        NodeRef::new(Rc::clone(&self.core), index)
    }

    /// Resolves a handle to its slot index, provided this list currently
    /// owns the node.
    fn owned_index(&self, node: &NodeRef<T>) -> Result<NodeIndex, InvalidNodeError> {
        if !Rc::ptr_eq(&self.core, node.core()) {
            return Err(InvalidNodeError::Foreign);
        }
        if !self.core.borrow().is_owned(node.index()) {
            return Err(InvalidNodeError::Detached);
        }
        Ok(node.index())
    }

    fn insert_after(&mut self, value: T, after: Option<NodeIndex>) -> NodeRef<T> {
        let mut core = self.core.borrow_mut();
        let index = core.alloc(value);
        core.attach_after(index, after);
        drop(core);
        self.handle(index)
    }

    fn insert_before(&mut self, value: T, before: Option<NodeIndex>) -> NodeRef<T> {
        let mut core = self.core.borrow_mut();
        let index = core.alloc(value);
        core.attach_before(index, before);
        drop(core);
        self.handle(index)
    }

    /// Inserts a run of values after `after` (or at the back), each value
    /// anchored off the previously inserted node.
    fn extend_after<I>(&mut self, values: I, after: Option<NodeIndex>) -> Option<NodeRef<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut anchor = after;
        let mut inserted = None;
        for value in values {
            let node = self.insert_after(value, anchor);
            anchor = Some(node.index());
            inserted = Some(node);
        }
        inserted
    }

    /// Seats the first value before `before` (or at the front), then
    /// appends the remaining values after it, preserving input order.
    fn extend_before<I>(&mut self, values: I, before: Option<NodeIndex>) -> Option<NodeRef<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut values = values.into_iter();
        let first = self.insert_before(values.next()?, before);
        let mut anchor = first.index();
        for value in values {
            anchor = self.insert_after(value, Some(anchor)).index();
        }
        Some(first)
    }
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for DoublyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

/// Iterating a list yields its nodes, front to back.
///
/// The cursor holds its own handle to the chain state, so the loop body may
/// mutate the list freely.
impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = NodeRef<T>;
    type IntoIter = NodeCursor<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes().cursor()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for DoublyLinkedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.core.borrow();
        let mut list = f.debug_list();
        let mut cursor = core.first;
        while let Some(index) = cursor {
            let slot = core.slot(index);
            list.entry(&slot.value);
            cursor = slot.next;
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values_of(list: &DoublyLinkedList<i32>) -> Vec<i32> {
        list.values().cursor().collect()
    }

    #[test]
    fn test_creation() {
        let empty: DoublyLinkedList<i32> = DoublyLinkedList::new();
        assert_eq!(empty.first(), None);
        assert_eq!(empty.last(), None);
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());

        let list: DoublyLinkedList<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(*list.first().unwrap().value(), 1);
        assert_eq!(*list.last().unwrap().value(), 3);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_iteration_in_both_directions() {
        let list: DoublyLinkedList<i32> = [1, 2, 3].into_iter().collect();
        let mut counter = 0;
        for node in &list {
            counter += 1;
            assert_eq!(*node.value(), counter);
        }
        for node in list.nodes().backwards().cursor() {
            assert_eq!(*node.value(), counter);
            counter -= 1;
        }
        assert_eq!(values_of(&list), vec![1, 2, 3]);
        assert_eq!(
            list.values().backwards().cursor().collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
    }

    #[test]
    fn test_prepend_with_anchors() {
        let mut list = DoublyLinkedList::new();
        list.prepend(5);
        list.prepend(1);
        let el = list.prepend_before(3, &list.last().unwrap()).unwrap();
        list.prepend_before(2, &el).unwrap();
        list.prepend_before(4, &list.last().unwrap()).unwrap();
        assert_eq!(values_of(&list), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_append_with_anchors() {
        let mut list = DoublyLinkedList::new();
        list.append(1);
        list.append(5);
        let el = list.append_after(3, &list.first().unwrap()).unwrap();
        list.append_after(4, &el).unwrap();
        list.append_after(2, &list.first().unwrap()).unwrap();
        assert_eq!(values_of(&list), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_prepend_many() {
        let mut list = DoublyLinkedList::new();
        let first = list.prepend_many([1, 5]).unwrap();
        assert_eq!(*first.value(), 1);
        let run = list
            .prepend_many_before([2, 3, 4], &list.last().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(*run.value(), 2);
        assert_eq!(values_of(&list), vec![1, 2, 3, 4, 5]);
        assert_eq!(list.prepend_many(std::iter::empty()), None);
    }

    #[test]
    fn test_append_many() {
        let mut list = DoublyLinkedList::new();
        let last = list.append_many([1, 5]).unwrap();
        assert_eq!(*last.value(), 5);
        let run = list
            .append_many_after([2, 3, 4], &list.first().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(*run.value(), 4);
        assert_eq!(values_of(&list), vec![1, 2, 3, 4, 5]);
        assert_eq!(list.append_many(std::iter::empty()), None);
    }

    #[test]
    fn test_batch_insert_equals_repeated_single_inserts() {
        let mut batched: DoublyLinkedList<i32> = [1, 9].into_iter().collect();
        let mut stepped: DoublyLinkedList<i32> = [1, 9].into_iter().collect();

        let anchor = batched.first().unwrap();
        assert!(batched.append_many_after([2, 3, 4], &anchor).unwrap().is_some());

        let mut anchor = stepped.first().unwrap();
        for value in [2, 3, 4] {
            anchor = stepped.append_after(value, &anchor).unwrap();
        }

        assert_eq!(values_of(&batched), values_of(&stepped));
        assert_eq!(values_of(&batched), vec![1, 2, 3, 4, 9]);
    }

    #[test]
    fn test_reverse() {
        let mut list1: DoublyLinkedList<i32> = DoublyLinkedList::new();
        let mut list2: DoublyLinkedList<i32> = [1].into_iter().collect();
        let mut list3: DoublyLinkedList<i32> = [1, 2].into_iter().collect();
        let mut list4: DoublyLinkedList<i32> = [1, 2, 3, 4, 5].into_iter().collect();
        list1.reverse();
        list2.reverse();
        list3.reverse();
        list4.reverse();
        assert_eq!(values_of(&list1), Vec::<i32>::new());
        assert_eq!(values_of(&list2), vec![1]);
        assert_eq!(values_of(&list3), vec![2, 1]);
        assert_eq!(values_of(&list4), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_reverse_is_an_involution_and_keeps_handles_valid() {
        let mut list: DoublyLinkedList<i32> = [1, 2, 3].into_iter().collect();
        let head = list.first().unwrap();

        list.reverse();
        assert_eq!(*head.value(), 1);
        assert_eq!(head, list.last().unwrap());
        assert_eq!(head.next(), None);
        assert_eq!(*head.prev().unwrap().value(), 2);

        list.reverse();
        assert_eq!(values_of(&list), vec![1, 2, 3]);
        assert_eq!(head, list.first().unwrap());
    }

    #[test]
    fn test_removals() {
        let mut list: DoublyLinkedList<i32> = [1, 2, 3, 4, 5].into_iter().collect();
        let gone = list.remove_first().unwrap();
        assert_eq!(*gone.value(), 1);
        assert_eq!(values_of(&list), vec![2, 3, 4, 5]);
        assert!(list.remove_last().is_some());
        assert_eq!(values_of(&list), vec![2, 3, 4]);
        assert!(list.remove_node(&list.first().unwrap().next().unwrap()));
        assert_eq!(values_of(&list), vec![2, 4]);
        assert_eq!(list.remove(&4), 1);
        assert_eq!(values_of(&list), vec![2]);
        assert!(list.remove_last().is_some());
        assert_eq!(values_of(&list), Vec::<i32>::new());

        assert!(list.append_many([2, 3, 4]).is_some());
        list.remove_all();
        assert_eq!(values_of(&list), Vec::<i32>::new());
        assert_eq!(list.len(), 0);

        // All removal forms are no-ops on an empty list.
        assert_eq!(list.remove_first(), None);
        assert_eq!(list.remove_last(), None);
        assert_eq!(list.remove(&42), 0);
        list.remove_all();
        assert_eq!(values_of(&list), Vec::<i32>::new());
    }

    #[test]
    fn test_remove_by_value_removes_every_match() {
        let mut list: DoublyLinkedList<i32> =
            [7, 1, 2, 3, 6, 4, 5, 6, 7, 7].into_iter().collect();
        assert_eq!(list.remove(&6), 2);
        assert_eq!(values_of(&list), vec![7, 1, 2, 3, 4, 5, 7, 7]);
        assert_eq!(list.remove(&7), 3);
        assert_eq!(values_of(&list), vec![1, 2, 3, 4, 5]);
        assert_eq!(list.remove(&42), 0);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_remove_many() {
        let mut list: DoublyLinkedList<i32> = [1, 2, 3, 2, 1].into_iter().collect();
        assert_eq!(list.remove_many([&1, &3]), 3);
        assert_eq!(values_of(&list), vec![2, 2]);
    }

    #[test]
    fn test_remove_all_where() {
        let mut list: DoublyLinkedList<i32> = [1, 2, 3, 4, 5, 6].into_iter().collect();
        let removed = list.remove_all_where(|node, _| *node.value() % 2 == 0);
        assert_eq!(removed, 3);
        assert_eq!(values_of(&list), vec![1, 3, 5]);

        let mut seen = Vec::new();
        list.remove_all_where(|node, index| {
            seen.push((*node.value(), index));
            false
        });
        assert_eq!(seen, vec![(1, 0), (3, 1), (5, 2)]);
        assert_eq!(values_of(&list), vec![1, 3, 5]);
    }

    #[test]
    fn test_removing_visited_nodes_during_traversal() {
        let mut list: DoublyLinkedList<i32> = [1, 2, 3, 4, 5].into_iter().collect();
        let nodes = list.nodes();
        nodes.for_each(|node, index| {
            if index > 2 {
                list.remove_node(&node);
            }
        });
        assert_eq!(values_of(&list), vec![1, 2, 3]);
    }

    #[test]
    fn test_inserting_ahead_during_traversal() {
        let mut list: DoublyLinkedList<i32> = [1, 2, 3].into_iter().collect();
        list.first().unwrap().next().unwrap().set_value(3);
        list.last().unwrap().set_value(5);
        assert_eq!(values_of(&list), vec![1, 3, 5]);

        let nodes = list.nodes();
        nodes.for_each(|node, index| {
            if index > 0 {
                let filler = *node.value() - 1;
                list.prepend_before(filler, &node).unwrap();
            }
        });
        assert_eq!(values_of(&list), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_detached_nodes_are_rejected_as_anchors() {
        let mut list: DoublyLinkedList<i32> = [1, 2, 3, 4, 5].into_iter().collect();
        let node = list.first().unwrap().next().unwrap();
        assert!(list.remove_node(&node));

        // The orphan still knows where it used to live...
        assert_eq!(node.prev(), list.first());
        assert_eq!(node.next(), list.first().unwrap().next());

        // ...but no structural operation accepts it again.
        assert!(!list.remove_node(&node));
        assert_eq!(
            list.append_after(1, &node).unwrap_err(),
            InvalidNodeError::Detached
        );
        assert_eq!(
            list.append_many_after([1, 2], &node).unwrap_err(),
            InvalidNodeError::Detached
        );
        assert_eq!(
            list.prepend_before(1, &node).unwrap_err(),
            InvalidNodeError::Detached
        );
        assert_eq!(
            list.prepend_many_before([1, 2], &node).unwrap_err(),
            InvalidNodeError::Detached
        );
        assert_eq!(values_of(&list), vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_foreign_nodes_are_rejected_as_anchors() {
        let mut list1: DoublyLinkedList<i32> = [1, 2, 3, 4, 5].into_iter().collect();
        let list2: DoublyLinkedList<i32> = [1, 2, 3, 4, 5].into_iter().collect();
        let node = list2.first().unwrap();

        assert!(!list1.remove_node(&node));
        assert_eq!(
            list1.append_after(1, &node).unwrap_err(),
            InvalidNodeError::Foreign
        );
        assert_eq!(
            list1.append_many_after([1, 2], &node).unwrap_err(),
            InvalidNodeError::Foreign
        );
        assert_eq!(
            list1.prepend_before(1, &node).unwrap_err(),
            InvalidNodeError::Foreign
        );
        assert_eq!(
            list1.prepend_many_before([1, 2], &node).unwrap_err(),
            InvalidNodeError::Foreign
        );
        assert_eq!(values_of(&list1), vec![1, 2, 3, 4, 5]);
        assert_eq!(values_of(&list2), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_failed_batch_insert_consumes_no_values() {
        let mut list: DoublyLinkedList<i32> = [1].into_iter().collect();
        let stale = list.remove_first().unwrap();

        let mut pulled = 0;
        let values = std::iter::from_fn(|| {
            pulled += 1;
            Some(pulled)
        })
        .take(3);
        assert!(list.append_many_after(values, &stale).is_err());
        assert_eq!(pulled, 0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_mutation_through_a_for_loop() {
        let mut list: DoublyLinkedList<i32> = [1, 2, 3, 4].into_iter().collect();
        for node in &list {
            if *node.value() % 2 == 0 {
                list.remove_node(&node);
            }
        }
        assert_eq!(values_of(&list), vec![1, 3]);
    }

    #[test]
    fn test_extend_appends_in_order() {
        let mut list: DoublyLinkedList<i32> = [1].into_iter().collect();
        list.extend([2, 3]);
        assert_eq!(values_of(&list), vec![1, 2, 3]);
    }

    #[test]
    fn test_debug_renders_like_a_list() {
        let list: DoublyLinkedList<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(format!("{:?}", list), "[1, 2, 3]");
    }

    #[test]
    fn test_length_tracks_every_mutation() {
        let mut list = DoublyLinkedList::new();
        assert_eq!(list.len(), 0);
        list.append(1);
        list.prepend(0);
        list.extend([2, 3]);
        assert_eq!(list.len(), 4);
        assert!(list.remove_first().is_some());
        assert_eq!(list.len(), 3);
        list.remove(&3);
        assert_eq!(list.len(), 2);
        list.remove_all();
        assert_eq!(list.len(), 0);
    }
}
