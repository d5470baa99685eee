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

//! # Live Sequences over the Chain
//!
//! The node and value sequences a list hands out. These are the list's
//! producer closures rendered as named types: each holds a handle to the
//! shared chain state plus a direction, and every traversal starts a fresh
//! cursor that reads the *live* head or tail at its first pull, never a
//! snapshot taken at construction.
//!
//! ## Mutation during traversal
//!
//! A cursor remembers only the node it last yielded. To advance, it reads
//! that node's adjacency link at the moment of the next pull. Unlinking
//! retains a removed node's last-known links, so:
//!
//! - removing the node currently being visited (or any already-visited
//!   node) neither skips nor repeats the rest of the chain;
//! - nodes inserted ahead of the cursor become visible to the same
//!   traversal;
//! - rewinding restarts from whatever the chain's head (or tail) is *now*.
//!
//! There is no isolation level beyond "see the current live chain".

use crate::arena::{ListCore, NodeIndex};
use crate::node::NodeRef;
use capstan_seq::cursor::Cursor;
use capstan_seq::sequence::Sequence;
use std::cell::RefCell;
use std::iter::FusedIterator;
use std::rc::Rc;

/// Traversal direction over the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

/// Where a cursor currently stands.
#[derive(Debug, Clone, Copy)]
enum CursorState {
    /// Not yet pulled; the first pull reads the live head or tail.
    Fresh,
    /// Standing on the node it last yielded.
    At(NodeIndex),
    /// Walked off the end; stays exhausted until rewound.
    Exhausted,
}

/// A live cursor yielding node handles.
pub struct NodeCursor<T> {
    core: Rc<RefCell<ListCore<T>>>,
    direction: Direction,
    state: CursorState,
}

impl<T> NodeCursor<T> {
    pub(crate) fn new(core: Rc<RefCell<ListCore<T>>>, direction: Direction) -> Self {
        Self {
            core,
            direction,
            state: CursorState::Fresh,
        }
    }
}

impl<T> Iterator for NodeCursor<T> {
    type Item = NodeRef<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = {
            let core = self.core.borrow();
            match self.state {
                CursorState::Fresh => match self.direction {
                    Direction::Forward => core.first,
                    Direction::Backward => core.last,
                },
                // Read the link as it is *now*; a node removed mid-visit
                // still knows who its neighbors were.
                CursorState::At(index) => {
                    let slot = core.slot(index);
                    match self.direction {
                        Direction::Forward => slot.next,
                        Direction::Backward => slot.prev,
                    }
                }
                CursorState::Exhausted => None,
            }
        };
        match step {
            Some(index) => {
                self.state = CursorState::At(index);
                Some(NodeRef::new(Rc::clone(&self.core), index))
            }
            None => {
                self.state = CursorState::Exhausted;
                None
            }
        }
    }
}

impl<T> Cursor for NodeCursor<T> {
    fn rewind(&mut self) {
        self.state = CursorState::Fresh;
    }
}

impl<T> FusedIterator for NodeCursor<T> {}

/// A live cursor yielding element values, cloned out of the chain.
pub struct ValueCursor<T> {
    inner: NodeCursor<T>,
}

impl<T> ValueCursor<T> {
    pub(crate) fn new(core: Rc<RefCell<ListCore<T>>>, direction: Direction) -> Self {
        Self {
            inner: NodeCursor::new(core, direction),
        }
    }
}

impl<T: Clone> Iterator for ValueCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|node| node.value().clone())
    }
}

impl<T: Clone> Cursor for ValueCursor<T> {
    fn rewind(&mut self) {
        self.inner.rewind();
    }
}

impl<T: Clone> FusedIterator for ValueCursor<T> {}

/// The node-level sequence of a list, in one fixed direction.
///
/// Obtained (paired with its opposite) from
/// [`DoublyLinkedList::nodes`](crate::list::DoublyLinkedList::nodes).
pub struct NodeSeq<T> {
    core: Rc<RefCell<ListCore<T>>>,
    direction: Direction,
}

impl<T> NodeSeq<T> {
    pub(crate) fn new(core: Rc<RefCell<ListCore<T>>>, direction: Direction) -> Self {
        Self { core, direction }
    }
}

impl<T> Clone for NodeSeq<T> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
            direction: self.direction,
        }
    }
}

impl<T> Sequence for NodeSeq<T> {
    type Item = NodeRef<T>;
    type Cursor = NodeCursor<T>;

    fn cursor(&self) -> Self::Cursor {
        NodeCursor::new(Rc::clone(&self.core), self.direction)
    }
}

/// The value-level sequence of a list, in one fixed direction.
///
/// Obtained (paired with its opposite) from
/// [`DoublyLinkedList::values`](crate::list::DoublyLinkedList::values).
/// Traversal clones values out of the chain, so the `Sequence` impl asks
/// for `T: Clone`.
pub struct ValueSeq<T> {
    core: Rc<RefCell<ListCore<T>>>,
    direction: Direction,
}

impl<T> ValueSeq<T> {
    pub(crate) fn new(core: Rc<RefCell<ListCore<T>>>, direction: Direction) -> Self {
        Self { core, direction }
    }
}

impl<T> Clone for ValueSeq<T> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
            direction: self.direction,
        }
    }
}

impl<T: Clone> Sequence for ValueSeq<T> {
    type Item = T;
    type Cursor = ValueCursor<T>;

    fn cursor(&self) -> Self::Cursor {
        ValueCursor::new(Rc::clone(&self.core), self.direction)
    }
}
