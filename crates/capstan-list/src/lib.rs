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

//! # Capstan List
//!
//! A doubly-linked list whose traversals are live views built on the
//! `capstan-seq` sequence layer. The list owns its nodes in a contiguous
//! slot table; node handles are cheap, clonable, and remain inspectable
//! after removal. Mutating the list while traversing it is supported and
//! well-defined: cursors chase the live chain, and unlinking retains a
//! removed node's last-known neighbors, so removing the node currently
//! being visited cannot break the walk.
//!
//! ## Modules
//!
//! - `list`: The `DoublyLinkedList` itself: anchored insertion, removal by
//!   node or by value, in-place reversal, and the node/value sequence
//!   entry points.
//! - `node`: `NodeRef`, the public node handle (value access, adjacency
//!   walking, identity).
//! - `seq`: The live node/value cursors and the named producer types
//!   feeding the bidirectional sequences.
//! - `error`: The ownership-violation error raised by anchored insertions.
//!
//! ## Design Philosophy
//!
//! 1. **Ownership is a tag, not a pointer cycle**: every node records the
//!    opaque identifier of the list that owns it; structural operations
//!    validate that tag before touching the chain.
//! 2. **Fail-fast**: anchored insertions validate their anchor before any
//!    structural change or input consumption; they either fully apply or
//!    fully reject.
//! 3. **Node identity is never recycled**: removed nodes keep their slot
//!    (and last-known linkage) until the backing storage drops, so stale
//!    handles read consistently instead of aliasing a newer node.

pub mod error;
pub mod list;
pub mod node;
pub mod seq;

mod arena;
