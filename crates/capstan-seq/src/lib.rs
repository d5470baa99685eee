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

//! # Capstan Seq
//!
//! Lazy, chainable, resumable sequence primitives for the Capstan
//! collections. A *sequence* here is a stateless handle that can start any
//! number of independent traversals over some backing source; a *cursor* is
//! one such traversal in flight. Transformation stages (`filter`, `map`)
//! defer every callback invocation until a consumer actually pulls
//! elements, and pull exactly one upstream element per downstream demand.
//!
//! ## Modules
//!
//! - `cursor`: The restartable pull protocol (`Cursor`) plus `ReplayCursor`,
//!   a cursor over any cloneable iterator.
//! - `sequence`: The shared enumerable contract (`Sequence`) with eager
//!   terminal operations and deferred `filter`/`map` entry points.
//! - `adapter`: The lazy single-stage adapters behind `filter` and `map`.
//! - `expr`: Producer-of-cursor expressions (`Expr`) and bidirectional
//!   pairings (`Bidirected`).
//!
//! ## Motivation
//!
//! Collection types that expose live views (the Capstan list being the
//! primary consumer) need traversals that observe the backing state at
//! traversal time, not at construction time, and that can be restarted
//! without re-wiring a transformation chain. Keeping the pull protocol and
//! the enumerable contract independent of any concrete collection makes the
//! same chain work over a vector, a range, or a live linked-list view.

pub mod adapter;
pub mod cursor;
pub mod expr;
pub mod sequence;
