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

//! # Producer Expressions
//!
//! Sequences built from a producer-of-cursor expression. An [`Expr`] wraps
//! anything implementing [`Produce`] (most commonly a `Fn() -> C` closure)
//! and becomes a full [`Sequence`]; the producer is not invoked when the
//! expression, a derived transformation chain, or even a cursor is
//! constructed, but only when the first element is actually pulled. This keeps
//! producer side effects (and any upstream work they trigger) strictly
//! demand-driven.
//!
//! [`Bidirected`] pairs a forward sequence with an independently-produced
//! reverse sequence exposed through [`Bidirected::backwards`]. The two
//! facets are unrelated closures as far as this module is concerned; each
//! reflects the backing state at its own traversal time.
//!
//! ## Usage
//!
//! ```rust
//! use capstan_seq::cursor::ReplayCursor;
//! use capstan_seq::expr::{Bidirected, Expr};
//! use capstan_seq::sequence::Sequence;
//!
//! let both = Bidirected::new(
//!     Expr::new(|| ReplayCursor::new([1, 2, 3].into_iter())),
//!     Expr::new(|| ReplayCursor::new([3, 2, 1].into_iter())),
//! );
//! assert_eq!(both.cursor().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert_eq!(both.backwards().cursor().collect::<Vec<_>>(), vec![3, 2, 1]);
//! ```

use crate::cursor::Cursor;
use crate::sequence::Sequence;

/// A producer of fresh cursors.
///
/// Implemented for every `Fn() -> C` closure returning a cursor; implement
/// it directly for named producer types that close over live state.
pub trait Produce {
    /// The cursor type this producer starts.
    type Cursor: Cursor;

    /// Starts a fresh cursor over the producer's backing source.
    fn produce(&self) -> Self::Cursor;
}

impl<C, F> Produce for F
where
    C: Cursor,
    F: Fn() -> C,
{
    type Cursor = C;

    fn produce(&self) -> C {
        self()
    }
}

/// A sequence defined by a producer expression.
///
/// `cursor()` hands out a [`Deferred`] that invokes the producer on first
/// pull, so constructing cursors and chaining transformations performs zero
/// upstream work.
#[derive(Clone)]
pub struct Expr<P> {
    producer: P,
}

impl<P> Expr<P>
where
    P: Produce + Clone,
{
    /// Wraps a producer expression into a sequence.
    pub fn new(producer: P) -> Self {
        Self { producer }
    }
}

impl<P> Sequence for Expr<P>
where
    P: Produce + Clone,
{
    type Item = <P::Cursor as Iterator>::Item;
    type Cursor = Deferred<P>;

    fn cursor(&self) -> Self::Cursor {
        Deferred {
            producer: self.producer.clone(),
            live: None,
        }
    }
}

/// A cursor that materializes lazily from its producer.
///
/// The inner cursor is created by the first pull. [`Cursor::rewind`]
/// forwards to the inner cursor when one exists and is otherwise a no-op,
/// so a rewound-but-unpulled `Deferred` still has not touched the producer.
pub struct Deferred<P>
where
    P: Produce,
{
    producer: P,
    live: Option<P::Cursor>,
}

impl<P> Iterator for Deferred<P>
where
    P: Produce,
{
    type Item = <P::Cursor as Iterator>::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let producer = &self.producer;
        self.live.get_or_insert_with(|| producer.produce()).next()
    }
}

impl<P> Cursor for Deferred<P>
where
    P: Produce,
{
    fn rewind(&mut self) {
        if let Some(cursor) = self.live.as_mut() {
            cursor.rewind();
        }
    }
}

/// A forward sequence paired with an independent reverse-order facet.
///
/// Implements [`Sequence`] by delegating to the forward facet; the reverse
/// facet is reached through [`Bidirected::backwards`].
#[derive(Clone)]
pub struct Bidirected<F, B = F> {
    forward: F,
    backwards: B,
}

impl<F, B> Bidirected<F, B> {
    /// Pairs a forward sequence with its reverse-order counterpart.
    pub fn new(forward: F, backwards: B) -> Self {
        Self { forward, backwards }
    }

    /// Returns the reverse-order facet.
    pub fn backwards(&self) -> B
    where
        B: Clone,
    {
        self.backwards.clone()
    }
}

impl<F, B> Sequence for Bidirected<F, B>
where
    F: Sequence,
{
    type Item = F::Item;
    type Cursor = F::Cursor;

    fn cursor(&self) -> Self::Cursor {
        self.forward.cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::ReplayCursor;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_expr_produces_independent_traversals() {
        let data = vec![1, 2, 3];
        let seq = Expr::new(move || ReplayCursor::new(data.clone().into_iter()));
        assert_eq!(seq.cursor().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(seq.cursor().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_producer_runs_only_on_first_pull() {
        let calls = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&calls);
        let seq = Expr::new(move || {
            counter.set(counter.get() + 1);
            ReplayCursor::new([1, 2, 3].into_iter())
        });
        assert_eq!(calls.get(), 0);

        let mut cursor = seq.cursor();
        assert_eq!(calls.get(), 0);
        assert_eq!(cursor.next(), Some(1));
        assert_eq!(calls.get(), 1);
        // Subsequent pulls reuse the materialized cursor.
        cursor.by_ref().for_each(drop);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_whole_chains_stay_unmaterialized_until_pulled() {
        let producer_calls = Rc::new(Cell::new(0usize));
        let filter_calls = Rc::new(Cell::new(0usize));
        let map_calls = Rc::new(Cell::new(0usize));

        let produced = Rc::clone(&producer_calls);
        let filtered = Rc::clone(&filter_calls);
        let mapped = Rc::clone(&map_calls);

        let chain = Expr::new(move || {
            produced.set(produced.get() + 1);
            ReplayCursor::new([1, 2, 3].into_iter())
        })
        .filter(move |_, _| {
            filtered.set(filtered.get() + 1);
            filtered.get() > 2
        })
        .map(move |_, _| {
            mapped.set(mapped.get() + 1);
            42
        });

        let mut cursor = chain.cursor();
        assert_eq!(producer_calls.get(), 0);
        assert_eq!(filter_calls.get(), 0);
        assert_eq!(map_calls.get(), 0);

        assert_eq!(cursor.next(), Some(42));
        assert_eq!(producer_calls.get(), 1);
        assert_eq!(filter_calls.get(), 3);
        assert_eq!(map_calls.get(), 1);

        assert_eq!(cursor.collect::<Vec<_>>(), vec![]);
        assert_eq!(producer_calls.get(), 1);
    }

    #[test]
    fn test_deferred_rewind_before_first_pull_is_inert() {
        let calls = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&calls);
        let seq = Expr::new(move || {
            counter.set(counter.get() + 1);
            ReplayCursor::new(0..3)
        });

        let mut cursor = seq.cursor();
        cursor.rewind();
        assert_eq!(calls.get(), 0);
        assert_eq!(cursor.next(), Some(0));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_deferred_rewind_restarts_the_inner_cursor() {
        let seq = Expr::new(|| ReplayCursor::new(0..3));
        let mut cursor = seq.cursor();
        assert_eq!(cursor.next(), Some(0));
        assert_eq!(cursor.next(), Some(1));
        cursor.rewind();
        assert_eq!(cursor.collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_bidirected_facets_are_independent() {
        let both = Bidirected::new(
            Expr::new(|| ReplayCursor::new([1, 2, 3].into_iter())),
            Expr::new(|| ReplayCursor::new([3, 2, 1].into_iter())),
        );
        assert_eq!(both.cursor().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(both.backwards().cursor().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(both.len(), 3);
    }

    #[test]
    fn test_bidirected_delegates_the_contract_to_the_forward_facet() {
        let both = Bidirected::new(
            Expr::new(|| ReplayCursor::new([10, 20, 30].into_iter())),
            Expr::new(|| ReplayCursor::new([30, 20, 10].into_iter())),
        );
        assert_eq!(both.element_at(-1), Some(30));
        assert_eq!(both.index_of(&20), Some(1));
        assert!(both.some(|x, _| *x == 10));
    }
}
