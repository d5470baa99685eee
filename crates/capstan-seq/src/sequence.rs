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

//! # The Enumerable Contract
//!
//! `Sequence` is the shared contract of every traversable collection view in
//! Capstan. A sequence holds no element data itself; it only knows how to
//! start a fresh [`Cursor`](crate::cursor::Cursor) over its backing source.
//! Because each operation begins its own traversal, sequential or
//! interleaved calls are independent and each observes the live backing
//! state at the moment it runs.
//!
//! ## Highlights
//!
//! - Eager terminal operations (`len`, `index_of`, `element_at`, `every`,
//!   `some`, `find`, `find_index`, `for_each`, `reduce`) perform exactly one
//!   pass over a fresh cursor, handing callbacks the 0-based element index.
//! - Negative positions count back from the end: `element_at(-1)` is the
//!   last element, `index_of_from(&x, -2)` searches the final two slots.
//!   A start index that stays negative after adjustment places no lower
//!   bound at all, so the scan effectively begins at index 0.
//! - `filter`/`map` return new lazily-evaluated sequences; no callback runs
//!   before the result is consumed, and each downstream pull moves exactly
//!   one element through the whole chain.
//!
//! ## Usage
//!
//! ```rust
//! use capstan_seq::cursor::ReplayCursor;
//! use capstan_seq::expr::Expr;
//! use capstan_seq::sequence::Sequence;
//!
//! let seq = Expr::new(|| ReplayCursor::new([1, 2, 3, 4, 5].into_iter()));
//! assert_eq!(seq.len(), 5);
//! assert_eq!(seq.element_at(-1), Some(5));
//!
//! let odds_squared: Vec<_> = seq
//!     .filter(|x, _| x % 2 == 1)
//!     .map(|x, _| x * x)
//!     .cursor()
//!     .collect();
//! assert_eq!(odds_squared, vec![1, 9, 25]);
//! ```

use crate::adapter::{Filtered, Mapped};
use crate::cursor::Cursor;

/// A stateless handle over some traversable backing source.
///
/// Every method that walks elements starts its own cursor via
/// [`Sequence::cursor`], so a `Sequence` can be consulted any number of
/// times and always reflects the backing state of the moment.
pub trait Sequence {
    /// The element type produced by traversals of this sequence.
    type Item;

    /// The cursor type started by [`Sequence::cursor`].
    type Cursor: Cursor<Item = Self::Item>;

    /// Starts a fresh traversal of the backing source.
    fn cursor(&self) -> Self::Cursor;

    /// Counts the elements by running a full fresh traversal.
    ///
    /// O(n), recomputed on every call; nothing is cached.
    fn len(&self) -> usize {
        self.cursor().count()
    }

    /// Returns `true` if a fresh traversal yields no elements.
    fn is_empty(&self) -> bool {
        let mut cursor = self.cursor();
        cursor.next().is_none()
    }

    /// Returns the index of the first element equal to `target`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use capstan_seq::cursor::ReplayCursor;
    /// # use capstan_seq::expr::Expr;
    /// # use capstan_seq::sequence::Sequence;
    /// let seq = Expr::new(|| ReplayCursor::new([1, 2, 3].into_iter()));
    /// assert_eq!(seq.index_of(&3), Some(2));
    /// assert_eq!(seq.index_of(&4), None);
    /// ```
    fn index_of(&self, target: &Self::Item) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        self.index_of_from(target, 0)
    }

    /// Returns the index of the first element equal to `target` at or after
    /// `from_index`.
    ///
    /// A negative `from_index` counts back from the end of the sequence
    /// (computed from a separate `len` traversal). If it is still negative
    /// after that adjustment the lower bound is vacuous and the scan starts
    /// at index 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use capstan_seq::cursor::ReplayCursor;
    /// # use capstan_seq::expr::Expr;
    /// # use capstan_seq::sequence::Sequence;
    /// let seq = Expr::new(|| ReplayCursor::new([1, 2, 3].into_iter()));
    /// assert_eq!(seq.index_of_from(&3, -1), Some(2));
    /// assert_eq!(seq.index_of_from(&2, -1), None);
    /// assert_eq!(seq.index_of_from(&2, -999), Some(1));
    /// ```
    fn index_of_from(&self, target: &Self::Item, from_index: isize) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        let from_index = if from_index < 0 {
            self.len() as isize + from_index
        } else {
            from_index
        };
        let mut cursor = self.cursor();
        let mut index = 0isize;
        while let Some(item) = cursor.next() {
            if index >= from_index && item == *target {
                return Some(index as usize);
            }
            index += 1;
        }
        None
    }

    /// Returns `true` if some element equals `target`.
    fn contains(&self, target: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        self.index_of(target).is_some()
    }

    /// Returns `true` if some element at or after `from_index` equals
    /// `target`. Negative `from_index` behaves as in
    /// [`Sequence::index_of_from`].
    fn contains_from(&self, target: &Self::Item, from_index: isize) -> bool
    where
        Self::Item: PartialEq,
    {
        self.index_of_from(target, from_index).is_some()
    }

    /// Returns the element at `position`, or `None` if the position is out
    /// of bounds in either direction.
    ///
    /// A negative `position` counts back from the end: `-1` is the last
    /// element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use capstan_seq::cursor::ReplayCursor;
    /// # use capstan_seq::expr::Expr;
    /// # use capstan_seq::sequence::Sequence;
    /// let seq = Expr::new(|| ReplayCursor::new([1, 2, 3].into_iter()));
    /// assert_eq!(seq.element_at(0), Some(1));
    /// assert_eq!(seq.element_at(-1), Some(3));
    /// assert_eq!(seq.element_at(3), None);
    /// assert_eq!(seq.element_at(-4), None);
    /// ```
    fn element_at(&self, position: isize) -> Option<Self::Item> {
        let position = if position < 0 {
            let adjusted = self.len() as isize + position;
            if adjusted < 0 {
                return None;
            }
            adjusted
        } else {
            position
        };
        self.cursor().nth(position as usize)
    }

    /// Returns `true` if `predicate` holds for every element.
    ///
    /// Stops pulling at the first element that fails.
    fn every<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Item, usize) -> bool,
    {
        let mut cursor = self.cursor();
        let mut index = 0;
        while let Some(item) = cursor.next() {
            if !predicate(&item, index) {
                return false;
            }
            index += 1;
        }
        true
    }

    /// Returns `true` if `predicate` holds for at least one element.
    ///
    /// Defined as [`Sequence::find`] producing a result.
    fn some<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&Self::Item, usize) -> bool,
    {
        self.find(predicate).is_some()
    }

    /// Returns the first element for which `predicate` holds.
    fn find<P>(&self, mut predicate: P) -> Option<Self::Item>
    where
        P: FnMut(&Self::Item, usize) -> bool,
    {
        let mut cursor = self.cursor();
        let mut index = 0;
        while let Some(item) = cursor.next() {
            if predicate(&item, index) {
                return Some(item);
            }
            index += 1;
        }
        None
    }

    /// Returns the index of the first element for which `predicate` holds.
    fn find_index<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&Self::Item, usize) -> bool,
    {
        let mut cursor = self.cursor();
        let mut index = 0;
        while let Some(item) = cursor.next() {
            if predicate(&item, index) {
                return Some(index);
            }
            index += 1;
        }
        None
    }

    /// Invokes `f` once per element in traversal order.
    fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(Self::Item, usize),
    {
        let mut cursor = self.cursor();
        let mut index = 0;
        while let Some(item) = cursor.next() {
            f(item, index);
            index += 1;
        }
    }

    /// Left-folds the sequence into an accumulator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use capstan_seq::cursor::ReplayCursor;
    /// # use capstan_seq::expr::Expr;
    /// # use capstan_seq::sequence::Sequence;
    /// let seq = Expr::new(|| ReplayCursor::new([1, 2, 3].into_iter()));
    /// assert_eq!(seq.reduce(0, |acc, x, _| acc + x), 6);
    /// ```
    fn reduce<A, F>(&self, initial: A, mut f: F) -> A
    where
        F: FnMut(A, Self::Item, usize) -> A,
    {
        let mut cursor = self.cursor();
        let mut accumulator = initial;
        let mut index = 0;
        while let Some(item) = cursor.next() {
            accumulator = f(accumulator, item, index);
            index += 1;
        }
        accumulator
    }

    /// Returns a new lazily-evaluated sequence keeping the elements for
    /// which `predicate` holds.
    ///
    /// No element is tested before the result is consumed; each downstream
    /// pull tests upstream elements on demand until one passes. The index
    /// handed to the predicate counts upstream elements tested.
    fn filter<P>(self, predicate: P) -> Filtered<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item, usize) -> bool + Clone,
    {
        Filtered::new(self, predicate)
    }

    /// Returns a new lazily-evaluated sequence transforming every element
    /// through `transform`.
    ///
    /// No element is transformed before the result is consumed; each
    /// downstream pull transforms exactly one upstream element.
    fn map<U, F>(self, transform: F) -> Mapped<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item, usize) -> U + Clone,
    {
        Mapped::new(self, transform)
    }
}
