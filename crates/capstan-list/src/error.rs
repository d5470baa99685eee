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

//! Errors raised by structural list operations.

/// The error type for anchored insertions given a node the list does not
/// currently own.
///
/// This is a precondition violation on the caller's side, not a recoverable
/// runtime condition: the anchored forms of `append`/`prepend` refuse to
/// touch the chain when the anchor is stale or belongs elsewhere, and they
/// report it immediately rather than guessing a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidNodeError {
    /// The node belongs to a different list.
    Foreign,
    /// The node was already removed from its list.
    Detached,
}

impl std::fmt::Display for InvalidNodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Foreign => write!(f, "Node belongs to a different list"),
            Self::Detached => write!(f, "Node was already removed from its list"),
        }
    }
}

impl std::error::Error for InvalidNodeError {}
