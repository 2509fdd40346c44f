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

//! Explicit depth-first stack of pending search nodes
//!
//! Replaces recursion in the engine. Children are pushed tardy first and
//! on-time second, so the on-time child is popped and explored first. The
//! depth of the tree is bounded by the number of jobs, and every branch adds
//! at most one pending sibling per level, so the stack never holds more than
//! `n + 1` nodes.

use crate::node::SearchNode;

/// A LIFO stack of pending `SearchNode`s.
#[derive(Clone, Debug, Default)]
pub struct SearchStack {
    nodes: Vec<SearchNode>,
}

impl SearchStack {
    /// Creates a new, empty `SearchStack`.
    #[inline]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates a `SearchStack` with room for a full path over `num_jobs` jobs.
    #[inline]
    pub fn preallocated(num_jobs: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(num_jobs.saturating_add(1)),
        }
    }

    /// Ensures the stack can hold a full path over `num_jobs` jobs without
    /// reallocating.
    #[inline]
    pub fn ensure_capacity(&mut self, num_jobs: usize) {
        let capacity = num_jobs.saturating_add(1);
        if self.nodes.capacity() < capacity {
            self.nodes.reserve(capacity - self.nodes.len());
        }
    }

    /// Returns the number of pending nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes are pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pushes a node.
    #[inline]
    pub fn push(&mut self, node: SearchNode) {
        self.nodes.push(node);
    }

    /// Pushes the two children of a branch so that `first` is popped next.
    #[inline]
    pub fn push_children(&mut self, first: SearchNode, second: SearchNode) {
        self.nodes.push(second);
        self.nodes.push(first);
    }

    /// Pops the most recently pushed node.
    #[inline]
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.nodes.pop()
    }

    /// Returns the node that will be popped next.
    #[inline]
    pub fn peek(&self) -> Option<&SearchNode> {
        self.nodes.last()
    }

    /// Clears all pending nodes but keeps the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.nodes.clear();
    }

    /// Returns the allocated capacity in nodes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }
}

impl std::fmt::Display for SearchStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchStack(len: {})", self.nodes.len())
    }
}
