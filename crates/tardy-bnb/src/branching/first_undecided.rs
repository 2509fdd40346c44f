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

//! Input-order branching
//!
//! Branches on the undecided job that appears first in the instance. This is
//! the plain lexicographic order of the decision tree and the default
//! strategy of the solver.

use crate::{branching::strategy::BranchingStrategy, node::SearchNode};
use tardy_model::{
    job::{Job, JobId},
    num::TimeNumeric,
};

/// Selects the first undecided job in instance order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstUndecided;

impl FirstUndecided {
    /// Creates a new `FirstUndecided` strategy.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T> BranchingStrategy<T> for FirstUndecided
where
    T: TimeNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "FirstUndecided"
    }

    #[inline]
    fn select(&mut self, _node: &SearchNode, remaining: &[Job<T>]) -> Option<JobId> {
        remaining.first().map(|job| job.id())
    }
}
