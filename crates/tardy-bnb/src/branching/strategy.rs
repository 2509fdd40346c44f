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

//! Branching-variable selection
//!
//! A `BranchingStrategy` picks the next undecided job to split on. It sees the
//! current node and the undecided jobs `F` (in instance order) and returns the
//! id of one of them, or `None` when it has nothing to offer. The engine
//! treats `None`, and any id that is not in `F`, as a dead end: the node gets
//! no children and the event is counted. It is never an error.
//!
//! The choice only changes the shape of the tree and which optimum is found
//! first; the optimal count is the same for every strategy.

use crate::node::SearchNode;
use tardy_model::job::{Job, JobId};

/// Trait for choosing the job to branch on at a node.
pub trait BranchingStrategy<T> {
    /// Returns the name of the strategy.
    fn name(&self) -> &str;

    /// Returns the id of the job to branch on, chosen from `remaining`.
    fn select(&mut self, node: &SearchNode, remaining: &[Job<T>]) -> Option<JobId>;
}

impl<T, S> BranchingStrategy<T> for Box<S>
where
    S: BranchingStrategy<T> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn select(&mut self, node: &SearchNode, remaining: &[Job<T>]) -> Option<JobId> {
        (**self).select(node, remaining)
    }
}

impl<T> std::fmt::Debug for dyn BranchingStrategy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BranchingStrategy({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn BranchingStrategy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BranchingStrategy({})", self.name())
    }
}

impl<T> std::fmt::Debug for dyn BranchingStrategy<T> + Send {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BranchingStrategy({})", self.name())
    }
}

/// Adapts a closure `(node, remaining) -> Option<JobId>` into a strategy.
///
/// ```
/// use tardy_bnb::{branching::strategy::{BranchingStrategy, FnStrategy}, node::SearchNode};
/// use tardy_model::job::Job;
///
/// // Always branch on the last undecided job.
/// let last = FnStrategy::new("Last", |_: &SearchNode, remaining: &[Job<i64>]| {
///     remaining.last().map(|j| j.id())
/// });
/// assert_eq!(BranchingStrategy::<i64>::name(&last), "Last");
/// ```
pub struct FnStrategy<F> {
    name: String,
    select: F,
}

impl<F> FnStrategy<F> {
    /// Creates a named strategy from a closure.
    #[inline]
    pub fn new(name: impl Into<String>, select: F) -> Self {
        Self {
            name: name.into(),
            select,
        }
    }
}

impl<F> std::fmt::Debug for FnStrategy<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStrategy").field("name", &self.name).finish()
    }
}

impl<T, F> BranchingStrategy<T> for FnStrategy<F>
where
    F: FnMut(&SearchNode, &[Job<T>]) -> Option<JobId>,
{
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn select(&mut self, node: &SearchNode, remaining: &[Job<T>]) -> Option<JobId> {
        (self.select)(node, remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    #[test]
    fn test_fn_strategy_delegates_to_closure() {
        let jobs = [
            Job::<IntegerType>::new(4, 0, 1, 5),
            Job::<IntegerType>::new(9, 0, 1, 5),
        ];
        let node = SearchNode::root(2);
        let mut strategy = FnStrategy::new("Last", |_: &SearchNode, remaining: &[Job<IntegerType>]| {
            remaining.last().map(|j| j.id())
        });

        assert_eq!(strategy.select(&node, &jobs), Some(JobId::new(9)));
        assert_eq!(strategy.select(&node, &[]), None);
    }

    #[test]
    fn test_boxed_dyn_strategy_keeps_name() {
        let boxed: Box<dyn BranchingStrategy<IntegerType>> = Box::new(FnStrategy::new(
            "Never",
            |_: &SearchNode, _: &[Job<IntegerType>]| None,
        ));
        assert_eq!(boxed.name(), "Never");
        assert_eq!(format!("{:?}", boxed), "BranchingStrategy(Never)");
    }
}
