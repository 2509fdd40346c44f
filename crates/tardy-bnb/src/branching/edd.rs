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

//! Earliest-due-date branching
//!
//! Branches on the undecided job with the smallest due date. Urgent jobs are
//! the ones most likely to be forced tardy, so deciding them early tends to
//! expose infeasible on-time sets near the root.
//!
//! Ties are broken by processing time, then release date, then id, so the
//! choice depends only on the set of remaining jobs.

use crate::{branching::strategy::BranchingStrategy, node::SearchNode};
use tardy_model::{
    job::{Job, JobId},
    num::TimeNumeric,
};

/// Selects the undecided job with the earliest due date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EarliestDueDate;

impl EarliestDueDate {
    /// Creates a new `EarliestDueDate` strategy.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T> BranchingStrategy<T> for EarliestDueDate
where
    T: TimeNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "EarliestDueDate"
    }

    #[inline]
    fn select(&mut self, _node: &SearchNode, remaining: &[Job<T>]) -> Option<JobId> {
        remaining
            .iter()
            .min_by_key(|j| (j.due_date(), j.processing_time(), j.release(), j.id()))
            .map(|j| j.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    #[test]
    fn test_picks_earliest_due_date() {
        let jobs = [
            Job::<IntegerType>::new(1, 0, 2, 9),
            Job::<IntegerType>::new(2, 0, 4, 3),
            Job::<IntegerType>::new(3, 0, 1, 5),
        ];
        let node = SearchNode::root(3);
        assert_eq!(EarliestDueDate.select(&node, &jobs), Some(JobId::new(2)));
    }

    #[test]
    fn test_ties_broken_by_processing_time_then_id() {
        let jobs = [
            Job::<IntegerType>::new(5, 0, 3, 4),
            Job::<IntegerType>::new(4, 0, 2, 4),
            Job::<IntegerType>::new(2, 0, 2, 4),
        ];
        let node = SearchNode::root(3);
        assert_eq!(EarliestDueDate.select(&node, &jobs), Some(JobId::new(2)));
    }
}
