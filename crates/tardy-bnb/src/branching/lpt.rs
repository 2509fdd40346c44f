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

//! Longest-processing-time branching
//!
//! Branches on the undecided job with the largest processing time. Long jobs
//! consume the most capacity, so fixing them first moves the bounds the
//! furthest. Ties go to the earlier due date, then to the smaller id.

use crate::{branching::strategy::BranchingStrategy, node::SearchNode};
use std::cmp::Reverse;
use tardy_model::{
    job::{Job, JobId},
    num::TimeNumeric,
};

/// Selects the undecided job with the longest processing time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LongestProcessingTime;

impl LongestProcessingTime {
    /// Creates a new `LongestProcessingTime` strategy.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T> BranchingStrategy<T> for LongestProcessingTime
where
    T: TimeNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "LongestProcessingTime"
    }

    #[inline]
    fn select(&mut self, _node: &SearchNode, remaining: &[Job<T>]) -> Option<JobId> {
        remaining
            .iter()
            .min_by_key(|j| (Reverse(j.processing_time()), j.due_date(), j.id()))
            .map(|j| j.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    #[test]
    fn test_picks_longest_job() {
        let jobs = [
            Job::<IntegerType>::new(1, 0, 5, 9),
            Job::<IntegerType>::new(2, 0, 7, 30),
            Job::<IntegerType>::new(3, 0, 7, 20),
        ];
        let node = SearchNode::root(3);
        assert_eq!(
            LongestProcessingTime.select(&node, &jobs),
            Some(JobId::new(3))
        );
    }
}
