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

//! Minimum-slack branching
//!
//! Branches on the undecided job with the least slack `d - r - p`, i.e. the
//! job with the least room to move before it becomes tardy. Jobs with
//! negative slack can never be on time and are picked first.
//!
//! The slack is computed with plain subtraction rather than `Job::slack`,
//! which saturates at zero and would hide how negative a slack is.

use crate::{branching::strategy::BranchingStrategy, node::SearchNode};
use std::cmp::Ordering;
use tardy_model::{
    job::{Job, JobId},
    num::TimeNumeric,
};

/// Candidate for slack ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlackCandidate<T> {
    slack: T,
    due_date: T,
    id: JobId,
}

impl<T> SlackCandidate<T>
where
    T: TimeNumeric,
{
    #[inline]
    fn from_job(job: &Job<T>) -> Self {
        Self {
            slack: job
                .due_date()
                .saturating_sub(job.release())
                .saturating_sub(job.processing_time()),
            due_date: job.due_date(),
            id: job.id(),
        }
    }
}

impl<T> Ord for SlackCandidate<T>
where
    T: TimeNumeric,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.slack
            .cmp(&other.slack)
            .then_with(|| self.due_date.cmp(&other.due_date))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl<T> PartialOrd for SlackCandidate<T>
where
    T: TimeNumeric,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selects the undecided job with the least slack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimumSlack;

impl MinimumSlack {
    /// Creates a new `MinimumSlack` strategy.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T> BranchingStrategy<T> for MinimumSlack
where
    T: TimeNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "MinimumSlack"
    }

    #[inline]
    fn select(&mut self, _node: &SearchNode, remaining: &[Job<T>]) -> Option<JobId> {
        remaining
            .iter()
            .map(SlackCandidate::from_job)
            .min()
            .map(|c| c.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    #[test]
    fn test_picks_tightest_job() {
        let jobs = [
            Job::<IntegerType>::new(1, 0, 2, 10), // slack 8
            Job::<IntegerType>::new(2, 4, 3, 8),  // slack 1
            Job::<IntegerType>::new(3, 0, 1, 5),  // slack 4
        ];
        let node = SearchNode::root(3);
        assert_eq!(MinimumSlack.select(&node, &jobs), Some(JobId::new(2)));
    }

    #[test]
    fn test_negative_slack_beats_zero_slack() {
        let jobs = [
            Job::<IntegerType>::new(1, 0, 3, 3), // slack 0
            Job::<IntegerType>::new(2, 2, 4, 3), // slack -3
        ];
        let node = SearchNode::root(2);
        assert_eq!(MinimumSlack.select(&node, &jobs), Some(JobId::new(2)));
    }

    #[test]
    fn test_ties_broken_by_due_date_then_id() {
        let jobs = [
            Job::<IntegerType>::new(7, 0, 1, 6),
            Job::<IntegerType>::new(6, 1, 1, 7),
            Job::<IntegerType>::new(5, 0, 1, 6),
        ];
        let node = SearchNode::root(3);
        assert_eq!(MinimumSlack.select(&node, &jobs), Some(JobId::new(5)));
    }
}
