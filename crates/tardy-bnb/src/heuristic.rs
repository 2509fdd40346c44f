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

//! Quick schedules used around the exact search.
//!
//! `heuristic_upper_bound` runs the same EDD simulation as the default
//! feasibility oracle but never aborts: jobs that finish late are recorded as
//! tardy and the clock keeps running. The tardy set it returns is a valid
//! solution (its complement is EDD-feasible), so the solver seeds its
//! incumbent with it, including when it is empty.
//!
//! `preemptive_edd_tardy_count` simulates a preemptive EDD schedule. It is a
//! diagnostic only; it is neither a lower nor an upper bound for the
//! non-preemptive problem and the solver never prunes with it.

use crate::feasibility::edd_order;
use std::{cmp::Reverse, collections::BinaryHeap};
use tardy_model::{job::Job, num::TimeNumeric, solution::Solution};

/// Runs the non-aborting EDD simulation and returns the number of tardy
/// jobs together with the tardy set.
pub fn heuristic_upper_bound<T>(jobs: &[Job<T>]) -> (usize, Solution)
where
    T: TimeNumeric,
{
    let mut sorted = jobs.to_vec();
    sorted.sort_unstable_by(edd_order);

    let mut t = T::zero();
    let mut tardy = Vec::new();
    for job in &sorted {
        t = t.max(job.release()).saturating_add(job.processing_time());
        if t > job.due_date() {
            tardy.push(job.id());
        }
    }

    let solution = Solution::new(tardy);
    (solution.num_tardy(), solution)
}

/// Counts late completions in a preemptive EDD schedule.
///
/// At every release the machine switches to the released job with the
/// earliest due date. Ties are broken by job id.
pub fn preemptive_edd_tardy_count<T>(jobs: &[Job<T>]) -> usize
where
    T: TimeNumeric,
{
    if jobs.is_empty() {
        return 0;
    }

    let mut by_release = jobs.to_vec();
    by_release.sort_unstable_by(|a, b| {
        a.release()
            .cmp(&b.release())
            .then_with(|| a.id().cmp(&b.id()))
    });

    // (due date, id, remaining processing time)
    let mut active = BinaryHeap::with_capacity(jobs.len());
    let mut next = 0;
    let mut t = by_release[0].release();
    let mut tardy = 0;

    while next < by_release.len() || !active.is_empty() {
        while next < by_release.len() && by_release[next].release() <= t {
            let job = &by_release[next];
            active.push(Reverse((job.due_date(), job.id(), job.processing_time())));
            next += 1;
        }

        let Some(Reverse((due, id, remaining))) = active.pop() else {
            t = by_release[next].release();
            continue;
        };

        let run = match by_release.get(next) {
            Some(job) => remaining.min(job.release() - t),
            None => remaining,
        };
        t = t + run;

        if run == remaining {
            if t > due {
                tardy += 1;
            }
        } else {
            active.push(Reverse((due, id, remaining - run)));
        }
    }

    tardy
}
