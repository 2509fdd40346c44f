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

//! Interval-overload bound
//!
//! For a window `[a, b]` every job with `r_j >= a` and `d_j <= b` must run
//! inside the window if it is on time. When the demand `D(a, b)` of those
//! jobs exceeds the window length, at least `D(a, b) - (b - a)` units of
//! processing must be dropped, and a single tardy job drops at most `p_max`
//! of them, so `ceil((D(a, b) - (b - a)) / p_max)` jobs are tardy. `p_max` is
//! the longest job inside the window.
//!
//! Windows range over all pairs of release and due dates. For a fixed left
//! end the right end sweeps upwards over jobs pre-sorted by due date, so a
//! call costs `O(P * (n + P))` for `P` distinct time points.

use crate::bound::lower_bound::LowerBound;
use tardy_model::{job::Job, num::TimeNumeric};

/// The interval-overload bound with reusable buffers.
#[derive(Debug, Clone)]
pub struct IntervalOverloadBound<T> {
    points: Vec<T>,
    by_due: Vec<Job<T>>,
}

impl<T> Default for IntervalOverloadBound<T>
where
    T: TimeNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntervalOverloadBound<T>
where
    T: TimeNumeric,
{
    /// Creates a new bound.
    #[inline]
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            by_due: Vec::new(),
        }
    }

    /// Creates a new bound with buffers for `num_jobs` jobs.
    #[inline]
    pub fn preallocated(num_jobs: usize) -> Self {
        Self {
            points: Vec::with_capacity(2 * num_jobs),
            by_due: Vec::with_capacity(num_jobs),
        }
    }
}

impl<T> LowerBound<T> for IntervalOverloadBound<T>
where
    T: TimeNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "IntervalOverloadBound"
    }

    fn lower_bound(&mut self, jobs: &[Job<T>]) -> usize {
        self.points.clear();
        self.points
            .extend(jobs.iter().flat_map(|j| [j.release(), j.due_date()]));
        self.points.sort_unstable();
        self.points.dedup();

        self.by_due.clear();
        self.by_due.extend_from_slice(jobs);
        self.by_due.sort_unstable_by_key(|j| j.due_date());

        let mut best = 0usize;
        for (i, &a) in self.points.iter().enumerate() {
            let mut demand = T::zero();
            let mut longest = T::zero();
            let mut next = 0;

            for &b in &self.points[i + 1..] {
                while next < self.by_due.len() && self.by_due[next].due_date() <= b {
                    let job = &self.by_due[next];
                    if job.release() >= a {
                        demand = demand.saturating_add(job.processing_time());
                        longest = longest.max(job.processing_time());
                    }
                    next += 1;
                }

                let capacity = b - a;
                if demand > capacity {
                    let overload = demand - capacity;
                    let rounding = if overload % longest == T::zero() {
                        T::zero()
                    } else {
                        T::one()
                    };
                    let tardy = overload / longest + rounding;
                    best = best.max(tardy.to_usize().unwrap_or(0));
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    fn job(id: u32, r: IntegerType, p: IntegerType, d: IntegerType) -> Job<IntegerType> {
        Job::new(id, r, p, d)
    }

    #[test]
    fn test_common_deadline_block() {
        let jobs: Vec<_> = (1..=10).map(|i| job(i, 0, 1, 7)).collect();
        // Window [0, 7] holds demand 10.
        assert_eq!(IntervalOverloadBound::new().lower_bound(&jobs), 3);
    }

    #[test]
    fn test_overload_divided_by_longest_job() {
        let jobs = [job(1, 0, 5, 5), job(2, 0, 5, 9), job(3, 0, 5, 10)];
        // [0, 10]: demand 15, overload 5, one job of length 5 absorbs it.
        assert_eq!(IntervalOverloadBound::new().lower_bound(&jobs), 1);
    }

    #[test]
    fn test_sees_release_windows() {
        // Both jobs live in [8, 10] with demand 4 > 2.
        let jobs = [job(1, 8, 2, 10), job(2, 8, 2, 10), job(3, 0, 1, 20)];
        assert_eq!(IntervalOverloadBound::preallocated(3).lower_bound(&jobs), 1);
    }

    #[test]
    fn test_no_overload_gives_zero() {
        let jobs = [job(1, 0, 2, 2), job(2, 0, 1, 3), job(3, 0, 3, 6)];
        assert_eq!(IntervalOverloadBound::new().lower_bound(&jobs), 0);
    }

    #[test]
    fn test_saturated_demand_does_not_overflow() {
        let huge = IntegerType::MAX / 2 + 1;
        let jobs = [job(1, 0, huge, 1), job(2, 0, huge, 1)];
        // Demand saturates at MAX; ceil((MAX - 1) / huge) = 2.
        assert_eq!(IntervalOverloadBound::new().lower_bound(&jobs), 2);
    }

    #[test]
    fn test_single_hopeless_job() {
        // r + p > d: the window [3, 5] cannot hold it.
        let jobs = [job(1, 3, 4, 5)];
        assert_eq!(IntervalOverloadBound::new().lower_bound(&jobs), 1);
    }
}
