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

//! Knapsack relaxation bound
//!
//! Drops release dates and replaces every due date by the horizon
//! `H = max d_j`. On-time jobs then only have to fit into `[0, H]`, so at most
//! `K*` of them can be on time, where `K*` is the optimum of the 0/1 knapsack
//! with weights `p_j`, unit values and capacity `H`. The bound is `n - K*`.
//!
//! With unit values the DP stores, per capacity, the largest number of jobs
//! whose processing times fit. The capacity is clamped to `min(H, Σp)`, and
//! `K* = n` without any table when all jobs fit. Capacities above
//! `MAX_DP_CAPACITY` switch to counting the shortest jobs first, which gives
//! the same `K*` for unit values without an `O(H)` table.

use crate::bound::lower_bound::LowerBound;
use tardy_model::{job::Job, num::TimeNumeric};

/// Largest capacity solved with the DP table.
pub const MAX_DP_CAPACITY: usize = 1 << 20;

/// The knapsack relaxation bound with a reusable DP table.
#[derive(Debug, Clone, Default)]
pub struct KnapsackBound {
    dp: Vec<u32>,
    weights: Vec<usize>,
}

impl KnapsackBound {
    /// Creates a new bound.
    #[inline]
    pub fn new() -> Self {
        Self {
            dp: Vec::new(),
            weights: Vec::new(),
        }
    }

    /// Creates a new bound with room for horizons up to `max_horizon`.
    #[inline]
    pub fn preallocated(max_horizon: usize) -> Self {
        Self {
            dp: Vec::with_capacity(max_horizon.min(MAX_DP_CAPACITY).saturating_add(1)),
            weights: Vec::new(),
        }
    }

    /// Returns `K*`, the largest number of jobs whose processing times fit
    /// into `capacity`.
    pub fn max_fitting_jobs<T>(&mut self, jobs: &[Job<T>], capacity: usize) -> usize
    where
        T: TimeNumeric,
    {
        self.weights.clear();
        self.weights.extend(
            jobs.iter()
                .filter_map(|job| job.processing_time().to_usize())
                .filter(|&weight| weight <= capacity),
        );

        let total = self
            .weights
            .iter()
            .fold(0usize, |acc, &w| acc.saturating_add(w));
        if total <= capacity {
            return self.weights.len();
        }

        if capacity > MAX_DP_CAPACITY {
            return self.shortest_first(capacity);
        }

        self.dp.clear();
        self.dp.resize(capacity + 1, 0);

        for &weight in &self.weights {
            for c in (weight..=capacity).rev() {
                let with = self.dp[c - weight] + 1;
                if with > self.dp[c] {
                    self.dp[c] = with;
                }
            }
        }

        self.dp[capacity] as usize
    }

    /// With unit values an optimal packing takes the shortest jobs first.
    fn shortest_first(&mut self, capacity: usize) -> usize {
        self.weights.sort_unstable();
        let mut used = 0usize;
        let mut count = 0;
        for &weight in &self.weights {
            match used.checked_add(weight) {
                Some(next) if next <= capacity => {
                    used = next;
                    count += 1;
                }
                _ => break,
            }
        }
        count
    }
}

impl<T> LowerBound<T> for KnapsackBound
where
    T: TimeNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "KnapsackBound"
    }

    fn lower_bound(&mut self, jobs: &[Job<T>]) -> usize {
        let Some(horizon) = jobs.iter().map(|j| j.due_date()).max() else {
            return 0;
        };

        if horizon <= T::zero() {
            // No job with a positive processing time completes by time 0.
            return jobs.len();
        }

        let capacity = horizon.to_usize().unwrap_or(usize::MAX);
        jobs.len() - self.max_fitting_jobs(jobs, capacity)
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
        assert_eq!(KnapsackBound::new().lower_bound(&jobs), 3);
    }

    #[test]
    fn test_forced_single_tardy() {
        let jobs = [job(1, 0, 5, 5), job(2, 0, 5, 9), job(3, 0, 5, 10)];
        // H = 10 holds two jobs of length 5.
        assert_eq!(KnapsackBound::new().lower_bound(&jobs), 1);
    }

    #[test]
    fn test_all_fit_gives_zero() {
        let jobs = [job(1, 0, 2, 2), job(2, 0, 1, 3), job(3, 0, 3, 6)];
        assert_eq!(KnapsackBound::new().lower_bound(&jobs), 0);
    }

    #[test]
    fn test_prefers_many_short_jobs() {
        let jobs = [job(1, 0, 6, 6), job(2, 0, 3, 6), job(3, 0, 3, 6)];
        let mut bound = KnapsackBound::preallocated(6);
        assert_eq!(bound.max_fitting_jobs(&jobs, 6), 2);
        assert_eq!(bound.lower_bound(&jobs), 1);
    }

    #[test]
    fn test_zero_horizon_makes_everything_tardy() {
        let jobs = [job(1, 0, 1, 0), job(2, 0, 2, 0)];
        assert_eq!(KnapsackBound::new().lower_bound(&jobs), 2);
    }

    #[test]
    fn test_ignores_release_dates() {
        // Release dates make J3 tardy, the relaxation cannot see it.
        let jobs = [job(1, 0, 4, 7), job(2, 0, 4, 8), job(3, 8, 3, 10)];
        assert_eq!(KnapsackBound::new().lower_bound(&jobs), 1);
        let jobs = [job(3, 8, 3, 10)];
        assert_eq!(KnapsackBound::new().lower_bound(&jobs), 0);
    }

    #[test]
    fn test_distant_due_date_needs_no_table() {
        let jobs = [
            job(1, 0, 5, 1_000_000_000_000_000),
            job(2, 0, 5, 9),
            job(3, 0, 5, 10),
        ];
        let mut bound = KnapsackBound::new();
        assert_eq!(bound.lower_bound(&jobs), 0);
        assert!(bound.dp.capacity() <= MAX_DP_CAPACITY + 1);
    }

    #[test]
    fn test_large_capacity_counts_shortest_jobs() {
        let big = 1_000_000_000_000;
        let jobs = [
            job(1, 0, big, 3 * big),
            job(2, 0, 2 * big, 3 * big),
            job(3, 0, 2 * big, 3 * big),
            job(4, 0, 3 * big, 3 * big),
        ];
        let mut bound = KnapsackBound::new();
        // 1 + 2 fits into 3, any further job does not.
        assert_eq!(bound.lower_bound(&jobs), 2);
        assert!(bound.dp.is_empty());
    }

    #[test]
    fn test_dp_and_shortest_first_agree() {
        let jobs = [job(1, 0, 4, 10), job(2, 0, 3, 10), job(3, 0, 5, 10), job(4, 0, 2, 10)];
        let mut bound = KnapsackBound::new();
        for capacity in 0..=14 {
            let dp = bound.max_fitting_jobs(&jobs, capacity);
            bound.weights = jobs.iter().map(|j| j.processing_time() as usize).collect();
            assert_eq!(dp, bound.shortest_first(capacity), "capacity {}", capacity);
        }
    }
}
