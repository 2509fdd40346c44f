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

//! On-time feasibility of job sets
//!
//! Decides whether every job of a set can complete by its due date on one
//! machine, respecting release dates, without preemption. The default test
//! (`EddFeasibility`) sequences jobs in earliest-due-date order and simulates
//! the machine clock:
//!
//! - sort by due date, ties by processing time (then release, then id, so
//!   the order is a function of the set alone),
//! - `t = 0`; for each job `t = max(t, r) + p`,
//! - infeasible as soon as some `t > d`.
//!
//! The simulation is a sufficient test: a `true` answer comes with an actual
//! schedule. It is the contract used both for pruning forced on-time sets and
//! for leaf verification, so every solution reported by the solver is backed
//! by an EDD schedule. The test is monotone under subsets: removing jobs never
//! delays the remaining ones.
//!
//! Alternative oracles can be plugged into the solver through the
//! `FeasibilityOracle` trait.

use std::cmp::Ordering;
use tardy_model::{job::Job, num::TimeNumeric};

/// A test deciding whether a job set can be scheduled with zero tardiness.
pub trait FeasibilityOracle<T> {
    /// Returns the name of the oracle.
    fn name(&self) -> &str;

    /// Returns `true` if all `jobs` can be completed on time.
    /// The empty set is always feasible.
    fn is_on_time_feasible(&mut self, jobs: &[Job<T>]) -> bool;
}

impl<T> std::fmt::Debug for dyn FeasibilityOracle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FeasibilityOracle({})", self.name())
    }
}

/// The total order used to sequence jobs in every EDD simulation.
#[inline]
pub(crate) fn edd_order<T>(a: &Job<T>, b: &Job<T>) -> Ordering
where
    T: TimeNumeric,
{
    a.due_date()
        .cmp(&b.due_date())
        .then_with(|| a.processing_time().cmp(&b.processing_time()))
        .then_with(|| a.release().cmp(&b.release()))
        .then_with(|| a.id().cmp(&b.id()))
}

/// Runs the EDD clock over jobs that are already in EDD order.
#[inline]
fn simulate_sorted<T>(sorted: &[Job<T>]) -> bool
where
    T: TimeNumeric,
{
    let mut t = T::zero();
    for job in sorted {
        t = t.max(job.release()).saturating_add(job.processing_time());
        if t > job.due_date() {
            return false;
        }
    }
    true
}

/// Checks on-time feasibility with the EDD simulation.
///
/// Allocates a sorted copy of `jobs`; use `EddFeasibility` in hot loops.
pub fn is_on_time_feasible<T>(jobs: &[Job<T>]) -> bool
where
    T: TimeNumeric,
{
    let mut sorted = jobs.to_vec();
    sorted.sort_unstable_by(edd_order);
    simulate_sorted(&sorted)
}

/// The default oracle: EDD simulation with a reusable sort buffer.
#[derive(Debug, Clone, Default)]
pub struct EddFeasibility<T> {
    scratch: Vec<Job<T>>,
}

impl<T> EddFeasibility<T> {
    /// Creates a new oracle.
    #[inline]
    pub fn new() -> Self {
        Self {
            scratch: Vec::new(),
        }
    }

    /// Creates a new oracle whose buffer holds `num_jobs` jobs without
    /// reallocating.
    #[inline]
    pub fn preallocated(num_jobs: usize) -> Self {
        Self {
            scratch: Vec::with_capacity(num_jobs),
        }
    }
}

impl<T> FeasibilityOracle<T> for EddFeasibility<T>
where
    T: TimeNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "EddFeasibility"
    }

    fn is_on_time_feasible(&mut self, jobs: &[Job<T>]) -> bool {
        self.scratch.clear();
        self.scratch.extend_from_slice(jobs);
        self.scratch.sort_unstable_by(edd_order);
        simulate_sorted(&self.scratch)
    }
}
