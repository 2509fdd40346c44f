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

//! Incumbent management for branch-and-bound
//!
//! Three layers:
//! - `Incumbent`: the run-local best count and the list of distinct optimal
//!   tardy sets found so far, kept as bit sets over job positions.
//! - `IncumbentStore`: the seam through which a run reads and publishes
//!   bounds. `NoSharedIncumbent` is the isolated case; `SharedIncumbentAdapter`
//!   forwards to a `SharedIncumbent`.
//! - `SharedIncumbent`: a thread-safe best count plus solution list for
//!   portfolio runs.
//!
//! Invariants
//! - `best_count` only ever decreases.
//! - Every stored set has exactly `best_count` members; sets are unique by
//!   value. The empty set is a legitimate member.
//! - Count and list change together, so any observer sees a consistent pair.

use fixedbitset::FixedBitSet;
use rustc_hash::FxHashSet;
use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};
use tardy_model::solution::Solution;

/// Effect of offering a tardy set to an `Incumbent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncumbentUpdate {
    /// The set beat the best count and replaced all stored sets.
    Improved,
    /// The set tied the best count and was appended.
    Tied,
    /// The set tied the best count but is already stored.
    Duplicate,
    /// The set is worse than the best count.
    Rejected,
}

impl IncumbentUpdate {
    /// Returns `true` if the set was stored.
    #[inline]
    pub fn is_stored(self) -> bool {
        matches!(self, IncumbentUpdate::Improved | IncumbentUpdate::Tied)
    }
}

impl std::fmt::Display for IncumbentUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncumbentUpdate::Improved => write!(f, "Improved"),
            IncumbentUpdate::Tied => write!(f, "Tied"),
            IncumbentUpdate::Duplicate => write!(f, "Duplicate"),
            IncumbentUpdate::Rejected => write!(f, "Rejected"),
        }
    }
}

/// The best tardy count of one run and every distinct tardy set achieving it.
#[derive(Debug, Clone)]
pub struct Incumbent {
    best_count: usize,
    solutions: Vec<FixedBitSet>,
    seen: FxHashSet<FixedBitSet>,
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl Incumbent {
    /// Creates an empty incumbent with `best_count = usize::MAX`.
    #[inline]
    pub fn new() -> Self {
        Self {
            best_count: usize::MAX,
            solutions: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    /// Returns the best tardy count, `usize::MAX` if nothing was found yet.
    #[inline]
    pub fn best_count(&self) -> usize {
        self.best_count
    }

    /// Returns the stored tardy sets in discovery order.
    #[inline]
    pub fn solutions(&self) -> &[FixedBitSet] {
        &self.solutions
    }

    /// Returns the number of stored tardy sets.
    #[inline]
    pub fn num_solutions(&self) -> usize {
        self.solutions.len()
    }

    /// Offers a tardy set.
    ///
    /// A smaller set replaces everything stored, an equal-sized set is
    /// appended unless already present, and a larger one is ignored.
    pub fn offer(&mut self, tardy: &FixedBitSet) -> IncumbentUpdate {
        let count = tardy.count_ones(..);
        if count < self.best_count {
            self.best_count = count;
            self.solutions.clear();
            self.seen.clear();
            self.seen.insert(tardy.clone());
            self.solutions.push(tardy.clone());
            return IncumbentUpdate::Improved;
        }

        if count > self.best_count {
            return IncumbentUpdate::Rejected;
        }

        if self.seen.insert(tardy.clone()) {
            self.solutions.push(tardy.clone());
            IncumbentUpdate::Tied
        } else {
            IncumbentUpdate::Duplicate
        }
    }

    /// Lowers the best count to `bound` if that is tighter. The stored sets
    /// no longer have the best size afterwards and are dropped.
    ///
    /// Returns `true` if the count changed.
    pub fn tighten(&mut self, bound: usize) -> bool {
        if bound >= self.best_count {
            return false;
        }
        self.best_count = bound;
        self.solutions.clear();
        self.seen.clear();
        true
    }

    /// Replaces the incumbent with the single empty tardy set over
    /// `num_jobs` jobs.
    pub fn install_all_on_time(&mut self, num_jobs: usize) {
        let empty = FixedBitSet::with_capacity(num_jobs);
        self.best_count = 0;
        self.solutions.clear();
        self.seen.clear();
        self.seen.insert(empty.clone());
        self.solutions.push(empty);
    }

    /// Clears the incumbent but keeps its allocations.
    #[inline]
    pub fn reset(&mut self) {
        self.best_count = usize::MAX;
        self.solutions.clear();
        self.seen.clear();
    }
}

impl std::fmt::Display for Incumbent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.best_count == usize::MAX {
            write!(f, "Incumbent(none)")
        } else {
            write!(
                f,
                "Incumbent(best_count: {}, solutions: {})",
                self.best_count,
                self.solutions.len()
            )
        }
    }
}

/// Trait for reading and publishing the incumbent of a run.
///
/// Isolated runs use `NoSharedIncumbent`; portfolio members use a
/// `SharedIncumbentAdapter` so that a bound found by one run prunes the
/// others.
pub trait IncumbentStore {
    /// Returns the upper bound known before the run starts.
    fn initial_upper_bound(&self) -> usize;
    /// Returns the tighter of `current_local_best` and the stored bound.
    fn tighten(&self, current_local_best: usize) -> usize;
    /// Publishes a tardy set of size `count`.
    fn on_solution_found(&self, count: usize, solution: &Solution);
    /// Returns the stored best count and its tardy sets, if any.
    fn snapshot(&self) -> Option<(usize, Vec<Solution>)>;
}

/// An `IncumbentStore` that shares nothing.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSharedIncumbent(());

impl NoSharedIncumbent {
    /// Creates a new `NoSharedIncumbent`.
    #[inline(always)]
    pub fn new() -> Self {
        Self(())
    }
}

impl IncumbentStore for NoSharedIncumbent {
    #[inline(always)]
    fn initial_upper_bound(&self) -> usize {
        usize::MAX
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: usize) -> usize {
        current_local_best
    }

    #[inline(always)]
    fn on_solution_found(&self, _count: usize, _solution: &Solution) {}

    #[inline(always)]
    fn snapshot(&self) -> Option<(usize, Vec<Solution>)> {
        None
    }
}

/// An `IncumbentStore` backed by a borrowed `SharedIncumbent`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy)]
pub struct SharedIncumbentAdapter<'a> {
    inner: &'a SharedIncumbent,
}

impl<'a> SharedIncumbentAdapter<'a> {
    /// Wraps the given `SharedIncumbent`.
    #[inline(always)]
    pub fn new(inner: &'a SharedIncumbent) -> Self {
        Self { inner }
    }
}

impl<'a> IncumbentStore for SharedIncumbentAdapter<'a> {
    #[inline(always)]
    fn initial_upper_bound(&self) -> usize {
        self.inner.upper_bound()
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: usize) -> usize {
        self.inner.upper_bound().min(current_local_best)
    }

    #[inline(always)]
    fn on_solution_found(&self, count: usize, solution: &Solution) {
        self.inner.try_install(count, solution);
    }

    #[inline]
    fn snapshot(&self) -> Option<(usize, Vec<Solution>)> {
        self.inner.snapshot()
    }
}

#[derive(Debug, Default)]
struct SharedState {
    best_count: Option<usize>,
    solutions: Vec<Solution>,
}

/// A concurrent holder for the best tardy count and its tardy sets.
///
/// The count is mirrored in an atomic for lock-free reads in the hot loop;
/// the mutex-protected state is the source of truth. Relaxed ordering is
/// enough for the mirror: a stale read only delays pruning.
#[derive(Debug)]
pub struct SharedIncumbent {
    upper_bound: AtomicUsize,
    state: Mutex<SharedState>,
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedIncumbent {
    /// Creates an empty shared incumbent. The upper bound starts at
    /// `usize::MAX`.
    #[inline]
    pub fn new() -> Self {
        Self {
            upper_bound: AtomicUsize::new(usize::MAX),
            state: Mutex::new(SharedState::default()),
        }
    }

    /// Returns the current best count, `usize::MAX` if nothing is installed.
    #[inline]
    pub fn upper_bound(&self) -> usize {
        self.upper_bound.load(Ordering::Relaxed)
    }

    /// Returns the best count and a copy of its tardy sets, if any.
    pub fn snapshot(&self) -> Option<(usize, Vec<Solution>)> {
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        guard
            .best_count
            .map(|count| (count, guard.solutions.clone()))
    }

    /// Offers a tardy set of size `count`.
    ///
    /// Returns `true` if it was stored, either as a new best or as a new
    /// distinct tie.
    pub fn try_install(&self, count: usize, solution: &Solution) -> bool {
        debug_assert_eq!(
            count,
            solution.num_tardy(),
            "called `SharedIncumbent::try_install` with a count that does not match the solution"
        );

        if count > self.upper_bound() {
            return false;
        }

        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have improved the count while we waited.
        match guard.best_count {
            Some(best) if count > best => false,
            Some(best) if count == best => {
                if guard.solutions.contains(solution) {
                    false
                } else {
                    guard.solutions.push(solution.clone());
                    true
                }
            }
            _ => {
                guard.best_count = Some(count);
                guard.solutions.clear();
                guard.solutions.push(solution.clone());
                self.upper_bound.store(count, Ordering::Relaxed);
                true
            }
        }
    }
}

impl std::fmt::Display for SharedIncumbent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SharedIncumbent(upper_bound: {})", self.upper_bound())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tardy_model::job::JobId;

    fn bits(n: usize, ones: &[usize]) -> FixedBitSet {
        let mut set = FixedBitSet::with_capacity(n);
        for &i in ones {
            set.insert(i);
        }
        set
    }

    fn solution(ids: &[u32]) -> Solution {
        Solution::new(ids.iter().copied().map(JobId::new))
    }

    #[test]
    fn test_offer_replaces_appends_and_dedups() {
        let mut inc = Incumbent::new();
        assert_eq!(inc.offer(&bits(4, &[0, 1])), IncumbentUpdate::Improved);
        assert_eq!(inc.offer(&bits(4, &[2, 3])), IncumbentUpdate::Tied);
        assert_eq!(inc.offer(&bits(4, &[0, 1])), IncumbentUpdate::Duplicate);
        assert_eq!(inc.offer(&bits(4, &[0, 1, 2])), IncumbentUpdate::Rejected);
        assert_eq!(inc.best_count(), 2);
        assert_eq!(inc.num_solutions(), 2);

        assert_eq!(inc.offer(&bits(4, &[3])), IncumbentUpdate::Improved);
        assert_eq!(inc.best_count(), 1);
        assert_eq!(inc.solutions(), &[bits(4, &[3])]);
    }

    #[test]
    fn test_empty_set_is_a_solution() {
        let mut inc = Incumbent::new();
        assert_eq!(inc.offer(&bits(3, &[])), IncumbentUpdate::Improved);
        assert_eq!(inc.best_count(), 0);
        assert_eq!(inc.num_solutions(), 1);
        assert!(inc.solutions()[0].is_clear());
    }

    #[test]
    fn test_tighten_drops_stale_solutions() {
        let mut inc = Incumbent::new();
        inc.offer(&bits(4, &[0, 1]));
        assert!(!inc.tighten(2));
        assert_eq!(inc.num_solutions(), 1);
        assert!(inc.tighten(1));
        assert_eq!(inc.best_count(), 1);
        assert_eq!(inc.num_solutions(), 0);
        assert_eq!(inc.offer(&bits(4, &[2])), IncumbentUpdate::Tied);
    }

    #[test]
    fn test_install_all_on_time() {
        let mut inc = Incumbent::new();
        inc.offer(&bits(4, &[0, 1]));
        inc.install_all_on_time(4);
        assert_eq!(inc.best_count(), 0);
        assert_eq!(inc.solutions(), &[FixedBitSet::with_capacity(4)]);
        inc.reset();
        assert_eq!(inc.best_count(), usize::MAX);
        assert_eq!(inc.num_solutions(), 0);
    }

    #[test]
    fn test_no_shared_incumbent_is_passthrough() {
        let store = NoSharedIncumbent::new();
        assert_eq!(store.initial_upper_bound(), usize::MAX);
        assert_eq!(store.tighten(7), 7);
        store.on_solution_found(1, &solution(&[1]));
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_shared_incumbent_install_and_ties() {
        let shared = SharedIncumbent::new();
        assert_eq!(shared.upper_bound(), usize::MAX);
        assert!(shared.snapshot().is_none());

        assert!(shared.try_install(2, &solution(&[1, 2])));
        assert!(shared.try_install(2, &solution(&[3, 4])));
        assert!(!shared.try_install(2, &solution(&[1, 2])));
        assert!(!shared.try_install(3, &solution(&[1, 2, 3])));
        assert_eq!(shared.upper_bound(), 2);

        assert!(shared.try_install(1, &solution(&[5])));
        let (count, sets) = shared.snapshot().expect("snapshot present");
        assert_eq!(count, 1);
        assert_eq!(sets, vec![solution(&[5])]);
    }

    #[test]
    fn test_adapter_mirrors_shared_bound() {
        let shared = SharedIncumbent::new();
        let adapter = SharedIncumbentAdapter::new(&shared);
        assert_eq!(adapter.initial_upper_bound(), usize::MAX);

        adapter.on_solution_found(2, &solution(&[1, 2]));
        assert_eq!(adapter.initial_upper_bound(), 2);
        assert_eq!(adapter.tighten(5), 2);
        assert_eq!(adapter.tighten(1), 1);
        assert_eq!(adapter.snapshot().map(|(c, _)| c), Some(2));
    }

    #[test]
    fn test_shared_incumbent_never_regresses_under_contention() {
        let shared = Arc::new(SharedIncumbent::new());
        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    for k in (1..=8u32).rev() {
                        let ids: Vec<u32> = (0..k).map(|i| t * 100 + i + 1).collect();
                        shared.try_install(ids.len(), &solution(&ids));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker panicked");
        }

        let (count, sets) = shared.snapshot().expect("snapshot present");
        assert_eq!(count, 1);
        assert_eq!(shared.upper_bound(), 1);
        assert_eq!(sets.len(), 4);
        assert!(sets.iter().all(|s| s.num_tardy() == 1));
    }
}
