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

//! Search nodes of the on-time/tardy decision tree
//!
//! A `SearchNode` fixes some jobs as on time (`S`) and some as tardy (`T`);
//! the undecided remainder `F = All \ (S ∪ T)` is never stored and is derived
//! on demand. Both sets are bit sets over `JobIndex` positions.
//!
//! Nodes are owned by the branch that created them. Children are built by
//! cloning the parent and adding one decision (copy-on-branch), so siblings
//! never share mutable state. `S ∩ T = ∅` holds for every node and is
//! checked in debug builds whenever a child is created.

use fixedbitset::FixedBitSet;
use tardy_model::{index::JobIndex, job::Job};

/// One point in the decision tree.
#[derive(Clone, PartialEq, Eq)]
pub struct SearchNode {
    on_time: FixedBitSet,
    tardy: FixedBitSet,
    depth: usize,
    bound: Option<usize>,
}

impl SearchNode {
    /// Creates the root node for `num_jobs` jobs: nothing decided.
    #[inline]
    pub fn root(num_jobs: usize) -> Self {
        Self {
            on_time: FixedBitSet::with_capacity(num_jobs),
            tardy: FixedBitSet::with_capacity(num_jobs),
            depth: 0,
            bound: None,
        }
    }

    /// Returns the number of jobs the node ranges over.
    #[inline]
    pub fn num_jobs(&self) -> usize {
        self.on_time.len()
    }

    /// Returns the number of branching decisions made so far.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the lower bound on additional tardy jobs among the undecided
    /// ones, once the solver has computed it.
    #[inline]
    pub fn bound(&self) -> Option<usize> {
        self.bound
    }

    #[inline]
    pub(crate) fn set_bound(&mut self, bound: usize) {
        self.bound = Some(bound);
    }

    /// Returns the set of jobs forced on time.
    #[inline]
    pub fn on_time(&self) -> &FixedBitSet {
        &self.on_time
    }

    /// Returns the set of jobs forced tardy.
    #[inline]
    pub fn tardy(&self) -> &FixedBitSet {
        &self.tardy
    }

    /// Returns `|S|`.
    #[inline]
    pub fn num_on_time(&self) -> usize {
        self.on_time.count_ones(..)
    }

    /// Returns `|T|`.
    #[inline]
    pub fn num_tardy(&self) -> usize {
        self.tardy.count_ones(..)
    }

    /// Returns `|F|`.
    #[inline]
    pub fn num_undecided(&self) -> usize {
        self.num_jobs() - self.num_on_time() - self.num_tardy()
    }

    /// Returns `true` if `index` is forced on time.
    #[inline]
    pub fn is_on_time(&self, index: JobIndex) -> bool {
        self.on_time.contains(index.get())
    }

    /// Returns `true` if `index` is forced tardy.
    #[inline]
    pub fn is_tardy(&self, index: JobIndex) -> bool {
        self.tardy.contains(index.get())
    }

    /// Returns `true` if `index` is a valid position that is in neither set.
    #[inline]
    pub fn is_undecided(&self, index: JobIndex) -> bool {
        index.get() < self.num_jobs() && !self.is_on_time(index) && !self.is_tardy(index)
    }

    /// Returns an iterator over the undecided job indices in ascending order.
    #[inline]
    pub fn undecided(&self) -> impl Iterator<Item = JobIndex> + '_ {
        (0..self.num_jobs())
            .map(JobIndex::new)
            .filter(|&i| self.is_undecided(i))
    }

    /// Writes the jobs of `S` into `out`.
    #[inline]
    pub fn collect_on_time<T: Copy>(&self, jobs: &[Job<T>], out: &mut Vec<Job<T>>) {
        out.clear();
        out.extend(self.on_time.ones().map(|i| jobs[i]));
    }

    /// Writes the jobs of `F` into `out`, in index order.
    #[inline]
    pub fn collect_undecided<T: Copy>(&self, jobs: &[Job<T>], out: &mut Vec<Job<T>>) {
        out.clear();
        out.extend(self.undecided().map(|i| jobs[i.get()]));
    }

    /// Writes the jobs of `All \ T` (equivalently `S ∪ F`) into `out`.
    #[inline]
    pub fn collect_not_tardy<T: Copy>(&self, jobs: &[Job<T>], out: &mut Vec<Job<T>>) {
        out.clear();
        out.extend(
            jobs.iter()
                .enumerate()
                .filter(|(i, _)| !self.tardy.contains(*i))
                .map(|(_, job)| *job),
        );
    }

    /// Returns a child with `index` forced on time.
    #[inline]
    pub fn with_on_time(&self, index: JobIndex) -> Self {
        debug_assert!(
            self.is_undecided(index),
            "called `SearchNode::with_on_time` with decided or out of range job index {}",
            index
        );

        let mut child = self.child();
        child.on_time.insert(index.get());
        child.debug_assert_disjoint();
        child
    }

    /// Returns a child with `index` forced tardy.
    #[inline]
    pub fn with_tardy(&self, index: JobIndex) -> Self {
        debug_assert!(
            self.is_undecided(index),
            "called `SearchNode::with_tardy` with decided or out of range job index {}",
            index
        );

        let mut child = self.child();
        child.tardy.insert(index.get());
        child.debug_assert_disjoint();
        child
    }

    #[inline]
    fn child(&self) -> Self {
        Self {
            on_time: self.on_time.clone(),
            tardy: self.tardy.clone(),
            depth: self.depth + 1,
            bound: None,
        }
    }

    #[inline(always)]
    fn debug_assert_disjoint(&self) {
        debug_assert!(
            self.on_time.is_disjoint(&self.tardy),
            "on-time and tardy sets overlap at depth {}",
            self.depth
        );
    }
}

impl std::fmt::Debug for SearchNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchNode")
            .field("on_time", &self.on_time.ones().collect::<Vec<_>>())
            .field("tardy", &self.tardy.ones().collect::<Vec<_>>())
            .field("depth", &self.depth)
            .field("bound", &self.bound)
            .finish()
    }
}

impl std::fmt::Display for SearchNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchNode(depth: {}, |S|: {}, |T|: {}, |F|: {})",
            self.depth,
            self.num_on_time(),
            self.num_tardy(),
            self.num_undecided()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ji(i: usize) -> JobIndex {
        JobIndex::new(i)
    }

    fn jobs() -> Vec<Job<i64>> {
        (1..=4).map(|i| Job::new(i, 0, 1, i as i64)).collect()
    }

    #[test]
    fn test_root_has_everything_undecided() {
        let root = SearchNode::root(4);
        assert_eq!(root.depth(), 0);
        assert_eq!(root.bound(), None);
        assert_eq!(root.num_undecided(), 4);
        assert_eq!(root.undecided().collect::<Vec<_>>(), vec![ji(0), ji(1), ji(2), ji(3)]);
    }

    #[test]
    fn test_children_are_independent_copies() {
        let root = SearchNode::root(4);
        let on_time = root.with_on_time(ji(1));
        let tardy = root.with_tardy(ji(1));

        assert!(on_time.is_on_time(ji(1)));
        assert!(!on_time.is_tardy(ji(1)));
        assert!(tardy.is_tardy(ji(1)));
        assert!(!tardy.is_on_time(ji(1)));
        assert_eq!(root.num_undecided(), 4);
        assert_eq!(on_time.depth(), 1);
        assert_eq!(tardy.depth(), 1);
    }

    #[test]
    fn test_collect_partitions() {
        let jobs = jobs();
        let node = SearchNode::root(4).with_on_time(ji(0)).with_tardy(ji(2));
        let mut out = Vec::new();

        node.collect_on_time(&jobs, &mut out);
        assert_eq!(out.iter().map(|j| j.id().get()).collect::<Vec<_>>(), vec![1]);

        node.collect_undecided(&jobs, &mut out);
        assert_eq!(out.iter().map(|j| j.id().get()).collect::<Vec<_>>(), vec![2, 4]);

        node.collect_not_tardy(&jobs, &mut out);
        assert_eq!(out.iter().map(|j| j.id().get()).collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn test_is_undecided_rejects_out_of_range() {
        let node = SearchNode::root(2);
        assert!(!node.is_undecided(ji(2)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "decided or out of range")]
    fn test_deciding_twice_panics_in_debug() {
        let node = SearchNode::root(2).with_on_time(ji(0));
        let _ = node.with_tardy(ji(0));
    }
}
