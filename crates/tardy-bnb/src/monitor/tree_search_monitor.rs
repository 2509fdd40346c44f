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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait, `SearchCommand` and `PruneReason`
//! for observing and controlling the branch-and-bound engine. Callbacks
//! track the lifecycle of a run, and a monitor can stop it through
//! `search_command` (default: `Continue`).
//!
//! Lifecycle highlights
//! - enter → {command → node → prune | lower bound → prune | solution |
//!   branch | dead end}* → exit
//! - `BnbSolverStatistics` is provided to every callback for telemetry.
//!
//! Design notes
//! - Methods take `&mut self`; a monitor belongs to one run and one thread.
//! - Keep callbacks lightweight; avoid blocking I/O in hot paths.
//! - Stopping a run never corrupts the incumbent: the outcome carries the
//!   best count and tardy sets known at that moment.

use crate::{node::SearchNode, stats::BnbSolverStatistics};
use tardy_model::{instance::Instance, job::JobId, num::TimeNumeric, solution::Solution};

/// Instruction returned by a monitor before each node.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Reasons for fathoming a node without branching.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The jobs forced on time fail the feasibility oracle.
    InfeasibleOnTimeSet,
    /// `|T| + bound` cannot beat the incumbent.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::InfeasibleOnTimeSet => write!(f, "InfeasibleOnTimeSet"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
pub trait TreeSearchMonitor<T>
where
    T: TimeNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &BnbSolverStatistics);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics);
    /// Called before a node is processed to determine the next action.
    fn search_command(
        &mut self,
        _node: &SearchNode,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called when a node is taken from the stack.
    fn on_node(&mut self, _node: &SearchNode, _statistics: &BnbSolverStatistics) {}
    /// Called when the lower bound of a node's undecided jobs is known.
    fn on_lower_bound_computed(
        &mut self,
        _node: &SearchNode,
        _lower_bound: usize,
        _statistics: &BnbSolverStatistics,
    ) {
    }
    /// Called when a node is fathomed by a pruning rule.
    fn on_prune(
        &mut self,
        _node: &SearchNode,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }
    /// Called when a node is split on `job`.
    fn on_branch(&mut self, _node: &SearchNode, _job: JobId, _statistics: &BnbSolverStatistics) {}
    /// Called when the branching strategy offers no valid job.
    fn on_dead_end(&mut self, _node: &SearchNode, _statistics: &BnbSolverStatistics) {}
    /// Called when a tardy set is stored in the incumbent.
    fn on_solution_found(
        &mut self,
        _solution: &Solution,
        _best_count: usize,
        _statistics: &BnbSolverStatistics,
    ) {
    }
}

impl<T, M> TreeSearchMonitor<T> for &mut M
where
    T: TimeNumeric,
    M: TreeSearchMonitor<T> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &BnbSolverStatistics) {
        (**self).on_enter_search(instance, statistics);
    }

    #[inline]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        (**self).on_exit_search(statistics);
    }

    #[inline]
    fn search_command(
        &mut self,
        node: &SearchNode,
        statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        (**self).search_command(node, statistics)
    }

    #[inline]
    fn on_node(&mut self, node: &SearchNode, statistics: &BnbSolverStatistics) {
        (**self).on_node(node, statistics);
    }

    #[inline]
    fn on_lower_bound_computed(
        &mut self,
        node: &SearchNode,
        lower_bound: usize,
        statistics: &BnbSolverStatistics,
    ) {
        (**self).on_lower_bound_computed(node, lower_bound, statistics);
    }

    #[inline]
    fn on_prune(&mut self, node: &SearchNode, reason: PruneReason, statistics: &BnbSolverStatistics) {
        (**self).on_prune(node, reason, statistics);
    }

    #[inline]
    fn on_branch(&mut self, node: &SearchNode, job: JobId, statistics: &BnbSolverStatistics) {
        (**self).on_branch(node, job, statistics);
    }

    #[inline]
    fn on_dead_end(&mut self, node: &SearchNode, statistics: &BnbSolverStatistics) {
        (**self).on_dead_end(node, statistics);
    }

    #[inline]
    fn on_solution_found(
        &mut self,
        solution: &Solution,
        best_count: usize,
        statistics: &BnbSolverStatistics,
    ) {
        (**self).on_solution_found(solution, best_count, statistics);
    }
}

impl<T> std::fmt::Debug for dyn TreeSearchMonitor<T>
where
    T: TimeNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TreeSearchMonitor<T>
where
    T: TimeNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
