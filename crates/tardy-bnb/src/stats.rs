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

use std::time::Duration;

/// Statistics collected during one run of the Tardy-BnB solver.
///
/// Written only by the engine and reset at the start of every run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BnbSolverStatistics {
    /// Nodes popped from the stack and processed.
    pub nodes_generated: u64,
    /// Sum of the depths of all processed nodes.
    pub depth_sum: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Lower-bound invocations on non-empty undecided sets.
    pub bound_calls: u64,
    /// Cumulative time spent inside the lower bound.
    pub bound_time: Duration,
    /// Nodes fathomed because their on-time set failed the oracle.
    pub prunings_infeasible: u64,
    /// Nodes fathomed because `|T| + bound` could not beat the incumbent.
    pub prunings_bound: u64,
    /// Nodes fathomed as accepted leaves.
    pub leaves_accepted: u64,
    /// Nodes where the branching strategy offered no valid job.
    pub dead_ends: u64,
    /// Tardy sets stored in the incumbent, replacements and ties alike.
    pub solutions_found: u64,
    /// Lower bound on the whole instance, once computed.
    pub root_lower_bound: Option<usize>,
    /// Upper bound the search started from.
    pub initial_upper_bound: Option<usize>,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl BnbSolverStatistics {
    #[inline]
    pub fn on_node_generated(&mut self, depth: usize) {
        let depth = depth as u64;
        self.nodes_generated = self.nodes_generated.saturating_add(1);
        self.depth_sum = self.depth_sum.saturating_add(depth);
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_bound_computed(&mut self, elapsed: Duration) {
        self.bound_calls = self.bound_calls.saturating_add(1);
        self.bound_time = self.bound_time.saturating_add(elapsed);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    /// Records a pruning event caused by the incumbent bound.
    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_leaf_accepted(&mut self) {
        self.leaves_accepted = self.leaves_accepted.saturating_add(1);
    }

    #[inline]
    pub fn on_dead_end(&mut self) {
        self.dead_ends = self.dead_ends.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn set_root_lower_bound(&mut self, bound: usize) {
        self.root_lower_bound = Some(bound);
    }

    #[inline]
    pub fn set_initial_upper_bound(&mut self, bound: usize) {
        self.initial_upper_bound = Some(bound);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Returns the mean depth of processed nodes, `0.0` before any node.
    #[inline]
    pub fn average_depth(&self) -> f64 {
        if self.nodes_generated == 0 {
            0.0
        } else {
            self.depth_sum as f64 / self.nodes_generated as f64
        }
    }

    /// Returns the total number of fathomed nodes.
    #[inline]
    pub fn fathomed(&self) -> u64 {
        self.prunings_infeasible
            .saturating_add(self.prunings_bound)
            .saturating_add(self.leaves_accepted)
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn opt(value: Option<usize>) -> String {
            value.map_or_else(|| "-".to_string(), |v| v.to_string())
        }

        writeln!(f, "Tardy-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes generated:      {}", self.nodes_generated)?;
        writeln!(f, "  Average depth:        {:.2}", self.average_depth())?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Bound calls:          {}", self.bound_calls)?;
        writeln!(f, "  Bound time:           {:.2?}", self.bound_time)?;
        writeln!(f, "  Prunings (infeasible):{}", self.prunings_infeasible)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Leaves accepted:      {}", self.leaves_accepted)?;
        writeln!(f, "  Dead ends:            {}", self.dead_ends)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Root Lower Bound:     {}", opt(self.root_lower_bound))?;
        writeln!(f, "  Initial Upper Bound:  {}", opt(self.initial_upper_bound))?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_counters_and_average_depth() {
        let mut stats = BnbSolverStatistics::default();
        assert_eq!(stats.average_depth(), 0.0);

        stats.on_node_generated(0);
        stats.on_node_generated(1);
        stats.on_node_generated(2);
        assert_eq!(stats.nodes_generated, 3);
        assert_eq!(stats.depth_sum, 3);
        assert_eq!(stats.max_depth, 2);
        assert!((stats.average_depth() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fathom_counters() {
        let mut stats = BnbSolverStatistics::default();
        stats.on_pruning_bound();
        stats.on_pruning_infeasible();
        stats.on_leaf_accepted();
        stats.on_leaf_accepted();
        assert_eq!(stats.fathomed(), 4);
    }

    #[test]
    fn test_bound_time_accumulates() {
        let mut stats = BnbSolverStatistics::default();
        stats.on_bound_computed(Duration::from_micros(3));
        stats.on_bound_computed(Duration::from_micros(4));
        assert_eq!(stats.bound_calls, 2);
        assert_eq!(stats.bound_time, Duration::from_micros(7));
    }

    #[test]
    fn test_display_lists_counters() {
        let mut stats = BnbSolverStatistics::default();
        stats.set_root_lower_bound(2);
        let text = stats.to_string();
        assert!(text.starts_with("Tardy-BnB Solver Statistics:"));
        assert!(text.contains("Root Lower Bound:     2"));
        assert!(text.contains("Initial Upper Bound:  -"));
    }
}
