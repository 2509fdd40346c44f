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

//! Console progress monitor
//!
//! `LogTreeSearchMonitor` prints a header when the search starts, a progress
//! line at most once per `log_interval`, a line for every improvement of the
//! best tardy count, and the statistics table when the search ends. The clock
//! is only read when the node counter matches `clock_check_mask`, so the
//! monitor costs one branch per node.

use crate::{
    monitor::tree_search_monitor::TreeSearchMonitor, node::SearchNode,
    stats::BnbSolverStatistics,
};
use tardy_model::{instance::Instance, num::TimeNumeric, solution::Solution};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_count: Option<usize>,
    print_statistics: bool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> LogTreeSearchMonitor<T> {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_count: None,
            print_statistics: true,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Enables or disables the statistics table printed at the end.
    pub fn with_statistics(mut self, yes: bool) -> Self {
        self.print_statistics = yes;
        self
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<14} | {:<7} | {:<10} | {:<12} | {:<12} | {:<10}",
            "Elapsed", "Nodes", "Depth", "Best", "Pruned (LB)", "Pruned (S)", "Solutions"
        );
        println!("{}", "-".repeat(92));
    }

    #[inline(always)]
    fn log_line(&mut self, depth: usize, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best_str = match self.best_count {
            Some(count) => count.to_string(),
            None => "Inf".to_string(),
        };

        let elapsed_field = format!("{:.1}s", elapsed);

        println!(
            "{:<9} | {:<14} | {:<7} | {:<10} | {:<12} | {:<12} | {:<10}",
            elapsed_field,
            stats.nodes_generated,
            depth,
            best_str,
            stats.prunings_bound,
            stats.prunings_infeasible,
            stats.solutions_found
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogTreeSearchMonitor<T> {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: TimeNumeric,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance<T>, _stats: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_count = None;
        println!("Searching {} jobs", instance.num_jobs());
        self.print_header();
    }

    fn on_node(&mut self, node: &SearchNode, stats: &BnbSolverStatistics) {
        if (stats.nodes_generated & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(node.depth(), stats);
        }
    }

    fn on_solution_found(
        &mut self,
        _solution: &Solution,
        best_count: usize,
        stats: &BnbSolverStatistics,
    ) {
        let improved = self.best_count.is_none_or(|current| best_count < current);
        self.best_count = Some(best_count);
        if improved {
            self.log_line(stats.max_depth as usize, stats);
        }
    }

    fn on_exit_search(&mut self, stats: &BnbSolverStatistics) {
        println!("{}", "-".repeat(92));
        println!("Search finished.");
        if self.print_statistics {
            print!("{}", stats);
        }
    }
}
