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

//! Parallel portfolio over a shared incumbent
//!
//! `PortfolioSolver` runs one branch-and-bound search per registered
//! branching strategy, each on its own scoped thread. All runs read and
//! publish through one `SharedIncumbent`, so a good tardy set found by one
//! strategy immediately tightens the pruning of the others.
//!
//! Flow
//! - Every thread builds its own solver, EDD oracle and monitor stack
//!   (interrupt, then node and time limits if configured).
//! - The first run that proves optimality raises the stop signal; the others
//!   terminate at their next node.
//! - The outcome merges the runs and the shared snapshot: the minimum count
//!   and the union of all tardy sets of that size.

use crate::{
    bnb::BnbSolver,
    branching::strategy::BranchingStrategy,
    config::SolverConfig,
    feasibility::EddFeasibility,
    incumbent::SharedIncumbent,
    monitor::{
        composite::CompositeTreeSearchMonitor, interrupt::InterruptMonitor,
        node_limit::NodeLimitMonitor, time_limit::TimeLimitMonitor,
    },
    result::{BnbSolverOutcome, TerminationReason},
};
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};
use tardy_model::{instance::Instance, num::TimeNumeric, solution::Solution};

struct PortfolioEntry<'a, T> {
    strategy: Box<dyn BranchingStrategy<T> + Send + 'a>,
    config: SolverConfig,
}

/// The result of a single strategy inside a portfolio.
#[derive(Debug, Clone)]
pub struct PortfolioRun {
    strategy: String,
    outcome: BnbSolverOutcome,
}

impl PortfolioRun {
    /// Returns the name of the branching strategy of this run.
    #[inline]
    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    /// Returns the outcome of this run.
    #[inline]
    pub fn outcome(&self) -> &BnbSolverOutcome {
        &self.outcome
    }
}

/// The merged outcome of a portfolio solve.
#[derive(Debug, Clone)]
pub struct PortfolioOutcome {
    best_count: usize,
    solutions: Vec<Solution>,
    termination_reason: TerminationReason,
    runs: Vec<PortfolioRun>,
    solve_duration: Duration,
}

impl PortfolioOutcome {
    /// Returns the minimum number of tardy jobs over all runs.
    #[inline]
    pub fn best_count(&self) -> usize {
        self.best_count
    }

    /// Returns the distinct tardy sets of size `best_count`, sorted.
    #[inline]
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// Returns `true` if at least one run proved optimality.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::OptimalityProven)
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the individual runs in registration order.
    #[inline]
    pub fn runs(&self) -> &[PortfolioRun] {
        &self.runs
    }

    #[inline]
    pub fn solve_duration(&self) -> Duration {
        self.solve_duration
    }
}

impl std::fmt::Display for PortfolioOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Portfolio Outcome:")?;
        writeln!(f, "  Termination Reason: {}", self.termination_reason)?;
        writeln!(f, "  Best Count:         {}", self.best_count)?;
        writeln!(f, "  Solutions:          {}", self.solutions.len())?;
        writeln!(f, "  Solve Time:         {:.3}s", self.solve_duration.as_secs_f64())?;
        for run in &self.runs {
            writeln!(
                f,
                "  - {:<24} {} ({} nodes)",
                run.strategy,
                run.outcome.termination_reason(),
                run.outcome.statistics().nodes_generated
            )?;
        }
        Ok(())
    }
}

/// Runs several branching strategies in parallel on one instance.
pub struct PortfolioSolver<'a, T> {
    entries: Vec<PortfolioEntry<'a, T>>,
    incumbent: SharedIncumbent,
    /// Raised when any run proves optimality.
    stop_signal: AtomicBool,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
}

impl<'a, T> std::fmt::Debug for PortfolioSolver<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioSolver")
            .field(
                "strategies",
                &self
                    .entries
                    .iter()
                    .map(|e| e.strategy.name())
                    .collect::<Vec<_>>(),
            )
            .field("time_limit", &self.time_limit)
            .field("node_limit", &self.node_limit)
            .finish()
    }
}

impl<'a, T> PortfolioSolver<'a, T>
where
    T: TimeNumeric,
{
    /// Registers a strategy with its own solver configuration.
    #[inline]
    pub fn add_strategy<B>(&mut self, strategy: B, config: SolverConfig)
    where
        B: BranchingStrategy<T> + Send + 'a,
    {
        self.add_strategy_boxed(Box::new(strategy), config);
    }

    #[inline]
    pub fn add_strategy_boxed(
        &mut self,
        strategy: Box<dyn BranchingStrategy<T> + Send + 'a>,
        config: SolverConfig,
    ) {
        self.entries.push(PortfolioEntry { strategy, config });
    }

    #[inline]
    pub fn num_strategies(&self) -> usize {
        self.entries.len()
    }

    /// Returns the shared incumbent of the most recent solve.
    #[inline]
    pub fn incumbent(&self) -> &SharedIncumbent {
        &self.incumbent
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn node_limit(&self) -> Option<u64> {
        self.node_limit
    }

    /// Solves `instance` with all registered strategies in parallel.
    ///
    /// # Panics
    ///
    /// Panics if no strategy was registered, or re-raises the panic of a
    /// worker thread.
    pub fn solve(&mut self, instance: &Instance<T>) -> PortfolioOutcome {
        assert!(
            !self.entries.is_empty(),
            "called `PortfolioSolver::solve` with no strategies added"
        );

        let start_time = Instant::now();
        self.incumbent = SharedIncumbent::new();
        self.stop_signal.store(false, Ordering::Relaxed);

        let runs = self.run_parallel(instance);
        self.construct_outcome(start_time, runs)
    }

    fn run_parallel(&mut self, instance: &Instance<T>) -> Vec<PortfolioRun> {
        let time_limit = self.time_limit;
        let node_limit = self.node_limit;
        let incumbent = &self.incumbent;
        let stop_signal = &self.stop_signal;

        let mut runs = Vec::with_capacity(self.entries.len());

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.entries.len());

            for entry in &mut self.entries {
                let handle = scope.spawn(move || {
                    let mut monitor = CompositeTreeSearchMonitor::<T>::with_capacity(3);
                    monitor.add_monitor(InterruptMonitor::new(stop_signal));
                    if let Some(limit) = node_limit {
                        monitor.add_monitor(NodeLimitMonitor::new(limit));
                    }
                    if let Some(limit) = time_limit {
                        monitor.add_monitor(TimeLimitMonitor::new(limit));
                    }

                    let mut solver =
                        BnbSolver::<T>::preallocated(entry.config, instance.num_jobs());
                    let mut oracle = EddFeasibility::preallocated(instance.num_jobs());
                    let outcome = solver.solve_with_incumbent(
                        instance,
                        entry.strategy.as_mut(),
                        &mut oracle,
                        monitor,
                        incumbent,
                    );

                    if outcome.is_optimal() {
                        #[cfg(feature = "tracing")]
                        tracing::info!(
                            strategy = entry.strategy.name(),
                            best_count = outcome.best_count(),
                            "optimality proven, signaling stop"
                        );
                        stop_signal.store(true, Ordering::Relaxed);
                    }

                    PortfolioRun {
                        strategy: entry.strategy.name().to_string(),
                        outcome,
                    }
                });
                handles.push(handle);
            }

            for handle in handles {
                match handle.join() {
                    Ok(run) => runs.push(run),
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }
        });

        runs
    }

    fn construct_outcome(&self, start_time: Instant, runs: Vec<PortfolioRun>) -> PortfolioOutcome {
        let snapshot = self.incumbent.snapshot();

        let best_count = runs
            .iter()
            .map(|run| run.outcome.best_count())
            .chain(snapshot.as_ref().map(|(count, _)| *count))
            .min()
            .unwrap_or(0);

        let mut solutions: Vec<Solution> = runs
            .iter()
            .flat_map(|run| run.outcome.solutions().iter())
            .chain(snapshot.iter().flat_map(|(_, shared)| shared.iter()))
            .filter(|s| s.num_tardy() == best_count)
            .cloned()
            .collect();
        solutions.sort_unstable();
        solutions.dedup();

        let termination_reason = if runs.iter().any(|run| run.outcome.is_optimal()) {
            TerminationReason::OptimalityProven
        } else {
            TerminationReason::Aborted(self.determine_abort_reason(&runs))
        };

        PortfolioOutcome {
            best_count,
            solutions,
            termination_reason,
            runs,
            solve_duration: start_time.elapsed(),
        }
    }

    fn determine_abort_reason(&self, runs: &[PortfolioRun]) -> String {
        runs.iter()
            .find_map(|run| match run.outcome.termination_reason() {
                TerminationReason::Aborted(msg) => Some(msg.clone()),
                TerminationReason::OptimalityProven => None,
            })
            .unwrap_or_else(|| "external interrupt".to_string())
    }
}

/// Builder for `PortfolioSolver`.
pub struct PortfolioBuilder<'a, T> {
    entries: Vec<PortfolioEntry<'a, T>>,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
}

impl<'a, T> Default for PortfolioBuilder<'a, T>
where
    T: TimeNumeric,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> PortfolioBuilder<'a, T>
where
    T: TimeNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            time_limit: None,
            node_limit: None,
        }
    }

    /// Stops every run after `limit` of wall-clock time.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Stops every run after `limit` nodes of its own tree.
    #[inline]
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    #[inline]
    pub fn add_strategy<B>(mut self, strategy: B, config: SolverConfig) -> Self
    where
        B: BranchingStrategy<T> + Send + 'a,
    {
        self.entries.push(PortfolioEntry {
            strategy: Box::new(strategy),
            config,
        });
        self
    }

    #[inline]
    pub fn build(self) -> PortfolioSolver<'a, T> {
        PortfolioSolver {
            entries: self.entries,
            incumbent: SharedIncumbent::new(),
            stop_signal: AtomicBool::new(false),
            time_limit: self.time_limit,
            node_limit: self.node_limit,
        }
    }
}
