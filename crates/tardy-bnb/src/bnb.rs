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

//! Branch-and-bound solver for 1|r_j|ΣU_j.
//!
//! This module implements a stateful search engine over the binary decision
//! tree "job forced on time / job forced tardy". Nodes are explored depth
//! first from an explicit stack, on-time child before tardy child, and are
//! fathomed by three rules: an infeasible on-time set, a lower bound that
//! cannot beat the incumbent, and accepted leaves whose tentative schedule
//! passes the feasibility oracle.
//!
//! The `BnbSolver` owns the reusable structures (stack, incumbent, lower
//! bound, scratch buffers) and a `SolverConfig`. Each call to `solve*` runs
//! one search session that owns the per-run state and statistics, and the
//! solver is reset afterwards so repeated solves are independent.
//!
//! Design notes
//! - The incumbent is seeded with the EDD heuristic, so an outcome always
//!   carries at least one tardy set, even when a monitor stops the run
//!   before the first node.
//! - With `PruneMode::EnumerateAll` ties survive pruning and every distinct
//!   optimal tardy set reachable under the oracle is returned.
//! - A shared incumbent only ever tightens the local bound; stale reads cost
//!   extra nodes, never correctness.

use crate::{
    bound::{hybrid::HybridBound, lower_bound::LowerBound},
    branching::{first_undecided::FirstUndecided, strategy::BranchingStrategy},
    config::{RootShortCircuit, SolverConfig},
    feasibility::{EddFeasibility, FeasibilityOracle},
    heuristic::heuristic_upper_bound,
    incumbent::{Incumbent, IncumbentStore, NoSharedIncumbent, SharedIncumbent, SharedIncumbentAdapter},
    monitor::{
        no_op::NoOperationMonitor,
        tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    },
    node::SearchNode,
    result::{BnbSolverOutcome, TerminationReason},
    stack::SearchStack,
    stats::BnbSolverStatistics,
};
use fixedbitset::FixedBitSet;
use std::time::Instant;
use tardy_model::{
    index::JobIndex,
    instance::Instance,
    job::Job,
    num::TimeNumeric,
    solution::Solution,
};

/// An exact branch-and-bound solver for minimizing the number of tardy jobs
/// on one machine with release dates.
///
/// The solver is the execution engine only. Which job to split on is up to
/// a `BranchingStrategy`, whether a set of jobs fits is up to a
/// `FeasibilityOracle`, and how many jobs must be tardy is up to the lower
/// bound `L` (by default the `HybridBound` configured by the solver config).
#[derive(Debug)]
pub struct BnbSolver<T, L = HybridBound<T>> {
    config: SolverConfig,
    bound: L,
    stack: SearchStack,
    incumbent: Incumbent,
    scratch: Vec<Job<T>>,
}

impl<T> Default for BnbSolver<T>
where
    T: TimeNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T>
where
    T: TimeNumeric,
{
    /// Creates a solver with the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Creates a solver whose hybrid bound follows `config`.
    #[inline]
    pub fn with_config(config: SolverConfig) -> Self {
        Self::with_lower_bound(config, HybridBound::with_config(config.bounds()))
    }

    /// Creates a solver with buffers sized for `num_jobs` jobs.
    ///
    /// # Note
    ///
    /// The solver grows its buffers on demand anyway; preallocation only
    /// moves the allocations to construction time.
    #[inline]
    pub fn preallocated(config: SolverConfig, num_jobs: usize) -> Self {
        Self {
            config,
            bound: HybridBound::preallocated(config.bounds(), num_jobs),
            stack: SearchStack::preallocated(num_jobs),
            incumbent: Incumbent::new(),
            scratch: Vec::with_capacity(num_jobs),
        }
    }
}

impl<T, L> BnbSolver<T, L>
where
    T: TimeNumeric,
    L: LowerBound<T>,
{
    /// Creates a solver with a caller-supplied lower bound. The bound
    /// settings in `config` are ignored.
    #[inline]
    pub fn with_lower_bound(config: SolverConfig, bound: L) -> Self {
        Self {
            config,
            bound,
            stack: SearchStack::new(),
            incumbent: Incumbent::new(),
            scratch: Vec::new(),
        }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns the lower bound.
    #[inline]
    pub fn lower_bound(&self) -> &L {
        &self.bound
    }

    /// Returns the lower bound mutably.
    #[inline]
    pub fn lower_bound_mut(&mut self) -> &mut L {
        &mut self.bound
    }

    /// Solves `instance` with instance-order branching, the EDD oracle and
    /// no monitoring.
    #[inline]
    pub fn solve_default(&mut self, instance: &Instance<T>) -> BnbSolverOutcome {
        let mut strategy = FirstUndecided::new();
        let mut oracle = EddFeasibility::preallocated(instance.num_jobs());
        self.solve(
            instance,
            &mut strategy,
            &mut oracle,
            NoOperationMonitor::new(),
        )
    }

    /// Solves `instance` using the provided `BranchingStrategy`,
    /// `FeasibilityOracle`, and `TreeSearchMonitor`.
    /// This variant does not use a shared incumbent and thus
    /// acts as a standalone, single threaded solver.
    #[inline]
    pub fn solve<B, O, S>(
        &mut self,
        instance: &Instance<T>,
        strategy: &mut B,
        oracle: &mut O,
        monitor: S,
    ) -> BnbSolverOutcome
    where
        B: BranchingStrategy<T> + ?Sized,
        O: FeasibilityOracle<T> + ?Sized,
        S: TreeSearchMonitor<T>,
    {
        let store = NoSharedIncumbent::new();
        self.solve_internal(instance, strategy, oracle, monitor, store)
    }

    /// Solves `instance` like `solve`, but reads and publishes bounds and
    /// tardy sets through `incumbent`, so that several solvers running in
    /// parallel prune with each other's results.
    #[inline]
    pub fn solve_with_incumbent<B, O, S>(
        &mut self,
        instance: &Instance<T>,
        strategy: &mut B,
        oracle: &mut O,
        monitor: S,
        incumbent: &SharedIncumbent,
    ) -> BnbSolverOutcome
    where
        B: BranchingStrategy<T> + ?Sized,
        O: FeasibilityOracle<T> + ?Sized,
        S: TreeSearchMonitor<T>,
    {
        let store = SharedIncumbentAdapter::new(incumbent);
        self.solve_internal(instance, strategy, oracle, monitor, store)
    }

    /// Internal solve method that takes an `IncumbentStore`,
    /// which is usually either a `NoSharedIncumbent` or a `SharedIncumbentAdapter`.
    #[inline(always)]
    fn solve_internal<B, O, S, I>(
        &mut self,
        instance: &Instance<T>,
        strategy: &mut B,
        oracle: &mut O,
        mut monitor: S,
        store: I,
    ) -> BnbSolverOutcome
    where
        B: BranchingStrategy<T> + ?Sized,
        O: FeasibilityOracle<T> + ?Sized,
        S: TreeSearchMonitor<T>,
        I: IncumbentStore,
    {
        self.reset();
        let session =
            BnbSolverSearchSession::new(self, instance, strategy, oracle, &mut monitor, store);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Clears the per-run state but keeps all allocations.
    #[inline]
    fn reset(&mut self) {
        self.stack.reset();
        self.incumbent.reset();
        self.scratch.clear();
    }
}

/// A search session for the branch-and-bound solver.
/// This struct encapsulates the state and logic
/// of a single search run.
struct BnbSolverSearchSession<'a, T, L, B, O, S, I>
where
    B: ?Sized,
    O: ?Sized,
{
    solver: &'a mut BnbSolver<T, L>,
    instance: &'a Instance<T>,
    strategy: &'a mut B,
    oracle: &'a mut O,
    monitor: &'a mut S,
    store: I,
    stats: BnbSolverStatistics,
    start_time: Instant,
}

impl<'a, T, L, B, O, S, I> std::fmt::Debug for BnbSolverSearchSession<'a, T, L, B, O, S, I>
where
    T: TimeNumeric,
    B: ?Sized,
    O: ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("num_jobs", &self.instance.num_jobs())
            .field("stack", &self.solver.stack.len())
            .field("incumbent", &self.solver.incumbent.best_count())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, L, B, O, S, I> std::fmt::Display for BnbSolverSearchSession<'a, T, L, B, O, S, I>
where
    T: TimeNumeric,
    B: ?Sized,
    O: ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchSession(num_jobs: {}, {}, {})",
            self.instance.num_jobs(),
            self.solver.incumbent,
            self.solver.stack
        )
    }
}

impl<'a, T, L, B, O, S, I> BnbSolverSearchSession<'a, T, L, B, O, S, I>
where
    T: TimeNumeric,
    L: LowerBound<T>,
    B: BranchingStrategy<T> + ?Sized,
    O: FeasibilityOracle<T> + ?Sized,
    S: TreeSearchMonitor<T>,
    I: IncumbentStore,
{
    /// Create a new search session.
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T, L>,
        instance: &'a Instance<T>,
        strategy: &'a mut B,
        oracle: &'a mut O,
        monitor: &'a mut S,
        store: I,
    ) -> Self {
        Self {
            solver,
            instance,
            strategy,
            oracle,
            monitor,
            store,
            stats: BnbSolverStatistics::default(),
            start_time: Instant::now(),
        }
    }

    /// Run the search session.
    fn run(mut self) -> BnbSolverOutcome {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "bnb_search",
            num_jobs = self.instance.num_jobs(),
            strategy = self.strategy.name(),
            oracle = self.oracle.name(),
            bound = self.solver.bound.name()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        self.monitor.on_enter_search(self.instance, &self.stats);
        self.initialize();

        let termination_reason = loop {
            let best = self.store.tighten(self.solver.incumbent.best_count());
            self.solver.incumbent.tighten(best);

            let Some(node) = self.solver.stack.pop() else {
                break TerminationReason::OptimalityProven;
            };

            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&node, &self.stats)
            {
                break TerminationReason::Aborted(msg);
            }

            if self.process_node(node) {
                break TerminationReason::OptimalityProven;
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        #[cfg(feature = "tracing")]
        tracing::info!(
            best_count = self.solver.incumbent.best_count(),
            nodes = self.stats.nodes_generated,
            reason = %termination_reason,
            "search finished"
        );

        self.finalize_result(termination_reason)
    }

    /// Seeds the incumbent and pushes the root node.
    fn initialize(&mut self) {
        let num_jobs = self.instance.num_jobs();
        self.solver.stack.ensure_capacity(num_jobs);
        self.solver.scratch.reserve(num_jobs);

        self.solver
            .incumbent
            .tighten(self.store.initial_upper_bound());

        let (count, witness) = heuristic_upper_bound(self.instance.jobs());
        let witness = self.to_bits(&witness);
        debug_assert_eq!(
            witness.count_ones(..),
            count,
            "called `heuristic_upper_bound` and got a count that does not match its tardy set"
        );
        self.offer(&witness);

        self.stats
            .set_initial_upper_bound(self.solver.incumbent.best_count());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            heuristic = count,
            initial_upper_bound = self.solver.incumbent.best_count(),
            "incumbent seeded"
        );

        self.solver.stack.push(SearchNode::root(num_jobs));
    }

    /// Processes one node. Returns `true` if the whole search is settled.
    fn process_node(&mut self, mut node: SearchNode) -> bool {
        let instance = self.instance;
        let jobs = instance.jobs();

        self.stats.on_node_generated(node.depth());
        self.monitor.on_node(&node, &self.stats);

        if node.num_on_time() > 0 {
            node.collect_on_time(jobs, &mut self.solver.scratch);
            if !self.oracle.is_on_time_feasible(&self.solver.scratch) {
                self.stats.on_pruning_infeasible();
                self.monitor
                    .on_prune(&node, PruneReason::InfeasibleOnTimeSet, &self.stats);
                return false;
            }
        }

        let bound = self.compute_bound(&node);
        node.set_bound(bound);
        if node.depth() == 0 {
            self.stats.set_root_lower_bound(bound);
        }
        self.monitor
            .on_lower_bound_computed(&node, bound, &self.stats);

        if self.solver.config.prune_mode().prunes(
            node.num_tardy(),
            bound,
            self.solver.incumbent.best_count(),
        ) {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&node, PruneReason::BoundDominated, &self.stats);
            return false;
        }

        if node.depth() == 0 && bound == 0 && self.root_short_circuit() {
            return true;
        }

        if bound == 0 {
            node.collect_not_tardy(jobs, &mut self.solver.scratch);
            if self.oracle.is_on_time_feasible(&self.solver.scratch) {
                self.stats.on_leaf_accepted();
                self.offer(node.tardy());
                return false;
            }
        }

        self.branch(&node);
        false
    }

    /// Runs the lower bound on the undecided jobs of `node`, clamped to
    /// `[0, |F|]`.
    #[inline]
    fn compute_bound(&mut self, node: &SearchNode) -> usize {
        let undecided = node.num_undecided();
        if undecided == 0 {
            return 0;
        }

        node.collect_undecided(self.instance.jobs(), &mut self.solver.scratch);
        let start = Instant::now();
        let bound = self.solver.bound.lower_bound(&self.solver.scratch);
        self.stats.on_bound_computed(start.elapsed());

        debug_assert!(
            bound <= undecided,
            "called `LowerBound::lower_bound` on `{}` with {} jobs and got {}",
            self.solver.bound.name(),
            undecided,
            bound
        );
        bound.min(undecided)
    }

    /// Applies the root short-circuit policy. Returns `true` if the search
    /// ends here with the empty tardy set.
    fn root_short_circuit(&mut self) -> bool {
        let install = match self.solver.config.root_short_circuit() {
            RootShortCircuit::Disabled => false,
            RootShortCircuit::Trusted => true,
            RootShortCircuit::Verified => self.oracle.is_on_time_feasible(self.instance.jobs()),
        };

        if install {
            let num_jobs = self.instance.num_jobs();
            self.solver.incumbent.install_all_on_time(num_jobs);
            self.stats.on_leaf_accepted();
            self.publish(&FixedBitSet::with_capacity(num_jobs));
        }
        install
    }

    /// Asks the strategy for a job and pushes both children, or records a
    /// dead end.
    fn branch(&mut self, node: &SearchNode) {
        node.collect_undecided(self.instance.jobs(), &mut self.solver.scratch);
        let index = self
            .strategy
            .select(node, &self.solver.scratch)
            .and_then(|id| self.instance.index_of(id))
            .filter(|&index| node.is_undecided(index));

        let Some(index) = index else {
            self.stats.on_dead_end();
            self.monitor.on_dead_end(node, &self.stats);
            return;
        };

        let job = self.instance.job(index).id();
        self.monitor.on_branch(node, job, &self.stats);
        self.solver
            .stack
            .push_children(node.with_on_time(index), node.with_tardy(index));
    }

    /// Offers a tardy set to the incumbent and publishes it if it was stored.
    fn offer(&mut self, tardy: &FixedBitSet) {
        if self.solver.incumbent.offer(tardy).is_stored() {
            self.publish(tardy);
        }
    }

    #[inline]
    fn publish(&mut self, tardy: &FixedBitSet) {
        let solution = self.to_solution(tardy);
        let count = solution.num_tardy();
        self.stats.on_solution_found();
        self.store.on_solution_found(count, &solution);
        self.monitor
            .on_solution_found(&solution, count, &self.stats);
    }

    #[inline]
    fn to_solution(&self, tardy: &FixedBitSet) -> Solution {
        tardy
            .ones()
            .map(|i| self.instance.job(JobIndex::new(i)).id())
            .collect()
    }

    #[inline]
    fn to_bits(&self, solution: &Solution) -> FixedBitSet {
        let mut bits = FixedBitSet::with_capacity(self.instance.num_jobs());
        for index in solution
            .tardy_jobs()
            .iter()
            .filter_map(|&id| self.instance.index_of(id))
        {
            bits.insert(index.get());
        }
        bits
    }

    /// Finalize the solver result based on the incumbent and the
    /// termination reason.
    ///
    /// # Note
    ///
    /// This consumes self.
    fn finalize_result(self, reason: TerminationReason) -> BnbSolverOutcome {
        let mut best_count = self.solver.incumbent.best_count();
        let mut solutions: Vec<Solution> = self
            .solver
            .incumbent
            .solutions()
            .iter()
            .map(|bits| self.to_solution(bits))
            .collect();

        // The local sets were dropped when another run tightened the bound.
        if solutions.is_empty()
            && let Some((count, shared)) = self.store.snapshot()
            && !shared.is_empty()
        {
            best_count = count;
            solutions = shared;
        }

        if solutions.is_empty() {
            let (count, witness) = heuristic_upper_bound(self.instance.jobs());
            best_count = count;
            solutions = vec![witness];
        }

        match reason {
            TerminationReason::OptimalityProven => {
                BnbSolverOutcome::optimal(best_count, solutions, self.stats)
            }
            TerminationReason::Aborted(msg) => {
                BnbSolverOutcome::aborted(best_count, solutions, msg, self.stats)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bound::hybrid::HybridBoundConfig,
        branching::{edd::EarliestDueDate, strategy::FnStrategy},
        config::PruneMode,
        feasibility::is_on_time_feasible,
        monitor::node_limit::NodeLimitMonitor,
    };
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use tardy_model::{instance::InstanceBuilder, job::JobId};

    type IntegerType = i64;

    fn build_instance(jobs: &[(u32, IntegerType, IntegerType, IntegerType)]) -> Instance<IntegerType> {
        let mut builder = InstanceBuilder::with_capacity(jobs.len());
        for &(id, r, p, d) in jobs {
            builder.add_job(id, r, p, d);
        }
        builder.build().expect("valid instance")
    }

    fn random_instance(rng: &mut ChaCha8Rng, n: usize) -> Instance<IntegerType> {
        let jobs: Vec<_> = (1..=n as u32)
            .map(|id| {
                let r = rng.random_range(0..=15);
                let p = rng.random_range(1..=6);
                let d = r + p + rng.random_range(0..=10);
                (id, r, p, d)
            })
            .collect();
        build_instance(&jobs)
    }

    fn solution(ids: &[u32]) -> Solution {
        Solution::new(ids.iter().map(|&id| JobId::new(id)))
    }

    fn sorted(solutions: &[Solution]) -> Vec<Solution> {
        let mut solutions = solutions.to_vec();
        solutions.sort_unstable();
        solutions
    }

    /// Every tardy set of minimum size whose complement passes the EDD oracle.
    fn brute_force(instance: &Instance<IntegerType>) -> (usize, Vec<Solution>) {
        let jobs = instance.jobs();
        let n = jobs.len();
        let mut best = usize::MAX;
        let mut optimal = Vec::new();
        let mut on_time = Vec::with_capacity(n);

        for mask in 0u32..(1 << n) {
            let count = mask.count_ones() as usize;
            if count > best {
                continue;
            }
            on_time.clear();
            on_time.extend((0..n).filter(|i| mask & (1 << i) == 0).map(|i| jobs[i]));
            if !is_on_time_feasible(&on_time) {
                continue;
            }
            if count < best {
                best = count;
                optimal.clear();
            }
            optimal.push(
                (0..n)
                    .filter(|i| mask & (1 << i) != 0)
                    .map(|i| jobs[i].id())
                    .collect(),
            );
        }

        optimal.sort_unstable();
        (best, optimal)
    }

    #[test]
    fn test_all_on_time_instance() {
        let instance = build_instance(&[
            (1, 0, 2, 5),
            (2, 1, 2, 8),
            (3, 3, 1, 9),
            (4, 4, 3, 15),
            (5, 6, 2, 20),
        ]);
        let outcome = BnbSolver::new().solve_default(&instance);

        assert!(outcome.is_optimal());
        assert_eq!(outcome.best_count(), 0);
        assert_eq!(outcome.solutions(), &[Solution::all_on_time()]);
    }

    #[test]
    fn test_common_release_enumerates_both_optima() {
        let instance = build_instance(&[(1, 0, 5, 5), (2, 0, 5, 9), (3, 0, 5, 10)]);
        let outcome = BnbSolver::new().solve_default(&instance);

        assert!(outcome.is_optimal());
        assert_eq!(outcome.best_count(), 1);
        assert_eq!(
            sorted(outcome.solutions()),
            vec![solution(&[1]), solution(&[2])]
        );
    }

    #[test]
    fn test_overloaded_block() {
        let jobs: Vec<_> = (1..=10).map(|id| (id, 0, 1, 7)).collect();
        let instance = build_instance(&jobs);
        let outcome = BnbSolver::new().solve_default(&instance);

        assert!(outcome.is_optimal());
        assert_eq!(outcome.best_count(), 3);
        assert_eq!(outcome.solutions().len(), 120);
        assert_eq!(outcome.statistics().root_lower_bound, Some(3));
    }

    #[test]
    fn test_late_release_job_is_always_tardy() {
        let instance = build_instance(&[(1, 0, 4, 7), (2, 0, 4, 8), (3, 8, 3, 10)]);
        let outcome = BnbSolver::new().solve_default(&instance);

        assert!(outcome.is_optimal());
        assert_eq!(outcome.best_count(), 1);
        assert_eq!(outcome.solutions(), &[solution(&[3])]);
    }

    #[test]
    fn test_empty_instance() {
        let instance = build_instance(&[]);
        let outcome = BnbSolver::new().solve_default(&instance);

        assert!(outcome.is_optimal());
        assert_eq!(outcome.best_count(), 0);
        assert_eq!(outcome.solutions(), &[Solution::all_on_time()]);
    }

    #[test]
    fn test_matches_brute_force_on_random_instances() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut solver = BnbSolver::<IntegerType>::new();

        for round in 0..40 {
            let n = 1 + round % 11;
            let instance = random_instance(&mut rng, n);
            let (best, optimal) = brute_force(&instance);

            let mut strategy = EarliestDueDate::new();
            let mut oracle = EddFeasibility::new();
            let outcome = solver.solve(
                &instance,
                &mut strategy,
                &mut oracle,
                NoOperationMonitor::new(),
            );

            assert!(outcome.is_optimal());
            assert_eq!(outcome.best_count(), best, "round {}", round);
            assert_eq!(sorted(outcome.solutions()), optimal, "round {}", round);
        }
    }

    #[test]
    fn test_first_optimum_mode_finds_the_optimum() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = SolverConfig::default().with_prune_mode(PruneMode::FirstOptimum);
        let mut solver = BnbSolver::<IntegerType>::with_config(config);

        for _ in 0..20 {
            let instance = random_instance(&mut rng, 10);
            let (best, optimal) = brute_force(&instance);
            let outcome = solver.solve_default(&instance);

            assert_eq!(outcome.best_count(), best);
            assert!(
                outcome
                    .solutions()
                    .iter()
                    .all(|s| optimal.binary_search(s).is_ok())
            );
        }
    }

    #[test]
    fn test_without_bounds_still_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let config = SolverConfig::default().with_bounds(HybridBoundConfig::none());
        let mut solver = BnbSolver::<IntegerType>::with_config(config);

        for _ in 0..10 {
            let instance = random_instance(&mut rng, 8);
            let (best, optimal) = brute_force(&instance);
            let outcome = solver.solve_default(&instance);

            assert_eq!(outcome.best_count(), best);
            assert_eq!(sorted(outcome.solutions()), optimal);
        }
    }

    #[test]
    fn test_repeated_solves_are_identical() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let instance = random_instance(&mut rng, 10);
        let mut solver = BnbSolver::<IntegerType>::new();

        let first = solver.solve_default(&instance);
        let second = solver.solve_default(&instance);

        assert_eq!(first.best_count(), second.best_count());
        assert_eq!(first.solutions(), second.solutions());
        assert_eq!(
            first.statistics().nodes_generated,
            second.statistics().nodes_generated
        );
    }

    #[test]
    fn test_root_short_circuit_policies() {
        // All bounds see zero at the root, yet the two jobs cannot both be on time.
        let instance = build_instance(&[(1, 0, 5, 10), (2, 1, 5, 6)]);

        let verified = BnbSolver::new().solve_default(&instance);
        assert_eq!(verified.statistics().root_lower_bound, Some(0));
        assert_eq!(verified.best_count(), 1);

        let disabled = BnbSolver::with_config(
            SolverConfig::default().with_root_short_circuit(RootShortCircuit::Disabled),
        )
        .solve_default(&instance);
        assert_eq!(disabled.best_count(), 1);
        assert_eq!(sorted(disabled.solutions()), sorted(verified.solutions()));

        let trusted = BnbSolver::with_config(
            SolverConfig::default().with_root_short_circuit(RootShortCircuit::Trusted),
        )
        .solve_default(&instance);
        assert_eq!(trusted.best_count(), 0);
        assert_eq!(trusted.solutions(), &[Solution::all_on_time()]);
        assert_eq!(trusted.statistics().nodes_generated, 1);
    }

    #[test]
    fn test_dead_end_strategy_keeps_heuristic() {
        let instance = build_instance(&[(1, 0, 5, 5), (2, 0, 5, 9), (3, 0, 5, 10)]);
        let (heuristic, _) = heuristic_upper_bound(instance.jobs());

        let mut strategy =
            FnStrategy::new("Never", |_: &SearchNode, _: &[Job<IntegerType>]| -> Option<JobId> {
                None
            });
        let mut oracle = EddFeasibility::new();
        let outcome = BnbSolver::new().solve(
            &instance,
            &mut strategy,
            &mut oracle,
            NoOperationMonitor::new(),
        );

        assert_eq!(outcome.statistics().dead_ends, 1);
        assert_eq!(outcome.best_count(), heuristic);
    }

    #[test]
    fn test_foreign_job_id_is_a_dead_end() {
        let instance = build_instance(&[(1, 0, 5, 5), (2, 0, 5, 9), (3, 0, 5, 10)]);
        let mut strategy = FnStrategy::new("Foreign", |_: &SearchNode, _: &[Job<IntegerType>]| -> Option<JobId> {
            Some(JobId::new(99))
        });
        let mut oracle = EddFeasibility::new();
        let outcome = BnbSolver::new().solve(
            &instance,
            &mut strategy,
            &mut oracle,
            NoOperationMonitor::new(),
        );

        assert_eq!(outcome.statistics().dead_ends, 1);
        assert!(outcome.is_optimal());
    }

    #[test]
    fn test_node_limit_returns_consistent_incumbent() {
        let jobs: Vec<_> = (1..=10).map(|id| (id, 0, 1, 7)).collect();
        let instance = build_instance(&jobs);
        let mut strategy = FirstUndecided::new();
        let mut oracle = EddFeasibility::new();

        let outcome = BnbSolver::new().solve(
            &instance,
            &mut strategy,
            &mut oracle,
            NodeLimitMonitor::new(1),
        );

        assert!(!outcome.is_optimal());
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("node limit of 1 reached".to_string())
        );
        assert_eq!(outcome.best_count(), 3);
        assert!(outcome.solutions().iter().all(|s| s.num_tardy() == 3));
    }

    #[test]
    fn test_abort_before_root_returns_heuristic() {
        let instance = build_instance(&[(1, 0, 4, 7), (2, 0, 4, 8), (3, 8, 3, 10)]);
        let mut strategy = FirstUndecided::new();
        let mut oracle = EddFeasibility::new();

        let outcome = BnbSolver::new().solve(
            &instance,
            &mut strategy,
            &mut oracle,
            NodeLimitMonitor::new(0),
        );

        assert!(!outcome.is_optimal());
        assert_eq!(outcome.statistics().nodes_generated, 0);
        assert_eq!(outcome.best_count(), 1);
    }

    #[test]
    fn test_shared_incumbent_receives_solutions() {
        let instance = build_instance(&[(1, 0, 5, 5), (2, 0, 5, 9), (3, 0, 5, 10)]);
        let shared = SharedIncumbent::new();
        let mut strategy = FirstUndecided::new();
        let mut oracle = EddFeasibility::new();

        let outcome = BnbSolver::new().solve_with_incumbent(
            &instance,
            &mut strategy,
            &mut oracle,
            NoOperationMonitor::new(),
            &shared,
        );

        assert_eq!(shared.upper_bound(), outcome.best_count());
        let (count, solutions) = shared.snapshot().expect("shared incumbent was filled");
        assert_eq!(count, 1);
        assert_eq!(sorted(&solutions), sorted(outcome.solutions()));
    }

    #[test]
    fn test_statistics_are_consistent() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let instance = random_instance(&mut rng, 11);
        let outcome = BnbSolver::new().solve_default(&instance);
        let stats = outcome.statistics();

        assert!(stats.nodes_generated >= 1);
        assert!(stats.max_depth <= instance.num_jobs() as u64);
        assert_eq!(stats.initial_upper_bound, Some(heuristic_upper_bound(instance.jobs()).0));
        assert!(stats.root_lower_bound.unwrap_or(0) <= outcome.best_count());
        assert!(stats.fathomed() <= stats.nodes_generated);
    }
}
