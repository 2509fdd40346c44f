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

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tardy_bnb::{
    bnb::BnbSolver,
    bound::{
        hybrid::HybridBound, knapsack::KnapsackBound, lower_bound::LowerBound,
        moore_hodgson::MooreHodgsonBound, overload::IntervalOverloadBound,
    },
    branching::{
        edd::EarliestDueDate, first_undecided::FirstUndecided, lpt::LongestProcessingTime,
        slack::MinimumSlack, spt::ShortestProcessingTime, strategy::BranchingStrategy,
    },
    config::{PruneMode, SolverConfig},
    feasibility::{EddFeasibility, is_on_time_feasible},
    monitor::no_op::NoOperationMonitor,
    result::BnbSolverOutcome,
};
use tardy_model::{
    instance::{Instance, InstanceBuilder},
    job::JobId,
    solution::Solution,
};

type IntegerType = i64;

fn build_instance(jobs: &[(u32, IntegerType, IntegerType, IntegerType)]) -> Instance<IntegerType> {
    let mut builder = InstanceBuilder::with_capacity(jobs.len());
    for &(id, r, p, d) in jobs {
        builder.add_job(id, r, p, d);
    }
    builder.build().expect("valid instance")
}

fn solve(instance: &Instance<IntegerType>) -> BnbSolverOutcome {
    BnbSolver::new().solve_default(instance)
}

fn sorted(solutions: &[Solution]) -> Vec<Solution> {
    let mut solutions = solutions.to_vec();
    solutions.sort_unstable();
    solutions
}

fn assert_well_formed(instance: &Instance<IntegerType>, outcome: &BnbSolverOutcome) {
    assert!(!outcome.solutions().is_empty());
    for solution in outcome.solutions() {
        assert_eq!(solution.num_tardy(), outcome.best_count());
        let on_time: Vec<_> = solution.on_time_jobs(instance).copied().collect();
        assert!(
            is_on_time_feasible(&on_time),
            "complement of {:?} is not on-time feasible",
            solution
        );
    }
}

fn brute_force(instance: &Instance<IntegerType>) -> (usize, Vec<Solution>) {
    let jobs = instance.jobs();
    let n = jobs.len();
    let mut best = usize::MAX;
    let mut optimal: Vec<Solution> = Vec::new();
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

fn random_instance(rng: &mut ChaCha8Rng, n: usize) -> Instance<IntegerType> {
    let jobs: Vec<_> = (1..=n as u32)
        .map(|id| {
            let r = rng.random_range(0..=20);
            let p = rng.random_range(1..=8);
            let d = r + p + rng.random_range(0..=12);
            (id, r, p, d)
        })
        .collect();
    build_instance(&jobs)
}

#[test]
fn test_all_jobs_fit() {
    let instance = build_instance(&[
        (1, 0, 2, 2),
        (2, 0, 1, 3),
        (3, 0, 3, 6),
        (4, 0, 2, 8),
        (5, 0, 2, 10),
    ]);
    let outcome = solve(&instance);

    assert!(outcome.is_optimal());
    assert_eq!(outcome.best_count(), 0);
    assert_eq!(outcome.solutions(), &[Solution::all_on_time()]);
}

#[test]
fn test_forced_single_tardy() {
    let instance = build_instance(&[(1, 0, 5, 5), (2, 0, 5, 9), (3, 0, 5, 10)]);
    let outcome = solve(&instance);

    assert!(outcome.is_optimal());
    assert_eq!(outcome.best_count(), 1);
    assert_well_formed(&instance, &outcome);
}

#[test]
fn test_common_deadline_block() {
    let jobs: Vec<_> = (1..=10).map(|id| (id, 0, 1, 7)).collect();
    let instance = build_instance(&jobs);
    let outcome = solve(&instance);

    assert!(outcome.is_optimal());
    assert_eq!(outcome.best_count(), 3);
    assert_well_formed(&instance, &outcome);
}

#[test]
fn test_release_forced_tardiness() {
    let instance = build_instance(&[(1, 0, 4, 7), (2, 0, 4, 8), (3, 8, 3, 10)]);
    let outcome = solve(&instance);

    assert!(outcome.is_optimal());
    assert_eq!(outcome.best_count(), 1);
    assert_eq!(
        outcome.solutions(),
        &[Solution::new([JobId::new(3)])]
    );
}

#[test]
fn test_symmetric_ties_are_all_enumerated() {
    let jobs: Vec<_> = (1..=5).map(|id| (id, 0, 1, 3)).collect();
    let instance = build_instance(&jobs);
    let outcome = solve(&instance);

    assert!(outcome.is_optimal());
    assert_eq!(outcome.best_count(), 2);
    assert_well_formed(&instance, &outcome);

    let mut expected = Vec::new();
    for a in 1..=5u32 {
        for b in (a + 1)..=5 {
            expected.push(Solution::new([JobId::new(a), JobId::new(b)]));
        }
    }
    assert_eq!(sorted(outcome.solutions()), expected);
}

#[test]
fn test_distant_due_date_solves_without_large_tables() {
    let instance = build_instance(&[
        (1, 0, 5, 1_000_000_000_000_000),
        (2, 0, 5, 9),
        (3, 0, 5, 10),
    ]);
    let outcome = solve(&instance);

    assert!(outcome.is_optimal());
    assert_eq!(outcome.best_count(), 0);
    assert_eq!(outcome.solutions(), &[Solution::all_on_time()]);
}

#[test]
fn test_distant_due_date_with_forced_tardy_job() {
    let instance = build_instance(&[
        (1, 0, 6, 1_000_000_000_000_000),
        (2, 0, 5, 5),
        (3, 0, 5, 9),
        (4, 0, 5, 10),
    ]);
    let (best, optimal) = brute_force(&instance);
    let outcome = solve(&instance);

    assert!(outcome.is_optimal());
    assert_eq!(outcome.best_count(), best);
    assert_eq!(sorted(outcome.solutions()), optimal);
}

#[test]
fn test_every_strategy_agrees_with_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(2025);
    let mut solver = BnbSolver::<IntegerType>::new();
    let mut oracle = EddFeasibility::new();
    let mut strategies: Vec<Box<dyn BranchingStrategy<IntegerType>>> = vec![
        Box::new(FirstUndecided::new()),
        Box::new(EarliestDueDate::new()),
        Box::new(ShortestProcessingTime::new()),
        Box::new(LongestProcessingTime::new()),
        Box::new(MinimumSlack::new()),
    ];

    for n in 1..=12 {
        let instance = random_instance(&mut rng, n);
        let (best, optimal) = brute_force(&instance);

        for strategy in &mut strategies {
            let outcome = solver.solve(&instance, strategy, &mut oracle, NoOperationMonitor::new());
            assert!(outcome.is_optimal());
            assert_eq!(outcome.best_count(), best, "n = {}, {}", n, strategy.name());
            assert_eq!(
                sorted(outcome.solutions()),
                optimal,
                "n = {}, {}",
                n,
                strategy.name()
            );
        }
    }
}

#[test]
fn test_first_optimum_agrees_on_count() {
    let mut rng = ChaCha8Rng::seed_from_u64(404);
    let config = SolverConfig::default().with_prune_mode(PruneMode::FirstOptimum);
    let mut solver = BnbSolver::<IntegerType>::with_config(config);

    for n in 1..=12 {
        let instance = random_instance(&mut rng, n);
        let (best, _) = brute_force(&instance);
        let outcome = solver.solve_default(&instance);

        assert_eq!(outcome.best_count(), best, "n = {}", n);
        assert_well_formed(&instance, &outcome);
    }
}

#[test]
fn test_bounds_never_exceed_the_optimum() {
    let mut rng = ChaCha8Rng::seed_from_u64(31337);
    let mut knapsack = KnapsackBound::new();
    let mut moore_hodgson = MooreHodgsonBound::new();
    let mut overload = IntervalOverloadBound::new();
    let mut hybrid = HybridBound::new();

    for round in 0..60 {
        let instance = random_instance(&mut rng, 1 + round % 10);
        let (best, _) = brute_force(&instance);
        let jobs = instance.jobs();

        assert!(knapsack.lower_bound(jobs) <= best, "knapsack, round {}", round);
        assert!(moore_hodgson.lower_bound(jobs) <= best, "moore-hodgson, round {}", round);
        assert!(overload.lower_bound(jobs) <= best, "overload, round {}", round);
        assert!(hybrid.lower_bound(jobs) <= best, "hybrid, round {}", round);
    }
}

#[test]
fn test_repeated_runs_are_idempotent() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let instance = random_instance(&mut rng, 12);
    let mut solver = BnbSolver::<IntegerType>::new();

    let first = solver.solve_default(&instance);
    let second = solver.solve_default(&instance);

    assert_eq!(first.best_count(), second.best_count());
    assert_eq!(first.solutions(), second.solutions());
    assert_eq!(first.statistics(), &{
        let mut stats = second.statistics().clone();
        stats.bound_time = first.statistics().bound_time;
        stats.time_total = first.statistics().time_total;
        stats
    });
}
