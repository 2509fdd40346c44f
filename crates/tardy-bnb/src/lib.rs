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

//! Tardy-BnB: branch-and-bound for 1|r_j|ΣU_j
//!
//! Exact solver for minimizing the number of tardy jobs on a single machine
//! with release dates. The search decides job by job whether it is forced on
//! time or forced tardy, and separates branching, feasibility checking,
//! bounding, monitoring and incumbent handling so each can be swapped
//! without touching the core search loop.
//!
//! Core flow
//! - Provide a `tardy_model::instance::Instance<T>`.
//! - Choose a `branching::strategy::BranchingStrategy` (which job to split on).
//! - Choose a `feasibility::FeasibilityOracle` (usually `EddFeasibility`).
//! - Optionally tune `config::SolverConfig` and attach monitors.
//! - Run `bnb::BnbSolver` directly, or several strategies via `portfolio`.
//!
//! Design highlights
//! - Nodes are two bit sets over job positions; children are copies of the
//!   parent with one more decision.
//! - The incumbent starts from the EDD drop heuristic, so every outcome holds
//!   at least one tardy set.
//! - By default every distinct optimal tardy set is enumerated.
//!
//! Assumptions and guarantees
//! - Lower bounds must be admissible (never exceed the number of undecided
//!   jobs that are necessarily tardy).
//! - Optimality is relative to the feasibility oracle. The EDD oracle is
//!   exact for common release dates and a sufficient test otherwise.
//!
//! Module map
//! - `bnb`: the solver engine and session orchestration.
//! - `bound`: relaxation lower bounds and their hybrid.
//! - `branching`: branching strategies.
//! - `config`: pruning, root and bound settings.
//! - `feasibility`: the on-time feasibility oracle.
//! - `heuristic`: EDD drop upper bound and the preemptive diagnostic.
//! - `incumbent`: local and shared best-known tardy sets.
//! - `monitor`: tree-search monitors (log, limits, composite).
//! - `node`: the search node.
//! - `portfolio`: parallel runs over a shared incumbent.
//! - `result`: solver outcomes with termination reasons.
//! - `stats`: lightweight counters/timing.

pub mod bnb;
pub mod bound;
pub mod branching;
pub mod config;
pub mod feasibility;
pub mod heuristic;
pub mod incumbent;
pub mod monitor;
pub mod node;
pub mod portfolio;
pub mod result;
mod stack;
pub mod stats;
