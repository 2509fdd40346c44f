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

//! Solver configuration
//!
//! `SolverConfig` collects every knob of a run: pruning strictness, the
//! root short-circuit policy and the settings of the built-in hybrid lower
//! bound. `Default` gives the exact enumerating configuration.
//!
//! Root short-circuit
//! - A root bound of zero only says that no relaxation forces a tardy job;
//!   it does not prove that all jobs fit. `Verified` (default) therefore
//!   also runs the feasibility oracle on the full instance before stopping.
//! - `Trusted` stops on the bound alone. It can report 0 for instances that
//!   need tardy jobs and is kept for comparison runs only.
//! - `Disabled` never stops early; the root is handled like any other node.

use crate::bound::hybrid::{HybridBoundConfig, KnapsackGate};

/// How strictly nodes are pruned against the incumbent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruneMode {
    /// Prune when `|T| + bound > best`. Every optimal tardy set is found.
    #[default]
    EnumerateAll,
    /// Prune when `|T| + bound >= best`. Faster, finds one optimum.
    FirstOptimum,
}

impl PruneMode {
    /// Returns `true` if a node with `committed` tardy jobs and lower bound
    /// `bound` on the rest cannot contribute against `best`.
    #[inline]
    pub fn prunes(self, committed: usize, bound: usize, best: usize) -> bool {
        let total = committed.saturating_add(bound);
        match self {
            PruneMode::EnumerateAll => total > best,
            PruneMode::FirstOptimum => total >= best,
        }
    }
}

impl std::fmt::Display for PruneMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneMode::EnumerateAll => write!(f, "EnumerateAll"),
            PruneMode::FirstOptimum => write!(f, "FirstOptimum"),
        }
    }
}

/// What to do when the root lower bound is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootShortCircuit {
    /// Stop with the empty tardy set if the whole instance passes the oracle.
    #[default]
    Verified,
    /// Stop with the empty tardy set on the bound alone.
    Trusted,
    /// Never stop early.
    Disabled,
}

impl std::fmt::Display for RootShortCircuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RootShortCircuit::Verified => write!(f, "Verified"),
            RootShortCircuit::Trusted => write!(f, "Trusted"),
            RootShortCircuit::Disabled => write!(f, "Disabled"),
        }
    }
}

/// Configuration of a `BnbSolver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverConfig {
    prune_mode: PruneMode,
    root_short_circuit: RootShortCircuit,
    bounds: HybridBoundConfig,
}

impl SolverConfig {
    /// Creates the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prune mode.
    #[inline]
    pub fn with_prune_mode(mut self, prune_mode: PruneMode) -> Self {
        self.prune_mode = prune_mode;
        self
    }

    /// Sets the root short-circuit policy.
    #[inline]
    pub fn with_root_short_circuit(mut self, policy: RootShortCircuit) -> Self {
        self.root_short_circuit = policy;
        self
    }

    /// Sets the configuration of the built-in hybrid bound.
    #[inline]
    pub fn with_bounds(mut self, bounds: HybridBoundConfig) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the knapsack gate of the built-in hybrid bound.
    #[inline]
    pub fn with_knapsack_gate(mut self, gate: KnapsackGate) -> Self {
        self.bounds = self.bounds.with_knapsack_gate(gate);
        self
    }

    /// Returns the prune mode.
    #[inline]
    pub fn prune_mode(&self) -> PruneMode {
        self.prune_mode
    }

    /// Returns the root short-circuit policy.
    #[inline]
    pub fn root_short_circuit(&self) -> RootShortCircuit {
        self.root_short_circuit
    }

    /// Returns the configuration of the built-in hybrid bound.
    #[inline]
    pub fn bounds(&self) -> HybridBoundConfig {
        self.bounds
    }
}

impl std::fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolverConfig(prune_mode: {}, root_short_circuit: {}, knapsack_gate: {})",
            self.prune_mode,
            self.root_short_circuit,
            self.bounds.knapsack_gate()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::hybrid::GateMode;

    #[test]
    fn test_prune_mode_thresholds() {
        assert!(!PruneMode::EnumerateAll.prunes(1, 1, 2));
        assert!(PruneMode::EnumerateAll.prunes(2, 1, 2));
        assert!(PruneMode::FirstOptimum.prunes(1, 1, 2));
        assert!(!PruneMode::FirstOptimum.prunes(1, 0, 2));
    }

    #[test]
    fn test_prune_mode_saturates() {
        assert!(PruneMode::EnumerateAll.prunes(usize::MAX, 1, usize::MAX - 1));
    }

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.prune_mode(), PruneMode::EnumerateAll);
        assert_eq!(config.root_short_circuit(), RootShortCircuit::Verified);
        assert_eq!(config.bounds(), HybridBoundConfig::default());
        assert_eq!(
            config.bounds().knapsack_gate(),
            KnapsackGate::new(50, 500, GateMode::Or)
        );
    }

    #[test]
    fn test_builder_methods() {
        let gate = KnapsackGate::new(10, 100, GateMode::And);
        let config = SolverConfig::new()
            .with_prune_mode(PruneMode::FirstOptimum)
            .with_root_short_circuit(RootShortCircuit::Disabled)
            .with_knapsack_gate(gate);

        assert_eq!(config.prune_mode(), PruneMode::FirstOptimum);
        assert_eq!(config.root_short_circuit(), RootShortCircuit::Disabled);
        assert_eq!(config.bounds().knapsack_gate(), gate);
        assert!(config.bounds().knapsack());
    }
}
