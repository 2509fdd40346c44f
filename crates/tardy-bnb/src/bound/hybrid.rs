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

//! Hybrid lower bound
//!
//! `HybridBound` runs the enabled relaxation bounds on the same job subset
//! and returns the largest value. Every component is a valid bound on its
//! own, so the maximum is one too. Additional caller-supplied bounds (for
//! example an LP relaxation backed by an external solver) can be attached;
//! they take part in the maximum and therefore only ever tighten the result.
//!
//! Design notes
//! - The knapsack DP costs `O(n * H)`. A `KnapsackGate` decides from the
//!   subset size and the horizon whether it runs; the gate either needs one
//!   of the two tests to pass (`GateMode::Or`, the default) or both
//!   (`GateMode::And`).
//! - The result is clamped to `[0, n]`. A component returning more than `n`
//!   is a defect and trips a debug assertion.

use crate::bound::{
    knapsack::KnapsackBound, lower_bound::LowerBound, moore_hodgson::MooreHodgsonBound,
    overload::IntervalOverloadBound,
};
use tardy_model::{job::Job, num::TimeNumeric};

/// How the two knapsack gate tests are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateMode {
    /// Run when the subset is small enough or the horizon is short enough.
    #[default]
    Or,
    /// Run only when both the subset and the horizon are small enough.
    And,
}

impl std::fmt::Display for GateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateMode::Or => write!(f, "Or"),
            GateMode::And => write!(f, "And"),
        }
    }
}

/// Activation thresholds for the knapsack bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnapsackGate {
    /// Largest subset size that passes the size test.
    pub max_jobs: usize,
    /// Largest horizon `max d_j` that passes the horizon test.
    pub max_horizon: usize,
    /// How the two tests are combined.
    pub mode: GateMode,
}

impl KnapsackGate {
    /// Default subset size threshold.
    pub const DEFAULT_MAX_JOBS: usize = 50;
    /// Default horizon threshold.
    pub const DEFAULT_MAX_HORIZON: usize = 500;

    /// Creates a gate with the given thresholds.
    #[inline]
    pub const fn new(max_jobs: usize, max_horizon: usize, mode: GateMode) -> Self {
        Self {
            max_jobs,
            max_horizon,
            mode,
        }
    }

    /// Returns `true` if the knapsack DP should run on `num_jobs` jobs with
    /// the given horizon.
    #[inline]
    pub fn admits<T>(&self, num_jobs: usize, horizon: T) -> bool
    where
        T: TimeNumeric,
    {
        let small = num_jobs <= self.max_jobs;
        let short = horizon
            .to_usize()
            .is_some_and(|h| h <= self.max_horizon)
            || horizon <= T::zero();
        match self.mode {
            GateMode::Or => small || short,
            GateMode::And => small && short,
        }
    }
}

impl Default for KnapsackGate {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_JOBS,
            Self::DEFAULT_MAX_HORIZON,
            GateMode::Or,
        )
    }
}

impl std::fmt::Display for KnapsackGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KnapsackGate(max_jobs: {}, max_horizon: {}, mode: {})",
            self.max_jobs, self.max_horizon, self.mode
        )
    }
}

/// Which components of the hybrid bound are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HybridBoundConfig {
    knapsack: bool,
    moore_hodgson: bool,
    interval_overload: bool,
    knapsack_gate: KnapsackGate,
}

impl Default for HybridBoundConfig {
    fn default() -> Self {
        Self {
            knapsack: true,
            moore_hodgson: true,
            interval_overload: true,
            knapsack_gate: KnapsackGate::default(),
        }
    }
}

impl HybridBoundConfig {
    /// Creates the default configuration: all bounds on, default gate.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with every component disabled.
    #[inline]
    pub fn none() -> Self {
        Self {
            knapsack: false,
            moore_hodgson: false,
            interval_overload: false,
            knapsack_gate: KnapsackGate::default(),
        }
    }

    /// Enables or disables the knapsack bound.
    #[inline]
    pub fn with_knapsack(mut self, yes: bool) -> Self {
        self.knapsack = yes;
        self
    }

    /// Enables or disables the Moore–Hodgson bound.
    #[inline]
    pub fn with_moore_hodgson(mut self, yes: bool) -> Self {
        self.moore_hodgson = yes;
        self
    }

    /// Enables or disables the interval-overload bound.
    #[inline]
    pub fn with_interval_overload(mut self, yes: bool) -> Self {
        self.interval_overload = yes;
        self
    }

    /// Sets the knapsack activation gate.
    #[inline]
    pub fn with_knapsack_gate(mut self, gate: KnapsackGate) -> Self {
        self.knapsack_gate = gate;
        self
    }

    #[inline]
    pub fn knapsack(&self) -> bool {
        self.knapsack
    }

    #[inline]
    pub fn moore_hodgson(&self) -> bool {
        self.moore_hodgson
    }

    #[inline]
    pub fn interval_overload(&self) -> bool {
        self.interval_overload
    }

    #[inline]
    pub fn knapsack_gate(&self) -> KnapsackGate {
        self.knapsack_gate
    }
}

/// The max-combinator over the relaxation bounds.
#[derive(Debug)]
pub struct HybridBound<T> {
    config: HybridBoundConfig,
    knapsack: KnapsackBound,
    moore_hodgson: MooreHodgsonBound<T>,
    interval_overload: IntervalOverloadBound<T>,
    extra: Vec<Box<dyn LowerBound<T> + Send>>,
    knapsack_skipped: u64,
}

impl<T> Default for HybridBound<T>
where
    T: TimeNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HybridBound<T>
where
    T: TimeNumeric,
{
    /// Creates a hybrid bound with the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::with_config(HybridBoundConfig::default())
    }

    /// Creates a hybrid bound with the given configuration.
    #[inline]
    pub fn with_config(config: HybridBoundConfig) -> Self {
        Self {
            config,
            knapsack: KnapsackBound::new(),
            moore_hodgson: MooreHodgsonBound::new(),
            interval_overload: IntervalOverloadBound::new(),
            extra: Vec::new(),
            knapsack_skipped: 0,
        }
    }

    /// Creates a hybrid bound with buffers sized for `num_jobs` jobs.
    #[inline]
    pub fn preallocated(config: HybridBoundConfig, num_jobs: usize) -> Self {
        Self {
            config,
            knapsack: KnapsackBound::preallocated(config.knapsack_gate.max_horizon.min(1 << 16)),
            moore_hodgson: MooreHodgsonBound::preallocated(num_jobs),
            interval_overload: IntervalOverloadBound::preallocated(num_jobs),
            extra: Vec::new(),
            knapsack_skipped: 0,
        }
    }

    /// Attaches an additional bound that takes part in the maximum.
    #[inline]
    pub fn with_bound<L>(mut self, bound: L) -> Self
    where
        L: LowerBound<T> + Send + 'static,
    {
        self.extra.push(Box::new(bound));
        self
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &HybridBoundConfig {
        &self.config
    }

    /// Returns how often the gate kept the knapsack DP from running.
    #[inline]
    pub fn knapsack_skipped(&self) -> u64 {
        self.knapsack_skipped
    }

    /// Returns the number of attached extra bounds.
    #[inline]
    pub fn num_extra_bounds(&self) -> usize {
        self.extra.len()
    }
}

impl<T> LowerBound<T> for HybridBound<T>
where
    T: TimeNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "HybridBound"
    }

    fn lower_bound(&mut self, jobs: &[Job<T>]) -> usize {
        let n = jobs.len();
        if n == 0 {
            return 0;
        }

        let mut best = 0;

        if self.config.knapsack {
            let horizon = jobs
                .iter()
                .map(|j| j.due_date())
                .max()
                .unwrap_or_else(T::zero);
            if self.config.knapsack_gate.admits(n, horizon) {
                best = best.max(self.knapsack.lower_bound(jobs));
            } else {
                self.knapsack_skipped += 1;
            }
        }

        if self.config.moore_hodgson && best < n {
            best = best.max(self.moore_hodgson.lower_bound(jobs));
        }

        if self.config.interval_overload && best < n {
            best = best.max(self.interval_overload.lower_bound(jobs));
        }

        for bound in &mut self.extra {
            best = best.max(bound.lower_bound(jobs));
        }

        debug_assert!(
            best <= n,
            "called `HybridBound::lower_bound` and a component returned {} for {} jobs",
            best,
            n
        );
        best.min(n)
    }
}
