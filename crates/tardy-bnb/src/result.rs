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

use crate::stats::BnbSolverStatistics;
use tardy_model::solution::Solution;

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The whole tree was fathomed; the incumbent is optimal.
    OptimalityProven,
    /// A monitor stopped the run. The incumbent is the best known so far.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of the solver after termination.
///
/// `solutions` is never empty and every entry has exactly `best_count`
/// tardy jobs. When the run was aborted the pair is still consistent, it
/// is just not proven optimal.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome {
    best_count: usize,
    solutions: Vec<Solution>,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics,
}

impl BnbSolverOutcome {
    #[inline]
    pub fn optimal(
        best_count: usize,
        solutions: Vec<Solution>,
        statistics: BnbSolverStatistics,
    ) -> Self {
        Self::new(
            best_count,
            solutions,
            TerminationReason::OptimalityProven,
            statistics,
        )
    }

    #[inline]
    pub fn aborted<R>(
        best_count: usize,
        solutions: Vec<Solution>,
        reason: R,
        statistics: BnbSolverStatistics,
    ) -> Self
    where
        R: Into<String>,
    {
        Self::new(
            best_count,
            solutions,
            TerminationReason::Aborted(reason.into()),
            statistics,
        )
    }

    #[inline]
    fn new(
        best_count: usize,
        solutions: Vec<Solution>,
        termination_reason: TerminationReason,
        statistics: BnbSolverStatistics,
    ) -> Self {
        debug_assert!(
            !solutions.is_empty(),
            "called `BnbSolverOutcome::new` with an empty solution list"
        );
        debug_assert!(
            solutions.iter().all(|s| s.num_tardy() == best_count),
            "called `BnbSolverOutcome::new` with a solution whose size differs from best count {}",
            best_count
        );

        Self {
            best_count,
            solutions,
            termination_reason,
            statistics,
        }
    }

    /// Returns the minimum number of tardy jobs found.
    #[inline]
    pub fn best_count(&self) -> usize {
        self.best_count
    }

    /// Returns every distinct optimal tardy set found, in discovery order.
    #[inline]
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// Returns the first optimal tardy set found.
    #[inline]
    pub fn first_solution(&self) -> Option<&Solution> {
        self.solutions.first()
    }

    /// Consumes the outcome and returns the tardy sets.
    #[inline]
    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }

    /// Returns `true` if optimality was proven.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::OptimalityProven)
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }
}

impl std::fmt::Display for BnbSolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BnbSolverOutcome(best_count: {}, solutions: {}, termination: {})",
            self.best_count,
            self.solutions.len(),
            self.termination_reason
        )
    }
}
