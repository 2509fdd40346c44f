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

use tardy_model::job::Job;

/// A relaxation bound on the number of tardy jobs.
///
/// `lower_bound(jobs)` must never exceed the minimum number of tardy jobs
/// over all non-preemptive schedules of `jobs` that respect release dates.
/// The solver prunes with `|T| + bound > best`, so an overestimate would cut
/// optimal subtrees. Values above `jobs.len()` are a logic error; the solver
/// asserts on them in debug builds and clamps them otherwise.
///
/// Bounds take `&mut self` so that implementations can keep scratch buffers
/// between calls.
pub trait LowerBound<T> {
    /// Returns the name of the bound.
    fn name(&self) -> &str;

    /// Computes a lower bound on the number of tardy jobs among `jobs`.
    /// Called with a non-empty slice.
    fn lower_bound(&mut self, jobs: &[Job<T>]) -> usize;
}

impl<T> std::fmt::Debug for dyn LowerBound<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LowerBound({})", self.name())
    }
}

impl<T> std::fmt::Debug for dyn LowerBound<T> + Send {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LowerBound({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn LowerBound<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LowerBound({})", self.name())
    }
}

impl<T, L> LowerBound<T> for Box<L>
where
    L: LowerBound<T> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn lower_bound(&mut self, jobs: &[Job<T>]) -> usize {
        (**self).lower_bound(jobs)
    }
}

/// The trivial bound: zero. Turns the search into plain enumeration with
/// feasibility pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZeroBound;

impl<T> LowerBound<T> for ZeroBound {
    #[inline(always)]
    fn name(&self) -> &str {
        "ZeroBound"
    }

    #[inline(always)]
    fn lower_bound(&mut self, _jobs: &[Job<T>]) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bound() {
        let jobs = [Job::new(1u32, 0i64, 5, 0)];
        let mut bound = ZeroBound;
        assert_eq!(bound.lower_bound(&jobs), 0);
        assert_eq!(LowerBound::<i64>::name(&bound), "ZeroBound");
    }

    #[test]
    fn test_boxed_bound_delegates() {
        let mut boxed: Box<dyn LowerBound<i64>> = Box::new(ZeroBound);
        assert_eq!(boxed.name(), "ZeroBound");
        assert_eq!(boxed.lower_bound(&[Job::new(1u32, 0, 1, 1)]), 0);
        assert_eq!(format!("{:?}", boxed.as_ref()), "LowerBound(ZeroBound)");
    }
}
