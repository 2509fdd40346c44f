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

//! Random instance generation.
//!
//! Produces reproducible instances for tests, experiments and benchmarks.
//! `InstanceGenerator` samples release dates and processing times uniformly
//! from inclusive ranges and derives due dates according to a
//! `DueDatePolicy`. `overloaded_block` builds the deterministic stress case of
//! `n` unit jobs competing for a common deadline.
//!
//! All generators return validated `Instance`s; jobs are numbered `1..=n`.

use crate::{
    instance::{Instance, InstanceError},
    job::Job,
    num::TimeNumeric,
};
use rand::{Rng, SeedableRng, distr::uniform::SampleUniform, rngs::StdRng};
use std::ops::RangeInclusive;

/// The reasons a generator request can be rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeneratorError {
    /// A sampling range is empty.
    #[error("empty {0} range")]
    EmptyRange(&'static str),
    /// Processing times must be positive.
    #[error("processing time range must start at 1 or above")]
    NonPositiveProcessingRange,
    /// Release dates must be non-negative.
    #[error("release range must start at 0 or above")]
    NegativeReleaseRange,
    /// The tightness factor is negative or not finite.
    #[error("tightness must be a finite, non-negative number, got {0}")]
    InvalidTightness(f64),
    /// More jobs were requested than identifiers exist.
    #[error("cannot number {0} jobs with 32-bit identifiers")]
    TooManyJobs(usize),
    /// The generated data failed validation.
    #[error("generated instance is invalid: {0}")]
    Instance(#[from] InstanceError),
}

/// How due dates are derived from the sampled release and processing times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DueDatePolicy {
    /// `d = r + p + s` with `s` uniform in `[1, max(3, p)]`.
    Tight,
    /// `d = r + p + s` with `s` uniform in `[5, 15]`.
    Loose,
    /// `d = r + p + floor(tightness * (H - r - p))` where
    /// `H = max r + sum p`. Zero gives no slack at all; one lets every job
    /// finish by the end of the trivial horizon.
    Tightness(f64),
}

impl std::fmt::Display for DueDatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DueDatePolicy::Tight => write!(f, "Tight"),
            DueDatePolicy::Loose => write!(f, "Loose"),
            DueDatePolicy::Tightness(t) => write!(f, "Tightness({})", t),
        }
    }
}

/// A seeded generator of uniform random instances.
#[derive(Debug, Clone)]
pub struct InstanceGenerator<R = StdRng> {
    rng: R,
}

impl InstanceGenerator<StdRng> {
    /// Creates a generator with a fixed seed.
    #[inline]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R> InstanceGenerator<R>
where
    R: Rng,
{
    /// Creates a generator drawing from `rng`.
    #[inline]
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generates `n` jobs with release dates in `releases`, processing times
    /// in `processing` and due dates following `policy`.
    pub fn uniform<T>(
        &mut self,
        n: usize,
        releases: RangeInclusive<T>,
        processing: RangeInclusive<T>,
        policy: DueDatePolicy,
    ) -> Result<Instance<T>, GeneratorError>
    where
        T: TimeNumeric + SampleUniform,
    {
        if releases.is_empty() {
            return Err(GeneratorError::EmptyRange("release"));
        }
        if processing.is_empty() {
            return Err(GeneratorError::EmptyRange("processing time"));
        }
        if *releases.start() < T::zero() {
            return Err(GeneratorError::NegativeReleaseRange);
        }
        if *processing.start() <= T::zero() {
            return Err(GeneratorError::NonPositiveProcessingRange);
        }
        if let DueDatePolicy::Tightness(t) = policy
            && (!t.is_finite() || t < 0.0)
        {
            return Err(GeneratorError::InvalidTightness(t));
        }
        if u32::try_from(n).is_err() {
            return Err(GeneratorError::TooManyJobs(n));
        }

        let sampled: Vec<(T, T)> = (0..n)
            .map(|_| {
                (
                    self.rng.random_range(releases.clone()),
                    self.rng.random_range(processing.clone()),
                )
            })
            .collect();

        let horizon = sampled
            .iter()
            .map(|&(r, _)| r)
            .max()
            .unwrap_or_else(T::zero)
            .saturating_add(
                sampled
                    .iter()
                    .fold(T::zero(), |acc, &(_, p)| acc.saturating_add(p)),
            );

        let mut jobs = Vec::with_capacity(n);
        for (position, (release, processing_time)) in sampled.into_iter().enumerate() {
            let earliest = release.saturating_add(processing_time);
            let slack = self.slack(policy, earliest, processing_time, horizon);
            jobs.push(Job::new(
                position as u32 + 1,
                release,
                processing_time,
                earliest.saturating_add(slack),
            ));
        }

        Ok(Instance::new(jobs)?)
    }

    fn slack<T>(&mut self, policy: DueDatePolicy, earliest: T, processing_time: T, horizon: T) -> T
    where
        T: TimeNumeric + SampleUniform,
    {
        match policy {
            DueDatePolicy::Tight => {
                let three = T::from_u8(3).unwrap_or_else(T::one);
                self.rng.random_range(T::one()..=processing_time.max(three))
            }
            DueDatePolicy::Loose => {
                let lo = T::from_u8(5).unwrap_or_else(T::one);
                let hi = T::from_u8(15).unwrap_or_else(T::max_value);
                self.rng.random_range(lo..=hi)
            }
            DueDatePolicy::Tightness(tightness) => {
                let gap = horizon.saturating_sub(earliest).max(T::zero());
                let scaled = gap.to_f64().map(|g| (tightness * g).floor());
                scaled.and_then(T::from_f64).unwrap_or_else(T::max_value)
            }
        }
    }
}

/// Builds `n` unit jobs released at time zero and all due at `due`.
///
/// Exactly `max(0, n - due)` jobs are tardy in an optimal schedule, and every
/// subset of that size is optimal.
pub fn overloaded_block<T>(n: usize, due: T) -> Result<Instance<T>, GeneratorError>
where
    T: TimeNumeric,
{
    if u32::try_from(n).is_err() {
        return Err(GeneratorError::TooManyJobs(n));
    }

    let jobs = (0..n)
        .map(|position| Job::new(position as u32 + 1, T::zero(), T::one(), due))
        .collect();
    Ok(Instance::new(jobs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::JobIndex;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let a = InstanceGenerator::seeded(7)
            .uniform(20, 0i64..=50, 1..=5, DueDatePolicy::Tight)
            .expect("valid");
        let b = InstanceGenerator::seeded(7)
            .uniform(20, 0i64..=50, 1..=5, DueDatePolicy::Tight)
            .expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_respects_ranges_and_policies() {
        let mut generator = InstanceGenerator::from_rng(ChaCha8Rng::seed_from_u64(3));
        for policy in [DueDatePolicy::Tight, DueDatePolicy::Loose] {
            let instance = generator
                .uniform(50, 0i64..=100, 1..=5, policy)
                .expect("valid");
            for job in instance.jobs() {
                assert!((0..=100).contains(&job.release()));
                assert!((1..=5).contains(&job.processing_time()));
                let slack = job.slack();
                match policy {
                    DueDatePolicy::Tight => {
                        assert!(slack >= 1 && slack <= job.processing_time().max(3))
                    }
                    DueDatePolicy::Loose => assert!((5..=15).contains(&slack)),
                    DueDatePolicy::Tightness(_) => unreachable!(),
                }
            }
        }
    }

    #[test]
    fn test_tightness_extremes() {
        let mut generator = InstanceGenerator::from_rng(ChaCha8Rng::seed_from_u64(11));
        let zero = generator
            .uniform(10, 0i64..=20, 1..=4, DueDatePolicy::Tightness(0.0))
            .expect("valid");
        assert!(zero.jobs().iter().all(|j| j.slack() == 0));

        let one = generator
            .uniform(10, 0i64..=20, 1..=4, DueDatePolicy::Tightness(1.0))
            .expect("valid");
        let horizon = one.jobs().iter().map(|j| j.release()).max().unwrap_or(0)
            + one.total_processing_time();
        assert!(one.jobs().iter().all(|j| j.due_date() == horizon));
    }

    #[test]
    fn test_rejects_bad_requests() {
        let mut generator = InstanceGenerator::seeded(0);
        assert_eq!(
            generator.uniform(3, 0i64..=5, 0..=3, DueDatePolicy::Tight),
            Err(GeneratorError::NonPositiveProcessingRange)
        );
        assert!(matches!(
            generator.uniform(3, 0i64..=5, 1..=3, DueDatePolicy::Tightness(-1.0)),
            Err(GeneratorError::InvalidTightness(_))
        ));
        #[allow(clippy::reversed_empty_ranges)]
        let empty = 5i64..=0;
        assert_eq!(
            generator.uniform(3, empty, 1..=3, DueDatePolicy::Loose),
            Err(GeneratorError::EmptyRange("release"))
        );
    }

    #[test]
    fn test_overloaded_block() {
        let instance = overloaded_block(10, 7i64).expect("valid");
        assert_eq!(instance.num_jobs(), 10);
        let last = instance.job(JobIndex::new(9));
        assert_eq!(last.id().get(), 10);
        assert_eq!(last.processing_time(), 1);
        assert_eq!(last.due_date(), 7);
    }
}
