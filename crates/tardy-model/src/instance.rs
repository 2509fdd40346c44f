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

//! # Problem Instances
//!
//! An `Instance` is the validated, immutable job list consumed by the
//! solvers. It is built either directly from a job vector with
//! `Instance::new` or incrementally with an `InstanceBuilder`; both paths run
//! the same validation so that no solver ever sees an invalid job.
//!
//! ## Validation
//!
//! - identifiers are strictly positive and unique,
//! - release dates are non-negative,
//! - processing times are strictly positive,
//! - due dates are non-negative.
//!
//! A due date before `release + processing_time` is allowed; such a job is
//! simply tardy in every schedule. The empty instance is valid.
//!
//! ## Layout
//!
//! Jobs keep the order in which they were supplied. That order defines the
//! `JobIndex` of each job, and a hash map resolves identifiers to indices.

use crate::{
    index::JobIndex,
    job::{Job, JobId},
    num::TimeNumeric,
};
use rustc_hash::FxHashMap;

/// The reasons an instance can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstanceError {
    /// A job uses the reserved identifier zero.
    #[error("job at position {index} has identifier 0; identifiers must be positive")]
    ZeroId { index: usize },
    /// Two jobs share an identifier.
    #[error("duplicate job identifier {id} at positions {first} and {second}")]
    DuplicateId { id: JobId, first: usize, second: usize },
    /// A job has a processing time of zero or less.
    #[error("job {id} has a non-positive processing time")]
    NonPositiveProcessingTime { id: JobId },
    /// A job is released before time zero.
    #[error("job {id} has a negative release date")]
    NegativeRelease { id: JobId },
    /// A job is due before time zero.
    #[error("job {id} has a negative due date")]
    NegativeDueDate { id: JobId },
}

/// A validated single-machine instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance<T> {
    jobs: Vec<Job<T>>,
    positions: FxHashMap<JobId, JobIndex>,
}

impl<T> Instance<T>
where
    T: TimeNumeric,
{
    /// Validates `jobs` and builds an instance from them.
    pub fn new(jobs: Vec<Job<T>>) -> Result<Self, InstanceError> {
        let mut positions =
            FxHashMap::with_capacity_and_hasher(jobs.len(), Default::default());

        for (position, job) in jobs.iter().enumerate() {
            let id = job.id();
            if id.get() == 0 {
                return Err(InstanceError::ZeroId { index: position });
            }
            if job.processing_time() <= T::zero() {
                return Err(InstanceError::NonPositiveProcessingTime { id });
            }
            if job.release() < T::zero() {
                return Err(InstanceError::NegativeRelease { id });
            }
            if job.due_date() < T::zero() {
                return Err(InstanceError::NegativeDueDate { id });
            }
            if let Some(first) = positions.insert(id, JobIndex::new(position)) {
                return Err(InstanceError::DuplicateId {
                    id,
                    first: first.get(),
                    second: position,
                });
            }
        }

        Ok(Self { jobs, positions })
    }

    /// Returns the number of jobs.
    #[inline]
    pub fn num_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// Returns `true` if the instance contains no jobs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Returns all jobs in index order.
    #[inline]
    pub fn jobs(&self) -> &[Job<T>] {
        &self.jobs
    }

    /// Returns the job at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn job(&self, index: JobIndex) -> &Job<T> {
        debug_assert!(
            index.get() < self.num_jobs(),
            "called `Instance::job` with job index out of bounds: the len is {} but the index is {}",
            self.num_jobs(),
            index.get()
        );

        &self.jobs[index.get()]
    }

    /// Resolves a job identifier to its index.
    #[inline]
    pub fn index_of(&self, id: JobId) -> Option<JobIndex> {
        self.positions.get(&id).copied()
    }

    /// Returns an iterator over all job indices.
    #[inline]
    pub fn indices(&self) -> impl Iterator<Item = JobIndex> + '_ {
        (0..self.jobs.len()).map(JobIndex::new)
    }

    /// Returns the latest due date, or `None` for the empty instance.
    #[inline]
    pub fn max_due_date(&self) -> Option<T> {
        self.jobs.iter().map(|j| j.due_date()).max()
    }

    /// Returns the sum of all processing times (saturating).
    #[inline]
    pub fn total_processing_time(&self) -> T {
        self.jobs
            .iter()
            .fold(T::zero(), |acc, j| acc.saturating_add(j.processing_time()))
    }

    /// Consumes the instance and returns its jobs.
    #[inline]
    pub fn into_jobs(self) -> Vec<Job<T>> {
        self.jobs
    }
}

impl<T> std::fmt::Display for Instance<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instance ({} jobs)", self.jobs.len())?;
        for job in &self.jobs {
            writeln!(f, "  {}", job)?;
        }
        Ok(())
    }
}

/// Incremental builder for `Instance`.
#[derive(Clone, Debug, Default)]
pub struct InstanceBuilder<T> {
    jobs: Vec<Job<T>>,
}

impl<T> InstanceBuilder<T>
where
    T: TimeNumeric,
{
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Creates an empty builder with room for `capacity` jobs.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            jobs: Vec::with_capacity(capacity),
        }
    }

    /// Appends a job.
    #[inline]
    pub fn add_job(&mut self, id: u32, release: T, processing_time: T, due_date: T) -> &mut Self {
        self.jobs
            .push(Job::new(id, release, processing_time, due_date));
        self
    }

    /// Appends an already constructed job.
    #[inline]
    pub fn push(&mut self, job: Job<T>) -> &mut Self {
        self.jobs.push(job);
        self
    }

    /// Returns the number of jobs added so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns `true` if no job has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Validates the collected jobs and builds the instance.
    #[inline]
    pub fn build(self) -> Result<Instance<T>, InstanceError> {
        Instance::new(self.jobs)
    }
}

impl<T> Extend<Job<T>> for InstanceBuilder<T> {
    fn extend<I: IntoIterator<Item = Job<T>>>(&mut self, iter: I) {
        self.jobs.extend(iter);
    }
}

impl<T> FromIterator<Job<T>> for InstanceBuilder<T> {
    fn from_iter<I: IntoIterator<Item = Job<T>>>(iter: I) -> Self {
        Self {
            jobs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    #[test]
    fn test_builder_preserves_order_and_maps_ids() {
        let mut builder = InstanceBuilder::<IntegerType>::new();
        builder.add_job(10, 0, 2, 5).add_job(3, 1, 1, 4);
        let instance = builder.build().expect("valid instance");

        assert_eq!(instance.num_jobs(), 2);
        assert_eq!(instance.job(JobIndex::new(0)).id(), JobId::new(10));
        assert_eq!(instance.index_of(JobId::new(3)), Some(JobIndex::new(1)));
        assert_eq!(instance.index_of(JobId::new(4)), None);
        assert_eq!(instance.max_due_date(), Some(5));
        assert_eq!(instance.total_processing_time(), 3);
    }

    #[test]
    fn test_empty_instance_is_valid() {
        let instance = Instance::<IntegerType>::new(Vec::new()).expect("empty is valid");
        assert!(instance.is_empty());
        assert_eq!(instance.max_due_date(), None);
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let mut builder = InstanceBuilder::<IntegerType>::new();
        builder.add_job(1, 0, 2, 5).add_job(2, 0, 2, 5).add_job(1, 0, 1, 1);
        assert_eq!(
            builder.build(),
            Err(InstanceError::DuplicateId {
                id: JobId::new(1),
                first: 0,
                second: 2
            })
        );
    }

    #[test]
    fn test_rejects_non_positive_processing_time() {
        let mut builder = InstanceBuilder::<IntegerType>::new();
        builder.add_job(1, 0, 0, 5);
        assert_eq!(
            builder.build(),
            Err(InstanceError::NonPositiveProcessingTime { id: JobId::new(1) })
        );

        let mut builder = InstanceBuilder::<IntegerType>::new();
        builder.add_job(2, 0, -3, 5);
        assert!(matches!(
            builder.build(),
            Err(InstanceError::NonPositiveProcessingTime { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_id_and_negative_dates() {
        let mut builder = InstanceBuilder::<IntegerType>::new();
        builder.add_job(0, 0, 1, 5);
        assert_eq!(builder.build(), Err(InstanceError::ZeroId { index: 0 }));

        let mut builder = InstanceBuilder::<IntegerType>::new();
        builder.add_job(1, -1, 1, 5);
        assert_eq!(
            builder.build(),
            Err(InstanceError::NegativeRelease { id: JobId::new(1) })
        );

        let mut builder = InstanceBuilder::<IntegerType>::new();
        builder.add_job(1, 0, 1, -5);
        assert_eq!(
            builder.build(),
            Err(InstanceError::NegativeDueDate { id: JobId::new(1) })
        );
    }

    #[test]
    fn test_due_before_release_is_representable() {
        let mut builder = InstanceBuilder::<IntegerType>::new();
        builder.add_job(1, 10, 3, 2);
        let instance = builder.build().expect("late job is still valid");
        assert!(instance.job(JobIndex::new(0)).slack() < 0);
    }

    #[test]
    fn test_error_messages() {
        let err = InstanceError::DuplicateId {
            id: JobId::new(4),
            first: 0,
            second: 1,
        };
        assert_eq!(
            err.to_string(),
            "duplicate job identifier J4 at positions 0 and 1"
        );
    }
}
