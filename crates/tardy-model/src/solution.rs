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

use crate::{
    instance::Instance,
    job::{Job, JobId},
    num::TimeNumeric,
};

/// One optimal (or best known) assignment: the set of tardy jobs.
///
/// The identifiers are kept sorted and unique, so two solutions describing
/// the same set compare equal. The empty set is a legitimate solution
/// meaning "every job is on time".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Solution {
    tardy: Vec<JobId>,
}

impl Solution {
    /// Creates a solution from an arbitrary collection of tardy job ids.
    pub fn new<I>(tardy: I) -> Self
    where
        I: IntoIterator<Item = JobId>,
    {
        let mut tardy: Vec<JobId> = tardy.into_iter().collect();
        tardy.sort_unstable();
        tardy.dedup();
        Self { tardy }
    }

    /// Creates the solution in which every job is on time.
    #[inline]
    pub fn all_on_time() -> Self {
        Self { tardy: Vec::new() }
    }

    /// Returns the sorted tardy job ids.
    #[inline]
    pub fn tardy_jobs(&self) -> &[JobId] {
        &self.tardy
    }

    /// Returns the objective value, the number of tardy jobs.
    #[inline]
    pub fn num_tardy(&self) -> usize {
        self.tardy.len()
    }

    /// Returns `true` if no job is tardy.
    #[inline]
    pub fn is_all_on_time(&self) -> bool {
        self.tardy.is_empty()
    }

    /// Returns `true` if `id` is tardy in this solution.
    #[inline]
    pub fn is_tardy(&self, id: JobId) -> bool {
        self.tardy.binary_search(&id).is_ok()
    }

    /// Returns the jobs of `instance` that are on time in this solution,
    /// in instance order.
    pub fn on_time_jobs<'a, T>(
        &'a self,
        instance: &'a Instance<T>,
    ) -> impl Iterator<Item = &'a Job<T>> + 'a
    where
        T: TimeNumeric,
    {
        instance
            .jobs()
            .iter()
            .filter(move |job| !self.is_tardy(job.id()))
    }
}

impl FromIterator<JobId> for Solution {
    fn from_iter<I: IntoIterator<Item = JobId>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, id) in self.tardy.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", id)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::InstanceBuilder;

    fn ids(raw: &[u32]) -> Vec<JobId> {
        raw.iter().copied().map(JobId::new).collect()
    }

    #[test]
    fn test_new_sorts_and_dedups() {
        let solution = Solution::new(ids(&[5, 2, 5, 1]));
        assert_eq!(solution.tardy_jobs(), ids(&[1, 2, 5]).as_slice());
        assert_eq!(solution.num_tardy(), 3);
        assert!(solution.is_tardy(JobId::new(2)));
        assert!(!solution.is_tardy(JobId::new(3)));
    }

    #[test]
    fn test_empty_solution_is_meaningful() {
        let solution = Solution::all_on_time();
        assert!(solution.is_all_on_time());
        assert_eq!(solution.num_tardy(), 0);
        assert_eq!(solution, Solution::new(Vec::new()));
        assert_eq!(format!("{}", solution), "{}");
    }

    #[test]
    fn test_equal_sets_compare_equal() {
        assert_eq!(Solution::new(ids(&[3, 1])), Solution::new(ids(&[1, 3])));
    }

    #[test]
    fn test_on_time_jobs_is_complement() {
        let mut builder = InstanceBuilder::<i64>::new();
        builder
            .add_job(1, 0, 1, 1)
            .add_job(2, 0, 1, 2)
            .add_job(3, 0, 1, 3);
        let instance = builder.build().expect("valid");
        let solution = Solution::new(ids(&[2]));
        let on_time: Vec<JobId> = solution.on_time_jobs(&instance).map(|j| j.id()).collect();
        assert_eq!(on_time, ids(&[1, 3]));
        assert_eq!(format!("{}", solution), "{J2}");
    }
}
