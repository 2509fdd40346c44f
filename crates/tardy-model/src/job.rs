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

//! Jobs and job identifiers.
//!
//! A `Job` is an immutable value: identifier, release date, processing time
//! and due date. Jobs are created once when an instance is built and are
//! never mutated afterwards. Identifiers are the caller-facing names of jobs;
//! they are unique within an instance and strictly positive.

use crate::num::TimeNumeric;

/// The caller-facing identifier of a job.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct JobId(u32);

impl JobId {
    /// Creates a new `JobId`. Zero is representable here but rejected by
    /// `InstanceBuilder::build`.
    #[inline(always)]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[inline(always)]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for JobId {
    #[inline(always)]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "J{}", self.0)
    }
}

/// A single job of a one-machine scheduling instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Job<T> {
    id: JobId,
    release: T,
    processing_time: T,
    due_date: T,
}

impl<T> Job<T>
where
    T: TimeNumeric,
{
    /// Creates a new job. Validation happens when the job is added to an
    /// instance.
    #[inline]
    pub fn new(id: impl Into<JobId>, release: T, processing_time: T, due_date: T) -> Self {
        Self {
            id: id.into(),
            release,
            processing_time,
            due_date,
        }
    }

    /// Returns the identifier of the job.
    #[inline(always)]
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Returns the release date (earliest start).
    #[inline(always)]
    pub fn release(&self) -> T {
        self.release
    }

    /// Returns the processing time.
    #[inline(always)]
    pub fn processing_time(&self) -> T {
        self.processing_time
    }

    /// Returns the due date.
    #[inline(always)]
    pub fn due_date(&self) -> T {
        self.due_date
    }

    /// Returns the slack `d - r - p` of the job when started at its release.
    /// Negative slack means the job is tardy in every schedule.
    #[inline]
    pub fn slack(&self) -> T {
        self.due_date
            .saturating_sub(self.release)
            .saturating_sub(self.processing_time)
    }
}

impl<T> std::fmt::Display for Job<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(r: {}, p: {}, d: {})",
            self.id, self.release, self.processing_time, self.due_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let job = Job::new(3u32, 1i64, 4, 9);
        assert_eq!(job.id(), JobId::new(3));
        assert_eq!(job.release(), 1);
        assert_eq!(job.processing_time(), 4);
        assert_eq!(job.due_date(), 9);
    }

    #[test]
    fn test_slack_can_be_negative() {
        assert_eq!(Job::new(1u32, 0i64, 3, 5).slack(), 2);
        assert_eq!(Job::new(2u32, 4i64, 3, 5).slack(), -2);
    }

    #[test]
    fn test_display() {
        let job = Job::new(7u32, 0i64, 2, 6);
        assert_eq!(format!("{}", job), "J7(r: 0, p: 2, d: 6)");
    }
}
