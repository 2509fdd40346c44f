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

//! Moore–Hodgson relaxation bound
//!
//! Collapses all release dates to the earliest one, `r_min`. Shifting time by
//! `r_min` turns the subset into an instance of 1||ΣU_j with due dates
//! `d_j - r_min`, which Moore–Hodgson solves exactly: scan jobs in due-date
//! order, and whenever the running completion time exceeds the current due
//! date evict the longest job scheduled so far. Releasing jobs earlier can
//! only help, so the number of evictions is a valid lower bound for the
//! original subset.

use crate::bound::lower_bound::LowerBound;
use std::collections::BinaryHeap;
use tardy_model::{job::Job, num::TimeNumeric};

/// The Moore–Hodgson bound with reusable buffers.
#[derive(Debug, Clone)]
pub struct MooreHodgsonBound<T> {
    sorted: Vec<(T, T)>,
    heap: BinaryHeap<T>,
}

impl<T> Default for MooreHodgsonBound<T>
where
    T: TimeNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MooreHodgsonBound<T>
where
    T: TimeNumeric,
{
    /// Creates a new bound.
    #[inline]
    pub fn new() -> Self {
        Self {
            sorted: Vec::new(),
            heap: BinaryHeap::new(),
        }
    }

    /// Creates a new bound with buffers for `num_jobs` jobs.
    #[inline]
    pub fn preallocated(num_jobs: usize) -> Self {
        Self {
            sorted: Vec::with_capacity(num_jobs),
            heap: BinaryHeap::with_capacity(num_jobs),
        }
    }
}

impl<T> LowerBound<T> for MooreHodgsonBound<T>
where
    T: TimeNumeric,
{
    #[inline]
    fn name(&self) -> &str {
        "MooreHodgsonBound"
    }

    fn lower_bound(&mut self, jobs: &[Job<T>]) -> usize {
        let Some(r_min) = jobs.iter().map(|j| j.release()).min() else {
            return 0;
        };

        self.sorted.clear();
        self.sorted.extend(
            jobs.iter()
                .map(|j| (j.due_date().saturating_sub(r_min), j.processing_time())),
        );
        self.sorted.sort_unstable();
        self.heap.clear();

        let mut completion = T::zero();
        let mut evicted = 0;
        for &(due, processing_time) in &self.sorted {
            completion = completion.saturating_add(processing_time);
            self.heap.push(processing_time);
            if completion > due
                && let Some(longest) = self.heap.pop()
            {
                completion = completion - longest;
                evicted += 1;
            }
        }

        evicted
    }
}
