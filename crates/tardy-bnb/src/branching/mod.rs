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

//! Branching strategies for the on-time/tardy decision tree
//!
//! Defines the `BranchingStrategy` trait and a set of job orderings. Every
//! strategy returns the id of one undecided job or `None`; the engine turns
//! that job into an on-time child and a tardy child.
//!
//! Provided strategies:
//! - `first_undecided`: instance order (default).
//! - `edd`: earliest due date first.
//! - `spt`: shortest processing time first.
//! - `lpt`: longest processing time first.
//! - `slack`: least slack `d - r - p` first.
//!
//! All orderings break ties deterministically down to the job id.

pub mod edd;
pub mod first_undecided;
pub mod lpt;
pub mod slack;
pub mod spt;
pub mod strategy;
