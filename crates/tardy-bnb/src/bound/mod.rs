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

//! Relaxation lower bounds on the number of tardy jobs
//!
//! Each bound solves an easier version of the scheduling problem on the
//! undecided jobs of a node and reports how many of them must be tardy
//! regardless of the remaining decisions.
//!
//! Components
//! - `lower_bound`: the `LowerBound` trait and the trivial `ZeroBound`.
//! - `knapsack`: drop release dates, one global deadline, 0/1 knapsack DP.
//! - `moore_hodgson`: collapse release dates, solve 1||ΣU_j exactly.
//! - `overload`: demand exceeding the length of a release/due window.
//! - `hybrid`: maximum over the enabled bounds, with a cost gate for the DP.

pub mod hybrid;
pub mod knapsack;
pub mod lower_bound;
pub mod moore_hodgson;
pub mod overload;
