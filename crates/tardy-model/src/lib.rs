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

//! # Tardy Model
//!
//! **The domain model for single-machine scheduling with release dates,
//! minimizing the number of tardy jobs (1|r_j|ΣU_j).**
//!
//! This crate defines the data that flows into and out of the solvers in
//! `tardy_bnb`: validated job lists going in, tardy sets coming out.
//!
//! ## Architecture
//!
//! * **`job`**: the immutable `Job` value type and its `JobId`.
//! * **`index`**: `JobIndex`, the dense position of a job inside an instance.
//! * **`instance`**: `Instance` (immutable, validated) and `InstanceBuilder`.
//! * **`solution`**: `Solution`, one tardy set identified by job ids.
//! * **`loading`**: a text loader for instance files.
//! * **`generator`**: seeded random instance generators.
//! * **`num`**: the `TimeNumeric` trait alias for time values.
//!
//! ## Design Philosophy
//!
//! 1.  **Fail-Fast**: invalid jobs are rejected when an instance is built,
//!     so solvers never see a non-positive processing time or a duplicate id.
//! 2.  **One Representation**: jobs are values, solvers address them by
//!     `JobIndex`, callers by `JobId`.

pub mod generator;
pub mod index;
pub mod instance;
pub mod job;
pub mod loading;
pub mod num;
pub mod solution;
