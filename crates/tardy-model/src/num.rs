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

//! # Time Numeric Trait
//!
//! Collects the integer capabilities required for release dates, processing
//! times and due dates into a single alias so that the model and the solver
//! stay generic over the concrete time type.
//!
//! ## Highlights
//!
//! - Requires `PrimInt + Signed` for arithmetic and a well-defined zero.
//! - `FromPrimitive` allows generators to sample in `i64` and convert.
//! - `Hash + Send + Sync` so jobs can be shared across portfolio threads.
//!
//! Note: the alias is blanket-implemented; `i32`, `i64` and `isize` are the
//! intended instantiations.

use num_traits::{FromPrimitive, PrimInt, Signed};
use std::hash::Hash;

/// A trait alias for integer types usable as time values.
pub trait TimeNumeric:
    PrimInt
    + Signed
    + FromPrimitive
    + Hash
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + 'static
{
}

impl<T> TimeNumeric for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + Hash
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + 'static
{
}
