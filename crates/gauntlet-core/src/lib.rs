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

//! # Gauntlet Core
//!
//! Foundational primitives for the gauntlet evaluation harness. The crate is
//! intentionally small: everything here is shared by at least two of the
//! higher layers (instance model, oracle, session, strategies).
//!
//! ## Modules
//!
//! - `utils`: phantom-tagged, strongly typed indices (`TypedIndex<T>`) used to
//!   keep variable positions and table rows apart at compile time.
//! - `math`: floating-point helpers: arithmetic mean, sample variance and
//!   standard deviation over slices, and linear interpolation between two
//!   anchor points.
//!
//! Refer to each module for detailed APIs and examples.

pub mod math;
pub mod utils;
