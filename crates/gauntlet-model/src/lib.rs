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

//! # Gauntlet Model
//!
//! **The instance model for pseudo-Boolean black-box optimisation.**
//!
//! An instance is a fitness function over fixed-length bit-vectors, encoded as
//! a sum of small lookup tables over overlapping subsets of variables (an
//! NK-landscape style decomposition). This crate owns that representation and
//! everything needed to get it off disk.
//!
//! ## Architecture
//!
//! * **`index`**: strongly typed `VariableIndex` and `RowIndex`.
//! * **`table`**: the immutable `FunctionTable` plus `FunctionTableBuilder`,
//!   which validates every row eagerly so evaluation never has to.
//! * **`loading`**: `InstanceLoader`, the line-oriented text decoder.
//! * **`encoding`**: the inverse of the loader; writes a table back to text.
//! * **`manifest`**: manifest files and problem-class directories listing the
//!   training and testing instances of one competition class.

pub mod encoding;
pub mod index;
pub mod loading;
pub mod manifest;
pub mod table;
