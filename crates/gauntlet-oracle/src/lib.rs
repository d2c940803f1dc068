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

//! # Gauntlet Oracle
//!
//! The object a competitor calls to score candidates. An `Oracle` binds one
//! immutable `FunctionTable` to two independent budgets, an evaluation quota
//! and a phase deadline, and remembers the best value it has returned.
//!
//! ## Architecture
//!
//! * **`budget`**: `EvaluationBudget`, an atomically decremented counter.
//!   Cloning shares the counter, which is how one training pool is spread over
//!   many oracles.
//! * **`deadline`**: `PhaseDeadline`, an absolute wall-clock instant that the
//!   session driver arms once per phase (or per testing instance).
//! * **`best`**: `BestSoFar`, the strict-improvement record of one oracle.
//! * **`oracle`**: `Oracle` and `TimingMode`.
//! * **`error`**: `EvaluationError`, including the two sentinels that end a
//!   phase normally.
//!
//! ## Check order
//!
//! `Oracle::evaluate` checks the candidate length, then the deadline, then the
//! budget. A refused call never touches the budget or the best-so-far record.

pub mod best;
pub mod budget;
pub mod deadline;
pub mod error;
pub mod oracle;
