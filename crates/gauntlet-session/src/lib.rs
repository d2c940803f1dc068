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

//! # Gauntlet Session
//!
//! Turns decoded instances into an evaluation session and runs a competitor
//! through it.
//!
//! ## Architecture
//!
//! * **`category`**: `TrainingCategory` and its evaluation and time
//!   multipliers.
//! * **`competitor`**: the `Competitor` trait every strategy implements.
//! * **`config`**: `SessionConfig` (base time per instance, time scaling).
//! * **`allocator`**: `SessionBuilder`, which computes budgets and builds one
//!   oracle per instance.
//! * **`driver`**: `SessionDriver`, the training/testing state machine.
//! * **`report`**: per-oracle results, summary statistics and the JSON
//!   result document.
//! * **`error`**: configuration and session errors.
//!
//! ## Phases
//!
//! A session runs an optional training phase followed by a testing phase.
//! Training oracles share one evaluation budget and one deadline. Every
//! testing oracle has its own budget and its own deadline, armed right before
//! the competitor sees it. Budget exhaustion and deadline expiry are the
//! normal way for a phase to end; the driver absorbs them and moves on.

pub mod allocator;
pub mod category;
pub mod competitor;
pub mod config;
pub mod driver;
pub mod error;
pub mod report;
