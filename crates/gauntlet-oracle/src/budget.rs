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

//! Evaluation budgets.
//!
//! An `EvaluationBudget` is a handle to a remaining-evaluations counter.
//! Clones refer to the same counter: a training session creates one budget and
//! hands a clone to every training oracle, while each testing oracle gets a
//! fresh budget of its own.
//!
//! The counter is decremented with a compare-and-swap loop so that the
//! sequence of values handed out is strictly decreasing and never reused, even
//! if several threads evaluate against the same pool.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Clone)]
pub struct EvaluationBudget {
    remaining: Arc<AtomicU64>,
}

impl EvaluationBudget {
    /// Creates a new budget with `evaluations` remaining.
    #[inline]
    pub fn new(evaluations: u64) -> Self {
        Self {
            remaining: Arc::new(AtomicU64::new(evaluations)),
        }
    }

    /// Returns the number of evaluations left.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining.load(Ordering::Acquire)
    }

    /// Consumes one evaluation and returns the count left afterwards, or
    /// `None` if nothing was left to consume.
    #[inline]
    pub fn try_consume(&self) -> Option<u64> {
        self.remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |r| r.checked_sub(1))
            .ok()
            .map(|previous| previous - 1)
    }

    /// Returns `true` if both handles decrement the same counter.
    #[inline]
    pub fn is_shared_with(&self, other: &EvaluationBudget) -> bool {
        Arc::ptr_eq(&self.remaining, &other.remaining)
    }
}

impl std::fmt::Display for EvaluationBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EvaluationBudget(remaining: {})", self.remaining())
    }
}
