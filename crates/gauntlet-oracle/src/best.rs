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

//! Best-so-far tracking for a single oracle.
//!
//! The objective is maximised. A value is installed only if it is strictly
//! greater than the recorded best, so on ties the first occurrence wins.

use parking_lot::Mutex;

/// The best value an oracle has returned and the budget left right after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestRecord {
    pub value: f64,
    pub remaining_at_best: u64,
}

#[derive(Debug, Default)]
pub struct BestSoFar {
    record: Mutex<Option<BestRecord>>,
}

impl BestSoFar {
    /// The `(remainingAtBest, bestValue)` pair reported before any evaluation.
    pub const UNSET: (i64, f64) = (-1, -1.0);

    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `value` if it strictly improves on the current best.
    /// Returns `true` if it was installed.
    pub fn offer(&self, value: f64, remaining_after: u64) -> bool {
        let mut guard = self.record.lock();
        let improves = match guard.as_ref() {
            Some(best) => value > best.value,
            None => true,
        };
        if improves {
            *guard = Some(BestRecord {
                value,
                remaining_at_best: remaining_after,
            });
        }
        improves
    }

    #[inline]
    pub fn snapshot(&self) -> Option<BestRecord> {
        *self.record.lock()
    }

    /// Returns `(remainingAtBest, bestValue)`, or `UNSET` if nothing was
    /// recorded yet.
    pub fn as_pair(&self) -> (i64, f64) {
        match self.snapshot() {
            Some(best) => (
                i64::try_from(best.remaining_at_best).unwrap_or(i64::MAX),
                best.value,
            ),
            None => Self::UNSET,
        }
    }
}
