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

use std::fmt;

/// Why an oracle refused to score a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluationError {
    /// The candidate has the wrong length. This is a defect in the caller.
    ArityMismatch { expected: usize, found: usize },
    /// The phase deadline has passed, or was never armed.
    DeadlineExceeded,
    /// The evaluation budget behind this oracle is used up.
    BudgetExhausted,
}

impl EvaluationError {
    /// Returns `true` for the two conditions that end a phase normally.
    #[inline]
    pub fn is_phase_end(&self) -> bool {
        matches!(self, Self::DeadlineExceeded | Self::BudgetExhausted)
    }
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArityMismatch { expected, found } => write!(
                f,
                "candidate has {} variables but the instance expects {}",
                found, expected
            ),
            Self::DeadlineExceeded => write!(f, "phase deadline exceeded"),
            Self::BudgetExhausted => write!(f, "evaluation budget exhausted"),
        }
    }
}

impl std::error::Error for EvaluationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_sentinels_end_a_phase() {
        assert!(EvaluationError::DeadlineExceeded.is_phase_end());
        assert!(EvaluationError::BudgetExhausted.is_phase_end());
        assert!(
            !EvaluationError::ArityMismatch {
                expected: 4,
                found: 3
            }
            .is_phase_end()
        );
    }

    #[test]
    fn test_display_mentions_lengths() {
        let msg = EvaluationError::ArityMismatch {
            expected: 8,
            found: 5,
        }
        .to_string();
        assert!(msg.contains('8') && msg.contains('5'), "{msg}");
    }
}
