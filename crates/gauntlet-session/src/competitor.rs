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

//! # Competitors
//!
//! A competitor is an optimisation strategy under evaluation. The driver
//! calls `train` at most once (only when the training category is not
//! `NONE`) and `test` once per testing instance. Both may evaluate their
//! oracles any number of times.
//!
//! A competitor may return as soon as it wants to stop, or let an
//! `EvaluationError` propagate with `?`. Budget exhaustion and deadline expiry
//! are treated as a normal end of the phase; anything else aborts the session.

use crate::category::TrainingCategory;
use gauntlet_oracle::{error::EvaluationError, oracle::Oracle};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum CompetitorError {
    /// An oracle refused an evaluation.
    Evaluation(EvaluationError),
    /// The competitor gave up for a reason of its own.
    Failed(String),
}

impl CompetitorError {
    #[inline]
    pub fn failed<S: Into<String>>(reason: S) -> Self {
        Self::Failed(reason.into())
    }

    /// Returns `true` if this error is a normal end of phase.
    #[inline]
    pub fn is_phase_end(&self) -> bool {
        matches!(self, Self::Evaluation(e) if e.is_phase_end())
    }
}

impl std::fmt::Display for CompetitorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Evaluation(e) => write!(f, "evaluation refused: {}", e),
            Self::Failed(reason) => write!(f, "competitor failed: {}", reason),
        }
    }
}

impl std::error::Error for CompetitorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Evaluation(e) => Some(e),
            Self::Failed(_) => None,
        }
    }
}

impl From<EvaluationError> for CompetitorError {
    fn from(e: EvaluationError) -> Self {
        Self::Evaluation(e)
    }
}

pub trait Competitor {
    /// A stable identifier, used in logs and result file names.
    fn name(&self) -> &str;

    fn training_category(&self) -> TrainingCategory;

    /// Trains on all training oracles. They share one evaluation budget and
    /// one deadline `max_time` from the call.
    fn train(&mut self, oracles: &[Oracle], max_time: Duration) -> Result<(), CompetitorError>;

    /// Optimises a single testing instance within `max_time`.
    fn test(&mut self, oracle: &Oracle, max_time: Duration) -> Result<(), CompetitorError>;
}

impl<C: Competitor + ?Sized> Competitor for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn training_category(&self) -> TrainingCategory {
        (**self).training_category()
    }

    fn train(&mut self, oracles: &[Oracle], max_time: Duration) -> Result<(), CompetitorError> {
        (**self).train(oracles, max_time)
    }

    fn test(&mut self, oracle: &Oracle, max_time: Duration) -> Result<(), CompetitorError> {
        (**self).test(oracle, max_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_end_classification() {
        let e: CompetitorError = EvaluationError::BudgetExhausted.into();
        assert!(e.is_phase_end());
        assert!(CompetitorError::from(EvaluationError::DeadlineExceeded).is_phase_end());
        assert!(
            !CompetitorError::from(EvaluationError::ArityMismatch {
                expected: 2,
                found: 1
            })
            .is_phase_end()
        );
        assert!(!CompetitorError::failed("bored").is_phase_end());
    }
}
