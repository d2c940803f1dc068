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

//! # Evaluation Oracle
//!
//! An `Oracle` scores candidates against one instance under two budgets.
//! Competitors only ever see oracles; they never touch the function table
//! or the budgets directly.
//!
//! ## Semantics of `evaluate`
//!
//! 1. A candidate of the wrong length fails with `ArityMismatch`.
//! 2. A passed (or unarmed) phase deadline fails with `DeadlineExceeded`.
//! 3. An empty budget fails with `BudgetExhausted`.
//!
//! Otherwise the table value is computed, one evaluation is consumed and the
//! best-so-far record is updated on strict improvement. Refused calls leave
//! all bookkeeping untouched.

use crate::{
    best::{BestRecord, BestSoFar},
    budget::EvaluationBudget,
    deadline::PhaseDeadline,
    error::EvaluationError,
};
use gauntlet_model::table::FunctionTable;
use std::sync::Arc;

/// The phase an oracle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingMode {
    Training,
    Testing,
}

impl std::fmt::Display for TimingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingMode::Training => write!(f, "TRAINING"),
            TimingMode::Testing => write!(f, "TESTING"),
        }
    }
}

#[derive(Debug)]
pub struct Oracle {
    label: String,
    table: Arc<FunctionTable>,
    budget: EvaluationBudget,
    deadline: PhaseDeadline,
    timing_mode: TimingMode,
    best: BestSoFar,
}

impl Oracle {
    /// Creates an oracle over `table`. The budget and deadline handles may be
    /// shared with other oracles.
    pub fn new<S: Into<String>>(
        label: S,
        table: Arc<FunctionTable>,
        budget: EvaluationBudget,
        deadline: PhaseDeadline,
        timing_mode: TimingMode,
    ) -> Self {
        Self {
            label: label.into(),
            table,
            budget,
            deadline,
            timing_mode,
            best: BestSoFar::new(),
        }
    }

    /// Scores `candidate`, consuming one evaluation on success.
    pub fn evaluate(&self, candidate: &[bool]) -> Result<f64, EvaluationError> {
        let expected = self.table.num_variables();
        if candidate.len() != expected {
            return Err(EvaluationError::ArityMismatch {
                expected,
                found: candidate.len(),
            });
        }
        if self.deadline.is_exceeded() {
            return Err(EvaluationError::DeadlineExceeded);
        }
        let remaining = self
            .budget
            .try_consume()
            .ok_or(EvaluationError::BudgetExhausted)?;

        let value = self.table.value(candidate);
        self.best.offer(value, remaining);
        Ok(value)
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.table.num_variables()
    }

    /// Evaluations left in the (possibly shared) budget.
    #[inline]
    pub fn remaining_evaluations(&self) -> u64 {
        self.budget.remaining()
    }

    /// The quota declared by the instance itself.
    #[inline]
    pub fn max_evaluations_per_instance(&self) -> u64 {
        self.table.max_evaluations()
    }

    /// Returns `(remainingAtBest, bestValue)`, or `(-1, -1.0)` before the first
    /// successful evaluation.
    #[inline]
    pub fn best_result(&self) -> (i64, f64) {
        self.best.as_pair()
    }

    #[inline]
    pub fn best_record(&self) -> Option<BestRecord> {
        self.best.snapshot()
    }

    /// The name of the instance this oracle scores, usually its file name.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn timing_mode(&self) -> TimingMode {
        self.timing_mode
    }

    #[inline]
    pub fn table(&self) -> &FunctionTable {
        &self.table
    }

    #[inline]
    pub fn budget(&self) -> &EvaluationBudget {
        &self.budget
    }

    #[inline]
    pub fn deadline(&self) -> &PhaseDeadline {
        &self.deadline
    }
}

impl std::fmt::Display for Oracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (remaining_at_best, best_value) = self.best_result();
        write!(
            f,
            "Oracle(numVariables: {}, remainingEvaluations: {}, remainingAtBest: {}, bestValue: {}, timingMode: {})",
            self.num_variables(),
            self.remaining_evaluations(),
            remaining_at_best,
            best_value,
            self.timing_mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauntlet_model::table::FunctionTableBuilder;
    use std::time::{Duration, Instant};

    // f(x) = sum over rows; row i looks at (x_i, x_{i+1 mod 3}) with values
    // [0, 1, 2, 3] scaled by (i + 1).
    fn small_table(max_evaluations: u64) -> Arc<FunctionTable> {
        let mut b = FunctionTableBuilder::new(3, max_evaluations, 2).unwrap();
        for i in 0..3 {
            let s = (i + 1) as f64;
            b.add_row([i, (i + 1) % 3], vec![0.0, s, 2.0 * s, 3.0 * s])
                .unwrap();
        }
        Arc::new(b.build().unwrap())
    }

    fn armed_deadline() -> PhaseDeadline {
        let d = PhaseDeadline::new();
        d.arm(Duration::from_secs(3600));
        d
    }

    fn oracle(budget: EvaluationBudget, deadline: PhaseDeadline) -> Oracle {
        Oracle::new(
            "small.txt",
            small_table(5),
            budget,
            deadline,
            TimingMode::Testing,
        )
    }

    #[test]
    fn test_evaluate_sums_rows_and_decrements() {
        let o = oracle(EvaluationBudget::new(5), armed_deadline());
        assert_eq!(o.evaluate(&[false, false, false]), Ok(0.0));
        assert_eq!(o.evaluate(&[true, true, true]), Ok(3.0 + 6.0 + 9.0));
        assert_eq!(o.remaining_evaluations(), 3);
        assert_eq!(o.max_evaluations_per_instance(), 5);
        assert_eq!(o.num_variables(), 3);
    }

    #[test]
    fn test_evaluate_is_repeatable() {
        let o = oracle(EvaluationBudget::new(5), armed_deadline());
        let x = [true, false, true];
        let a = o.evaluate(&x).unwrap();
        let b = o.evaluate(&x).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_budget_exhaustion_after_quota() {
        let o = oracle(EvaluationBudget::new(5), armed_deadline());
        for expected in (0..5).rev() {
            o.evaluate(&[false, true, false]).unwrap();
            assert_eq!(o.remaining_evaluations(), expected);
        }
        assert_eq!(
            o.evaluate(&[false, true, false]),
            Err(EvaluationError::BudgetExhausted)
        );
        assert_eq!(o.remaining_evaluations(), 0);
    }

    #[test]
    fn test_past_deadline_refuses_first_call_without_consuming() {
        let d = PhaseDeadline::new();
        d.arm_at(Instant::now() - Duration::from_millis(1));
        let o = oracle(EvaluationBudget::new(5), d);

        assert_eq!(
            o.evaluate(&[false, false, false]),
            Err(EvaluationError::DeadlineExceeded)
        );
        assert_eq!(o.remaining_evaluations(), 5);
        assert_eq!(o.best_result(), (-1, -1.0));
    }

    #[test]
    fn test_unarmed_deadline_refuses() {
        let o = oracle(EvaluationBudget::new(5), PhaseDeadline::new());
        assert_eq!(
            o.evaluate(&[false, false, false]),
            Err(EvaluationError::DeadlineExceeded)
        );
    }

    #[test]
    fn test_arity_is_checked_before_deadline_and_budget() {
        let o = oracle(EvaluationBudget::new(0), PhaseDeadline::new());
        assert_eq!(
            o.evaluate(&[true, false]),
            Err(EvaluationError::ArityMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_deadline_is_checked_before_budget() {
        let o = oracle(EvaluationBudget::new(0), PhaseDeadline::new());
        assert_eq!(
            o.evaluate(&[true, false, true]),
            Err(EvaluationError::DeadlineExceeded)
        );
    }

    #[test]
    fn test_best_result_tracks_max_and_first_tie() {
        let o = oracle(EvaluationBudget::new(5), armed_deadline());
        assert_eq!(o.best_result(), (-1, -1.0));

        // Values: 5, 18, 8, 18, 0
        let seq: [[bool; 3]; 5] = [
            [false, true, false],
            [true, true, true],
            [false, false, true],
            [true, true, true],
            [false, false, false],
        ];
        let values: Vec<f64> = seq.iter().map(|x| o.evaluate(x).unwrap()).collect();
        let max = values.iter().cloned().fold(f64::MIN, f64::max);

        assert_eq!(max, 18.0);
        assert_eq!(o.best_result(), (3, 18.0));
    }

    #[test]
    fn test_shared_budget_across_oracles() {
        let shared = EvaluationBudget::new(3);
        let deadline = armed_deadline();
        let a = Oracle::new(
            "a",
            small_table(10),
            shared.clone(),
            deadline.clone(),
            TimingMode::Training,
        );
        let b = Oracle::new(
            "b",
            small_table(10),
            shared.clone(),
            deadline,
            TimingMode::Training,
        );

        let x = [true, false, false];
        let mut successes = 0;
        for i in 0..10 {
            let o = if i % 3 == 0 { &a } else { &b };
            if o.evaluate(&x).is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 3);
        assert_eq!(a.evaluate(&x), Err(EvaluationError::BudgetExhausted));
        assert_eq!(b.evaluate(&x), Err(EvaluationError::BudgetExhausted));
        assert_eq!(a.max_evaluations_per_instance(), 10);
    }

    #[test]
    fn test_display() {
        let o = oracle(EvaluationBudget::new(5), armed_deadline());
        o.evaluate(&[true, true, true]).unwrap();
        assert_eq!(
            o.to_string(),
            "Oracle(numVariables: 3, remainingEvaluations: 4, remainingAtBest: 4, bestValue: 18, timingMode: TESTING)"
        );
        assert_eq!(o.label(), "small.txt");
        assert_eq!(o.timing_mode(), TimingMode::Testing);
    }
}
