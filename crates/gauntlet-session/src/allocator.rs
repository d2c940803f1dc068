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

//! # Budget Allocation
//!
//! Builds a `Session` from decoded instances and a training category.
//!
//! * `NONE`: no training oracles at all, whatever training instances are
//!   supplied.
//! * `SHORT` / `LONG`: the quotas of all training instances are summed and
//!   multiplied by the category's evaluation multiplier. The result backs one
//!   shared `EvaluationBudget`, and every training oracle holds a clone of it
//!   together with a clone of one shared training deadline.
//! * Testing oracles always get an individual budget equal to their own
//!   quota and an individual deadline.
//!
//! Training instances must agree on the number of variables.

use crate::{category::TrainingCategory, error::ConfigurationError};
use gauntlet_model::manifest::NamedTable;
use gauntlet_oracle::{
    budget::EvaluationBudget,
    deadline::PhaseDeadline,
    oracle::{Oracle, TimingMode},
};
use tracing::debug;

/// The oracles of one run. Immutable once built; each oracle lives for one
/// phase only.
#[derive(Debug)]
pub struct Session {
    category: TrainingCategory,
    training_oracles: Vec<Oracle>,
    testing_oracles: Vec<Oracle>,
    training_budget: Option<EvaluationBudget>,
    training_deadline: PhaseDeadline,
}

impl Session {
    #[inline]
    pub fn category(&self) -> TrainingCategory {
        self.category
    }

    #[inline]
    pub fn training_oracles(&self) -> &[Oracle] {
        &self.training_oracles
    }

    #[inline]
    pub fn testing_oracles(&self) -> &[Oracle] {
        &self.testing_oracles
    }

    /// The shared training budget, `None` when the category is `NONE`.
    #[inline]
    pub fn training_budget(&self) -> Option<&EvaluationBudget> {
        self.training_budget.as_ref()
    }

    /// The deadline shared by all training oracles.
    #[inline]
    pub fn training_deadline(&self) -> &PhaseDeadline {
        &self.training_deadline
    }
}

#[derive(Debug, Clone)]
pub struct SessionBuilder {
    category: TrainingCategory,
    training: Vec<NamedTable>,
    testing: Vec<NamedTable>,
}

impl SessionBuilder {
    #[inline]
    pub fn new(category: TrainingCategory) -> Self {
        Self {
            category,
            training: Vec::new(),
            testing: Vec::new(),
        }
    }

    #[inline]
    pub fn add_training(mut self, table: NamedTable) -> Self {
        self.training.push(table);
        self
    }

    #[inline]
    pub fn add_testing(mut self, table: NamedTable) -> Self {
        self.testing.push(table);
        self
    }

    #[inline]
    pub fn with_training<I: IntoIterator<Item = NamedTable>>(mut self, tables: I) -> Self {
        self.training.extend(tables);
        self
    }

    #[inline]
    pub fn with_testing<I: IntoIterator<Item = NamedTable>>(mut self, tables: I) -> Self {
        self.testing.extend(tables);
        self
    }

    pub fn build(self) -> Result<Session, ConfigurationError> {
        let training_deadline = PhaseDeadline::new();

        let (training_oracles, training_budget) = if self.category.has_training() {
            let total = training_budget(&self.training, self.category)?;
            let budget = EvaluationBudget::new(total);
            let oracles = self
                .training
                .into_iter()
                .map(|t| {
                    Oracle::new(
                        t.name,
                        t.table,
                        budget.clone(),
                        training_deadline.clone(),
                        TimingMode::Training,
                    )
                })
                .collect::<Vec<_>>();
            debug!(
                instances = oracles.len(),
                budget = total,
                category = %self.category,
                "allocated shared training budget"
            );
            (oracles, Some(budget))
        } else {
            (Vec::new(), None)
        };

        let testing_oracles = self
            .testing
            .into_iter()
            .map(|t| {
                let quota = t.table.max_evaluations();
                Oracle::new(
                    t.name,
                    t.table,
                    EvaluationBudget::new(quota),
                    PhaseDeadline::new(),
                    TimingMode::Testing,
                )
            })
            .collect();

        Ok(Session {
            category: self.category,
            training_oracles,
            testing_oracles,
            training_budget,
            training_deadline,
        })
    }
}

/// Builds a session from training and testing instances.
#[inline]
pub fn build_session(
    training: Vec<NamedTable>,
    testing: Vec<NamedTable>,
    category: TrainingCategory,
) -> Result<Session, ConfigurationError> {
    SessionBuilder::new(category)
        .with_training(training)
        .with_testing(testing)
        .build()
}

/// Validates training homogeneity and computes the shared training budget.
fn training_budget(
    training: &[NamedTable],
    category: TrainingCategory,
) -> Result<u64, ConfigurationError> {
    if let Some(first) = training.first() {
        let n = first.table.num_variables();
        if let Some(odd) = training.iter().find(|t| t.table.num_variables() != n) {
            return Err(ConfigurationError::InhomogeneousTraining {
                first: n,
                instance: odd.name.clone(),
                found: odd.table.num_variables(),
            });
        }
    }

    training
        .iter()
        .try_fold(0u64, |acc, t| acc.checked_add(t.table.max_evaluations()))
        .and_then(|sum| sum.checked_mul(category.evaluation_multiplier()))
        .ok_or(ConfigurationError::BudgetOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauntlet_model::table::{FunctionTable, FunctionTableBuilder};

    fn table(n: usize, max_evaluations: u64) -> FunctionTable {
        let mut b = FunctionTableBuilder::new(n, max_evaluations, 2).unwrap();
        for i in 0..n {
            b.add_row([i, (i + 1) % n], vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        }
        b.build().unwrap()
    }

    fn named(name: &str, n: usize, max_evaluations: u64) -> NamedTable {
        NamedTable::new(name, table(n, max_evaluations))
    }

    #[test]
    fn test_none_builds_no_training_oracles() {
        let s = build_session(
            vec![named("a", 4, 10), named("b", 4, 20)],
            vec![named("t", 4, 5)],
            TrainingCategory::None,
        )
        .unwrap();
        assert!(s.training_oracles().is_empty());
        assert!(s.training_budget().is_none());
        assert_eq!(s.testing_oracles().len(), 1);
    }

    #[test]
    fn test_none_ignores_inhomogeneous_training() {
        let s = build_session(
            vec![named("a", 4, 10), named("b", 5, 20)],
            vec![],
            TrainingCategory::None,
        );
        assert!(s.is_ok());
    }

    #[test]
    fn test_short_shares_summed_budget() {
        let s = build_session(
            vec![named("a", 4, 10), named("b", 4, 20)],
            vec![],
            TrainingCategory::Short,
        )
        .unwrap();
        let [a, b] = s.training_oracles() else {
            panic!("expected two training oracles");
        };
        assert_eq!(a.remaining_evaluations(), 30);
        assert!(a.budget().is_shared_with(b.budget()));
        assert!(a.deadline().is_shared_with(b.deadline()));
        assert!(a.deadline().is_shared_with(s.training_deadline()));
        assert_eq!(a.timing_mode(), TimingMode::Training);
        assert_eq!(a.max_evaluations_per_instance(), 10);
        assert_eq!(b.max_evaluations_per_instance(), 20);
    }

    #[test]
    fn test_long_multiplies_budget_by_ten() {
        let s = build_session(
            vec![named("a", 4, 10), named("b", 4, 20)],
            vec![],
            TrainingCategory::Long,
        )
        .unwrap();
        assert_eq!(s.training_budget().map(|b| b.remaining()), Some(300));
    }

    #[test]
    fn test_testing_budgets_are_individual() {
        let s = build_session(
            vec![],
            vec![named("x", 4, 7), named("y", 4, 9)],
            TrainingCategory::Short,
        )
        .unwrap();
        let t = s.testing_oracles();
        assert_eq!(t[0].remaining_evaluations(), 7);
        assert_eq!(t[1].remaining_evaluations(), 9);
        assert!(!t[0].budget().is_shared_with(t[1].budget()));
        assert!(!t[0].deadline().is_shared_with(t[1].deadline()));
        assert_eq!(t[1].timing_mode(), TimingMode::Testing);
        assert_eq!(t[1].label(), "y");
        assert_eq!(s.training_budget().map(|b| b.remaining()), Some(0));
    }

    #[test]
    fn test_inhomogeneous_training_is_rejected() {
        let err = build_session(
            vec![named("a", 4, 10), named("b", 5, 10)],
            vec![],
            TrainingCategory::Short,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InhomogeneousTraining {
                first: 4,
                instance: "b".to_string(),
                found: 5
            }
        );
    }

    #[test]
    fn test_budget_overflow_is_rejected() {
        let err = build_session(
            vec![named("a", 4, u64::MAX / 2), named("b", 4, u64::MAX / 2)],
            vec![],
            TrainingCategory::Long,
        )
        .unwrap_err();
        assert_eq!(err, ConfigurationError::BudgetOverflow);
    }
}
