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

//! Next-ascent hill climbing.
//!
//! Starting from a random point, bits are flipped in index order and a flip
//! is kept as soon as it strictly improves the current value (first
//! improvement). A full pass without improvement means the point is a local
//! optimum under Hamming-1 moves; the climber then restarts from a fresh
//! random point. It runs until the oracle refuses an evaluation.

use crate::bits::{random_bitvector, randomize};
use gauntlet_oracle::oracle::Oracle;
use gauntlet_session::{
    category::TrainingCategory,
    competitor::{Competitor, CompetitorError},
};
use rand::Rng;
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct NextAscentHillClimber<R> {
    rng: R,
    restarts: u64,
}

impl<R: Rng> NextAscentHillClimber<R> {
    #[inline]
    pub fn new(rng: R) -> Self {
        Self { rng, restarts: 0 }
    }

    /// Random restarts performed over the lifetime of this competitor.
    #[inline]
    pub fn restarts(&self) -> u64 {
        self.restarts
    }
}

impl<R: Rng> Competitor for NextAscentHillClimber<R> {
    fn name(&self) -> &str {
        "nahc"
    }

    fn training_category(&self) -> TrainingCategory {
        TrainingCategory::None
    }

    fn train(&mut self, _oracles: &[Oracle], _max_time: Duration) -> Result<(), CompetitorError> {
        Err(CompetitorError::failed("hill climbing does not train"))
    }

    fn test(&mut self, oracle: &Oracle, _max_time: Duration) -> Result<(), CompetitorError> {
        let mut incumbent = random_bitvector(&mut self.rng, oracle.num_variables());
        let mut value = oracle.evaluate(&incumbent)?;
        loop {
            if !ascend_pass(oracle, &mut incumbent, &mut value)? {
                trace!(instance = oracle.label(), value, "local optimum, restarting");
                self.restarts += 1;
                randomize(&mut self.rng, &mut incumbent);
                value = oracle.evaluate(&incumbent)?;
            }
        }
    }
}

/// One pass over all Hamming-1 neighbours. Returns `true` if any flip was
/// kept.
fn ascend_pass(
    oracle: &Oracle,
    incumbent: &mut [bool],
    value: &mut f64,
) -> Result<bool, CompetitorError> {
    let mut improved = false;
    for i in 0..incumbent.len() {
        incumbent[i] = !incumbent[i];
        let v = oracle.evaluate(incumbent)?;
        if v > *value {
            *value = v;
            improved = true;
        } else {
            incumbent[i] = !incumbent[i];
        }
    }
    Ok(improved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{onemax, testing_oracle};
    use gauntlet_model::table::FunctionTableBuilder;
    use gauntlet_oracle::error::EvaluationError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_reaches_onemax_optimum() {
        // At most 1 + 2 * n evaluations are needed from any start.
        let oracle = testing_oracle(onemax(16, 200));
        let mut c = NextAscentHillClimber::new(ChaCha8Rng::seed_from_u64(7));

        let err = c.test(&oracle, Duration::from_secs(1)).unwrap_err();
        assert!(err.is_phase_end());
        assert_eq!(oracle.best_result().1, 16.0);
    }

    #[test]
    fn test_restarts_on_local_optimum() {
        // Deceptive trap on 2 bits: 00 scores 1, 11 scores 2, mixed scores 0.
        // From 00 no single flip improves, so the climber must restart.
        let mut b = FunctionTableBuilder::new(2, 40, 2).unwrap();
        b.add_row([0, 1], vec![1.0, 0.0, 0.0, 2.0]).unwrap();
        b.add_row([1, 0], vec![0.0, 0.0, 0.0, 0.0]).unwrap();
        let oracle = testing_oracle(b.build().unwrap());

        let mut c = NextAscentHillClimber::new(ChaCha8Rng::seed_from_u64(11));
        let err = c.test(&oracle, Duration::from_secs(1)).unwrap_err();

        assert_eq!(err, CompetitorError::Evaluation(EvaluationError::BudgetExhausted));
        assert!(c.restarts() > 0);
        assert_eq!(oracle.best_result().1, 2.0);
    }
}
