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

use crate::bits::random_bitvector;
use gauntlet_oracle::oracle::Oracle;
use gauntlet_session::{
    category::TrainingCategory,
    competitor::{Competitor, CompetitorError},
};
use rand::Rng;
use std::time::Duration;

/// Evaluates uniformly random candidates until the oracle refuses.
#[derive(Debug, Clone)]
pub struct RandomSearch<R> {
    rng: R,
}

impl<R: Rng> RandomSearch<R> {
    #[inline]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Competitor for RandomSearch<R> {
    fn name(&self) -> &str {
        "random"
    }

    fn training_category(&self) -> TrainingCategory {
        TrainingCategory::None
    }

    fn train(&mut self, _oracles: &[Oracle], _max_time: Duration) -> Result<(), CompetitorError> {
        Err(CompetitorError::failed("random search does not train"))
    }

    fn test(&mut self, oracle: &Oracle, _max_time: Duration) -> Result<(), CompetitorError> {
        loop {
            let candidate = random_bitvector(&mut self.rng, oracle.num_variables());
            oracle.evaluate(&candidate)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{onemax, testing_oracle};
    use gauntlet_oracle::error::EvaluationError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_consumes_whole_budget_then_stops() {
        let oracle = testing_oracle(onemax(10, 50));
        let mut c = RandomSearch::new(ChaCha8Rng::seed_from_u64(3));

        let err = c.test(&oracle, Duration::from_secs(1)).unwrap_err();
        assert_eq!(err, CompetitorError::Evaluation(EvaluationError::BudgetExhausted));
        assert_eq!(oracle.remaining_evaluations(), 0);

        let (at_best, best) = oracle.best_result();
        assert!(at_best >= 0 && at_best < 50);
        assert!(best >= 5.0);
    }

    #[test]
    fn test_refuses_training() {
        let mut c = RandomSearch::new(ChaCha8Rng::seed_from_u64(3));
        assert!(matches!(
            c.train(&[], Duration::ZERO),
            Err(CompetitorError::Failed(_))
        ));
        assert_eq!(c.training_category(), TrainingCategory::None);
    }
}
