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

//! Simulated-annealing hyper-heuristic.
//!
//! Training learns the temperature range of a linear annealing schedule from
//! random walks, following White's concepts of scale in simulated annealing:
//! the lower temperature is the smallest absolute fitness change between
//! consecutive steps of a Hamming-1 random walk, the upper temperature is the
//! standard deviation of the walk's fitness values. Ranges are averaged over
//! all training instances.
//!
//! Testing starts at a random point and, for every remaining evaluation,
//! proposes a random Hamming-1 neighbour. The temperature falls linearly from
//! the upper to the lower bound over the oracle's budget, and a neighbour is
//! accepted with the Metropolis probability `exp((new - current) / T)` (the
//! objective is maximised).
//!
//! Without training the schedule spans `[0, f64::MAX]`.

use crate::bits::{flip_random, random_bitvector};
use gauntlet_core::math::{
    interpolation::lerp,
    stats::{mean, sample_std_dev},
};
use gauntlet_oracle::{error::EvaluationError, oracle::Oracle};
use gauntlet_session::{
    category::TrainingCategory,
    competitor::{Competitor, CompetitorError},
};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, warn};

/// The start (`upper`) and end (`lower`) temperatures of the schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub lower: f64,
    pub upper: f64,
}

impl Default for TemperatureRange {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: f64::MAX,
        }
    }
}

impl TemperatureRange {
    /// White's temperature range for a fitness trajectory. Needs at least two
    /// values.
    pub fn from_trajectory(trajectory: &[f64]) -> Option<Self> {
        let lower = trajectory
            .windows(2)
            .map(|w| (w[1] - w[0]).abs())
            .min_by(f64::total_cmp)?;
        let upper = sample_std_dev(trajectory)?;
        Some(Self { lower, upper })
    }

    /// Temperature at step `i` of `n`, falling linearly from `upper` to
    /// `lower`. Never negative.
    #[inline]
    pub fn temperature(&self, i: u64, n: u64) -> f64 {
        let last = n.saturating_sub(1) as f64;
        lerp(i as f64, 0.0, last, self.upper, self.lower).max(0.0)
    }
}

/// Metropolis acceptance for maximisation. `u` is uniform in `[0, 1)`.
#[inline]
fn accept(current: f64, candidate: f64, temperature: f64, u: f64) -> bool {
    if candidate > current {
        return true;
    }
    if temperature <= 0.0 || temperature.is_nan() {
        return candidate >= current;
    }
    u < ((candidate - current) / temperature).exp()
}

#[derive(Debug, Clone)]
pub struct AnnealingHyperHeuristic<R> {
    category: TrainingCategory,
    rng: R,
    schedule: TemperatureRange,
}

impl<R: Rng> AnnealingHyperHeuristic<R> {
    /// Creates a hyper-heuristic in `category`, which should be `Short` or
    /// `Long`; with `None` it never trains and anneals over `[0, f64::MAX]`.
    #[inline]
    pub fn new(category: TrainingCategory, rng: R) -> Self {
        Self {
            category,
            rng,
            schedule: TemperatureRange::default(),
        }
    }

    #[inline]
    pub fn schedule(&self) -> TemperatureRange {
        self.schedule
    }

    /// Random walk of at most `steps` evaluations. Returns the fitness
    /// trajectory and the error that cut it short, if any.
    fn random_walk(&mut self, oracle: &Oracle, steps: u64) -> (Vec<f64>, Option<EvaluationError>) {
        let mut x = random_bitvector(&mut self.rng, oracle.num_variables());
        let mut trajectory = Vec::with_capacity(usize::try_from(steps.min(1 << 20)).unwrap_or(0));
        for _ in 0..steps {
            flip_random(&mut self.rng, &mut x);
            match oracle.evaluate(&x) {
                Ok(v) => trajectory.push(v),
                Err(e) => return (trajectory, Some(e)),
            }
        }
        (trajectory, None)
    }
}

impl<R: Rng> Competitor for AnnealingHyperHeuristic<R> {
    fn name(&self) -> &str {
        "sahh"
    }

    fn training_category(&self) -> TrainingCategory {
        self.category
    }

    fn train(&mut self, oracles: &[Oracle], _max_time: Duration) -> Result<(), CompetitorError> {
        let Some(first) = oracles.first() else {
            return Ok(());
        };
        // The training budget is shared, so split it evenly up front.
        let per_case = first.remaining_evaluations() / oracles.len() as u64;

        let mut lowers = Vec::with_capacity(oracles.len());
        let mut uppers = Vec::with_capacity(oracles.len());
        for oracle in oracles {
            let (trajectory, stopped) = self.random_walk(oracle, per_case);
            if let Some(range) = TemperatureRange::from_trajectory(&trajectory) {
                lowers.push(range.lower);
                uppers.push(range.upper);
            }
            match stopped {
                None => {}
                Some(e) if e.is_phase_end() => {
                    debug!(instance = oracle.label(), reason = %e, "training cut short");
                    break;
                }
                Some(e) => return Err(e.into()),
            }
        }

        match (mean(&lowers), mean(&uppers)) {
            (Some(lower), Some(upper)) => {
                self.schedule = TemperatureRange { lower, upper };
                debug!(lower, upper, instances = lowers.len(), "learned temperature range");
            }
            _ => warn!("training produced no usable trajectory, keeping default schedule"),
        }
        Ok(())
    }

    fn test(&mut self, oracle: &Oracle, _max_time: Duration) -> Result<(), CompetitorError> {
        let mut incumbent = random_bitvector(&mut self.rng, oracle.num_variables());
        let mut current = oracle.evaluate(&incumbent)?;

        let n = oracle.remaining_evaluations();
        let mut candidate = incumbent.clone();
        for i in 0..n {
            candidate.copy_from_slice(&incumbent);
            flip_random(&mut self.rng, &mut candidate);
            let value = oracle.evaluate(&candidate)?;

            let t = self.schedule.temperature(i, n);
            let u = self.rng.random::<f64>();
            if accept(current, value, t, u) {
                std::mem::swap(&mut incumbent, &mut candidate);
                current = value;
            }
        }
        Ok(())
    }
}
