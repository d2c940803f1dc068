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

//! # Session Driver
//!
//! Runs a competitor through a `Session`:
//!
//! `TRAINING` (skipped for `NONE`) -> `TESTING` -> done.
//!
//! Training arms the shared training deadline at
//! `now + base * n * factor` and calls `Competitor::train` once with every
//! training oracle. Testing arms each oracle's own deadline at `now + base`
//! right before calling `Competitor::test` on it. Deadlines are disarmed when
//! the call returns, so oracles cannot be used outside their phase.
//!
//! Budget exhaustion and deadline expiry returned by the competitor end the
//! current phase (or instance) normally. Any other error aborts the session.

use crate::{
    allocator::Session,
    competitor::{Competitor, CompetitorError},
    config::SessionConfig,
    error::SessionError,
    report::InstanceResult,
};
use gauntlet_oracle::oracle::{Oracle, TimingMode};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What a finished session produced, before any reporting metadata is
/// attached.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub training_results: Vec<InstanceResult>,
    pub training_wall_clock: Duration,
    pub testing_results: Vec<InstanceResult>,
    pub testing_wall_clock: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionDriver {
    config: SessionConfig,
}

impl SessionDriver {
    #[inline]
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn run<C>(
        &self,
        session: &Session,
        competitor: &mut C,
    ) -> Result<SessionOutcome, SessionError>
    where
        C: Competitor + ?Sized,
    {
        if competitor.training_category() != session.category() {
            warn!(
                competitor = competitor.name(),
                requested = %competitor.training_category(),
                session = %session.category(),
                "competitor category differs from the session category; using the session's"
            );
        }

        let training_wall_clock = self.run_training(session, competitor)?;
        let testing_wall_clock = self.run_testing(session, competitor)?;

        Ok(SessionOutcome {
            training_results: snapshot(session.training_oracles()),
            training_wall_clock,
            testing_results: snapshot(session.testing_oracles()),
            testing_wall_clock,
        })
    }

    fn run_training<C>(
        &self,
        session: &Session,
        competitor: &mut C,
    ) -> Result<Duration, SessionError>
    where
        C: Competitor + ?Sized,
    {
        let category = session.category();
        if !category.has_training() {
            debug!("training category NONE, skipping training phase");
            return Ok(Duration::ZERO);
        }

        let oracles = session.training_oracles();
        if oracles.is_empty() {
            warn!(category = %category, "no training instances, skipping training phase");
            return Ok(Duration::ZERO);
        }

        let max_time = self.config.training_time(category, oracles.len());
        info!(
            competitor = competitor.name(),
            instances = oracles.len(),
            budget = session.training_budget().map(|b| b.remaining()).unwrap_or(0),
            max_time_ms = millis(max_time),
            "starting training phase"
        );

        let deadline = session.training_deadline();
        let start = Instant::now();
        deadline.arm(max_time);
        let result = competitor.train(oracles, max_time);
        deadline.disarm();
        let elapsed = start.elapsed();

        settle(TimingMode::Training, None, result)?;
        info!(wall_clock_ms = millis(elapsed), "training phase finished");
        Ok(elapsed)
    }

    fn run_testing<C>(
        &self,
        session: &Session,
        competitor: &mut C,
    ) -> Result<Duration, SessionError>
    where
        C: Competitor + ?Sized,
    {
        let oracles = session.testing_oracles();
        let max_time = self.config.testing_time();
        info!(
            competitor = competitor.name(),
            instances = oracles.len(),
            max_time_ms = millis(max_time),
            "starting testing phase"
        );

        let start = Instant::now();
        for oracle in oracles {
            self.run_testing_instance(oracle, competitor, max_time)?;
        }
        let elapsed = start.elapsed();

        info!(wall_clock_ms = millis(elapsed), "testing phase finished");
        Ok(elapsed)
    }

    fn run_testing_instance<C>(
        &self,
        oracle: &Oracle,
        competitor: &mut C,
        max_time: Duration,
    ) -> Result<(), SessionError>
    where
        C: Competitor + ?Sized,
    {
        debug!(
            instance = oracle.label(),
            budget = oracle.remaining_evaluations(),
            "testing instance"
        );

        oracle.deadline().arm(max_time);
        let result = competitor.test(oracle, max_time);
        oracle.deadline().disarm();

        settle(TimingMode::Testing, Some(oracle.label()), result)?;

        let (remaining_at_best, best_value) = oracle.best_result();
        debug!(
            instance = oracle.label(),
            best_value,
            remaining_at_best,
            "testing instance finished"
        );
        Ok(())
    }
}

/// Absorbs the two sentinel conditions; every other failure aborts.
fn settle(
    phase: TimingMode,
    instance: Option<&str>,
    result: Result<(), CompetitorError>,
) -> Result<(), SessionError> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_phase_end() => {
            debug!(%phase, instance, reason = %e, "phase ended by sentinel");
            Ok(())
        }
        Err(e) => Err(SessionError::from_competitor(phase, instance, e)),
    }
}

fn snapshot(oracles: &[Oracle]) -> Vec<InstanceResult> {
    oracles.iter().map(InstanceResult::from_oracle).collect()
}

#[inline]
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
