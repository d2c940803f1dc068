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

//! # Result Reporting
//!
//! After a session the best-so-far record of every oracle is snapshotted into
//! an `InstanceResult`. A `SessionReport` adds competitor and class metadata
//! and serialises to the JSON result document written next to the problem
//! class. `ResultStats` summarises a list of results.

use crate::{category::TrainingCategory, driver::SessionOutcome};
use chrono::{DateTime, TimeZone};
use gauntlet_core::math::stats::{mean, sample_std_dev};
use gauntlet_oracle::oracle::Oracle;
use serde::Serialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Timestamp layout used in reports and result file names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Sub-directory of a problem class that receives result files.
pub const RESULTS_DIR: &str = "results";

/// The state of one oracle at the end of its phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceResult {
    pub remaining_evaluations: u64,
    /// `-1` if the oracle was never evaluated.
    pub remaining_evaluations_when_best_reached: i64,
    /// `-1.0` if the oracle was never evaluated.
    pub best_value: f64,
}

impl InstanceResult {
    pub fn from_oracle(oracle: &Oracle) -> Self {
        let (remaining_evaluations_when_best_reached, best_value) = match oracle.best_record() {
            Some(best) => (
                i64::try_from(best.remaining_at_best).unwrap_or(i64::MAX),
                best.value,
            ),
            None => (-1, -1.0),
        };
        Self {
            remaining_evaluations: oracle.remaining_evaluations(),
            remaining_evaluations_when_best_reached,
            best_value,
        }
    }
}

/// Mean and sample standard deviation of best values and of the remaining
/// evaluations at which they were reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultStats {
    pub best_value_mean: f64,
    pub best_value_sd: f64,
    pub remaining_evaluations_when_best_reached_mean: f64,
    pub remaining_evaluations_when_best_reached_sd: f64,
}

impl ResultStats {
    /// Returns `None` for an empty slice.
    pub fn from_results(results: &[InstanceResult]) -> Option<Self> {
        let best: Vec<f64> = results.iter().map(|r| r.best_value).collect();
        let remaining: Vec<f64> = results
            .iter()
            .map(|r| r.remaining_evaluations_when_best_reached as f64)
            .collect();

        Some(Self {
            best_value_mean: mean(&best)?,
            best_value_sd: sample_std_dev(&best)?,
            remaining_evaluations_when_best_reached_mean: mean(&remaining)?,
            remaining_evaluations_when_best_reached_sd: sample_std_dev(&remaining)?,
        })
    }
}

impl std::fmt::Display for ResultStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ResultStats(bestValue: {:.6} ± {:.6}, remainingAtBest: {:.1} ± {:.1})",
            self.best_value_mean,
            self.best_value_sd,
            self.remaining_evaluations_when_best_reached_mean,
            self.remaining_evaluations_when_best_reached_sd
        )
    }
}

/// The JSON result document of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub competitor_name: String,
    pub competitor_language: String,
    pub problem_class_name: String,
    pub training_category: TrainingCategory,
    pub datetime: String,
    pub training_results: Vec<InstanceResult>,
    /// Milliseconds.
    pub training_wall_clock_usage: u64,
    pub testing_results: Vec<InstanceResult>,
    /// Milliseconds.
    pub testing_wall_clock_usage: u64,
}

impl SessionReport {
    pub fn new<Tz>(
        competitor_name: &str,
        problem_class_name: &str,
        training_category: TrainingCategory,
        outcome: SessionOutcome,
        datetime: &DateTime<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            competitor_name: competitor_name.to_string(),
            competitor_language: "Rust".to_string(),
            problem_class_name: problem_class_name.to_string(),
            training_category,
            datetime: datetime.format(TIMESTAMP_FORMAT).to_string(),
            training_results: outcome.training_results,
            training_wall_clock_usage: millis(outcome.training_wall_clock),
            testing_results: outcome.testing_results,
            testing_wall_clock_usage: millis(outcome.testing_wall_clock),
        }
    }

    #[inline]
    pub fn training_stats(&self) -> Option<ResultStats> {
        ResultStats::from_results(&self.training_results)
    }

    #[inline]
    pub fn testing_stats(&self) -> Option<ResultStats> {
        ResultStats::from_results(&self.testing_results)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// `GAUNTLETresults-<competitor>-<class>-<timestamp>.json`
    pub fn file_name(&self) -> String {
        format!(
            "GAUNTLETresults-{}-{}-{}.json",
            self.competitor_name, self.problem_class_name, self.datetime
        )
    }

    /// Writes the report to `<class_dir>/results/` and returns the file path.
    pub fn write_to_class_dir<P: AsRef<Path>>(&self, class_dir: P) -> std::io::Result<PathBuf> {
        let dir = class_dir.as_ref().join(RESULTS_DIR);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(self.file_name());
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(&path, json + "\n")?;
        Ok(path)
    }
}

#[inline]
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
