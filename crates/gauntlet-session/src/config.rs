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

//! Session configuration.

use crate::category::TrainingCategory;
use std::time::Duration;

/// The wall-clock time granted to every instance unless configured otherwise.
pub const DEFAULT_BASE_TIME_PER_INSTANCE: Duration = Duration::from_secs(250);

/// How the training time allocation scales with the training category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeScaling {
    /// Training time is `base * n * time_multiplier` (`LONG` gets twice the
    /// time of `SHORT`).
    #[default]
    TimeMultiplier,
    /// Training time is `base * n * evaluation_multiplier` (`LONG` gets ten
    /// times the time of `SHORT`).
    EvaluationMultiplier,
}

impl TimeScaling {
    #[inline]
    pub fn factor(self, category: TrainingCategory) -> u32 {
        match self {
            Self::TimeMultiplier => category.time_multiplier(),
            Self::EvaluationMultiplier => {
                u32::try_from(category.evaluation_multiplier()).unwrap_or(u32::MAX)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    base_time_per_instance: Duration,
    time_scaling: TimeScaling,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConfig {
    #[inline]
    pub fn new() -> Self {
        Self {
            base_time_per_instance: DEFAULT_BASE_TIME_PER_INSTANCE,
            time_scaling: TimeScaling::default(),
        }
    }

    #[inline]
    pub fn with_base_time_per_instance(mut self, base: Duration) -> Self {
        self.base_time_per_instance = base;
        self
    }

    #[inline]
    pub fn with_time_scaling(mut self, scaling: TimeScaling) -> Self {
        self.time_scaling = scaling;
        self
    }

    #[inline]
    pub fn base_time_per_instance(&self) -> Duration {
        self.base_time_per_instance
    }

    #[inline]
    pub fn time_scaling(&self) -> TimeScaling {
        self.time_scaling
    }

    /// Total wall-clock time for a training phase over `num_instances`
    /// instances. Saturates instead of overflowing.
    pub fn training_time(&self, category: TrainingCategory, num_instances: usize) -> Duration {
        let n = u32::try_from(num_instances).unwrap_or(u32::MAX);
        self.base_time_per_instance
            .saturating_mul(n)
            .saturating_mul(self.time_scaling.factor(category))
    }

    /// Wall-clock time for one testing instance.
    #[inline]
    pub fn testing_time(&self) -> Duration {
        self.base_time_per_instance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SessionConfig::default();
        assert_eq!(c.base_time_per_instance(), Duration::from_secs(250));
        assert_eq!(c.time_scaling(), TimeScaling::TimeMultiplier);
        assert_eq!(c.testing_time(), Duration::from_secs(250));
    }

    #[test]
    fn test_training_time_uses_time_multiplier() {
        let c = SessionConfig::new().with_base_time_per_instance(Duration::from_millis(100));
        assert_eq!(
            c.training_time(TrainingCategory::Short, 3),
            Duration::from_millis(300)
        );
        assert_eq!(
            c.training_time(TrainingCategory::Long, 3),
            Duration::from_millis(600)
        );
    }

    #[test]
    fn test_training_time_legacy_scaling() {
        let c = SessionConfig::new()
            .with_base_time_per_instance(Duration::from_millis(100))
            .with_time_scaling(TimeScaling::EvaluationMultiplier);
        assert_eq!(
            c.training_time(TrainingCategory::Long, 3),
            Duration::from_millis(3000)
        );
        assert_eq!(
            c.training_time(TrainingCategory::None, 3),
            Duration::ZERO
        );
    }

    #[test]
    fn test_training_time_saturates() {
        let c = SessionConfig::new().with_base_time_per_instance(Duration::MAX);
        assert_eq!(c.training_time(TrainingCategory::Long, 2), Duration::MAX);
    }
}
