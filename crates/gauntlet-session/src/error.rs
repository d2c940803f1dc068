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

use crate::competitor::CompetitorError;
use gauntlet_oracle::{error::EvaluationError, oracle::TimingMode};

/// The instances handed to the allocator cannot form a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Training instances disagree on the number of variables.
    InhomogeneousTraining {
        first: usize,
        instance: String,
        found: usize,
    },
    /// The scaled training budget does not fit in a `u64`.
    BudgetOverflow,
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InhomogeneousTraining {
                first,
                instance,
                found,
            } => write!(
                f,
                "training instance '{}' has {} variables, the first has {}",
                instance, found, first
            ),
            Self::BudgetOverflow => write!(f, "training evaluation budget overflows u64"),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// A session aborted for a reason other than a phase ending normally.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    Configuration(ConfigurationError),
    /// The competitor triggered a non-sentinel evaluation error, such as a
    /// candidate of the wrong length.
    Evaluation {
        phase: TimingMode,
        instance: Option<String>,
        source: EvaluationError,
    },
    /// The competitor reported a failure of its own.
    Competitor {
        phase: TimingMode,
        instance: Option<String>,
        reason: String,
    },
}

impl SessionError {
    pub(crate) fn from_competitor(
        phase: TimingMode,
        instance: Option<&str>,
        err: CompetitorError,
    ) -> Self {
        let instance = instance.map(str::to_string);
        match err {
            CompetitorError::Evaluation(source) => Self::Evaluation {
                phase,
                instance,
                source,
            },
            CompetitorError::Failed(reason) => Self::Competitor {
                phase,
                instance,
                reason,
            },
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let at = |instance: &Option<String>| match instance {
            Some(name) => format!(" on '{}'", name),
            None => String::new(),
        };
        match self {
            Self::Configuration(e) => write!(f, "configuration error: {}", e),
            Self::Evaluation {
                phase,
                instance,
                source,
            } => write!(f, "{} phase{}: {}", phase, at(instance), source),
            Self::Competitor {
                phase,
                instance,
                reason,
            } => write!(f, "{} phase{}: competitor failed: {}", phase, at(instance), reason),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::Evaluation { source, .. } => Some(source),
            Self::Competitor { .. } => None,
        }
    }
}

impl From<ConfigurationError> for SessionError {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}
