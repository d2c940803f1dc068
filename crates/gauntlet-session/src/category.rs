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

use serde::Serialize;
use std::str::FromStr;

/// How much training a competitor asks for before testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrainingCategory {
    /// No training phase. No training oracles are ever built.
    None,
    /// A training budget equal to the sum of the training quotas.
    Short,
    /// Ten times the `Short` evaluation budget and twice its wall-clock time.
    Long,
}

impl TrainingCategory {
    pub const ALL: [TrainingCategory; 3] = [Self::None, Self::Short, Self::Long];

    /// Factor applied to the summed training quotas.
    #[inline]
    pub const fn evaluation_multiplier(self) -> u64 {
        match self {
            Self::None => 0,
            Self::Short => 1,
            Self::Long => 10,
        }
    }

    /// Factor applied to the training wall-clock allocation.
    #[inline]
    pub const fn time_multiplier(self) -> u32 {
        match self {
            Self::None | Self::Short => 1,
            Self::Long => 2,
        }
    }

    #[inline]
    pub const fn has_training(self) -> bool {
        !matches!(self, Self::None)
    }

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Short => "SHORT",
            Self::Long => "LONG",
        }
    }
}

impl std::fmt::Display for TrainingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTrainingCategoryError(String);

impl std::fmt::Display for ParseTrainingCategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown training category '{}' (expected none, short or long)",
            self.0
        )
    }
}

impl std::error::Error for ParseTrainingCategoryError {}

impl FromStr for TrainingCategory {
    type Err = ParseTrainingCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTrainingCategoryError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers() {
        assert_eq!(TrainingCategory::None.evaluation_multiplier(), 0);
        assert_eq!(TrainingCategory::Short.evaluation_multiplier(), 1);
        assert_eq!(TrainingCategory::Long.evaluation_multiplier(), 10);

        assert_eq!(TrainingCategory::None.time_multiplier(), 1);
        assert_eq!(TrainingCategory::Short.time_multiplier(), 1);
        assert_eq!(TrainingCategory::Long.time_multiplier(), 2);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("long".parse(), Ok(TrainingCategory::Long));
        assert_eq!(" Short ".parse(), Ok(TrainingCategory::Short));
        assert_eq!("NONE".parse(), Ok(TrainingCategory::None));
        assert!("medium".parse::<TrainingCategory>().is_err());
    }

    #[test]
    fn test_serializes_uppercase() {
        let json = serde_json::to_string(&TrainingCategory::Long).unwrap();
        assert_eq!(json, "\"LONG\"");
        assert!(!TrainingCategory::None.has_training());
    }
}
