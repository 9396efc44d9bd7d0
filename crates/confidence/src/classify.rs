use std::fmt;

use serde::{Deserialize, Serialize};

/// Scores at or above this are [`ConfidenceLevel::High`].
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;
/// Scores at or above this (and below high) are [`ConfidenceLevel::Medium`].
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Discrete confidence label for UI consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a score to its level. `NaN` is [`ConfidenceLevel::Low`].
pub fn classify(score: f64) -> ConfidenceLevel {
    if score >= HIGH_CONFIDENCE_THRESHOLD {
        ConfidenceLevel::High
    } else if score >= MEDIUM_CONFIDENCE_THRESHOLD {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}
