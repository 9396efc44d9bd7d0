//! Weights for the combined confidence rollup.
//!
//! ```text
//! combined = w1·absolute + w2·relative_normalized + w3·clarity
//!          + w4·(1 - max(symptom_overlap)) + w5·seasonal
//! ```
//!
//! The defaults sum to `1.0`. Weights that do not are still accepted; the
//! rollup divides by their sum so the result stays in `[0, 1]`.

use serde::{Deserialize, Serialize};

use crate::error::ConfidenceError;

/// `w1`: primary similarity.
pub const DEFAULT_ABSOLUTE_WEIGHT: f64 = 0.40;
/// `w2`: normalized primary/secondary ratio.
pub const DEFAULT_RELATIVE_WEIGHT: f64 = 0.15;
/// `w3`: distance of the primary from the mean alternative.
pub const DEFAULT_CLARITY_WEIGHT: f64 = 0.20;
/// `w4`: symptom distinctness, `1 - max(overlap)`.
pub const DEFAULT_DISTINCTNESS_WEIGHT: f64 = 0.10;
/// `w5`: seasonal relevance.
pub const DEFAULT_SEASONAL_WEIGHT: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    #[serde(alias = "w1", default = "default_absolute")]
    pub absolute: f64,
    #[serde(alias = "w2", default = "default_relative")]
    pub relative: f64,
    #[serde(alias = "w3", default = "default_clarity")]
    pub clarity: f64,
    #[serde(alias = "w4", default = "default_distinctness")]
    pub distinctness: f64,
    #[serde(alias = "w5", default = "default_seasonal")]
    pub seasonal: f64,
}

impl ConfidenceWeights {
    pub fn sum(&self) -> f64 {
        self.absolute + self.relative + self.clarity + self.distinctness + self.seasonal
    }

    pub fn validate(&self) -> Result<(), ConfidenceError> {
        let named = [
            ("absolute", self.absolute),
            ("relative", self.relative),
            ("clarity", self.clarity),
            ("distinctness", self.distinctness),
            ("seasonal", self.seasonal),
        ];
        for (name, weight) in named {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfidenceError::InvalidWeights(format!(
                    "{name} weight must be a finite value >= 0.0, got {weight}"
                )));
            }
        }
        if self.sum() <= 0.0 {
            return Err(ConfidenceError::InvalidWeights(
                "at least one weight must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            absolute: DEFAULT_ABSOLUTE_WEIGHT,
            relative: DEFAULT_RELATIVE_WEIGHT,
            clarity: DEFAULT_CLARITY_WEIGHT,
            distinctness: DEFAULT_DISTINCTNESS_WEIGHT,
            seasonal: DEFAULT_SEASONAL_WEIGHT,
        }
    }
}

fn default_absolute() -> f64 {
    DEFAULT_ABSOLUTE_WEIGHT
}
fn default_relative() -> f64 {
    DEFAULT_RELATIVE_WEIGHT
}
fn default_clarity() -> f64 {
    DEFAULT_CLARITY_WEIGHT
}
fn default_distinctness() -> f64 {
    DEFAULT_DISTINCTNESS_WEIGHT
}
fn default_seasonal() -> f64 {
    DEFAULT_SEASONAL_WEIGHT
}
