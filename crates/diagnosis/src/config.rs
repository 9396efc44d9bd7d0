use confidence::ConfidenceWeights;
use serde::{Deserialize, Serialize};
use symptoms::NormalizerConfig;

use crate::error::DiagnosisError;
use crate::source::{MatchParams, DEFAULT_MATCH_COUNT, DEFAULT_MATCH_THRESHOLD};

/// Tuning knobs for a [`DiagnosisComposer`](crate::DiagnosisComposer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Minimum similarity the index should apply, in `[0, 1]`.
    #[serde(default = "ComposerConfig::default_match_threshold")]
    pub match_threshold: f64,
    /// Candidates requested from the index and kept for composition.
    #[serde(default = "ComposerConfig::default_top_k", alias = "match_count")]
    pub top_k: usize,
    #[serde(default)]
    pub weights: ConfidenceWeights,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

impl ComposerConfig {
    pub(crate) fn default_match_threshold() -> f64 {
        DEFAULT_MATCH_THRESHOLD
    }

    pub(crate) fn default_top_k() -> usize {
        DEFAULT_MATCH_COUNT
    }

    pub fn validate(&self) -> Result<(), DiagnosisError> {
        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(DiagnosisError::InvalidConfig(format!(
                "match_threshold must be between 0.0 and 1.0, got {}",
                self.match_threshold
            )));
        }
        if self.top_k == 0 {
            return Err(DiagnosisError::InvalidConfig(
                "top_k must be greater than zero".into(),
            ));
        }
        self.weights.validate()?;
        self.normalizer
            .validate()
            .map_err(confidence::ConfidenceError::from)?;
        Ok(())
    }

    /// Parameters forwarded to a [`CandidateSource`](crate::CandidateSource).
    pub fn match_params(&self) -> MatchParams {
        MatchParams {
            match_threshold: self.match_threshold,
            match_count: self.top_k,
        }
    }
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            match_threshold: Self::default_match_threshold(),
            top_k: Self::default_top_k(),
            weights: ConfidenceWeights::default(),
            normalizer: NormalizerConfig::default(),
        }
    }
}
