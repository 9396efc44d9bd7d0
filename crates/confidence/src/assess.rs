use serde::{Deserialize, Serialize};

use crate::candidate::{bounded, ScoredCandidate};
use crate::classify::{classify, ConfidenceLevel};
use crate::metrics::{
    absolute_confidence, calculate_metrics, relative_confidence_normalized, ConfidenceMetrics,
    MetricContext,
};
use crate::weights::ConfidenceWeights;

/// The bounded signals that feed the combined rollup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedInputs {
    pub absolute: f64,
    pub relative_normalized: f64,
    pub clarity: f64,
    pub max_symptom_overlap: f64,
    pub seasonal: f64,
}

/// Weighted rollup of the combined inputs, normalized by the weight sum and
/// clamped into `[0, 1]`. Zero-sum weights yield `0`.
pub fn combined_confidence(inputs: &CombinedInputs, weights: &ConfidenceWeights) -> f64 {
    let total = weights.sum();
    if !(total > 0.0) {
        return 0.0;
    }
    let raw = weights.absolute * bounded(inputs.absolute)
        + weights.relative * bounded(inputs.relative_normalized)
        + weights.clarity * bounded(inputs.clarity)
        + weights.distinctness * (1.0 - bounded(inputs.max_symptom_overlap))
        + weights.seasonal * bounded(inputs.seasonal);
    bounded(raw / total)
}

/// Per-signal labels for UI consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceLevels {
    pub absolute: ConfidenceLevel,
    pub margin: ConfidenceLevel,
    pub clarity: ConfidenceLevel,
    pub seasonal: ConfidenceLevel,
    pub combined: ConfidenceLevel,
}

/// Everything the calculator knows about one ranked candidate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAssessment {
    pub metrics: ConfidenceMetrics,
    pub absolute_confidence: f64,
    pub relative_confidence_normalized: f64,
    pub combined_confidence: f64,
}

impl ConfidenceAssessment {
    pub fn combined_inputs(&self) -> CombinedInputs {
        CombinedInputs {
            absolute: self.absolute_confidence,
            relative_normalized: self.relative_confidence_normalized,
            clarity: self.metrics.diagnosis_clarity,
            max_symptom_overlap: self.metrics.max_symptom_overlap(),
            seasonal: self.metrics.seasonal_relevance,
        }
    }

    /// Level of the combined score.
    pub fn level(&self) -> ConfidenceLevel {
        classify(self.combined_confidence)
    }

    pub fn levels(&self) -> ConfidenceLevels {
        ConfidenceLevels {
            absolute: classify(self.absolute_confidence),
            margin: classify(self.metrics.confidence_margin),
            clarity: classify(self.metrics.diagnosis_clarity),
            seasonal: classify(self.metrics.seasonal_relevance),
            combined: self.level(),
        }
    }
}

/// Compute the wire metrics and the combined rollup in one pass.
pub fn assess<C: ScoredCandidate>(
    candidates: &[C],
    ctx: &MetricContext<'_>,
    weights: &ConfidenceWeights,
) -> ConfidenceAssessment {
    let metrics = calculate_metrics(candidates, ctx);
    let mut assessment = ConfidenceAssessment {
        metrics,
        absolute_confidence: absolute_confidence(candidates),
        relative_confidence_normalized: relative_confidence_normalized(candidates),
        combined_confidence: 0.0,
    };
    if !candidates.is_empty() {
        assessment.combined_confidence =
            combined_confidence(&assessment.combined_inputs(), weights);
    }
    assessment
}
