//! # Diagnosis confidence (`confidence`)
//!
//! Pure functions that turn a ranked list of similarity candidates into a set
//! of independent confidence signals, plus a classifier and a weighted rollup.
//!
//! ## Core Types
//!
//! - [`ScoredCandidate`]: what the calculator reads from a candidate.
//! - [`ConfidenceMetrics`]: the signals reported on the wire.
//! - [`ConfidenceAssessment`]: metrics plus the combined rollup.
//! - [`ConfidenceWeights`]: `w1..w5` for the rollup, with named defaults.
//! - [`ConfidenceLevel`]: `High` / `Medium` / `Low` labels.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use confidence::{assess, ConfidenceWeights, MetricContext, ScoredCandidate};
//! use seasonal::SeasonalTable;
//! use symptoms::SymptomNormalizer;
//!
//! struct Row(&'static str, f64, &'static str);
//!
//! impl ScoredCandidate for Row {
//!     fn disease_name(&self) -> &str { self.0 }
//!     fn similarity(&self) -> f64 { self.1 }
//!     fn symptoms(&self) -> &str { self.2 }
//! }
//!
//! let rows = [
//!     Row("Early Blight", 0.91, "dark brown spots, concentric rings"),
//!     Row("Late Blight", 0.78, "dark brown lesions, white growth"),
//! ];
//! let normalizer = SymptomNormalizer::default();
//! let today = NaiveDate::from_ymd_opt(2024, 8, 10).unwrap();
//! let ctx = MetricContext::new(today, SeasonalTable::builtin(), &normalizer);
//!
//! let assessment = assess(&rows, &ctx, &ConfidenceWeights::default());
//! assert_eq!(assessment.metrics.seasonal_relevance, 1.0);
//! assert!(assessment.metrics.confidence_margin > 0.0);
//! ```

mod assess;
mod candidate;
mod classify;
mod error;
pub mod metrics;
pub mod weights;

pub use crate::assess::{
    assess, combined_confidence, CombinedInputs, ConfidenceAssessment, ConfidenceLevels,
};
pub use crate::candidate::ScoredCandidate;
pub use crate::classify::{
    classify, ConfidenceLevel, HIGH_CONFIDENCE_THRESHOLD, MEDIUM_CONFIDENCE_THRESHOLD,
};
pub use crate::error::ConfidenceError;
pub use crate::metrics::{
    calculate_metrics, ConfidenceMetrics, MetricContext, SymptomOverlap,
};
pub use crate::weights::ConfidenceWeights;
