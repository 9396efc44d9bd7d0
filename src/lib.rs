//! Workspace umbrella crate for the Agroverse diagnosis confidence engine.
//!
//! This crate stitches the stage crates together so callers can go from a
//! ranked list of similarity-search candidates to a scored diagnosis with a
//! single dependency:
//!
//! - [`symptoms`]: free-text symptom normalization and Jaccard overlap.
//! - [`seasonal`]: disease seasonality and the injectable [`Clock`].
//! - [`confidence`]: per-signal metrics, the classifier, and the weighted rollup.
//! - [`diagnosis`]: the composer, wire types, and the candidate source seam.
//!
//! Configuration loading lives in [`config`]; [`render_summary`] produces the
//! plain-text report printed by the `agroverse` binary.
//!
//! ```rust
//! use agroverse::{AgroverseConfig, CandidateMatch, FixedClock};
//!
//! let composer = AgroverseConfig::default().build_composer().unwrap();
//! let candidates = vec![
//!     CandidateMatch::new("7", "Septoria Leaf Spot", 0.88).with_symptoms("small circular spots"),
//!     CandidateMatch::new("9", "Bacterial Spot", 0.74).with_symptoms("small dark spots"),
//! ];
//! let clock = FixedClock::for_month(2024, 7).unwrap();
//!
//! let result = composer.compose(&candidates, 5, &clock);
//! assert_eq!(result.diagnosis.unwrap().primary_disease, "Septoria Leaf Spot");
//! ```

pub mod config;
mod report;

pub use crate::config::{
    AgroverseConfig, ConfigLoadError, EngineConfig, LoggingConfig, SeasonalConfig, ENV_PREFIX,
};
pub use crate::report::render_summary;

pub use confidence::{
    assess, calculate_metrics, classify, combined_confidence, CombinedInputs, ConfidenceAssessment,
    ConfidenceError, ConfidenceLevel, ConfidenceLevels, ConfidenceMetrics, ConfidenceWeights,
    MetricContext, ScoredCandidate, SymptomOverlap, HIGH_CONFIDENCE_THRESHOLD,
    MEDIUM_CONFIDENCE_THRESHOLD,
};
pub use diagnosis::{
    AlternativeDiagnosis, CandidateMatch, CandidateSource, ComposeOutcome, ComposerConfig,
    Diagnoser, Diagnosis, DiagnosisComposer, DiagnosisError, DiagnosisMetrics, DiagnosisReport,
    DiagnosisResult, EmbeddingVector, MatchParams, RawCandidate, SourceError, EMBEDDING_DIM,
};
pub use seasonal::{
    Clock, FixedClock, SeasonalError, SeasonalPattern, SeasonalTable, SystemClock,
};
pub use symptoms::{
    normalize, normalize_symptoms, NormalizerConfig, SymptomError, SymptomNormalizer, SymptomSet,
};

pub use confidence;
pub use diagnosis;
pub use seasonal;
pub use symptoms;
