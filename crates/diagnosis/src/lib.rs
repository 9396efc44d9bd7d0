//! # Diagnosis engine (`diagnosis`)
//!
//! ## Purpose
//!
//! `diagnosis` sits between a similarity index over labelled disease images
//! and whatever presents results to a grower. It takes the ranked candidates
//! the index returns for a query embedding, picks the primary diagnosis, and
//! attaches the confidence signals computed by the `confidence` crate.
//!
//! ## Core Types
//!
//! - [`RawCandidate`]: an index row as received, every field optional.
//! - [`CandidateMatch`]: a repaired row with all fields present.
//! - [`DiagnosisComposer`]: stateless composer; `compose`, `try_compose`,
//!   and `compose_raw` for unrepaired rows.
//! - [`Diagnoser`]: embedding validation, one [`CandidateSource`] lookup,
//!   then composition.
//! - [`DiagnosisResult`]: the wire output; [`DiagnosisReport`] is the richer
//!   Rust-side success value.
//!
//! ## Example Usage
//!
//! ```rust
//! use diagnosis::{CandidateMatch, DiagnosisComposer};
//! use seasonal::FixedClock;
//!
//! let candidates = vec![
//!     CandidateMatch::new("1", "DiseaseA", 0.90).with_symptoms("yellow leaves, brown spots"),
//!     CandidateMatch::new("2", "DiseaseB", 0.75).with_symptoms("yellow spots, wilting"),
//! ];
//! let clock = FixedClock::for_month(2024, 7).unwrap();
//!
//! let result = DiagnosisComposer::default().compose(&candidates, 5, &clock);
//! assert!(result.success);
//! let metrics = &result.diagnosis.unwrap().confidence_metrics;
//! assert!((metrics.confidence_margin - 0.15).abs() < 1e-9);
//! ```
//!
//! ## Observability
//!
//! Every composition runs inside a `diagnosis.compose` tracing span and logs
//! its outcome with `elapsed_micros`. Attach a [`DiagnosisMetrics`] observer
//! with [`DiagnosisComposer::with_metrics`] to record latency and outcomes.

mod config;
pub mod embedding;
pub mod engine;
mod error;
pub mod metrics;
pub mod source;
pub mod types;

#[doc(hidden)]
pub mod demo_utils;

pub use crate::config::ComposerConfig;
pub use crate::embedding::{EmbeddingVector, EMBEDDING_DIM};
pub use crate::engine::{Diagnoser, DiagnosisComposer};
pub use crate::error::DiagnosisError;
pub use crate::metrics::{ComposeOutcome, DiagnosisMetrics};
pub use crate::source::{
    CandidateSource, MatchParams, SourceError, DEFAULT_MATCH_COUNT, DEFAULT_MATCH_THRESHOLD,
};
pub use crate::types::{
    into_candidates, AlternativeDiagnosis, CandidateMatch, Diagnosis, DiagnosisReport,
    DiagnosisResult, RawCandidate,
};
