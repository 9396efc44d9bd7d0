// Metrics hooks for the diagnosis layer.
//
// A `DiagnosisComposer` reports latency, candidate count, and outcome for each
// composition to the observer it was built with via `with_metrics`. There is
// no process-wide recorder; two composers can report to different backends.
use std::time::Duration;

use confidence::ConfidenceLevel;

use crate::error::DiagnosisError;
use crate::types::DiagnosisReport;

/// How a composition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeOutcome {
    /// A diagnosis was produced at the given combined confidence level.
    Diagnosed(ConfidenceLevel),
    NoMatch,
    Rejected,
}

impl ComposeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComposeOutcome::Diagnosed(_) => "diagnosed",
            ComposeOutcome::NoMatch => "no_match",
            ComposeOutcome::Rejected => "rejected",
        }
    }

    pub(crate) fn of(outcome: &Result<DiagnosisReport, DiagnosisError>) -> Self {
        match outcome {
            Ok(report) => ComposeOutcome::Diagnosed(report.level()),
            Err(DiagnosisError::NoCandidates) => ComposeOutcome::NoMatch,
            Err(_) => ComposeOutcome::Rejected,
        }
    }
}

/// Metrics observer for compositions.
pub trait DiagnosisMetrics: Send + Sync {
    /// `candidate_count` is the number of candidates supplied before
    /// truncation to `top_k`.
    fn record_compose(&self, candidate_count: usize, latency: Duration, outcome: ComposeOutcome);
}
