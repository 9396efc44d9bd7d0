//! Error surface of the diagnosis layer.
//!
//! | Error | Category | Handling |
//! |-------|----------|----------|
//! | [`NoCandidates`](DiagnosisError::NoCandidates) | Precondition | Reported as `"no match found"`, not retried |
//! | [`MalformedCandidate`](DiagnosisError::MalformedCandidate) | Input repair | Recovered at the boundary, logged at `warn` |
//! | [`InvalidEmbedding`](DiagnosisError::InvalidEmbedding) | Precondition | Never coerced |
//! | [`NonFiniteEmbedding`](DiagnosisError::NonFiniteEmbedding) | Precondition | Never coerced |
//! | [`InvalidRequest`](DiagnosisError::InvalidRequest) | Validation | Caller error |
//! | [`InvalidConfig`](DiagnosisError::InvalidConfig) | Validation | Startup error |
//! | [`Source`](DiagnosisError::Source) | Collaborator | Similarity index failed |
//! | [`Confidence`](DiagnosisError::Confidence) | Validation | Weights or normalizer rejected |

use confidence::ConfidenceError;
use thiserror::Error;

use crate::source::SourceError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DiagnosisError {
    #[error("no match found")]
    NoCandidates,
    #[error("candidate {position} has a missing or invalid `{field}`")]
    MalformedCandidate { position: usize, field: &'static str },
    #[error("embedding must have {expected} dimensions, got {actual}")]
    InvalidEmbedding { expected: usize, actual: usize },
    #[error("embedding component {index} is not finite")]
    NonFiniteEmbedding { index: usize },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("invalid composer config: {0}")]
    InvalidConfig(String),
    #[error("candidate source failed: {0}")]
    Source(#[from] SourceError),
    #[error(transparent)]
    Confidence(#[from] ConfidenceError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use symptoms::SymptomError;

    #[test]
    fn no_candidates_message_is_stable() {
        assert_eq!(DiagnosisError::NoCandidates.to_string(), "no match found");
    }

    #[test]
    fn nested_errors_convert() {
        let err: DiagnosisError = SourceError::Unavailable("timeout".into()).into();
        assert!(matches!(err, DiagnosisError::Source(_)));
        assert!(err.to_string().contains("timeout"));

        let err: DiagnosisError =
            ConfidenceError::from(SymptomError::InvalidConfig("bad stop word".into())).into();
        assert!(err.to_string().contains("bad stop word"));
    }
}
