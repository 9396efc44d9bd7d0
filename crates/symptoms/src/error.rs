use thiserror::Error;

/// Errors produced while configuring the symptom normalizer.
///
/// Normalizing text itself never fails; only an unusable configuration does.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymptomError {
    #[error("invalid normalizer configuration: {0}")]
    InvalidConfig(String),
}
