use symptoms::SymptomError;
use thiserror::Error;

/// Errors raised while configuring the metric calculator.
///
/// Metric formulas themselves never fail; degenerate inputs have defined values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfidenceError {
    #[error("invalid confidence weights: {0}")]
    InvalidWeights(String),
    #[error(transparent)]
    Normalizer(#[from] SymptomError),
}
