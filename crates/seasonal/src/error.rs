use std::io;

use thiserror::Error;

/// Errors raised while building or loading a seasonal table.
///
/// Lookups never fail: an unknown disease simply gets the off-season score.
#[derive(Debug, Error)]
pub enum SeasonalError {
    #[error("invalid month {month} for '{disease}': months must be 1..=12")]
    InvalidMonth { disease: String, month: u32 },
    #[error("disease name must not be empty")]
    EmptyDisease,
    #[error("failed to read seasonal table: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse seasonal table: {0}")]
    Parse(#[from] serde_json::Error),
}
