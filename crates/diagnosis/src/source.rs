use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::embedding::EmbeddingVector;
use crate::types::RawCandidate;

/// Default minimum similarity a row must exceed to be returned.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.7;
/// Default number of rows requested from the index.
pub const DEFAULT_MATCH_COUNT: usize = 5;

/// Query parameters forwarded to the similarity index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchParams {
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,
    #[serde(default = "default_match_count")]
    pub match_count: usize,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            match_count: DEFAULT_MATCH_COUNT,
        }
    }
}

fn default_match_threshold() -> f64 {
    DEFAULT_MATCH_THRESHOLD
}

fn default_match_count() -> usize {
    DEFAULT_MATCH_COUNT
}

/// Errors reported by a [`CandidateSource`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("similarity index unavailable: {0}")]
    Unavailable(String),
    #[error("similarity index returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Nearest-neighbour lookup over labelled disease images.
///
/// Implementations must return rows ordered by descending similarity, keep
/// only rows with `similarity > params.match_threshold`, and return at most
/// `params.match_count` rows.
pub trait CandidateSource: Send + Sync {
    fn find_matches(
        &self,
        query: &EmbeddingVector,
        params: &MatchParams,
    ) -> Result<Vec<RawCandidate>, SourceError>;
}

impl<S: CandidateSource + ?Sized> CandidateSource for Arc<S> {
    fn find_matches(
        &self,
        query: &EmbeddingVector,
        params: &MatchParams,
    ) -> Result<Vec<RawCandidate>, SourceError> {
        (**self).find_matches(query, params)
    }
}

impl<S: CandidateSource + ?Sized> CandidateSource for &S {
    fn find_matches(
        &self,
        query: &EmbeddingVector,
        params: &MatchParams,
    ) -> Result<Vec<RawCandidate>, SourceError> {
        (**self).find_matches(query, params)
    }
}
