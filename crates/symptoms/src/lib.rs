//! Symptom normalization layer.
//!
//! Turns free-text symptom descriptions into comparable token sets so the
//! confidence engine can measure how much two candidate diseases look alike
//! on paper.
//!
//! ## What we do
//!
//! - Unicode NFKC normalization (configurable)
//! - Locale-free lowercasing
//! - Punctuation acts as a delimiter and is dropped
//! - Whitespace tokenization
//! - Stop-word removal (`and, or, the, in, on, at, to, of, with, may, can`)
//! - Duplicates collapse into a [`SymptomSet`]
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Empty or missing input is
//! the empty set, never an error.
//!
//! ```rust
//! use symptoms::normalize;
//!
//! let a = normalize("yellow leaves, brown spots");
//! let b = normalize("yellow spots, wilting");
//! assert!((a.jaccard(&b) - 0.4).abs() < 1e-12);
//! ```

mod config;
mod error;
mod normalize;
mod set;

pub use crate::config::{NormalizerConfig, DEFAULT_STOP_WORDS};
pub use crate::error::SymptomError;
pub use crate::normalize::{normalize, normalize_symptoms, SymptomNormalizer};
pub use crate::set::SymptomSet;
