//! Configuration types for symptom normalization.
//!
//! [`NormalizerConfig`] controls how free-text symptom descriptions are
//! turned into token sets. The defaults reproduce the behavior the overlap
//! scores were calibrated against, so changing them changes every
//! `overlap_score` the engine reports.
//!
//! # Examples
//!
//! ```rust
//! use symptoms::NormalizerConfig;
//!
//! let config = NormalizerConfig::default();
//! assert!(config.lowercase);
//! assert!(config.strip_punctuation);
//! assert!(config.stop_words.iter().any(|w| w == "with"));
//! ```
//!
//! ## Custom stop words
//!
//! ```rust
//! use symptoms::NormalizerConfig;
//!
//! let config = NormalizerConfig {
//!     stop_words: vec!["leaves".into(), "plant".into()],
//!     ..Default::default()
//! };
//! config.validate().expect("valid config");
//! ```

use serde::{Deserialize, Serialize};
use unicode_categories::UnicodeCategories;

use crate::error::SymptomError;

/// Stop words removed from every symptom description by default.
pub const DEFAULT_STOP_WORDS: [&str; 11] = [
    "and", "or", "the", "in", "on", "at", "to", "of", "with", "may", "can",
];

/// Configuration for the symptom normalizer.
///
/// Cheap to clone and serde-friendly so it can be embedded in the engine
/// configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Behavior version. Version 0 is reserved and rejected.
    #[serde(default = "NormalizerConfig::default_version")]
    pub version: u32,

    /// Apply Unicode NFKC normalization before any other transform.
    #[serde(default = "NormalizerConfig::default_true")]
    pub normalize_unicode: bool,

    /// Apply locale-free Unicode lowercasing.
    #[serde(default = "NormalizerConfig::default_true")]
    pub lowercase: bool,

    /// Treat punctuation as a token delimiter and drop it.
    #[serde(default = "NormalizerConfig::default_true")]
    pub strip_punctuation: bool,

    /// Tokens removed after tokenization. Each entry must be a single word,
    /// and may only contain punctuation when `strip_punctuation` is off.
    #[serde(default = "NormalizerConfig::default_stop_words")]
    pub stop_words: Vec<String>,
}

impl NormalizerConfig {
    pub(crate) fn default_version() -> u32 {
        1
    }

    pub(crate) fn default_true() -> bool {
        true
    }

    pub(crate) fn default_stop_words() -> Vec<String> {
        DEFAULT_STOP_WORDS.iter().map(|w| (*w).to_string()).collect()
    }

    /// Validate the configuration before building a normalizer.
    pub fn validate(&self) -> Result<(), SymptomError> {
        if self.version == 0 {
            return Err(SymptomError::InvalidConfig(
                "normalizer version must be >= 1".into(),
            ));
        }
        for word in &self.stop_words {
            if word.trim().is_empty() {
                return Err(SymptomError::InvalidConfig(
                    "stop words must not be empty".into(),
                ));
            }
            if word.chars().any(char::is_whitespace) {
                return Err(SymptomError::InvalidConfig(format!(
                    "stop word '{word}' must be a single token"
                )));
            }
            if self.strip_punctuation && word.chars().any(|ch| ch.is_punctuation()) {
                return Err(SymptomError::InvalidConfig(format!(
                    "stop word '{word}' contains punctuation, which is stripped from symptom text"
                )));
            }
        }
        Ok(())
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            normalize_unicode: true,
            lowercase: true,
            strip_punctuation: true,
            stop_words: Self::default_stop_words(),
        }
    }
}
