use std::borrow::Cow;
use std::collections::HashSet;

use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::NormalizerConfig;
use crate::error::SymptomError;
use crate::set::SymptomSet;

/// Reusable normalizer holding a validated config and its prepared stop words.
///
/// Stop words are pushed through the same character pipeline as symptom
/// text, so `"WITH"` in the config still removes `"with"` from the input.
#[derive(Debug, Clone)]
pub struct SymptomNormalizer {
    cfg: NormalizerConfig,
    stop_words: HashSet<String>,
}

impl SymptomNormalizer {
    pub fn new(cfg: NormalizerConfig) -> Result<Self, SymptomError> {
        cfg.validate()?;
        let mut stop_words = HashSet::with_capacity(cfg.stop_words.len());
        for word in &cfg.stop_words {
            for token in tokens(word, &cfg) {
                stop_words.insert(token);
            }
        }
        Ok(Self { cfg, stop_words })
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.cfg
    }

    /// Normalize one symptom description into a token set.
    ///
    /// Empty input yields the empty set.
    pub fn normalize(&self, text: &str) -> SymptomSet {
        tokens(text, &self.cfg)
            .into_iter()
            .filter(|token| !self.stop_words.contains(token))
            .collect()
    }

    /// Like [`normalize`](Self::normalize), treating a missing description as empty.
    pub fn normalize_optional(&self, text: Option<&str>) -> SymptomSet {
        text.map(|t| self.normalize(t)).unwrap_or_default()
    }
}

impl Default for SymptomNormalizer {
    fn default() -> Self {
        let cfg = NormalizerConfig::default();
        let stop_words = cfg
            .stop_words
            .iter()
            .flat_map(|word| tokens(word, &cfg))
            .collect();
        Self { cfg, stop_words }
    }
}

/// Normalize `text` with an explicit configuration.
pub fn normalize_symptoms(text: &str, cfg: &NormalizerConfig) -> Result<SymptomSet, SymptomError> {
    Ok(SymptomNormalizer::new(cfg.clone())?.normalize(text))
}

/// Normalize `text` with the default configuration.
pub fn normalize(text: &str) -> SymptomSet {
    SymptomNormalizer::default().normalize(text)
}

/// Split text into normalized tokens, before stop-word removal.
fn tokens(text: &str, cfg: &NormalizerConfig) -> Vec<String> {
    let normalized: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(text.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(text)
    };

    let mut out = Vec::with_capacity((normalized.len() / 6).saturating_add(1));
    let mut current = String::new();

    // Lowercasing can expand one character into several, so work per grapheme.
    for grapheme in normalized.graphemes(true) {
        if cfg.lowercase {
            for ch in grapheme.to_lowercase().chars() {
                dispatch_char(ch, cfg, &mut current, &mut out);
            }
        } else {
            for ch in grapheme.chars() {
                dispatch_char(ch, cfg, &mut current, &mut out);
            }
        }
    }
    finalize_token(&mut current, &mut out);

    out
}

fn dispatch_char(ch: char, cfg: &NormalizerConfig, current: &mut String, out: &mut Vec<String>) {
    let is_delim = ch.is_whitespace() || (cfg.strip_punctuation && ch.is_punctuation());
    if is_delim {
        finalize_token(current, out);
    } else {
        current.push(ch);
    }
}

fn finalize_token(current: &mut String, out: &mut Vec<String>) {
    if !current.is_empty() {
        out.push(std::mem::take(current));
    }
}
