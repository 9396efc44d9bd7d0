use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SeasonalError;

/// Relevance when the month is one of the disease's peak months.
pub const PEAK_RELEVANCE: f64 = 1.0;
/// Relevance when the month is one of the disease's moderate months.
pub const MODERATE_RELEVANCE: f64 = 0.7;
/// Relevance for a known disease outside its season.
pub const OFF_SEASON_RELEVANCE: f64 = 0.3;
/// Relevance for a disease with no seasonal pattern on record.
pub const UNKNOWN_DISEASE_RELEVANCE: f64 = 0.3;

/// Months in which a disease is most and moderately prevalent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalPattern {
    #[serde(default)]
    pub peak_months: Vec<u32>,
    #[serde(default)]
    pub moderate_months: Vec<u32>,
}

impl SeasonalPattern {
    pub fn new(peak_months: &[u32], moderate_months: &[u32]) -> Self {
        Self {
            peak_months: peak_months.to_vec(),
            moderate_months: moderate_months.to_vec(),
        }
    }

    /// Score `month` against this pattern. Peak wins over moderate.
    pub fn relevance(&self, month: u32) -> f64 {
        if self.peak_months.contains(&month) {
            PEAK_RELEVANCE
        } else if self.moderate_months.contains(&month) {
            MODERATE_RELEVANCE
        } else {
            OFF_SEASON_RELEVANCE
        }
    }

    fn validate(&self, disease: &str) -> Result<(), SeasonalError> {
        for &month in self.peak_months.iter().chain(self.moderate_months.iter()) {
            if !(1..=12).contains(&month) {
                return Err(SeasonalError::InvalidMonth {
                    disease: disease.to_string(),
                    month,
                });
            }
        }
        Ok(())
    }
}

/// Read-only mapping from disease name to seasonal pattern.
///
/// Keys are stored trimmed and lower-cased, and lookups normalize the same
/// way, so `"Early Blight"` and `"early blight"` hit the same entry. Serde
/// deserialization goes through [`insert`](Self::insert) as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, SeasonalPattern>",
    into = "BTreeMap<String, SeasonalPattern>"
)]
pub struct SeasonalTable {
    patterns: BTreeMap<String, SeasonalPattern>,
}

static BUILTIN: Lazy<SeasonalTable> = Lazy::new(|| {
    let entries: [(&str, &[u32], &[u32]); 5] = [
        ("bacterial spot", &[6, 7, 8], &[5, 9]),
        ("early blight", &[7, 8], &[6, 9]),
        ("late blight", &[8, 9], &[7, 10]),
        ("leaf mold", &[6, 7, 8, 9], &[5, 10]),
        ("septoria leaf spot", &[7, 8], &[6, 9]),
    ];
    let patterns = entries
        .iter()
        .map(|(name, peak, moderate)| {
            (
                normalize_key(name),
                SeasonalPattern::new(peak, moderate),
            )
        })
        .collect();
    SeasonalTable { patterns }
});

impl SeasonalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide default table, initialized once and never mutated.
    pub fn builtin() -> &'static SeasonalTable {
        &BUILTIN
    }

    /// Parse a JSON object keyed by disease name.
    ///
    /// ```rust
    /// use seasonal::SeasonalTable;
    ///
    /// let table = SeasonalTable::from_json_str(
    ///     r#"{"Powdery Mildew": {"peak_months": [6, 7], "moderate_months": [5]}}"#,
    /// ).unwrap();
    /// assert_eq!(table.relevance("powdery mildew", 7), 1.0);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, SeasonalError> {
        let raw: BTreeMap<String, SeasonalPattern> = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SeasonalError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let table = Self::from_json_str(&content)?;
        debug!(path = %path.display(), diseases = table.len(), "seasonal_table_loaded");
        Ok(table)
    }

    /// Add or replace the pattern for `disease`.
    pub fn insert(
        &mut self,
        disease: impl AsRef<str>,
        pattern: SeasonalPattern,
    ) -> Result<(), SeasonalError> {
        let key = normalize_key(disease.as_ref());
        if key.is_empty() {
            return Err(SeasonalError::EmptyDisease);
        }
        pattern.validate(&key)?;
        self.patterns.insert(key, pattern);
        Ok(())
    }

    pub fn get(&self, disease: &str) -> Option<&SeasonalPattern> {
        self.patterns.get(&normalize_key(disease))
    }

    /// Relevance of `disease` in `month`; unknown diseases score
    /// [`UNKNOWN_DISEASE_RELEVANCE`].
    pub fn relevance(&self, disease: &str, month: u32) -> f64 {
        self.get(disease)
            .map(|pattern| pattern.relevance(month))
            .unwrap_or(UNKNOWN_DISEASE_RELEVANCE)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn diseases(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }
}

impl TryFrom<BTreeMap<String, SeasonalPattern>> for SeasonalTable {
    type Error = SeasonalError;

    fn try_from(raw: BTreeMap<String, SeasonalPattern>) -> Result<Self, Self::Error> {
        let mut table = Self::new();
        for (disease, pattern) in raw {
            table.insert(disease, pattern)?;
        }
        Ok(table)
    }
}

impl From<SeasonalTable> for BTreeMap<String, SeasonalPattern> {
    fn from(table: SeasonalTable) -> Self {
        table.patterns
    }
}

fn normalize_key(disease: &str) -> String {
    disease.trim().to_lowercase()
}
