use chrono::NaiveDate;
use seasonal::FixedClock;

use crate::embedding::{EmbeddingVector, EMBEDDING_DIM};
use crate::source::{CandidateSource, MatchParams, SourceError};
use crate::types::{CandidateMatch, RawCandidate};

/// Fixed date so demos and tests are deterministic. July is peak season for
/// several of the builtin diseases.
pub fn demo_clock() -> FixedClock {
    let Some(date) = NaiveDate::from_ymd_opt(2025, 7, 15) else {
        panic!("invalid demo date components");
    };
    FixedClock::new(date)
}

/// Deterministic, non-zero embedding derived from `seed`.
pub fn demo_embedding(seed: u32) -> Vec<f32> {
    (0..EMBEDDING_DIM as u32)
        .map(|i| {
            let x = i.wrapping_mul(2_654_435_761).wrapping_add(seed.wrapping_mul(40_503));
            (x % 1_000) as f32 / 1_000.0 - 0.5
        })
        .collect()
}

/// Build a fully populated raw index row.
pub fn demo_row(id: u64, disease: &str, similarity: f64, symptoms: &str) -> RawCandidate {
    RawCandidate {
        id: Some(id.into()),
        disease_name: Some(disease.to_string()),
        description: Some(format!("{disease} affecting tomato foliage.")),
        symptoms: Some(symptoms.to_string()),
        recommendation: Some(format!("Remove affected leaves; treat for {disease}.")),
        similarity: Some(similarity),
    }
}

/// Build a candidate with the given symptoms and otherwise empty text.
pub fn demo_candidate(disease: &str, similarity: f64, symptoms: &str) -> CandidateMatch {
    CandidateMatch::new(disease, disease, similarity).with_symptoms(symptoms)
}

enum Entry {
    Scored(RawCandidate),
    Embedded(RawCandidate, EmbeddingVector),
}

/// In-memory [`CandidateSource`] that honours the index contract: rows with
/// `similarity > match_threshold`, descending, at most `match_count`.
///
/// Rows added with [`push_row`](Self::push_row) keep their stored similarity;
/// rows added with [`push_embedded`](Self::push_embedded) are scored by
/// cosine similarity against the query, floored at `0`.
#[derive(Default)]
pub struct StaticSource {
    entries: Vec<Entry>,
    failure: Option<SourceError>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: impl IntoIterator<Item = RawCandidate>) -> Self {
        let mut source = Self::new();
        for row in rows {
            source.push_row(row);
        }
        source
    }

    /// Source whose every lookup fails with `err`.
    pub fn failing(err: SourceError) -> Self {
        Self {
            entries: Vec::new(),
            failure: Some(err),
        }
    }

    pub fn push_row(&mut self, row: RawCandidate) {
        self.entries.push(Entry::Scored(row));
    }

    pub fn push_embedded(&mut self, row: RawCandidate, embedding: EmbeddingVector) {
        self.entries.push(Entry::Embedded(row, embedding));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CandidateSource for StaticSource {
    fn find_matches(
        &self,
        query: &EmbeddingVector,
        params: &MatchParams,
    ) -> Result<Vec<RawCandidate>, SourceError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let mut scored: Vec<(f64, RawCandidate)> = self
            .entries
            .iter()
            .map(|entry| match entry {
                Entry::Scored(row) => (row.similarity.unwrap_or(0.0), row.clone()),
                Entry::Embedded(row, embedding) => {
                    let similarity = query.cosine(embedding).max(0.0);
                    let mut row = row.clone();
                    row.similarity = Some(similarity);
                    (similarity, row)
                }
            })
            .filter(|(similarity, _)| *similarity > params.match_threshold)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(params.match_count);
        Ok(scored.into_iter().map(|(_, row)| row).collect())
    }
}
