//! Individual confidence signals over a ranked candidate list.
//!
//! Every function takes the list as ranked by the similarity index
//! (index 0 is the primary diagnosis) and is total: degenerate inputs map to
//! documented values instead of errors.
//!
//! | Signal | Formula | Degenerate cases |
//! |--------|---------|------------------|
//! | absolute | `c0` | empty list → `0` |
//! | relative | `c0 / c1` | no secondary, or `c1 = 0` → `c0` |
//! | margin | `c0 - c1` | no secondary → `0` |
//! | clarity | `(c0 - mean(c1..)) / c0` | no alternatives → `1`, `c0 = 0` → `0` |
//! | symptom overlap | Jaccard(primary, alt) | empty union → `0` |
//! | seasonal | table lookup for the current month | unknown disease → `0.3` |
//!
//! All signals except `relative` are clamped into `[0, 1]`.

use chrono::{Datelike, NaiveDate};
use seasonal::SeasonalTable;
use serde::{Deserialize, Serialize};
use symptoms::SymptomNormalizer;

use crate::candidate::{bounded, bounded_similarity, ScoredCandidate};

/// Symptom overlap between the primary diagnosis and one alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomOverlap {
    pub disease: String,
    pub overlap_score: f64,
}

/// Confidence signals reported alongside a diagnosis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceMetrics {
    /// `c0 / c1`, unbounded above.
    pub relative_confidence: f64,
    pub confidence_margin: f64,
    pub diagnosis_clarity: f64,
    /// One entry per alternative, in ranking order.
    pub symptom_overlap: Vec<SymptomOverlap>,
    pub seasonal_relevance: f64,
}

/// Inputs shared by every metric of one request.
#[derive(Debug, Clone, Copy)]
pub struct MetricContext<'a> {
    pub today: NaiveDate,
    pub seasonal: &'a SeasonalTable,
    pub normalizer: &'a SymptomNormalizer,
}

impl<'a> MetricContext<'a> {
    pub fn new(
        today: NaiveDate,
        seasonal: &'a SeasonalTable,
        normalizer: &'a SymptomNormalizer,
    ) -> Self {
        Self {
            today,
            seasonal,
            normalizer,
        }
    }
}

pub fn absolute_confidence<C: ScoredCandidate>(candidates: &[C]) -> f64 {
    candidates.first().map(bounded_similarity).unwrap_or(0.0)
}

/// Ratio of the primary to the secondary similarity.
///
/// With no secondary (or a secondary at zero similarity) the implicit
/// secondary has zero confidence and the ratio falls back to `c0`, keeping
/// the value finite.
pub fn relative_confidence<C: ScoredCandidate>(candidates: &[C]) -> f64 {
    let primary = absolute_confidence(candidates);
    match candidates.get(1).map(bounded_similarity) {
        Some(secondary) if secondary > 0.0 => primary / secondary,
        _ => primary,
    }
}

/// `1 - c1 / c0` in `[0, 1]`: `1` with no secondary, `0` when `c0 = 0`.
pub fn relative_confidence_normalized<C: ScoredCandidate>(candidates: &[C]) -> f64 {
    let primary = absolute_confidence(candidates);
    if primary <= 0.0 {
        return 0.0;
    }
    let secondary = candidates.get(1).map(bounded_similarity).unwrap_or(0.0);
    bounded(1.0 - secondary / primary)
}

pub fn confidence_margin<C: ScoredCandidate>(candidates: &[C]) -> f64 {
    let primary = absolute_confidence(candidates);
    candidates
        .get(1)
        .map(|secondary| bounded(primary - bounded_similarity(secondary)))
        .unwrap_or(0.0)
}

pub fn diagnosis_clarity<C: ScoredCandidate>(candidates: &[C]) -> f64 {
    let Some((primary, alternatives)) = candidates.split_first() else {
        return 0.0;
    };
    if alternatives.is_empty() {
        return 1.0;
    }
    let primary = bounded_similarity(primary);
    if primary <= 0.0 {
        return 0.0;
    }
    let sum: f64 = alternatives.iter().map(bounded_similarity).sum();
    let mean = sum / alternatives.len() as f64;
    bounded((primary - mean) / primary)
}

pub fn symptom_overlaps<C: ScoredCandidate>(
    candidates: &[C],
    normalizer: &SymptomNormalizer,
) -> Vec<SymptomOverlap> {
    let Some((primary, alternatives)) = candidates.split_first() else {
        return Vec::new();
    };
    let primary_set = normalizer.normalize(primary.symptoms());
    alternatives
        .iter()
        .map(|alt| {
            let alt_set = normalizer.normalize(alt.symptoms());
            SymptomOverlap {
                disease: alt.disease_name().to_string(),
                overlap_score: bounded(primary_set.jaccard(&alt_set)),
            }
        })
        .collect()
}

/// Seasonal relevance of the primary diagnosis for the month of `today`.
pub fn seasonal_relevance<C: ScoredCandidate>(
    candidates: &[C],
    today: NaiveDate,
    table: &SeasonalTable,
) -> f64 {
    match candidates.first() {
        Some(primary) => bounded(table.relevance(primary.disease_name(), today.month())),
        None => seasonal::UNKNOWN_DISEASE_RELEVANCE,
    }
}

/// Compute every wire-level signal for a ranked candidate list.
///
/// An empty list yields all-zero metrics; callers are expected to reject it
/// before getting here.
pub fn calculate_metrics<C: ScoredCandidate>(
    candidates: &[C],
    ctx: &MetricContext<'_>,
) -> ConfidenceMetrics {
    if candidates.is_empty() {
        return ConfidenceMetrics::default();
    }
    ConfidenceMetrics {
        relative_confidence: relative_confidence(candidates),
        confidence_margin: confidence_margin(candidates),
        diagnosis_clarity: diagnosis_clarity(candidates),
        symptom_overlap: symptom_overlaps(candidates, ctx.normalizer),
        seasonal_relevance: seasonal_relevance(candidates, ctx.today, ctx.seasonal),
    }
}

impl ConfidenceMetrics {
    /// Highest overlap with any alternative, `0` when there are none.
    pub fn max_symptom_overlap(&self) -> f64 {
        self.symptom_overlap
            .iter()
            .map(|o| o.overlap_score)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::fixtures::{candidate, scores};
    use seasonal::SeasonalPattern;

    const EPS: f64 = 1e-9;

    fn july() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    #[test]
    fn relative_confidence_is_ratio_of_top_two() {
        let c = scores(&[0.9, 0.75, 0.72]);
        assert!((relative_confidence(&c) - 1.2).abs() < EPS);
    }

    #[test]
    fn relative_confidence_single_candidate_is_primary() {
        let c = scores(&[0.95]);
        assert_eq!(relative_confidence(&c), 0.95);
    }

    #[test]
    fn relative_confidence_zero_secondary_stays_finite() {
        let c = scores(&[0.8, 0.0]);
        assert_eq!(relative_confidence(&c), 0.8);
    }

    #[test]
    fn relative_normalized_bounds() {
        assert_eq!(relative_confidence_normalized(&scores(&[0.9])), 1.0);
        assert_eq!(relative_confidence_normalized(&scores(&[0.0, 0.0])), 0.0);
        assert_eq!(relative_confidence_normalized(&scores(&[0.8, 0.8])), 0.0);
        let half = relative_confidence_normalized(&scores(&[0.8, 0.4]));
        assert!((half - 0.5).abs() < EPS);
    }

    #[test]
    fn margin_is_gap_between_top_two() {
        let c = scores(&[0.9, 0.75]);
        assert!((confidence_margin(&c) - 0.15).abs() < EPS);
        assert_eq!(confidence_margin(&scores(&[0.9])), 0.0);
    }

    #[test]
    fn margin_never_negative_for_misordered_input() {
        let c = scores(&[0.7, 0.9]);
        assert_eq!(confidence_margin(&c), 0.0);
    }

    #[test]
    fn clarity_uses_mean_of_alternatives() {
        let c = scores(&[0.9, 0.8, 0.7]);
        // mean(alternatives) = 0.75 → (0.9 - 0.75) / 0.9
        assert!((diagnosis_clarity(&c) - (0.15 / 0.9)).abs() < EPS);
    }

    #[test]
    fn clarity_degenerate_cases() {
        assert_eq!(diagnosis_clarity(&scores(&[0.4])), 1.0);
        assert_eq!(diagnosis_clarity(&scores(&[0.0, 0.0])), 0.0);
        assert_eq!(diagnosis_clarity::<crate::candidate::fixtures::Candidate>(&[]), 0.0);
    }

    #[test]
    fn symptom_overlap_per_alternative_in_order() {
        let c = vec![
            candidate("DiseaseA", 0.9, "yellow leaves, brown spots"),
            candidate("DiseaseB", 0.75, "yellow spots, wilting"),
            candidate("DiseaseC", 0.71, ""),
        ];
        let overlaps = symptom_overlaps(&c, &SymptomNormalizer::default());
        assert_eq!(overlaps.len(), 2);
        assert_eq!(overlaps[0].disease, "DiseaseB");
        assert!((overlaps[0].overlap_score - 0.4).abs() < EPS);
        assert_eq!(overlaps[1].disease, "DiseaseC");
        assert_eq!(overlaps[1].overlap_score, 0.0);
    }

    #[test]
    fn symptom_overlap_both_empty_is_zero() {
        let c = vec![candidate("A", 0.9, ""), candidate("B", 0.8, "")];
        let overlaps = symptom_overlaps(&c, &SymptomNormalizer::default());
        assert_eq!(overlaps[0].overlap_score, 0.0);
    }

    #[test]
    fn symptom_overlap_identical_text_is_one() {
        let text = "Small, circular spots with gray centers";
        let c = vec![candidate("A", 0.9, text), candidate("B", 0.8, text)];
        let overlaps = symptom_overlaps(&c, &SymptomNormalizer::default());
        assert_eq!(overlaps[0].overlap_score, 1.0);
    }

    #[test]
    fn seasonal_relevance_follows_clock_month() {
        let mut table = SeasonalTable::new();
        table
            .insert("DiseaseA", SeasonalPattern::new(&[6, 7, 8], &[]))
            .unwrap();
        let c = vec![candidate("DiseaseA", 0.9, "")];
        assert_eq!(seasonal_relevance(&c, july(), &table), 1.0);
        let january = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(seasonal_relevance(&c, january, &table), 0.3);
    }

    #[test]
    fn calculate_metrics_single_candidate() {
        let normalizer = SymptomNormalizer::default();
        let ctx = MetricContext::new(july(), SeasonalTable::builtin(), &normalizer);
        let c = vec![candidate("DiseaseC", 0.95, "")];
        let m = calculate_metrics(&c, &ctx);
        assert_eq!(m.relative_confidence, 0.95);
        assert_eq!(m.confidence_margin, 0.0);
        assert_eq!(m.diagnosis_clarity, 1.0);
        assert!(m.symptom_overlap.is_empty());
        assert_eq!(m.seasonal_relevance, 0.3);
    }

    #[test]
    fn calculate_metrics_empty_is_default() {
        let normalizer = SymptomNormalizer::default();
        let ctx = MetricContext::new(july(), SeasonalTable::builtin(), &normalizer);
        let empty: Vec<crate::candidate::fixtures::Candidate> = Vec::new();
        assert_eq!(calculate_metrics(&empty, &ctx), ConfidenceMetrics::default());
    }

    #[test]
    fn out_of_range_similarities_keep_metrics_bounded() {
        let c = scores(&[1.7, -0.3, f64::NAN]);
        assert_eq!(absolute_confidence(&c), 1.0);
        assert_eq!(confidence_margin(&c), 1.0);
        assert_eq!(diagnosis_clarity(&c), 1.0);
        assert_eq!(relative_confidence(&c), 1.0);
    }

    #[test]
    fn max_overlap_of_no_alternatives_is_zero() {
        assert_eq!(ConfidenceMetrics::default().max_symptom_overlap(), 0.0);
    }

    #[test]
    fn wire_field_names() {
        let m = ConfidenceMetrics {
            relative_confidence: 1.5,
            confidence_margin: 0.25,
            diagnosis_clarity: 0.5,
            symptom_overlap: vec![SymptomOverlap {
                disease: "B".into(),
                overlap_score: 0.5,
            }],
            seasonal_relevance: 0.7,
        };
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(
            json,
            r#"{"relative_confidence":1.5,"confidence_margin":0.25,"diagnosis_clarity":0.5,"symptom_overlap":[{"disease":"B","overlap_score":0.5}],"seasonal_relevance":0.7}"#
        );
    }
}
