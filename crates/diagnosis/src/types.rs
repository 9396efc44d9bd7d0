use confidence::{ConfidenceAssessment, ConfidenceLevel, ConfidenceMetrics, ScoredCandidate};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::error::DiagnosisError;

/// One row exactly as the similarity index returns it.
///
/// Every field is optional; unknown fields (such as `image_url`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCandidate {
    /// String or number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl RawCandidate {
    /// Convert into a [`CandidateMatch`], repairing missing or invalid fields.
    ///
    /// Missing text becomes the empty string, a missing or non-finite
    /// similarity becomes `0`, and a missing id becomes `candidate-<position>`.
    /// Each repair is logged at `warn` and returned alongside the candidate.
    pub fn into_candidate(self, position: usize) -> (CandidateMatch, Vec<DiagnosisError>) {
        let mut repairs = Vec::new();
        let mut repaired = |field: &'static str| {
            warn!(position, field, "candidate_field_repaired");
            repairs.push(DiagnosisError::MalformedCandidate { position, field });
        };

        let disease_id = match self.id {
            Some(JsonValue::String(id)) if !id.trim().is_empty() => id,
            Some(JsonValue::Number(id)) => id.to_string(),
            _ => {
                repaired("id");
                format!("candidate-{position}")
            }
        };
        let mut text = |value: Option<String>, field: &'static str| {
            value.unwrap_or_else(|| {
                repaired(field);
                String::new()
            })
        };
        let disease_name = text(self.disease_name, "disease_name");
        let description = text(self.description, "description");
        let symptoms = text(self.symptoms, "symptoms");
        let recommendation = text(self.recommendation, "recommendation");
        let similarity = match self.similarity {
            Some(s) if s.is_finite() => s,
            _ => {
                repaired("similarity");
                0.0
            }
        };

        let candidate = CandidateMatch {
            disease_id,
            disease_name,
            description,
            symptoms,
            recommendation,
            similarity: clamp_similarity(similarity),
        };
        (candidate, repairs)
    }
}

/// Repair a full result set, keeping index order.
pub fn into_candidates(rows: Vec<RawCandidate>) -> Vec<CandidateMatch> {
    rows.into_iter()
        .enumerate()
        .map(|(position, row)| row.into_candidate(position).0)
        .collect()
}

/// A disease record retrieved by similarity search, with all fields present.
///
/// Deserialization clamps `similarity` the same way [`CandidateMatch::new`] does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CandidateFields")]
pub struct CandidateMatch {
    pub disease_id: String,
    pub disease_name: String,
    pub description: String,
    pub symptoms: String,
    pub recommendation: String,
    /// In `[0, 1]` unless set directly; scoring clamps it either way.
    pub similarity: f64,
}

impl CandidateMatch {
    pub fn new(
        disease_id: impl Into<String>,
        disease_name: impl Into<String>,
        similarity: f64,
    ) -> Self {
        Self {
            disease_id: disease_id.into(),
            disease_name: disease_name.into(),
            description: String::new(),
            symptoms: String::new(),
            recommendation: String::new(),
            similarity: clamp_similarity(similarity),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_symptoms(mut self, symptoms: impl Into<String>) -> Self {
        self.symptoms = symptoms.into();
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = recommendation.into();
        self
    }
}

#[derive(Deserialize)]
struct CandidateFields {
    disease_id: String,
    disease_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    symptoms: String,
    #[serde(default)]
    recommendation: String,
    similarity: f64,
}

impl From<CandidateFields> for CandidateMatch {
    fn from(fields: CandidateFields) -> Self {
        Self {
            disease_id: fields.disease_id,
            disease_name: fields.disease_name,
            description: fields.description,
            symptoms: fields.symptoms,
            recommendation: fields.recommendation,
            similarity: clamp_similarity(fields.similarity),
        }
    }
}

impl ScoredCandidate for CandidateMatch {
    fn disease_name(&self) -> &str {
        &self.disease_name
    }

    fn similarity(&self) -> f64 {
        self.similarity
    }

    fn symptoms(&self) -> &str {
        &self.symptoms
    }
}

fn clamp_similarity(similarity: f64) -> f64 {
    if similarity.is_finite() {
        similarity.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// The primary diagnosis as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub primary_disease: String,
    /// Similarity of the primary candidate.
    pub confidence: f64,
    pub description: String,
    pub symptoms: String,
    pub recommendation: String,
    pub confidence_metrics: ConfidenceMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeDiagnosis {
    pub disease_name: String,
    pub confidence: f64,
    pub description: String,
}

impl From<&CandidateMatch> for AlternativeDiagnosis {
    fn from(candidate: &CandidateMatch) -> Self {
        Self {
            disease_name: candidate.disease_name.clone(),
            confidence: clamp_similarity(candidate.similarity),
            description: candidate.description.clone(),
        }
    }
}

/// Wire-level outcome of one diagnosis request.
///
/// A failure carries only `success: false` and `error`; absent fields are
/// omitted rather than serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Diagnosis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_diagnoses: Option<Vec<AlternativeDiagnosis>>,
}

impl DiagnosisResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            diagnosis: None,
            alternative_diagnoses: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl From<DiagnosisReport> for DiagnosisResult {
    fn from(report: DiagnosisReport) -> Self {
        Self {
            success: true,
            error: None,
            diagnosis: Some(report.diagnosis),
            alternative_diagnoses: Some(report.alternatives),
        }
    }
}

impl From<DiagnosisError> for DiagnosisResult {
    fn from(err: DiagnosisError) -> Self {
        Self::failure(err.to_string())
    }
}

impl From<Result<DiagnosisReport, DiagnosisError>> for DiagnosisResult {
    fn from(outcome: Result<DiagnosisReport, DiagnosisError>) -> Self {
        match outcome {
            Ok(report) => report.into(),
            Err(err) => err.into(),
        }
    }
}

/// A successful composition, including the signals that are not on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub diagnosis: Diagnosis,
    pub alternatives: Vec<AlternativeDiagnosis>,
    pub assessment: ConfidenceAssessment,
}

impl DiagnosisReport {
    /// Level of the combined confidence score.
    pub fn level(&self) -> ConfidenceLevel {
        self.assessment.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_row_ignores_unknown_fields() {
        let row: RawCandidate = serde_json::from_value(json!({
            "id": 17,
            "disease_name": "Leaf Mold",
            "description": "Fungal disease",
            "symptoms": "pale green spots",
            "recommendation": "Improve ventilation",
            "similarity": 0.83,
            "image_url": "https://example.com/leaf.jpg"
        }))
        .unwrap();
        let (candidate, repairs) = row.into_candidate(0);
        assert!(repairs.is_empty());
        assert_eq!(candidate.disease_id, "17");
        assert_eq!(candidate.disease_name, "Leaf Mold");
        assert_eq!(candidate.similarity, 0.83);
    }

    #[test]
    fn missing_fields_are_repaired_and_reported() {
        let row: RawCandidate =
            serde_json::from_value(json!({"disease_name": "Mystery"})).unwrap();
        let (candidate, repairs) = row.into_candidate(3);

        assert_eq!(candidate.disease_id, "candidate-3");
        assert_eq!(candidate.symptoms, "");
        assert_eq!(candidate.similarity, 0.0);
        let fields: Vec<&str> = repairs
            .iter()
            .map(|r| match r {
                DiagnosisError::MalformedCandidate { field, .. } => *field,
                other => panic!("unexpected repair: {other}"),
            })
            .collect();
        assert_eq!(
            fields,
            ["id", "description", "symptoms", "recommendation", "similarity"]
        );
    }

    #[test]
    fn string_ids_pass_through() {
        let row = RawCandidate {
            id: Some(json!("img-0042")),
            ..Default::default()
        };
        assert_eq!(row.into_candidate(0).0.disease_id, "img-0042");
    }

    #[test]
    fn similarity_is_clamped_at_the_boundary() {
        let row = RawCandidate {
            similarity: Some(1.3),
            ..Default::default()
        };
        assert_eq!(row.into_candidate(0).0.similarity, 1.0);
        assert_eq!(CandidateMatch::new("x", "x", -0.2).similarity, 0.0);
        assert_eq!(CandidateMatch::new("x", "x", f64::NAN).similarity, 0.0);
    }

    #[test]
    fn null_similarity_is_a_repair() {
        let row: RawCandidate =
            serde_json::from_value(json!({"id": "a", "similarity": null})).unwrap();
        let (_, repairs) = row.into_candidate(1);
        assert!(repairs.contains(&DiagnosisError::MalformedCandidate {
            position: 1,
            field: "similarity"
        }));
    }

    #[test]
    fn deserialized_candidates_are_clamped() {
        let candidate: CandidateMatch = serde_json::from_value(json!({
            "disease_id": "7",
            "disease_name": "Early Blight",
            "similarity": 1.4
        }))
        .unwrap();
        assert_eq!(candidate.similarity, 1.0);
        assert_eq!(candidate.symptoms, "");

        let round_trip: CandidateMatch =
            serde_json::from_str(&serde_json::to_string(&candidate).unwrap()).unwrap();
        assert_eq!(round_trip, candidate);
    }

    #[test]
    fn alternatives_report_bounded_confidence() {
        let mut candidate = CandidateMatch::new("x", "Leaf Mold", 0.5);
        candidate.similarity = 1.2;
        assert_eq!(AlternativeDiagnosis::from(&candidate).confidence, 1.0);
        candidate.similarity = f64::NAN;
        assert_eq!(AlternativeDiagnosis::from(&candidate).confidence, 0.0);
    }

    #[test]
    fn failure_serializes_only_error() {
        let result: DiagnosisResult = DiagnosisError::NoCandidates.into();
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"success":false,"error":"no match found"}"#
        );
    }

    #[test]
    fn into_candidates_preserves_order() {
        let rows = vec![
            RawCandidate {
                disease_name: Some("first".into()),
                ..Default::default()
            },
            RawCandidate {
                disease_name: Some("second".into()),
                ..Default::default()
            },
        ];
        let candidates = into_candidates(rows);
        assert_eq!(candidates[0].disease_name, "first");
        assert_eq!(candidates[1].disease_id, "candidate-1");
    }
}
