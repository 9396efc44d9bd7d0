//! End-to-end diagnosis scenarios over the public API

use std::sync::Arc;

use agroverse::{
    CandidateMatch, ConfidenceLevel, DiagnosisComposer, DiagnosisResult, FixedClock,
    SeasonalPattern, SeasonalTable,
};

const EPS: f64 = 1e-9;

fn candidate(name: &str, similarity: f64, symptoms: &str) -> CandidateMatch {
    CandidateMatch::new(name, name, similarity)
        .with_description(format!("{name} description"))
        .with_symptoms(symptoms)
        .with_recommendation(format!("{name} treatment"))
}

fn month(m: u32) -> FixedClock {
    FixedClock::for_month(2024, m).expect("valid month")
}

#[test]
fn scenario_a_two_candidates() {
    let candidates = vec![
        candidate("DiseaseA", 0.90, "yellow leaves, brown spots"),
        candidate("DiseaseB", 0.75, "yellow spots, wilting"),
    ];
    let result = DiagnosisComposer::default().compose(&candidates, 5, &month(3));

    assert!(result.success);
    let diagnosis = result.diagnosis.as_ref().expect("diagnosis");
    assert_eq!(diagnosis.primary_disease, "DiseaseA");
    assert_eq!(diagnosis.description, "DiseaseA description");
    assert_eq!(diagnosis.recommendation, "DiseaseA treatment");

    let metrics = &diagnosis.confidence_metrics;
    assert!((metrics.relative_confidence - 1.2).abs() < EPS);
    assert!((metrics.confidence_margin - 0.15).abs() < EPS);
    assert_eq!(metrics.symptom_overlap.len(), 1);
    assert_eq!(metrics.symptom_overlap[0].disease, "DiseaseB");
    assert!((metrics.symptom_overlap[0].overlap_score - 0.4).abs() < EPS);

    let alternatives = result.alternative_diagnoses.expect("alternatives");
    assert_eq!(alternatives.len(), 1);
    assert_eq!(alternatives[0].disease_name, "DiseaseB");
    assert_eq!(alternatives[0].description, "DiseaseB description");
}

#[test]
fn scenario_b_single_candidate() {
    let result =
        DiagnosisComposer::default().compose(&[candidate("DiseaseC", 0.95, "")], 5, &month(3));

    assert!(result.success);
    assert_eq!(result.alternative_diagnoses, Some(Vec::new()));
    let metrics = result.diagnosis.expect("diagnosis").confidence_metrics;
    assert_eq!(metrics.diagnosis_clarity, 1.0);
    assert_eq!(metrics.confidence_margin, 0.0);
    assert_eq!(metrics.relative_confidence, 0.95);
    assert!(metrics.symptom_overlap.is_empty());
}

#[test]
fn scenario_c_seasonal_peak_and_off_season() {
    let mut table = SeasonalTable::new();
    table
        .insert("DiseaseA", SeasonalPattern::new(&[6, 7, 8], &[]))
        .expect("pattern");
    let composer = DiagnosisComposer::default().with_seasonal_table(Arc::new(table));
    let candidates = [candidate("DiseaseA", 0.9, "")];

    let july = composer.try_compose(&candidates, 5, &month(7)).expect("july");
    assert_eq!(july.diagnosis.confidence_metrics.seasonal_relevance, 1.0);

    let january = composer.try_compose(&candidates, 5, &month(1)).expect("january");
    assert_eq!(january.diagnosis.confidence_metrics.seasonal_relevance, 0.3);
}

#[test]
fn scenario_d_empty_list() {
    let result = DiagnosisComposer::default().compose(&[], 5, &month(7));
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"success":false,"error":"no match found"}"#
    );
}

#[test]
fn builtin_seasons_drive_relevance() {
    let composer = DiagnosisComposer::default();
    let cases = [
        ("Bacterial Spot", 5, 0.7),
        ("Early Blight", 8, 1.0),
        ("Late Blight", 10, 0.7),
        ("Leaf Mold", 3, 0.3),
        ("Septoria Leaf Spot", 7, 1.0),
        ("Target Spot", 7, 0.3),
    ];
    for (disease, m, expected) in cases {
        let report = composer
            .try_compose(&[candidate(disease, 0.9, "")], 5, &month(m))
            .expect("compose");
        assert_eq!(
            report.diagnosis.confidence_metrics.seasonal_relevance, expected,
            "{disease} in month {m}"
        );
    }
}

#[test]
fn wire_format_field_order() {
    let candidates = vec![
        candidate("DiseaseA", 0.5, "spots"),
        candidate("DiseaseB", 0.25, "spots"),
    ];
    let result = DiagnosisComposer::default().compose(&candidates, 5, &month(1));
    let json = serde_json::to_string(&result).unwrap();
    assert_eq!(
        json,
        concat!(
            r#"{"success":true,"diagnosis":{"primary_disease":"DiseaseA","confidence":0.5,"#,
            r#""description":"DiseaseA description","symptoms":"spots","#,
            r#""recommendation":"DiseaseA treatment","confidence_metrics":{"#,
            r#""relative_confidence":2.0,"confidence_margin":0.25,"diagnosis_clarity":0.5,"#,
            r#""symptom_overlap":[{"disease":"DiseaseB","overlap_score":1.0}],"#,
            r#""seasonal_relevance":0.3}},"#,
            r#""alternative_diagnoses":[{"disease_name":"DiseaseB","confidence":0.25,"#,
            r#""description":"DiseaseB description"}]}"#
        )
    );

    let back: DiagnosisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn ambiguous_candidates_are_low_confidence() {
    let candidates = vec![
        candidate("Early Blight", 0.72, "dark brown spots, yellow halo"),
        candidate("Septoria Leaf Spot", 0.71, "dark brown spots, yellow halo"),
        candidate("Target Spot", 0.71, "brown spots"),
    ];
    let report = DiagnosisComposer::default()
        .try_compose(&candidates, 5, &month(1))
        .expect("compose");
    assert_eq!(report.level(), ConfidenceLevel::Low);
    assert_eq!(report.assessment.levels().margin, ConfidenceLevel::Low);
}
