use std::fmt::Write;

use diagnosis::DiagnosisResult;

/// Render a result as the plain-text report shown to growers.
///
/// ```text
/// Primary Diagnosis: Early Blight
/// Confidence: 0.91
/// Description: ...
/// Symptoms: ...
/// Recommendation: ...
///
/// Alternative Diagnoses:
/// - Septoria Leaf Spot (Confidence: 0.80)
/// ```
pub fn render_summary(result: &DiagnosisResult) -> String {
    let diagnosis = match (&result.diagnosis, result.success) {
        (Some(diagnosis), true) => diagnosis,
        _ => {
            let error = result.error.as_deref().unwrap_or("unknown error");
            return format!("Diagnosis failed: {error}\n");
        }
    };

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Primary Diagnosis: {}", diagnosis.primary_disease);
    let _ = writeln!(out, "Confidence: {:.2}", diagnosis.confidence);
    let _ = writeln!(out, "Description: {}", diagnosis.description);
    let _ = writeln!(out, "Symptoms: {}", diagnosis.symptoms);
    let _ = writeln!(out, "Recommendation: {}", diagnosis.recommendation);
    let _ = writeln!(out);
    let _ = writeln!(out, "Alternative Diagnoses:");
    for alt in result.alternative_diagnoses.iter().flatten() {
        let _ = writeln!(
            out,
            "- {} (Confidence: {:.2})",
            alt.disease_name, alt.confidence
        );
    }
    out
}
