use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use confidence::{assess, MetricContext, ScoredCandidate};
use seasonal::{Clock, SeasonalTable, SystemClock};
use symptoms::SymptomNormalizer;
use tracing::{debug, info, warn, Level};

use crate::config::ComposerConfig;
use crate::embedding::EmbeddingVector;
use crate::error::DiagnosisError;
use crate::metrics::{ComposeOutcome, DiagnosisMetrics};
use crate::source::CandidateSource;
use crate::types::{
    into_candidates, AlternativeDiagnosis, CandidateMatch, Diagnosis, DiagnosisReport,
    DiagnosisResult, RawCandidate,
};

/// Turns a ranked candidate list into a scored diagnosis.
///
/// A composer holds only immutable state and can be shared across threads
/// behind an `Arc`.
#[derive(Clone)]
pub struct DiagnosisComposer {
    config: ComposerConfig,
    normalizer: SymptomNormalizer,
    seasonal: Option<Arc<SeasonalTable>>,
    metrics: Option<Arc<dyn DiagnosisMetrics>>,
}

impl DiagnosisComposer {
    /// Validate `config` and build a composer over the builtin seasonal table.
    pub fn new(config: ComposerConfig) -> Result<Self, DiagnosisError> {
        config.validate()?;
        let normalizer = SymptomNormalizer::new(config.normalizer.clone())
            .map_err(confidence::ConfidenceError::from)?;
        Ok(Self {
            config,
            normalizer,
            seasonal: None,
            metrics: None,
        })
    }

    /// Score seasonal relevance against `table` instead of the builtin one.
    pub fn with_seasonal_table(mut self, table: Arc<SeasonalTable>) -> Self {
        self.seasonal = Some(table);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn DiagnosisMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &SymptomNormalizer {
        &self.normalizer
    }

    pub fn seasonal_table(&self) -> &SeasonalTable {
        match &self.seasonal {
            Some(table) => table.as_ref(),
            None => SeasonalTable::builtin(),
        }
    }

    /// Compose a diagnosis from candidates ranked by descending similarity.
    ///
    /// Only the first `top_k` candidates are considered. The list is never
    /// re-sorted.
    pub fn try_compose(
        &self,
        candidates: &[CandidateMatch],
        top_k: usize,
        clock: &dyn Clock,
    ) -> Result<DiagnosisReport, DiagnosisError> {
        let start = Instant::now();
        let span = tracing::span!(
            Level::INFO,
            "diagnosis.compose",
            candidates = candidates.len(),
            top_k
        );
        let _guard = span.enter();

        let outcome = self.compose_inner(candidates, top_k, clock);
        let latency = start.elapsed();
        let elapsed_micros = latency.as_micros();
        match &outcome {
            Ok(report) => info!(
                primary_disease = %report.diagnosis.primary_disease,
                confidence = report.diagnosis.confidence,
                combined_confidence = report.assessment.combined_confidence,
                level = %report.level(),
                alternatives = report.alternatives.len(),
                elapsed_micros,
                "diagnosis_success"
            ),
            Err(err) => warn!(error = %err, elapsed_micros, "diagnosis_failure"),
        }

        if let Some(recorder) = &self.metrics {
            recorder.record_compose(candidates.len(), latency, ComposeOutcome::of(&outcome));
        }
        outcome
    }

    /// Wire-level form of [`try_compose`](Self::try_compose).
    pub fn compose(
        &self,
        candidates: &[CandidateMatch],
        top_k: usize,
        clock: &dyn Clock,
    ) -> DiagnosisResult {
        self.try_compose(candidates, top_k, clock).into()
    }

    /// Repair raw index rows, then compose them.
    pub fn try_compose_raw(
        &self,
        rows: Vec<RawCandidate>,
        top_k: usize,
        clock: &dyn Clock,
    ) -> Result<DiagnosisReport, DiagnosisError> {
        let candidates = into_candidates(rows);
        self.try_compose(&candidates, top_k, clock)
    }

    pub fn compose_raw(
        &self,
        rows: Vec<RawCandidate>,
        top_k: usize,
        clock: &dyn Clock,
    ) -> DiagnosisResult {
        self.try_compose_raw(rows, top_k, clock).into()
    }

    fn compose_inner(
        &self,
        candidates: &[CandidateMatch],
        top_k: usize,
        clock: &dyn Clock,
    ) -> Result<DiagnosisReport, DiagnosisError> {
        if top_k == 0 {
            return Err(DiagnosisError::InvalidRequest(
                "top_k must be greater than zero".into(),
            ));
        }
        let window = &candidates[..candidates.len().min(top_k)];
        let Some((primary, rest)) = window.split_first() else {
            return Err(DiagnosisError::NoCandidates);
        };
        if !is_descending(window) {
            warn!(
                candidates = window.len(),
                "candidates_not_in_descending_similarity_order"
            );
        }

        let today = clock.today();
        let ctx = MetricContext::new(today, self.seasonal_table(), &self.normalizer);
        let assessment = assess(window, &ctx, &self.config.weights);
        debug!(
            %today,
            relative_confidence = assessment.metrics.relative_confidence,
            confidence_margin = assessment.metrics.confidence_margin,
            diagnosis_clarity = assessment.metrics.diagnosis_clarity,
            seasonal_relevance = assessment.metrics.seasonal_relevance,
            "confidence_assessed"
        );

        let diagnosis = Diagnosis {
            primary_disease: primary.disease_name.clone(),
            confidence: assessment.absolute_confidence,
            description: primary.description.clone(),
            symptoms: primary.symptoms.clone(),
            recommendation: primary.recommendation.clone(),
            confidence_metrics: assessment.metrics.clone(),
        };
        let alternatives = rest.iter().map(AlternativeDiagnosis::from).collect();
        Ok(DiagnosisReport {
            diagnosis,
            alternatives,
            assessment,
        })
    }
}

impl Default for DiagnosisComposer {
    fn default() -> Self {
        Self {
            config: ComposerConfig::default(),
            normalizer: SymptomNormalizer::default(),
            seasonal: None,
            metrics: None,
        }
    }
}

impl fmt::Debug for DiagnosisComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosisComposer")
            .field("config", &self.config)
            .field("custom_seasonal_table", &self.seasonal.is_some())
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

fn is_descending(candidates: &[CandidateMatch]) -> bool {
    candidates
        .windows(2)
        .all(|pair| pair[0].similarity() >= pair[1].similarity())
}

/// End-to-end diagnosis: validate the query embedding, fetch candidates from
/// a [`CandidateSource`], then compose.
pub struct Diagnoser<S> {
    source: S,
    composer: DiagnosisComposer,
    clock: Arc<dyn Clock>,
}

impl<S: CandidateSource> Diagnoser<S> {
    /// Build a diagnoser that reads the wall clock.
    pub fn new(source: S, composer: DiagnosisComposer) -> Self {
        Self {
            source,
            composer,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn composer(&self) -> &DiagnosisComposer {
        &self.composer
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn try_diagnose(&self, embedding: &[f32]) -> Result<DiagnosisReport, DiagnosisError> {
        let query = EmbeddingVector::from_slice(embedding)?;
        let params = self.composer.config().match_params();
        let rows = self.source.find_matches(&query, &params).map_err(|err| {
            warn!(error = %err, "candidate_source_failure");
            DiagnosisError::from(err)
        })?;
        debug!(
            rows = rows.len(),
            match_threshold = params.match_threshold,
            match_count = params.match_count,
            "candidate_rows_received"
        );
        self.composer
            .try_compose_raw(rows, params.match_count, self.clock.as_ref())
    }

    pub fn diagnose(&self, embedding: &[f32]) -> DiagnosisResult {
        self.try_diagnose(embedding).into()
    }
}

impl<S: fmt::Debug> fmt::Debug for Diagnoser<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnoser")
            .field("source", &self.source)
            .field("composer", &self.composer)
            .finish()
    }
}
