/// Read access to the fields the metric calculator needs from a candidate.
///
/// The calculator is generic over this trait so it never depends on the
/// concrete record type the similarity index produces.
pub trait ScoredCandidate {
    fn disease_name(&self) -> &str;
    /// Similarity against the query embedding, expected in `[0, 1]`.
    fn similarity(&self) -> f64;
    fn symptoms(&self) -> &str;
}

impl<T: ScoredCandidate + ?Sized> ScoredCandidate for &T {
    fn disease_name(&self) -> &str {
        (**self).disease_name()
    }

    fn similarity(&self) -> f64 {
        (**self).similarity()
    }

    fn symptoms(&self) -> &str {
        (**self).symptoms()
    }
}

/// Similarity as used by every formula: clamped into `[0, 1]`, with
/// non-finite values treated as no similarity at all.
pub(crate) fn bounded_similarity<C: ScoredCandidate + ?Sized>(candidate: &C) -> f64 {
    bounded(candidate.similarity())
}

pub(crate) fn bounded(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::ScoredCandidate;

    #[derive(Debug, Clone)]
    pub struct Candidate {
        pub name: String,
        pub similarity: f64,
        pub symptoms: String,
    }

    impl ScoredCandidate for Candidate {
        fn disease_name(&self) -> &str {
            &self.name
        }

        fn similarity(&self) -> f64 {
            self.similarity
        }

        fn symptoms(&self) -> &str {
            &self.symptoms
        }
    }

    pub fn candidate(name: &str, similarity: f64, symptoms: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            similarity,
            symptoms: symptoms.to_string(),
        }
    }

    pub fn scores(similarities: &[f64]) -> Vec<Candidate> {
        similarities
            .iter()
            .enumerate()
            .map(|(i, &s)| candidate(&format!("disease-{i}"), s, ""))
            .collect()
    }
}
