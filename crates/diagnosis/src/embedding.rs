use serde::{Deserialize, Serialize};

use crate::error::DiagnosisError;

/// Dimension of the image embeddings stored in the similarity index.
pub const EMBEDDING_DIM: usize = 768;

/// A validated query embedding: exactly [`EMBEDDING_DIM`] finite components.
///
/// Deserialization goes through the same validation as [`EmbeddingVector::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct EmbeddingVector {
    values: Vec<f32>,
}

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Result<Self, DiagnosisError> {
        if values.len() != EMBEDDING_DIM {
            return Err(DiagnosisError::InvalidEmbedding {
                expected: EMBEDDING_DIM,
                actual: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(DiagnosisError::NonFiniteEmbedding { index });
        }
        Ok(Self { values })
    }

    pub fn from_slice(values: &[f32]) -> Result<Self, DiagnosisError> {
        Self::new(values.to_vec())
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// Euclidean norm, accumulated in `f64`.
    pub fn norm(&self) -> f64 {
        self.values
            .iter()
            .map(|&v| f64::from(v) * f64::from(v))
            .sum::<f64>()
            .sqrt()
    }

    /// Unit-length copy. The zero vector stays zero.
    pub fn l2_normalized(&self) -> Self {
        let norm = self.norm();
        if norm == 0.0 {
            return self.clone();
        }
        let values = self
            .values
            .iter()
            .map(|&v| (f64::from(v) / norm) as f32)
            .collect();
        Self { values }
    }

    /// Cosine similarity against `other`, `0` when either vector is zero.
    pub fn cosine(&self, other: &EmbeddingVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        let dot: f64 = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(&a, &b)| f64::from(a) * f64::from(b))
            .sum();
        dot / denom
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.values
    }
}

impl TryFrom<Vec<f32>> for EmbeddingVector {
    type Error = DiagnosisError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<EmbeddingVector> for Vec<f32> {
    fn from(embedding: EmbeddingVector) -> Self {
        embedding.values
    }
}

impl AsRef<[f32]> for EmbeddingVector {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}
