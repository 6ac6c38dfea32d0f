//! Cluster Model - normalized features to cluster identifier
//!
//! `ClusterModel` is the seam between the pipeline and whatever model kind
//! the artifact holds. Only k-means is shipped.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("model expects {expected}-dimensional input, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("distance to cluster {cluster} is not finite")]
    NonFiniteDistance { cluster: usize },

    #[error("invalid model parameters: {0}")]
    InvalidParameters(String),
}

// ============================================================================
// CLUSTER MODEL TRAIT
// ============================================================================

/// Anything that assigns a normalized vector to a cluster
pub trait ClusterModel: Send + Sync {
    fn predict(&self, normalized: &[f64]) -> Result<i64, ClassifierError>;
    fn cluster_count(&self) -> usize;
    fn kind(&self) -> &'static str;
}

// ============================================================================
// K-MEANS
// ============================================================================

/// Fitted k-means model: one center per cluster, cluster id = center index
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KMeans {
    pub cluster_centers: Vec<Vec<f64>>,
}

impl KMeans {
    /// Dimension of every center
    pub fn n_features(&self) -> usize {
        self.cluster_centers.first().map(Vec::len).unwrap_or(0)
    }

    pub fn check_consistency(&self) -> Result<(), ClassifierError> {
        let dim = self.n_features();
        if self.cluster_centers.is_empty() || dim == 0 {
            return Err(ClassifierError::InvalidParameters("no cluster centers".to_string()));
        }
        for (index, center) in self.cluster_centers.iter().enumerate() {
            if center.len() != dim {
                return Err(ClassifierError::InvalidParameters(format!(
                    "center {} has {} dimensions, expected {}",
                    index,
                    center.len(),
                    dim
                )));
            }
            if center.iter().any(|v| !v.is_finite()) {
                return Err(ClassifierError::InvalidParameters(format!(
                    "center {} has a non-finite coordinate",
                    index
                )));
            }
        }
        Ok(())
    }

    /// Squared distance to every center, with all coordinates divided by `divisor`
    fn squared_distances(&self, normalized: &[f64], divisor: f64) -> Vec<f64> {
        self.cluster_centers
            .iter()
            .map(|center| {
                center
                    .iter()
                    .zip(normalized)
                    .map(|(c, x)| (x / divisor - c / divisor).powi(2))
                    .sum()
            })
            .collect()
    }
}

impl ClusterModel for KMeans {
    /// Nearest center by squared Euclidean distance; ties go to the lowest index.
    fn predict(&self, normalized: &[f64]) -> Result<i64, ClassifierError> {
        if let Some(center) = self.cluster_centers.iter().find(|c| c.len() != normalized.len()) {
            return Err(ClassifierError::DimensionMismatch {
                expected: center.len(),
                actual: normalized.len(),
            });
        }

        let mut distances = self.squared_distances(normalized, 1.0);

        // Huge but finite inputs overflow when squared; compare them in a
        // space scaled down by the largest magnitude instead
        if normalized.iter().all(|x| x.is_finite()) && distances.iter().any(|d| d.is_infinite()) {
            let magnitude = normalized
                .iter()
                .chain(self.cluster_centers.iter().flatten())
                .fold(0.0f64, |max, v| max.max(v.abs()));
            distances = self.squared_distances(normalized, magnitude);
        }

        let mut best: Option<(usize, f64)> = None;

        for (index, distance) in distances.into_iter().enumerate() {
            if !distance.is_finite() {
                return Err(ClassifierError::NonFiniteDistance { cluster: index });
            }

            match best {
                Some((_, best_distance)) if best_distance <= distance => {}
                _ => best = Some((index, distance)),
            }
        }

        best.map(|(index, _)| index as i64)
            .ok_or_else(|| ClassifierError::InvalidParameters("no cluster centers".to_string()))
    }

    fn cluster_count(&self) -> usize {
        self.cluster_centers.len()
    }

    fn kind(&self) -> &'static str {
        "kmeans"
    }
}

// ============================================================================
// ARTIFACT
// ============================================================================

/// Classifier artifact, tagged by model kind
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind")]
pub enum ClassifierArtifact {
    #[serde(rename = "kmeans")]
    KMeans(KMeans),
}

impl ClassifierArtifact {
    pub fn check_consistency(&self) -> Result<(), ClassifierError> {
        match self {
            ClassifierArtifact::KMeans(model) => model.check_consistency(),
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            ClassifierArtifact::KMeans(model) => model.n_features(),
        }
    }

    pub fn into_model(self) -> Box<dyn ClusterModel> {
        match self {
            ClassifierArtifact::KMeans(model) => Box::new(model),
        }
    }
}
