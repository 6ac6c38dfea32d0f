//! Prediction Pipeline
//!
//! record → features → scaler → cluster model → label
//!
//! `PredictionEngine` owns both artifacts and is never mutated after
//! construction, so one instance is shared by every request via `Arc`.

use serde::Serialize;
use thiserror::Error;

use super::classifier::{ClassifierError, ClusterModel};
use super::features::{self, FeatureError};
use super::scaler::{Scaler, ScalerError};
use crate::models::{ClusterLabel, PredictionResult, TransactionRecord};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Scaling(#[from] ScalerError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

impl PredictionError {
    /// Bad input or a scaler/layout mismatch, as opposed to a model failure
    pub fn is_feature_processing(&self) -> bool {
        !matches!(self, PredictionError::Classifier(_))
    }
}

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub kind: &'static str,
    pub clusters: usize,
    pub fingerprint: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScalerSummary {
    pub kind: &'static str,
    pub features: usize,
    pub fingerprint: Option<String>,
}

pub struct PredictionEngine {
    scaler: Scaler,
    model: Box<dyn ClusterModel>,
    scaler_fingerprint: Option<String>,
    model_fingerprint: Option<String>,
}

impl PredictionEngine {
    pub fn new(scaler: Scaler, model: Box<dyn ClusterModel>) -> Self {
        Self {
            scaler,
            model,
            scaler_fingerprint: None,
            model_fingerprint: None,
        }
    }

    /// Attach the artifact file digests reported by `/health`
    pub fn with_fingerprints(mut self, model: String, scaler: String) -> Self {
        self.model_fingerprint = Some(model);
        self.scaler_fingerprint = Some(scaler);
        self
    }

    pub fn model_summary(&self) -> ModelSummary {
        ModelSummary {
            kind: self.model.kind(),
            clusters: self.model.cluster_count(),
            fingerprint: self.model_fingerprint.clone(),
        }
    }

    pub fn scaler_summary(&self) -> ScalerSummary {
        ScalerSummary {
            kind: self.scaler.kind(),
            features: self.scaler.n_features(),
            fingerprint: self.scaler_fingerprint.clone(),
        }
    }

    /// Classify one transaction. All-or-nothing: any failing step aborts.
    pub fn predict(&self, record: &TransactionRecord) -> Result<PredictionResult, PredictionError> {
        let derived = features::derive(record)?;
        let normalized = self.scaler.transform(&derived.vector)?;
        let cluster_id = self.model.predict(&normalized)?;
        let label = ClusterLabel::from_id(cluster_id);

        tracing::debug!(
            customer = %record.customer,
            date = %derived.date,
            period = %derived.period,
            admin_cost = derived.vector.admin_cost(),
            cluster_id,
            label = label.as_str(),
            "Transaction classified"
        );

        Ok(PredictionResult {
            customer: record.customer.clone(),
            vessel_name: record.vessel_name.clone(),
            cluster_id,
            label,
        })
    }
}

impl std::fmt::Debug for PredictionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionEngine")
            .field("scaler", &self.scaler.kind())
            .field("model", &self.model.kind())
            .finish()
    }
}
