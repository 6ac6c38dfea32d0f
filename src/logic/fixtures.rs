//! Shared test fixtures
//!
//! Scaler maps `[500, 350, 100, 50]` to the origin with unit steps of the
//! same size, so `[0, 0, 0, 0]` lands on -1 everywhere and the reference
//! record `[1000, 700, 200, 100]` lands on +1. Centers sit at -1, 0 and +1.

use super::classifier::{ClassifierError, ClusterModel, KMeans};
use super::pipeline::PredictionEngine;
use super::scaler::Scaler;
use crate::models::TransactionRecord;

pub fn standard_scaler() -> Scaler {
    Scaler::Standard {
        mean: vec![500.0, 350.0, 100.0, 50.0],
        scale: vec![500.0, 350.0, 100.0, 50.0],
        feature_names: None,
    }
}

pub fn kmeans() -> KMeans {
    KMeans {
        cluster_centers: vec![vec![-1.0; 4], vec![0.0; 4], vec![1.0; 4]],
    }
}

pub fn engine() -> PredictionEngine {
    PredictionEngine::new(standard_scaler(), Box::new(kmeans()))
}

pub fn record(date: &str, amount_paid: f64, dpp: f64, ppm: f64) -> TransactionRecord {
    TransactionRecord {
        date: date.to_string(),
        customer: "Acme".to_string(),
        vessel_name: "MV Star".to_string(),
        amount_paid,
        dpp,
        ppm,
    }
}

/// Always fails, as a model built for a different feature set would
pub struct MismatchedModel;

impl ClusterModel for MismatchedModel {
    fn predict(&self, normalized: &[f64]) -> Result<i64, ClassifierError> {
        Err(ClassifierError::DimensionMismatch { expected: 7, actual: normalized.len() })
    }

    fn cluster_count(&self) -> usize {
        3
    }

    fn kind(&self) -> &'static str {
        "mismatched"
    }
}

/// Returns an id outside the label table
pub struct FixedModel(pub i64);

impl ClusterModel for FixedModel {
    fn predict(&self, _normalized: &[f64]) -> Result<i64, ClassifierError> {
        Ok(self.0)
    }

    fn cluster_count(&self) -> usize {
        1
    }

    fn kind(&self) -> &'static str {
        "fixed"
    }
}
