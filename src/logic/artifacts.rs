//! Artifact Loader
//!
//! Reads the classifier and scaler JSON artifacts once at startup. Any
//! failure here is fatal: the server must not accept traffic without both.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::classifier::ClassifierArtifact;
use super::features::{FEATURE_COUNT, FEATURE_LAYOUT};
use super::pipeline::PredictionEngine;
use super::scaler::Scaler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole {
    Model,
    Scaler,
}

impl fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactRole::Model => write!(f, "model"),
            ArtifactRole::Scaler => write!(f, "scaler"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {role} artifact at {}: {source}", .path.display())]
    Read {
        role: ArtifactRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {role} artifact at {}: {source}", .path.display())]
    Parse {
        role: ArtifactRole,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{role} artifact at {} is inconsistent: {reason}", .path.display())]
    Inconsistent {
        role: ArtifactRole,
        path: PathBuf,
        reason: String,
    },
}

/// Hex SHA-256 of the artifact bytes
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn read_artifact<T: DeserializeOwned>(role: ArtifactRole, path: &Path) -> Result<(T, String), ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Read {
        role,
        path: path.to_path_buf(),
        source,
    })?;

    let value = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        role,
        path: path.to_path_buf(),
        source,
    })?;

    Ok((value, fingerprint(&bytes)))
}

/// Load and check both artifacts, then build the shared engine.
pub fn load_engine(model_path: &Path, scaler_path: &Path) -> Result<PredictionEngine, ArtifactError> {
    tracing::info!("Loading scaler from: {}", scaler_path.display());
    let (scaler, scaler_fingerprint) = read_artifact::<Scaler>(ArtifactRole::Scaler, scaler_path)?;
    scaler.check_consistency().map_err(|e| ArtifactError::Inconsistent {
        role: ArtifactRole::Scaler,
        path: scaler_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if scaler.n_features() != FEATURE_COUNT {
        tracing::warn!(
            "Scaler was fitted on {} features, service produces {}; every prediction will be rejected",
            scaler.n_features(),
            FEATURE_COUNT
        );
    }
    if !scaler.matches_layout() {
        tracing::warn!(
            "Scaler feature names {:?} differ from layout {:?}; every prediction will be rejected",
            scaler.feature_names().unwrap_or_default(),
            FEATURE_LAYOUT
        );
    }

    tracing::info!("Loading model from: {}", model_path.display());
    let (model, model_fingerprint) = read_artifact::<ClassifierArtifact>(ArtifactRole::Model, model_path)?;
    model.check_consistency().map_err(|e| ArtifactError::Inconsistent {
        role: ArtifactRole::Model,
        path: model_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if model.n_features() != scaler.n_features() {
        tracing::warn!(
            "Model expects {} features but scaler emits {}",
            model.n_features(),
            scaler.n_features()
        );
    }

    let engine = PredictionEngine::new(scaler, model.into_model())
        .with_fingerprints(model_fingerprint, scaler_fingerprint);

    let model_summary = engine.model_summary();
    let scaler_summary = engine.scaler_summary();
    tracing::info!(
        model_kind = model_summary.kind,
        clusters = model_summary.clusters,
        model_sha256 = model_summary.fingerprint.as_deref().unwrap_or("-"),
        scaler_kind = scaler_summary.kind,
        scaler_sha256 = scaler_summary.fingerprint.as_deref().unwrap_or("-"),
        "Artifacts loaded"
    );

    Ok(engine)
}
