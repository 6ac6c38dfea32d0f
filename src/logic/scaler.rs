//! Feature Scaler - fixed per-feature linear normalization
//!
//! Parameters are learned at training time and read from the scaler
//! artifact. Two transforms are understood:
//!
//! - `standard`: `(x - mean) / scale`
//! - `min_max`:  `x * scale + min`

use serde::Deserialize;
use thiserror::Error;

use super::features::{FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScalerError {
    #[error("scaler expects {expected} features, feature vector has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("scaler was fitted on features {fitted:?}, service produces {produced:?}")]
    FeatureOrder { fitted: Vec<String>, produced: Vec<String> },

    #[error("scaled value of feature '{name}' is not finite")]
    NonFinite { name: &'static str },

    #[error("invalid scaler parameters: {0}")]
    InvalidParameters(String),
}

/// Scaler artifact
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    Standard {
        mean: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default)]
        feature_names: Option<Vec<String>>,
    },
    MinMax {
        min: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default)]
        feature_names: Option<Vec<String>>,
    },
}

impl Scaler {
    pub fn kind(&self) -> &'static str {
        match self {
            Scaler::Standard { .. } => "standard",
            Scaler::MinMax { .. } => "min_max",
        }
    }

    /// Number of features the scaler was fitted on
    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { scale, .. } | Scaler::MinMax { scale, .. } => scale.len(),
        }
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        match self {
            Scaler::Standard { feature_names, .. } | Scaler::MinMax { feature_names, .. } => {
                feature_names.as_deref()
            }
        }
    }

    /// Whether the recorded feature names (if any) follow FEATURE_LAYOUT
    pub fn matches_layout(&self) -> bool {
        match self.feature_names() {
            Some(names) => names.iter().map(String::as_str).eq(FEATURE_LAYOUT.iter().copied()),
            None => true,
        }
    }

    /// Internal consistency of the parameters, checked once at load time.
    pub fn check_consistency(&self) -> Result<(), ScalerError> {
        let (offset, scale, offset_name) = match self {
            Scaler::Standard { mean, scale, .. } => (mean, scale, "mean"),
            Scaler::MinMax { min, scale, .. } => (min, scale, "min"),
        };

        if scale.is_empty() {
            return Err(ScalerError::InvalidParameters("no features".to_string()));
        }
        if offset.len() != scale.len() {
            return Err(ScalerError::InvalidParameters(format!(
                "{} has {} entries, scale has {}",
                offset_name,
                offset.len(),
                scale.len()
            )));
        }
        if let Some(names) = self.feature_names() {
            if names.len() != scale.len() {
                return Err(ScalerError::InvalidParameters(format!(
                    "{} feature names for {} features",
                    names.len(),
                    scale.len()
                )));
            }
        }
        if offset.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(ScalerError::InvalidParameters("non-finite parameter".to_string()));
        }
        if matches!(self, Scaler::Standard { .. }) && scale.iter().any(|s| *s == 0.0) {
            return Err(ScalerError::InvalidParameters("zero standard scale".to_string()));
        }

        Ok(())
    }

    /// Normalize one feature vector.
    pub fn transform(&self, features: &FeatureVector) -> Result<[f64; FEATURE_COUNT], ScalerError> {
        let expected = self.n_features();
        if expected != FEATURE_COUNT {
            return Err(ScalerError::DimensionMismatch { expected, actual: FEATURE_COUNT });
        }
        if !self.matches_layout() {
            return Err(ScalerError::FeatureOrder {
                fitted: self.feature_names().unwrap_or_default().to_vec(),
                produced: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
            });
        }

        let mut normalized = [0.0f64; FEATURE_COUNT];
        match self {
            Scaler::Standard { mean, scale, .. } => {
                for i in 0..FEATURE_COUNT {
                    normalized[i] = (features.values[i] - mean[i]) / scale[i];
                }
            }
            Scaler::MinMax { min, scale, .. } => {
                for i in 0..FEATURE_COUNT {
                    normalized[i] = features.values[i] * scale[i] + min[i];
                }
            }
        }

        // A large scale factor can push a finite input past f64::MAX
        if let Some(index) = normalized.iter().position(|v| !v.is_finite()) {
            return Err(ScalerError::NonFinite { name: FEATURE_LAYOUT[index] });
        }

        Ok(normalized)
    }
}
