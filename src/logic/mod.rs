//! Logic Module - feature engineering and model inference
//!
//! Nothing in here knows about HTTP. The handlers only see
//! `PredictionEngine` and `PredictionError`.

pub mod artifacts;
pub mod classifier;
pub mod features;
pub mod pipeline;
pub mod scaler;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export common types
pub use artifacts::load_engine;
pub use pipeline::{PredictionEngine, PredictionError};
