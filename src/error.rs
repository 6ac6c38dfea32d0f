//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::logic::PredictionError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Request body does not match the transaction schema
    #[error("request validation failed")]
    RequestShape(ValidationErrors),

    // Bad date, overflowing amounts, scaler/layout mismatch
    #[error("feature processing failed: {0}")]
    FeatureProcessing(PredictionError),

    // Model failed on a well-formed vector
    #[error("unexpected prediction failure: {0}")]
    UnexpectedPrediction(PredictionError),
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        if err.is_feature_processing() {
            AppError::FeatureProcessing(err)
        } else {
            AppError::UnexpectedPrediction(err)
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::RequestShape(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::FeatureProcessing(_) => StatusCode::BAD_REQUEST,
            AppError::UnexpectedPrediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::RequestShape(errors) => {
                tracing::debug!("Rejected request body: {:?}", errors);
                json!({
                    "error": "Request validation failed",
                    "status": status.as_u16(),
                    "fields": errors,
                })
            }
            AppError::FeatureProcessing(err) => {
                tracing::warn!("Feature processing error: {}", err);
                json!({
                    "error": err.to_string(),
                    "status": status.as_u16(),
                })
            }
            AppError::UnexpectedPrediction(err) => {
                // Usually a model/scaler pair trained on a different feature set
                tracing::error!("Unexpected prediction error: {}", err);
                json!({
                    "error": "Prediction failed",
                    "status": status.as_u16(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
