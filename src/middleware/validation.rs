//! Request validation extractor
//!
//! Replaces `Json<TransactionRecord>` so that shape errors come back as a
//! 422 with every offending field listed, not axum's plain-text rejection.

use std::borrow::Cow;

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

use crate::AppError;
use crate::models::{field, TransactionRecord};

/// A body that already passed schema validation
#[derive(Debug, Clone)]
pub struct ValidatedTransaction(pub TransactionRecord);

#[axum::async_trait]
impl<S> FromRequest<S> for ValidatedTransaction
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Missing content type, unreadable body or malformed JSON
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let mut error = ValidationError::new("json");
                error.message = Some(Cow::Owned(rejection.body_text()));

                let mut errors = ValidationErrors::new();
                errors.add(field::BODY, error);
                AppError::RequestShape(errors)
            })?;

        TransactionRecord::from_json(&body)
            .map(ValidatedTransaction)
            .map_err(AppError::RequestShape)
    }
}
