//! Prediction handler

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::{AppState, AppResult};
use crate::middleware::validation::ValidatedTransaction;
use crate::models::PredictionResult;

/// Classify one transaction into a spending segment
pub async fn predict(
    State(state): State<AppState>,
    ValidatedTransaction(record): ValidatedTransaction,
) -> AppResult<Json<PredictionResult>> {
    let request_id = Uuid::new_v4();
    let span = tracing::debug_span!("predict", %request_id, vessel = %record.vessel_name);

    // CPU-bound and small; runs inline on the request task
    let result = span.in_scope(|| state.engine.predict(&record))?;

    Ok(Json(result))
}
