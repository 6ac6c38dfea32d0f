//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use crate::logic::pipeline::{ModelSummary, ScalerSummary};
use crate::models::SCHEMA_VERSION;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    schema_version: u32,
    environment: String,
    timestamp: i64,
    model: ModelSummary,
    scaler: ScalerSummary,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        schema_version: SCHEMA_VERSION,
        environment: state.config.environment.clone(),
        timestamp: chrono::Utc::now().timestamp(),
        model: state.engine.model_summary(),
        scaler: state.engine.scaler_summary(),
    })
}
