//! Service banner

use axum::Json;
use serde::Serialize;

pub const SERVICE_MESSAGE: &str = "CPS spend prediction API is running";

#[derive(Serialize)]
pub struct RootResponse {
    message: &'static str,
}

pub async fn index() -> Json<RootResponse> {
    Json(RootResponse { message: SERVICE_MESSAGE })
}
