//! Router tests
//!
//! Drive the full router (extractor, handler, error mapping) with in-memory
//! artifacts.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::config::Config;
use crate::logic::fixtures::{engine, standard_scaler, MismatchedModel};
use crate::logic::PredictionEngine;
use crate::{create_router, AppState};

fn test_config() -> Config {
    Config {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        model_path: PathBuf::from("model.json"),
        scaler_path: PathBuf::from("scaler.json"),
        environment: "test".to_string(),
        log_format: "pretty".to_string(),
    }
}

fn app_with(engine: PredictionEngine) -> Router {
    create_router(AppState {
        engine: Arc::new(engine),
        config: test_config(),
    })
}

fn reference_body() -> Value {
    json!({
        "Tanggal": "2024-01-15",
        "Customer": "Acme",
        "Nama_Kapal": "MV Star",
        "Nominal_yang_Dibayarkan": 1000.0,
        "DPP": 700.0,
        "PPM": 200.0
    })
}

async fn send(app: Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn post_predict(app: Router, body: &Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/predict", Some(body.to_string())).await
}

#[tokio::test]
async fn test_root_message() {
    let (status, body) = send(app_with(engine()), Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "CPS spend prediction API is running" }));
}

#[tokio::test]
async fn test_health_reports_artifacts() {
    let app = app_with(engine().with_fingerprints("m".repeat(64), "s".repeat(64)));
    let (status, body) = send(app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["schema_version"], 1);
    assert_eq!(body["environment"], "test");
    assert_eq!(body["model"]["kind"], "kmeans");
    assert_eq!(body["model"]["clusters"], 3);
    assert_eq!(body["model"]["fingerprint"], "m".repeat(64));
    assert_eq!(body["scaler"]["features"], 4);
}

#[tokio::test]
async fn test_predict_reference_record() {
    let (status, body) = post_predict(app_with(engine()), &reference_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "Customer": "Acme",
            "Nama Kapal": "MV Star",
            "KMeans_Label": 2,
            "Prediksi": "High"
        })
    );
}

#[tokio::test]
async fn test_predict_is_deterministic() {
    let app = app_with(engine());
    let (_, first) = post_predict(app.clone(), &reference_body()).await;
    let (_, second) = post_predict(app, &reference_body()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_predict_accepts_negative_amounts() {
    let mut body = reference_body();
    body["Nominal_yang_Dibayarkan"] = json!(-100.0);
    body["DPP"] = json!(-50.0);
    body["PPM"] = json!(-20.0);

    let (status, body) = post_predict(app_with(engine()), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Prediksi"], "Low");
}

#[tokio::test]
async fn test_predict_accepts_huge_amount() {
    let mut body = reference_body();
    body["Nominal_yang_Dibayarkan"] = json!(1e200);

    let (status, body) = post_predict(app_with(engine()), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["Prediksi"], "Unknown");
}

#[tokio::test]
async fn test_missing_field_is_422_with_pointer() {
    let mut body = reference_body();
    body.as_object_mut().unwrap().remove("Nama_Kapal");

    let (status, body) = post_predict(app_with(engine()), &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
    assert_eq!(body["fields"]["Nama_Kapal"][0]["code"], "missing");
    assert_eq!(body["fields"].as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn test_wrong_type_is_422() {
    let mut body = reference_body();
    body["DPP"] = json!({ "amount": 700 });

    let (status, body) = post_predict(app_with(engine()), &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["DPP"][0]["code"], "type");
}

#[tokio::test]
async fn test_malformed_json_is_422() {
    let (status, body) = send(
        app_with(engine()),
        Method::POST,
        "/predict",
        Some("{\"Tanggal\": ".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["body"][0]["code"], "json");
}

#[tokio::test]
async fn test_invalid_date_is_400() {
    let mut body = reference_body();
    body["Tanggal"] = json!("not-a-date");

    let (status, body) = post_predict(app_with(engine()), &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("not-a-date"));
}

#[tokio::test]
async fn test_model_failure_is_500() {
    let app = app_with(PredictionEngine::new(standard_scaler(), Box::new(MismatchedModel)));
    let (status, body) = post_predict(app, &reference_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Prediction failed", "status": 500 }));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = send(app_with(engine()), Method::GET, "/predict/batch", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
