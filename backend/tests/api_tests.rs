//! HTTP API integration tests
//!
//! Drives the full router in-process:
//! - Account registration, login and logout
//! - Session gating of crop, risk and scanner routes
//! - Crop batch lifecycle, export and dashboard summary

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use harvestguard_backend::{
    create_app, error::ErrorResponse, services::MemoryStore, AppState, Config,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Lowest work factor bcrypt accepts
const TEST_BCRYPT_COST: u32 = 4;

fn test_app() -> Router {
    let mut config = Config::default();
    config.auth.bcrypt_cost = TEST_BCRYPT_COST;
    config.scanner.analysis_delay_ms = 0;

    let state = AppState::new(config, Arc::new(MemoryStore::new())).unwrap();
    create_app(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

async fn register(app: &Router) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        Some(json!({
            "name": "Abdul Karim",
            "email": "karim@example.com",
            "password": "aman2024",
            "phone": "01812345678"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json_body(&body)
}

fn new_batch() -> Value {
    json!({
        "cropType": "rice",
        "weight": 450.5,
        "harvestDate": "2024-05-20",
        "division": "Mymensingh",
        "district": "Netrokona",
        "storageType": "openField"
    })
}

// ============================================================================
// Public Endpoints
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["weather"], "synthetic");
}

#[tokio::test]
async fn test_weather_defaults_to_dhaka_and_never_fails() {
    let app = test_app();

    for uri in ["/api/weather", "/api/weather?division=Atlantis", "/api/weather?division=sylhet"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let forecast = json_body(&body);
        assert_eq!(forecast["source"], "mock");
        assert_eq!(forecast["forecast"].as_array().unwrap().len(), 5);
        assert!(forecast["forecast"][0].get("rainProb").is_some());
    }
}

// ============================================================================
// Accounts
// ============================================================================

#[tokio::test]
async fn test_register_login_logout_flow() {
    let app = test_app();
    let user = register(&app).await;
    assert_eq!(user["email"], "karim@example.com");
    assert_eq!(user["language"], "en");
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());

    let (status, body) = send(&app, Method::GET, "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["id"], user["id"]);

    let (status, _) = send(&app, Method::POST, "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "karim@example.com", "password": "aman2024" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["id"], user["id"]);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = test_app();
    register(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({
            "name": "Someone Else",
            "email": "karim@example.com",
            "password": "another1",
            "phone": ""
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error.code, "DUPLICATE_ENTRY");
}

#[tokio::test]
async fn test_duplicate_email_conflicts_even_with_invalid_fields() {
    let app = test_app();
    register(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({
            "name": "Someone Else",
            "email": "karim@example.com",
            "password": "abc",
            "phone": "999"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error.code, "DUPLICATE_ENTRY");
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = test_app();
    register(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "karim@example.com", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error.code, "INVALID_CREDENTIALS");
    assert!(!error.error.message_bn.is_empty());
}

#[tokio::test]
async fn test_language_preference() {
    let app = test_app();
    register(&app).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/preferences/language",
        Some(json!({ "language": "bn" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, "/api/auth/me", None).await;
    assert_eq!(json_body(&body)["language"], "bn");

    let (_, body) = send(&app, Method::GET, "/api/preferences/language", None).await;
    assert_eq!(json_body(&body)["language"], "bn");
}

// ============================================================================
// Session Gating
// ============================================================================

#[tokio::test]
async fn test_protected_routes_require_login() {
    let app = test_app();

    for (method, uri) in [
        (Method::GET, "/api/crops"),
        (Method::POST, "/api/crops"),
        (Method::GET, "/api/crops/summary"),
        (Method::GET, "/api/crops/export"),
        (Method::GET, "/api/risk"),
        (Method::POST, "/api/scanner"),
    ] {
        let (status, body) = send(&app, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");

        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error.code, "UNAUTHORIZED");
    }
}

// ============================================================================
// Crop Batches
// ============================================================================

#[tokio::test]
async fn test_crop_lifecycle() {
    let app = test_app();
    register(&app).await;

    let (status, body) = send(&app, Method::POST, "/api/crops", Some(new_batch())).await;
    assert_eq!(status, StatusCode::CREATED);
    let batch = json_body(&body);
    assert_eq!(batch["status"], "active");
    assert_eq!(batch["weight"], 450.5);
    let id = batch["id"].as_str().unwrap().to_string();

    // First batch earns the badge
    let (_, body) = send(&app, Method::GET, "/api/auth/me", None).await;
    assert_eq!(json_body(&body)["badges"], json!(["firstHarvest"]));

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/crops/{}", id),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["status"], "completed");

    let (_, body) = send(&app, Method::GET, "/api/crops/summary", None).await;
    let summary = json_body(&body);
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["completed"], 1);
    assert_eq!(summary["successRate"], 100);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/crops/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, "/api/crops", None).await;
    assert_eq!(json_body(&body), json!([]));
}

#[tokio::test]
async fn test_unknown_crop_ids_are_noops() {
    let app = test_app();
    register(&app).await;
    send(&app, Method::POST, "/api/crops", Some(new_batch())).await;

    let unknown = "/api/crops/5f0c6c1e-8f0e-4a43-9f55-1a4b7c0a9d11";
    let (status, _) = send(&app, Method::PATCH, unknown, Some(json!({ "status": "lost" }))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, unknown, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, "/api/crops", None).await;
    let crops = json_body(&body);
    assert_eq!(crops.as_array().unwrap().len(), 1);
    assert_eq!(crops[0]["status"], "active");
}

#[tokio::test]
async fn test_invalid_weight_is_rejected() {
    let app = test_app();
    register(&app).await;

    let mut batch = new_batch();
    batch["weight"] = json!(0);
    let (status, body) = send(&app, Method::POST, "/api/crops", Some(batch)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error.field.as_deref(), Some("weight"));
}

#[tokio::test]
async fn test_csv_export_attachment() {
    let app = test_app();
    register(&app).await;
    send(&app, Method::POST, "/api/crops", Some(new_batch())).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/crops/export?format=csv")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"harvestguard-crops.csv\""
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("ID,Crop Type,Weight (kg),Harvest Date,Division,District,Storage Type,Status,Created At")
    );
    assert!(lines.next().unwrap().contains("rice,450.5,2024-05-20,Mymensingh,Netrokona,openField,active"));
}

#[tokio::test]
async fn test_json_export_attachment() {
    let app = test_app();
    register(&app).await;
    send(&app, Method::POST, "/api/crops", Some(new_batch())).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/crops/export?format=json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(json_body(&body).as_array().unwrap().len(), 1);
}

// ============================================================================
// Risk and Scanner
// ============================================================================

#[tokio::test]
async fn test_risk_report_for_active_batches() {
    let app = test_app();
    register(&app).await;
    send(&app, Method::POST, "/api/crops", Some(new_batch())).await;

    let (status, body) = send(&app, Method::GET, "/api/risk?division=Mymensingh", None).await;
    assert_eq!(status, StatusCode::OK);

    let report = json_body(&body);
    assert_eq!(report["source"], "mock");
    assert_eq!(report["assessments"].as_array().unwrap().len(), 1);

    // Open-field storage is never low risk
    let level = report["assessments"][0]["riskLevel"].as_str().unwrap();
    assert_ne!(level, "low");
    assert!(report["batches"][0]["riskLevel"].is_string());
    assert!(report["advisories"].get("rainWarning").is_some());

    // Stored batches carry no risk fields
    let (_, body) = send(&app, Method::GET, "/api/crops", None).await;
    assert!(json_body(&body)[0].get("riskLevel").is_none());
}

#[tokio::test]
async fn test_scanner_accepts_multipart_image() {
    let app = test_app();
    register(&app).await;

    let boundary = "harvestguard-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"paddy.jpg\"\r\nContent-Type: image/jpeg\r\n\r\nfake-jpeg-bytes\r\n--{b}--\r\n",
        b = boundary
    );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/scanner")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let result = json_body(&body);
    assert!(matches!(result["verdict"].as_str(), Some("fresh") | Some("rotten")));
    let confidence = result["confidence"].as_u64().unwrap();
    assert!((75..95).contains(&confidence));
}
