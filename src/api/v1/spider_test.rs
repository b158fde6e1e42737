//! Integration tests for the SPIDER REST endpoints.

use axum::http::StatusCode;

use super::test_helpers::{SEQUENCE, failing_runner, spider_app, spider_runner};
use crate::tools::MockCommandRunner;
use crate::tools::spider::{INPUT_DIR, INPUT_FILE, OUTPUT_DIR, OUTPUT_FILE};

#[tokio::test(flavor = "multi_thread")]
async fn test_root_and_health() {
    let app = spider_app(MockCommandRunner::new());

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "SPIDER API - Bioinformatics Tool Wrapper");
    assert_eq!(body["health"], "/api/v1/spider/health");

    let (status, body) = app.get("/api/v1/spider/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["tool"], "SPIDER");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_info_is_static() {
    let app = spider_app(MockCommandRunner::new());

    let (status, body) = app.get("/api/v1/spider/info").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "SPIDER");
    assert_eq!(body["version"], "1.0");
    assert_eq!(body["output_format"], "CSV");
    assert_eq!(
        body["home_directory"],
        app.dir.path().display().to_string()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_predict_success() {
    let app = spider_app(spider_runner("sequence,druggable,0.93\n"));

    let (status, body) = app
        .post_empty(&format!("/api/v1/spider/predict?sequence={}", SEQUENCE))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Prediction completed successfully");
    assert_eq!(body["result"]["label"], "druggable");
    assert_eq!(body["result"]["probability"], 0.93);
    assert!(body["processing_time"].as_f64().unwrap() >= 0.0);

    assert!(!app.dir.path().join(INPUT_DIR).join(INPUT_FILE).exists());
    assert!(!app.dir.path().join(OUTPUT_DIR).join(OUTPUT_FILE).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_predict_missing_sequence_is_400() {
    let app = spider_app(MockCommandRunner::new());

    let (status, body) = app.post_empty("/api/v1/spider/predict").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No sequence provided");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_predict_invalid_sequence_is_400() {
    let app = spider_app(MockCommandRunner::new());

    let (status, body) = app
        .post_empty("/api/v1/spider/predict?sequence=MKTV123")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid sequence format");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_predict_multiline_output_is_500() {
    let app = spider_app(spider_runner("a,druggable,0.9\nb,druggable,0.8\n"));

    let (status, body) = app
        .post_empty(&format!("/api/v1/spider/predict?sequence={}", SEQUENCE))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("SPIDER output contains multiple lines")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_predict_tool_failure_is_500() {
    let app = spider_app(failing_runner("Traceback: model not found"));

    let (status, body) = app
        .post_empty(&format!("/api/v1/spider/predict?sequence={}", SEQUENCE))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "SPIDER execution failed: Traceback: model not found"
    );
}
