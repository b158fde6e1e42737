//! Router fixtures shared by the REST and MCP-like handler tests.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::api::{AppState, create_blastp_router, create_spider_router};
use crate::tools::blastp::{BlastpConfig, BlastpService};
use crate::tools::spider::{MODEL_DIR, OUTPUT_DIR, OUTPUT_FILE, SpiderConfig, SpiderService};
use crate::tools::test_support::{blast_rows, mock_output, write_file};
use crate::tools::{DatabaseRegistry, MockCommandRunner};

pub const SEQUENCE: &str = "MKTVRQERLKSIVRILERSKEPVSGAQLAEELSVSRQVIVQDIAYLRSLGYNIVATPRGYVLAGG";

/// A router plus the temporary directory its service writes into.
pub struct TestApp {
    pub router: axum::Router,
    pub dir: TempDir,
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }
}

pub fn blastp_app(runner: MockCommandRunner) -> TestApp {
    let dir = TempDir::new().unwrap();
    let config = BlastpConfig::new(dir.path().join("db")).with_output_dir(dir.path().join("out"));
    let service = BlastpService::new(config, runner, Arc::new(DatabaseRegistry::new()));
    TestApp {
        router: create_blastp_router(AppState::new(service)),
        dir,
    }
}

pub fn spider_app(runner: MockCommandRunner) -> TestApp {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join(MODEL_DIR)).unwrap();
    let service = SpiderService::new(SpiderConfig::new(dir.path()), runner);
    TestApp {
        router: create_spider_router(AppState::new(service)),
        dir,
    }
}

/// Runner whose blastp search writes `rows` hits.
pub fn blastp_runner(rows: usize) -> MockCommandRunner {
    let mut runner = MockCommandRunner::new();
    runner.expect_run().times(1).returning(move |inv, _| {
        let out = PathBuf::from(inv.arg_after("-out").unwrap());
        write_file(&out, &blast_rows(rows));
        Ok(mock_output(0, "", ""))
    });
    runner
}

/// Runner whose SPIDER run writes `csv` as its prediction.
pub fn spider_runner(csv: &'static str) -> MockCommandRunner {
    let mut runner = MockCommandRunner::new();
    runner.expect_run().times(1).returning(move |inv, _| {
        let workdir = inv.current_dir.clone().unwrap();
        write_file(&workdir.join(OUTPUT_DIR).join(OUTPUT_FILE), csv);
        Ok(mock_output(0, "", ""))
    });
    runner
}

/// Runner that fails every call with exit code 1 and `stderr`.
pub fn failing_runner(stderr: &'static str) -> MockCommandRunner {
    let mut runner = MockCommandRunner::new();
    runner
        .expect_run()
        .returning(move |_, _| Ok(mock_output(1, "", stderr)));
    runner
}
