use std::sync::Arc;

use httptest::{Expectation, Server, matchers::*, responders::*};
use serde_json::{Value, json};

use crate::analysis::EMPTY_MEMBERS_NOTICE;
use crate::gemini::GeminiClient;
use crate::server::{AppState, router};

async fn spawn_app(upstream: &Server) -> String {
    let client = GeminiClient::new(upstream.url_str(""), "test-key", "gemini-2.0-flash").unwrap();
    let state = Arc::new(AppState { client });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn summary_round_trip_returns_report_with_cors() {
    let upstream = Server::run();
    upstream.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/v1beta/models/gemini-2.0-flash:generateContent"),
            // The built prompt travels inside the request body.
            request::body(matches("Demo")),
            request::body(matches("Ship")),
        ])
        .respond_with(json_encoded(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "## Board report"}]}}]
        }))),
    );
    let base = spawn_app(&upstream).await;

    let body = json!({
        "analysisType": "summary",
        "context": "allProjects",
        "allUsers": [{"email": "lead@corp.dev", "role": "admin"}],
        "allProjects": [
            {
                "title": "Demo",
                "workflow": {"statuses": [
                    {"id": 1, "name": "Todo", "order": 1},
                    {"id": 2, "name": "Done", "order": 2}
                ]},
                "tasks": [{"id": 7, "title": "Ship", "priority": "high", "status_id": 2}]
            }
        ],
    });

    let resp = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    let parsed: Value = resp.json().await.unwrap();
    assert_eq!(parsed["report"], "## Board report");
}

#[tokio::test]
async fn upstream_failure_maps_to_error_body() {
    let upstream = Server::run();
    upstream.expect(
        Expectation::matching(request::method_path(
            "POST",
            "/v1beta/models/gemini-2.0-flash:generateContent",
        ))
        .respond_with(status_code(500).body("upstream broke")),
    );
    let base = spawn_app(&upstream).await;

    let body = json!({
        "analysisType": "decompose",
        "task": {"title": "T", "description": "D"},
    });
    let resp = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let parsed: Value = resp.json().await.unwrap();
    let msg = parsed["error"].as_str().unwrap();
    assert!(msg.contains("500"), "unexpected error: {msg}");
}

#[tokio::test]
async fn empty_candidates_map_to_error_body() {
    let upstream = Server::run();
    upstream.expect(
        Expectation::matching(request::method_path(
            "POST",
            "/v1beta/models/gemini-2.0-flash:generateContent",
        ))
        .respond_with(json_encoded(json!({ "candidates": [] }))),
    );
    let base = spawn_app(&upstream).await;

    let body = json!({
        "analysisType": "decompose",
        "task": {"title": "T"},
    });
    let resp = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let parsed: Value = resp.json().await.unwrap();
    assert_eq!(parsed["error"], "Model response contained no candidates");
}

#[tokio::test]
async fn preflight_gets_cors_headers_and_ok() {
    let upstream = Server::run();
    let base = spawn_app(&upstream).await;

    let resp = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{base}/analyze"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("access-control-allow-headers").unwrap(),
        "authorization, x-client-info, apikey, content-type"
    );
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request_with_cors() {
    let upstream = Server::run();
    let base = spawn_app(&upstream).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    let parsed: Value = resp.json().await.unwrap();
    assert!(parsed["error"].as_str().is_some());
}

#[tokio::test]
async fn unknown_kind_is_reported_in_the_error_body() {
    let upstream = Server::run();
    let base = spawn_app(&upstream).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&json!({"analysisType": "sentiment"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let parsed: Value = resp.json().await.unwrap();
    assert_eq!(parsed["error"], "Unknown analysis type: sentiment");
}

#[tokio::test]
async fn distribute_with_empty_members_is_a_success_notice() {
    let upstream = Server::run();
    let base = spawn_app(&upstream).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&json!({
            "analysisType": "distribute",
            "task": {"title": "T"},
            "projectMembers": [],
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let parsed: Value = resp.json().await.unwrap();
    assert_eq!(parsed["report"], EMPTY_MEMBERS_NOTICE);
}

#[tokio::test]
async fn health_endpoint_responds() {
    let upstream = Server::run();
    let base = spawn_app(&upstream).await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let parsed: Value = resp.json().await.unwrap();
    assert_eq!(parsed["status"], "ok");
}
