//! HTTP surface: the analyze endpoint plus a health probe.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use serde::Serialize;
use tracing::{error, info};

use crate::analysis::{self, AnalysisRequest};
use crate::config::AppConfig;
use crate::gemini::GeminiClient;

pub struct AppState {
    pub client: GeminiClient,
}

#[derive(Debug, Serialize)]
struct ReportBody {
    report: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/analyze", any(analyze))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn serve(cfg: AppConfig) -> Result<()> {
    let AppConfig {
        bind_addr,
        base_url,
        model,
        api_key,
        gemini,
    } = cfg;
    let api_key = api_key.context("GEMINI_API_KEY is not set")?;
    let client = GeminiClient::new(base_url, api_key, model)?.with_gemini_config(gemini);
    let state = Arc::new(AppState { client });

    info!("Starting analysis server at {}", &bind_addr);
    let tcp_listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(tcp_listener, router(state))
        .with_graceful_shutdown(async { tokio::signal::ctrl_c().await.unwrap() })
        .await?;
    Ok(())
}

/// Browser callers need these on every reply, error replies included.
fn cors(mut resp: Response) -> Response {
    let headers = resp.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("authorization, x-client-info, apikey, content-type"),
    );
    resp
}

fn error_response(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    method: Method,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    if method == Method::OPTIONS {
        return cors("ok".into_response());
    }

    let Json(req) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            error!(error = %rejection, "rejecting malformed analyze payload");
            return cors(error_response(rejection.to_string()));
        }
    };

    match analysis::run_analysis(req, &state.client).await {
        Ok(report) => cors(Json(ReportBody { report }).into_response()),
        Err(e) => {
            error!(error = %e, "analysis failed");
            cors(error_response(e.to_string()))
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
