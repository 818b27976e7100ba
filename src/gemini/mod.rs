pub mod types;

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, error};

use crate::analysis::AnalysisError;
use crate::config::GeminiConfig;
use crate::gemini::types::{Content, GenerateRequest, GenerateResponse, GenerationConfig, Part};

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    pub base_url: String,
    pub model: String,
    api_key: String,
    inner: reqwest::Client,
    pub gemini_cfg: GeminiConfig,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let gemini_cfg = GeminiConfig::default();
        let inner = build_http_client(&gemini_cfg)?;
        Ok(Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            inner,
            gemini_cfg,
        })
    }

    pub fn with_gemini_config(mut self, cfg: GeminiConfig) -> Self {
        // Rebuild the reqwest client so the configured timeouts actually apply.
        // On builder failure keep the current client.
        if let Ok(c) = build_http_client(&cfg) {
            self.inner = c;
        }
        self.gemini_cfg = cfg;
        self
    }

    pub(crate) fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/v1beta/models/{}:generateContent", self.model)
    }

    /// Send one prompt as the sole user turn and return the first candidate's
    /// text verbatim. One attempt only; retry policy belongs to the caller.
    pub async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        let url = self.endpoint();
        let req = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: generation_config(&self.gemini_cfg),
        };

        debug!(endpoint = %url, prompt_len = prompt.len(), "sending generateContent request");

        let resp = self
            .inner
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "generateContent returned non-success status");
            return Err(AnalysisError::ModelUnavailable(format!(
                "status {} - {}",
                status.as_u16(),
                body
            )));
        }

        let text = resp.text().await?;
        let body: GenerateResponse = serde_json::from_str(&text)?;

        let part = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next());
        match part {
            Some(part) => Ok(part.text),
            None => {
                error!("generateContent returned no usable candidate");
                Err(AnalysisError::EmptyModelResponse)
            }
        }
    }
}

fn build_http_client(cfg: &GeminiConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
        .timeout(Duration::from_millis(cfg.request_timeout_ms))
        .build()?;
    Ok(client)
}

fn generation_config(cfg: &GeminiConfig) -> Option<GenerationConfig> {
    if cfg.temperature.is_none() && cfg.max_output_tokens.is_none() {
        return None;
    }
    Some(GenerationConfig {
        temperature: cfg.temperature,
        max_output_tokens: cfg.max_output_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{Expectation, Server, matchers::*, responders::*};

    #[tokio::test]
    async fn generate_happy_path() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/v1beta/models/gemini-2.0-flash:generateContent"),
                request::query(url_decoded(contains(("key", "test-key")))),
            ])
            .respond_with(json_encoded(serde_json::json!({
                "candidates": [
                    {"content": {"role": "model", "parts": [{"text": "hello"}]}}
                ]
            }))),
        );

        let client =
            GeminiClient::new(server.url_str(""), "test-key", "gemini-2.0-flash").unwrap();
        let report = client.generate("hi").await.unwrap();
        assert_eq!(report, "hello");
    }

    #[tokio::test]
    async fn non_success_status_is_model_unavailable() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/v1beta/models/gemini-2.0-flash:generateContent",
            ))
            .respond_with(status_code(500).body("oops")),
        );

        let client = GeminiClient::new(server.url_str(""), "x", "gemini-2.0-flash").unwrap();
        let err = client.generate("hi").await.unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("500"), "unexpected error: {msg}");
        assert!(msg.contains("oops"), "unexpected error: {msg}");
    }

    #[tokio::test]
    async fn empty_candidates_is_empty_model_response() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/v1beta/models/gemini-2.0-flash:generateContent",
            ))
            .respond_with(json_encoded(serde_json::json!({ "candidates": [] }))),
        );

        let client = GeminiClient::new(server.url_str(""), "x", "gemini-2.0-flash").unwrap();
        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyModelResponse));
    }

    #[tokio::test]
    async fn candidate_without_content_is_empty_model_response() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/v1beta/models/gemini-2.0-flash:generateContent",
            ))
            .respond_with(json_encoded(serde_json::json!({ "candidates": [{}] }))),
        );

        let client = GeminiClient::new(server.url_str(""), "x", "gemini-2.0-flash").unwrap();
        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyModelResponse));
    }

    #[test]
    fn endpoint_normalization() {
        let c = GeminiClient::new(
            "https://generativelanguage.googleapis.com/",
            "x",
            "gemini-2.0-flash",
        )
        .unwrap();
        assert_eq!(
            c.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        let c2 = GeminiClient::new(
            "https://generativelanguage.googleapis.com",
            "x",
            "gemini-2.0-flash",
        )
        .unwrap();
        assert_eq!(c.endpoint(), c2.endpoint());
    }

    #[test]
    fn generation_config_is_omitted_when_unset() {
        assert!(generation_config(&GeminiConfig::default()).is_none());

        let cfg = GeminiConfig {
            temperature: Some(0.7),
            ..GeminiConfig::default()
        };
        let generated = generation_config(&cfg).unwrap();
        assert_eq!(generated.temperature, Some(0.7));
        assert_eq!(generated.max_output_tokens, None);
    }
}
