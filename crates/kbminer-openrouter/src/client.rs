// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for an OpenAI-compatible chat-completions endpoint.
//!
//! Provides [`OpenRouterClient`], which sets the authentication and referrer
//! headers once and performs a single non-streaming request per call. There
//! is no retry: a failed ticket is simply picked up again on the next run.

use std::time::Duration;

use kbminer_config::model::AiConfig;
use kbminer_core::KbError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// Chat-completions client.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    url: String,
    /// Configured key, used to scrub error bodies before logging.
    api_key: Option<String>,
}

impl OpenRouterClient {
    /// Creates a client from the `[ai]` configuration section.
    ///
    /// A missing key is not an error here; the endpoint will reject the call.
    pub fn new(config: &AiConfig) -> Result<Self, KbError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {key}"))
                    .map_err(|e| KbError::Config(format!("invalid AI key header value: {e}")))?,
            );
        }
        if let Some(site) = &config.site_url {
            headers.insert(
                "http-referer",
                HeaderValue::from_str(site)
                    .map_err(|e| KbError::Config(format!("invalid referrer header value: {e}")))?,
            );
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KbError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Sends one completion request and returns the first choice's text.
    pub async fn complete(&self, request: &ChatRequest) -> Result<String, KbError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| KbError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "completion response received");

        let body = response.text().await.map_err(|e| KbError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if status != reqwest::StatusCode::OK {
            let detail = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => api_err.error.message,
                Err(_) => body,
            };
            return Err(KbError::Provider {
                message: format!("API returned {status}: {}", self.scrub(&detail)),
                source: None,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| KbError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })?;

        parsed
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| KbError::Provider {
                message: "completion contained no message text".into(),
                source: None,
            })
    }

    fn scrub(&self, text: &str) -> String {
        let secrets: Vec<&str> = self.api_key.as_deref().into_iter().collect();
        kbminer_security::redact(text, &secrets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> AiConfig {
        AiConfig {
            api_key: Some("sk-or-v1-testkey0123456789abcdef".into()),
            url: format!("{}/api/v1/chat/completions", server.uri()),
            model: Some("deepseek/deepseek-r1".into()),
            site_url: Some("https://helpdesk.example.com".into()),
            ..AiConfig::default()
        }
    }

    fn test_request() -> ChatRequest {
        ChatRequest {
            model: Some("deepseek/deepseek-r1".into()),
            messages: vec![ChatMessage::user("Hello")],
            temperature: 0.1,
        }
    }

    fn completion(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "gen-123",
            "model": "deepseek/deepseek-r1",
            "choices": [{
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn complete_returns_first_choice_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Hi there!")))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenRouterClient::new(&test_config(&server)).unwrap();
        let text = client.complete(&test_request()).await.unwrap();
        assert_eq!(text, "Hi there!");
    }

    #[tokio::test]
    async fn client_sends_auth_referrer_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(header(
                "authorization",
                "Bearer sk-or-v1-testkey0123456789abcdef",
            ))
            .and(header("http-referer", "https://helpdesk.example.com"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "model": "deepseek/deepseek-r1",
                "messages": [{"role": "user", "content": "Hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenRouterClient::new(&test_config(&server)).unwrap();
        assert_eq!(client.complete(&test_request()).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn non_200_is_provider_error_without_retry() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                "error": {"message": "Provider overloaded", "code": 503}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenRouterClient::new(&test_config(&server)).unwrap();
        let err = client.complete(&test_request()).await.unwrap_err();
        assert!(matches!(err, KbError::Provider { .. }));
        assert!(err.to_string().contains("Provider overloaded"), "got: {err}");
    }

    #[tokio::test]
    async fn error_body_is_scrubbed_of_the_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string("bad key sk-or-v1-testkey0123456789abcdef"),
            )
            .mount(&server)
            .await;

        let client = OpenRouterClient::new(&test_config(&server)).unwrap();
        let err = client.complete(&test_request()).await.unwrap_err().to_string();
        assert!(!err.contains("testkey0123456789"), "got: {err}");
        assert!(err.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn empty_choices_is_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let client = OpenRouterClient::new(&test_config(&server)).unwrap();
        assert!(client.complete(&test_request()).await.is_err());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_provider_error() {
        let config = AiConfig {
            url: "http://127.0.0.1:1/api/v1/chat/completions".into(),
            ..AiConfig::default()
        };
        let client = OpenRouterClient::new(&config).unwrap();
        let err = client.complete(&test_request()).await.unwrap_err();
        assert!(matches!(err, KbError::Provider { .. }));
    }

    #[test]
    fn header_with_newline_is_config_error() {
        let config = AiConfig {
            api_key: Some("bad\nkey".into()),
            ..AiConfig::default()
        };
        assert!(matches!(
            OpenRouterClient::new(&config),
            Err(KbError::Config(_))
        ));
    }
}
