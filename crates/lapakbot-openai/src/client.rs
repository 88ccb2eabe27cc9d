// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Chat Completions API.
//!
//! Provides [`OpenAiClient`] which handles request construction, bearer
//! authentication, bounded retry with backoff, and the 429 short-circuit.

use std::time::Duration;

use lapakbot_core::LapakbotError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, error, warn};

use crate::retry::RetryPolicy;
use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// HTTP client for chat-completion requests.
///
/// Non-2xx statuses other than 429 are retried per the [`RetryPolicy`];
/// a 429 gives up immediately with [`LapakbotError::RateLimited`].
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl OpenAiClient {
    /// Creates a new chat-completion client.
    ///
    /// # Arguments
    /// * `api_key` - bearer token for the API
    /// * `base_url` - API base URL (e.g., "https://api.openai.com/v1")
    /// * `retry` - retry policy for transient failures
    pub fn new(
        api_key: &str,
        base_url: impl Into<String>,
        retry: RetryPolicy,
    ) -> Result<Self, LapakbotError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| LapakbotError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| LapakbotError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            retry,
        })
    }

    /// Sends a chat-completion request and returns the parsed response.
    ///
    /// Retry behavior:
    /// * transport failure or malformed JSON: fail immediately
    /// * 429: fail immediately with [`LapakbotError::RateLimited`]
    /// * any other non-2xx: pause per the retry policy and try again, up to
    ///   `max_attempts` total, then fail with the last error
    pub async fn complete_chat(&self, request: &ChatRequest) -> Result<ChatResponse, LapakbotError> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut last_failure = String::new();

        for attempt in 1..=self.retry.max_attempts {
            if attempt > 1 {
                let pause = self.retry.delay_after(attempt - 1);
                warn!(attempt, pause_ms = pause.as_millis() as u64, "retrying chat completion");
                tokio::time::sleep(pause).await;
            }

            let response = self
                .client
                .post(&url)
                .json(request)
                .send()
                .await
                .map_err(|e| LapakbotError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "chat completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| LapakbotError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                // Malformed JSON is its own failure class, never retried.
                return serde_json::from_str(&body).map_err(|e| LapakbotError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            if status.as_u16() == 429 {
                warn!("chat completion rate limited, giving up");
                return Err(LapakbotError::RateLimited);
            }

            let body = response.text().await.unwrap_or_default();
            last_failure = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "API error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            warn!(status = %status, failure = last_failure.as_str(), "chat completion attempt failed");
        }

        error!(
            attempts = self.retry.max_attempts,
            failure = last_failure.as_str(),
            "chat completion failed after all attempts"
        );
        Err(LapakbotError::Provider {
            message: format!(
                "chat completion failed after {} attempts: {last_failure}",
                self.retry.max_attempts
            ),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatMessage, ToolDefinition};
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(10),
            multiplier: 1.0,
            jitter: false,
        }
    }

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new("sk-test", base_url, fast_policy()).unwrap()
    }

    fn test_request() -> ChatRequest {
        ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![
                ChatMessage::system("Kamu adalah asisten toko."),
                ChatMessage::user("Halo"),
            ],
            temperature: 1.0,
            max_tokens: None,
            tools: Some(vec![ToolDefinition::function(
                "tangani_keluhan",
                "Menangani keluhan pelanggan",
                serde_json::json!({"type": "object", "properties": {}}),
            )]),
            tool_choice: Some("auto".into()),
        }
    }

    fn content_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-test",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })
    }

    #[tokio::test]
    async fn complete_chat_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(content_body("Halo kak!")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let resp = client.complete_chat(&test_request()).await.unwrap();
        assert_eq!(
            resp.first_message().unwrap().content.as_deref(),
            Some("Halo kak!")
        );
    }

    #[tokio::test]
    async fn sends_bearer_auth_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(content_body("ok")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.complete_chat(&test_request()).await.is_ok());
    }

    #[tokio::test]
    async fn retries_then_succeeds_on_500() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(content_body("recovered")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let resp = client.complete_chat(&test_request()).await.unwrap();
        assert_eq!(
            resp.first_message().unwrap().content.as_deref(),
            Some("recovered")
        );
    }

    #[tokio::test]
    async fn exhausts_attempts_on_persistent_failure() {
        let server = MockServer::start().await;
        let error_body = serde_json::json!({
            "error": {"message": "The server had an error", "type": "server_error"}
        });
        // Exactly 3 attempts, no more.
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_json(&error_body))
            .expect(3)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.complete_chat(&test_request()).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("3 attempts"), "got: {msg}");
        assert!(msg.contains("server_error"), "got: {msg}");
    }

    #[tokio::test]
    async fn rate_limit_gives_up_without_retry() {
        let server = MockServer::start().await;
        let error_body = serde_json::json!({
            "error": {"message": "Rate limit reached", "type": "rate_limit_error"}
        });
        // Exactly 1 attempt: 429 short-circuits the retry loop.
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.complete_chat(&test_request()).await.unwrap_err();
        assert!(matches!(err, LapakbotError::RateLimited));
    }

    #[tokio::test]
    async fn malformed_json_fails_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.complete_chat(&test_request()).await.unwrap_err();
        assert!(err.to_string().contains("parse"), "got: {err}");
    }
}
