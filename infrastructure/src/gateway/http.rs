//! OpenAI-compatible chat completion client.
//!
//! Speaks the `/chat/completions` wire shape, which every provider in
//! current use (OpenAI, OpenRouter, Ollama, vLLM, LM Studio) accepts.
//! One request maps to one completion; no streaming.

use async_trait::async_trait;
use roundtable_application::ports::completion::{
    CompletionError, CompletionPort, CompletionRequest,
};
use roundtable_domain::util::preview;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Longest API error body carried into an error message
const ERROR_BODY_PREVIEW_CHARS: usize = 300;

/// HTTP gateway for a single OpenAI-compatible model endpoint.
pub struct HttpCompletionGateway {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl HttpCompletionGateway {
    /// Build a gateway with the request timeout baked into the client.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("roundtable/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_request_body(&self, request: &CompletionRequest) -> Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
            "temperature": request.temperature,
        })
    }

    fn extract_content(body: &Value) -> Result<String, CompletionError> {
        let content = body
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| {
                CompletionError::MalformedResponse(
                    "missing choices[0].message.content".to_string(),
                )
            })?;

        if content.trim().is_empty() {
            return Err(CompletionError::EmptyResponse);
        }
        Ok(content.to_string())
    }
}

#[async_trait]
impl CompletionPort for HttpCompletionGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let mut http_request = self
            .client
            .post(self.endpoint())
            .json(&self.build_request_body(request));
        if let Some(key) = &self.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request.send().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::Timeout
            } else {
                CompletionError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: preview(&message, ERROR_BODY_PREVIEW_CHARS),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        let content = Self::extract_content(&body)?;
        debug!("Completion from {}: {} bytes", self.model, content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> HttpCompletionGateway {
        HttpCompletionGateway::new(
            "https://api.example.com/v1",
            "test-model",
            None,
            Duration::from_secs(30),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = HttpCompletionGateway::new(
            "https://api.example.com/v1/",
            "m",
            None,
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            gateway.endpoint(),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = CompletionRequest::new("be brief", "say hi").with_temperature(0.3);
        let body = gateway().build_request_body(&request);

        assert_eq!(body["model"], "test-model");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be brief");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "say hi");
        assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_extract_content_happy_path() {
        let body = serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "hello there" } }
            ]
        });
        assert_eq!(
            HttpCompletionGateway::extract_content(&body).unwrap(),
            "hello there"
        );
    }

    #[test]
    fn test_extract_content_missing_choices() {
        let body = serde_json::json!({ "error": { "message": "nope" } });
        let err = HttpCompletionGateway::extract_content(&body).unwrap_err();
        assert!(matches!(err, CompletionError::MalformedResponse(_)));
    }

    #[test]
    fn test_extract_content_blank_is_empty_response() {
        let body = serde_json::json!({
            "choices": [
                { "message": { "content": "   \n" } }
            ]
        });
        let err = HttpCompletionGateway::extract_content(&body).unwrap_err();
        assert!(matches!(err, CompletionError::EmptyResponse));
    }
}
