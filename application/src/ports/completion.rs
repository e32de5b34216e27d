//! Text completion port
//!
//! Defines the interface for single-shot text generation against an LLM
//! provider. One request, one response; retry policy belongs to callers.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a completion call
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Empty response")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// One self-contained generation request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt establishing the caller's role
    pub system: String,
    /// User prompt with the actual work
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature: 0.7,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Gateway for single-shot text generation
///
/// This port defines how the application layer reaches an LLM provider.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Send one request and return the full response text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
