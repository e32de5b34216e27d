//! Completion gateway adapters.
//!
//! Provides [`HttpCompletionGateway`], an OpenAI-compatible chat completion
//! client that implements the
//! [`CompletionPort`](roundtable_application::CompletionPort) port.

mod http;

pub use http::HttpCompletionGateway;
