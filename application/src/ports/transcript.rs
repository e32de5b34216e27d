//! Transcript logging port
//!
//! Defines the interface for recording session events as they happen.
//! The engine emits events; an infrastructure adapter decides where they
//! go (JSONL file, test buffer). Logging must never fail the session, so
//! the contract is fire-and-forget.

use serde_json::Value;

/// One loggable event in a session's lifetime.
#[derive(Debug, Clone)]
pub struct TranscriptEvent {
    /// Event kind, e.g. `"round_start"` or `"actor_output"`
    pub event_type: String,
    /// Structured event data
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }
}

/// Sink for session events
pub trait TranscriptLogger: Send + Sync {
    /// Record one event. Failures are swallowed by the implementation.
    fn log(&self, event: TranscriptEvent);
}

/// No-op transcript sink for when nothing should be recorded
pub struct NoTranscript;

impl TranscriptLogger for NoTranscript {
    fn log(&self, _event: TranscriptEvent) {}
}
