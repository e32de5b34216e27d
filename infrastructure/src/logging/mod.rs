//! Logging infrastructure - structured session transcripts.
//!
//! Provides [`JsonlTranscript`], a JSONL file writer that implements the
//! [`TranscriptLogger`](roundtable_application::TranscriptLogger) port.

mod jsonl_transcript;

pub use jsonl_transcript::JsonlTranscript;
