//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the HTTP completion gateway, the LLM-backed
//! capability registry, configuration file loading, transcript logging,
//! and report rendering.

pub mod capabilities;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod report;

// Re-export commonly used types
pub use capabilities::{LlmActor, LlmCapabilityRegistry, LlmCritic, LlmNoveltyChecker};
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileEngineConfig, FileModelConfig,
    FileOutputConfig, FileTeamConfig,
};
pub use gateway::HttpCompletionGateway;
pub use logging::JsonlTranscript;
pub use report::MarkdownReport;
