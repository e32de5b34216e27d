//! Application layer for roundtable
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConvergenceParams, EngineParams};
pub use ports::{
    capabilities::{
        ActorPort, ActorRequest, Capabilities, CapabilityError, CapabilityFactory,
        CritiqueRequest, CriticPort, Delivery, NoveltyCheckerPort, NoveltyRequest,
    },
    completion::{CompletionError, CompletionPort, CompletionRequest},
    progress::{NoProgress, RoundProgress},
    transcript::{NoTranscript, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::build_team::{BuildTeamError, BuildTeamInput, BuildTeamUseCase};
pub use use_cases::run_selfplay::{SelfPlayEngine, SelfPlayError};
