//! LLM-backed capability adapters.
//!
//! Implements the application's capability ports on top of a
//! [`CompletionPort`](roundtable_application::CompletionPort) gateway.
//! [`LlmCapabilityRegistry`] is the factory the engine resolves from at
//! process start; the three adapters share the gateway behind [`Arc`](std::sync::Arc).

mod actor;
mod critic;
mod novelty;
mod registry;

pub use actor::LlmActor;
pub use critic::LlmCritic;
pub use novelty::LlmNoveltyChecker;
pub use registry::LlmCapabilityRegistry;
