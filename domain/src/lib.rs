//! Domain layer for roundtable
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Team
//!
//! A task is handed to an ad-hoc team of agents. Roles are generated per
//! task, wired into an [`team::InteractionGraph`] whose synthetic requester
//! node injects the task and collects the result. Permission edges decide
//! which agents may hand intermediate outputs to each other.
//!
//! ## Self-play
//!
//! The team deliberates over bounded rounds. Each round produces actor
//! outputs, cross-critiques, and novelty scores, aggregates them into a
//! Pareto front over (critical, novelty, satisfaction), and decides whether
//! another round is worth running.

pub mod core;
pub mod extract;
pub mod prompt;
pub mod selfplay;
pub mod team;
pub mod util;

// Re-export commonly used types
pub use core::task::Task;
pub use extract::{ExtractError, extract_json_payload};
pub use prompt::PromptTemplate;
pub use selfplay::{
    aggregate::{NEUTRAL_CRITICAL, NEUTRAL_NOVELTY, NEUTRAL_SATISFACTION, OutputScores, round_metadata, score_outputs},
    outputs::{ActorOutput, CriticOutput, OutputId, PhilossOutput},
    pareto::{dominates, pareto_front},
    round::{RoundDecision, RoundMetadata, RoundPhase, RoundRecord},
    scoring::{CriticAssessment, parse_critic_response, parse_novelty_response},
    session::{FinalResult, Session, select_final_result},
};
pub use team::{
    agent::{Agent, AgentId, REQUESTER_AGENT_ID},
    graph::{GraphInvariantError, InteractionGraph},
    permissions::{PermissionAssignmentError, parse_permission_map},
    role::{GeneratedRole, RoleGenerationError, parse_generated_roles},
    router::{ProtocolViolation, SignalRouter},
};
