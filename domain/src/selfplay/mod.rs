//! Self-play deliberation: round records, scoring, and session state.
//!
//! A session runs bounded rounds. Within a round, every activated agent
//! produces an [`outputs::ActorOutput`], producers cross-critique each
//! other, a novelty checker scores each output against the session's prior
//! content, and aggregation reduces everything to per-output scores and a
//! Pareto front over (critical, novelty, satisfaction).

pub mod aggregate;
pub mod outputs;
pub mod pareto;
pub mod round;
pub mod scoring;
pub mod session;

pub use aggregate::{OutputScores, round_metadata, score_outputs};
pub use outputs::{ActorOutput, CriticOutput, OutputId, PhilossOutput};
pub use pareto::{dominates, pareto_front};
pub use round::{RoundDecision, RoundMetadata, RoundPhase, RoundRecord};
pub use scoring::{CriticAssessment, parse_critic_response, parse_novelty_response};
pub use session::{FinalResult, Session, select_final_result};
