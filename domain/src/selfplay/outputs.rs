//! Per-round output records - immutable value types for the self-play flow.
//!
//! - [`ActorOutput`] - one agent's contribution in one round
//! - [`CriticOutput`] - one critic's assessment of one output
//! - [`PhilossOutput`] - the novelty score for one output

use crate::team::agent::AgentId;
use serde::{Deserialize, Serialize};

/// Identifier of a single actor output: `"{agent_id}:r{round}"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutputId(String);

impl OutputId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The canonical id for an agent's output in a given round.
    pub fn for_round(agent_id: &AgentId, round: u32) -> Self {
        Self(format!("{}:r{}", agent_id, round))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OutputId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One agent's generated contribution in one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorOutput {
    pub output_id: OutputId,
    pub agent_id: AgentId,
    /// Round number this output belongs to (1-based)
    pub iteration: u32,
    pub content: String,
    /// Wall-clock seconds the generation call took
    pub generation_time: f64,
}

impl ActorOutput {
    pub fn new(
        agent_id: AgentId,
        iteration: u32,
        content: impl Into<String>,
        generation_time: f64,
    ) -> Self {
        Self {
            output_id: OutputId::for_round(&agent_id, iteration),
            agent_id,
            iteration,
            content: content.into(),
            generation_time,
        }
    }
}

/// One critic's assessment of one actor output.
///
/// Scores are clamped at construction: `overall_score` to 0-10,
/// `satisfaction_score` to 0-1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticOutput {
    pub critic_agent_id: AgentId,
    pub target_output_id: OutputId,
    pub overall_score: f64,
    pub satisfaction_score: f64,
    pub summary_critique: String,
}

impl CriticOutput {
    pub fn new(
        critic_agent_id: AgentId,
        target_output_id: OutputId,
        overall_score: f64,
        satisfaction_score: f64,
        summary_critique: impl Into<String>,
    ) -> Self {
        Self {
            critic_agent_id,
            target_output_id,
            overall_score: overall_score.clamp(0.0, 10.0),
            satisfaction_score: satisfaction_score.clamp(0.0, 1.0),
            summary_critique: summary_critique.into(),
        }
    }
}

/// Novelty assessment for one actor output, clamped to 0-1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhilossOutput {
    pub target_content_id: OutputId,
    pub novelty_score: f64,
}

impl PhilossOutput {
    pub fn new(target_content_id: OutputId, novelty_score: f64) -> Self {
        Self {
            target_content_id,
            novelty_score: novelty_score.clamp(0.0, 1.0),
        }
    }
}
