//! Round records - the per-round ledger of a session.

use crate::selfplay::outputs::{ActorOutput, CriticOutput, OutputId, PhilossOutput};
use serde::{Deserialize, Serialize};

/// Phases of a self-play round, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Generate,
    Critique,
    Novelty,
    Aggregate,
    Decide,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Generate => "generate",
            RoundPhase::Critique => "critique",
            RoundPhase::Novelty => "novelty",
            RoundPhase::Aggregate => "aggregate",
            RoundPhase::Decide => "decide",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoundPhase::Generate => "Generate",
            RoundPhase::Critique => "Critique",
            RoundPhase::Novelty => "Novelty",
            RoundPhase::Aggregate => "Aggregate",
            RoundPhase::Decide => "Decide",
        }
    }
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the engine runs another round after this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundDecision {
    Continue,
    Terminate,
}

impl RoundDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundDecision::Continue => "continue",
            RoundDecision::Terminate => "terminate",
        }
    }
}

impl std::fmt::Display for RoundDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregated statistics for one round.
///
/// Field names are the stable consumer contract; they serialize as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundMetadata {
    pub average_critical_score: f64,
    pub average_novelty_score: f64,
    pub average_satisfaction_score: f64,
    /// Undominated outputs of this round, in output order
    pub pareto_front: Vec<OutputId>,
}

/// Everything one round produced. Appended to the session once, never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based
    pub round_number: u32,
    /// Last phase this round reached
    pub phase: RoundPhase,
    pub decision: RoundDecision,
    /// Wall-clock seconds for the whole round
    pub round_time: f64,
    pub actor_outputs: Vec<ActorOutput>,
    pub critic_outputs: Vec<CriticOutput>,
    pub philoss_outputs: Vec<PhilossOutput>,
    pub metadata: RoundMetadata,
}

impl RoundRecord {
    /// Record for a round in which every generation failed.
    ///
    /// No outputs, phase stuck at Generate, decision Terminate.
    pub fn failed(round_number: u32, round_time: f64) -> Self {
        Self {
            round_number,
            phase: RoundPhase::Generate,
            decision: RoundDecision::Terminate,
            round_time,
            actor_outputs: Vec::new(),
            critic_outputs: Vec::new(),
            philoss_outputs: Vec::new(),
            metadata: RoundMetadata::default(),
        }
    }

    /// A round failed when it produced no actor outputs at all.
    pub fn is_failed(&self) -> bool {
        self.actor_outputs.is_empty()
    }

    pub fn output(&self, id: &OutputId) -> Option<&ActorOutput> {
        self.actor_outputs.iter().find(|o| &o.output_id == id)
    }
}
