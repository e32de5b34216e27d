//! Progress notification port
//!
//! Defines the interface for reporting progress during self-play execution.

use roundtable_domain::selfplay::round::{RoundDecision, RoundPhase};
use roundtable_domain::team::agent::AgentId;

/// Callback for progress updates during a self-play session
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, progress bars, etc.)
pub trait RoundProgress: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, round: u32, phase: &RoundPhase, total_tasks: usize);

    /// Called when one capability call completes within a phase
    fn on_task_complete(&self, phase: &RoundPhase, agent_id: &AgentId, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, round: u32, phase: &RoundPhase);

    // ==================== Round Callbacks ====================

    /// Called when a round starts.
    fn on_round_start(&self, _round: u32, _max_rounds: u32) {}

    /// Called when a round's DECIDE phase has run.
    fn on_round_complete(&self, _round: u32, _decision: &RoundDecision, _front_size: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl RoundProgress for NoProgress {
    fn on_phase_start(&self, _round: u32, _phase: &RoundPhase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: &RoundPhase, _agent_id: &AgentId, _success: bool) {}
    fn on_phase_complete(&self, _round: u32, _phase: &RoundPhase) {}
}
