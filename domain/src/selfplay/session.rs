//! Session state and final result selection.
//!
//! A [`Session`] is the append-only record of one self-play run: the task,
//! the assembled team, every round's record, and the final result chosen at
//! termination. External consumers (console output, report writers) read it;
//! nothing mutates a round after it is pushed.

use serde::{Deserialize, Serialize};

use crate::core::task::Task;
use crate::selfplay::aggregate::score_outputs;
use crate::selfplay::outputs::ActorOutput;
use crate::selfplay::round::RoundRecord;
use crate::team::agent::Agent;
use crate::util::uuid_v4;

/// The output a session settled on, plus its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalResult {
    pub actor_output: ActorOutput,
    /// Round the winning output was generated in
    pub source_round: u32,
    /// False when the last round failed and selection fell back to an
    /// earlier round's front
    pub selected_from_front: bool,
}

/// One complete self-play run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub task: Task,
    pub agents: Vec<Agent>,
    pub rounds: Vec<RoundRecord>,
    pub final_result: Option<FinalResult>,
}

impl Session {
    pub fn new(task: Task, agents: Vec<Agent>) -> Self {
        Self {
            session_id: uuid_v4(),
            task,
            agents,
            rounds: Vec::new(),
            final_result: None,
        }
    }

    pub fn push_round(&mut self, record: RoundRecord) {
        self.rounds.push(record);
    }

    pub fn last_round(&self) -> Option<&RoundRecord> {
        self.rounds.last()
    }

    /// Every output content generated so far, oldest first. Novelty in a new
    /// round is assessed against this.
    pub fn content_history(&self) -> Vec<String> {
        self.rounds
            .iter()
            .flat_map(|r| r.actor_outputs.iter().map(|o| o.content.clone()))
            .collect()
    }
}

/// Select the winning output from a finished sequence of rounds.
///
/// Walks backwards to the latest round with surviving outputs and ranks
/// that round's Pareto front by aggregated critical score, breaking ties
/// by satisfaction and then by lower generation time. Returns `None` when
/// no round ever produced an output.
pub fn select_final_result(rounds: &[RoundRecord]) -> Option<FinalResult> {
    let last_number = rounds.last()?.round_number;
    let record = rounds.iter().rev().find(|r| !r.is_failed())?;

    let scores = score_outputs(
        &record.actor_outputs,
        &record.critic_outputs,
        &record.philoss_outputs,
    );
    let mut candidates: Vec<usize> = (0..record.actor_outputs.len())
        .filter(|&i| record.metadata.pareto_front.contains(&scores[i].output_id))
        .collect();
    if candidates.is_empty() {
        candidates = (0..record.actor_outputs.len()).collect();
    }

    let best = candidates.into_iter().max_by(|&a, &b| {
        scores[a]
            .critical
            .total_cmp(&scores[b].critical)
            .then(scores[a].satisfaction.total_cmp(&scores[b].satisfaction))
            .then(
                record.actor_outputs[b]
                    .generation_time
                    .total_cmp(&record.actor_outputs[a].generation_time),
            )
    })?;

    Some(FinalResult {
        actor_output: record.actor_outputs[best].clone(),
        source_round: record.round_number,
        selected_from_front: record.round_number == last_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selfplay::outputs::CriticOutput;
    use crate::selfplay::pareto::pareto_front;
    use crate::selfplay::round::{RoundDecision, RoundMetadata, RoundPhase};
    use crate::team::agent::AgentId;

    fn output(agent: &str, round: u32, time: f64) -> ActorOutput {
        ActorOutput::new(AgentId::new(agent), round, format!("{agent} answer"), time)
    }

    fn critique(target: &ActorOutput, overall: f64, satisfaction: f64) -> CriticOutput {
        CriticOutput::new(
            AgentId::new("critic"),
            target.output_id.clone(),
            overall,
            satisfaction,
            "",
        )
    }

    fn record(round: u32, outputs: Vec<ActorOutput>, critiques: Vec<CriticOutput>) -> RoundRecord {
        let scores = score_outputs(&outputs, &critiques, &[]);
        let front = pareto_front(&scores);
        RoundRecord {
            round_number: round,
            phase: RoundPhase::Decide,
            decision: RoundDecision::Terminate,
            round_time: 1.0,
            actor_outputs: outputs,
            critic_outputs: critiques,
            philoss_outputs: vec![],
            metadata: RoundMetadata {
                pareto_front: front,
                ..RoundMetadata::default()
            },
        }
    }

    #[test]
    fn highest_critical_score_wins() {
        let a = output("agent-01", 1, 1.0);
        let b = output("agent-02", 1, 1.0);
        let critiques = vec![critique(&a, 6.0, 0.5), critique(&b, 9.0, 0.5)];
        let rounds = vec![record(1, vec![a, b.clone()], critiques)];

        let result = select_final_result(&rounds).unwrap();
        assert_eq!(result.actor_output.output_id, b.output_id);
        assert_eq!(result.source_round, 1);
        assert!(result.selected_from_front);
    }

    #[test]
    fn critical_tie_broken_by_satisfaction() {
        let a = output("agent-01", 1, 1.0);
        let b = output("agent-02", 1, 1.0);
        let critiques = vec![critique(&a, 8.0, 0.9), critique(&b, 8.0, 0.4)];
        let rounds = vec![record(1, vec![a.clone(), b], critiques)];

        let result = select_final_result(&rounds).unwrap();
        assert_eq!(result.actor_output.output_id, a.output_id);
    }

    #[test]
    fn full_score_tie_broken_by_lower_generation_time() {
        let a = output("agent-01", 1, 4.2);
        let b = output("agent-02", 1, 0.8);
        let critiques = vec![critique(&a, 8.0, 0.5), critique(&b, 8.0, 0.5)];
        let rounds = vec![record(1, vec![a, b.clone()], critiques)];

        let result = select_final_result(&rounds).unwrap();
        assert_eq!(result.actor_output.output_id, b.output_id);
    }

    #[test]
    fn failed_last_round_falls_back_to_prior_round() {
        let a = output("agent-01", 1, 1.0);
        let critiques = vec![critique(&a, 7.0, 0.5)];
        let rounds = vec![
            record(1, vec![a.clone()], critiques),
            RoundRecord::failed(2, 0.5),
        ];

        let result = select_final_result(&rounds).unwrap();
        assert_eq!(result.actor_output.output_id, a.output_id);
        assert_eq!(result.source_round, 1);
        assert!(!result.selected_from_front);
    }

    #[test]
    fn all_rounds_failed_yields_none() {
        let rounds = vec![RoundRecord::failed(1, 0.1), RoundRecord::failed(2, 0.1)];
        assert!(select_final_result(&rounds).is_none());
        assert!(select_final_result(&[]).is_none());
    }

    #[test]
    fn selection_only_considers_front_members() {
        let a = output("agent-01", 1, 1.0);
        let b = output("agent-02", 1, 1.0);
        let critiques = vec![critique(&a, 9.0, 0.9), critique(&b, 5.0, 0.5)];
        let mut rec = record(1, vec![a, b.clone()], critiques);
        // Force the front to exclude the stronger output.
        rec.metadata.pareto_front = vec![b.output_id.clone()];

        let result = select_final_result(&[rec]).unwrap();
        assert_eq!(result.actor_output.output_id, b.output_id);
    }

    #[test]
    fn content_history_spans_all_rounds() {
        let task = Task::new("demo task");
        let mut session = Session::new(task, vec![]);
        session.push_round(record(1, vec![output("agent-01", 1, 1.0)], vec![]));
        session.push_round(record(2, vec![output("agent-01", 2, 1.0)], vec![]));

        let history = session.content_history();
        assert_eq!(history.len(), 2);
        assert!(history[0].contains("agent-01"));
        assert_eq!(session.last_round().unwrap().round_number, 2);
    }
}
