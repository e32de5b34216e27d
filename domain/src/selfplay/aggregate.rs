//! Score aggregation - reduce raw critiques and novelty records to
//! per-output and per-round statistics.
//!
//! Outputs that received no critiques score neutrally rather than being
//! dropped; the same holds for a missing novelty record. Aggregation is a
//! pure fold, so the order the raw records arrived in does not matter.

use crate::selfplay::outputs::{ActorOutput, CriticOutput, OutputId, PhilossOutput};
use crate::selfplay::round::RoundMetadata;

/// Critical score assumed for an output nobody critiqued (0-10 scale).
pub const NEUTRAL_CRITICAL: f64 = 5.0;
/// Satisfaction assumed for an output nobody critiqued (0-1 scale).
pub const NEUTRAL_SATISFACTION: f64 = 0.5;
/// Novelty assumed when the checker produced no record (0-1 scale).
pub const NEUTRAL_NOVELTY: f64 = 0.5;

/// Aggregated scores for one actor output.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputScores {
    pub output_id: OutputId,
    /// Mean of critic overall scores, 0-10
    pub critical: f64,
    /// Novelty from the philoss record, 0-1
    pub novelty: f64,
    /// Mean of critic satisfaction scores, 0-1
    pub satisfaction: f64,
}

/// Reduce a round's raw records to per-output scores, in output order.
pub fn score_outputs(
    actor_outputs: &[ActorOutput],
    critic_outputs: &[CriticOutput],
    philoss_outputs: &[PhilossOutput],
) -> Vec<OutputScores> {
    actor_outputs
        .iter()
        .map(|output| {
            let mut overall_sum = 0.0;
            let mut satisfaction_sum = 0.0;
            let mut count = 0usize;
            for critique in critic_outputs {
                if critique.target_output_id == output.output_id {
                    overall_sum += critique.overall_score;
                    satisfaction_sum += critique.satisfaction_score;
                    count += 1;
                }
            }

            let (critical, satisfaction) = if count == 0 {
                (NEUTRAL_CRITICAL, NEUTRAL_SATISFACTION)
            } else {
                (overall_sum / count as f64, satisfaction_sum / count as f64)
            };

            let novelty = philoss_outputs
                .iter()
                .find(|p| p.target_content_id == output.output_id)
                .map(|p| p.novelty_score)
                .unwrap_or(NEUTRAL_NOVELTY);

            OutputScores {
                output_id: output.output_id.clone(),
                critical,
                novelty,
                satisfaction,
            }
        })
        .collect()
}

/// Round-level means over the per-output scores.
///
/// An empty score set yields zeroed averages; failed rounds are recorded
/// through [`crate::selfplay::round::RoundRecord::failed`] instead.
pub fn round_metadata(scores: &[OutputScores], pareto_front: Vec<OutputId>) -> RoundMetadata {
    if scores.is_empty() {
        return RoundMetadata {
            pareto_front,
            ..RoundMetadata::default()
        };
    }

    let n = scores.len() as f64;
    RoundMetadata {
        average_critical_score: scores.iter().map(|s| s.critical).sum::<f64>() / n,
        average_novelty_score: scores.iter().map(|s| s.novelty).sum::<f64>() / n,
        average_satisfaction_score: scores.iter().map(|s| s.satisfaction).sum::<f64>() / n,
        pareto_front,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::agent::AgentId;

    fn output(agent: &str) -> ActorOutput {
        ActorOutput::new(AgentId::new(agent), 1, "content", 0.1)
    }

    fn critique(critic: &str, target: &ActorOutput, overall: f64, satisfaction: f64) -> CriticOutput {
        CriticOutput::new(
            AgentId::new(critic),
            target.output_id.clone(),
            overall,
            satisfaction,
            "summary",
        )
    }

    #[test]
    fn means_over_multiple_critiques() {
        let a = output("agent-01");
        let critiques = vec![
            critique("agent-02", &a, 8.0, 0.9),
            critique("agent-03", &a, 6.0, 0.5),
        ];
        let scores = score_outputs(&[a], &critiques, &[]);
        assert_eq!(scores[0].critical, 7.0);
        assert!((scores[0].satisfaction - 0.7).abs() < 1e-9);
    }

    #[test]
    fn uncritiqued_output_scores_neutral() {
        let a = output("agent-01");
        let scores = score_outputs(&[a], &[], &[]);
        assert_eq!(scores[0].critical, NEUTRAL_CRITICAL);
        assert_eq!(scores[0].satisfaction, NEUTRAL_SATISFACTION);
        assert_eq!(scores[0].novelty, NEUTRAL_NOVELTY);
    }

    #[test]
    fn novelty_comes_from_matching_philoss_record() {
        let a = output("agent-01");
        let philoss = vec![PhilossOutput::new(a.output_id.clone(), 0.85)];
        let scores = score_outputs(&[a], &[], &philoss);
        assert_eq!(scores[0].novelty, 0.85);
    }

    #[test]
    fn critiques_for_other_outputs_are_ignored() {
        let a = output("agent-01");
        let b = output("agent-02");
        let critiques = vec![critique("agent-03", &b, 9.0, 0.9)];
        let scores = score_outputs(&[a.clone(), b], &critiques, &[]);
        assert_eq!(scores[0].critical, NEUTRAL_CRITICAL);
        assert_eq!(scores[1].critical, 9.0);
    }

    #[test]
    fn metadata_averages_across_outputs() {
        let a = output("agent-01");
        let b = output("agent-02");
        let critiques = vec![critique("agent-03", &a, 8.0, 1.0), critique("agent-03", &b, 4.0, 0.0)];
        let scores = score_outputs(&[a, b], &critiques, &[]);
        let metadata = round_metadata(&scores, vec![]);
        assert_eq!(metadata.average_critical_score, 6.0);
        assert_eq!(metadata.average_satisfaction_score, 0.5);
        assert_eq!(metadata.average_novelty_score, NEUTRAL_NOVELTY);
    }

    #[test]
    fn empty_scores_yield_zero_metadata() {
        let metadata = round_metadata(&[], vec![]);
        assert_eq!(metadata.average_critical_score, 0.0);
        assert!(metadata.pareto_front.is_empty());
    }
}
