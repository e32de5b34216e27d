//! Markdown renderer for finished sessions.

use roundtable_domain::selfplay::session::Session;
use std::path::{Path, PathBuf};

/// Renders a session into a self-contained markdown report.
pub struct MarkdownReport;

impl MarkdownReport {
    /// Render the whole session: task, team, every round, final result.
    pub fn render(session: &Session) -> String {
        let mut report = format!(
            "# Roundtable Session Report\n\n\
             Session `{}`\n\n\
             ## Task\n\n\
             {}\n\n\
             - Domain: {}\n\
             - Round limit: {}\n",
            session.session_id,
            session.task.description,
            session.task.domain,
            session.task.max_iterations
        );

        if !session.task.requirements.is_empty() {
            report.push_str("\nRequirements:\n");
            for requirement in &session.task.requirements {
                report.push_str(&format!("- {}\n", requirement));
            }
        }
        if !session.task.constraints.is_empty() {
            report.push_str("\nConstraints:\n");
            for constraint in &session.task.constraints {
                report.push_str(&format!("- {}\n", constraint));
            }
        }

        report.push_str("\n## Team\n\n");
        report.push_str("| Agent | Name | Role | Priority |\n");
        report.push_str("|-------|------|------|----------|\n");
        for agent in &session.agents {
            report.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                agent.agent_id, agent.name, agent.role, agent.priority_level
            ));
        }

        for round in &session.rounds {
            report.push_str(&format!("\n## Round {}\n\n", round.round_number));
            if round.is_failed() {
                report.push_str("Every agent failed to generate in this round.\n");
                continue;
            }

            report.push_str(&format!(
                "- Decision: {}\n\
                 - Duration: {:.1}s\n\
                 - Average critical score: {:.2}\n\
                 - Average novelty score: {:.2}\n\
                 - Average satisfaction score: {:.2}\n\
                 - Pareto front: {}\n",
                round.decision,
                round.round_time,
                round.metadata.average_critical_score,
                round.metadata.average_novelty_score,
                round.metadata.average_satisfaction_score,
                round
                    .metadata
                    .pareto_front
                    .iter()
                    .map(|id| format!("`{}`", id))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));

            for output in &round.actor_outputs {
                report.push_str(&format!(
                    "\n### {} (`{}`)\n\n{}\n",
                    output.agent_id, output.output_id, output.content
                ));

                let critiques: Vec<String> = round
                    .critic_outputs
                    .iter()
                    .filter(|c| c.target_output_id == output.output_id)
                    .map(|c| {
                        format!(
                            "- {} scored {:.1}: {}",
                            c.critic_agent_id, c.overall_score, c.summary_critique
                        )
                    })
                    .collect();
                if !critiques.is_empty() {
                    report.push_str("\nCritiques:\n");
                    report.push_str(&critiques.join("\n"));
                    report.push('\n');
                }
            }
        }

        report.push_str("\n## Final Result\n\n");
        match &session.final_result {
            Some(result) => {
                report.push_str(&format!(
                    "Selected `{}` from round {}{}.\n\n{}\n",
                    result.actor_output.output_id,
                    result.source_round,
                    if result.selected_from_front {
                        ""
                    } else {
                        " (fallback after a failed final round)"
                    },
                    result.actor_output.content
                ));
            }
            None => {
                report.push_str("No round produced a usable output.\n");
            }
        }

        report
    }

    /// Write the rendered report into `dir` with a timestamped filename.
    pub fn write_to_dir(session: &Session, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let filename = format!(
            "roundtable-{}.md",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        let path = dir.join(filename);
        std::fs::write(&path, Self::render(session))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::core::task::Task;
    use roundtable_domain::selfplay::outputs::{ActorOutput, CriticOutput, PhilossOutput};
    use roundtable_domain::selfplay::round::{
        RoundDecision, RoundMetadata, RoundPhase, RoundRecord,
    };
    use roundtable_domain::selfplay::session::select_final_result;
    use roundtable_domain::team::agent::{Agent, AgentId};
    use roundtable_domain::team::role::GeneratedRole;

    fn sample_session() -> Session {
        let task = Task::new("design a cache")
            .with_domain("systems")
            .with_requirement("bounded memory");
        let role = GeneratedRole::new("Architect", "architect").with_priority_level(9);
        let agents = vec![
            Agent::requester(),
            Agent::from_role(AgentId::new("agent-01"), &role),
        ];
        let mut session = Session::new(task, agents);

        let output = ActorOutput::new(AgentId::new("agent-01"), 1, "an LRU with shards", 0.4);
        let output_id = output.output_id.clone();
        session.push_round(RoundRecord {
            round_number: 1,
            phase: RoundPhase::Decide,
            decision: RoundDecision::Terminate,
            round_time: 2.5,
            actor_outputs: vec![output],
            critic_outputs: vec![CriticOutput::new(
                AgentId::new("agent-02"),
                output_id.clone(),
                8.0,
                0.9,
                "clear and complete",
            )],
            philoss_outputs: vec![PhilossOutput::new(output_id.clone(), 1.0)],
            metadata: RoundMetadata {
                average_critical_score: 8.0,
                average_novelty_score: 1.0,
                average_satisfaction_score: 0.9,
                pareto_front: vec![output_id],
            },
        });
        session.final_result = select_final_result(&session.rounds);
        session
    }

    #[test]
    fn test_render_covers_all_sections() {
        let session = sample_session();
        let report = MarkdownReport::render(&session);

        assert!(report.contains("# Roundtable Session Report"));
        assert!(report.contains("design a cache"));
        assert!(report.contains("- bounded memory"));
        assert!(report.contains("| agent-01 | Architect | architect | 9 |"));
        assert!(report.contains("## Round 1"));
        assert!(report.contains("an LRU with shards"));
        assert!(report.contains("agent-02 scored 8.0: clear and complete"));
        assert!(report.contains("## Final Result"));
        assert!(report.contains("Selected `agent-01:r1` from round 1"));
    }

    #[test]
    fn test_render_marks_failed_rounds() {
        let mut session = sample_session();
        session.push_round(RoundRecord::failed(2, 0.5));
        session.final_result = select_final_result(&session.rounds);

        let report = MarkdownReport::render(&session);
        assert!(report.contains("## Round 2"));
        assert!(report.contains("Every agent failed to generate in this round."));
        assert!(report.contains("(fallback after a failed final round)"));
    }

    #[test]
    fn test_render_without_result() {
        let mut session = sample_session();
        session.rounds.clear();
        session.final_result = None;

        let report = MarkdownReport::render(&session);
        assert!(report.contains("No round produced a usable output."));
    }

    #[test]
    fn test_write_to_dir_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("reports");
        let path = MarkdownReport::write_to_dir(&sample_session(), &target).unwrap();

        assert!(path.exists());
        assert!(path.file_name().unwrap().to_string_lossy().ends_with(".md"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Roundtable Session Report"));
    }
}
