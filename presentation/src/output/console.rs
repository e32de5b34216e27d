//! Console output formatter for sessions

use crate::output::formatter::SessionFormatter;
use colored::Colorize;
use roundtable_domain::{Agent, AgentId, RoundRecord, Session};

/// Formats sessions for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete session, round by round
    pub fn format(session: &Session) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("Roundtable Session"));
        output.push('\n');

        // Task
        output.push_str(&format!(
            "{} {}\n\n",
            "Task:".cyan().bold(),
            session.task.description
        ));

        // Team
        output.push_str(&format!(
            "{} {}\n",
            "Team:".cyan().bold(),
            session
                .agents
                .iter()
                .filter(|a| !a.is_requester)
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));

        for round in &session.rounds {
            output.push_str(&Self::format_round(session, round));
        }

        // Final result
        output.push_str(&Self::section_header("Final Result"));
        match &session.final_result {
            Some(result) => {
                let banner = format!(
                    "── {} ({}, round {}) ──",
                    Self::agent_name(session, &result.actor_output.agent_id),
                    result.actor_output.output_id,
                    result.source_round
                );
                output.push_str(&format!("\n{}\n", banner.yellow().bold()));
                if !result.selected_from_front {
                    output.push_str(&format!(
                        "{}\n",
                        "(final round failed; selected from an earlier round)".dimmed()
                    ));
                }
                output.push_str(&format!("{}\n", result.actor_output.content));
            }
            None => {
                output.push_str(&format!(
                    "\n{}\n",
                    "No round produced a usable output.".red()
                ));
            }
        }

        output.push_str(&Self::footer());

        output
    }

    fn format_round(session: &Session, round: &RoundRecord) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header(&format!(
            "Round {}",
            round.round_number
        )));

        if round.is_failed() {
            output.push_str(&format!("\n{}\n", "All agents failed this round.".red()));
            return output;
        }

        for actor in &round.actor_outputs {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!(
                    "── {} ({}) ──",
                    Self::agent_name(session, &actor.agent_id),
                    actor.output_id
                )
                .yellow()
                .bold(),
                actor.content
            ));
        }

        if !round.critic_outputs.is_empty() {
            output.push_str(&format!("\n{}\n", "Critiques:".cyan().bold()));
            for critique in &round.critic_outputs {
                output.push_str(&format!(
                    "  * {} on {}: {:.1}/10 - {}\n",
                    critique.critic_agent_id,
                    critique.target_output_id,
                    critique.overall_score,
                    critique.summary_critique
                ));
            }
        }

        if !round.philoss_outputs.is_empty() {
            output.push_str(&format!("\n{}\n", "Novelty:".cyan().bold()));
            for novelty in &round.philoss_outputs {
                output.push_str(&format!(
                    "  * {}: {:.2}\n",
                    novelty.target_content_id, novelty.novelty_score
                ));
            }
        }

        output.push_str(&format!(
            "\n{} {}\n",
            "Pareto front:".green().bold(),
            round
                .metadata
                .pareto_front
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        output.push_str(&format!(
            "{} critical {:.1}, novelty {:.2}, satisfaction {:.2}\n",
            "Averages:".dimmed(),
            round.metadata.average_critical_score,
            round.metadata.average_novelty_score,
            round.metadata.average_satisfaction_score
        ));
        output.push_str(&format!(
            "{} {} ({:.1}s)\n",
            "Decision:".dimmed(),
            round.decision.as_str(),
            round.round_time
        ));

        output
    }

    /// Format as JSON
    pub fn format_json(session: &Session) -> String {
        serde_json::to_string_pretty(session).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final result only (concise output)
    pub fn format_result_only(session: &Session) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Roundtable Result ===".cyan().bold()
        ));

        output.push_str(&format!(
            "{} {}\n\n",
            "Task:".bold(),
            session.task.description
        ));

        output.push_str(&format!(
            "{} {} agents, {} rounds\n\n",
            "Deliberated:".dimmed(),
            session.agents.iter().filter(|a| !a.is_requester).count(),
            session.rounds.len()
        ));

        match &session.final_result {
            Some(result) => {
                output.push_str(&result.actor_output.content);
                output.push('\n');
            }
            None => {
                output.push_str(&format!(
                    "{}\n",
                    "No round produced a usable output.".red()
                ));
            }
        }

        output
    }

    /// Format the team roster without running any rounds
    pub fn format_team(agents: &[Agent]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Roundtable Team"));
        output.push('\n');

        for agent in agents {
            output.push_str(&format!(
                "\n{}\n",
                format!("── {} ──", agent.name).yellow().bold()
            ));
            output.push_str(&format!(
                "  {} {} (priority {})\n",
                "Role:".cyan(),
                agent.role,
                agent.priority_level
            ));
            if !agent.responsibilities.is_empty() {
                output.push_str(&format!(
                    "  {} {}\n",
                    "Responsibilities:".cyan(),
                    agent.responsibilities.join("; ")
                ));
            }
            if !agent.skills.is_empty() {
                output.push_str(&format!(
                    "  {} {}\n",
                    "Skills:".cyan(),
                    agent.skills.join(", ")
                ));
            }
            if !agent.connection_permissions.is_empty() {
                output.push_str(&format!(
                    "  {} {}\n",
                    "Sends to:".cyan(),
                    agent
                        .connection_permissions
                        .iter()
                        .map(|id| id.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
        }

        output.push_str(&Self::footer());

        output
    }

    fn agent_name(session: &Session, agent_id: &AgentId) -> String {
        session
            .agents
            .iter()
            .find(|a| &a.agent_id == agent_id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| agent_id.to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl SessionFormatter for ConsoleFormatter {
    fn format(&self, session: &Session) -> String {
        Self::format(session)
    }

    fn format_json(&self, session: &Session) -> String {
        Self::format_json(session)
    }

    fn format_result_only(&self, session: &Session) -> String {
        Self::format_result_only(session)
    }
}
