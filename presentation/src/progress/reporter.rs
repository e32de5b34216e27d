//! Progress reporting for round execution

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use roundtable_application::ports::progress::RoundProgress;
use roundtable_domain::{AgentId, RoundDecision, RoundPhase};
use std::sync::Mutex;

/// Reports round progress with fancy progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundProgress for ProgressReporter {
    fn on_round_start(&self, round: u32, max_rounds: u32) {
        let _ = self.multi.println(format!(
            "\n{} {} of {}",
            "Round".cyan().bold(),
            round,
            max_rounds
        ));
    }

    fn on_phase_start(&self, round: u32, phase: &RoundPhase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(format!("Round {}: {}", round, phase.display_name()));
        pb.set_message("Starting...");

        *self.phase_bar.lock().unwrap() = Some(pb);
    }

    fn on_task_complete(&self, _phase: &RoundPhase, agent_id: &AgentId, success: bool) {
        if let Some(pb) = self.phase_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), agent_id)
            } else {
                format!("{} {}", "x".red(), agent_id)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, _round: u32, phase: &RoundPhase) {
        if let Some(pb) = self.phase_bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{} complete!", phase.display_name().green()));
        }
    }

    fn on_round_complete(&self, _round: u32, decision: &RoundDecision, front_size: usize) {
        let _ = self.multi.println(format!(
            "  {} {} (front size {})",
            "Decision:".dimmed(),
            decision.as_str(),
            front_size
        ));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl RoundProgress for SimpleProgress {
    fn on_round_start(&self, round: u32, max_rounds: u32) {
        println!("\n{} {} of {}", "Round".bold(), round, max_rounds);
    }

    fn on_phase_start(&self, _round: u32, phase: &RoundPhase, total_tasks: usize) {
        println!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase.display_name().bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: &RoundPhase, agent_id: &AgentId, success: bool) {
        if success {
            println!("  {} {}", "v".green(), agent_id);
        } else {
            println!("  {} {} (failed)", "x".red(), agent_id);
        }
    }

    fn on_phase_complete(&self, _round: u32, _phase: &RoundPhase) {
        println!();
    }

    fn on_round_complete(&self, _round: u32, decision: &RoundDecision, front_size: usize) {
        println!(
            "  {} {} (front size {})",
            "Decision:".dimmed(),
            decision.as_str(),
            front_size
        );
    }
}
