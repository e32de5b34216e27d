//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for session results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every round
    Full,
    /// Only the final selected output
    Result,
    /// JSON output
    Json,
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Multi-agent self-play - a role team debates a task over scored rounds")]
#[command(long_about = r#"
Roundtable builds a team of role agents for your task and runs them through
self-play rounds until the results stop improving.

Each round has five phases:
1. Generate: every agent produces a candidate output in parallel
2. Critique: agents score each other's outputs (0-10 plus satisfaction)
3. Novelty: each output is compared against everything said so far
4. Aggregate: scores are averaged and a Pareto front of undominated outputs is kept
5. Decide: stop at the round cap or once the front collapses and scores plateau

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./roundtable.toml   Project-level config
3. ~/.config/roundtable/config.toml   Global config

Example:
  roundtable "Design a rate limiter for a public API"
  roundtable --rounds 5 -r "must be horizontally scalable" "Sketch a job queue"
  roundtable --roster-only "Migrate a monolith to services"
"#)]
pub struct Cli {
    /// The task to deliberate on (required unless --show-config)
    pub task: Option<String>,

    /// Domain hint for the task (e.g. "backend", "music theory")
    #[arg(long, value_name = "DOMAIN")]
    pub task_domain: Option<String>,

    /// Requirement the result must satisfy (can be specified multiple times)
    #[arg(short = 'r', long = "requirement", value_name = "TEXT")]
    pub requirements: Vec<String>,

    /// Constraint the result must respect (can be specified multiple times)
    #[arg(short = 'c', long = "constraint", value_name = "TEXT")]
    pub constraints: Vec<String>,

    /// Minimum number of roles in the generated team
    #[arg(long, value_name = "N")]
    pub min_roles: Option<usize>,

    /// Maximum number of roles in the generated team
    #[arg(long, value_name = "N")]
    pub max_roles: Option<usize>,

    /// Maximum number of self-play rounds
    #[arg(long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Extra context passed to every agent alongside the task
    #[arg(long, value_name = "TEXT")]
    pub context: Option<String>,

    /// Build and print the team roster, then exit without running rounds
    #[arg(long)]
    pub roster_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "result")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Model to use for every agent
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible completion endpoint
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Sampling temperature for agent completions
    #[arg(long, value_name = "FLOAT")]
    pub temperature: Option<f32>,

    /// Write a Markdown session report into this directory
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Append a JSONL transcript of session events to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,
}
