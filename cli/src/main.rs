//! CLI entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use roundtable_application::{BuildTeamInput, BuildTeamUseCase, SelfPlayEngine};
use roundtable_domain::Task;
use roundtable_infrastructure::{
    ConfigLoader, HttpCompletionGateway, JsonlTranscript, LlmCapabilityRegistry, MarkdownReport,
};
use roundtable_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration, then let CLI flags override it
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    if let Some(model) = &cli.model {
        config.model.name = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.model.base_url = base_url.clone();
    }
    if let Some(temperature) = cli.temperature {
        config.model.temperature = temperature;
    }
    if let Some(rounds) = cli.rounds {
        config.engine.max_rounds = rounds;
    }
    if let Some(min_roles) = cli.min_roles {
        config.team.min_roles = min_roles;
    }
    if let Some(max_roles) = cli.max_roles {
        config.team.max_roles = max_roles;
    }
    if let Some(dir) = &cli.report_dir {
        config.output.report_dir = Some(dir.display().to_string());
    }
    if let Some(path) = &cli.transcript {
        config.output.transcript_path = Some(path.display().to_string());
    }

    config.validate()?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    // Task is required for everything past --show-config
    let task_description = match cli.task {
        Some(t) => t,
        None => bail!("A task is required. Run with --help for usage."),
    };

    let mut task = Task::new(task_description).with_max_iterations(config.engine.max_rounds);
    if let Some(domain) = &cli.task_domain {
        task = task.with_domain(domain.clone());
    }
    for requirement in &cli.requirements {
        task = task.with_requirement(requirement.clone());
    }
    for constraint in &cli.constraints {
        task = task.with_constraint(constraint.clone());
    }

    info!("Starting roundtable session");

    // === Dependency Injection ===
    // Create the shared completion gateway
    let api_key = std::env::var(&config.model.api_key_env).ok();
    if api_key.is_none() {
        warn!(
            "{} is not set; requests will be sent unauthenticated",
            config.model.api_key_env
        );
    }

    let gateway = Arc::new(HttpCompletionGateway::new(
        config.model.base_url.clone(),
        config.model.name.clone(),
        api_key,
        config.model.timeout(),
    )?);

    // Print header
    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|           Roundtable - Multi-Agent Self-Play               |");
        println!("+============================================================+");
        println!();
        println!("Task: {}", task.description);
        println!("Model: {}", config.model.name);
        println!();
        println!("Building team...");
    }

    // Generate the role team and its permission graph
    let build_team = BuildTeamUseCase::new(Arc::clone(&gateway));
    let team_input = BuildTeamInput::new(task.clone())
        .with_role_range(config.team.min_roles, config.team.max_roles);
    let graph = build_team.execute(team_input).await?;

    if cli.roster_only {
        println!("{}", ConsoleFormatter::format_team(graph.agents()));
        return Ok(());
    }

    if !cli.quiet {
        println!(
            "Team: {}",
            graph
                .agents()
                .iter()
                .filter(|a| !a.is_requester)
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    // Cancel cleanly on Ctrl-C; in-flight calls finish, no new ones start
    let token = CancellationToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling session");
            ctrl_c_token.cancel();
        }
    });

    let registry =
        LlmCapabilityRegistry::new(Arc::clone(&gateway)).with_temperature(config.model.temperature);
    let mut engine =
        SelfPlayEngine::new(&registry, config.engine.engine_params()).with_cancellation(token);

    if let Some(path) = &config.output.transcript_path
        && let Some(transcript) = JsonlTranscript::new(path)
    {
        info!("Writing transcript to {}", transcript.path().display());
        engine = engine.with_transcript(Arc::new(transcript));
    }

    // Execute with or without progress reporting
    let session = if cli.quiet {
        engine
            .start_game_session(task, graph.agents().to_vec(), cli.context)
            .await?
    } else {
        let progress = ProgressReporter::new();
        engine
            .start_game_session_with_progress(task, graph.agents().to_vec(), cli.context, &progress)
            .await?
    };

    // Output results
    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&session),
        OutputFormat::Result => ConsoleFormatter::format_result_only(&session),
        OutputFormat::Json => ConsoleFormatter::format_json(&session),
    };

    println!("{}", output);

    if let Some(dir) = &config.output.report_dir {
        match MarkdownReport::write_to_dir(&session, Path::new(dir)) {
            Ok(path) => println!("Report written to {}", path.display()),
            Err(e) => warn!("Failed to write report: {}", e),
        }
    }

    Ok(())
}
