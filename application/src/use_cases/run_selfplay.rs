//! Run Self-Play use case
//!
//! Orchestrates the bounded deliberation loop over an assembled team:
//! GENERATE, CRITIQUE, NOVELTY, AGGREGATE, DECIDE, repeated until the
//! round cap or convergence. Individual capability failures are absorbed;
//! only a fully failed session surfaces an error.

use std::sync::Arc;
use std::time::Instant;

use roundtable_domain::core::task::Task;
use roundtable_domain::selfplay::aggregate::{round_metadata, score_outputs};
use roundtable_domain::selfplay::outputs::{ActorOutput, CriticOutput, PhilossOutput};
use roundtable_domain::selfplay::pareto::pareto_front;
use roundtable_domain::selfplay::round::{RoundDecision, RoundMetadata, RoundPhase, RoundRecord};
use roundtable_domain::selfplay::session::{Session, select_final_result};
use roundtable_domain::team::agent::Agent;
use roundtable_domain::team::graph::{GraphInvariantError, InteractionGraph};
use roundtable_domain::team::router::SignalRouter;
use serde_json::json;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::engine_params::{ConvergenceParams, EngineParams};
use crate::ports::capabilities::{
    ActorRequest, Capabilities, CapabilityError, CapabilityFactory, CritiqueRequest, Delivery,
    NoveltyRequest,
};
use crate::ports::completion::CompletionError;
use crate::ports::progress::{NoProgress, RoundProgress};
use crate::ports::transcript::{NoTranscript, TranscriptEvent, TranscriptLogger};
use crate::use_cases::shared::cancelled;

/// Errors that can occur during a self-play session
#[derive(Error, Debug)]
pub enum SelfPlayError {
    #[error("Graph invariant violated: {0}")]
    Graph(#[from] GraphInvariantError),

    #[error("No round produced a usable output ({round} rounds attempted)")]
    RoundExecution { round: u32 },

    #[error("Cancelled during round {round} ({phase} phase)")]
    Cancelled { round: u32, phase: RoundPhase },
}

/// Use case for running the self-play deliberation loop
///
/// Capabilities are resolved from the factory once at construction and
/// reused for the whole session.
pub struct SelfPlayEngine {
    capabilities: Capabilities,
    params: EngineParams,
    cancellation_token: Option<CancellationToken>,
    transcript: Arc<dyn TranscriptLogger>,
}

impl SelfPlayEngine {
    pub fn new(factory: &dyn CapabilityFactory, params: EngineParams) -> Self {
        Self {
            capabilities: Capabilities::resolve(factory),
            params,
            cancellation_token: None,
            transcript: Arc::new(NoTranscript),
        }
    }

    /// Attach a cancellation token checked between and within phases.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Attach a transcript sink receiving session lifecycle events.
    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    /// Execute the session with default (no-op) progress
    pub async fn start_game_session(
        &self,
        task: Task,
        agents: Vec<Agent>,
        context: Option<String>,
    ) -> Result<Session, SelfPlayError> {
        self.start_game_session_with_progress(task, agents, context, &NoProgress)
            .await
    }

    /// Execute the session with progress callbacks
    pub async fn start_game_session_with_progress(
        &self,
        task: Task,
        agents: Vec<Agent>,
        context: Option<String>,
        progress: &dyn RoundProgress,
    ) -> Result<Session, SelfPlayError> {
        let graph = InteractionGraph::from_agents(agents)?;
        let mut session = Session::new(task, graph.agents().to_vec());
        let max_rounds = session.task.max_iterations;

        info!(
            "Starting session {} with {} agents, up to {} rounds",
            session.session_id,
            graph.len(),
            max_rounds
        );
        self.transcript.log(TranscriptEvent::new(
            "session_start",
            json!({
                "session_id": session.session_id,
                "task_id": session.task.task_id,
                "agents": graph.len(),
                "max_rounds": max_rounds,
            }),
        ));

        for round in 1..=max_rounds {
            progress.on_round_start(round, max_rounds);

            let record = self
                .run_round(round, &graph, &session, context.as_deref(), progress)
                .await?;

            let failed = record.is_failed();
            let decision = record.decision;
            progress.on_round_complete(round, &decision, record.metadata.pareto_front.len());
            self.transcript.log(TranscriptEvent::new(
                "round_complete",
                json!({
                    "round": round,
                    "failed": failed,
                    "decision": decision.as_str(),
                    "front_size": record.metadata.pareto_front.len(),
                    "average_critical_score": record.metadata.average_critical_score,
                    "average_novelty_score": record.metadata.average_novelty_score,
                    "average_satisfaction_score": record.metadata.average_satisfaction_score,
                }),
            ));
            session.push_round(record);

            if failed {
                warn!("Round {} produced no outputs, stopping early", round);
                break;
            }
            if decision == RoundDecision::Terminate {
                break;
            }
        }

        session.final_result = select_final_result(&session.rounds);
        match &session.final_result {
            Some(result) => {
                info!(
                    "Session {} selected {} from round {}",
                    session.session_id, result.actor_output.output_id, result.source_round
                );
                self.transcript.log(TranscriptEvent::new(
                    "session_complete",
                    json!({
                        "session_id": session.session_id,
                        "rounds": session.rounds.len(),
                        "winner": result.actor_output.output_id.as_str(),
                        "source_round": result.source_round,
                    }),
                ));
                Ok(session)
            }
            None => Err(SelfPlayError::RoundExecution {
                round: session.rounds.len() as u32,
            }),
        }
    }

    /// Run one complete round through all five phases.
    async fn run_round(
        &self,
        round: u32,
        graph: &InteractionGraph,
        session: &Session,
        context: Option<&str>,
        progress: &dyn RoundProgress,
    ) -> Result<RoundRecord, SelfPlayError> {
        if cancelled(&self.cancellation_token) {
            return Err(SelfPlayError::Cancelled {
                round,
                phase: RoundPhase::Generate,
            });
        }

        let started = Instant::now();
        info!("Round {} of {}", round, session.task.max_iterations);

        let actor_outputs = self
            .phase_generate(round, graph, session, context, progress)
            .await?;
        if actor_outputs.is_empty() {
            warn!("Round {}: every agent failed to generate", round);
            return Ok(RoundRecord::failed(round, started.elapsed().as_secs_f64()));
        }

        let critic_outputs = self
            .phase_critique(round, graph, session, &actor_outputs, progress)
            .await?;

        let philoss_outputs = self
            .phase_novelty(round, session, &actor_outputs, progress)
            .await?;

        progress.on_phase_start(round, &RoundPhase::Aggregate, 1);
        let scores = score_outputs(&actor_outputs, &critic_outputs, &philoss_outputs);
        let front = pareto_front(&scores);
        let metadata = round_metadata(&scores, front);
        progress.on_phase_complete(round, &RoundPhase::Aggregate);

        progress.on_phase_start(round, &RoundPhase::Decide, 1);
        let decision = decide(
            round,
            session.task.max_iterations,
            session.last_round(),
            &metadata,
            &self.params.convergence,
        );
        progress.on_phase_complete(round, &RoundPhase::Decide);
        debug!("Round {} decision: {}", round, decision);

        Ok(RoundRecord {
            round_number: round,
            phase: RoundPhase::Decide,
            decision,
            round_time: started.elapsed().as_secs_f64(),
            actor_outputs,
            critic_outputs,
            philoss_outputs,
            metadata,
        })
    }

    /// GENERATE: every worker produces a contribution in parallel.
    async fn phase_generate(
        &self,
        round: u32,
        graph: &InteractionGraph,
        session: &Session,
        context: Option<&str>,
        progress: &dyn RoundProgress,
    ) -> Result<Vec<ActorOutput>, SelfPlayError> {
        let order = SignalRouter::activation_order(graph);
        progress.on_phase_start(round, &RoundPhase::Generate, order.len());

        let limiter = Arc::new(Semaphore::new(self.params.max_in_flight));
        let mut join_set = JoinSet::new();

        for agent in order {
            let actor = Arc::clone(&self.capabilities.actor);
            let limiter = Arc::clone(&limiter);
            let request = ActorRequest {
                agent: agent.clone(),
                task: session.task.clone(),
                context: context.map(str::to_string),
                deliveries: deliveries_for(agent, graph, session),
                iteration: round,
            };
            let agent_id = agent.agent_id.clone();

            join_set.spawn(async move {
                let Ok(_permit) = limiter.acquire_owned().await else {
                    return (
                        agent_id,
                        Err(CapabilityError::Completion(CompletionError::RequestFailed(
                            "concurrency limiter closed".to_string(),
                        ))),
                    );
                };
                let result = actor.generate(request).await;
                (agent_id, result)
            });
        }

        let mut outputs = Vec::new();
        while let Some(result) = self
            .join_next_cancellable(&mut join_set, round, RoundPhase::Generate)
            .await?
        {
            match result {
                Ok((agent_id, Ok(output))) => {
                    debug!("Agent {} produced {}", agent_id, output.output_id);
                    progress.on_task_complete(&RoundPhase::Generate, &agent_id, true);
                    outputs.push(output);
                }
                Ok((agent_id, Err(e))) => {
                    warn!("Agent {} failed to generate: {}", agent_id, e);
                    progress.on_task_complete(&RoundPhase::Generate, &agent_id, false);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        // Join order is completion order; keep records deterministic.
        outputs.sort_by(|a, b| a.agent_id.cmp(&b.agent_id));
        progress.on_phase_complete(round, &RoundPhase::Generate);
        Ok(outputs)
    }

    /// CRITIQUE: every producing agent scores every output not its own.
    async fn phase_critique(
        &self,
        round: u32,
        graph: &InteractionGraph,
        session: &Session,
        actor_outputs: &[ActorOutput],
        progress: &dyn RoundProgress,
    ) -> Result<Vec<CriticOutput>, SelfPlayError> {
        let critics: Vec<&Agent> = actor_outputs
            .iter()
            .filter_map(|o| graph.agent(&o.agent_id))
            .collect();
        let task_count = critics.len().saturating_sub(1) * critics.len();
        progress.on_phase_start(round, &RoundPhase::Critique, task_count);

        let limiter = Arc::new(Semaphore::new(self.params.max_in_flight));
        let mut join_set = JoinSet::new();

        for critic in &critics {
            for output in actor_outputs {
                if output.agent_id == critic.agent_id {
                    continue;
                }
                let capability = Arc::clone(&self.capabilities.critic);
                let limiter = Arc::clone(&limiter);
                let request = CritiqueRequest {
                    critic: (*critic).clone(),
                    task_description: session.task.description.clone(),
                    target: output.clone(),
                };
                let critic_id = critic.agent_id.clone();

                join_set.spawn(async move {
                    let Ok(_permit) = limiter.acquire_owned().await else {
                        return (
                            critic_id,
                            Err(CapabilityError::Completion(CompletionError::RequestFailed(
                                "concurrency limiter closed".to_string(),
                            ))),
                        );
                    };
                    let result = capability.critique(request).await;
                    (critic_id, result)
                });
            }
        }

        let mut critiques = Vec::new();
        while let Some(result) = self
            .join_next_cancellable(&mut join_set, round, RoundPhase::Critique)
            .await?
        {
            match result {
                Ok((critic_id, Ok(critique))) => {
                    progress.on_task_complete(&RoundPhase::Critique, &critic_id, true);
                    critiques.push(critique);
                }
                Ok((critic_id, Err(e))) => {
                    warn!("Critic {} failed: {}", critic_id, e);
                    progress.on_task_complete(&RoundPhase::Critique, &critic_id, false);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        critiques.sort_by(|a, b| {
            a.critic_agent_id
                .cmp(&b.critic_agent_id)
                .then(a.target_output_id.cmp(&b.target_output_id))
        });
        progress.on_phase_complete(round, &RoundPhase::Critique);
        Ok(critiques)
    }

    /// NOVELTY: score each surviving output against prior round content.
    async fn phase_novelty(
        &self,
        round: u32,
        session: &Session,
        actor_outputs: &[ActorOutput],
        progress: &dyn RoundProgress,
    ) -> Result<Vec<PhilossOutput>, SelfPlayError> {
        progress.on_phase_start(round, &RoundPhase::Novelty, actor_outputs.len());

        let prior_content = session.content_history();
        let limiter = Arc::new(Semaphore::new(self.params.max_in_flight));
        let mut join_set = JoinSet::new();

        for output in actor_outputs {
            let capability = Arc::clone(&self.capabilities.novelty_checker);
            let limiter = Arc::clone(&limiter);
            let request = NoveltyRequest {
                target: output.clone(),
                prior_content: prior_content.clone(),
            };
            let agent_id = output.agent_id.clone();

            join_set.spawn(async move {
                let Ok(_permit) = limiter.acquire_owned().await else {
                    return (
                        agent_id,
                        Err(CapabilityError::Completion(CompletionError::RequestFailed(
                            "concurrency limiter closed".to_string(),
                        ))),
                    );
                };
                let result = capability.assess(request).await;
                (agent_id, result)
            });
        }

        let mut philoss_outputs = Vec::new();
        while let Some(result) = self
            .join_next_cancellable(&mut join_set, round, RoundPhase::Novelty)
            .await?
        {
            match result {
                Ok((agent_id, Ok(assessment))) => {
                    progress.on_task_complete(&RoundPhase::Novelty, &agent_id, true);
                    philoss_outputs.push(assessment);
                }
                Ok((agent_id, Err(e))) => {
                    warn!("Novelty check for {} failed: {}", agent_id, e);
                    progress.on_task_complete(&RoundPhase::Novelty, &agent_id, false);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        philoss_outputs.sort_by(|a, b| a.target_content_id.cmp(&b.target_content_id));
        progress.on_phase_complete(round, &RoundPhase::Novelty);
        Ok(philoss_outputs)
    }

    /// Await the next joined task, aborting the set if cancellation fires.
    async fn join_next_cancellable<T: 'static>(
        &self,
        join_set: &mut JoinSet<T>,
        round: u32,
        phase: RoundPhase,
    ) -> Result<Option<Result<T, tokio::task::JoinError>>, SelfPlayError> {
        if let Some(token) = &self.cancellation_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    join_set.abort_all();
                    Err(SelfPlayError::Cancelled { round, phase })
                }
                joined = join_set.join_next() => Ok(joined),
            }
        } else {
            Ok(join_set.join_next().await)
        }
    }
}

/// Outputs from the previous round this agent holds a permission edge from.
fn deliveries_for(agent: &Agent, graph: &InteractionGraph, session: &Session) -> Vec<Delivery> {
    let Some(previous) = session.last_round() else {
        return Vec::new();
    };

    let mut deliveries = Vec::new();
    for output in &previous.actor_outputs {
        if output.agent_id == agent.agent_id {
            continue;
        }
        match SignalRouter::check_route(graph, &output.agent_id, &agent.agent_id) {
            Ok(()) => {
                let from_name = graph
                    .agent(&output.agent_id)
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| output.agent_id.to_string());
                deliveries.push(Delivery {
                    from: output.agent_id.clone(),
                    from_name,
                    content: output.content.clone(),
                });
            }
            Err(violation) => {
                debug!("Withheld delivery: {}", violation);
            }
        }
    }
    deliveries
}

/// DECIDE: stop at the round cap, or once improvement stalls while the
/// front has collapsed.
fn decide(
    round: u32,
    max_rounds: u32,
    previous: Option<&RoundRecord>,
    metadata: &RoundMetadata,
    convergence: &ConvergenceParams,
) -> RoundDecision {
    if round >= max_rounds {
        return RoundDecision::Terminate;
    }

    if let Some(previous) = previous {
        let improvement =
            metadata.average_critical_score - previous.metadata.average_critical_score;
        if improvement < convergence.epsilon
            && metadata.pareto_front.len() <= convergence.front_collapse_size
        {
            debug!(
                "Converged: improvement {:.3} below epsilon with front of {}",
                improvement,
                metadata.pareto_front.len()
            );
            return RoundDecision::Terminate;
        }
    }

    RoundDecision::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::capabilities::{ActorPort, CriticPort, NoveltyCheckerPort};
    use async_trait::async_trait;
    use roundtable_domain::selfplay::outputs::OutputId;
    use roundtable_domain::team::role::GeneratedRole;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Produces deterministic content derived from the request.
    struct EchoActor;

    #[async_trait]
    impl ActorPort for EchoActor {
        async fn generate(&self, request: ActorRequest) -> Result<ActorOutput, CapabilityError> {
            Ok(ActorOutput::new(
                request.agent.agent_id.clone(),
                request.iteration,
                format!(
                    "{} round {} saw {} deliveries",
                    request.agent.name,
                    request.iteration,
                    request.deliveries.len()
                ),
                0.1,
            ))
        }
    }

    /// Fails for the listed agent ids, echoes for everyone else.
    struct SelectiveActor {
        failing: Vec<&'static str>,
    }

    #[async_trait]
    impl ActorPort for SelectiveActor {
        async fn generate(&self, request: ActorRequest) -> Result<ActorOutput, CapabilityError> {
            if self.failing.contains(&request.agent.agent_id.as_str()) {
                return Err(CapabilityError::Completion(CompletionError::Timeout));
            }
            EchoActor.generate(request).await
        }
    }

    struct FailingActor;

    #[async_trait]
    impl ActorPort for FailingActor {
        async fn generate(&self, _request: ActorRequest) -> Result<ActorOutput, CapabilityError> {
            Err(CapabilityError::Completion(CompletionError::EmptyResponse))
        }
    }

    /// Scores each target from a fixed table, neutral when unlisted.
    struct TableCritic {
        by_target: BTreeMap<&'static str, (f64, f64)>,
    }

    impl TableCritic {
        fn new(entries: &[(&'static str, f64, f64)]) -> Self {
            Self {
                by_target: entries
                    .iter()
                    .map(|(id, overall, satisfaction)| (*id, (*overall, *satisfaction)))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl CriticPort for TableCritic {
        async fn critique(
            &self,
            request: CritiqueRequest,
        ) -> Result<CriticOutput, CapabilityError> {
            let (overall, satisfaction) = self
                .by_target
                .get(request.target.agent_id.as_str())
                .copied()
                .unwrap_or((5.0, 0.5));
            Ok(CriticOutput::new(
                request.critic.agent_id.clone(),
                request.target.output_id.clone(),
                overall,
                satisfaction,
                "scored from table",
            ))
        }
    }

    struct FailingCritic;

    #[async_trait]
    impl CriticPort for FailingCritic {
        async fn critique(
            &self,
            _request: CritiqueRequest,
        ) -> Result<CriticOutput, CapabilityError> {
            Err(CapabilityError::Unparseable {
                what: "critic scores",
            })
        }
    }

    struct ConstNovelty(f64);

    #[async_trait]
    impl NoveltyCheckerPort for ConstNovelty {
        async fn assess(&self, request: NoveltyRequest) -> Result<PhilossOutput, CapabilityError> {
            Ok(PhilossOutput::new(request.target.output_id.clone(), self.0))
        }
    }

    struct StaticFactory {
        actor: Arc<dyn ActorPort>,
        critic: Arc<dyn CriticPort>,
        novelty_checker: Arc<dyn NoveltyCheckerPort>,
    }

    impl CapabilityFactory for StaticFactory {
        fn actor(&self) -> Arc<dyn ActorPort> {
            Arc::clone(&self.actor)
        }
        fn critic(&self) -> Arc<dyn CriticPort> {
            Arc::clone(&self.critic)
        }
        fn novelty_checker(&self) -> Arc<dyn NoveltyCheckerPort> {
            Arc::clone(&self.novelty_checker)
        }
    }

    struct CollectingTranscript {
        event_types: Mutex<Vec<String>>,
    }

    impl TranscriptLogger for CollectingTranscript {
        fn log(&self, event: TranscriptEvent) {
            self.event_types.lock().unwrap().push(event.event_type);
        }
    }

    // ==================== Test Helpers ====================

    fn engine(
        actor: Arc<dyn ActorPort>,
        critic: Arc<dyn CriticPort>,
        novelty: Arc<dyn NoveltyCheckerPort>,
        params: EngineParams,
    ) -> SelfPlayEngine {
        SelfPlayEngine::new(
            &StaticFactory {
                actor,
                critic,
                novelty_checker: novelty,
            },
            params,
        )
    }

    /// Three workers: Architect (lead) may reach everyone, the others may
    /// only send back to the Architect.
    fn team_agents() -> Vec<Agent> {
        let roles = vec![
            GeneratedRole::new("Architect", "design").with_priority_level(9),
            GeneratedRole::new("Builder", "implementation").with_priority_level(5),
            GeneratedRole::new("Tester", "verification").with_priority_level(2),
        ];
        let mut permissions = BTreeMap::new();
        permissions.insert(
            "Architect".to_string(),
            vec!["Builder".to_string(), "Tester".to_string()],
        );
        permissions.insert("Builder".to_string(), vec!["Architect".to_string()]);
        permissions.insert("Tester".to_string(), vec!["Architect".to_string()]);
        InteractionGraph::assemble(&roles, &permissions)
            .unwrap()
            .agents()
            .to_vec()
    }

    /// Trade-off scores keep two outputs on the front, so convergence
    /// never fires and sessions run to the round cap.
    fn trade_off_critic() -> Arc<TableCritic> {
        Arc::new(TableCritic::new(&[
            ("agent-01", 9.0, 0.2),
            ("agent-02", 5.0, 0.9),
            ("agent-03", 4.0, 0.1),
        ]))
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_session_runs_to_round_cap() {
        let engine = engine(
            Arc::new(EchoActor),
            trade_off_critic(),
            Arc::new(ConstNovelty(0.5)),
            EngineParams::default(),
        );

        let task = Task::new("design a library").with_max_iterations(3);
        let session = engine
            .start_game_session(task, team_agents(), None)
            .await
            .unwrap();

        assert_eq!(session.rounds.len(), 3);
        assert_eq!(session.rounds[0].decision, RoundDecision::Continue);
        assert_eq!(session.rounds[2].decision, RoundDecision::Terminate);

        let result = session.final_result.unwrap();
        assert_eq!(result.source_round, 3);
        assert!(result.selected_from_front);
        // Highest critical score wins the front.
        assert_eq!(result.actor_output.agent_id.as_str(), "agent-01");
    }

    #[tokio::test]
    async fn test_convergence_terminates_early() {
        // One output dominates, so the front collapses to a single
        // candidate and scores stay flat between rounds.
        let critic = Arc::new(TableCritic::new(&[
            ("agent-01", 9.0, 0.9),
            ("agent-02", 5.0, 0.5),
            ("agent-03", 5.0, 0.5),
        ]));
        let engine = engine(
            Arc::new(EchoActor),
            critic,
            Arc::new(ConstNovelty(0.5)),
            EngineParams::default(),
        );

        let task = Task::new("t").with_max_iterations(5);
        let session = engine
            .start_game_session(task, team_agents(), None)
            .await
            .unwrap();

        assert_eq!(session.rounds.len(), 2);
        assert_eq!(session.rounds[1].decision, RoundDecision::Terminate);
        assert_eq!(session.rounds[1].metadata.pareto_front.len(), 1);
    }

    #[tokio::test]
    async fn test_single_survivor_still_produces_result() {
        let actor = Arc::new(SelectiveActor {
            failing: vec!["agent-01", "agent-03"],
        });
        let engine = engine(
            actor,
            Arc::new(TableCritic::new(&[])),
            Arc::new(ConstNovelty(0.5)),
            EngineParams::default(),
        );

        let task = Task::new("t").with_max_iterations(1);
        let session = engine
            .start_game_session(task, team_agents(), None)
            .await
            .unwrap();

        let round = &session.rounds[0];
        assert_eq!(round.actor_outputs.len(), 1);
        // Nobody else produced, so no cross-critiques exist.
        assert!(round.critic_outputs.is_empty());
        assert_eq!(
            round.metadata.pareto_front,
            vec![OutputId::new("agent-02:r1")]
        );

        let result = session.final_result.unwrap();
        assert_eq!(result.actor_output.agent_id.as_str(), "agent-02");
    }

    #[tokio::test]
    async fn test_all_agents_failing_surfaces_round_execution_error() {
        let engine = engine(
            Arc::new(FailingActor),
            Arc::new(TableCritic::new(&[])),
            Arc::new(ConstNovelty(0.5)),
            EngineParams::default(),
        );

        let task = Task::new("t").with_max_iterations(3);
        let err = engine
            .start_game_session(task, team_agents(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, SelfPlayError::RoundExecution { round: 1 }));
    }

    #[tokio::test]
    async fn test_critic_failures_are_absorbed() {
        let engine = engine(
            Arc::new(EchoActor),
            Arc::new(FailingCritic),
            Arc::new(ConstNovelty(0.5)),
            EngineParams::default(),
        );

        let task = Task::new("t").with_max_iterations(1);
        let session = engine
            .start_game_session(task, team_agents(), None)
            .await
            .unwrap();

        let round = &session.rounds[0];
        assert_eq!(round.actor_outputs.len(), 3);
        assert!(round.critic_outputs.is_empty());
        // Uncritiqued outputs score neutrally and identically, so all stay
        // on the front.
        assert_eq!(round.metadata.pareto_front.len(), 3);
        assert!(session.final_result.is_some());
    }

    #[tokio::test]
    async fn test_cancellation_before_first_round() {
        let token = CancellationToken::new();
        token.cancel();

        let engine = engine(
            Arc::new(EchoActor),
            trade_off_critic(),
            Arc::new(ConstNovelty(0.5)),
            EngineParams::default(),
        )
        .with_cancellation(token);

        let task = Task::new("t").with_max_iterations(3);
        let err = engine
            .start_game_session(task, team_agents(), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SelfPlayError::Cancelled {
                round: 1,
                phase: RoundPhase::Generate
            }
        ));
    }

    #[tokio::test]
    async fn test_deliveries_follow_permission_edges() {
        let engine = engine(
            Arc::new(EchoActor),
            trade_off_critic(),
            Arc::new(ConstNovelty(0.5)),
            EngineParams::default(),
        );

        let task = Task::new("t").with_max_iterations(2);
        let session = engine
            .start_game_session(task, team_agents(), None)
            .await
            .unwrap();

        // Second round outputs are sorted by agent id. The Architect
        // receives from both teammates; they only receive from the
        // Architect.
        let outputs = &session.rounds[1].actor_outputs;
        assert!(outputs[0].content.contains("saw 2 deliveries"));
        assert!(outputs[1].content.contains("saw 1 deliveries"));
        assert!(outputs[2].content.contains("saw 1 deliveries"));
    }

    #[tokio::test]
    async fn test_transcript_receives_lifecycle_events() {
        let transcript = Arc::new(CollectingTranscript {
            event_types: Mutex::new(Vec::new()),
        });
        let engine = engine(
            Arc::new(EchoActor),
            trade_off_critic(),
            Arc::new(ConstNovelty(0.5)),
            EngineParams::default(),
        )
        .with_transcript(transcript.clone());

        let task = Task::new("t").with_max_iterations(1);
        engine
            .start_game_session(task, team_agents(), None)
            .await
            .unwrap();

        let events = transcript.event_types.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                "session_start".to_string(),
                "round_complete".to_string(),
                "session_complete".to_string(),
            ]
        );
    }

    // ==================== decide Tests ====================

    fn metadata_with(average: f64, front_size: usize) -> RoundMetadata {
        RoundMetadata {
            average_critical_score: average,
            pareto_front: (0..front_size)
                .map(|i| OutputId::new(format!("o{i}")))
                .collect(),
            ..RoundMetadata::default()
        }
    }

    fn previous_with(average: f64) -> RoundRecord {
        RoundRecord {
            round_number: 1,
            phase: RoundPhase::Decide,
            decision: RoundDecision::Continue,
            round_time: 1.0,
            actor_outputs: vec![ActorOutput::new("agent-01".into(), 1, "c", 0.1)],
            critic_outputs: vec![],
            philoss_outputs: vec![],
            metadata: metadata_with(average, 1),
        }
    }

    #[test]
    fn test_decide_terminates_at_round_cap() {
        let metadata = metadata_with(9.0, 5);
        let convergence = ConvergenceParams::default();
        assert_eq!(
            decide(3, 3, None, &metadata, &convergence),
            RoundDecision::Terminate
        );
    }

    #[test]
    fn test_decide_continues_without_previous_round() {
        let metadata = metadata_with(1.0, 1);
        let convergence = ConvergenceParams::default();
        assert_eq!(
            decide(1, 3, None, &metadata, &convergence),
            RoundDecision::Continue
        );
    }

    #[test]
    fn test_decide_continues_while_improving() {
        let previous = previous_with(5.0);
        let metadata = metadata_with(6.0, 1);
        let convergence = ConvergenceParams::default();
        assert_eq!(
            decide(2, 5, Some(&previous), &metadata, &convergence),
            RoundDecision::Continue
        );
    }

    #[test]
    fn test_decide_terminates_on_collapse_without_improvement() {
        let previous = previous_with(6.0);
        let metadata = metadata_with(6.01, 1);
        let convergence = ConvergenceParams::default();
        assert_eq!(
            decide(2, 5, Some(&previous), &metadata, &convergence),
            RoundDecision::Terminate
        );
    }

    #[test]
    fn test_decide_continues_when_front_is_wide() {
        let previous = previous_with(6.0);
        let metadata = metadata_with(6.0, 3);
        let convergence = ConvergenceParams::default();
        assert_eq!(
            decide(2, 5, Some(&previous), &metadata, &convergence),
            RoundDecision::Continue
        );
    }
}
