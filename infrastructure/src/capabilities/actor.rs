//! LLM-backed actor capability.

use async_trait::async_trait;
use roundtable_application::ports::capabilities::{ActorPort, ActorRequest, CapabilityError};
use roundtable_application::ports::completion::{CompletionPort, CompletionRequest};
use roundtable_domain::prompt::PromptTemplate;
use roundtable_domain::selfplay::outputs::ActorOutput;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Generates an agent's contribution via one completion call.
///
/// The full response text becomes the output content; generation time is
/// measured around the call.
pub struct LlmActor<G> {
    gateway: Arc<G>,
    temperature: f32,
}

impl<G> LlmActor<G> {
    pub fn new(gateway: Arc<G>, temperature: f32) -> Self {
        Self {
            gateway,
            temperature,
        }
    }
}

#[async_trait]
impl<G: CompletionPort + 'static> ActorPort for LlmActor<G> {
    async fn generate(&self, request: ActorRequest) -> Result<ActorOutput, CapabilityError> {
        let system = PromptTemplate::actor_system(&request.agent);
        let deliveries: Vec<(String, String)> = request
            .deliveries
            .iter()
            .map(|d| (d.from_name.clone(), d.content.clone()))
            .collect();
        let prompt = PromptTemplate::actor_prompt(
            &request.task,
            request.context.as_deref(),
            &deliveries,
            request.iteration,
        );

        let started = Instant::now();
        let content = self
            .gateway
            .complete(&CompletionRequest::new(system, prompt).with_temperature(self.temperature))
            .await?;
        let generation_time = started.elapsed().as_secs_f64();

        debug!(
            "Agent {} generated {} bytes in {:.2}s",
            request.agent.agent_id,
            content.len(),
            generation_time
        );
        Ok(ActorOutput::new(
            request.agent.agent_id,
            request.iteration,
            content,
            generation_time,
        ))
    }
}
