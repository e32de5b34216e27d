//! Capability factory backed by a shared completion gateway.

use crate::capabilities::{LlmActor, LlmCritic, LlmNoveltyChecker};
use roundtable_application::ports::capabilities::{
    ActorPort, CapabilityFactory, CriticPort, NoveltyCheckerPort,
};
use roundtable_application::ports::completion::CompletionPort;
use std::sync::Arc;

/// Builds the three LLM capabilities over one gateway.
///
/// The engine resolves this registry exactly once at session construction;
/// every adapter it hands out shares the same client and temperature.
pub struct LlmCapabilityRegistry<G> {
    gateway: Arc<G>,
    temperature: f32,
}

impl<G> LlmCapabilityRegistry<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            temperature: 0.7,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

impl<G: CompletionPort + 'static> CapabilityFactory for LlmCapabilityRegistry<G> {
    fn actor(&self) -> Arc<dyn ActorPort> {
        Arc::new(LlmActor::new(Arc::clone(&self.gateway), self.temperature))
    }

    fn critic(&self) -> Arc<dyn CriticPort> {
        Arc::new(LlmCritic::new(Arc::clone(&self.gateway), self.temperature))
    }

    fn novelty_checker(&self) -> Arc<dyn NoveltyCheckerPort> {
        Arc::new(LlmNoveltyChecker::new(
            Arc::clone(&self.gateway),
            self.temperature,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use roundtable_application::ports::capabilities::ActorRequest;
    use roundtable_application::ports::completion::{CompletionError, CompletionRequest};
    use roundtable_domain::core::task::Task;
    use roundtable_domain::team::agent::{Agent, AgentId};
    use roundtable_domain::team::role::GeneratedRole;

    struct FixedGateway;

    #[async_trait]
    impl CompletionPort for FixedGateway {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
            Ok("fixed".to_string())
        }
    }

    #[tokio::test]
    async fn test_registry_resolves_working_capabilities() {
        let registry = LlmCapabilityRegistry::new(Arc::new(FixedGateway)).with_temperature(0.4);
        let actor = registry.actor();

        let role = GeneratedRole::new("Planner", "planning").with_priority_level(5);
        let request = ActorRequest {
            agent: Agent::from_role(AgentId::new("agent-01"), &role),
            task: Task::new("t"),
            context: None,
            deliveries: Vec::new(),
            iteration: 1,
        };

        let output = actor.generate(request).await.unwrap();
        assert_eq!(output.content, "fixed");
    }
}
