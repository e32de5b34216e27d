//! LLM-backed critic capability.

use async_trait::async_trait;
use roundtable_application::ports::capabilities::{CapabilityError, CriticPort, CritiqueRequest};
use roundtable_application::ports::completion::{CompletionPort, CompletionRequest};
use roundtable_domain::prompt::PromptTemplate;
use roundtable_domain::selfplay::outputs::CriticOutput;
use roundtable_domain::selfplay::scoring::parse_critic_response;
use std::sync::Arc;
use tracing::debug;

/// Scores one contribution via one completion call.
///
/// A response that yields no scores at all is a capability failure; the
/// engine drops that single critique and carries on.
pub struct LlmCritic<G> {
    gateway: Arc<G>,
    temperature: f32,
}

impl<G> LlmCritic<G> {
    pub fn new(gateway: Arc<G>, temperature: f32) -> Self {
        Self {
            gateway,
            temperature,
        }
    }
}

#[async_trait]
impl<G: CompletionPort + 'static> CriticPort for LlmCritic<G> {
    async fn critique(&self, request: CritiqueRequest) -> Result<CriticOutput, CapabilityError> {
        let prompt = PromptTemplate::critic_prompt(
            &request.task_description,
            request.target.agent_id.as_str(),
            &request.target.content,
        );
        let response = self
            .gateway
            .complete(
                &CompletionRequest::new(PromptTemplate::critic_system(), prompt)
                    .with_temperature(self.temperature),
            )
            .await?;

        let Some(assessment) = parse_critic_response(&response) else {
            return Err(CapabilityError::Unparseable {
                what: "critic scores",
            });
        };

        debug!(
            "Critic {} scored {} at {:.1}",
            request.critic.agent_id, request.target.output_id, assessment.overall_score
        );
        Ok(CriticOutput::new(
            request.critic.agent_id,
            request.target.output_id,
            assessment.overall_score,
            assessment.satisfaction_score,
            assessment.summary_critique,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_application::ports::completion::CompletionError;
    use roundtable_domain::selfplay::outputs::ActorOutput;
    use roundtable_domain::team::agent::{Agent, AgentId};
    use roundtable_domain::team::role::GeneratedRole;

    struct FixedGateway(&'static str);

    #[async_trait]
    impl CompletionPort for FixedGateway {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
            Ok(self.0.to_string())
        }
    }

    fn request() -> CritiqueRequest {
        let role = GeneratedRole::new("Reviewer", "review").with_priority_level(5);
        CritiqueRequest {
            critic: Agent::from_role(AgentId::new("agent-02"), &role),
            task_description: "build a parser".to_string(),
            target: ActorOutput::new(AgentId::new("agent-01"), 1, "the draft", 0.2),
        }
    }

    #[tokio::test]
    async fn test_critique_parses_json_scores() {
        let critic = LlmCritic::new(
            Arc::new(FixedGateway(
                r#"{"overall_score": 7.5, "satisfaction_score": 0.8, "summary_critique": "solid"}"#,
            )),
            0.7,
        );

        let critique = critic.critique(request()).await.unwrap();
        assert_eq!(critique.critic_agent_id.as_str(), "agent-02");
        assert_eq!(critique.target_output_id.as_str(), "agent-01:r1");
        assert_eq!(critique.overall_score, 7.5);
        assert_eq!(critique.satisfaction_score, 0.8);
        assert_eq!(critique.summary_critique, "solid");
    }

    #[tokio::test]
    async fn test_critique_without_scores_is_unparseable() {
        let critic = LlmCritic::new(Arc::new(FixedGateway("no numbers here at all")), 0.7);
        let err = critic.critique(request()).await.unwrap_err();
        assert!(matches!(
            err,
            CapabilityError::Unparseable {
                what: "critic scores"
            }
        ));
    }
}
