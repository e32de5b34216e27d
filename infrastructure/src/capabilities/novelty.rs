//! LLM-backed novelty checker capability.

use async_trait::async_trait;
use roundtable_application::ports::capabilities::{
    CapabilityError, NoveltyCheckerPort, NoveltyRequest,
};
use roundtable_application::ports::completion::{CompletionPort, CompletionRequest};
use roundtable_domain::prompt::PromptTemplate;
use roundtable_domain::selfplay::outputs::PhilossOutput;
use roundtable_domain::selfplay::scoring::parse_novelty_response;
use std::sync::Arc;
use tracing::debug;

/// Scores one contribution's novelty via one completion call.
///
/// With no prior content there is nothing to compare against; the output
/// is trivially novel and no call is made.
pub struct LlmNoveltyChecker<G> {
    gateway: Arc<G>,
    temperature: f32,
}

impl<G> LlmNoveltyChecker<G> {
    pub fn new(gateway: Arc<G>, temperature: f32) -> Self {
        Self {
            gateway,
            temperature,
        }
    }
}

#[async_trait]
impl<G: CompletionPort + 'static> NoveltyCheckerPort for LlmNoveltyChecker<G> {
    async fn assess(&self, request: NoveltyRequest) -> Result<PhilossOutput, CapabilityError> {
        if request.prior_content.is_empty() {
            debug!(
                "No prior content for {}; trivially novel",
                request.target.output_id
            );
            return Ok(PhilossOutput::new(request.target.output_id, 1.0));
        }

        let prompt =
            PromptTemplate::novelty_prompt(&request.target.content, &request.prior_content);
        let response = self
            .gateway
            .complete(
                &CompletionRequest::new(PromptTemplate::novelty_system(), prompt)
                    .with_temperature(self.temperature),
            )
            .await?;

        let Some(score) = parse_novelty_response(&response) else {
            return Err(CapabilityError::Unparseable {
                what: "a novelty score",
            });
        };

        Ok(PhilossOutput::new(request.target.output_id, score))
    }
}
