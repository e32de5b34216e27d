//! Capability ports for the self-play phases
//!
//! The engine works against three named capabilities: an actor that
//! generates contributions, a critic that scores them, and a novelty
//! checker that compares them to prior content. A [`CapabilityFactory`]
//! resolves all three exactly once at session construction; nothing is
//! looked up lazily mid-round.

use std::sync::Arc;

use async_trait::async_trait;
use roundtable_domain::core::task::Task;
use roundtable_domain::selfplay::outputs::{ActorOutput, CriticOutput, PhilossOutput};
use roundtable_domain::team::agent::{Agent, AgentId};
use thiserror::Error;

use crate::ports::completion::CompletionError;

/// Errors that can occur during a capability call
#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("Response did not contain {what}")]
    Unparseable { what: &'static str },
}

/// One contribution handed to an agent from the previous round.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub from: AgentId,
    pub from_name: String,
    pub content: String,
}

/// Everything an actor needs for one generation turn.
#[derive(Debug, Clone)]
pub struct ActorRequest {
    pub agent: Agent,
    pub task: Task,
    pub context: Option<String>,
    pub deliveries: Vec<Delivery>,
    pub iteration: u32,
}

/// One critic scoring one target output.
#[derive(Debug, Clone)]
pub struct CritiqueRequest {
    pub critic: Agent,
    pub task_description: String,
    pub target: ActorOutput,
}

/// One output assessed against the session's accumulated content.
#[derive(Debug, Clone)]
pub struct NoveltyRequest {
    pub target: ActorOutput,
    pub prior_content: Vec<String>,
}

/// Generates one agent's contribution for a round.
#[async_trait]
pub trait ActorPort: Send + Sync {
    async fn generate(&self, request: ActorRequest) -> Result<ActorOutput, CapabilityError>;
}

/// Scores a contribution on quality and requirement satisfaction.
#[async_trait]
pub trait CriticPort: Send + Sync {
    async fn critique(&self, request: CritiqueRequest) -> Result<CriticOutput, CapabilityError>;
}

/// Scores a contribution's novelty against prior session content.
#[async_trait]
pub trait NoveltyCheckerPort: Send + Sync {
    async fn assess(&self, request: NoveltyRequest) -> Result<PhilossOutput, CapabilityError>;
}

/// Source of the three capability implementations.
///
/// Implementations live in the infrastructure layer and are constructed
/// once at process start.
pub trait CapabilityFactory: Send + Sync {
    fn actor(&self) -> Arc<dyn ActorPort>;
    fn critic(&self) -> Arc<dyn CriticPort>;
    fn novelty_checker(&self) -> Arc<dyn NoveltyCheckerPort>;
}

/// The resolved capability set a session runs with.
#[derive(Clone)]
pub struct Capabilities {
    pub actor: Arc<dyn ActorPort>,
    pub critic: Arc<dyn CriticPort>,
    pub novelty_checker: Arc<dyn NoveltyCheckerPort>,
}

impl Capabilities {
    /// Resolve all three capabilities from the factory up front.
    pub fn resolve(factory: &dyn CapabilityFactory) -> Self {
        Self {
            actor: factory.actor(),
            critic: factory.critic(),
            novelty_checker: factory.novelty_checker(),
        }
    }
}
