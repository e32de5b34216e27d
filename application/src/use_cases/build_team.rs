//! Build Team use case
//!
//! Orchestrates team assembly: generate a role set for the task, ask for a
//! permission layout over those roles, and assemble the verified
//! interaction graph. Two capability calls total, each single-shot.

use std::collections::BTreeMap;
use std::sync::Arc;

use roundtable_domain::core::task::Task;
use roundtable_domain::prompt::PromptTemplate;
use roundtable_domain::team::graph::{GraphInvariantError, InteractionGraph};
use roundtable_domain::team::permissions::{PermissionAssignmentError, parse_permission_map};
use roundtable_domain::team::role::{GeneratedRole, RoleGenerationError, parse_generated_roles};
use thiserror::Error;
use tracing::{debug, info};

use crate::ports::completion::{CompletionError, CompletionPort, CompletionRequest};

/// Errors that can occur while building a team
#[derive(Error, Debug)]
pub enum BuildTeamError {
    #[error("Role generation failed: {0}")]
    RoleGeneration(#[from] RoleGenerationError),

    #[error("Permission assignment failed: {0}")]
    PermissionAssignment(#[from] PermissionAssignmentError),

    #[error("Graph invariant violated: {0}")]
    GraphInvariant(#[from] GraphInvariantError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] CompletionError),
}

/// Input for the BuildTeam use case
#[derive(Debug, Clone)]
pub struct BuildTeamInput {
    pub task: Task,
    /// Lower bound passed to the role designer as guidance
    pub min_roles: usize,
    /// Hard cap; surplus roles are pruned by priority
    pub max_roles: usize,
}

impl BuildTeamInput {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            min_roles: 3,
            max_roles: 6,
        }
    }

    pub fn with_role_range(mut self, min: usize, max: usize) -> Self {
        self.min_roles = min.max(1);
        self.max_roles = max.max(self.min_roles);
        self
    }
}

/// Use case for assembling a task team
pub struct BuildTeamUseCase<G: CompletionPort + 'static> {
    gateway: Arc<G>,
}

impl<G: CompletionPort + 'static> BuildTeamUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, input: BuildTeamInput) -> Result<InteractionGraph, BuildTeamError> {
        info!("Building team for task {}", input.task.task_id);

        let roles = self.generate_roles(&input).await?;
        info!("Validated {} roles", roles.len());

        let permissions = self.assign_permissions(&roles).await?;
        debug!("Permission map covers {} roles", permissions.len());

        let graph = InteractionGraph::assemble(&roles, &permissions)?;
        info!("Team ready with {} agents", graph.len());
        Ok(graph)
    }

    /// Phase 1: one call to design the role set
    async fn generate_roles(
        &self,
        input: &BuildTeamInput,
    ) -> Result<Vec<GeneratedRole>, BuildTeamError> {
        let request = CompletionRequest::new(
            PromptTemplate::role_generation_system(),
            PromptTemplate::role_generation_prompt(&input.task, input.min_roles, input.max_roles),
        );
        let response = self.gateway.complete(&request).await?;
        Ok(parse_generated_roles(&response, input.max_roles)?)
    }

    /// Phase 2: one call to lay out communication permissions
    async fn assign_permissions(
        &self,
        roles: &[GeneratedRole],
    ) -> Result<BTreeMap<String, Vec<String>>, BuildTeamError> {
        let request = CompletionRequest::new(
            PromptTemplate::permission_system(),
            PromptTemplate::permission_prompt(roles),
        );
        let response = self.gateway.complete(&request).await?;
        Ok(parse_permission_map(&response)?)
    }
}
