//! Agent entity and identifier.

use crate::team::role::GeneratedRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Reserved id of the synthetic requester node.
pub const REQUESTER_AGENT_ID: &str = "requester";

/// Unique identifier for an agent within a session.
///
/// Worker agents are numbered in role-generation order (`agent-01`,
/// `agent-02`, ...); the requester always carries [`REQUESTER_AGENT_ID`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(String);

impl AgentId {
    /// Creates an AgentId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id of the synthetic requester node.
    pub fn requester() -> Self {
        Self(REQUESTER_AGENT_ID.to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for AgentId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant in an interaction graph.
///
/// Exactly one agent per session has `is_requester` set; it represents the
/// task originator, produces no outputs of its own, and anchors the graph.
/// `connection_permissions` is the outbound edge set: the peers this agent
/// may hand its intermediate outputs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub agent_id: AgentId,
    pub name: String,
    /// Role type this agent plays (e.g. "architect", "reviewer")
    pub role: String,
    pub is_requester: bool,
    pub responsibilities: Vec<String>,
    pub skills: Vec<String>,
    /// What this agent's outputs are expected to look like
    pub output_requirements: String,
    /// 1-10; the requester is pinned to 10
    pub priority_level: u8,
    /// Outbound permission edges
    pub connection_permissions: BTreeSet<AgentId>,
}

impl Agent {
    /// Binds a validated role to an agent id.
    pub fn from_role(agent_id: AgentId, role: &GeneratedRole) -> Self {
        Self {
            agent_id,
            name: role.name.clone(),
            role: role.role_type.clone(),
            is_requester: false,
            responsibilities: role.responsibilities.clone(),
            skills: role.skills.clone(),
            output_requirements: role.output_requirements.clone(),
            priority_level: role.priority_level,
            connection_permissions: BTreeSet::new(),
        }
    }

    /// The synthetic requester node.
    pub fn requester() -> Self {
        Self {
            agent_id: AgentId::requester(),
            name: "Requester".to_string(),
            role: "requester".to_string(),
            is_requester: true,
            responsibilities: vec!["Originate the task and receive the final result".to_string()],
            skills: Vec::new(),
            output_requirements: String::new(),
            priority_level: 10,
            connection_permissions: BTreeSet::new(),
        }
    }

    /// Grants this agent permission to send to `peer`.
    pub fn allow(&mut self, peer: AgentId) {
        self.connection_permissions.insert(peer);
    }

    /// Whether this agent may hand its output to `peer`.
    pub fn may_send_to(&self, peer: &AgentId) -> bool {
        self.connection_permissions.contains(peer)
    }
}
