//! Interaction graph assembly and invariants.
//!
//! The graph is assembled deterministically from validated roles and the
//! parsed permission mapping: a synthetic requester node is linked both ways
//! with the highest-priority role, every role becomes one agent, and
//! permission names are translated into edges. Assembly either yields a
//! verified graph or fails; a partial graph is never returned.

use crate::team::agent::{Agent, AgentId};
use crate::team::role::GeneratedRole;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use thiserror::Error;
use tracing::{debug, warn};

/// Structural violations that reject a graph
#[derive(Error, Debug)]
pub enum GraphInvariantError {
    #[error("interaction graph has no requester agent")]
    MissingRequester,

    #[error("interaction graph has more than one requester agent")]
    DuplicateRequester,

    #[error("agent {agent} is not reachable from the requester")]
    Disconnected { agent: AgentId },

    #[error("no agent holds a return edge to the requester")]
    NoReturnPath,
}

/// A verified team: the requester plus one agent per generated role.
///
/// The requester is always stored first. Invariants hold for every value of
/// this type: exactly one requester, every agent reachable from it, and at
/// least one inbound edge back to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionGraph {
    agents: Vec<Agent>,
}

impl InteractionGraph {
    /// Assemble and verify a graph from validated roles and permissions.
    ///
    /// Worker ids are assigned in role order (`agent-01`, `agent-02`, ...).
    /// The requester is wired bidirectionally to the highest-priority role;
    /// on a priority tie the first generated role wins. Permission entries
    /// naming unknown roles (or the role itself) are dropped with a debug
    /// log rather than failing assembly.
    pub fn assemble(
        roles: &[GeneratedRole],
        permissions: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self, GraphInvariantError> {
        let mut agents = vec![Agent::requester()];
        for (index, role) in roles.iter().enumerate() {
            let id = AgentId::new(format!("agent-{:02}", index + 1));
            agents.push(Agent::from_role(id, role));
        }

        // Role-name lookup for permission translation. Worker index 0 is the
        // requester, so role i lives at agents[i + 1].
        let mut by_name: BTreeMap<&str, AgentId> = BTreeMap::new();
        for (index, role) in roles.iter().enumerate() {
            let id = agents[index + 1].agent_id.clone();
            if by_name.insert(role.name.as_str(), id).is_some() {
                warn!("duplicate role name {:?}; later role shadows earlier edges", role.name);
            }
        }

        // Requester <-> highest-priority role, both directions. First
        // occurrence wins on ties.
        if !roles.is_empty() {
            let mut lead = 0;
            for (index, role) in roles.iter().enumerate().skip(1) {
                if role.priority_level > roles[lead].priority_level {
                    lead = index;
                }
            }
            let lead_id = agents[lead + 1].agent_id.clone();
            let requester_id = agents[0].agent_id.clone();
            agents[0].allow(lead_id);
            agents[lead + 1].allow(requester_id);
        }

        for (index, role) in roles.iter().enumerate() {
            let own_id = agents[index + 1].agent_id.clone();
            let Some(allowed) = permissions.get(&role.name) else {
                continue;
            };
            for peer_name in allowed {
                match by_name.get(peer_name.as_str()) {
                    Some(peer_id) if *peer_id == own_id => {
                        debug!("dropping self-permission for {}", role.name);
                    }
                    Some(peer_id) => agents[index + 1].allow(peer_id.clone()),
                    None => {
                        debug!("dropping permission to unknown role {:?} for {}", peer_name, role.name);
                    }
                }
            }
        }

        Self::from_agents(agents)
    }

    /// Wrap an externally supplied roster, re-verifying every invariant.
    ///
    /// The requester is moved to the front so later accessors stay cheap.
    pub fn from_agents(mut agents: Vec<Agent>) -> Result<Self, GraphInvariantError> {
        let requester_count = agents.iter().filter(|a| a.is_requester).count();
        match requester_count {
            0 => return Err(GraphInvariantError::MissingRequester),
            1 => {}
            _ => return Err(GraphInvariantError::DuplicateRequester),
        }
        if let Some(position) = agents.iter().position(|a| a.is_requester)
            && position != 0
        {
            agents.swap(0, position);
        }

        let graph = Self { agents };
        graph.verify_reachability()?;
        Ok(graph)
    }

    /// Every agent must be reachable from the requester, and the requester
    /// must hold at least one inbound edge for the result to travel back.
    fn verify_reachability(&self) -> Result<(), GraphInvariantError> {
        let by_id: BTreeMap<&AgentId, usize> = self
            .agents
            .iter()
            .enumerate()
            .map(|(index, agent)| (&agent.agent_id, index))
            .collect();

        let mut visited = BTreeSet::from([0usize]);
        let mut queue = VecDeque::from([0usize]);
        while let Some(index) = queue.pop_front() {
            for peer in &self.agents[index].connection_permissions {
                if let Some(&peer_index) = by_id.get(peer)
                    && visited.insert(peer_index)
                {
                    queue.push_back(peer_index);
                }
            }
        }

        for (index, agent) in self.agents.iter().enumerate() {
            if !visited.contains(&index) {
                return Err(GraphInvariantError::Disconnected {
                    agent: agent.agent_id.clone(),
                });
            }
        }

        let requester_id = &self.agents[0].agent_id;
        let has_return_edge = self
            .agents
            .iter()
            .skip(1)
            .any(|agent| agent.may_send_to(requester_id));
        if !has_return_edge {
            return Err(GraphInvariantError::NoReturnPath);
        }

        Ok(())
    }

    /// All agents, requester first.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The synthetic requester node.
    pub fn requester(&self) -> &Agent {
        &self.agents[0]
    }

    /// All non-requester agents in stored order.
    pub fn workers(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().skip(1)
    }

    pub fn agent(&self, id: &AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| &a.agent_id == id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
