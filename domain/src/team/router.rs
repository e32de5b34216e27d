//! Signal routing: deterministic dispatch over the interaction graph.
//!
//! The topology is fixed for a whole session, so the activation order is
//! computed from the graph alone and is identical every round. Delivery of
//! a previous-round output to an agent is legal only along a permission
//! edge; an illegal delivery is reported as a [`ProtocolViolation`] for the
//! caller to log and drop, never an abort.

use crate::team::agent::{Agent, AgentId};
use crate::team::graph::InteractionGraph;
use serde::{Deserialize, Serialize};

/// An attempted delivery outside the permission graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolViolation {
    pub from: AgentId,
    pub to: AgentId,
}

impl std::fmt::Display for ProtocolViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} has no permission edge to {}", self.from, self.to)
    }
}

/// Stateless routing rules over a verified graph.
pub struct SignalRouter;

impl SignalRouter {
    /// The order in which agents act within a round.
    ///
    /// Descending priority, ties broken by ascending agent id. The requester
    /// never acts. Stable for the lifetime of the graph.
    pub fn activation_order(graph: &InteractionGraph) -> Vec<&Agent> {
        let mut order: Vec<&Agent> = graph.workers().collect();
        order.sort_by(|a, b| {
            b.priority_level
                .cmp(&a.priority_level)
                .then_with(|| a.agent_id.cmp(&b.agent_id))
        });
        order
    }

    /// Check that `from` may deliver to `to`.
    pub fn check_route(
        graph: &InteractionGraph,
        from: &AgentId,
        to: &AgentId,
    ) -> Result<(), ProtocolViolation> {
        let allowed = graph.agent(from).is_some_and(|agent| agent.may_send_to(to));
        if allowed {
            Ok(())
        } else {
            Err(ProtocolViolation {
                from: from.clone(),
                to: to.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::role::GeneratedRole;
    use std::collections::BTreeMap;

    fn role(name: &str, priority: u8) -> GeneratedRole {
        GeneratedRole::new(name, "specialist")
            .with_responsibility("work")
            .with_skill("skill")
            .with_output_requirements("output")
            .with_priority_level(priority)
    }

    fn ring_graph(priorities: &[u8]) -> InteractionGraph {
        let roles: Vec<GeneratedRole> = priorities
            .iter()
            .enumerate()
            .map(|(i, p)| role(&format!("R{}", i + 1), *p))
            .collect();
        let mut perms: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for i in 0..roles.len() {
            let next = (i + 1) % roles.len();
            perms.insert(roles[i].name.clone(), vec![roles[next].name.clone()]);
        }
        InteractionGraph::assemble(&roles, &perms).unwrap()
    }

    #[test]
    fn activation_order_is_priority_descending() {
        let graph = ring_graph(&[5, 9, 2]);
        let order = SignalRouter::activation_order(&graph);
        let ids: Vec<&str> = order.iter().map(|a| a.agent_id.as_str()).collect();
        // R2 (9) first, then R1 (5), then R3 (2)
        assert_eq!(ids, vec!["agent-02", "agent-01", "agent-03"]);
    }

    #[test]
    fn activation_order_tie_breaks_by_agent_id() {
        let graph = ring_graph(&[7, 7, 7]);
        let order = SignalRouter::activation_order(&graph);
        let ids: Vec<&str> = order.iter().map(|a| a.agent_id.as_str()).collect();
        assert_eq!(ids, vec!["agent-01", "agent-02", "agent-03"]);
    }

    #[test]
    fn activation_order_excludes_requester() {
        let graph = ring_graph(&[5, 5]);
        assert!(SignalRouter::activation_order(&graph).iter().all(|a| !a.is_requester));
    }

    #[test]
    fn activation_order_is_stable_across_calls() {
        let graph = ring_graph(&[3, 8, 8, 1]);
        let first: Vec<String> = SignalRouter::activation_order(&graph)
            .iter()
            .map(|a| a.agent_id.to_string())
            .collect();
        let second: Vec<String> = SignalRouter::activation_order(&graph)
            .iter()
            .map(|a| a.agent_id.to_string())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn route_along_edge_is_allowed() {
        let graph = ring_graph(&[5, 5]);
        // ring: R1 -> R2
        assert!(SignalRouter::check_route(&graph, &AgentId::new("agent-01"), &AgentId::new("agent-02")).is_ok());
    }

    #[test]
    fn route_without_edge_is_a_violation() {
        let graph = ring_graph(&[5, 5, 5]);
        // ring: R1 -> R2 -> R3 -> R1; R1 -> R3 is not an edge
        let violation =
            SignalRouter::check_route(&graph, &AgentId::new("agent-01"), &AgentId::new("agent-03"))
                .unwrap_err();
        assert_eq!(violation.from.as_str(), "agent-01");
        assert_eq!(violation.to.as_str(), "agent-03");
    }

    #[test]
    fn route_from_unknown_agent_is_a_violation() {
        let graph = ring_graph(&[5, 5]);
        assert!(
            SignalRouter::check_route(&graph, &AgentId::new("ghost"), &AgentId::new("agent-01"))
                .is_err()
        );
    }
}
