//! Team assembly: roles, agents, the permission graph, and routing.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`role::GeneratedRole`] | Validated role candidate from role generation |
//! | [`agent::Agent`] | A role bound to an agent id inside a graph |
//! | [`graph::InteractionGraph`] | Verified permission graph with the requester node |
//! | [`router::SignalRouter`] | Deterministic activation order and edge checks |

pub mod agent;
pub mod graph;
pub mod permissions;
pub mod role;
pub mod router;

pub use agent::{Agent, AgentId, REQUESTER_AGENT_ID};
pub use graph::{GraphInvariantError, InteractionGraph};
pub use permissions::{PermissionAssignmentError, parse_permission_map};
pub use role::{GeneratedRole, RoleGenerationError, parse_generated_roles};
pub use router::{ProtocolViolation, SignalRouter};
