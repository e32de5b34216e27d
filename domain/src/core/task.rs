//! Task: the work item a team deliberates on.

use crate::util::uuid_v4;
use serde::{Deserialize, Serialize};

/// A described piece of work handed to an agent team.
///
/// Immutable once built. `max_iterations` bounds the number of self-play
/// rounds a session may run and is always at least 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for this task
    pub task_id: String,
    /// What needs to be done, in natural language
    pub description: String,
    /// Problem domain (e.g. "software architecture", "game design")
    pub domain: String,
    /// Things the result must cover
    pub requirements: Vec<String>,
    /// Things the result must respect
    pub constraints: Vec<String>,
    /// Upper bound on self-play rounds
    pub max_iterations: u32,
}

impl Task {
    /// Creates a task with a generated id and default bounds.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            task_id: uuid_v4(),
            description: description.into(),
            domain: "general".to_string(),
            requirements: Vec::new(),
            constraints: Vec::new(),
            max_iterations: 3,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirements.push(requirement.into());
        self
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Sets the round bound. Zero is bumped to 1.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max.max(1);
        self
    }
}
