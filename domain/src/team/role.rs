//! Role generation response parsing and validation.
//!
//! The role-generation prompt asks the model for a `roles` array. Candidates
//! are validated one by one: a broken candidate is skipped with a debug log,
//! never repaired. Only an empty surviving set is fatal; there is no default
//! role set to fall back to.

use crate::extract::{ExtractError, extract_json_payload};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Default priority when the model omits `priority_level`.
const DEFAULT_PRIORITY: i64 = 5;

/// Errors raised while turning a role-generation response into roles
#[derive(Error, Debug)]
pub enum RoleGenerationError {
    #[error("role generation response: {0}")]
    Extract(#[from] ExtractError),

    #[error("role generation payload has no \"roles\" array")]
    MissingRolesArray,

    #[error("no valid roles survived validation")]
    EmptyRoleSet,
}

/// A role candidate that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRole {
    pub name: String,
    pub role_type: String,
    /// Non-empty after validation
    pub responsibilities: Vec<String>,
    /// Non-empty after validation
    pub skills: Vec<String>,
    pub output_requirements: String,
    /// 1-10, clamped
    pub priority_level: u8,
}

impl GeneratedRole {
    pub fn new(name: impl Into<String>, role_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role_type: role_type.into(),
            responsibilities: Vec::new(),
            skills: Vec::new(),
            output_requirements: String::new(),
            priority_level: DEFAULT_PRIORITY as u8,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_responsibility(mut self, responsibility: impl Into<String>) -> Self {
        self.responsibilities.push(responsibility.into());
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    pub fn with_output_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.output_requirements = requirements.into();
        self
    }

    pub fn with_priority_level(mut self, priority: u8) -> Self {
        self.priority_level = priority.clamp(1, 10);
        self
    }
}

/// Parse a role-generation response into validated roles.
///
/// Requires a JSON payload with a `roles` array. Each candidate must carry
/// all of `name`, `role_type`, `responsibilities`, `skills`, and
/// `output_requirements`; scalar responsibility/skill values are coerced to
/// singleton lists, and a candidate whose responsibilities or skills end up
/// empty is skipped. Survivors beyond `max_roles` are pruned by descending
/// priority, ties keeping generation order.
pub fn parse_generated_roles(
    response: &str,
    max_roles: usize,
) -> Result<Vec<GeneratedRole>, RoleGenerationError> {
    let payload = extract_json_payload(response)?;
    let Some(candidates) = payload.get("roles").and_then(Value::as_array) else {
        return Err(RoleGenerationError::MissingRolesArray);
    };

    let mut roles = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        match validate_candidate(candidate) {
            Some(role) => roles.push(role),
            None => debug!("skipping invalid role candidate at index {}", index),
        }
    }

    if roles.is_empty() {
        return Err(RoleGenerationError::EmptyRoleSet);
    }

    if roles.len() > max_roles {
        // Stable sort: equal priorities keep generation order
        roles.sort_by(|a, b| b.priority_level.cmp(&a.priority_level));
        roles.truncate(max_roles);
    }

    Ok(roles)
}

fn validate_candidate(candidate: &Value) -> Option<GeneratedRole> {
    let object = candidate.as_object()?;

    for field in ["name", "role_type", "responsibilities", "skills", "output_requirements"] {
        if !object.contains_key(field) {
            return None;
        }
    }

    let name = non_empty_str(object.get("name"))?;
    let role_type = non_empty_str(object.get("role_type"))?;
    let output_requirements = object
        .get("output_requirements")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let responsibilities = string_list(object.get("responsibilities"));
    let skills = string_list(object.get("skills"));
    if responsibilities.is_empty() || skills.is_empty() {
        return None;
    }

    Some(GeneratedRole {
        name,
        role_type,
        responsibilities,
        skills,
        output_requirements,
        priority_level: priority_of(object.get("priority_level")),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Coerce a JSON value into a list of trimmed, non-empty strings.
///
/// Arrays keep their string and numeric entries; a bare non-empty string
/// becomes a singleton; anything else yields an empty list.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

fn priority_of(value: Option<&Value>) -> u8 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(DEFAULT_PRIORITY),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(DEFAULT_PRIORITY),
        _ => DEFAULT_PRIORITY,
    };
    raw.clamp(1, 10) as u8
}
