//! Permission assignment response parsing.
//!
//! The permission prompt asks the model which roles may exchange
//! intermediate results. A missing `permissions` mapping is fatal; the
//! system never substitutes a heuristic graph for a model that failed to
//! produce one.

use crate::extract::{ExtractError, extract_json_payload};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Errors raised while turning a permission response into a mapping
#[derive(Error, Debug)]
pub enum PermissionAssignmentError {
    #[error("permission response: {0}")]
    Extract(#[from] ExtractError),

    #[error("permission payload has no \"permissions\" mapping")]
    MissingPermissionsMap,
}

/// Parse a permission-assignment response into role-name → allowed-role-names.
///
/// Values that are not arrays degrade to empty lists with a debug log;
/// non-string array entries are dropped. Unknown role names are not resolved
/// here; the graph assembler filters them against the actual roster.
pub fn parse_permission_map(
    response: &str,
) -> Result<BTreeMap<String, Vec<String>>, PermissionAssignmentError> {
    let payload = extract_json_payload(response)?;
    let Some(mapping) = payload.get("permissions").and_then(Value::as_object) else {
        return Err(PermissionAssignmentError::MissingPermissionsMap);
    };

    let mut permissions = BTreeMap::new();
    for (role_name, allowed) in mapping {
        let peers = match allowed {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            other => {
                debug!("permission list for {} is not an array: {}", role_name, other);
                Vec::new()
            }
        };
        permissions.insert(role_name.clone(), peers);
    }

    Ok(permissions)
}
