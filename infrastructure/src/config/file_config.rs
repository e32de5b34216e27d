//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; converters turn sections into the
//! application-layer parameter types.

use roundtable_application::config::EngineParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Rejections from [`FileConfig::validate`]
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("model.name must not be empty")]
    EmptyModelName,

    #[error("model.base_url must not be empty")]
    EmptyBaseUrl,

    #[error("model.temperature must be between 0 and 2, got {0}")]
    TemperatureOutOfRange(f32),

    #[error("team.min_roles must be at least 1")]
    NoRoles,

    #[error("team.min_roles ({min}) must not exceed team.max_roles ({max})")]
    RoleRangeInverted { min: usize, max: usize },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model endpoint settings
    pub model: FileModelConfig,
    /// Self-play engine settings
    pub engine: FileEngineConfig,
    /// Team assembly settings
    pub team: FileTeamConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Reject configurations no run could succeed with.
    ///
    /// Zero-valued engine knobs are not errors; they are floored to their
    /// minimums where the values are consumed.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model.name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.model.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigValidationError::TemperatureOutOfRange(
                self.model.temperature,
            ));
        }
        if self.team.min_roles == 0 {
            return Err(ConfigValidationError::NoRoles);
        }
        if self.team.min_roles > self.team.max_roles {
            return Err(ConfigValidationError::RoleRangeInverted {
                min: self.team.min_roles,
                max: self.team.max_roles,
            });
        }
        Ok(())
    }
}

/// Model endpoint configuration from TOML (`[model]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Model identifier sent in each request
    pub name: String,
    /// OpenAI-compatible API base URL
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Sampling temperature for all capability calls
    pub temperature: f32,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.7,
            timeout_seconds: 120,
        }
    }
}

impl FileModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Self-play engine configuration from TOML (`[engine]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Upper bound on deliberation rounds
    pub max_rounds: u32,
    /// Concurrent capability calls per phase
    pub max_in_flight: usize,
    /// Minimum round-over-round improvement counted as progress
    pub epsilon: f64,
    /// Largest Pareto front treated as collapsed
    pub front_collapse_size: usize,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            max_in_flight: 4,
            epsilon: 0.05,
            front_collapse_size: 1,
        }
    }
}

impl FileEngineConfig {
    /// Translate into the application-layer parameter type.
    pub fn engine_params(&self) -> EngineParams {
        EngineParams::default()
            .with_max_in_flight(self.max_in_flight)
            .with_epsilon(self.epsilon)
            .with_front_collapse_size(self.front_collapse_size)
    }
}

/// Team assembly configuration from TOML (`[team]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTeamConfig {
    /// Fewest roles to request from the model
    pub min_roles: usize,
    /// Most roles to keep
    pub max_roles: usize,
}

impl Default for FileTeamConfig {
    fn default() -> Self {
        Self {
            min_roles: 3,
            max_roles: 6,
        }
    }
}

/// Output configuration from TOML (`[output]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Directory for markdown session reports; none disables reports
    pub report_dir: Option<String>,
    /// JSONL transcript file path; none disables the transcript
    pub transcript_path: Option<String>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            report_dir: None,
            transcript_path: None,
        }
    }
}
