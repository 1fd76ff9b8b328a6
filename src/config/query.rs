//! Query loop configuration module.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Interactive query loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QueryConfig {
    /// Prompt written before each query
    pub prompt: String,

    /// Input lines that end the loop
    pub quit_commands: Vec<String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            prompt: "Key: ".to_string(),
            quit_commands: vec!["q".to_string(), "quit".to_string()],
        }
    }
}

impl Validate for QueryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.quit_commands.iter().all(|cmd| cmd.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "quit_commands must contain at least one non-empty command".to_string(),
            ));
        }
        Ok(())
    }
}
