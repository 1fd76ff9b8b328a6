//! Loader configuration module.
//!
//! Controls how delimited record files are split into keys and values.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Bulk loader configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderConfig {
    /// ASCII character separating the key from the rest of a record
    pub delimiter: char,

    /// Whether to trim surrounding whitespace from keys
    pub trim_keys: bool,

    /// Skip and report bad records instead of aborting the load
    pub skip_invalid: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            trim_keys: false,
            skip_invalid: true,
        }
    }
}

impl Validate for LoaderConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !self.delimiter.is_ascii() {
            return Err(ConfigError::ValidationError(format!(
                "delimiter must be an ASCII character, got {:?}",
                self.delimiter
            )));
        }
        if matches!(self.delimiter, '\n' | '\r') {
            return Err(ConfigError::ValidationError(
                "delimiter cannot be a line terminator".to_string(),
            ));
        }
        Ok(())
    }
}
