//! Trie configuration module.
//!
//! Settings for the trie the harness builds: which key bytes it accepts
//! and how long keys may be.

use super::{ConfigResult, Validate};
use crate::data_structures::lanai_trie::{KeyAlphabet, LanaiTrieConfig};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Upper bound accepted for `max_key_len`.
const MAX_KEY_LEN_LIMIT: usize = 64 * 1024;

/// Trie configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrieConfig {
    /// Accepted key alphabet (`ascii` or `extended`)
    pub alphabet: KeyAlphabet,

    /// Longest key, in bytes, the trie accepts
    pub max_key_len: usize,
}

impl Default for TrieConfig {
    fn default() -> Self {
        let defaults = LanaiTrieConfig::default();
        Self {
            alphabet: defaults.alphabet,
            max_key_len: defaults.max_key_len,
        }
    }
}

impl TrieConfig {
    /// Builds the trie configuration described by this section.
    pub fn to_trie_config(&self) -> LanaiTrieConfig {
        LanaiTrieConfig::new()
            .with_alphabet(self.alphabet)
            .with_max_key_len(self.max_key_len)
    }
}

impl Validate for TrieConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_key_len == 0 || self.max_key_len > MAX_KEY_LEN_LIMIT {
            return Err(ConfigError::ValueOutOfRange {
                key: "trie.max_key_len".to_string(),
                message: format!("must be between 1 and {MAX_KEY_LEN_LIMIT}"),
            });
        }
        Ok(())
    }
}
