// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for the Lanai Trie.

use serde::{Deserialize, Serialize};

/// The set of key bytes a trie accepts, which also fixes the width of
/// every node's radix table.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeyAlphabet {
    /// 7-bit ASCII keys. Tables have 128 slots; bytes >= 128 are rejected.
    #[default]
    Ascii,
    /// Any byte value. Tables have 256 slots.
    Extended,
}

impl KeyAlphabet {
    /// Number of slots in a radix table for this alphabet.
    pub const fn table_width(self) -> usize {
        match self {
            Self::Ascii => 128,
            Self::Extended => 256,
        }
    }

    /// Whether `byte` may appear in a key.
    #[inline]
    pub const fn accepts(self, byte: u8) -> bool {
        match self {
            Self::Ascii => byte < 128,
            Self::Extended => true,
        }
    }
}

/// Configuration for the Lanai Trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanaiTrieConfig {
    /// Accepted key bytes and radix table width
    pub alphabet: KeyAlphabet,

    /// Longest key, in bytes, that `insert` accepts
    pub max_key_len: usize,
}

impl LanaiTrieConfig {
    /// Creates a new configuration with default values.
    ///
    /// Default values:
    /// - alphabet: `KeyAlphabet::Ascii`
    /// - max_key_len: 1024
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key alphabet.
    pub fn with_alphabet(mut self, alphabet: KeyAlphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Sets the maximum key length in bytes.
    ///
    /// # Panics
    ///
    /// Panics if `max_key_len` is zero, since no key could ever be stored.
    pub fn with_max_key_len(mut self, max_key_len: usize) -> Self {
        if max_key_len == 0 {
            panic!("Maximum key length must be greater than 0");
        }
        self.max_key_len = max_key_len;
        self
    }
}

impl Default for LanaiTrieConfig {
    fn default() -> Self {
        Self {
            alphabet: KeyAlphabet::Ascii,
            max_key_len: 1024,
        }
    }
}
