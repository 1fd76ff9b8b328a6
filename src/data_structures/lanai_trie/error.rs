// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Lanai Trie.
//!
//! Only key validation can fail. Duplicate inserts and missing keys are
//! ordinary outcomes reported through return values.

/// Errors that can occur in Lanai Trie operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LanaiTrieError {
    /// Error when an empty key is provided.
    #[error("Empty key not allowed")]
    EmptyKey,

    /// Error when a key exceeds the configured maximum length.
    #[error("Key of {len} bytes exceeds maximum key length of {max_len}")]
    KeyTooLong {
        /// Length of the rejected key.
        len: usize,
        /// The maximum allowed length.
        max_len: usize,
    },

    /// Error when a key contains a byte outside the trie's alphabet.
    #[error("Unsupported key byte 0x{byte:02x} at position {position}")]
    UnsupportedByte {
        /// The offending byte.
        byte: u8,
        /// Offset of the byte within the key.
        position: usize,
    },
}

/// Result type for Lanai Trie operations
pub type LanaiTrieResult<T> = std::result::Result<T, LanaiTrieError>;
