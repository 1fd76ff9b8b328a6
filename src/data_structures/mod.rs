//! Data structures for Lanai.
//!
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Explicit errors instead of silent truncation or aliasing of keys
//! - Cache-aware layouts where lookups dominate

pub mod lanai_trie;

// Re-export common data structures
pub use lanai_trie::{LanaiTrie, LanaiTrieError, LanaiTrieResult};
