//! Test modules for Lanai.
//!
//! Unit tests for the trie itself live next to it in
//! `data_structures::lanai_trie`; this module covers the layers built on
//! top of it:
//! - Configuration loading and validation
//! - Error types and the global reporter
//! - Bulk loading of record files
//! - The interactive query loop


// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{ascii_key_strategy, TestFixture};
