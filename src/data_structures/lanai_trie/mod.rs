// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Lanai Trie: an ordered map keyed by byte strings.
//!
//! A radix (Patricia) trie in which every node carries a direct-indexed
//! table of children, one slot per possible next key byte. Lookups cost
//! O(k) in the key length with at most one comparison per key byte, which
//! beats balanced trees (a full key comparison per level) and hash maps
//! (hashing plus a final comparison) on lookup-heavy workloads with a
//! few thousand keys. The price is memory: a table per node.
//!
//! # Features
//!
//! - Edge splitting on insert, so shared prefixes are stored once.
//! - Pruning of empty branch nodes on removal.
//! - Iteration in lexicographic key order.
//! - Keys restricted to 7-bit ASCII by default, with explicit errors for
//!   anything else; a full-byte alphabet is available through
//!   [`LanaiTrieConfig`].
//! - Zero unsafe code: nodes live in an index-addressed arena.
//!
//! # Example
//!
//! ```
//! use lanai_lib::data_structures::lanai_trie::{LanaiTrie, LanaiTrieError};
//!
//! let mut trie = LanaiTrie::new();
//!
//! assert!(trie.insert("ESZ5", 100).unwrap().1);
//! assert!(trie.insert("ESH6", 200).unwrap().1);
//!
//! // Duplicate inserts keep the original value and hand it back
//! let (stored, inserted) = trie.insert("ESZ5", 999).unwrap();
//! assert!(!inserted);
//! assert_eq!(*stored, 100);
//!
//! // Indexing-style access inserts a default
//! *trie.get_or_insert_default("NQM6").unwrap() += 5;
//! assert_eq!(trie.get("NQM6"), Some(&5));
//!
//! assert_eq!(trie.erase("ESH6"), 1);
//! assert_eq!(trie.erase("ESH6"), 0);
//! assert_eq!(trie.len(), 2);
//!
//! assert_eq!(trie.insert("caf\u{e9}", 1), Err(LanaiTrieError::UnsupportedByte {
//!     byte: 0xC3,
//!     position: 3,
//! }));
//! ```
//!
//! # Memory
//!
//! [`LanaiTrie::memory_usage`] estimates the node footprint as
//! `node_count() * node_size()`. Structural nodes created by splits count
//! towards `node_count()` but not towards `len()`. Removal prunes nodes
//! that end up with neither a value nor children, but does not merge a
//! branch node with its only remaining child.

// Module declarations
mod config;
mod error;
mod iter;
mod node;
mod trie;

#[cfg(test)]
mod tests;

// Re-exports
pub use config::{KeyAlphabet, LanaiTrieConfig};
pub use error::{LanaiTrieError, LanaiTrieResult};
pub use iter::{Iter, Keys, Values};
pub use trie::LanaiTrie;

#[cfg(test)]
mod basic_tests {
    use super::*;

    #[test]
    fn test_trie_basic_operations() {
        let mut trie = LanaiTrie::new();

        // Test initial state
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);

        // Test insertion
        assert!(trie.insert("hello", "world").unwrap().1);
        assert_eq!(trie.len(), 1);
        assert!(!trie.is_empty());

        // Test retrieval
        assert_eq!(trie.get("hello"), Some(&"world"));
        assert_eq!(trie.find("hello"), Some((&b"hello"[..], &"world")));
        assert!(trie.contains_key("hello"));
        assert_eq!(trie.count("hello"), 1);
        assert_eq!(trie.get("nonexistent"), None);
        assert_eq!(trie.count("nonexistent"), 0);

        // Test duplicate insert: the handle points at the first value
        let (stored, inserted) = trie.insert("hello", "planet").unwrap();
        assert!(!inserted);
        assert_eq!(*stored, "world");
        assert_eq!(trie.get("hello"), Some(&"world"));
        assert_eq!(trie.len(), 1);

        // The returned handle is the stored value
        let (stored, inserted) = trie.insert("help", "me").unwrap();
        assert!(inserted);
        *stored = "us";
        let (stored, inserted) = trie.insert("help", "them").unwrap();
        assert!(!inserted);
        assert_eq!(*stored, "us");
        assert_eq!(trie.remove("help"), Some("us"));

        // Test removal
        assert_eq!(trie.remove("hello"), Some("world"));
        assert!(trie.is_empty());
        assert_eq!(trie.remove("hello"), None);
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn test_custom_configuration() {
        let config = LanaiTrieConfig::new()
            .with_alphabet(KeyAlphabet::Extended)
            .with_max_key_len(8);

        let mut trie = LanaiTrie::with_config(config);

        assert!(trie.insert("caf\u{e9}", 1).unwrap().1);
        assert_eq!(trie.get("caf\u{e9}"), Some(&1));
        assert_eq!(
            trie.insert("much too long", 2),
            Err(LanaiTrieError::KeyTooLong { len: 13, max_len: 8 })
        );
    }
}
