// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Main implementation of the Lanai Trie.

use std::fmt;
use std::mem;

use tracing::trace;

use crate::data_structures::lanai_trie::config::LanaiTrieConfig;
use crate::data_structures::lanai_trie::error::{LanaiTrieError, LanaiTrieResult};
use crate::data_structures::lanai_trie::iter::{Iter, Keys, Values};
use crate::data_structures::lanai_trie::node::{Node, NodeArena, NodeId};

/// Length of the longest common prefix of `a` and `b`.
#[inline]
fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// An ordered map from byte-string keys to values, stored as a radix trie.
///
/// Every node keeps a direct-indexed table of children, so descending one
/// level costs a single array access and a lookup compares each key byte
/// at most once. This trades memory for lookup speed: each node carries a
/// table as wide as the key alphabet.
///
/// Insertion never overwrites: inserting an existing key reports `false`
/// alongside the stored value, which is kept. Use [`LanaiTrie::upsert`] to
/// replace.
///
/// # Examples
///
/// ```
/// use lanai_lib::data_structures::lanai_trie::LanaiTrie;
///
/// let mut trie = LanaiTrie::new();
/// assert!(trie.insert("test", 1).unwrap().1);
/// assert!(trie.insert("testing", 2).unwrap().1);
/// assert!(!trie.insert("test", 3).unwrap().1);
///
/// assert_eq!(trie.get("test"), Some(&1));
/// assert_eq!(trie.get("tes"), None);
///
/// let keys: Vec<&[u8]> = trie.keys().collect();
/// assert_eq!(keys, vec![&b"test"[..], &b"testing"[..]]);
/// ```
#[derive(Clone)]
pub struct LanaiTrie<T> {
    pub(crate) nodes: NodeArena<T>,

    /// Number of nodes holding a value
    len: usize,

    config: LanaiTrieConfig,
}

impl<T> LanaiTrie<T> {
    /// Creates a new empty trie with default configuration.
    pub fn new() -> Self {
        Self::with_config(LanaiTrieConfig::default())
    }

    /// Creates a new empty trie with the specified configuration.
    pub fn with_config(config: LanaiTrieConfig) -> Self {
        let root = Node::root(config.alphabet.table_width());
        Self {
            nodes: NodeArena::with_root(root),
            len: 0,
            config,
        }
    }

    /// Returns the configuration of this trie.
    pub fn config(&self) -> &LanaiTrieConfig {
        &self.config
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the trie holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes, including the root and the structural
    /// nodes that only exist as branch points.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Estimated size in bytes of one node, including its radix table.
    ///
    /// Key buffers are heap-allocated separately and are not included.
    pub fn node_size(&self) -> usize {
        mem::size_of::<Node<T>>()
            + self.config.alphabet.table_width() * mem::size_of::<Option<NodeId>>()
    }

    /// Estimated memory held by the trie's nodes: `node_count() * node_size()`.
    pub fn memory_usage(&self) -> usize {
        self.node_count() * self.node_size()
    }

    /// Inserts a key-value pair if the key is not already present.
    ///
    /// # Returns
    ///
    /// * `Ok((value, true))` - The key was added; `value` is the stored value.
    /// * `Ok((value, false))` - The key already existed; `value` is the
    ///   value stored earlier, left untouched, and the new one is dropped.
    /// * `Err(LanaiTrieError)` - The key is empty, too long, or contains a
    ///   byte outside the configured alphabet.
    pub fn insert<K>(&mut self, key: K, value: T) -> LanaiTrieResult<(&mut T, bool)>
    where
        K: AsRef<[u8]>,
    {
        let key = key.as_ref();
        self.validate_key(key)?;

        let id = self.graft(key);
        let slot = &mut self.nodes[id].value;
        let inserted = slot.is_none();
        if inserted {
            *slot = Some(value);
            self.len += 1;
        }
        Ok((self.value_mut(id), inserted))
    }

    /// Inserts a key-value pair, replacing any existing value.
    ///
    /// Returns the previous value, if there was one.
    pub fn upsert<K>(&mut self, key: K, value: T) -> LanaiTrieResult<Option<T>>
    where
        K: AsRef<[u8]>,
    {
        let key = key.as_ref();
        self.validate_key(key)?;

        let id = self.graft(key);
        let previous = self.nodes[id].value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    /// Returns a mutable reference to the value for `key`, inserting
    /// `T::default()` first if the key is absent.
    pub fn get_or_insert_default<K>(&mut self, key: K) -> LanaiTrieResult<&mut T>
    where
        K: AsRef<[u8]>,
        T: Default,
    {
        let key = key.as_ref();
        if let Some(id) = self.find_exact(key) {
            if self.nodes[id].has_value() {
                return Ok(self.value_mut(id));
            }
        }

        self.validate_key(key)?;
        let id = self.graft(key);
        let slot = &mut self.nodes[id].value;
        if slot.is_none() {
            *slot = Some(T::default());
            self.len += 1;
        }
        Ok(self.value_mut(id))
    }

    /// Returns the stored key and value for `key`.
    pub fn find<K>(&self, key: K) -> Option<(&[u8], &T)>
    where
        K: AsRef<[u8]>,
    {
        let node = &self.nodes[self.find_exact(key.as_ref())?];
        node.value.as_ref().map(|value| (node.full_key(), value))
    }

    /// Returns a reference to the value for `key`.
    pub fn get<K>(&self, key: K) -> Option<&T>
    where
        K: AsRef<[u8]>,
    {
        let id = self.find_exact(key.as_ref())?;
        self.nodes[id].value.as_ref()
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<K>(&mut self, key: K) -> Option<&mut T>
    where
        K: AsRef<[u8]>,
    {
        let id = self.find_exact(key.as_ref())?;
        self.nodes[id].value.as_mut()
    }

    /// Returns whether `key` is stored in the trie.
    pub fn contains_key<K>(&self, key: K) -> bool
    where
        K: AsRef<[u8]>,
    {
        self.get(key).is_some()
    }

    /// Returns 1 if `key` is stored in the trie, 0 otherwise.
    pub fn count<K>(&self, key: K) -> usize
    where
        K: AsRef<[u8]>,
    {
        usize::from(self.contains_key(key))
    }

    /// Removes `key` and returns its value.
    ///
    /// Nodes left with neither a value nor children are pruned, walking up
    /// towards the root. A branch node left with a single child is kept
    /// as is rather than merged with that child.
    pub fn remove<K>(&mut self, key: K) -> Option<T>
    where
        K: AsRef<[u8]>,
    {
        let id = self.find_exact(key.as_ref())?;
        let value = self.nodes[id].value.take()?;
        self.len -= 1;
        self.prune(id);
        Some(value)
    }

    /// Removes `key`, returning the number of entries removed (0 or 1).
    pub fn erase<K>(&mut self, key: K) -> usize
    where
        K: AsRef<[u8]>,
    {
        usize::from(self.remove(key).is_some())
    }

    /// Removes every key, leaving only the root node.
    pub fn clear(&mut self) {
        self.nodes.reset();
        self.len = 0;
    }

    /// Returns an iterator over `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, self.len)
    }

    /// Returns an iterator over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, T> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values in ascending key order.
    pub fn values(&self) -> Values<'_, T> {
        Values::new(self.iter())
    }

    fn validate_key(&self, key: &[u8]) -> LanaiTrieResult<()> {
        if key.is_empty() {
            return Err(LanaiTrieError::EmptyKey);
        }
        if key.len() > self.config.max_key_len {
            return Err(LanaiTrieError::KeyTooLong {
                len: key.len(),
                max_len: self.config.max_key_len,
            });
        }
        let alphabet = self.config.alphabet;
        if let Some(position) = key.iter().position(|&byte| !alphabet.accepts(byte)) {
            return Err(LanaiTrieError::UnsupportedByte {
                byte: key[position],
                position,
            });
        }
        Ok(())
    }

    fn value_mut(&mut self, id: NodeId) -> &mut T {
        match self.nodes[id].value.as_mut() {
            Some(value) => value,
            None => unreachable!("node {id:?} was just given a value"),
        }
    }

    /// Node whose full key is exactly `key`, whether or not it holds a value.
    ///
    /// Each key byte is compared at most once on the way down.
    pub(crate) fn find_exact(&self, key: &[u8]) -> Option<NodeId> {
        let mut id = NodeId::ROOT;
        let mut pos = 0;
        loop {
            let node = &self.nodes[id];
            let segment = node.segment();
            let matched = common_prefix_len(segment, &key[pos..]);
            if matched < segment.len() {
                return None;
            }
            pos += matched;
            if pos == key.len() {
                return Some(id);
            }
            id = node.children.get(key[pos])?;
        }
    }

    /// Deepest node reached while matching `key`, stopping at the first
    /// mismatch inside a segment, at the end of the key, or at a missing
    /// child. This is the anchor insertion grafts onto or splits.
    pub(crate) fn find_partial(&self, key: &[u8]) -> NodeId {
        let mut id = NodeId::ROOT;
        let mut pos = 0;
        loop {
            let node = &self.nodes[id];
            let segment = node.segment();
            let matched = common_prefix_len(segment, &key[pos..]);
            pos += matched;
            if matched < segment.len() || pos == key.len() {
                return id;
            }
            match node.children.get(key[pos]) {
                Some(child) => id = child,
                None => return id,
            }
        }
    }

    /// Returns the node whose full key is `key`, creating the child or the
    /// split needed to host it. New nodes carry no value.
    fn graft(&mut self, key: &[u8]) -> NodeId {
        let width = self.config.alphabet.table_width();
        let anchor = self.find_partial(key);
        let anchor_node = &self.nodes[anchor];
        let anchor_key = anchor_node.full_key();

        if anchor_key == key {
            return anchor;
        }

        let pos = common_prefix_len(anchor_key, key);
        if pos == anchor_key.len() {
            // The anchor's whole key prefixes the new key: hang a leaf off it.
            let leaf = self.nodes.alloc(Node::new(key, pos, anchor, width));
            self.nodes[anchor].children.set(key[pos], leaf);
            return leaf;
        }

        // The new key diverges inside the anchor's segment.
        let parent = match anchor_node.parent {
            Some(parent) => parent,
            None => unreachable!("the root's empty key prefixes every key"),
        };
        let key_start = anchor_node.key_start;
        let anchor_byte = anchor_key[pos];
        trace!(split_at = pos, segment_start = key_start, "splitting trie edge");

        let split = self
            .nodes
            .alloc(Node::new(&key[..pos], key_start, parent, width));
        self.nodes[parent].children.set(key[key_start], split);

        let anchor_node = &mut self.nodes[anchor];
        anchor_node.parent = Some(split);
        anchor_node.key_start = pos;
        self.nodes[split].children.set(anchor_byte, anchor);

        if pos == key.len() {
            // The new key ends exactly at the split point.
            return split;
        }

        let leaf = self.nodes.alloc(Node::new(key, pos, split, width));
        self.nodes[split].children.set(key[pos], leaf);
        leaf
    }

    /// Frees `id` and its ancestors for as long as they hold neither a
    /// value nor a child. The root is never freed.
    fn prune(&mut self, mut id: NodeId) {
        while id != NodeId::ROOT {
            let node = &self.nodes[id];
            if node.has_value() || !node.children.is_empty() {
                break;
            }
            let (parent, byte) = match (node.parent, node.table_index()) {
                (Some(parent), Some(byte)) => (parent, byte),
                _ => unreachable!("non-root node {id:?} has a parent slot"),
            };
            self.nodes[parent].children.clear(byte);
            self.nodes.free(id);
            trace!(?id, "pruned empty trie node");
            id = parent;
        }
    }

    /// Next node in pre-order after `id`: its first child, or else the
    /// next occupied slot after it in the nearest ancestor that has one.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        let mut start = 0;
        loop {
            let node = &self.nodes[current];
            if let Some((_, child)) = node.children.first_from(start) {
                return Some(child);
            }
            let parent = node.parent?;
            start = node.table_index().map_or(0, |byte| byte as usize + 1);
            current = parent;
        }
    }
}

impl<T> Default for LanaiTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LanaiTrie<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|(key, value)| (String::from_utf8_lossy(key), value)),
            )
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a LanaiTrie<T> {
    type Item = (&'a [u8], &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: AsRef<[u8]>, T> Extend<(K, T)> for LanaiTrie<T> {
    /// Inserts every pair, keeping the first value for repeated keys.
    /// Keys the trie rejects are skipped.
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            if let Err(err) = self.insert(key, value) {
                tracing::debug!(error = %err, "skipping key rejected by trie");
            }
        }
    }
}

impl<K: AsRef<[u8]>, T> FromIterator<(K, T)> for LanaiTrie<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

#[cfg(test)]
impl<T> LanaiTrie<T> {
    /// Every node in traversal order as `(full key, has value)`, root excluded.
    pub(crate) fn structure(&self) -> Vec<(Vec<u8>, bool)> {
        let mut out = Vec::new();
        let mut next = self.successor(NodeId::ROOT);
        while let Some(id) = next {
            let node = &self.nodes[id];
            out.push((node.full_key().to_vec(), node.has_value()));
            next = self.successor(id);
        }
        out
    }

    /// Panics if any structural invariant of the trie is violated.
    pub(crate) fn assert_invariants(&self) {
        let root = &self.nodes[NodeId::ROOT];
        assert!(root.full_key().is_empty(), "root key must be empty");
        assert!(!root.has_value(), "root must not hold a value");
        assert!(root.parent.is_none(), "root must not have a parent");

        let mut reachable = 1;
        let mut values = 0;
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.has_value() {
                values += 1;
            }
            assert_eq!(
                node.children.len(),
                node.children.children().count(),
                "occupancy counter out of sync at {:?}",
                String::from_utf8_lossy(node.full_key())
            );
            for (byte, child_id) in node.children.children() {
                let child = &self.nodes[child_id];
                reachable += 1;
                assert_eq!(child.parent, Some(id), "child parent link is wrong");
                assert_eq!(child.table_index(), Some(byte), "child is in the wrong slot");
                assert!(
                    child.key_start > node.key_start || id == NodeId::ROOT,
                    "child segment must start after its parent's"
                );
                assert_eq!(
                    &child.full_key()[..child.key_start],
                    node.full_key(),
                    "parent key must prefix child key"
                );
                assert!(
                    !child.segment().is_empty(),
                    "non-root segments must be non-empty"
                );
                assert!(
                    child.has_value() || !child.children.is_empty(),
                    "childless valueless node left behind"
                );
                stack.push(child_id);
            }
        }
        assert_eq!(values, self.len, "len disagrees with stored values");
        assert_eq!(reachable, self.nodes.len(), "arena holds unreachable nodes");
    }
}
