// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Ordered iteration over a Lanai Trie.
//!
//! Traversal is depth-first, visiting a node before its children and
//! children in ascending byte order. Since a node's key prefixes every key
//! below it, entries come out in lexicographic byte order.

use std::iter::FusedIterator;

use crate::data_structures::lanai_trie::node::NodeId;
use crate::data_structures::lanai_trie::trie::LanaiTrie;

/// An iterator over the entries of a [`LanaiTrie`], in ascending key order.
///
/// Created by [`LanaiTrie::iter`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    trie: &'a LanaiTrie<T>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(trie: &'a LanaiTrie<T>, len: usize) -> Self {
        // The root never holds a value, so start at its successor.
        Self {
            trie,
            next: trie.successor(NodeId::ROOT),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a [u8], &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        // Structural nodes are skipped; stopping once every value has been
        // produced avoids walking the trailing branch nodes.
        while self.remaining > 0 {
            let id = self.next?;
            self.next = self.trie.successor(id);
            let node = &self.trie.nodes[id];
            if let Some(value) = node.value.as_ref() {
                self.remaining -= 1;
                return Some((node.full_key(), value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

/// An iterator over the keys of a [`LanaiTrie`], in ascending order.
#[derive(Debug)]
pub struct Keys<'a, T> {
    inner: Iter<'a, T>,
}

impl<T> Clone for Keys<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Keys<'a, T> {
    pub(crate) fn new(inner: Iter<'a, T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> Iterator for Keys<'a, T> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Keys<'_, T> {}

impl<T> FusedIterator for Keys<'_, T> {}

/// An iterator over the values of a [`LanaiTrie`], in ascending key order.
#[derive(Debug)]
pub struct Values<'a, T> {
    inner: Iter<'a, T>,
}

impl<T> Clone for Values<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Values<'a, T> {
    pub(crate) fn new(inner: Iter<'a, T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Values<'_, T> {}

impl<T> FusedIterator for Values<'_, T> {}
