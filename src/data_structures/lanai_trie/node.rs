// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node storage for the Lanai Trie.
//!
//! Nodes live in a [`NodeArena`] and refer to each other by [`NodeId`].
//! A parent owns its children through its [`RadixTable`]; the child's
//! `parent` field is a plain index back up the tree, so the structure has
//! no ownership cycles.

use std::ops::{Index, IndexMut};

/// Index of a node slot in the arena.
///
/// A `u32` keeps the radix tables compact; a trie with more than four
/// billion nodes is far outside the intended workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// The root is the first slot allocated and is never freed.
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Child table of a node, indexed directly by the next unmatched key byte.
#[derive(Debug, Clone)]
pub(crate) struct RadixTable {
    slots: Box<[Option<NodeId>]>,
    occupied: usize,
}

impl RadixTable {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            slots: vec![None; width].into_boxed_slice(),
            occupied: 0,
        }
    }

    /// Child whose segment starts with `byte`. Bytes beyond the table
    /// width have no child.
    #[inline]
    pub(crate) fn get(&self, byte: u8) -> Option<NodeId> {
        self.slots.get(byte as usize).copied().flatten()
    }

    /// Registers `child` under `byte`, returning the node it displaced.
    ///
    /// `byte` must be within the table width; the trie validates keys
    /// before any node is created for them.
    pub(crate) fn set(&mut self, byte: u8, child: NodeId) -> Option<NodeId> {
        let previous = self.slots[byte as usize].replace(child);
        if previous.is_none() {
            self.occupied += 1;
        }
        previous
    }

    pub(crate) fn clear(&mut self, byte: u8) -> Option<NodeId> {
        let previous = self.slots.get_mut(byte as usize)?.take();
        if previous.is_some() {
            self.occupied -= 1;
        }
        previous
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.occupied
    }

    /// First occupied slot at or after `start`, in ascending index order.
    pub(crate) fn first_from(&self, start: usize) -> Option<(usize, NodeId)> {
        if self.occupied == 0 {
            return None;
        }
        self.slots
            .iter()
            .enumerate()
            .skip(start)
            .find_map(|(index, slot)| slot.map(|child| (index, child)))
    }

    /// Occupied slots in ascending index order.
    pub(crate) fn children(&self) -> impl Iterator<Item = (u8, NodeId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|child| (index as u8, child)))
    }
}

/// A labeled edge segment of the trie, optionally holding a value.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    /// Concatenation of every segment from the root down to this node.
    full_key: Box<[u8]>,

    /// Offset into `full_key` where this node's own segment begins.
    pub(crate) key_start: usize,

    pub(crate) parent: Option<NodeId>,

    pub(crate) children: RadixTable,

    /// `None` for structural nodes that only exist to fork the trie.
    pub(crate) value: Option<T>,
}

impl<T> Node<T> {
    /// The root: empty segment, no parent, no value.
    pub(crate) fn root(width: usize) -> Self {
        Self {
            full_key: Box::default(),
            key_start: 0,
            parent: None,
            children: RadixTable::new(width),
            value: None,
        }
    }

    pub(crate) fn new(full_key: &[u8], key_start: usize, parent: NodeId, width: usize) -> Self {
        Self {
            full_key: full_key.into(),
            key_start,
            parent: Some(parent),
            children: RadixTable::new(width),
            value: None,
        }
    }

    #[inline]
    pub(crate) fn full_key(&self) -> &[u8] {
        &self.full_key
    }

    #[inline]
    pub(crate) fn segment(&self) -> &[u8] {
        &self.full_key[self.key_start..]
    }

    /// Slot this node occupies in its parent's table. `None` for the root.
    #[inline]
    pub(crate) fn table_index(&self) -> Option<u8> {
        self.full_key.get(self.key_start).copied()
    }

    #[inline]
    pub(crate) fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

/// Slot storage for nodes with vacated slots reused by later allocations.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<T> {
    slots: Vec<Option<Node<T>>>,
    free_list: Vec<u32>,
    live: usize,
}

impl<T> NodeArena<T> {
    /// Creates an arena holding only `root`, stored at [`NodeId::ROOT`].
    pub(crate) fn with_root(root: Node<T>) -> Self {
        Self {
            slots: vec![Some(root)],
            free_list: Vec::new(),
            live: 1,
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        self.live += 1;
        match self.free_list.pop() {
            Some(index) => {
                self.slots[index as usize] = Some(node);
                NodeId(index)
            }
            None => {
                let id = NodeId(self.slots.len() as u32);
                self.slots.push(Some(node));
                id
            }
        }
    }

    /// Releases a slot and hands back the node that occupied it.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<Node<T>> {
        if id == NodeId::ROOT {
            return None;
        }
        let node = self.slots.get_mut(id.index())?.take()?;
        if id.index() == self.slots.len() - 1 {
            self.slots.pop();
        } else {
            self.free_list.push(id.0);
        }
        self.live -= 1;
        Some(node)
    }

    /// Drops every node except the root and empties the root's table.
    pub(crate) fn reset(&mut self) {
        self.slots.truncate(1);
        self.free_list.clear();
        self.live = 1;
        if let Some(root) = self.slots[0].as_mut() {
            root.children = RadixTable::new(root.children.slots.len());
            root.value = None;
        }
    }

    /// Number of live nodes, root included.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }
}

impl<T> Index<NodeId> for NodeArena<T> {
    type Output = Node<T>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<T> {
        match self.slots.get(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("dangling node id {id:?}"),
        }
    }
}

impl<T> IndexMut<NodeId> for NodeArena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.slots.get_mut(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("dangling node id {id:?}"),
        }
    }
}
