//! Addressable priority queue keyed by [`NodeId`] (spec.md §3,
//! `QueryHeap`).
//!
//! `std::collections::BinaryHeap` has no decrease-key, so a
//! lower-key re-insertion is pushed as a fresh heap entry and the
//! stale one is recognised (and skipped) on pop by comparing against
//! the authoritative key held in `state`. This is the same
//! lazy-deletion idiom the rest of the pack uses for addressable
//! heaps over a plain `BinaryHeap`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use crate::model::{NodeId, Weight};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct HeapEntry {
    node: NodeId,
    key: Weight,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap` (a max-heap) pops the smallest key.
        other.key.cmp(&self.key).then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy)]
struct NodeState {
    key: Weight,
    parent: NodeId,
    settled: bool,
}

#[derive(Debug, Default)]
pub struct QueryHeap {
    heap: BinaryHeap<HeapEntry>,
    state: FxHashMap<NodeId, NodeState>,
}

impl QueryHeap {
    pub fn new() -> Self {
        QueryHeap::default()
    }

    /// Clears the heap for reuse on the next leg/request, keeping the
    /// backing allocations (spec.md §5: heaps are cleared, not
    /// dropped, between legs for locality).
    pub fn clear(&mut self) {
        self.heap.clear();
        self.state.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.state.contains_key(&node)
    }

    pub fn was_settled(&self, node: NodeId) -> bool {
        self.state.get(&node).is_some_and(|s| s.settled)
    }

    pub fn key(&self, node: NodeId) -> Option<Weight> {
        self.state.get(&node).map(|s| s.key)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.state.get(&node).map(|s| s.parent)
    }

    /// The smallest key still pending in the heap (settled or stale
    /// entries aside), used for the termination bound (spec.md §4.3
    /// step 5).
    pub fn min_key(&self) -> Option<Weight> {
        self.heap.peek().map(|e| e.key)
    }

    /// Inserts `node` with `key`/`parent` if unseen, or decreases its
    /// key if `key` improves on the current one. No-op otherwise.
    pub fn insert(&mut self, node: NodeId, key: Weight, parent: NodeId) {
        let improves = match self.state.get(&node) {
            None => true,
            Some(existing) => key < existing.key,
        };
        if improves {
            self.state.insert(node, NodeState { key, parent, settled: false });
            self.heap.push(HeapEntry { node, key });
        }
    }

    /// Pops and settles the minimum-key node, skipping stale entries
    /// left behind by `insert`'s decrease-key re-pushes.
    pub fn pop_min(&mut self) -> Option<(NodeId, Weight)> {
        while let Some(entry) = self.heap.pop() {
            let Some(state) = self.state.get_mut(&entry.node) else {
                continue;
            };
            if state.settled || state.key != entry.key {
                continue;
            }
            state.settled = true;
            return Some((entry.node, entry.key));
        }
        None
    }
}
