//! Binary heap with stable node handles
//!
//! Unlike [`std::collections::BinaryHeap`], nodes stay addressable after insertion:
//! [`IndexedHeap::insert`] hands back a [`NodeId`] which can later be used to change that node's value,
//! with the heap repaired in logarithmic time.
//!
//! The nodes themselves live in a [`NodeStore`] arena, separate from the heap's ordering array.
//! Two heaps sharing one store can exchange their roots with [`IndexedHeap::swap_root_with`],
//! and every handle stays valid across the exchange, since only the node's owner tag changes.
//!
//! A heap must always be used with the same store it inserted its nodes into.
//! Passing a different store gives meaningless results, and may panic on an out-of-range handle.

use std::fmt;

use crate::error::{MedianError, Result};

/// Ordering of a heap, which doubles as the owner tag carried by every node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapKind {
    /// Largest value at the root
    Max,
    /// Smallest value at the root
    Min,
}

impl HeapKind {
    /// Whether `a` belongs strictly closer to the root than `b`
    #[inline]
    fn outranks<T: PartialOrd>(self, a: &T, b: &T) -> bool {
        match self {
            HeapKind::Max => a > b,
            HeapKind::Min => a < b,
        }
    }
}

impl fmt::Display for HeapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapKind::Max => f.write_str("max"),
            HeapKind::Min => f.write_str("min"),
        }
    }
}

/// Stable handle to a node in a [`NodeStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A value stored in a heap, together with its current position
#[derive(Debug, Clone)]
pub struct HeapNode<T> {
    value: T,
    slot: usize,
    owner: HeapKind,
}

impl<T> HeapNode<T> {
    /// Current value of the node
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Index of the node in its owning heap's ordering array
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Kind of the heap the node currently belongs to
    pub fn owner(&self) -> HeapKind {
        self.owner
    }
}

/// Arena owning every node of one or more heaps
///
/// Nodes are never removed individually, they are recycled by overwriting their value.
/// Dropping the store releases all of them at once.
#[derive(Debug, Clone)]
pub struct NodeStore<T> {
    nodes: Vec<HeapNode<T>>,
}

impl<T> Default for NodeStore<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> NodeStore<T> {
    /// Constructs an empty store with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Total number of nodes, across all heaps using this store
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been created yet
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by handle
    pub fn get(&self, id: NodeId) -> Option<&HeapNode<T>> {
        self.nodes.get(id.0)
    }

    /// Current value of a node
    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.get(id).map(HeapNode::value)
    }

    /// Kind of the heap a node currently belongs to
    pub fn owner(&self, id: NodeId) -> Option<HeapKind> {
        self.get(id).map(HeapNode::owner)
    }

    fn push(&mut self, node: HeapNode<T>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    #[inline]
    fn node(&self, id: NodeId) -> &HeapNode<T> {
        &self.nodes[id.0]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut HeapNode<T> {
        &mut self.nodes[id.0]
    }
}

/// Fixed-capacity binary heap over nodes held in a [`NodeStore`]
///
/// The heap only stores the ordering: `order[i]` is the node at position `i` of the implicit complete binary tree,
/// and every node records that position in its own `slot` field.
/// Both are kept in agreement on every swap.
#[derive(Debug, Clone)]
pub struct IndexedHeap {
    kind: HeapKind,
    capacity: usize,
    order: Vec<NodeId>,
}

impl IndexedHeap {
    /// Constructs an empty heap holding at most `capacity` nodes
    ///
    /// Fails with [`MedianError::InvalidArgument`] if `capacity` is zero.
    pub fn new(kind: HeapKind, capacity: usize) -> Result<Self> {
        if capacity < 1 {
            #[cfg(feature = "log")]
            log::warn!("Rejected {} heap with zero capacity", kind);

            return Err(MedianError::InvalidArgument {
                what: "heap capacity",
                value: capacity,
            });
        }

        Ok(Self {
            kind,
            capacity,
            order: Vec::with_capacity(capacity),
        })
    }

    /// Ordering of this heap
    pub fn kind(&self) -> HeapKind {
        self.kind
    }

    /// Maximum number of nodes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of nodes currently in the heap
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the heap holds no nodes
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether the heap holds `capacity` nodes
    pub fn is_full(&self) -> bool {
        self.order.len() == self.capacity
    }

    /// Handle of the root node, if any
    pub fn peek_root(&self) -> Option<NodeId> {
        self.order.first().copied()
    }

    /// Value of the root node, if any
    pub fn root_value<T: Copy>(&self, store: &NodeStore<T>) -> Option<T> {
        self.peek_root().map(|id| store.node(id).value)
    }

    /// Adds a new node holding `value`, returning its handle
    ///
    /// Fails with [`MedianError::CapacityExceeded`] if the heap is full.
    pub fn insert<T: PartialOrd>(&mut self, store: &mut NodeStore<T>, value: T) -> Result<NodeId> {
        if self.is_full() {
            return Err(MedianError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let slot = self.order.len();
        let id = store.push(HeapNode {
            value,
            slot,
            owner: self.kind,
        });
        self.order.push(id);
        self.sift_up(store, slot);

        Ok(id)
    }

    /// Replaces the value of a node owned by this heap, then restores the heap property
    ///
    /// The repair walks towards the root if the new value ranks closer to it than the old one did,
    /// and towards the leaves otherwise.
    /// Fails with [`MedianError::ForeignNode`] if this heap does not currently own the node.
    pub fn update_value<T: PartialOrd>(
        &mut self,
        store: &mut NodeStore<T>,
        id: NodeId,
        value: T,
    ) -> Result<()> {
        let node = store
            .get(id)
            .filter(|node| node.owner == self.kind && self.order.get(node.slot) == Some(&id))
            .ok_or(MedianError::ForeignNode { target: self.kind })?;

        if node.value == value {
            return Ok(());
        }

        let slot = node.slot;
        let move_up = self.kind.outranks(&value, &node.value);
        store.node_mut(id).value = value;

        if move_up {
            self.sift_up(store, slot);
        } else {
            self.sift_down(store, slot);
        }

        Ok(())
    }

    /// Exchanges the roots of `self` and `other`, then repairs both heaps downwards
    ///
    /// Each transplanted node is retagged with its new owner; handles remain valid.
    /// Fails with [`MedianError::UnpairedSwap`] if either heap is empty.
    pub fn swap_root_with<T: PartialOrd>(
        &mut self,
        other: &mut IndexedHeap,
        store: &mut NodeStore<T>,
    ) -> Result<()> {
        let (ours, theirs) = match (self.peek_root(), other.peek_root()) {
            (Some(ours), Some(theirs)) => (ours, theirs),
            _ => return Err(MedianError::UnpairedSwap),
        };

        #[cfg(feature = "log")]
        log::trace!("Swapping roots of the {} and {} heaps", self.kind, other.kind);

        self.order[0] = theirs;
        other.order[0] = ours;
        store.node_mut(theirs).owner = self.kind;
        store.node_mut(ours).owner = other.kind;

        self.sift_down(store, 0);
        other.sift_down(store, 0);

        Ok(())
    }

    fn sift_up<T: PartialOrd>(&mut self, store: &mut NodeStore<T>, mut slot: usize) {
        while let Some(parent) = parent(slot) {
            let node = &store.node(self.order[slot]).value;
            let above = &store.node(self.order[parent]).value;

            if !self.kind.outranks(node, above) {
                break;
            }

            self.swap_slots(store, slot, parent);
            slot = parent;
        }
    }

    fn sift_down<T: PartialOrd>(&mut self, store: &mut NodeStore<T>, mut slot: usize) {
        while let Some(child) = self.extreme_child(store, slot) {
            let node = &store.node(self.order[slot]).value;
            let below = &store.node(self.order[child]).value;

            if !self.kind.outranks(below, node) {
                break;
            }

            self.swap_slots(store, slot, child);
            slot = child;
        }
    }

    /// The child of `slot` that ranks closest to the root, preferring the right one on a tie
    fn extreme_child<T: PartialOrd>(&self, store: &NodeStore<T>, slot: usize) -> Option<usize> {
        let left = left_child(slot);
        let right = right_child(slot);
        let len = self.order.len();

        match (left < len, right < len) {
            (false, _) => None,
            (true, false) => Some(left),
            (true, true) => {
                let l = &store.node(self.order[left]).value;
                let r = &store.node(self.order[right]).value;
                Some(if self.kind.outranks(l, r) { left } else { right })
            }
        }
    }

    fn swap_slots<T>(&mut self, store: &mut NodeStore<T>, a: usize, b: usize) {
        self.order.swap(a, b);
        store.node_mut(self.order[a]).slot = a;
        store.node_mut(self.order[b]).slot = b;
    }

    /// Panics if the heap property or the slot back-links are broken
    #[cfg(test)]
    pub(crate) fn assert_consistent<T: PartialOrd + fmt::Debug>(&self, store: &NodeStore<T>) {
        assert!(self.order.len() <= self.capacity);

        for (i, id) in self.order.iter().enumerate() {
            let node = store.node(*id);
            assert_eq!(node.slot, i, "stale slot for node {:?}", id);
            assert_eq!(node.owner, self.kind, "wrong owner for node {:?}", id);

            if let Some(p) = parent(i) {
                let above = &store.node(self.order[p]).value;
                assert!(
                    !self.kind.outranks(&node.value, above),
                    "{} heap violated: {:?} at {} above {:?} at {}",
                    self.kind,
                    above,
                    p,
                    node.value,
                    i
                );
            }
        }
    }
}

/// Parent position of `slot`, or `None` for the root
///
/// Odd positions are left children and even positions are right children.
#[inline]
fn parent(slot: usize) -> Option<usize> {
    if slot == 0 {
        None
    } else {
        let right_hand = usize::from(slot % 2 == 0);
        Some((slot - right_hand - 1) / 2)
    }
}

#[inline]
fn left_child(slot: usize) -> usize {
    2 * slot + 1
}

#[inline]
fn right_child(slot: usize) -> usize {
    2 * slot + 2
}
