//! Archive node record.

use crate::key::{Key, NodeKey};
use crate::point::MAX_DIM;

/// One candidate objective vector plus its bookkeeping.
///
/// Nodes are owned by a [`DominanceList`](crate::DominanceList) and linked
/// through per-axis `prev`/`next` keys. Unlinking a node repairs its
/// neighbours but leaves the node's own links untouched, so a pruned node can
/// still be inspected.
#[derive(Debug, Clone)]
pub struct Node<I> {
    pub(crate) coords: [f64; MAX_DIM],
    pub(crate) prev: [NodeKey; MAX_DIM],
    pub(crate) next: [NodeKey; MAX_DIM],
    /// Bit `a` set while the node is linked on axis `a`.
    pub(crate) linked: u8,
    pub(crate) dominance_count: u32,
    pub(crate) closest: [NodeKey; 2],
    pub(crate) payload: Option<I>,
}

impl<I> Node<I> {
    /// Creates an unlinked node.
    #[inline]
    pub(crate) fn new(coords: [f64; MAX_DIM], payload: Option<I>) -> Self {
        Self {
            coords,
            prev: [NodeKey::NONE; MAX_DIM],
            next: [NodeKey::NONE; MAX_DIM],
            linked: 0,
            dominance_count: 0,
            closest: [NodeKey::NONE; 2],
            payload,
        }
    }

    /// Returns all coordinate slots, including unused trailing ones.
    #[inline]
    pub fn coords(&self) -> &[f64; MAX_DIM] {
        &self.coords
    }

    /// Returns the previous node on `axis`.
    #[inline]
    pub fn prev(&self, axis: usize) -> NodeKey {
        self.prev[axis]
    }

    /// Returns the next node on `axis`.
    #[inline]
    pub fn next(&self, axis: usize) -> NodeKey {
        self.next[axis]
    }

    /// Returns `true` if the node is currently linked on `axis`.
    #[inline]
    pub fn is_linked_on(&self, axis: usize) -> bool {
        self.linked & (1 << axis) != 0
    }

    /// Returns `true` if the node is linked on any axis.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.linked != 0
    }

    /// Number of dominators witnessed. Non-zero means dominated.
    #[inline]
    pub fn dominance_count(&self) -> u32 {
        self.dominance_count
    }

    /// Returns `true` if the node has been marked dominated.
    #[inline]
    pub fn is_dominated(&self) -> bool {
        self.dominance_count > 0
    }

    /// Lower and upper neighbours in the `(x[1], x[0])` ordering.
    ///
    /// `NodeKey::NONE` until the neighbour pass has run.
    #[inline]
    pub fn closest(&self) -> [NodeKey; 2] {
        self.closest
    }

    /// Returns the caller-supplied payload.
    #[inline]
    pub fn payload(&self) -> Option<&I> {
        self.payload.as_ref()
    }

    #[inline]
    pub(crate) fn mark_dominated(&mut self) {
        self.dominance_count = 1;
    }

    #[inline]
    pub(crate) fn set_link(&mut self, axis: usize, prev: NodeKey, next: NodeKey) {
        self.prev[axis] = prev;
        self.next[axis] = next;
        self.linked |= 1 << axis;
    }
}
