//! Sentinel-bounded circular doubly-linked list of archive nodes.
//!
//! Nodes live in a [`slab::Slab`] arena and are addressed by [`NodeKey`].
//! The list manages the links; nodes never hold references to each other.
//!
//! # Layout
//!
//! Three sentinels occupy slots 0..=2 of every list and are linked on every
//! axis at construction:
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────┐
//!   ▼                                                      │
//!  S1 ──► S2 ──► p0 ──► p1 ──► ... ──► pn ──► S3 ──────────┘
//! ```
//!
//! Along the sweep axis (the last coordinate) `S1` and `S2` sit at `-inf`
//! and `S3` at `+inf`. Their remaining coordinates carry the reference
//! point, so sweep algorithms can use them as the outer bounds of the
//! measured region:
//!
//! | sentinel | x0 | x1 | x2 | x3 |
//! |----------|----|----|----|----|
//! | `S1` | -inf | r1 | -inf | -inf |
//! | `S2` | r0 | -inf | -inf | -inf |
//! | `S3` | -inf | -inf | r2 | +inf |
//!
//! (in 3D the sweep axis is x2, so `S3` has `x2 = +inf`).
//!
//! # Example
//!
//! ```
//! use nexus_pareto::DominanceList;
//!
//! let mut list: DominanceList<&str> = DominanceList::new(3, Some(&[4.0, 4.0, 4.0]), 8).unwrap();
//! let b = list.alloc(&[2.0, 1.0, 3.0], Some("b")).unwrap();
//! let a = list.alloc(&[1.0, 2.0, 1.0], Some("a")).unwrap();
//! list.insert_sorted(b);
//! list.insert_sorted(a);
//!
//! let axis = list.sweep_axis();
//! let order: Vec<_> = list.keys(axis, false).collect();
//! assert_eq!(order, vec![a, b]);
//!
//! // O(1) removal; the node stays in the arena until released
//! assert!(list.unlink(a));
//! assert_eq!(list.len(), 1);
//! assert_eq!(list.payload(a), Some(&"a"));
//! ```

use core::cmp::Ordering;

use slab::Slab;

use crate::error::Result;
use crate::key::{Key, NodeKey};
use crate::node::Node;
use crate::point::{self, MAX_DIM, SweepOrder};

/// Circular doubly-linked list of nodes kept in sweep order.
///
/// See the [module documentation](self) for the sentinel layout.
#[derive(Debug, Clone)]
pub struct DominanceList<I> {
    nodes: Slab<Node<I>>,
    order: SweepOrder,
    reference: Option<[f64; MAX_DIM]>,
    /// Linked non-sentinel nodes on the sweep axis.
    len: usize,
}

impl<I> DominanceList<I> {
    /// Creates an empty list holding only the three sentinels.
    ///
    /// `reference` of `None` means an unbounded domain (all `+inf`).
    /// `capacity` is a hint for the number of points.
    ///
    /// # Errors
    ///
    /// Returns an error if `dim` is not 3 or 4, or if the reference point
    /// has the wrong length or a NaN coordinate.
    pub fn new(dim: usize, reference: Option<&[f64]>, capacity: usize) -> Result<Self> {
        point::check_dim(dim)?;
        if let Some(r) = reference {
            point::check_point(r, dim)?;
        }

        let order = SweepOrder::new(dim);
        let reference = reference.map(point::to_coords);
        let mut nodes = Slab::with_capacity(capacity + NodeKey::SENTINELS);
        for coords in sentinel_coords(order, reference.as_ref()) {
            nodes.insert(Node::new(coords, None));
        }
        debug_assert!(nodes.contains(NodeKey::S3.index()));

        let mut list = Self {
            nodes,
            order,
            reference,
            len: 0,
        };
        for axis in 0..dim {
            list.node_mut(NodeKey::S1)
                .set_link(axis, NodeKey::S3, NodeKey::S2);
            list.node_mut(NodeKey::S2)
                .set_link(axis, NodeKey::S1, NodeKey::S3);
            list.node_mut(NodeKey::S3)
                .set_link(axis, NodeKey::S2, NodeKey::S1);
        }
        Ok(list)
    }

    /// Returns the dimensionality.
    #[inline]
    pub fn dim(&self) -> usize {
        self.order.dim()
    }

    /// Returns the sweep axis (`dim - 1`).
    #[inline]
    pub fn sweep_axis(&self) -> usize {
        self.order.axis()
    }

    /// Returns the sweep comparator.
    #[inline]
    pub fn order(&self) -> SweepOrder {
        self.order
    }

    /// Returns the number of linked points (sentinels excluded).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no points are linked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the reference point, or `None` for an unbounded domain.
    #[inline]
    pub fn reference(&self) -> Option<&[f64]> {
        let dim = self.dim();
        self.reference.as_ref().map(|r| &r[..dim])
    }

    /// Moves the sentinels to a new reference point.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference has the wrong length or a NaN.
    pub fn set_reference(&mut self, reference: Option<&[f64]>) -> Result<()> {
        if let Some(r) = reference {
            point::check_point(r, self.dim())?;
        }
        self.reference = reference.map(point::to_coords);
        let coords = sentinel_coords(self.order, self.reference.as_ref());
        for (slot, coords) in coords.into_iter().enumerate() {
            self.node_mut(NodeKey::from_usize(slot)).coords = coords;
        }
        Ok(())
    }

    // ========================================================================
    // Arena
    // ========================================================================

    /// Stores a new, unlinked node and returns its key.
    ///
    /// # Errors
    ///
    /// Returns an error if the point has the wrong length or a NaN. Nothing
    /// is stored in that case.
    pub fn alloc(&mut self, point: &[f64], payload: Option<I>) -> Result<NodeKey> {
        point::check_point(point, self.dim())?;
        Ok(NodeKey::from_usize(
            self.nodes.insert(Node::new(point::to_coords(point), payload)),
        ))
    }

    /// Reserves arena room for at least `additional` more nodes.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    /// Unlinks (if needed) and deallocates a node.
    ///
    /// Returns `None` for sentinels and keys not present in the arena.
    pub fn release(&mut self, key: NodeKey) -> Option<Node<I>> {
        if key.is_sentinel() || !self.nodes.contains(key.index()) {
            return None;
        }
        self.unlink(key);
        self.nodes.try_remove(key.index())
    }

    // ========================================================================
    // Link operations
    // ========================================================================

    /// Links `key` directly after `after` on `axis`.
    ///
    /// # Panics
    ///
    /// Panics if either key is invalid, if `key` is a sentinel, or if `key`
    /// is already linked on `axis`.
    pub fn link_after(&mut self, axis: usize, after: NodeKey, key: NodeKey) {
        assert!(!key.is_sentinel(), "sentinels are linked at construction");
        assert!(
            !self.node(key).is_linked_on(axis),
            "node is already linked on axis {axis}"
        );
        let next = self.node(after).next[axis];
        self.node_mut(key).set_link(axis, after, next);
        self.node_mut(after).next[axis] = key;
        self.node_mut(next).prev[axis] = key;

        if axis == self.sweep_axis() {
            self.len += 1;
        }
    }

    /// Links `key` directly before `before` on `axis`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`link_after`](Self::link_after).
    #[inline]
    pub fn link_before(&mut self, axis: usize, before: NodeKey, key: NodeKey) {
        let prev = self.node(before).prev[axis];
        self.link_after(axis, prev, key);
    }

    /// Links `key` at its sorted position on the sweep axis.
    ///
    /// Scans backward from the tail sentinel, O(n). A node equal to an
    /// existing one is placed after it; dominance pruning decides whether
    /// the duplicate survives.
    pub fn insert_sorted(&mut self, key: NodeKey) {
        let after = self.sorted_position(self.node(key).coords());
        self.link_after(self.sweep_axis(), after, key);
    }

    /// Returns the node after which `coords` belongs on the sweep axis.
    pub(crate) fn sorted_position(&self, coords: &[f64]) -> NodeKey {
        let axis = self.sweep_axis();
        let mut at = self.node(NodeKey::S3).prev[axis];
        while !at.is_sentinel()
            && self.order.compare(self.node(at).coords(), coords) == Ordering::Greater
        {
            at = self.node(at).prev[axis];
        }
        at
    }

    /// Unlinks a node from every axis it is linked on, without deallocating.
    ///
    /// The neighbours are repaired so the list stays circular. The node's
    /// own links are left as they were, so it can still be inspected.
    ///
    /// Returns `true` if the node was linked.
    ///
    /// # Panics
    ///
    /// Panics if `key` is a sentinel or invalid.
    pub fn unlink(&mut self, key: NodeKey) -> bool {
        assert!(!key.is_sentinel(), "sentinels cannot be unlinked");
        let node = self.node(key);
        if !node.is_linked() {
            return false;
        }

        let (prev, next, linked) = (node.prev, node.next, node.linked);
        for axis in 0..self.dim() {
            if linked & (1 << axis) == 0 {
                continue;
            }
            self.node_mut(prev[axis]).next[axis] = next[axis];
            self.node_mut(next[axis]).prev[axis] = prev[axis];
        }
        self.node_mut(key).linked = 0;

        if linked & (1 << self.sweep_axis()) != 0 {
            self.len -= 1;
        }
        true
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the node at `key`, if present in the arena.
    #[inline]
    pub fn get(&self, key: NodeKey) -> Option<&Node<I>> {
        self.nodes.get(key.index())
    }

    /// Returns the first `dim` coordinates of a node.
    ///
    /// # Panics
    ///
    /// Panics if `key` is invalid.
    #[inline]
    pub fn point(&self, key: NodeKey) -> &[f64] {
        &self.node(key).coords[..self.dim()]
    }

    /// Returns the payload of a node, if present.
    #[inline]
    pub fn payload(&self, key: NodeKey) -> Option<&I> {
        self.get(key).and_then(Node::payload)
    }

    /// Returns the neighbour keys computed by the last neighbour pass.
    #[inline]
    pub fn closest(&self, key: NodeKey) -> Option<[NodeKey; 2]> {
        self.get(key).map(Node::closest)
    }

    /// Returns the dominance count of a node.
    #[inline]
    pub fn dominance_count(&self, key: NodeKey) -> Option<u32> {
        self.get(key).map(Node::dominance_count)
    }

    /// Returns `true` if `key` is present and linked on the sweep axis.
    #[inline]
    pub fn is_linked(&self, key: NodeKey) -> bool {
        self.get(key)
            .is_some_and(|node| node.is_linked_on(self.sweep_axis()))
    }

    /// Returns the next key on `axis` (wraps from `S3` to `S1`).
    #[inline]
    pub fn next_key(&self, axis: usize, key: NodeKey) -> NodeKey {
        self.node(key).next[axis]
    }

    /// Returns the previous key on `axis` (wraps from `S1` to `S3`).
    #[inline]
    pub fn prev_key(&self, axis: usize, key: NodeKey) -> NodeKey {
        self.node(key).prev[axis]
    }

    #[inline]
    pub(crate) fn node(&self, key: NodeKey) -> &Node<I> {
        self.nodes.get(key.index()).expect("invalid node key")
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, key: NodeKey) -> &mut Node<I> {
        self.nodes.get_mut(key.index()).expect("invalid node key")
    }

    #[inline]
    pub(crate) fn set_closest(&mut self, key: NodeKey, closest: [NodeKey; 2]) {
        self.node_mut(key).closest = closest;
    }

    /// Clears `closest[]` on every node, sentinels included.
    pub(crate) fn reset_closest(&mut self) {
        for (_, node) in self.nodes.iter_mut() {
            node.closest = [NodeKey::NONE; 2];
        }
    }

    /// Checks that every linked node's `closest[]` refers to a sentinel or
    /// a linked node.
    ///
    /// # Panics
    ///
    /// Panics on a missing or dangling neighbour. That state means the
    /// neighbour pass is stale or corrupted, and no volume computed from it
    /// can be trusted.
    pub fn assert_neighbors(&self) {
        for (key, node) in self.iter(self.sweep_axis(), false) {
            for neighbor in node.closest {
                assert!(
                    neighbor.is_some(),
                    "closest[] of {key:?} not computed by the neighbour pass"
                );
                assert!(
                    neighbor.is_sentinel() || self.is_linked(neighbor),
                    "closest[] of {key:?} references unlinked node {neighbor:?}"
                );
            }
        }
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over `(key, node)` pairs along `axis`.
    ///
    /// With `include_sentinels` the walk starts at `S1` and ends at `S3`;
    /// otherwise it covers only the points between `S2` and `S3`. The
    /// iterator borrows the list, so it cannot observe a mutation midway.
    #[inline]
    pub fn iter(&self, axis: usize, include_sentinels: bool) -> Iter<'_, I> {
        let (front, back) = if include_sentinels {
            (NodeKey::S1, NodeKey::S3)
        } else {
            let front = self.node(NodeKey::S2).next[axis];
            let back = self.node(NodeKey::S3).prev[axis];
            if front == NodeKey::S3 {
                (NodeKey::NONE, NodeKey::NONE)
            } else {
                (front, back)
            }
        };
        Iter {
            list: self,
            axis,
            front,
            back,
        }
    }

    /// Returns an iterator over keys along `axis`.
    ///
    /// Collect the keys first when the list is about to be mutated.
    #[inline]
    pub fn keys(&self, axis: usize, include_sentinels: bool) -> Keys<'_, I> {
        Keys {
            inner: self.iter(axis, include_sentinels),
        }
    }
}

/// Computes the sentinel coordinates for a reference point.
fn sentinel_coords(order: SweepOrder, reference: Option<&[f64; MAX_DIM]>) -> [[f64; MAX_DIM]; 3] {
    let r = reference.copied().unwrap_or([f64::INFINITY; MAX_DIM]);
    let ninf = f64::NEG_INFINITY;

    let mut s1 = [ninf, r[1], ninf, ninf];
    let mut s2 = [r[0], ninf, ninf, ninf];
    let mut s3 = [ninf, ninf, r[2], ninf];
    s3[order.axis()] = f64::INFINITY;

    for coords in [&mut s1, &mut s2, &mut s3] {
        for slot in coords.iter_mut().skip(order.dim()) {
            *slot = 0.0;
        }
    }
    [s1, s2, s3]
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over `(key, node)` pairs of a [`DominanceList`].
pub struct Iter<'a, I> {
    list: &'a DominanceList<I>,
    axis: usize,
    front: NodeKey,
    back: NodeKey,
}

impl<'a, I> Iterator for Iter<'a, I> {
    type Item = (NodeKey, &'a Node<I>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front.is_none() {
            return None;
        }

        let key = self.front;
        let node = self.list.node(key);

        // Check if we've met in the middle
        if self.front == self.back {
            self.front = NodeKey::NONE;
            self.back = NodeKey::NONE;
        } else {
            self.front = node.next[self.axis];
        }

        Some((key, node))
    }
}

impl<I> DoubleEndedIterator for Iter<'_, I> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back.is_none() {
            return None;
        }

        let key = self.back;
        let node = self.list.node(key);

        if self.front == self.back {
            self.front = NodeKey::NONE;
            self.back = NodeKey::NONE;
        } else {
            self.back = node.prev[self.axis];
        }

        Some((key, node))
    }
}

/// Iterator over the keys of a [`DominanceList`].
pub struct Keys<'a, I> {
    inner: Iter<'a, I>,
}

impl<I> Iterator for Keys<'_, I> {
    type Item = NodeKey;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

impl<I> DoubleEndedIterator for Keys<'_, I> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}
