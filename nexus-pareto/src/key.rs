//! Stable arena indices for archive nodes.
//!
//! Every node of a [`DominanceList`](crate::DominanceList) lives in a slab and
//! is addressed by a [`NodeKey`]. Keys stay valid until the node is released,
//! so unlinking and pruning never produce dangling links.
//!
//! Slots 0, 1 and 2 are reserved for the three sentinels of every list.

/// Trait for index types that carry a "null" sentinel value.
///
/// Used by the node links and by the skip list forward pointers, which
/// store `NONE` instead of `Option<Idx>` to keep nodes compact.
///
/// # Example
///
/// ```
/// use nexus_pareto::Key;
///
/// let idx: usize = 7;
/// assert!(idx.is_some());
/// assert!(usize::NONE.is_none());
/// ```
pub trait Key: Copy + Eq {
    /// Sentinel value representing "no key".
    const NONE: Self;

    /// Creates a key from a slab index.
    fn from_usize(val: usize) -> Self;

    /// Returns the key as a slab index.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this is NOT the sentinel value.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }
}

impl Key for usize {
    const NONE: Self = usize::MAX;

    #[inline]
    fn from_usize(val: usize) -> Self {
        val
    }

    #[inline]
    fn as_usize(&self) -> usize {
        *self
    }
}

/// Handle to a node stored in a [`DominanceList`](crate::DominanceList).
///
/// Keys are plain indices: copying one never borrows the list, and a key
/// handed to a different list is simply a wrong index (checked accessors
/// return `None`, unchecked paths panic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(usize);

impl NodeKey {
    /// Head sentinel. Lower-left bound of the `(x[1], x[0])` staircase.
    pub const S1: NodeKey = NodeKey(0);
    /// Second sentinel, first on the sweep chain after the head.
    pub const S2: NodeKey = NodeKey(1);
    /// Tail sentinel, last on the sweep chain.
    pub const S3: NodeKey = NodeKey(2);

    /// Number of slots reserved for sentinels.
    pub const SENTINELS: usize = 3;

    /// Returns `true` for the three reserved sentinel slots.
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 < Self::SENTINELS
    }

    /// Returns the raw slab index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Key for NodeKey {
    const NONE: Self = NodeKey(usize::MAX);

    #[inline]
    fn from_usize(val: usize) -> Self {
        NodeKey(val)
    }

    #[inline]
    fn as_usize(&self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_slots() {
        assert!(NodeKey::S1.is_sentinel());
        assert!(NodeKey::S2.is_sentinel());
        assert!(NodeKey::S3.is_sentinel());
        assert!(!NodeKey::from_usize(3).is_sentinel());
        assert!(!NodeKey::NONE.is_sentinel());
    }

    #[test]
    fn none_values() {
        assert!(NodeKey::NONE.is_none());
        assert!(NodeKey::S1.is_some());
        assert_eq!(usize::NONE, usize::MAX);
        assert_eq!(NodeKey::from_usize(42).as_usize(), 42);
    }

    #[test]
    fn ordering_follows_slab_index() {
        assert!(NodeKey::S1 < NodeKey::S2);
        assert!(NodeKey::from_usize(10) < NodeKey::NONE);
    }
}
