//! Skip list - a probabilistic sorted map over slab storage.
//!
//! Provides O(log n) expected insert, lookup and removal, plus the ordered
//! queries the sweeps need: strict predecessor/successor, lower bound and
//! a cursor that removes while walking forward.
//!
//! ```text
//! Level 2:  HEAD ────────► 20 ──────────► 50 ──────────────────► NIL
//!             │            │              │
//! Level 1:  HEAD ──► 10 ──► 20 ──► 30 ──► 50 ──► 60 ──► NIL
//! ```
//!
//! # Example
//!
//! ```rust
//! use nexus_pareto::SkipList;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut map: SkipList<u64, &str> = SkipList::new(SmallRng::seed_from_u64(12345));
//! map.insert(10, "a");
//! map.insert(30, "c");
//! map.insert(20, "b");
//!
//! assert_eq!(map.predecessor(&20), Some((&10, &"a")));
//! assert_eq!(map.successor(&20), Some((&30, &"c")));
//! assert_eq!(map.lower_bound(&15), Some((&20, &"b")));
//!
//! // sweep from 20, dropping everything below 35
//! let mut cursor = map.cursor_at(&20);
//! while let Some((&k, _)) = cursor.current() {
//!     if k >= 35 {
//!         break;
//!     }
//!     cursor.remove_current();
//! }
//! assert_eq!(map.len(), 1);
//! ```

use rand::rngs::SmallRng;
use rand_core::RngCore;
use slab::Slab;

use crate::key::Key;

// ============================================================================
// SkipNode
// ============================================================================

/// A node holding a key, its value and per-level forward links.
#[derive(Debug, Clone)]
pub struct SkipNode<K, V, const MAX_LEVEL: usize> {
    /// The key used for ordering.
    pub key: K,
    /// The value associated with this key.
    pub value: V,
    /// `forward[i]` is the next node at level i, or `usize::NONE`.
    forward: [usize; MAX_LEVEL],
    /// Node participates in levels `0..=level`.
    level: u8,
}

impl<K, V, const MAX_LEVEL: usize> SkipNode<K, V, MAX_LEVEL> {
    #[inline]
    fn new(key: K, value: V, level: u8) -> Self {
        Self {
            key,
            value,
            forward: [usize::NONE; MAX_LEVEL],
            level,
        }
    }
}

// ============================================================================
// SkipList
// ============================================================================

/// A probabilistic sorted map.
///
/// # Type Parameters
///
/// - `K`: Key type, must implement `Ord`
/// - `V`: Value type
/// - `R`: Random number generator for level assignment
/// - `MAX_LEVEL`: Maximum number of levels, defaults to 16 (~65K elements efficient)
#[derive(Debug, Clone)]
pub struct SkipList<K, V, R = SmallRng, const MAX_LEVEL: usize = 16>
where
    K: Ord,
{
    nodes: Slab<SkipNode<K, V, MAX_LEVEL>>,
    /// `head[i]` is the first node at level i.
    head: [usize; MAX_LEVEL],
    /// Last node at level 0, for O(1) `last()`.
    tail: usize,
    rng: R,
    /// Highest level in use (0-indexed).
    level: usize,
}

impl<K, V, R, const MAX_LEVEL: usize> SkipList<K, V, R, MAX_LEVEL>
where
    K: Ord,
    R: RngCore,
{
    /// Creates an empty skip list.
    pub fn new(rng: R) -> Self {
        Self::with_capacity(rng, 0)
    }

    /// Creates an empty skip list with room for `capacity` entries.
    pub fn with_capacity(rng: R, capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            head: [usize::NONE; MAX_LEVEL],
            tail: usize::NONE,
            rng,
            level: 0,
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the skip list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if the skip list contains the given key.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns the value for the given key.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|idx| &self.nodes[idx].value)
    }

    /// Returns the value for the given key, mutably.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(&mut self.nodes[idx].value)
    }

    /// Returns the smallest entry.
    #[inline]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.entry_at(self.head[0])
    }

    /// Returns the largest entry. O(1).
    #[inline]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.entry_at(self.tail)
    }

    /// Returns the largest entry with a key strictly less than `key`.
    #[inline]
    pub fn predecessor(&self, key: &K) -> Option<(&K, &V)> {
        self.entry_at(self.before(key))
    }

    /// Returns the entry for `key`, or the largest entry below it.
    pub fn at_or_before(&self, key: &K) -> Option<(&K, &V)> {
        let before = self.before(key);
        let next = self.next_of(before, 0);
        if next.is_some() && self.nodes[next].key == *key {
            self.entry_at(next)
        } else {
            self.entry_at(before)
        }
    }

    /// Returns the smallest entry with a key greater than or equal to `key`.
    #[inline]
    pub fn lower_bound(&self, key: &K) -> Option<(&K, &V)> {
        self.entry_at(self.next_of(self.before(key), 0))
    }

    /// Returns the smallest entry with a key strictly greater than `key`.
    pub fn successor(&self, key: &K) -> Option<(&K, &V)> {
        let mut next = self.next_of(self.before(key), 0);
        if next.is_some() && self.nodes[next].key == *key {
            next = self.nodes[next].forward[0];
        }
        self.entry_at(next)
    }

    /// Inserts a key-value pair.
    ///
    /// If the key already exists, the value is updated and the old value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut update = [usize::NONE; MAX_LEVEL];
        if let Some(existing) = self.search(&key, &mut update) {
            let node = &mut self.nodes[existing];
            return Some(core::mem::replace(&mut node.value, value));
        }

        let new_level = self.random_level();
        let idx = self.nodes.insert(SkipNode::new(key, value, new_level));
        self.link_node(idx, new_level, &update);
        None
    }

    /// Removes the entry for the given key and returns the value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut update = [usize::NONE; MAX_LEVEL];
        let idx = self.search(key, &mut update)?;
        self.unlink_node(idx, &update);
        Some(self.nodes.remove(idx).value)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = [usize::NONE; MAX_LEVEL];
        self.tail = usize::NONE;
        self.level = 0;
    }

    /// Returns an iterator over entries in sorted order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V, MAX_LEVEL> {
        Iter {
            nodes: &self.nodes,
            current: self.head[0],
        }
    }

    /// Returns an iterator over entries with keys `>= key`.
    #[inline]
    pub fn iter_from(&self, key: &K) -> Iter<'_, K, V, MAX_LEVEL> {
        Iter {
            nodes: &self.nodes,
            current: self.next_of(self.before(key), 0),
        }
    }

    /// Returns a cursor at the first entry.
    #[inline]
    pub fn cursor_front(&mut self) -> Cursor<'_, K, V, R, MAX_LEVEL> {
        let current = self.head[0];
        Cursor {
            list: self,
            current,
            prev_at_level: [usize::NONE; MAX_LEVEL],
        }
    }

    /// Returns a cursor at `key`, or at the first entry greater than `key`.
    pub fn cursor_at(&mut self, key: &K) -> Cursor<'_, K, V, R, MAX_LEVEL> {
        let mut prev_at_level = [usize::NONE; MAX_LEVEL];
        self.search(key, &mut prev_at_level);
        let current = self.next_of(prev_at_level[0], 0);
        Cursor {
            list: self,
            current,
            prev_at_level,
        }
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    #[inline]
    fn entry_at(&self, idx: usize) -> Option<(&K, &V)> {
        if idx.is_none() {
            return None;
        }
        let node = &self.nodes[idx];
        Some((&node.key, &node.value))
    }

    /// Node after `current` at `level`; `current == NONE` means the head.
    #[inline]
    fn next_of(&self, current: usize, level: usize) -> usize {
        if current.is_none() {
            self.head[level]
        } else {
            self.nodes[current].forward[level]
        }
    }

    /// Last node with a key strictly less than `key`, or `NONE`.
    fn before(&self, key: &K) -> usize {
        let mut current = usize::NONE;
        for i in (0..=self.level).rev() {
            let mut next = self.next_of(current, i);
            while next.is_some() && self.nodes[next].key < *key {
                current = next;
                next = self.nodes[next].forward[i];
            }
        }
        current
    }

    #[inline]
    fn find(&self, key: &K) -> Option<usize> {
        let next = self.next_of(self.before(key), 0);
        (next.is_some() && self.nodes[next].key == *key).then_some(next)
    }

    /// Fills `update` with the predecessors of `key` at each level.
    /// Returns the index if the key is present.
    fn search(&self, key: &K, update: &mut [usize; MAX_LEVEL]) -> Option<usize> {
        let mut current = usize::NONE;
        for i in (0..=self.level).rev() {
            let mut next = self.next_of(current, i);
            while next.is_some() && self.nodes[next].key < *key {
                current = next;
                next = self.nodes[next].forward[i];
            }
            update[i] = current;
        }

        let next = self.next_of(current, 0);
        (next.is_some() && self.nodes[next].key == *key).then_some(next)
    }

    /// Geometric level with p = 0.5, from the trailing ones of a random word.
    #[inline]
    fn random_level(&mut self) -> u8 {
        let level = self.rng.next_u32().trailing_ones() as usize;
        level.min(MAX_LEVEL - 1) as u8
    }

    fn link_node(&mut self, idx: usize, new_level: u8, update: &[usize; MAX_LEVEL]) {
        for i in 0..=new_level as usize {
            let next = self.next_of(update[i], i);
            self.nodes[idx].forward[i] = next;
            if update[i].is_none() {
                self.head[i] = idx;
            } else {
                self.nodes[update[i]].forward[i] = idx;
            }
        }

        if self.nodes[idx].forward[0].is_none() {
            self.tail = idx;
        }
        if new_level as usize > self.level {
            self.level = new_level as usize;
        }
    }

    /// Splices `idx` out of every level it participates in. `update` holds
    /// its predecessors.
    fn unlink_node(&mut self, idx: usize, update: &[usize; MAX_LEVEL]) {
        let (level, forward) = {
            let node = &self.nodes[idx];
            (node.level as usize, node.forward)
        };

        for i in 0..=level {
            if update[i].is_none() {
                self.head[i] = forward[i];
            } else {
                self.nodes[update[i]].forward[i] = forward[i];
            }
        }

        if forward[0].is_none() {
            self.tail = update[0];
        }
        while self.level > 0 && self.head[self.level].is_none() {
            self.level -= 1;
        }
    }
}

// ============================================================================
// Cursor
// ============================================================================

/// A cursor for walking forward and removing as it goes.
///
/// The cursor tracks the predecessor at every level, so
/// [`remove_current`](Cursor::remove_current) is O(1) without a new search.
/// For read-only traversal prefer [`SkipList::iter`].
pub struct Cursor<'a, K, V, R, const MAX_LEVEL: usize>
where
    K: Ord,
{
    list: &'a mut SkipList<K, V, R, MAX_LEVEL>,
    current: usize,
    prev_at_level: [usize; MAX_LEVEL],
}

impl<K, V, R, const MAX_LEVEL: usize> Cursor<'_, K, V, R, MAX_LEVEL>
where
    K: Ord,
    R: RngCore,
{
    /// Returns the current entry, or `None` if exhausted.
    pub fn current(&self) -> Option<(&K, &V)> {
        self.list.entry_at(self.current)
    }

    /// Returns the entry after the current one without advancing.
    pub fn peek_next(&self) -> Option<(&K, &V)> {
        if self.current.is_none() {
            return None;
        }
        self.list.entry_at(self.list.nodes[self.current].forward[0])
    }

    /// Advances to the next entry.
    pub fn move_next(&mut self) {
        if self.current.is_none() {
            return;
        }

        let node = &self.list.nodes[self.current];
        // Levels above the node's own keep their predecessor: we only move
        // forward at level 0.
        for i in 0..=node.level as usize {
            self.prev_at_level[i] = self.current;
        }
        self.current = node.forward[0];
    }

    /// Removes the current entry and advances to the next.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        if self.current.is_none() {
            return None;
        }

        let idx = self.current;
        self.current = self.list.nodes[idx].forward[0];
        self.list.unlink_node(idx, &self.prev_at_level);

        let node = self.list.nodes.remove(idx);
        Some((node.key, node.value))
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// An iterator over entries in sorted order.
pub struct Iter<'a, K, V, const MAX_LEVEL: usize> {
    nodes: &'a Slab<SkipNode<K, V, MAX_LEVEL>>,
    current: usize,
}

impl<'a, K, V, const MAX_LEVEL: usize> Iterator for Iter<'a, K, V, MAX_LEVEL> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let node = &self.nodes[self.current];
        self.current = node.forward[0];
        Some((&node.key, &node.value))
    }
}
