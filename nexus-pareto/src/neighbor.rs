//! Neighbour pass over the sweep order.
//!
//! Walks the list in sweep order while maintaining the staircase of
//! processed points that are non-dominated in the `(x[0], x[1])`
//! projection. The staircase is a [`SkipList`] keyed by `(x[1], x[0], key)`,
//! so along it `x[1]` increases while `x[0]` decreases.
//!
//! For each point the pass records `closest[0]`, the staircase member just
//! below it (larger `x[0]`, smaller `x[1]`), and `closest[1]`, the member
//! just above it once the points it hides have been dropped. `S2` and `S1`
//! bound the staircase and stand in when no closer member exists.
//!
//! A point whose projection is dominated by an earlier point, and which that
//! point also dominates in full, is marked and unlinked. In 3D the earlier
//! point always dominates in full, so the pass doubles as a complete
//! dominance filter.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, trace};

use crate::key::{Key, NodeKey};
use crate::list::DominanceList;
use crate::point::{Ordinate, weakly_dominates};
use crate::skiplist::SkipList;

/// Staircase entry: `(x[1], x[0], key)`.
type Step = (Ordinate, Ordinate, NodeKey);

type Staircase = SkipList<Step, (), SmallRng, 20>;

#[inline]
fn step(coords: &[f64], key: NodeKey) -> Step {
    (Ordinate(coords[1]), Ordinate(coords[0]), key)
}

/// Statistics of one [`NeighborIndex::sweep`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborPass {
    /// Nodes found dominated and unlinked, in discovery order.
    pub pruned: Vec<NodeKey>,
    /// Node visits across all rounds.
    pub visited: usize,
}

/// Computes `closest[]` for every linked node.
#[derive(Debug, Clone, Copy)]
pub struct NeighborIndex {
    seed: u64,
}

impl Default for NeighborIndex {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl NeighborIndex {
    /// Seed used when none is configured.
    pub const DEFAULT_SEED: u64 = 0x5eed_ca5e;

    /// Creates a pass whose staircase levels are drawn from `seed`.
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Recomputes `closest[]` for every linked node and unlinks the
    /// dominated ones it witnesses.
    ///
    /// If a pruned node was already recorded as someone's neighbour, the
    /// pass runs again over the survivors, so on return every `closest[]`
    /// entry is a sentinel or a linked node.
    ///
    /// # Complexity
    ///
    /// O(n log n) expected per round: every node enters and leaves the
    /// staircase at most once.
    pub fn sweep<I>(&self, list: &mut DominanceList<I>) -> NeighborPass {
        list.reset_closest();
        let mut pass = NeighborPass::default();
        let mut rounds = 0;

        loop {
            let round = self.round(list);
            rounds += 1;
            pass.visited += round.visited;
            let settled = round.pruned.is_empty();
            pass.pruned.extend(round.pruned);
            if settled {
                break;
            }
        }

        debug!(
            points = list.len(),
            pruned = pass.pruned.len(),
            rounds,
            "neighbour pass done"
        );
        pass
    }

    fn round<I>(&self, list: &mut DominanceList<I>) -> NeighborPass {
        let axis = list.sweep_axis();
        let dim = list.dim();
        let keys: Vec<NodeKey> = list.keys(axis, false).collect();

        let mut stairs: Staircase =
            SkipList::with_capacity(SmallRng::seed_from_u64(self.seed), keys.len() + 2);
        stairs.insert(step(list.point(NodeKey::S2), NodeKey::S2), ());
        stairs.insert(step(list.point(NodeKey::S1), NodeKey::S1), ());

        let mut pruned = Vec::new();

        for &key in &keys {
            let p = *list.node(key).coords();
            let lookup = (Ordinate(p[1]), Ordinate(p[0]), NodeKey::NONE);

            // Last member with x[1] <= p.x[1] has the smallest x[0] among them
            let below = stairs.at_or_before(&lookup).map(|(s, _)| *s);
            if let Some(hider) = below.filter(|s| !s.2.is_sentinel() && s.1.0 <= p[0]) {
                let upper = stairs.successor(&hider).map_or(NodeKey::S1, |(s, _)| s.2);
                list.set_closest(key, [hider.2, upper]);

                if weakly_dominates(list.node(hider.2).coords(), &p, dim) {
                    trace!(?key, by = ?hider.2, "neighbour pass prune");
                    list.node_mut(key).mark_dominated();
                    pruned.push(key);
                }
                continue;
            }

            let own = step(&p, key);
            stairs.insert(own, ());
            let lower = stairs.predecessor(&own).map_or(NodeKey::S2, |(s, _)| s.2);

            let mut cursor = stairs.cursor_at(&own);
            cursor.move_next();
            while let Some((&(_, x0, hidden), _)) = cursor.current() {
                if hidden.is_sentinel() || x0.0 < p[0] {
                    break;
                }
                cursor.remove_current();
                if weakly_dominates(&p, list.node(hidden).coords(), dim) {
                    trace!(key = ?hidden, by = ?key, "neighbour pass prune");
                    list.node_mut(hidden).mark_dominated();
                    pruned.push(hidden);
                }
            }
            let upper = cursor.current().map_or(NodeKey::S1, |(s, _)| s.2);

            list.set_closest(key, [lower, upper]);
        }

        for &key in &pruned {
            list.unlink(key);
        }

        NeighborPass {
            pruned,
            visited: keys.len(),
        }
    }
}
