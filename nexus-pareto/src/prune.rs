//! Dominance pruning over a sorted [`DominanceList`].
//!
//! Both modes rely on the sweep order: a weak dominator always sorts at or
//! before the point it dominates, so dominators are searched among earlier
//! nodes and victims among later ones.

use tracing::{debug, trace};

use crate::key::NodeKey;
use crate::list::DominanceList;
use crate::point::weakly_dominates;

/// Outcome of [`DominancePruner::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// The point was linked. `pruned` lists the nodes it displaced; they are
    /// unlinked but still allocated.
    Accepted {
        /// Key of the inserted node.
        key: NodeKey,
        /// Nodes the new point weakly dominates.
        pruned: Vec<NodeKey>,
    },
    /// An archived point weakly dominates the new one. Nothing was linked.
    Rejected {
        /// First dominator found.
        by: NodeKey,
    },
}

impl Insertion {
    /// Returns `true` if the point was linked.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Insertion::Accepted { .. })
    }
}

/// Removes weakly dominated nodes from a list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DominancePruner;

impl DominancePruner {
    /// Unlinks every node weakly dominated by an earlier node.
    ///
    /// Each node is compared against the survivors seen so far on the first
    /// three coordinates. Every earlier node is no larger on the sweep axis,
    /// so in 4D this is still full weak dominance. Of two equal points the
    /// earlier one survives.
    ///
    /// Pruned nodes are unlinked, marked dominated and returned in sweep
    /// order. They stay allocated until the caller releases them.
    ///
    /// # Complexity
    ///
    /// O(n·h) where h is the number of survivors, O(n²) in the worst case
    /// (a batch that is already mutually non-dominated).
    pub fn batch<I>(list: &mut DominanceList<I>) -> Vec<NodeKey> {
        let axis = list.sweep_axis();
        let keys: Vec<NodeKey> = list.keys(axis, false).collect();
        let mut survivors: Vec<NodeKey> = Vec::with_capacity(keys.len());
        let mut pruned = Vec::new();

        for key in keys {
            let p = *list.node(key).coords();
            let dominator = survivors
                .iter()
                .copied()
                .find(|&s| weakly_dominates(list.node(s).coords(), &p, 3));

            match dominator {
                Some(by) => {
                    trace!(?key, ?by, "batch prune");
                    list.unlink(key);
                    list.node_mut(key).mark_dominated();
                    pruned.push(key);
                }
                None => survivors.push(key),
            }
        }

        debug!(
            survivors = survivors.len(),
            pruned = pruned.len(),
            "batch prune done"
        );
        pruned
    }

    /// Inserts an allocated, unlinked node unless it is weakly dominated.
    ///
    /// The dominator scan walks from the front and stops at the first node
    /// whose sweep coordinate exceeds the new point's. On acceptance the node
    /// is linked at its sorted position and every later node it weakly
    /// dominates is unlinked and marked.
    ///
    /// A rejected node is marked dominated and left unlinked.
    ///
    /// # Panics
    ///
    /// Panics if `key` is invalid, a sentinel, or already linked.
    pub fn insert<I>(list: &mut DominanceList<I>, key: NodeKey) -> Insertion {
        assert!(!key.is_sentinel(), "sentinels are linked at construction");
        let axis = list.sweep_axis();
        let dim = list.dim();
        let p = *list.node(key).coords();

        let mut at = list.next_key(axis, NodeKey::S2);
        while at != NodeKey::S3 {
            let q = list.node(at).coords();
            if q[axis] > p[axis] {
                break;
            }
            if weakly_dominates(q, &p, dim) {
                trace!(?key, by = ?at, "insert rejected");
                list.node_mut(key).mark_dominated();
                return Insertion::Rejected { by: at };
            }
            at = list.next_key(axis, at);
        }

        list.insert_sorted(key);

        let mut pruned = Vec::new();
        let mut at = list.next_key(axis, key);
        while at != NodeKey::S3 {
            if weakly_dominates(&p, list.node(at).coords(), dim) {
                pruned.push(at);
            }
            at = list.next_key(axis, at);
        }
        for &victim in &pruned {
            list.unlink(victim);
            list.node_mut(victim).mark_dominated();
        }

        trace!(?key, pruned = pruned.len(), "insert accepted");
        Insertion::Accepted { key, pruned }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::BatchLoader;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn payloads<I: Copy + Ord>(list: &DominanceList<I>) -> Vec<I> {
        let mut out: Vec<I> = list
            .keys(list.sweep_axis(), false)
            .map(|k| *list.payload(k).unwrap())
            .collect();
        out.sort();
        out
    }

    fn points(list: &DominanceList<usize>) -> Vec<Vec<f64>> {
        list.keys(list.sweep_axis(), false)
            .map(|k| list.point(k).to_vec())
            .collect()
    }

    #[test]
    fn batch_keeps_non_dominated() {
        let points = [
            [1.0, 2.0, 3.0],
            [3.0, 2.0, 1.0],
            [2.0, 3.0, 4.0],
            [2.0, 1.0, 0.0],
        ];
        let mut list = BatchLoader::build(3, &points, None, Some(vec!['A', 'B', 'C', 'D'])).unwrap();
        let pruned = DominancePruner::batch(&mut list);

        assert_eq!(pruned.len(), 2);
        assert_eq!(payloads(&list), vec!['A', 'D']);
        for key in pruned {
            let node = list.get(key).unwrap();
            assert!(node.is_dominated());
            assert!(!node.is_linked());
        }
    }

    #[test]
    fn batch_duplicates_keep_first() {
        let points = [[1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]];
        let mut list = BatchLoader::build(3, &points, None, Some(vec![0, 1, 2])).unwrap();
        DominancePruner::batch(&mut list);
        assert_eq!(payloads(&list), vec![0]);
    }

    #[test]
    fn batch_4d_uses_sweep_axis_for_full_dominance() {
        // better on x0..x2 but worse on x3: both survive
        let points = [[1.0, 1.0, 1.0, 5.0], [2.0, 2.0, 2.0, 1.0], [3.0, 3.0, 3.0, 6.0]];
        let mut list = BatchLoader::build(4, &points, None, Some(vec![0, 1, 2])).unwrap();
        let pruned = DominancePruner::batch(&mut list);

        assert_eq!(pruned.len(), 1);
        assert_eq!(payloads(&list), vec![0, 1]);
    }

    #[test]
    fn insert_rejects_dominated() {
        let points = [[1.0, 2.0, 5.0], [3.0, 5.0, 1.0], [5.0, 1.0, 4.0], [2.0, 3.0, 3.0]];
        let mut list = BatchLoader::build(3, &points, None, Some(vec![0, 1, 2, 3])).unwrap();
        DominancePruner::batch(&mut list);
        assert_eq!(list.len(), 4);

        let key = list.alloc(&[4.0, 5.0, 2.0], Some(9)).unwrap();
        let outcome = DominancePruner::insert(&mut list, key);

        let by = match outcome {
            Insertion::Rejected { by } => by,
            other => panic!("expected rejection, got {other:?}"),
        };
        assert_eq!(list.point(by), &[3.0, 5.0, 1.0]);
        assert_eq!(list.len(), 4);
        assert!(!list.is_linked(key));
    }

    #[test]
    fn insert_prunes_later_nodes() {
        let points = [[1.0, 2.0, 5.0], [3.0, 5.0, 1.0], [5.0, 1.0, 4.0], [2.0, 3.0, 3.0]];
        let mut list = BatchLoader::build(3, &points, None, Some(vec![0, 1, 2, 3])).unwrap();

        let key = list.alloc(&[3.0, 1.0, 2.0], Some(4)).unwrap();
        let outcome = DominancePruner::insert(&mut list, key);

        let (inserted, pruned) = match outcome {
            Insertion::Accepted { key, pruned } => (key, pruned),
            other => panic!("expected acceptance, got {other:?}"),
        };
        assert_eq!(inserted, key);
        assert_eq!(pruned.len(), 1);
        assert_eq!(list.point(pruned[0]), &[5.0, 1.0, 4.0]);
        assert_eq!(payloads(&list), vec![0, 1, 3, 4]);
    }

    #[test]
    fn insert_equal_point_is_rejected() {
        let mut list = BatchLoader::build(3, &[[1.0, 2.0, 3.0]], None, Some(vec![0])).unwrap();
        let key = list.alloc(&[1.0, 2.0, 3.0], Some(1)).unwrap();
        assert!(!DominancePruner::insert(&mut list, key).is_accepted());
        assert_eq!(payloads(&list), vec![0]);
    }

    #[test]
    fn insert_early_exit_does_not_miss_dominators() {
        // dominator shares the sweep coordinate
        let mut list = BatchLoader::build(3, &[[1.0, 1.0, 2.0], [0.0, 5.0, 1.0]], None, Some(vec![0, 1])).unwrap();
        let key = list.alloc(&[2.0, 2.0, 2.0], Some(2)).unwrap();
        assert!(!DominancePruner::insert(&mut list, key).is_accepted());
    }

    // ========================================================================
    // Stress tests against a brute-force reference model
    // ========================================================================

    fn dominated_in(set: &[Vec<f64>], p: &[f64]) -> bool {
        set.iter().any(|q| weakly_dominates(q, p, p.len()))
    }

    fn random_point(rng: &mut SmallRng, dim: usize) -> Vec<f64> {
        (0..dim).map(|_| rng.random_range(0..8) as f64).collect()
    }

    fn stress_batch(dim: usize, seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..50 {
            let n = rng.random_range(0..60);
            let input: Vec<Vec<f64>> = (0..n).map(|_| random_point(&mut rng, dim)).collect();

            let mut list = BatchLoader::build(dim, &input, None, Some((0..n).collect())).unwrap();
            DominancePruner::batch(&mut list);

            let expected: Vec<usize> = (0..n)
                .filter(|&i| {
                    !(0..n).any(|j| {
                        j != i
                            && weakly_dominates(&input[j], &input[i], dim)
                            && (input[j] != input[i] || j < i)
                    })
                })
                .collect();
            assert_eq!(payloads(&list), expected);
        }
    }

    fn stress_insert(dim: usize, seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut list: DominanceList<usize> = DominanceList::new(dim, None, 64).unwrap();
        let mut model: Vec<Vec<f64>> = Vec::new();

        for i in 0..500 {
            let p = random_point(&mut rng, dim);
            let key = list.alloc(&p, Some(i)).unwrap();
            let accepted = DominancePruner::insert(&mut list, key).is_accepted();

            let expected = !dominated_in(&model, &p);
            assert_eq!(accepted, expected, "point {p:?}");
            if expected {
                model.retain(|q| !weakly_dominates(&p, q, dim));
                model.push(p);
            } else {
                list.release(key);
            }

            let mut got = points(&list);
            let mut want = model.clone();
            got.sort_by(|a, b| a.partial_cmp(b).unwrap());
            want.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(got, want);
        }
    }

    #[test]
    fn stress_batch_3d() {
        stress_batch(3, 7);
    }

    #[test]
    fn stress_batch_4d() {
        stress_batch(4, 8);
    }

    #[test]
    fn stress_insert_3d() {
        stress_insert(3, 42);
    }

    #[test]
    fn stress_insert_4d() {
        stress_insert(4, 43);
    }
}
