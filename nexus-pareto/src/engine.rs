//! Hypervolume computation over a sorted [`DominanceList`].
//!
//! The archive keeps the list sorted and dominance-free and hands it to a
//! [`HypervolumeEngine`]. [`SweepEngine`] is the built-in implementation:
//!
//! - **3D**: sweep along `x[2]`, keeping the `(x[0], x[1])` staircase of the
//!   points seen so far in a [`SkipList`] together with its area. Each point
//!   adds its exclusive area, found by walking the staircase members it
//!   hides. O(n log n).
//! - **4D**: sweep along `x[3]`; each slab between consecutive `x[3]` values
//!   contributes the 3D volume of the points below it. O(n² log n).

use core::cmp::Ordering;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::key::NodeKey;
use crate::list::DominanceList;
use crate::point::{MAX_DIM, Ordinate, SweepOrder};
use crate::skiplist::SkipList;

/// Computes the hypervolume dominated by a list of points.
///
/// Implementations may assume the list is sorted in sweep order, contains
/// no dominated points and has a fresh neighbour pass. The archive only
/// calls an engine when a reference point is set.
///
/// The neighbour pass is refreshed for engines that walk `closest[]`;
/// [`SweepEngine`] does not need it.
pub trait HypervolumeEngine {
    /// Volume dominated by the linked points and bounded by the reference.
    fn hypervolume<I>(&self, list: &DominanceList<I>) -> f64;

    /// Volume dominated by `key` alone: the hypervolume minus the
    /// hypervolume without `key`.
    fn contribution<I>(&self, list: &DominanceList<I>, key: NodeKey) -> f64;
}

/// Sweep-line hypervolume for 3 and 4 dimensions.
///
/// Points outside the reference box (any coordinate `>=` the reference)
/// contribute nothing and are skipped. Without a reference point the region
/// is unbounded and a non-empty list has infinite volume.
///
/// Only the sweep order is read. `closest[]` is never consulted, so the
/// result does not depend on when the neighbour pass last ran.
#[derive(Debug, Clone, Copy)]
pub struct SweepEngine {
    seed: u64,
}

impl Default for SweepEngine {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl SweepEngine {
    /// Seed used when none is configured.
    pub const DEFAULT_SEED: u64 = 0x0ddba11;

    /// Creates an engine whose staircases draw levels from `seed`.
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn volume<I>(&self, list: &DominanceList<I>, skip: Option<NodeKey>) -> f64 {
        let Some(reference) = list.reference() else {
            let empty = list.keys(list.sweep_axis(), false).all(|k| Some(k) == skip);
            return if empty { 0.0 } else { f64::INFINITY };
        };

        let dim = list.dim();
        let points: Vec<[f64; MAX_DIM]> = list
            .iter(list.sweep_axis(), false)
            .filter(|&(key, node)| {
                Some(key) != skip && node.coords()[..dim].iter().zip(reference).all(|(x, r)| x < r)
            })
            .map(|(_, node)| *node.coords())
            .collect();

        match dim {
            3 => self.volume_3d(&points, reference),
            _ => self.volume_4d(&points, reference),
        }
    }

    /// `points` sorted ascending on `x[2]`, all inside the reference box.
    fn volume_3d(&self, points: &[[f64; MAX_DIM]], reference: &[f64]) -> f64 {
        let mut stairs: SkipList<Ordinate, f64> =
            SkipList::with_capacity(SmallRng::seed_from_u64(self.seed), points.len());
        let mut area = 0.0;
        let mut volume = 0.0;
        let mut last_z = None;

        for p in points {
            if let Some(z) = last_z {
                volume += area * (p[2] - z);
            }
            area += add_to_staircase(&mut stairs, p[0], p[1], reference[0], reference[1]);
            last_z = Some(p[2]);
        }

        if let Some(z) = last_z {
            volume += area * (reference[2] - z);
        }
        volume
    }

    /// `points` sorted ascending on `x[3]`, all inside the reference box.
    fn volume_4d(&self, points: &[[f64; MAX_DIM]], reference: &[f64]) -> f64 {
        let by_z = SweepOrder::new(3);
        let mut slice: Vec<[f64; MAX_DIM]> = Vec::with_capacity(points.len());
        let mut volume = 0.0;

        for (i, p) in points.iter().enumerate() {
            let at = slice.partition_point(|q| by_z.compare(q, p) != Ordering::Greater);
            slice.insert(at, *p);

            let next_w = points.get(i + 1).map_or(reference[3], |q| q[3]);
            let depth = next_w - p[3];
            if depth > 0.0 {
                volume += self.volume_3d(&slice, reference) * depth;
            }
        }
        volume
    }
}

/// Adds `(x, y)` to a 2D minimisation staircase bounded by `(rx, ry)` and
/// returns the area it adds.
///
/// The staircase maps `x` to `y` with `y` strictly decreasing in `x`.
/// Members the new point hides are removed.
fn add_to_staircase(stairs: &mut SkipList<Ordinate, f64>, x: f64, y: f64, rx: f64, ry: f64) -> f64 {
    if let Some((_, &below)) = stairs.at_or_before(&Ordinate(x)) {
        if below <= y {
            return 0.0;
        }
    }

    let mut height = stairs.predecessor(&Ordinate(x)).map_or(ry, |(_, &h)| h);
    let mut from = x;
    let mut area = 0.0;
    let mut bounded = false;

    let mut cursor = stairs.cursor_at(&Ordinate(x));
    while let Some((&Ordinate(mx), &my)) = cursor.current() {
        area += (mx - from) * (height - y);
        if my < y {
            bounded = true;
            break;
        }
        cursor.remove_current();
        height = my;
        from = mx;
    }
    if !bounded {
        area += (rx - from) * (height - y);
    }

    stairs.insert(Ordinate(x), y);
    area
}

impl HypervolumeEngine for SweepEngine {
    fn hypervolume<I>(&self, list: &DominanceList<I>) -> f64 {
        self.volume(list, None)
    }

    fn contribution<I>(&self, list: &DominanceList<I>, key: NodeKey) -> f64 {
        if !list.is_linked(key) {
            return 0.0;
        }
        let with = self.volume(list, None);
        let without = self.volume(list, Some(key));
        if with.is_infinite() {
            return with;
        }
        (with - without).max(0.0)
    }
}
