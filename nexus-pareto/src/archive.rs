//! Non-dominated archive with cached hypervolume.
//!
//! [`Archive`] ties the pieces together: a [`DominanceList`] kept sorted and
//! dominance-free by [`DominancePruner`], a [`NeighborIndex`] pass refreshed
//! lazily after mutations, and a [`HypervolumeEngine`] whose result is cached
//! until the next change.
//!
//! # Example
//!
//! ```
//! use nexus_pareto::ArchiveBuilder;
//!
//! let points = [[1.0, 2.0, 3.0], [3.0, 2.0, 1.0], [2.0, 3.0, 4.0], [2.0, 1.0, 0.0]];
//! let mut archive = ArchiveBuilder::new(3)
//!     .reference_point(&[5.0, 5.0, 5.0])
//!     .build(&points, Some(vec!["A", "B", "C", "D"]))
//!     .unwrap();
//!
//! assert_eq!(archive.len(), 2);
//! assert!(archive.dominates(&[4.0, 5.0, 2.0]).unwrap());
//! assert!(!archive.insert(&[2.0, 2.0, 4.0], Some("E")).unwrap());
//! assert!(archive.insert(&[0.0, 4.0, 4.0], Some("F")).unwrap());
//! assert!(archive.hypervolume().unwrap() > 0.0);
//! ```

use tracing::{debug, trace};

use crate::engine::{HypervolumeEngine, SweepEngine};
use crate::error::{ArchiveError, Result};
use crate::key::NodeKey;
use crate::list::DominanceList;
use crate::loader::BatchLoader;
use crate::neighbor::NeighborIndex;
use crate::point::{self, weakly_dominates};
use crate::prune::{DominancePruner, Insertion};

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`Archive`].
///
/// ```
/// use nexus_pareto::{Archive, ArchiveBuilder, SweepEngine};
///
/// let archive: Archive<u32> = ArchiveBuilder::new(4)
///     .reference_point(&[1.0, 1.0, 1.0, 1.0])
///     .capacity(1024)
///     .engine(SweepEngine::new(7))
///     .seed(42)
///     .build::<[f64; 4], u32>(&[], None)
///     .unwrap();
/// assert!(archive.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveBuilder<E = SweepEngine> {
    dim: usize,
    reference: Option<Vec<f64>>,
    capacity: usize,
    engine: E,
    seed: u64,
}

impl ArchiveBuilder {
    /// Starts a builder for `dim`-dimensional points. Default: no reference
    /// point, no preallocation, [`SweepEngine`].
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            reference: None,
            capacity: 0,
            engine: SweepEngine::default(),
            seed: NeighborIndex::DEFAULT_SEED,
        }
    }
}

impl<E> ArchiveBuilder<E> {
    /// Sets the reference point bounding the hypervolume.
    pub fn reference_point(mut self, reference: &[f64]) -> Self {
        self.reference = Some(reference.to_vec());
        self
    }

    /// Preallocates room for at least this many points.
    pub fn capacity(mut self, points: usize) -> Self {
        self.capacity = points;
        self
    }

    /// Seed for the neighbour pass staircase.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the hypervolume engine.
    pub fn engine<F: HypervolumeEngine>(self, engine: F) -> ArchiveBuilder<F> {
        ArchiveBuilder {
            dim: self.dim,
            reference: self.reference,
            capacity: self.capacity,
            engine,
            seed: self.seed,
        }
    }

    /// Builds the archive from an initial batch.
    ///
    /// Dominated points are dropped; of equal points the first one is kept.
    /// `payloads`, when given, must be parallel to `points`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported dimension, a point or reference
    /// of the wrong length, a NaN coordinate, or mismatched payloads.
    pub fn build<P, I>(self, points: &[P], payloads: Option<Vec<I>>) -> Result<Archive<I, E>>
    where
        P: AsRef<[f64]>,
        E: HypervolumeEngine,
    {
        let mut list = BatchLoader::build(self.dim, points, self.reference.as_deref(), payloads)?;
        list.reserve(self.capacity.saturating_sub(points.len()));

        for key in DominancePruner::batch(&mut list) {
            list.release(key);
        }

        let mut archive = Archive {
            list,
            engine: self.engine,
            neighbors: NeighborIndex::new(self.seed),
            neighbors_dirty: true,
            hypervolume: None,
        };
        archive.refresh_neighbors();

        debug!(
            dim = self.dim,
            offered = points.len(),
            kept = archive.len(),
            "archive built"
        );
        Ok(archive)
    }
}

// =============================================================================
// Archive
// =============================================================================

/// Set of mutually non-dominated points in 3 or 4 dimensions (minimisation).
///
/// Each point may carry a payload of type `I`. Queries that need the
/// neighbour pass or the hypervolume take `&mut self`: results are cached
/// and recomputed lazily after a mutation.
#[derive(Debug, Clone)]
pub struct Archive<I = (), E = SweepEngine> {
    list: DominanceList<I>,
    engine: E,
    neighbors: NeighborIndex,
    neighbors_dirty: bool,
    hypervolume: Option<f64>,
}

impl<I> Archive<I> {
    /// Creates an empty archive without a reference point.
    ///
    /// # Errors
    ///
    /// Returns an error if `dim` is not 3 or 4.
    pub fn new(dim: usize) -> Result<Self> {
        ArchiveBuilder::new(dim).build::<Vec<f64>, I>(&[], None)
    }

    /// Creates an archive from points without payloads.
    ///
    /// The dimension is taken from the reference point, or from the first
    /// point when there is no reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimension cannot be determined or is not 3
    /// or 4, or if any point is malformed.
    pub fn from_points<P: AsRef<[f64]>>(points: &[P], reference: Option<&[f64]>) -> Result<Self> {
        let dim = reference
            .map(<[f64]>::len)
            .or_else(|| points.first().map(|p| p.as_ref().len()))
            .ok_or(ArchiveError::UnsupportedDimension(0))?;

        let mut builder = ArchiveBuilder::new(dim);
        if let Some(reference) = reference {
            builder = builder.reference_point(reference);
        }
        builder.build(points, None)
    }
}

impl<I, E: HypervolumeEngine> Archive<I, E> {
    /// Returns the dimensionality.
    #[inline]
    pub fn dim(&self) -> usize {
        self.list.dim()
    }

    /// Returns the number of archived points.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the archive holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the reference point, if set.
    #[inline]
    pub fn reference_point(&self) -> Option<&[f64]> {
        self.list.reference()
    }

    /// Replaces the reference point. `None` removes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference has the wrong length or a NaN.
    pub fn set_reference_point(&mut self, reference: Option<&[f64]>) -> Result<()> {
        self.list.set_reference(reference)?;
        self.invalidate();
        Ok(())
    }

    /// Returns the underlying list.
    ///
    /// Its `closest[]` entries are only current after a call that refreshes
    /// the neighbour pass, such as [`hypervolume`](Self::hypervolume) or
    /// [`neighbors`](Self::neighbors). Mutations leave them stale.
    #[inline]
    pub fn list(&self) -> &DominanceList<I> {
        &self.list
    }

    /// Returns the hypervolume engine.
    #[inline]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Adds a point unless an archived point weakly dominates it.
    ///
    /// Archived points the new one weakly dominates are removed. Returns
    /// whether the point was added.
    ///
    /// The neighbour pass is not repaired here: an accepted point marks it
    /// stale and the next query that needs `closest[]` reruns it over the
    /// whole list. Until then [`list`](Self::list) may hold stale neighbours.
    ///
    /// # Errors
    ///
    /// Returns an error if the point has the wrong length or a NaN.
    pub fn insert(&mut self, point: &[f64], payload: Option<I>) -> Result<bool> {
        let key = self.list.alloc(point, payload)?;
        match DominancePruner::insert(&mut self.list, key) {
            Insertion::Accepted { pruned, .. } => {
                trace!(?point, displaced = pruned.len(), "point archived");
                for victim in pruned {
                    self.list.release(victim);
                }
                self.invalidate();
                Ok(true)
            }
            Insertion::Rejected { .. } => {
                trace!(?point, "point dominated");
                self.list.release(key);
                Ok(false)
            }
        }
    }

    /// Inserts a batch of points one at a time. Returns how many were added.
    ///
    /// All points are validated before any is inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if any point is malformed or the payload count
    /// differs from the point count. The archive is unchanged on error.
    pub fn extend<P: AsRef<[f64]>>(&mut self, points: &[P], payloads: Option<Vec<I>>) -> Result<usize> {
        for p in points {
            point::check_point(p.as_ref(), self.dim())?;
        }
        if let Some(payloads) = &payloads {
            if payloads.len() != points.len() {
                return Err(ArchiveError::PayloadCountMismatch {
                    points: points.len(),
                    payloads: payloads.len(),
                });
            }
        }

        let mut payloads = payloads.map(Vec::into_iter);
        let mut added = 0;
        for p in points {
            let payload = payloads.as_mut().and_then(Iterator::next);
            if self.insert(p.as_ref(), payload)? {
                added += 1;
            }
        }

        debug!(offered = points.len(), added, "archive extended");
        Ok(added)
    }

    /// Removes the archived point equal to `point`. Returns whether one
    /// was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the point has the wrong length or a NaN.
    pub fn remove(&mut self, point: &[f64]) -> Result<bool> {
        point::check_point(point, self.dim())?;
        let Some(key) = self.find(point) else {
            return Ok(false);
        };
        self.list.release(key);
        self.invalidate();
        Ok(true)
    }

    // ========================================================================
    // Dominance queries
    // ========================================================================

    /// Returns `true` if an archived point weakly dominates `point`
    /// (an equal point counts).
    ///
    /// # Errors
    ///
    /// Returns an error if the point has the wrong length or a NaN.
    pub fn dominates(&self, point: &[f64]) -> Result<bool> {
        point::check_point(point, self.dim())?;
        Ok(self.dominator_keys(point).next().is_some())
    }

    /// Returns every archived point weakly dominating `point`, in sweep
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if the point has the wrong length or a NaN.
    pub fn dominators(&self, point: &[f64]) -> Result<Vec<Vec<f64>>> {
        point::check_point(point, self.dim())?;
        Ok(self
            .dominator_keys(point)
            .map(|key| self.list.point(key).to_vec())
            .collect())
    }

    /// Returns the number of archived points weakly dominating `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if the point has the wrong length or a NaN.
    pub fn dominator_count(&self, point: &[f64]) -> Result<usize> {
        point::check_point(point, self.dim())?;
        Ok(self.dominator_keys(point).count())
    }

    /// Returns `true` if `point` lies strictly inside the reference box, so
    /// it can contribute hypervolume. Always `true` without a reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the point has the wrong length or a NaN.
    pub fn in_domain(&self, point: &[f64]) -> Result<bool> {
        point::check_point(point, self.dim())?;
        Ok(self
            .reference_point()
            .is_none_or(|r| point.iter().zip(r).all(|(x, r)| x < r)))
    }

    /// Euclidean distance from `point` to the box below the reference
    /// point. Zero inside the box or without a reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the point has the wrong length or a NaN.
    pub fn distance_to_feasible_region(&self, point: &[f64]) -> Result<f64> {
        point::check_point(point, self.dim())?;
        Ok(self
            .reference_point()
            .map_or(0.0, |r| point::distance_to_box(point, r)))
    }

    // ========================================================================
    // Hypervolume
    // ========================================================================

    /// Returns the hypervolume of the archive, computing it if stale.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::MissingReferencePoint`] for a non-empty
    /// archive without a reference point. An empty archive has volume zero.
    pub fn hypervolume(&mut self) -> Result<f64> {
        if let Some(hv) = self.hypervolume {
            return Ok(hv);
        }
        if self.is_empty() {
            return Ok(0.0);
        }
        self.require_reference()?;
        self.refresh_neighbors();

        let hv = self.engine.hypervolume(&self.list);
        self.hypervolume = Some(hv);
        Ok(hv)
    }

    /// Returns the volume `point` contributes.
    ///
    /// For an archived point this is the volume lost by removing it; for
    /// any other point it is [`hypervolume_improvement`](Self::hypervolume_improvement).
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed point or a missing reference point.
    pub fn contributing_hypervolume(&mut self, point: &[f64]) -> Result<f64> {
        point::check_point(point, self.dim())?;
        self.require_reference()?;
        self.refresh_neighbors();

        match self.find(point) {
            Some(key) => Ok(self.engine.contribution(&self.list, key)),
            None => self.hypervolume_improvement(point),
        }
    }

    /// Returns the contribution of every archived point, in sweep order.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::MissingReferencePoint`] for a non-empty
    /// archive without a reference point.
    pub fn contributing_hypervolumes(&mut self) -> Result<Vec<f64>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        self.require_reference()?;
        self.refresh_neighbors();

        let axis = self.list.sweep_axis();
        Ok(self
            .list
            .keys(axis, false)
            .map(|key| self.engine.contribution(&self.list, key))
            .collect())
    }

    /// Returns how much the hypervolume would grow if `point` were added.
    /// Zero for a point already weakly dominated by the archive.
    ///
    /// The archive is not modified.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed point or a missing reference point.
    pub fn hypervolume_improvement(&mut self, point: &[f64]) -> Result<f64> {
        point::check_point(point, self.dim())?;
        self.require_reference()?;
        if self.dominates(point)? {
            return Ok(0.0);
        }

        let current = self.hypervolume()?;
        let mut points = self.points();
        points.push(point.to_vec());

        let mut scratch =
            BatchLoader::build::<_, ()>(self.dim(), &points, self.reference_point(), None)?;
        for key in DominancePruner::batch(&mut scratch) {
            scratch.release(key);
        }
        self.neighbors.sweep(&mut scratch);

        Ok((self.engine.hypervolume(&scratch) - current).max(0.0))
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Returns `(coordinates, payload)` pairs in sweep order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], Option<&I>)> + '_ {
        let dim = self.dim();
        self.list
            .iter(self.list.sweep_axis(), false)
            .map(move |(_, node)| (&node.coords()[..dim], node.payload()))
    }

    /// Returns the archived points in sweep order.
    pub fn points(&self) -> Vec<Vec<f64>> {
        self.iter().map(|(p, _)| p.to_vec()).collect()
    }

    /// Returns the payloads, parallel to [`points`](Self::points).
    pub fn payloads(&self) -> Vec<Option<&I>> {
        self.iter().map(|(_, payload)| payload).collect()
    }

    /// Returns, for each archived point in sweep order, the coordinates of
    /// its lower and upper neighbours in the `(x[1], x[0])` staircase.
    /// `None` marks a sentinel bound.
    pub fn neighbors(&mut self) -> Vec<[Option<Vec<f64>>; 2]> {
        self.refresh_neighbors();
        self.list
            .iter(self.list.sweep_axis(), false)
            .map(|(_, node)| {
                node.closest()
                    .map(|key| (!key.is_sentinel()).then(|| self.list.point(key).to_vec()))
            })
            .collect()
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn invalidate(&mut self) {
        self.neighbors_dirty = true;
        self.hypervolume = None;
    }

    fn require_reference(&self) -> Result<()> {
        match self.reference_point() {
            Some(_) => Ok(()),
            None => Err(ArchiveError::MissingReferencePoint),
        }
    }

    /// Reruns the neighbour pass if the list changed since the last one.
    fn refresh_neighbors(&mut self) {
        if !self.neighbors_dirty {
            return;
        }
        let pass = self.neighbors.sweep(&mut self.list);
        for key in pass.pruned {
            self.list.release(key);
        }
        self.list.assert_neighbors();
        self.neighbors_dirty = false;
    }

    /// Archived points weakly dominating `point`. Dominators sort no later
    /// than `point`, so the walk stops past its sweep coordinate.
    fn dominator_keys<'a>(&'a self, point: &'a [f64]) -> impl Iterator<Item = NodeKey> + 'a {
        let axis = self.list.sweep_axis();
        let dim = self.dim();
        self.list
            .iter(axis, false)
            .take_while(move |(_, node)| node.coords()[axis] <= point[axis])
            .filter(move |(_, node)| weakly_dominates(node.coords(), point, dim))
            .map(|(key, _)| key)
    }

    fn find(&self, point: &[f64]) -> Option<NodeKey> {
        let axis = self.list.sweep_axis();
        self.list
            .iter(axis, false)
            .take_while(|(_, node)| node.coords()[axis] <= point[axis])
            .find(|&(key, _)| self.list.point(key) == point)
            .map(|(key, _)| key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;

    fn archive3(points: &[[f64; 3]]) -> Archive<usize> {
        ArchiveBuilder::new(3)
            .reference_point(&[10.0, 10.0, 10.0])
            .build(points, Some((0..points.len()).collect()))
            .unwrap()
    }

    #[test]
    fn hypervolume_is_cached_until_mutation() {
        let mut archive = archive3(&[[1.0, 1.0, 1.0]]);
        assert_eq!(archive.hypervolume, None);
        assert_eq!(archive.hypervolume().unwrap(), 729.0);
        assert_eq!(archive.hypervolume, Some(729.0));
        assert!(!archive.neighbors_dirty);

        archive.insert(&[0.0, 5.0, 5.0], Some(1)).unwrap();
        assert_eq!(archive.hypervolume, None);
        assert!(archive.neighbors_dirty);
        assert_eq!(archive.hypervolume().unwrap(), 729.0 + 25.0);
    }

    #[test]
    fn neighbors_refresh_lazily_after_insert() {
        let mut archive = archive3(&[[2.0, 2.0, 1.0]]);
        assert!(!archive.neighbors_dirty);

        assert!(archive.insert(&[1.0, 3.0, 2.0], Some(1)).unwrap());
        assert!(archive.neighbors_dirty);
        let added = archive.find(&[1.0, 3.0, 2.0]).unwrap();
        assert_eq!(archive.list().closest(added), Some([NodeKey::NONE; 2]));

        assert_eq!(
            archive.neighbors(),
            vec![[None, None], [Some(vec![2.0, 2.0, 1.0]), None]]
        );
        assert!(!archive.neighbors_dirty);
        archive.list().assert_neighbors();
    }

    #[test]
    fn rejected_insert_keeps_cache() {
        let mut archive = archive3(&[[1.0, 1.0, 1.0]]);
        archive.hypervolume().unwrap();
        assert!(!archive.insert(&[2.0, 2.0, 2.0], None).unwrap());
        assert_eq!(archive.hypervolume, Some(729.0));
    }

    #[test]
    fn arena_slots_are_recycled() {
        let mut archive = archive3(&[]);
        for i in 0..100 {
            let x = 100.0 - i as f64;
            archive.insert(&[x, x, x], Some(i)).unwrap();
        }
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.payloads(), vec![Some(&99)]);
        // sentinels plus the survivor
        assert_eq!(archive.list().keys(2, true).count(), 4);
    }

    #[test]
    fn set_reference_invalidates() {
        let mut archive = archive3(&[[1.0, 1.0, 1.0]]);
        assert_eq!(archive.hypervolume().unwrap(), 729.0);
        archive.set_reference_point(Some(&[2.0, 2.0, 2.0])).unwrap();
        assert_eq!(archive.hypervolume().unwrap(), 1.0);

        archive.set_reference_point(None).unwrap();
        assert_eq!(archive.hypervolume(), Err(ArchiveError::MissingReferencePoint));
    }

    #[test]
    fn extend_validates_first() {
        let mut archive = archive3(&[]);
        let points = vec![vec![1.0, 2.0, 3.0], vec![1.0]];
        assert!(archive.extend(&points, None).is_err());
        assert!(archive.is_empty());

        let err = archive.extend(&[[1.0, 2.0, 3.0]], Some(vec![1, 2])).unwrap_err();
        assert_eq!(
            err,
            ArchiveError::PayloadCountMismatch {
                points: 1,
                payloads: 2
            }
        );
    }

    #[test]
    fn from_points_infers_dimension() {
        let archive: Archive = Archive::from_points(&[[1.0, 2.0, 3.0, 4.0]], None).unwrap();
        assert_eq!(archive.dim(), 4);

        let empty: Archive = Archive::from_points::<[f64; 3]>(&[], Some(&[1.0, 1.0, 1.0])).unwrap();
        assert_eq!(empty.dim(), 3);

        let err = Archive::<()>::from_points::<[f64; 3]>(&[], None).unwrap_err();
        assert_eq!(err, ArchiveError::UnsupportedDimension(0));
    }
}

#[cfg(test)]
mod bench_archive {
    use super::*;
    use hdrhistogram::Histogram;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[inline]
    fn rdtscp() -> u64 {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::x86_64::__rdtscp(&mut 0)
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            std::time::Instant::now().elapsed().as_nanos() as u64
        }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:8} cycles | p99: {:8} cycles | p999: {:9} cycles | min: {:6} | max: {:9}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    /// Points on the simplex `sum(x) = 1`, all mutually non-dominated.
    fn front_point(rng: &mut SmallRng, dim: usize) -> Vec<f64> {
        let raw: Vec<f64> = (0..dim).map(|_| rng.random_range(0.01..1.0)).collect();
        let sum: f64 = raw.iter().sum();
        raw.into_iter().map(|x| x / sum).collect()
    }

    const ITERATIONS: usize = 2_000;

    fn bench_insert(dim: usize) {
        let mut rng = SmallRng::seed_from_u64(12345);
        let mut archive: Archive = ArchiveBuilder::new(dim)
            .reference_point(&vec![1.0; dim])
            .capacity(ITERATIONS)
            .build::<Vec<f64>, ()>(&[], None)
            .unwrap();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for _ in 0..ITERATIONS {
            let p = front_point(&mut rng, dim);
            let start = rdtscp();
            let _ = archive.insert(&p, None);
            hist.record(rdtscp() - start).unwrap();
        }

        print_histogram(&format!("insert_{dim}d"), &hist);
    }

    fn bench_hypervolume(dim: usize, n: usize) {
        let mut rng = SmallRng::seed_from_u64(54321);
        let points: Vec<Vec<f64>> = (0..n).map(|_| front_point(&mut rng, dim)).collect();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for _ in 0..20 {
            let mut archive: Archive = Archive::from_points(&points, Some(vec![1.0; dim].as_slice())).unwrap();
            let start = rdtscp();
            std::hint::black_box(archive.hypervolume().unwrap());
            hist.record(rdtscp() - start).unwrap();
        }

        print_histogram(&format!("hypervolume_{dim}d_n{n}"), &hist);
    }

    #[test]
    #[ignore]
    fn bench_archive_all() {
        println!("\n=== Archive Benchmarks ===");
        println!(
            "Run with: cargo test --release bench_archive::bench_archive_all -- --ignored --nocapture\n"
        );

        println!("--- Insert ---");
        bench_insert(3);
        bench_insert(4);

        println!("\n--- Hypervolume ---");
        bench_hypervolume(3, 1_000);
        bench_hypervolume(4, 200);
    }
}
