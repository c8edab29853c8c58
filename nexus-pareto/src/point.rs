//! Point predicates and the sweep ordering.
//!
//! All objectives are minimised. The archive keeps its points sorted by the
//! lexicographic key `(x[d-1], x[d-2], ..., x[0])`: the last coordinate is the
//! sweep axis, ties fall through to the preceding coordinates.
//!
//! A useful consequence of this order: if `a` weakly dominates `b` then
//! `a` sorts at or before `b`. Dominators are therefore always found by
//! looking backward along the sweep, never forward.

use core::cmp::Ordering;

use crate::error::{ArchiveError, Result};

/// Largest supported dimensionality. Node coordinate arrays have this length.
pub const MAX_DIM: usize = 4;

/// Supported archive dimensionalities.
pub const DIMENSIONS: [usize; 2] = [3, 4];

/// Returns `Ok(())` if `dim` is a supported dimensionality.
pub fn check_dim(dim: usize) -> Result<()> {
    if DIMENSIONS.contains(&dim) {
        Ok(())
    } else {
        Err(ArchiveError::UnsupportedDimension(dim))
    }
}

/// Returns `Ok(())` if `point` has exactly `dim` coordinates, none of them NaN.
pub fn check_point(point: &[f64], dim: usize) -> Result<()> {
    if point.len() != dim {
        return Err(ArchiveError::DimensionMismatch {
            expected: dim,
            found: point.len(),
        });
    }
    match point.iter().position(|x| x.is_nan()) {
        Some(axis) => Err(ArchiveError::NotANumber { axis }),
        None => Ok(()),
    }
}

/// Returns `true` if `a[i] <= b[i]` for every `i < dim`.
///
/// Equal points weakly dominate each other.
#[inline]
pub fn weakly_dominates(a: &[f64], b: &[f64], dim: usize) -> bool {
    a[..dim].iter().zip(&b[..dim]).all(|(x, y)| x <= y)
}

/// Returns `true` if `a` weakly dominates `b` and is strictly better in at
/// least one of the first `dim` coordinates.
#[inline]
pub fn strictly_dominates(a: &[f64], b: &[f64], dim: usize) -> bool {
    weakly_dominates(a, b, dim) && a[..dim].iter().zip(&b[..dim]).any(|(x, y)| x < y)
}

/// Euclidean distance from `point` to the box `{ y : y <= reference }`.
///
/// Zero for points inside or on the boundary of the box.
pub fn distance_to_box(point: &[f64], reference: &[f64]) -> f64 {
    point
        .iter()
        .zip(reference)
        .map(|(p, r)| {
            let excess = (p - r).max(0.0);
            excess * excess
        })
        .sum::<f64>()
        .sqrt()
}

/// Expands a point into a fixed-size coordinate array.
///
/// Trailing coordinates beyond `point.len()` are zero. Negative zero is
/// folded into zero so the total order agrees with `<=`.
#[inline]
pub fn to_coords(point: &[f64]) -> [f64; MAX_DIM] {
    let mut coords = [0.0; MAX_DIM];
    for (slot, x) in coords.iter_mut().zip(point) {
        *slot = x + 0.0;
    }
    coords
}

/// Comparator for the sweep order of a given dimensionality.
///
/// Explicit configuration instead of a closure over a captured axis index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepOrder {
    dim: usize,
}

impl SweepOrder {
    /// Creates the sweep order for `dim`-dimensional points.
    ///
    /// # Panics
    ///
    /// Panics if `dim` is 0 or exceeds [`MAX_DIM`].
    pub const fn new(dim: usize) -> Self {
        assert!(dim > 0 && dim <= MAX_DIM, "dimension out of range");
        Self { dim }
    }

    /// Returns the dimensionality.
    #[inline]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the sweep axis (the last coordinate).
    #[inline]
    pub const fn axis(&self) -> usize {
        self.dim - 1
    }

    /// Compares two points lexicographically, last coordinate first.
    ///
    /// Uses IEEE total ordering so `-inf`/`+inf` sentinels compare sanely.
    #[inline]
    pub fn compare(&self, a: &[f64], b: &[f64]) -> Ordering {
        for i in (0..self.dim).rev() {
            match a[i].total_cmp(&b[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

/// A coordinate value with a total order, usable as an ordered-map key.
#[derive(Debug, Clone, Copy)]
pub struct Ordinate(pub f64);

impl PartialEq for Ordinate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ordinate {}

impl PartialOrd for Ordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
