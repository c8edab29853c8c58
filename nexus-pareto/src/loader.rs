//! Batch construction of a sorted [`DominanceList`].

use tracing::debug;

use crate::error::{ArchiveError, Result};
use crate::key::NodeKey;
use crate::list::DominanceList;
use crate::point;

/// Builds a list from an unsorted batch of points.
///
/// The points are validated, stably sorted by the sweep order and linked
/// one after another between `S2` and `S3`. No dominance filtering happens
/// here; run [`DominancePruner::batch`](crate::DominancePruner::batch)
/// afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchLoader;

impl BatchLoader {
    /// Validates, sorts and links `points`.
    ///
    /// Exact duplicates keep their input order. `payloads`, when given,
    /// must be parallel to `points`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported dimension, a point or reference
    /// of the wrong length, a NaN coordinate, or a payload count that
    /// differs from the point count. Nothing is allocated on error.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_pareto::BatchLoader;
    ///
    /// let points = [[3.0, 1.0, 2.0], [1.0, 2.0, 1.0]];
    /// let list = BatchLoader::build(3, &points, None, Some(vec!["b", "a"])).unwrap();
    ///
    /// let names: Vec<_> = list.keys(2, false).map(|k| *list.payload(k).unwrap()).collect();
    /// assert_eq!(names, ["a", "b"]);
    /// ```
    pub fn build<P, I>(
        dim: usize,
        points: &[P],
        reference: Option<&[f64]>,
        payloads: Option<Vec<I>>,
    ) -> Result<DominanceList<I>>
    where
        P: AsRef<[f64]>,
    {
        point::check_dim(dim)?;
        for p in points {
            point::check_point(p.as_ref(), dim)?;
        }
        if let Some(payloads) = &payloads {
            if payloads.len() != points.len() {
                return Err(ArchiveError::PayloadCountMismatch {
                    points: points.len(),
                    payloads: payloads.len(),
                });
            }
        }

        let mut list = DominanceList::new(dim, reference, points.len())?;

        let mut keys: Vec<NodeKey> = match payloads {
            Some(payloads) => points
                .iter()
                .zip(payloads)
                .map(|(p, payload)| list.alloc(p.as_ref(), Some(payload)))
                .collect::<Result<_>>()?,
            None => points
                .iter()
                .map(|p| list.alloc(p.as_ref(), None))
                .collect::<Result<_>>()?,
        };

        // Stable: allocation order is input order
        let order = list.order();
        keys.sort_by(|&a, &b| order.compare(list.point(a), list.point(b)));

        let axis = list.sweep_axis();
        let mut after = NodeKey::S2;
        for key in keys {
            list.link_after(axis, after, key);
            after = key;
        }

        debug!(dim, points = list.len(), "batch loaded");
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payloads(list: &DominanceList<u32>) -> Vec<u32> {
        list.keys(list.sweep_axis(), false)
            .map(|k| *list.payload(k).unwrap())
            .collect()
    }

    #[test]
    fn empty_input_yields_sentinels_only() {
        let list = BatchLoader::build::<[f64; 3], ()>(3, &[], None, None).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.keys(2, true).count(), 3);
    }

    #[test]
    fn sorts_by_sweep_key() {
        let points = [
            [1.0, 2.0, 3.0],
            [3.0, 2.0, 1.0],
            [2.0, 3.0, 4.0],
            [2.0, 1.0, 0.0],
        ];
        let list = BatchLoader::build(3, &points, None, Some(vec![0, 1, 2, 3])).unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(payloads(&list), vec![3, 1, 0, 2]);
    }

    #[test]
    fn ties_keep_input_order() {
        let points = [
            [1.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 1.0],
        ];
        let list = BatchLoader::build(4, &points, None, Some(vec![10, 11, 12, 13])).unwrap();
        assert_eq!(payloads(&list), vec![11, 10, 12, 13]);
    }

    #[test]
    fn sweep_ties_fall_through_to_earlier_axes() {
        let points = vec![vec![2.0, 1.0, 5.0], vec![1.0, 1.0, 5.0], vec![0.0, 2.0, 5.0]];
        let list = BatchLoader::build(3, &points, None, Some(vec![0, 1, 2])).unwrap();
        assert_eq!(payloads(&list), vec![1, 0, 2]);
    }

    #[test]
    fn rejects_payload_count_mismatch() {
        let err = BatchLoader::build(3, &[[1.0, 2.0, 3.0]], None, Some(vec![1, 2])).unwrap_err();
        assert_eq!(
            err,
            ArchiveError::PayloadCountMismatch {
                points: 1,
                payloads: 2
            }
        );
    }

    #[test]
    fn rejects_wrong_point_length() {
        let points = vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0]];
        let err = BatchLoader::build::<_, ()>(3, &points, None, None).unwrap_err();
        assert_eq!(
            err,
            ArchiveError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn rejects_unsupported_dimension() {
        let err = BatchLoader::build::<[f64; 2], ()>(2, &[[1.0, 2.0]], None, None).unwrap_err();
        assert_eq!(err, ArchiveError::UnsupportedDimension(2));
    }
}
