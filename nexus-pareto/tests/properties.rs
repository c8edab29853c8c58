//! Randomised invariants of the archive over small integer grids.

use nexus_pareto::{Archive, SweepOrder, weakly_dominates};
use proptest::prelude::*;

const REFERENCE: f64 = 10.0;

/// Points on a coarse integer grid, so ties and duplicates are common.
fn grid_points(dim: usize, max: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(
        prop::collection::vec((0u8..12).prop_map(f64::from), dim),
        0..max,
    )
}

fn dims_and_points() -> impl Strategy<Value = (usize, Vec<Vec<f64>>)> {
    prop_oneof![
        grid_points(3, 40).prop_map(|p| (3, p)),
        grid_points(4, 25).prop_map(|p| (4, p)),
    ]
}

fn incremental(dim: usize, points: &[Vec<f64>]) -> Archive<usize> {
    let mut archive = Archive::new(dim).unwrap();
    archive.set_reference_point(Some(vec![REFERENCE; dim].as_slice())).unwrap();
    for (i, p) in points.iter().enumerate() {
        archive.insert(p, Some(i)).unwrap();
    }
    archive
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(1.0)
}

proptest! {
    #[test]
    fn archive_is_dominance_free((dim, points) in dims_and_points()) {
        let archive = incremental(dim, &points);
        let kept = archive.points();

        for (i, a) in kept.iter().enumerate() {
            for (j, b) in kept.iter().enumerate() {
                if i != j {
                    prop_assert!(!weakly_dominates(a, b, dim), "{:?} dominates {:?}", a, b);
                }
            }
        }
        // every offered point is covered
        for p in &points {
            prop_assert!(archive.dominates(p).unwrap());
        }
    }

    #[test]
    fn points_follow_sweep_order((dim, points) in dims_and_points()) {
        let archive = incremental(dim, &points);
        let order = SweepOrder::new(dim);
        let kept = archive.points();
        for pair in kept.windows(2) {
            prop_assert!(order.compare(&pair[0], &pair[1]).is_le());
        }
    }

    #[test]
    fn reinserting_is_rejected((dim, points) in dims_and_points()) {
        let mut archive = incremental(dim, &points);
        let len = archive.len();
        for p in archive.points() {
            prop_assert!(!archive.insert(&p, None).unwrap());
        }
        prop_assert_eq!(archive.len(), len);
    }

    #[test]
    fn queries_agree((dim, points) in dims_and_points(), queries in grid_points(4, 20)) {
        let archive = incremental(dim, &points);
        for query in &queries {
            let query = &query[..dim];
            let count = archive.dominator_count(query).unwrap();
            prop_assert_eq!(archive.dominates(query).unwrap(), count > 0);
            prop_assert_eq!(archive.dominators(query).unwrap().len(), count);
        }
    }

    #[test]
    fn payloads_stay_with_points((dim, points) in dims_and_points()) {
        let archive = incremental(dim, &points);
        for (point, payload) in archive.iter() {
            let i = *payload.unwrap();
            prop_assert_eq!(point, points[i].as_slice());
        }
    }

    #[test]
    fn batch_matches_incremental((dim, points) in dims_and_points()) {
        let mut batch: Archive = Archive::from_points(&points, Some(vec![REFERENCE; dim].as_slice())).unwrap();
        let mut incremental = incremental(dim, &points);

        prop_assert_eq!(batch.points(), incremental.points());
        let (a, b) = (batch.hypervolume().unwrap(), incremental.hypervolume().unwrap());
        prop_assert!(close(a, b), "{} != {}", a, b);
    }

    #[test]
    fn contributions_match_removal((dim, points) in dims_and_points()) {
        let mut archive = incremental(dim, &points);
        let total = archive.hypervolume().unwrap();
        let contributions = archive.contributing_hypervolumes().unwrap();

        for (p, contribution) in archive.points().iter().zip(contributions) {
            prop_assert!(contribution >= 0.0);
            let mut without = archive.clone();
            prop_assert!(without.remove(p).unwrap());
            let expected = total - without.hypervolume().unwrap();
            prop_assert!(close(contribution, expected), "{} != {}", contribution, expected);
        }
    }

    #[test]
    fn improvement_matches_insertion((dim, points) in dims_and_points(), candidates in grid_points(4, 2)) {
        prop_assume!(!candidates.is_empty());
        let candidate = &candidates[0][..dim];
        let mut archive = incremental(dim, &points);
        let before = archive.hypervolume().unwrap();
        let improvement = archive.hypervolume_improvement(candidate).unwrap();

        let mut after = archive.clone();
        after.insert(candidate, None).unwrap();
        let expected = after.hypervolume().unwrap() - before;
        prop_assert!(close(improvement, expected), "{} != {}", improvement, expected);
    }
}
