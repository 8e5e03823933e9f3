//! Property-based tests using proptest
//!
//! These tests verify invariants that should hold regardless of the input
//! values.

use bug_eval::centroids::{extract_centroids, ExtractConfig};
use bug_eval::matching::match_points;
use bug_eval::metrics::{calculate_f1, calculate_precision, calculate_recall};
use bug_eval::raster::points_to_raster;
use bug_eval::types::Point;
use proptest::prelude::*;
use std::collections::HashSet;

// Property: metrics are always in [0, 1]
proptest! {
    #[test]
    fn prop_precision_range(tp in 0usize..1000, fp in 0usize..1000) {
        let precision = calculate_precision(tp, fp);
        prop_assert!((0.0..=1.0).contains(&precision));
    }

    #[test]
    fn prop_recall_range(tp in 0usize..1000, fn_ in 0usize..1000) {
        let recall = calculate_recall(tp, fn_);
        prop_assert!((0.0..=1.0).contains(&recall));
    }

    #[test]
    fn prop_f1_range(tp in 0usize..1000, fp in 0usize..1000, fn_ in 0usize..1000) {
        let f1 = calculate_f1(calculate_precision(tp, fp), calculate_recall(tp, fn_));
        prop_assert!((0.0..=1.0).contains(&f1));
    }
}

fn arb_points(max_len: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 0..max_len)
        .prop_map(|xys| xys.into_iter().map(|(x, y)| Point::new(x, y)).collect())
}

// Property: matching partitions both inputs completely
proptest! {
    #[test]
    fn prop_match_counts_conserve_inputs(
        truth in arb_points(15),
        predicted in arb_points(15),
        threshold in 0.0f64..50.0,
    ) {
        let outcome = match_points(&truth, &predicted, threshold);
        prop_assert_eq!(
            outcome.true_positives() + outcome.false_negatives(),
            truth.len()
        );
        prop_assert_eq!(
            outcome.true_positives() + outcome.false_positives(),
            predicted.len()
        );
    }

    #[test]
    fn prop_matched_pairs_within_threshold(
        truth in arb_points(10),
        predicted in arb_points(10),
        threshold in 0.0f64..50.0,
    ) {
        let outcome = match_points(&truth, &predicted, threshold);
        for (t, p) in &outcome.matched {
            prop_assert!(t.distance_squared(p) <= threshold * threshold + 1e-9);
        }
    }
}

// Property: well-separated point sets survive rasterize -> extract exactly
proptest! {
    #[test]
    fn prop_rasterize_extract_round_trip(
        cells in prop::collection::hash_set((0u32..20, 0u32..20), 0..12)
    ) {
        // spread cells out on a 3px grid so no two are 8-adjacent
        let points: Vec<Point> = cells
            .iter()
            .map(|&(x, y)| Point::new(f64::from(x * 3), f64::from(y * 3)))
            .collect();

        let raster = points_to_raster(&points, 60, 60, 1.0).unwrap();
        let config = ExtractConfig { threshold: 0.0, ..ExtractConfig::default() };
        let recovered = extract_centroids(&raster, &config);

        let expected: HashSet<(i64, i64)> =
            points.iter().map(|p| (p.x as i64, p.y as i64)).collect();
        let actual: HashSet<(i64, i64)> =
            recovered.iter().map(|p| (p.x as i64, p.y as i64)).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_in_bounds_points_never_error(
        xys in prop::collection::vec((0.0f64..64.0, 0.0f64..64.0), 0..20)
    ) {
        let points: Vec<Point> =
            xys.into_iter().map(|(x, y)| Point::new(x, y)).collect();
        prop_assert!(points_to_raster(&points, 64, 64, 1.0).is_ok());
    }
}

// Property: extraction never emits more centroids than foreground pixels
proptest! {
    #[test]
    fn prop_centroid_count_bounded(
        cells in prop::collection::hash_set((0u32..16, 0u32..16), 0..30)
    ) {
        let points: Vec<Point> = cells
            .iter()
            .map(|&(x, y)| Point::new(f64::from(x), f64::from(y)))
            .collect();
        let raster = points_to_raster(&points, 16, 16, 1.0).unwrap();
        let config = ExtractConfig { threshold: 0.0, ..ExtractConfig::default() };
        let centroids = extract_centroids(&raster, &config);
        prop_assert!(centroids.len() <= points.len());
    }
}
