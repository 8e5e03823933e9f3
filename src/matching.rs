//! Greedy nearest-neighbor matching of predicted points against ground
//! truth, with a running cross-image aggregate.

use crate::metrics::{calculate_f1, calculate_precision, calculate_recall};
use crate::types::Point;

/// Default maximum distance (in pixels) for a prediction to match a ground
/// truth point.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 10.0;

/// The result of matching one predicted set against one ground-truth set.
///
/// Partitions both inputs completely: every true point appears in exactly
/// one of `matched` or `unmatched_true`, every predicted point in exactly
/// one of `matched` or `unmatched_pred`.
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    /// Matched `(true, predicted)` pairs, in match order (closest first).
    pub matched: Vec<(Point, Point)>,
    /// Ground-truth points with no prediction within the threshold.
    pub unmatched_true: Vec<Point>,
    /// Predicted points with no ground truth within the threshold.
    pub unmatched_pred: Vec<Point>,
}

impl MatchOutcome {
    /// Number of true positives (matched pairs).
    pub fn true_positives(&self) -> usize {
        self.matched.len()
    }

    /// Number of false negatives (unmatched ground-truth points).
    pub fn false_negatives(&self) -> usize {
        self.unmatched_true.len()
    }

    /// Number of false positives (unmatched predicted points).
    pub fn false_positives(&self) -> usize {
        self.unmatched_pred.len()
    }
}

/// Match two point sets by greedy nearest-neighbor pairing.
///
/// Repeatedly pairs the globally closest remaining `(true, predicted)` pair
/// until the minimum distance exceeds `threshold` (a pair at exactly the
/// threshold distance still matches) or either set is exhausted. Equal
/// distances are broken by lexicographic `(true index, predicted index)`
/// order, so results are reproducible across runs and platforms.
///
/// Inputs are borrowed; callers keep ownership of their point collections.
///
/// Each pairing step scans the full remaining cross-product. That is O(n·m)
/// per match, acceptable because per-image point counts are tens, not
/// thousands.
///
/// # Example
///
/// ```
/// use bug_eval::matching::match_points;
/// use bug_eval::types::Point;
///
/// let truth = vec![Point::new(0.0, 0.0), Point::new(50.0, 50.0)];
/// let predicted = vec![Point::new(1.0, 1.0)];
///
/// let outcome = match_points(&truth, &predicted, 10.0);
/// assert_eq!(outcome.true_positives(), 1);
/// assert_eq!(outcome.false_negatives(), 1);
/// assert_eq!(outcome.false_positives(), 0);
/// ```
pub fn match_points(
    true_points: &[Point],
    predicted_points: &[Point],
    threshold: f64,
) -> MatchOutcome {
    let threshold_sq = threshold * threshold;
    let mut remaining_true: Vec<usize> = (0..true_points.len()).collect();
    let mut remaining_pred: Vec<usize> = (0..predicted_points.len()).collect();
    let mut matched = Vec::new();

    while !remaining_true.is_empty() && !remaining_pred.is_empty() {
        // Enumeration is in ascending (true index, pred index) order and only
        // a strictly smaller distance replaces the incumbent, so the first
        // minimal pair wins ties.
        let mut best: Option<(usize, usize, f64)> = None;
        for (ti_pos, &ti) in remaining_true.iter().enumerate() {
            for (pi_pos, &pi) in remaining_pred.iter().enumerate() {
                let d2 = true_points[ti].distance_squared(&predicted_points[pi]);
                if best.map_or(true, |(_, _, best_d2)| d2 < best_d2) {
                    best = Some((ti_pos, pi_pos, d2));
                }
            }
        }

        let (ti_pos, pi_pos, d2) = best.expect("both sets are non-empty");
        if d2 > threshold_sq {
            break;
        }

        let ti = remaining_true.remove(ti_pos);
        let pi = remaining_pred.remove(pi_pos);
        matched.push((true_points[ti], predicted_points[pi]));
    }

    MatchOutcome {
        matched,
        unmatched_true: remaining_true.iter().map(|&i| true_points[i]).collect(),
        unmatched_pred: remaining_pred
            .iter()
            .map(|&i| predicted_points[i])
            .collect(),
    }
}

/// Scores predicted point sets against ground truth and accumulates
/// TP/FN/FP totals across repeated [`SetMatcher::compare`] calls.
///
/// Lifetime and sharing are the caller's responsibility; there is no global
/// instance. A fresh matcher reports `(0, 0, 0)` for
/// [`SetMatcher::precision_recall_f1`].
#[derive(Debug, Clone, Default)]
pub struct SetMatcher {
    true_positives: usize,
    false_negatives: usize,
    false_positives: usize,
}

impl SetMatcher {
    /// Create a new matcher with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match one image's predicted points against its ground truth, adding
    /// the result to the running totals.
    ///
    /// Returns the full [`MatchOutcome`] for this call.
    pub fn compare(
        &mut self,
        true_points: &[Point],
        predicted_points: &[Point],
        threshold: f64,
    ) -> MatchOutcome {
        let outcome = match_points(true_points, predicted_points, threshold);
        self.true_positives += outcome.true_positives();
        self.false_negatives += outcome.false_negatives();
        self.false_positives += outcome.false_positives();
        outcome
    }

    /// Accumulated `(tp, fn, fp)` totals.
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.true_positives,
            self.false_negatives,
            self.false_positives,
        )
    }

    /// Precision, recall and F1 over the accumulated totals.
    ///
    /// Any zero denominator yields `(0.0, 0.0, 0.0)` rather than an error;
    /// degenerate inputs are an expected case, not a failure.
    pub fn precision_recall_f1(&self) -> (f64, f64, f64) {
        let precision = calculate_precision(self.true_positives, self.false_positives);
        let recall = calculate_recall(self.true_positives, self.false_negatives);
        let f1 = calculate_f1(precision, recall);
        (precision, recall, f1)
    }
}
