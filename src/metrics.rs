//! Precision, recall and F1 from match counts.

/// Calculate precision from TP and FP counts.
///
/// Returns 0.0 when there are no positive predictions, rather than dividing
/// by zero.
///
/// # Example
///
/// ```
/// use bug_eval::metrics::calculate_precision;
///
/// assert_eq!(calculate_precision(8, 2), 0.8);
/// assert_eq!(calculate_precision(0, 0), 0.0);
/// ```
pub fn calculate_precision(true_positives: usize, false_positives: usize) -> f64 {
    if true_positives + false_positives > 0 {
        true_positives as f64 / (true_positives + false_positives) as f64
    } else {
        0.0
    }
}

/// Calculate recall from TP and FN counts.
///
/// Returns 0.0 when there is no ground truth, rather than dividing by zero.
pub fn calculate_recall(true_positives: usize, false_negatives: usize) -> f64 {
    if true_positives + false_negatives > 0 {
        true_positives as f64 / (true_positives + false_negatives) as f64
    } else {
        0.0
    }
}

/// Calculate F1 score from precision and recall.
///
/// F1 is the harmonic mean: `2 * (p * r) / (p + r)`. Returns 0.0 when both
/// precision and recall are 0.
///
/// # Example
///
/// ```
/// use bug_eval::metrics::calculate_f1;
///
/// let f1 = calculate_f1(0.8, 0.6);
/// assert!((f1 - 0.6857).abs() < 0.001);
/// ```
pub fn calculate_f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        return 0.0;
    }
    2.0 * (precision * recall) / (precision + recall)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_scores() {
        assert_eq!(calculate_precision(10, 0), 1.0);
        assert_eq!(calculate_recall(10, 0), 1.0);
        assert!((calculate_f1(1.0, 1.0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_denominators() {
        assert_eq!(calculate_precision(0, 0), 0.0);
        assert_eq!(calculate_recall(0, 0), 0.0);
        assert_eq!(calculate_f1(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_known_values() {
        let p = calculate_precision(8, 2);
        let r = calculate_recall(8, 3);
        assert!((p - 0.8).abs() < 1e-10);
        assert!((r - 8.0 / 11.0).abs() < 1e-10);
        // F1 = 2 * (0.8 * 0.7273) / (0.8 + 0.7273) ≈ 0.7619
        assert!((calculate_f1(p, r) - 0.7619).abs() < 0.001);
    }
}
