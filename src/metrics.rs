//! Evaluation metrics.
//!
//! Free functions over parallel slices of true and predicted labels.

/// Count of positions where prediction and truth match exactly.
pub fn n_correct(y_true: &[&str], y_pred: &[&str]) -> usize {
    y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count()
}

/// Fraction of predictions that exactly match the true labels, in `[0, 1]`.
///
/// Panics if the slices differ in length. An empty pair of slices yields
/// NaN.
pub fn accuracy_score(y_true: &[&str], y_pred: &[&str]) -> f64 {
    assert_eq!(
        y_true.len(),
        y_pred.len(),
        "y_true and y_pred must have the same length"
    );
    n_correct(y_true, y_pred) as f64 / y_true.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_n_correct() {
        assert_eq!(n_correct(&["a", "b", "a"], &["a", "a", "a"]), 2);
        assert_eq!(n_correct(&[], &[]), 0);
    }

    #[test]
    fn test_accuracy_score() {
        let y_true = ["yes", "yes", "no", "no"];
        let y_pred = ["yes", "no", "no", "no"];
        assert_eq!(accuracy_score(&y_true, &y_pred), 0.75);
        assert_eq!(accuracy_score(&y_true, &y_true), 1.0);
        assert_eq!(accuracy_score(&y_true, &["no", "no", "yes", "yes"]), 0.0);
    }

    #[test]
    fn test_accuracy_score_empty_is_nan() {
        assert!(accuracy_score(&[], &[]).is_nan());
    }

    #[test]
    #[should_panic]
    fn test_accuracy_score_length_mismatch_panics() {
        accuracy_score(&["yes"], &[]);
    }
}
