//! Per-class likelihood scores.
//!
//! For class `k` the unnormalized posterior is
//!
//! ```text
//! score[k] = Π_j ( smoothed[j][k] / (classes[k] + F) ) * classes[k] / N
//! ```
//!
//! The denominator adds F, one for every smoothed feature slot, instead of the
//! per-feature domain size used by textbook add-one smoothing. Scores produced
//! here must keep exactly this form.
//!
//! With hundreds of features the product can underflow to `0.0` for every
//! class; [`log_score`] gives the same quantity as a sum of logarithms.

use crate::model::counts::CountMatrix;

/// Score every class from smoothed joint counts and class counts.
///
/// `n` is the training set size and `feature_count` the number of predictor
/// slots. A class with no training rows scores exactly `0.0`. The product is
/// accumulated in feature order and the prior is applied last.
pub fn score(
    smoothed: &CountMatrix,
    class_counts: &[usize],
    n: usize,
    feature_count: usize,
) -> Vec<f64> {
    debug_assert_eq!(smoothed.class_count(), class_counts.len());
    debug_assert_eq!(smoothed.feature_count(), feature_count);

    let class_priors = priors(class_counts, n);
    class_counts
        .iter()
        .zip(&class_priors)
        .enumerate()
        .map(|(class, (&count, &prior))| {
            if count == 0 || prior == 0.0 {
                return 0.0;
            }

            let denominator = (count + feature_count) as f64;
            let mut value = 1.0;
            for feature in 0..feature_count {
                value *= smoothed.get(feature, class) as f64 / denominator;
            }
            value * prior
        })
        .collect()
}

/// Natural logarithm of [`score`], summed instead of multiplied.
///
/// Used when the plain product underflows for every class. A class with no
/// training rows gets `f64::NEG_INFINITY`.
pub fn log_score(
    smoothed: &CountMatrix,
    class_counts: &[usize],
    n: usize,
    feature_count: usize,
) -> Vec<f64> {
    let class_priors = priors(class_counts, n);
    class_counts
        .iter()
        .zip(&class_priors)
        .enumerate()
        .map(|(class, (&count, &prior))| {
            if count == 0 || prior == 0.0 {
                return f64::NEG_INFINITY;
            }

            let denominator = ((count + feature_count) as f64).ln();
            let mut value = 0.0;
            for feature in 0..feature_count {
                value += (smoothed.get(feature, class) as f64).ln() - denominator;
            }
            value + prior.ln()
        })
        .collect()
}

/// Whether [`score`] lost every populated class to underflow.
pub fn underflowed(scores: &[f64], class_counts: &[usize]) -> bool {
    let mut populated = scores
        .iter()
        .zip(class_counts)
        .filter(|(_, count)| **count > 0)
        .peekable();
    populated.peek().is_some() && populated.all(|(score, _)| *score == 0.0)
}

/// Class priors, `classes[k] / N`.
pub fn priors(class_counts: &[usize], n: usize) -> Vec<f64> {
    if n == 0 {
        return vec![0.0; class_counts.len()];
    }
    class_counts
        .iter()
        .map(|&count| count as f64 / n as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::counts::smooth;

    fn matrix(rows: &[&[usize]]) -> CountMatrix {
        let mut matrix = CountMatrix::zeros(rows.len(), rows[0].len());
        for (feature, row) in rows.iter().enumerate() {
            matrix.row_mut(feature).copy_from_slice(row);
        }
        matrix
    }

    #[test]
    fn test_score_by_hand() {
        // 3 features, classes [1, 2], every smoothed cell 2
        let smoothed = smooth(&matrix(&[&[1, 1], &[1, 1], &[1, 1]]));
        let scores = score(&smoothed, &[1, 2], 3, 3);

        let expected_0 = (2.0 / 4.0_f64).powi(3) * (1.0 / 3.0);
        let expected_1 = (2.0 / 5.0_f64).powi(3) * (2.0 / 3.0);
        assert!((scores[0] - expected_0).abs() < 1e-12);
        assert!((scores[1] - expected_1).abs() < 1e-12);
        assert!((scores[0] - 1.0 / 24.0).abs() < 1e-12);
        assert!((scores[1] - 16.0 / 375.0).abs() < 1e-12);
    }

    #[test]
    fn test_unobserved_class_scores_zero() {
        let smoothed = smooth(&matrix(&[&[2, 0, 1]]));
        let scores = score(&smoothed, &[2, 0, 1], 3, 1);

        assert_eq!(scores[1], 0.0);
        assert!(scores[0] > 0.0);
        assert!(scores[2] > 0.0);
    }

    #[test]
    fn test_log_score_matches_plain_score() {
        let smoothed = smooth(&matrix(&[&[1, 1], &[1, 0], &[0, 2]]));
        let scores = score(&smoothed, &[1, 2], 3, 3);
        let logs = log_score(&smoothed, &[1, 2], 3, 3);

        for (plain, log) in scores.iter().zip(&logs) {
            assert!((plain.ln() - log).abs() < 1e-12);
        }
        assert!(!underflowed(&scores, &[1, 2]));
    }

    #[test]
    fn test_wide_model_underflows_plain_score() {
        let smoothed = smooth(&CountMatrix::zeros(400, 2));
        let scores = score(&smoothed, &[600, 400], 1000, 400);
        assert_eq!(scores, vec![0.0, 0.0]);
        assert!(underflowed(&scores, &[600, 400]));

        let logs = log_score(&smoothed, &[600, 400], 1000, 400);
        assert!(logs.iter().all(|log| log.is_finite()));
        assert!(logs[1] > logs[0]);

        let logs = log_score(&smoothed, &[1000, 0], 1000, 400);
        assert_eq!(logs[1], f64::NEG_INFINITY);
        assert!(!underflowed(&[0.0, 0.0], &[0, 0]));
    }

    #[test]
    fn test_priors() {
        assert_eq!(priors(&[1, 3], 4), vec![0.25, 0.75]);
        assert_eq!(priors(&[0, 0], 0), vec![0.0, 0.0]);
    }
}
