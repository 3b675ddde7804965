//! Normalization and argmax decision.

use serde::{Deserialize, Serialize};

use crate::error::{CatnbError, Result};

/// Normalized class distribution and the winning class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub probabilities: Vec<f64>,
    pub predicted_class: usize,
    /// Probability of the predicted class.
    pub confidence: f64,
}

/// Normalize `scores` by their sum and pick the most probable class.
///
/// Ties go to the lowest class index. Fails with
/// [`CatnbError::DegenerateModel`] when the scores sum to zero (or to a value
/// that is not a positive finite number).
pub fn decide(scores: &[f64]) -> Result<Decision> {
    let evidence: f64 = scores.iter().sum();
    if !(evidence > 0.0 && evidence.is_finite()) {
        return Err(CatnbError::DegenerateModel);
    }

    let probabilities: Vec<f64> = scores.iter().map(|score| score / evidence).collect();
    let predicted_class = argmax(&probabilities);
    let confidence = probabilities[predicted_class];

    Ok(Decision {
        probabilities,
        predicted_class,
        confidence,
    })
}

/// Like [`decide`], but from natural-log scores, normalized with
/// log-sum-exp so that scores far below `f64::MIN_POSITIVE` still compare.
///
/// `f64::NEG_INFINITY` stands for a zero score. Fails with
/// [`CatnbError::DegenerateModel`] when no class has a finite log score.
pub fn decide_log(log_scores: &[f64]) -> Result<Decision> {
    let max = log_scores
        .iter()
        .copied()
        .filter(|log| log.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || log_scores.iter().any(|log| log.is_nan()) {
        return Err(CatnbError::DegenerateModel);
    }

    let shifted: Vec<f64> = log_scores.iter().map(|log| (log - max).exp()).collect();
    let total: f64 = shifted.iter().sum();
    let probabilities: Vec<f64> = shifted.iter().map(|value| value / total).collect();
    let predicted_class = argmax(&probabilities);
    let confidence = probabilities[predicted_class];

    Ok(Decision {
        probabilities,
        predicted_class,
        confidence,
    })
}

/// Index of the first maximum; `0` for an empty slice.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = index;
        }
    }
    best
}
