//! The outcome of one classification call.

use serde::{Deserialize, Serialize};

use crate::model::counts::{CountMatrix, FrequencyCounts};
use crate::model::decision::Decision;

/// Everything computed while classifying one query.
///
/// Built once per call and never modified afterwards; all fields are exposed
/// through read-only getters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    query: Vec<String>,
    raw_joint_counts: CountMatrix,
    joint_counts: CountMatrix,
    class_counts: Vec<usize>,
    training_size: usize,
    scores: Vec<f64>,
    probabilities: Vec<f64>,
    predicted_class: usize,
    confidence: f64,
}

impl ClassificationResult {
    pub(crate) fn new(
        query: Vec<String>,
        counts: FrequencyCounts,
        smoothed: CountMatrix,
        training_size: usize,
        scores: Vec<f64>,
        decision: Decision,
    ) -> Self {
        Self {
            query,
            raw_joint_counts: counts.joint,
            joint_counts: smoothed,
            class_counts: counts.classes,
            training_size,
            scores,
            probabilities: decision.probabilities,
            predicted_class: decision.predicted_class,
            confidence: decision.confidence,
        }
    }

    /// The classified feature vector.
    pub fn query(&self) -> &[String] {
        &self.query
    }

    /// Joint counts before smoothing.
    pub fn raw_joint_counts(&self) -> &CountMatrix {
        &self.raw_joint_counts
    }

    /// Joint counts after Laplacian smoothing. Every cell is at least 1.
    pub fn joint_counts(&self) -> &CountMatrix {
        &self.joint_counts
    }

    pub fn class_counts(&self) -> &[usize] {
        &self.class_counts
    }

    /// Number of training rows the counts were taken from.
    pub fn training_size(&self) -> usize {
        self.training_size
    }

    /// Unnormalized per-class scores (likelihood times prior).
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Scores normalized to sum to 1.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn predicted_class(&self) -> usize {
        self.predicted_class
    }

    /// Probability of the predicted class.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}
