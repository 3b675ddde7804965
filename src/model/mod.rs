//! Categorical Naive Bayes estimation and inference.
//!
//! Classification runs in three stages:
//!
//! - **Frequency estimation** ([`counts`], [`index`]): joint counts of query
//!   matches per feature and class, plus per-class row counts.
//! - **Smoothing and likelihood** ([`counts::smooth`], [`likelihood`]): add one
//!   to every joint count and score each class.
//! - **Decision** ([`decision`]): normalize the scores and take the argmax.
//!
//! # Architecture
//!
//! - `FrequencyEstimator` trait: common interface for count producers
//! - `TrainingSet`: rescans the rows for every query
//! - `FrequencyIndex`: answers queries from precomputed histograms
//! - `NaiveBayesClassifier`: owns a schema and a reloadable trained snapshot
//!
//! # Example
//!
//! ```rust
//! use catnb::dataset::{TrainingRow, TrainingSet};
//! use catnb::model;
//! use catnb::schema::ModelShape;
//!
//! # fn main() -> catnb::error::Result<()> {
//! let training = TrainingSet::new(
//!     ModelShape::new(3, 2)?,
//!     vec![
//!         TrainingRow::new(&["a", "x", "p"], 0),
//!         TrainingRow::new(&["a", "y", "p"], 1),
//!         TrainingRow::new(&["b", "x", "q"], 1),
//!     ],
//! )?;
//!
//! let result = model::classify(&training, &["a", "x", "p"])?;
//! assert_eq!(result.predicted_class(), 1);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod counts;
pub mod decision;
pub mod estimator;
pub mod index;
pub mod likelihood;
pub mod result;

pub use classifier::{ClassifierConfig, NaiveBayesClassifier, TrainedModel};
pub use counts::{CountMatrix, FrequencyCounts, estimate, smooth};
pub use decision::{Decision, decide, decide_log};
pub use estimator::FrequencyEstimator;
pub use index::FrequencyIndex;
pub use likelihood::{log_score, score};
pub use result::ClassificationResult;

use crate::dataset::TrainingSet;
use crate::error::Result;

/// Classify `query` against `training` by rescanning the training rows.
pub fn classify<S: AsRef<str>>(
    training: &TrainingSet,
    query: &[S],
) -> Result<ClassificationResult> {
    classify_with(training, query)
}

/// Classify `query` with counts taken from `estimator`.
pub fn classify_with<S: AsRef<str>>(
    estimator: &dyn FrequencyEstimator,
    query: &[S],
) -> Result<ClassificationResult> {
    let values: Vec<&str> = query.iter().map(|value| value.as_ref()).collect();

    let counts = estimator.estimate(&values)?;
    let smoothed = smooth(&counts.joint);
    let training_size = estimator.training_size();
    let scores = score(
        &smoothed,
        &counts.classes,
        training_size,
        estimator.shape().feature_count,
    );
    // wide models can underflow the plain product for every class
    let decision = if likelihood::underflowed(&scores, &counts.classes) {
        decide_log(&log_score(
            &smoothed,
            &counts.classes,
            training_size,
            estimator.shape().feature_count,
        ))?
    } else {
        decide(&scores)?
    };

    Ok(ClassificationResult::new(
        values.iter().map(|value| value.to_string()).collect(),
        counts,
        smoothed,
        training_size,
        scores,
        decision,
    ))
}
