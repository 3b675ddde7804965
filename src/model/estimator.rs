//! Frequency estimator trait definition.

use crate::dataset::TrainingSet;
use crate::error::Result;
use crate::model::counts::{FrequencyCounts, estimate};
use crate::schema::ModelShape;

/// Produces the joint and class counts for a query.
///
/// Implementations must agree exactly: for the same training data and query
/// every estimator returns the same [`FrequencyCounts`].
pub trait FrequencyEstimator: Send + Sync {
    /// Shape of the underlying training data.
    fn shape(&self) -> ModelShape;

    /// Number of training rows (N).
    fn training_size(&self) -> usize;

    /// Count the training rows matching `query`, feature by feature.
    ///
    /// # Arguments
    /// * `query` - exactly F feature values
    fn estimate(&self, query: &[&str]) -> Result<FrequencyCounts>;

    /// Get the name of this estimator for debugging and logging.
    fn name(&self) -> &str;
}

/// Rescans every training row per query. O(N·F).
impl FrequencyEstimator for TrainingSet {
    fn shape(&self) -> ModelShape {
        TrainingSet::shape(self)
    }

    fn training_size(&self) -> usize {
        self.len()
    }

    fn estimate(&self, query: &[&str]) -> Result<FrequencyCounts> {
        estimate(self.rows(), TrainingSet::shape(self), query)
    }

    fn name(&self) -> &str {
        "rescan"
    }
}
