//! Precomputed per-value histograms.
//!
//! [`FrequencyIndex`] walks the training data once and records, for every
//! feature slot and every value seen in it, how many rows of each class carry
//! that value. A query is then answered by F lookups instead of a rescan of
//! all N rows.

use ahash::AHashMap;

use crate::dataset::TrainingSet;
use crate::error::Result;
use crate::model::counts::{CountMatrix, FrequencyCounts, check_query};
use crate::model::estimator::FrequencyEstimator;
use crate::schema::ModelShape;

/// Feature-value histograms built from a training set.
#[derive(Debug, Clone)]
pub struct FrequencyIndex {
    shape: ModelShape,
    training_size: usize,
    /// `histograms[j][value][k]`: rows with `value` at slot `j` and label `k`.
    histograms: Vec<AHashMap<String, Vec<usize>>>,
    class_counts: Vec<usize>,
}

impl FrequencyIndex {
    /// Build the index in one pass over `training`.
    pub fn build(training: &TrainingSet) -> Self {
        let shape = training.shape();
        let mut histograms: Vec<AHashMap<String, Vec<usize>>> =
            vec![AHashMap::new(); shape.feature_count];
        let mut class_counts = vec![0usize; shape.class_count];

        for row in training {
            class_counts[row.label] += 1;
            for (histogram, value) in histograms.iter_mut().zip(&row.features) {
                let counts = histogram
                    .entry(value.clone())
                    .or_insert_with(|| vec![0usize; shape.class_count]);
                counts[row.label] += 1;
            }
        }

        Self {
            shape,
            training_size: training.len(),
            histograms,
            class_counts,
        }
    }

    /// Number of distinct values observed at each feature slot.
    pub fn distinct_values(&self) -> Vec<usize> {
        self.histograms.iter().map(|histogram| histogram.len()).collect()
    }

    pub fn class_counts(&self) -> &[usize] {
        &self.class_counts
    }
}

impl FrequencyEstimator for FrequencyIndex {
    fn shape(&self) -> ModelShape {
        self.shape
    }

    fn training_size(&self) -> usize {
        self.training_size
    }

    fn estimate(&self, query: &[&str]) -> Result<FrequencyCounts> {
        check_query(self.shape, query.len())?;

        let mut joint = CountMatrix::zeros(self.shape.feature_count, self.shape.class_count);
        for (feature, (histogram, value)) in self.histograms.iter().zip(query).enumerate() {
            // unseen values leave the row at zero
            if let Some(counts) = histogram.get(*value) {
                joint.row_mut(feature).copy_from_slice(counts);
            }
        }

        Ok(FrequencyCounts {
            joint,
            classes: self.class_counts.clone(),
        })
    }

    fn name(&self) -> &str {
        "indexed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TrainingRow;
    use crate::error::CatnbError;

    fn training() -> TrainingSet {
        TrainingSet::new(
            ModelShape::new(3, 2).unwrap(),
            vec![
                TrainingRow::new(&["a", "x", "p"], 0),
                TrainingRow::new(&["a", "y", "p"], 1),
                TrainingRow::new(&["b", "x", "q"], 1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_index_build() {
        let index = FrequencyIndex::build(&training());

        assert_eq!(index.training_size(), 3);
        assert_eq!(index.class_counts(), &[1, 2]);
        assert_eq!(index.distinct_values(), vec![2, 2, 2]);
        assert_eq!(index.name(), "indexed");
    }

    #[test]
    fn test_index_matches_rescan() {
        let training = training();
        let index = FrequencyIndex::build(&training);

        for query in [
            ["a", "x", "p"],
            ["b", "y", "q"],
            ["a", "z", "q"],
            ["c", "c", "c"],
        ] {
            let expected = training.estimate(&query).unwrap();
            let actual = index.estimate(&query).unwrap();
            assert_eq!(actual, expected, "query {query:?}");
        }
    }

    #[test]
    fn test_index_rejects_wrong_query_length() {
        let index = FrequencyIndex::build(&training());
        let result = index.estimate(&["a", "x", "p", "extra"]);
        assert!(matches!(
            result,
            Err(CatnbError::SchemaMismatch {
                expected: 3,
                found: 4,
                ..
            })
        ));
    }
}
