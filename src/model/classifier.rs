//! Stateful classifier with reloadable training data.
//!
//! The trained state is an immutable [`TrainedModel`] published behind a
//! lock. Loading builds a complete new snapshot first and swaps it in under
//! the write lock, so classification always sees either the old or the new
//! training data, never a mix.

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::config::{EstimatorKind, ModelConfig};
use crate::dataset::{DelimitedLoader, LoaderConfig, TrainingSet};
use crate::error::{CatnbError, Result};
use crate::model::classify_with;
use crate::model::estimator::FrequencyEstimator;
use crate::model::index::FrequencyIndex;
use crate::model::result::ClassificationResult;
use crate::schema::FeatureSchema;

/// Options for a [`NaiveBayesClassifier`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// How joint counts are produced.
    pub estimator: EstimatorKind,
    /// How training files are read.
    pub loader: LoaderConfig,
}

/// Training data plus the structures derived from it at load time.
#[derive(Debug)]
pub struct TrainedModel {
    training: TrainingSet,
    index: Option<FrequencyIndex>,
}

impl TrainedModel {
    /// Prepare `training` for the chosen estimator.
    pub fn new(training: TrainingSet, kind: EstimatorKind) -> Self {
        let index = match kind {
            EstimatorKind::Indexed => {
                let index = FrequencyIndex::build(&training);
                debug!(
                    "Built frequency index over {} rows, distinct values per slot {:?}",
                    training.len(),
                    index.distinct_values()
                );
                Some(index)
            }
            EstimatorKind::Rescan => None,
        };
        Self { training, index }
    }

    pub fn training(&self) -> &TrainingSet {
        &self.training
    }

    /// The estimator that answers queries for this snapshot.
    pub fn estimator(&self) -> &dyn FrequencyEstimator {
        match &self.index {
            Some(index) => index,
            None => &self.training,
        }
    }

    pub fn classify<S: AsRef<str>>(&self, query: &[S]) -> Result<ClassificationResult> {
        classify_with(self.estimator(), query)
    }
}

/// Naive Bayes classifier bound to a feature schema.
#[derive(Debug)]
pub struct NaiveBayesClassifier {
    schema: FeatureSchema,
    config: ClassifierConfig,
    model: RwLock<Option<Arc<TrainedModel>>>,
}

impl NaiveBayesClassifier {
    /// Create an untrained classifier. Classification fails with
    /// [`CatnbError::NotReady`] until training data is loaded.
    pub fn new(schema: FeatureSchema, config: ClassifierConfig) -> Result<Self> {
        schema.validate()?;
        Ok(Self {
            schema,
            config,
            model: RwLock::new(None),
        })
    }

    /// Create an untrained classifier from a model configuration file's contents.
    pub fn from_model_config(config: &ModelConfig) -> Result<Self> {
        Self::new(config.schema(), config.classifier_config())
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Read a delimited training file and publish it as the current snapshot.
    ///
    /// Returns the number of rows loaded. On failure the previous snapshot,
    /// if any, stays in place.
    pub fn load_training_data<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let loader = DelimitedLoader::from_config(self.schema.shape(), &self.config.loader)?;
        let training = loader.load_path(path)?;
        let rows = training.len();

        info!("Loaded {} training rows from {}", rows, path.display());
        self.load_training_set(training)?;
        Ok(rows)
    }

    /// Publish `training` as the current snapshot.
    pub fn load_training_set(&self, training: TrainingSet) -> Result<()> {
        let expected = self.schema.shape();
        let actual = training.shape();
        if actual.feature_count != expected.feature_count {
            return Err(CatnbError::schema_mismatch(
                "training set",
                expected.feature_count,
                actual.feature_count,
            ));
        }
        if actual.class_count != expected.class_count {
            return Err(CatnbError::config(format!(
                "training set has {} classes, schema declares {}",
                actual.class_count, expected.class_count
            )));
        }

        let model = Arc::new(TrainedModel::new(training, self.config.estimator));
        debug!(
            "Publishing snapshot: {} rows, estimator {}",
            model.training().len(),
            model.estimator().name()
        );
        *self.model.write() = Some(model);
        Ok(())
    }

    /// Whether training data has been loaded.
    pub fn is_ready(&self) -> bool {
        self.model.read().is_some()
    }

    /// Number of rows in the current snapshot.
    pub fn training_size(&self) -> Option<usize> {
        self.model.read().as_ref().map(|model| model.training().len())
    }

    /// The current snapshot, or [`CatnbError::NotReady`].
    pub fn snapshot(&self) -> Result<Arc<TrainedModel>> {
        self.model.read().clone().ok_or(CatnbError::NotReady)
    }

    /// Classify one query against the current snapshot.
    pub fn classify<S: AsRef<str>>(&self, query: &[S]) -> Result<ClassificationResult> {
        self.snapshot()?.classify(query)
    }

    /// Classify many queries in parallel against a single snapshot.
    ///
    /// Fails on the first query that fails; no partial results are returned.
    pub fn classify_batch<S: AsRef<str> + Sync>(
        &self,
        queries: &[Vec<S>],
    ) -> Result<Vec<ClassificationResult>> {
        let model = self.snapshot()?;
        queries
            .par_iter()
            .map(|query| model.classify(query))
            .collect()
    }
}
