//! Training data.
//!
//! A [`TrainingSet`] is an ordered, validated, read-only sequence of
//! [`TrainingRow`]s. Every row has exactly F feature values and a label in
//! `[0, C)`; construction rejects anything else, so the estimators downstream
//! can rely on the shape.

pub mod loader;

pub use loader::{DelimitedLoader, LoaderConfig};

use serde::{Deserialize, Serialize};

use crate::error::{CatnbError, Result};
use crate::schema::ModelShape;

/// One labeled training example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRow {
    /// Feature values, one per predictor slot.
    pub features: Vec<String>,
    /// Class label.
    pub label: usize,
}

impl TrainingRow {
    pub fn new<S: AsRef<str>>(features: &[S], label: usize) -> Self {
        Self {
            features: features.iter().map(|f| f.as_ref().to_string()).collect(),
            label,
        }
    }
}

/// Validated, immutable training data together with its model shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSet {
    shape: ModelShape,
    rows: Vec<TrainingRow>,
}

impl TrainingSet {
    /// Validate `rows` against `shape`.
    ///
    /// Fails with [`CatnbError::EmptyTrainingSet`] when there are no rows,
    /// [`CatnbError::SchemaMismatch`] when a row has the wrong number of
    /// features and [`CatnbError::InvalidLabel`] when a label is out of range.
    pub fn new(shape: ModelShape, rows: Vec<TrainingRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(CatnbError::EmptyTrainingSet);
        }

        for (index, row) in rows.iter().enumerate() {
            validate_row(shape, index, row)?;
        }

        Ok(Self { shape, rows })
    }

    pub fn shape(&self) -> ModelShape {
        self.shape
    }

    pub fn rows(&self) -> &[TrainingRow] {
        &self.rows
    }

    /// Number of training rows (N).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrainingRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a TrainingSet {
    type Item = &'a TrainingRow;
    type IntoIter = std::slice::Iter<'a, TrainingRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Check one row against the model shape.
pub(crate) fn validate_row(shape: ModelShape, index: usize, row: &TrainingRow) -> Result<()> {
    if row.features.len() != shape.feature_count {
        return Err(CatnbError::schema_mismatch(
            format!("training row {index}"),
            shape.feature_count,
            row.features.len(),
        ));
    }
    if row.label >= shape.class_count {
        return Err(CatnbError::invalid_label(
            row.label as i64,
            shape.class_count,
        ));
    }
    Ok(())
}
