//! Frequency counting and Laplacian smoothing.

use serde::{Deserialize, Serialize};

use crate::dataset::{TrainingRow, validate_row};
use crate::error::{CatnbError, Result};
use crate::schema::ModelShape;

/// A fixed-shape F×C matrix of counts stored row-major in one buffer.
///
/// Row `j` is a feature slot, column `k` a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMatrix {
    features: usize,
    classes: usize,
    cells: Vec<usize>,
}

impl CountMatrix {
    /// Create a zero matrix with `features` rows and `classes` columns.
    pub fn zeros(features: usize, classes: usize) -> Self {
        Self {
            features,
            classes,
            cells: vec![0; features * classes],
        }
    }

    pub fn feature_count(&self) -> usize {
        self.features
    }

    pub fn class_count(&self) -> usize {
        self.classes
    }

    /// Count at feature `j`, class `k`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, feature: usize, class: usize) -> usize {
        assert!(
            feature < self.features,
            "feature index {feature} out of bounds for {} features",
            self.features
        );
        assert!(
            class < self.classes,
            "class index {class} out of bounds for {} classes",
            self.classes
        );
        self.cells[feature * self.classes + class]
    }

    pub(crate) fn increment(&mut self, feature: usize, class: usize) {
        self.cells[feature * self.classes + class] += 1;
    }

    /// The per-class counts of one feature slot.
    pub fn row(&self, feature: usize) -> &[usize] {
        let start = feature * self.classes;
        &self.cells[start..start + self.classes]
    }

    pub(crate) fn row_mut(&mut self, feature: usize) -> &mut [usize] {
        let start = feature * self.classes;
        &mut self.cells[start..start + self.classes]
    }

    /// Iterate over the rows, one slice per feature slot.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        // chunks_exact would panic on a zero-width matrix
        (0..self.features).map(move |feature| self.row(feature))
    }

    /// Copy into nested vectors, `[feature][class]`.
    pub fn to_nested(&self) -> Vec<Vec<usize>> {
        self.rows().map(<[usize]>::to_vec).collect()
    }

    /// Smallest cell value, or `None` for an empty matrix.
    pub fn min(&self) -> Option<usize> {
        self.cells.iter().copied().min()
    }
}

/// Raw joint counts and class counts for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyCounts {
    /// Rows whose feature `j` equals the query's feature `j`, per class.
    pub joint: CountMatrix,
    /// Rows per class.
    pub classes: Vec<usize>,
}

/// Count matches between `rows` and `query` by rescanning the training rows.
///
/// Fails with [`CatnbError::SchemaMismatch`] if the query or any row does not
/// have `shape.feature_count` values, and with [`CatnbError::InvalidLabel`] if
/// a label is outside `[0, shape.class_count)`. Feature values match by exact
/// string equality.
pub fn estimate<S: AsRef<str>>(
    rows: &[TrainingRow],
    shape: ModelShape,
    query: &[S],
) -> Result<FrequencyCounts> {
    check_query(shape, query.len())?;

    let mut joint = CountMatrix::zeros(shape.feature_count, shape.class_count);
    let mut classes = vec![0usize; shape.class_count];

    for (index, row) in rows.iter().enumerate() {
        validate_row(shape, index, row)?;

        classes[row.label] += 1;
        for (feature, (value, wanted)) in row.features.iter().zip(query).enumerate() {
            if value == wanted.as_ref() {
                joint.increment(feature, row.label);
            }
        }
    }

    Ok(FrequencyCounts { joint, classes })
}

/// Laplacian smoothing: a copy of `joint` with every cell incremented by 1.
pub fn smooth(joint: &CountMatrix) -> CountMatrix {
    let mut smoothed = joint.clone();
    for cell in &mut smoothed.cells {
        *cell += 1;
    }
    smoothed
}

pub(crate) fn check_query(shape: ModelShape, len: usize) -> Result<()> {
    if len != shape.feature_count {
        return Err(CatnbError::schema_mismatch(
            "query",
            shape.feature_count,
            len,
        ));
    }
    Ok(())
}
