//! Feature schema and class label metadata.
//!
//! The schema names the F predictor slots and the C class labels of a model.
//! Value domains are informational: the classifier never rejects a value
//! because it is missing from a domain.

use serde::{Deserialize, Serialize};

use crate::error::{CatnbError, Result};

/// The shape of a model: number of predictor slots and number of classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelShape {
    /// Number of predictor variables (F).
    pub feature_count: usize,
    /// Number of class labels (C).
    pub class_count: usize,
}

impl ModelShape {
    /// Create a shape, rejecting zero features or zero classes.
    pub fn new(feature_count: usize, class_count: usize) -> Result<Self> {
        if feature_count == 0 {
            return Err(CatnbError::config("a model needs at least one feature"));
        }
        if class_count == 0 {
            return Err(CatnbError::config("a model needs at least one class"));
        }
        Ok(Self {
            feature_count,
            class_count,
        })
    }

    /// Whether `label` is one of `0..class_count`.
    pub fn admits_label(&self, label: i64) -> bool {
        label >= 0 && (label as u64) < self.class_count as u64
    }
}

/// A single predictor slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Display name.
    pub name: String,
    /// Admissible values, for display and warnings only.
    #[serde(default)]
    pub values: Vec<String>,
}

impl Attribute {
    pub fn new<S: Into<String>>(name: S, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Whether `value` is listed in the domain. An empty domain admits everything.
    pub fn admits(&self, value: &str) -> bool {
        self.values.is_empty() || self.values.iter().any(|v| v == value)
    }
}

/// The class label description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSpec {
    /// Display name of the predicted variable.
    pub name: String,
    /// One display name per class; class `k` is `classes[k]`.
    pub classes: Vec<String>,
}

/// Ordered predictor slots plus the label description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub attributes: Vec<Attribute>,
    pub label: LabelSpec,
}

impl FeatureSchema {
    /// Build and validate a schema.
    pub fn new(attributes: Vec<Attribute>, label: LabelSpec) -> Result<Self> {
        let schema = Self { attributes, label };
        schema.validate()?;
        Ok(schema)
    }

    /// Check that the schema describes at least one feature and one class,
    /// and that every display name is non-empty.
    pub fn validate(&self) -> Result<()> {
        ModelShape::new(self.attributes.len(), self.label.classes.len())?;

        if let Some(index) = self.attributes.iter().position(|a| a.name.trim().is_empty()) {
            return Err(CatnbError::config(format!(
                "attribute {index} has an empty name"
            )));
        }
        if self.label.name.trim().is_empty() {
            return Err(CatnbError::config("label name is empty"));
        }
        Ok(())
    }

    pub fn shape(&self) -> ModelShape {
        ModelShape {
            feature_count: self.attributes.len(),
            class_count: self.label.classes.len(),
        }
    }

    pub fn feature_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn class_count(&self) -> usize {
        self.label.classes.len()
    }

    /// Display name of class `k`, if it exists.
    pub fn class_name(&self, class: usize) -> Option<&str> {
        self.label.classes.get(class).map(String::as_str)
    }

    /// Indices of query values that fall outside their attribute's domain.
    pub fn out_of_domain<S: AsRef<str>>(&self, query: &[S]) -> Vec<usize> {
        self.attributes
            .iter()
            .zip(query)
            .enumerate()
            .filter(|(_, (attribute, value))| !attribute.admits(value.as_ref()))
            .map(|(index, _)| index)
            .collect()
    }
}
