//! Model configuration files.
//!
//! A model is described by a JSON document naming its attributes, their value
//! domains, the class labels and how training files are read:
//!
//! ```json
//! {
//!   "name": "Food Storage Freshness Prediction Model",
//!   "attributes": [
//!     { "name": "Storage Location", "values": ["fridge", "freezer", "pantry", "left_outside"] },
//!     { "name": "Storage Duration", "values": ["short", "medium", "long", "very_long"] }
//!   ],
//!   "label": { "name": "Freshness Status", "classes": ["spoiled", "fresh"] },
//!   "loader": { "delimiter": ",", "trim": true, "has_headers": false },
//!   "estimator": "indexed"
//! }
//! ```

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::dataset::LoaderConfig;
use crate::error::{CatnbError, Result};
use crate::model::ClassifierConfig;
use crate::schema::{Attribute, FeatureSchema, LabelSpec};

/// Strategy used to produce joint counts.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorKind {
    /// Rescan every training row per query
    Rescan,
    /// Look up histograms built at load time
    #[default]
    Indexed,
}

/// A model definition as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Title shown in model reports.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Predictor slots, in column order.
    pub attributes: Vec<Attribute>,
    /// The predicted variable.
    pub label: LabelSpec,
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub estimator: EstimatorKind,
}

impl ModelConfig {
    /// Read and validate a model configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse and validate a model configuration.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: ModelConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CatnbError::config("model name is empty"));
        }
        if !self.loader.delimiter.is_ascii() {
            return Err(CatnbError::config(format!(
                "delimiter '{}' is not an ASCII character",
                self.loader.delimiter
            )));
        }
        self.schema().validate()
    }

    pub fn schema(&self) -> FeatureSchema {
        FeatureSchema {
            attributes: self.attributes.clone(),
            label: self.label.clone(),
        }
    }

    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            estimator: self.estimator,
            loader: self.loader.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
