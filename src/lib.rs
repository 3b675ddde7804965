//! # catnb
//!
//! Categorical Naive Bayes classification with Laplacian smoothing.
//!
//! ## Features
//!
//! - Joint frequency counts by exact value matching
//! - Add-one smoothing of every joint count
//! - Rescan or histogram-indexed estimation behind one trait
//! - Reloadable training snapshots safe to share across threads
//! - JSON model definitions and delimited training files
//!
//! ```rust
//! use catnb::prelude::*;
//!
//! # fn main() -> catnb::error::Result<()> {
//! let training = TrainingSet::new(
//!     ModelShape::new(1, 2)?,
//!     vec![TrainingRow::new(&["a"], 0), TrainingRow::new(&["b"], 1)],
//! )?;
//! let result = catnb::model::classify(&training, &["a"])?;
//! assert_eq!(result.predicted_class(), 0);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod schema;

pub mod prelude {
    pub use crate::config::{EstimatorKind, ModelConfig};
    pub use crate::dataset::{DelimitedLoader, LoaderConfig, TrainingRow, TrainingSet};
    pub use crate::error::{CatnbError, Result};
    pub use crate::model::{
        ClassificationResult, ClassifierConfig, FrequencyEstimator, FrequencyIndex,
        NaiveBayesClassifier,
    };
    pub use crate::schema::{Attribute, FeatureSchema, LabelSpec, ModelShape};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
