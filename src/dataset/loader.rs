//! Delimited text loader for training data.
//!
//! Each record holds the F feature values followed by the integer class label:
//! ```text
//! expert,excellent,excellent,exceptional,1
//! beginner,poor,poor,weak,0
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

use crate::dataset::{TrainingRow, TrainingSet};
use crate::error::{CatnbError, Result};
use crate::schema::ModelShape;

/// Options for reading delimited training data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Field delimiter (default: ',').
    pub delimiter: char,
    /// Whether to trim whitespace around every field.
    pub trim: bool,
    /// Whether the first record is a header row to skip.
    pub has_headers: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            trim: true,
            has_headers: false,
        }
    }
}

/// Reads [`TrainingSet`]s from delimited text.
#[derive(Debug, Clone)]
pub struct DelimitedLoader {
    shape: ModelShape,
    delimiter: u8,
    trim: bool,
    has_headers: bool,
}

impl DelimitedLoader {
    /// Create a loader with default options for the given model shape.
    pub fn new(shape: ModelShape) -> Self {
        DelimitedLoader {
            shape,
            delimiter: b',',
            trim: true,
            has_headers: false,
        }
    }

    /// Create a loader from a [`LoaderConfig`]. The delimiter must be ASCII.
    pub fn from_config(shape: ModelShape, config: &LoaderConfig) -> Result<Self> {
        Ok(Self::new(shape)
            .with_delimiter(config.delimiter)?
            .with_trim(config.trim)
            .with_headers(config.has_headers))
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() {
            return Err(CatnbError::config(format!(
                "delimiter '{delimiter}' is not an ASCII character"
            )));
        }
        self.delimiter = delimiter as u8;
        Ok(self)
    }

    /// Set whether to trim whitespace from fields.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set whether the first record is a header.
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn shape(&self) -> ModelShape {
        self.shape
    }

    /// Load a training set from a file.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<TrainingSet> {
        let file = File::open(path.as_ref())?;
        self.load_reader(file)
    }

    /// Load a training set from in-memory text.
    pub fn load_str(&self, input: &str) -> Result<TrainingSet> {
        self.load_reader(input.as_bytes())
    }

    /// Load a training set from any reader.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<TrainingSet> {
        let mut reader = self.csv_reader(reader);

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            rows.push(self.parse_record(index + 1, &record)?);
        }

        TrainingSet::new(self.shape, rows)
    }

    /// Read unlabeled queries, one per record, with the same options.
    ///
    /// Record lengths are not checked here; a query of the wrong length is
    /// rejected when it is classified.
    pub fn load_queries<R: Read>(&self, reader: R) -> Result<Vec<Vec<String>>> {
        let mut reader = self.csv_reader(reader);

        let mut queries = Vec::new();
        for record in reader.records() {
            let record = record?;
            queries.push(record.iter().map(str::to_string).collect());
        }
        Ok(queries)
    }

    /// Read unlabeled queries from a file.
    pub fn load_queries_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Vec<String>>> {
        let file = File::open(path.as_ref())?;
        self.load_queries(file)
    }

    // record lengths are checked by the callers, not by csv
    fn csv_reader<R: Read>(&self, reader: R) -> Reader<R> {
        ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .has_headers(self.has_headers)
            .flexible(true)
            .from_reader(reader)
    }

    /// Convert one record into a row; `number` is 1-based for messages.
    fn parse_record(&self, number: usize, record: &StringRecord) -> Result<TrainingRow> {
        let expected = self.shape.feature_count + 1;
        if record.len() != expected {
            return Err(CatnbError::schema_mismatch(
                format!("record {number}"),
                expected,
                record.len(),
            ));
        }

        let label_field = &record[self.shape.feature_count];
        let label: i64 = label_field.parse().map_err(|_| {
            CatnbError::parse(format!(
                "record {number}: label '{label_field}' is not an integer"
            ))
        })?;
        if !self.shape.admits_label(label) {
            return Err(CatnbError::invalid_label(label, self.shape.class_count));
        }

        let features = record
            .iter()
            .take(self.shape.feature_count)
            .map(str::to_string)
            .collect();

        Ok(TrainingRow {
            features,
            label: label as usize,
        })
    }
}
