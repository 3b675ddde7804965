//! Command line argument parsing for the catnb CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::EstimatorKind;

/// catnb - categorical Naive Bayes classification
#[derive(Parser, Debug, Clone)]
#[command(name = "catnb")]
#[command(about = "Categorical Naive Bayes classification with Laplacian smoothing")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct CatnbArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl CatnbArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the model's attributes, value domains and classes
    Info(InfoArgs),

    /// Classify one query, or every query in a file
    Classify(ClassifyArgs),

    /// Prompt for attribute values and classify until told to stop
    Interactive(InteractiveArgs),
}

/// Arguments for showing model information
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Model configuration file (JSON)
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,
}

/// Arguments for classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Model configuration file (JSON)
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Training data file (delimited text)
    #[arg(value_name = "DATA_FILE")]
    pub data: PathBuf,

    /// Feature values to classify, one per attribute (comma-separated or separate args)
    #[arg(value_name = "VALUES", value_delimiter = ',', required_unless_present = "queries")]
    pub values: Vec<String>,

    /// File of queries to classify, one per line, same delimiter as the training data
    #[arg(long, value_name = "QUERY_FILE", conflicts_with = "values")]
    pub queries: Option<PathBuf>,

    /// Override the estimator configured in the model file
    #[arg(short, long)]
    pub estimator: Option<EstimatorKind>,
}

/// Arguments for interactive classification
#[derive(Parser, Debug, Clone)]
pub struct InteractiveArgs {
    /// Model configuration file (JSON)
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Training data file (delimited text)
    #[arg(value_name = "DATA_FILE")]
    pub data: PathBuf,

    /// Override the estimator configured in the model file
    #[arg(short, long)]
    pub estimator: Option<EstimatorKind>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
