//! Output formatting for CLI commands.
//!
//! Reports are plain serializable structs built from the library types. They
//! render either as human-readable text or as JSON, into any writer.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::{CatnbArgs, OutputFormat};
use crate::config::{EstimatorKind, ModelConfig};
use crate::error::Result;
use crate::model::ClassificationResult;
use crate::schema::{Attribute, FeatureSchema};

/// Human-readable rendering of a report.
pub trait HumanReport {
    fn write_human(&self, out: &mut dyn Write) -> Result<()>;
}

/// Model description shown by `info` and at the start of interactive sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub feature_count: usize,
    pub class_count: usize,
    pub attributes: Vec<Attribute>,
    pub label: String,
    pub classes: Vec<String>,
    pub estimator: EstimatorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_rows: Option<usize>,
}

impl ModelInfoReport {
    pub fn new(config: &ModelConfig, training_rows: Option<usize>) -> Self {
        let schema = config.schema();
        Self {
            name: config.name.clone(),
            description: config.description.clone(),
            feature_count: schema.feature_count(),
            class_count: schema.class_count(),
            attributes: config.attributes.clone(),
            label: config.label.name.clone(),
            classes: config.label.classes.clone(),
            estimator: config.estimator,
            training_rows,
        }
    }
}

impl HumanReport for ModelInfoReport {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", self.name)?;
        writeln!(out, "{}", "═".repeat(self.name.chars().count()))?;
        if let Some(description) = &self.description {
            writeln!(out, "{description}")?;
        }
        writeln!(out)?;
        writeln!(out, "Number of predictor variables: {}", self.feature_count)?;
        writeln!(out, "Number of classes: {}", self.class_count)?;
        if let Some(rows) = self.training_rows {
            writeln!(out, "Training rows: {rows}")?;
        }
        writeln!(out)?;

        writeln!(out, "Attributes:")?;
        for (index, attribute) in self.attributes.iter().enumerate() {
            if attribute.values.is_empty() {
                writeln!(out, "  [{index}] {}", attribute.name)?;
            } else {
                writeln!(
                    out,
                    "  [{index}] {}: {}",
                    attribute.name,
                    attribute.values.join(", ")
                )?;
            }
        }
        writeln!(out)?;

        writeln!(out, "Label: {}", self.label)?;
        for (class, name) in self.classes.iter().enumerate() {
            writeln!(out, "  {class} = {name}")?;
        }
        Ok(())
    }
}

/// Joint counts of one attribute, before and after smoothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JointCountRow {
    pub attribute: String,
    pub value: String,
    pub before_smoothing: Vec<usize>,
    pub after_smoothing: Vec<usize>,
}

/// Full breakdown of one classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub input: Vec<String>,
    pub joint_counts: Vec<JointCountRow>,
    pub class_counts: Vec<usize>,
    pub scores: Vec<f64>,
    pub probabilities: Vec<f64>,
    pub predicted_class: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_label: Option<String>,
    pub confidence: f64,
}

impl ClassificationReport {
    pub fn new(result: &ClassificationResult, schema: &FeatureSchema) -> Self {
        let joint_counts = result
            .query()
            .iter()
            .enumerate()
            .map(|(feature, value)| JointCountRow {
                attribute: schema
                    .attributes
                    .get(feature)
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| format!("feature {feature}")),
                value: value.clone(),
                before_smoothing: result.raw_joint_counts().row(feature).to_vec(),
                after_smoothing: result.joint_counts().row(feature).to_vec(),
            })
            .collect();

        Self {
            input: result.query().to_vec(),
            joint_counts,
            class_counts: result.class_counts().to_vec(),
            scores: result.scores().to_vec(),
            probabilities: result.probabilities().to_vec(),
            predicted_class: result.predicted_class(),
            predicted_label: schema
                .class_name(result.predicted_class())
                .map(str::to_string),
            confidence: result.confidence(),
        }
    }
}

impl HumanReport for ClassificationReport {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Classification Results")?;
        writeln!(out, "══════════════════════")?;
        writeln!(out, "Input to classify: {}", self.input.join(" "))?;
        writeln!(out)?;

        writeln!(out, "Joint counts BEFORE Laplacian smoothing:")?;
        for row in &self.joint_counts {
            writeln!(
                out,
                "  {} = {}: {}",
                row.attribute,
                row.value,
                join_counts(&row.before_smoothing)
            )?;
        }
        writeln!(out, "Joint counts AFTER Laplacian smoothing:")?;
        for row in &self.joint_counts {
            writeln!(
                out,
                "  {} = {}: {}",
                row.attribute,
                row.value,
                join_counts(&row.after_smoothing)
            )?;
        }
        writeln!(out)?;

        writeln!(out, "Class counts: {}", join_counts(&self.class_counts))?;
        writeln!(
            out,
            "Evidence terms: {}",
            join_floats(&self.scores, |v| format!("{v:.4e}"))
        )?;
        writeln!(
            out,
            "Probabilities: {}",
            join_floats(&self.probabilities, |v| format!("{v:.4}"))
        )?;
        writeln!(out)?;

        match &self.predicted_label {
            Some(label) => writeln!(out, "Predicted class: {} ({label})", self.predicted_class)?,
            None => writeln!(out, "Predicted class: {}", self.predicted_class)?,
        }
        writeln!(out, "Confidence: {:.4}", self.confidence)?;
        Ok(())
    }
}

/// Several classifications, in query order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<ClassificationReport>,
}

impl HumanReport for BatchReport {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        for (index, report) in self.results.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            writeln!(out, "Query {}", index + 1)?;
            report.write_human(out)?;
        }
        Ok(())
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanReport>(
    out: &mut dyn Write,
    message: &str,
    result: &T,
    args: &CatnbArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(out, message, result, args),
        OutputFormat::Json => output_json(out, result, args.pretty),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanReport>(
    out: &mut dyn Write,
    message: &str,
    result: &T,
    args: &CatnbArgs,
) -> Result<()> {
    if args.verbosity() > 1 && !message.is_empty() {
        writeln!(out, "{message}")?;
        writeln!(out)?;
    }
    result.write_human(out)
}

/// Output in JSON format.
fn output_json<T: Serialize>(out: &mut dyn Write, result: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    writeln!(out, "{json}")?;
    Ok(())
}

fn join_counts(counts: &[usize]) -> String {
    counts
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_floats(values: &[f64], format: impl Fn(f64) -> String) -> String {
    values
        .iter()
        .map(|&v| format(v))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{TrainingRow, TrainingSet};
    use crate::model;
    use clap::Parser;

    fn config() -> ModelConfig {
        ModelConfig::from_json_str(
            r#"{
                "name": "Toy Prediction Model",
                "attributes": [
                    { "name": "First", "values": ["a", "b"] },
                    { "name": "Second", "values": ["x", "y"] },
                    { "name": "Third" }
                ],
                "label": { "name": "Outcome", "classes": ["low", "high"] }
            }"#,
        )
        .unwrap()
    }

    fn result() -> ClassificationResult {
        let training = TrainingSet::new(
            config().schema().shape(),
            vec![
                TrainingRow::new(&["a", "x", "p"], 0),
                TrainingRow::new(&["a", "y", "p"], 1),
                TrainingRow::new(&["b", "x", "q"], 1),
            ],
        )
        .unwrap();
        model::classify(&training, &["a", "x", "p"]).unwrap()
    }

    fn render<T: Serialize + HumanReport>(report: &T, argv: &[&str]) -> String {
        let args = CatnbArgs::try_parse_from(argv.iter().copied()).unwrap();
        let mut out = Vec::new();
        output_result(&mut out, "", report, &args).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_model_info_human() {
        let report = ModelInfoReport::new(&config(), Some(3));
        let text = render(&report, &["catnb", "info", "m.json"]);

        assert!(text.contains("Toy Prediction Model"));
        assert!(text.contains("Number of predictor variables: 3"));
        assert!(text.contains("[0] First: a, b"));
        assert!(text.contains("[2] Third\n"));
        assert!(text.contains("1 = high"));
        assert!(text.contains("Training rows: 3"));
    }

    #[test]
    fn test_classification_human() {
        let report = ClassificationReport::new(&result(), &config().schema());
        let text = render(&report, &["catnb", "info", "m.json"]);

        assert!(text.contains("Classification Results"));
        assert!(text.contains("Input to classify: a x p"));
        assert!(text.contains("First = a: 1 1"));
        assert!(text.contains("First = a: 2 2"));
        assert!(text.contains("Class counts: 1 2"));
        assert!(text.contains("Probabilities: 0.4941 0.5059"));
        assert!(text.contains("Predicted class: 1 (high)"));
    }

    #[test]
    fn test_classification_json() {
        let report = ClassificationReport::new(&result(), &config().schema());
        let text = render(&report, &["catnb", "--format", "json", "info", "m.json"]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["predicted_class"], 1);
        assert_eq!(value["predicted_label"], "high");
        assert_eq!(value["joint_counts"][1]["attribute"], "Second");
        assert_eq!(value["joint_counts"][1]["after_smoothing"][0], 2);
        assert_eq!(value["class_counts"][1], 2);
    }

    #[test]
    fn test_batch_human() {
        let report = BatchReport {
            results: vec![
                ClassificationReport::new(&result(), &config().schema()),
                ClassificationReport::new(&result(), &config().schema()),
            ],
        };
        let text = render(&report, &["catnb", "info", "m.json"]);

        assert!(text.contains("Query 1"));
        assert!(text.contains("Query 2"));
        assert_eq!(text.matches("Classification Results").count(), 2);
    }
}
