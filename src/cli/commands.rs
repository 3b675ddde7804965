//! Command implementations for the catnb CLI.

use std::io::{self, BufRead, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{EstimatorKind, ModelConfig};
use crate::dataset::DelimitedLoader;
use crate::error::Result;
use crate::model::NaiveBayesClassifier;

/// Execute a CLI command against the process's stdin and stdout.
pub fn execute_command(args: CatnbArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();
    execute_command_with(&args, &mut input, &mut out)
}

/// Execute a CLI command with explicit input and output streams.
pub fn execute_command_with(
    args: &CatnbArgs,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    match &args.command {
        Command::Info(info_args) => show_info(info_args, args, out),
        Command::Classify(classify_args) => classify(classify_args, args, out),
        Command::Interactive(interactive_args) => {
            run_interactive(interactive_args, args, input, out)
        }
    }
}

/// Show model information.
fn show_info(args: &InfoArgs, cli_args: &CatnbArgs, out: &mut dyn Write) -> Result<()> {
    let config = ModelConfig::from_path(&args.model)?;
    debug!("Loaded model configuration from {}", args.model.display());

    output_result(
        out,
        "Model information",
        &ModelInfoReport::new(&config, None),
        cli_args,
    )
}

/// Classify values given on the command line, or every query in a file.
fn classify(args: &ClassifyArgs, cli_args: &CatnbArgs, out: &mut dyn Write) -> Result<()> {
    let (config, classifier) = open_classifier(&args.model, &args.data, args.estimator)?;
    let schema = classifier.schema();

    if let Some(path) = &args.queries {
        let loader = DelimitedLoader::from_config(schema.shape(), &config.loader)?;
        let queries = loader.load_queries_path(path)?;
        info!("Classifying {} queries from {}", queries.len(), path.display());
        for query in &queries {
            warn_out_of_domain(&config, query);
        }

        let results = classifier.classify_batch(&queries)?;
        let report = BatchReport {
            results: results
                .iter()
                .map(|result| ClassificationReport::new(result, schema))
                .collect(),
        };
        return output_result(out, "Batch classification", &report, cli_args);
    }

    // same whitespace handling as the training fields
    let values: Vec<String> = args
        .values
        .iter()
        .map(|value| {
            if config.loader.trim {
                value.trim().to_string()
            } else {
                value.clone()
            }
        })
        .collect();
    warn_out_of_domain(&config, &values);
    let result = classifier.classify(&values)?;
    output_result(
        out,
        "Classification",
        &ClassificationReport::new(&result, schema),
        cli_args,
    )
}

/// Prompt for one value per attribute and classify, until an empty line,
/// `quit`, or end of input.
fn run_interactive(
    args: &InteractiveArgs,
    cli_args: &CatnbArgs,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let (config, classifier) = open_classifier(&args.model, &args.data, args.estimator)?;

    output_result(
        out,
        "Model information",
        &ModelInfoReport::new(&config, classifier.training_size()),
        cli_args,
    )?;

    let mut stderr = io::stderr();
    loop {
        let prompts = prompt_stream(cli_args, &mut *out, &mut stderr);
        writeln!(prompts)?;
        writeln!(prompts, "Enter a value for each attribute (empty line or 'quit' to stop)")?;

        let Some(query) = prompt_query(&config, input, prompts)? else {
            break;
        };
        warn_out_of_domain(&config, &query);

        // a bad query ends this round, not the session
        match classifier.classify(&query) {
            Ok(result) => output_result(
                out,
                "Classification",
                &ClassificationReport::new(&result, classifier.schema()),
                cli_args,
            )?,
            Err(e) => writeln!(prompt_stream(cli_args, &mut *out, &mut stderr), "Error: {e}")?,
        }
    }

    Ok(())
}

/// Where prompts go: stdout for human output, stderr when stdout carries JSON.
fn prompt_stream<'a>(
    cli_args: &CatnbArgs,
    out: &'a mut dyn Write,
    stderr: &'a mut io::Stderr,
) -> &'a mut dyn Write {
    match cli_args.output_format {
        OutputFormat::Human => out,
        OutputFormat::Json => stderr,
    }
}

/// Read one query; `None` when the user stops.
fn prompt_query(
    config: &ModelConfig,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<Option<Vec<String>>> {
    let mut query = Vec::with_capacity(config.attributes.len());

    for attribute in &config.attributes {
        if attribute.values.is_empty() {
            write!(out, "{}: ", attribute.name)?;
        } else {
            write!(out, "{} [{}]: ", attribute.name, attribute.values.join("/"))?;
        }
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let value = line.trim();
        if value.is_empty()
            || value.eq_ignore_ascii_case("quit")
            || value.eq_ignore_ascii_case("exit")
        {
            return Ok(None);
        }
        query.push(value.to_string());
    }

    Ok(Some(query))
}

/// Load the model configuration and its training data.
fn open_classifier(
    model: &Path,
    data: &Path,
    estimator: Option<EstimatorKind>,
) -> Result<(ModelConfig, NaiveBayesClassifier)> {
    let mut config = ModelConfig::from_path(model)?;
    if let Some(estimator) = estimator {
        config.estimator = estimator;
    }
    debug!(
        "Model '{}' with {} attributes, estimator {:?}",
        config.name,
        config.attributes.len(),
        config.estimator
    );

    let classifier = NaiveBayesClassifier::from_model_config(&config)?;
    classifier.load_training_data(data)?;
    Ok((config, classifier))
}

fn warn_out_of_domain(config: &ModelConfig, query: &[String]) {
    for index in config.schema().out_of_domain(query) {
        warn!(
            "Value '{}' is not listed for attribute '{}'",
            query[index], config.attributes[index].name
        );
    }
}
