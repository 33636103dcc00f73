//! Command implementations for the Retort CLI.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::debug;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::RetortConfig;
use crate::error::Result;
use crate::pipeline::inference::{CommentClassifier, label_distribution};
use crate::pipeline::training::TrainingPipeline;

/// Execute a CLI command.
pub fn execute_command(args: RetortArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    match &args.command {
        Command::Train(train_args) => train(train_args.clone(), config, &args),
        Command::Batch(batch_args) => batch(batch_args.clone(), config, &args),
        Command::Classify(classify_args) => classify(classify_args.clone(), config, &args),
    }
}

/// Read the configuration file, or fall back to defaults.
fn load_config(path: Option<&Path>) -> Result<RetortConfig> {
    match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            RetortConfig::load_from_file(path)
        }
        None => Ok(RetortConfig::default()),
    }
}

/// Command line `--models-dir` wins over the configuration file.
fn models_dir(config: &RetortConfig, overridden: Option<&PathBuf>) -> PathBuf {
    overridden
        .cloned()
        .unwrap_or_else(|| config.models_dir.clone())
}

/// Train the classifier and write artifacts plus the distribution chart.
fn train(args: TrainArgs, mut config: RetortConfig, cli_args: &RetortArgs) -> Result<()> {
    config.models_dir = models_dir(&config, args.models_dir.as_ref());

    if cli_args.verbosity() > 1 {
        println!("Training from: {}", args.data.display());
        println!("Models directory: {}", config.models_dir.display());
    }

    let start_time = Instant::now();
    let outcome = TrainingPipeline::new(config)
        .with_distribution_output(&args.distribution_output)
        .run(&args.data)?;
    let report = outcome.report;

    let result = TrainSummary {
        data_path: args.data.display().to_string(),
        train_samples: report.train_samples,
        test_samples: report.test_samples,
        vocabulary_size: report.vocabulary_size,
        iterations: report.stats.as_ref().map(|s| s.iterations),
        converged: report.stats.as_ref().map(|s| s.converged),
        evaluation: report.evaluation,
        distribution: report.distribution,
        distribution_output: args.distribution_output.display().to_string(),
        artifacts: outcome
            .artifact_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    output_result("Training completed", &result, cli_args)
}

/// Classify a CSV of comments.
fn batch(args: BatchArgs, config: RetortConfig, cli_args: &RetortArgs) -> Result<()> {
    let models_dir = models_dir(&config, args.models_dir.as_ref());

    if cli_args.verbosity() > 1 {
        println!("Classifying: {}", args.input.display());
        println!("Models directory: {}", models_dir.display());
    }

    let start_time = Instant::now();
    let classifier = CommentClassifier::load(&models_dir)?;
    let results = classifier.classify_csv(&args.input, &args.output, args.include_replies())?;

    let result = BatchSummary {
        input: args.input.display().to_string(),
        output: args.output.display().to_string(),
        comments_classified: results.len(),
        distribution: label_distribution(&results),
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    output_result("Batch classification completed", &result, cli_args)
}

/// Classify comments passed as arguments.
fn classify(args: ClassifyArgs, config: RetortConfig, cli_args: &RetortArgs) -> Result<()> {
    let models_dir = models_dir(&config, args.models_dir.as_ref());
    let classifier = CommentClassifier::load(&models_dir)?;
    let results = classifier.classify(&args.comments, !args.no_replies)?;

    output_result(
        "Classification completed",
        &ClassifyResults { results },
        cli_args,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_dir_override() {
        let config = RetortConfig::default();
        assert_eq!(models_dir(&config, None), PathBuf::from("models"));

        let custom = PathBuf::from("/tmp/custom");
        assert_eq!(models_dir(&config, Some(&custom)), custom);
    }

    #[test]
    fn test_load_config_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config, RetortConfig::default());
    }
}
