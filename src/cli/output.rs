//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{OutputFormat, RetortArgs};
use crate::error::Result;
use crate::ml::metrics::ClassificationReport;
use crate::pipeline::distribution::LabelDistribution;
use crate::pipeline::inference::Classification;
use crate::pipeline::training::DISTRIBUTION_CHART_TITLE;

/// Result structure for a training run.
#[derive(Debug, Serialize)]
pub struct TrainSummary {
    pub data_path: String,
    pub train_samples: usize,
    pub test_samples: usize,
    pub vocabulary_size: usize,
    pub iterations: Option<usize>,
    pub converged: Option<bool>,
    pub evaluation: ClassificationReport,
    pub distribution: LabelDistribution,
    pub distribution_output: String,
    pub artifacts: Vec<String>,
    pub duration_ms: u64,
}

/// Result structure for batch classification.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub input: String,
    pub output: String,
    pub comments_classified: usize,
    pub distribution: LabelDistribution,
    pub duration_ms: u64,
}

/// Result structure for classifying free text.
#[derive(Debug, Serialize)]
pub struct ClassifyResults {
    pub results: Vec<Classification>,
}

/// Results that know how to print themselves for humans.
pub trait HumanOutput {
    fn print_human(&self);
}

impl HumanOutput for TrainSummary {
    fn print_human(&self) {
        println!("Classification report:");
        println!("{}", self.evaluation);
        print!(
            "{}",
            self.distribution.render_chart(DISTRIBUTION_CHART_TITLE)
        );
        println!();
        println!(
            "Trained on {} comments, evaluated on {} ({} terms)",
            self.train_samples, self.test_samples, self.vocabulary_size
        );
        if let (Some(iterations), Some(converged)) = (self.iterations, self.converged) {
            let state = if converged { "converged" } else { "stopped" };
            println!("Optimizer {state} after {iterations} iterations");
        }
        println!("Saved distribution chart to {}", self.distribution_output);
        for path in &self.artifacts {
            println!("Saved {} to {path}", artifact_kind(path));
        }
    }
}

impl HumanOutput for BatchSummary {
    fn print_human(&self) {
        println!("Saved predictions to {}", self.output);
        println!();
        print!(
            "{}",
            self.distribution
                .render_chart("Label distribution in new comments")
        );
    }
}

impl HumanOutput for ClassifyResults {
    fn print_human(&self) {
        for (i, result) in self.results.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("Comment: {}", result.original_comment);
            println!("Label:   {}", result.predicted_label);
            if let Some(reply) = result.suggested_reply {
                println!("Reply:   {reply}");
            }
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &RetortArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &RetortArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    result.print_human();
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &RetortArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// "vectorizer" or "classifier", from an artifact file name.
fn artifact_kind(path: &str) -> &'static str {
    if path.ends_with(crate::ml::artifact::VECTORIZER_FILE) {
        "vectorizer"
    } else {
        "classifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_kind() {
        assert_eq!(artifact_kind("models/tfidf_vectorizer.bin"), "vectorizer");
        assert_eq!(artifact_kind("models/classifier.bin"), "classifier");
    }

    #[test]
    fn test_classify_results_json() {
        use crate::label::Label;

        let results = ClassifyResults {
            results: vec![Classification {
                original_comment: "Nice!".to_string(),
                cleaned_comment: "nice".to_string(),
                predicted_label: Label::Praise,
                suggested_reply: None,
            }],
        };
        let value = serde_json::to_value(&results).unwrap();
        let first = &value["results"][0];
        assert_eq!(first["predicted_label"], "praise");
        assert!(first.get("suggested_reply").is_none());
    }
}
