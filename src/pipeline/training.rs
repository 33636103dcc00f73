//! Offline training of the comment classifier.
//!
//! The pipeline runs strictly in order and aborts on the first error:
//!
//! 1. Load labeled comments from CSV
//! 2. Clean every comment
//! 3. Split into train/test, stratified by label
//! 4. Fit the TF-IDF vectorizer on the training side
//! 5. Fit the logistic regression on the training side
//! 6. Evaluate on the test side
//! 7. Write the label distribution chart, if requested
//! 8. Persist both artifacts
//!
//! Nothing is written until every earlier step has succeeded, and the chart
//! goes out before the artifacts so a failed run never leaves a new model.

use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::analysis::normalizer::clean_all;
use crate::config::RetortConfig;
use crate::error::Result;
use crate::label::Label;
use crate::ml::artifact::ModelArtifacts;
use crate::ml::logistic::{LogisticRegression, TrainingStats};
use crate::ml::metrics::ClassificationReport;
use crate::ml::split::stratified_split;
use crate::ml::tfidf::TfIdfVectorizer;
use crate::pipeline::dataset::{LabeledComment, read_labeled_comments};
use crate::pipeline::distribution::LabelDistribution;

/// Summary of a training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    /// Evaluation on the held-out split.
    pub evaluation: ClassificationReport,
    /// Label counts over the whole dataset.
    pub distribution: LabelDistribution,
    pub train_samples: usize,
    pub test_samples: usize,
    pub vocabulary_size: usize,
    pub stats: Option<TrainingStats>,
}

/// Everything a completed [`TrainingPipeline::run`] produced.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub artifacts: ModelArtifacts,
    pub report: TrainingReport,
    /// Files the artifacts were written to.
    pub artifact_paths: Vec<PathBuf>,
}

/// Title of the dataset label distribution chart.
pub const DISTRIBUTION_CHART_TITLE: &str = "Label distribution in dataset";

/// Trains a vectorizer and classifier from labeled comments.
#[derive(Debug, Clone, Default)]
pub struct TrainingPipeline {
    config: RetortConfig,
    distribution_output: Option<PathBuf>,
}

impl TrainingPipeline {
    pub fn new(config: RetortConfig) -> Self {
        Self {
            config,
            distribution_output: None,
        }
    }

    /// Also write the dataset's label distribution chart to `path` during [`run`](Self::run).
    pub fn with_distribution_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.distribution_output = Some(path.into());
        self
    }

    pub fn config(&self) -> &RetortConfig {
        &self.config
    }

    /// Load `data_path`, train, evaluate and save into the configured models directory.
    pub fn run<P: AsRef<Path>>(&self, data_path: P) -> Result<TrainingOutcome> {
        let data_path = data_path.as_ref();
        info!("Loading labeled comments from {}", data_path.display());
        let rows = read_labeled_comments(data_path)?;

        let (artifacts, report) = self.train(&rows)?;

        if let Some(path) = &self.distribution_output {
            info!("Writing label distribution to {}", path.display());
            report
                .distribution
                .write_chart(path, DISTRIBUTION_CHART_TITLE)?;
        }

        let models_dir = &self.config.models_dir;
        info!("Saving model artifacts to {}", models_dir.display());
        artifacts.save(models_dir)?;

        Ok(TrainingOutcome {
            artifacts,
            report,
            artifact_paths: ModelArtifacts::paths(models_dir).to_vec(),
        })
    }

    /// Train and evaluate on in-memory rows without touching the filesystem.
    pub fn train(&self, rows: &[LabeledComment]) -> Result<(ModelArtifacts, TrainingReport)> {
        self.config.validate()?;

        info!("Cleaning {} comments", rows.len());
        let cleaned = clean_all(rows.iter().map(|row| row.comment.as_str()));
        let labels: Vec<Label> = rows.iter().map(|row| row.label).collect();
        let distribution = LabelDistribution::from_labels(labels.iter().copied());

        let training = &self.config.training;
        info!(
            "Splitting dataset (test_size {}, seed {})",
            training.test_size, training.seed
        );
        let split = stratified_split(&labels, training.test_size, training.seed)?;
        let (train_text, test_text) = split.select(&cleaned);
        let (train_labels, test_labels) = split.select(&labels);

        info!("Fitting TF-IDF vectorizer on {} comments", train_text.len());
        let mut vectorizer = TfIdfVectorizer::new(&self.config.vectorizer);
        let x_train = vectorizer.fit_transform(&train_text)?;
        let x_test = vectorizer.transform_all(&test_text)?;

        info!(
            "Fitting logistic regression on {} features",
            vectorizer.vocabulary_size()
        );
        let mut classifier = LogisticRegression::new(&self.config.classifier);
        classifier.fit(&x_train, &train_labels, vectorizer.vocabulary_size())?;

        info!("Evaluating on {} held-out comments", test_text.len());
        let predictions = classifier.predict_all(&x_test)?;
        let evaluation = ClassificationReport::new(&test_labels, &predictions)?;

        let metrics = &mut classifier.metadata_mut().validation_metrics;
        metrics.insert("accuracy".to_string(), evaluation.accuracy);
        metrics.insert("macro_f1".to_string(), evaluation.macro_avg.f1);
        metrics.insert("weighted_f1".to_string(), evaluation.weighted_avg.f1);

        let report = TrainingReport {
            evaluation,
            distribution,
            train_samples: train_text.len(),
            test_samples: test_text.len(),
            vocabulary_size: vectorizer.vocabulary_size(),
            stats: classifier.training_stats().cloned(),
        };

        Ok((ModelArtifacts::new(vectorizer, classifier), report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RetortError;
    use crate::ml::artifact::{CLASSIFIER_FILE, VECTORIZER_FILE};
    use std::fs;
    use tempfile::TempDir;

    fn rows() -> Vec<LabeledComment> {
        let praise = [
            "Great video, loved it",
            "This tutorial is great",
            "Loved the editing, great job",
            "Amazing video, great work",
            "Great explanation, loved the video",
        ];
        let threat = [
            "I will find you and hurt you",
            "Watch your back, I will find you",
            "You will regret this, I will hurt you",
            "I know where you live, watch your back",
            "I will hurt you if you post again",
        ];
        praise
            .iter()
            .map(|c| LabeledComment::new(*c, Label::Praise))
            .chain(threat.iter().map(|c| LabeledComment::new(*c, Label::Threat)))
            .collect()
    }

    #[test]
    fn test_train_in_memory() {
        let pipeline = TrainingPipeline::default();
        let (artifacts, report) = pipeline.train(&rows()).unwrap();

        assert_eq!(report.train_samples, 8);
        assert_eq!(report.test_samples, 2);
        assert_eq!(report.distribution.count(Label::Praise), 5);
        assert_eq!(report.evaluation.total, 2);
        assert_eq!(report.vocabulary_size, artifacts.vectorizer.vocabulary_size());
        assert_eq!(
            artifacts.classifier.classes(),
            &[Label::Praise, Label::Threat]
        );
        assert!(
            artifacts
                .classifier
                .metadata()
                .validation_metrics
                .contains_key("accuracy")
        );
    }

    #[test]
    fn test_train_rejects_invalid_config() {
        let mut config = RetortConfig::default();
        config.training.test_size = 0.0;
        let result = TrainingPipeline::new(config).train(&rows());
        assert!(matches!(result, Err(RetortError::Config(_))));
    }

    #[test]
    fn test_train_rejects_singleton_label() {
        let mut rows = rows();
        rows.push(LabeledComment::new("buy followers now", Label::SpamIrrelevant));
        assert!(TrainingPipeline::default().train(&rows).is_err());
    }

    fn write_rows(path: &Path) {
        let mut csv = String::from("comment,label\n");
        for row in rows() {
            csv.push_str(&format!("{},{}\n", row.comment.replace(',', ""), row.label));
        }
        fs::write(path, csv).unwrap();
    }

    #[test]
    fn test_run_writes_chart_and_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        let data = temp_dir.path().join("labeled.csv");
        write_rows(&data);
        let chart = temp_dir.path().join("reports").join("distribution.txt");
        let config = RetortConfig {
            models_dir: temp_dir.path().join("models"),
            ..RetortConfig::default()
        };

        let outcome = TrainingPipeline::new(config)
            .with_distribution_output(&chart)
            .run(&data)
            .unwrap();

        let written = fs::read_to_string(&chart).unwrap();
        assert_eq!(
            written,
            outcome.report.distribution.render_chart(DISTRIBUTION_CHART_TITLE)
        );
        for path in &outcome.artifact_paths {
            assert!(path.exists());
        }
    }

    #[test]
    fn test_failed_chart_write_leaves_no_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        let data = temp_dir.path().join("labeled.csv");
        write_rows(&data);
        let blocker = temp_dir.path().join("not_a_dir");
        fs::write(&blocker, "").unwrap();
        let models_dir = temp_dir.path().join("models");
        let config = RetortConfig {
            models_dir: models_dir.clone(),
            ..RetortConfig::default()
        };

        let result = TrainingPipeline::new(config)
            .with_distribution_output(blocker.join("distribution.txt"))
            .run(&data);

        assert!(matches!(result, Err(RetortError::Io(_))));
        assert!(!models_dir.join(VECTORIZER_FILE).exists());
        assert!(!models_dir.join(CLASSIFIER_FILE).exists());
    }
}
