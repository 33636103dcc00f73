//! Inference: classify comments with a trained model and suggest replies.
//!
//! [`CommentClassifier`] is an immutable handle over the loaded artifacts.
//! Build it once and pass it by reference; single comments and batches go
//! through the same per-comment path.
//!
//! ```no_run
//! use retort::pipeline::CommentClassifier;
//!
//! # fn main() -> retort::error::Result<()> {
//! let classifier = CommentClassifier::load("models")?;
//! let result = classifier.classify_one("How do I install this on Windows?", true)?;
//! println!("{} -> {}", result.predicted_label, result.suggested_reply.unwrap_or(""));
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use crate::analysis::analyzer::CommentAnalyzer;
use crate::error::Result;
use crate::label::Label;
use crate::ml::artifact::ModelArtifacts;
use crate::pipeline::dataset::{read_comments, write_classifications};
use crate::pipeline::distribution::LabelDistribution;

/// Result for a single comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub original_comment: String,
    pub cleaned_comment: String,
    pub predicted_label: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_reply: Option<&'static str>,
}

/// A trained comment classifier.
#[derive(Debug)]
pub struct CommentClassifier {
    analyzer: CommentAnalyzer,
    artifacts: ModelArtifacts,
}

impl CommentClassifier {
    /// Wrap already fitted artifacts.
    pub fn new(artifacts: ModelArtifacts) -> Result<Self> {
        Ok(Self {
            analyzer: CommentAnalyzer::new()?,
            artifacts,
        })
    }

    /// Load the artifacts saved in `models_dir`.
    pub fn load<P: AsRef<Path>>(models_dir: P) -> Result<Self> {
        let models_dir = models_dir.as_ref();
        let artifacts = ModelArtifacts::load(models_dir)?;
        info!(
            "Loaded model from {} ({} terms, {} labels)",
            models_dir.display(),
            artifacts.vectorizer.vocabulary_size(),
            artifacts.classifier.classes().len()
        );
        Self::new(artifacts)
    }

    /// Classify each comment, in input order.
    pub fn classify(&self, comments: &[String], include_replies: bool) -> Result<Vec<Classification>> {
        comments
            .iter()
            .map(|comment| self.classify_one(comment, include_replies))
            .collect()
    }

    /// Classify one comment.
    pub fn classify_one(&self, comment: &str, include_replies: bool) -> Result<Classification> {
        let cleaned_comment = self.analyzer.clean(comment)?;
        let features = self.artifacts.vectorizer.transform(&cleaned_comment)?;
        let predicted_label = self.artifacts.classifier.predict(&features)?;

        Ok(Classification {
            original_comment: comment.to_string(),
            cleaned_comment,
            predicted_label,
            suggested_reply: include_replies.then(|| predicted_label.reply()),
        })
    }

    /// Classify the `comment` column of `input` and write the results to `output`.
    ///
    /// A missing `comment` column fails before `output` is touched.
    pub fn classify_csv<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        include_replies: bool,
    ) -> Result<Vec<Classification>> {
        let comments = read_comments(input.as_ref())?;
        let results = self.classify(&comments, include_replies)?;
        write_classifications(output.as_ref(), &results, include_replies)?;
        debug!(
            "Classified {} comments from {}",
            results.len(),
            input.as_ref().display()
        );
        Ok(results)
    }

    /// Labels this classifier can predict.
    pub fn classes(&self) -> &[Label] {
        self.artifacts.classifier.classes()
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }
}

/// Count predicted labels, in label order.
pub fn label_distribution(results: &[Classification]) -> LabelDistribution {
    LabelDistribution::from_labels(results.iter().map(|r| r.predicted_label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::logistic::LogisticRegression;
    use crate::ml::tfidf::TfIdfVectorizer;

    fn classifier() -> CommentClassifier {
        let documents: Vec<String> = [
            "great video love",
            "love great tutorial",
            "great love content",
            "kill find",
            "find kill hurt",
            "hurt kill find",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let labels = [
            Label::Praise,
            Label::Praise,
            Label::Praise,
            Label::Threat,
            Label::Threat,
            Label::Threat,
        ];

        let mut vectorizer = TfIdfVectorizer::default();
        let x = vectorizer.fit_transform(&documents).unwrap();
        let mut model = LogisticRegression::default();
        model.fit(&x, &labels, vectorizer.vocabulary_size()).unwrap();
        CommentClassifier::new(ModelArtifacts::new(vectorizer, model)).unwrap()
    }

    #[test]
    fn test_classify_one() {
        let classifier = classifier();
        let result = classifier.classify_one("I LOVE this great video!!!", true).unwrap();

        assert_eq!(result.original_comment, "I LOVE this great video!!!");
        assert_eq!(result.cleaned_comment, "love great video");
        assert_eq!(result.predicted_label, Label::Praise);
        assert_eq!(result.suggested_reply, Some(Label::Praise.reply()));

        let result = classifier.classify_one("I will find you", false).unwrap();
        assert_eq!(result.predicted_label, Label::Threat);
        assert_eq!(result.suggested_reply, None);
    }

    #[test]
    fn test_classify_batch_matches_single() {
        let classifier = classifier();
        let comments = vec![
            "great content".to_string(),
            String::new(),
            "kill".to_string(),
        ];

        let batch = classifier.classify(&comments, true).unwrap();
        assert_eq!(batch.len(), 3);
        for (comment, result) in comments.iter().zip(&batch) {
            assert_eq!(result, &classifier.classify_one(comment, true).unwrap());
            assert!(classifier.classes().contains(&result.predicted_label));
        }
    }

    #[test]
    fn test_label_distribution() {
        let classifier = classifier();
        let comments = vec![
            "great video".to_string(),
            "love it".to_string(),
            "kill".to_string(),
        ];
        let results = classifier.classify(&comments, false).unwrap();
        let distribution = label_distribution(&results);

        assert_eq!(distribution.total(), 3);
        assert_eq!(distribution.count(Label::Praise), 2);
        assert_eq!(distribution.count(Label::Threat), 1);
    }
}
