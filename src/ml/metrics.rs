//! Classification metrics for evaluating the comment classifier.
//!
//! [`ClassificationReport`] computes per-label precision, recall, F1 and
//! support plus accuracy and macro / weighted averages. Its `Display`
//! renders the familiar tabular report:
//!
//! ```text
//!                         precision    recall  f1-score   support
//!
//!                  praise       1.00      0.50      0.67         2
//!                  threat       0.67      1.00      0.80         2
//!
//!                accuracy                           0.75         4
//!               macro avg       0.83      0.75      0.73         4
//!            weighted avg       0.83      0.75      0.73         4
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::label::Label;
use crate::ml::MLError;

/// Precision, recall, F1 and support for a single label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMetrics {
    pub label: Label,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true instances of the label.
    pub support: usize,
}

/// Averaged precision, recall and F1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-label and aggregate classification metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// One entry per label present in either the truth or the predictions, sorted.
    pub labels: Vec<LabelMetrics>,
    pub accuracy: f64,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
    pub total: usize,
}

impl ClassificationReport {
    /// Build a report from true and predicted labels.
    ///
    /// Precision, recall or F1 with a zero denominator is reported as 0.
    pub fn new(y_true: &[Label], y_pred: &[Label]) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(MLError::DimensionMismatch {
                expected: y_true.len(),
                got: y_pred.len(),
            }
            .into());
        }
        if y_true.is_empty() {
            return Err(MLError::InsufficientTrainingData {
                min_samples: 1,
                actual: 0,
            }
            .into());
        }

        let present: BTreeSet<Label> = y_true.iter().chain(y_pred).copied().collect();
        let labels: Vec<LabelMetrics> = present
            .into_iter()
            .map(|label| Self::label_metrics(label, y_true, y_pred))
            .collect();

        let total = y_true.len();
        let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
        let accuracy = correct as f64 / total as f64;

        let count = labels.len() as f64;
        let macro_avg = AverageMetrics {
            precision: labels.iter().map(|m| m.precision).sum::<f64>() / count,
            recall: labels.iter().map(|m| m.recall).sum::<f64>() / count,
            f1: labels.iter().map(|m| m.f1).sum::<f64>() / count,
            support: total,
        };

        let weight = |m: &LabelMetrics| m.support as f64 / total as f64;
        let weighted_avg = AverageMetrics {
            precision: labels.iter().map(|m| m.precision * weight(m)).sum(),
            recall: labels.iter().map(|m| m.recall * weight(m)).sum(),
            f1: labels.iter().map(|m| m.f1 * weight(m)).sum(),
            support: total,
        };

        Ok(Self {
            labels,
            accuracy,
            macro_avg,
            weighted_avg,
            total,
        })
    }

    fn label_metrics(label: Label, y_true: &[Label], y_pred: &[Label]) -> LabelMetrics {
        let mut tp = 0;
        let mut fp = 0;
        let mut fn_ = 0;
        for (&t, &p) in y_true.iter().zip(y_pred) {
            match (t == label, p == label) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => fn_ += 1,
                (false, false) => {}
            }
        }

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        LabelMetrics {
            label,
            precision,
            recall,
            f1,
            support: tp + fn_,
        }
    }

    /// Metrics for one label, if it occurred.
    pub fn get(&self, label: Label) -> Option<&LabelMetrics> {
        self.labels.iter().find(|m| m.label == label)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .labels
            .iter()
            .map(|m| m.label.as_str().len())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for m in &self.labels {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                m.label.as_str(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.total
        )?;
        for (name, avg) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, avg.precision, avg.recall, avg.f1, avg.support
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_report() {
        let y_true = [Label::Praise, Label::Praise, Label::Threat, Label::Threat];
        let y_pred = [Label::Praise, Label::Threat, Label::Threat, Label::Threat];

        let report = ClassificationReport::new(&y_true, &y_pred).unwrap();

        assert_eq!(report.accuracy, 0.75);
        let praise = report.get(Label::Praise).unwrap();
        assert_eq!(praise.precision, 1.0);
        assert_eq!(praise.recall, 0.5);
        assert_eq!(praise.support, 2);

        let threat = report.get(Label::Threat).unwrap();
        assert!((threat.precision - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(threat.recall, 1.0);
        assert!((threat.f1 - 0.8).abs() < 1e-12);

        assert!((report.macro_avg.recall - 0.75).abs() < 1e-12);
        assert_eq!(report.weighted_avg.support, 4);
    }

    #[test]
    fn test_predicted_only_label_has_zero_support() {
        let y_true = [Label::Praise, Label::Praise];
        let y_pred = [Label::Praise, Label::Emotional];

        let report = ClassificationReport::new(&y_true, &y_pred).unwrap();
        let emotional = report.get(Label::Emotional).unwrap();

        assert_eq!(emotional.support, 0);
        assert_eq!(emotional.precision, 0.0);
        assert_eq!(emotional.f1, 0.0);
        assert_eq!(report.labels.len(), 2);
    }

    #[test]
    fn test_report_errors() {
        assert!(ClassificationReport::new(&[], &[]).is_err());
        assert!(ClassificationReport::new(&[Label::Praise], &[]).is_err());
    }

    #[test]
    fn test_display_layout() {
        let y_true = [Label::Praise, Label::Threat];
        let report = ClassificationReport::new(&y_true, &y_true).unwrap();
        let rendered = report.to_string();

        assert!(rendered.contains("precision"));
        assert!(rendered.contains("praise"));
        assert!(rendered.contains("weighted avg"));
        assert!(rendered.contains("accuracy"));
        assert!(rendered.contains("1.00"));
    }
}
