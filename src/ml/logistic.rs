//! Multinomial logistic regression over sparse TF-IDF features.
//!
//! The model minimizes the mean cross-entropy of a softmax over per-label
//! linear scores plus an L2 penalty on the coefficients:
//!
//! ```text
//! loss(W, b) = -1/n Σ ln softmax(W·xᵢ + b)[yᵢ] + 1/(2·C·n) ‖W‖²
//! ```
//!
//! Intercepts are not penalized. Optimization is full-batch gradient
//! descent, stopping once the largest gradient component drops below `tol`
//! or after `max_iter` iterations.

use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::error::{Result, RetortError};
use crate::label::Label;
use crate::ml::MLError;
use crate::ml::tfidf::SparseVector;

/// Model metadata for tracking model information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name/identifier.
    pub name: String,
    /// Model version.
    pub version: String,
    /// Training timestamp.
    pub trained_at: chrono::DateTime<chrono::Utc>,
    /// Number of training examples used.
    pub training_examples: usize,
    /// Model hyperparameters.
    pub hyperparameters: HashMap<String, f64>,
    /// Performance metrics on the held-out split.
    pub validation_metrics: HashMap<String, f64>,
}

/// Training statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Loss after each iteration.
    pub loss_history: Vec<f64>,
    /// Number of iterations completed.
    pub iterations: usize,
    /// Final training loss.
    pub final_loss: f64,
    /// Whether the gradient tolerance was reached before `max_iter`.
    pub converged: bool,
    /// Training time in milliseconds.
    pub training_time_ms: u64,
}

/// Multinomial logistic regression classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Labels seen during training, sorted.
    classes: Vec<Label>,
    /// Width of the expected feature vectors.
    n_features: usize,
    /// One coefficient row per class.
    coefficients: Vec<Vec<f64>>,
    /// One intercept per class.
    intercepts: Vec<f64>,
    max_iter: usize,
    learning_rate: f64,
    /// Inverse regularization strength.
    c: f64,
    tol: f64,
    training_stats: Option<TrainingStats>,
    metadata: ModelMetadata,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl LogisticRegression {
    /// Create an untrained model from configuration.
    pub fn new(config: &ClassifierConfig) -> Self {
        let hyperparameters = HashMap::from([
            ("max_iter".to_string(), config.max_iter as f64),
            ("learning_rate".to_string(), config.learning_rate),
            ("c".to_string(), config.c),
            ("tol".to_string(), config.tol),
        ]);

        Self {
            classes: Vec::new(),
            n_features: 0,
            coefficients: Vec::new(),
            intercepts: Vec::new(),
            max_iter: config.max_iter,
            learning_rate: config.learning_rate,
            c: config.c,
            tol: config.tol,
            training_stats: None,
            metadata: ModelMetadata {
                name: "LogisticRegression".to_string(),
                version: crate::VERSION.to_string(),
                trained_at: chrono::Utc::now(),
                training_examples: 0,
                hyperparameters,
                validation_metrics: HashMap::new(),
            },
        }
    }

    /// Fit the model on feature vectors `x` of width `n_features` and labels `y`.
    pub fn fit(&mut self, x: &[SparseVector], y: &[Label], n_features: usize) -> Result<()> {
        if x.len() != y.len() {
            return Err(MLError::DimensionMismatch {
                expected: x.len(),
                got: y.len(),
            }
            .into());
        }
        if x.is_empty() {
            return Err(MLError::InsufficientTrainingData {
                min_samples: 2,
                actual: 0,
            }
            .into());
        }
        for row in x {
            Self::check_width(row, n_features)?;
        }

        let classes: Vec<Label> = y.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        if classes.len() < 2 {
            return Err(MLError::InsufficientClasses {
                min_classes: 2,
                actual: classes.len(),
            }
            .into());
        }
        let targets = y
            .iter()
            .map(|label| {
                classes
                    .binary_search(label)
                    .map_err(|_| RetortError::other(format!("label {label} missing from classes")))
            })
            .collect::<Result<Vec<usize>>>()?;

        let start_time = Instant::now();
        let n_classes = classes.len();
        let n = x.len() as f64;
        let penalty = 1.0 / (self.c * n);

        let mut coefficients = vec![vec![0.0; n_features]; n_classes];
        let mut intercepts = vec![0.0; n_classes];
        let mut loss_history = Vec::new();
        let mut converged = false;
        let mut max_gradient = f64::INFINITY;

        for iteration in 0..self.max_iter {
            let mut grad_w = vec![vec![0.0; n_features]; n_classes];
            let mut grad_b = vec![0.0; n_classes];
            let mut data_loss = 0.0;

            for (row, &target) in x.iter().zip(&targets) {
                let probabilities = softmax(&Self::scores(&coefficients, &intercepts, row));
                data_loss -= probabilities[target].max(1e-15).ln();

                for (class, probability) in probabilities.iter().enumerate() {
                    let error = probability - if class == target { 1.0 } else { 0.0 };
                    grad_b[class] += error;
                    for &(feature, value) in row {
                        grad_w[class][feature] += error * value;
                    }
                }
            }

            let squared_norm: f64 = coefficients.iter().flatten().map(|w| w * w).sum();
            let loss = data_loss / n + 0.5 * penalty * squared_norm;
            loss_history.push(loss);

            max_gradient = 0.0;
            for class in 0..n_classes {
                for feature in 0..n_features {
                    let gradient =
                        grad_w[class][feature] / n + penalty * coefficients[class][feature];
                    max_gradient = f64::max(max_gradient, gradient.abs());
                    coefficients[class][feature] -= self.learning_rate * gradient;
                }
                let gradient = grad_b[class] / n;
                max_gradient = f64::max(max_gradient, gradient.abs());
                intercepts[class] -= self.learning_rate * gradient;
            }

            if max_gradient < self.tol {
                debug!("Converged at iteration {iteration} (loss {loss:.6})");
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                "Logistic regression did not converge after {} iterations (max gradient {:.2e})",
                self.max_iter, max_gradient
            );
        }

        let training_time = start_time.elapsed();
        self.training_stats = Some(TrainingStats {
            iterations: loss_history.len(),
            final_loss: loss_history.last().copied().unwrap_or(0.0),
            loss_history,
            converged,
            training_time_ms: training_time.as_millis() as u64,
        });

        self.classes = classes;
        self.n_features = n_features;
        self.coefficients = coefficients;
        self.intercepts = intercepts;
        self.metadata.trained_at = chrono::Utc::now();
        self.metadata.training_examples = x.len();

        Ok(())
    }

    /// Raw per-class linear scores, in [`classes`](Self::classes) order.
    pub fn decision_function(&self, x: &SparseVector) -> Result<Vec<f64>> {
        self.ensure_trained()?;
        Self::check_width(x, self.n_features)?;
        Ok(Self::scores(&self.coefficients, &self.intercepts, x))
    }

    /// Softmax class probabilities, in [`classes`](Self::classes) order.
    pub fn predict_proba(&self, x: &SparseVector) -> Result<Vec<f64>> {
        Ok(softmax(&self.decision_function(x)?))
    }

    /// Predict the single most likely label.
    ///
    /// Ties resolve to the first label in sorted class order.
    pub fn predict(&self, x: &SparseVector) -> Result<Label> {
        let scores = self.decision_function(x)?;
        Ok(self.classes[argmax(&scores)])
    }

    /// Predict a label for every row.
    pub fn predict_all(&self, x: &[SparseVector]) -> Result<Vec<Label>> {
        x.iter().map(|row| self.predict(row)).collect()
    }

    /// Labels the model can predict, sorted.
    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    /// Width of the feature vectors the model expects.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Check if the model is trained.
    pub fn is_trained(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Statistics from the last `fit`.
    pub fn training_stats(&self) -> Option<&TrainingStats> {
        self.training_stats.as_ref()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut ModelMetadata {
        &mut self.metadata
    }

    fn ensure_trained(&self) -> Result<()> {
        if self.is_trained() {
            Ok(())
        } else {
            Err(MLError::ModelNotTrained {
                message: "logistic regression has not been fitted".to_string(),
            }
            .into())
        }
    }

    fn check_width(x: &SparseVector, n_features: usize) -> Result<()> {
        match x.iter().map(|&(idx, _)| idx).max() {
            Some(idx) if idx >= n_features => Err(MLError::DimensionMismatch {
                expected: n_features,
                got: idx + 1,
            }
            .into()),
            _ => Ok(()),
        }
    }

    fn scores(coefficients: &[Vec<f64>], intercepts: &[f64], x: &SparseVector) -> Vec<f64> {
        coefficients
            .iter()
            .zip(intercepts)
            .map(|(row, intercept)| {
                intercept + x.iter().map(|&(idx, value)| row[idx] * value).sum::<f64>()
            })
            .collect()
    }
}

/// Numerically stable softmax.
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index of the largest score; the first one wins on ties.
fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (idx, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = idx;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_data() -> (Vec<SparseVector>, Vec<Label>) {
        let x = vec![
            vec![(0, 1.0)],
            vec![(0, 0.8), (3, 0.6)],
            vec![(1, 1.0)],
            vec![(1, 0.8), (3, 0.6)],
            vec![(2, 1.0)],
            vec![(2, 0.8), (3, 0.6)],
        ];
        let y = vec![
            Label::Praise,
            Label::Praise,
            Label::Threat,
            Label::Threat,
            Label::SpamIrrelevant,
            Label::SpamIrrelevant,
        ];
        (x, y)
    }

    #[test]
    fn test_fit_and_predict() {
        let (x, y) = toy_data();
        let mut model = LogisticRegression::default();
        model.fit(&x, &y, 4).unwrap();

        assert_eq!(
            model.classes(),
            &[Label::Praise, Label::SpamIrrelevant, Label::Threat]
        );
        assert_eq!(model.predict(&vec![(0, 1.0)]).unwrap(), Label::Praise);
        assert_eq!(model.predict(&vec![(1, 1.0)]).unwrap(), Label::Threat);
        assert_eq!(model.predict(&vec![(2, 1.0)]).unwrap(), Label::SpamIrrelevant);
        assert_eq!(model.predict_all(&x).unwrap(), y);

        let stats = model.training_stats().unwrap();
        assert!(stats.iterations > 0);
        assert!(stats.loss_history.first().unwrap() > &stats.final_loss);
        assert_eq!(model.metadata().training_examples, 6);
    }

    #[test]
    fn test_predict_proba_sums_to_one() {
        let (x, y) = toy_data();
        let mut model = LogisticRegression::default();
        model.fit(&x, &y, 4).unwrap();

        let probabilities = model.predict_proba(&vec![(0, 0.5), (1, 0.5)]).unwrap();
        assert_eq!(probabilities.len(), 3);
        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(probabilities.iter().all(|&p| p > 0.0 && p < 1.0));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (x, y) = toy_data();
        let mut first = LogisticRegression::default();
        let mut second = LogisticRegression::default();
        first.fit(&x, &y, 4).unwrap();
        second.fit(&x, &y, 4).unwrap();

        let probe = vec![(0, 0.3), (2, 0.7), (3, 0.1)];
        assert_eq!(
            first.decision_function(&probe).unwrap(),
            second.decision_function(&probe).unwrap()
        );
    }

    #[test]
    fn test_fit_errors() {
        let mut model = LogisticRegression::default();

        let result = model.fit(&[], &[], 4);
        assert!(matches!(
            result,
            Err(RetortError::Ml(MLError::InsufficientTrainingData { .. }))
        ));

        let x = vec![vec![(0, 1.0)], vec![(1, 1.0)]];
        let result = model.fit(&x, &[Label::Praise, Label::Praise], 2);
        assert!(matches!(
            result,
            Err(RetortError::Ml(MLError::InsufficientClasses { actual: 1, .. }))
        ));

        let result = model.fit(&x, &[Label::Praise, Label::Threat], 1);
        assert!(matches!(
            result,
            Err(RetortError::Ml(MLError::DimensionMismatch { .. }))
        ));

        let result = model.fit(&x, &[Label::Praise], 2);
        assert!(matches!(
            result,
            Err(RetortError::Ml(MLError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_predict_requires_fit() {
        let model = LogisticRegression::default();
        assert!(matches!(
            model.predict(&vec![(0, 1.0)]),
            Err(RetortError::Ml(MLError::ModelNotTrained { .. }))
        ));
    }

    #[test]
    fn test_argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.5, 0.5, 0.1]), 0);
        assert_eq!(argmax(&[0.1, 0.7, 0.7]), 1);
        assert_eq!(argmax(&[-1.0]), 0);
    }

    #[test]
    fn test_softmax_is_stable() {
        let probabilities = softmax(&[1000.0, 1000.0]);
        assert!((probabilities[0] - 0.5).abs() < 1e-12);
        assert!((probabilities[1] - 0.5).abs() < 1e-12);
    }
}
