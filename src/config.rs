//! Configuration for training and inference.
//!
//! A [`RetortConfig`] can be loaded from a JSON file; any field left out
//! takes its default value.
//!
//! ```
//! use retort::config::RetortConfig;
//!
//! let config: RetortConfig = serde_json::from_str(r#"{"classifier": {"max_iter": 200}}"#).unwrap();
//! assert_eq!(config.classifier.max_iter, 200);
//! assert_eq!(config.vectorizer.min_df, 2);
//! config.validate().unwrap();
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetortError};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetortConfig {
    /// Directory holding the model artifacts.
    pub models_dir: PathBuf,
    pub vectorizer: VectorizerConfig,
    pub classifier: ClassifierConfig,
    pub training: TrainingConfig,
}

impl Default for RetortConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            vectorizer: VectorizerConfig::default(),
            classifier: ClassifierConfig::default(),
            training: TrainingConfig::default(),
        }
    }
}

/// TF-IDF vectorizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Smallest and largest word n-gram length.
    pub ngram_range: (usize, usize),
    /// Minimum number of training documents a term must occur in.
    pub min_df: usize,
    /// Minimum token length in characters.
    pub min_token_len: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            min_df: 2,
            min_token_len: 2,
        }
    }
}

/// Logistic regression settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub max_iter: usize,
    /// Gradient descent step size.
    pub learning_rate: f64,
    /// Inverse L2 regularization strength.
    pub c: f64,
    /// Stop once every gradient component is below this.
    pub tol: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            learning_rate: 1.0,
            c: 1.0,
            tol: 1e-4,
        }
    }
}

/// Train/test split settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Fraction of each label held out for evaluation.
    pub test_size: f64,
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
        }
    }
}

impl RetortConfig {
    /// Load and validate a configuration file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RetortError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: RetortConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values training cannot work with.
    pub fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.vectorizer.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(RetortError::config(format!(
                "ngram_range must satisfy 1 <= min <= max, got ({min_n}, {max_n})"
            )));
        }
        if self.vectorizer.min_df == 0 {
            return Err(RetortError::config("min_df must be at least 1"));
        }
        if self.classifier.max_iter == 0 {
            return Err(RetortError::config("max_iter must be at least 1"));
        }
        if !(self.classifier.learning_rate > 0.0) {
            return Err(RetortError::config("learning_rate must be positive"));
        }
        if !(self.classifier.c > 0.0) {
            return Err(RetortError::config("c must be positive"));
        }
        if !(self.classifier.tol > 0.0) {
            return Err(RetortError::config("tol must be positive"));
        }
        if !(self.training.test_size > 0.0 && self.training.test_size < 1.0) {
            return Err(RetortError::config(format!(
                "test_size must be between 0 and 1, got {}",
                self.training.test_size
            )));
        }
        Ok(())
    }
}
