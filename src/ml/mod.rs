//! Machine learning components for comment classification.
//!
//! - [`tfidf`]: n-gram TF-IDF feature extraction
//! - [`logistic`]: multinomial logistic regression over sparse features
//! - [`metrics`]: per-label precision / recall / F1 evaluation
//! - [`split`]: stratified train/test splitting
//! - [`artifact`]: persistence of the fitted vectorizer and classifier

pub mod artifact;
pub mod logistic;
pub mod metrics;
pub mod split;
pub mod tfidf;

pub use artifact::*;
pub use logistic::*;
pub use metrics::*;
pub use split::*;
pub use tfidf::*;

/// Machine learning error types.
#[derive(Debug, thiserror::Error)]
pub enum MLError {
    #[error("Model not trained: {message}")]
    ModelNotTrained { message: String },

    #[error("Training data insufficient: need at least {min_samples} samples, got {actual}")]
    InsufficientTrainingData { min_samples: usize, actual: usize },

    #[error("Training data insufficient: need at least {min_classes} distinct labels, got {actual}")]
    InsufficientClasses { min_classes: usize, actual: usize },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Model loading failed: {path}: {reason}")]
    ModelLoadError { path: String, reason: String },

    #[error("Model saving failed: {path}: {reason}")]
    ModelSaveError { path: String, reason: String },

    #[error("Empty vocabulary: {message}")]
    EmptyVocabulary { message: String },
}
