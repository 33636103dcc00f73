//! # Retort
//!
//! Categorize user comments and suggest a canned reply for each one.
//!
//! ## Features
//!
//! - Text normalization pipeline (lowercasing, URL and punctuation removal,
//!   stop words, lemmatization)
//! - TF-IDF features over word unigrams and bigrams
//! - Multinomial logistic regression classifier
//! - Stratified evaluation with a per-label report
//! - Batch CSV classification with suggested replies
//!
//! ```no_run
//! use retort::prelude::*;
//!
//! # fn main() -> retort::error::Result<()> {
//! let outcome = TrainingPipeline::default().run("data/comments_labeled.csv")?;
//! println!("{}", outcome.report.evaluation);
//!
//! let classifier = CommentClassifier::load("models")?;
//! let result = classifier.classify_one("Thanks, this helped a lot!", true)?;
//! println!("{}", result.predicted_label);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod label;
pub mod ml;
pub mod pipeline;

pub mod prelude {
    pub use crate::analysis::normalizer::{clean, clean_all};
    pub use crate::config::RetortConfig;
    pub use crate::error::{Result, RetortError};
    pub use crate::label::Label;
    pub use crate::ml::artifact::ModelArtifacts;
    pub use crate::pipeline::inference::{Classification, CommentClassifier};
    pub use crate::pipeline::training::TrainingPipeline;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
