//! End-to-end training and inference.
//!
//! ```text
//! training:  Load → Clean → Split → FitVectorizer → FitClassifier → Evaluate → Persist
//! inference: Clean → Vectorize → Predict → Reply
//! ```

pub mod dataset;
pub mod distribution;
pub mod inference;
pub mod training;

pub use dataset::{LabeledComment, read_comments, read_labeled_comments, write_classifications};
pub use distribution::LabelDistribution;
pub use inference::{Classification, CommentClassifier};
pub use training::{TrainingOutcome, TrainingPipeline, TrainingReport};
