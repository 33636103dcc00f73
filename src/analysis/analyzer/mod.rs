//! Analyzer implementations that combine tokenizers and filters.

pub mod analyzer;
pub mod comment;
pub mod pipeline;

pub use analyzer::Analyzer;
pub use comment::CommentAnalyzer;
pub use pipeline::PipelineAnalyzer;
