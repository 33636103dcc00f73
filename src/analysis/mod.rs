//! Text analysis module for Retort.
//!
//! This module turns raw comments into normalized token streams. The
//! building blocks are char filters (string rewrites), a tokenizer, and
//! token filters, chained together by a [`PipelineAnalyzer`]. The
//! [`CommentAnalyzer`] wires up the fixed normalization used for both
//! training and inference, and [`clean`] exposes it as a plain
//! string-to-string function.

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use normalizer::{clean, clean_opt, clean_all};
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
