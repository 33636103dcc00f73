//! Core analyzer trait definition.
//!
//! This module defines the [`Analyzer`] trait, the main interface for text
//! analysis in Retort. Analyzers combine char filters, a tokenizer and token
//! filters to turn a raw comment into normalized tokens.
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → ... → Filter N → Tokens
//! ```
//!
//! # Available Implementations
//!
//! - [`PipelineAnalyzer`](super::pipeline::PipelineAnalyzer) - Custom char filter + tokenizer + filter chains
//! - [`CommentAnalyzer`](super::comment::CommentAnalyzer) - The comment normalizer used for classification
//!
//! # Examples
//!
//! ```
//! use retort::analysis::analyzer::Analyzer;
//! use retort::analysis::analyzer::CommentAnalyzer;
//!
//! let analyzer = CommentAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("Loved the videos!").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "loved");
//! assert_eq!(tokens[1].text, "video");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so a single analyzer can be shared by
/// reference wherever comments are cleaned.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    ///
    /// This performs the complete analysis pipeline, including char
    /// filtering, tokenization and all configured token filters.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
