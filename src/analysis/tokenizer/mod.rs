//! Tokenizer implementations for text analysis.
//!
//! Tokenizers split (already char-filtered) text into tokens. They are the
//! step between char filters and token filters in a
//! [`PipelineAnalyzer`](crate::analysis::analyzer::PipelineAnalyzer).
//!
//! # Examples
//!
//! ```
//! use retort::analysis::tokenizer::Tokenizer;
//! use retort::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod whitespace;

pub use whitespace::WhitespaceTokenizer;
