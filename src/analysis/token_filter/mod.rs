//! Token filter implementations for token transformation.
//!
//! Filters receive the token stream produced by a tokenizer and return a
//! new stream, modifying or dropping tokens along the way.
//!
//! # Available Filters
//!
//! - [`stop::StopFilter`] - Removes stop words
//! - [`lemma::LemmaFilter`] - Reduces words to their dictionary base form
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Stop Words → Lemmatizer → Output
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lemma;
pub mod stop;

pub use lemma::{EnglishLemmatizer, LemmaFilter, Lemmatizer};
pub use stop::StopFilter;
