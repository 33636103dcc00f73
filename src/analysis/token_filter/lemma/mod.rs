//! Lemmatizing token filter and lemmatizer implementations.

use std::collections::HashSet;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for lemmatization algorithms.
pub trait Lemmatizer: Send + Sync {
    /// Reduce a word to its dictionary base form.
    fn lemmatize(&self, word: &str) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

pub mod english;

pub use english::EnglishLemmatizer;

/// Filter that replaces each token with its lemma.
///
/// When a protected word set is configured (normally the stop word list),
/// a token whose lemma falls into that set keeps its original text. That
/// way lemmatizing never reintroduces a word an earlier filter removed.
pub struct LemmaFilter {
    lemmatizer: Box<dyn Lemmatizer>,
    protected: HashSet<String>,
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("lemmatizer", &self.lemmatizer.name())
            .field("protected", &self.protected.len())
            .finish()
    }
}

impl LemmaFilter {
    /// Create a new lemma filter with the English lemmatizer.
    pub fn new() -> Self {
        Self::with_lemmatizer(Box::new(EnglishLemmatizer::new()))
    }

    /// Create a lemma filter with a custom lemmatizer.
    pub fn with_lemmatizer(lemmatizer: Box<dyn Lemmatizer>) -> Self {
        LemmaFilter {
            lemmatizer,
            protected: HashSet::new(),
        }
    }

    /// Keep the original token whenever its lemma is one of `words`.
    pub fn protect(mut self, words: HashSet<String>) -> Self {
        self.protected = words;
        self
    }

    fn lemma_of(&self, word: &str) -> Option<String> {
        let lemma = self.lemmatizer.lemmatize(word);
        if lemma == word || self.protected.contains(&lemma) {
            None
        } else {
            Some(lemma)
        }
    }
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| match self.lemma_of(&token.text) {
                Some(lemma) => token.with_text(lemma),
                None => token,
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}
