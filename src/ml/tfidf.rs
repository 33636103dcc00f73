//! TF-IDF vectorizer for text feature extraction.
//!
//! Terms are word n-grams over the whitespace tokens of an already cleaned
//! comment. With the default `ngram_range` of `(1, 2)` the comment
//! `"great video series"` yields the terms `great`, `video`, `series`,
//! `great video` and `video series`.
//!
//! Weights follow the smoothed formulation:
//!
//! ```text
//! idf(t)    = ln((1 + n_documents) / (1 + df(t))) + 1
//! weight(t) = count(t) * idf(t), then L2-normalized per document
//! ```

use std::collections::HashSet;

use ahash::AHashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::config::VectorizerConfig;
use crate::error::Result;
use crate::ml::MLError;

/// Sparse feature vector: `(vocabulary index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// TF-IDF vectorizer for text feature extraction.
#[derive(Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Smallest and largest n-gram length, inclusive.
    ngram_range: (usize, usize),
    /// Minimum number of documents a term must appear in.
    min_df: usize,
    /// Tokens shorter than this (in chars) are ignored.
    min_token_len: usize,
    /// Vocabulary: term -> index mapping.
    vocabulary: AHashMap<String, usize>,
    /// Inverse document frequency for each index.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
    #[serde(skip)]
    tokenizer: WhitespaceTokenizer,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("ngram_range", &self.ngram_range)
            .field("min_df", &self.min_df)
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .finish()
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new(&VectorizerConfig::default())
    }
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer from configuration.
    pub fn new(config: &VectorizerConfig) -> Self {
        Self {
            ngram_range: config.ngram_range,
            min_df: config.min_df,
            min_token_len: config.min_token_len,
            vocabulary: AHashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            tokenizer: WhitespaceTokenizer::new(),
        }
    }

    /// Fit the vectorizer on training documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(MLError::InsufficientTrainingData {
                min_samples: 1,
                actual: 0,
            }
            .into());
        }

        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        for doc in documents {
            let unique_terms: HashSet<String> = self.terms(doc)?.into_iter().collect();
            for term in unique_terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let candidate_count = document_frequency.len();
        let mut kept: Vec<(String, usize)> = document_frequency
            .into_iter()
            .filter(|(_, df)| *df >= self.min_df)
            .collect();
        if kept.is_empty() {
            return Err(MLError::EmptyVocabulary {
                message: format!(
                    "no term appears in at least {} of {} documents",
                    self.min_df,
                    documents.len()
                ),
            }
            .into());
        }
        kept.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let n_documents = documents.len();
        let mut vocabulary = AHashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (idx, (term, df)) in kept.into_iter().enumerate() {
            idf.push(((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        debug!(
            "Fitted TF-IDF vocabulary: {} of {} terms kept from {} documents",
            vocabulary.len(),
            candidate_count,
            n_documents
        );

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.n_documents = n_documents;

        Ok(())
    }

    /// Transform a document into a L2-normalized TF-IDF vector.
    ///
    /// Terms outside the fitted vocabulary are ignored.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        if !self.is_fitted() {
            return Err(MLError::ModelNotTrained {
                message: "TF-IDF vectorizer has not been fitted".to_string(),
            }
            .into());
        }

        let mut counts: AHashMap<usize, f64> = AHashMap::new();
        for term in self.terms(document)? {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();
        vector.sort_unstable_by_key(|&(idx, _)| idx);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut vector {
                *weight /= norm;
            }
        }

        Ok(vector)
    }

    /// Transform every document, preserving order.
    pub fn transform_all(&self, documents: &[String]) -> Result<Vec<SparseVector>> {
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Fit on `documents`, then transform them.
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        self.transform_all(documents)
    }

    /// Extract the n-gram terms of a document, in order of occurrence.
    fn terms(&self, document: &str) -> Result<Vec<String>> {
        let tokens: Vec<String> = self
            .tokenizer
            .tokenize(document)?
            .map(|token| token.text)
            .filter(|text| text.chars().count() >= self.min_token_len)
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n {
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        Ok(terms)
    }

    /// Whether `fit` has completed.
    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Whether `term` is part of the fitted vocabulary.
    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// The IDF weight of a vocabulary term.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }

    /// Vocabulary terms ordered by feature index.
    pub fn feature_names(&self) -> Vec<&str> {
        let mut names = vec![""; self.vocabulary.len()];
        for (term, &idx) in &self.vocabulary {
            names[idx] = term.as_str();
        }
        names
    }

    /// Number of documents seen by `fit`.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}
