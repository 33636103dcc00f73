use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lemma::LemmaFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// URL-like substrings, removed before any other character cleanup.
pub const URL_PATTERN: &str = r"http\S+|www\.\S+";

/// Anything that is not a lowercase ASCII letter or whitespace.
pub const NON_LETTER_PATTERN: &str = r"[^a-z\s]";

/// Analyzer that normalizes a free-text comment for classification.
///
/// Lowercase → strip URLs → strip non-letters → split on whitespace →
/// drop English stop words → lemmatize.
pub struct CommentAnalyzer {
    inner: PipelineAnalyzer,
}

impl CommentAnalyzer {
    pub fn new() -> Result<Self> {
        let stop_filter = StopFilter::new();
        let lemma_filter = LemmaFilter::new().protect(stop_filter.stop_words().clone());

        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(URL_PATTERN, " ")?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(
                NON_LETTER_PATTERN,
                " ",
            )?))
            .add_filter(Arc::new(stop_filter))
            .add_filter(Arc::new(lemma_filter))
            .with_name("comment");

        Ok(Self { inner: analyzer })
    }

    /// Analyze `text` and join the surviving tokens with single spaces.
    pub fn clean(&self, text: &str) -> Result<String> {
        let tokens: Vec<String> = self.analyze(text)?.map(|token| token.text).collect();
        Ok(tokens.join(" "))
    }
}

impl Analyzer for CommentAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "comment"
    }
}

impl Debug for CommentAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_comment_analyzer() {
        let analyzer = CommentAnalyzer::new().unwrap();

        let tokens: Vec<Token> = analyzer
            .analyze("I LOVED these videos, see www.spam.example/now!")
            .unwrap()
            .collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["loved", "video", "see"]);
    }

    #[test]
    fn test_clean_joins_tokens() {
        let analyzer = CommentAnalyzer::new().unwrap();
        assert_eq!(analyzer.clean("Check http://example.com NOW!!").unwrap(), "check");
        assert_eq!(analyzer.clean("Great   tutorials :) 10/10").unwrap(), "great tutorial");
        assert_eq!(analyzer.clean("").unwrap(), "");
    }

    #[test]
    fn test_comment_analyzer_name() {
        let analyzer = CommentAnalyzer::new().unwrap();
        assert_eq!(analyzer.name(), "comment");
    }
}
