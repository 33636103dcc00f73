//! Comment normalization entry points.
//!
//! [`clean`] is total: it never fails and maps a missing comment to the
//! empty string. Cleaning is idempotent, `clean(&clean(x)) == clean(x)`.
//!
//! ```
//! use retort::analysis::clean;
//!
//! assert_eq!(clean("Check http://example.com NOW!!"), "check");
//! assert_eq!(clean(&clean("Loving these videos")), clean("Loving these videos"));
//! ```

use std::sync::LazyLock;

use log::warn;

use crate::analysis::analyzer::CommentAnalyzer;

static DEFAULT_ANALYZER: LazyLock<Option<CommentAnalyzer>> = LazyLock::new(|| {
    CommentAnalyzer::new()
        .map_err(|e| warn!("Failed to build comment analyzer: {e}"))
        .ok()
});

/// Normalize a single comment with the default [`CommentAnalyzer`].
pub fn clean(text: &str) -> String {
    let Some(analyzer) = DEFAULT_ANALYZER.as_ref() else {
        return String::new();
    };
    match analyzer.clean(text) {
        Ok(cleaned) => cleaned,
        Err(e) => {
            warn!("Failed to clean comment, treating it as empty: {e}");
            String::new()
        }
    }
}

/// Normalize an optional comment; `None` becomes the empty string.
pub fn clean_opt(text: Option<&str>) -> String {
    text.map(clean).unwrap_or_default()
}

/// Normalize every comment in `texts`, preserving order.
pub fn clean_all<I, S>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts.into_iter().map(|text| clean(text.as_ref())).collect()
}
