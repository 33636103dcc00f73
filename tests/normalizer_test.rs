//! Integration tests for comment normalization.

use retort::analysis::*;

#[test]
fn test_clean_strips_urls_punctuation_and_stop_words() {
    assert_eq!(clean("Check http://example.com NOW!!"), "check");
    assert_eq!(clean("Visit www.example.org for more"), "visit");
    assert_eq!(clean("I've got 99 problems :("), "got problem");
}

#[test]
fn test_clean_lemmatizes_nouns() {
    assert_eq!(clean("Great videos, the children loved them"), "great video child loved");
    assert_eq!(clean("So many memories"), "many memory");
}

#[test]
fn test_clean_is_total() {
    assert_eq!(clean(""), "");
    assert_eq!(clean("   \t\n"), "");
    assert_eq!(clean("!!! ??? 123"), "");
    assert_eq!(clean("the and of"), "");
    assert_eq!(clean_opt(None), "");
    assert_eq!(clean_opt(Some("Nice VIDEOS")), "nice video");
}

#[test]
fn test_clean_is_idempotent() {
    let samples = [
        "Amazing video, I loved every minute of it",
        "How do I install this on Windows?",
        "The buses and the heroes went to the churches",
        "Womens shoes, wishes and boxes",
        "Check out my channel http://spam.example.com!!!",
        "series news species thanks",
        "",
    ];

    for sample in samples {
        let once = clean(sample);
        assert_eq!(clean(&once), once, "not idempotent for {sample:?}");
    }
}

#[test]
fn test_clean_all_preserves_order() {
    let cleaned = clean_all(["Videos rock", "", "Bad audio"]);
    assert_eq!(cleaned, vec!["video rock", "", "bad audio"]);
}

#[test]
fn test_analyzer_output_alphabet() {
    let analyzer = CommentAnalyzer::new().unwrap();
    let cleaned = analyzer
        .clean("Ünïcode café, résumé & 42 émojis 🎉 – done.")
        .unwrap();

    assert!(
        cleaned
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == ' ')
    );
    assert!(!cleaned.starts_with(' '));
    assert!(!cleaned.ends_with(' '));
    assert!(!cleaned.contains("  "));
}

#[test]
fn test_clean_keeps_non_plural_final_s() {
    assert_eq!(clean("Texas"), "texas");
    assert_eq!(clean("James"), "james");
    assert_eq!(clean("It seems great"), "seems great");
    assert_eq!(clean("Lenses"), "lens");
}
