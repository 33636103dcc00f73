//! Rule-based English noun lemmatizer.
//!
//! Reduces plural nouns to their singular dictionary form. Lookup order:
//!
//! 1. irregular plurals (`children` → `child`, `leaves` → `leaf`)
//! 2. words that only look plural (`news`, `series`, `always`)
//! 3. plurals whose singular ends in `e` (`movies` → `movie`, `aches` → `ache`)
//! 4. suffix rules, first match wins
//!
//! Words of three letters or fewer, and words ending in `ss`, `us` or `is`,
//! are returned unchanged. Every output is a fixed point: lemmatizing a
//! lemma returns it unchanged.
//!
//! There is no dictionary behind the final `s` rule, so any word ending in
//! `s` that is not listed as invariant loses it. The invariant list covers
//! common verb forms (`seems`, `gets`), proper nouns (`texas`, `james`) and
//! adverbs seen in comments; other non-nouns ending in `s` are still cut.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::Lemmatizer;

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("lice", "louse"),
    ("oxen", "ox"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("diagnoses", "diagnosis"),
    ("hypotheses", "hypothesis"),
    ("buses", "bus"),
    ("gases", "gas"),
    ("lenses", "lens"),
    ("viruses", "virus"),
    ("bonuses", "bonus"),
    ("statuses", "status"),
    ("campuses", "campus"),
    ("quizzes", "quiz"),
    ("heroes", "hero"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("echoes", "echo"),
    ("vetoes", "veto"),
    ("goes", "go"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("thieves", "thief"),
    ("wolves", "wolf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("selves", "self"),
    ("loaves", "loaf"),
    ("calves", "calf"),
    ("scarves", "scarf"),
];

const INVARIANT_WORDS: &[&str] = &[
    "news",
    "series",
    "species",
    "means",
    "lens",
    "bias",
    "atlas",
    "alias",
    "canvas",
    "christmas",
    "physics",
    "mathematics",
    "economics",
    "politics",
    "ethics",
    "athletics",
    "gymnastics",
    "analytics",
    "thanks",
    "yes",
    "always",
    "perhaps",
    "whereas",
    "sometimes",
    "nowadays",
    "towards",
    "afterwards",
    "besides",
    "overseas",
    "chaos",
    "kudos",
    "anyways",
    // verbs without a noun reading
    "seems",
    "gets",
    "says",
    "becomes",
    "happens",
    "belongs",
    "deserves",
    "includes",
    "explains",
    "remains",
    "appears",
    "allows",
    "provides",
    "exists",
    "agrees",
    "deletes",
    // proper nouns
    "texas",
    "kansas",
    "arkansas",
    "vegas",
    "james",
    "charles",
    "thomas",
    "nicholas",
    "douglas",
    "lucas",
    "carlos",
    "wales",
    "athens",
    "mars",
    "brussels",
    "netherlands",
    "philippines",
    // singulars ending in "men"
    "omen",
    "amen",
    "abdomen",
    "specimen",
    "regimen",
    "stamen",
    "ramen",
];

/// Singular forms ending in `e` that the suffix rules would otherwise
/// mangle (`movies` would become `movy`, `headaches` would become `headach`).
const E_FINAL_SINGULARS: &[&str] = &[
    "movie",
    "cookie",
    "zombie",
    "selfie",
    "rookie",
    "hippie",
    "goalie",
    "newbie",
    "freebie",
    "sweetie",
    "calorie",
    "prairie",
    "genie",
    "brownie",
    "smoothie",
    "ache",
    "headache",
    "stomachache",
    "toothache",
    "niche",
    "cliche",
    "avalanche",
    "moustache",
    "mustache",
    "quiche",
    "psyche",
    "microfiche",
];

/// Suffix detachment rules, checked in order.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ies", "y"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("men", "man"),
    ("s", ""),
];

static IRREGULAR: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR_PLURALS.iter().copied().collect());

static INVARIANT: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| INVARIANT_WORDS.iter().copied().collect());

static E_FINAL: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| E_FINAL_SINGULARS.iter().copied().collect());

/// Rule-based English noun lemmatizer.
#[derive(Debug, Clone, Default)]
pub struct EnglishLemmatizer;

impl EnglishLemmatizer {
    /// Create a new English lemmatizer.
    pub fn new() -> Self {
        EnglishLemmatizer
    }

    fn is_protected(word: &str) -> bool {
        word.chars().count() <= 3
            || word.ends_with("ss")
            || word.ends_with("us")
            || word.ends_with("is")
    }

    fn apply_suffix_rules(word: &str) -> Option<String> {
        for &(suffix, replacement) in SUFFIX_RULES {
            let Some(stem) = word.strip_suffix(suffix) else {
                continue;
            };
            // "ties" → "tie", but "stories" → "story"
            if suffix == "ies" && word.len() <= 4 {
                return Some(format!("{stem}ie"));
            }
            return Some(format!("{stem}{replacement}"));
        }
        None
    }

    /// One reduction step, or `None` when `word` is already a lemma.
    fn reduce(word: &str) -> Option<String> {
        if Self::is_protected(word) || INVARIANT.contains(word) {
            return None;
        }
        if let Some(lemma) = IRREGULAR.get(word) {
            return Some((*lemma).to_string());
        }
        if let Some(singular) = word.strip_suffix('s') {
            if E_FINAL.contains(singular) {
                return Some(singular.to_string());
            }
        }
        Self::apply_suffix_rules(word)
    }
}

impl Lemmatizer for EnglishLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        // "womens" → "women" → "woman"
        let mut current = word.to_string();
        while let Some(next) = Self::reduce(&current) {
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn name(&self) -> &'static str {
        "english"
    }
}
