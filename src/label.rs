//! Comment categories and their canned replies.
//!
//! [`Label`] is the single source of truth for both the classifier's label
//! set and the reply templates: every variant has exactly one reply, so a
//! new category cannot be added without also giving it a reply.
//!
//! # Examples
//!
//! ```
//! use retort::label::Label;
//!
//! let label: Label = "praise".parse().unwrap();
//! assert_eq!(label, Label::Praise);
//! assert!(label.reply().starts_with("Thank you"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentiment / intent category assigned to a comment.
///
/// Variants are declared in alphabetical order of their names so that the
/// derived `Ord` matches the sorted class order used by the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Constructive criticism with suggestions for improvement.
    ConstructiveCriticism,
    /// Emotional reaction, personal story, or feelings.
    Emotional,
    /// Hateful or abusive content.
    HateAbuse,
    /// Positive feedback about the content.
    Praise,
    /// Question or a suggestion for future content.
    QuestionSuggestion,
    /// Spam or off-topic text.
    SpamIrrelevant,
    /// Support or encouragement for the creator.
    Support,
    /// Threatening content.
    Threat,
}

impl Label {
    /// All labels, in sorted order.
    pub const ALL: [Label; 8] = [
        Label::ConstructiveCriticism,
        Label::Emotional,
        Label::HateAbuse,
        Label::Praise,
        Label::QuestionSuggestion,
        Label::SpamIrrelevant,
        Label::Support,
        Label::Threat,
    ];

    /// The canonical snake_case name of this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::ConstructiveCriticism => "constructive_criticism",
            Label::Emotional => "emotional",
            Label::HateAbuse => "hate_abuse",
            Label::Praise => "praise",
            Label::QuestionSuggestion => "question_suggestion",
            Label::SpamIrrelevant => "spam_irrelevant",
            Label::Support => "support",
            Label::Threat => "threat",
        }
    }

    /// The canned reply for this label. Never empty.
    pub fn reply(&self) -> &'static str {
        match self {
            Label::Praise => {
                "Thank you so much for your positive feedback. We are glad you enjoyed it!"
            }
            Label::Support => {
                "We really appreciate your support. Your encouragement motivates us to keep creating."
            }
            Label::ConstructiveCriticism => {
                "Thank you for your honest feedback. We will use this to improve future content."
            }
            Label::HateAbuse => {
                "We are sorry you feel this way. We value respectful feedback and will keep working to improve."
            }
            Label::Threat => {
                "We take your concern seriously. Please share more details so we can address this responsibly."
            }
            Label::Emotional => {
                "Thank you for sharing your feelings. It means a lot that our content resonated with you."
            }
            Label::SpamIrrelevant => {
                "Thanks for your comment. We encourage everyone to keep the conversation relevant to the topic."
            }
            Label::QuestionSuggestion => {
                "Thank you for your suggestion. We will definitely consider creating content on this topic."
            }
        }
    }
}

/// Look up the reply template for a label name.
///
/// Unknown names resolve to an empty string.
pub fn reply_for(name: &str) -> &'static str {
    name.parse::<Label>().map(|label| label.reply()).unwrap_or("")
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown label name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label: {0}")]
pub struct ParseLabelError(pub String);

impl FromStr for Label {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Label::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == name)
            .ok_or_else(|| ParseLabelError(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_has_reply() {
        for label in Label::ALL {
            assert!(!label.reply().is_empty(), "{label} has no reply");
        }
    }

    #[test]
    fn test_round_trip_names() {
        for label in Label::ALL {
            assert_eq!(label.as_str().parse::<Label>().unwrap(), label);
            assert_eq!(label.to_string(), label.as_str());
        }
    }

    #[test]
    fn test_all_is_sorted() {
        let mut sorted = Label::ALL;
        sorted.sort();
        assert_eq!(sorted, Label::ALL);

        let names: Vec<_> = Label::ALL.iter().map(|l| l.as_str()).collect();
        let mut sorted_names = names.clone();
        sorted_names.sort();
        assert_eq!(names, sorted_names);
    }

    #[test]
    fn test_reply_for_unknown_name() {
        assert_eq!(reply_for("sarcasm"), "");
        assert_eq!(reply_for("threat"), Label::Threat.reply());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" support ".parse::<Label>().unwrap(), Label::Support);
        assert!("Support".parse::<Label>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Label::HateAbuse).unwrap();
        assert_eq!(json, "\"hate_abuse\"");
        let label: Label = serde_json::from_str("\"question_suggestion\"").unwrap();
        assert_eq!(label, Label::QuestionSuggestion);
    }
}
