//! Core data model types for phrasebook.
//!
//! Snippets are the persisted sentence/translation records; items are the
//! prompt/answer pairs a quiz is built from.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A recorded sentence together with its translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// The sentence as originally entered.
    #[serde(alias = "front")]
    pub sentence: String,
    /// Its translation. Older libraries store this as a one-element array.
    #[serde(alias = "back", deserialize_with = "deserialize_translation")]
    pub translation: String,
    /// Category the snippet was filed under.
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Date the snippet was recorded (`YYYY-MM-DD`).
    #[serde(alias = "date", default)]
    pub time: String,
}

fn default_tag() -> String {
    OTHER_TAG.to_string()
}

/// Accepts either `"text"` or a nested array whose first string is the text.
fn deserialize_translation<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    fn first_string(value: &serde_json::Value) -> Option<String> {
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(values) => values.first().and_then(first_string),
            _ => None,
        }
    }

    let value = serde_json::Value::deserialize(deserializer)?;
    first_string(&value).ok_or_else(|| {
        serde::de::Error::custom("translation must be a string or an array of strings")
    })
}

/// One quiz question: the prompt shown and the answer expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Text shown to the user.
    pub front: String,
    /// Text the answer is scored against.
    pub back: String,
}

impl Item {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Which side of a snippet is shown as the prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizDirection {
    /// Show the translation, answer with the original sentence.
    #[default]
    Translate,
    /// Show the sentence, answer with its translation.
    Reverse,
}

impl QuizDirection {
    /// Build the quiz item for a snippet.
    pub fn item(&self, snippet: &Snippet) -> Item {
        match self {
            QuizDirection::Translate => Item::new(&snippet.translation, &snippet.sentence),
            QuizDirection::Reverse => Item::new(&snippet.sentence, &snippet.translation),
        }
    }
}

impl fmt::Display for QuizDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizDirection::Translate => write!(f, "translate"),
            QuizDirection::Reverse => write!(f, "reverse"),
        }
    }
}

impl FromStr for QuizDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "translate" => Ok(QuizDirection::Translate),
            "reverse" => Ok(QuizDirection::Reverse),
            other => Err(format!("unknown quiz direction: {other}")),
        }
    }
}

/// Tag used when no other tag applies.
pub const OTHER_TAG: &str = "Other";

/// The tags a snippet can be filed under, addressed by 1-based id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new(tags: Vec<String>) -> Self {
        Self(tags)
    }

    /// Resolve a user-entered id.
    ///
    /// Unknown or malformed ids fall back to the last tag in the set, which is
    /// `Other` for the default set. An empty set always yields `Other`.
    pub fn resolve(&self, id: &str) -> String {
        id.trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| self.0.get(idx))
            .or_else(|| self.0.last())
            .cloned()
            .unwrap_or_else(|| OTHER_TAG.to_string())
    }

    /// `(id, name)` pairs in display order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().enumerate().map(|(i, t)| (i + 1, t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TagSet {
    fn default() -> Self {
        Self(
            [
                "Abstract",
                "Introduction",
                "Related_works",
                "Method",
                "Experiment",
                "Discussion",
                OTHER_TAG,
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
        )
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.entries().map(|(id, t)| format!("{id}: {t}")).collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_display_and_parse() {
        assert_eq!(QuizDirection::Translate.to_string(), "translate");
        assert_eq!("Reverse".parse::<QuizDirection>().unwrap(), QuizDirection::Reverse);
        assert!("sideways".parse::<QuizDirection>().is_err());
    }

    #[test]
    fn direction_picks_prompt_side() {
        let snippet = Snippet {
            sentence: "good morning".into(),
            translation: "早上好".into(),
            tag: "Other".into(),
            time: "2020-05-28".into(),
        };
        let item = QuizDirection::Translate.item(&snippet);
        assert_eq!(item.front, "早上好");
        assert_eq!(item.back, "good morning");

        let item = QuizDirection::Reverse.item(&snippet);
        assert_eq!(item.front, "good morning");
        assert_eq!(item.back, "早上好");
    }

    #[test]
    fn snippet_reads_nested_translation() {
        let line = r#"{"sentence": "We propose a method.", "translation": ["我们提出一种方法。"], "time": "2020-05-28", "tag": "Method"}"#;
        let snippet: Snippet = serde_json::from_str(line).unwrap();
        assert_eq!(snippet.translation, "我们提出一种方法。");
        assert_eq!(snippet.tag, "Method");
    }

    #[test]
    fn snippet_accepts_front_back_aliases() {
        let line = r#"{"front": "hello", "back": "你好", "date": "2021-01-01"}"#;
        let snippet: Snippet = serde_json::from_str(line).unwrap();
        assert_eq!(snippet.sentence, "hello");
        assert_eq!(snippet.translation, "你好");
        assert_eq!(snippet.tag, OTHER_TAG);
        assert_eq!(snippet.time, "2021-01-01");
    }

    #[test]
    fn snippet_rejects_numeric_translation() {
        let line = r#"{"sentence": "one", "translation": 1}"#;
        assert!(serde_json::from_str::<Snippet>(line).is_err());
    }

    #[test]
    fn tag_resolution() {
        let tags = TagSet::default();
        assert_eq!(tags.resolve("1"), "Abstract");
        assert_eq!(tags.resolve(" 4 "), "Method");
        assert_eq!(tags.resolve("0"), OTHER_TAG);
        assert_eq!(tags.resolve("42"), OTHER_TAG);
        assert_eq!(tags.resolve("method"), OTHER_TAG);
        assert_eq!(tags.len(), 7);
    }

    #[test]
    fn unknown_id_falls_back_to_last_custom_tag() {
        let tags = TagSet::new(vec!["Verbs".into(), "Nouns".into()]);
        assert_eq!(tags.resolve("2"), "Nouns");
        assert_eq!(tags.resolve("9"), "Nouns");
        assert_eq!(tags.resolve(""), "Nouns");

        let empty = TagSet::new(Vec::new());
        assert_eq!(empty.resolve("1"), OTHER_TAG);
    }

    #[test]
    fn tag_set_display() {
        let tags = TagSet::new(vec!["A".into(), "B".into()]);
        assert_eq!(tags.to_string(), "1: A, 2: B");
    }
}
