//! Translation service trait.
//!
//! Implemented by the `phrasebook-providers` crate. The recorder only needs a
//! best-guess translation string; quality is not its concern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A backend that suggests translations for recorded sentences.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable backend name (e.g. "openai").
    fn name(&self) -> &str;

    /// Translate `request.text` into `request.target_language`.
    async fn translate(&self, request: &TranslateRequest) -> anyhow::Result<String>;
}

/// Text to translate and the languages involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    /// The sentence to translate.
    pub text: String,
    /// Source language code; `None` lets the backend detect it.
    #[serde(default)]
    pub source_language: Option<String>,
    /// Target language code (e.g. "zh-cn").
    pub target_language: String,
}

impl TranslateRequest {
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_language: None,
            target_language: target_language.into(),
        }
    }

    pub fn with_source(mut self, source_language: Option<String>) -> Self {
        self.source_language = source_language;
        self
    }
}

/// Strip the quoting and whitespace chat models like to wrap answers in.
pub fn clean_translation(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = ['"', '“', '「']
        .iter()
        .zip(['"', '”', '」'])
        .find_map(|(open, close)| {
            trimmed
                .strip_prefix(*open)
                .and_then(|s| s.strip_suffix(close))
        })
        .unwrap_or(trimmed);
    unquoted.trim().to_string()
}
