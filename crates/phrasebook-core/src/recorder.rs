//! Interactive snippet recording.
//!
//! For every snippet the user types a sentence, checks (or replaces) the
//! suggested translation, picks a tag, and the snippet is appended to the
//! library. Recording continues until the user answers `#`.

use anyhow::Result;

use crate::input::{is_confirmation, AnswerSource};
use crate::model::{Snippet, TagSet};
use crate::store::SnippetStore;
use crate::traits::{clean_translation, TranslateRequest, Translator};

/// Response that ends a recording run.
pub const STOP_MARKER: &str = "#";

/// Drives the record workflow against a library.
pub struct Recorder<'a> {
    store: &'a SnippetStore,
    tags: &'a TagSet,
    translator: Option<&'a dyn Translator>,
    target_language: String,
    source_language: Option<String>,
}

impl<'a> Recorder<'a> {
    pub fn new(store: &'a SnippetStore, tags: &'a TagSet, target_language: &str) -> Self {
        Self {
            store,
            tags,
            translator: None,
            target_language: target_language.to_string(),
            source_language: None,
        }
    }

    /// Suggest translations with `translator`.
    pub fn with_translator(mut self, translator: &'a dyn Translator) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_source_language(mut self, source_language: Option<String>) -> Self {
        self.source_language = source_language;
        self
    }

    /// Record snippets until the user stops. Returns how many were written.
    pub async fn record(&self, input: &mut dyn AnswerSource) -> Result<usize> {
        let mut written = 0;
        loop {
            if self.record_one(input).await?.is_some() {
                written += 1;
            }
            let flag = input.prompt_and_read("press Enter to record another snippet, '#' to stop:")?;
            if flag.trim() == STOP_MARKER {
                break;
            }
        }
        tracing::info!(written, "recording finished");
        Ok(written)
    }

    /// Record a single snippet. Returns `None` when nothing was written.
    pub async fn record_one(&self, input: &mut dyn AnswerSource) -> Result<Option<Snippet>> {
        let sentence = input.prompt_and_read("please input the snippet:")?;
        let sentence = sentence.trim();
        if sentence.is_empty() {
            tracing::info!("empty snippet, nothing recorded");
            return Ok(None);
        }

        let translation = match self.suggest(sentence).await {
            Some(suggestion) => {
                let response = input.prompt_and_read(&format!(
                    "suggested translation:\n{suggestion}\n\
                     if correct press Enter (or y), otherwise type the corrected translation:"
                ))?;
                if is_confirmation(&response) {
                    suggestion
                } else {
                    response.trim().to_string()
                }
            }
            None => input
                .prompt_and_read("please input the translation:")?
                .trim()
                .to_string(),
        };
        if translation.is_empty() {
            tracing::warn!("no translation given, snippet skipped");
            return Ok(None);
        }

        let tag_id = input.prompt_and_read(&format!(
            "tags: {}\nplease input the tag id:",
            self.tags
        ))?;
        let tag = self.tags.resolve(&tag_id);

        let snippet = Snippet {
            sentence: sentence.to_string(),
            translation,
            tag,
            time: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
        };
        self.store.append(&snippet)?;
        Ok(Some(snippet))
    }

    /// Ask the translator for a suggestion. Failures fall back to manual entry.
    async fn suggest(&self, sentence: &str) -> Option<String> {
        let translator = self.translator?;
        let request = TranslateRequest::new(sentence, &self.target_language)
            .with_source(self.source_language.clone());

        match translator.translate(&request).await {
            Ok(raw) => {
                let cleaned = clean_translation(&raw);
                if cleaned.is_empty() {
                    tracing::warn!(translator = translator.name(), "empty translation suggestion");
                    None
                } else {
                    Some(cleaned)
                }
            }
            Err(e) => {
                tracing::warn!(translator = translator.name(), "translation failed: {e:#}");
                None
            }
        }
    }
}
