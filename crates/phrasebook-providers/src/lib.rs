//! phrasebook-providers: translation service integrations.
//!
//! Implements the `Translator` trait for OpenAI-compatible chat APIs and
//! LibreTranslate, plus a mock for tests, and loads the phrasebook
//! configuration that selects between them.

pub mod config;
pub mod error;
pub mod libretranslate;
pub mod mock;
pub mod openai;

pub use config::{create_translator, load_config, PhrasebookConfig, TranslatorConfig};
pub use error::ProviderError;
