//! Phrasebook configuration and translator factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use phrasebook_core::model::{QuizDirection, TagSet};
use phrasebook_core::scoring::ScoringMetric;
use phrasebook_core::session::{QuizConfig, SamplingPolicy};
use phrasebook_core::store::DEFAULT_LIBRARY_PATH;
use phrasebook_core::traits::Translator;

use crate::libretranslate::LibreTranslator;
use crate::mock::MockTranslator;
use crate::openai::OpenAiTranslator;

/// Configuration for a single translation backend.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TranslatorConfig {
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        model: Option<String>,
    },
    LibreTranslate {
        #[serde(default = "default_libretranslate_url")]
        base_url: String,
        #[serde(default)]
        api_key: Option<String>,
    },
    Mock {
        #[serde(default)]
        response: Option<String>,
    },
}

impl std::fmt::Debug for TranslatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslatorConfig::OpenAI {
                api_key: _,
                base_url,
                model,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("model", model)
                .finish(),
            TranslatorConfig::LibreTranslate { base_url, api_key } => f
                .debug_struct("LibreTranslate")
                .field("base_url", base_url)
                .field("api_key", &api_key.as_ref().map(|_| "***"))
                .finish(),
            TranslatorConfig::Mock { response } => {
                f.debug_struct("Mock").field("response", response).finish()
            }
        }
    }
}

fn default_libretranslate_url() -> String {
    "http://localhost:5000".to_string()
}

/// Top-level phrasebook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhrasebookConfig {
    /// Snippet library file.
    #[serde(default = "default_library")]
    pub library: PathBuf,
    /// Questions per quiz.
    #[serde(default = "default_quiz_size")]
    pub quiz_size: usize,
    /// How quiz questions are picked.
    #[serde(default)]
    pub sampling: SamplingPolicy,
    /// How answers are scored.
    #[serde(default)]
    pub metric: ScoringMetric,
    /// Which side of a snippet is shown in a quiz.
    #[serde(default)]
    pub direction: QuizDirection,
    /// Language suggestions are translated into.
    #[serde(default = "default_target_language")]
    pub target_language: String,
    /// Language snippets are written in; detected when unset.
    #[serde(default)]
    pub source_language: Option<String>,
    /// Tags offered while recording.
    #[serde(default)]
    pub tags: TagSet,
    /// Translator used when `--translator` is not given.
    #[serde(default)]
    pub default_translator: Option<String>,
    /// Translator configurations keyed by name.
    #[serde(default)]
    pub translators: HashMap<String, TranslatorConfig>,
}

fn default_library() -> PathBuf {
    PathBuf::from(DEFAULT_LIBRARY_PATH)
}
fn default_quiz_size() -> usize {
    5
}
fn default_target_language() -> String {
    "zh-cn".to_string()
}

impl Default for PhrasebookConfig {
    fn default() -> Self {
        Self {
            library: default_library(),
            quiz_size: default_quiz_size(),
            sampling: SamplingPolicy::default(),
            metric: ScoringMetric::default(),
            direction: QuizDirection::default(),
            target_language: default_target_language(),
            source_language: None,
            tags: TagSet::default(),
            default_translator: None,
            translators: HashMap::new(),
        }
    }
}

impl PhrasebookConfig {
    /// Quiz settings from the configured defaults.
    pub fn quiz(&self) -> QuizConfig {
        QuizConfig {
            size: self.quiz_size,
            sampling: self.sampling,
            metric: self.metric,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a translator config.
fn resolve_translator_config(config: &TranslatorConfig) -> TranslatorConfig {
    match config {
        TranslatorConfig::OpenAI {
            api_key,
            base_url,
            model,
        } => TranslatorConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            model: model.clone(),
        },
        TranslatorConfig::LibreTranslate { base_url, api_key } => {
            TranslatorConfig::LibreTranslate {
                base_url: resolve_env_vars(base_url),
                api_key: api_key.as_ref().map(|k| resolve_env_vars(k)),
            }
        }
        TranslatorConfig::Mock { response } => TranslatorConfig::Mock {
            response: response.clone(),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `phrasebook.toml` in the current directory
/// 2. `~/.config/phrasebook/config.toml`
///
/// Environment variable overrides: `PHRASEBOOK_LIBRARY`, `PHRASEBOOK_OPENAI_KEY`.
pub fn load_config() -> Result<PhrasebookConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PhrasebookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("phrasebook.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PhrasebookConfig::default(),
    };

    if let Ok(library) = std::env::var("PHRASEBOOK_LIBRARY") {
        config.library = PathBuf::from(library);
    }

    if let Ok(key) = std::env::var("PHRASEBOOK_OPENAI_KEY") {
        config
            .translators
            .entry("openai".into())
            .or_insert(TranslatorConfig::OpenAI {
                api_key: String::new(),
                base_url: None,
                model: None,
            });
        if let Some(TranslatorConfig::OpenAI { api_key, .. }) = config.translators.get_mut("openai")
        {
            *api_key = key;
        }
    }

    Ok(config)
}

/// Parse a TOML config string and resolve `${VAR}` references.
pub fn parse_config(content: &str) -> Result<PhrasebookConfig> {
    let mut config: PhrasebookConfig = toml::from_str(content)?;
    config.translators = config
        .translators
        .iter()
        .map(|(k, v)| (k.clone(), resolve_translator_config(v)))
        .collect();
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("phrasebook"))
}

/// Create a translator instance from its configuration.
pub fn create_translator(config: &TranslatorConfig) -> Result<Box<dyn Translator>> {
    match config {
        TranslatorConfig::OpenAI {
            api_key,
            base_url,
            model,
        } => {
            anyhow::ensure!(!api_key.is_empty(), "openai translator has no API key");
            Ok(Box::new(OpenAiTranslator::new(
                api_key,
                base_url.clone(),
                model.clone(),
            )?))
        }
        TranslatorConfig::LibreTranslate { base_url, api_key } => {
            Ok(Box::new(LibreTranslator::new(base_url, api_key.clone())?))
        }
        TranslatorConfig::Mock { response } => Ok(Box::new(match response {
            Some(r) => MockTranslator::with_fixed_response(r),
            None => MockTranslator::new(HashMap::new()),
        })),
    }
}

/// Pick the translator named on the command line, or the configured default.
///
/// Returns `None` when neither names one, so recording falls back to manual
/// translation entry.
pub fn select_translator(
    config: &PhrasebookConfig,
    requested: Option<&str>,
) -> Result<Option<Box<dyn Translator>>> {
    let Some(name) = requested.or(config.default_translator.as_deref()) else {
        return Ok(None);
    };
    let Some(translator_config) = config.translators.get(name) else {
        anyhow::bail!(
            "translator '{}' not found in config. Available: {:?}",
            name,
            config.translators.keys().collect::<Vec<_>>()
        );
    };
    tracing::debug!(translator = name, "using translator");
    create_translator(translator_config).map(Some)
}
