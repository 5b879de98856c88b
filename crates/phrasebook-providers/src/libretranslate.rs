//! LibreTranslate API translator.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use phrasebook_core::traits::{TranslateRequest, Translator};

use crate::error::{check_status, ProviderError};

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Translator backed by a LibreTranslate `/translate` endpoint.
pub struct LibreTranslator {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl LibreTranslator {
    pub fn new(base_url: &str, api_key: Option<String>) -> anyhow::Result<Self> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
        })
    }
}

#[derive(Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: String,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// LibreTranslate uses bare ISO codes (`zh`, not `zh-cn`).
fn language_code(code: &str) -> String {
    code.split(['-', '_'])
        .next()
        .unwrap_or(code)
        .to_lowercase()
}

#[async_trait]
impl Translator for LibreTranslator {
    fn name(&self) -> &str {
        "libretranslate"
    }

    #[instrument(skip(self, request), fields(target = %request.target_language))]
    async fn translate(&self, request: &TranslateRequest) -> anyhow::Result<String> {
        let source = request
            .source_language
            .as_deref()
            .map(language_code)
            .unwrap_or_else(|| "auto".to_string());
        let body = LibreRequest {
            q: &request.text,
            source: &source,
            target: language_code(&request.target_language),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, DEFAULT_TIMEOUT_SECS))?;
        let response = check_status(response).await?;

        let api_response: LibreResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let text = api_response.translated_text.trim().to_string();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse(self.name().to_string()).into());
        }
        Ok(text)
    }
}
