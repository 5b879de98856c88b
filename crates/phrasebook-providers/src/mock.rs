//! Mock translator for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use phrasebook_core::traits::{TranslateRequest, Translator};

use crate::error::ProviderError;

/// A translator that answers from a fixed table, without network access.
///
/// Texts not in the table get the default response; with no default the
/// call fails, which lets tests exercise the manual-entry fallback.
pub struct MockTranslator {
    /// Map of source text → translation.
    responses: HashMap<String, String>,
    /// Response for texts not in the table.
    default_response: Option<String>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<TranslateRequest>>,
}

impl MockTranslator {
    /// Create a mock with the given text→translation mappings.
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same translation.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            default_response: Some(response.to_string()),
            ..Self::new(HashMap::new())
        }
    }

    /// Get the number of calls made to this translator.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this translator.
    pub fn last_request(&self) -> Option<TranslateRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(&self, request: &TranslateRequest) -> anyhow::Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        self.responses
            .get(request.text.trim())
            .or(self.default_response.as_ref())
            .cloned()
            .ok_or_else(|| ProviderError::EmptyResponse("mock".into()).into())
    }
}
