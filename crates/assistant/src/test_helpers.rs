//! Shared test helpers for completion tests.

use quadrax_core::error::ProviderError;
use quadrax_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use std::sync::Mutex;

/// A mock provider that answers with fixed content and remembers the last
/// request it saw.
pub struct RecordingProvider {
    content: Option<String>,
    last_request: Mutex<Option<ProviderRequest>>,
}

impl RecordingProvider {
    pub fn text(text: &str) -> Self {
        Self {
            content: Some(text.to_string()),
            last_request: Mutex::new(None),
        }
    }

    /// A provider whose answer carries no content at all.
    pub fn no_content() -> Self {
        Self {
            content: None,
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for RecordingProvider {
    fn name(&self) -> &str {
        "recording_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let model = request.model.clone();
        *self.last_request.lock().unwrap() = Some(request);
        Ok(ProviderResponse {
            content: self.content.clone(),
            model,
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
        })
    }
}

/// A provider whose every call fails at the transport level.
pub struct FailingProvider;

#[async_trait::async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing_mock"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::Network("connection refused".into()))
    }
}
