//! Completion client: one call to the text-generation backend per request.
//!
//! `generate` never fails. Transport and protocol errors are logged and
//! returned as [`CompletionOutcome::Failed`]; an answer without text is
//! [`CompletionOutcome::Empty`]. Callers pick the user-facing wording with
//! [`CompletionOutcome::into_text`].

use crate::prompts::{self, WorkstationProfile};
use quadrax_core::error::ProviderError;
use quadrax_core::message::Message;
use quadrax_core::provider::{Provider, ProviderRequest};
use quadrax_telemetry::Logger;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shown when the backend answered but produced no text.
pub const EMPTY_FALLBACK: &str =
    "I couldn't generate a response. Please try rephrasing your question.";

/// Shown when the backend could not be reached or rejected the call.
pub const FAILURE_FALLBACK: &str =
    "I'm experiencing technical difficulties right now. Please try again later.";

/// Result of a completion call.
#[derive(Debug, Clone)]
pub enum CompletionOutcome {
    /// Non-empty text from the first completion
    Generated(String),
    /// The call succeeded but returned no usable text
    Empty,
    /// The call failed; already logged
    Failed(ProviderError),
}

impl CompletionOutcome {
    /// Short machine-readable label.
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionOutcome::Generated(_) => "generated",
            CompletionOutcome::Empty => "empty",
            CompletionOutcome::Failed(_) => "failed",
        }
    }

    /// User-facing text. Never empty.
    pub fn into_text(self) -> String {
        match self {
            CompletionOutcome::Generated(text) => text,
            CompletionOutcome::Empty => EMPTY_FALLBACK.to_string(),
            CompletionOutcome::Failed(_) => FAILURE_FALLBACK.to_string(),
        }
    }
}

/// Numeric knobs for one call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionParams {
    /// General assistant questions.
    pub const ASSIST: Self = Self {
        max_tokens: 1000,
        temperature: 0.7,
    };

    /// Workstation configuration analysis.
    pub const WORKSTATION_ANALYSIS: Self = Self {
        max_tokens: 800,
        temperature: 0.6,
    };
}

/// Wraps a [`Provider`] with a fixed model and the operator log.
pub struct CompletionClient {
    provider: Arc<dyn Provider>,
    model: String,
    logger: Arc<Logger>,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, logger: Arc<Logger>) -> Self {
        Self {
            provider,
            model: model.into(),
            logger,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one system + user prompt pair. Single attempt, no retry.
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> CompletionOutcome {
        let request = ProviderRequest {
            model: self.model.clone(),
            messages: vec![Message::system(system_prompt), Message::user(user_prompt)],
            temperature,
            max_tokens: Some(max_tokens),
        };

        match self.provider.complete(request).await {
            Ok(response) => match response.content {
                Some(text) if !text.trim().is_empty() => {
                    debug!(
                        provider = %self.provider.name(),
                        model = %response.model,
                        chars = text.len(),
                        "Completion generated"
                    );
                    CompletionOutcome::Generated(text)
                }
                _ => {
                    debug!(provider = %self.provider.name(), "Completion returned no content");
                    CompletionOutcome::Empty
                }
            },
            Err(e) => {
                let logged = self.logger.error(
                    "Completion request failed",
                    Some(json!({
                        "provider": self.provider.name(),
                        "model": self.model,
                        "error": e.to_string(),
                    })),
                );
                if let Err(log_err) = logged {
                    warn!(error = %log_err, "Failed to record completion failure");
                }
                CompletionOutcome::Failed(e)
            }
        }
    }

    /// General assistant answer to a free-text prompt.
    pub async fn assist(&self, prompt: &str) -> CompletionOutcome {
        let params = CompletionParams::ASSIST;
        self.generate(
            prompts::ASSISTANT_SYSTEM_PROMPT,
            prompt,
            params.max_tokens,
            params.temperature,
        )
        .await
    }

    /// Configuration recommendations for a workstation.
    pub async fn analyze_workstation(&self, profile: &WorkstationProfile) -> CompletionOutcome {
        let params = CompletionParams::WORKSTATION_ANALYSIS;
        self.generate(
            prompts::WORKSTATION_SYSTEM_PROMPT,
            &prompts::render_workstation_prompt(profile),
            params.max_tokens,
            params.temperature,
        )
        .await
    }
}
