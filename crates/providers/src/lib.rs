//! Text-generation provider implementations for QUADRAX•ML.
//!
//! All providers implement the `quadrax_core::Provider` trait.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use quadrax_core::provider::Provider;
use std::sync::Arc;

/// Build the configured provider.
///
/// A missing API key is not an error here: calls will fail upstream and
/// the completion client turns that into its fallback answer.
pub fn build_from_config(config: &quadrax_config::AppConfig) -> Arc<dyn Provider> {
    if config.api_key.is_none() {
        tracing::warn!(api_url = %config.api_url, "No API key configured for the completion provider");
    }

    Arc::new(OpenAiCompatProvider::new(
        provider_name(&config.api_url),
        &config.api_url,
        config.api_key.clone().unwrap_or_default(),
    ))
}

/// Derive a short provider name from well-known base URLs.
fn provider_name(api_url: &str) -> &'static str {
    if api_url.contains("api.openai.com") {
        "openai"
    } else if api_url.contains("api.groq.com") {
        "groq"
    } else if api_url.contains("openrouter.ai") {
        "openrouter"
    } else if api_url.contains("localhost:11434") {
        "ollama"
    } else {
        "custom"
    }
}
