pub mod analyze;
pub mod ask;
pub mod doctor;
pub mod generate;
pub mod serve;
pub mod taxonomy;

use quadrax_assistant::CompletionClient;
use quadrax_config::AppConfig;
use quadrax_telemetry::{Logger, LoggerConfig};
use std::sync::Arc;

/// Load configuration, mapping the error into a printable message.
pub(crate) fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// The operator logger described by `[logging]`.
pub(crate) fn build_logger(config: &AppConfig) -> Arc<Logger> {
    Arc::new(Logger::new(LoggerConfig::new(
        &config.logging.level,
        config.logging.dir.clone(),
        config.logging.production,
    )))
}

/// Completion client over the configured backend.
pub(crate) fn build_completion(config: &AppConfig, logger: Arc<Logger>) -> CompletionClient {
    let provider = quadrax_providers::build_from_config(config);
    CompletionClient::new(provider, &config.model, logger)
}
