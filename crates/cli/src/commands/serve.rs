//! `quadrax serve`: Start the HTTP edge service.

use super::{build_logger, load_config};
use serde_json::json;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config()?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    let logger = build_logger(&config);
    if !config.has_api_key() {
        logger.warn(
            "No API key configured; completion endpoints will degrade to fallback text",
            Some(json!({ "api_url": config.api_url })),
        )?;
    }

    println!("QUADRAX•ML Assistant");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Model:     {}", config.model);
    println!("   Log level: {}", logger.level());

    quadrax_gateway::start(config, logger).await?;

    Ok(())
}
