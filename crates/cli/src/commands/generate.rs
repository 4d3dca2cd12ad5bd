//! `quadrax generate`: One completion for a free-form prompt.

use super::{build_completion, build_logger, load_config};

pub async fn run(prompt: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let logger = build_logger(&config);
    let client = build_completion(&config, logger);

    let outcome = client.assist(prompt).await;
    tracing::debug!(outcome = outcome.kind(), model = %client.model(), "Completion finished");
    println!("{}", outcome.into_text());

    Ok(())
}
