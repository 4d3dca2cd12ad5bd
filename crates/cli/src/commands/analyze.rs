//! `quadrax analyze`: Workstation configuration recommendations.

use super::{build_completion, build_logger, load_config};
use quadrax_assistant::WorkstationProfile;

pub async fn run(
    description: String,
    function_type: String,
    nature: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let logger = build_logger(&config);
    let client = build_completion(&config, logger);

    let profile = WorkstationProfile {
        description,
        function_type,
        nature: nature
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect(),
    };

    let outcome = client.analyze_workstation(&profile).await;
    println!("{}", outcome.into_text());

    Ok(())
}
