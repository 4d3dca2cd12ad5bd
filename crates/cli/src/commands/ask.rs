//! `quadrax ask`: Route a message through the keyword router.

use quadrax_assistant::classify;

pub fn run(message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let intent = classify(message);
    tracing::debug!(intent = %intent, "Message routed");
    println!("{}", intent.template());
    Ok(())
}
