//! System prompts and the workstation analysis template.

use serde::{Deserialize, Serialize};

pub const ASSISTANT_SYSTEM_PROMPT: &str = "\
You are the QUADRAX•ML assistant, helping users manage machine learning \
workstations, models and data. Answer clearly and concisely. When a request \
needs an action in the application, explain the steps to take.";

pub const WORKSTATION_SYSTEM_PROMPT: &str = "\
You are an infrastructure advisor for QUADRAX•ML workstations. Given a \
workstation description, recommend a practical configuration. Be specific \
about sizes and package names, and keep each section short.";

/// What a user tells us about a workstation they want to set up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkstationProfile {
    /// Free-text description of the workstation's purpose
    pub description: String,

    /// Function type label, e.g. "training" or "inference"
    #[serde(alias = "functionType")]
    pub function_type: String,

    /// Ordered nature tags, e.g. ["gpu-intensive", "batch"]
    #[serde(default)]
    pub nature: Vec<String>,
}

/// Render the user prompt for a workstation analysis.
pub fn render_workstation_prompt(profile: &WorkstationProfile) -> String {
    format!(
        "Analyze this workstation configuration and provide recommendations:\n\
         \n\
         Description: {}\n\
         Function Type: {}\n\
         Nature: {}\n\
         \n\
         Please provide:\n\
         1. Optimal resource allocation (CPU, RAM, GPU, storage)\n\
         2. Recommended software packages\n\
         3. Security considerations\n\
         4. Performance optimization tips",
        profile.description,
        profile.function_type,
        profile.nature.join(", ")
    )
}
