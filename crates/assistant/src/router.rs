//! Keyword intent routing.
//!
//! An ordered rule table is scanned top to bottom; the first rule whose
//! keyword occurs in the lowercased message wins. Messages matching no
//! rule get the general welcome.

use crate::templates;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified purpose of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Workstation,
    Model,
    Data,
    General,
}

impl Intent {
    pub fn label(self) -> &'static str {
        match self {
            Intent::Workstation => "workstation",
            Intent::Model => "model",
            Intent::Data => "data",
            Intent::General => "general",
        }
    }

    /// The response template for this intent.
    pub fn template(self) -> &'static str {
        match self {
            Intent::Workstation => templates::WORKSTATION_HELP,
            Intent::Model => templates::MODEL_MANAGEMENT,
            Intent::Data => templates::DATA_MANAGEMENT,
            Intent::General => templates::GENERIC_WELCOME,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct IntentRule {
    intent: Intent,
    keyword: &'static str,
}

/// Priority order matters: "workstation model" is a workstation question.
const RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Workstation,
        keyword: "workstation",
    },
    IntentRule {
        intent: Intent::Model,
        keyword: "model",
    },
    IntentRule {
        intent: Intent::Data,
        keyword: "data",
    },
];

/// Classify a message. Total: every input maps to exactly one intent.
pub fn classify(message: &str) -> Intent {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| lowered.contains(rule.keyword))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::General)
}

/// Classify a message and return its response template.
pub fn route(message: &str) -> &'static str {
    classify(message).template()
}
