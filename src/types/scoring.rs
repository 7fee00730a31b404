//! Risk scoring result

use serde::Serialize;
use crate::types::{ResponseMode, Safety};

/// Output of the risk scorer. A pure function of a ConsentState.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsentScoring {
    /// 0-5, clamped
    pub risk_level: u8,
    pub response_mode: ResponseMode,
    /// Human-readable summary of how the level was reached
    pub rationale: String,
    /// Advisory strings in rule order (duplicates permitted)
    pub suggestions: Vec<String>,
    /// Set when an absolute safety signal short-circuited scoring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_override: Option<Safety>,
}

impl ConsentScoring {
    pub fn new(risk_level: u8, response_mode: ResponseMode, rationale: String, suggestions: Vec<String>) -> Self {
        Self {
            risk_level,
            response_mode,
            rationale,
            suggestions,
            safety_override: None,
        }
    }

    pub fn is_crisis(&self) -> bool {
        self.response_mode.is_crisis()
    }

    /// True when any suggestion contains `needle` (case-insensitive)
    pub fn suggests(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.suggestions.iter().any(|s| s.to_lowercase().contains(&needle))
    }
}
