//! Response modes selected from risk level

use serde::{Deserialize, Serialize};

/// Handling tier for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseMode {
    /// Risk 0-1: open exploration, safe territory
    Explore,
    /// Risk 2: gentle deepening, maintain witness
    Deepen,
    /// Risk 3: integration work, active grounding
    Integrate,
    /// Risk 4: co-regulation, slow pace, offer resources
    Regulate,
    /// Risk 5: crisis protocol, safety prioritized
    Crisis,
}

impl ResponseMode {
    /// Fixed risk → mode table. Levels above 5 are clamped first.
    pub fn from_risk(risk: u8) -> Self {
        match risk {
            0 | 1 => ResponseMode::Explore,
            2 => ResponseMode::Deepen,
            3 => ResponseMode::Integrate,
            4 => ResponseMode::Regulate,
            _ => ResponseMode::Crisis,
        }
    }

    pub fn is_crisis(&self) -> bool {
        *self == ResponseMode::Crisis
    }

    /// Get ANSI color name for terminal display
    pub fn color_name(&self) -> &'static str {
        match self {
            ResponseMode::Explore => "green",
            ResponseMode::Deepen => "cyan",
            ResponseMode::Integrate => "yellow",
            ResponseMode::Regulate => "magenta",
            ResponseMode::Crisis => "red",
        }
    }

    /// Get emoji for mode
    pub fn emoji(&self) -> &'static str {
        match self {
            ResponseMode::Explore => "🟢",
            ResponseMode::Deepen => "🔵",
            ResponseMode::Integrate => "🟡",
            ResponseMode::Regulate => "🟣",
            ResponseMode::Crisis => "🆘",
        }
    }
}

impl std::fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResponseMode::Explore => "EXPLORE",
            ResponseMode::Deepen => "DEEPEN",
            ResponseMode::Integrate => "INTEGRATE",
            ResponseMode::Regulate => "REGULATE",
            ResponseMode::Crisis => "CRISIS",
        };
        write!(f, "{}", name)
    }
}
