//! Risk scorer: ConsentState → risk level, response mode, suggestions
//!
//! Rule order:
//! 1. alarm/medical/phone → risk 5, CRISIS, stop
//! 2. distress call → risk 5; comfort request → +1
//! 3. risk = max(risk, intensity base)
//! 4. +1 per overwhelm/numbness/shock
//! 5. +1 once for altered-state with any of those emotions
//! 6. wall → +1
//! 7. pace, meta → suggestions only
//! 8. risk → mode table
//!
//! Every increment saturates at 5.

use tracing::debug;
use crate::types::{
    Boundary, ConsentScoring, ConsentState, Emotion, Intensity, Meta, Pace, ResponseMode, Safety,
};
use crate::RISK_MAX;

/// Suggestions returned when a safety signal forces CRISIS
pub const OVERRIDE_SUGGESTIONS: [&str; 3] = [
    "Activate crisis protocol",
    "Offer emergency resources immediately",
    "Maintain witness presence",
];

const DISTRESS_SUGGESTIONS: [&str; 2] = ["Provide safety resources", "Ask about immediate needs"];
const COMFORT_SUGGESTIONS: [&str; 3] = ["Offer grounding", "Provide emotional comfort", "Slow pace if needed"];
const WALL_SUGGESTIONS: [&str; 2] = ["Respect hard boundary", "Do not push forward"];
const BRIDGE_SUGGESTIONS: [&str; 2] = ["Gentle crossing possible", "Check consent before proceeding"];
const PAUSE_SUGGESTIONS: [&str; 2] = ["Honor pause request", "Offer grounding"];
const BACKUP_SUGGESTIONS: [&str; 2] = ["Return to safer territory", "Acknowledge the step back"];
const COMBO_SUGGESTION: &str = "Altered state + intense emotion - proceed with care";

/// Risk scorer
#[derive(Debug, Default)]
pub struct RiskScorer;

impl RiskScorer {
    /// Create new scorer
    pub fn new() -> Self {
        Self
    }

    /// Score a state. Pure and total.
    pub fn score(&self, state: &ConsentState) -> ConsentScoring {
        // Step 1: absolute override
        if let Some(signal) = state.safety().filter(|s| s.is_absolute_override()) {
            debug!(safety = %signal, "Absolute safety override");
            let mut scoring = ConsentScoring::new(
                RISK_MAX,
                ResponseMode::Crisis,
                format!("Safety signal {} indicates immediate crisis", signal),
                to_strings(&OVERRIDE_SUGGESTIONS),
            );
            scoring.safety_override = Some(signal);
            return scoring;
        }

        let mut risk: u8 = 0;
        let mut suggestions: Vec<String> = Vec::new();

        // Step 2: remaining safety signals
        match state.safety() {
            Some(Safety::DistressCall) => {
                risk = RISK_MAX;
                suggestions.extend(to_strings(&DISTRESS_SUGGESTIONS));
            }
            Some(Safety::ComfortRequest) => {
                risk = bump(risk);
                suggestions.extend(to_strings(&COMFORT_SUGGESTIONS));
            }
            _ => {}
        }

        // Step 3: intensity floor
        risk = risk.max(state.intensity().base_risk());

        // Step 4: emotions, in stored order
        for emotion in state.emotions() {
            if emotion.is_high_intensity() {
                risk = bump(risk);
            }
            match emotion {
                Emotion::Rage => suggestions.push("Rage present - validate without escalating".to_string()),
                Emotion::Grief => suggestions.push("Grief present - honor tears, offer witness".to_string()),
                _ => {}
            }
        }

        // Step 5: altered state + intense emotion, applied once
        if state.intensity() == Intensity::AlteredState
            && state.emotions().iter().any(|e| e.is_high_intensity())
        {
            risk = bump(risk);
            suggestions.push(COMBO_SUGGESTION.to_string());
        }

        // Step 6: boundary
        match state.boundary() {
            Boundary::Wall => {
                risk = bump(risk);
                suggestions.extend(to_strings(&WALL_SUGGESTIONS));
            }
            Boundary::Bridge => suggestions.extend(to_strings(&BRIDGE_SUGGESTIONS)),
            _ => {}
        }

        // Step 7: pace
        match state.pace() {
            Pace::Pause => suggestions.extend(to_strings(&PAUSE_SUGGESTIONS)),
            Pace::Backup => suggestions.extend(to_strings(&BACKUP_SUGGESTIONS)),
            _ => {}
        }

        // Step 8: meta
        for meta in state.meta() {
            suggestions.push(meta_suggestion(*meta).to_string());
        }

        let risk = risk.min(RISK_MAX);
        let mode = ResponseMode::from_risk(risk);
        debug!(risk, mode = %mode, suggestions = suggestions.len(), "Scored consent state");

        ConsentScoring::new(
            risk,
            mode,
            format!(
                "Risk {} from intensity={}, boundary={}, pace={}",
                risk,
                state.intensity(),
                state.boundary(),
                state.pace()
            ),
            suggestions,
        )
    }
}

/// Score a ConsentState
pub fn score(state: &ConsentState) -> ConsentScoring {
    RiskScorer::new().score(state)
}

/// Saturating +1
fn bump(risk: u8) -> u8 {
    risk.saturating_add(1).min(RISK_MAX)
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn meta_suggestion(meta: Meta) -> &'static str {
    match meta {
        Meta::WitnessEye => "Meta-awareness active - can discuss the process itself",
        Meta::Mirror => "Reflect back patterns seen, support self-awareness",
        Meta::Mask => "Performance detected - invite authenticity gently",
        Meta::Puzzle => "Integration work requested - help connect pieces",
        Meta::RealityCheck => "Reality check needed - clarify literal vs symbolic",
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse;

    fn score_text(text: &str) -> ConsentScoring {
        score(&parse(text))
    }

    #[test]
    fn test_intensity_levels() {
        let cases = [
            ("🟢", 0, ResponseMode::Explore),
            ("🟡", 1, ResponseMode::Explore),
            ("🟠", 2, ResponseMode::Deepen),
            ("🔴", 3, ResponseMode::Integrate),
            ("🟣", 4, ResponseMode::Regulate),
        ];
        for (text, risk, mode) in cases {
            let scoring = score_text(text);
            assert_eq!(scoring.risk_level, risk, "risk for {}", text);
            assert_eq!(scoring.response_mode, mode, "mode for {}", text);
        }
    }

    #[test]
    fn test_absolute_override_ignores_other_channels() {
        for glyph in ["🚨", "🏥", "☎️"] {
            let scoring = score_text(&format!("🟢🚪💧🪞 {}", glyph));
            assert_eq!(scoring.risk_level, 5);
            assert_eq!(scoring.response_mode, ResponseMode::Crisis);
            assert!(scoring.safety_override.is_some());
            assert_eq!(scoring.suggestions, to_strings(&OVERRIDE_SUGGESTIONS));
        }
    }

    #[test]
    fn test_distress_call_sets_crisis_without_override() {
        let scoring = score_text("🆘 help");
        assert_eq!(scoring.risk_level, 5);
        assert_eq!(scoring.response_mode, ResponseMode::Crisis);
        assert_eq!(scoring.safety_override, None);
        assert_eq!(scoring.suggestions[0], "Provide safety resources");
        assert_eq!(scoring.suggestions[1], "Ask about immediate needs");
    }

    #[test]
    fn test_comfort_request_adds_one_and_grounding() {
        let scoring = score_text("🫂");
        assert_eq!(scoring.risk_level, 1);
        assert!(scoring.suggests("grounding"));

        // Intensity floor dominates the +1
        let scoring = score_text("🔴⏸️🫂");
        assert_eq!(scoring.risk_level, 3);
    }

    #[test]
    fn test_high_intensity_emotions_stack() {
        assert_eq!(score_text("🌊").risk_level, 1);
        assert_eq!(score_text("🌊❄️").risk_level, 2);
        assert_eq!(score_text("🌊❄️⚡").risk_level, 3);
    }

    #[test]
    fn test_grief_and_rage_only_advise() {
        let scoring = score_text("💧🔥");
        assert_eq!(scoring.risk_level, 0);
        assert!(scoring.suggests("Grief present"));
        assert!(scoring.suggests("Rage present"));
    }

    #[test]
    fn test_altered_state_combo_applied_once() {
        // 4 base + 1 shock + 1 combo, clamped
        let scoring = score_text("🟣⚡");
        assert_eq!(scoring.risk_level, 5);
        assert_eq!(scoring.response_mode, ResponseMode::Crisis);
        let combos = scoring.suggestions.iter().filter(|s| s.as_str() == COMBO_SUGGESTION).count();
        assert_eq!(combos, 1);

        let scoring = score_text("🟣🌊❄️⚡");
        let combos = scoring.suggestions.iter().filter(|s| s.as_str() == COMBO_SUGGESTION).count();
        assert_eq!(combos, 1);
    }

    #[test]
    fn test_combo_requires_high_intensity_emotion() {
        let scoring = score_text("🟣💧");
        assert_eq!(scoring.risk_level, 4);
        assert!(!scoring.suggests("Altered state"));
    }

    #[test]
    fn test_wall_and_bridge() {
        let wall = score_text("🧱");
        assert_eq!(wall.risk_level, 1);
        assert!(wall.suggestions.contains(&"Respect hard boundary".to_string()));
        assert!(wall.suggestions.contains(&"Do not push forward".to_string()));

        let bridge = score_text("🌉");
        assert_eq!(bridge.risk_level, 0);
        assert!(bridge.suggests("Gentle crossing"));
    }

    #[test]
    fn test_pace_suggestions() {
        let pause = score_text("⏸️");
        assert_eq!(pause.risk_level, 0);
        assert!(pause.suggests("pause"));

        let backup = score_text("⏪");
        assert_eq!(backup.risk_level, 0);
        assert!(backup.suggests("step back"));

        assert!(score_text("⏩").suggestions.is_empty());
    }

    #[test]
    fn test_meta_suggestion_per_signal() {
        let scoring = score_text("🪞🎭");
        assert_eq!(scoring.risk_level, 0);
        assert_eq!(scoring.suggestions.len(), 2);
        assert!(scoring.suggests("reflect"));
        assert!(scoring.suggests("authenticity"));
    }

    #[test]
    fn test_risk_clamped_at_five() {
        let scoring = score_text("🔴🌊❄️⚡🧱");
        assert_eq!(scoring.risk_level, 5);
        assert_eq!(scoring.response_mode, ResponseMode::Crisis);
    }

    #[test]
    fn test_mode_table() {
        assert_eq!(ResponseMode::from_risk(0), ResponseMode::Explore);
        assert_eq!(ResponseMode::from_risk(1), ResponseMode::Explore);
        assert_eq!(ResponseMode::from_risk(2), ResponseMode::Deepen);
        assert_eq!(ResponseMode::from_risk(3), ResponseMode::Integrate);
        assert_eq!(ResponseMode::from_risk(4), ResponseMode::Regulate);
        assert_eq!(ResponseMode::from_risk(5), ResponseMode::Crisis);
    }

    #[test]
    fn test_rationale_names_channels() {
        let scoring = score_text("🟠🧱⏸️");
        assert_eq!(
            scoring.rationale,
            "Risk 3 from intensity=approaching-edge, boundary=wall, pace=pause"
        );
    }
}
