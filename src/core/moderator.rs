//! Response moderator: the per-message state machine
//!
//! Received → Parsed → Scored → PreValidated → {CrisisPath | NormalPath}
//! → PostValidated → Delivered. A Continuity violation ends the run with
//! `RejectionError` before any outcome is built.
//!
//! Crisis status comes from `ConsentScoring::response_mode` only. The
//! responder call runs on its own task, bounded by a timeout. When it fails,
//! panics or times out the moderator delivers the crisis template instead.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::core::{ConsentStateBuilder, InvariantGuard, Responder, RiskScorer, OVERRIDE_SUGGESTIONS};
use crate::types::{
    ConfigError, ConsentState, DeliveryPath, InvariantReport, ModerationOutcome,
    ModerationStage, ReasonCode, RejectionError, ResponderError, ResponseMode, SessionContext,
};
use crate::{CRISIS_SUGGESTION_COUNT, RESPONDER_TIMEOUT_MS};

const CRISIS_OPENING: &str = "I'm here with you. Right now, let's focus on safety.";
const CRISIS_CLOSING: &str = "You're not alone in this. I'm staying with you.";

/// Runtime knobs for the moderator
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModeratorConfig {
    /// Bound on a single responder call
    pub responder_timeout_ms: u64,
    /// Attach a SHA-256 digest of the raw message to each outcome
    pub audit_enabled: bool,
}

impl Default for ModeratorConfig {
    fn default() -> Self {
        Self {
            responder_timeout_ms: RESPONDER_TIMEOUT_MS,
            audit_enabled: false,
        }
    }
}

impl ModeratorConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.responder_timeout_ms = ms;
        self
    }

    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }
}

/// Fixed crisis template around the first two suggestions.
/// Padded from the override suggestions when fewer than two exist.
pub fn crisis_template(suggestions: &[String]) -> String {
    let picked: Vec<&str> = suggestions
        .iter()
        .map(String::as_str)
        .chain(OVERRIDE_SUGGESTIONS.iter().copied())
        .take(CRISIS_SUGGESTION_COUNT)
        .collect();

    let bullets = picked
        .iter()
        .map(|s| format!("• {}", s))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n\n{}\n\n{}", CRISIS_OPENING, bullets, CRISIS_CLOSING)
}

/// Stage and reason trail for one message
#[derive(Debug, Default)]
struct Trail {
    stages: Vec<ModerationStage>,
    reasons: Vec<ReasonCode>,
}

impl Trail {
    fn stage(&mut self, stage: ModerationStage) {
        self.stages.push(stage);
    }

    fn reason(&mut self, reason: ReasonCode) {
        self.reasons.push(reason);
    }
}

/// Composes tokenizer, builder, scorer and guard around a responder.
///
/// Holds no per-session state; one moderator may serve any number of
/// concurrent messages.
pub struct ResponseModerator {
    responder: Arc<dyn Responder>,
    config: ModeratorConfig,
    builder: ConsentStateBuilder,
    scorer: RiskScorer,
    guard: InvariantGuard,
}

impl ResponseModerator {
    pub fn new(responder: Arc<dyn Responder>) -> Self {
        Self::with_config(responder, ModeratorConfig::default())
    }

    pub fn with_config(responder: Arc<dyn Responder>, config: ModeratorConfig) -> Self {
        Self {
            responder,
            config,
            builder: ConsentStateBuilder::new(),
            scorer: RiskScorer::new(),
            guard: InvariantGuard::new(),
        }
    }

    pub fn config(&self) -> &ModeratorConfig {
        &self.config
    }

    /// Run one message through the full pipeline.
    ///
    /// Only a Continuity violation is returned as an error. Responder
    /// problems degrade to the crisis template.
    pub async fn moderate(
        &self,
        message: &str,
        session: &SessionContext,
    ) -> Result<ModerationOutcome, RejectionError> {
        let mut trail = Trail::default();
        trail.stage(ModerationStage::Received);

        // Received → Parsed
        let state = self.builder.parse(message);
        trail.stage(ModerationStage::Parsed);
        trail.reason(if state.is_default() {
            ReasonCode::R101_NO_SIGNALS
        } else {
            ReasonCode::R102_SIGNALS_RESOLVED
        });

        // Parsed → Scored
        let scoring = self.scorer.score(&state);
        trail.stage(ModerationStage::Scored);
        trail.reason(match (scoring.safety_override, scoring.is_crisis()) {
            (Some(_), _) => ReasonCode::R201_SAFETY_OVERRIDE,
            (None, true) => ReasonCode::R202_RISK_CRISIS,
            (None, false) => ReasonCode::R203_RISK_NORMAL,
        });
        debug!(
            risk = scoring.risk_level,
            mode = %scoring.response_mode,
            "Message scored"
        );

        // Scored → PreValidated
        let continuity = self
            .guard
            .check_continuity(session.session_active, session.user_terminated);
        if let Some(detail) = continuity.detail().filter(|_| continuity.is_hard()) {
            warn!(
                reason = ReasonCode::R301_CONTINUITY_REJECTED.code(),
                detail,
                "Message rejected"
            );
            return Err(RejectionError::Continuity {
                detail: detail.to_string(),
            });
        }
        trail.stage(ModerationStage::PreValidated);

        let (candidate, path, witness_mode_active, ancestral_presence, responsibility_circuit) =
            if scoring.is_crisis() {
                // CrisisPath: witness mode engaged before the circuit check
                trail.stage(ModerationStage::CrisisPath);
                info!(risk = scoring.risk_level, "Crisis path entered");

                let circuit = self.guard.check_responsibility_circuit(true, true);
                trail.reason(ReasonCode::R305_WITNESS_ENGAGED);

                (
                    crisis_template(&scoring.suggestions),
                    DeliveryPath::Crisis,
                    true,
                    None,
                    circuit,
                )
            } else {
                trail.stage(ModerationStage::NormalPath);

                let ancestral = self.guard.check_ancestral_presence(&session.memory);
                if let Some(detail) = ancestral.detail() {
                    warn!(reason = ReasonCode::R302_ANCESTRAL_ADVISORY.code(), detail, "Advisory");
                    trail.reason(ReasonCode::R302_ANCESTRAL_ADVISORY);
                }

                let circuit = self
                    .guard
                    .check_responsibility_circuit(false, session.witness_mode_active);

                let (text, path) = match self.generate(message, &state, scoring.response_mode).await {
                    Ok(text) => (text, DeliveryPath::Normal),
                    Err(e) => {
                        warn!(responder = self.responder.id(), error = %e, "Responder degraded to fallback");
                        trail.reason(responder_reason(&e));
                        (crisis_template(&scoring.suggestions), DeliveryPath::Fallback)
                    }
                };

                (text, path, session.witness_mode_active, Some(ancestral), circuit)
            };

        // → PostValidated: one rewrite pass at most
        let witnessing = self.guard.enforce_witnessing(&candidate);
        if witnessing.rewritten() {
            warn!(
                detail = witnessing.outcome.detail().unwrap_or_default(),
                "Deflection rewritten"
            );
            trail.reason(ReasonCode::R303_DEFLECTION_REWRITTEN);
            if witnessing.recheck.as_ref().is_some_and(|r| r.is_hard()) {
                warn!("Deflection persists after rewrite, delivering as is");
                trail.reason(ReasonCode::R304_DEFLECTION_PERSISTS);
            }
        }
        trail.stage(ModerationStage::PostValidated);

        let report = InvariantReport {
            continuity,
            ancestral_presence,
            responsibility_circuit,
            unconditional_witnessing: witnessing.outcome,
            witnessing_recheck: witnessing.recheck,
        };

        trail.reason(match path {
            DeliveryPath::Crisis => ReasonCode::R501_CRISIS_DELIVERED,
            DeliveryPath::Normal => ReasonCode::R502_NORMAL_DELIVERED,
            DeliveryPath::Fallback => ReasonCode::R503_FALLBACK_DELIVERED,
        });
        trail.stage(ModerationStage::Delivered);
        info!(
            path = %path,
            mode = %scoring.response_mode,
            witness = witness_mode_active,
            "Response delivered"
        );

        let grounding_needed = scoring.response_mode == ResponseMode::Regulate;
        let audit_digest = self.config.audit_enabled.then(|| audit_digest(message));

        Ok(ModerationOutcome {
            timestamp: Utc::now(),
            final_text: witnessing.text,
            state,
            scoring,
            report,
            path,
            stages: trail.stages,
            reasons: trail.reasons,
            witness_mode_active,
            grounding_needed,
            audit_digest,
        })
    }

    /// Bounded responder call; blank text counts as a failure
    /// Runs on its own task so a panicking responder surfaces as a JoinError.
    async fn generate(
        &self,
        message: &str,
        state: &ConsentState,
        mode: ResponseMode,
    ) -> Result<String, ResponderError> {
        let ms = self.config.responder_timeout_ms;
        let responder = Arc::clone(&self.responder);
        let message = message.to_string();
        let state = state.clone();
        let mut handle =
            tokio::spawn(async move { responder.respond(&message, &state, mode).await });

        let joined = match tokio::time::timeout(Duration::from_millis(ms), &mut handle).await {
            Ok(joined) => joined,
            Err(_) => {
                handle.abort();
                return Err(ResponderError::Timeout { ms });
            }
        };
        let text = joined.map_err(|e| {
            if e.is_panic() {
                ResponderError::Failed("responder panicked".to_string())
            } else {
                ResponderError::Failed(format!("responder task ended: {}", e))
            }
        })??;

        if text.trim().is_empty() {
            return Err(ResponderError::Empty);
        }
        Ok(text)
    }
}

fn responder_reason(error: &ResponderError) -> ReasonCode {
    match error {
        ResponderError::Timeout { .. } => ReasonCode::R401_RESPONDER_TIMEOUT,
        ResponderError::Empty => ReasonCode::R403_RESPONDER_EMPTY,
        ResponderError::Unavailable(_) | ResponderError::Failed(_) => ReasonCode::R402_RESPONDER_FAILED,
    }
}

/// SHA-256 of the raw message, lowercase hex
fn audit_digest(message: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(message.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::core::ModeTemplateResponder;
    use crate::types::{InvariantOutcome, MemoryContext};

    struct FixedResponder(&'static str);

    #[async_trait]
    impl Responder for FixedResponder {
        fn id(&self) -> &str {
            "fixed"
        }

        async fn respond(&self, _message: &str, _state: &ConsentState, _mode: ResponseMode) -> Result<String, ResponderError> {
            Ok(self.0.to_string())
        }
    }

    fn moderator(text: &'static str) -> ResponseModerator {
        ResponseModerator::new(Arc::new(FixedResponder(text)))
    }

    #[test]
    fn test_crisis_template_uses_first_two_suggestions() {
        let suggestions = vec!["One".to_string(), "Two".to_string(), "Three".to_string()];
        assert_eq!(
            crisis_template(&suggestions),
            "I'm here with you. Right now, let's focus on safety.\n\n• One\n• Two\n\nYou're not alone in this. I'm staying with you."
        );
    }

    #[test]
    fn test_crisis_template_pads_from_override() {
        let text = crisis_template(&["Only".to_string()]);
        assert!(text.contains("• Only\n• Activate crisis protocol"));

        let text = crisis_template(&[]);
        assert!(text.contains("• Activate crisis protocol\n• Offer emergency resources immediately"));
    }

    #[test]
    fn test_config_defaults_and_partial_json() {
        let config = ModeratorConfig::default();
        assert_eq!(config.responder_timeout_ms, RESPONDER_TIMEOUT_MS);
        assert!(!config.audit_enabled);

        let config: ModeratorConfig = serde_json::from_str(r#"{"audit_enabled": true}"#).unwrap();
        assert_eq!(config.responder_timeout_ms, RESPONDER_TIMEOUT_MS);
        assert!(config.audit_enabled);
    }

    #[test]
    fn test_config_missing_file() {
        let result = ModeratorConfig::from_json_file("/nonexistent/consentos.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_audit_digest_is_sha256_hex() {
        assert_eq!(
            audit_digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_normal_path_stage_order() {
        let outcome = moderator("Tell me more.")
            .moderate("🟡 hello", &SessionContext::active())
            .await
            .unwrap();

        assert_eq!(
            outcome.stages,
            vec![
                ModerationStage::Received,
                ModerationStage::Parsed,
                ModerationStage::Scored,
                ModerationStage::PreValidated,
                ModerationStage::NormalPath,
                ModerationStage::PostValidated,
                ModerationStage::Delivered,
            ]
        );
        assert_eq!(outcome.path, DeliveryPath::Normal);
        assert_eq!(outcome.final_text, "Tell me more.");
        assert_eq!(outcome.report.ancestral_presence, Some(InvariantOutcome::Pass));
        assert!(outcome.audit_digest.is_none());
    }

    #[tokio::test]
    async fn test_crisis_path_engages_witness() {
        let outcome = moderator("unused")
            .moderate("🚨", &SessionContext::active())
            .await
            .unwrap();

        assert_eq!(outcome.path, DeliveryPath::Crisis);
        assert!(outcome.stages.contains(&ModerationStage::CrisisPath));
        assert!(outcome.witness_mode_active);
        assert!(outcome.report.responsibility_circuit.is_pass());
        assert_eq!(outcome.report.ancestral_presence, None);
        assert!(outcome.has_reason(ReasonCode::R201_SAFETY_OVERRIDE));
        assert!(outcome.has_reason(ReasonCode::R305_WITNESS_ENGAGED));
        assert!(outcome.final_text.contains("• Activate crisis protocol"));
    }

    #[tokio::test]
    async fn test_rejected_when_session_abandoned() {
        let session = SessionContext {
            session_active: false,
            ..SessionContext::active()
        };
        let err = moderator("unused").moderate("🟢", &session).await.unwrap_err();
        assert!(matches!(err, RejectionError::Continuity { .. }));
        assert!(err.to_string().starts_with("Continuity Guarantee violated"));
    }

    #[tokio::test]
    async fn test_rejected_when_active_after_user_ended() {
        let session = SessionContext {
            session_active: true,
            user_terminated: true,
            ..SessionContext::active()
        };
        let err = moderator("unused").moderate("🟢", &session).await.unwrap_err();
        assert_eq!(
            err,
            RejectionError::Continuity {
                detail: "session still active after user terminated it".to_string(),
            }
        );
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(ModerationStage::PreValidated.to_string(), "PRE_VALIDATED");
        assert_eq!(ModerationStage::Delivered.to_string(), "DELIVERED");
    }

    #[tokio::test]
    async fn test_ancestral_advisory_does_not_block() {
        let session = SessionContext::active().with_memory(MemoryContext {
            has_ancestral_patterns: true,
            ancestral_integrated: false,
        });
        let outcome = moderator("I'm listening.").moderate("🟢", &session).await.unwrap();
        assert_eq!(outcome.path, DeliveryPath::Normal);
        assert!(outcome.has_reason(ReasonCode::R302_ANCESTRAL_ADVISORY));
    }

    #[tokio::test]
    async fn test_regulate_sets_grounding_needed() {
        let responder = Arc::new(ModeTemplateResponder::new());
        let moderator = ResponseModerator::with_config(responder, ModeratorConfig::default().with_audit(true));
        let outcome = moderator.moderate("🟣", &SessionContext::active()).await.unwrap();
        assert_eq!(outcome.scoring.response_mode, ResponseMode::Regulate);
        assert!(outcome.grounding_needed);
        assert_eq!(outcome.audit_digest.as_deref().map(str::len), Some(64));
    }
}
