//! Reason codes for moderation decisions

use serde::{Deserialize, Serialize};

/// Reason codes recorded as a message moves through the moderator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R1xx: Parsing
    // =========================================================================
    /// No signal tokens found, all channels at defaults
    R101_NO_SIGNALS,
    /// One or more signal tokens resolved
    R102_SIGNALS_RESOLVED,

    // =========================================================================
    // R2xx: Scoring
    // =========================================================================
    /// Alarm/medical/phone signal forced CRISIS
    R201_SAFETY_OVERRIDE,
    /// Risk reached 5 through the scoring rules
    R202_RISK_CRISIS,
    /// Risk below crisis, normal generation
    R203_RISK_NORMAL,

    // =========================================================================
    // R3xx: Invariants
    // =========================================================================
    /// Session abandoned without consent, request rejected
    R301_CONTINUITY_REJECTED,
    /// Ancestral patterns present but not integrated (advisory)
    R302_ANCESTRAL_ADVISORY,
    /// Deflection phrase found, rewrite applied
    R303_DEFLECTION_REWRITTEN,
    /// Deflection remains after the single rewrite pass
    R304_DEFLECTION_PERSISTS,
    /// Witness mode engaged for crisis handling
    R305_WITNESS_ENGAGED,

    // =========================================================================
    // R4xx: Responder
    // =========================================================================
    /// Responder exceeded its time bound
    R401_RESPONDER_TIMEOUT,
    /// Responder returned an error
    R402_RESPONDER_FAILED,
    /// Responder returned empty text
    R403_RESPONDER_EMPTY,

    // =========================================================================
    // R5xx: Delivery
    // =========================================================================
    /// Crisis template delivered
    R501_CRISIS_DELIVERED,
    /// Responder text delivered
    R502_NORMAL_DELIVERED,
    /// Safe fallback template delivered
    R503_FALLBACK_DELIVERED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_NO_SIGNALS => "R101_NO_SIGNALS",
            Self::R102_SIGNALS_RESOLVED => "R102_SIGNALS_RESOLVED",
            Self::R201_SAFETY_OVERRIDE => "R201_SAFETY_OVERRIDE",
            Self::R202_RISK_CRISIS => "R202_RISK_CRISIS",
            Self::R203_RISK_NORMAL => "R203_RISK_NORMAL",
            Self::R301_CONTINUITY_REJECTED => "R301_CONTINUITY_REJECTED",
            Self::R302_ANCESTRAL_ADVISORY => "R302_ANCESTRAL_ADVISORY",
            Self::R303_DEFLECTION_REWRITTEN => "R303_DEFLECTION_REWRITTEN",
            Self::R304_DEFLECTION_PERSISTS => "R304_DEFLECTION_PERSISTS",
            Self::R305_WITNESS_ENGAGED => "R305_WITNESS_ENGAGED",
            Self::R401_RESPONDER_TIMEOUT => "R401_RESPONDER_TIMEOUT",
            Self::R402_RESPONDER_FAILED => "R402_RESPONDER_FAILED",
            Self::R403_RESPONDER_EMPTY => "R403_RESPONDER_EMPTY",
            Self::R501_CRISIS_DELIVERED => "R501_CRISIS_DELIVERED",
            Self::R502_NORMAL_DELIVERED => "R502_NORMAL_DELIVERED",
            Self::R503_FALLBACK_DELIVERED => "R503_FALLBACK_DELIVERED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_NO_SIGNALS => "No signals, defaults applied",
            Self::R102_SIGNALS_RESOLVED => "Signals resolved",
            Self::R201_SAFETY_OVERRIDE => "Safety signal forced crisis",
            Self::R202_RISK_CRISIS => "Risk reached crisis level",
            Self::R203_RISK_NORMAL => "Risk below crisis level",
            Self::R301_CONTINUITY_REJECTED => "Session abandoned without consent",
            Self::R302_ANCESTRAL_ADVISORY => "Ancestral patterns not integrated",
            Self::R303_DEFLECTION_REWRITTEN => "Deflection rewritten",
            Self::R304_DEFLECTION_PERSISTS => "Deflection persists after rewrite",
            Self::R305_WITNESS_ENGAGED => "Witness mode engaged",
            Self::R401_RESPONDER_TIMEOUT => "Responder timed out",
            Self::R402_RESPONDER_FAILED => "Responder failed",
            Self::R403_RESPONDER_EMPTY => "Responder returned empty text",
            Self::R501_CRISIS_DELIVERED => "Crisis template delivered",
            Self::R502_NORMAL_DELIVERED => "Response delivered",
            Self::R503_FALLBACK_DELIVERED => "Safe fallback delivered",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
