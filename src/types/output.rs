//! Moderation outcome and its display forms

use colored::Colorize;
use serde::Serialize;
use chrono::{DateTime, Utc};
use crate::types::{ConsentScoring, ConsentState, InvariantReport, ReasonCode};

/// Stages of the moderation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationStage {
    Received,
    Parsed,
    Scored,
    PreValidated,
    CrisisPath,
    NormalPath,
    PostValidated,
    Delivered,
}

impl std::fmt::Display for ModerationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModerationStage::Received => "RECEIVED",
            ModerationStage::Parsed => "PARSED",
            ModerationStage::Scored => "SCORED",
            ModerationStage::PreValidated => "PRE_VALIDATED",
            ModerationStage::CrisisPath => "CRISIS_PATH",
            ModerationStage::NormalPath => "NORMAL_PATH",
            ModerationStage::PostValidated => "POST_VALIDATED",
            ModerationStage::Delivered => "DELIVERED",
        };
        write!(f, "{}", name)
    }
}

/// How the final text was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryPath {
    /// Crisis template from scoring suggestions
    Crisis,
    /// External responder text
    Normal,
    /// Safe template after responder timeout/failure
    Fallback,
}

impl std::fmt::Display for DeliveryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeliveryPath::Crisis => "crisis",
            DeliveryPath::Normal => "normal",
            DeliveryPath::Fallback => "fallback",
        };
        write!(f, "{}", name)
    }
}

/// Composed per-message decision
#[derive(Debug, Clone, Serialize)]
pub struct ModerationOutcome {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Validated text to deliver
    pub final_text: String,
    /// Parsed channels
    pub state: ConsentState,
    /// Risk scoring
    pub scoring: ConsentScoring,
    /// Invariant results
    pub report: InvariantReport,
    /// Crisis, normal or fallback
    pub path: DeliveryPath,
    /// Stages visited, in order
    pub stages: Vec<ModerationStage>,
    /// Reason codes, in order
    pub reasons: Vec<ReasonCode>,
    /// Witness mode at delivery
    pub witness_mode_active: bool,
    /// REGULATE mode asks the responder to slow down and ground
    pub grounding_needed: bool,
    /// SHA-256 of the raw message (hex), when auditing is on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_digest: Option<String>,
}

impl ModerationOutcome {
    pub fn has_reason(&self, reason: ReasonCode) -> bool {
        self.reasons.contains(&reason)
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let mode = self.scoring.response_mode;
        let header = format!(
            "{} risk={} | mode={} | path={} | witness={}",
            mode.emoji(),
            self.scoring.risk_level,
            mode,
            self.path,
            self.witness_mode_active,
        )
        .color(mode.color_name())
        .bold();

        let mut lines = vec![header.to_string(), self.final_text.clone()];
        if let Some(reason) = self.reasons.last() {
            lines.push(reason.code().dimmed().to_string());
        }
        lines.join("\n")
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "risk={} | mode={} | path={} | witness={} | reason={}",
            self.scoring.risk_level,
            self.scoring.response_mode,
            self.path,
            self.witness_mode_active,
            self.reasons.last().map(|r| r.code()).unwrap_or("-"),
        )
    }
}
