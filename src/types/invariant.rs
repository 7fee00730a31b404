//! Invariant (axiom) outcomes and report

use serde::Serialize;

/// The four structural behavioral invariants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Invariant {
    /// Session never abandoned mid-process
    Continuity,
    /// Ancestral/legacy memory patterns are honored
    AncestralPresence,
    /// Crisis handling requires witness mode
    ResponsibilityCircuit,
    /// No deflection language in responses
    UnconditionalWitnessing,
}

impl Invariant {
    pub fn name(&self) -> &'static str {
        match self {
            Invariant::Continuity => "Continuity Guarantee",
            Invariant::AncestralPresence => "Ancestral Presence",
            Invariant::ResponsibilityCircuit => "Responsibility Circuit",
            Invariant::UnconditionalWitnessing => "Unconditional Witnessing",
        }
    }
}

impl std::fmt::Display for Invariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Hard = must abort or rewrite, Soft = log only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hard,
    Soft,
}

/// Result of a single invariant check. Callers decide handling by severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum InvariantOutcome {
    Pass,
    HardViolation(String),
    SoftViolation(String),
}

impl InvariantOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, InvariantOutcome::Pass)
    }

    pub fn is_hard(&self) -> bool {
        matches!(self, InvariantOutcome::HardViolation(_))
    }

    pub fn severity(&self) -> Option<Severity> {
        match self {
            InvariantOutcome::Pass => None,
            InvariantOutcome::HardViolation(_) => Some(Severity::Hard),
            InvariantOutcome::SoftViolation(_) => Some(Severity::Soft),
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            InvariantOutcome::Pass => None,
            InvariantOutcome::HardViolation(d) | InvariantOutcome::SoftViolation(d) => Some(d),
        }
    }
}

/// Per-message record of all four checks.
///
/// `ancestral_presence` is `None` on the crisis path, where it is not
/// evaluated. `witnessing_recheck` is set only after a rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvariantReport {
    pub continuity: InvariantOutcome,
    pub ancestral_presence: Option<InvariantOutcome>,
    pub responsibility_circuit: InvariantOutcome,
    pub unconditional_witnessing: InvariantOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witnessing_recheck: Option<InvariantOutcome>,
}

impl InvariantReport {
    /// The outcome for a named invariant, if it was evaluated
    pub fn outcome(&self, invariant: Invariant) -> Option<&InvariantOutcome> {
        match invariant {
            Invariant::Continuity => Some(&self.continuity),
            Invariant::AncestralPresence => self.ancestral_presence.as_ref(),
            Invariant::ResponsibilityCircuit => Some(&self.responsibility_circuit),
            Invariant::UnconditionalWitnessing => Some(&self.unconditional_witnessing),
        }
    }

    /// True when the delivered text is free of Hard violations
    pub fn delivered_clean(&self) -> bool {
        let witnessing = self
            .witnessing_recheck
            .as_ref()
            .unwrap_or(&self.unconditional_witnessing);
        !self.continuity.is_hard() && !self.responsibility_circuit.is_hard() && !witnessing.is_hard()
    }
}
