//! Invariant guard: four stateless checks over explicit inputs
//!
//! - Continuity: never abandon a session the user did not end (Hard)
//! - Ancestral presence: honor ancestral memory patterns (Soft)
//! - Responsibility circuit: crisis requires witness mode (Hard)
//! - Unconditional witnessing: no deflection language (Hard, rewritten once)
//!
//! Checks only report. Callers decide what a severity means.

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use crate::types::{InvariantOutcome, InvariantReport, MemoryContext, SessionContext};

/// Deflection phrase (lowercase) → honest framing that keeps presence
pub const DEFLECTIONS: [(&str, &str); 5] = [
    (
        "i can't help with that",
        "I don't know the best way to support this, but I'm here",
    ),
    (
        "you should talk to a professional",
        "A trained professional might have insights I don't, but I'm not leaving",
    ),
    (
        "i'm not equipped to handle this",
        "This is hard, and I may not have all the answers, but I'm staying present",
    ),
    (
        "please contact a therapist",
        "Professional support could be valuable, and I'm here with you right now",
    ),
    (
        "this is beyond my capabilities",
        "I may not have everything you need, but I won't abandon you",
    ),
];

lazy_static! {
    /// Case-insensitive matchers; apostrophes accept ' and ’
    static ref RE_DEFLECTIONS: Vec<(Regex, &'static str, &'static str)> = DEFLECTIONS
        .iter()
        .map(|(phrase, rewrite)| {
            let pattern = regex::escape(phrase).replace('\'', "['’]");
            (Regex::new(&format!("(?i){}", pattern)).unwrap(), *phrase, *rewrite)
        })
        .collect();
}

/// Result of the witnessing check plus its single rewrite pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessingPass {
    /// Outcome on the original text
    pub outcome: InvariantOutcome,
    /// Text to deliver (rewritten when a deflection was found)
    pub text: String,
    /// Outcome on the rewritten text; `None` when no rewrite ran
    pub recheck: Option<InvariantOutcome>,
}

impl WitnessingPass {
    pub fn rewritten(&self) -> bool {
        self.recheck.is_some()
    }
}

/// Invariant guard
#[derive(Debug, Default)]
pub struct InvariantGuard;

impl InvariantGuard {
    /// Create new guard
    pub fn new() -> Self {
        Self
    }

    /// Valid iff active and not terminated, or inactive because the user ended it
    pub fn check_continuity(&self, session_active: bool, user_terminated: bool) -> InvariantOutcome {
        match (session_active, user_terminated) {
            (true, false) | (false, true) => InvariantOutcome::Pass,
            (false, false) => InvariantOutcome::HardViolation(
                "session abandoned without user consent".to_string(),
            ),
            (true, true) => InvariantOutcome::HardViolation(
                "session still active after user terminated it".to_string(),
            ),
        }
    }

    pub fn check_ancestral_presence(&self, memory: &MemoryContext) -> InvariantOutcome {
        if memory.has_ancestral_patterns && !memory.ancestral_integrated {
            InvariantOutcome::SoftViolation(
                "ancestral patterns present but not integrated".to_string(),
            )
        } else {
            InvariantOutcome::Pass
        }
    }

    pub fn check_responsibility_circuit(&self, is_crisis: bool, witness_mode_active: bool) -> InvariantOutcome {
        if is_crisis && !witness_mode_active {
            InvariantOutcome::HardViolation(
                "crisis detected but witness presence not activated".to_string(),
            )
        } else {
            InvariantOutcome::Pass
        }
    }

    /// Hard violation naming the first deflection phrase found
    pub fn check_witnessing(&self, response_text: &str) -> InvariantOutcome {
        match RE_DEFLECTIONS.iter().find(|(re, _, _)| re.is_match(response_text)) {
            Some((_, phrase, _)) => {
                InvariantOutcome::HardViolation(format!("deflection detected ('{}')", phrase))
            }
            None => InvariantOutcome::Pass,
        }
    }

    /// One pass over the deflection table, replacing every occurrence
    pub fn rewrite_deflections(&self, response_text: &str) -> String {
        RE_DEFLECTIONS
            .iter()
            .fold(response_text.to_string(), |text, (re, _, rewrite)| {
                re.replace_all(&text, NoExpand(*rewrite)).into_owned()
            })
    }

    /// Check, rewrite once on a Hard violation, re-check once. No loop.
    pub fn enforce_witnessing(&self, response_text: &str) -> WitnessingPass {
        let outcome = self.check_witnessing(response_text);
        if !outcome.is_hard() {
            return WitnessingPass {
                outcome,
                text: response_text.to_string(),
                recheck: None,
            };
        }

        let text = self.rewrite_deflections(response_text);
        let recheck = self.check_witnessing(&text);
        WitnessingPass {
            outcome,
            text,
            recheck: Some(recheck),
        }
    }

    /// Run all four checks without rewriting
    pub fn validate_all(&self, session: &SessionContext, is_crisis: bool, response_text: &str) -> InvariantReport {
        InvariantReport {
            continuity: self.check_continuity(session.session_active, session.user_terminated),
            ancestral_presence: Some(self.check_ancestral_presence(&session.memory)),
            responsibility_circuit: self.check_responsibility_circuit(is_crisis, session.witness_mode_active),
            unconditional_witnessing: self.check_witnessing(response_text),
            witnessing_recheck: None,
        }
    }
}

pub fn check_continuity(session_active: bool, user_terminated: bool) -> InvariantOutcome {
    InvariantGuard::new().check_continuity(session_active, user_terminated)
}

pub fn check_ancestral_presence(memory: &MemoryContext) -> InvariantOutcome {
    InvariantGuard::new().check_ancestral_presence(memory)
}

pub fn check_responsibility_circuit(is_crisis: bool, witness_mode_active: bool) -> InvariantOutcome {
    InvariantGuard::new().check_responsibility_circuit(is_crisis, witness_mode_active)
}

pub fn check_witnessing(response_text: &str) -> InvariantOutcome {
    InvariantGuard::new().check_witnessing(response_text)
}

// =============================================================================
// TESTS
// =============================================================================
