//! Core modules for ConsentOS

pub mod tokenizer;
pub mod builder;
pub mod scorer;
pub mod guard;
pub mod responder;
pub mod moderator;

pub use tokenizer::{SignalTokenizer, TOKEN_TABLE};
pub use builder::{ConsentStateBuilder, parse};
pub use scorer::{RiskScorer, score, OVERRIDE_SUGGESTIONS};
pub use guard::{
    InvariantGuard, WitnessingPass, DEFLECTIONS,
    check_continuity, check_ancestral_presence, check_responsibility_circuit, check_witnessing,
};
pub use responder::{Responder, ModeTemplateResponder};
pub use moderator::{ResponseModerator, ModeratorConfig, crisis_template};
