//! ConsentOS: policy core for consent-signal moderation
//!
//! Message text → SignalTokenizer → ConsentStateBuilder → RiskScorer →
//! ResponseModerator, with InvariantGuard checked before and after
//! generation.

pub mod core;
pub mod types;

// =============================================================================
// CHANNEL BOUNDS [C] - ConsentOS v1.1
// =============================================================================

/// Maximum emotions retained per message (leftmost kept)
pub const MAX_EMOTIONS: usize = 3;

/// Maximum meta signals retained per message (leftmost kept)
pub const MAX_META: usize = 2;

// =============================================================================
// RISK [C]
// =============================================================================

/// Highest risk level; also the CRISIS level
pub const RISK_MAX: u8 = 5;

/// Suggestions folded into the crisis template
pub const CRISIS_SUGGESTION_COUNT: usize = 2;

// =============================================================================
// RESPONDER [C]
// =============================================================================

/// Default bound on the external responder call (milliseconds)
pub const RESPONDER_TIMEOUT_MS: u64 = 10_000;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.1.0";
