//! Located signal tokens

use serde::Serialize;
use crate::types::Signal;

/// One recognized glyph in a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalToken {
    /// Table glyph that matched
    pub glyph: &'static str,
    /// Channel value the glyph maps to
    pub signal: Signal,
    /// Character index of the token's last character
    pub offset: usize,
}

impl SignalToken {
    pub fn new(glyph: &'static str, signal: Signal, offset: usize) -> Self {
        Self { glyph, signal, offset }
    }
}
