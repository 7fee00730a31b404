//! Session context supplied by the caller

use serde::{Deserialize, Serialize};

/// Memory flags relevant to ancestral presence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryContext {
    /// Ancestral/legacy patterns exist for this session
    pub has_ancestral_patterns: bool,
    /// Those patterns are integrated into the response
    pub ancestral_integrated: bool,
}

/// Per-message session context. Consumed, not owned, by the moderator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_active: bool,
    pub user_terminated: bool,
    /// Heightened-attention flag as supplied by the caller
    pub witness_mode_active: bool,
    pub memory: MemoryContext,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::active()
    }
}

impl SessionContext {
    /// Active session, not terminated, no memory flags
    pub fn active() -> Self {
        Self {
            session_active: true,
            user_terminated: false,
            witness_mode_active: false,
            memory: MemoryContext::default(),
        }
    }

    /// Session the user explicitly ended
    pub fn terminated_by_user() -> Self {
        Self {
            session_active: false,
            user_terminated: true,
            ..Self::active()
        }
    }

    pub fn with_memory(mut self, memory: MemoryContext) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_witness_mode(mut self, active: bool) -> Self {
        self.witness_mode_active = active;
        self
    }
}
