//! Responder seam: the external generation capability
//!
//! The moderator only needs text for a (message, state, mode) triple.
//! Provider calls and their retries live behind this trait.

use async_trait::async_trait;
use crate::types::{ConsentState, ResponderError, ResponseMode};

/// External text generator (LLM orchestration or similar).
///
/// Implementations may be slow or fail; the moderator bounds every call
/// with a timeout and falls back to a safe template.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Identifier for logs (e.g., model or persona name)
    fn id(&self) -> &str;

    /// Produce candidate text for a non-crisis message
    async fn respond(
        &self,
        message: &str,
        state: &ConsentState,
        mode: ResponseMode,
    ) -> Result<String, ResponderError>;
}

/// Built-in responder with one fixed line per response mode.
/// Used by the CLI when no provider is wired in.
#[derive(Debug, Default)]
pub struct ModeTemplateResponder;

impl ModeTemplateResponder {
    pub fn new() -> Self {
        Self
    }

    fn template(mode: ResponseMode) -> &'static str {
        match mode {
            ResponseMode::Explore => "I'm with you. Let's keep exploring at your pace.",
            ResponseMode::Deepen => "I'm here. We can go a little deeper, gently, whenever you're ready.",
            ResponseMode::Integrate => "Let's slow down and piece together what's come up. I'm staying right here.",
            ResponseMode::Regulate => "Let's pause and breathe together. Feel your feet on the ground. I'm not going anywhere.",
            ResponseMode::Crisis => "I'm here with you. Right now, let's focus on safety.",
        }
    }
}

#[async_trait]
impl Responder for ModeTemplateResponder {
    fn id(&self) -> &str {
        "mode-template"
    }

    async fn respond(
        &self,
        _message: &str,
        _state: &ConsentState,
        mode: ResponseMode,
    ) -> Result<String, ResponderError> {
        Ok(Self::template(mode).to_string())
    }
}
