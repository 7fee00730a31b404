//! ConsentState builder: resolves located tokens into one state
//!
//! Singleton channels (intensity, pace, boundary, safety) are overwritten
//! in offset order, so the rightmost token wins. Bounded channels
//! (emotions ≤ 3, meta ≤ 2) append in offset order and drop tokens once
//! full, so the leftmost tokens are retained.

use tracing::debug;
use crate::core::SignalTokenizer;
use crate::types::{Boundary, ConsentState, Intensity, Pace, Signal, SignalToken};
use crate::{MAX_EMOTIONS, MAX_META};

/// ConsentState builder
#[derive(Debug, Default)]
pub struct ConsentStateBuilder {
    tokenizer: SignalTokenizer,
}

impl ConsentStateBuilder {
    /// Create new builder
    pub fn new() -> Self {
        Self {
            tokenizer: SignalTokenizer::new(),
        }
    }

    /// Resolve tokens (ascending by offset) into a state. Never fails.
    pub fn build(&self, tokens: &[SignalToken], raw_text: &str) -> ConsentState {
        let mut intensity = Intensity::default();
        let mut pace = Pace::default();
        let mut boundary = Boundary::default();
        let mut safety = None;
        let mut emotions = Vec::with_capacity(MAX_EMOTIONS);
        let mut meta = Vec::with_capacity(MAX_META);

        for token in tokens {
            match token.signal {
                Signal::Intensity(v) => intensity = v,
                Signal::Pace(v) => pace = v,
                Signal::Boundary(v) => boundary = v,
                Signal::Safety(v) => safety = Some(v),
                Signal::Emotion(v) => {
                    if emotions.len() < MAX_EMOTIONS {
                        emotions.push(v);
                    }
                }
                Signal::Meta(v) => {
                    if meta.len() < MAX_META {
                        meta.push(v);
                    }
                }
            }
        }

        ConsentState::new(intensity, pace, boundary)
            .with_emotions(emotions)
            .with_meta(meta)
            .with_safety(safety)
            .with_raw_text(raw_text)
    }

    /// Tokenize and build in one step
    pub fn parse(&self, message: &str) -> ConsentState {
        let tokens = self.tokenizer.tokenize(message);
        let state = self.build(&tokens, message);
        debug!(tokens = tokens.len(), state = %state.summary(), "Parsed consent signals");
        state
    }
}

/// Parse a message into its ConsentState
pub fn parse(message: &str) -> ConsentState {
    ConsentStateBuilder::new().parse(message)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Emotion, Meta, Safety};

    fn token(signal: Signal, offset: usize) -> SignalToken {
        SignalToken::new("", signal, offset)
    }

    #[test]
    fn test_no_tokens_gives_defaults() {
        let builder = ConsentStateBuilder::new();
        let state = builder.build(&[], "plain");
        assert_eq!(state.intensity(), Intensity::Baseline);
        assert_eq!(state.pace(), Pace::Steady);
        assert_eq!(state.boundary(), Boundary::OpenDoor);
        assert!(state.emotions().is_empty());
        assert!(state.meta().is_empty());
        assert_eq!(state.safety(), None);
        assert_eq!(state.raw_text(), "plain");
        assert!(state.is_default());
    }

    #[test]
    fn test_singleton_rightmost_wins() {
        let builder = ConsentStateBuilder::new();
        let tokens = [
            token(Signal::Intensity(Intensity::Baseline), 0),
            token(Signal::Safety(Safety::ComfortRequest), 1),
            token(Signal::Intensity(Intensity::AtLimit), 5),
            token(Signal::Safety(Safety::DistressCall), 7),
        ];
        let state = builder.build(&tokens, "");
        assert_eq!(state.intensity(), Intensity::AtLimit);
        assert_eq!(state.safety(), Some(Safety::DistressCall));
    }

    #[test]
    fn test_emotions_leftmost_retained() {
        let builder = ConsentStateBuilder::new();
        let tokens = [
            token(Signal::Emotion(Emotion::Grief), 0),
            token(Signal::Emotion(Emotion::Rage), 1),
            token(Signal::Emotion(Emotion::Overwhelm), 2),
            token(Signal::Emotion(Emotion::Numbness), 3),
            token(Signal::Emotion(Emotion::Shock), 4),
        ];
        let state = builder.build(&tokens, "");
        assert_eq!(state.emotions(), &[Emotion::Grief, Emotion::Rage, Emotion::Overwhelm]);
    }

    #[test]
    fn test_meta_bound_of_two() {
        let builder = ConsentStateBuilder::new();
        let tokens = [
            token(Signal::Meta(Meta::Mask), 0),
            token(Signal::Meta(Meta::Mirror), 1),
            token(Signal::Meta(Meta::Puzzle), 2),
        ];
        let state = builder.build(&tokens, "");
        assert_eq!(state.meta(), &[Meta::Mask, Meta::Mirror]);
    }

    #[test]
    fn test_repeated_tokens_count_toward_bound() {
        let state = parse("💧💧💧🔥");
        assert_eq!(state.emotions(), &[Emotion::Grief, Emotion::Grief, Emotion::Grief]);
    }

    #[test]
    fn test_parse_is_pure() {
        let text = "🟠⏪🧱💧🪞 hold on";
        assert_eq!(parse(text), parse(text));
    }
}
