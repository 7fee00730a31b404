//! Resolved consent state for one message

use serde::Serialize;
use crate::types::{Boundary, Emotion, Intensity, Meta, Pace, Safety};
use crate::{MAX_EMOTIONS, MAX_META};

/// Snapshot of all six channels for one inbound message.
///
/// Fields are private so the channel bounds cannot be broken after
/// construction. `raw_text` is kept for audit only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsentState {
    intensity: Intensity,
    pace: Pace,
    boundary: Boundary,
    emotions: Vec<Emotion>,
    meta: Vec<Meta>,
    safety: Option<Safety>,
    raw_text: String,
}

impl Default for ConsentState {
    fn default() -> Self {
        Self::new(Intensity::default(), Pace::default(), Boundary::default())
    }
}

impl ConsentState {
    /// Create a state with the three singleton channels set and all others empty
    pub fn new(intensity: Intensity, pace: Pace, boundary: Boundary) -> Self {
        Self {
            intensity,
            pace,
            boundary,
            emotions: Vec::new(),
            meta: Vec::new(),
            safety: None,
            raw_text: String::new(),
        }
    }

    /// Set emotions; entries past the bound are dropped (leftmost kept)
    pub fn with_emotions(mut self, emotions: impl IntoIterator<Item = Emotion>) -> Self {
        self.emotions = emotions.into_iter().take(MAX_EMOTIONS).collect();
        self
    }

    /// Set meta signals; entries past the bound are dropped (leftmost kept)
    pub fn with_meta(mut self, meta: impl IntoIterator<Item = Meta>) -> Self {
        self.meta = meta.into_iter().take(MAX_META).collect();
        self
    }

    pub fn with_safety(mut self, safety: Option<Safety>) -> Self {
        self.safety = safety;
        self
    }

    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = raw_text.into();
        self
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn pace(&self) -> Pace {
        self.pace
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn emotions(&self) -> &[Emotion] {
        &self.emotions
    }

    pub fn meta(&self) -> &[Meta] {
        &self.meta
    }

    pub fn safety(&self) -> Option<Safety> {
        self.safety
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// True when every channel holds its default
    pub fn is_default(&self) -> bool {
        self.intensity == Intensity::default()
            && self.pace == Pace::default()
            && self.boundary == Boundary::default()
            && self.emotions.is_empty()
            && self.meta.is_empty()
            && self.safety.is_none()
    }

    /// Compact one-line form for logs and terminal output
    pub fn summary(&self) -> String {
        let join = |labels: Vec<&str>| {
            if labels.is_empty() {
                "-".to_string()
            } else {
                labels.join("+")
            }
        };
        format!(
            "intensity={} pace={} boundary={} emotions={} meta={} safety={}",
            self.intensity,
            self.pace,
            self.boundary,
            join(self.emotions.iter().map(|e| e.label()).collect()),
            join(self.meta.iter().map(|m| m.label()).collect()),
            self.safety.map(|s| s.label()).unwrap_or("none"),
        )
    }
}
