//! Signal tokenizer: locates ConsentOS glyphs in message text
//!
//! Matching is grapheme-safe: a glyph only counts when it stands as a
//! whole symbolic unit. Glyphs glued into a ZWJ sequence (❤️‍🔥), or
//! extended by a skin-tone modifier, keycap or combining mark, are skipped.
//! A variation selector (U+FE0F emoji or U+FE0E text presentation) is
//! optional on every glyph and consumed with it.

use std::collections::HashMap;
use lazy_static::lazy_static;
use regex::Regex;
use crate::types::{Boundary, Emotion, Intensity, Meta, Pace, Safety, Signal, SignalToken};

/// Emoji presentation selector
const VS16: char = '\u{FE0F}';

/// Text presentation selector
const VS15: char = '\u{FE0E}';

/// Zero-width joiner
const ZWJ: char = '\u{200D}';

/// Fixed glyph → channel value table (ConsentOS v1.1 wire vocabulary).
/// Glyphs carrying U+FE0F are stored exactly as clients send them.
pub static TOKEN_TABLE: [(&str, Signal); 30] = [
    // Intensity
    ("🟢", Signal::Intensity(Intensity::Baseline)),
    ("🟡", Signal::Intensity(Intensity::Activated)),
    ("🟠", Signal::Intensity(Intensity::ApproachingEdge)),
    ("🔴", Signal::Intensity(Intensity::AtLimit)),
    ("🟣", Signal::Intensity(Intensity::AlteredState)),
    // Pace
    ("⏩", Signal::Pace(Pace::Faster)),
    ("▶️", Signal::Pace(Pace::Steady)),
    ("⏸️", Signal::Pace(Pace::Pause)),
    ("⏪", Signal::Pace(Pace::Backup)),
    ("🔄", Signal::Pace(Pace::Revisit)),
    // Boundary
    ("🚪", Signal::Boundary(Boundary::OpenDoor)),
    ("🪟", Signal::Boundary(Boundary::WindowOnly)),
    ("🧱", Signal::Boundary(Boundary::Wall)),
    ("🌉", Signal::Boundary(Boundary::Bridge)),
    ("🗝️", Signal::Boundary(Boundary::Key)),
    // Emotion
    ("💧", Signal::Emotion(Emotion::Grief)),
    ("🔥", Signal::Emotion(Emotion::Rage)),
    ("🌊", Signal::Emotion(Emotion::Overwhelm)),
    ("❄️", Signal::Emotion(Emotion::Numbness)),
    ("⚡", Signal::Emotion(Emotion::Shock)),
    // Meta
    ("👁️", Signal::Meta(Meta::WitnessEye)),
    ("🪞", Signal::Meta(Meta::Mirror)),
    ("🎭", Signal::Meta(Meta::Mask)),
    ("🧩", Signal::Meta(Meta::Puzzle)),
    ("🛸", Signal::Meta(Meta::RealityCheck)),
    // Safety
    ("🫂", Signal::Safety(Safety::ComfortRequest)),
    ("🆘", Signal::Safety(Safety::DistressCall)),
    ("🚨", Signal::Safety(Safety::Alarm)),
    ("🏥", Signal::Safety(Safety::Medical)),
    ("☎️", Signal::Safety(Safety::PhoneEscalation)),
];

lazy_static! {
    /// Alternation of every glyph base, longest first, with an optional selector
    static ref RE_TOKENS: Regex = {
        let mut bases: Vec<&str> = TOKEN_TABLE.iter().map(|(glyph, _)| base_form(*glyph)).collect();
        bases.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternation = bases
            .iter()
            .map(|base| regex::escape(base))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?:{})[\x{{FE0E}}\x{{FE0F}}]?", alternation)).unwrap()
    };

    /// Anything that would extend a glyph into a larger grapheme
    static ref RE_EXTENDER: Regex = Regex::new(
        r"^[\x{200D}\x{20E3}\x{1F3FB}-\x{1F3FF}\p{M}]"
    ).unwrap();

    /// Glyph base → row in TOKEN_TABLE
    static ref GLYPH_INDEX: HashMap<&'static str, usize> = TOKEN_TABLE
        .iter()
        .enumerate()
        .map(|(i, (glyph, _))| (base_form(*glyph), i))
        .collect();
}

/// Glyph without its trailing presentation selector
fn base_form(glyph: &'static str) -> &'static str {
    glyph.trim_end_matches(VS16)
}

/// Signal tokenizer
#[derive(Debug, Default)]
pub struct SignalTokenizer;

impl SignalTokenizer {
    /// Create new tokenizer
    pub fn new() -> Self {
        Self
    }

    /// Locate every whole-unit glyph, ascending by offset.
    ///
    /// Each occurrence is reported; repeated glyphs are not merged.
    /// `offset` is the character index of the token's last character.
    pub fn tokenize(&self, text: &str) -> Vec<SignalToken> {
        let mut tokens = Vec::new();
        let mut cursor = 0;
        let mut chars_seen = 0;

        // find_iter yields matches left to right, so tokens stay sorted
        for m in RE_TOKENS.find_iter(text) {
            if !is_whole_unit(text, m.start(), m.end()) {
                continue;
            }

            chars_seen += text[cursor..m.end()].chars().count();
            cursor = m.end();

            let base = m.as_str().trim_end_matches(&[VS15, VS16][..]);
            let Some(&row) = GLYPH_INDEX.get(base) else {
                continue;
            };
            let (glyph, signal) = TOKEN_TABLE[row];
            tokens.push(SignalToken::new(glyph, signal, chars_seen - 1));
        }

        tokens
    }
}

/// Glyph is not glued to a neighbour by ZWJ and not extended by a modifier
fn is_whole_unit(text: &str, start: usize, end: usize) -> bool {
    if text[..start].ends_with(ZWJ) {
        return false;
    }
    !RE_EXTENDER.is_match(&text[end..])
}

// =============================================================================
// TESTS
// =============================================================================
