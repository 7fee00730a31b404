//! Signal channels: six closed vocabularies of five values each

use serde::{Deserialize, Serialize};

/// Emotional-intensity channel (singleton, rightmost wins)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intensity {
    #[default]
    Baseline,
    Activated,
    ApproachingEdge,
    AtLimit,
    AlteredState,
}

impl Intensity {
    /// Risk floor contributed by this intensity
    pub fn base_risk(&self) -> u8 {
        match self {
            Intensity::Baseline => 0,
            Intensity::Activated => 1,
            Intensity::ApproachingEdge => 2,
            Intensity::AtLimit => 3,
            Intensity::AlteredState => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Baseline => "baseline",
            Intensity::Activated => "activated",
            Intensity::ApproachingEdge => "approaching-edge",
            Intensity::AtLimit => "at-limit",
            Intensity::AlteredState => "altered-state",
        }
    }
}

/// Pace channel (singleton, rightmost wins)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pace {
    Faster,
    #[default]
    Steady,
    Pause,
    Backup,
    Revisit,
}

impl Pace {
    pub fn label(&self) -> &'static str {
        match self {
            Pace::Faster => "faster",
            Pace::Steady => "steady",
            Pace::Pause => "pause",
            Pace::Backup => "backup",
            Pace::Revisit => "revisit",
        }
    }
}

/// Boundary channel (singleton, rightmost wins)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Boundary {
    #[default]
    OpenDoor,
    WindowOnly,
    Wall,
    Bridge,
    Key,
}

impl Boundary {
    pub fn label(&self) -> &'static str {
        match self {
            Boundary::OpenDoor => "open-door",
            Boundary::WindowOnly => "window-only",
            Boundary::Wall => "wall",
            Boundary::Bridge => "bridge",
            Boundary::Key => "key",
        }
    }
}

/// Emotion channel (bounded list, leftmost retained)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Emotion {
    Grief,
    Rage,
    Overwhelm,
    Numbness,
    Shock,
}

impl Emotion {
    /// Overwhelm, numbness and shock raise risk; grief and rage only advise
    pub fn is_high_intensity(&self) -> bool {
        matches!(self, Emotion::Overwhelm | Emotion::Numbness | Emotion::Shock)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Grief => "grief",
            Emotion::Rage => "rage",
            Emotion::Overwhelm => "overwhelm",
            Emotion::Numbness => "numbness",
            Emotion::Shock => "shock",
        }
    }
}

/// Meta-awareness channel (bounded list, leftmost retained)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Meta {
    WitnessEye,
    Mirror,
    Mask,
    Puzzle,
    RealityCheck,
}

impl Meta {
    pub fn label(&self) -> &'static str {
        match self {
            Meta::WitnessEye => "witness-eye",
            Meta::Mirror => "mirror",
            Meta::Mask => "mask",
            Meta::Puzzle => "puzzle",
            Meta::RealityCheck => "reality-check",
        }
    }
}

/// Safety channel (0 or 1, rightmost wins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Safety {
    ComfortRequest,
    DistressCall,
    Alarm,
    Medical,
    PhoneEscalation,
}

impl Safety {
    /// Signals that force CRISIS before any other rule runs
    pub fn is_absolute_override(&self) -> bool {
        matches!(self, Safety::Alarm | Safety::Medical | Safety::PhoneEscalation)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Safety::ComfortRequest => "comfort-request",
            Safety::DistressCall => "distress-call",
            Safety::Alarm => "alarm",
            Safety::Medical => "medical",
            Safety::PhoneEscalation => "phone-escalation",
        }
    }
}

/// Channel tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Intensity,
    Pace,
    Boundary,
    Emotion,
    Meta,
    Safety,
}

/// A channel value, tagged with its channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "channel", content = "value", rename_all = "lowercase")]
pub enum Signal {
    Intensity(Intensity),
    Pace(Pace),
    Boundary(Boundary),
    Emotion(Emotion),
    Meta(Meta),
    Safety(Safety),
}

impl Signal {
    pub fn channel(&self) -> Channel {
        match self {
            Signal::Intensity(_) => Channel::Intensity,
            Signal::Pace(_) => Channel::Pace,
            Signal::Boundary(_) => Channel::Boundary,
            Signal::Emotion(_) => Channel::Emotion,
            Signal::Meta(_) => Channel::Meta,
            Signal::Safety(_) => Channel::Safety,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Signal::Intensity(v) => v.label(),
            Signal::Pace(v) => v.label(),
            Signal::Boundary(v) => v.label(),
            Signal::Emotion(v) => v.label(),
            Signal::Meta(v) => v.label(),
            Signal::Safety(v) => v.label(),
        }
    }
}

macro_rules! impl_label_display {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.label())
                }
            }
        )*
    };
}

impl_label_display!(Intensity, Pace, Boundary, Emotion, Meta, Safety, Signal);
