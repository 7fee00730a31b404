//! Core types for ConsentOS

mod channels;
mod token;
mod state;
mod mode;
mod scoring;
mod invariant;
mod session;
mod reason;
mod error;
mod output;

pub use channels::{Intensity, Pace, Boundary, Emotion, Meta, Safety, Channel, Signal};
pub use token::SignalToken;
pub use state::ConsentState;
pub use mode::ResponseMode;
pub use scoring::ConsentScoring;
pub use invariant::{Invariant, Severity, InvariantOutcome, InvariantReport};
pub use session::{SessionContext, MemoryContext};
pub use reason::ReasonCode;
pub use error::{RejectionError, ResponderError, ConfigError};
pub use output::{ModerationOutcome, ModerationStage, DeliveryPath};
