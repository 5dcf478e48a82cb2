//! Error taxonomy.
//!
//! Almost everything here degrades silently by design: a missing target is a
//! skipped registration, degenerate geometry skips a single frame's update.
//! The one condition worth surfacing is an unsupported host environment,
//! because it makes every visual enhancement inert.

use std::fmt;

pub type EngineResult<T> = Result<T, EngineError>;

/// Host primitive the engine depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Delivery of frame ticks synchronized with the display refresh.
    FrameScheduling,
    /// Batched element-visibility change notifications.
    VisibilityObservation,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameScheduling => write!(f, "frame scheduling"),
            Self::VisibilityObservation => write!(f, "visibility observation"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// The host cannot deliver a required primitive. Never fatal to the
    /// page: callers are expected to fall back to an inert engine.
    #[error("unsupported environment: {0} unavailable")]
    UnsupportedEnvironment(Capability),
}
