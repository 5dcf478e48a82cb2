//! # vitrine
//!
//! Scroll-driven visual effects engine for host-rendered pages.
//!
//! The host owns the page: an element tree with live geometry and role
//! markers. vitrine owns the effects: it watches scroll, resize, and pointer
//! input and writes a one-way presentation layer (active state classes,
//! composed transforms, opacity overrides) that the host's renderer applies.
//!
//! ## Architecture
//!
//! Everything is driven through a single per-page [`Engine`]:
//! ```text
//! input events → FrameScheduler (coalesce) → on_frame → controllers → Page presentation
//! ```
//!
//! Three controllers cover the effect families:
//! - reveal: visibility-triggered state transitions with staggered sibling
//!   groups
//! - parallax: frame-synchronized image translation, linear or centered
//! - pointer: per-event magnetic offset and perspective tilt
//!
//! Scroll-driven effects recompute at most once per frame against a single
//! geometry snapshot; pointer effects apply per event. The engine never
//! spawns threads and all timing flows in as caller-supplied monotonic
//! timestamps, so every behavior is testable with a virtual clock.
//!
//! ## Modules
//!
//! - [`types`] - Core types (ElementId, RevealState, Transform, etc.)
//! - [`page`] - The host seam: element tree, geometry, presentation layer
//! - [`engine`] - Composition root: marker scanning, event surface, presets
//! - [`state`] - The effect controllers
//! - [`pipeline`] - Frame scheduler, debouncer, stagger timer queue
//! - [`geometry`] - Viewport math over document-space rectangles

pub mod engine;
pub mod error;
pub mod geometry;
pub mod page;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use engine::{
    advanced, centered, get_preset, minimalist, premium, preset_names, sophisticated,
    Capabilities, EffectDefaults, Engine, EngineConfig, Marker, Registration,
};

pub use error::{Capability, EngineError, EngineResult};

pub use geometry::Snapshot;

pub use page::{Page, Presentation};

pub use pipeline::{Debouncer, FrameScheduler, TimerQueue, DEBOUNCE_DELAY};

pub use state::{
    ParallaxMode, ParallaxPositioner, ParallaxTarget, PointerController, PointerOptions,
    RevealController, RevealOptions, VisibilityEntry, VisibilityOptions, VisibilityWatcher,
};
