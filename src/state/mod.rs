//! Effect controllers.
//!
//! Each controller owns the records for one role and is the only writer of
//! that role's presentation properties:
//!
//! - [`visibility`] - threshold/margin watcher shared by the reveal path
//! - [`reveal`] - visibility-triggered reveal with staggered sibling groups
//! - [`parallax`] - frame-synchronized image translation
//! - [`pointer`] - per-event magnetic offset and tilt

pub mod parallax;
pub mod pointer;
pub mod reveal;
pub mod visibility;

pub use parallax::{ParallaxMode, ParallaxPositioner, ParallaxTarget};
pub use pointer::{PointerController, PointerOptions};
pub use reveal::{RevealController, RevealOptions};
pub use visibility::{VisibilityEntry, VisibilityOptions, VisibilityWatcher};
