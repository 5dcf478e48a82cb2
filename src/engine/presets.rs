//! Effect presets.
//!
//! Contains the built-in effect vocabularies seen across production pages:
//! - sophisticated (gentle parallax, default reveals)
//! - premium (eager trigger margin, reversible reveals, strong magnets)
//! - minimalist (slow parallax, relaxed stagger)
//! - advanced (subtle magnets with tilt, relaxed stagger)
//! - centered (image pans around the viewport center)
//!
//! A preset is just a bundle of defaults; per-element options always win.

use std::time::Duration;

use crate::state::parallax::DEFAULT_RATE;
use crate::state::pointer::{DEFAULT_RADIUS, DEFAULT_STRENGTH};
use crate::state::reveal::DEFAULT_STAGGER_INTERVAL;
use crate::state::visibility::{DEFAULT_MARGIN, DEFAULT_THRESHOLD};
use crate::state::ParallaxMode;
use crate::types::EffectFlags;

/// Engine-wide effect defaults, applied wherever a marker does not carry
/// its own options.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectDefaults {
    /// Visibility threshold for reveal triggering.
    pub threshold: f64,
    /// Bottom-edge trigger margin, px.
    pub margin: f64,
    /// Delay between staggered group members.
    pub stagger_interval: Duration,
    /// Whether reveals revert when their element leaves the viewport.
    pub reversible: bool,
    /// Motion policy for parallax-marked containers.
    pub parallax_mode: ParallaxMode,
    /// Attraction radius for magnetic-marked elements, px.
    pub magnet_radius: f64,
    /// Magnetic strength factor.
    pub magnet_strength: f64,
    /// Effects granted to magnetic-marked elements. Presets that pair
    /// magnets with tilt widen this set.
    pub pointer_effects: EffectFlags,
}

impl Default for EffectDefaults {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            margin: DEFAULT_MARGIN,
            stagger_interval: DEFAULT_STAGGER_INTERVAL,
            reversible: false,
            parallax_mode: ParallaxMode::Rate(DEFAULT_RATE),
            magnet_radius: DEFAULT_RADIUS,
            magnet_strength: DEFAULT_STRENGTH,
            pointer_effects: EffectFlags::MAGNETIC,
        }
    }
}

// =============================================================================
// Sophisticated (gentle)
// =============================================================================

/// Sophisticated - restrained motion for content-heavy pages.
/// Parallax barely drifts; everything else stays on the defaults.
pub fn sophisticated() -> EffectDefaults {
    EffectDefaults {
        parallax_mode: ParallaxMode::Rate(-0.2),
        ..Default::default()
    }
}

// =============================================================================
// Premium (eager, reversible)
// =============================================================================

/// Premium - effects that keep working as the visitor scrolls both ways.
/// Triggers 100px early, reveals revert on exit, magnets pull harder.
pub fn premium() -> EffectDefaults {
    EffectDefaults {
        margin: 100.0,
        reversible: true,
        parallax_mode: ParallaxMode::Rate(DEFAULT_RATE),
        magnet_strength: 0.2,
        ..Default::default()
    }
}

// =============================================================================
// Minimalist (slow)
// =============================================================================

/// Minimalist - slow drift and a relaxed stagger cadence.
pub fn minimalist() -> EffectDefaults {
    EffectDefaults {
        stagger_interval: Duration::from_millis(200),
        parallax_mode: ParallaxMode::Rate(-0.3),
        ..Default::default()
    }
}

// =============================================================================
// Advanced (tilt)
// =============================================================================

/// Advanced - subtle magnets paired with perspective tilt.
pub fn advanced() -> EffectDefaults {
    EffectDefaults {
        stagger_interval: Duration::from_millis(200),
        magnet_strength: 0.1,
        pointer_effects: EffectFlags::MAGNETIC | EffectFlags::TILT,
        ..Default::default()
    }
}

// =============================================================================
// Centered (pan)
// =============================================================================

/// Centered - parallax images pan with the container's distance from the
/// viewport center instead of the raw scroll position.
pub fn centered() -> EffectDefaults {
    EffectDefaults {
        parallax_mode: ParallaxMode::Centered { intensity: 1.0 },
        ..Default::default()
    }
}

/// Look up a preset by name. Unknown names return `None`; callers fall back
/// to [`EffectDefaults::default`].
pub fn get_preset(name: &str) -> Option<EffectDefaults> {
    match name {
        "sophisticated" => Some(sophisticated()),
        "premium" => Some(premium()),
        "minimalist" => Some(minimalist()),
        "advanced" => Some(advanced()),
        "centered" => Some(centered()),
        _ => None,
    }
}

/// Names accepted by [`get_preset`].
pub fn preset_names() -> &'static [&'static str] {
    &["sophisticated", "premium", "minimalist", "advanced", "centered"]
}

// =============================================================================
// TESTS
// =============================================================================
