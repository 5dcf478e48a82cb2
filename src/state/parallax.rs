//! Parallax positioner - frame-synchronized image translation.
//!
//! Two motion policies exist in the wild and they produce different curves,
//! so they are selectable per target rather than merged:
//!
//! - [`ParallaxMode::Rate`]: `translate_y = scroll_y * rate`, linear in the
//!   scroll position. Typical rates are -0.2 to -0.5.
//! - [`ParallaxMode::Centered`]: translation follows the container's
//!   normalized distance from the viewport center, clamped to `[-1, 1]` and
//!   scaled by half the image-height overflow - the image pans inside a
//!   fixed-height container without ever exposing its edges.
//!
//! Writes happen only while the container intersects the viewport; outside
//! that window the last written transform is left untouched so the image
//! never snaps when it scrolls back in. The effect is always composed after
//! the image's host-authored base transform (centering offsets survive).

use crate::geometry::{center_offset, intersects_viewport, Snapshot};
use crate::page::Page;
use crate::types::{ElementId, Transform, TransformOp};

/// Canonical scroll-rate factor.
pub const DEFAULT_RATE: f64 = -0.5;

/// Motion policy for one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParallaxMode {
    /// Linear in scroll position: `translate_y = scroll_y * rate`.
    Rate(f64),
    /// Clamped by the container's offset from the viewport center, scaled
    /// by half the image overflow and the given intensity (0.0-1.0).
    Centered { intensity: f64 },
}

impl Default for ParallaxMode {
    fn default() -> Self {
        Self::Rate(DEFAULT_RATE)
    }
}

/// A container/image pair registered for parallax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxTarget {
    pub container: ElementId,
    pub image: ElementId,
    pub mode: ParallaxMode,
}

/// Owns the parallax targets and recomputes them once per scheduled frame
/// (scroll and resize both request recomputation, since dimensions feed the
/// centered mode).
#[derive(Debug, Default)]
pub struct ParallaxPositioner {
    targets: Vec<ParallaxTarget>,
}

impl ParallaxPositioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target. Skips silently when either reference is missing
    /// from the page. Re-registering an existing container/image pair is a
    /// no-op.
    pub fn register(
        &mut self,
        page: &Page,
        container: ElementId,
        image: ElementId,
        mode: ParallaxMode,
    ) -> bool {
        if !page.contains(container) || !page.contains(image) {
            return false;
        }
        if self
            .targets
            .iter()
            .any(|t| t.container == container && t.image == image)
        {
            return true;
        }
        self.targets.push(ParallaxTarget { container, image, mode });
        true
    }

    pub fn unregister(&mut self, container: ElementId) {
        self.targets.retain(|t| t.container != container);
    }

    /// Drop targets whose container or image has left the page.
    pub fn prune(&mut self, page: &Page) {
        self.targets
            .retain(|t| page.contains(t.container) && page.contains(t.image));
    }

    pub fn is_registered(&self, container: ElementId) -> bool {
        self.targets.iter().any(|t| t.container == container)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Recompute every visible target against the frame snapshot.
    pub fn update(&self, page: &mut Page, snap: &Snapshot) {
        for target in &self.targets {
            let Some(container_rect) = page.rect(target.container) else { continue };
            if !intersects_viewport(container_rect, snap) {
                // Leave the last written transform in place: writing (or
                // clearing) off-screen would cause a visible jump when the
                // container scrolls back in.
                continue;
            }

            let translate_y = match target.mode {
                ParallaxMode::Rate(rate) => snap.scroll_y * rate,
                ParallaxMode::Centered { intensity } => {
                    let Some(image_rect) = page.rect(target.image) else { continue };
                    if image_rect.height() <= 0.0 || container_rect.height() <= 0.0 {
                        // Not laid out yet: skip this frame for this target.
                        continue;
                    }
                    let overflow =
                        ((image_rect.height() - container_rect.height()) / 2.0).max(0.0);
                    center_offset(container_rect, snap) * overflow * intensity
                }
            };

            let base = page
                .base_transform(target.image)
                .cloned()
                .unwrap_or_default();
            let composed = base.compose(&Transform::of(TransformOp::TranslateY3d(translate_y)));
            page.set_transform(target.image, composed);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
