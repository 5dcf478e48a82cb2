//! Geometry sampler - pure viewport/element projections.
//!
//! Element rects live in document space (y grows downward from the top of
//! the page). A [`Snapshot`] captures the scroll offset and viewport size
//! once per frame; every projection here converts to viewport space through
//! that snapshot so all update functions in a frame observe identical
//! geometry.
//!
//! No caching across frames: rects can change between frames from layout
//! or animation, so callers always re-read live state at call time.

use kurbo::{Rect, Size};

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Scroll/viewport state sampled once at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Vertical scroll offset of the page, px.
    pub scroll_y: f64,
    /// Viewport dimensions, px.
    pub viewport: Size,
}

impl Snapshot {
    pub fn new(scroll_y: f64, viewport: Size) -> Self {
        Self { scroll_y, viewport }
    }
}

// =============================================================================
// PROJECTIONS
// =============================================================================

/// Viewport-space top edge of a document-space rect.
pub fn viewport_top(rect: Rect, snap: &Snapshot) -> f64 {
    rect.y0 - snap.scroll_y
}

/// Viewport-space bottom edge of a document-space rect.
pub fn viewport_bottom(rect: Rect, snap: &Snapshot) -> f64 {
    rect.y1 - snap.scroll_y
}

/// Whether any part of the rect is inside the viewport.
///
/// The window is `bottom >= 0 && top <= viewport_height`, edges inclusive.
pub fn intersects_viewport(rect: Rect, snap: &Snapshot) -> bool {
    viewport_bottom(rect, snap) >= 0.0 && viewport_top(rect, snap) <= snap.viewport.height
}

/// Fraction of the element's height visible inside the viewport, with the
/// bottom edge pulled up by `bottom_margin` px (the trigger margin: elements
/// report visibility slightly before they reach the real bottom edge).
///
/// Returns 0.0 for zero-height rects.
pub fn visible_ratio(rect: Rect, snap: &Snapshot, bottom_margin: f64) -> f64 {
    let height = rect.height();
    if height <= 0.0 {
        return 0.0;
    }
    let top = viewport_top(rect, snap);
    let bottom = viewport_bottom(rect, snap);
    let window_bottom = snap.viewport.height - bottom_margin;

    let overlap = bottom.min(window_bottom) - top.max(0.0);
    (overlap / height).clamp(0.0, 1.0)
}

/// Normalized offset of the element's center from the viewport center,
/// clamped to `[-1, 1]`.
///
/// Positive when the element center sits above the viewport center (the
/// element has been scrolled past), negative when it is still below.
/// Returns 0.0 for a degenerate (zero-extent) configuration.
pub fn center_offset(rect: Rect, snap: &Snapshot) -> f64 {
    let viewport_center = snap.viewport.height / 2.0;
    let element_center = viewport_top(rect, snap) + rect.height() / 2.0;

    let denom = snap.viewport.height / 2.0 + rect.height() / 2.0;
    if denom <= 0.0 {
        return 0.0;
    }
    ((viewport_center - element_center) / denom).clamp(-1.0, 1.0)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(scroll_y: f64) -> Snapshot {
        Snapshot::new(scroll_y, Size::new(1280.0, 800.0))
    }

    #[test]
    fn test_intersects_viewport_window() {
        let rect = Rect::new(0.0, 1000.0, 100.0, 1400.0);

        // Fully below the fold at scroll 0.
        assert!(!intersects_viewport(rect, &snap(0.0)));
        // Bottom edge just reaches the top of the window.
        assert!(intersects_viewport(rect, &snap(1400.0)));
        // Scrolled into view.
        assert!(intersects_viewport(rect, &snap(600.0)));
        // Scrolled fully past.
        assert!(!intersects_viewport(rect, &snap(1401.0)));
    }

    #[test]
    fn test_visible_ratio_partial() {
        // 400px tall element starting at document y=1000.
        let rect = Rect::new(0.0, 1000.0, 100.0, 1400.0);

        // 200px of it inside an 800px viewport (no margin).
        let s = snap(400.0);
        let ratio = visible_ratio(rect, &s, 0.0);
        assert!((ratio - 0.5).abs() < 1e-9);

        // Fully visible once scrolled far enough.
        let s = snap(900.0);
        assert!((visible_ratio(rect, &s, 0.0) - 1.0).abs() < 1e-9);

        // Not visible at all.
        assert!((visible_ratio(rect, &snap(0.0), 0.0)).abs() < 1e-9);
    }

    #[test]
    fn test_visible_ratio_trigger_margin() {
        let rect = Rect::new(0.0, 1000.0, 100.0, 1400.0);

        // With a 50px margin the effective window bottom is 750, so the
        // same scroll position reports a smaller ratio.
        let s = snap(400.0);
        let with_margin = visible_ratio(rect, &s, 50.0);
        let without = visible_ratio(rect, &s, 0.0);
        assert!(with_margin < without);
        assert!((with_margin - 150.0 / 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_visible_ratio_zero_height() {
        let rect = Rect::new(0.0, 100.0, 50.0, 100.0);
        assert_eq!(visible_ratio(rect, &snap(0.0), 0.0), 0.0);
    }

    #[test]
    fn test_center_offset_clamped() {
        // 200px tall element centered exactly at the viewport center.
        let rect = Rect::new(0.0, 300.0, 100.0, 500.0);
        assert!((center_offset(rect, &snap(0.0))).abs() < 1e-9);

        // Far below: clamped to -1.
        let below = Rect::new(0.0, 10_000.0, 100.0, 10_200.0);
        assert!((center_offset(below, &snap(0.0)) - -1.0).abs() < 1e-9);

        // Far above (scrolled past): clamped to +1.
        assert!((center_offset(rect, &snap(10_000.0)) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_center_offset_degenerate() {
        let rect = Rect::new(0.0, 0.0, 0.0, 0.0);
        let s = Snapshot::new(0.0, Size::new(0.0, 0.0));
        assert_eq!(center_offset(rect, &s), 0.0);
    }
}
