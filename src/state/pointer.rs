//! Pointer interaction controller - magnetic offset and tilt.
//!
//! Both effects are re-derived from scratch on every pointer-move event; no
//! velocity or momentum persists between events. They are composable on one
//! element because they target different references: the magnetic offset
//! moves a child image, the tilt rotates the element itself, so no two
//! writes ever land on the same visual layer.
//!
//! Leaving the element resets both targets to identity immediately (the
//! inline override is dropped, not decayed).

use kurbo::Point;
use std::collections::HashMap;

use crate::geometry::{viewport_top, Snapshot};
use crate::page::Page;
use crate::types::{EffectFlags, ElementId, Transform, TransformOp};

/// Default magnetic attraction radius, px.
pub const DEFAULT_RADIUS: f64 = 100.0;

/// Default magnetic strength factor.
pub const DEFAULT_STRENGTH: f64 = 0.15;

/// Tilt divisor: cursor delta in px over this gives degrees of rotation.
const TILT_DIVISOR: f64 = 10.0;

/// Perspective depth applied with tilt rotations, px.
const TILT_PERSPECTIVE: f64 = 1000.0;

// =============================================================================
// OPTIONS
// =============================================================================

/// Per-element pointer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerOptions {
    pub effects: EffectFlags,
    /// Attraction radius for the magnetic effect, px.
    pub radius: f64,
    /// Magnetic strength factor `k`: offset = delta * strength * k.
    pub strength: f64,
    /// Reference moved by the magnetic offset. `None` targets the element
    /// itself.
    pub magnet_target: Option<ElementId>,
}

impl Default for PointerOptions {
    fn default() -> Self {
        Self {
            effects: EffectFlags::MAGNETIC,
            radius: DEFAULT_RADIUS,
            strength: DEFAULT_STRENGTH,
            magnet_target: None,
        }
    }
}

#[derive(Debug)]
struct PointerRecord {
    options: PointerOptions,
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Owns the pointer targets. Holds no per-event state: every move event is
/// computed fresh from the current cursor and live element geometry.
#[derive(Debug, Default)]
pub struct PointerController {
    records: HashMap<ElementId, PointerRecord>,
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element. Missing elements (or missing magnet targets)
    /// skip silently. Re-registration is a no-op.
    pub fn register(&mut self, page: &Page, id: ElementId, options: PointerOptions) -> bool {
        if !page.contains(id) {
            return false;
        }
        if let Some(target) = options.magnet_target {
            if !page.contains(target) {
                return false;
            }
        }
        self.records.entry(id).or_insert(PointerRecord { options });
        true
    }

    pub fn unregister(&mut self, id: ElementId) {
        self.records.remove(&id);
    }

    /// Drop records whose elements have left the page.
    pub fn prune(&mut self, page: &Page) {
        self.records.retain(|&id, _| page.contains(id));
    }

    pub fn is_registered(&self, id: ElementId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Handle a pointer-move over a registered element. `cursor` is in
    /// viewport coordinates.
    pub fn on_move(&self, page: &mut Page, snap: &Snapshot, id: ElementId, cursor: Point) {
        let Some(record) = self.records.get(&id) else { return };
        let Some(rect) = page.rect(id) else { return };
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            // Not laid out yet; skip the event rather than divide by zero.
            return;
        }

        let center_x = rect.x0 + rect.width() / 2.0;
        let center_y = viewport_top(rect, snap) + rect.height() / 2.0;
        let dx = cursor.x - center_x;
        let dy = cursor.y - center_y;

        let opts = &record.options;
        if opts.effects.contains(EffectFlags::MAGNETIC) {
            self.apply_magnetic(page, id, opts, dx, dy);
        }
        if opts.effects.contains(EffectFlags::TILT) {
            self.apply_tilt(page, id, dx, dy);
        }
    }

    /// Handle the pointer leaving a registered element: both targets reset
    /// to identity at once.
    pub fn on_leave(&self, page: &mut Page, id: ElementId) {
        let Some(record) = self.records.get(&id) else { return };
        page.clear_transform(record.options.magnet_target.unwrap_or(id));
        page.clear_transform(id);
    }

    fn apply_magnetic(
        &self,
        page: &mut Page,
        id: ElementId,
        opts: &PointerOptions,
        dx: f64,
        dy: f64,
    ) {
        let distance = dx.hypot(dy);
        if distance >= opts.radius {
            // Outside the attraction radius: no write at all.
            return;
        }
        let strength = (opts.radius - distance) / opts.radius;
        let move_x = dx * strength * opts.strength;
        let move_y = dy * strength * opts.strength;

        let target = opts.magnet_target.unwrap_or(id);
        let base = page.base_transform(target).cloned().unwrap_or_default();
        let composed = base.compose(&Transform::of(TransformOp::Translate {
            x: move_x,
            y: move_y,
        }));
        page.set_transform(target, composed);
    }

    fn apply_tilt(&self, page: &mut Page, id: ElementId, dx: f64, dy: f64) {
        let rotate_x = -dy / TILT_DIVISOR;
        let rotate_y = dx / TILT_DIVISOR;

        let base = page.base_transform(id).cloned().unwrap_or_default();
        let composed = base.compose(&Transform::from_ops(vec![
            TransformOp::Perspective(TILT_PERSPECTIVE),
            TransformOp::RotateX(rotate_x),
            TransformOp::RotateY(rotate_y),
        ]));
        page.set_transform(id, composed);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    /// A 200x200 element at viewport position (100, 100), with a child
    /// image. Returns (page, element, image).
    fn bottle_page() -> (Page, ElementId, ElementId) {
        let mut page = Page::new(1280.0, 800.0);
        let bottle = page.add_element(None, Rect::new(100.0, 100.0, 300.0, 300.0));
        let image = page.add_element(Some(bottle), Rect::new(120.0, 120.0, 280.0, 280.0));
        (page, bottle, image)
    }

    fn snap(page: &Page) -> Snapshot {
        page.snapshot()
    }

    #[test]
    fn test_magnetic_strength_at_half_radius() {
        let (mut page, bottle, _) = bottle_page();
        let mut pointer = PointerController::new();
        pointer.register(&page, bottle, PointerOptions::default());

        // Cursor 50px right of center (center is 200,200): distance 50,
        // strength (100-50)/100 = 0.5, move_x = 50 * 0.5 * 0.15 = 3.75.
        let s = snap(&page);
        pointer.on_move(&mut page, &s, bottle, Point::new(250.0, 200.0));

        let t = page.transform(bottle).expect("transform written");
        assert_eq!(t.ops(), &[TransformOp::Translate { x: 3.75, y: 0.0 }][..]);
    }

    #[test]
    fn test_magnetic_outside_radius_no_write() {
        let (mut page, bottle, _) = bottle_page();
        let mut pointer = PointerController::new();
        pointer.register(&page, bottle, PointerOptions::default());

        // Distance exactly at the radius: no transform change.
        let s = snap(&page);
        pointer.on_move(&mut page, &s, bottle, Point::new(300.0, 200.0));
        assert_eq!(page.transform(bottle), None);
    }

    #[test]
    fn test_leave_resets_to_identity() {
        let (mut page, bottle, _) = bottle_page();
        let mut pointer = PointerController::new();
        pointer.register(&page, bottle, PointerOptions::default());

        let s = snap(&page);
        pointer.on_move(&mut page, &s, bottle, Point::new(250.0, 200.0));
        assert!(page.transform(bottle).is_some());

        pointer.on_leave(&mut page, bottle);
        assert_eq!(page.transform(bottle), None);
    }

    #[test]
    fn test_magnet_targets_child_image() {
        let (mut page, bottle, image) = bottle_page();
        let mut pointer = PointerController::new();
        pointer.register(
            &page,
            bottle,
            PointerOptions { magnet_target: Some(image), ..Default::default() },
        );

        let s = snap(&page);
        pointer.on_move(&mut page, &s, bottle, Point::new(250.0, 200.0));

        // The offset lands on the image, not the element.
        assert!(page.transform(image).is_some());
        assert_eq!(page.transform(bottle), None);
    }

    #[test]
    fn test_tilt_rotation() {
        let (mut page, bottle, _) = bottle_page();
        let mut pointer = PointerController::new();
        pointer.register(
            &page,
            bottle,
            PointerOptions { effects: EffectFlags::TILT, ..Default::default() },
        );

        // Cursor 30px right, 20px below center.
        let s = snap(&page);
        pointer.on_move(&mut page, &s, bottle, Point::new(230.0, 220.0));

        let t = page.transform(bottle).expect("transform written");
        assert_eq!(
            t.ops(),
            &[
                TransformOp::Perspective(1000.0),
                TransformOp::RotateX(-2.0),
                TransformOp::RotateY(3.0),
            ][..]
        );
    }

    #[test]
    fn test_both_effects_target_different_layers() {
        let (mut page, bottle, image) = bottle_page();
        let mut pointer = PointerController::new();
        pointer.register(
            &page,
            bottle,
            PointerOptions {
                effects: EffectFlags::MAGNETIC | EffectFlags::TILT,
                magnet_target: Some(image),
                ..Default::default()
            },
        );

        let s = snap(&page);
        pointer.on_move(&mut page, &s, bottle, Point::new(250.0, 220.0));

        // Magnetic on the image, tilt on the element: no conflict.
        let image_ops = page.transform(image).unwrap().ops();
        assert!(matches!(image_ops[0], TransformOp::Translate { .. }));
        let bottle_ops = page.transform(bottle).unwrap().ops();
        assert!(matches!(bottle_ops[0], TransformOp::Perspective(_)));

        // Leave clears both at once.
        pointer.on_leave(&mut page, bottle);
        assert_eq!(page.transform(image), None);
        assert_eq!(page.transform(bottle), None);
    }

    #[test]
    fn test_zero_sized_element_skips_event() {
        let mut page = Page::new(1280.0, 800.0);
        let id = page.add_element(None, Rect::new(100.0, 100.0, 100.0, 100.0));
        let mut pointer = PointerController::new();
        pointer.register(&page, id, PointerOptions::default());

        let s = page.snapshot();
        pointer.on_move(&mut page, &s, id, Point::new(100.0, 100.0));
        assert_eq!(page.transform(id), None);
    }

    #[test]
    fn test_scroll_offset_respected() {
        // Element in document space far down the page; with the page
        // scrolled its viewport center moves accordingly.
        let mut page = Page::new(1280.0, 800.0);
        let id = page.add_element(None, Rect::new(100.0, 2100.0, 300.0, 2300.0));
        let mut pointer = PointerController::new();
        pointer.register(&page, id, PointerOptions::default());
        page.set_scroll(2000.0);

        // Viewport center of the element is now (200, 200); cursor dead on
        // it gives distance 0, strength 1, offset (0, 0).
        let s = page.snapshot();
        pointer.on_move(&mut page, &s, id, Point::new(200.0, 200.0));
        let t = page.transform(id).expect("transform written");
        assert_eq!(t.ops(), &[TransformOp::Translate { x: 0.0, y: 0.0 }][..]);
    }

    #[test]
    fn test_unregistered_and_missing_are_noops() {
        let (mut page, bottle, image) = bottle_page();
        let pointer = PointerController::new();

        // Never registered: both events are no-ops.
        let s = snap(&page);
        pointer.on_move(&mut page, &s, bottle, Point::new(250.0, 200.0));
        pointer.on_leave(&mut page, bottle);
        assert_eq!(page.transform(bottle), None);

        // Registration against a removed magnet target is skipped.
        let mut pointer = PointerController::new();
        page.remove(image);
        assert!(!pointer.register(
            &page,
            bottle,
            PointerOptions { magnet_target: Some(image), ..Default::default() },
        ));
        assert!(pointer.is_empty());
    }
}
