//! Visibility watcher - edge-triggered viewport-intersection reports.
//!
//! One watcher serves every observed element, keyed by a visibility
//! threshold (fraction of the element that must be inside the viewport)
//! and a trigger margin that fires slightly before the element reaches the
//! bottom edge.
//!
//! Entries are edge-triggered: a pass reports an element only when its
//! intersecting state changed since the previous pass - except the first
//! pass after `observe()`, which always reports, so an element that starts
//! inside the trigger region is revealed rather than skipped.

use std::collections::HashMap;

use crate::geometry::{visible_ratio, Snapshot};
use crate::page::Page;
use crate::types::ElementId;

/// Default visibility threshold: 10% of the element.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Default trigger margin: fire 50px before the bottom edge.
pub const DEFAULT_MARGIN: f64 = 50.0;

/// Watcher configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityOptions {
    /// Fraction of the element that must be visible to count as
    /// intersecting.
    pub threshold: f64,
    /// Bottom-edge pull-in, px.
    pub margin: f64,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD, margin: DEFAULT_MARGIN }
    }
}

/// One visibility-change report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    pub element: ElementId,
    pub is_intersecting: bool,
    /// Visible fraction of the element within the margin-adjusted window.
    pub ratio: f64,
}

/// Tracks observed elements and reports threshold crossings per pass.
#[derive(Debug, Default)]
pub struct VisibilityWatcher {
    options: VisibilityOptions,
    /// Observation order; doubles as report order within a pass.
    observed: Vec<ElementId>,
    /// Last reported intersecting state. Absent until the first pass.
    last: HashMap<ElementId, bool>,
}

impl VisibilityWatcher {
    pub fn new(options: VisibilityOptions) -> Self {
        Self { options, ..Self::default() }
    }

    pub fn options(&self) -> VisibilityOptions {
        self.options
    }

    /// Start observing an element. Observing twice is a no-op.
    pub fn observe(&mut self, id: ElementId) {
        if !self.observed.contains(&id) {
            self.observed.push(id);
        }
    }

    /// Stop observing an element and forget its last state.
    pub fn unobserve(&mut self, id: ElementId) {
        self.observed.retain(|&e| e != id);
        self.last.remove(&id);
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Run one observation pass against live geometry.
    ///
    /// Elements missing from the page are skipped (their last state is kept
    /// so a re-added element re-reports on its next pass only if it
    /// changed). Returns entries in observation order.
    pub fn pass(&mut self, page: &Page, snap: &Snapshot) -> Vec<VisibilityEntry> {
        let mut entries = Vec::new();
        for &id in &self.observed {
            let Some(rect) = page.rect(id) else { continue };

            let ratio = visible_ratio(rect, snap, self.options.margin);
            let intersecting = ratio >= self.options.threshold;

            let report = match self.last.get(&id) {
                None => true, // first pass always reports
                Some(&prev) => prev != intersecting,
            };
            self.last.insert(id, intersecting);

            if report {
                entries.push(VisibilityEntry {
                    element: id,
                    is_intersecting: intersecting,
                    ratio,
                });
            }
        }
        entries
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn page_with(top: f64, height: f64) -> (Page, ElementId) {
        let mut page = Page::new(1280.0, 800.0);
        let id = page.add_element(None, Rect::new(0.0, top, 100.0, top + height));
        (page, id)
    }

    #[test]
    fn test_first_pass_reports_visible_element() {
        // Element already inside the trigger region at registration.
        let (page, id) = page_with(100.0, 200.0);
        let mut watcher = VisibilityWatcher::new(VisibilityOptions::default());
        watcher.observe(id);

        let entries = watcher.pass(&page, &page.snapshot());
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);
        assert!((entries[0].ratio - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_edge_triggered_not_level_triggered() {
        let (page, id) = page_with(100.0, 200.0);
        let mut watcher = VisibilityWatcher::new(VisibilityOptions::default());
        watcher.observe(id);

        assert_eq!(watcher.pass(&page, &page.snapshot()).len(), 1);
        // Unchanged visibility: nothing to report.
        assert!(watcher.pass(&page, &page.snapshot()).is_empty());
        assert!(watcher.pass(&page, &page.snapshot()).is_empty());
    }

    #[test]
    fn test_threshold_crossing() {
        // Element below the fold.
        let (mut page, id) = page_with(2000.0, 400.0);
        let mut watcher = VisibilityWatcher::new(VisibilityOptions::default());
        watcher.observe(id);

        let first = watcher.pass(&page, &page.snapshot());
        assert_eq!(first.len(), 1);
        assert!(!first[0].is_intersecting);

        // Scroll until ~half of it is inside the margin-adjusted window.
        page.set_scroll(1450.0);
        let entries = watcher.pass(&page, &page.snapshot());
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);

        // Scroll back out: exit reported once.
        page.set_scroll(0.0);
        let exits = watcher.pass(&page, &page.snapshot());
        assert_eq!(exits.len(), 1);
        assert!(!exits[0].is_intersecting);
    }

    #[test]
    fn test_margin_delays_trigger() {
        // Element whose top enters the raw viewport but not the
        // margin-adjusted window.
        let (page, id) = page_with(770.0, 400.0);
        let mut watcher = VisibilityWatcher::new(VisibilityOptions {
            threshold: 0.01,
            margin: 50.0,
        });
        watcher.observe(id);

        let entries = watcher.pass(&page, &page.snapshot());
        assert_eq!(entries.len(), 1);
        // 770 > 800 - 50, so the margin keeps it out.
        assert!(!entries[0].is_intersecting);
    }

    #[test]
    fn test_missing_element_skipped() {
        let (mut page, id) = page_with(100.0, 200.0);
        let mut watcher = VisibilityWatcher::new(VisibilityOptions::default());
        watcher.observe(id);
        page.remove(id);

        assert!(watcher.pass(&page, &page.snapshot()).is_empty());
    }

    #[test]
    fn test_observe_is_idempotent() {
        let (page, id) = page_with(100.0, 200.0);
        let mut watcher = VisibilityWatcher::new(VisibilityOptions::default());
        watcher.observe(id);
        watcher.observe(id);
        assert_eq!(watcher.observed_count(), 1);

        // Only one entry even though observed twice.
        assert_eq!(watcher.pass(&page, &page.snapshot()).len(), 1);

        watcher.unobserve(id);
        assert_eq!(watcher.observed_count(), 0);
    }
}
