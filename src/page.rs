//! Page model - the host seam.
//!
//! The host owns a [`Page`]: a document-ordered element tree with live
//! geometry, role markers, and host-authored base transforms. The engine
//! reads that side and writes to a separate presentation layer (active state
//! class, composed transform, opacity). The two stores never mix, so the
//! engine can never read back its own writes as input.
//!
//! Every write against a missing element is a silent no-op: element
//! references are non-owning and the page may drop elements at any time.

use std::collections::HashMap;

use kurbo::Rect;
use kurbo::Size;

use crate::geometry::Snapshot;
use crate::types::{ElementId, Transform};

// =============================================================================
// ELEMENT TREE
// =============================================================================

#[derive(Debug, Clone)]
struct ElementNode {
    id: ElementId,
    parent: Option<ElementId>,
    /// Document-space bounding box (y0 measured from the top of the page).
    rect: Rect,
    /// Declarative role markers authored on the element.
    markers: Vec<String>,
    /// Host-authored transform the engine must compose with, not overwrite.
    base_transform: Transform,
}

/// Presentation state written by the engine, read by the host's renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Presentation {
    /// The boolean "active" state class.
    pub active: bool,
    /// Composed inline transform, `None` when no effect has written one
    /// (the element shows its base transform untouched).
    pub transform: Option<Transform>,
    /// Inline opacity override, `None` when unmanaged.
    pub opacity: Option<f64>,
}

/// Live element tree plus the write-only presentation layer.
#[derive(Debug, Default)]
pub struct Page {
    nodes: Vec<ElementNode>,
    index: HashMap<ElementId, usize>,
    next_id: u32,
    scroll_y: f64,
    viewport: Size,
    presentation: HashMap<ElementId, Presentation>,
}

impl Page {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            viewport: Size::new(viewport_width, viewport_height),
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Tree construction (host side)
    // -------------------------------------------------------------------------

    /// Append an element in document order.
    pub fn add_element(&mut self, parent: Option<ElementId>, rect: Rect) -> ElementId {
        self.add_marked(parent, rect, &[])
    }

    /// Append an element carrying role markers.
    pub fn add_marked(
        &mut self,
        parent: Option<ElementId>,
        rect: Rect,
        markers: &[&str],
    ) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.index.insert(id, self.nodes.len());
        self.nodes.push(ElementNode {
            id,
            parent,
            rect,
            markers: markers.iter().map(|m| m.to_string()).collect(),
            base_transform: Transform::identity(),
        });
        id
    }

    /// Remove an element and, recursively, its children.
    pub fn remove(&mut self, id: ElementId) {
        let children: Vec<ElementId> = self
            .nodes
            .iter()
            .filter(|n| n.parent == Some(id))
            .map(|n| n.id)
            .collect();
        for child in children {
            self.remove(child);
        }

        self.nodes.retain(|n| n.id != id);
        self.presentation.remove(&id);
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id, i))
            .collect();
    }

    // -------------------------------------------------------------------------
    // Reads (engine input side)
    // -------------------------------------------------------------------------

    pub fn contains(&self, id: ElementId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.node(id).map(|n| n.rect)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn markers(&self, id: ElementId) -> &[String] {
        self.node(id).map(|n| n.markers.as_slice()).unwrap_or(&[])
    }

    pub fn base_transform(&self, id: ElementId) -> Option<&Transform> {
        self.node(id).map(|n| &n.base_transform)
    }

    /// First child in document order, if any.
    pub fn first_child(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.iter().find(|n| n.parent == Some(id)).map(|n| n.id)
    }

    /// All element ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Bottom edge of the lowest element, px from the top of the page.
    pub fn content_height(&self) -> f64 {
        self.nodes.iter().map(|n| n.rect.y1).fold(0.0, f64::max)
    }

    /// Sample the scroll/viewport state once for a frame.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.scroll_y, self.viewport)
    }

    fn node(&self, id: ElementId) -> Option<&ElementNode> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut ElementNode> {
        let i = *self.index.get(&id)?;
        Some(&mut self.nodes[i])
    }

    // -------------------------------------------------------------------------
    // Geometry updates (host side)
    // -------------------------------------------------------------------------

    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(n) = self.node_mut(id) {
            n.rect = rect;
        }
    }

    pub fn set_base_transform(&mut self, id: ElementId, transform: Transform) {
        if let Some(n) = self.node_mut(id) {
            n.base_transform = transform;
        }
    }

    pub fn set_scroll(&mut self, y: f64) {
        self.scroll_y = y;
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
    }

    // -------------------------------------------------------------------------
    // Presentation (engine output side, one-way)
    // -------------------------------------------------------------------------

    pub fn set_active(&mut self, id: ElementId, active: bool) {
        if !self.contains(id) {
            return;
        }
        self.presentation.entry(id).or_default().active = active;
    }

    pub fn is_active(&self, id: ElementId) -> bool {
        self.presentation.get(&id).map(|p| p.active).unwrap_or(false)
    }

    pub fn set_transform(&mut self, id: ElementId, transform: Transform) {
        if !self.contains(id) {
            return;
        }
        self.presentation.entry(id).or_default().transform = Some(transform);
    }

    /// Drop the inline transform override, returning the element to its
    /// base transform (the immediate reset used on pointer leave).
    pub fn clear_transform(&mut self, id: ElementId) {
        if let Some(p) = self.presentation.get_mut(&id) {
            p.transform = None;
        }
    }

    pub fn transform(&self, id: ElementId) -> Option<&Transform> {
        self.presentation.get(&id).and_then(|p| p.transform.as_ref())
    }

    pub fn set_opacity(&mut self, id: ElementId, opacity: f64) {
        if !self.contains(id) {
            return;
        }
        self.presentation.entry(id).or_default().opacity = Some(opacity);
    }

    /// Drop the inline opacity override, releasing control back to the
    /// host's style system.
    pub fn clear_opacity(&mut self, id: ElementId) {
        if let Some(p) = self.presentation.get_mut(&id) {
            p.opacity = None;
        }
    }

    pub fn opacity(&self, id: ElementId) -> Option<f64> {
        self.presentation.get(&id).and_then(|p| p.opacity)
    }

    pub fn presentation(&self, id: ElementId) -> Option<&Presentation> {
        self.presentation.get(&id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
