//! Reveal controller - visibility-triggered state transitions with
//! staggered sibling groups.
//!
//! Each observed element carries a [`RevealState`]. When the visibility
//! watcher reports an element entering the trigger region, the element is
//! marked revealed immediately; if it belongs to a group, every still-hidden
//! member is scheduled at `member_index * stagger_interval` from the trigger
//! instant, in document order.
//!
//! Groups are formed by shared parentage and shared reveal kind at
//! registration time, not by explicit authoring; an explicit group name
//! overrides the derived key. Two policies exist for what happens when an
//! element leaves the viewport:
//!
//! - non-reversible (default): the first reveal is permanent
//! - reversible: the element reverts to hidden and may re-trigger, with an
//!   opacity override proportional to the visibility ratio above 50%

use std::collections::HashMap;
use std::time::Duration;

use crate::geometry::Snapshot;
use crate::page::Page;
use crate::pipeline::TimerQueue;
use crate::state::visibility::{VisibilityEntry, VisibilityOptions, VisibilityWatcher};
use crate::types::{ElementId, RevealKind, RevealState};

/// Canonical stagger interval between group members.
pub const DEFAULT_STAGGER_INTERVAL: Duration = Duration::from_millis(150);

// =============================================================================
// OPTIONS & RECORDS
// =============================================================================

/// Per-element reveal configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealOptions {
    pub kind: RevealKind,
    /// Explicit group name. `None` derives the group from shared parent +
    /// shared kind.
    pub group: Option<String>,
    /// Whether this element participates in group staggering at all.
    pub staggered: bool,
    pub stagger_interval: Duration,
    /// Reversible elements revert to hidden on viewport exit.
    pub reversible: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            kind: RevealKind::Fade,
            group: None,
            staggered: true,
            stagger_interval: DEFAULT_STAGGER_INTERVAL,
            reversible: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GroupKey {
    Named(String),
    Siblings {
        parent: Option<ElementId>,
        kind: RevealKind,
    },
}

#[derive(Debug)]
struct RevealRecord {
    state: RevealState,
    options: RevealOptions,
    group: Option<GroupKey>,
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Owns the observed-element set and their reveal state.
#[derive(Debug)]
pub struct RevealController {
    watcher: VisibilityWatcher,
    records: HashMap<ElementId, RevealRecord>,
    /// Members in document order (registration order within a scan).
    groups: HashMap<GroupKey, Vec<ElementId>>,
    timers: TimerQueue<ElementId>,
}

impl RevealController {
    pub fn new(options: VisibilityOptions) -> Self {
        Self {
            watcher: VisibilityWatcher::new(options),
            records: HashMap::new(),
            groups: HashMap::new(),
            timers: TimerQueue::new(),
        }
    }

    /// Register an element. Returns `false` (a silent skip, not an error)
    /// when the element is missing from the page. Re-registering a known
    /// element is a no-op.
    pub fn register(&mut self, page: &Page, id: ElementId, options: RevealOptions) -> bool {
        if !page.contains(id) {
            return false;
        }
        if self.records.contains_key(&id) {
            return true;
        }

        let group = if options.staggered {
            Some(match &options.group {
                Some(name) => GroupKey::Named(name.clone()),
                None => GroupKey::Siblings {
                    parent: page.parent(id),
                    kind: options.kind,
                },
            })
        } else {
            None
        };

        if let Some(key) = &group {
            self.groups.entry(key.clone()).or_default().push(id);
        }
        self.records.insert(id, RevealRecord { state: RevealState::Hidden, options, group });
        self.watcher.observe(id);
        true
    }

    pub fn unregister(&mut self, id: ElementId) {
        if let Some(rec) = self.records.remove(&id) {
            if let Some(key) = rec.group {
                if let Some(members) = self.groups.get_mut(&key) {
                    members.retain(|&m| m != id);
                    if members.is_empty() {
                        self.groups.remove(&key);
                    }
                }
            }
        }
        self.watcher.unobserve(id);
    }

    /// Drop records whose elements have left the page.
    pub fn prune(&mut self, page: &Page) {
        let stale: Vec<ElementId> = self
            .records
            .keys()
            .copied()
            .filter(|&id| !page.contains(id))
            .collect();
        for id in stale {
            self.unregister(id);
        }
    }

    pub fn state(&self, id: ElementId) -> Option<RevealState> {
        self.records.get(&id).map(|r| r.state)
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
    // Frame updates
    // -------------------------------------------------------------------------

    /// Run one observation pass and apply the resulting transitions.
    /// Due timers fire within the same frame, so a zero-delay group member
    /// reveals in the frame that triggered it.
    pub fn observe_pass(&mut self, page: &mut Page, snap: &Snapshot, now: Duration) {
        let entries = self.watcher.pass(page, snap);
        for entry in entries {
            if entry.is_intersecting {
                self.on_enter(page, entry, now);
            } else {
                self.on_exit(page, entry.element);
            }
        }
        self.poll_timers(page, now);
    }

    /// Fire staggered transitions that have come due. Entries whose element
    /// left the page are dropped without effect.
    pub fn poll_timers(&mut self, page: &mut Page, now: Duration) {
        for id in self.timers.drain_due(now) {
            if !page.contains(id) {
                continue;
            }
            let Some(rec) = self.records.get_mut(&id) else { continue };
            if rec.state == RevealState::Revealing {
                rec.state = RevealState::Revealed;
                page.set_active(id, true);
            }
        }
    }

    fn on_enter(&mut self, page: &mut Page, entry: VisibilityEntry, now: Duration) {
        let Some(rec) = self.records.get_mut(&entry.element) else { return };
        let reversible = rec.options.reversible;

        match rec.state {
            RevealState::Hidden => {
                rec.state = RevealState::Revealed;
                page.set_active(entry.element, true);
                if reversible {
                    apply_ratio_opacity(page, entry.element, entry.ratio);
                }
                let group = rec.group.clone();
                let interval = rec.options.stagger_interval;
                if let Some(key) = group {
                    self.trigger_group(&key, interval, now);
                }
            }
            // A stagger timer is already on the way; re-delivering the
            // event must not regress or duplicate anything.
            RevealState::Revealing => {}
            RevealState::Revealed => {
                if reversible {
                    apply_ratio_opacity(page, entry.element, entry.ratio);
                }
            }
        }
    }

    fn on_exit(&mut self, page: &mut Page, id: ElementId) {
        let Some(rec) = self.records.get_mut(&id) else { return };
        if !rec.options.reversible {
            return;
        }
        rec.state = RevealState::Hidden;
        page.set_active(id, false);
        page.set_opacity(id, 0.0);
    }

    /// Walk the group in stored order and schedule each still-hidden member
    /// at `index * interval` from the trigger instant. Revealed members are
    /// never reverted; revealing members are already scheduled.
    fn trigger_group(&mut self, key: &GroupKey, interval: Duration, now: Duration) {
        let Some(members) = self.groups.get(key).cloned() else { return };
        for (index, member) in members.into_iter().enumerate() {
            let Some(rec) = self.records.get_mut(&member) else { continue };
            if rec.state != RevealState::Hidden {
                continue;
            }
            rec.state = RevealState::Revealing;
            self.timers.schedule(now + interval * index as u32, member);
        }
    }
}

/// Reversible-mode opacity policy: proportional override above half
/// visibility, otherwise release the override to the host's styles.
fn apply_ratio_opacity(page: &mut Page, id: ElementId, ratio: f64) {
    if ratio > 0.5 {
        page.set_opacity(id, (ratio * 2.0).min(1.0));
    } else {
        page.clear_opacity(id);
    }
}

// =============================================================================
// TESTS
// =============================================================================
