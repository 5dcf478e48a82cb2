//! Engine - composition root.
//!
//! One [`Engine`] serves a whole page. It owns the three effect controllers
//! (reveal, parallax, pointer), the frame scheduler that coalesces input
//! bursts, and the low-priority scroll-progress debouncer.
//!
//! The host drives everything: it forwards scroll/resize/pointer events and
//! calls [`Engine::on_frame`] once per display refresh with a monotonic
//! timestamp. The engine never spawns threads, never sleeps, and only ever
//! writes the page's presentation layer.
//!
//! Mounting degrades gracefully: a host that cannot deliver frame ticks or
//! visibility batches gets an inert engine whose event surface is a no-op,
//! and the page renders fully visible with no effects.

mod markers;
mod presets;

pub use markers::Marker;
pub use presets::{
    advanced, centered, get_preset, minimalist, premium, preset_names, sophisticated,
    EffectDefaults,
};

use std::time::Duration;

use kurbo::Point;
use tracing::{debug, warn};

use crate::error::{Capability, EngineError, EngineResult};
use crate::page::Page;
use crate::pipeline::{Debouncer, FrameScheduler, TimerQueue};
use crate::state::visibility::VisibilityOptions;
use crate::state::{
    ParallaxMode, ParallaxPositioner, PointerController, PointerOptions, RevealController,
    RevealOptions,
};
use crate::types::{EffectFlags, ElementId, Role};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Host primitives the engine needs. The host reports what it can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub frame_scheduling: bool,
    pub visibility_observation: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self { frame_scheduling: true, visibility_observation: true }
    }
}

/// Engine construction parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub defaults: EffectDefaults,
    pub capabilities: Capabilities,
}

/// Handle returned by the explicit registration API; pass it back to
/// [`Engine::dispose`] to undo that one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub element: ElementId,
    pub role: Role,
}

/// Input event carried through the frame scheduler. Scroll and resize
/// request the same recomputation; only the latest survives a burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputEvent {
    Scroll,
    Resize,
}

// =============================================================================
// ENGINE
// =============================================================================

/// The per-page effects engine.
#[derive(Debug)]
pub struct Engine {
    defaults: EffectDefaults,
    reveal: RevealController,
    parallax: ParallaxPositioner,
    pointer: PointerController,
    scheduler: FrameScheduler<InputEvent>,
    debouncer: Debouncer,
    /// Expiry timers for transient notice elements.
    notices: TimerQueue<ElementId>,
    scroll_progress: f64,
    inert: bool,
}

impl Engine {
    /// Build an engine, verifying the host capabilities first.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        if !config.capabilities.frame_scheduling {
            return Err(EngineError::UnsupportedEnvironment(Capability::FrameScheduling));
        }
        if !config.capabilities.visibility_observation {
            return Err(EngineError::UnsupportedEnvironment(
                Capability::VisibilityObservation,
            ));
        }

        let visibility = VisibilityOptions {
            threshold: config.defaults.threshold,
            margin: config.defaults.margin,
        };
        Ok(Self {
            reveal: RevealController::new(visibility),
            parallax: ParallaxPositioner::new(),
            pointer: PointerController::new(),
            scheduler: FrameScheduler::new(),
            debouncer: Debouncer::default(),
            notices: TimerQueue::new(),
            defaults: config.defaults,
            scroll_progress: 0.0,
            inert: false,
        })
    }

    /// Build an engine and scan the page's markers. The initial observation
    /// pass runs on the first [`Engine::on_frame`], so elements already
    /// inside the trigger region reveal without any scrolling.
    pub fn mount(page: &Page, config: EngineConfig) -> EngineResult<Self> {
        let mut engine = Self::new(config)?;
        engine.scan(page);
        engine.scheduler.request(InputEvent::Scroll);
        Ok(engine)
    }

    /// Like [`Engine::mount`], but an unsupported host yields an inert
    /// engine instead of an error: every event method becomes a no-op and
    /// the page is left fully visible, effect-free.
    pub fn mount_or_inert(page: &Page, config: EngineConfig) -> Self {
        match Self::mount(page, config.clone()) {
            Ok(engine) => engine,
            Err(err) => {
                warn!("mounting inert: {err}");
                Self {
                    reveal: RevealController::new(VisibilityOptions::default()),
                    parallax: ParallaxPositioner::new(),
                    pointer: PointerController::new(),
                    scheduler: FrameScheduler::new(),
                    debouncer: Debouncer::default(),
                    notices: TimerQueue::new(),
                    defaults: config.defaults,
                    scroll_progress: 0.0,
                    inert: true,
                }
            }
        }
    }

    pub fn is_inert(&self) -> bool {
        self.inert
    }

    /// Latest debounced scroll progress, 0.0 at the top of the page and 1.0
    /// at the bottom.
    pub fn scroll_progress(&self) -> f64 {
        self.scroll_progress
    }

    // -------------------------------------------------------------------------
    // Scanning & registration
    // -------------------------------------------------------------------------

    /// Scan the page's role markers and register every marked element.
    ///
    /// Safe to call again after the host mutates the tree: stale records are
    /// pruned, known elements are skipped, new ones picked up. Reveal groups
    /// derive from document order, which the scan preserves.
    pub fn scan(&mut self, page: &Page) {
        if self.inert {
            return;
        }
        self.reveal.prune(page);
        self.parallax.prune(page);
        self.pointer.prune(page);

        for id in page.ids() {
            let mut effects = EffectFlags::empty();
            for marker in page.markers(id) {
                match Marker::parse(marker) {
                    Some(Marker::Reveal(kind)) => {
                        self.reveal.register(page, id, RevealOptions {
                            kind,
                            stagger_interval: self.defaults.stagger_interval,
                            reversible: self.defaults.reversible,
                            ..Default::default()
                        });
                    }
                    Some(Marker::Parallax) => {
                        // The first child is the image the effect moves; a
                        // container without one is skipped silently.
                        if let Some(image) = page.first_child(id) {
                            self.parallax.register(page, id, image, self.defaults.parallax_mode);
                        }
                    }
                    Some(Marker::Magnetic) => effects |= self.defaults.pointer_effects,
                    Some(Marker::Tilt) => effects |= EffectFlags::TILT,
                    None => {}
                }
            }
            if !effects.is_empty() {
                // The magnet moves the child image when there is one,
                // otherwise the element itself. One registration covers
                // both effects.
                self.pointer.register(page, id, PointerOptions {
                    effects,
                    radius: self.defaults.magnet_radius,
                    strength: self.defaults.magnet_strength,
                    magnet_target: page.first_child(id),
                });
            }
        }

        debug!(
            reveal = self.reveal.len(),
            parallax = self.parallax.len(),
            pointer = self.pointer.len(),
            "scan complete"
        );
    }

    /// Register a reveal target imperatively, bypassing markers.
    pub fn register_reveal(
        &mut self,
        page: &Page,
        id: ElementId,
        options: RevealOptions,
    ) -> Option<Registration> {
        if self.inert || !self.reveal.register(page, id, options) {
            return None;
        }
        Some(Registration { element: id, role: Role::Reveal })
    }

    /// Register a parallax container/image pair imperatively.
    pub fn register_parallax(
        &mut self,
        page: &Page,
        container: ElementId,
        image: ElementId,
        mode: ParallaxMode,
    ) -> Option<Registration> {
        if self.inert || !self.parallax.register(page, container, image, mode) {
            return None;
        }
        Some(Registration { element: container, role: Role::Parallax })
    }

    /// Register a pointer target imperatively.
    pub fn register_pointer(
        &mut self,
        page: &Page,
        id: ElementId,
        options: PointerOptions,
    ) -> Option<Registration> {
        if self.inert || !self.pointer.register(page, id, options) {
            return None;
        }
        Some(Registration { element: id, role: Role::Pointer })
    }

    /// Show a transient notice element the host has already inserted (style
    /// and content are the host's; the engine only manages the lifecycle).
    /// The element is activated now and removed from the page once
    /// `lifetime` elapses. Returns `false` when the element is missing.
    pub fn show_transient(
        &mut self,
        page: &mut Page,
        id: ElementId,
        lifetime: Duration,
        now: Duration,
    ) -> bool {
        if self.inert || !page.contains(id) {
            return false;
        }
        page.set_active(id, true);
        self.notices.schedule(now + lifetime, id);
        true
    }

    /// Undo one registration. Disposing twice is a no-op.
    pub fn dispose(&mut self, registration: Registration) {
        match registration.role {
            Role::Reveal => self.reveal.unregister(registration.element),
            Role::Parallax => self.parallax.unregister(registration.element),
            Role::Pointer => self.pointer.unregister(registration.element),
        }
    }

    // -------------------------------------------------------------------------
    // Event surface
    // -------------------------------------------------------------------------

    /// Forward a scroll event. Cheap: requests (or coalesces into) the next
    /// frame and restarts the scroll-progress debouncer.
    pub fn on_scroll(&mut self, now: Duration) {
        if self.inert {
            return;
        }
        self.scheduler.request(InputEvent::Scroll);
        self.debouncer.kick(now);
    }

    /// Forward a viewport resize. Recomputes the same way a scroll does,
    /// since dimensions feed both visibility and the centered parallax mode.
    pub fn on_resize(&mut self, now: Duration) {
        if self.inert {
            return;
        }
        self.scheduler.request(InputEvent::Resize);
        self.debouncer.kick(now);
    }

    /// Forward a pointer-move over an element. Pointer effects are applied
    /// per event, not per frame: their writes are tiny and latency matters
    /// more than coalescing.
    pub fn on_pointer_move(&mut self, page: &mut Page, id: ElementId, cursor: Point) {
        if self.inert {
            return;
        }
        let snap = page.snapshot();
        self.pointer.on_move(page, &snap, id, cursor);
    }

    /// Forward the pointer leaving an element: its effects reset at once.
    pub fn on_pointer_leave(&mut self, page: &mut Page, id: ElementId) {
        if self.inert {
            return;
        }
        self.pointer.on_leave(page, id);
    }

    /// Run one frame at timestamp `now`.
    ///
    /// If an input event is pending, geometry is sampled once and every
    /// scroll-driven effect recomputes against that snapshot. Stagger timers
    /// are polled either way, so reveals scheduled by an earlier frame fire
    /// on time even while the page is idle.
    pub fn on_frame(&mut self, page: &mut Page, now: Duration) {
        if self.inert {
            return;
        }

        if self.scheduler.take().is_some() {
            let snap = page.snapshot();
            self.reveal.observe_pass(page, &snap, now);
            self.parallax.update(page, &snap);
        } else {
            self.reveal.poll_timers(page, now);
        }

        for id in self.notices.drain_due(now) {
            page.remove(id);
        }

        if self.debouncer.fire(now) {
            self.scroll_progress = scroll_progress_of(page);
        }
    }

    /// Tear the engine down.
    ///
    /// All listener state is engine-instance state, so consuming the engine
    /// drops every registration and timer at once; nothing survives to leak
    /// into a re-mount. Presentation already written is left for the host's
    /// style system to reconcile.
    pub fn unmount(self) {}
}

/// Fraction of the scrollable range consumed, clamped to `[0, 1]`. A page
/// shorter than the viewport has no scrollable range and reports 0.
fn scroll_progress_of(page: &Page) -> f64 {
    let scrollable = page.content_height() - page.viewport().height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (page.scroll_y() / scrollable).clamp(0.0, 1.0)
}

// =============================================================================
// TESTS
// =============================================================================
