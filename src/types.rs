//! Core types shared across the engine.
//!
//! - [`ElementId`] - opaque handle into the host page's element tree
//! - [`Role`] - which controller owns an element
//! - [`RevealState`] - per-element reveal lifecycle
//! - [`EffectFlags`] - composable pointer effects
//! - [`Transform`] / [`TransformOp`] - typed inline-transform values

use std::fmt;

use bitflags::bitflags;

// =============================================================================
// ELEMENT IDENTITY
// =============================================================================

/// Opaque handle for an element in the host page.
///
/// Ids are allocated by [`crate::page::Page`] in document order and stay
/// stable for the life of the page. The engine never owns the element;
/// an id whose element has been removed simply stops matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

// =============================================================================
// ROLES & STATES
// =============================================================================

/// Which controller owns a registered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Reveal,
    Parallax,
    Pointer,
}

/// Flavor of reveal animation declared by the page.
///
/// The engine only toggles the active state class; the visual mapping for
/// each kind (fade up, slide from a side, scale in) is owned by the host's
/// style system. The kind still matters here because sibling groups are
/// formed by shared parentage *and* shared kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RevealKind {
    #[default]
    Fade,
    FromLeft,
    FromRight,
    Scale,
}

/// Reveal lifecycle of an observed element.
///
/// `Hidden -> Revealing -> Revealed`. `Revealing` means a staggered
/// transition has been scheduled but its timer has not fired yet.
/// In non-reversible mode `Revealed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealing,
    Revealed,
}

bitflags! {
    /// Pointer effects registered on one element.
    ///
    /// Both effects may be active at once, targeting different references
    /// (the magnetic offset typically moves a child image, the tilt rotates
    /// the element itself), so they never write the same visual layer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EffectFlags: u8 {
        const MAGNETIC = 1 << 0;
        const TILT = 1 << 1;
    }
}

// =============================================================================
// TRANSFORMS
// =============================================================================

/// One component of an inline transform.
///
/// Lengths are CSS pixels, angles are degrees. Rendering via `Display`
/// produces the corresponding CSS function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    /// `translate(xpx, ypx)`
    Translate { x: f64, y: f64 },
    /// `translate(x%, y%)` - used for host-authored centering offsets.
    TranslatePercent { x: f64, y: f64 },
    /// `translate3d(0, ypx, 0)` - vertical-only, on the compositor layer.
    TranslateY3d(f64),
    /// `scale(s)`
    Scale(f64),
    /// `perspective(dpx)`
    Perspective(f64),
    /// `rotateX(deg)`
    RotateX(f64),
    /// `rotateY(deg)`
    RotateY(f64),
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translate { x, y } => write!(f, "translate({x}px, {y}px)"),
            Self::TranslatePercent { x, y } => write!(f, "translate({x}%, {y}%)"),
            Self::TranslateY3d(y) => write!(f, "translate3d(0, {y}px, 0)"),
            Self::Scale(s) => write!(f, "scale({s})"),
            Self::Perspective(d) => write!(f, "perspective({d}px)"),
            Self::RotateX(deg) => write!(f, "rotateX({deg}deg)"),
            Self::RotateY(deg) => write!(f, "rotateY({deg}deg)"),
        }
    }
}

/// An ordered list of transform components.
///
/// Controllers never overwrite a host-authored transform: an effect is
/// composed *after* the element's base transform, so a centering offset
/// like `translate(-50%, -50%)` survives every parallax write.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transform {
    ops: Vec<TransformOp>,
}

impl Transform {
    /// The identity transform (no components).
    pub fn identity() -> Self {
        Self::default()
    }

    /// Build from a list of components.
    pub fn from_ops(ops: impl Into<Vec<TransformOp>>) -> Self {
        Self { ops: ops.into() }
    }

    /// Single-component transform.
    pub fn of(op: TransformOp) -> Self {
        Self { ops: vec![op] }
    }

    /// Append a component (builder style).
    pub fn then(mut self, op: TransformOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Compose: `self` (base) followed by `effect`.
    pub fn compose(&self, effect: &Transform) -> Transform {
        let mut ops = self.ops.clone();
        ops.extend_from_slice(&effect.ops);
        Transform { ops }
    }

    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return write!(f, "none");
        }
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
