//! Role markers - the declarative vocabulary authored on page elements.
//!
//! The host tags elements with marker strings; a scan pass parses them and
//! registers the matching controllers. Unknown markers are ignored so a page
//! can carry annotations for other tooling without breaking a scan.

use crate::types::RevealKind;

/// A parsed role marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Reveal(RevealKind),
    Parallax,
    Magnetic,
    Tilt,
}

impl Marker {
    /// Parse one marker string. Returns `None` for anything outside the
    /// vocabulary.
    pub fn parse(s: &str) -> Option<Marker> {
        match s {
            "reveal" => Some(Self::Reveal(RevealKind::Fade)),
            "reveal-left" => Some(Self::Reveal(RevealKind::FromLeft)),
            "reveal-right" => Some(Self::Reveal(RevealKind::FromRight)),
            "reveal-scale" => Some(Self::Reveal(RevealKind::Scale)),
            "parallax" => Some(Self::Parallax),
            "magnetic" => Some(Self::Magnetic),
            "tilt" => Some(Self::Tilt),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
