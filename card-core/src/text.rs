//! Text measurement collaborator contract.
//!
//! The core needs rendered text widths synchronously (object creation,
//! property edits) but owns no rasterizer; hosts supply a [`TextMeasurer`].
//! `card-renderer` provides a glyph-metric implementation; [`FixedAdvance`]
//! is a deterministic approximation for headless hosts and tests.

use serde::{Deserialize, Serialize};

/// Fixed family used for icon glyphs.
pub const ICON_FONT_FAMILY: &str = "Arial";

/// A font selection: family, size, and style flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Family name, e.g. `"Arial"`.
    pub family: String,
    /// Size in canvas units.
    pub size: f32,
    /// Bold style flag.
    pub bold: bool,
    /// Italic style flag.
    pub italic: bool,
}

impl FontSpec {
    /// Create a regular (non-bold, non-italic) spec.
    #[must_use]
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }
}

impl std::fmt::Display for FontSpec {
    /// Formats as a CSS-style font string: `bold italic 24px Arial`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.bold {
            write!(f, "bold ")?;
        }
        if self.italic {
            write!(f, "italic ")?;
        }
        write!(f, "{}px {}", self.size, self.family)
    }
}

/// Synchronous text measurement.
///
/// Returns the rendered width of `text` in canvas units, or `None` when
/// measurement is unavailable (no usable font); callers degrade to a
/// zero-width box rather than failing.
pub trait TextMeasurer {
    /// Measure the rendered width of `text` under `spec`.
    fn measure_width(&self, spec: &FontSpec, text: &str) -> Option<f32>;
}

/// Measurer that charges a fixed per-character advance, as a fraction of the
/// font size. Deterministic and always available.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance {
    /// Advance per character, in ems.
    pub advance_em: f32,
}

impl FixedAdvance {
    /// A typical average advance for proportional faces.
    #[must_use]
    pub const fn new(advance_em: f32) -> Self {
        Self { advance_em }
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl TextMeasurer for FixedAdvance {
    #[allow(clippy::cast_precision_loss)]
    fn measure_width(&self, spec: &FontSpec, text: &str) -> Option<f32> {
        Some(text.chars().count() as f32 * spec.size * self.advance_em)
    }
}
