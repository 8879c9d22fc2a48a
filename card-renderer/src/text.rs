//! Font discovery, text measurement, and glyph rasterization.
//!
//! Families requested by the scene (Arial, Georgia, ...) are mapped onto
//! whichever sans face the host system provides; style flags select among
//! its regular/bold/italic/bold-italic files. When no usable font exists,
//! measurement answers `None` and drawing is a no-op — the degradation path
//! the core is specified to absorb.

use rusttype::{point, Font, Scale};
use tiny_skia::Pixmap;

use card_core::text::{FontSpec, TextMeasurer};
use card_core::Color;

/// Candidate font files probed by [`FontCatalog::system`], one group per
/// known layout: regular, bold, italic, bold-italic.
const SYSTEM_FONT_GROUPS: &[[&str; 4]] = &[
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    ],
    [
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    ],
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    ],
    [
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
        "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    ],
    [
        "C:\\Windows\\Fonts\\arial.ttf",
        "C:\\Windows\\Fonts\\arialbd.ttf",
        "C:\\Windows\\Fonts\\ariali.ttf",
        "C:\\Windows\\Fonts\\arialbi.ttf",
    ],
];

/// A set of loaded font faces keyed by style flags.
#[derive(Clone, Default)]
pub struct FontCatalog {
    regular: Option<Font<'static>>,
    bold: Option<Font<'static>>,
    italic: Option<Font<'static>>,
    bold_italic: Option<Font<'static>>,
}

impl FontCatalog {
    /// A catalog with no faces: measurement answers `None`, drawing is a
    /// no-op.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Probe well-known system font locations and load the first family
    /// found. Missing style files are tolerated; styles then fall back to
    /// the regular face.
    #[must_use]
    pub fn system() -> Self {
        let mut catalog = Self::empty();
        for group in SYSTEM_FONT_GROUPS {
            if load_face(group[0]).is_none() {
                continue;
            }
            catalog.regular = load_face(group[0]);
            catalog.bold = load_face(group[1]);
            catalog.italic = load_face(group[2]);
            catalog.bold_italic = load_face(group[3]);
            tracing::debug!(path = group[0], "loaded system font family");
            break;
        }
        if catalog.regular.is_none() {
            tracing::warn!("no system font found; text will measure as zero and render blank");
        }
        catalog
    }

    /// Install a face for the given style flags from raw TTF/OTF bytes.
    /// Returns `false` if the bytes are not a usable font.
    pub fn insert(&mut self, bold: bool, italic: bool, bytes: Vec<u8>) -> bool {
        let Some(font) = Font::try_from_vec(bytes) else {
            return false;
        };
        *self.slot(bold, italic) = Some(font);
        true
    }

    /// Whether any face is loaded.
    #[must_use]
    pub fn has_fonts(&self) -> bool {
        self.regular.is_some()
            || self.bold.is_some()
            || self.italic.is_some()
            || self.bold_italic.is_some()
    }

    /// Best face for the style flags: the exact style, then regular.
    fn face(&self, bold: bool, italic: bool) -> Option<&Font<'static>> {
        let exact = match (bold, italic) {
            (false, false) => &self.regular,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (true, true) => &self.bold_italic,
        };
        exact.as_ref().or(self.regular.as_ref())
    }

    fn slot(&mut self, bold: bool, italic: bool) -> &mut Option<Font<'static>> {
        match (bold, italic) {
            (false, false) => &mut self.regular,
            (true, false) => &mut self.bold,
            (false, true) => &mut self.italic,
            (true, true) => &mut self.bold_italic,
        }
    }

    /// Rasterize a glyph run with its baseline-left point at `(x, y)`,
    /// blending coverage into the pixmap at the given color and opacity.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    pub(crate) fn draw_text(
        &self,
        pixmap: &mut Pixmap,
        spec: &FontSpec,
        text: &str,
        x: f32,
        y: f32,
        color: Color,
        opacity: f32,
    ) {
        let Some(font) = self.face(spec.bold, spec.italic) else {
            return;
        };
        let scale = Scale::uniform(spec.size);
        let glyphs: Vec<_> = font.layout(text, scale, point(x, y)).collect();

        let width = pixmap.width() as i32;
        let height = pixmap.height() as i32;
        let base_alpha = opacity.clamp(0.0, 1.0) * f32::from(color.a) / 255.0;
        // Pixmap stores premultiplied RGBA8.
        let data = pixmap.data_mut();

        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px >= width || py >= height {
                    return;
                }
                let a = coverage * base_alpha;
                if a <= 0.0 {
                    return;
                }
                let idx = (py as usize * width as usize + px as usize) * 4;
                let inv = 1.0 - a;
                data[idx] = (f32::from(color.r) * a + f32::from(data[idx]) * inv) as u8;
                data[idx + 1] = (f32::from(color.g) * a + f32::from(data[idx + 1]) * inv) as u8;
                data[idx + 2] = (f32::from(color.b) * a + f32::from(data[idx + 2]) * inv) as u8;
                data[idx + 3] = (255.0 * a + f32::from(data[idx + 3]) * inv) as u8;
            });
        }
    }
}

impl std::fmt::Debug for FontCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontCatalog")
            .field("regular", &self.regular.is_some())
            .field("bold", &self.bold.is_some())
            .field("italic", &self.italic.is_some())
            .field("bold_italic", &self.bold_italic.is_some())
            .finish()
    }
}

impl TextMeasurer for FontCatalog {
    fn measure_width(&self, spec: &FontSpec, text: &str) -> Option<f32> {
        let font = self.face(spec.bold, spec.italic)?;
        let scale = Scale::uniform(spec.size);
        let mut width = 0.0f32;
        for glyph in font.layout(text, scale, point(0.0, 0.0)) {
            let advance = glyph.unpositioned().h_metrics().advance_width;
            width = width.max(glyph.position().x + advance);
        }
        Some(width)
    }
}

fn load_face(path: &str) -> Option<Font<'static>> {
    let bytes = std::fs::read(path).ok()?;
    Font::try_from_vec(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_measures_none() {
        let catalog = FontCatalog::empty();
        let spec = FontSpec::new("Arial", 24.0);
        assert!(catalog.measure_width(&spec, "Hello").is_none());
        assert!(!catalog.has_fonts());
    }

    #[test]
    fn test_empty_catalog_draw_is_noop() {
        let catalog = FontCatalog::empty();
        let mut pixmap = Pixmap::new(10, 10).expect("pixmap");
        let before = pixmap.data().to_vec();
        catalog.draw_text(
            &mut pixmap,
            &FontSpec::new("Arial", 24.0),
            "Hello",
            2.0,
            8.0,
            Color::BLACK,
            1.0,
        );
        assert_eq!(pixmap.data(), &before[..]);
    }

    #[test]
    fn test_insert_rejects_garbage() {
        let mut catalog = FontCatalog::empty();
        assert!(!catalog.insert(false, false, vec![0, 1, 2, 3]));
        assert!(!catalog.has_fonts());
    }

    #[test]
    fn test_system_catalog_measures_when_fonts_exist() {
        // Environment-dependent: only assert behavior consistency.
        let catalog = FontCatalog::system();
        let spec = FontSpec::new("Arial", 24.0);
        let measured = catalog.measure_width(&spec, "Hello");
        if catalog.has_fonts() {
            let w = measured.expect("loaded catalog measures");
            assert!(w > 0.0);
            // Empty text measures zero.
            let empty = catalog.measure_width(&spec, "").expect("measures");
            assert!(empty.abs() < f32::EPSILON);
        } else {
            assert!(measured.is_none());
        }
    }
}
