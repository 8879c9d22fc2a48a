//! Scene objects - the building blocks of a card.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bitmap::Bitmap;
use crate::error::{CardError, CardResult};
use crate::geometry::Point;
use crate::text::FontSpec;

/// Unique identifier for a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Create a new unique object ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb8(0x00, 0x00, 0x00);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb8(0xff, 0xff, 0xff);

    /// Create an opaque color from 8-bit channels.
    #[must_use]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from 8-bit channels including alpha.
    #[must_use]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#rrggbb` hex string (leading `#` optional).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not six hex digits.
    pub fn from_hex(hex: &str) -> CardResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(CardError::InvalidInput(format!("bad hex color: {hex}")));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| CardError::InvalidInput(format!("bad hex color: {hex}")))
        };
        Ok(Self::from_rgb8(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }

    /// Format as a `#rrggbb` hex string (alpha is not included).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// The kind-specific payload of a scene object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ObjectKind {
    /// A run of text anchored at its baseline-left point.
    Text {
        /// Text content.
        content: String,
        /// Font size in canvas units.
        font_size: f32,
        /// Font family name.
        font_family: String,
        /// Bold style flag.
        bold: bool,
        /// Italic style flag.
        italic: bool,
        /// Measured width of the rendered run (0 when measurement was
        /// unavailable).
        width: f32,
        /// Height of the run; always equals the font size.
        height: f32,
    },

    /// A single symbol glyph (emoji) anchored at its center-ish point.
    /// Its extent is `font_size` in both dimensions.
    Icon {
        /// The glyph string.
        glyph: String,
        /// Glyph size in canvas units.
        font_size: f32,
    },

    /// An axis-aligned rectangle.
    Rectangle {
        /// Width in canvas units.
        width: f32,
        /// Height in canvas units.
        height: f32,
    },

    /// A circle whose bounding box starts at the object position.
    Circle {
        /// Radius in canvas units.
        radius: f32,
    },

    /// An isoceles triangle inscribed in a `size` x `size` box.
    Triangle {
        /// Edge box size in canvas units.
        size: f32,
    },

    /// A straight segment from the object position.
    Line {
        /// Fallback length when no explicit endpoint is set.
        width: f32,
        /// Nominal thickness (informational; strokes draw at a fixed width).
        height: f32,
        /// Explicit endpoint; when absent the segment runs to `(x + width, y)`.
        end: Option<Point>,
    },

    /// A heart inscribed in a `size` x `size` box.
    Heart {
        /// Extent box size in canvas units.
        size: f32,
    },

    /// A raster image scaled into a `width` x `height` box.
    Image {
        /// Display width in canvas units.
        width: f32,
        /// Display height in canvas units.
        height: f32,
        /// Decoded pixels. Not serialized; `None` after deserialization
        /// (painting is a no-op until the host re-attaches a bitmap).
        #[serde(skip)]
        bitmap: Option<Bitmap>,
    },
}

impl ObjectKind {
    /// Short lowercase name of the kind, matching its serialized tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Icon { .. } => "icon",
            Self::Rectangle { .. } => "rectangle",
            Self::Circle { .. } => "circle",
            Self::Triangle { .. } => "triangle",
            Self::Line { .. } => "line",
            Self::Heart { .. } => "heart",
            Self::Image { .. } => "image",
        }
    }
}

/// A placed object: common fields plus the kind-specific payload.
///
/// Every field holds a concrete value from construction onward; "unset" is
/// not representable. Kinds that never paint with one of the colors simply
/// ignore it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    /// Unique identifier.
    pub id: ObjectId,
    /// Anchor X (kind-specific anchor; baseline-left for text).
    pub x: f32,
    /// Anchor Y.
    pub y: f32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Kind-specific payload.
    pub kind: ObjectKind,
}

impl SceneObject {
    /// Create an object of the given kind at the origin with neutral style
    /// (black fill and stroke, fully opaque).
    #[must_use]
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            id: ObjectId::new(),
            x: 0.0,
            y: 0.0,
            opacity: 1.0,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            kind,
        }
    }

    /// Set the anchor position.
    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the fill color.
    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Set the stroke color.
    #[must_use]
    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    /// Set the opacity, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// The font specification for a text object, `None` for other kinds.
    #[must_use]
    pub fn font_spec(&self) -> Option<FontSpec> {
        match &self.kind {
            ObjectKind::Text {
                font_size,
                font_family,
                bold,
                italic,
                ..
            } => Some(FontSpec {
                family: font_family.clone(),
                size: *font_size,
                bold: *bold,
                italic: *italic,
            }),
            _ => None,
        }
    }
}

/// A validated partial update applied to the selected object.
///
/// Fields left as `None` are untouched. Invalid values (non-positive font
/// size, out-of-range opacity) are clamped or ignored rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyPatch {
    /// New fill color.
    pub fill: Option<Color>,
    /// New stroke color.
    pub stroke: Option<Color>,
    /// New font size (text and icons).
    pub font_size: Option<f32>,
    /// New font family (text only).
    pub font_family: Option<String>,
    /// New bold flag (text only).
    pub bold: Option<bool>,
    /// New italic flag (text only).
    pub italic: Option<bool>,
    /// New opacity, clamped to `[0, 1]`.
    pub opacity: Option<f32>,
}

/// Read-back of the selected object's editable properties, for binding a
/// property panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectProperties {
    /// Kind tag, e.g. `"rectangle"`.
    pub kind: &'static str,
    /// Current fill color.
    pub fill: Color,
    /// Current stroke color.
    pub stroke: Color,
    /// Current opacity.
    pub opacity: f32,
    /// Font specification for text objects; icons report size only via
    /// `icon_size`.
    pub font: Option<FontSpec>,
    /// Icon glyph size, when an icon is selected.
    pub icon_size: Option<f32>,
    /// Display size, when an image is selected.
    pub image_size: Option<(f32, f32)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_round_trip() {
        let c = Color::from_hex("#ff6b6b").expect("parse");
        assert_eq!(c, Color::from_rgb8(0xff, 0x6b, 0x6b));
        assert_eq!(c.to_hex(), "#ff6b6b");

        let bare = Color::from_hex("333333").expect("parse without hash");
        assert_eq!(bare, Color::from_rgb8(0x33, 0x33, 0x33));
    }

    #[test]
    fn test_color_hex_rejects_garbage() {
        assert!(Color::from_hex("#ff6b").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_builder_clamps_opacity() {
        let obj = SceneObject::new(ObjectKind::Circle { radius: 10.0 }).with_opacity(3.0);
        assert!((obj.opacity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_object_ids_unique() {
        let a = SceneObject::new(ObjectKind::Heart { size: 10.0 });
        let b = SceneObject::new(ObjectKind::Heart { size: 10.0 });
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_kind_serde_tag() {
        let obj = SceneObject::new(ObjectKind::Rectangle {
            width: 100.0,
            height: 60.0,
        });
        let json = serde_json::to_string(&obj).expect("serialize");
        assert!(json.contains("\"type\":\"rectangle\""));
    }

    #[test]
    fn test_font_spec_only_for_text() {
        let text = SceneObject::new(ObjectKind::Text {
            content: "Hi".into(),
            font_size: 24.0,
            font_family: "Arial".into(),
            bold: true,
            italic: false,
            width: 30.0,
            height: 24.0,
        });
        let spec = text.font_spec().expect("text has a font spec");
        assert!(spec.bold);
        assert_eq!(spec.family, "Arial");

        let rect = SceneObject::new(ObjectKind::Rectangle {
            width: 1.0,
            height: 1.0,
        });
        assert!(rect.font_spec().is_none());
    }
}
