//! Construction of well-formed objects with validated default geometry.

use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::geometry::Point;
use crate::object::{Color, ObjectKind, SceneObject};
use crate::scene::remeasure_text;
use crate::text::TextMeasurer;

/// Default fill for shapes.
pub const DEFAULT_FILL: Color = Color::from_rgb8(0xff, 0x6b, 0x6b);
/// Default stroke for shapes.
pub const DEFAULT_STROKE: Color = Color::from_rgb8(0x33, 0x33, 0x33);
/// Default fill for new text.
pub const DEFAULT_TEXT_FILL: Color = Color::from_rgb8(0x33, 0x33, 0x33);

/// Relative tolerance when comparing display and natural aspect ratios.
/// Ratios closer than this fraction of the natural ratio count as equal.
pub const ASPECT_EPSILON: f32 = 1e-3;

/// Upper bound on each dimension when an image is first placed.
const INSERT_IMAGE_LIMIT: f32 = 200.0;
/// Upper bound on each dimension when an image is reset to natural size.
pub(crate) const RESET_IMAGE_LIMIT: f32 = 300.0;

const DEFAULT_TEXT_SIZE: f32 = 24.0;
const DEFAULT_TEXT_FAMILY: &str = "Arial";
const DEFAULT_ICON_SIZE: f32 = 48.0;
const SHAPE_CENTER_OFFSET: f32 = 50.0;

/// The shape palette entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// 100x60 rectangle.
    Rectangle,
    /// Radius-50 circle.
    Circle,
    /// Size-60 triangle.
    Triangle,
    /// Horizontal line through the canvas center.
    Line,
    /// Size-50 heart.
    Heart,
}

/// Builds default-initialized objects of each kind.
///
/// Carries the editor's current style state; shapes pick up all three
/// fields, while text, icons, and images are created fully opaque with
/// kind-specific colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectFactory {
    /// Fill applied to new shapes.
    pub fill: Color,
    /// Stroke applied to new shapes.
    pub stroke: Color,
    /// Opacity applied to new shapes, in `[0, 1]`.
    pub opacity: f32,
}

impl Default for ObjectFactory {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL,
            stroke: DEFAULT_STROKE,
            opacity: 1.0,
        }
    }
}

impl ObjectFactory {
    /// Construct a shape centered on the canvas.
    #[must_use]
    pub fn shape(&self, kind: ShapeKind, canvas_width: f32, canvas_height: f32) -> SceneObject {
        let cx = canvas_width / 2.0;
        let cy = canvas_height / 2.0;

        let object_kind = match kind {
            ShapeKind::Rectangle => ObjectKind::Rectangle {
                width: 100.0,
                height: 60.0,
            },
            ShapeKind::Circle => ObjectKind::Circle { radius: 50.0 },
            ShapeKind::Triangle => ObjectKind::Triangle { size: 60.0 },
            ShapeKind::Line => ObjectKind::Line {
                width: 100.0,
                height: 3.0,
                end: Some(Point::new(cx + SHAPE_CENTER_OFFSET, cy)),
            },
            ShapeKind::Heart => ObjectKind::Heart { size: 50.0 },
        };

        SceneObject::new(object_kind)
            .at(cx - SHAPE_CENTER_OFFSET, cy - SHAPE_CENTER_OFFSET)
            .with_fill(self.fill)
            .with_stroke(self.stroke)
            .with_opacity(self.opacity)
    }

    /// Construct an icon glyph at the canvas center.
    #[must_use]
    pub fn icon(&self, glyph: &str, canvas_width: f32, canvas_height: f32) -> SceneObject {
        SceneObject::new(ObjectKind::Icon {
            glyph: glyph.to_owned(),
            font_size: DEFAULT_ICON_SIZE,
        })
        .at(canvas_width / 2.0, canvas_height / 2.0)
    }

    /// Construct a text object at the given baseline point, measuring its
    /// run via the host collaborator (zero width when unavailable).
    #[must_use]
    pub fn text(&self, content: &str, at: Point, measurer: &dyn TextMeasurer) -> SceneObject {
        let mut obj = SceneObject::new(ObjectKind::Text {
            content: content.to_owned(),
            font_size: DEFAULT_TEXT_SIZE,
            font_family: DEFAULT_TEXT_FAMILY.to_owned(),
            bold: false,
            italic: false,
            width: 0.0,
            height: DEFAULT_TEXT_SIZE,
        })
        .at(at.x, at.y)
        .with_fill(DEFAULT_TEXT_FILL)
        .with_stroke(Color::BLACK);
        remeasure_text(&mut obj, measurer);
        obj
    }

    /// Construct an image object from a decoded bitmap, clamping each
    /// dimension to 200 units and re-fixing the natural aspect ratio.
    #[must_use]
    pub fn image(&self, bitmap: Bitmap) -> SceneObject {
        let (width, height) = fit_to_limit(&bitmap, INSERT_IMAGE_LIMIT);
        SceneObject::new(ObjectKind::Image {
            width,
            height,
            bitmap: Some(bitmap),
        })
        .at(50.0, 50.0)
    }
}

/// Whether a display ratio has drifted from the natural ratio beyond the
/// tolerance.
pub(crate) fn aspect_differs(current: f32, natural: f32) -> bool {
    (current - natural).abs() > ASPECT_EPSILON * natural.abs().max(f32::EPSILON)
}

/// Clamp a bitmap's natural size to `limit` per dimension, then restore the
/// natural aspect ratio: the larger natural dimension stays clamped and the
/// other follows.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn fit_to_limit(bitmap: &Bitmap, limit: f32) -> (f32, f32) {
    let natural_w = bitmap.width() as f32;
    let natural_h = bitmap.height() as f32;
    let ratio = bitmap.aspect_ratio();

    let mut width = natural_w.min(limit);
    let mut height = natural_h.min(limit);
    if aspect_differs(width / height, ratio) {
        if natural_w > natural_h {
            height = width / ratio;
        } else {
            width = height * ratio;
        }
    }
    (width, height)
}
