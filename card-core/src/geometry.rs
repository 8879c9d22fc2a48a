//! Plane geometry: bounds computation and point-in-shape tests per kind.

use serde::{Deserialize, Serialize};

use crate::object::{ObjectKind, SceneObject};

/// Horizontal slack added around text and icons when hit-testing, to make
/// baseline-anchored runs easier to click.
pub const TEXT_HIT_PADDING: f32 = 10.0;

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// The zero rectangle at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// The geometric center.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grow the rectangle by `margin` on every side.
    #[must_use]
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    /// The four corners, clockwise from top-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x + self.width, self.y + self.height),
            Point::new(self.x, self.y + self.height),
        ]
    }
}

impl SceneObject {
    /// Axis-aligned bounding box, used for selection decoration and
    /// (partially) hit-testing.
    ///
    /// Text and icons anchor at the baseline-left point, so their box
    /// extends upward: `(x, y - height, width, height)`. Lines have no box
    /// in this design and report the zero rect.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match &self.kind {
            ObjectKind::Text { width, height, .. } => {
                Rect::new(self.x, self.y - height, *width, *height)
            }
            ObjectKind::Icon { font_size, .. } => {
                Rect::new(self.x, self.y - font_size, *font_size, *font_size)
            }
            ObjectKind::Rectangle { width, height } | ObjectKind::Image { width, height, .. } => {
                Rect::new(self.x, self.y, *width, *height)
            }
            ObjectKind::Circle { radius } => {
                Rect::new(self.x, self.y, radius * 2.0, radius * 2.0)
            }
            ObjectKind::Triangle { size } | ObjectKind::Heart { size } => {
                Rect::new(self.x, self.y, *size, *size)
            }
            ObjectKind::Line { .. } => Rect::ZERO,
        }
    }

    /// Kind-specific pointer containment test.
    ///
    /// Triangles, hearts, and lines are not hit-testable; they can only be
    /// manipulated through selection-at-creation and reordering. Known
    /// limitation carried over from the original behavior.
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        match &self.kind {
            ObjectKind::Text { width, height, .. } => {
                self.padded_glyph_box(*width, *height, p)
            }
            ObjectKind::Icon { font_size, .. } => {
                self.padded_glyph_box(*font_size, *font_size, p)
            }
            ObjectKind::Rectangle { width, height } | ObjectKind::Image { width, height, .. } => {
                Rect::new(self.x, self.y, *width, *height).contains(p)
            }
            ObjectKind::Circle { radius } => {
                let dx = p.x - (self.x + radius);
                let dy = p.y - (self.y + radius);
                dx * dx + dy * dy <= radius * radius
            }
            ObjectKind::Triangle { .. } | ObjectKind::Heart { .. } | ObjectKind::Line { .. } => {
                false
            }
        }
    }

    /// The generous box test shared by text and icons: padded horizontally,
    /// spanning from one run-height above the baseline to just below it.
    fn padded_glyph_box(&self, width: f32, height: f32, p: Point) -> bool {
        p.x >= self.x - TEXT_HIT_PADDING
            && p.x <= self.x + width + TEXT_HIT_PADDING
            && p.y >= self.y - height
            && p.y <= self.y + TEXT_HIT_PADDING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;

    fn text(x: f32, y: f32, width: f32, font_size: f32) -> SceneObject {
        SceneObject::new(ObjectKind::Text {
            content: "Hi".into(),
            font_size,
            font_family: "Arial".into(),
            bold: false,
            italic: false,
            width,
            height: font_size,
        })
        .at(x, y)
    }

    #[test]
    fn test_text_bounds_extend_above_baseline() {
        let obj = text(50.0, 50.0, 30.0, 24.0);
        let b = obj.bounds();
        assert!((b.x - 50.0).abs() < f32::EPSILON);
        assert!((b.y - 26.0).abs() < f32::EPSILON);
        assert!((b.width - 30.0).abs() < f32::EPSILON);
        assert!((b.height - 24.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_icon_bounds_square_of_font_size() {
        let obj = SceneObject::new(ObjectKind::Icon {
            glyph: "🎂".into(),
            font_size: 48.0,
        })
        .at(100.0, 100.0);
        let b = obj.bounds();
        assert_eq!(b, Rect::new(100.0, 52.0, 48.0, 48.0));
    }

    #[test]
    fn test_circle_bounds_and_containment() {
        let obj = SceneObject::new(ObjectKind::Circle { radius: 50.0 }).at(10.0, 10.0);
        assert_eq!(obj.bounds(), Rect::new(10.0, 10.0, 100.0, 100.0));

        // Center is (60, 60).
        assert!(obj.contains_point(Point::new(60.0, 60.0)));
        assert!(obj.contains_point(Point::new(60.0, 109.9)));
        assert!(!obj.contains_point(Point::new(10.0, 10.0))); // box corner, outside the disc
    }

    #[test]
    fn test_rectangle_edges_inclusive() {
        let obj = SceneObject::new(ObjectKind::Rectangle {
            width: 100.0,
            height: 60.0,
        })
        .at(200.0, 150.0);

        assert!(obj.contains_point(Point::new(200.0, 150.0)));
        assert!(obj.contains_point(Point::new(300.0, 210.0)));
        assert!(!obj.contains_point(Point::new(199.0, 150.0)));
        assert!(!obj.contains_point(Point::new(200.0, 211.0)));
    }

    #[test]
    fn test_text_hit_box_is_padded() {
        let obj = text(50.0, 50.0, 30.0, 24.0);
        assert!(obj.contains_point(Point::new(40.0, 50.0))); // x - 10
        assert!(obj.contains_point(Point::new(90.0, 50.0))); // x + width + 10
        assert!(obj.contains_point(Point::new(50.0, 26.0))); // y - height
        assert!(obj.contains_point(Point::new(50.0, 60.0))); // y + 10
        assert!(!obj.contains_point(Point::new(39.0, 50.0)));
        assert!(!obj.contains_point(Point::new(50.0, 61.0)));
    }

    #[test]
    fn test_line_has_zero_bounds_and_no_hit() {
        let obj = SceneObject::new(ObjectKind::Line {
            width: 100.0,
            height: 3.0,
            end: Some(Point::new(350.0, 200.0)),
        })
        .at(250.0, 150.0);
        assert_eq!(obj.bounds(), Rect::ZERO);
        assert!(!obj.contains_point(Point::new(300.0, 175.0)));
    }

    #[test]
    fn test_centroid_inside_for_hit_testable_kinds() {
        let objects = vec![
            SceneObject::new(ObjectKind::Rectangle {
                width: 100.0,
                height: 60.0,
            })
            .at(30.0, 40.0),
            SceneObject::new(ObjectKind::Circle { radius: 25.0 }).at(5.0, 5.0),
            SceneObject::new(ObjectKind::Image {
                width: 80.0,
                height: 50.0,
                bitmap: None,
            })
            .at(12.0, 90.0),
            text(50.0, 50.0, 30.0, 24.0),
            SceneObject::new(ObjectKind::Icon {
                glyph: "⭐".into(),
                font_size: 30.0,
            })
            .at(200.0, 200.0),
        ];
        for obj in objects {
            let center = obj.bounds().center();
            assert!(
                obj.contains_point(center),
                "centroid of {} should be inside",
                obj.kind.name()
            );
        }
    }

    #[test]
    fn test_rect_inflate() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0).inflate(5.0);
        assert_eq!(r, Rect::new(5.0, 5.0, 30.0, 30.0));
    }
}
