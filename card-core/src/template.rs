//! Built-in card templates.
//!
//! Each template is a static list of object constructions parameterized by
//! the canvas size. Text entries carry preset run metrics, so no
//! measurement pass is needed to load one.

use serde::{Deserialize, Serialize};

use crate::error::CardError;
use crate::geometry::Point;
use crate::object::{Color, ObjectKind, SceneObject};

/// The built-in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Pink frame, headline, cake.
    Birthday,
    /// Heart and italic headline.
    Anniversary,
    /// Gold frame, rings, a row of small hearts.
    Wedding,
    /// Blue frame, cap, encouragement.
    Graduation,
    /// Green frame, tree, Santa, stars.
    Christmas,
    /// Pink frame and scattered hearts.
    Valentine,
    /// Soft frame, baby icons.
    NewBaby,
    /// Gold frame, trophy, celebration icons.
    Congratulations,
}

impl Template {
    /// Every template, in menu order.
    pub const ALL: [Self; 8] = [
        Self::Birthday,
        Self::Anniversary,
        Self::Wedding,
        Self::Graduation,
        Self::Christmas,
        Self::Valentine,
        Self::NewBaby,
        Self::Congratulations,
    ];

    /// Lowercase name, matching the serialized form.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::Anniversary => "anniversary",
            Self::Wedding => "wedding",
            Self::Graduation => "graduation",
            Self::Christmas => "christmas",
            Self::Valentine => "valentine",
            Self::NewBaby => "newbaby",
            Self::Congratulations => "congratulations",
        }
    }

    /// Expand the template into its objects for the given canvas size.
    #[must_use]
    pub fn objects(self, width: f32, height: f32) -> Vec<SceneObject> {
        let cx = width / 2.0;
        match self {
            Self::Birthday => vec![
                frame(50.0, width - 100.0, height - 100.0)
                    .with_fill(Color::from_rgb8(0xff, 0xe6, 0xf2))
                    .with_stroke(Color::from_rgb8(0xff, 0x69, 0xb4))
                    .with_opacity(0.3),
                text("Happy Birthday!", cx - 100.0, 100.0, 36.0, "Arial", 200.0)
                    .bold()
                    .with_fill(Color::from_rgb8(0xff, 0x14, 0x93)),
                icon("🎂", cx, 200.0, 64.0),
            ],
            Self::Anniversary => vec![
                heart(cx - 40.0, 100.0, 80.0).with_fill(Color::from_rgb8(0xff, 0x69, 0xb4)),
                text("Happy Anniversary!", cx - 120.0, 250.0, 28.0, "Georgia", 240.0)
                    .italic()
                    .with_fill(Color::from_rgb8(0x8b, 0x00, 0x00)),
            ],
            Self::Wedding => {
                let mut objects = vec![
                    frame(30.0, width - 60.0, height - 60.0)
                        .with_fill(Color::from_rgb8(0xf8, 0xf6, 0xf0))
                        .with_stroke(Color::from_rgb8(0xd4, 0xaf, 0x37))
                        .with_opacity(0.9),
                    text("Congratulations", cx - 110.0, 80.0, 32.0, "Georgia", 220.0)
                        .italic()
                        .with_fill(Color::from_rgb8(0xd4, 0xaf, 0x37)),
                    text("on your Wedding!", cx - 100.0, 120.0, 24.0, "Georgia", 200.0)
                        .with_fill(Color::from_rgb8(0x8b, 0x45, 0x13)),
                    icon("💍", cx - 30.0, 170.0, 60.0),
                    icon("💒", cx + 30.0, 170.0, 60.0),
                ];
                for i in 0..6 {
                    #[allow(clippy::cast_precision_loss)]
                    let x = 60.0 + i as f32 * 80.0;
                    objects.push(
                        heart(x, 300.0, 25.0)
                            .with_fill(Color::from_rgb8(0xff, 0xb6, 0xc1))
                            .with_opacity(0.7),
                    );
                }
                objects
            }
            Self::Graduation => vec![
                frame(40.0, width - 80.0, height - 80.0)
                    .with_fill(Color::from_rgb8(0xe6, 0xf3, 0xff))
                    .with_stroke(Color::from_rgb8(0x00, 0x66, 0xcc))
                    .with_opacity(0.4),
                text("Congratulations Graduate!", cx - 150.0, 90.0, 30.0, "Arial", 300.0)
                    .bold()
                    .with_fill(Color::from_rgb8(0x00, 0x66, 0xcc)),
                icon("🎓", cx, 180.0, 80.0),
                text("You did it!", cx - 60.0, 280.0, 24.0, "Arial", 120.0)
                    .italic()
                    .with_fill(Color::from_rgb8(0xff, 0x66, 0x00)),
            ],
            Self::Christmas => {
                let mut objects = vec![
                    frame(25.0, width - 50.0, height - 50.0)
                        .with_fill(Color::from_rgb8(0xe6, 0xff, 0xe6))
                        .with_stroke(Color::from_rgb8(0x22, 0x8b, 0x22))
                        .with_opacity(0.5),
                    text("Merry Christmas!", cx - 110.0, 80.0, 34.0, "Impact", 220.0)
                        .bold()
                        .with_fill(Color::from_rgb8(0xdc, 0x14, 0x3c)),
                    icon("🎄", cx - 40.0, 150.0, 80.0),
                    icon("🎅", cx + 40.0, 150.0, 60.0),
                ];
                let stars = [
                    (80.0, 120.0),
                    (520.0, 120.0),
                    (100.0, 280.0),
                    (500.0, 280.0),
                ];
                for (x, y) in stars {
                    objects.push(icon("⭐", x, y, 30.0).with_opacity(0.8));
                }
                objects
            }
            Self::Valentine => {
                let mut objects = vec![
                    frame(35.0, width - 70.0, height - 70.0)
                        .with_fill(Color::from_rgb8(0xff, 0xe0, 0xe6))
                        .with_stroke(Color::from_rgb8(0xff, 0x14, 0x93))
                        .with_opacity(0.6),
                    text("Be My Valentine", cx - 120.0, 90.0, 32.0, "Georgia", 240.0)
                        .bold()
                        .italic()
                        .with_fill(Color::from_rgb8(0xc7, 0x15, 0x85)),
                ];
                let hearts = [
                    (200.0, 150.0, 60.0),
                    (320.0, 140.0, 45.0),
                    (150.0, 200.0, 35.0),
                    (400.0, 180.0, 40.0),
                ];
                for (i, (x, y, size)) in hearts.into_iter().enumerate() {
                    let fill = if i % 2 == 0 {
                        Color::from_rgb8(0xff, 0x69, 0xb4)
                    } else {
                        Color::from_rgb8(0xdc, 0x14, 0x3c)
                    };
                    objects.push(heart(x, y, size).with_fill(fill).with_opacity(0.8));
                }
                objects.push(icon("💕", cx, 300.0, 50.0));
                objects
            }
            Self::NewBaby => {
                let mut objects = vec![
                    frame(45.0, width - 90.0, height - 90.0)
                        .with_fill(Color::from_rgb8(0xff, 0xf5, 0xee))
                        .with_stroke(Color::from_rgb8(0xff, 0xa0, 0x7a))
                        .with_opacity(0.7),
                    text("Welcome Baby!", cx - 100.0, 90.0, 30.0, "Arial", 200.0)
                        .bold()
                        .with_fill(Color::from_rgb8(0xff, 0x69, 0xb4)),
                    icon("👶", cx, 170.0, 70.0),
                    text("Congratulations!", cx - 85.0, 270.0, 22.0, "Georgia", 170.0)
                        .italic()
                        .with_fill(Color::from_rgb8(0x41, 0x69, 0xe1)),
                ];
                for (i, glyph) in ["🍼", "🧸", "🎀"].into_iter().enumerate() {
                    #[allow(clippy::cast_precision_loss)]
                    let x = 150.0 + i as f32 * 100.0;
                    objects.push(icon(glyph, x, 320.0, 40.0));
                }
                objects
            }
            Self::Congratulations => {
                let mut objects = vec![
                    frame(20.0, width - 40.0, height - 40.0)
                        .with_fill(Color::from_rgb8(0xff, 0xf8, 0xdc))
                        .with_stroke(Color::from_rgb8(0xff, 0xd7, 0x00))
                        .with_opacity(0.8),
                    text("CONGRATULATIONS!", cx - 140.0, 80.0, 28.0, "Impact", 280.0)
                        .bold()
                        .with_fill(Color::from_rgb8(0xff, 0x8c, 0x00)),
                    icon("🏆", cx, 160.0, 70.0),
                ];
                for (i, glyph) in ["🎉", "🎊", "🥳"].into_iter().enumerate() {
                    #[allow(clippy::cast_precision_loss)]
                    let x = 120.0 + i as f32 * 120.0;
                    objects.push(icon(glyph, x, 280.0, 50.0));
                }
                objects.push(
                    text("You're Amazing!", cx - 90.0, 350.0, 20.0, "Arial", 180.0)
                        .italic()
                        .with_fill(Color::from_rgb8(0x4b, 0x00, 0x82)),
                );
                objects
            }
        }
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Template {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| CardError::InvalidInput(format!("unknown template: {s}")))
    }
}

/// A translucent backdrop rectangle inset from the canvas edge.
fn frame(inset: f32, width: f32, height: f32) -> SceneObject {
    SceneObject::new(ObjectKind::Rectangle { width, height }).at(inset, inset)
}

fn heart(x: f32, y: f32, size: f32) -> SceneObject {
    SceneObject::new(ObjectKind::Heart { size }).at(x, y)
}

fn icon(glyph: &str, x: f32, y: f32, font_size: f32) -> SceneObject {
    SceneObject::new(ObjectKind::Icon {
        glyph: glyph.to_owned(),
        font_size,
    })
    .at(x, y)
}

fn text(
    content: &str,
    x: f32,
    y: f32,
    font_size: f32,
    family: &str,
    preset_width: f32,
) -> SceneObject {
    SceneObject::new(ObjectKind::Text {
        content: content.to_owned(),
        font_size,
        font_family: family.to_owned(),
        bold: false,
        italic: false,
        width: preset_width,
        height: font_size,
    })
    .at(x, y)
}

impl SceneObject {
    /// Turn on the bold flag of a text object (template construction
    /// helper; no-op for other kinds).
    #[must_use]
    fn bold(mut self) -> Self {
        if let ObjectKind::Text { bold, .. } = &mut self.kind {
            *bold = true;
        }
        self
    }

    /// Turn on the italic flag of a text object.
    #[must_use]
    fn italic(mut self) -> Self {
        if let ObjectKind::Text { italic, .. } = &mut self.kind {
            *italic = true;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_expand() {
        for template in Template::ALL {
            let objects = template.objects(600.0, 400.0);
            assert!(!objects.is_empty(), "{template} expands to objects");
        }
    }

    #[test]
    fn test_expected_object_counts() {
        assert_eq!(Template::Birthday.objects(600.0, 400.0).len(), 3);
        assert_eq!(Template::Anniversary.objects(600.0, 400.0).len(), 2);
        assert_eq!(Template::Wedding.objects(600.0, 400.0).len(), 11);
        assert_eq!(Template::Christmas.objects(600.0, 400.0).len(), 8);
        assert_eq!(Template::Valentine.objects(600.0, 400.0).len(), 7);
        assert_eq!(Template::Congratulations.objects(600.0, 400.0).len(), 7);
    }

    #[test]
    fn test_round_trip_names() {
        for template in Template::ALL {
            let parsed: Template = template.name().parse().expect("parse back");
            assert_eq!(parsed, template);
        }
        assert!("retirement".parse::<Template>().is_err());
    }

    #[test]
    fn test_ids_unique_within_expansion() {
        let objects = Template::Wedding.objects(600.0, 400.0);
        for (i, a) in objects.iter().enumerate() {
            for b in &objects[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
