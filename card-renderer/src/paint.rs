//! Kind-specific paint routines and selection decoration.

use tiny_skia::{
    FillRule, IntSize, Path, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash, Transform,
};

use card_core::text::ICON_FONT_FAMILY;
use card_core::{Bitmap, Color, FontSpec, ObjectKind, Rect, SceneObject};

use crate::text::FontCatalog;

/// Fixed stroke thickness for line objects.
const LINE_STROKE_WIDTH: f32 = 3.0;
/// Stroke thickness for outlined shapes.
const SHAPE_STROKE_WIDTH: f32 = 1.0;
/// Margin between an object's bounds and its selection rectangle.
const SELECTION_MARGIN: f32 = 5.0;
/// Edge length of the square resize-handle markers.
const HANDLE_SIZE: f32 = 8.0;
/// Stroke thickness of the dashed selection rectangle.
const SELECTION_STROKE_WIDTH: f32 = 2.0;
/// Dash pattern of the selection rectangle.
const SELECTION_DASH: [f32; 2] = [5.0, 5.0];
/// Selection decoration color.
const SELECTION_COLOR: Color = Color::from_rgb8(0x00, 0x7b, 0xff);

fn paint_for(color: Color, opacity: f32, anti_alias: bool) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let alpha = (f32::from(color.a) * opacity.clamp(0.0, 1.0)).round() as u8;
    paint.set_color_rgba8(color.r, color.g, color.b, alpha);
    paint.anti_alias = anti_alias;
    paint
}

fn fill(pixmap: &mut Pixmap, path: &Path, color: Color, opacity: f32, anti_alias: bool) {
    pixmap.fill_path(
        path,
        &paint_for(color, opacity, anti_alias),
        FillRule::Winding,
        Transform::identity(),
        None,
    );
}

fn stroke(
    pixmap: &mut Pixmap,
    path: &Path,
    color: Color,
    opacity: f32,
    width: f32,
    dash: Option<StrokeDash>,
    anti_alias: bool,
) {
    let stroke = Stroke {
        width,
        dash,
        ..Stroke::default()
    };
    pixmap.stroke_path(
        path,
        &paint_for(color, opacity, anti_alias),
        &stroke,
        Transform::identity(),
        None,
    );
}

fn rect_path(rect: Rect) -> Option<Path> {
    let r = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)?;
    Some(PathBuilder::from_rect(r))
}

fn triangle_path(x: f32, y: f32, size: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x + size / 2.0, y);
    pb.line_to(x, y + size);
    pb.line_to(x + size, y + size);
    pb.close();
    pb.finish()
}

/// Four cubic segments tracing the heart: down the left lobe, to the tip,
/// up the right lobe, and back to the notch.
fn heart_path(x: f32, y: f32, size: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x + size / 2.0, y + size / 4.0);
    pb.cubic_to(x + size / 2.0, y, x, y, x, y + size / 4.0);
    pb.cubic_to(
        x,
        y + size / 2.0,
        x + size / 2.0,
        y + size * 3.0 / 4.0,
        x + size / 2.0,
        y + size,
    );
    pb.cubic_to(
        x + size / 2.0,
        y + size * 3.0 / 4.0,
        x + size,
        y + size / 2.0,
        x + size,
        y + size / 4.0,
    );
    pb.cubic_to(x + size, y, x + size / 2.0, y, x + size / 2.0, y + size / 4.0);
    pb.close();
    pb.finish()
}

/// Paint one object at its opacity. Unknown-size or degenerate geometry
/// paints nothing.
pub(crate) fn paint_object(
    pixmap: &mut Pixmap,
    obj: &SceneObject,
    fonts: &FontCatalog,
    anti_alias: bool,
) {
    let opacity = obj.opacity.clamp(0.0, 1.0);
    match &obj.kind {
        ObjectKind::Rectangle { width, height } => {
            let Some(path) = rect_path(Rect::new(obj.x, obj.y, *width, *height)) else {
                return;
            };
            fill(pixmap, &path, obj.fill, opacity, anti_alias);
            stroke(
                pixmap,
                &path,
                obj.stroke,
                opacity,
                SHAPE_STROKE_WIDTH,
                None,
                anti_alias,
            );
        }
        ObjectKind::Circle { radius } => {
            let mut pb = PathBuilder::new();
            pb.push_circle(obj.x + radius, obj.y + radius, *radius);
            let Some(path) = pb.finish() else { return };
            fill(pixmap, &path, obj.fill, opacity, anti_alias);
            stroke(
                pixmap,
                &path,
                obj.stroke,
                opacity,
                SHAPE_STROKE_WIDTH,
                None,
                anti_alias,
            );
        }
        ObjectKind::Triangle { size } => {
            let Some(path) = triangle_path(obj.x, obj.y, *size) else {
                return;
            };
            fill(pixmap, &path, obj.fill, opacity, anti_alias);
            stroke(
                pixmap,
                &path,
                obj.stroke,
                opacity,
                SHAPE_STROKE_WIDTH,
                None,
                anti_alias,
            );
        }
        ObjectKind::Line { width, end, .. } => {
            let (x2, y2) = end.map_or((obj.x + width, obj.y), |p| (p.x, p.y));
            let mut pb = PathBuilder::new();
            pb.move_to(obj.x, obj.y);
            pb.line_to(x2, y2);
            let Some(path) = pb.finish() else { return };
            stroke(
                pixmap,
                &path,
                obj.stroke,
                opacity,
                LINE_STROKE_WIDTH,
                None,
                anti_alias,
            );
        }
        ObjectKind::Heart { size } => {
            let Some(path) = heart_path(obj.x, obj.y, *size) else {
                return;
            };
            fill(pixmap, &path, obj.fill, opacity, anti_alias);
        }
        ObjectKind::Text {
            content,
            font_size,
            font_family,
            bold,
            italic,
            ..
        } => {
            let spec = FontSpec {
                family: font_family.clone(),
                size: *font_size,
                bold: *bold,
                italic: *italic,
            };
            fonts.draw_text(pixmap, &spec, content, obj.x, obj.y, obj.fill, opacity);
        }
        ObjectKind::Icon { glyph, font_size } => {
            let spec = FontSpec::new(ICON_FONT_FAMILY, *font_size);
            fonts.draw_text(
                pixmap,
                &spec,
                glyph,
                obj.x - font_size / 2.0,
                obj.y + font_size / 2.0,
                obj.fill,
                opacity,
            );
        }
        ObjectKind::Image {
            width,
            height,
            bitmap,
        } => {
            if let Some(bitmap) = bitmap {
                blit_bitmap(pixmap, bitmap, obj.x, obj.y, *width, *height, opacity);
            }
        }
    }
}

/// Scaled blit of straight-alpha RGBA8 pixels.
#[allow(clippy::cast_precision_loss)]
fn blit_bitmap(
    pixmap: &mut Pixmap,
    bitmap: &Bitmap,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    opacity: f32,
) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    let Some(size) = IntSize::from_wh(bitmap.width(), bitmap.height()) else {
        return;
    };
    // Pixmap expects premultiplied data.
    let mut data = bitmap.data().to_vec();
    for px in data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        px[0] = ((u16::from(px[0]) * a) / 255) as u8;
        px[1] = ((u16::from(px[1]) * a) / 255) as u8;
        px[2] = ((u16::from(px[2]) * a) / 255) as u8;
    }
    let Some(src) = Pixmap::from_vec(data, size) else {
        return;
    };

    let sx = width / bitmap.width() as f32;
    let sy = height / bitmap.height() as f32;
    let transform = Transform::from_row(sx, 0.0, 0.0, sy, x, y);
    let paint = PixmapPaint {
        opacity: opacity.clamp(0.0, 1.0),
        quality: tiny_skia::FilterQuality::Nearest,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);
}

/// Dashed rectangle plus corner handles around the selected object's
/// bounds. Display mode only; export never calls this.
pub(crate) fn paint_selection(pixmap: &mut Pixmap, bounds: Rect, anti_alias: bool) {
    if let Some(path) = rect_path(bounds.inflate(SELECTION_MARGIN)) {
        let dash = StrokeDash::new(SELECTION_DASH.to_vec(), 0.0);
        stroke(
            pixmap,
            &path,
            SELECTION_COLOR,
            1.0,
            SELECTION_STROKE_WIDTH,
            dash,
            anti_alias,
        );
    }

    let handle_paint = paint_for(SELECTION_COLOR, 1.0, anti_alias);
    for corner in bounds.corners() {
        if let Some(rect) = tiny_skia::Rect::from_xywh(
            corner.x - HANDLE_SIZE / 2.0,
            corner.y - HANDLE_SIZE / 2.0,
            HANDLE_SIZE,
            HANDLE_SIZE,
        ) {
            pixmap.fill_rect(rect, &handle_paint, Transform::identity(), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_path_spans_its_box() {
        let path = heart_path(10.0, 20.0, 50.0).expect("path");
        let b = path.bounds();
        assert!((b.left() - 10.0).abs() < 0.5);
        assert!((b.right() - 60.0).abs() < 0.5);
        assert!((b.top() - 20.0).abs() < 7.0); // lobes bulge toward the top edge
        assert!((b.bottom() - 70.0).abs() < 0.5);
    }

    #[test]
    fn test_triangle_path_vertices() {
        let path = triangle_path(0.0, 0.0, 60.0).expect("path");
        let b = path.bounds();
        assert!((b.left() - 0.0).abs() < f32::EPSILON);
        assert!((b.top() - 0.0).abs() < f32::EPSILON);
        assert!((b.right() - 60.0).abs() < f32::EPSILON);
        assert!((b.bottom() - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_degenerate_rect_path_is_none() {
        assert!(rect_path(Rect::new(0.0, 0.0, 0.0, 10.0)).is_none());
    }
}
