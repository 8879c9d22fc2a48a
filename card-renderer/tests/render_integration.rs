//! Pixel-level checks of the raster pipeline.
//!
//! Samples shape interiors (never anti-aliased edges) so the expectations
//! are exact up to rounding.

use card_core::{Color, ObjectKind, Point, Scene, SceneObject};
use card_renderer::{FontCatalog, RenderMode, Renderer, RendererConfig};

const RED: Color = Color::from_rgb8(0xff, 0x6b, 0x6b);
const SELECTION_BLUE: (u8, u8, u8) = (0x00, 0x7b, 0xff);

fn renderer() -> Renderer {
    Renderer::new(RendererConfig::default(), FontCatalog::empty())
}

fn pixel(pixmap: &tiny_skia::Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let p = pixmap.pixel(x, y).expect("pixel in bounds");
    (p.red(), p.green(), p.blue(), p.alpha())
}

fn assert_close(actual: (u8, u8, u8, u8), expected: (u8, u8, u8, u8)) {
    let channels = [
        (actual.0, expected.0),
        (actual.1, expected.1),
        (actual.2, expected.2),
        (actual.3, expected.3),
    ];
    for (a, e) in channels {
        assert!(
            (i16::from(a) - i16::from(e)).abs() <= 2,
            "pixel {actual:?} != expected {expected:?}"
        );
    }
}

#[test]
fn test_surface_matches_canvas_size() {
    let scene = Scene::new(600.0, 400.0);
    let pixmap = renderer()
        .render(&scene, None, RenderMode::Display)
        .expect("render");
    assert_eq!(pixmap.width(), 600);
    assert_eq!(pixmap.height(), 400);
    // Cleared to opaque white.
    assert_eq!(pixel(&pixmap, 0, 0), (255, 255, 255, 255));
}

#[test]
fn test_rectangle_fill_and_background() {
    let mut scene = Scene::new(100.0, 100.0);
    scene.add_object(
        SceneObject::new(ObjectKind::Rectangle {
            width: 50.0,
            height: 30.0,
        })
        .at(10.0, 10.0)
        .with_fill(RED),
    );
    scene.clear_selection();

    let pixmap = renderer()
        .render(&scene, None, RenderMode::Display)
        .expect("render");
    assert_close(pixel(&pixmap, 35, 25), (255, 107, 107, 255));
    // Outside the rectangle stays background.
    assert_eq!(pixel(&pixmap, 80, 80), (255, 255, 255, 255));
}

#[test]
fn test_opacity_blends_with_background() {
    let mut scene = Scene::new(100.0, 100.0);
    scene.add_object(
        SceneObject::new(ObjectKind::Rectangle {
            width: 50.0,
            height: 30.0,
        })
        .at(10.0, 10.0)
        .with_fill(RED)
        .with_opacity(0.5),
    );
    scene.clear_selection();

    let pixmap = renderer()
        .render(&scene, None, RenderMode::Display)
        .expect("render");
    // 50% red over white.
    assert_close(pixel(&pixmap, 35, 25), (255, 181, 181, 255));
}

#[test]
fn test_circle_center_filled() {
    let mut scene = Scene::new(120.0, 120.0);
    scene.add_object(
        SceneObject::new(ObjectKind::Circle { radius: 40.0 })
            .at(10.0, 10.0)
            .with_fill(RED),
    );
    scene.clear_selection();

    let pixmap = renderer()
        .render(&scene, None, RenderMode::Display)
        .expect("render");
    // Center is at (50, 50); the box corner is outside the disc.
    assert_close(pixel(&pixmap, 50, 50), (255, 107, 107, 255));
    assert_eq!(pixel(&pixmap, 11, 11), (255, 255, 255, 255));
}

#[test]
fn test_triangle_and_heart_interiors() {
    let mut scene = Scene::new(200.0, 100.0);
    scene.add_object(
        SceneObject::new(ObjectKind::Triangle { size: 60.0 })
            .at(10.0, 10.0)
            .with_fill(RED),
    );
    scene.add_object(
        SceneObject::new(ObjectKind::Heart { size: 50.0 })
            .at(110.0, 10.0)
            .with_fill(RED),
    );
    scene.clear_selection();

    let pixmap = renderer()
        .render(&scene, None, RenderMode::Display)
        .expect("render");
    // Triangle widens toward its base.
    assert_close(pixel(&pixmap, 40, 60), (255, 107, 107, 255));
    // Apex corners are empty.
    assert_eq!(pixel(&pixmap, 12, 12), (255, 255, 255, 255));
    // Heart center.
    assert_close(pixel(&pixmap, 135, 35), (255, 107, 107, 255));
}

#[test]
fn test_line_strokes_at_fixed_width() {
    let mut scene = Scene::new(100.0, 40.0);
    scene.add_object(
        SceneObject::new(ObjectKind::Line {
            width: 80.0,
            height: 3.0,
            end: Some(Point::new(90.0, 20.0)),
        })
        .at(10.0, 20.0)
        .with_stroke(Color::from_rgb8(0x33, 0x33, 0x33)),
    );
    scene.clear_selection();

    let pixmap = renderer()
        .render(&scene, None, RenderMode::Display)
        .expect("render");
    assert_close(pixel(&pixmap, 50, 20), (51, 51, 51, 255));
    // Three units of thickness do not reach two rows away.
    assert_eq!(pixel(&pixmap, 50, 25), (255, 255, 255, 255));
}

#[test]
fn test_line_falls_back_to_horizontal_extent() {
    let mut scene = Scene::new(100.0, 40.0);
    scene.add_object(
        SceneObject::new(ObjectKind::Line {
            width: 60.0,
            height: 3.0,
            end: None,
        })
        .at(10.0, 20.0)
        .with_stroke(Color::BLACK),
    );
    scene.clear_selection();

    let pixmap = renderer()
        .render(&scene, None, RenderMode::Display)
        .expect("render");
    assert_close(pixel(&pixmap, 40, 20), (0, 0, 0, 255));
    // Past (x + width) there is nothing.
    assert_eq!(pixel(&pixmap, 80, 20), (255, 255, 255, 255));
}

#[test]
fn test_image_blit_scales_bitmap() {
    let green = card_core::Bitmap::new(2, 2, vec![0, 255, 0, 255].repeat(4)).expect("bitmap");
    let mut scene = Scene::new(60.0, 60.0);
    scene.add_object(
        SceneObject::new(ObjectKind::Image {
            width: 20.0,
            height: 20.0,
            bitmap: Some(green),
        })
        .at(5.0, 5.0),
    );
    scene.clear_selection();

    let pixmap = renderer()
        .render(&scene, None, RenderMode::Display)
        .expect("render");
    assert_close(pixel(&pixmap, 15, 15), (0, 255, 0, 255));
    assert_eq!(pixel(&pixmap, 40, 40), (255, 255, 255, 255));
}

#[test]
fn test_image_without_bitmap_paints_nothing() {
    let mut scene = Scene::new(60.0, 60.0);
    scene.add_object(
        SceneObject::new(ObjectKind::Image {
            width: 20.0,
            height: 20.0,
            bitmap: None,
        })
        .at(5.0, 5.0),
    );
    scene.clear_selection();

    let pixmap = renderer()
        .render(&scene, None, RenderMode::Display)
        .expect("render");
    assert_eq!(pixel(&pixmap, 15, 15), (255, 255, 255, 255));
}

#[test]
fn test_selection_draws_handles_in_display_mode() {
    let mut scene = Scene::new(100.0, 100.0);
    let id = scene.add_object(
        SceneObject::new(ObjectKind::Rectangle {
            width: 50.0,
            height: 30.0,
        })
        .at(20.0, 20.0)
        .with_fill(RED),
    );

    let pixmap = renderer()
        .render(&scene, Some(id), RenderMode::Display)
        .expect("render");
    // Handle squares are solid selection blue, centered on bounds corners.
    let (r, g, b, a) = pixel(&pixmap, 20, 20);
    assert_eq!((r, g, b), SELECTION_BLUE);
    assert_eq!(a, 255);
    let (r, g, b, _) = pixel(&pixmap, 70, 50);
    assert_eq!((r, g, b), SELECTION_BLUE);
}

#[test]
fn test_display_without_selection_is_undecorated() {
    let mut scene = Scene::new(100.0, 100.0);
    scene.add_object(
        SceneObject::new(ObjectKind::Rectangle {
            width: 50.0,
            height: 30.0,
        })
        .at(20.0, 20.0)
        .with_fill(RED),
    );
    scene.clear_selection();

    let pixmap = renderer()
        .render(&scene, None, RenderMode::Display)
        .expect("render");
    for (x, y) in [(20, 20), (70, 20), (20, 50), (70, 50)] {
        let (r, g, b, _) = pixel(&pixmap, x, y);
        assert_ne!((r, g, b), SELECTION_BLUE, "no handle at ({x}, {y})");
    }
}

#[test]
fn test_export_mode_ignores_selection() {
    let mut scene = Scene::new(100.0, 100.0);
    let id = scene.add_object(
        SceneObject::new(ObjectKind::Rectangle {
            width: 50.0,
            height: 30.0,
        })
        .at(20.0, 20.0)
        .with_fill(RED),
    );

    let r = renderer();
    let export = r
        .render(&scene, Some(id), RenderMode::Export)
        .expect("render");
    let (red, g, b, _) = pixel(&export, 20, 20);
    assert_ne!((red, g, b), SELECTION_BLUE);

    // Export with a selection is pixel-identical to export without one.
    let undecorated = r.render(&scene, None, RenderMode::Export).expect("render");
    assert_eq!(export.data(), undecorated.data());

    // And differs from the decorated display rendering.
    let display = r
        .render(&scene, Some(id), RenderMode::Display)
        .expect("render");
    assert_ne!(export.data(), display.data());
}

#[test]
fn test_paint_order_is_sequence_order() {
    let mut scene = Scene::new(100.0, 100.0);
    scene.add_object(
        SceneObject::new(ObjectKind::Rectangle {
            width: 60.0,
            height: 60.0,
        })
        .at(10.0, 10.0)
        .with_fill(RED),
    );
    scene.add_object(
        SceneObject::new(ObjectKind::Rectangle {
            width: 60.0,
            height: 60.0,
        })
        .at(30.0, 30.0)
        .with_fill(Color::from_rgb8(0x00, 0x80, 0x00)),
    );
    scene.clear_selection();

    let pixmap = renderer()
        .render(&scene, None, RenderMode::Display)
        .expect("render");
    // Overlap region shows the later (front-most) object.
    assert_close(pixel(&pixmap, 45, 45), (0, 128, 0, 255));
    // Non-overlapping part of the first object still shows.
    assert_close(pixel(&pixmap, 15, 15), (255, 107, 107, 255));
}
