//! # Card Studio Renderer
//!
//! Deterministic raster pipeline: a [`card_core::Scene`] plus an optional
//! selection goes in, a `tiny_skia::Pixmap` comes out. The same pipeline
//! drives the live display and the flattened export; the only difference is
//! that export mode never paints selection decoration.
//!
//! ```text
//! Scene ──▶ clear background ──▶ paint objects (back to front, at their
//! opacity) ──▶ [Display only] dashed selection rect + corner handles
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod error;
pub mod export;
mod paint;
pub mod text;

pub use decode::decode_bitmap;
pub use error::{RenderError, RenderResult};
pub use export::{Exporter, EXPORT_FILENAME};
pub use text::FontCatalog;

use tiny_skia::Pixmap;

use card_core::{Color, ObjectId, Scene};

/// Configuration for the renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Background the target is cleared to.
    pub background: Color,
    /// Enable anti-aliased edges.
    pub anti_alias: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            anti_alias: true,
        }
    }
}

/// Rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// On-screen rendering; draws selection decoration.
    Display,
    /// Flattened rendering for export; never decorated.
    Export,
}

/// Renders scenes to pixmaps.
pub struct Renderer {
    config: RendererConfig,
    fonts: FontCatalog,
}

impl Renderer {
    /// Create a renderer with the given configuration and font catalog.
    #[must_use]
    pub fn new(config: RendererConfig, fonts: FontCatalog) -> Self {
        Self { config, fonts }
    }

    /// Create a renderer with system fonts and default configuration.
    #[must_use]
    pub fn with_system_fonts() -> Self {
        Self::new(RendererConfig::default(), FontCatalog::system())
    }

    /// The renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// The font catalog (also usable as the host's text measurer).
    #[must_use]
    pub fn fonts(&self) -> &FontCatalog {
        &self.fonts
    }

    /// Render a scene.
    ///
    /// Objects paint in sequence order (back to front) at their own
    /// opacity. In [`RenderMode::Display`], `selection` (when it names a
    /// live object) gets a dashed bounding rectangle and corner handles;
    /// [`RenderMode::Export`] ignores it. Read-only on the scene and safe
    /// to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas size yields no valid pixel surface.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render(
        &self,
        scene: &Scene,
        selection: Option<ObjectId>,
        mode: RenderMode,
    ) -> RenderResult<Pixmap> {
        let width = scene.width.max(1.0).ceil() as u32;
        let height = scene.height.max(1.0).ceil() as u32;
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RenderError::Surface(format!("cannot create {width}x{height} surface"))
        })?;

        let bg = self.config.background;
        pixmap.fill(
            tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a),
        );

        for obj in scene.objects() {
            paint::paint_object(&mut pixmap, obj, &self.fonts, self.config.anti_alias);
        }

        if mode == RenderMode::Display {
            if let Some(obj) = selection.and_then(|id| scene.object(id)) {
                paint::paint_selection(&mut pixmap, obj.bounds(), self.config.anti_alias);
            }
        }

        Ok(pixmap)
    }
}

/// Renderer crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
