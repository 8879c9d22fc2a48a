//! Flattened scene export.

use std::path::Path;

use card_core::Scene;

use crate::error::{RenderError, RenderResult};
use crate::{RenderMode, Renderer};

/// Download filename convention for exported cards.
pub const EXPORT_FILENAME: &str = "birthday-card.png";

/// Exports scenes as PNG bytes through the export-mode render pipeline.
pub struct Exporter {
    renderer: Renderer,
}

impl Exporter {
    /// Create an exporter around an existing renderer.
    #[must_use]
    pub fn new(renderer: Renderer) -> Self {
        Self { renderer }
    }

    /// Create an exporter with default configuration and system fonts.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(Renderer::with_system_fonts())
    }

    /// The underlying renderer.
    #[must_use]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Render the scene flattened (no selection decoration, regardless of
    /// the current selection) and encode it as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn export_png(&self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let pixmap = self
            .renderer
            .render(scene, scene.selection(), RenderMode::Export)?;
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }

    /// Export the scene and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering, encoding, or writing fails.
    pub fn write_png(&self, scene: &Scene, path: &Path) -> RenderResult<()> {
        let bytes = self.export_png(scene)?;
        std::fs::write(path, bytes)
            .map_err(|e| RenderError::Export(format!("write {}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), "exported card");
        Ok(())
    }
}
