//! The scene: an ordered object sequence plus single-object selection.

use serde::{Deserialize, Serialize};

use crate::error::CardResult;
use crate::geometry::Point;
use crate::object::{ObjectId, ObjectKind, ObjectProperties, PropertyPatch, SceneObject};
use crate::text::TextMeasurer;

/// Default canvas width in units.
pub const DEFAULT_CANVAS_WIDTH: f32 = 600.0;
/// Default canvas height in units.
pub const DEFAULT_CANVAS_HEIGHT: f32 = 400.0;

/// An ordered collection of scene objects on a fixed-size canvas.
///
/// Sequence order is paint order: index 0 is back-most, the last element is
/// front-most. Invariants: ids are unique, and the selection (when set)
/// always names a live member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    objects: Vec<SceneObject>,
    selection: Option<ObjectId>,
    /// Canvas width in units.
    pub width: f32,
    /// Canvas height in units.
    pub height: f32,
}

impl Scene {
    /// Create an empty scene with the given canvas size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            objects: Vec::new(),
            selection: None,
            width,
            height,
        }
    }

    /// Append an object at the front of the paint order and select it.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        debug_assert!(
            !self.objects.iter().any(|o| o.id == object.id),
            "duplicate object id in scene"
        );
        let id = object.id;
        self.objects.push(object);
        self.selection = Some(id);
        id
    }

    /// The objects in paint order (back to front).
    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Number of objects in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The current selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.selection
    }

    /// The currently selected object, if any.
    #[must_use]
    pub fn selected_object(&self) -> Option<&SceneObject> {
        let id = self.selection?;
        self.objects.iter().find(|o| o.id == id)
    }

    pub(crate) fn selected_object_mut(&mut self) -> Option<&mut SceneObject> {
        let id = self.selection?;
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Look up an object by id.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Select the object with the given id. Returns `false` (leaving the
    /// selection unchanged) if no such object exists.
    pub fn select(&mut self, id: ObjectId) -> bool {
        if self.objects.iter().any(|o| o.id == id) {
            self.selection = Some(id);
            true
        } else {
            false
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Resolve a pointer position to the topmost containing object.
    ///
    /// Walks the sequence front to back so that visually topmost objects win
    /// when overlapping.
    #[must_use]
    pub fn pick(&self, p: Point) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.contains_point(p))
            .map(|o| o.id)
    }

    /// Remove the selected object, clearing the selection. No-op without a
    /// selection.
    pub fn remove_selected(&mut self) -> Option<SceneObject> {
        let id = self.selection.take()?;
        let index = self.objects.iter().position(|o| o.id == id)?;
        let removed = self.objects.remove(index);
        tracing::debug!(id = %removed.id, kind = removed.kind.name(), "removed object");
        Some(removed)
    }

    /// Move the selected object to the front of the paint order. No-op
    /// without a selection; idempotent.
    pub fn move_selected_to_front(&mut self) {
        if let Some(index) = self.selected_index() {
            let obj = self.objects.remove(index);
            self.objects.push(obj);
        }
    }

    /// Move the selected object to the back of the paint order. No-op
    /// without a selection; idempotent.
    pub fn move_selected_to_back(&mut self) {
        if let Some(index) = self.selected_index() {
            let obj = self.objects.remove(index);
            self.objects.insert(0, obj);
        }
    }

    /// Remove every object and clear the selection.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.selection = None;
    }

    /// Shift the selected object's anchor by `(dx, dy)`. No-op without a
    /// selection.
    pub fn translate_selected(&mut self, dx: f32, dy: f32) {
        if let Some(obj) = self.selected_object_mut() {
            obj.x += dx;
            obj.y += dy;
        }
    }

    /// Apply a partial property update to the selected object. No-op without
    /// a selection.
    ///
    /// Text re-measures its width (falling back to zero when the measurer
    /// has no answer) and keeps height equal to the font size; icon extent
    /// follows the font size by definition; other kinds take colors only.
    pub fn update_selected(&mut self, patch: &PropertyPatch, measurer: &dyn TextMeasurer) {
        let Some(obj) = self.selected_object_mut() else {
            return;
        };

        if let Some(opacity) = patch.opacity {
            obj.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(fill) = patch.fill {
            obj.fill = fill;
        }
        // Glyph kinds take no stroke from the panel.
        if let Some(stroke) = patch.stroke {
            if !matches!(obj.kind, ObjectKind::Text { .. } | ObjectKind::Icon { .. }) {
                obj.stroke = stroke;
            }
        }

        match &mut obj.kind {
            ObjectKind::Text {
                font_size,
                font_family,
                bold,
                italic,
                ..
            } => {
                if let Some(size) = patch.font_size {
                    if size > 0.0 {
                        *font_size = size;
                    }
                }
                if let Some(family) = &patch.font_family {
                    font_family.clone_from(family);
                }
                if let Some(b) = patch.bold {
                    *bold = b;
                }
                if let Some(i) = patch.italic {
                    *italic = i;
                }
            }
            ObjectKind::Icon { font_size, .. } => {
                if let Some(size) = patch.font_size {
                    if size > 0.0 {
                        *font_size = size;
                    }
                }
            }
            _ => {}
        }

        if matches!(obj.kind, ObjectKind::Text { .. }) {
            remeasure_text(obj, measurer);
        }
    }

    /// Editable properties of the selected object, for a property panel.
    #[must_use]
    pub fn selected_properties(&self) -> Option<ObjectProperties> {
        let obj = self.selected_object()?;
        Some(ObjectProperties {
            kind: obj.kind.name(),
            fill: obj.fill,
            stroke: obj.stroke,
            opacity: obj.opacity,
            font: obj.font_spec(),
            icon_size: match &obj.kind {
                ObjectKind::Icon { font_size, .. } => Some(*font_size),
                _ => None,
            },
            image_size: match &obj.kind {
                ObjectKind::Image { width, height, .. } => Some((*width, *height)),
                _ => None,
            },
        })
    }

    /// Serialize the scene to JSON. Image pixels are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CardResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a scene from JSON, dropping a selection that no longer
    /// names a live object.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> CardResult<Self> {
        let mut scene: Self = serde_json::from_str(json)?;
        if let Some(id) = scene.selection {
            if !scene.objects.iter().any(|o| o.id == id) {
                scene.selection = None;
            }
        }
        Ok(scene)
    }

    fn selected_index(&self) -> Option<usize> {
        let id = self.selection?;
        self.objects.iter().position(|o| o.id == id)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

/// Re-measure a text object's run, degrading to a zero-width box when no
/// measurement is available.
pub(crate) fn remeasure_text(obj: &mut SceneObject, measurer: &dyn TextMeasurer) {
    let Some(spec) = obj.font_spec() else {
        return;
    };
    if let ObjectKind::Text {
        content,
        width,
        height,
        font_size,
        ..
    } = &mut obj.kind
    {
        match measurer.measure_width(&spec, content) {
            Some(w) => *width = w,
            None => {
                tracing::warn!(content = %content, "text measurement unavailable, using zero width");
                *width = 0.0;
            }
        }
        *height = *font_size;
    }
}
