//! Pointer and keyboard interpretation: the editor context object.
//!
//! The host owns an [`Editor`] and forwards discrete input events to it;
//! the editor interprets them against the current tool mode and mutates the
//! scene. Anything that needs host capabilities (prompting for text) comes
//! back as an [`EditorRequest`] instead of a callback, keeping the core
//! fully synchronous.

use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::factory::{self, ObjectFactory, ShapeKind};
use crate::geometry::Point;
use crate::object::{ObjectId, ObjectKind, ObjectProperties, PropertyPatch};
use crate::scene::{remeasure_text, Scene, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::template::Template;
use crate::text::TextMeasurer;

/// Content inserted when the host prompt comes back empty.
const DEFAULT_TEXT_CONTENT: &str = "Sample Text";

/// The current interpretation applied to primary pointer presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// Select and drag objects.
    #[default]
    Select,
    /// Insert text at the pressed position.
    Text,
    /// Shape palette active (insertion via [`Editor::add_shape`]).
    Shapes,
    /// Icon palette active (insertion via [`Editor::add_icon`]).
    Icons,
    /// Image panel active (insertion via [`Editor::insert_image`]).
    Image,
}

impl ToolMode {
    /// Lowercase name, matching the serialized form.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Text => "text",
            Self::Shapes => "shapes",
            Self::Icons => "icons",
            Self::Image => "image",
        }
    }
}

impl std::fmt::Display for ToolMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ToolMode {
    type Err = crate::error::CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Self::Select),
            "text" => Ok(Self::Text),
            "shapes" => Ok(Self::Shapes),
            "icons" => Ok(Self::Icons),
            "image" => Ok(Self::Image),
            other => Err(crate::error::CardError::InvalidInput(format!(
                "unknown tool mode: {other}"
            ))),
        }
    }
}

/// Hover cursor hint, purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    /// Nothing under the pointer.
    Default,
    /// A hit-testable object is under the pointer.
    Move,
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Key {
    /// Delete the current selection.
    Delete,
}

/// Work the host must perform on the editor's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorRequest {
    /// Prompt for new text content, then call [`Editor::insert_text`] with
    /// the pressed position.
    PromptText {
        /// The pressed position (future baseline point).
        at: Point,
    },
    /// Open an in-place edit affordance for a text object, then call
    /// [`Editor::commit_text_edit`].
    EditText {
        /// The text object under the pointer.
        id: ObjectId,
        /// Its current content.
        current: String,
    },
}

/// Outcome of a pointer-move event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveFeedback {
    /// Whether the scene changed and needs a re-render.
    pub redraw: bool,
    /// Hover cursor to show.
    pub cursor: CursorStyle,
}

/// The editor context: scene, tool mode, drag state, and the text
/// measurement collaborator. Constructed and owned by the host application.
pub struct Editor {
    scene: Scene,
    tool: ToolMode,
    /// Offset between the pointer and the selected object's anchor while a
    /// drag is in progress.
    drag: Option<Point>,
    factory: ObjectFactory,
    measurer: Box<dyn TextMeasurer>,
}

impl Editor {
    /// Create an editor with an empty scene of the given canvas size.
    #[must_use]
    pub fn new(width: f32, height: f32, measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            scene: Scene::new(width, height),
            tool: ToolMode::default(),
            drag: None,
            factory: ObjectFactory::default(),
            measurer,
        }
    }

    /// Create an editor with the default canvas size.
    #[must_use]
    pub fn with_default_canvas(measurer: Box<dyn TextMeasurer>) -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT, measurer)
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for host-driven edits; the scene API maintains
    /// its own invariants.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The current tool mode.
    #[must_use]
    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    /// Set the current tool mode.
    pub fn set_tool(&mut self, tool: ToolMode) {
        self.tool = tool;
    }

    /// The style state applied to newly created shapes.
    #[must_use]
    pub fn factory(&self) -> &ObjectFactory {
        &self.factory
    }

    /// Mutable style state (fill, stroke, opacity pickers).
    pub fn factory_mut(&mut self) -> &mut ObjectFactory {
        &mut self.factory
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Primary-button press.
    ///
    /// Select tool: hit-test; a hit selects the object and starts a drag
    /// (recording the pointer-to-anchor offset), a miss clears the
    /// selection. Text tool: asks the host to prompt for content. Palette
    /// tools ignore presses.
    pub fn pointer_pressed(&mut self, at: Point) -> Option<EditorRequest> {
        match self.tool {
            ToolMode::Select => {
                if let Some(id) = self.scene.pick(at) {
                    self.scene.select(id);
                    if let Some(obj) = self.scene.selected_object() {
                        self.drag = Some(Point::new(at.x - obj.x, at.y - obj.y));
                    }
                    tracing::debug!(%id, "selected object");
                } else {
                    self.scene.clear_selection();
                }
                None
            }
            ToolMode::Text => Some(EditorRequest::PromptText { at }),
            ToolMode::Shapes | ToolMode::Icons | ToolMode::Image => None,
        }
    }

    /// Pointer move. While dragging, the selected object follows the
    /// pointer minus the recorded offset (no drag threshold); otherwise
    /// only the hover cursor is recomputed.
    pub fn pointer_moved(&mut self, at: Point) -> MoveFeedback {
        if let Some(offset) = self.drag {
            if let Some(obj) = self.scene.selected_object() {
                let dx = at.x - offset.x - obj.x;
                let dy = at.y - offset.y - obj.y;
                self.scene.translate_selected(dx, dy);
                return MoveFeedback {
                    redraw: true,
                    cursor: CursorStyle::Move,
                };
            }
        }
        let cursor = if self.scene.pick(at).is_some() {
            CursorStyle::Move
        } else {
            CursorStyle::Default
        };
        MoveFeedback {
            redraw: false,
            cursor,
        }
    }

    /// Primary-button release: back to idle, offset discarded.
    pub fn pointer_released(&mut self) {
        self.drag = None;
    }

    /// Secondary activation (double-click). Over a text object this asks
    /// the host to open an edit affordance.
    #[must_use]
    pub fn double_clicked(&self, at: Point) -> Option<EditorRequest> {
        let id = self.scene.pick(at)?;
        let obj = self.scene.object(id)?;
        if let ObjectKind::Text { content, .. } = &obj.kind {
            Some(EditorRequest::EditText {
                id,
                current: content.clone(),
            })
        } else {
            None
        }
    }

    /// Key press. Delete removes the selection; returns whether the scene
    /// changed.
    pub fn key_pressed(&mut self, key: Key) -> bool {
        match key {
            Key::Delete => self.scene.remove_selected().is_some(),
        }
    }

    /// Insert a new text object at the given baseline point, selected.
    /// Empty content falls back to a placeholder.
    pub fn insert_text(&mut self, content: &str, at: Point) -> ObjectId {
        let content = if content.is_empty() {
            DEFAULT_TEXT_CONTENT
        } else {
            content
        };
        let obj = self.factory.text(content, at, self.measurer.as_ref());
        self.scene.add_object(obj)
    }

    /// Replace a text object's content and re-measure it. Returns whether
    /// anything changed (`false` for unknown ids and non-text objects).
    pub fn commit_text_edit(&mut self, id: ObjectId, content: &str) -> bool {
        let measurer = self.measurer.as_ref();
        let Some(obj) = self.scene.object_mut(id) else {
            return false;
        };
        if let ObjectKind::Text { content: c, .. } = &mut obj.kind {
            c.clear();
            c.push_str(content);
            remeasure_text(obj, measurer);
            true
        } else {
            false
        }
    }

    /// Insert a shape from the palette, centered on the canvas, selected.
    pub fn add_shape(&mut self, kind: ShapeKind) -> ObjectId {
        let obj = self.factory.shape(kind, self.scene.width, self.scene.height);
        self.scene.add_object(obj)
    }

    /// Insert an icon glyph at the canvas center, selected.
    pub fn add_icon(&mut self, glyph: &str) -> ObjectId {
        let obj = self.factory.icon(glyph, self.scene.width, self.scene.height);
        self.scene.add_object(obj)
    }

    /// Insert an image object for a successfully decoded bitmap, selected.
    /// (Decode failures never reach this point; the scene is untouched.)
    pub fn insert_image(&mut self, bitmap: Bitmap) -> ObjectId {
        let obj = self.factory.image(bitmap);
        self.scene.add_object(obj)
    }

    /// Delete the selection, if any. Returns whether the scene changed.
    pub fn delete_selected(&mut self) -> bool {
        self.scene.remove_selected().is_some()
    }

    /// Raise the selection to the front of the paint order.
    pub fn move_to_front(&mut self) {
        self.scene.move_selected_to_front();
    }

    /// Send the selection to the back of the paint order.
    pub fn move_to_back(&mut self) {
        self.scene.move_selected_to_back();
    }

    /// Start over with an empty card.
    pub fn new_card(&mut self) {
        self.scene.clear();
        self.drag = None;
    }

    /// Replace the scene contents with a template expansion. Nothing is
    /// selected afterwards.
    pub fn load_template(&mut self, template: Template) {
        self.new_card();
        for obj in template.objects(self.scene.width, self.scene.height) {
            self.scene.add_object(obj);
        }
        self.scene.clear_selection();
        tracing::debug!(template = %template, objects = self.scene.len(), "loaded template");
    }

    /// Apply a property patch to the selection (no-op without one).
    pub fn update_selected_properties(&mut self, patch: &PropertyPatch) {
        self.scene.update_selected(patch, self.measurer.as_ref());
    }

    /// Editable properties of the selection, for the property panel.
    #[must_use]
    pub fn selected_properties(&self) -> Option<ObjectProperties> {
        self.scene.selected_properties()
    }

    /// Set the selected image's display size. No-op unless an image is
    /// selected and both dimensions are positive.
    pub fn set_image_size(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        if let Some(obj) = self.scene.selected_object_mut() {
            if let ObjectKind::Image {
                width: w,
                height: h,
                ..
            } = &mut obj.kind
            {
                *w = width;
                *h = height;
            }
        }
    }

    /// Re-derive the selected image's height from its width and natural
    /// aspect ratio. No-op without a selected image with pixels.
    pub fn maintain_aspect_ratio(&mut self) {
        if let Some(obj) = self.scene.selected_object_mut() {
            if let ObjectKind::Image {
                width,
                height,
                bitmap: Some(bitmap),
            } = &mut obj.kind
            {
                *height = *width / bitmap.aspect_ratio();
            }
        }
    }

    /// Reset the selected image to its natural size, clamped to 300 units
    /// per dimension with the aspect ratio restored.
    pub fn reset_image_size(&mut self) {
        if let Some(obj) = self.scene.selected_object_mut() {
            if let ObjectKind::Image {
                width,
                height,
                bitmap: Some(bitmap),
            } = &mut obj.kind
            {
                let (w, h) = factory::fit_to_limit(bitmap, factory::RESET_IMAGE_LIMIT);
                *width = w;
                *height = h;
            }
        }
    }
}
