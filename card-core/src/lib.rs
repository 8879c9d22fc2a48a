//! # Card Studio Core
//!
//! Core logic for an interactive 2D card editor: the scene model, the
//! geometry that maps pointer coordinates to objects, the interaction state
//! machine, and the object factory and templates that populate a card.
//!
//! ## Architecture
//!
//! ```text
//! input events ──▶ Editor (controller) ──▶ Scene ──▶ card-renderer ──▶ pixels
//!                        │                   ▲
//!                        └── ObjectFactory ──┘
//! ```
//!
//! Rasterization lives in the `card-renderer` crate; this crate depends
//! only on the collaborator contracts in [`text`] (measurement) and
//! [`bitmap`] (decoded pixels).

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bitmap;
pub mod controller;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod object;
pub mod scene;
pub mod template;
pub mod text;

pub use bitmap::Bitmap;
pub use controller::{CursorStyle, Editor, EditorRequest, Key, MoveFeedback, ToolMode};
pub use error::{CardError, CardResult};
pub use factory::{ObjectFactory, ShapeKind, ASPECT_EPSILON, DEFAULT_FILL, DEFAULT_STROKE};
pub use geometry::{Point, Rect, TEXT_HIT_PADDING};
pub use object::{Color, ObjectId, ObjectKind, ObjectProperties, PropertyPatch, SceneObject};
pub use scene::{Scene, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
pub use template::Template;
pub use text::{FixedAdvance, FontSpec, TextMeasurer, ICON_FONT_FAMILY};

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
