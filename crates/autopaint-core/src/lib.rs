//! # AutoPaint Core
//!
//! Core types shared by every stage of the AutoPaint pipeline:
//! geometry primitives, vector paths and layers, hit-testing, the tool
//! palette and color snapping, the input scene model, the notification
//! stream, settings and error types.

pub mod error;
pub mod events;
pub mod geometry;
pub mod layer;
pub mod palette;
pub mod path;
pub mod scene;
pub mod settings;
pub mod units;

pub use error::{ConfigError, Diagnostic, Error, Result};
pub use events::{CallbackSink, EventSink, MotionCommand, PlotEvent};
pub use geometry::{Bounds, Point, Segment};
pub use layer::{Hit, HitKind, HitOptions, Layer};
pub use palette::{Color, Palette, Tool, ToolId};
pub use path::{Contour, PathRole, VectorPath};
pub use scene::{PaintStyle, Scene, SceneCompound, SceneContour, SceneGroup, SceneItem, SceneNode};
pub use settings::{FillStrategyKind, PlotSettings};
