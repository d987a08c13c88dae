//! # AutoPaint Planner
//!
//! Turns a vector scene into ordered pen motion:
//!
//! 1. [`flatten`] dissolves the scene tree and snaps colors to tools
//! 2. [`trace`] keeps the visible parts of every outline
//! 3. fills run through `autopaint_fill`
//! 4. [`sequence`] orders polylines to cut pen-up travel
//! 5. [`motion`] streams the primitive commands
//!
//! [`driver::PlotDriver`] runs all of it incrementally, one tick at a time.

pub mod driver;
pub mod flatten;
pub mod motion;
pub mod sequence;
pub mod trace;

pub use driver::{plot, CancelToken, Phase, PlotDriver, RunState};
pub use flatten::FlatScene;
pub use motion::{stream, stream_path, MotionStreamer};
pub use sequence::{order_group, sequence, travel_distance};
pub use trace::{StrokeTracer, TraceState};
