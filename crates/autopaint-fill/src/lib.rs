//! # AutoPaint Fill
//!
//! Area fill strategies. Each strategy consumes fill paths from the bottom of
//! a working layer, a bounded amount of work per step, and writes open
//! polylines to the action layer.
//!
//! - [`HatchFill`]: parallel sweep lines joined into zig-zag chains
//! - [`PocketFill`]: concentric inward offsets of the outline
//! - [`OverlayFill`]: one shared spiral clipped to each shape

pub mod hatch;
pub mod overlay;
pub mod pocket;
pub mod prepare;
pub mod strategy;

mod polygon;

pub use hatch::{Chord, HatchFill};
pub use overlay::OverlayFill;
pub use pocket::PocketFill;
pub use prepare::{prepare_fill_layer, subtract_above, FillPreparer};
pub use strategy::{FillEngine, FillStrategy};
