//! # AutoPaint
//!
//! Converts layered vector artwork into ordered pen-plotter motion for
//! painting robots that hold one color at a time.
//!
//! ## Architecture
//!
//! AutoPaint is organized as a workspace with multiple crates:
//!
//! 1. **autopaint-core** - Geometry, paths, layers, palette, scene model, events, settings
//! 2. **autopaint-fill** - Hatch, pocket and overlay spiral fill strategies
//! 3. **autopaint-planner** - Flattening, stroke tracing, sequencing, motion streaming, job driver
//! 4. **autopaint** - Logging setup and the command line front end

use anyhow::Context;
use std::path::Path;

pub use autopaint_core::{
    CallbackSink, Color, ConfigError, Error, EventSink, FillStrategyKind, Layer, MotionCommand,
    Palette, PlotEvent, PlotSettings, Point, Result, Scene, ToolId, VectorPath,
};
pub use autopaint_fill::{FillEngine, FillStrategy};
pub use autopaint_planner::{plot, CancelToken, FlatScene, Phase, PlotDriver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Logs go to stderr so motion output on stdout stays clean. `RUST_LOG`
/// overrides `default_level`; `json` switches to one JSON object per line.
pub fn init_logging(default_level: tracing::Level, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }
    Ok(())
}

/// Read settings from a TOML or JSON file, or use the defaults.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<PlotSettings> {
    match path {
        Some(path) => PlotSettings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(PlotSettings::default()),
    }
}

/// Read a scene from a JSON file.
pub fn load_scene(path: &Path) -> anyhow::Result<Scene> {
    Scene::load(path).with_context(|| format!("Failed to read scene {}", path.display()))
}
