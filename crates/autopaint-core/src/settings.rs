//! Job settings
//!
//! `PlotSettings` is the configuration record a job starts from. Keys are
//! camelCase on disk and every field has a default, so partial files work.

use crate::error::ConfigError;
use crate::geometry::Bounds;
use crate::palette::Palette;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Area fill algorithm for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStrategyKind {
    /// Parallel hatch lines joined into zig-zags.
    #[default]
    Hatch,
    /// Inward offset rings.
    Pocket,
    /// Archimedean spiral clipped to the shape.
    Overlay,
}

impl fmt::Display for FillStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillStrategyKind::Hatch => write!(f, "hatch"),
            FillStrategyKind::Pocket => write!(f, "pocket"),
            FillStrategyKind::Overlay => write!(f, "overlay"),
        }
    }
}

impl FromStr for FillStrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hatch" => Ok(FillStrategyKind::Hatch),
            "pocket" => Ok(FillStrategyKind::Pocket),
            "overlay" => Ok(FillStrategyKind::Overlay),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Settings shared by every stage of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlotSettings {
    /// Sampling step along paths, in device units
    pub flatten_resolution: f64,
    /// Max deviation when flattening curves
    pub curve_tolerance: f64,
    /// Distance between fill lines
    pub fill_spacing: f64,
    /// Hatch line angle in degrees
    pub fill_angle: f64,
    /// Distance under which hatch chords share a group
    pub fill_threshold: f64,
    /// Drawn line width; also the stroke hit-test width
    pub line_width: f64,
    pub fill_strategy: FillStrategyKind,
    /// Center overlay spirals on each path instead of the view
    pub overlay_align_to_path: bool,
    /// Log recovered geometry problems
    pub debug: bool,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Tracer/filler steps per tick
    pub steps_per_tick: usize,
    /// Boundary crossings above which a hatch connector is rejected
    pub hatch_join_crossings: usize,
    /// Pocket tool diameter; `fill_spacing` when unset
    pub pocket_tool_diameter: Option<f64>,
    pub palette: Palette,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            flatten_resolution: 15.0,
            curve_tolerance: 0.25,
            fill_spacing: 13.0,
            fill_angle: -155.0,
            fill_threshold: 40.0,
            line_width: 10.0,
            fill_strategy: FillStrategyKind::Hatch,
            overlay_align_to_path: true,
            debug: false,
            canvas_width: 1152.0,
            canvas_height: 768.0,
            steps_per_tick: 2,
            hatch_join_crossings: 3,
            pocket_tool_diameter: None,
            palette: Palette::default(),
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite {
            name: name.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive {
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}

impl PlotSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every value a job depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("flattenResolution", self.flatten_resolution)?;
        positive("curveTolerance", self.curve_tolerance)?;
        positive("fillSpacing", self.fill_spacing)?;
        positive("fillThreshold", self.fill_threshold)?;
        positive("lineWidth", self.line_width)?;
        positive("canvasWidth", self.canvas_width)?;
        positive("canvasHeight", self.canvas_height)?;
        if !self.fill_angle.is_finite() {
            return Err(ConfigError::NotFinite {
                name: "fillAngle".to_string(),
            });
        }
        if self.steps_per_tick == 0 {
            return Err(ConfigError::NonPositive {
                name: "stepsPerTick".to_string(),
                value: 0.0,
            });
        }
        if let Some(d) = self.pocket_tool_diameter {
            positive("pocketToolDiameter", d)?;
        }
        self.palette.validate()
    }

    /// Printable area, anchored at the origin.
    pub fn view_bounds(&self) -> Bounds {
        Bounds::from_size(self.canvas_width, self.canvas_height)
    }

    pub fn pocket_diameter(&self) -> f64 {
        self.pocket_tool_diameter.unwrap_or(self.fill_spacing)
    }

    /// Load settings from a `.toml` or `.json` file and validate them.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a `.toml` or `.json` file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}
