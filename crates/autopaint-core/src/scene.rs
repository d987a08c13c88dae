//! Input scene model
//!
//! The artwork arrives as a tree of groups, compound paths and plain paths.
//! Scenes are plain serde data so an editor can hand one over as JSON.

use crate::error::Result;
use crate::geometry::{Point, Segment};
use crate::palette::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_opacity() -> f64 {
    1.0
}

fn default_stroke_width() -> f64 {
    1.0
}

/// Paint attributes of a scene item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintStyle {
    #[serde(default)]
    pub stroke: Option<Color>,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            stroke: None,
            stroke_width: default_stroke_width(),
            fill: None,
            opacity: default_opacity(),
        }
    }
}

impl PaintStyle {
    /// Stroke color with item opacity folded into alpha, if the stroke is visible.
    pub fn visible_stroke(&self) -> Option<Color> {
        self.stroke
            .filter(|_| self.stroke_width > 0.0)
            .map(|c| c.with_alpha(c.alpha * self.opacity))
    }

    /// Fill color with item opacity folded into alpha.
    pub fn visible_fill(&self) -> Option<Color> {
        self.fill.map(|c| c.with_alpha(c.alpha * self.opacity))
    }
}

/// A single (possibly curved) path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneItem {
    #[serde(default)]
    pub name: String,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub closed: bool,
    #[serde(flatten)]
    pub style: PaintStyle,
}

impl SceneItem {
    /// Straight-edged path through `points`.
    pub fn polygon(name: impl Into<String>, points: &[Point], closed: bool) -> Self {
        Self {
            name: name.into(),
            segments: points.iter().copied().map(Segment::new).collect(),
            closed,
            style: PaintStyle::default(),
        }
    }

    /// Circle approximated by four cubic arcs.
    pub fn circle(name: impl Into<String>, center: Point, radius: f64) -> Self {
        let k = 0.552_284_749_831 * radius;
        let (cx, cy) = (center.x, center.y);
        let arc = |x: f64, y: f64, hin: (f64, f64), hout: (f64, f64)| {
            Segment::with_handles(
                Point::new(x, y),
                Some(Point::new(x + hin.0, y + hin.1)),
                Some(Point::new(x + hout.0, y + hout.1)),
            )
        };
        Self {
            name: name.into(),
            segments: vec![
                arc(cx + radius, cy, (0.0, -k), (0.0, k)),
                arc(cx, cy + radius, (k, 0.0), (-k, 0.0)),
                arc(cx - radius, cy, (0.0, k), (0.0, -k)),
                arc(cx, cy - radius, (-k, 0.0), (k, 0.0)),
            ],
            closed: true,
            style: PaintStyle::default(),
        }
    }

    pub fn stroke(mut self, color: Color, width: f64) -> Self {
        self.style.stroke = Some(color);
        self.style.stroke_width = width;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.style.fill = Some(color);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.style.opacity = opacity;
        self
    }
}

/// One ring of a compound path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneContour {
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub closed: bool,
}

/// Several rings painted as one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneCompound {
    #[serde(default)]
    pub name: String,
    pub contours: Vec<SceneContour>,
    #[serde(flatten)]
    pub style: PaintStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

/// A node of the scene tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneNode {
    #[serde(rename = "path")]
    Leaf(SceneItem),
    Group(SceneGroup),
    Compound(SceneCompound),
}

impl From<SceneItem> for SceneNode {
    fn from(item: SceneItem) -> Self {
        SceneNode::Leaf(item)
    }
}

/// Top-level artwork, children listed bottom to top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl Scene {
    pub fn new(children: Vec<SceneNode>) -> Self {
        Self { children }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
