//! Tool palette and color snapping
//!
//! Every color in the artwork is snapped to exactly one tool. The paper color
//! takes part in snapping as the last candidate and maps to
//! [`ToolId::Background`], which is never drawn.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn distance(&self, other: &Color) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Relative luminance in `[0, 1]`.
    pub fn luminosity(&self) -> f64 {
        (0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b))
            / 255.0
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| invalid())
        };
        match hex.len() {
            3 => Ok(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?)
                .with_alpha(f64::from(byte(6)?) / 255.0)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.alpha < 1.0 {
            write!(f, "{:02x}", (self.alpha * 255.0).round() as u8)?;
        }
        Ok(())
    }
}

/// Identifies the tool a path is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolId {
    /// Index into the palette's tool list.
    Tool(usize),
    /// The paper color; never drawn.
    Background,
}

impl ToolId {
    pub fn is_background(&self) -> bool {
        matches!(self, ToolId::Background)
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolId::Tool(i) => write!(f, "tool{}", i),
            ToolId::Background => write!(f, "background"),
        }
    }
}

/// One pen/brush the device can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub color: Color,
}

impl Tool {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// The fixed set of tools available for a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub tools: Vec<Tool>,
    pub background: Color,
    /// Translucent tool that receives every color with opacity below one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wash_tool: Option<usize>,
}

impl Default for Palette {
    fn default() -> Self {
        let tools = [
            ("black", Color::rgb(0x00, 0x00, 0x00)),
            ("red", Color::rgb(0xd8, 0x1e, 0x22)),
            ("orange", Color::rgb(0xf2, 0x75, 0x1f)),
            ("yellow", Color::rgb(0xfb, 0xe3, 0x1c)),
            ("green", Color::rgb(0x29, 0xa3, 0x3b)),
            ("blue", Color::rgb(0x1f, 0x4f, 0xa8)),
            ("purple", Color::rgb(0x6e, 0x2b, 0x8c)),
            ("brown", Color::rgb(0x7a, 0x4a, 0x26)),
        ]
        .into_iter()
        .map(|(name, color)| Tool::new(name, color))
        .collect();
        Self {
            tools,
            background: Color::WHITE,
            wash_tool: None,
        }
    }
}

impl Palette {
    pub fn new(tools: Vec<Tool>, background: Color) -> Self {
        Self {
            tools,
            background,
            wash_tool: None,
        }
    }

    pub fn tool(&self, id: ToolId) -> Option<&Tool> {
        match id {
            ToolId::Tool(i) => self.tools.get(i),
            ToolId::Background => None,
        }
    }

    /// Display name for a tool id.
    pub fn tool_name(&self, id: ToolId) -> String {
        self.tool(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Reject palettes a job cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tools.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        let mut seen = HashSet::new();
        for tool in &self.tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(ConfigError::DuplicateTool(tool.name.clone()));
            }
        }
        if let Some(index) = self.wash_tool {
            if index >= self.tools.len() {
                return Err(ConfigError::UnknownTool { index });
            }
        }
        Ok(())
    }

    /// Nearest tool by RGB distance.
    ///
    /// Ties go to the lowest index; the background is the last candidate and
    /// only wins when strictly closer than every tool.
    pub fn snap(&self, color: &Color) -> ToolId {
        if color.alpha < 1.0 {
            if let Some(wash) = self.wash_tool {
                return ToolId::Tool(wash);
            }
        }

        let mut best = ToolId::Background;
        let mut best_distance = f64::INFINITY;
        for (i, tool) in self.tools.iter().enumerate() {
            let d = tool.color.distance(color);
            if d < best_distance {
                best = ToolId::Tool(i);
                best_distance = d;
            }
        }
        if self.background.distance(color) < best_distance {
            best = ToolId::Background;
        }
        best
    }

    /// Tool ids sorted lightest first, index breaking ties.
    pub fn draw_order(&self) -> Vec<ToolId> {
        let mut order: Vec<usize> = (0..self.tools.len()).collect();
        order.sort_by(|&a, &b| {
            self.tools[b]
                .color
                .luminosity()
                .total_cmp(&self.tools[a].color.luminosity())
                .then(a.cmp(&b))
        });
        order.into_iter().map(ToolId::Tool).collect()
    }
}
