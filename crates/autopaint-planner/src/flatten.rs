//! Scene flattening
//!
//! Dissolves the scene tree into a flat, bottom-to-top list of polygonal
//! paths with their stroke and fill colors snapped to palette tools.

use autopaint_core::geometry::flatten_segments;
use autopaint_core::{
    Color, Contour, Layer, PaintStyle, Palette, PathRole, PlotSettings, Scene, SceneNode,
    Segment, ToolId, VectorPath,
};
use tracing::debug;

/// The flattened scene: every visible path in draw order, curves flattened.
///
/// Paths carry their snapped `stroke` and `fill` tools; `tool` and `role` are
/// assigned when a layer is built for a phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatScene {
    paths: Vec<VectorPath>,
}

fn visible(color: Option<Color>) -> Option<Color> {
    color.filter(|c| c.alpha > 0.0)
}

struct Flattener<'a> {
    palette: &'a Palette,
    tolerance: f64,
    paths: Vec<VectorPath>,
    dropped: usize,
}

impl Flattener<'_> {
    fn visit(&mut self, node: &SceneNode) {
        match node {
            SceneNode::Group(group) => {
                for child in &group.children {
                    self.visit(child);
                }
            }
            SceneNode::Leaf(item) => {
                let rings = [(item.segments.as_slice(), item.closed)];
                self.add(&item.name, &rings, &item.style);
            }
            SceneNode::Compound(compound) => {
                let rings: Vec<(&[Segment], bool)> = compound
                    .contours
                    .iter()
                    .map(|c| (c.segments.as_slice(), c.closed))
                    .collect();
                self.add(&compound.name, &rings, &compound.style);
            }
        }
    }

    fn add(&mut self, name: &str, rings: &[(&[Segment], bool)], style: &PaintStyle) {
        let stroke = visible(style.visible_stroke()).map(|c| self.palette.snap(&c));
        let fill = visible(style.visible_fill()).map(|c| self.palette.snap(&c));
        if stroke.is_none() && fill.is_none() {
            self.dropped += 1;
            return;
        }

        // a fillable shape must be closed so stroke and fill see one boundary
        let force_closed = fill.is_some_and(|t| !t.is_background());
        let contours: Vec<Contour> = rings
            .iter()
            .map(|(segments, closed)| {
                let closed = *closed || force_closed;
                Contour::new(flatten_segments(segments, closed, self.tolerance), closed)
            })
            .collect();

        let mut path = VectorPath::new(name, contours);
        path.stroke = stroke;
        path.fill = fill;
        self.paths.push(path);
    }
}

impl FlatScene {
    /// Flatten `scene` with the palette and curve tolerance from `settings`.
    pub fn new(scene: &Scene, settings: &PlotSettings) -> Self {
        let mut flattener = Flattener {
            palette: &settings.palette,
            tolerance: settings.curve_tolerance,
            paths: Vec::new(),
            dropped: 0,
        };
        for node in &scene.children {
            flattener.visit(node);
        }
        debug!(
            "Flattened scene into {} paths ({} invisible dropped)",
            flattener.paths.len(),
            flattener.dropped
        );
        Self {
            paths: flattener.paths,
        }
    }

    pub fn paths(&self) -> &[VectorPath] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Every path, tagged for outline tracing with its stroke tool, or its
    /// fill tool when it has no stroke.
    pub fn trace_layer(&self) -> Layer {
        self.paths
            .iter()
            .map(|p| {
                let tool = p.stroke.or(p.fill);
                p.clone().with_tool(tool, PathRole::Stroke)
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Every filled path, closed and tagged with its fill tool.
    pub fn fill_layer(&self) -> Layer {
        self.paths
            .iter()
            .filter(|p| p.fill.is_some())
            .map(|p| {
                let mut path = p.clone().with_tool(p.fill, PathRole::Fill);
                path.close();
                path
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Tools that appear anywhere in the scene, background excluded.
    pub fn tools(&self) -> Vec<ToolId> {
        let mut tools: Vec<ToolId> = self
            .paths
            .iter()
            .flat_map(|p| [p.stroke, p.fill])
            .flatten()
            .filter(|t| !t.is_background())
            .collect();
        tools.sort();
        tools.dedup();
        tools
    }
}
