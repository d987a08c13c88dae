//! Pocket (offset) fill
//!
//! Outer rings are offset inward by the tool radius, then again by the full
//! tool diameter until nothing is left. Holes grow by the same amount and are
//! cut out of every ring. Offsetting runs on a fixed-precision grid so the
//! result does not depend on float noise in the artwork.

use crate::polygon::{extents_overlap, polyline_to_contour, Region};
use crate::strategy::{discard_unfillable, FillStrategy};
use autopaint_core::units::{distance_to_fixed, from_fixed, to_fixed};
use autopaint_core::{Diagnostic, Layer, PathRole, PlotSettings, Point, VectorPath};
use cavalier_contours::polyline::{BooleanOp, BooleanResult, PlineSource, Polyline};
use tracing::debug;

/// Hard stop for pathological inputs that never offset to nothing.
const MAX_PASSES: usize = 10_000;

#[derive(Debug, Clone)]
pub struct PocketFill {
    tool_diameter: f64,
    debug: bool,
    completed: usize,
}

impl Default for PocketFill {
    fn default() -> Self {
        Self::new()
    }
}

impl PocketFill {
    pub fn new() -> Self {
        Self {
            tool_diameter: PlotSettings::default().pocket_diameter(),
            debug: false,
            completed: 0,
        }
    }

    pub fn tool_diameter(&self) -> f64 {
        self.tool_diameter
    }

    /// Offset rings for `path`, in device units, outermost pass first.
    pub fn rings(&self, path: &VectorPath) -> Vec<Vec<Point>> {
        let grid = |p: Point| Point::new(to_fixed(p.x), to_fixed(p.y));
        let region = Region::from_path(path, grid, 0.5);
        if region.is_empty() {
            return Vec::new();
        }

        let radius = distance_to_fixed(self.tool_diameter / 2.0);
        let stepover = distance_to_fixed(self.tool_diameter);
        let mut rings = Vec::new();

        for outer in &region.outers {
            let mut offset = radius;
            for _ in 0..MAX_PASSES {
                let shrunk = outer.parallel_offset(-offset);
                if shrunk.is_empty() {
                    break;
                }
                let grown: Vec<Polyline<f64>> = region
                    .holes
                    .iter()
                    .flat_map(|h| h.parallel_offset(offset))
                    .collect();
                for ring in shrunk {
                    for cut in subtract_all(ring, &grown) {
                        if let Some(c) = polyline_to_contour(&cut, |p| {
                            Point::new(from_fixed(p.x), from_fixed(p.y))
                        }) {
                            rings.push(c.points);
                        }
                    }
                }
                offset += stepover;
            }
        }
        rings
    }
}

/// `ring` minus every cutter, returned as outer rings followed by any holes
/// the cuts opened.
fn subtract_all(ring: Polyline<f64>, cutters: &[Polyline<f64>]) -> Vec<Polyline<f64>> {
    let mut pieces = vec![ring];
    let mut openings = Vec::new();
    for cutter in cutters {
        let mut next = Vec::new();
        for piece in pieces {
            if !extents_overlap(&piece, cutter) {
                next.push(piece);
                continue;
            }
            let res: BooleanResult<Polyline<f64>> = piece.boolean(cutter, BooleanOp::Not);
            next.extend(res.pos_plines.into_iter().map(|p| p.pline));
            openings.extend(res.neg_plines.into_iter().map(|p| p.pline));
        }
        pieces = next;
    }
    pieces.extend(openings);
    pieces
}

impl FillStrategy for PocketFill {
    fn setup(&mut self, settings: &PlotSettings) {
        self.tool_diameter = settings.pocket_diameter();
        self.debug = settings.debug;
    }

    fn step_max(&self, path_count: usize) -> usize {
        path_count
    }

    fn fill_step(&mut self, working: &mut Layer, action: &mut Layer) -> bool {
        if discard_unfillable(working, self.debug) {
            self.completed += 1;
            return false;
        }
        let Some(path) = working.remove(0) else {
            return false;
        };

        let rings = self.rings(&path);
        if rings.is_empty() {
            Diagnostic::incomplete(path.name.clone(), "shape too small to offset")
                .report(self.debug);
        }
        debug!("Pocket fill of '{}' produced {} rings", path.name, rings.len());
        for mut points in rings {
            if let Some(first) = points.first().copied() {
                points.push(first);
            }
            let mut poly = VectorPath::from_points(path.name.clone(), points, false);
            poly.tool = path.tool;
            poly.role = PathRole::Fill;
            action.push(poly);
        }
        self.completed += 1;
        false
    }

    fn completed_steps(&self) -> usize {
        self.completed
    }

    fn reset(&mut self) {
        self.completed = 0;
    }
}
