//! Fill layer occlusion
//!
//! Before filling, every fill path has each fill path above it cut away so no
//! area is painted twice or under a shape that covers it. Background-tool
//! fills take part as cutters only and are then dropped.

use crate::polygon::{extents_overlap, Region};
use autopaint_core::{Diagnostic, Layer, VectorPath};
use cavalier_contours::polyline::{BooleanOp, BooleanResult, PlineSource, Polyline};
use tracing::debug;

const VERTEX_TOLERANCE: f64 = 1e-6;

fn cut(region: &Region, cutter: &Polyline<f64>) -> Region {
    let mut out = Region::default();
    for outer in &region.outers {
        if !extents_overlap(outer, cutter) {
            out.outers.push(outer.clone());
            continue;
        }
        let res: BooleanResult<Polyline<f64>> = outer.boolean(cutter, BooleanOp::Not);
        out.outers.extend(res.pos_plines.into_iter().map(|p| p.pline));
        out.holes.extend(res.neg_plines.into_iter().map(|p| p.pline));
    }
    for hole in &region.holes {
        if !extents_overlap(hole, cutter) {
            out.holes.push(hole.clone());
            continue;
        }
        let res: BooleanResult<Polyline<f64>> = hole.boolean(cutter, BooleanOp::Not);
        out.holes.extend(res.pos_plines.into_iter().map(|p| p.pline));
    }
    out
}

/// `path` minus every path in `above`. `None` when nothing is left.
pub fn subtract_above(path: &VectorPath, above: &[VectorPath]) -> Option<VectorPath> {
    let mut region = Region::from_path(path, |p| p, VERTEX_TOLERANCE);
    let mut touched = false;
    for upper in above {
        // holes of the upper path do not reveal what lies below
        let cutters = Region::from_path(upper, |p| p, VERTEX_TOLERANCE).outers;
        for cutter in &cutters {
            if region.outers.iter().any(|o| extents_overlap(o, cutter)) {
                region = cut(&region, cutter);
                touched = true;
            }
        }
        if region.is_empty() {
            return None;
        }
    }
    if !touched {
        return Some(path.clone());
    }
    let contours = region.to_contours(|p| p);
    (!contours.is_empty()).then(|| path.with_contours(contours))
}

/// Occlusion pass over a fill layer, one path per step.
#[derive(Debug, Clone, Default)]
pub struct FillPreparer {
    source: Vec<VectorPath>,
    cursor: usize,
    prepared: Vec<VectorPath>,
    debug: bool,
}

impl FillPreparer {
    pub fn new(mut layer: Layer, debug: bool) -> Self {
        Self {
            source: layer.take(),
            cursor: 0,
            prepared: Vec::new(),
            debug,
        }
    }

    /// Paths examined so far.
    pub fn processed(&self) -> usize {
        self.cursor
    }

    pub fn total(&self) -> usize {
        self.source.len()
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.source.len()
    }

    /// Cut the next path against everything above it. Returns false once
    /// every path has been examined.
    pub fn step(&mut self) -> bool {
        let Some(path) = self.source.get(self.cursor) else {
            return false;
        };
        if !path.tool.is_none_or(|t| t.is_background()) {
            match subtract_above(path, &self.source[self.cursor + 1..]) {
                Some(p) if p.bounds().is_some_and(|b| !b.is_degenerate()) => self.prepared.push(p),
                _ => {
                    Diagnostic::degenerate(path.name.clone(), "fully covered by shapes above")
                        .report(self.debug);
                }
            }
        }
        self.cursor += 1;
        true
    }

    /// The surviving fill paths, bottom first.
    pub fn finish(self) -> Layer {
        debug!(
            "Prepared {} of {} fill paths",
            self.prepared.len(),
            self.source.len()
        );
        Layer::from(self.prepared)
    }
}

/// Cut occluded area out of every fill path and drop background fills.
pub fn prepare_fill_layer(layer: &mut Layer, debug_enabled: bool) {
    let mut preparer = FillPreparer::new(std::mem::take(layer), debug_enabled);
    while preparer.step() {}
    *layer = preparer.finish();
}
