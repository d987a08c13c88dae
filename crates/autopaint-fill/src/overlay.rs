//! Overlay spiral fill
//!
//! One large Archimedean spiral is built per job and laid over each fill path
//! in turn. Walking the spiral in small steps, samples whose frontmost fill
//! hit is the current path are kept; everything else is skipped. Where the
//! walk re-enters the shape the exact crossing point is spliced in so the
//! output has no gaps at the boundary.

use crate::strategy::{discard_unfillable, FillStrategy};
use autopaint_core::geometry::flatten_segments;
use autopaint_core::path::PathIntersection;
use autopaint_core::{
    Bounds, Diagnostic, HitOptions, Layer, PathRole, PlotSettings, Point, Segment, VectorPath,
};
use std::f64::consts::{FRAC_PI_4, TAU};
use tracing::debug;

/// Raw spiral vertices trimmed from the end after smoothing.
const TAIL_TRIM: usize = 4;

/// Walk state for the path currently being filled.
#[derive(Debug, Clone)]
struct Walk {
    origin: Point,
    /// Farthest bounds corner from `origin`.
    reach: f64,
    spiral_length: f64,
    intersections: Vec<PathIntersection>,
    position: f64,
    last_good: bool,
    current: Option<VectorPath>,
}

#[derive(Debug, Clone)]
pub struct OverlayFill {
    spacing: f64,
    step: f64,
    tolerance: f64,
    align_to_path: bool,
    view: Bounds,
    debug: bool,
    spiral: Option<VectorPath>,
    walk: Option<Walk>,
    completed: usize,
}

impl Default for OverlayFill {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw spiral samples for turns `[from, to)`, eight per turn.
fn spiral_points(from: usize, to: usize, k: f64) -> Vec<Point> {
    let first = from * 8;
    let last = to * 8;
    (first..last)
        .map(|i| {
            let theta = i as f64 * FRAC_PI_4;
            let r = k * theta;
            Point::new(r * theta.cos(), r * theta.sin())
        })
        .collect()
}

/// Catmull-Rom handles for a polyline, as absolute bezier segments.
fn smooth(points: &[Point]) -> Vec<Segment> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let prev = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(n - 1)];
            let tangent = (next - prev) / 6.0;
            Segment::with_handles(points[i], Some(points[i] - tangent), Some(points[i] + tangent))
        })
        .collect()
}

impl OverlayFill {
    pub fn new() -> Self {
        let defaults = PlotSettings::default();
        Self {
            spacing: defaults.fill_spacing,
            step: defaults.flatten_resolution,
            tolerance: defaults.curve_tolerance,
            align_to_path: defaults.overlay_align_to_path,
            view: defaults.view_bounds(),
            debug: false,
            spiral: None,
            walk: None,
            completed: 0,
        }
    }

    /// The precomputed spiral, centered on the origin.
    pub fn spiral(&self) -> Option<&VectorPath> {
        self.spiral.as_ref()
    }

    /// Build a spiral whose radius exceeds the view diagonal.
    fn build_spiral(&self) -> VectorPath {
        let k = self.spacing / TAU;
        let diagonal = self.view.diagonal();
        let mut turns = (diagonal / self.spacing).ceil() as usize + 1;
        let mut points = spiral_points(0, turns, k);
        while points.last().map_or(0.0, |p| p.length()) <= diagonal {
            points.extend(spiral_points(turns, turns * 2, k));
            turns *= 2;
        }
        if self.debug {
            debug!(
                "Spiral generated with {} turns for a {:.1} view diagonal",
                turns, diagonal
            );
        }

        let mut segments = smooth(&points);
        segments.truncate(segments.len().saturating_sub(TAIL_TRIM));
        let flat = flatten_segments(&segments, false, self.tolerance);
        VectorPath::from_points("spiral", flat, false)
    }

    fn start_walk(&self, spiral: &VectorPath, path: &VectorPath) -> Walk {
        let origin = if self.align_to_path {
            path.position()
        } else {
            self.view.center()
        };
        let mut local = path.clone();
        local.translate(-origin);
        Walk {
            origin,
            reach: path
                .bounds()
                .map_or(0.0, |b| b.farthest_corner_distance(&origin)),
            spiral_length: spiral.length(),
            intersections: spiral.intersections_with_offsets(&local),
            position: 0.0,
            last_good: false,
            current: None,
        }
    }

    /// Whether `point` shows the current path (layer index 0) on top.
    fn inside(working: &Layer, point: &Point) -> bool {
        working
            .hit_test(point, &HitOptions::fill_only())
            .is_some_and(|h| h.index == 0)
    }

    /// Take one sample; returns the completion reason once the path is done.
    fn advance(
        &self,
        spiral: &VectorPath,
        walk: &mut Walk,
        working: &Layer,
        path: &VectorPath,
        action: &mut Layer,
    ) -> Option<&'static str> {
        let Some(local) = spiral.point_at(walk.position) else {
            return Some("empty spiral");
        };
        let sample = local + walk.origin;
        let inside = Self::inside(working, &sample);

        if inside {
            let current = walk.current.get_or_insert_with(|| {
                VectorPath::polyline(path.name.clone(), path.tool, PathRole::Fill)
            });
            if !walk.last_good && walk.position > 0.0 {
                let nearest = walk
                    .intersections
                    .iter()
                    .enumerate()
                    .min_by(|(_, a), (_, b)| {
                        a.point.distance_to(&local).total_cmp(&b.point.distance_to(&local))
                    })
                    .map(|(i, _)| i);
                if let Some(i) = nearest {
                    let hit = walk.intersections.remove(i);
                    current.push_point(hit.point + walk.origin);
                }
            }
            current.push_point(sample);
            walk.last_good = true;
        } else {
            if let Some(done) = walk.current.take() {
                if !done.is_empty() {
                    action.push(done);
                }
            }
            walk.last_good = false;
        }

        if self.align_to_path && sample.distance_to(&walk.origin) > walk.reach {
            return Some("walked beyond path bounds");
        }
        if walk.position + self.step > walk.spiral_length {
            Diagnostic::incomplete(path.name.clone(), "spiral exhausted").report(self.debug);
            return Some("spiral exhausted");
        }
        if walk.intersections.is_empty() {
            return Some("intersections depleted");
        }

        if !inside {
            // skip ahead to the next crossing that actually enters the shape
            let position = walk.position;
            walk.intersections.retain(|h| h.offset > position);
            let entry = walk.intersections.iter().position(|h| {
                spiral
                    .point_at(h.offset + self.step)
                    .is_some_and(|p| Self::inside(working, &(p + walk.origin)))
            });
            match entry {
                Some(i) => {
                    walk.intersections.drain(..i);
                    walk.position = walk.intersections[0].offset;
                }
                None => return Some("no further entry into the shape"),
            }
        }

        walk.position = (walk.position + self.step).min(walk.spiral_length);
        None
    }
}

impl FillStrategy for OverlayFill {
    fn setup(&mut self, settings: &PlotSettings) {
        self.spacing = settings.fill_spacing;
        self.step = settings.flatten_resolution;
        self.tolerance = settings.curve_tolerance;
        self.align_to_path = settings.overlay_align_to_path;
        self.view = settings.view_bounds();
        self.debug = settings.debug;
        self.spiral = Some(self.build_spiral());
    }

    fn step_max(&self, path_count: usize) -> usize {
        path_count
    }

    fn fill_step(&mut self, working: &mut Layer, action: &mut Layer) -> bool {
        if self.walk.is_none() && discard_unfillable(working, self.debug) {
            self.completed += 1;
            return false;
        }
        let Some(path) = working.get(0) else {
            return false;
        };
        let spiral = match self.spiral.take() {
            Some(s) => s,
            None => self.build_spiral(),
        };
        let mut walk = match self.walk.take() {
            Some(w) => w,
            None => self.start_walk(&spiral, path),
        };

        let finished = self.advance(&spiral, &mut walk, working, path, action);
        self.spiral = Some(spiral);

        if let Some(reason) = finished {
            if self.debug {
                debug!("Overlay fill of '{}' complete: {}", path.name, reason);
            }
            if let Some(done) = walk.current.take() {
                if !done.is_empty() {
                    action.push(done);
                }
            }
            working.remove(0);
            self.completed += 1;
            false
        } else {
            self.walk = Some(walk);
            true
        }
    }

    fn completed_steps(&self) -> usize {
        self.completed
    }

    fn reset(&mut self) {
        self.spiral = None;
        self.walk = None;
        self.completed = 0;
    }

    fn tick_multiplier(&self) -> usize {
        2
    }
}
