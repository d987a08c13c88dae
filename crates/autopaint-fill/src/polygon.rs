//! Conversions between path contours and cavalier polylines.

use autopaint_core::path::Contour;
use autopaint_core::{Point, VectorPath};
use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};

/// Contours of one region split into outer rings and holes.
#[derive(Debug, Clone, Default)]
pub(crate) struct Region {
    pub outers: Vec<Polyline<f64>>,
    pub holes: Vec<Polyline<f64>>,
}

impl Region {
    /// Classify every contour of `path` by even-odd nesting depth.
    ///
    /// `scale` maps device coordinates into the polyline space.
    pub fn from_path(path: &VectorPath, scale: impl Fn(Point) -> Point, tolerance: f64) -> Self {
        let contours = path.contours();
        let mut region = Region::default();
        for (i, c) in contours.iter().enumerate() {
            let Some(probe) = c.points.first() else {
                continue;
            };
            let depth = contours
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && ring_contains(other, probe))
                .count();
            let points: Vec<Point> = c.points.iter().map(|p| scale(*p)).collect();
            let Some(pline) = prepare_polygon(&points, tolerance) else {
                continue;
            };
            if depth % 2 == 0 {
                region.outers.push(pline);
            } else {
                region.holes.push(pline);
            }
        }
        region
    }

    pub fn is_empty(&self) -> bool {
        self.outers.is_empty()
    }

    /// All rings as contours, mapped back with `unscale`.
    pub fn to_contours(&self, unscale: impl Fn(Point) -> Point) -> Vec<Contour> {
        self.outers
            .iter()
            .chain(self.holes.iter())
            .filter_map(|p| polyline_to_contour(p, &unscale))
            .collect()
    }
}

fn ring_contains(ring: &Contour, p: &Point) -> bool {
    let n = ring.points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    for i in 0..n {
        let a = ring.points[i];
        let b = ring.points[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Closed clockwise polyline without duplicate vertices.
///
/// Returns `None` when fewer than three distinct vertices remain.
pub(crate) fn prepare_polygon(vertices: &[Point], tolerance: f64) -> Option<Polyline<f64>> {
    let mut clean: Vec<Point> = Vec::with_capacity(vertices.len());
    for p in vertices {
        if clean.last().map_or(true, |last| last.distance_to(p) > tolerance) {
            clean.push(*p);
        }
    }
    while clean.len() > 1
        && clean
            .first()
            .zip(clean.last())
            .is_some_and(|(a, b)| a.distance_to(b) <= tolerance)
    {
        clean.pop();
    }
    if clean.len() < 3 {
        return None;
    }

    let contour = Contour::new(clean, true);
    let mut points = contour.points.clone();
    let area = contour.signed_area();
    if area.abs() <= f64::EPSILON {
        return None;
    }
    if area > 0.0 {
        points.reverse();
    }

    let mut polyline = Polyline::new();
    for p in points {
        polyline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    polyline.set_is_closed(true);
    Some(polyline)
}

pub(crate) fn polyline_to_contour(
    pline: &Polyline<f64>,
    unscale: impl Fn(Point) -> Point,
) -> Option<Contour> {
    if pline.vertex_count() < 3 {
        return None;
    }
    let points = pline
        .vertex_data
        .iter()
        .map(|v| unscale(Point::new(v.x, v.y)))
        .collect();
    Some(Contour::new(points, pline.is_closed()))
}

/// Axis-aligned overlap test on polyline extents.
pub(crate) fn extents_overlap(a: &Polyline<f64>, b: &Polyline<f64>) -> bool {
    match (a.extents(), b.extents()) {
        (Some(a), Some(b)) => {
            a.min_x <= b.max_x && b.min_x <= a.max_x && a.min_y <= b.max_y && b.min_y <= a.max_y
        }
        _ => false,
    }
}
