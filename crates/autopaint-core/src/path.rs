//! Flattened vector paths
//!
//! A [`VectorPath`] is one or more polyline contours plus the paint tags the
//! pipeline needs (tools, role, name). All positional queries are by arc
//! length across the contours in order.

use crate::geometry::{
    closest_point_on_segment, distance_to_segment, segment_intersection, Bounds, Point, EPSILON,
};
use crate::palette::ToolId;
use serde::Serialize;

/// Which phase a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathRole {
    Stroke,
    Fill,
}

impl std::fmt::Display for PathRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathRole::Stroke => write!(f, "stroke"),
            PathRole::Fill => write!(f, "fill"),
        }
    }
}

/// A single polyline ring or open run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contour {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Contour {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Edges in order, including the closing edge of a closed contour.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = if self.closed && self.points.len() > 2 {
            self.points.last().copied().zip(self.points.first().copied())
        } else {
            None
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }

    /// Edges treating the contour as closed regardless of its flag.
    fn ring_edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = if self.points.len() > 2 {
            self.points.last().copied().zip(self.points.first().copied())
        } else {
            None
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }

    pub fn length(&self) -> f64 {
        self.edges().map(|(a, b)| a.distance_to(&b)).sum()
    }

    /// Signed area (shoelace); positive is counter-clockwise in y-up space.
    pub fn signed_area(&self) -> f64 {
        self.ring_edges().map(|(a, b)| a.cross(&b)).sum::<f64>() / 2.0
    }

    fn point_at(&self, offset: f64) -> Option<Point> {
        let mut remaining = offset.max(0.0);
        for (a, b) in self.edges() {
            let len = a.distance_to(&b);
            if remaining <= len {
                if len <= EPSILON {
                    return Some(a);
                }
                return Some(a.lerp(&b, remaining / len));
            }
            remaining -= len;
        }
        self.edges()
            .last()
            .map(|(_, b)| b)
            .or_else(|| self.points.first().copied())
    }

    fn reverse(&mut self) {
        self.points.reverse();
    }
}

/// An intersection between two paths, located along the first one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathIntersection {
    pub point: Point,
    /// Arc-length offset of `point` along the queried path.
    pub offset: f64,
}

/// A flattened path with paint tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorPath {
    pub name: String,
    contours: Vec<Contour>,
    /// Tool snapped from the stroke color, if the path has a visible stroke.
    pub stroke: Option<ToolId>,
    /// Tool snapped from the fill color, if the path is filled.
    pub fill: Option<ToolId>,
    /// Tool this path is drawn with in its current phase.
    pub tool: Option<ToolId>,
    pub role: PathRole,
    #[serde(skip)]
    length: f64,
}

impl VectorPath {
    pub fn new(name: impl Into<String>, contours: Vec<Contour>) -> Self {
        let contours: Vec<Contour> = contours
            .into_iter()
            .filter(|c| !c.points.is_empty())
            .collect();
        let length = contours.iter().map(Contour::length).sum();
        Self {
            name: name.into(),
            contours,
            stroke: None,
            fill: None,
            tool: None,
            role: PathRole::Stroke,
            length,
        }
    }

    pub fn from_points(name: impl Into<String>, points: Vec<Point>, closed: bool) -> Self {
        Self::new(name, vec![Contour::new(points, closed)])
    }

    /// Empty open polyline used as an output accumulator.
    pub fn polyline(name: impl Into<String>, tool: Option<ToolId>, role: PathRole) -> Self {
        let mut path = Self::new(name, Vec::new());
        path.tool = tool;
        path.role = role;
        path
    }

    /// Closed rectangle through the four corners of `bounds`.
    pub fn rectangle(name: impl Into<String>, bounds: &Bounds) -> Self {
        Self::from_points(name, bounds.corners().to_vec(), true)
    }

    pub fn with_tool(mut self, tool: Option<ToolId>, role: PathRole) -> Self {
        self.tool = tool;
        self.role = role;
        self
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.contours.iter().all(|c| c.points.is_empty())
    }

    pub fn is_compound(&self) -> bool {
        self.contours.len() > 1
    }

    pub fn is_closed(&self) -> bool {
        !self.contours.is_empty() && self.contours.iter().all(|c| c.closed)
    }

    pub fn point_count(&self) -> usize {
        self.contours.iter().map(|c| c.points.len()).sum()
    }

    /// Mark every contour closed.
    pub fn close(&mut self) {
        for c in &mut self.contours {
            c.closed = true;
        }
        self.recompute_length();
    }

    /// Append a point to the last contour, starting one if needed.
    pub fn push_point(&mut self, p: Point) {
        match self.contours.last_mut() {
            Some(c) => {
                if let Some(last) = c.points.last() {
                    self.length += last.distance_to(&p);
                }
                c.points.push(p);
            }
            None => self.contours.push(Contour::new(vec![p], false)),
        }
    }

    /// Append another polyline's points to this one.
    pub fn join(&mut self, other: &VectorPath) {
        for c in &other.contours {
            for p in &c.points {
                self.push_point(*p);
            }
        }
    }

    pub fn first_point(&self) -> Option<Point> {
        self.contours.first().and_then(|c| c.points.first().copied())
    }

    pub fn last_point(&self) -> Option<Point> {
        self.contours.last().and_then(|c| c.points.last().copied())
    }

    /// All vertices in contour order.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.contours.iter().flat_map(|c| c.points.iter())
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points())
    }

    /// Bounds center; the origin for an empty path.
    pub fn position(&self) -> Point {
        self.bounds().map(|b| b.center()).unwrap_or(Point::ORIGIN)
    }

    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.contours.iter().flat_map(|c| c.edges())
    }

    /// Point at arc-length `offset`, clamped to the path ends.
    pub fn point_at(&self, offset: f64) -> Option<Point> {
        let mut remaining = offset.max(0.0);
        let last = self.contours.len().checked_sub(1)?;
        for (i, c) in self.contours.iter().enumerate() {
            let len = c.length();
            if remaining <= len || i == last {
                return c.point_at(remaining);
            }
            remaining -= len;
        }
        None
    }

    /// Arc-length offset of the outline point closest to `p`.
    pub fn offset_of(&self, p: &Point) -> f64 {
        let mut best = f64::INFINITY;
        let mut best_offset = 0.0;
        let mut walked = 0.0;
        for (a, b) in self.edges() {
            let (q, t) = closest_point_on_segment(*p, a, b);
            let d = q.distance_to(p);
            let len = a.distance_to(&b);
            if d < best {
                best = d;
                best_offset = walked + len * t;
            }
            walked += len;
        }
        best_offset
    }

    /// Even-odd containment over all contours, each treated as closed.
    pub fn contains(&self, p: &Point) -> bool {
        let mut inside = false;
        for c in &self.contours {
            for (a, b) in c.ring_edges() {
                if (a.y > p.y) != (b.y > p.y) {
                    let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                    if p.x < x {
                        inside = !inside;
                    }
                }
            }
        }
        inside
    }

    pub fn distance_to_outline(&self, p: &Point) -> f64 {
        let mut best = f64::INFINITY;
        for (a, b) in self.edges() {
            best = best.min(distance_to_segment(*p, a, b));
        }
        if best.is_infinite() {
            if let Some(only) = self.first_point() {
                return only.distance_to(p);
            }
        }
        best
    }

    /// Intersections with `other`, ordered by offset along `self`.
    pub fn intersections_with_offsets(&self, other: &VectorPath) -> Vec<PathIntersection> {
        let Some(other_bounds) = other.bounds() else {
            return Vec::new();
        };
        let other_edges: Vec<(Point, Point)> = other.edges().collect();
        let mut hits = Vec::new();
        let mut walked = 0.0;
        for (a, b) in self.edges() {
            let len = a.distance_to(&b);
            let edge_bounds = Bounds::new(a.x, a.y, b.x, b.y);
            if edge_bounds.max_x >= other_bounds.min_x - EPSILON
                && edge_bounds.min_x <= other_bounds.max_x + EPSILON
                && edge_bounds.max_y >= other_bounds.min_y - EPSILON
                && edge_bounds.min_y <= other_bounds.max_y + EPSILON
            {
                for (c, d) in &other_edges {
                    if let Some(hit) = segment_intersection(a, b, *c, *d) {
                        hits.push(PathIntersection {
                            point: hit.point,
                            offset: walked + len * hit.t,
                        });
                    }
                }
            }
            walked += len;
        }
        hits.sort_by(|x, y| x.offset.total_cmp(&y.offset));
        hits.dedup_by(|x, y| x.point.distance_to(&y.point) <= 1e-6);
        hits
    }

    pub fn intersections(&self, other: &VectorPath) -> Vec<Point> {
        self.intersections_with_offsets(other)
            .into_iter()
            .map(|h| h.point)
            .collect()
    }

    /// Intersection with `other` closest to `near`.
    pub fn closest_intersection(&self, other: &VectorPath, near: &Point) -> Option<Point> {
        self.intersections(other)
            .into_iter()
            .min_by(|a, b| a.distance_to(near).total_cmp(&b.distance_to(near)))
    }

    /// Intersections of the finite segment `a-b` with the outline.
    pub fn segment_intersections(&self, a: Point, b: Point) -> Vec<Point> {
        let probe = VectorPath::from_points("", vec![a, b], false);
        probe.intersections(self)
    }

    /// Crossings of the infinite line through `origin` at `angle` degrees.
    ///
    /// Contours are treated as closed and each edge is half-open along the
    /// line normal, so a line through a shared vertex counts it once. The
    /// result is sorted along the line direction, which makes the count even
    /// for any set of rings.
    pub fn line_crossings(&self, origin: Point, angle: f64) -> Vec<Point> {
        let level = origin.rotate(-angle).y;
        let mut xs = Vec::new();
        for c in &self.contours {
            for (a, b) in c.ring_edges() {
                let a = a.rotate(-angle);
                let b = b.rotate(-angle);
                let spans = (a.y <= level && level < b.y) || (b.y <= level && level < a.y);
                if spans {
                    xs.push(a.x + (level - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
        }
        xs.sort_by(f64::total_cmp);
        xs.into_iter()
            .map(|x| Point::new(x, level).rotate(angle))
            .collect()
    }

    pub fn reverse(&mut self) {
        self.contours.reverse();
        for c in &mut self.contours {
            c.reverse();
        }
    }

    pub fn translate(&mut self, delta: Point) {
        for c in &mut self.contours {
            for p in &mut c.points {
                *p = *p + delta;
            }
        }
    }

    /// Split a compound path into one path per contour, keeping the tags.
    pub fn into_components(self) -> Vec<VectorPath> {
        let VectorPath {
            name,
            contours,
            stroke,
            fill,
            tool,
            role,
            ..
        } = self;
        contours
            .into_iter()
            .map(|c| {
                let mut p = VectorPath::new(name.clone(), vec![c]);
                p.stroke = stroke;
                p.fill = fill;
                p.tool = tool;
                p.role = role;
                p
            })
            .collect()
    }

    /// Copy of this path's tags over new geometry.
    pub fn with_contours(&self, contours: Vec<Contour>) -> VectorPath {
        let mut p = VectorPath::new(self.name.clone(), contours);
        p.stroke = self.stroke;
        p.fill = self.fill;
        p.tool = self.tool;
        p.role = self.role;
        p
    }

    fn recompute_length(&mut self) {
        self.length = self.contours.iter().map(Contour::length).sum();
    }
}
