use super::{Point, EPSILON};
use lyon::geom::{point, CubicBezierSegment};
use serde::{Deserialize, Serialize};

/// A path vertex with optional bezier handles.
///
/// Handles are stored as absolute positions. A segment without handles is a
/// plain polyline corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub point: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_in: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_out: Option<Point>,
}

impl Segment {
    pub fn new(point: Point) -> Self {
        Self {
            point,
            handle_in: None,
            handle_out: None,
        }
    }

    pub fn with_handles(point: Point, handle_in: Option<Point>, handle_out: Option<Point>) -> Self {
        Self {
            point,
            handle_in,
            handle_out,
        }
    }
}

impl From<Point> for Segment {
    fn from(point: Point) -> Self {
        Segment::new(point)
    }
}

/// Flatten a segment list to a polyline.
///
/// Curved spans (either neighbouring handle present) are flattened with lyon
/// to within `tolerance`. For closed input the closing span is flattened too
/// and the duplicated start point is not repeated at the end.
pub fn flatten_segments(segments: &[Segment], closed: bool, tolerance: f64) -> Vec<Point> {
    let Some(first) = segments.first() else {
        return Vec::new();
    };

    let mut out = vec![first.point];
    let push_span = |from: &Segment, to: &Segment, out: &mut Vec<Point>| {
        if from.handle_out.is_none() && to.handle_in.is_none() {
            out.push(to.point);
            return;
        }
        let curve = CubicBezierSegment {
            from: lyon_point(from.point),
            ctrl1: lyon_point(from.handle_out.unwrap_or(from.point)),
            ctrl2: lyon_point(to.handle_in.unwrap_or(to.point)),
            to: lyon_point(to.point),
        };
        for p in curve.flattened(tolerance.max(EPSILON)) {
            out.push(Point::new(p.x, p.y));
        }
        // flattening may land a hair off the true end point
        if let Some(last) = out.last_mut() {
            *last = to.point;
        }
    };

    for pair in segments.windows(2) {
        push_span(&pair[0], &pair[1], &mut out);
    }
    if closed && segments.len() > 1 {
        if let Some(last) = segments.last() {
            push_span(last, first, &mut out);
        }
        if out.len() > 1 && out[out.len() - 1].distance_to(&out[0]) <= EPSILON {
            out.pop();
        }
    }

    out.dedup_by(|a, b| a.distance_to(b) <= EPSILON);
    out
}

fn lyon_point(p: Point) -> lyon::geom::Point<f64> {
    point(p.x, p.y)
}

/// Result of intersecting two finite line segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    pub point: Point,
    /// Parameter along the first segment, in `[0, 1]`.
    pub t: f64,
    /// Parameter along the second segment, in `[0, 1]`.
    pub u: f64,
}

/// Intersect segment `a0-a1` with `b0-b1`. Parallel segments never intersect.
pub fn segment_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<SegmentHit> {
    let r = a1 - a0;
    let s = b1 - b0;
    let denom = r.cross(&s);
    if denom.abs() <= EPSILON {
        return None;
    }
    let qp = b0 - a0;
    let t = qp.cross(&s) / denom;
    let u = qp.cross(&r) / denom;
    let range = -EPSILON..=1.0 + EPSILON;
    if range.contains(&t) && range.contains(&u) {
        let t = t.clamp(0.0, 1.0);
        Some(SegmentHit {
            point: a0 + r * t,
            t,
            u: u.clamp(0.0, 1.0),
        })
    } else {
        None
    }
}

/// Closest point to `p` on segment `a-b`, with its parameter along the segment.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> (Point, f64) {
    let ab = b - a;
    let len_sq = ab.dot(&ab);
    if len_sq <= EPSILON * EPSILON {
        return (a, 0.0);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t, t)
}

pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    closest_point_on_segment(p, a, b).0.distance_to(&p)
}
