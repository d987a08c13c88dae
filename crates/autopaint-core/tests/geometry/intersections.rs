use autopaint_core::{Point, VectorPath};
use proptest::prelude::*;

fn star(center: Point, outer: f64, inner: f64, spikes: usize) -> VectorPath {
    let points = (0..spikes * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = i as f64 * std::f64::consts::PI / spikes as f64;
            Point::new(center.x + r * a.cos(), center.y + r * a.sin())
        })
        .collect();
    VectorPath::from_points("star", points, true)
}

#[test]
fn test_square_scanlines_hit_each_side_once() {
    let sq = VectorPath::from_points(
        "sq",
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ],
        true,
    );
    for y in [0.0, 10.0, 55.5, 99.0] {
        let hits = sq.line_crossings(Point::new(0.0, y), 0.0);
        assert_eq!(hits.len(), 2, "y = {y}");
        assert_eq!(hits[0].x, 0.0);
        assert_eq!(hits[1].x, 100.0);
    }
    assert!(sq.line_crossings(Point::new(0.0, 100.0), 0.0).is_empty());
}

#[test]
fn test_segment_intersections_with_outline() {
    let s = star(Point::new(0.0, 0.0), 50.0, 20.0, 5);
    let hits = s.segment_intersections(Point::new(-100.0, 0.0), Point::new(100.0, 0.0));
    assert!(!hits.is_empty());
    for h in &hits {
        assert!(s.distance_to_outline(h) < 1e-6);
    }
}

proptest! {
    #[test]
    fn prop_line_crossings_are_even(
        cx in -50.0f64..50.0,
        cy in -50.0f64..50.0,
        outer in 10.0f64..80.0,
        ratio in 0.2f64..0.9,
        spikes in 3usize..9,
        ox in -100.0f64..100.0,
        oy in -100.0f64..100.0,
        angle in -180.0f64..180.0,
    ) {
        let s = star(Point::new(cx, cy), outer, outer * ratio, spikes);
        let hits = s.line_crossings(Point::new(ox, oy), angle);
        prop_assert_eq!(hits.len() % 2, 0);
    }

    #[test]
    fn prop_crossings_lie_on_outline(
        outer in 10.0f64..80.0,
        oy in -60.0f64..60.0,
        angle in -90.0f64..90.0,
    ) {
        let s = star(Point::new(0.0, 0.0), outer, outer / 2.0, 6);
        for h in s.line_crossings(Point::new(0.0, oy), angle) {
            prop_assert!(s.distance_to_outline(&h) < 1e-6);
        }
    }
}
