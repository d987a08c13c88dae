use autopaint_core::{HitKind, HitOptions, Layer, Point, ToolId, VectorPath};
use proptest::prelude::*;

fn regular_polygon(name: &str, center: Point, radius: f64, sides: usize, filled: bool) -> VectorPath {
    let points = (0..sides)
        .map(|i| {
            let a = i as f64 * std::f64::consts::TAU / sides as f64;
            Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect();
    let mut p = VectorPath::from_points(name, points, true);
    if filled {
        p.fill = Some(ToolId::Tool(0));
    }
    p
}

fn stacked_layer() -> Layer {
    Layer::from(vec![
        regular_polygon("a", Point::new(50.0, 50.0), 40.0, 12, true),
        regular_polygon("b", Point::new(70.0, 50.0), 30.0, 7, false),
        regular_polygon("c", Point::new(40.0, 60.0), 20.0, 5, true),
    ])
}

#[test]
fn test_top_of_stack_shadows_lower_paths() {
    let layer = stacked_layer();
    let opts = HitOptions::new(4.0);
    let hit = layer.hit_test(&Point::new(40.0, 60.0), &opts).unwrap();
    assert_eq!(hit, autopaint_core::Hit { index: 2, kind: HitKind::Fill });

    // inside unfilled "b" but only "a" is filled there
    let hit = layer.hit_test(&Point::new(75.0, 50.0), &opts).unwrap();
    assert_eq!(hit.index, 0);
}

#[test]
fn test_fill_only_ignores_outlines() {
    let layer = Layer::from(vec![regular_polygon("b", Point::new(0.0, 0.0), 10.0, 6, false)]);
    assert!(layer
        .hit_test(&Point::new(10.0, 0.0), &HitOptions::fill_only())
        .is_none());
    assert!(layer
        .hit_test(&Point::new(10.0, 0.0), &HitOptions::new(1.0))
        .is_some());
}

proptest! {
    #[test]
    fn prop_hit_test_is_deterministic(x in -20.0f64..140.0, y in -20.0f64..140.0) {
        let layer = stacked_layer();
        let opts = HitOptions::new(6.0);
        let p = Point::new(x, y);
        let first = layer.hit_test(&p, &opts);
        for _ in 0..4 {
            prop_assert_eq!(layer.hit_test(&p, &opts), first);
        }
        let copy = layer.clone();
        prop_assert_eq!(copy.hit_test(&p, &opts), first);
    }
}
