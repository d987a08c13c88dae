use autopaint_core::{PathRole, Point, ToolId, VectorPath};
use autopaint_planner::{order_group, travel_distance};
use proptest::prelude::*;

fn segment(i: usize, a: Point, b: Point) -> VectorPath {
    VectorPath::from_points(format!("s{i}"), vec![a, b], false)
        .with_tool(Some(ToolId::Tool(0)), PathRole::Fill)
}

/// Short strokes on a grid, listed in a scrambled order.
fn scrambled_grid() -> Vec<VectorPath> {
    let mut paths = Vec::new();
    for k in 0..25 {
        // 7 is coprime with 25, so every cell appears once
        let cell = (k * 7) % 25;
        let x = (cell % 5) as f64 * 40.0;
        let y = (cell / 5) as f64 * 40.0;
        let (a, b) = if k % 2 == 0 {
            (Point::new(x, y), Point::new(x + 20.0, y))
        } else {
            (Point::new(x + 20.0, y), Point::new(x, y))
        };
        paths.push(segment(k, a, b));
    }
    paths
}

#[test]
fn test_greedy_beats_input_order() {
    let input = scrambled_grid();
    let before = travel_distance(&input, Point::ORIGIN);
    let ordered = order_group(input, Point::ORIGIN);
    let after = travel_distance(&ordered, Point::ORIGIN);
    assert_eq!(ordered.len(), 25);
    assert!(after <= before, "{after} > {before}");
}

proptest! {
    #[test]
    fn prop_every_polyline_used_once(
        ends in prop::collection::vec(
            ((0.0f64..500.0, 0.0f64..500.0), (0.0f64..500.0, 0.0f64..500.0)),
            1..40,
        )
    ) {
        let input: Vec<VectorPath> = ends
            .iter()
            .enumerate()
            .map(|(i, ((ax, ay), (bx, by)))| segment(i, Point::new(*ax, *ay), Point::new(*bx, *by)))
            .collect();
        let ordered = order_group(input.clone(), Point::ORIGIN);
        prop_assert_eq!(ordered.len(), input.len());

        let mut names: Vec<&str> = ordered.iter().map(|p| p.name.as_str()).collect();
        names.sort();
        names.dedup();
        prop_assert_eq!(names.len(), input.len());

        for path in &ordered {
            let original = input.iter().find(|p| p.name == path.name).unwrap();
            let same = path.first_point() == original.first_point();
            let flipped = path.first_point() == original.last_point()
                && path.last_point() == original.first_point();
            prop_assert!(same || flipped);
        }
    }
}
