use autopaint_core::{Color, Layer, PlotSettings, Point, Scene, SceneItem, ToolId};
use autopaint_planner::{FlatScene, StrokeTracer};

const BOTTOM: Point = Point { x: 100.0, y: 100.0 };
const TOP: Point = Point { x: 150.0, y: 100.0 };
const RADIUS: f64 = 50.0;

fn traced() -> (Layer, Vec<Point>) {
    let scene = Scene::new(vec![
        SceneItem::circle("bottom", BOTTOM, RADIUS)
            .stroke(Color::BLACK, 1.0)
            .into(),
        SceneItem::circle("top", TOP, RADIUS)
            .stroke(Color::WHITE, 1.0)
            .fill(Color::WHITE)
            .into(),
    ]);
    let settings = PlotSettings {
        flatten_resolution: 5.0,
        ..PlotSettings::default()
    };
    let flat = FlatScene::new(&scene, &settings);
    let mut working = flat.trace_layer();
    let crossings = working.paths()[0].intersections(&working.paths()[1]);

    let mut tracer = StrokeTracer::new(&settings);
    let mut action = Layer::new();
    tracer.begin(working.len());
    while tracer.step(&mut working, &mut action) {}
    (action, crossings)
}

#[test]
fn test_hidden_arc_is_omitted() {
    let (action, _) = traced();
    // the paper-colored circle is never drawn
    assert_eq!(action.len(), 1);
    let arc = &action.paths()[0];
    assert_eq!(arc.tool, Some(ToolId::Tool(0)));
    for p in arc.points() {
        assert!(
            p.distance_to(&TOP) >= RADIUS - 0.5,
            "{p:?} lies inside the top circle"
        );
    }
}

#[test]
fn test_crossings_are_patched() {
    let (action, crossings) = traced();
    assert_eq!(crossings.len(), 2);
    let points: Vec<Point> = action.iter().flat_map(|p| p.points().copied()).collect();
    for crossing in &crossings {
        assert!((crossing.x - 125.0).abs() < 0.5);
        assert!(
            points.iter().any(|p| p.distance_to(crossing) < 1e-9),
            "no patch point at {crossing:?}"
        );
    }
}
