use super::common::{filled_rect, run_to_end};
use autopaint_core::{Bounds, Layer, PlotSettings, Point, ToolId, VectorPath};
use autopaint_fill::{FillStrategy, PocketFill};

fn pocket(diameter: f64) -> PocketFill {
    let mut pocket = PocketFill::new();
    pocket.setup(&PlotSettings {
        pocket_tool_diameter: Some(diameter),
        ..PlotSettings::default()
    });
    pocket
}

#[test]
fn test_fine_tool_traces_the_outline() {
    let pocket = pocket(0.01);
    let rings = pocket.rings(&filled_rect(0.0, 0.0, 10.0, 10.0, ToolId::Tool(0)));
    assert!(!rings.is_empty());
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ];
    for corner in corners {
        let nearest = rings[0]
            .iter()
            .map(|p| p.distance_to(&corner))
            .fold(f64::INFINITY, f64::min);
        assert!(nearest < 0.01, "corner {corner:?} is {nearest} away");
    }
}

#[test]
fn test_hole_is_kept_clear() {
    let outer = filled_rect(0.0, 0.0, 100.0, 100.0, ToolId::Tool(0));
    let hole = vec![
        Point::new(40.0, 40.0),
        Point::new(60.0, 40.0),
        Point::new(60.0, 60.0),
        Point::new(40.0, 60.0),
    ];
    let mut contours = outer.contours().to_vec();
    contours.push(autopaint_core::Contour::new(hole, true));
    let donut = outer.with_contours(contours);

    let pocket = pocket(4.0);
    let rings = pocket.rings(&donut);
    assert!(!rings.is_empty());
    let keep_out = Bounds::new(41.0, 41.0, 59.0, 59.0);
    for ring in &rings {
        for p in ring {
            assert!(!keep_out.contains(p), "ring enters the hole at {p:?}");
        }
    }
}

#[test]
fn test_every_path_is_consumed() {
    let mut pocket = pocket(6.0);
    let mut working = Layer::from(vec![
        filled_rect(0.0, 0.0, 30.0, 30.0, ToolId::Tool(0)),
        filled_rect(100.0, 0.0, 30.0, 30.0, ToolId::Tool(3)),
    ]);
    let mut action = Layer::new();
    let steps = run_to_end(&mut pocket, &mut working, &mut action);
    assert_eq!(steps, 2);
    assert_eq!(pocket.completed_steps(), pocket.step_max(2));
    let tools: Vec<_> = action.iter().map(|p: &VectorPath| p.tool).collect();
    assert!(tools.contains(&Some(ToolId::Tool(0))));
    assert!(tools.contains(&Some(ToolId::Tool(3))));
}
