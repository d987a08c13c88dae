use super::common::{filled_rect, run_to_end};
use autopaint_core::{Bounds, Layer, PathRole, PlotSettings, Point, ToolId};
use autopaint_fill::{FillStrategy, OverlayFill};

fn settings(align: bool) -> PlotSettings {
    PlotSettings {
        canvas_width: 200.0,
        canvas_height: 150.0,
        fill_spacing: 5.0,
        flatten_resolution: 2.0,
        overlay_align_to_path: align,
        ..PlotSettings::default()
    }
}

fn fill_square(align: bool) -> Layer {
    let mut overlay = OverlayFill::new();
    overlay.setup(&settings(align));
    let mut working = Layer::from(vec![filled_rect(80.0, 55.0, 40.0, 40.0, ToolId::Tool(4))]);
    let mut action = Layer::new();
    run_to_end(&mut overlay, &mut working, &mut action);
    assert_eq!(overlay.completed_steps(), overlay.step_max(1));
    action
}

fn assert_covers_square(action: &Layer) {
    assert!(!action.is_empty());
    let shape = Bounds::new(80.0, 55.0, 120.0, 95.0);
    let points: Vec<Point> = action.iter().flat_map(|p| p.points().copied()).collect();
    for p in &points {
        assert!(
            p.x >= shape.min_x - 1e-6
                && p.x <= shape.max_x + 1e-6
                && p.y >= shape.min_y - 1e-6
                && p.y <= shape.max_y + 1e-6,
            "{p:?} lies outside the shape"
        );
    }
    // every interior point is within one ring gap of the output
    let inner = Bounds::new(85.0, 60.0, 115.0, 90.0);
    let mut y = inner.min_y;
    while y <= inner.max_y {
        let mut x = inner.min_x;
        while x <= inner.max_x {
            let probe = Point::new(x, y);
            let nearest = points
                .iter()
                .map(|p| p.distance_to(&probe))
                .fold(f64::INFINITY, f64::min);
            assert!(nearest <= 5.0, "{probe:?} is {nearest} from the fill");
            x += 2.5;
        }
        y += 2.5;
    }
    for poly in action.iter() {
        assert_eq!(poly.tool, Some(ToolId::Tool(4)));
        assert_eq!(poly.role, PathRole::Fill);
        assert!(!poly.is_closed());
    }
}

#[test]
fn test_aligned_spiral_covers_square() {
    let action = fill_square(true);
    assert_covers_square(&action);
}

#[test]
fn test_view_centered_spiral_covers_square() {
    let action = fill_square(false);
    assert_covers_square(&action);
}
