use autopaint_core::{Layer, PathRole, Point, ToolId, VectorPath};
use autopaint_fill::FillStrategy;

pub fn filled_rect(x: f64, y: f64, w: f64, h: f64, tool: ToolId) -> VectorPath {
    let mut p = VectorPath::from_points(
        "rect",
        vec![
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ],
        true,
    )
    .with_tool(Some(tool), PathRole::Fill);
    p.fill = Some(tool);
    p
}

/// Step until the working layer is empty; returns the number of steps taken.
pub fn run_to_end(strategy: &mut impl FillStrategy, working: &mut Layer, action: &mut Layer) -> usize {
    let mut steps = 0;
    while !working.is_empty() {
        strategy.fill_step(working, action);
        steps += 1;
        assert!(steps < 1_000_000, "fill did not terminate");
    }
    steps
}
