use super::common::filled_rect;
use autopaint_core::{FillStrategyKind, Layer, PlotSettings, ToolId};
use autopaint_fill::{FillEngine, FillStrategy};

fn first_steps(engine: &mut FillEngine, settings: &PlotSettings, steps: usize) -> Layer {
    engine.setup(settings);
    let mut working = Layer::from(vec![filled_rect(20.0, 20.0, 60.0, 40.0, ToolId::Tool(1))]);
    let mut action = Layer::new();
    for _ in 0..steps {
        if !engine.fill_step(&mut working, &mut action) {
            break;
        }
    }
    action
}

#[test]
fn test_reset_then_setup_repeats_output() {
    let settings = PlotSettings {
        canvas_width: 100.0,
        canvas_height: 100.0,
        fill_spacing: 5.0,
        flatten_resolution: 2.0,
        pocket_tool_diameter: Some(5.0),
        ..PlotSettings::default()
    };
    for kind in [
        FillStrategyKind::Hatch,
        FillStrategyKind::Pocket,
        FillStrategyKind::Overlay,
    ] {
        let mut engine = FillEngine::new(kind);
        let first = first_steps(&mut engine, &settings, 40);
        let completed = engine.completed_steps();
        engine.reset();
        assert_eq!(engine.completed_steps(), 0);
        let second = first_steps(&mut engine, &settings, 40);
        assert_eq!(first, second, "{kind} output changed after reset");
        assert_eq!(completed, engine.completed_steps());
    }
}
