use super::common::{filled_rect, run_to_end};
use autopaint_core::{Layer, PathRole, PlotSettings, Point, ToolId};
use autopaint_fill::{FillStrategy, HatchFill};
use proptest::prelude::*;

fn settings(angle: f64) -> PlotSettings {
    PlotSettings {
        fill_spacing: 10.0,
        fill_angle: angle,
        fill_threshold: 15.0,
        ..PlotSettings::default()
    }
}

#[test]
fn test_square_becomes_single_chain() {
    let mut hatch = HatchFill::new();
    hatch.setup(&settings(0.0));
    let mut working = Layer::from(vec![filled_rect(0.0, 0.0, 100.0, 100.0, ToolId::Tool(2))]);
    let mut action = Layer::new();

    let mut results = Vec::new();
    while !working.is_empty() {
        results.push(hatch.fill_step(&mut working, &mut action));
    }
    // 20 sweep lines, then one step per chord
    assert_eq!(results.len(), 30);
    assert!(results[..29].iter().all(|more| *more));
    assert!(!results[29]);
    assert_eq!(hatch.completed_steps(), hatch.step_max(1));

    assert_eq!(action.len(), 1);
    let chain = &action.paths()[0];
    assert_eq!(chain.tool, Some(ToolId::Tool(2)));
    assert_eq!(chain.role, PathRole::Fill);
    assert_eq!(chain.point_count(), 20);
    assert_eq!(chain.first_point(), Some(Point::new(0.0, 0.0)));
    assert_eq!(chain.last_point(), Some(Point::new(100.0, 90.0)));
}

#[test]
fn test_far_chords_start_new_chains() {
    let mut hatch = HatchFill::new();
    hatch.setup(&PlotSettings {
        fill_threshold: 5.0,
        ..settings(0.0)
    });
    let mut working = Layer::from(vec![filled_rect(0.0, 0.0, 100.0, 100.0, ToolId::Tool(1))]);
    let mut action = Layer::new();
    run_to_end(&mut hatch, &mut working, &mut action);
    assert_eq!(action.len(), 10);
    for chord in action.iter() {
        assert_eq!(chord.point_count(), 2);
    }
}

#[test]
fn test_background_fill_is_skipped() {
    let mut hatch = HatchFill::new();
    hatch.setup(&settings(0.0));
    let mut working = Layer::from(vec![filled_rect(0.0, 0.0, 50.0, 50.0, ToolId::Background)]);
    let mut action = Layer::new();
    assert!(!hatch.fill_step(&mut working, &mut action));
    assert!(working.is_empty());
    assert!(action.is_empty());
    assert_eq!(hatch.completed_steps(), 2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_hatch_output_stays_in_shape(
        w in 20.0f64..300.0,
        h in 20.0f64..300.0,
        angle in -180.0f64..180.0,
    ) {
        let mut hatch = HatchFill::new();
        hatch.setup(&settings(angle));
        let rect = filled_rect(100.0, 100.0, w, h, ToolId::Tool(0));
        let bounds = rect.bounds().unwrap();
        let mut working = Layer::from(vec![rect]);
        let mut action = Layer::new();
        run_to_end(&mut hatch, &mut working, &mut action);

        prop_assert!(hatch.completed_steps() <= hatch.step_max(1));
        for chain in action.iter() {
            prop_assert!(chain.point_count() >= 2);
            prop_assert!(chain.point_count() % 2 == 0);
            for p in chain.points() {
                prop_assert!(p.x >= bounds.min_x - 1e-6 && p.x <= bounds.max_x + 1e-6);
                prop_assert!(p.y >= bounds.min_y - 1e-6 && p.y <= bounds.max_y + 1e-6);
            }
        }
    }
}
