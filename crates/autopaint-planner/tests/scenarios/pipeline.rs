use autopaint_core::events::motions;
use autopaint_core::{
    Color, FillStrategyKind, MotionCommand, PlotEvent, PlotSettings, Point, Scene, SceneGroup,
    SceneItem, SceneNode, ToolId,
};
use autopaint_planner::{plot, Phase, PlotDriver};

fn artwork() -> Scene {
    let yellow: Color = "#ffff00".parse().unwrap();
    let blue: Color = "#0000ff".parse().unwrap();
    Scene::new(vec![
        SceneItem::polygon(
            "sun",
            &[
                Point::new(50.0, 50.0),
                Point::new(150.0, 50.0),
                Point::new(150.0, 150.0),
                Point::new(50.0, 150.0),
            ],
            true,
        )
        .fill(yellow)
        .stroke(Color::BLACK, 2.0)
        .into(),
        SceneNode::Group(SceneGroup {
            name: "sky".into(),
            children: vec![
                SceneItem::circle("cloud", Point::new(300.0, 100.0), 40.0)
                    .fill(blue)
                    .into(),
                SceneItem::polygon(
                    "horizon",
                    &[Point::new(0.0, 300.0), Point::new(500.0, 300.0)],
                    false,
                )
                .stroke(Color::BLACK, 1.0)
                .into(),
            ],
        }),
    ])
}

fn settings(kind: FillStrategyKind) -> PlotSettings {
    PlotSettings {
        fill_strategy: kind,
        fill_spacing: 8.0,
        pocket_tool_diameter: Some(8.0),
        ..PlotSettings::default()
    }
}

#[test]
fn test_every_strategy_completes() {
    for kind in [
        FillStrategyKind::Hatch,
        FillStrategyKind::Pocket,
        FillStrategyKind::Overlay,
    ] {
        let mut events: Vec<PlotEvent> = Vec::new();
        let phase = plot(&artwork(), settings(kind), &mut events).unwrap();
        assert_eq!(phase, Phase::Done, "{kind}");
        assert_eq!(events.last(), Some(&PlotEvent::Complete));
        assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);

        let commands = motions(&events);
        assert!(matches!(commands.first(), Some(MotionCommand::ToolChange { .. })));
        assert_eq!(commands.last(), Some(&MotionCommand::PenUp));
        for c in &commands {
            if let MotionCommand::MoveTo { x, y } = c {
                assert!(x.is_finite() && y.is_finite());
                assert!(*x >= -1.0 && *x <= 501.0 && *y >= -1.0 && *y <= 301.0);
            }
        }
    }
}

#[test]
fn test_tool_groups_follow_draw_order() {
    let mut driver = PlotDriver::new();
    let mut events: Vec<PlotEvent> = Vec::new();
    let settings = settings(FillStrategyKind::Hatch);
    let order = settings.palette.draw_order();
    driver.start(&artwork(), settings, &mut events).unwrap();
    driver.run_to_completion(&mut events);

    let changes: Vec<ToolId> = motions(&events)
        .into_iter()
        .filter_map(|c| match c {
            MotionCommand::ToolChange { tool } => Some(tool),
            _ => None,
        })
        .collect();
    // yellow, blue, black: one change each, lightest first
    assert_eq!(
        changes,
        vec![ToolId::Tool(3), ToolId::Tool(5), ToolId::Tool(0)]
    );
    let rank = |t: &ToolId| order.iter().position(|o| o == t).unwrap();
    assert!(changes.windows(2).all(|w| rank(&w[0]) < rank(&w[1])));

    let tools: Vec<ToolId> = driver
        .ordered_paths()
        .iter()
        .filter_map(|p| p.tool)
        .collect();
    assert!(tools.windows(2).all(|w| rank(&w[0]) <= rank(&w[1])));
}

#[test]
fn test_progress_is_rebased_per_phase() {
    let mut events: Vec<PlotEvent> = Vec::new();
    plot(&artwork(), settings(FillStrategyKind::Pocket), &mut events).unwrap();
    let totals: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            PlotEvent::Progress { total, .. } => Some(*total),
            _ => None,
        })
        .collect();
    // 3 traced paths, 2 pocketed fills, then the streamed polylines
    assert_eq!(totals.first(), Some(&3));
    assert!(totals.contains(&2));
    for e in &events {
        if let PlotEvent::Progress { completed, total } = e {
            assert!(completed <= total);
        }
    }
}
