use autopaint_core::{Color, PlotEvent, PlotSettings, Point, Scene, SceneItem, SceneNode};
use autopaint_planner::{Phase, PlotDriver};

fn big_square() -> Scene {
    Scene::new(vec![SceneItem::polygon(
        "square",
        &[
            Point::new(100.0, 100.0),
            Point::new(400.0, 100.0),
            Point::new(400.0, 400.0),
            Point::new(100.0, 400.0),
        ],
        true,
    )
    .fill(Color::BLACK)
    .into()])
}

#[test]
fn test_cancel_mid_filling() {
    let mut driver = PlotDriver::new();
    let mut events: Vec<PlotEvent> = Vec::new();
    driver
        .start(&big_square(), PlotSettings::default(), &mut events)
        .unwrap();
    while driver.phase() < Phase::Filling {
        driver.tick(&mut events);
    }
    driver.tick(&mut events);
    assert_eq!(driver.phase(), Phase::Filling);

    let token = driver.cancel_token();
    token.cancel();
    assert_eq!(driver.tick(&mut events), Phase::Canceled);

    assert!(driver.action_layer().is_empty());
    assert!(driver.ordered_paths().is_empty());
    let terminal: Vec<&PlotEvent> = events.iter().filter(|e| e.is_terminal()).collect();
    assert_eq!(terminal, vec![&PlotEvent::Canceled]);
    assert!(!events.iter().any(|e| matches!(e, PlotEvent::Motion { .. })));

    // a canceled driver stays put
    assert_eq!(driver.tick(&mut events), Phase::Canceled);
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
}

#[test]
fn test_cancel_before_first_tick() {
    let mut driver = PlotDriver::new();
    let mut events: Vec<PlotEvent> = Vec::new();
    driver
        .start(&big_square(), PlotSettings::default(), &mut events)
        .unwrap();
    driver.cancel();
    assert_eq!(driver.run_to_completion(&mut events), Phase::Canceled);
    assert_eq!(events.last(), Some(&PlotEvent::Canceled));
}

fn six_squares() -> Scene {
    let items: Vec<SceneNode> = (0..6)
        .map(|i| {
            let x = 20.0 + i as f64 * 60.0;
            SceneItem::polygon(
                format!("square {i}"),
                &[
                    Point::new(x, 20.0),
                    Point::new(x + 40.0, 20.0),
                    Point::new(x + 40.0, 60.0),
                    Point::new(x, 60.0),
                ],
                true,
            )
            .stroke(Color::BLACK, 1.0)
            .fill(Color::BLACK)
            .into()
        })
        .collect();
    Scene::new(items)
}

#[test]
fn test_cancel_mid_streaming() {
    let settings = PlotSettings {
        steps_per_tick: 1,
        ..PlotSettings::default()
    };
    let mut driver = PlotDriver::new();
    let mut events: Vec<PlotEvent> = Vec::new();
    driver.start(&six_squares(), settings, &mut events).unwrap();
    while driver.phase() < Phase::Streaming {
        driver.tick(&mut events);
    }
    assert!(driver.ordered_paths().len() > 2);
    driver.tick(&mut events);
    assert_eq!(driver.phase(), Phase::Streaming);

    driver.cancel();
    assert_eq!(driver.tick(&mut events), Phase::Canceled);
    assert!(!events.iter().any(|e| matches!(e, PlotEvent::Motion { .. })));
    assert_eq!(events.last(), Some(&PlotEvent::Canceled));
}

#[test]
fn test_motion_released_on_completion() {
    let mut driver = PlotDriver::new();
    let mut events: Vec<PlotEvent> = Vec::new();
    driver
        .start(&six_squares(), PlotSettings::default(), &mut events)
        .unwrap();
    assert_eq!(driver.run_to_completion(&mut events), Phase::Done);
    let first_motion = events
        .iter()
        .position(|e| matches!(e, PlotEvent::Motion { .. }))
        .unwrap();
    // every progress report precedes the released motion
    assert!(!events[first_motion..]
        .iter()
        .any(|e| matches!(e, PlotEvent::Progress { .. })));
    assert_eq!(events.last(), Some(&PlotEvent::Complete));
}
