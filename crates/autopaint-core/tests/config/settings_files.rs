use autopaint_core::{ConfigError, FillStrategyKind, PlotSettings};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("autopaint.toml");

    let mut settings = PlotSettings::default();
    settings.fill_strategy = FillStrategyKind::Pocket;
    settings.pocket_tool_diameter = Some(4.5);
    settings.palette.wash_tool = Some(5);
    settings.save_to_file(&path).unwrap();

    let loaded = PlotSettings::load_from_file(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("autopaint.json");

    let mut settings = PlotSettings::default();
    settings.fill_angle = 30.0;
    settings.overlay_align_to_path = false;
    settings.save_to_file(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"fillAngle\""));
    assert_eq!(PlotSettings::load_from_file(&path).unwrap(), settings);
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "fillSpacing = -3.0\n").unwrap();
    let err = PlotSettings::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::NonPositive { .. }));

    let path = dir.path().join("settings.yaml");
    fs::write(&path, "fillSpacing: 3").unwrap();
    assert!(matches!(
        PlotSettings::load_from_file(&path),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}
