use autopaint_core::{Color, Palette, ToolId};
use proptest::prelude::*;

#[test]
fn test_default_palette_snaps_primaries() {
    let palette = Palette::default();
    assert_eq!(palette.snap(&Color::rgb(0, 0, 0)), ToolId::Tool(0));
    assert_eq!(palette.snap(&Color::rgb(220, 20, 30)), ToolId::Tool(1));
    assert_eq!(palette.snap(&Color::rgb(30, 80, 170)), ToolId::Tool(5));
    assert_eq!(palette.snap(&Color::rgb(255, 255, 255)), ToolId::Background);
}

proptest! {
    #[test]
    fn prop_snap_is_total_and_deterministic(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
        let palette = Palette::default();
        let c = Color::rgb(r, g, b);
        let id = palette.snap(&c);
        prop_assert_eq!(palette.snap(&c), id);
        match id {
            ToolId::Tool(i) => {
                prop_assert!(i < palette.tools.len());
                let d = palette.tools[i].color.distance(&c);
                for t in &palette.tools {
                    prop_assert!(d <= t.color.distance(&c));
                }
            }
            ToolId::Background => {
                let d = palette.background.distance(&c);
                for t in &palette.tools {
                    prop_assert!(d < t.color.distance(&c));
                }
            }
        }
    }
}
