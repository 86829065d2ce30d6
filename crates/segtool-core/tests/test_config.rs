use segtool_core::compositor::ViewMode;
use segtool_core::config::SessionConfig;

#[test]
fn test_defaults() {
    let config = SessionConfig::default();
    assert_eq!(config.structuring_radius, 15);
    assert_eq!(config.brush_radius, 5);
    assert_eq!(config.zoom_rate, 0.99);
    assert_eq!(config.display_width, 1000);
    assert_eq!(config.display_height, 720);
    assert_eq!(config.view_mode, ViewMode::Blend);
}

#[test]
fn test_partial_toml_falls_back_to_defaults() {
    let config = SessionConfig::from_toml_str(
        r#"
        structuring_radius = 9
        view_mode = "Mask"
        "#,
    )
    .unwrap();

    assert_eq!(config.structuring_radius, 9);
    assert_eq!(config.view_mode, ViewMode::Mask);
    assert_eq!(config.brush_radius, 5);
    assert_eq!(config.display_width, 1000);
}

#[test]
fn test_invalid_toml_is_an_error() {
    assert!(SessionConfig::from_toml_str("structuring_radius = \"wide\"").is_err());
}
