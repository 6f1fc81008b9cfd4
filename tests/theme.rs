use chipfield::theme::{
    list_available_themes, load_theme, Color, Theme, ThemeSource, BUILTIN_THEMES,
    DEFAULT_DARK_YAML, DEFAULT_LIGHT_YAML,
};

#[test]
fn test_color_from_hex_6() {
    let color = Color::from_hex("#3232FF").unwrap();
    assert_eq!(color, Color::rgb(0x32, 0x32, 0xFF));
}

#[test]
fn test_color_from_hex_8() {
    let color = Color::from_hex("#3232FF80").unwrap();
    assert_eq!(color.a, 0x80);
}

#[test]
fn test_color_from_hex_rejects_bad_input() {
    assert!(Color::from_hex("#12345").is_err());
    assert!(Color::from_hex("#GG0000").is_err());
}

#[test]
fn test_color_to_argb_u32() {
    assert_eq!(Color::rgb(0x1E, 0x1E, 0x1E).to_argb_u32(), 0xFF1E1E1E);
}

#[test]
fn test_darkened_scales_brightness() {
    let color = Color::rgb(0x32, 0x32, 0xFF).darkened(0.75);
    assert_eq!(color, Color::rgb(38, 38, 191));
    assert_eq!(Color::WHITE.darkened(2.0), Color::WHITE);
}

#[test]
fn test_builtin_yaml_parses() {
    let light = Theme::from_yaml(DEFAULT_LIGHT_YAML).unwrap();
    let dark = Theme::from_yaml(DEFAULT_DARK_YAML).unwrap();
    assert_eq!(light.name, "Default Light");
    assert_eq!(dark.name, "Default Dark");
    assert_eq!(dark.chip.selected_background, Some(Color::rgb(0x00, 0x7A, 0xCC)));
}

#[test]
fn test_every_builtin_loads_by_id() {
    for builtin in BUILTIN_THEMES {
        assert!(Theme::from_builtin(builtin.id).is_ok(), "{}", builtin.id);
    }
    assert!(Theme::from_builtin("no-such-theme").is_err());
}

#[test]
fn test_load_theme_falls_back_to_builtin() {
    let theme = load_theme("default-dark").unwrap();
    assert_eq!(theme.field.background, Color::rgb(0x1E, 0x1E, 0x1E));
}

#[test]
fn test_builtins_are_listed() {
    let themes = list_available_themes();
    for builtin in BUILTIN_THEMES {
        assert!(themes.iter().any(|t| t.id == builtin.id));
    }
    assert!(themes
        .iter()
        .any(|t| t.source == ThemeSource::Builtin && t.name == "Default Light"));
}

#[test]
fn test_optional_colors_default() {
    let yaml = r##"
version: 1
name: "Minimal"
ui:
  field:
    background: "#FFFFFF"
    foreground: "#000000"
    prompt: "#111111"
    placeholder: "#222222"
  chip:
    background: "#00FF00"
    foreground: "#000000"
"##;
    let theme = Theme::from_yaml(yaml).unwrap();
    assert_eq!(theme.field.cursor, Color::rgb(0x11, 0x11, 0x11));
    assert_eq!(theme.chip.selected_background, None);
    assert_eq!(theme.results.background, Color::WHITE);
}

#[test]
fn test_dark_ratio_out_of_range_is_rejected() {
    let yaml = DEFAULT_LIGHT_YAML.replace("dark_ratio: 0.75", "dark_ratio: 1.5");
    assert!(Theme::from_yaml(&yaml).is_err());
}

#[test]
fn test_token_appearance_follows_theme() {
    let theme = Theme::default_light();
    let appearance = theme.token_appearance(150.0);
    assert_eq!(appearance.background_color, theme.chip.background);
    assert_eq!(appearance.text_color, theme.chip.foreground);
    assert_eq!(appearance.max_width, 150.0);
    assert_eq!(
        appearance.colors(true).0,
        theme.chip.background.darkened(theme.chip.dark_ratio)
    );
}
