//! Theme system for the token field
//!
//! Provides YAML-based theming support with compile-time embedded themes
//! and user-defined themes from the config directory.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/chipfield/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

use crate::token::TokenAppearance;

// Embed theme YAML files at compile time
pub const DEFAULT_LIGHT_YAML: &str = include_str!("../themes/light.yaml");
pub const DEFAULT_DARK_YAML: &str = include_str!("../themes/dark.yaml");

/// Darken ratio used for selected chips when the theme does not set one
pub const DEFAULT_DARK_RATIO: f32 = 0.75;

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "default-light")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "default-light",
        yaml: DEFAULT_LIGHT_YAML,
    },
    BuiltinTheme {
        id: "default-dark",
        yaml: DEFAULT_DARK_YAML,
    },
];

/// Where the theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// User-defined theme in ~/.config/chipfield/themes/
    User,
    /// Built-in theme embedded in binary
    Builtin,
}

/// Information about an available theme
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    /// Stable identifier (e.g., "default-light", "my-custom-theme")
    pub id: String,
    /// Display name from YAML (e.g., "Default Light")
    pub name: String,
    /// Where this theme is loaded from
    pub source: ThemeSource,
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// List all available themes from all sources
///
/// User themes override builtins with the same id.
pub fn list_available_themes() -> Vec<ThemeInfo> {
    let mut themes = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    if let Some(user_dir) = crate::config_paths::themes_dir() {
        if let Ok(entries) = std::fs::read_dir(&user_dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                let path = entry.path();
                if path
                    .extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
                {
                    if let Some(id) = path.file_stem().and_then(|s| s.to_str()) {
                        if seen_ids.insert(id.to_string()) {
                            let name = from_file(&path)
                                .map(|t| t.name)
                                .unwrap_or_else(|_| id.to_string());
                            themes.push(ThemeInfo {
                                id: id.to_string(),
                                name,
                                source: ThemeSource::User,
                            });
                        }
                    }
                }
            }
        }
    }

    for builtin in BUILTIN_THEMES {
        if seen_ids.insert(builtin.id.to_string()) {
            let name = Theme::from_yaml(builtin.yaml)
                .map(|t| t.name)
                .unwrap_or_else(|_| builtin.id.to_string());
            themes.push(ThemeInfo {
                id: builtin.id.to_string(),
                name,
                source: ThemeSource::Builtin,
            });
        }
    }

    themes
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);

    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Scale HSB brightness by `ratio`, keeping hue, saturation and alpha.
    ///
    /// Brightness is the max channel, so scaling it with hue and saturation
    /// fixed scales every channel by the same factor.
    pub fn darkened(&self, ratio: f32) -> Self {
        let ratio = ratio.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * ratio).round() as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        match s.len() {
            6 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: 255,
            }),
            8 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: u8::from_str_radix(&s[6..8], 16).map_err(|e| e.to_string())?,
            }),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub ui: UiThemeData,
}

/// UI theme colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub field: FieldThemeData,
    pub chip: ChipThemeData,
    #[serde(default)]
    pub results: ResultsThemeData,
}

/// Input field colors
#[derive(Debug, Clone, Deserialize)]
pub struct FieldThemeData {
    pub background: String,
    pub foreground: String,
    pub prompt: String,
    pub placeholder: String,
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub border: Option<String>,
}

/// Chip colors
#[derive(Debug, Clone, Deserialize)]
pub struct ChipThemeData {
    pub background: String,
    pub foreground: String,
    #[serde(default)]
    pub selected_background: Option<String>,
    #[serde(default)]
    pub selected_foreground: Option<String>,
    #[serde(default)]
    pub dark_ratio: Option<f32>,
}

/// Search result panel colors (all optional)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResultsThemeData {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub foreground: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub separator: Option<String>,
    #[serde(default)]
    pub indicator: Option<String>,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub field: FieldTheme,
    pub chip: ChipTheme,
    pub results: ResultsTheme,
}

/// Field colors (resolved)
#[derive(Debug, Clone)]
pub struct FieldTheme {
    pub background: Color,
    pub foreground: Color,
    pub prompt: Color,
    pub placeholder: Color,
    pub cursor: Color,
    pub border: Color,
}

/// Chip colors (resolved)
#[derive(Debug, Clone)]
pub struct ChipTheme {
    pub background: Color,
    pub foreground: Color,
    /// Background of the selected chip; None = darken `background`
    pub selected_background: Option<Color>,
    /// Text color of the selected chip; None = `foreground`
    pub selected_foreground: Option<Color>,
    pub dark_ratio: f32,
}

/// Result panel colors (resolved)
#[derive(Debug, Clone)]
pub struct ResultsTheme {
    pub background: Color,
    pub foreground: Color,
    pub detail: Color,
    pub separator: Color,
    /// Busy indicator color
    pub indicator: Color,
}

impl ResultsTheme {
    pub fn default_light() -> Self {
        Self {
            background: Color::WHITE,
            foreground: Color::BLACK,
            detail: Color::rgb(0x80, 0x80, 0x80),
            separator: Color::rgb(0xE5, 0xE5, 0xEA),
            indicator: Color::rgb(0x00, 0x00, 0xFF),
        }
    }
}

fn parse_optional(value: &Option<String>) -> Result<Option<Color>, String> {
    value.as_ref().map(|s| Color::from_hex(s)).transpose()
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let field = &data.ui.field;
        let chip = &data.ui.chip;
        let results = &data.ui.results;
        let defaults = ResultsTheme::default_light();

        let prompt = Color::from_hex(&field.prompt)?;
        let dark_ratio = chip.dark_ratio.unwrap_or(DEFAULT_DARK_RATIO);
        if !(0.0..=1.0).contains(&dark_ratio) {
            return Err(format!("dark_ratio must be within 0..=1, got {}", dark_ratio));
        }

        Ok(Theme {
            name: data.name,
            field: FieldTheme {
                background: Color::from_hex(&field.background)?,
                foreground: Color::from_hex(&field.foreground)?,
                prompt,
                placeholder: Color::from_hex(&field.placeholder)?,
                cursor: parse_optional(&field.cursor)?.unwrap_or(prompt),
                border: parse_optional(&field.border)?.unwrap_or(Color::rgb(0xC8, 0xC8, 0xCC)),
            },
            chip: ChipTheme {
                background: Color::from_hex(&chip.background)?,
                foreground: Color::from_hex(&chip.foreground)?,
                selected_background: parse_optional(&chip.selected_background)?,
                selected_foreground: parse_optional(&chip.selected_foreground)?,
                dark_ratio,
            },
            results: ResultsTheme {
                background: parse_optional(&results.background)?.unwrap_or(defaults.background),
                foreground: parse_optional(&results.foreground)?.unwrap_or(defaults.foreground),
                detail: parse_optional(&results.detail)?.unwrap_or(defaults.detail),
                separator: parse_optional(&results.separator)?.unwrap_or(defaults.separator),
                indicator: parse_optional(&results.indicator)?.unwrap_or(defaults.indicator),
            },
        })
    }

    /// Default light theme (YAML-backed with Rust fallback)
    pub fn default_light() -> Self {
        match Theme::from_yaml(DEFAULT_LIGHT_YAML) {
            Ok(theme) => theme,
            Err(_) => Theme {
                name: "Default Light".to_string(),
                field: FieldTheme {
                    background: Color::WHITE,
                    foreground: Color::BLACK,
                    prompt: Color::rgb(0x80, 0x80, 0x80),
                    placeholder: Color::rgb(0x80, 0x80, 0x80),
                    cursor: Color::rgb(0x80, 0x80, 0x80),
                    border: Color::rgb(0xC8, 0xC8, 0xCC),
                },
                chip: ChipTheme {
                    background: Color::rgb(0x32, 0x32, 0xFF),
                    foreground: Color::WHITE,
                    selected_background: None,
                    selected_foreground: None,
                    dark_ratio: DEFAULT_DARK_RATIO,
                },
                results: ResultsTheme::default_light(),
            },
        }
    }

    /// Appearance given to new tokens created by the field
    pub fn token_appearance(&self, max_width: f32) -> TokenAppearance {
        TokenAppearance {
            text_color: self.chip.foreground,
            background_color: self.chip.background,
            selected_text_color: self.chip.selected_foreground,
            selected_background_color: self.chip.selected_background,
            dark_ratio: self.chip.dark_ratio,
            max_width,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_light()
    }
}
