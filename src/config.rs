//! Token field configuration
//!
//! Stores field options in `~/.config/chipfield/config.yaml`. Every key is
//! optional; missing keys take the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Corner treatment of the field and its chips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStyle {
    #[default]
    Rounded,
    Squared,
}

/// How chips flow when they no longer fit on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    /// Wrap onto new lines, scrolling vertically past `max_height`
    #[default]
    Vertical,
    /// Single line, scrolling horizontally
    Horizontal,
}

/// Field configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Theme id (e.g., "default-light", "default-dark")
    pub theme: String,

    /// Text drawn before the first chip
    pub prompt_text: String,
    /// Shown when there are no tokens and no typed text
    pub placeholder: String,

    /// Font size of typed text and chip titles
    pub font_size: f32,
    pub placeholder_font_size: f32,

    /// Horizontal padding of a chip title
    pub padding_x: f32,
    /// Vertical padding of a chip title
    pub padding_y: f32,
    /// Horizontal margin between chips
    pub margin_x: f32,
    /// Vertical margin between chip rows
    pub margin_y: f32,
    /// Horizontal gap between the prompt and the first chip
    pub buffer_x: f32,
    /// The input moves to a new line when less width than this remains
    pub min_width_for_input: f32,

    /// Typing any of these converts the pending text into a token
    pub tokenizing_characters: Vec<String>,
    /// Joins token titles when the field is untokenized
    pub separator_text: String,
    /// Duration hosts should use for height animations
    pub animation_duration_ms: u64,
    /// Show the flattened title list instead of chips when focus is lost
    pub untokenize_on_end_editing: bool,

    /// Maximum number of tokens (None = unlimited)
    pub max_tokens: Option<usize>,
    /// Query length (in chars) needed to start a search; 0 searches on focus
    pub min_chars_to_search: usize,
    /// Keep objects that are already tokens in the result list
    pub display_already_tokenized: bool,
    pub sort_results_alphabetically: bool,
    /// When false, tokens can only come from picking search results
    pub add_token_from_text_input: bool,
    /// Backspace on empty input selects, then deletes, the last token
    pub delete_token_on_backspace: bool,
    pub hide_results_on_select: bool,

    /// Result panel width (None = field width)
    pub search_result_width: Option<f32>,
    pub search_result_height: f32,
    pub result_row_height: f32,

    /// Field height after which the chip area scrolls
    pub max_height: f32,
    /// Chip titles wider than this are truncated with an ellipsis
    pub token_max_width: f32,

    pub style: FieldStyle,
    pub direction: ScrollDirection,
    /// When false, edits and focus changes are ignored
    pub editable: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            theme: "default-light".to_string(),
            prompt_text: "To: ".to_string(),
            placeholder: String::new(),
            font_size: 16.0,
            placeholder_font_size: 14.0,
            padding_x: 10.0,
            padding_y: 2.0,
            margin_x: 5.0,
            margin_y: 5.0,
            buffer_x: 0.0,
            min_width_for_input: 50.0,
            tokenizing_characters: vec![".".to_string(), ",".to_string()],
            separator_text: ", ".to_string(),
            animation_duration_ms: 100,
            untokenize_on_end_editing: true,
            max_tokens: None,
            min_chars_to_search: 1,
            display_already_tokenized: false,
            sort_results_alphabetically: true,
            add_token_from_text_input: true,
            delete_token_on_backspace: true,
            hide_results_on_select: false,
            search_result_width: None,
            search_result_height: 200.0,
            result_row_height: 44.0,
            max_height: 120.0,
            token_max_width: 200.0,
            style: FieldStyle::Rounded,
            direction: ScrollDirection::Vertical,
            editable: true,
        }
    }
}

impl FieldConfig {
    /// Parse config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        Self::from_yaml(&content).map_err(|e| format!("{} ({})", e, path.display()))
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Whether `text` is exactly one of the tokenizing strings
    pub fn is_tokenizing(&self, text: &str) -> bool {
        self.tokenizing_characters.iter().any(|c| c == text)
    }
}
