//! Command-line argument parsing for the demo
//!
//! Supports:
//! - An explicit field config file
//! - An explicit contacts file
//! - A font file for rendering
//! - Overriding the theme

use clap::Parser;
use std::path::PathBuf;

/// Token field demo: type or pick email addresses
#[derive(Parser, Debug, Default)]
#[command(name = "chipfield", version, about = "Token field demo")]
pub struct CliArgs {
    /// Field config (YAML); defaults to ~/.config/chipfield/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Address book (JSON array of {name, email})
    #[arg(long, value_name = "PATH")]
    pub contacts: Option<PathBuf>,

    /// TrueType/OpenType font used to draw text
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Theme id (overrides the config's theme)
    #[arg(long, value_name = "ID")]
    pub theme: Option<String>,
}

/// Fonts tried when `--font` is not given
pub const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

impl CliArgs {
    /// Font to load: `--font`, else the first fallback that exists
    pub fn font_path(&self) -> Option<PathBuf> {
        self.font.clone().or_else(|| {
            FALLBACK_FONTS
                .iter()
                .map(PathBuf::from)
                .find(|p| p.exists())
        })
    }
}
