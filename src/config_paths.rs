//! Where chipfield keeps its files
//!
//! Everything lives in one directory: `$XDG_CONFIG_HOME/chipfield` when that
//! variable is set, `~/.config/chipfield` otherwise, and `%APPDATA%\chipfield`
//! on Windows.
//!
//! ```text
//! chipfield/
//!   config.yaml      field options (FieldConfig)
//!   contacts.json    demo address book
//!   themes/          user theme YAML files
//!   logs/            daily rotated chipfield.log
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "chipfield";

#[cfg(not(target_os = "windows"))]
fn base_dir() -> Option<PathBuf> {
    match env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) if !xdg.is_empty() => Some(PathBuf::from(xdg)),
        _ => dirs::home_dir().map(|home| home.join(".config")),
    }
}

#[cfg(target_os = "windows")]
fn base_dir() -> Option<PathBuf> {
    env::var_os("APPDATA").map(PathBuf::from)
}

/// The chipfield config directory (not created)
pub fn config_dir() -> Option<PathBuf> {
    base_dir().map(|base| base.join(APP_DIR))
}

fn entry(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(name))
}

pub fn config_file() -> Option<PathBuf> {
    entry("config.yaml")
}

/// Address book read by the demo when `--contacts` is not given
pub fn contacts_file() -> Option<PathBuf> {
    entry("contacts.json")
}

pub fn themes_dir() -> Option<PathBuf> {
    entry("themes")
}

pub fn logs_dir() -> Option<PathBuf> {
    entry("logs")
}

/// Create the logs directory (and its parents) and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    fs::create_dir_all(&logs)
        .map_err(|e| format!("Failed to create directory {}: {}", logs.display(), e))?;
    Ok(logs)
}
