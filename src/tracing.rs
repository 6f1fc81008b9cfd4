//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging token
//! and search state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=store=debug,search=debug` - scoped filtering
//! - `RUST_LOG=sync=trace` - every edit classification
//!
//! # Log Files
//!
//! Logs are written to `~/.config/chipfield/logs/chipfield.log` with daily
//! rotation. File logging uses debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::delegate::TokenFieldDelegate;
use crate::field::{Presentation, TokenField};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`); the file layer always
/// logs at debug level.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "chipfield.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of field state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    pub titles: Vec<String>,
    pub selected: Option<String>,
    pub live_text: String,
    pub flattened: bool,
    pub focused: bool,
    pub results_visible: bool,
    pub row_count: usize,
    pub busy: bool,
}

impl FieldSnapshot {
    pub fn from_field<T: Clone, D: TokenFieldDelegate<T>>(field: &TokenField<T, D>) -> Self {
        Self {
            titles: field.tokens().iter().map(|t| t.title.clone()).collect(),
            selected: field.selected_token().map(|t| t.title.clone()),
            live_text: field.text().to_string(),
            flattened: matches!(field.presentation(), Presentation::Flattened(_)),
            focused: field.is_focused(),
            results_visible: field.results_visible(),
            row_count: field.search().candidates().len(),
            busy: field.is_busy(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &FieldSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.titles != other.titles {
            changes.push(format!("tokens: {:?} → {:?}", self.titles, other.titles));
        }
        if self.selected != other.selected {
            changes.push(format!("selected: {:?} → {:?}", self.selected, other.selected));
        }
        if self.live_text != other.live_text {
            changes.push(format!("text: {:?} → {:?}", self.live_text, other.live_text));
        }
        if self.flattened != other.flattened {
            let mode = if other.flattened { "flattened" } else { "tokens" };
            changes.push(format!("presentation: {}", mode));
        }
        if self.focused != other.focused {
            changes.push(format!("focused: {}", other.focused));
        }
        if self.results_visible != other.results_visible {
            changes.push(format!("results visible: {}", other.results_visible));
        }
        if self.row_count != other.row_count {
            changes.push(format!("rows: {} → {}", self.row_count, other.row_count));
        }
        if self.busy != other.busy {
            changes.push(format!("busy: {}", other.busy));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
