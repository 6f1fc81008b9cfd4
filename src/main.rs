//! chipfield demo: a token field over an address book, in a winit window

use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use chipfield::cli::CliArgs;
use chipfield::config::FieldConfig;
use chipfield::contacts::{self, ContactBook, ContactDelegate};
use chipfield::theme::{self, Theme};
use chipfield::view::text::FontPainter;
use chipfield::worker::SearchDispatcher;
use chipfield::TokenField;

mod runtime;

use runtime::App;

fn load_config(args: &CliArgs) -> Result<FieldConfig> {
    if let Some(path) = &args.config {
        return FieldConfig::load_from(path).map_err(anyhow::Error::msg);
    }
    let exists = chipfield::config_paths::config_file().is_some_and(|p| p.exists());
    Ok(if exists {
        FieldConfig::load()
    } else {
        contacts::demo_config()
    })
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    chipfield::tracing::init();

    let config = load_config(&args)?;

    let theme_id = args.theme.clone().unwrap_or_else(|| config.theme.clone());
    let theme = theme::load_theme(&theme_id).unwrap_or_else(|e| {
        tracing::warn!("Failed to load theme '{}': {}", theme_id, e);
        Theme::default()
    });

    let book = match &args.contacts {
        Some(path) => ContactBook::load_from(path).map_err(anyhow::Error::msg)?,
        None => ContactBook::load(),
    };

    let font_path = args
        .font_path()
        .context("No usable font found; pass one with --font PATH")?;
    let painter = Rc::new(
        FontPainter::from_file(&font_path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Loading font {}", font_path.display()))?,
    );

    let field = TokenField::new(config, ContactDelegate::default())
        .with_theme(theme)
        .with_metrics(painter.clone());
    let dispatcher = SearchDispatcher::new(Arc::new(book));

    let event_loop = EventLoop::new()?;
    let mut app = App::new(field, dispatcher, painter);

    event_loop.run_app(&mut app)?;

    Ok(())
}
