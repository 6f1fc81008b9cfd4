//! Rendering of the token field
//!
//! [`render_field`] draws a field onto any [`Surface`]. The demo renders into
//! a softbuffer pixel buffer through [`FrameSurface`]; tests can record draw
//! calls with their own surface.

pub mod frame;
pub mod text;

use crate::config::FieldStyle;
use crate::delegate::TokenFieldDelegate;
use crate::field::{Presentation, TokenField};
use crate::layout::Rect;
use crate::theme::Color;

use frame::Frame;
use text::{truncate_to_width, FontPainter, TextMetrics};

/// Width of the text caret in pixels
pub const CARET_WIDTH: f32 = 2.0;

/// Corner radius of squared chips
pub const SQUARED_RADIUS: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size: f32,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(color: Color, size: f32) -> Self {
        Self {
            color,
            size,
            align: TextAlign::Left,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
}

/// Drawing primitives the field needs
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color);

    /// Draw one line of text vertically centered in `rect`
    fn draw_text(&mut self, rect: Rect, text: &str, style: TextStyle);

    /// Restrict drawing to `rect` (None = no restriction)
    fn set_clip(&mut self, _rect: Option<Rect>) {}
}

/// Draw the field, its chips and (when visible) the result panel
pub fn render_field<T, D, S>(surface: &mut S, field: &TokenField<T, D>)
where
    T: Clone,
    D: TokenFieldDelegate<T>,
    S: Surface + ?Sized,
{
    let theme = field.theme();
    let config = field.config();
    let layout = field.layout();
    let metrics = field.metrics();
    let size = config.font_size;

    surface.fill_rect(layout.bounds, theme.field.background);
    surface.fill_rect(
        Rect::new(layout.bounds.x, layout.bounds.bottom() - 1.0, layout.bounds.width, 1.0),
        theme.field.border,
    );

    surface.set_clip(Some(layout.bounds));

    if let Some(prompt) = layout.prompt {
        surface.draw_text(
            prompt,
            &config.prompt_text,
            TextStyle::new(theme.field.prompt, size),
        );
    }

    match field.presentation() {
        Presentation::Flattened(text) => {
            let shown = truncate_to_width(text, layout.input.width, size, metrics);
            surface.draw_text(
                layout.input,
                &shown,
                TextStyle::new(theme.field.foreground, size),
            );
        }
        Presentation::Tokens => {
            let radius = match config.style {
                FieldStyle::Rounded => layout.chip_height / 2.0,
                FieldStyle::Squared => SQUARED_RADIUS,
            };
            for slot in &layout.chips {
                let Some(token) = field.store().get(slot.id) else {
                    continue;
                };
                let (background, foreground) = token.colors();
                surface.fill_rounded_rect(slot.rect, radius, background);
                surface.draw_text(
                    slot.rect,
                    &slot.label,
                    TextStyle::new(foreground, size).centered(),
                );
            }

            let live = field.live_text();
            if field.tokens().is_empty() && live.is_empty() && !config.placeholder.is_empty() {
                surface.draw_text(
                    layout.input,
                    &config.placeholder,
                    TextStyle::new(theme.field.placeholder, config.placeholder_font_size),
                );
            }
            if !live.is_empty() {
                surface.draw_text(
                    layout.input,
                    live.as_str(),
                    TextStyle::new(theme.field.foreground, size),
                );
            }
            if field.is_focused() {
                let before: String = live.as_str().chars().take(live.caret()).collect();
                let x = layout.input.x + metrics.text_width(&before, size);
                let height = metrics.line_height(size);
                let y = layout.input.y + (layout.input.height - height) / 2.0;
                surface.fill_rect(Rect::new(x, y, CARET_WIDTH, height), theme.field.cursor);
            }
        }
    }

    surface.set_clip(None);

    if let Some(panel) = layout.results {
        render_results(surface, field, panel, metrics);
    }
}

fn render_results<T, D, S>(surface: &mut S, field: &TokenField<T, D>, panel: Rect, metrics: &dyn TextMetrics)
where
    T: Clone,
    D: TokenFieldDelegate<T>,
    S: Surface + ?Sized,
{
    let theme = &field.theme().results;
    let config = field.config();
    let row_height = config.result_row_height;
    let size = config.font_size;
    let detail_size = config.placeholder_font_size;

    surface.fill_rect(panel, theme.background);
    surface.set_clip(Some(panel));

    let rows = field.rows();
    if rows.is_empty() && field.is_busy() {
        let dot = size / 2.0;
        let rect = Rect::new(
            panel.x + (panel.width - dot) / 2.0,
            panel.y + (row_height - dot) / 2.0,
            dot,
            dot,
        );
        surface.fill_rounded_rect(rect, dot / 2.0, theme.indicator);
    }

    let inset = config.padding_x;
    for (i, row) in rows.iter().enumerate() {
        let y = panel.y + i as f32 * row_height;
        if y >= panel.bottom() {
            break;
        }
        let text_width = panel.width - 2.0 * inset;
        let title = truncate_to_width(&row.title, text_width, size, metrics);
        match &row.detail {
            Some(detail) => {
                let half = row_height / 2.0;
                surface.draw_text(
                    Rect::new(panel.x + inset, y, text_width, half),
                    &title,
                    TextStyle::new(theme.foreground, size),
                );
                let detail = truncate_to_width(detail, text_width, detail_size, metrics);
                surface.draw_text(
                    Rect::new(panel.x + inset, y + half, text_width, half),
                    &detail,
                    TextStyle::new(theme.detail, detail_size),
                );
            }
            None => {
                surface.draw_text(
                    Rect::new(panel.x + inset, y, text_width, row_height),
                    &title,
                    TextStyle::new(theme.foreground, size),
                );
            }
        }
        surface.fill_rect(
            Rect::new(panel.x + inset, y + row_height - 1.0, panel.width - inset, 1.0),
            theme.separator,
        );
    }

    surface.set_clip(None);
}

/// [`Surface`] over a pixel [`Frame`], drawing text with a [`FontPainter`]
pub struct FrameSurface<'a, 'b> {
    pub frame: Frame<'a>,
    pub painter: &'b FontPainter,
}

impl<'a, 'b> FrameSurface<'a, 'b> {
    pub fn new(frame: Frame<'a>, painter: &'b FontPainter) -> Self {
        Self { frame, painter }
    }
}

impl Surface for FrameSurface<'_, '_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.frame.blend_rect(rect, color.to_argb_u32());
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.frame.fill_rounded_rect(rect, radius, color.to_argb_u32());
    }

    fn draw_text(&mut self, rect: Rect, text: &str, style: TextStyle) {
        let width = self.painter.text_width(text, style.size);
        let height = self.painter.line_height(style.size);
        let x = match style.align {
            TextAlign::Left => rect.x,
            TextAlign::Center => rect.x + (rect.width - width) / 2.0,
        };
        let y = rect.y + (rect.height - height) / 2.0;
        self.painter
            .draw(&mut self.frame, x, y, text, style.size, style.color.to_argb_u32());
    }

    fn set_clip(&mut self, rect: Option<Rect>) {
        match rect {
            Some(rect) => self.frame.set_clip(rect),
            None => self.frame.clear_clip(),
        }
    }
}
