//! Chip flow layout
//!
//! Computes where the prompt, each chip, the text input and the result panel
//! go for a given width. Rects are absolute (the field origin and the scroll
//! offset are already applied); the renderer clips chips to `bounds`.

use crate::config::{FieldConfig, ScrollDirection};
use crate::token::{Token, TokenId};
use crate::view::text::{truncate_to_width, TextMetrics};

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Which end of the chip area stays in view when content overflows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAnchor {
    /// Scrolled to the top/left (after editing ends)
    Start,
    /// Scrolled so the input stays visible (while editing)
    #[default]
    End,
}

/// Everything layout needs to know about the field's current state
pub struct LayoutInput<'a, T> {
    pub config: &'a FieldConfig,
    pub tokens: &'a [Token<T>],
    pub live_text: &'a str,
    /// Flattened title list; chips are not laid out while this is shown
    pub flattened: Option<&'a str>,
    pub results_visible: bool,
    pub anchor: ScrollAnchor,
}

/// A placed chip with its (possibly truncated) label
#[derive(Debug, Clone, PartialEq)]
pub struct ChipSlot {
    pub id: TokenId,
    pub rect: Rect,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldLayout {
    /// Visible field area (excludes the result panel)
    pub bounds: Rect,
    pub prompt: Option<Rect>,
    pub chips: Vec<ChipSlot>,
    /// Live text area (also hosts the flattened text)
    pub input: Rect,
    pub chip_height: f32,
    pub content_width: f32,
    pub content_height: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub results: Option<Rect>,
}

impl FieldLayout {
    /// Lay out the field inside `area` (only its origin and width are used)
    pub fn compute<T>(input: &LayoutInput<'_, T>, area: Rect, metrics: &dyn TextMetrics) -> Self {
        let config = input.config;
        let width = area.width.max(0.0);
        let size = config.font_size;
        let chip_height = metrics.line_height(size) + 2.0 * config.padding_y;
        let vertical = config.direction == ScrollDirection::Vertical;

        let mut x = config.margin_x;
        let mut y = config.margin_y;

        let prompt = (!config.prompt_text.is_empty()).then(|| {
            let w = metrics.text_width(&config.prompt_text, size);
            let rect = Rect::new(x, y, w, chip_height);
            x += w + config.buffer_x;
            rect
        });
        let line_start = x;

        let mut chips = Vec::new();
        if input.flattened.is_none() {
            for token in input.tokens {
                let max_width = token.appearance.max_width.min(config.token_max_width);
                let label_width = (max_width - 2.0 * config.padding_x).max(0.0);
                let label = truncate_to_width(&token.title, label_width, size, metrics);
                let chip_width = metrics.text_width(&label, size) + 2.0 * config.padding_x;

                if vertical && x > line_start && x + chip_width + config.margin_x > width {
                    x = config.margin_x;
                    y += chip_height + config.margin_y;
                }

                chips.push(ChipSlot {
                    id: token.id(),
                    rect: Rect::new(x, y, chip_width, chip_height),
                    label: label.into_owned(),
                });
                x += chip_width + config.margin_x;
            }
        }

        let text = input.flattened.unwrap_or(input.live_text);
        let text_width = metrics.text_width(text, size);
        let input_rect = if vertical {
            if x > config.margin_x && width - x - config.margin_x < config.min_width_for_input {
                x = config.margin_x;
                y += chip_height + config.margin_y;
            }
            Rect::new(x, y, (width - x - config.margin_x).max(0.0), chip_height)
        } else {
            let w = config.min_width_for_input.max(text_width + size);
            Rect::new(x, y, w, chip_height)
        };

        let content_height = input_rect.bottom() + config.margin_y;
        let content_width = if vertical {
            width
        } else {
            input_rect.right() + config.margin_x
        };
        let field_height = content_height.min(config.max_height);

        let (scroll_x, scroll_y) = match input.anchor {
            ScrollAnchor::Start => (0.0, 0.0),
            ScrollAnchor::End => (
                (content_width - width).max(0.0),
                (content_height - field_height).max(0.0),
            ),
        };

        let place = |r: Rect| Rect::new(area.x + r.x - scroll_x, area.y + r.y - scroll_y, r.width, r.height);

        let bounds = Rect::new(area.x, area.y, width, field_height);
        let results = input.results_visible.then(|| {
            Rect::new(
                area.x,
                bounds.bottom(),
                config.search_result_width.unwrap_or(width),
                config.search_result_height,
            )
        });

        Self {
            bounds,
            prompt: prompt.map(place),
            chips: chips
                .into_iter()
                .map(|c| ChipSlot {
                    rect: place(c.rect),
                    ..c
                })
                .collect(),
            input: place(input_rect),
            chip_height,
            content_width,
            content_height,
            scroll_x,
            scroll_y,
            results,
        }
    }

    /// Field plus result panel
    pub fn frame(&self) -> Rect {
        let height = self.bounds.height + self.results.map_or(0.0, |r| r.height);
        let width = self
            .results
            .map_or(self.bounds.width, |r| r.width.max(self.bounds.width));
        Rect::new(self.bounds.x, self.bounds.y, width, height)
    }

    /// Chip under a point, if visible
    pub fn chip_at(&self, px: f32, py: f32) -> Option<TokenId> {
        if !self.bounds.contains(px, py) {
            return None;
        }
        self.chips
            .iter()
            .find(|c| c.rect.contains(px, py))
            .map(|c| c.id)
    }

    /// Result row under a point
    pub fn row_at(&self, px: f32, py: f32, row_height: f32, row_count: usize) -> Option<usize> {
        let panel = self.results?;
        if !panel.contains(px, py) || row_height <= 0.0 {
            return None;
        }
        let index = ((py - panel.y) / row_height) as usize;
        (index < row_count).then_some(index)
    }
}
