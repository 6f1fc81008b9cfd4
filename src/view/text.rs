//! Text measurement and glyph painting
//!
//! Layout only needs [`TextMetrics`]; drawing goes through [`FontPainter`],
//! which rasterizes with fontdue and caches glyph bitmaps per (char, size).

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use fontdue::{Font, FontSettings, Metrics};

use super::frame::Frame;

pub type GlyphCacheKey = (char, u32);
pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Appended to titles cut at their chip's max width
pub const ELLIPSIS: &str = "\u{2026}";

/// Width/height measurement of a single line of text
pub trait TextMetrics {
    /// Advance width of `text` at `size` pixels
    fn text_width(&self, text: &str, size: f32) -> f32;

    /// Distance between baselines at `size` pixels
    fn line_height(&self, size: f32) -> f32;
}

/// Fixed-advance metrics for headless layout and tests
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMetrics {
    /// Advance of every char as a fraction of the font size
    pub advance: f32,
    /// Line height as a multiple of the font size
    pub line: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line: 1.25,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * self.advance * size
    }

    fn line_height(&self, size: f32) -> f32 {
        self.line * size
    }
}

/// Cut `text` so it fits in `max_width`, ending in an ellipsis when cut.
pub fn truncate_to_width<'a>(
    text: &'a str,
    max_width: f32,
    size: f32,
    metrics: &dyn TextMetrics,
) -> Cow<'a, str> {
    if metrics.text_width(text, size) <= max_width {
        return Cow::Borrowed(text);
    }

    let ellipsis_width = metrics.text_width(ELLIPSIS, size);
    if ellipsis_width > max_width {
        return Cow::Owned(String::new());
    }

    let mut end = 0;
    for (idx, _) in text.char_indices().rev() {
        if metrics.text_width(&text[..idx], size) + ellipsis_width <= max_width {
            end = idx;
            break;
        }
    }
    Cow::Owned(format!("{}{}", text[..end].trim_end(), ELLIPSIS))
}

/// Proportional font backed by fontdue.
///
/// Shared between the field (measuring) and the renderer (drawing), so the
/// glyph cache sits behind a `RefCell`.
pub struct FontPainter {
    font: Font,
    glyph_cache: RefCell<GlyphCache>,
}

impl FontPainter {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| format!("Failed to load font: {}", e))?;
        Ok(Self {
            font,
            glyph_cache: RefCell::new(HashMap::new()),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let bytes = std::fs::read(path)
            .map_err(|e| format!("Failed to read font {}: {}", path.display(), e))?;
        Self::from_bytes(&bytes)
    }

    /// Distance from the top of a line to its baseline
    pub fn ascent(&self, size: f32) -> f32 {
        self.font
            .horizontal_line_metrics(size)
            .map(|m| m.ascent)
            .unwrap_or(size * 0.8)
    }

    /// Draw `text` with its line top at (x, y)
    pub fn draw(&self, frame: &mut Frame, x: f32, y: f32, text: &str, size: f32, color: u32) {
        let baseline = y + self.ascent(size);
        let mut current_x = x;
        let mut cache = self.glyph_cache.borrow_mut();

        for ch in text.chars() {
            let key = (ch, size.to_bits());
            let (metrics, bitmap) = cache
                .entry(key)
                .or_insert_with(|| self.font.rasterize(ch, size));

            // fontdue convention: top = baseline - height - ymin
            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;
            let glyph_left = current_x + metrics.xmin as f32;
            frame.blend_coverage(glyph_left, glyph_top, metrics.width, bitmap, color);

            current_x += metrics.advance_width;
        }
    }
}

impl TextMetrics for FontPainter {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|ch| self.font.metrics(ch, size).advance_width)
            .sum()
    }

    fn line_height(&self, size: f32) -> f32 {
        self.font
            .horizontal_line_metrics(size)
            .map(|m| m.new_line_size)
            .unwrap_or(size * 1.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_width() {
        let m = MonospaceMetrics::default();
        assert_eq!(m.text_width("abcd", 10.0), 24.0);
        assert_eq!(m.text_width("", 10.0), 0.0);
    }

    #[test]
    fn test_truncate_fits_borrowed() {
        let m = MonospaceMetrics::default();
        let out = truncate_to_width("abc", 100.0, 10.0, &m);
        assert!(matches!(out, Cow::Borrowed("abc")));
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        let m = MonospaceMetrics::default();
        // 6px per char: 5 chars = 30px, room for 4 chars + ellipsis
        let out = truncate_to_width("abcdefghij", 30.0, 10.0, &m);
        assert_eq!(out, "abcd\u{2026}");
        assert!(m.text_width(&out, 10.0) <= 30.0);
    }

    #[test]
    fn test_truncate_too_narrow_for_ellipsis() {
        let m = MonospaceMetrics::default();
        assert_eq!(truncate_to_width("abc", 2.0, 10.0, &m), "");
    }

    #[test]
    fn test_truncate_multibyte() {
        let m = MonospaceMetrics::default();
        let out = truncate_to_width("ééééé", 18.0, 10.0, &m);
        assert_eq!(out, "éé\u{2026}");
    }
}
