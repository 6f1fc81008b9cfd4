//! Frame abstraction for drawing primitives
//!
//! Wraps a softbuffer-style ARGB pixel buffer so drawing code never indexes
//! the buffer directly. Everything is clipped to the frame (and the optional
//! clip rect).

use crate::layout::Rect;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). Returns an opaque color.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let mix = |shift: u32| {
        let b = ((bg >> shift) & 0xFF) as f32;
        let f = ((fg >> shift) & 0xFF) as f32;
        ((b * (1.0 - alpha) + f * alpha) as u32) << shift
    };
    0xFF000000 | mix(16) | mix(8) | mix(0)
}

/// Clipping rectangle in pixel coordinates (inclusive start, exclusive end).
#[derive(Clone, Copy, Debug)]
struct ClipRect {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

/// Pixel span of a rect after clipping
struct Span {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    clip: Option<ClipRect>,
}

impl<'a> Frame<'a> {
    /// Create a frame over `buffer`.
    ///
    /// A buffer shorter than width*height shrinks the usable height.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let height = if width > 0 && buffer.len() < width * height {
            buffer.len() / width
        } else {
            height
        };

        Self {
            buffer,
            width,
            height,
            clip: None,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Constrain subsequent drawing to `rect`
    pub fn set_clip(&mut self, rect: Rect) {
        let x0 = (rect.x.max(0.0) as usize).min(self.width);
        let y0 = (rect.y.max(0.0) as usize).min(self.height);
        let x1 = ((rect.x + rect.width).max(0.0) as usize).min(self.width);
        let y1 = ((rect.y + rect.height).max(0.0) as usize).min(self.height);
        self.clip = Some(ClipRect { x0, y0, x1, y1 });
    }

    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    fn bounds(&self) -> ClipRect {
        self.clip.unwrap_or(ClipRect {
            x0: 0,
            y0: 0,
            x1: self.width,
            y1: self.height,
        })
    }

    fn span(&self, rect: Rect) -> Span {
        let b = self.bounds();
        let x1 = ((rect.x + rect.width).max(0.0).ceil() as usize).min(b.x1);
        let y1 = ((rect.y + rect.height).max(0.0).ceil() as usize).min(b.y1);
        Span {
            x0: (rect.x.max(0.0) as usize).max(b.x0).min(x1),
            y0: (rect.y.max(0.0) as usize).max(b.y0).min(y1),
            x1,
            y1,
        }
    }

    /// Clear the entire buffer (ignores the clip rect)
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let s = self.span(rect);
        for y in s.y0..s.y1 {
            let row = y * self.width;
            self.buffer[row + s.x0..row + s.x1].fill(color);
        }
    }

    /// Fill a rectangle whose corners are rounded by `radius`.
    ///
    /// Corner pixels are blended by coverage, so edges are antialiased.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: u32) {
        let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        if radius < 0.5 {
            return self.fill_rect(rect, color);
        }

        let inner_left = rect.x + radius;
        let inner_right = rect.x + rect.width - radius;
        let inner_top = rect.y + radius;
        let inner_bottom = rect.y + rect.height - radius;

        let s = self.span(rect);
        for y in s.y0..s.y1 {
            let cy = y as f32 + 0.5;
            let dy = cy - cy.clamp(inner_top, inner_bottom);
            for x in s.x0..s.x1 {
                let cx = x as f32 + 0.5;
                let dx = cx - cx.clamp(inner_left, inner_right);
                let coverage = (radius - (dx * dx + dy * dy).sqrt() + 0.5).clamp(0.0, 1.0);
                let idx = y * self.width + x;
                if coverage >= 1.0 {
                    self.buffer[idx] = color | 0xFF000000;
                } else if coverage > 0.0 {
                    self.buffer[idx] = blend_colors(self.buffer[idx], color, coverage);
                }
            }
        }
    }

    /// Fill a rectangle, blending by the color's alpha byte
    pub fn blend_rect(&mut self, rect: Rect, color: u32) {
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            return self.fill_rect(rect, color);
        }

        let s = self.span(rect);
        for y in s.y0..s.y1 {
            let row = y * self.width;
            for x in s.x0..s.x1 {
                self.buffer[row + x] = blend_colors(self.buffer[row + x], color, alpha);
            }
        }
    }

    /// Blend an 8-bit coverage bitmap (e.g. a glyph) with its top-left at (x, y)
    pub fn blend_coverage(&mut self, x: f32, y: f32, bitmap_width: usize, bitmap: &[u8], color: u32) {
        if bitmap_width == 0 {
            return;
        }
        let b = self.bounds();
        for (row, line) in bitmap.chunks(bitmap_width).enumerate() {
            let py = (y + row as f32) as isize;
            if py < b.y0 as isize || py >= b.y1 as isize {
                continue;
            }
            for (col, &coverage) in line.iter().enumerate() {
                let px = (x + col as f32) as isize;
                if coverage == 0 || px < b.x0 as isize || px >= b.x1 as isize {
                    continue;
                }
                let idx = py as usize * self.width + px as usize;
                self.buffer[idx] = blend_colors(self.buffer[idx], color, coverage as f32 / 255.0);
            }
        }
    }

    /// Read a pixel (0 when out of bounds)
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }
}
