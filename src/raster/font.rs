//! Glyph generation for rasterization.
//!
//! Uses the Spleen bitmap font family. The 6×12 face matches one logical
//! text cell; the 12×24 face is used whenever the supersampling scale is
//! even, so a 2× export gets real high-resolution glyphs instead of
//! enlarged low-resolution ones.

use spleen_font::{FONT_6X12, FONT_12X24, PSF2Font};

/// Width of one text cell in logical pixels.
pub const CELL_WIDTH: usize = 6;
/// Height of one text cell in logical pixels.
pub const CELL_HEIGHT: usize = 12;

/// One of the embedded Spleen faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseFont {
    /// Spleen 6×12
    Small,
    /// Spleen 12×24
    Large,
}

impl BaseFont {
    pub fn char_width(&self) -> usize {
        match self {
            BaseFont::Small => 6,
            BaseFont::Large => 12,
        }
    }

    pub fn char_height(&self) -> usize {
        match self {
            BaseFont::Small => 12,
            BaseFont::Large => 24,
        }
    }

    fn data(&self) -> &'static [u8] {
        match self {
            BaseFont::Small => FONT_6X12,
            BaseFont::Large => FONT_12X24,
        }
    }
}

/// Face and magnification used to draw one logical cell at a device scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSet {
    pub font: BaseFont,
    /// Device pixels per glyph pixel.
    pub magnify: usize,
}

impl GlyphSet {
    /// Pick the face for a supersampling `scale` (at least 1).
    pub fn for_scale(scale: usize) -> Self {
        let scale = scale.max(1);
        if scale % 2 == 0 {
            Self {
                font: BaseFont::Large,
                magnify: scale / 2,
            }
        } else {
            Self {
                font: BaseFont::Small,
                magnify: scale,
            }
        }
    }
}

/// Generate a glyph bitmap for a character.
/// Returns a Vec<u8> where each byte is 0 (paper) or 1 (ink).
pub fn generate_glyph(font: BaseFont, ch: char) -> Vec<u8> {
    let w = font.char_width();
    let h = font.char_height();
    let mut glyph = vec![0u8; w * h];

    if ch.is_whitespace() || ch.is_control() {
        return glyph;
    }

    let mut spleen = PSF2Font::new(font.data()).expect("embedded Spleen font is valid");
    let utf8 = ch.to_string();

    if let Some(spleen_glyph) = spleen.glyph_for_utf8(utf8.as_bytes()) {
        for (row_y, row) in spleen_glyph.enumerate() {
            for (col_x, on) in row.enumerate() {
                if row_y < h && col_x < w {
                    glyph[row_y * w + col_x] = if on { 1 } else { 0 };
                }
            }
        }
    } else if let Some(fb) = fallback_glyph(ch, w, h) {
        glyph = fb;
    } else {
        draw_box(&mut glyph, w, h);
    }

    glyph
}

/// Draw a box outline in the glyph buffer.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}

/// Fill a rectangular region in a glyph buffer. Coordinates are clamped to bounds.
fn fill_rect(g: &mut [u8], stride: usize, x1: usize, y1: usize, x2: usize, y2: usize) {
    let h = g.len() / stride;
    for y in y1..y2.min(h) {
        for x in x1..x2.min(stride) {
            g[y * stride + x] = 1;
        }
    }
}

/// Procedurally draw glyphs the Spleen faces may lack.
/// Returns None if the character has no fallback, falling through to draw_box().
fn fallback_glyph(ch: char, w: usize, h: usize) -> Option<Vec<u8>> {
    let mut g = vec![0u8; w * h];
    let t = (w / 6).max(1);
    let cy = h / 2;

    match ch {
        '\u{20BD}' => { // ₽ ruble sign
            let x0 = w / 4;
            let x1 = w * 3 / 4;
            let top = h / 6;
            let mid = h / 2;
            let bottom = h * 5 / 6;
            let bar = mid + (bottom - mid) / 3;

            fill_rect(&mut g, w, x0, top, x0 + t, bottom);              // stem
            fill_rect(&mut g, w, x0, top, x1, top + t);                 // bowl top
            fill_rect(&mut g, w, x1 - t, top, x1, mid);                 // bowl side
            fill_rect(&mut g, w, x0.saturating_sub(t), mid - t, x1, mid); // bowl bottom
            fill_rect(&mut g, w, x0.saturating_sub(t), bar, x1 - t, bar + t); // crossbar
        }
        '\u{2500}' => { // ─
            fill_rect(&mut g, w, 0, cy.saturating_sub(t), w, cy);
        }
        '\u{2550}' => { // ═
            fill_rect(&mut g, w, 0, cy.saturating_sub(2 * t), w, cy.saturating_sub(t));
            fill_rect(&mut g, w, 0, cy + t, w, cy + 2 * t);
        }
        '\u{2502}' => { // │
            let cx = w / 2;
            fill_rect(&mut g, w, cx.saturating_sub(t), 0, cx, h);
        }
        _ => return None,
    }

    Some(g)
}
