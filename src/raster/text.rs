//! Text rendering for the rasterizer.

use super::Rasterizer;
use super::font::generate_glyph;
use crate::ir::Alignment;

impl Rasterizer {
    /// Width of one character in device pixels at the current size.
    fn char_width(&self) -> usize {
        self.glyphs.font.char_width() * self.glyphs.magnify * self.state.style.size as usize
    }

    /// Height of one text line in device pixels at the current size.
    pub(super) fn line_height(&self) -> usize {
        self.glyphs.font.char_height() * self.glyphs.magnify * self.state.style.size as usize
    }

    pub(super) fn newline(&mut self) {
        self.state.x = 0;
        self.state.y += self.line_height();
        self.ensure_height(self.state.y);
    }

    /// Render text with current style.
    pub(super) fn render_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let char_width = self.char_width();
        let line_height = self.line_height();
        let print_width = self.content_width();
        let chars: Vec<char> = text.chars().collect();

        // Alignment only applies at the start of a line
        if self.state.x == 0 {
            let text_width = chars.len() * char_width;
            let slack = print_width.saturating_sub(text_width);
            self.state.x = match self.state.style.alignment {
                Alignment::Left => 0,
                Alignment::Center => slack / 2,
                Alignment::Right => slack,
            };
        }

        self.ensure_height(self.state.y + line_height);

        for ch in chars {
            if ch == '\n' {
                self.newline();
                continue;
            }

            if self.state.x + char_width > print_width {
                self.newline();
                self.ensure_height(self.state.y + line_height);
            }

            self.render_char(ch);
            self.state.x += char_width;
        }
    }

    /// Render a single character at the current position.
    fn render_char(&mut self, ch: char) {
        let font = self.glyphs.font;
        let (w, h) = (font.char_width(), font.char_height());
        let mult = self.glyphs.magnify * self.state.style.size as usize;

        let glyph = self
            .glyph_cache
            .entry(ch)
            .or_insert_with(|| generate_glyph(font, ch))
            .clone();

        let base_x = self.state.x;
        let base_y = self.state.y;
        // Bold is a double strike shifted by one glyph pixel
        let strikes: &[usize] = if self.state.style.bold {
            &[0, self.glyphs.magnify]
        } else {
            &[0]
        };

        for gy in 0..h {
            for gx in 0..w {
                if glyph[gy * w + gx] == 0 {
                    continue;
                }
                for &offset in strikes {
                    for sy in 0..mult {
                        for sx in 0..mult {
                            let px = base_x + gx * mult + sx + offset;
                            let py = base_y + gy * mult + sy;
                            self.set_content_pixel(px, py);
                        }
                    }
                }
            }
        }
    }
}
