//! # IR Rasterizer
//!
//! Paints an IR [`Program`] onto a page bitmap and encodes it as an image.
//!
//! ## Architecture
//!
//! ```text
//! Program (IR) → Rasterizer → Bitmap → to_rgb() → JPEG / PNG bytes
//!                     ↓
//!               Process each Op:
//!               - Track style state (bold, align, size)
//!               - Render text with Spleen bitmap fonts
//!               - Fill rules across the content width
//!               - Frame the page
//! ```
//!
//! All layout is in logical pixels; `scale` is the supersampling factor
//! applied to every distance, so a 2× raster has four times the pixels of
//! a 1× raster with identical layout.
//!
//! The page is always opaque: ink (`#2C2C2C`) is composited over white.
//!
//! ## Example
//!
//! ```
//! use docflow::ir::{Op, Program};
//! use docflow::raster::{self, ImageFormat, PageGeometry};
//!
//! let mut program = Program::with_init();
//! program.push(Op::Text("Hello".into()));
//! program.push(Op::Newline);
//!
//! let bitmap = raster::rasterize(&program, &PageGeometry::default(), 2);
//! let jpeg = raster::encode(&bitmap, ImageFormat::Jpeg, 95).unwrap();
//! assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
//! ```

mod font;
mod text;

pub use font::{BaseFont, CELL_HEIGHT, CELL_WIDTH, GlyphSet, generate_glyph};

use image::{ImageEncoder, Rgb, RgbImage};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::ir::{Op, Program, StyleState};

/// Page background. JPEG has no alpha channel, so the page is always
/// painted fully opaque.
pub const BACKGROUND: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

/// Ink color for text, rules and the frame.
pub const INK: Rgb<u8> = Rgb([0x2C, 0x2C, 0x2C]);

/// Errors that can occur during rasterization.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Image encoding error: {0}")]
    Encode(String),
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossy, no alpha. The export format.
    #[default]
    Jpeg,
    /// Lossless; used for on-screen previews.
    Png,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

/// Sheet dimensions in logical pixels.
///
/// ```text
/// ├─ padding ─┼──── columns × 6 ────┼─ padding ─┤
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    /// Content width in text cells.
    pub columns: usize,
    /// Inner margin on every side.
    pub padding: usize,
    /// Minimum page height.
    pub min_height: usize,
    /// Frame thickness; 0 disables the frame.
    pub border: usize,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            columns: 80,
            padding: 32,
            min_height: 600,
            border: 1,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> usize {
        self.columns * CELL_WIDTH
    }

    pub fn page_width(&self) -> usize {
        self.content_width() + self.padding * 2
    }
}

/// A 1-bit page: each byte is 0 (paper) or 1 (ink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Bitmap {
    pub fn is_ink(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.data[y * self.width + x] != 0
    }

    /// Composite ink over the opaque background.
    pub fn to_rgb(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            if self.is_ink(x as usize, y as usize) {
                INK
            } else {
                BACKGROUND
            }
        })
    }
}

/// Render state tracking current style and position.
///
/// `x` is relative to the content area, `y` to the page top; both are in
/// device pixels.
#[derive(Debug, Clone, Default)]
struct RenderState {
    style: StyleState,
    x: usize,
    y: usize,
}

/// Rasterizer for IR programs.
pub struct Rasterizer {
    geometry: PageGeometry,
    scale: usize,
    glyphs: GlyphSet,
    /// Page width in device pixels
    width: usize,
    buffer: Vec<u8>,
    height: usize,
    state: RenderState,
    glyph_cache: HashMap<char, Vec<u8>>,
}

impl Rasterizer {
    /// Create a rasterizer for `geometry` at supersampling `scale` (≥ 1).
    pub fn new(geometry: PageGeometry, scale: usize) -> Self {
        let scale = scale.max(1);
        let width = geometry.page_width() * scale;
        let height = geometry.min_height * scale;

        Self {
            geometry,
            scale,
            glyphs: GlyphSet::for_scale(scale),
            width,
            buffer: vec![0u8; width * height],
            height,
            state: RenderState {
                y: geometry.padding * scale,
                ..Default::default()
            },
            glyph_cache: HashMap::new(),
        }
    }

    fn left(&self) -> usize {
        self.geometry.padding * self.scale
    }

    fn content_width(&self) -> usize {
        self.geometry.content_width() * self.scale
    }

    /// Ensure buffer has room for the given y position.
    fn ensure_height(&mut self, y: usize) {
        let needed_height = y + 1;
        if needed_height > self.height {
            let new_height = needed_height.max(self.height + 100 * self.scale);
            self.buffer.resize(self.width * new_height, 0);
            self.height = new_height;
        }
    }

    /// Set a pixel in page coordinates.
    fn set_pixel(&mut self, x: usize, y: usize) {
        if x >= self.width {
            return;
        }
        self.ensure_height(y);
        self.buffer[y * self.width + x] = 1;
    }

    /// Set a pixel in content coordinates, clipped to the content area.
    fn set_content_pixel(&mut self, x: usize, y: usize) {
        if x >= self.content_width() {
            return;
        }
        self.set_pixel(x + self.left(), y);
    }

    /// Paint the whole program and return the finished page.
    pub fn rasterize(mut self, program: &Program) -> Bitmap {
        for op in &program.ops {
            self.process_op(op);
        }
        self.finish()
    }

    fn process_op(&mut self, op: &Op) {
        match op {
            Op::Init => {
                self.state.style = StyleState::default();
                self.state.x = 0;
            }

            Op::SetAlign(align) => {
                self.state.style.alignment = *align;
            }

            Op::SetBold(enabled) => {
                self.state.style.bold = *enabled;
            }

            Op::SetSize(size) => {
                self.state.style.size = (*size).max(1);
            }

            Op::Text(text) => {
                self.render_text(text);
            }

            Op::Newline => {
                self.newline();
            }

            Op::Feed { px } => {
                self.state.y += *px as usize * self.scale;
                self.ensure_height(self.state.y);
            }

            Op::Rule { thickness } => {
                let rows = (*thickness).max(1) as usize * self.scale;
                let y = self.state.y;
                for dy in 0..rows {
                    for x in 0..self.content_width() {
                        self.set_content_pixel(x, y + dy);
                    }
                }
                self.state.y += rows;
                self.state.x = 0;
            }
        }
    }

    /// Final page height: content plus bottom padding, at least the minimum.
    fn page_height(&self) -> usize {
        let content = self.state.y + self.geometry.padding * self.scale;
        content.max(self.geometry.min_height * self.scale).max(1)
    }

    fn finish(mut self) -> Bitmap {
        let height = self.page_height();
        self.ensure_height(height - 1);
        self.buffer.truncate(self.width * height);
        self.height = height;

        let border = self.geometry.border * self.scale;
        for y in 0..height {
            for x in 0..self.width {
                let edge = x < border
                    || y < border
                    || x + border >= self.width
                    || y + border >= height;
                if edge {
                    self.buffer[y * self.width + x] = 1;
                }
            }
        }

        Bitmap {
            width: self.width,
            height,
            data: self.buffer,
        }
    }
}

/// Rasterize a program at supersampling `scale`.
pub fn rasterize(program: &Program, geometry: &PageGeometry, scale: usize) -> Bitmap {
    Rasterizer::new(*geometry, scale).rasterize(program)
}

/// Encode a bitmap. `quality` (1–100) applies to JPEG only.
pub fn encode(bitmap: &Bitmap, format: ImageFormat, quality: u8) -> Result<Vec<u8>, RasterError> {
    let img = bitmap.to_rgb();
    let mut bytes = Vec::new();

    match format {
        ImageFormat::Jpeg => {
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
            encoder
                .write_image(
                    img.as_raw(),
                    img.width(),
                    img.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e: image::ImageError| RasterError::Encode(e.to_string()))?;
        }
        ImageFormat::Png => {
            let encoder = image::codecs::png::PngEncoder::new(&mut bytes);
            encoder
                .write_image(
                    img.as_raw(),
                    img.width(),
                    img.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e: image::ImageError| RasterError::Encode(e.to_string()))?;
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Alignment;

    fn text_program(text: &str) -> Program {
        let mut program = Program::with_init();
        program.push(Op::Text(text.into()));
        program.push(Op::Newline);
        program
    }

    fn ink_in_rows(bitmap: &Bitmap, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>) -> usize {
        rows.flat_map(|y| cols.clone().map(move |x| (x, y)))
            .filter(|&(x, y)| bitmap.is_ink(x, y))
            .count()
    }

    #[test]
    fn test_page_dimensions() {
        let geometry = PageGeometry::default();
        assert_eq!(geometry.page_width(), 544);

        let one = rasterize(&Program::with_init(), &geometry, 1);
        assert_eq!((one.width, one.height), (544, 600));

        let two = rasterize(&Program::with_init(), &geometry, 2);
        assert_eq!((two.width, two.height), (1088, 1200));
    }

    #[test]
    fn test_empty_page_is_white_inside_frame() {
        let bitmap = rasterize(&Program::with_init(), &PageGeometry::default(), 2);
        assert!(bitmap.is_ink(0, 0));
        assert!(bitmap.is_ink(bitmap.width - 1, bitmap.height - 1));
        assert_eq!(ink_in_rows(&bitmap, 2..bitmap.height - 2, 2..bitmap.width - 2), 0);
    }

    #[test]
    fn test_without_border() {
        let geometry = PageGeometry { border: 0, ..PageGeometry::default() };
        let bitmap = rasterize(&Program::with_init(), &geometry, 1);
        assert!(bitmap.data.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_text_draws_ink_in_content_area() {
        let geometry = PageGeometry::default();
        let bitmap = rasterize(&text_program("Hello"), &geometry, 2);
        let top = geometry.padding * 2;
        let left = geometry.padding * 2;
        assert!(ink_in_rows(&bitmap, top..top + 24, left..left + 5 * 12) > 0);
        // nothing to the right of the five cells
        assert_eq!(ink_in_rows(&bitmap, top..top + 24, left + 5 * 12 + 2..left + 200), 0);
    }

    #[test]
    fn test_right_alignment() {
        let geometry = PageGeometry::default();
        let mut program = Program::with_init();
        program.push(Op::SetAlign(Alignment::Right));
        program.push(Op::Text("X".into()));
        program.push(Op::Newline);

        let bitmap = rasterize(&program, &geometry, 1);
        let top = geometry.padding;
        let right_edge = geometry.padding + geometry.content_width();
        assert!(ink_in_rows(&bitmap, top..top + 12, right_edge - 6..right_edge) > 0);
        assert_eq!(ink_in_rows(&bitmap, top..top + 12, geometry.padding..right_edge - 6), 0);
    }

    #[test]
    fn test_bold_adds_ink() {
        let geometry = PageGeometry::default();
        let plain = rasterize(&text_program("Total"), &geometry, 2);

        let mut program = Program::with_init();
        program.push(Op::SetBold(true));
        program.push(Op::Text("Total".into()));
        program.push(Op::Newline);
        let bold = rasterize(&program, &geometry, 2);

        let count = |b: &Bitmap| b.data.iter().filter(|&&p| p != 0).count();
        assert!(count(&bold) > count(&plain));
    }

    #[test]
    fn test_rule_spans_content_width() {
        let geometry = PageGeometry::default();
        let mut program = Program::with_init();
        program.push(Op::Rule { thickness: 2 });
        let bitmap = rasterize(&program, &geometry, 2);

        let y = geometry.padding * 2;
        let left = geometry.padding * 2;
        let right = left + geometry.content_width() * 2;
        assert!((left..right).all(|x| bitmap.is_ink(x, y) && bitmap.is_ink(x, y + 3)));
        assert!(!bitmap.is_ink(left - 1, y));
        assert!(!bitmap.is_ink(right, y));
    }

    #[test]
    fn test_long_content_grows_page() {
        let mut program = Program::with_init();
        for i in 0..80 {
            program.push(Op::Text(format!("line {}", i)));
            program.push(Op::Newline);
        }
        let bitmap = rasterize(&program, &PageGeometry::default(), 1);
        assert_eq!(bitmap.height, 32 + 80 * 12 + 32);
    }

    #[test]
    fn test_rgb_background_is_opaque_white() {
        let bitmap = rasterize(&text_program("Hi"), &PageGeometry::default(), 1);
        let img = bitmap.to_rgb();
        assert_eq!(*img.get_pixel(10, 10), BACKGROUND);
        assert_eq!(*img.get_pixel(0, 0), INK);
    }

    #[test]
    fn test_encode_jpeg_and_png() {
        let bitmap = rasterize(&text_program("Hi"), &PageGeometry::default(), 1);

        let jpeg = encode(&bitmap, ImageFormat::Jpeg, 95).unwrap();
        assert_eq!(&jpeg[..3], &[0xFF, 0xD8, 0xFF]);
        let decoded = image::load_from_memory(&jpeg).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (544, 600));
        let corner = decoded.get_pixel(20, 20);
        assert!(corner.0.iter().all(|&c| c > 245), "background not white: {:?}", corner);

        let png = encode(&bitmap, ImageFormat::Png, 0).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_image_format_names() {
        assert_eq!(ImageFormat::from_name("JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_name("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_name("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_name("gif"), None);
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::Png.content_type(), "image/png");
    }
}
