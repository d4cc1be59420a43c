use crate::{
    canvas::{Canvas, Color},
    error::{QuizError, Result},
};
use fontdue::{Font, FontSettings, Metrics};
use glam::IVec2;
use log::info;
use std::{collections::HashMap, fs, path::Path};

struct Glyph {
    metrics: Metrics,
    coverage: Vec<u8>,
}

/// A TrueType font rasterised at one pixel size, with glyphs cached on first use.
pub struct TextRenderer {
    font: Font,
    px: f32,
    ascent: f32,
    line_height: f32,
    glyphs: HashMap<char, Glyph>,
}

impl TextRenderer {
    pub fn load(path: &Path, px: f32) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| QuizError::Io(e, path.display().to_string()))?;
        let renderer = Self::from_bytes(&bytes, px)?;
        info!(
            "Loaded font {} at {px}px (line height {:.1})",
            path.display(),
            renderer.line_height
        );
        Ok(renderer)
    }

    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(QuizError::Font)?;
        let (ascent, line_height) = match font.horizontal_line_metrics(px) {
            Some(line) => (line.ascent, line.new_line_size),
            None => (px, px * 1.2),
        };

        Ok(Self {
            font,
            px,
            ascent,
            line_height,
            glyphs: HashMap::new(),
        })
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    fn glyph(&mut self, ch: char) -> &Glyph {
        let (font, px) = (&self.font, self.px);
        self.glyphs.entry(ch).or_insert_with(|| {
            let (metrics, coverage) = font.rasterize(ch, px);
            Glyph { metrics, coverage }
        })
    }

    /// Width in pixels of `text` on one line.
    pub fn measure(&mut self, text: &str) -> i32 {
        text.chars()
            .map(|ch| self.glyph(ch).metrics.advance_width)
            .sum::<f32>()
            .ceil() as i32
    }

    /// Draws one line of text with its top-left corner at `origin`.
    #[profiling::function]
    pub fn draw(&mut self, canvas: &mut Canvas, origin: IVec2, text: &str, color: Color) {
        let baseline = origin.y + self.ascent.round() as i32;
        let mut pen_x = origin.x as f32;

        for ch in text.chars() {
            let glyph = self.glyph(ch);
            let m = &glyph.metrics;
            let left = pen_x.round() as i32 + m.xmin;
            let top = baseline - m.height as i32 - m.ymin;

            for (row, line) in glyph.coverage.chunks(m.width.max(1)).enumerate() {
                for (col, &alpha) in line.iter().enumerate() {
                    canvas.blend_pixel(
                        IVec2::new(left + col as i32, top + row as i32),
                        color,
                        alpha,
                    );
                }
            }
            pen_x += m.advance_width;
        }
    }
}
