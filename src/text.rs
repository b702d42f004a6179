//! TrueType text rendering.
//!
//! Text is rendered into a standalone RGBA surface (black glyphs, coverage stored in
//! the alpha channel) which the composer then blits onto the canvas.

use crate::error::{LabelError, Result};
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::fs;
use std::path::Path;

/// Anything able to turn a string into a blendable text surface
pub trait TextRenderer {
    /// Render `text` in black on a transparent surface sized to the text extent.
    fn render(&self, text: &str) -> Result<RgbaImage>;
}

/// Renders text with a TrueType font at a fixed point size (72 dpi, so 1pt = 1px of em)
pub struct TrueTypeRenderer {
    font: Font<'static>,
    scale: Scale,
}

impl TrueTypeRenderer {
    /// Load a font file from disk
    pub fn load<P: AsRef<Path>>(path: P, size: f32) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)
            .map_err(|e| LabelError::FontLoadFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(data, size)
    }

    /// Build a renderer from in-memory font data
    pub fn from_bytes(data: Vec<u8>, size: f32) -> Result<Self> {
        if !(size.is_finite() && size > 0.0) {
            return Err(LabelError::FontInitFailed(format!(
                "invalid font size {}",
                size
            )));
        }
        let font = Font::try_from_vec(data).ok_or_else(|| {
            LabelError::FontInitFailed("data is not a valid TrueType font".to_string())
        })?;
        // rusttype scales by line height (ascent - descent), points size the em square
        let v_metrics = font.v_metrics_unscaled();
        let line_per_em = (v_metrics.ascent - v_metrics.descent) / font.units_per_em() as f32;
        Ok(Self {
            font,
            scale: Scale::uniform(size * line_per_em),
        })
    }
}

impl TextRenderer for TrueTypeRenderer {
    fn render(&self, text: &str) -> Result<RgbaImage> {
        let v_metrics = self.font.v_metrics(self.scale);
        let glyphs: Vec<_> = self
            .font
            .layout(text, self.scale, point(0.0, v_metrics.ascent))
            .collect();

        // Ink may overhang the pen advance on either side
        let advance = glyphs
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
            .ceil() as i32;
        let (min_x, max_x) = glyphs
            .iter()
            .filter_map(|g| g.pixel_bounding_box())
            .fold((0, advance), |(lo, hi), bb| (lo.min(bb.min.x), hi.max(bb.max.x)));
        let shift = -min_x;
        let width = (max_x - min_x).max(0) as u32;
        let height = (v_metrics.ascent - v_metrics.descent).ceil() as u32;
        if width == 0 || height == 0 {
            return Err(LabelError::CompositionFailed(format!(
                "text \"{}\" rendered to an empty surface",
                text
            )));
        }

        let mut surface = RgbaImage::new(width, height);
        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + shift + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let alpha = (coverage * 255.0).round().clamp(0.0, 255.0) as u8;
                // Overlapping glyph boxes keep the strongest coverage
                let current = surface.get_pixel(px as u32, py as u32)[3];
                surface.put_pixel(px as u32, py as u32, Rgba([0, 0, 0, alpha.max(current)]));
            });
        }
        Ok(surface)
    }
}
