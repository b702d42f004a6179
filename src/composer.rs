//! # Label Composition
//!
//! Builds the label image in a fixed order: white background, static picture,
//! then the date and time lines horizontally centered on the canvas.
//!
//! The timestamp is passed in rather than read from the clock, so composing twice
//! with the same inputs yields byte-identical canvases.

use crate::canvas::Canvas;
use crate::config::{LayoutConfig, PictureConfig};
use crate::error::{LabelError, Result};
use crate::text::TextRenderer;
use chrono::NaiveDateTime;
use image::RgbaImage;
use log::debug;

/// Static picture placed on every label
pub struct Picture {
    image: RgbaImage,
    x: i64,
    y: i64,
}

impl Picture {
    /// Load the picture file named by the configuration (any format the `image` crate decodes)
    pub fn load(config: &PictureConfig) -> Result<Self> {
        let image = image::open(&config.path)
            .map_err(|e| {
                LabelError::PictureLoadFailed(format!("{}: {}", config.path.display(), e))
            })?
            .to_rgba8();
        Ok(Self::new(image, config.x, config.y))
    }

    pub fn new(image: RgbaImage, x: i64, y: i64) -> Self {
        Self { image, x, y }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// `DD/MM/YYYY`, zero padded
pub fn format_date(when: &NaiveDateTime) -> String {
    when.format("%d/%m/%Y").to_string()
}

/// `HH:MM:SS`, zero padded, 24-hour clock
pub fn format_time(when: &NaiveDateTime) -> String {
    when.format("%H:%M:%S").to_string()
}

/// Left edge of a line of text centered on the canvas, shifted by `offset`.
///
/// Uses integer division truncating toward zero, so text wider than the canvas
/// yields a negative position and gets clipped on both sides.
pub fn centered_x(canvas_width: u32, text_width: u32, offset: i32) -> i64 {
    (canvas_width as i64 - text_width as i64) / 2 + offset as i64
}

/// Allocate a canvas sized for the layout
pub fn new_canvas(layout: &LayoutConfig) -> Result<Canvas> {
    Canvas::new(layout.width, layout.height)
}

/// Compose one label onto `canvas`.
pub fn compose<R: TextRenderer + ?Sized>(
    mut canvas: Canvas,
    layout: &LayoutConfig,
    picture: Option<&Picture>,
    when: &NaiveDateTime,
    renderer: &R,
) -> Result<Canvas> {
    canvas.fill_white();

    if let Some(picture) = picture {
        canvas.blit(&picture.image, picture.x, picture.y);
    }

    draw_centered_line(
        &mut canvas,
        renderer,
        "date",
        &format_date(when),
        layout.date_y,
        layout.text_x_offset,
    )?;
    draw_centered_line(
        &mut canvas,
        renderer,
        "time",
        &format_time(when),
        layout.time_y,
        layout.text_x_offset,
    )?;

    Ok(canvas)
}

fn draw_centered_line<R: TextRenderer + ?Sized>(
    canvas: &mut Canvas,
    renderer: &R,
    what: &str,
    text: &str,
    y: i64,
    offset: i32,
) -> Result<()> {
    let surface = renderer.render(text).map_err(|e| {
        LabelError::CompositionFailed(format!("failed to render {} string surface ({})", what, e))
    })?;
    let x = centered_x(canvas.width(), surface.width(), offset);
    debug!(
        "Drawing {} \"{}\" ({}x{}) at ({}, {})",
        what,
        text,
        surface.width(),
        surface.height(),
        x,
        y
    );
    canvas.blit(&surface, x, y);
    Ok(())
}
