//! In-memory label canvas.
//!
//! The canvas is a 32-bit RGBA pixel buffer the composer draws onto. It implements the
//! `embedded-graphics` [`DrawTarget`] so primitives can be drawn through the usual
//! drawing API, and exposes an alpha-blending blit for pre-rendered surfaces.

use crate::error::LabelError;
use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use image::{imageops, Rgba, RgbaImage};

/// Label pixel buffer, white-filled by the composer before anything is drawn
pub struct Canvas {
    buffer: RgbaImage,
}

impl Canvas {
    /// Allocate a transparent canvas of the given dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, LabelError> {
        if width == 0 || height == 0 {
            return Err(LabelError::SurfaceAllocationFailed(format!(
                "invalid canvas size {}x{}",
                width, height
            )));
        }
        Ok(Self {
            buffer: RgbaImage::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Paint every pixel opaque white
    pub fn fill_white(&mut self) {
        self.clear(Rgb888::WHITE).ok();
    }

    /// Alpha-blend `surface` onto the canvas with its top-left corner at (x, y).
    ///
    /// Parts of the surface falling outside the canvas are clipped; a surface placed
    /// completely off-canvas draws nothing.
    pub fn blit(&mut self, surface: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.buffer, surface, x, y);
    }

    /// Read back one pixel, ignoring alpha
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.buffer
            .get_pixel_checked(x, y)
            .map(|p| Rgb888::new(p[0], p[1], p[2]))
    }

    /// Raw RGBA buffer
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.buffer
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.buffer.width(), self.buffer.height())
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.buffer.dimensions();
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < width && y < height {
                self.buffer
                    .put_pixel(x, y, Rgba([color.r(), color.g(), color.b(), 0xFF]));
            }
        }
        Ok(())
    }
}
