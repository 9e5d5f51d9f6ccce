//! In-memory render target for the simulator and renderer tests.
//!
//! A plain 240x240 `Rgb565` pixel buffer implementing `DrawTarget`. The
//! face renderer redraws every frame from scratch, so unlike a flush-
//! optimizing framebuffer there is no change tracking here; hosts that
//! need partial SPI flushes wrap their own buffer.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::face::DISPLAY_SIZE_PX;

/// Total number of pixels in the buffer (240 x 240 = 57,600).
const PIXEL_COUNT: usize = (DISPLAY_SIZE_PX * DISPLAY_SIZE_PX) as usize;

/// Heap-allocated `Rgb565` pixel buffer implementing `DrawTarget`.
pub struct FrameBuffer {
    pixels: Vec<Rgb565>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Allocate a new framebuffer filled with black pixels.
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; PIXEL_COUNT],
        }
    }

    /// Read one pixel. Out-of-bounds coordinates read as black.
    pub fn pixel(&self, x: i32, y: i32) -> Rgb565 {
        if !Self::in_bounds(x, y) {
            return Rgb565::BLACK;
        }
        self.pixels[y as usize * DISPLAY_SIZE_PX as usize + x as usize]
    }

    /// Raw pixel slice in row-major order, for bulk flushes.
    pub fn as_pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    fn in_bounds(x: i32, y: i32) -> bool {
        (0..DISPLAY_SIZE_PX as i32).contains(&x) && (0..DISPLAY_SIZE_PX as i32).contains(&y)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_SIZE_PX, DISPLAY_SIZE_PX)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Clip instead of erroring; primitives routinely overshoot
            // the panel edge.
            if Self::in_bounds(point.x, point.y) {
                self.pixels[point.y as usize * DISPLAY_SIZE_PX as usize + point.x as usize] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[test]
    fn test_starts_black() {
        let fb = FrameBuffer::new();
        assert_eq!(fb.pixel(0, 0), Rgb565::BLACK);
        assert_eq!(fb.pixel(239, 239), Rgb565::BLACK);
    }

    #[test]
    fn test_draw_and_clear() {
        let mut fb = FrameBuffer::new();
        Line::new(Point::new(0, 10), Point::new(239, 10))
            .into_styled(PrimitiveStyle::with_stroke(Rgb565::WHITE, 1))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.pixel(100, 10), Rgb565::WHITE);

        fb.clear(Rgb565::BLACK).unwrap();
        assert_eq!(fb.pixel(100, 10), Rgb565::BLACK);
    }

    #[test]
    fn test_out_of_bounds_pixels_are_clipped() {
        let mut fb = FrameBuffer::new();
        fb.draw_iter([Pixel(Point::new(-1, 300), Rgb565::WHITE)])
            .unwrap();
        assert_eq!(fb.pixel(-1, 300), Rgb565::BLACK);
    }
}
