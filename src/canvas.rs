//! Canvas: a fixed-size, row-major pixel buffer.
//!
//! Pixel `(x, y)` lives at index `y * width + x`. The buffer always holds
//! exactly `width * height` pixels; anything that changes the dimensions
//! swaps in a freshly allocated buffer.
//!
//! Writes outside the canvas are silently dropped. Reads are checked and
//! report [`CanvasError::OutOfBounds`] instead.

use crate::basics::Point;
use crate::color::Pixel;
use crate::error::CanvasError;

/// In-memory RGB image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Canvas {
    width: usize,
    height: usize,
    buf: Vec<Pixel>,
}

impl Canvas {
    /// Allocate a `width x height` canvas filled with black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buf: vec![Pixel::BLACK; width * height],
        }
    }

    /// Allocate a canvas filled with `color`.
    pub fn filled(width: usize, height: usize, color: Pixel) -> Self {
        Self {
            width,
            height,
            buf: vec![color; width * height],
        }
    }

    /// Wrap a buffer already known to hold `width * height` pixels.
    pub(crate) fn from_parts(width: usize, height: usize, buf: Vec<Pixel>) -> Self {
        debug_assert_eq!(buf.len(), width * height);
        Self { width, height, buf }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The whole buffer in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.buf
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.buf
    }

    /// Row `y` as a slice of `width` pixels.
    ///
    /// # Panics
    /// If `y >= height`.
    pub fn row(&self, y: usize) -> &[Pixel] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        &self.buf[y * self.width..(y + 1) * self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [Pixel] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        &mut self.buf[y * self.width..(y + 1) * self.width]
    }

    /// Returns `true` if `(x, y)` addresses a pixel of this canvas.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.in_bounds(p.x, p.y)
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Write a pixel. Coordinates outside the canvas are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Pixel) {
        if self.in_bounds(x, y) {
            let i = self.index(x as usize, y as usize);
            self.buf[i] = color;
        }
    }

    /// Read a pixel, failing with `OutOfBounds` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Result<Pixel, CanvasError> {
        self.try_pixel(x, y).ok_or(CanvasError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    /// Read a pixel, returning `None` outside the canvas.
    #[inline]
    pub fn try_pixel(&self, x: i32, y: i32) -> Option<Pixel> {
        if self.in_bounds(x, y) {
            Some(self.buf[self.index(x as usize, y as usize)])
        } else {
            None
        }
    }

    /// Read a pixel with coordinates clamped to the nearest edge.
    ///
    /// # Panics
    /// If the canvas is empty.
    #[inline]
    pub(crate) fn pixel_clamped(&self, x: i64, y: i64) -> Pixel {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.buf[self.index(cx, cy)]
    }

    /// Overwrite every pixel with `color`.
    pub fn set_all_pixels(&mut self, color: Pixel) {
        self.buf.fill(color);
    }

    /// Plot every point of `points` that lies on the canvas.
    pub fn draw_points(&mut self, points: &[Point], color: Pixel) {
        for p in points {
            self.set_pixel(p.x, p.y, color);
        }
    }

    /// Per-channel arithmetic mean of all pixels (black for an empty canvas).
    pub fn average_color(&self) -> Pixel {
        if self.buf.is_empty() {
            return Pixel::BLACK;
        }
        let mut sum = Pixel::BLACK;
        for p in &self.buf {
            sum += *p;
        }
        sum / self.buf.len() as f64
    }

    /// Change the dimensions, discarding the old contents.
    pub fn resize(&mut self, width: usize, height: usize) {
        log::debug!(
            "resize canvas {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        self.width = width;
        self.height = height;
        self.buf = vec![Pixel::BLACK; width * height];
    }

    /// Replace the whole image. `buffer` must hold exactly `width * height`
    /// pixels.
    pub fn set_image(
        &mut self,
        buffer: Vec<Pixel>,
        width: usize,
        height: usize,
    ) -> Result<(), CanvasError> {
        let expected = width * height;
        if buffer.len() != expected {
            return Err(CanvasError::BufferSize {
                width,
                height,
                expected,
                actual: buffer.len(),
            });
        }
        self.width = width;
        self.height = height;
        self.buf = buffer;
        Ok(())
    }

    /// Consume the canvas and return its buffer.
    pub fn into_pixels(self) -> Vec<Pixel> {
        self.buf
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let c = Canvas::new(3, 2);
        assert_eq!(c.width(), 3);
        assert_eq!(c.height(), 2);
        assert_eq!(c.pixels().len(), 6);
        assert!(c.pixels().iter().all(|p| *p == Pixel::BLACK));
    }

    #[test]
    fn test_set_and_get() {
        let mut c = Canvas::new(4, 4);
        let red = Pixel::new(1.0, 0.0, 0.0);
        c.set_pixel(2, 1, red);
        assert_eq!(c.pixel(2, 1).unwrap(), red);
        assert_eq!(c.pixels()[1 * 4 + 2], red);
        assert_eq!(c.row(1)[2], red);
    }

    #[test]
    fn test_out_of_bounds_write_is_noop() {
        let mut c = Canvas::new(4, 4);
        let before = c.clone();
        c.set_pixel(-1, 0, Pixel::WHITE);
        c.set_pixel(4, 0, Pixel::WHITE);
        c.set_pixel(0, 4, Pixel::WHITE);
        c.set_pixel(0, -3, Pixel::WHITE);
        assert_eq!(c, before);
    }

    #[test]
    fn test_out_of_bounds_read_is_error() {
        let c = Canvas::new(4, 3);
        assert_eq!(
            c.pixel(4, 0),
            Err(CanvasError::OutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            })
        );
        assert!(c.pixel(0, 3).is_err());
        assert!(c.pixel(-1, -1).is_err());
        assert_eq!(c.try_pixel(0, 3), None);
        assert_eq!(c.try_pixel(3, 2), Some(Pixel::BLACK));
    }

    #[test]
    fn test_set_all_and_average() {
        let mut c = Canvas::new(2, 2);
        c.set_all_pixels(Pixel::new(0.5, 0.25, 1.0));
        assert_eq!(c.average_color(), Pixel::new(0.5, 0.25, 1.0));

        c.set_pixel(0, 0, Pixel::BLACK);
        let avg = c.average_color();
        assert!((avg.r - 0.375).abs() < 1e-12);
        assert!((avg.b - 0.75).abs() < 1e-12);
        assert_eq!(Canvas::default().average_color(), Pixel::BLACK);
    }

    #[test]
    fn test_equality_is_structural() {
        let a = Canvas::new(2, 3);
        let b = Canvas::new(3, 2);
        assert_ne!(a, b);
        let mut c = Canvas::new(2, 3);
        assert_eq!(a, c);
        c.set_pixel(1, 1, Pixel::WHITE);
        assert_ne!(a, c);
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut c = Canvas::filled(2, 2, Pixel::WHITE);
        c.resize(3, 1);
        assert_eq!(c.pixels().len(), 3);
        assert!(c.pixels().iter().all(|p| *p == Pixel::BLACK));
    }

    #[test]
    fn test_set_image_checks_length() {
        let mut c = Canvas::new(1, 1);
        assert!(c.set_image(vec![Pixel::WHITE; 5], 2, 3).is_err());
        assert_eq!(c.width(), 1);
        c.set_image(vec![Pixel::WHITE; 6], 2, 3).unwrap();
        assert_eq!(c.width(), 2);
        assert_eq!(c.height(), 3);
        assert_eq!(c.pixel(1, 2).unwrap(), Pixel::WHITE);
    }

    #[test]
    fn test_draw_points_skips_outside() {
        let mut c = Canvas::new(3, 3);
        c.draw_points(&[Point::new(0, 0), Point::new(5, 5), Point::new(2, 1)], Pixel::WHITE);
        assert_eq!(c.pixel(0, 0).unwrap(), Pixel::WHITE);
        assert_eq!(c.pixel(2, 1).unwrap(), Pixel::WHITE);
        assert_eq!(c.pixels().iter().filter(|p| **p == Pixel::WHITE).count(), 2);
    }

    #[test]
    fn test_pixel_clamped() {
        let mut c = Canvas::new(2, 2);
        c.set_pixel(1, 1, Pixel::WHITE);
        assert_eq!(c.pixel_clamped(10, 10), Pixel::WHITE);
        assert_eq!(c.pixel_clamped(-5, -5), Pixel::BLACK);
    }
}
