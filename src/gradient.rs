//! Multi-stop linear gradient fill.
//!
//! Every pixel `(x, y)` is projected onto the direction `(cos a, sin a)`.
//! The projection range `[0, width * cos a + height * sin a]` is split into
//! `n - 1` equal segments and the pixel is interpolated between the two
//! stops bounding its segment.

use crate::basics::deg2rad;
use crate::canvas::Canvas;
use crate::color::Pixel;
use crate::error::GradientError;

/// Fewest stops a gradient accepts.
pub const MIN_GRADIENT_COLORS: usize = 2;
/// Most stops a gradient accepts.
pub const MAX_GRADIENT_COLORS: usize = 5;

// ============================================================================
// GradientLinear
// ============================================================================

/// Linear gradient over a fixed canvas size.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientLinear {
    colors: Vec<Pixel>,
    cos: f64,
    sin: f64,
    segment_length: f64,
}

impl GradientLinear {
    /// Build a gradient for a `width x height` canvas.
    pub fn new(
        colors: &[Pixel],
        angle_deg: f64,
        width: usize,
        height: usize,
    ) -> Result<Self, GradientError> {
        if !(MIN_GRADIENT_COLORS..=MAX_GRADIENT_COLORS).contains(&colors.len()) {
            return Err(GradientError::InvalidColorCount(colors.len()));
        }
        let a = deg2rad(angle_deg);
        let (cos, sin) = (a.cos(), a.sin());
        let max_projection = width as f64 * cos + height as f64 * sin;
        Ok(Self {
            colors: colors.to_vec(),
            cos,
            sin,
            segment_length: max_projection / (colors.len() - 1) as f64,
        })
    }

    #[inline]
    pub fn projection(&self, x: i32, y: i32) -> f64 {
        x as f64 * self.cos + y as f64 * self.sin
    }

    /// Color at `(x, y)`.
    ///
    /// Projections before the first stop or past the last one take the
    /// nearest stop. A zero-length projection range gives the first stop.
    pub fn color_at(&self, x: i32, y: i32) -> Pixel {
        if self.segment_length == 0.0 || !self.segment_length.is_finite() {
            return self.colors[0];
        }
        let last = self.colors.len() as i64 - 2;
        let p = self.projection(x, y);
        let idx = ((p / self.segment_length) as i64).clamp(0, last);
        let t = ((p - idx as f64 * self.segment_length) / self.segment_length).clamp(0.0, 1.0);
        let i = idx as usize;
        self.colors[i].gradient(&self.colors[i + 1], t)
    }
}

// ============================================================================
// Canvas drawing
// ============================================================================

impl Canvas {
    /// Overwrite the canvas with a linear gradient through `colors`.
    pub fn try_fill_gradient(&mut self, colors: &[Pixel], angle_deg: f64) -> Result<(), GradientError> {
        let g = GradientLinear::new(colors, angle_deg, self.width(), self.height())?;
        let w = self.width();
        for (i, p) in self.pixels_mut().iter_mut().enumerate() {
            *p = g.color_at((i % w) as i32, (i / w) as i32);
        }
        Ok(())
    }

    /// Like [`Canvas::try_fill_gradient`], but an invalid color count is
    /// logged and leaves the canvas untouched.
    pub fn fill_gradient(&mut self, colors: &[Pixel], angle_deg: f64) {
        if let Err(e) = self.try_fill_gradient(colors, angle_deg) {
            log::warn!("gradient not drawn: {}", e);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
