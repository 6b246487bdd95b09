//! Whole-image filters and resampling.
//!
//! Grayscale conversion, a fixed 3x3 Gaussian blur, bicubic upscaling with
//! a cubic convolution kernel, box downscaling and the supersampling
//! anti-alias composite built from those three.

use crate::canvas::Canvas;
use crate::color::Pixel;

/// Supersampling factor used by [`Canvas::anti_alias`].
pub const ANTI_ALIAS_FACTOR: usize = 4;

/// Normalized 3x3 Gaussian kernel, row-major.
pub const GAUSSIAN_3X3: [[f64; 3]; 3] = [
    [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
    [2.0 / 16.0, 4.0 / 16.0, 2.0 / 16.0],
    [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
];

// ============================================================================
// ImageFilterFunction trait
// ============================================================================

/// Filter shape function used for resampling.
pub trait ImageFilterFunction {
    /// The radius of the filter kernel.
    fn radius(&self) -> f64;
    /// Calculate the filter weight at distance `x` from center.
    fn calc_weight(&self, x: f64) -> f64;
}

/// Keys cubic convolution kernel.
///
/// `a = -0.5` gives Catmull-Rom; more negative values sharpen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicConvolution {
    pub a: f64,
}

impl CubicConvolution {
    pub fn new(a: f64) -> Self {
        Self { a }
    }
}

impl Default for CubicConvolution {
    fn default() -> Self {
        Self { a: -0.5 }
    }
}

impl ImageFilterFunction for CubicConvolution {
    fn radius(&self) -> f64 {
        2.0
    }

    fn calc_weight(&self, x: f64) -> f64 {
        let a = self.a;
        let d = x.abs();
        let d2 = d * d;
        let d3 = d2 * d;
        if d <= 1.0 {
            (a + 2.0) * d3 - (a + 3.0) * d2 + 1.0
        } else if d <= 2.0 {
            a * d3 - 5.0 * a * d2 + 8.0 * a * d - 4.0 * a
        } else {
            0.0
        }
    }
}

/// Sample `src` at the fractional position `(x, y)` from the 4x4
/// neighborhood around `floor(x, y)`. Coordinates outside the canvas are
/// clamped to the nearest edge and the result is clamped to `[0, 1]`.
///
/// `src` must not be empty.
pub fn bicubic_sample<F: ImageFilterFunction>(src: &Canvas, x: f64, y: f64, filter: &F) -> Pixel {
    let fx = x.floor() as i64;
    let fy = y.floor() as i64;
    let mut acc = Pixel::BLACK;
    for m in -1..=2 {
        let wy = filter.calc_weight(y - (fy + m) as f64);
        for n in -1..=2 {
            let w = filter.calc_weight(x - (fx + n) as f64) * wy;
            acc += src.pixel_clamped(fx + n, fy + m) * w;
        }
    }
    acc.clamped()
}

// ============================================================================
// Canvas filters
// ============================================================================

impl Canvas {
    /// Replace every non-gray pixel with its Rec. 601 luma.
    pub fn grayscale(&mut self) {
        for p in self.pixels_mut() {
            if !p.is_gray() {
                *p = Pixel::gray(p.luma());
            }
        }
    }

    /// Convolve the interior with [`GAUSSIAN_3X3`]. The one pixel border is
    /// left as is.
    pub fn gaussian_blur(&mut self) {
        let (w, h) = (self.width(), self.height());
        if w < 3 || h < 3 {
            return;
        }
        let src = self.pixels().to_vec();
        let dst = self.pixels_mut();
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let mut sum = Pixel::BLACK;
                for (ky, krow) in GAUSSIAN_3X3.iter().enumerate() {
                    let row = (y + ky - 1) * w;
                    for (kx, k) in krow.iter().enumerate() {
                        sum += src[row + x + kx - 1] * *k;
                    }
                }
                dst[y * w + x] = sum;
            }
        }
    }

    /// Enlarge by an integer factor with bicubic interpolation.
    ///
    /// Destination pixel `(x, y)` samples the source at `(x / scale,
    /// y / scale)`. A zero factor leaves the canvas unchanged.
    pub fn upscale(&mut self, scale: usize) {
        if scale == 0 {
            log::warn!("upscale by 0 ignored");
            return;
        }
        let filter = CubicConvolution::default();
        let (nw, nh) = (self.width() * scale, self.height() * scale);
        log::debug!(
            "upscale {}x{} -> {}x{}",
            self.width(),
            self.height(),
            nw,
            nh
        );

        let mut buf = Vec::with_capacity(nw * nh);
        let s = scale as f64;
        for y in 0..nh {
            for x in 0..nw {
                buf.push(bicubic_sample(self, x as f64 / s, y as f64 / s, &filter));
            }
        }
        *self = Canvas::from_parts(nw, nh, buf);
    }

    /// Shrink to `width x height` by averaging square blocks.
    ///
    /// The block size is `self.width() / width` (at least 1). Block reads
    /// past the source edge are clamped. Targets that do not divide the
    /// source evenly are accepted with a warning.
    pub fn downscale(&mut self, width: usize, height: usize) {
        log::debug!(
            "downscale {}x{} -> {}x{}",
            self.width(),
            self.height(),
            width,
            height
        );
        if width == 0 || height == 0 || self.is_empty() {
            *self = Canvas::new(width, height);
            return;
        }
        let scale = (self.width() / width).max(1);
        if self.width() != width * scale || self.height() != height * scale {
            log::warn!(
                "downscale {}x{} -> {}x{} is not an even {}x reduction",
                self.width(),
                self.height(),
                width,
                height,
                scale
            );
        }

        let count = (scale * scale) as f64;
        let mut buf = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let mut sum = Pixel::BLACK;
                for dy in 0..scale {
                    for dx in 0..scale {
                        let sx = (x * scale + dx) as i64;
                        let sy = (y * scale + dy) as i64;
                        sum += self.pixel_clamped(sx, sy);
                    }
                }
                buf.push(sum / count);
            }
        }
        *self = Canvas::from_parts(width, height, buf);
    }

    /// Supersampled smoothing: upscale by [`ANTI_ALIAS_FACTOR`], blur, and
    /// downscale back to the original size.
    pub fn anti_alias(&mut self) {
        let (w, h) = (self.width(), self.height());
        self.upscale(ANTI_ALIAS_FACTOR);
        self.gaussian_blur();
        self.downscale(w, h);
    }
}

// ============================================================================
// Tests
// ============================================================================
