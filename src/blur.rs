//! Separable Gaussian blur and the bloom effect built on it.
//!
//! The blur runs a normalized 1-D kernel horizontally into a scratch buffer
//! and then vertically back into the canvas. Samples past the edges are
//! clamped to the nearest edge pixel.
//!
//! Bloom blurs a bright-pass copy of the image and adds it back onto the
//! original, saturating each channel at 1.

use crate::canvas::Canvas;
use crate::color::Pixel;

// ============================================================================
// Kernel
// ============================================================================

/// Normalized Gaussian kernel of `round(6 * sigma) + 1` taps, cut down to
/// at most `max_len` taps.
///
/// Tap `i` sits at offset `i - len / 2`. A non-positive or non-finite sigma
/// gives the identity kernel `[1.0]`.
pub fn gaussian_kernel(sigma: f64, max_len: usize) -> Vec<f64> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return vec![1.0];
    }
    let taps = (sigma * 6.0).round() + 1.0;
    let size = if taps < max_len as f64 {
        taps as usize
    } else {
        max_len.max(1)
    };
    let half = (size / 2) as i64;
    let sigma2 = 2.0 * sigma * sigma;

    let mut kernel: Vec<f64> = (0..size as i64)
        .map(|i| {
            let x = (i - half) as f64;
            (-(x * x) / sigma2).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    for k in kernel.iter_mut() {
        *k /= sum;
    }
    kernel
}

/// Blur `canvas` in place with a separable Gaussian of the given sigma.
pub fn gaussian_blur_separable(canvas: &mut Canvas, sigma: f64) {
    let (w, h) = (canvas.width(), canvas.height());
    if w == 0 || h == 0 {
        return;
    }
    // Taps past the far edge only repeat the clamped edge pixel.
    let kernel = gaussian_kernel(sigma, 2 * w.max(h) + 1);
    let half = (kernel.len() / 2) as i64;

    // Horizontal pass
    let mut tmp = Vec::with_capacity(w * h);
    for y in 0..h {
        let row = canvas.row(y);
        for x in 0..w as i64 {
            let mut acc = Pixel::BLACK;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = (x + k as i64 - half).clamp(0, w as i64 - 1) as usize;
                acc += row[sx] * *weight;
            }
            tmp.push(acc);
        }
    }

    // Vertical pass
    let dst = canvas.pixels_mut();
    for y in 0..h as i64 {
        for x in 0..w {
            let mut acc = Pixel::BLACK;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = (y + k as i64 - half).clamp(0, h as i64 - 1) as usize;
                acc += tmp[sy * w + x] * *weight;
            }
            dst[y as usize * w + x] = acc;
        }
    }
}

// ============================================================================
// Bloom
// ============================================================================

/// Bloom tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomParams {
    /// Pixels with Rec. 709 luminance at or below this are not bright.
    pub threshold: f64,
    /// Standard deviation of the glow blur, in pixels.
    pub sigma: f64,
}

impl BloomParams {
    pub fn new(threshold: f64, sigma: f64) -> Self {
        Self { threshold, sigma }
    }
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            sigma: 2.0,
        }
    }
}

/// Glow around bright areas.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bloom {
    params: BloomParams,
}

impl Bloom {
    pub fn new(params: BloomParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BloomParams {
        &self.params
    }

    /// Copy of `src` with every pixel at or below the threshold set to black.
    pub fn bright_pass(&self, src: &Canvas) -> Canvas {
        let mut out = src.clone();
        for p in out.pixels_mut() {
            if p.luminance() <= self.params.threshold {
                *p = Pixel::BLACK;
            }
        }
        out
    }

    pub fn apply(&self, canvas: &mut Canvas) {
        let mut glow = self.bright_pass(canvas);
        gaussian_blur_separable(&mut glow, self.params().sigma);
        for (p, g) in canvas.pixels_mut().iter_mut().zip(glow.pixels()) {
            *p = (*p + *g).min_each(1.0);
        }
    }
}

impl Canvas {
    /// Add a blurred copy of the bright areas back onto the image.
    pub fn apply_bloom(&mut self, threshold: f64, sigma: f64) {
        Bloom::new(BloomParams::new(threshold, sigma)).apply(self);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_size_and_sum() {
        let k = gaussian_kernel(1.0, usize::MAX);
        assert_eq!(k.len(), 7);
        assert!((k.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        // Symmetric, peak in the middle
        for i in 0..3 {
            assert!((k[i] - k[6 - i]).abs() < 1e-15);
            assert!(k[i] < k[i + 1]);
        }
        assert_eq!(gaussian_kernel(0.5, usize::MAX).len(), 4);
    }

    #[test]
    fn test_kernel_degenerate_sigma() {
        assert_eq!(gaussian_kernel(0.0, 9), vec![1.0]);
        assert_eq!(gaussian_kernel(-2.0, 9), vec![1.0]);
        assert_eq!(gaussian_kernel(f64::NAN, 9), vec![1.0]);
        assert_eq!(gaussian_kernel(f64::INFINITY, 9), vec![1.0]);
        assert_eq!(gaussian_kernel(f64::NEG_INFINITY, 9), vec![1.0]);
    }

    #[test]
    fn test_kernel_length_capped() {
        let k = gaussian_kernel(1e10, 9);
        assert_eq!(k.len(), 9);
        assert!((k.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(gaussian_kernel(1.0, 3).len(), 3);
        assert_eq!(gaussian_kernel(1.0, 0).len(), 1);
    }

    #[test]
    fn test_bloom_extreme_sigma() {
        let mut c = Canvas::filled(4, 4, Pixel::WHITE);
        c.apply_bloom(0.5, f64::INFINITY);
        assert_eq!(c, Canvas::filled(4, 4, Pixel::WHITE));

        let mut c = Canvas::new(5, 3);
        c.set_pixel(2, 1, Pixel::WHITE);
        c.apply_bloom(0.5, 1e10);
        // Nearly a box blur over the whole image
        let corner = c.pixel(0, 0).unwrap();
        assert!(corner.r > 0.0 && corner.r < 1.0);
        assert_eq!(c.pixel(2, 1).unwrap(), Pixel::WHITE);
    }

    #[test]
    fn test_blur_uniform_stays_uniform() {
        let color = Pixel::new(0.25, 0.5, 0.75);
        let mut c = Canvas::filled(9, 7, color);
        gaussian_blur_separable(&mut c, 1.5);
        for p in c.pixels() {
            assert!((p.r - 0.25).abs() < 1e-12);
            assert!((p.g - 0.5).abs() < 1e-12);
            assert!((p.b - 0.75).abs() < 1e-12);
        }
    }

    #[test]
    fn test_blur_spreads_impulse() {
        let mut c = Canvas::new(15, 15);
        c.set_pixel(7, 7, Pixel::WHITE);
        gaussian_blur_separable(&mut c, 1.0);
        let center = c.pixel(7, 7).unwrap().r;
        let near = c.pixel(8, 7).unwrap().r;
        let far = c.pixel(10, 7).unwrap().r;
        assert!(center > near && near > far && far > 0.0);
        // Energy preserved away from the edges
        let total: f64 = c.pixels().iter().map(|p| p.r).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bright_pass() {
        let mut c = Canvas::new(2, 1);
        c.set_pixel(0, 0, Pixel::gray(0.4));
        c.set_pixel(1, 0, Pixel::gray(0.9));
        let bp = Bloom::new(BloomParams::new(0.5, 1.0)).bright_pass(&c);
        assert_eq!(bp.pixel(0, 0).unwrap(), Pixel::BLACK);
        assert_eq!(bp.pixel(1, 0).unwrap(), Pixel::gray(0.9));
    }

    #[test]
    fn test_bloom_params() {
        assert_eq!(Bloom::default().params(), &BloomParams::new(0.7, 2.0));
        let bloom = Bloom::new(BloomParams::new(0.3, 1.5));
        assert_eq!(bloom.params().threshold, 0.3);
        assert_eq!(bloom.params().sigma, 1.5);
    }

    #[test]
    fn test_bloom_below_threshold_is_noop() {
        let mut c = Canvas::filled(6, 6, Pixel::gray(0.2));
        let before = c.clone();
        c.apply_bloom(0.5, 1.0);
        assert_eq!(c, before);
    }

    #[test]
    fn test_bloom_adds_glow_and_saturates() {
        let mut c = Canvas::new(11, 11);
        c.set_pixel(5, 5, Pixel::WHITE);
        c.apply_bloom(0.5, 1.0);
        assert_eq!(c.pixel(5, 5).unwrap(), Pixel::WHITE);
        let glow = c.pixel(6, 5).unwrap();
        assert!(glow.r > 0.0 && glow.r < 1.0);
        assert!(c.pixels().iter().all(|p| p.r <= 1.0 && p.g <= 1.0 && p.b <= 1.0));
    }
}
