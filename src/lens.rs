//! Magnifying lens distortion.
//!
//! Each lens is a disk at a random canvas position. Every destination pixel
//! inside the disk is replaced by a source pixel pulled towards the lens
//! center, which magnifies the middle of the disk.
//!
//! The random source is supplied by the caller, so results are reproducible
//! with a seeded generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::Canvas;

// ============================================================================
// LensParams
// ============================================================================

/// Lens tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensParams {
    /// Lens radius is `canvas width / radius_divisor`.
    pub radius_divisor: i32,
    /// Index of refraction of the lens material.
    pub refractive_index: f64,
}

impl LensParams {
    pub fn new(radius_divisor: i32, refractive_index: f64) -> Self {
        Self {
            radius_divisor,
            refractive_index,
        }
    }

    /// Lens radius for a canvas of the given width. Zero when the divisor is
    /// not positive.
    pub fn radius_for(&self, width: usize) -> i32 {
        if self.radius_divisor <= 0 {
            return 0;
        }
        (width as i64 / self.radius_divisor as i64).min(i32::MAX as i64) as i32
    }
}

impl Default for LensParams {
    fn default() -> Self {
        Self {
            radius_divisor: 10,
            refractive_index: 1.5,
        }
    }
}

// ============================================================================
// Lens
// ============================================================================

/// A single lens at a fixed center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    pub xc: i32,
    pub yc: i32,
    pub radius: i32,
    refraction: f64,
}

impl Lens {
    pub fn new(xc: i32, yc: i32, radius: i32, refractive_index: f64) -> Self {
        Self {
            xc,
            yc,
            radius,
            refraction: Self::refraction_factor(refractive_index),
        }
    }

    /// `1 - sqrt(1 - (n - 1)^2) / n`
    pub fn refraction_factor(n: f64) -> f64 {
        1.0 - (1.0 - (n - 1.0).powi(2)).sqrt() / n
    }

    pub fn refraction(&self) -> f64 {
        self.refraction
    }

    /// True if the offset `(dx, dy)` from the center lies inside the disk.
    #[inline]
    pub fn contains(&self, dx: i32, dy: i32) -> bool {
        let (dx, dy, r) = (dx as i64, dy as i64, self.radius as i64);
        dx * dx + dy * dy <= r * r
    }

    /// Unclamped source position for the destination offset `(dx, dy)`.
    ///
    /// The source distance is `(dist / radius) * dist * refraction`, along
    /// the same direction as the destination offset.
    pub fn source(&self, dx: i32, dy: i32) -> (i64, i64) {
        let (fx, fy) = (dx as f64, dy as f64);
        let dist = (fx * fx + fy * fy).sqrt();
        let new_dist = dist / self.radius as f64 * dist * self.refraction();
        let theta = fy.atan2(fx);
        (
            (self.xc as f64 + new_dist * theta.cos()) as i64,
            (self.yc as f64 + new_dist * theta.sin()) as i64,
        )
    }

    /// Distort `canvas` in place.
    ///
    /// Sources are read from the live buffer, so pixels written earlier in
    /// the sweep can be picked up again.
    pub fn apply(&self, canvas: &mut Canvas) {
        if self.radius <= 0 || canvas.is_empty() {
            return;
        }
        let r = self.radius;
        for dy in -r..=r {
            for dx in -r..=r {
                if !self.contains(dx, dy) {
                    continue;
                }
                let (sx, sy) = self.source(dx, dy);
                let src = canvas.pixel_clamped(sx, sy);
                canvas.set_pixel(self.xc + dx, self.yc + dy, src);
            }
        }
    }
}

// ============================================================================
// Canvas drawing
// ============================================================================

impl Canvas {
    /// Apply `count` lenses at centers drawn uniformly from the canvas.
    pub fn apply_lens<R: Rng + ?Sized>(&mut self, count: usize, params: &LensParams, rng: &mut R) {
        if self.is_empty() {
            return;
        }
        let radius = params.radius_for(self.width());
        for _ in 0..count {
            let xc = rng.gen_range(0..self.width()) as i32;
            let yc = rng.gen_range(0..self.height()) as i32;
            log::debug!("lens at ({}, {}) radius {}", xc, yc, radius);
            Lens::new(xc, yc, radius, params.refractive_index).apply(self);
        }
    }

    /// [`Canvas::apply_lens`] with default parameters and a generator seeded
    /// from `seed`.
    pub fn apply_lens_seeded(&mut self, count: usize, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.apply_lens(count, &LensParams::default(), &mut rng);
    }
}

// ============================================================================
// Tests
// ============================================================================
