//! Bezier curve flattening (quadratic and cubic).
//!
//! Curves are sampled at `split` uniform parameter steps with repeated
//! linear interpolation and the samples are joined with Bresenham lines.
//!
//! The two flatteners deliberately differ in coverage:
//!
//! - [`Curve3`] samples `t = 0, 1/split, ..., (split-1)/split` and truncates
//!   every interpolation level to integers. `t = 1` is not sampled.
//! - [`Curve4`] samples `split + 1` steps, including (approximately) `t = 1`,
//!   and keeps the intermediate levels in floating point.
//!
//! When drawn, both append the exact final control point before joining.

use crate::basics::Point;
use crate::canvas::Canvas;
use crate::color::Pixel;

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn lerp_trunc(a: i32, b: i32, t: f64) -> i32 {
    lerp(a as f64, b as f64, t) as i32
}

// ============================================================================
// Curve3
// ============================================================================

/// Quadratic Bezier curve with integer control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Curve3 {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl Curve3 {
    pub fn new(p0: Point, p1: Point, p2: Point) -> Self {
        Self { p0, p1, p2 }
    }

    /// Sample `split` points starting at `t = 0`. The end point is not
    /// included. Returns an empty list for `split == 0`.
    pub fn flatten(&self, split: u32) -> Vec<Point> {
        let mut out = Vec::with_capacity(split as usize);
        if split == 0 {
            return out;
        }
        let delta = 1.0 / split as f64;
        let mut t = 0.0;
        for _ in 0..split {
            let x1 = lerp_trunc(self.p0.x, self.p1.x, t);
            let y1 = lerp_trunc(self.p0.y, self.p1.y, t);
            let x2 = lerp_trunc(self.p1.x, self.p2.x, t);
            let y2 = lerp_trunc(self.p1.y, self.p2.y, t);
            out.push(Point::new(lerp_trunc(x1, x2, t), lerp_trunc(y1, y2, t)));
            t += delta;
        }
        out
    }
}

// ============================================================================
// Curve4
// ============================================================================

/// Cubic Bezier curve with integer control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Curve4 {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl Curve4 {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Sample `split + 1` points from `t = 0` through `t = 1` (de Casteljau).
    /// Returns an empty list for `split == 0`.
    pub fn flatten(&self, split: u32) -> Vec<Point> {
        let mut out = Vec::with_capacity(split as usize + 1);
        if split == 0 {
            return out;
        }
        let (x0, y0) = (self.p0.x as f64, self.p0.y as f64);
        let (x1, y1) = (self.p1.x as f64, self.p1.y as f64);
        let (x2, y2) = (self.p2.x as f64, self.p2.y as f64);
        let (x3, y3) = (self.p3.x as f64, self.p3.y as f64);

        let delta = 1.0 / split as f64;
        let mut t = 0.0;
        for _ in 0..=split {
            let xa = lerp(x0, x1, t);
            let ya = lerp(y0, y1, t);
            let xb = lerp(x1, x2, t);
            let yb = lerp(y1, y2, t);
            let xc = lerp(x2, x3, t);
            let yc = lerp(y2, y3, t);

            let xaa = lerp(xa, xb, t);
            let yaa = lerp(ya, yb, t);
            let xbb = lerp(xb, xc, t);
            let ybb = lerp(yb, yc, t);

            out.push(Point::new(lerp(xaa, xbb, t) as i32, lerp(yaa, ybb, t) as i32));
            t += delta;
        }
        out
    }
}

// ============================================================================
// Canvas drawing
// ============================================================================

impl Canvas {
    /// Draw a quadratic Bezier curve flattened into `split` segments.
    pub fn draw_bezier_quadratic(
        &mut self,
        p0: Point,
        p1: Point,
        p2: Point,
        split: u32,
        color: Pixel,
    ) {
        if split == 0 {
            log::warn!("quadratic bezier with split 0, nothing drawn");
            return;
        }
        let mut pts = Curve3::new(p0, p1, p2).flatten(split);
        pts.push(p2);
        self.draw_polyline(&pts, color);
    }

    /// Draw a cubic Bezier curve flattened into `split` segments.
    pub fn draw_bezier_cubic(
        &mut self,
        p0: Point,
        p1: Point,
        p2: Point,
        p3: Point,
        split: u32,
        color: Pixel,
    ) {
        if split == 0 {
            log::warn!("cubic bezier with split 0, nothing drawn");
            return;
        }
        let mut pts = Curve4::new(p0, p1, p2, p3).flatten(split);
        pts.push(p3);
        self.draw_polyline(&pts, color);
    }
}

// ============================================================================
// Tests
// ============================================================================
