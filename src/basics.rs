//! Foundation types and small numeric helpers.
//!
//! Integer points and segments used by every rasterizer, plus the
//! rounding and angle conversions shared by the shape and filter code.

use core::ops::{Add, Sub};

// ============================================================================
// Numeric helpers
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

/// Nearest integer, ties away from zero. Shape code snaps sampled
/// coordinates with this.
#[inline]
pub fn iround(v: f64) -> i32 {
    v.round() as i32
}

#[inline]
pub fn deg2rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

#[inline]
pub fn rad2deg(radians: f64) -> f64 {
    radians.to_degrees()
}

// ============================================================================
// Point
// ============================================================================

/// An integer pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

// ============================================================================
// Segment
// ============================================================================

/// A line segment between two integer endpoints.
///
/// Endpoint order does not matter to the clipper, but the rasterizers walk
/// from the first endpoint to the second where that is observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Segment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Segment {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub const fn from_points(p1: Point, p2: Point) -> Self {
        Self::new(p1.x, p1.y, p2.x, p2.y)
    }

    /// A zero-length segment covering a single pixel.
    pub const fn dot(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    pub const fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub const fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Returns `true` if both endpoints coincide.
    pub fn is_point(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }
}

/// Build the segment that starts at `center` and runs `length` pixels along
/// `degrees` (measured from +x toward +y). The end point is truncated toward
/// zero.
pub fn angled_segment(center: Point, degrees: f64, length: i32) -> Segment {
    let rad = deg2rad(degrees);
    let x2 = (center.x as f64 + rad.cos() * length as f64) as i32;
    let y2 = (center.y as f64 + rad.sin() * length as f64) as i32;
    Segment::new(center.x, center.y, x2, y2)
}

// ============================================================================
// Tests
// ============================================================================
