//! Rotated shapes: rectangles, ellipses and polygons.
//!
//! Angles are in degrees. Positive angles turn +x towards +y, which on a
//! canvas with y pointing down is clockwise on screen.
//!
//! Two strategies are used:
//!
//! - Filled rectangles and ellipses scan their axis-aligned bounding box in
//!   canvas space and inverse-rotate every candidate pixel into the shape's
//!   local frame for a membership test.
//! - Polygons forward-rotate their vertices about the centroid and are then
//!   drawn (or scanline filled) in canvas space.
//!
//! Rotated coordinates are truncated towards zero, not rounded.

use crate::basics::{deg2rad, Point, Segment};
use crate::canvas::Canvas;
use crate::color::Pixel;

/// Parameter step for the ellipse outline sweep, in radians.
pub const ELLIPSE_ANGLE_STEP: f64 = 0.001;

// ============================================================================
// Rotation
// ============================================================================

/// A pure rotation about the origin, the 2x2 part of an affine matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub cos: f64,
    pub sin: f64,
}

impl Rotation {
    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(deg2rad(degrees))
    }

    pub fn from_radians(a: f64) -> Self {
        Self {
            cos: a.cos(),
            sin: a.sin(),
        }
    }

    /// Rotate `(x, y)` by the angle.
    #[inline]
    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.cos - y * self.sin, x * self.sin + y * self.cos)
    }

    /// Rotate `(x, y)` by the negated angle.
    #[inline]
    pub fn inverse_transform(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.cos + y * self.sin, -x * self.sin + y * self.cos)
    }
}

/// Integer centroid of `points` (truncating mean).
fn centroid(points: &[Point]) -> Point {
    let n = points.len() as i64;
    let (sx, sy) = points
        .iter()
        .fold((0i64, 0i64), |(sx, sy), p| (sx + p.x as i64, sy + p.y as i64));
    Point::new((sx / n) as i32, (sy / n) as i32)
}

/// Rotate every vertex about the integer centroid of the set.
///
/// Each offset is rotated and truncated before being added back to the
/// centroid. An empty slice gives an empty result.
pub fn rotate_about_centroid(vertices: &[Point], degrees: f64) -> Vec<Point> {
    if vertices.is_empty() {
        return Vec::new();
    }
    let c = centroid(vertices);
    let rot = Rotation::from_degrees(degrees);
    vertices
        .iter()
        .map(|v| {
            let (rx, ry) = rot.transform((v.x - c.x) as f64, (v.y - c.y) as f64);
            Point::new(c.x + rx as i32, c.y + ry as i32)
        })
        .collect()
}

/// Corners of a `w x h` rectangle with top-left `xy`, rotated about its
/// center. Order: top-left, bottom-left, top-right, bottom-right before
/// rotation.
pub fn rotated_rectangle_corners(xy: Point, w: i32, h: i32, degrees: f64) -> [Point; 4] {
    let rot = Rotation::from_degrees(degrees);
    let cx = (xy.x + w / 2) as f64;
    let cy = (xy.y + h / 2) as f64;
    let (hw, hh) = ((w / 2) as f64, (h / 2) as f64);

    let mut corners = [Point::default(); 4];
    let offsets = [(-hw, -hh), (-hw, hh), (hw, -hh), (hw, hh)];
    for (corner, (dx, dy)) in corners.iter_mut().zip(offsets) {
        let (rx, ry) = rot.transform(dx, dy);
        *corner = Point::new((cx + rx) as i32, (cy + ry) as i32);
    }
    corners
}

/// Pixel range `center - extent - 1 ..= center + extent + 1` cut to
/// `[0, len)`. `None` when nothing of it is on the canvas.
fn scan_span(center: f64, extent: f64, len: usize) -> Option<(i32, i32)> {
    let lo = ((center - extent) as i64 - 1).max(0);
    let hi = ((center + extent) as i64 + 1).min(len as i64 - 1);
    if lo > hi {
        None
    } else {
        Some((lo as i32, hi as i32))
    }
}

// ============================================================================
// Canvas drawing
// ============================================================================

impl Canvas {
    /// Outline of a rectangle rotated about its center.
    pub fn draw_rotated_rectangle(&mut self, xy: Point, w: i32, h: i32, degrees: f64, color: Pixel) {
        let c = rotated_rectangle_corners(xy, w, h, degrees);
        for (a, b) in [(0, 1), (1, 3), (3, 2), (2, 0)] {
            self.draw_line(Segment::from_points(c[a], c[b]), color);
        }
    }

    /// Filled rectangle rotated about its center.
    pub fn draw_filled_rotated_rectangle(
        &mut self,
        xy: Point,
        w: i32,
        h: i32,
        degrees: f64,
        color: Pixel,
    ) {
        // Scanning maps canvas pixels back into the rectangle frame, so the
        // sampling rotation is the inverse of the drawing one.
        let inv = Rotation::from_degrees(-degrees);
        let cx = xy.x + w / 2;
        let cy = xy.y + h / 2;

        // Truncation admits local offsets up to one pixel past the half size.
        let (ew, eh) = ((w / 2).abs() as f64 + 1.0, (h / 2).abs() as f64 + 1.0);
        let ext_x = (ew * inv.cos).abs() + (eh * inv.sin).abs();
        let ext_y = (ew * inv.sin).abs() + (eh * inv.cos).abs();
        let (Some((x1, x2)), Some((y1, y2))) = (
            scan_span(cx as f64, ext_x, self.width()),
            scan_span(cy as f64, ext_y, self.height()),
        ) else {
            return;
        };

        let (hw, hh) = (w / 2, h / 2);
        for py in y1..=y2 {
            for px in x1..=x2 {
                let (rx, ry) = inv.transform((px - cx) as f64, (py - cy) as f64);
                let (rx, ry) = (rx as i32, ry as i32);
                if rx >= -hw && rx <= hw && ry >= -hh && ry <= hh {
                    self.set_pixel(px, py, color);
                }
            }
        }
    }

    /// Ellipse outline inscribed in the `w x h` box at `xy`, rotated about
    /// the box center. Sampled parametrically, so steep arcs may leave gaps.
    pub fn draw_rotated_ellipse(&mut self, xy: Point, w: i32, h: i32, degrees: f64, color: Pixel) {
        let rot = Rotation::from_degrees(degrees);
        let cx = (xy.x + w / 2) as f64;
        let cy = (xy.y + h / 2) as f64;
        let (hw, hh) = ((w / 2) as f64, (h / 2) as f64);

        let mut theta: f64 = 0.0;
        while theta <= 2.0 * std::f64::consts::PI {
            let dx = (hw * theta.cos()) as i32;
            let dy = (hh * theta.sin()) as i32;
            let (rx, ry) = rot.transform(dx as f64, dy as f64);
            self.set_pixel((cx + rx) as i32, (cy + ry) as i32, color);
            theta += ELLIPSE_ANGLE_STEP;
        }
    }

    /// Filled ellipse inscribed in the `w x h` box at `xy`, rotated about
    /// the box center. Non-positive sizes draw nothing.
    pub fn draw_filled_rotated_ellipse(
        &mut self,
        xy: Point,
        w: i32,
        h: i32,
        degrees: f64,
        color: Pixel,
    ) {
        if w <= 0 || h <= 0 {
            return;
        }
        let rot = Rotation::from_degrees(degrees);
        let cx = xy.x + w / 2;
        let cy = xy.y + h / 2;
        // Truncation admits local offsets up to one pixel past the radius.
        let hw = w as f64 / 2.0 + 1.0;
        let hh = h as f64 / 2.0 + 1.0;

        // Box of the rotated bounding rectangle, which contains the ellipse.
        let ext_x = (hw * rot.cos).abs() + (hh * rot.sin).abs();
        let ext_y = (hw * rot.sin).abs() + (hh * rot.cos).abs();
        let (Some((x1, x2)), Some((y1, y2))) = (
            scan_span(cx as f64, ext_x, self.width()),
            scan_span(cy as f64, ext_y, self.height()),
        ) else {
            return;
        };

        let w2 = (w as f64) * (w as f64);
        let h2 = (h as f64) * (h as f64);
        for py in y1..=y2 {
            for px in x1..=x2 {
                let (rx, ry) = rot.inverse_transform((px - cx) as f64, (py - cy) as f64);
                let (rx, ry) = ((rx as i32) as f64, (ry as i32) as f64);
                if 4.0 * rx * rx / w2 + 4.0 * ry * ry / h2 <= 1.0 {
                    self.set_pixel(px, py, color);
                }
            }
        }
    }

    /// Closed polygon outline rotated about its centroid.
    ///
    /// Edges with an endpoint off the canvas are skipped entirely rather than
    /// clipped.
    pub fn draw_rotated_polygon(&mut self, vertices: &[Point], degrees: f64, color: Pixel) {
        let rotated = rotate_about_centroid(vertices, degrees);
        let n = rotated.len();
        for i in 0..n {
            let (a, b) = (rotated[i], rotated[(i + 1) % n]);
            if self.contains(a) && self.contains(b) {
                self.draw_line(Segment::from_points(a, b), color);
            }
        }
    }

    /// Even-odd scanline fill of a polygon rotated about its centroid.
    pub fn draw_filled_rotated_polygon(&mut self, vertices: &[Point], degrees: f64, color: Pixel) {
        let rotated = rotate_about_centroid(vertices, degrees);
        let n = rotated.len();
        if n == 0 {
            return;
        }

        let mut xs: Vec<i64> = Vec::with_capacity(n);
        for y in 0..self.height() as i64 {
            xs.clear();
            for i in 0..n {
                let (a, b) = (rotated[i], rotated[(i + 1) % n]);
                let (x1, y1, x2, y2) = (a.x as i64, a.y as i64, b.x as i64, b.y as i64);
                // Half-open on the lower end so shared vertices count once.
                if (y1 < y && y2 >= y) || (y2 < y && y1 >= y) {
                    xs.push(x1 + (y - y1) * (x2 - x1) / (y2 - y1));
                }
            }
            xs.sort_unstable();
            for pair in xs.chunks_exact(2) {
                let lo = pair[0].clamp(i32::MIN as i64, i32::MAX as i64) as i32;
                let hi = pair[1].clamp(i32::MIN as i64, i32::MAX as i64) as i32;
                self.draw_hline(lo, hi, y as i32, color);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
