//! Basic shape primitives renderer.
//!
//! Draws rectangles, circles, triangles and pie wedges directly into a
//! [`Canvas`] without anti-aliasing. Every shape is built from clipped
//! Bresenham lines and horizontal spans, so nothing is ever written outside
//! the canvas.

use std::collections::BTreeMap;

use crate::basics::{deg2rad, iround, Point, Segment, PI};
use crate::canvas::Canvas;
use crate::color::Pixel;
use crate::line_bresenham::append_line_points;

/// Angular step used when sampling wedge arcs, in radians.
pub const WEDGE_ANGLE_STEP: f64 = 0.001;

// ============================================================================
// EdgeWalker
// ============================================================================

/// Walks a triangle edge one scanline at a time, reporting the x-range of
/// the edge's Bresenham pixels on each row.
///
/// `new` expects `a.y <= b.y`. Shallow edges cover several pixels per row;
/// steep edges cover exactly one.
#[derive(Debug, Clone)]
struct EdgeWalker {
    x: i32,
    y: i32,
    x_end: i32,
    y_end: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    err: i32,
}

impl EdgeWalker {
    fn new(a: Point, b: Point) -> Self {
        let dx = (b.x - a.x).abs();
        let dy = b.y - a.y;
        Self {
            x: a.x,
            y: a.y,
            x_end: b.x,
            y_end: b.y,
            dx,
            dy,
            sx: if b.x >= a.x { 1 } else { -1 },
            err: dx - dy,
        }
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.x == self.x_end && self.y == self.y_end
    }

    /// Consume the current row and return its `(min_x, max_x)`.
    fn next_row(&mut self) -> (i32, i32) {
        let row = self.y;
        let mut lo = self.x;
        let mut hi = self.x;
        while self.y == row && !self.at_end() {
            let e2 = 2 * self.err;
            if e2 > -self.dy {
                self.err -= self.dy;
                self.x += self.sx;
            }
            if e2 < self.dx {
                self.err += self.dx;
                self.y += 1;
            }
            if self.y == row {
                lo = lo.min(self.x);
                hi = hi.max(self.x);
            }
        }
        (lo, hi)
    }
}

// ============================================================================
// Canvas drawing
// ============================================================================

impl Canvas {
    /// Draw the outline of the rectangle with top-left `xy`, width `w` and
    /// height `h`. The right and bottom edges sit at `x + w` and `y + h`.
    pub fn draw_rectangle(&mut self, xy: Point, w: i32, h: i32, color: Pixel) {
        let Point { x, y } = xy;
        self.draw_line(Segment::new(x, y, x + w, y), color);
        self.draw_line(Segment::new(x + w, y, x + w, y + h), color);
        self.draw_line(Segment::new(x + w, y + h, x, y + h), color);
        self.draw_line(Segment::new(x, y + h, x, y), color);
    }

    /// Fill rows `y..y + h`, each spanning `x..=x + w`.
    pub fn draw_filled_rectangle(&mut self, xy: Point, w: i32, h: i32, color: Pixel) {
        let Point { x, y } = xy;
        for row in y..y + h {
            self.draw_line(Segment::new(x, row, x + w, row), color);
        }
    }

    /// Midpoint circle outline. A non-positive radius draws nothing.
    pub fn draw_circle(&mut self, center: Point, radius: i32, color: Pixel) {
        if radius <= 0 {
            return;
        }
        let Point { x: cx, y: cy } = center;
        let mut x0 = 0;
        let mut y0 = radius;
        let mut d = 3 - 2 * radius;

        while y0 >= x0 {
            for (px, py) in [
                (cx + x0, cy - y0),
                (cx + y0, cy - x0),
                (cx + y0, cy + x0),
                (cx + x0, cy + y0),
                (cx - x0, cy + y0),
                (cx - y0, cy + x0),
                (cx - y0, cy - x0),
                (cx - x0, cy - y0),
            ] {
                self.draw_line(Segment::dot(Point::new(px, py)), color);
            }
            step_midpoint(&mut d, &mut x0, &mut y0);
        }
    }

    /// Filled circle built from four horizontal chords per midpoint step.
    /// A non-positive radius draws nothing.
    pub fn draw_filled_circle(&mut self, center: Point, radius: i32, color: Pixel) {
        if radius <= 0 {
            return;
        }
        let Point { x: cx, y: cy } = center;
        let mut x0 = 0;
        let mut y0 = radius;
        let mut d = 3 - 2 * radius;

        while y0 >= x0 {
            self.draw_line(Segment::new(cx - x0, cy - y0, cx + x0, cy - y0), color);
            self.draw_line(Segment::new(cx - y0, cy - x0, cx + y0, cy - x0), color);
            self.draw_line(Segment::new(cx - x0, cy + y0, cx + x0, cy + y0), color);
            self.draw_line(Segment::new(cx - y0, cy + x0, cx + y0, cy + x0), color);
            step_midpoint(&mut d, &mut x0, &mut y0);
        }
    }

    /// Triangle outline.
    pub fn draw_triangle(&mut self, p1: Point, p2: Point, p3: Point, color: Pixel) {
        self.draw_line(Segment::from_points(p1, p2), color);
        self.draw_line(Segment::from_points(p2, p3), color);
        self.draw_line(Segment::from_points(p3, p1), color);
    }

    /// Scanline-filled triangle.
    ///
    /// Vertices are sorted by y. The long edge (top to bottom) is walked for
    /// every row; the short edges take over in turn, top to middle and then
    /// middle to bottom. Each row is filled between the outermost pixels of
    /// the edge walkers. These can break ties differently from
    /// [`Canvas::draw_line`] on shallow edges, so an outline drawn over the
    /// fill may stick out by a pixel.
    pub fn draw_filled_triangle(&mut self, p1: Point, p2: Point, p3: Point, color: Pixel) {
        let mut v = [p1, p2, p3];
        v.sort_by_key(|p| p.y);
        let [top, mid, bottom] = v;

        let mut long = EdgeWalker::new(top, bottom);
        let mut upper = EdgeWalker::new(top, mid);
        for y in top.y..mid.y {
            let (alo, ahi) = long.next_row();
            let (blo, bhi) = upper.next_row();
            self.draw_hline(alo.min(blo), ahi.max(bhi), y, color);
        }

        // The middle row belongs to both short edges.
        let mut lower = EdgeWalker::new(mid, bottom);
        let (alo, ahi) = long.next_row();
        let (blo, bhi) = upper.next_row();
        let (clo, chi) = lower.next_row();
        self.draw_hline(alo.min(blo).min(clo), ahi.max(bhi).max(chi), mid.y, color);

        for y in mid.y + 1..=bottom.y {
            let (alo, ahi) = long.next_row();
            let (blo, bhi) = lower.next_row();
            self.draw_hline(alo.min(blo), ahi.max(bhi), y, color);
        }
    }

    /// Pie-slice outline: the arc plus both radii.
    ///
    /// Angles are in degrees, counter-clockwise from +x with y pointing down
    /// the canvas. The order of `start_deg` and `end_deg` does not matter.
    pub fn draw_wedge(
        &mut self,
        center: Point,
        radius: i32,
        start_deg: f64,
        end_deg: f64,
        color: Pixel,
    ) {
        if radius <= 0 {
            return;
        }
        for p in wedge_points(center, radius, start_deg, end_deg) {
            self.set_pixel(p.x, p.y, color);
        }
    }

    /// Filled pie slice: one span per row between the outermost wedge
    /// outline pixels on that row.
    pub fn draw_filled_wedge(
        &mut self,
        center: Point,
        radius: i32,
        start_deg: f64,
        end_deg: f64,
        color: Pixel,
    ) {
        if radius <= 0 {
            return;
        }
        let mut rows: BTreeMap<i32, (i32, i32)> = BTreeMap::new();
        for p in wedge_points(center, radius, start_deg, end_deg) {
            rows.entry(p.y)
                .and_modify(|(lo, hi)| {
                    *lo = (*lo).min(p.x);
                    *hi = (*hi).max(p.x);
                })
                .or_insert((p.x, p.x));
        }
        for (y, (lo, hi)) in rows {
            self.draw_line(Segment::new(lo, y, hi, y), color);
        }
    }
}

/// Advance the midpoint circle decision variable by one step.
#[inline]
fn step_midpoint(d: &mut i32, x0: &mut i32, y0: &mut i32) {
    if *d < 0 {
        *d += 4 * *x0 + 6;
    } else {
        *d += 4 * (*x0 - *y0) + 10;
        *y0 -= 1;
    }
    *x0 += 1;
}

/// Collect the outline points of a wedge: arc samples every
/// [`WEDGE_ANGLE_STEP`] radians from the smaller angle up to the larger one
/// (at least one sample), followed by the two radii from the center to the
/// first and last arc samples.
///
/// A sweep wider than a full turn samples one turn plus its final point.
/// Non-finite angles give no points.
pub fn wedge_points(center: Point, radius: i32, start_deg: f64, end_deg: f64) -> Vec<Point> {
    if !start_deg.is_finite() || !end_deg.is_finite() {
        log::warn!(
            "wedge with non-finite angles ({}, {}), nothing drawn",
            start_deg,
            end_deg
        );
        return Vec::new();
    }
    let start = deg2rad(start_deg.min(end_deg));
    let end = deg2rad(start_deg.max(end_deg));
    let r = radius as f64;
    let (cx, cy) = (center.x as f64, center.y as f64);
    let arc_point = |a: f64| Point::new(iround(cx + r * a.cos()), iround(cy - r * a.sin()));

    let steps = ((end - start) / WEDGE_ANGLE_STEP).floor();
    let full_turn = (2.0 * PI / WEDGE_ANGLE_STEP).ceil();
    let count = steps.min(full_turn) as usize + 1;

    let mut pts: Vec<Point> = (0..count)
        .map(|k| arc_point(start + k as f64 * WEDGE_ANGLE_STEP))
        .collect();
    let first = pts[0];
    let last = arc_point(start + steps * WEDGE_ANGLE_STEP);
    if steps > full_turn {
        pts.push(last);
    }
    append_line_points(Segment::from_points(center, first), &mut pts);
    append_line_points(Segment::from_points(center, last), &mut pts);
    pts
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn is_lit(c: &Canvas, x: i32, y: i32) -> bool {
        c.pixel(x, y).unwrap() != Pixel::BLACK
    }

    fn count_lit(c: &Canvas) -> usize {
        c.pixels().iter().filter(|p| **p != Pixel::BLACK).count()
    }

    #[test]
    fn test_rectangle_outline() {
        let mut c = Canvas::new(10, 10);
        c.draw_rectangle(Point::new(2, 2), 4, 3, Pixel::WHITE);
        assert!(is_lit(&c, 2, 2));
        assert!(is_lit(&c, 6, 2));
        assert!(is_lit(&c, 6, 5));
        assert!(is_lit(&c, 2, 5));
        assert!(!is_lit(&c, 4, 3));
        // Perimeter of a 5x4 pixel box
        assert_eq!(count_lit(&c), 14);
    }

    #[test]
    fn test_filled_rectangle() {
        let mut c = Canvas::new(10, 10);
        c.draw_filled_rectangle(Point::new(1, 1), 3, 2, Pixel::WHITE);
        // Rows 1..3, columns 1..=4
        assert_eq!(count_lit(&c), 8);
        assert!(is_lit(&c, 4, 2));
        assert!(!is_lit(&c, 1, 3));
    }

    #[test]
    fn test_filled_rectangle_clipped() {
        let mut c = Canvas::new(4, 4);
        c.draw_filled_rectangle(Point::new(-10, -10), 100, 100, Pixel::WHITE);
        assert_eq!(count_lit(&c), 16);
    }

    #[test]
    fn test_circle_outline_symmetry() {
        let mut c = Canvas::new(21, 21);
        c.draw_circle(Point::new(10, 10), 6, Pixel::WHITE);
        assert!(is_lit(&c, 10, 4));
        assert!(is_lit(&c, 10, 16));
        assert!(is_lit(&c, 4, 10));
        assert!(is_lit(&c, 16, 10));
        assert!(!is_lit(&c, 10, 10));
        for y in 0..21 {
            for x in 0..21 {
                assert_eq!(is_lit(&c, x, y), is_lit(&c, 20 - x, y));
                assert_eq!(is_lit(&c, x, y), is_lit(&c, y, x));
            }
        }
    }

    #[test]
    fn test_zero_radius_circle_is_noop() {
        let mut c = Canvas::new(5, 5);
        c.draw_circle(Point::new(2, 2), 0, Pixel::WHITE);
        c.draw_filled_circle(Point::new(2, 2), 0, Pixel::WHITE);
        c.draw_filled_circle(Point::new(2, 2), -3, Pixel::WHITE);
        assert_eq!(count_lit(&c), 0);
    }

    #[test]
    fn test_filled_circle_extent() {
        let mut c = Canvas::new(21, 21);
        c.draw_filled_circle(Point::new(10, 10), 5, Pixel::WHITE);
        assert!(is_lit(&c, 10, 5));
        assert!(is_lit(&c, 10, 15));
        assert!(is_lit(&c, 5, 10));
        assert!(is_lit(&c, 15, 10));
        assert!(!is_lit(&c, 10, 4));
        assert!(!is_lit(&c, 16, 10));
        assert!(!is_lit(&c, 5, 5));
    }

    #[test]
    fn test_triangle_outline() {
        let mut c = Canvas::new(10, 10);
        c.draw_triangle(Point::new(1, 1), Point::new(8, 1), Point::new(1, 8), Pixel::WHITE);
        assert!(is_lit(&c, 1, 1));
        assert!(is_lit(&c, 8, 1));
        assert!(is_lit(&c, 1, 8));
        assert!(!is_lit(&c, 3, 3));
    }

    #[test]
    fn test_filled_triangle_right_angle() {
        let mut c = Canvas::new(10, 10);
        c.draw_filled_triangle(Point::new(0, 0), Point::new(0, 4), Point::new(4, 4), Pixel::WHITE);
        // Row y covers x in 0..=y
        for y in 0..5 {
            for x in 0..10 {
                assert_eq!(is_lit(&c, x, y), x <= y, "({}, {})", x, y);
            }
        }
        assert_eq!(count_lit(&c), 15);
    }

    #[test]
    fn test_filled_triangle_vertex_order_irrelevant() {
        let (a, b, d) = (Point::new(2, 1), Point::new(13, 6), Point::new(5, 12));
        let mut c1 = Canvas::new(16, 16);
        c1.draw_filled_triangle(a, b, d, Pixel::WHITE);
        let mut c2 = Canvas::new(16, 16);
        c2.draw_filled_triangle(d, a, b, Pixel::WHITE);
        assert_eq!(c1, c2);
    }

    #[test]
    fn test_filled_triangle_vertices_and_bounds() {
        let (a, b, d) = (Point::new(2, 1), Point::new(13, 6), Point::new(5, 12));
        let mut c = Canvas::new(16, 16);
        c.draw_filled_triangle(a, b, d, Pixel::WHITE);
        for v in [a, b, d] {
            assert!(is_lit(&c, v.x, v.y));
        }
        assert!(is_lit(&c, 6, 6));
        for y in 0..16 {
            for x in 0..16 {
                if is_lit(&c, x, y) {
                    assert!((2..=13).contains(&x) && (1..=12).contains(&y));
                }
            }
        }
        // One run per row
        for y in 1..=12 {
            let row: Vec<i32> = (0..16).filter(|&x| is_lit(&c, x, y)).collect();
            assert_eq!(row.len() as i32, row[row.len() - 1] - row[0] + 1);
        }
    }

    #[test]
    fn test_filled_triangle_flat() {
        let mut c = Canvas::new(10, 10);
        c.draw_filled_triangle(Point::new(1, 3), Point::new(7, 3), Point::new(4, 3), Pixel::WHITE);
        assert_eq!(count_lit(&c), 7);
    }

    #[test]
    fn test_wedge_points_quarter() {
        let pts = wedge_points(Point::new(10, 10), 5, 0.0, 90.0);
        assert_eq!(pts[0], Point::new(15, 10));
        assert!(pts.contains(&Point::new(10, 5)));
        // Both radii are present
        assert!(pts.contains(&Point::new(12, 10)));
        assert!(pts.contains(&Point::new(10, 8)));
    }

    #[test]
    fn test_wedge_angle_order_irrelevant() {
        assert_eq!(
            wedge_points(Point::new(10, 10), 6, 10.0, 80.0),
            wedge_points(Point::new(10, 10), 6, 80.0, 10.0)
        );
    }

    #[test]
    fn test_filled_wedge_quarter() {
        let mut c = Canvas::new(21, 21);
        c.draw_filled_wedge(Point::new(10, 10), 6, 0.0, 90.0, Pixel::WHITE);
        // Upper-right quadrant only
        assert!(is_lit(&c, 12, 8));
        assert!(is_lit(&c, 10, 4));
        assert!(!is_lit(&c, 8, 8));
        assert!(!is_lit(&c, 12, 12));
    }

    #[test_log::test]
    fn test_wedge_non_finite_angles_draw_nothing() {
        let center = Point::new(10, 10);
        assert!(wedge_points(center, 5, f64::NEG_INFINITY, 0.0).is_empty());
        assert!(wedge_points(center, 5, 0.0, f64::INFINITY).is_empty());
        assert!(wedge_points(center, 5, f64::NAN, f64::NAN).is_empty());

        let mut c = Canvas::new(20, 20);
        c.draw_wedge(center, 5, f64::NEG_INFINITY, 0.0, Pixel::WHITE);
        c.draw_filled_wedge(center, 5, 0.0, f64::NAN, Pixel::WHITE);
        assert_eq!(count_lit(&c), 0);
    }

    #[test]
    fn test_wedge_sweep_is_bounded() {
        let center = Point::new(10, 10);
        // Far more than a full turn: one turn of samples, the last sample
        // and two radii of at most six points each.
        let pts = wedge_points(center, 5, 0.0, 1e15);
        assert!(pts.len() <= 6286 + 12, "{} points", pts.len());
        assert_eq!(pts[0], Point::new(15, 10));

        // Angles too large for the step to register still terminate.
        let pts = wedge_points(center, 5, 1e15, 1e15 + 90.0);
        assert!(!pts.is_empty() && pts.len() <= 6286 + 12);

        let full = wedge_points(center, 5, 0.0, 360.0);
        let mut c = Canvas::new(21, 21);
        c.draw_wedge(center, 5, 0.0, 720.0, Pixel::WHITE);
        for p in full {
            assert!(is_lit(&c, p.x, p.y), "{:?}", p);
        }
    }

    #[test]
    fn test_wedge_outline_hollow() {
        let mut c = Canvas::new(21, 21);
        c.draw_wedge(Point::new(10, 10), 8, 0.0, 90.0, Pixel::WHITE);
        assert!(is_lit(&c, 18, 10));
        assert!(is_lit(&c, 10, 2));
        assert!(!is_lit(&c, 13, 7));
    }
}
