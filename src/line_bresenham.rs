//! Integer Bresenham line rasterization.
//!
//! [`LineBresenhamInterpolator`] walks the 8-connected pixel path between
//! two integer endpoints, one unit per step along the major axis. The walk
//! always runs in the positive direction of the major axis, starting from
//! whichever endpoint has the smaller major coordinate, so a segment and its
//! reverse produce the same pixels.
//!
//! [`Canvas::draw_line`] clips first and rasterizes only the visible part;
//! [`line_points`] lists the path without clipping.

use crate::basics::{Point, Segment};
use crate::canvas::Canvas;
use crate::color::Pixel;

// ============================================================================
// LineBresenhamInterpolator
// ============================================================================

/// Iterator over the pixels of a Bresenham line, both endpoints included.
#[derive(Debug, Clone)]
pub struct LineBresenhamInterpolator {
    x: i32,
    y: i32,
    end: i32,
    ver: bool,
    err: i32,
    err_inc: i32,
    err_dec: i32,
    minor_inc: i32,
    done: bool,
}

impl LineBresenhamInterpolator {
    pub fn new(seg: Segment) -> Self {
        let dx = seg.x2 - seg.x1;
        let dy = seg.y2 - seg.y1;
        let dx1 = dx.abs();
        let dy1 = dy.abs();
        let ver = dy1 > dx1;
        // Same signs step the minor axis forward, mixed signs step it back.
        let minor_inc = if (dx < 0 && dy < 0) || (dx > 0 && dy > 0) {
            1
        } else {
            -1
        };

        if ver {
            let (x, y, end) = if dy >= 0 {
                (seg.x1, seg.y1, seg.y2)
            } else {
                (seg.x2, seg.y2, seg.y1)
            };
            Self {
                x,
                y,
                end,
                ver,
                err: 2 * dx1 - dy1,
                err_inc: 2 * dx1,
                err_dec: 2 * (dx1 - dy1),
                minor_inc,
                done: false,
            }
        } else {
            let (x, y, end) = if dx >= 0 {
                (seg.x1, seg.y1, seg.x2)
            } else {
                (seg.x2, seg.y2, seg.x1)
            };
            Self {
                x,
                y,
                end,
                ver,
                err: 2 * dy1 - dx1,
                err_inc: 2 * dy1,
                err_dec: 2 * (dy1 - dx1),
                minor_inc,
                done: false,
            }
        }
    }

    /// True if the line is vertical-major.
    #[inline]
    pub fn is_ver(&self) -> bool {
        self.ver
    }

    /// Number of pixels still to be produced.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        if self.done {
            return 0;
        }
        let major = if self.ver { self.y } else { self.x };
        (self.end - major) as usize + 1
    }

    #[inline]
    fn step(&mut self) {
        if self.ver {
            self.y += 1;
            if self.err <= 0 {
                self.err += self.err_inc;
            } else {
                self.x += self.minor_inc;
                self.err += self.err_dec;
            }
        } else {
            self.x += 1;
            if self.err < 0 {
                self.err += self.err_inc;
            } else {
                self.y += self.minor_inc;
                self.err += self.err_dec;
            }
        }
    }
}

impl Iterator for LineBresenhamInterpolator {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let p = Point::new(self.x, self.y);
        let major = if self.ver { self.y } else { self.x };
        if major >= self.end {
            self.done = true;
        } else {
            self.step();
        }
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for LineBresenhamInterpolator {}

// ============================================================================
// Point listing
// ============================================================================

/// List every pixel on the segment without clipping.
///
/// Axis-aligned segments are emitted as straight runs in increasing
/// coordinate order.
pub fn line_points(seg: Segment) -> Vec<Point> {
    let mut out = Vec::new();
    append_line_points(seg, &mut out);
    out
}

/// Append every pixel on the segment to `out`, without clipping.
pub fn append_line_points(seg: Segment, out: &mut Vec<Point>) {
    if seg.x1 == seg.x2 {
        let (y1, y2) = (seg.y1.min(seg.y2), seg.y1.max(seg.y2));
        out.extend((y1..=y2).map(|y| Point::new(seg.x1, y)));
        return;
    }
    if seg.y1 == seg.y2 {
        let (x1, x2) = (seg.x1.min(seg.x2), seg.x1.max(seg.x2));
        out.extend((x1..=x2).map(|x| Point::new(x, seg.y1)));
        return;
    }
    out.extend(LineBresenhamInterpolator::new(seg));
}

// ============================================================================
// Canvas drawing
// ============================================================================

impl Canvas {
    /// Draw a one-pixel-wide line. The segment is clipped to the canvas
    /// first; a segment entirely outside draws nothing.
    pub fn draw_line(&mut self, seg: Segment, color: Pixel) {
        if let Some(clipped) = self.clip_segment(seg) {
            self.draw_line_unclipped(clipped, color);
        }
    }

    /// Rasterize a segment whose endpoints are already inside the canvas.
    /// Stray pixels are still bounds-checked by `set_pixel`.
    pub(crate) fn draw_line_unclipped(&mut self, seg: Segment, color: Pixel) {
        if seg.y1 == seg.y2 {
            let (x1, x2) = (seg.x1.min(seg.x2), seg.x1.max(seg.x2));
            self.draw_hline(x1, x2, seg.y1, color);
            return;
        }
        for p in LineBresenhamInterpolator::new(seg) {
            self.set_pixel(p.x, p.y, color);
        }
    }

    /// Fill the run `x1..=x2` on row `y`, clipped to the canvas.
    pub(crate) fn draw_hline(&mut self, x1: i32, x2: i32, y: i32, color: Pixel) {
        if y < 0 || y as usize >= self.height() || x2 < 0 || x1 as i64 >= self.width() as i64 {
            return;
        }
        let x1 = x1.max(0) as usize;
        let x2 = (x2 as usize).min(self.width() - 1);
        if x1 > x2 {
            return;
        }
        self.row_mut(y as usize)[x1..=x2].fill(color);
    }

    /// Connect consecutive points with clipped lines.
    pub fn draw_polyline(&mut self, points: &[Point], color: Pixel) {
        for pair in points.windows(2) {
            self.draw_line(Segment::from_points(pair[0], pair[1]), color);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
