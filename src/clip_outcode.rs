//! Outcode line clipping against the canvas rectangle.
//!
//! Each endpoint is classified by a 4-bit region code; segments entirely on
//! one side of the canvas are rejected without any arithmetic, everything
//! else is cut at one boundary at a time until both endpoints lie inside.

use crate::basics::Segment;
use crate::canvas::Canvas;

// ============================================================================
// Outcodes
// ============================================================================

/// `y >= height`
pub const OUTCODE_Y_OVER: u32 = 1;
/// `y < 0`
pub const OUTCODE_Y_UNDER: u32 = 2;
/// `x >= width`
pub const OUTCODE_X_OVER: u32 = 4;
/// `x < 0`
pub const OUTCODE_X_UNDER: u32 = 8;

/// Each substitution places one endpoint on a boundary; two per endpoint
/// suffice, the rest is slack for integer rounding.
const MAX_SUBSTITUTIONS: usize = 8;

/// Compute the outcode of `(x, y)` against a `width x height` rectangle
/// anchored at the origin.
///
/// ```text
///          x < 0  |  inside  | x >= w
///         --------+----------+--------  y = 0
///          1010   |   0010   |  0110       (y < 0)
///         --------+----------+--------
///          1000   |   0000   |  0100
///         --------+----------+--------  y = h
///          1001   |   0001   |  0101       (y >= h)
/// ```
#[inline]
pub fn outcode(x: i64, y: i64, width: i64, height: i64) -> u32 {
    let mut code = 0;
    if y >= height {
        code |= OUTCODE_Y_OVER;
    } else if y < 0 {
        code |= OUTCODE_Y_UNDER;
    }
    if x >= width {
        code |= OUTCODE_X_OVER;
    } else if x < 0 {
        code |= OUTCODE_X_UNDER;
    }
    code
}

/// Clip `seg` to the rectangle `[0, width) x [0, height)`.
///
/// Returns `None` when no part of the segment is visible. Intersections are
/// snapped onto the last row or column inside the rectangle (`height - 1`,
/// `width - 1`, or `0`) and the other coordinate is computed against that
/// same line with truncating integer division.
pub fn clip_segment(seg: Segment, width: usize, height: usize) -> Option<Segment> {
    if width == 0 || height == 0 {
        return None;
    }
    let w = width as i64;
    let h = height as i64;

    let (mut x1, mut y1) = (seg.x1 as i64, seg.y1 as i64);
    let (mut x2, mut y2) = (seg.x2 as i64, seg.y2 as i64);
    let mut code1 = outcode(x1, y1, w, h);
    let mut code2 = outcode(x2, y2, w, h);

    for _ in 0..=MAX_SUBSTITUTIONS {
        if code1 | code2 == 0 {
            return Some(Segment::new(x1 as i32, y1 as i32, x2 as i32, y2 as i32));
        }
        if code1 & code2 != 0 {
            log::trace!("clip rejected {:?}", seg);
            return None;
        }

        let code_out = if code1 != 0 { code1 } else { code2 };
        let (x, y);
        if code_out & OUTCODE_Y_OVER != 0 {
            y = h - 1;
            x = x1 + (x2 - x1) * (y - y1) / (y2 - y1);
        } else if code_out & OUTCODE_Y_UNDER != 0 {
            y = 0;
            x = x1 + (x2 - x1) * (y - y1) / (y2 - y1);
        } else if code_out & OUTCODE_X_OVER != 0 {
            x = w - 1;
            y = y1 + (y2 - y1) * (x - x1) / (x2 - x1);
        } else {
            x = 0;
            y = y1 + (y2 - y1) * (x - x1) / (x2 - x1);
        }

        if code_out == code1 {
            x1 = x;
            y1 = y;
            code1 = outcode(x1, y1, w, h);
        } else {
            x2 = x;
            y2 = y;
            code2 = outcode(x2, y2, w, h);
        }
    }

    log::trace!("clip gave up on {:?}", seg);
    None
}

impl Canvas {
    /// Clip `seg` against this canvas. See [`clip_segment`].
    pub fn clip_segment(&self, seg: Segment) -> Option<Segment> {
        clip_segment(seg, self.width(), self.height())
    }
}

// ============================================================================
// Tests
// ============================================================================
