//! Color type and operations.
//!
//! `Pixel` stores three f64 channels that are normalized to `[0, 1]` by
//! convention. Writers are not forced to stay in range; the filters that
//! can overshoot (bicubic sampling, bloom) clamp their own output.
//!
//! Byte conversion truncates by default, which keeps files produced by this
//! crate byte-identical with older PPM writers. A rounding variant is
//! available through [`ByteConversion::Round`].

// ============================================================================
// Byte conversion
// ============================================================================

/// Strategy used when turning a normalized channel into an 8-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteConversion {
    /// `(v * 255) as u8`, dropping the fraction.
    #[default]
    Truncate,
    /// `round(v * 255) as u8`.
    Round,
}

impl ByteConversion {
    /// Convert a normalized channel to a byte. Out-of-range input saturates
    /// at 0 or 255.
    #[inline]
    pub fn to_u8(self, v: f64) -> u8 {
        match self {
            ByteConversion::Truncate => (v * 255.0) as u8,
            ByteConversion::Round => (v * 255.0).round() as u8,
        }
    }
}

/// Convert a byte channel to its normalized value (`b / 255`).
#[inline]
pub fn to_double(b: u8) -> f64 {
    b as f64 / 255.0
}

/// Convert a normalized channel to a byte by truncation.
#[inline]
pub fn from_double(v: f64) -> u8 {
    ByteConversion::Truncate.to_u8(v)
}

// ============================================================================
// Pixel
// ============================================================================

/// RGB color with f64 components in range [0, 1].
///
/// Equality is exact component equality.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pixel {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0.0, 0.0, 0.0);
    pub const WHITE: Pixel = Pixel::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(to_double(r), to_double(g), to_double(b))
    }

    pub const fn gray(v: f64) -> Self {
        Self::new(v, v, v)
    }

    pub fn gray_u8(v: u8) -> Self {
        Self::gray(to_double(v))
    }

    pub fn red_u8(&self) -> u8 {
        from_double(self.r)
    }

    pub fn green_u8(&self) -> u8 {
        from_double(self.g)
    }

    pub fn blue_u8(&self) -> u8 {
        from_double(self.b)
    }

    pub fn set_red_u8(&mut self, v: u8) -> &mut Self {
        self.r = to_double(v);
        self
    }

    pub fn set_green_u8(&mut self, v: u8) -> &mut Self {
        self.g = to_double(v);
        self
    }

    pub fn set_blue_u8(&mut self, v: u8) -> &mut Self {
        self.b = to_double(v);
        self
    }

    pub fn with_red(self, r: f64) -> Self {
        Self { r, ..self }
    }

    pub fn with_green(self, g: f64) -> Self {
        Self { g, ..self }
    }

    pub fn with_blue(self, b: f64) -> Self {
        Self { b, ..self }
    }

    /// Channels as bytes using the given conversion.
    pub fn to_bytes(&self, conv: ByteConversion) -> [u8; 3] {
        [conv.to_u8(self.r), conv.to_u8(self.g), conv.to_u8(self.b)]
    }

    /// `true` when all three channels are exactly equal.
    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Rec. 601 luma, used for grayscale conversion.
    pub fn luma(&self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Rec. 709 relative luminance, used by the bloom bright-pass.
    pub fn luminance(&self) -> f64 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// Linear blend `fg * alpha + bg * (1 - alpha)`. Alpha is not clamped.
    pub fn blend(background: &Pixel, foreground: &Pixel, alpha: f64) -> Pixel {
        Pixel {
            r: foreground.r * alpha + background.r * (1.0 - alpha),
            g: foreground.g * alpha + background.g * (1.0 - alpha),
            b: foreground.b * alpha + background.b * (1.0 - alpha),
        }
    }

    /// Interpolate between `self` and `c` by parameter `k`.
    pub fn gradient(&self, c: &Pixel, k: f64) -> Pixel {
        Pixel {
            r: self.r + (c.r - self.r) * k,
            g: self.g + (c.g - self.g) * k,
            b: self.b + (c.b - self.b) * k,
        }
    }

    /// Clamp every channel into `[0, 1]`.
    pub fn clamped(self) -> Pixel {
        Pixel {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// Per-channel `min(self, limit)`.
    pub fn min_each(self, limit: f64) -> Pixel {
        Pixel {
            r: self.r.min(limit),
            g: self.g.min(limit),
            b: self.b.min(limit),
        }
    }

    /// Convert to HSV. See [`Hsv`] for the value ranges.
    pub fn to_hsv(&self) -> Hsv {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        if max == 0.0 {
            return Hsv::new(Hsv::ACHROMATIC_HUE, 0.0, 0.0);
        }
        let s = delta / max;
        if delta == 0.0 {
            // Gray: hue is undefined, the sentinel keeps it out of [0, 1).
            return Hsv::new(Hsv::ACHROMATIC_HUE, 0.0, max);
        }

        let mut h = if self.r == max {
            (self.g - self.b) / delta
        } else if self.g == max {
            2.0 + (self.b - self.r) / delta
        } else {
            4.0 + (self.r - self.g) / delta
        };
        h *= 60.0;
        if h < 0.0 {
            h += 360.0;
        }
        Hsv::new(h / 360.0, s, max)
    }

    /// Build a pixel from HSV components.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Pixel {
        if s == 0.0 {
            return Pixel::gray(v);
        }
        let h = (h * 360.0) % 360.0 / 60.0;
        let i = h.floor() as i32;
        let f = h - i as f64;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match i {
            0 => Pixel::new(v, t, p),
            1 => Pixel::new(q, v, p),
            2 => Pixel::new(p, v, t),
            3 => Pixel::new(p, q, v),
            4 => Pixel::new(t, p, v),
            _ => Pixel::new(v, p, q),
        }
    }

    /// Overwrite this pixel from HSV components.
    pub fn set_hsv(&mut self, h: f64, s: f64, v: f64) -> &mut Self {
        *self = Pixel::from_hsv(h, s, v);
        self
    }
}

impl core::ops::Add for Pixel {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
        }
    }
}

impl core::ops::AddAssign for Pixel {
    fn add_assign(&mut self, rhs: Self) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl core::ops::Mul<f64> for Pixel {
    type Output = Self;
    fn mul(self, k: f64) -> Self {
        Self {
            r: self.r * k,
            g: self.g * k,
            b: self.b * k,
        }
    }
}

impl core::ops::Div<f64> for Pixel {
    type Output = Self;
    fn div(self, k: f64) -> Self {
        Self {
            r: self.r / k,
            g: self.g / k,
            b: self.b / k,
        }
    }
}

// ============================================================================
// Hsv
// ============================================================================

/// Hue/saturation/value triple.
///
/// `h` is normalized to `[0, 1)` (degrees / 360). For achromatic input
/// (black or any gray) `h` is [`Hsv::ACHROMATIC_HUE`] and `s` is 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub const ACHROMATIC_HUE: f64 = -1.0;

    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    pub fn is_achromatic(&self) -> bool {
        self.h == Self::ACHROMATIC_HUE
    }

    pub fn to_pixel(&self) -> Pixel {
        Pixel::from_hsv(self.h, self.s, self.v)
    }
}

// ============================================================================
// Tests
// ============================================================================
