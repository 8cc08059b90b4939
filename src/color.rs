//! Color types and conversions.
//!
//! - `Rgba8`: 8-bit straight-alpha pixel, the storage format of every surface
//! - `ColorRgb`: opaque configuration color (edge and fill colors)
//! - `Hsv`: integer hue/saturation/value triple used by the shading palette

use serde::{Deserialize, Serialize};

use crate::basics::CoverType;

// ============================================================================
// Rgba8 (8-bit per channel, straight alpha)
// ============================================================================

/// RGBA color with u8 components, not premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BASE_SHIFT: u32 = 8;
    pub const BASE_MSB: u32 = 1 << (Self::BASE_SHIFT - 1);

    pub const TRANSPARENT: Rgba8 = Rgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn new_opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fixed-point multiply, exact over u8: `a * b / 255` rounded.
    #[inline]
    pub fn multiply(a: u8, b: u8) -> u8 {
        let t: u32 = a as u32 * b as u32 + Self::BASE_MSB;
        (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT) as u8
    }

    /// Scale an alpha value by a coverage value.
    #[inline]
    pub fn mult_cover(a: u8, cover: CoverType) -> u8 {
        Self::multiply(a, cover)
    }

    /// Same color with its alpha replaced.
    pub fn with_alpha(&self, a: u8) -> Rgba8 {
        Rgba8 { a, ..*self }
    }
}

impl From<ColorRgb> for Rgba8 {
    fn from(c: ColorRgb) -> Self {
        Rgba8::new_opaque(c.r, c.g, c.b)
    }
}

// ============================================================================
// ColorRgb (opaque configuration color)
// ============================================================================

/// An opaque RGB color as configured by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct ColorRgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorRgb {
    pub const BLACK: ColorRgb = ColorRgb::new(0, 0, 0);
    pub const WHITE: ColorRgb = ColorRgb::new(255, 255, 255);
    pub const RED: ColorRgb = ColorRgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode a host color integer laid out as `0xRRGGBB`. Bits above the
    /// low 24 are ignored.
    pub fn from_opaque_int(v: u32) -> Self {
        Self {
            r: ((v >> 16) & 0xFF) as u8,
            g: ((v >> 8) & 0xFF) as u8,
            b: (v & 0xFF) as u8,
        }
    }

    /// Encode as `0xRRGGBB`.
    pub fn to_opaque_int(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

// ============================================================================
// Hsv (integer components)
// ============================================================================

/// HSV color with integer components: hue 0–360, saturation and value 0–100.
///
/// Conversions truncate each component after scaling, so the values match
/// what an integer color-picker would show for the same color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Hsv {
    pub hue: i32,
    pub saturation: i32,
    pub value: i32,
}

impl Hsv {
    pub const fn new(hue: i32, saturation: i32, value: i32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Convert an RGB color. Grays (and black) get hue 0, saturation 0.
    pub fn from_rgb(c: ColorRgb) -> Self {
        let r = c.r as f64;
        let g = c.g as f64;
        let b = c.b as f64;
        let min = r.min(g).min(b);
        let max = r.max(g).max(b);
        let delta = max - min;

        let mut h = 0.0;
        let s;
        if max == 0.0 || delta == 0.0 {
            s = 0.0;
        } else {
            s = delta / max;
            if r == max {
                h = (g - b) / delta;
            } else if g == max {
                h = 2.0 + (b - r) / delta;
            } else {
                h = 4.0 + (r - g) / delta;
            }
            h *= 60.0;
            if h < 0.0 {
                h += 360.0;
            }
        }
        let v = max / 255.0;

        Self {
            hue: h as i32,
            saturation: (s * 100.0) as i32,
            value: (v * 100.0) as i32,
        }
    }

    /// Convert back to RGB. Out-of-range components are clamped first.
    pub fn to_rgb(&self) -> ColorRgb {
        let mut h = self.hue.clamp(0, 360) as f64;
        let s = self.saturation.clamp(0, 100) as f64 / 100.0;
        let v = self.value.clamp(0, 100) as f64 / 100.0;

        let (r, g, b) = if s == 0.0 {
            (v, v, v)
        } else {
            if h >= 360.0 {
                h = 0.0;
            }
            h /= 60.0;
            let sextant = h.floor() as i32;
            let f = h - sextant as f64;
            let p = v * (1.0 - s);
            let q = v * (1.0 - s * f);
            let t = v * (1.0 - s * (1.0 - f));
            match sextant {
                0 => (v, t, p),
                1 => (q, v, p),
                2 => (p, v, t),
                3 => (p, q, v),
                4 => (t, p, v),
                _ => (v, p, q),
            }
        };

        ColorRgb::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    }

    pub fn with_saturation(self, saturation: i32) -> Self {
        Self { saturation, ..self }
    }

    pub fn with_value(self, value: i32) -> Self {
        Self { value, ..self }
    }
}

// ============================================================================
// Tests
// ============================================================================
