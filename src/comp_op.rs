//! Straight-alpha "normal" blending.
//!
//! Both the layer renderer and the compositor put one non-premultiplied
//! color over another with the same operator:
//!
//! ```text
//! y     = dst.a * (255 - src.a) / 255
//! a     = src.a + y
//! rgb   = (src.rgb * src.a + dst.rgb * y) / a
//! ```
//!
//! A fully transparent source leaves the destination untouched, and an
//! opaque source replaces it.

use crate::basics::CoverType;
use crate::color::Rgba8;

/// Blend `src` over `dst`.
#[inline]
pub fn blend_normal(dst: Rgba8, src: Rgba8) -> Rgba8 {
    if src.a == 0 {
        return dst;
    }
    if src.a == 255 || dst.a == 0 {
        return src;
    }

    let sa = src.a as u32;
    let y = dst.a as u32 * (255 - sa) / 255;
    let total = y + sa;
    if total == 0 {
        return Rgba8::TRANSPARENT;
    }
    let channel = |s: u8, d: u8| ((s as u32 * sa + d as u32 * y) / total) as u8;

    Rgba8::new(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        total as u8,
    )
}

/// Blend a solid color scaled by a coverage value.
#[inline]
pub fn blend_normal_cover(dst: Rgba8, c: Rgba8, cover: CoverType) -> Rgba8 {
    if cover == 255 {
        blend_normal(dst, c)
    } else {
        blend_normal(dst, c.with_alpha(Rgba8::mult_cover(c.a, cover)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba8 = Rgba8::new_opaque(255, 0, 0);
    const BLUE: Rgba8 = Rgba8::new_opaque(0, 0, 255);

    #[test]
    fn test_transparent_source_is_identity() {
        let dst = Rgba8::new(10, 20, 30, 40);
        assert_eq!(blend_normal(dst, Rgba8::new(200, 200, 200, 0)), dst);
    }

    #[test]
    fn test_opaque_source_replaces() {
        assert_eq!(blend_normal(BLUE, RED), RED);
        assert_eq!(blend_normal(Rgba8::TRANSPARENT, RED), RED);
    }

    #[test]
    fn test_half_alpha_over_opaque() {
        let out = blend_normal(BLUE, RED.with_alpha(128));
        assert_eq!(out.a, 255);
        assert_eq!(out.r, 128);
        assert_eq!(out.b, 127);
    }

    #[test]
    fn test_half_over_half() {
        let out = blend_normal(BLUE.with_alpha(128), RED.with_alpha(128));
        // y = 128 * 127 / 255 = 63
        assert_eq!(out.a, 191);
        assert_eq!(out.r, (255 * 128 / 191) as u8);
    }

    #[test]
    fn test_partial_source_over_transparent_keeps_color() {
        let out = blend_normal(Rgba8::TRANSPARENT, RED.with_alpha(90));
        assert_eq!(out, RED.with_alpha(90));
    }

    #[test]
    fn test_cover_scales_alpha() {
        let out = blend_normal_cover(Rgba8::TRANSPARENT, RED, 128);
        assert_eq!(out, RED.with_alpha(128));
        assert_eq!(blend_normal_cover(BLUE, RED, 0), BLUE);
    }
}
