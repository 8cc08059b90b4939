//! Base renderer with clipping.
//!
//! Wraps a pixel format with a clip rectangle so every write stays inside
//! the visible area. The clip box is half-open, like every `RectI`.

use crate::basics::{CoverType, RectI};
use crate::pixfmt_rgba::PixelFormat;

pub struct RendererBase<PF: PixelFormat> {
    ren: PF,
    clip_box: RectI,
}

impl<PF: PixelFormat> RendererBase<PF> {
    /// Clip box is the full buffer.
    pub fn new(ren: PF) -> Self {
        let clip_box = RectI::from_xywh(0, 0, ren.width(), ren.height());
        Self { ren, clip_box }
    }

    /// Blend a span with per-pixel coverage, dropping the parts outside the
    /// clip box.
    pub fn blend_solid_hspan(
        &mut self,
        mut x: i32,
        y: i32,
        mut len: i32,
        c: &PF::ColorType,
        covers: &[CoverType],
    ) {
        let b = self.clip_box;
        if y < b.y1 || y >= b.y2 {
            return;
        }

        let mut covers_offset = 0usize;
        if x < b.x1 {
            let d = b.x1 - x;
            len -= d;
            if len <= 0 {
                return;
            }
            covers_offset += d as usize;
            x = b.x1;
        }
        if x + len > b.x2 {
            len = b.x2 - x;
            if len <= 0 {
                return;
            }
        }
        self.ren
            .blend_solid_hspan(x, y, len as u32, c, &covers[covers_offset..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;
    use crate::pixfmt_rgba::PixfmtSurface;
    use crate::surface::Surface;

    const RED: Rgba8 = Rgba8::new_opaque(255, 0, 0);

    fn painted(s: &Surface) -> usize {
        s.pixels().iter().filter(|p| p.a != 0).count()
    }

    #[test]
    fn test_rows_outside_are_dropped() {
        let mut s = Surface::new(5, 4);
        let mut ren = RendererBase::new(PixfmtSurface::new(&mut s));
        ren.blend_solid_hspan(0, -1, 5, &RED, &[255; 5]);
        ren.blend_solid_hspan(0, 4, 5, &RED, &[255; 5]);
        ren.blend_solid_hspan(0, 3, 5, &RED, &[255; 5]);
        drop(ren);
        assert_eq!(painted(&s), 5);
        assert_eq!(s.pixel(4, 3), RED);
    }

    #[test]
    fn test_blend_solid_hspan_clipped_both_sides() {
        let mut s = Surface::new(4, 1);
        let mut ren = RendererBase::new(PixfmtSurface::new(&mut s));
        let covers = [10, 20, 30, 40, 50, 60, 70, 80];
        ren.blend_solid_hspan(-2, 0, 8, &RED, &covers);
        assert_eq!(s.pixel(0, 0).a, 30);
        assert_eq!(s.pixel(3, 0).a, 60);
    }

    #[test]
    fn test_span_entirely_outside_is_dropped() {
        let mut s = Surface::new(4, 2);
        let mut ren = RendererBase::new(PixfmtSurface::new(&mut s));
        ren.blend_solid_hspan(-6, 0, 3, &RED, &[255; 3]);
        ren.blend_solid_hspan(4, 1, 3, &RED, &[255; 3]);
        drop(ren);
        assert_eq!(painted(&s), 0);
    }
}
