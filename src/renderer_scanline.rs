//! Scanline rendering: rasterizer → scanline → renderer.

use crate::pixfmt_rgba::PixelFormat;
use crate::rasterizer_scanline_aa::{RasterizerScanlineAa, Scanline};
use crate::renderer_base::RendererBase;
use crate::scanline_u::ScanlineU8;

/// Render every scanline of the rasterizer in one solid color.
pub fn render_scanlines_aa_solid<PF: PixelFormat>(
    ras: &mut RasterizerScanlineAa,
    sl: &mut ScanlineU8,
    ren: &mut RendererBase<PF>,
    color: &PF::ColorType,
) {
    if !ras.rewind_scanlines() {
        return;
    }

    sl.reset(ras.min_x(), ras.max_x());
    while ras.sweep_scanline(sl) {
        render_scanline_aa_solid(sl, ren, color);
    }
}

fn render_scanline_aa_solid<PF: PixelFormat>(
    sl: &ScanlineU8,
    ren: &mut RendererBase<PF>,
    color: &PF::ColorType,
) {
    let y = sl.y();
    for span in sl.begin() {
        ren.blend_solid_hspan(span.x, y, span.len, color, sl.span_covers(span));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{PointD, Polygon};
    use crate::color::Rgba8;
    use crate::pixfmt_rgba::PixfmtSurface;
    use crate::surface::Surface;

    #[test]
    fn test_triangle_renders_inside_surface() {
        let mut s = Surface::new(20, 20);
        let mut ras = RasterizerScanlineAa::new();
        let mut sl = ScanlineU8::new();
        let red = Rgba8::new_opaque(255, 0, 0);
        ras.add_path(
            &mut Polygon::new(vec![
                PointD::new(2.0, 2.0),
                PointD::new(18.0, 2.0),
                PointD::new(10.0, 18.0),
            ]),
            0,
        );
        {
            let mut ren = RendererBase::new(PixfmtSurface::new(&mut s));
            render_scanlines_aa_solid(&mut ras, &mut sl, &mut ren, &red);
        }
        assert_eq!(s.pixel(10, 5), red);
        assert_eq!(s.pixel(1, 1), Rgba8::TRANSPARENT);
        assert_eq!(s.pixel(2, 15), Rgba8::TRANSPARENT);
    }

    #[test]
    fn test_shape_past_edges_is_clipped() {
        let mut s = Surface::new(8, 8);
        let mut ras = RasterizerScanlineAa::new();
        let mut sl = ScanlineU8::new();
        ras.add_path(
            &mut Polygon::new(vec![
                PointD::new(-20.0, -20.0),
                PointD::new(30.0, -20.0),
                PointD::new(30.0, 30.0),
                PointD::new(-20.0, 30.0),
            ]),
            0,
        );
        let c = Rgba8::new_opaque(1, 2, 3);
        {
            let mut ren = RendererBase::new(PixfmtSurface::new(&mut s));
            render_scanlines_aa_solid(&mut ras, &mut sl, &mut ren, &c);
        }
        assert!(s.pixels().iter().all(|p| *p == c));
    }
}
