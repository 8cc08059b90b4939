//! The rendered overlay layer.
//!
//! `RenderedLayer::render` rasterizes a `Scene` into a transparent surface
//! the size of the selection, one draw operation at a time, each blended
//! onto what is already there. The finished layer is read-only; the
//! compositor reads it through the bilinear `sample`.

use crate::arrowhead::Arrowhead;
use crate::basics::{ifloor, FillingRule};
use crate::color::Rgba8;
use crate::math_stroke::{LineCap, MathStroke};
use crate::path_storage::PathStorage;
use crate::pixfmt_rgba::PixfmtSurface;
use crate::rasterizer_scanline_aa::RasterizerScanlineAa;
use crate::renderer_base::RendererBase;
use crate::renderer_scanline::render_scanlines_aa_solid;
use crate::scanline_u::ScanlineU8;
use crate::scene::{DrawOp, Scene, DIMENSION_COLOR, DIMENSION_PEN_WIDTH};
use crate::surface::Surface;
use crate::text::LabelFace;
use crate::vcgen_dash::stroke_dotted;

/// Fractional bits of the bilinear sampler.
pub const SAMPLE_SUBPIXEL_SHIFT: u32 = 8;
pub const SAMPLE_SUBPIXEL_SCALE: i64 = 1 << SAMPLE_SUBPIXEL_SHIFT;
pub const SAMPLE_SUBPIXEL_MASK: i64 = SAMPLE_SUBPIXEL_SCALE - 1;

// ============================================================================
// Painter
// ============================================================================

/// Rasterizer, scanline and renderer bound to one surface.
struct Painter<'a> {
    ras: RasterizerScanlineAa,
    sl: ScanlineU8,
    ren: RendererBase<PixfmtSurface<'a>>,
}

impl<'a> Painter<'a> {
    fn new(surface: &'a mut Surface) -> Self {
        let mut ras = RasterizerScanlineAa::new();
        ras.clip_box(0.0, 0.0, surface.width() as f64, surface.height() as f64);
        Self {
            ras,
            sl: ScanlineU8::new(),
            ren: RendererBase::new(PixfmtSurface::new(surface)),
        }
    }

    /// Fill `path` in one pass.
    fn fill(&mut self, path: &mut PathStorage, color: Rgba8, rule: FillingRule, anti_alias: bool) {
        if path.is_empty() {
            return;
        }
        self.ras.reset();
        self.ras.filling_rule(rule);
        self.ras.set_anti_alias(anti_alias);
        self.ras.add_path(path, 0);
        render_scanlines_aa_solid(&mut self.ras, &mut self.sl, &mut self.ren, &color);
    }

    fn draw(&mut self, op: &DrawOp, scene: &Scene, face: &LabelFace) {
        let mut path = PathStorage::new();
        match op {
            DrawOp::Fill(f) => {
                path.add_contour(&f.points);
                self.fill(&mut path, f.color.into(), FillingRule::EvenOdd, scene.anti_alias);
            }
            DrawOp::Edge { from, to, dotted } => {
                let pen = MathStroke::new(scene.edge_width);
                if *dotted {
                    stroke_dotted(&pen, &mut path, *from, *to);
                } else {
                    pen.stroke_segment(&mut path, *from, *to, LineCap::Round, LineCap::Round);
                }
                self.fill(&mut path, scene.edge_color.into(), FillingRule::NonZero, scene.anti_alias);
            }
            DrawOp::Dimension { from, to } => {
                let pen = MathStroke::new(DIMENSION_PEN_WIDTH);
                pen.stroke_segment(&mut path, *from, *to, LineCap::Butt, LineCap::Butt);
                Arrowhead::anchor_for_pen(DIMENSION_PEN_WIDTH).add_both_ends(&mut path, *from, *to);
                self.fill(&mut path, DIMENSION_COLOR.into(), FillingRule::NonZero, true);
            }
            DrawOp::Label(label) => {
                let mut outline = label.outline(face);
                self.fill(&mut outline, DIMENSION_COLOR.into(), FillingRule::NonZero, true);
            }
        }
    }
}

// ============================================================================
// RenderedLayer
// ============================================================================

/// Fully drawn overlay, sized to the selection, transparent where nothing
/// was drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLayer {
    surface: Surface,
}

impl RenderedLayer {
    /// Draw every operation of `scene` into a `width` × `height` layer.
    pub fn render(scene: &Scene, width: u32, height: u32, face: &LabelFace) -> Self {
        let mut surface = Surface::new(width, height);
        {
            let mut painter = Painter::new(&mut surface);
            for op in &scene.ops {
                painter.draw(op, scene, face);
            }
        }
        log::trace!("layer {}x{}: {} draw ops", width, height, scene.ops.len());
        Self { surface }
    }

    #[cfg(test)]
    pub(crate) fn from_surface(surface: Surface) -> Self {
        Self { surface }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Bilinear sample at (x, y) in layer pixels.
    ///
    /// Coordinates outside `[0, width) × [0, height)` are transparent.
    /// Inside, the right and bottom neighbors clamp to the last column and
    /// row. Colors are weighted by alpha so transparent neighbors do not
    /// darken the result. Integer coordinates return the pixel unchanged.
    pub fn sample(&self, x: f64, y: f64) -> Rgba8 {
        let w = self.surface.width() as f64;
        let h = self.surface.height() as f64;
        if !(x >= 0.0 && y >= 0.0 && x < w && y < h) {
            return Rgba8::TRANSPARENT;
        }

        let x_hr = (x * SAMPLE_SUBPIXEL_SCALE as f64) as i64;
        let y_hr = (y * SAMPLE_SUBPIXEL_SCALE as f64) as i64;
        let x_lr = ifloor(x);
        let y_lr = ifloor(y);
        let x_frac = x_hr & SAMPLE_SUBPIXEL_MASK;
        let y_frac = y_hr & SAMPLE_SUBPIXEL_MASK;
        if x_frac == 0 && y_frac == 0 {
            return self.surface.pixel(x_lr, y_lr);
        }

        let x_next = (x_lr + 1).min(self.surface.width() as i32 - 1);
        let y_next = (y_lr + 1).min(self.surface.height() as i32 - 1);
        let subpix = SAMPLE_SUBPIXEL_SCALE;
        let taps = [
            (x_lr, y_lr, (subpix - x_frac) * (subpix - y_frac)),
            (x_next, y_lr, x_frac * (subpix - y_frac)),
            (x_lr, y_next, (subpix - x_frac) * y_frac),
            (x_next, y_next, x_frac * y_frac),
        ];

        let mut alpha = 0i64;
        let mut rgb = [0i64; 3];
        for (px, py, weight) in taps {
            let p = self.surface.pixel(px, py);
            let wa = weight * p.a as i64;
            alpha += wa;
            rgb[0] += wa * p.r as i64;
            rgb[1] += wa * p.g as i64;
            rgb[2] += wa * p.b as i64;
        }
        if alpha == 0 {
            return Rgba8::TRANSPARENT;
        }

        let shift = SAMPLE_SUBPIXEL_SHIFT * 2;
        let half = alpha / 2;
        Rgba8::new(
            ((rgb[0] + half) / alpha) as u8,
            ((rgb[1] + half) / alpha) as u8,
            ((rgb[2] + half) / alpha) as u8,
            ((alpha + (1 << (shift - 1))) >> shift) as u8,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorRgb;
    use crate::config::{CuboidConfig, FillStyle};

    fn opaque_count(layer: &RenderedLayer) -> usize {
        layer.surface().pixels().iter().filter(|p| p.a == 255).count()
    }

    #[test]
    fn test_empty_scene_is_transparent() {
        let cfg = CuboidConfig {
            edge_width: 0,
            ..CuboidConfig::default()
        };
        let scene = Scene::build(&cfg, 50, 40);
        let layer = RenderedLayer::render(&scene, 50, 40, &LabelFace::default());
        assert_eq!((layer.width(), layer.height()), (50, 40));
        assert!(layer.surface().pixels().iter().all(|p| p.a == 0));
    }

    #[test]
    fn test_solid_fill_color() {
        let fill = ColorRgb::new(200, 100, 50);
        let cfg = CuboidConfig {
            fill_style: FillStyle::Solid,
            fill_color: fill,
            edge_width: 0,
            ..CuboidConfig::default()
        };
        let scene = Scene::build(&cfg, 400, 400);
        let layer = RenderedLayer::render(&scene, 400, 400, &LabelFace::default());
        let base = scene.vertices.base();
        // A point just inside the front-bottom corner, above the base.
        let p = layer.surface().pixel(base.x as i32, base.y as i32 - 20);
        assert_eq!(p, Rgba8::new_opaque(200, 100, 50));
        assert_eq!(layer.surface().pixel(0, 0), Rgba8::TRANSPARENT);
    }

    #[test]
    fn test_aliased_edges_are_binary() {
        let cfg = CuboidConfig {
            anti_alias: false,
            edge_width: 3,
            ..CuboidConfig::default()
        };
        let scene = Scene::build(&cfg, 400, 400);
        let layer = RenderedLayer::render(&scene, 400, 400, &LabelFace::default());
        assert!(opaque_count(&layer) > 0);
        assert!(layer
            .surface()
            .pixels()
            .iter()
            .all(|p| p.a == 0 || p.a == 255));
    }

    #[test]
    fn test_antialiased_edges_have_partial_alpha() {
        let cfg = CuboidConfig::default();
        let scene = Scene::build(&cfg, 400, 400);
        let layer = RenderedLayer::render(&scene, 400, 400, &LabelFace::default());
        assert!(layer
            .surface()
            .pixels()
            .iter()
            .any(|p| p.a > 0 && p.a < 255));
        // Partially covered edge pixels keep the edge color.
        assert!(layer
            .surface()
            .pixels()
            .iter()
            .filter(|p| p.a > 0)
            .all(|p| p.r == 0 && p.g == 0 && p.b == 0));
    }

    #[test]
    fn test_dimensions_draw_red_even_when_aliased() {
        let cfg = CuboidConfig {
            anti_alias: false,
            edge_width: 0,
            draw_footprint_dimensions: true,
            ..CuboidConfig::default()
        };
        let scene = Scene::build(&cfg, 500, 500);
        let layer = RenderedLayer::render(&scene, 500, 500, &LabelFace::default());
        let px = layer.surface().pixels();
        assert!(px.iter().any(|p| p.a > 0 && p.a < 255));
        assert!(px.iter().filter(|p| p.a > 0).all(|p| p.r == 255 && p.g == 0 && p.b == 0));
    }

    #[test]
    fn test_sample_integer_and_out_of_bounds() {
        let mut s = Surface::new(2, 2);
        s.set(0, 0, Rgba8::new(10, 20, 30, 255));
        s.set(1, 1, Rgba8::new(200, 0, 0, 100));
        let layer = RenderedLayer::from_surface(s);
        assert_eq!(layer.sample(0.0, 0.0), Rgba8::new(10, 20, 30, 255));
        assert_eq!(layer.sample(1.0, 1.0), Rgba8::new(200, 0, 0, 100));
        assert_eq!(layer.sample(-0.5, 0.0), Rgba8::TRANSPARENT);
        assert_eq!(layer.sample(2.0, 0.0), Rgba8::TRANSPARENT);
        assert_eq!(layer.sample(0.0, 2.0), Rgba8::TRANSPARENT);
        assert_eq!(layer.sample(f64::NAN, 0.0), Rgba8::TRANSPARENT);
    }

    #[test]
    fn test_sample_interpolates_alpha_not_color() {
        let mut s = Surface::new(2, 1);
        s.set(0, 0, Rgba8::new(255, 0, 0, 255));
        let layer = RenderedLayer::from_surface(s);
        let mid = layer.sample(0.5, 0.0);
        // Half the alpha, but the transparent neighbor adds no black.
        assert_eq!(mid, Rgba8::new(255, 0, 0, 128));
    }

    #[test]
    fn test_sample_clamps_at_last_column() {
        let s = Surface::filled(3, 3, Rgba8::new(0, 0, 255, 255));
        let layer = RenderedLayer::from_surface(s);
        assert_eq!(layer.sample(2.5, 2.5), Rgba8::new(0, 0, 255, 255));
    }
}
