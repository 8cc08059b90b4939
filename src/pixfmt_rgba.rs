//! RGBA pixel format over a `Surface`.
//!
//! `PixelFormat` is the layer between the scanline renderer and pixel
//! storage. `PixfmtSurface` writes straight-alpha `Rgba8` pixels and blends
//! with the normal operator from `comp_op`.

use crate::basics::CoverType;
use crate::color::Rgba8;
use crate::comp_op::blend_normal_cover;
use crate::surface::Surface;

// ============================================================================
// PixelFormat trait
// ============================================================================

/// Pixel storage the renderer can blend into. Callers clip; implementors
/// may assume every coordinate is inside `width` x `height`.
pub trait PixelFormat {
    type ColorType;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Blend `len` pixels with per-pixel coverage values.
    fn blend_solid_hspan(
        &mut self,
        x: i32,
        y: i32,
        len: u32,
        c: &Self::ColorType,
        covers: &[CoverType],
    );
}

// ============================================================================
// PixfmtSurface
// ============================================================================

pub struct PixfmtSurface<'a> {
    surface: &'a mut Surface,
}

impl<'a> PixfmtSurface<'a> {
    pub fn new(surface: &'a mut Surface) -> Self {
        Self { surface }
    }

    #[inline]
    fn row_span(&mut self, x: i32, y: i32, len: u32) -> &mut [Rgba8] {
        let x = x as usize;
        &mut self.surface.row_slice_mut(y as u32)[x..x + len as usize]
    }
}

impl PixelFormat for PixfmtSurface<'_> {
    type ColorType = Rgba8;

    fn width(&self) -> u32 {
        self.surface.width()
    }

    fn height(&self) -> u32 {
        self.surface.height()
    }

    fn blend_solid_hspan(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, covers: &[CoverType]) {
        for (p, &cover) in self.row_span(x, y, len).iter_mut().zip(covers) {
            if cover != 0 {
                *p = blend_normal_cover(*p, *c, cover);
            }
        }
    }
}
