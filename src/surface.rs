//! Owned RGBA raster surfaces.
//!
//! A `Surface` is a row-major block of straight-alpha `Rgba8` pixels. It is
//! the storage for the rendered overlay layer and the type hosts use for
//! source and destination images. `bands_mut` splits a surface into disjoint
//! horizontal bands so several tiles can be composited at the same time.

use crate::basics::RectI;
use crate::color::Rgba8;
use crate::error::{RenderError, Result};

// ============================================================================
// SurfaceMut: writable pixel rows
// ============================================================================

/// A destination the compositor can write into.
///
/// `bounds` is the region of absolute pixel coordinates the implementor
/// owns; `row_mut` returns the row at absolute `y`, indexed by absolute `x`
/// minus `bounds().x1`.
pub trait SurfaceMut {
    fn bounds(&self) -> RectI;
    fn row_mut(&mut self, y: i32) -> Option<&mut [Rgba8]>;
}

// ============================================================================
// Surface
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl Surface {
    /// A fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba8::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba8) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Wrap existing row-major pixels. The vector length must be exactly
    /// `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba8>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(RenderError::SurfaceSize {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> RectI {
        RectI::from_xywh(0, 0, self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Pixel at (x, y), or `None` outside the surface.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba8> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Pixel at (x, y); transparent outside the surface.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        self.get(x, y).unwrap_or(Rgba8::TRANSPARENT)
    }

    /// Overwrite one pixel. Writes outside the surface are ignored.
    pub fn set(&mut self, x: i32, y: i32, c: Rgba8) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.pixels[y as usize * self.width as usize + x as usize] = c;
    }

    pub fn clear(&mut self, c: Rgba8) {
        self.pixels.fill(c);
    }

    /// Row `y`. Panics when `y` is outside the surface.
    pub fn row(&self, y: u32) -> &[Rgba8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    /// Mutable row `y`. Panics when `y` is outside the surface.
    pub fn row_slice_mut(&mut self, y: u32) -> &mut [Rgba8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &mut self.pixels[start..start + w]
    }

    /// Split into disjoint bands of `rows_per_band` rows (the last band may be
    /// shorter). Each band can be handed to a different worker thread.
    pub fn bands_mut(&mut self, rows_per_band: u32) -> Vec<SurfaceBand<'_>> {
        let w = self.width as usize;
        let rows = rows_per_band.max(1) as usize;
        if w == 0 {
            return Vec::new();
        }
        self.pixels
            .chunks_mut(w * rows)
            .enumerate()
            .map(|(i, chunk)| SurfaceBand {
                width: self.width,
                top: (i * rows) as i32,
                pixels: chunk,
            })
            .collect()
    }
}

impl SurfaceMut for Surface {
    fn bounds(&self) -> RectI {
        Surface::bounds(self)
    }

    fn row_mut(&mut self, y: i32) -> Option<&mut [Rgba8]> {
        if y < 0 || y >= self.height as i32 {
            return None;
        }
        Some(self.row_slice_mut(y as u32))
    }
}

// ============================================================================
// SurfaceBand: a mutable horizontal slice of a surface
// ============================================================================

/// Rows `top..top + height` of a parent surface, full width.
#[derive(Debug)]
pub struct SurfaceBand<'a> {
    width: u32,
    top: i32,
    pixels: &'a mut [Rgba8],
}

impl SurfaceBand<'_> {
    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn height(&self) -> u32 {
        if self.width == 0 {
            0
        } else {
            (self.pixels.len() / self.width as usize) as u32
        }
    }
}

impl SurfaceMut for SurfaceBand<'_> {
    fn bounds(&self) -> RectI {
        RectI::from_xywh(0, self.top, self.width, self.height())
    }

    fn row_mut(&mut self, y: i32) -> Option<&mut [Rgba8]> {
        let local = y - self.top;
        if local < 0 || local >= self.height() as i32 {
            return None;
        }
        let w = self.width as usize;
        let start = local as usize * w;
        Some(&mut self.pixels[start..start + w])
    }
}

// ============================================================================
// Tests
// ============================================================================
