//! Tile compositing.
//!
//! For each pixel of a tile, the layer is sampled at the pixel's position
//! relative to the selection and blended over the source pixel with the
//! normal operator; the result goes to the destination. Tiles never write
//! outside their rectangle, so disjoint tiles can run on different threads.

use crate::basics::RectI;
use crate::cancel::CancelToken;
use crate::comp_op::blend_normal;
use crate::error::{RenderError, Result};
use crate::layer::RenderedLayer;
use crate::surface::{Surface, SurfaceMut};

/// Composite one tile.
///
/// `selection` places the layer: layer pixel (0, 0) lies at
/// (`selection.x1`, `selection.y1`). `rect` is clipped to the source and
/// destination bounds first; an empty intersection does nothing. The
/// cancel token is checked before each row, and a cancelled tile keeps
/// the rows already written.
pub fn composite_tile<D: SurfaceMut + ?Sized>(
    layer: &RenderedLayer,
    selection: RectI,
    src: &Surface,
    dst: &mut D,
    rect: RectI,
    cancel: &CancelToken,
) -> Result<()> {
    let clip = rect.intersect(&src.bounds()).intersect(&dst.bounds());
    if clip.is_empty() {
        return Ok(());
    }
    log::trace!(
        "composite tile ({}, {})-({}, {})",
        clip.x1,
        clip.y1,
        clip.x2,
        clip.y2
    );

    let dst_left = dst.bounds().x1;
    for y in clip.y1..clip.y2 {
        if cancel.is_cancelled() {
            return Err(RenderError::Cancelled);
        }
        let src_row = src.row(y as u32);
        let Some(dst_row) = dst.row_mut(y) else {
            continue;
        };
        let sy = (y - selection.y1) as f64;
        for x in clip.x1..clip.x2 {
            let overlay = layer.sample((x - selection.x1) as f64, sy);
            dst_row[(x - dst_left) as usize] = blend_normal(src_row[x as usize], overlay);
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
