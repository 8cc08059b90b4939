//! Edge clipping in front of the cell engine.
//!
//! Parts of an edge left or right of the clip box are pulled onto the box
//! border as vertical edges, so the winding of everything inside the box is
//! preserved. Parts above or below the box are dropped, since they cannot
//! contribute coverage to any visible scanline.

use crate::basics::{iround, RectI};
use crate::rasterizer_cells_aa::RasterizerCellsAa;

const CLIP_BOTTOM: u32 = 2;
const CLIP_TOP: u32 = 8;

#[inline]
fn clipping_flags_y(y: i32, b: &RectI) -> u32 {
    ((y > b.y2) as u32 * CLIP_BOTTOM) | ((y < b.y1) as u32 * CLIP_TOP)
}

/// round(a * b / c) without intermediate overflow.
#[inline]
fn mul_div(a: i32, b: i32, c: i32) -> i32 {
    iround(a as f64 * b as f64 / c as f64)
}

/// Clipping front end for `RasterizerCellsAa`. All coordinates are 24.8
/// fixed point; the clip box is inclusive on every side.
#[derive(Debug, Default)]
pub struct RasterizerSlClip {
    clip_box: Option<RectI>,
    x1: i32,
    y1: i32,
}

impl RasterizerSlClip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clip_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.clip_box = Some(RectI::new(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2)));
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x1 = x;
        self.y1 = y;
    }

    /// Emit the edge from the current point to (x2, y2).
    pub fn line_to(&mut self, ras: &mut RasterizerCellsAa, x2: i32, y2: i32) {
        let (x1, y1) = (self.x1, self.y1);
        self.x1 = x2;
        self.y1 = y2;

        let Some(b) = self.clip_box else {
            ras.line(x1, y1, x2, y2);
            return;
        };

        // Both ends beyond the same horizontal border: nothing to draw.
        let f1 = clipping_flags_y(y1, &b);
        let f2 = clipping_flags_y(y2, &b);
        if f1 == f2 && f1 != 0 {
            return;
        }

        // Split at the vertical borders, then flatten outside pieces onto them.
        let mut cuts = [0i32; 2];
        let mut n = 0;
        if x1 != x2 {
            for bx in [b.x1, b.x2] {
                if (x1 < bx && bx < x2) || (x2 < bx && bx < x1) {
                    cuts[n] = bx;
                    n += 1;
                }
            }
        }
        if n == 2 && (cuts[0] - x1).abs() > (cuts[1] - x1).abs() {
            cuts.swap(0, 1);
        }

        let mut px = x1;
        let mut py = y1;
        for &cx in &cuts[..n] {
            let cy = y1 + mul_div(cx - x1, y2 - y1, x2 - x1);
            self.emit_clamped(ras, &b, px, py, cx, cy);
            px = cx;
            py = cy;
        }
        self.emit_clamped(ras, &b, px, py, x2, y2);
    }

    /// A piece that lies entirely on one side of each vertical border.
    fn emit_clamped(&self, ras: &mut RasterizerCellsAa, b: &RectI, x1: i32, y1: i32, x2: i32, y2: i32) {
        let mid = ((x1 as i64 + x2 as i64) / 2) as i32;
        let (x1, x2) = if mid < b.x1 {
            (b.x1, b.x1)
        } else if mid > b.x2 {
            (b.x2, b.x2)
        } else {
            (x1, x2)
        };
        self.line_clip_y(ras, b, x1, y1, x2, y2);
    }

    fn line_clip_y(&self, ras: &mut RasterizerCellsAa, b: &RectI, x1: i32, y1: i32, x2: i32, y2: i32) {
        let f1 = clipping_flags_y(y1, b);
        let f2 = clipping_flags_y(y2, b);

        if f1 | f2 == 0 {
            ras.line(x1, y1, x2, y2);
            return;
        }
        if f1 == f2 {
            return;
        }

        let (mut tx1, mut ty1, mut tx2, mut ty2) = (x1, y1, x2, y2);
        if f1 & CLIP_TOP != 0 {
            tx1 = x1 + mul_div(b.y1 - y1, x2 - x1, y2 - y1);
            ty1 = b.y1;
        }
        if f1 & CLIP_BOTTOM != 0 {
            tx1 = x1 + mul_div(b.y2 - y1, x2 - x1, y2 - y1);
            ty1 = b.y2;
        }
        if f2 & CLIP_TOP != 0 {
            tx2 = x1 + mul_div(b.y1 - y1, x2 - x1, y2 - y1);
            ty2 = b.y1;
        }
        if f2 & CLIP_BOTTOM != 0 {
            tx2 = x1 + mul_div(b.y2 - y1, x2 - x1, y2 - y1);
            ty2 = b.y2;
        }
        ras.line(tx1, ty1, tx2, ty2);
    }
}
