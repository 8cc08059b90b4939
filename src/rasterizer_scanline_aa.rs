//! Polygon scanline rasterizer.
//!
//! Accepts contours (move_to/line_to/close or any `VertexSource`), turns them
//! into sorted coverage cells, and sweeps them out one scanline at a time.
//! Coverage passes through a 256-entry gamma table, which is how aliased
//! rendering is done: a threshold table maps every partial coverage to
//! either nothing or full.

use crate::basics::{
    is_close, is_move_to, is_stop, is_vertex, poly_coord, FillingRule, VertexSource,
    POLY_SUBPIXEL_SHIFT,
};
use crate::gamma::{GammaFunction, GammaNone, GammaThreshold};
use crate::rasterizer_cells_aa::RasterizerCellsAa;
use crate::rasterizer_sl_clip::RasterizerSlClip;

const AA_SHIFT: u32 = 8;
const AA_SCALE: u32 = 1 << AA_SHIFT;
const AA_MASK: u32 = AA_SCALE - 1;
const AA_SCALE2: u32 = AA_SCALE * 2;
const AA_MASK2: u32 = AA_SCALE2 - 1;

// ============================================================================
// Scanline trait: what sweep_scanline feeds coverage into
// ============================================================================

pub trait Scanline {
    /// Prepare for a new scanline, clearing all span data.
    fn reset_spans(&mut self);

    /// Add a single cell at position `x` with coverage `cover`.
    fn add_cell(&mut self, x: i32, cover: u32);

    /// Add a horizontal span of `len` pixels starting at `x`, all with `cover`.
    fn add_span(&mut self, x: i32, len: u32, cover: u32);

    /// Finalize the scanline at the given Y coordinate.
    fn finalize(&mut self, y: i32);

    /// Number of spans in this scanline (0 means empty).
    fn num_spans(&self) -> u32;

    fn y(&self) -> i32;
}

// ============================================================================
// RasterizerScanlineAa
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Initial,
    MoveTo,
    LineTo,
    Closed,
}

/// Polygon rasterizer with gamma-mapped coverage output.
///
/// Usage:
/// 1. Optionally set `filling_rule()`, `clip_box()` and `gamma()`
/// 2. Define contours with `move_to_d()` / `line_to_d()` or `add_path()`
/// 3. Call `rewind_scanlines()` then repeatedly `sweep_scanline()`
///
/// Open contours are closed automatically on the next `move_to_d` and
/// before sweeping.
#[derive(Debug)]
pub struct RasterizerScanlineAa {
    outline: RasterizerCellsAa,
    clipper: RasterizerSlClip,
    filling_rule: FillingRule,
    gamma: [u8; AA_SCALE as usize],
    start_x: i32,
    start_y: i32,
    status: Status,
    scan_y: i32,
}

impl Default for RasterizerScanlineAa {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterizerScanlineAa {
    pub fn new() -> Self {
        let mut ras = Self {
            outline: RasterizerCellsAa::new(),
            clipper: RasterizerSlClip::new(),
            filling_rule: FillingRule::NonZero,
            gamma: [0; AA_SCALE as usize],
            start_x: 0,
            start_y: 0,
            status: Status::Initial,
            scan_y: 0,
        };
        ras.gamma(&GammaNone);
        ras
    }

    /// Discard all polygon data. Clip box, rule and gamma are kept.
    pub fn reset(&mut self) {
        self.outline.reset();
        self.status = Status::Initial;
    }

    pub fn filling_rule(&mut self, rule: FillingRule) {
        self.filling_rule = rule;
    }

    /// Rebuild the coverage table from a gamma function.
    pub fn gamma(&mut self, gamma_function: &dyn GammaFunction) {
        for (i, g) in self.gamma.iter_mut().enumerate() {
            let v = gamma_function.call(i as f64 / AA_MASK as f64) * AA_MASK as f64;
            *g = v.round().clamp(0.0, AA_MASK as f64) as u8;
        }
    }

    /// Anti-aliased coverage, or a hard 50% threshold when `false`.
    pub fn set_anti_alias(&mut self, anti_alias: bool) {
        if anti_alias {
            self.gamma(&GammaNone);
        } else {
            self.gamma(&GammaThreshold::new(0.5));
        }
    }

    /// Set the clipping rectangle in pixel coordinates.
    pub fn clip_box(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.reset();
        self.clipper
            .clip_box(poly_coord(x1), poly_coord(y1), poly_coord(x2), poly_coord(y2));
    }

    // ========================================================================
    // Path building
    // ========================================================================

    pub fn close_polygon(&mut self) {
        if self.status == Status::LineTo {
            self.clipper
                .line_to(&mut self.outline, self.start_x, self.start_y);
            self.status = Status::Closed;
        }
    }

    pub fn move_to_d(&mut self, x: f64, y: f64) {
        if self.outline.sorted() {
            self.reset();
        }
        self.close_polygon();
        self.start_x = poly_coord(x);
        self.start_y = poly_coord(y);
        self.clipper.move_to(self.start_x, self.start_y);
        self.status = Status::MoveTo;
    }

    pub fn line_to_d(&mut self, x: f64, y: f64) {
        self.clipper
            .line_to(&mut self.outline, poly_coord(x), poly_coord(y));
        self.status = Status::LineTo;
    }

    /// Dispatch one path command.
    pub fn add_vertex(&mut self, x: f64, y: f64, cmd: u32) {
        if is_move_to(cmd) {
            self.move_to_d(x, y);
        } else if is_vertex(cmd) {
            self.line_to_d(x, y);
        } else if is_close(cmd) {
            self.close_polygon();
        }
    }

    /// Add all vertices from a vertex source.
    pub fn add_path(&mut self, vs: &mut dyn VertexSource, path_id: u32) {
        let mut x = 0.0;
        let mut y = 0.0;

        vs.rewind(path_id);
        if self.outline.sorted() {
            self.reset();
        }
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            self.add_vertex(x, y, cmd);
        }
    }

    // ========================================================================
    // Bounding box
    // ========================================================================

    pub fn min_x(&self) -> i32 {
        self.outline.min_x()
    }
    pub fn max_x(&self) -> i32 {
        self.outline.max_x()
    }

    // ========================================================================
    // Scanline sweeping
    // ========================================================================

    /// Sort cells and prepare for sweeping. Returns `false` when there is
    /// nothing to render.
    pub fn rewind_scanlines(&mut self) -> bool {
        self.close_polygon();
        self.outline.sort_cells();
        if self.outline.total_cells() == 0 {
            return false;
        }
        self.scan_y = self.outline.min_y();
        true
    }

    /// Coverage for an accumulated area, after the filling rule and gamma.
    #[inline]
    pub fn calculate_alpha(&self, area: i32) -> u32 {
        let mut cover = area >> (POLY_SUBPIXEL_SHIFT * 2 + 1 - AA_SHIFT);

        if cover < 0 {
            cover = -cover;
        }
        if self.filling_rule == FillingRule::EvenOdd {
            cover &= AA_MASK2 as i32;
            if cover > AA_SCALE as i32 {
                cover = AA_SCALE2 as i32 - cover;
            }
        }
        if cover > AA_MASK as i32 {
            cover = AA_MASK as i32;
        }
        self.gamma[cover as usize] as u32
    }

    /// Extract the next non-empty scanline. Returns `false` when every
    /// scanline has been consumed.
    pub fn sweep_scanline<SL: Scanline>(&mut self, sl: &mut SL) -> bool {
        loop {
            if self.scan_y > self.outline.max_y() {
                return false;
            }
            sl.reset_spans();

            let mut cells = self.outline.scanline_cells(self.scan_y).peekable();
            let mut cover: i32 = 0;

            while let Some(cell) = cells.next() {
                let x = cell.x;
                let mut area = cell.area;
                cover += cell.cover;

                // Merge every cell at the same x.
                while let Some(next) = cells.next_if(|c| c.x == x) {
                    area += next.area;
                    cover += next.cover;
                }

                let mut span_start = x;
                if area != 0 {
                    let alpha = self.calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                    if alpha != 0 {
                        sl.add_cell(x, alpha);
                    }
                    span_start = x + 1;
                }

                if let Some(next) = cells.peek() {
                    if next.x > span_start {
                        let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                        if alpha != 0 {
                            sl.add_span(span_start, (next.x - span_start) as u32, alpha);
                        }
                    }
                }
            }

            if sl.num_spans() > 0 {
                break;
            }
            self.scan_y += 1;
        }

        sl.finalize(self.scan_y);
        self.scan_y += 1;
        true
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{PointD, Polygon};
    use crate::scanline_u::ScanlineU8;

    fn square(x: f64, y: f64, s: f64) -> Polygon {
        Polygon::new(vec![
            PointD::new(x, y),
            PointD::new(x + s, y),
            PointD::new(x + s, y + s),
            PointD::new(x, y + s),
        ])
    }

    /// Collect (x, y, cover) for every covered pixel.
    fn coverage(ras: &mut RasterizerScanlineAa) -> Vec<(i32, i32, u8)> {
        let mut out = Vec::new();
        if !ras.rewind_scanlines() {
            return out;
        }
        let mut sl = ScanlineU8::new();
        sl.reset(ras.min_x(), ras.max_x());
        while ras.sweep_scanline(&mut sl) {
            let y = sl.y();
            for span in sl.begin() {
                for (i, &c) in sl.span_covers(span).iter().enumerate() {
                    out.push((span.x + i as i32, y, c));
                }
            }
        }
        out
    }

    #[test]
    fn test_empty_rasterizer() {
        let mut ras = RasterizerScanlineAa::new();
        assert!(!ras.rewind_scanlines());
    }

    #[test]
    fn test_pixel_aligned_square_is_fully_covered() {
        let mut ras = RasterizerScanlineAa::new();
        ras.add_path(&mut square(2.0, 3.0, 4.0), 0);
        let cov = coverage(&mut ras);
        assert_eq!(cov.len(), 16);
        assert!(cov.iter().all(|&(_, _, c)| c == 255));
        assert!(cov.iter().all(|&(x, y, _)| (2..6).contains(&x) && (3..7).contains(&y)));
    }

    #[test]
    fn test_half_pixel_edge_gives_half_coverage() {
        let mut ras = RasterizerScanlineAa::new();
        ras.add_path(&mut square(0.5, 0.0, 2.0), 0);
        let cov = coverage(&mut ras);
        let first = cov.iter().find(|&&(x, y, _)| x == 0 && y == 0).map(|c| c.2);
        assert!(matches!(first, Some(c) if (126..=129).contains(&c)));
    }

    #[test]
    fn test_aliased_threshold() {
        let mut ras = RasterizerScanlineAa::new();
        ras.set_anti_alias(false);
        ras.add_path(&mut square(0.3, 0.0, 2.0), 0);
        let cov = coverage(&mut ras);
        assert!(cov.iter().all(|&(_, _, c)| c == 255));
        // x=0 is 70% covered and kept; x=2 is 30% covered and dropped.
        let xs: Vec<i32> = cov.iter().filter(|c| c.1 == 0).map(|c| c.0).collect();
        assert_eq!(xs, vec![0, 1]);

        ras.reset();
        ras.add_path(&mut square(0.7, 0.0, 2.0), 0);
        let cov = coverage(&mut ras);
        let xs: Vec<i32> = cov.iter().filter(|c| c.1 == 0).map(|c| c.0).collect();
        assert_eq!(xs, vec![1, 2]);
    }

    #[test]
    fn test_nested_same_winding_even_odd_vs_nonzero() {
        let outer = square(0.0, 0.0, 6.0);
        let mut inner = Polygon::new(square(2.0, 2.0, 2.0).points().to_vec());

        let mut ras = RasterizerScanlineAa::new();
        ras.add_path(&mut outer.clone(), 0);
        ras.add_path(&mut inner, 0);
        let nonzero = coverage(&mut ras);
        assert!(nonzero.iter().any(|&(x, y, _)| x == 3 && y == 3));

        let mut ras = RasterizerScanlineAa::new();
        ras.filling_rule(FillingRule::EvenOdd);
        ras.add_path(&mut outer.clone(), 0);
        ras.add_path(&mut inner, 0);
        let evenodd = coverage(&mut ras);
        assert!(!evenodd.iter().any(|&(x, y, _)| x == 3 && y == 3));
    }

    #[test]
    fn test_clip_box_limits_output() {
        let mut ras = RasterizerScanlineAa::new();
        ras.clip_box(0.0, 0.0, 4.0, 4.0);
        ras.add_path(&mut square(-10.0, -10.0, 30.0), 0);
        let cov = coverage(&mut ras);
        assert_eq!(cov.len(), 16);
        assert!(cov.iter().all(|&(_, _, c)| c == 255));
    }

    #[test]
    fn test_manual_contour_autocloses() {
        let mut ras = RasterizerScanlineAa::new();
        ras.move_to_d(0.0, 0.0);
        ras.line_to_d(4.0, 0.0);
        ras.line_to_d(4.0, 4.0);
        ras.line_to_d(0.0, 4.0);
        assert_eq!(coverage(&mut ras).len(), 16);
    }
}
