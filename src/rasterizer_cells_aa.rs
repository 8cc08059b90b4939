//! Anti-aliased cell accumulation.
//!
//! Converts edges in 24.8 fixed-point coordinates into per-pixel cells that
//! carry a winding `cover` and a signed `area`. The scanline rasterizer sorts
//! these cells and integrates them left-to-right to get exact coverage.

use crate::basics::{POLY_SUBPIXEL_MASK, POLY_SUBPIXEL_SCALE, POLY_SUBPIXEL_SHIFT};

// ============================================================================
// CellAa
// ============================================================================

/// Coverage data for one pixel.
///
/// - `cover`: net winding contribution (sum of dy through this cell)
/// - `area`: twice the signed area of the edge fragments inside the cell,
///   used for the partial coverage of the cell itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAa {
    pub x: i32,
    pub y: i32,
    pub cover: i32,
    pub area: i32,
}

impl CellAa {
    const EMPTY: CellAa = CellAa {
        x: i32::MAX,
        y: i32::MAX,
        cover: 0,
        area: 0,
    };

    #[inline]
    fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}

impl Default for CellAa {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SortedY {
    start: u32,
    num: u32,
}

/// Edges longer than this in x are split before walking, keeping the
/// intermediate products inside `i64`.
const DX_LIMIT: i64 = 16384 << POLY_SUBPIXEL_SHIFT;

// ============================================================================
// RasterizerCellsAa
// ============================================================================

/// Edge-to-cell engine. Cells live in a flat `Vec`; sorting builds an index
/// per scanline instead of moving the cells themselves.
#[derive(Debug, Default)]
pub struct RasterizerCellsAa {
    cells: Vec<CellAa>,
    sorted_cells: Vec<u32>,
    sorted_y: Vec<SortedY>,
    curr: CellAa,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    sorted: bool,
}

impl RasterizerCellsAa {
    pub fn new() -> Self {
        let mut r = Self::default();
        r.reset();
        r
    }

    /// Discard all cells.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.sorted_cells.clear();
        self.sorted_y.clear();
        self.curr = CellAa::EMPTY;
        self.min_x = i32::MAX;
        self.min_y = i32::MAX;
        self.max_x = i32::MIN;
        self.max_y = i32::MIN;
        self.sorted = false;
    }

    pub fn min_x(&self) -> i32 {
        self.min_x
    }
    pub fn min_y(&self) -> i32 {
        self.min_y
    }
    pub fn max_x(&self) -> i32 {
        self.max_x
    }
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn sorted(&self) -> bool {
        self.sorted
    }

    /// Cells of scanline `y`, ordered by x. Only valid after `sort_cells`.
    pub fn scanline_cells(&self, y: i32) -> impl Iterator<Item = &CellAa> + '_ {
        let (start, num) = if y < self.min_y || y > self.max_y || self.sorted_y.is_empty() {
            (0, 0)
        } else {
            let sy = self.sorted_y[(y - self.min_y) as usize];
            (sy.start as usize, sy.num as usize)
        };
        self.sorted_cells[start..start + num]
            .iter()
            .map(move |&i| &self.cells[i as usize])
    }

    #[inline]
    fn flush_curr(&mut self) {
        if self.curr.area | self.curr.cover != 0 {
            self.cells.push(self.curr);
        }
    }

    #[inline]
    fn set_curr_cell(&mut self, x: i32, y: i32) {
        if !self.curr.is_at(x, y) {
            self.flush_curr();
            self.curr = CellAa {
                x,
                y,
                cover: 0,
                area: 0,
            };
        }
    }

    #[inline]
    fn extend_bounds(&mut self, ex: i32, ey: i32) {
        self.min_x = self.min_x.min(ex);
        self.max_x = self.max_x.max(ex);
        self.min_y = self.min_y.min(ey);
        self.max_y = self.max_y.max(ey);
    }

    /// Walk a segment that stays inside scanline `ey`. `x1`/`x2` are 24.8
    /// fixed point, `y1`/`y2` the fractional y within the row.
    fn render_hline(&mut self, ey: i32, x1: i32, y1: i32, x2: i32, y2: i32) {
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let fx1 = x1 & POLY_SUBPIXEL_MASK as i32;
        let fx2 = x2 & POLY_SUBPIXEL_MASK as i32;
        let scale = POLY_SUBPIXEL_SCALE as i32;

        if y1 == y2 {
            self.set_curr_cell(ex2, ey);
            return;
        }

        if ex1 == ex2 {
            let delta = y2 - y1;
            self.curr.cover += delta;
            self.curr.area += (fx1 + fx2) * delta;
            return;
        }

        // The segment crosses several cells in this row.
        let mut dx = x2 as i64 - x1 as i64;
        let (mut p, first, incr) = if dx < 0 {
            dx = -dx;
            (fx1 as i64 * (y2 - y1) as i64, 0, -1)
        } else {
            ((scale - fx1) as i64 * (y2 - y1) as i64, scale, 1)
        };

        let mut delta = p.div_euclid(dx) as i32;
        let mut modulo = p.rem_euclid(dx);

        self.curr.cover += delta;
        self.curr.area += (fx1 + first) * delta;

        let mut ex = ex1 + incr;
        self.set_curr_cell(ex, ey);
        let mut y = y1 + delta;

        if ex != ex2 {
            p = scale as i64 * (y2 - y + delta) as i64;
            let lift = p.div_euclid(dx) as i32;
            let rem = p.rem_euclid(dx);
            modulo -= dx;

            while ex != ex2 {
                delta = lift;
                modulo += rem;
                if modulo >= 0 {
                    modulo -= dx;
                    delta += 1;
                }
                self.curr.cover += delta;
                self.curr.area += scale * delta;
                y += delta;
                ex += incr;
                self.set_curr_cell(ex, ey);
            }
        }
        delta = y2 - y;
        self.curr.cover += delta;
        self.curr.area += (fx2 + scale - first) * delta;
    }

    /// Add an edge in 24.8 fixed-point coordinates.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let dx = x2 as i64 - x1 as i64;
        if dx >= DX_LIMIT || dx <= -DX_LIMIT {
            let cx = ((x1 as i64 + x2 as i64) >> 1) as i32;
            let cy = ((y1 as i64 + y2 as i64) >> 1) as i32;
            self.line(x1, y1, cx, cy);
            self.line(cx, cy, x2, y2);
            return;
        }

        let dy = y2 as i64 - y1 as i64;
        let scale = POLY_SUBPIXEL_SCALE as i32;
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let mut ey1 = y1 >> POLY_SUBPIXEL_SHIFT;
        let ey2 = y2 >> POLY_SUBPIXEL_SHIFT;
        let fy1 = y1 & POLY_SUBPIXEL_MASK as i32;
        let fy2 = y2 & POLY_SUBPIXEL_MASK as i32;

        self.extend_bounds(ex1, ey1);
        self.extend_bounds(ex2, ey2);
        self.set_curr_cell(ex1, ey1);

        if ey1 == ey2 {
            self.render_hline(ey1, x1, fy1, x2, fy2);
            return;
        }

        // Vertical edge: one cell per row, no hline walk needed.
        if dx == 0 {
            let two_fx = (x1 - (ex1 << POLY_SUBPIXEL_SHIFT)) << 1;
            let (first, incr) = if dy < 0 { (0, -1) } else { (scale, 1) };

            let mut delta = first - fy1;
            self.curr.cover += delta;
            self.curr.area += two_fx * delta;

            ey1 += incr;
            self.set_curr_cell(ex1, ey1);

            delta = first + first - scale;
            let area = two_fx * delta;
            while ey1 != ey2 {
                self.curr.cover = delta;
                self.curr.area = area;
                ey1 += incr;
                self.set_curr_cell(ex1, ey1);
            }
            delta = fy2 - scale + first;
            self.curr.cover += delta;
            self.curr.area += two_fx * delta;
            return;
        }

        // General case: split the edge at every row boundary.
        let (mut p, first, incr, dy_abs) = if dy < 0 {
            (fy1 as i64 * dx, 0, -1, -dy)
        } else {
            ((scale - fy1) as i64 * dx, scale, 1, dy)
        };

        let mut delta = p.div_euclid(dy_abs) as i32;
        let mut modulo = p.rem_euclid(dy_abs);

        let mut x_from = x1 + delta;
        self.render_hline(ey1, x1, fy1, x_from, first);

        ey1 += incr;
        self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);

        if ey1 != ey2 {
            p = scale as i64 * dx;
            let lift = p.div_euclid(dy_abs) as i32;
            let rem = p.rem_euclid(dy_abs);
            modulo -= dy_abs;

            while ey1 != ey2 {
                delta = lift;
                modulo += rem;
                if modulo >= 0 {
                    modulo -= dy_abs;
                    delta += 1;
                }
                let x_to = x_from + delta;
                self.render_hline(ey1, x_from, scale - first, x_to, first);
                x_from = x_to;

                ey1 += incr;
                self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);
            }
        }
        self.render_hline(ey1, x_from, scale - first, x2, fy2);
    }

    /// Sort cells by y, then x. Idempotent until the next `reset`.
    pub fn sort_cells(&mut self) {
        if self.sorted {
            return;
        }
        self.flush_curr();
        self.curr = CellAa::EMPTY;

        if self.cells.is_empty() {
            return;
        }

        let rows = (self.max_y - self.min_y + 1) as usize;
        self.sorted_y.clear();
        self.sorted_y.resize(rows, SortedY::default());
        self.sorted_cells.clear();
        self.sorted_cells.resize(self.cells.len(), 0);

        // Histogram of cells per row, then prefix sums as start offsets.
        for cell in &self.cells {
            self.sorted_y[(cell.y - self.min_y) as usize].start += 1;
        }
        let mut start = 0u32;
        for sy in &mut self.sorted_y {
            let count = sy.start;
            sy.start = start;
            start += count;
        }

        for (i, cell) in self.cells.iter().enumerate() {
            let sy = &mut self.sorted_y[(cell.y - self.min_y) as usize];
            self.sorted_cells[(sy.start + sy.num) as usize] = i as u32;
            sy.num += 1;
        }

        let cells = &self.cells;
        for sy in &self.sorted_y {
            let row = &mut self.sorted_cells[sy.start as usize..(sy.start + sy.num) as usize];
            row.sort_unstable_by_key(|&i| cells[i as usize].x);
        }

        self.sorted = true;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const S: i32 = POLY_SUBPIXEL_SCALE as i32;

    fn total_cover(ras: &RasterizerCellsAa) -> i32 {
        ras.cells.iter().map(|c| c.cover).sum()
    }

    #[test]
    fn test_new_is_empty() {
        let ras = RasterizerCellsAa::new();
        assert_eq!(ras.total_cells(), 0);
        assert!(!ras.sorted());
        assert_eq!(ras.min_x(), i32::MAX);
        assert_eq!(ras.max_y(), i32::MIN);
    }

    #[test]
    fn test_vertical_edge_cover_equals_dy() {
        let mut ras = RasterizerCellsAa::new();
        let x = 10 * S + S / 2;
        ras.line(x, 5 * S, x, 8 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), 3 * S);
        assert_eq!(ras.min_y(), 5);
    }

    #[test]
    fn test_upward_edge_has_negative_cover() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(2 * S, 6 * S, 2 * S, 2 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), -4 * S);
    }

    #[test]
    fn test_diagonal_cover_equals_dy() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(0, 0, 7 * S, 5 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), 5 * S);
        assert_eq!(ras.max_x(), 7);
    }

    #[test]
    fn test_horizontal_edge_adds_no_cover() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(0, 3 * S, 9 * S, 3 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), 0);
    }

    #[test]
    fn test_closed_triangle_cover_cancels() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(10 * S, 10 * S, 20 * S, 10 * S);
        ras.line(20 * S, 10 * S, 15 * S, 20 * S);
        ras.line(15 * S, 20 * S, 10 * S, 10 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), 0);
        assert_eq!(ras.min_y(), 10);
        assert_eq!(ras.max_y(), 20);
    }

    #[test]
    fn test_rows_sorted_by_x() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(0, 0, 12 * S, S);
        ras.line(12 * S, S, 0, 0);
        ras.sort_cells();
        for y in ras.min_y()..=ras.max_y() {
            let xs: Vec<i32> = ras.scanline_cells(y).map(|c| c.x).collect();
            assert!(xs.windows(2).all(|w| w[0] <= w[1]), "row {y} unsorted: {xs:?}");
            assert!(ras.scanline_cells(y).all(|c| c.y == y));
        }
    }

    #[test]
    fn test_scanline_cells_outside_range_is_empty() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(S, S, S, 3 * S);
        ras.sort_cells();
        assert_eq!(ras.scanline_cells(-4).count(), 0);
        assert_eq!(ras.scanline_cells(100).count(), 0);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(5 * S, 0, 5 * S, 3 * S);
        ras.sort_cells();
        let n = ras.total_cells();
        ras.sort_cells();
        assert_eq!(ras.total_cells(), n);
    }

    #[test]
    fn test_long_edge_is_subdivided() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(0, 0, 20000 * S, S);
        ras.sort_cells();
        assert!(ras.total_cells() > 0);
        assert_eq!(total_cover(&ras), S);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut ras = RasterizerCellsAa::new();
        ras.line(0, 0, 4 * S, 4 * S);
        ras.sort_cells();
        ras.reset();
        assert_eq!(ras.total_cells(), 0);
        assert!(!ras.sorted());
    }
}
