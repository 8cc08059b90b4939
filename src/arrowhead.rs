//! Arrow-anchor line caps.
//!
//! A filled triangle whose tip sits on the line's endpoint and whose base is
//! centered on the line, `head_length` back from the tip. Sizes scale with
//! the pen width: a 1 px pen gets a head 4 px long and 4 px wide.

use crate::basics::PointD;
use crate::math_stroke::STROKE_DIST_EPSILON;
use crate::path_storage::PathStorage;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    head_length: f64,
    half_width: f64,
}

impl Arrowhead {
    pub fn new(head_length: f64, half_width: f64) -> Self {
        Self {
            head_length,
            half_width,
        }
    }

    /// Arrow anchor proportions for a pen of `width` pixels.
    pub fn anchor_for_pen(width: f64) -> Self {
        Self::new(4.0 * width, 2.0 * width)
    }

    /// Triangle pointing from `from` toward `tip`, or nothing when the two
    /// points coincide.
    pub fn head_points(&self, tip: PointD, from: PointD) -> Option<[PointD; 3]> {
        let len = from.distance(&tip);
        if len < STROKE_DIST_EPSILON || !len.is_finite() {
            return None;
        }
        let ux = (tip.x - from.x) / len;
        let uy = (tip.y - from.y) / len;
        let bx = tip.x - ux * self.head_length;
        let by = tip.y - uy * self.head_length;
        let nx = -uy * self.half_width;
        let ny = ux * self.half_width;
        Some([
            tip,
            PointD::new(bx + nx, by + ny),
            PointD::new(bx - nx, by - ny),
        ])
    }

    /// Add heads at both ends of `p0`→`p1`.
    pub fn add_both_ends(&self, path: &mut PathStorage, p0: PointD, p1: PointD) {
        if let Some(tri) = self.head_points(p0, p1) {
            path.add_contour(&tri);
        }
        if let Some(tri) = self.head_points(p1, p0) {
            path.add_contour(&tri);
        }
    }
}
