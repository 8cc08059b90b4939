//! Dash generation for straight segments.
//!
//! Splits a segment into dashes that start at its first endpoint and
//! alternate dash/gap. Hidden edges use a dotted pattern whose dash and gap
//! both equal the pen width; the dashes have flat ends except the first
//! one's start and the last one's end, which take the line's round caps.

use crate::basics::PointD;
use crate::math_stroke::{LineCap, MathStroke, STROKE_DIST_EPSILON};
use crate::path_storage::PathStorage;

/// A two-phase dash pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    dash: f64,
    gap: f64,
}

impl DashPattern {
    pub fn new(dash: f64, gap: f64) -> Self {
        Self { dash, gap }
    }

    /// Dots as long as the pen is wide, separated by equal gaps.
    pub fn dotted(pen_width: f64) -> Self {
        Self::new(pen_width, pen_width)
    }

    /// Endpoints of every dash along `p0`→`p1`. The last dash may be cut
    /// short by the end of the segment.
    pub fn dashes(&self, p0: PointD, p1: PointD) -> Vec<(PointD, PointD)> {
        let len = p0.distance(&p1);
        let period = self.dash + self.gap;
        if len < STROKE_DIST_EPSILON || self.dash <= 0.0 || period <= 0.0 || !len.is_finite() {
            return Vec::new();
        }

        let mut out = Vec::new();
        let mut start = 0.0;
        while start < len {
            let end = (start + self.dash).min(len);
            out.push((p0.lerp(&p1, start / len), p0.lerp(&p1, end / len)));
            start += period;
        }
        out
    }
}

/// Add a dotted line to `path`, using `pen` for the dot outlines.
pub fn stroke_dotted(pen: &MathStroke, path: &mut PathStorage, p0: PointD, p1: PointD) {
    let dashes = DashPattern::dotted(pen.width()).dashes(p0, p1);
    let last = dashes.len().saturating_sub(1);
    for (i, (a, b)) in dashes.into_iter().enumerate() {
        let start_cap = if i == 0 { LineCap::Round } else { LineCap::Butt };
        let end_cap = if i == last { LineCap::Round } else { LineCap::Butt };
        pen.stroke_segment(path, a, b, start_cap, end_cap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{is_move_to, is_stop, is_vertex, VertexSource};

    /// Point count of each contour in `path`.
    fn contour_sizes(path: &mut PathStorage) -> Vec<usize> {
        let (mut x, mut y) = (0.0, 0.0);
        let mut sizes = Vec::new();
        path.rewind(0);
        loop {
            let cmd = path.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            if is_move_to(cmd) {
                sizes.push(1);
            } else if is_vertex(cmd) {
                if let Some(n) = sizes.last_mut() {
                    *n += 1;
                }
            }
        }
        sizes
    }

    #[test]
    fn test_dotted_pattern_positions() {
        let d = DashPattern::dotted(2.0).dashes(PointD::new(0.0, 0.0), PointD::new(9.0, 0.0));
        let expected = [(0.0, 2.0), (4.0, 6.0), (8.0, 9.0)];
        assert_eq!(d.len(), expected.len());
        for ((a, b), (ea, eb)) in d.iter().zip(expected) {
            assert!((a.x - ea).abs() < 1e-9 && (b.x - eb).abs() < 1e-9);
        }
    }

    #[test]
    fn test_dashes_follow_direction() {
        let d = DashPattern::new(1.0, 1.0).dashes(PointD::new(0.0, 4.0), PointD::new(0.0, 0.0));
        assert_eq!(d.len(), 2);
        assert_eq!(d[0].0, PointD::new(0.0, 4.0));
        assert_eq!(d[1].1, PointD::new(0.0, 1.0));
    }

    #[test]
    fn test_degenerate_inputs() {
        let p = PointD::new(1.0, 1.0);
        assert!(DashPattern::dotted(2.0).dashes(p, p).is_empty());
        assert!(DashPattern::dotted(0.0)
            .dashes(p, PointD::new(5.0, 5.0))
            .is_empty());
    }

    #[test]
    fn test_stroke_dotted_adds_one_contour_per_dot() {
        let mut path = PathStorage::new();
        stroke_dotted(
            &MathStroke::new(2.0),
            &mut path,
            PointD::new(0.0, 0.0),
            PointD::new(9.0, 0.0),
        );
        // Round first start and last end; the middle dot is a box.
        let sizes = contour_sizes(&mut path);
        assert_eq!(sizes.len(), 3);
        assert!(sizes[0] > 4 && sizes[2] > 4);
        assert_eq!(sizes[1], 4);
    }
}
