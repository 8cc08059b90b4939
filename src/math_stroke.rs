//! Stroke outline math.
//!
//! A stroked segment is a closed outline made of a cap around each end:
//! the start cap runs from the left side of the pen around the back of the
//! start point to its right side, and the end cap does the same at the other
//! end. Round caps are approximated with arc steps fine enough that the
//! error stays under 1/8 pixel at the configured approximation scale.

use crate::basics::{PointD, PI};
use crate::path_storage::PathStorage;

/// Segments shorter than this draw nothing.
pub const STROKE_DIST_EPSILON: f64 = 1e-9;

/// How the end of a stroked segment is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Ends flush with the endpoint.
    Butt,
    /// Half-disc of the pen's radius around the endpoint.
    #[default]
    Round,
}

/// Pen geometry for stroking.
#[derive(Debug, Clone, Copy)]
pub struct MathStroke {
    width: f64,
    approx_scale: f64,
}

impl MathStroke {
    /// A pen of the given full width.
    pub fn new(width: f64) -> Self {
        Self {
            width: width * 0.5,
            approx_scale: 1.0,
        }
    }

    /// Full pen width.
    pub fn width(&self) -> f64 {
        self.width * 2.0
    }

    /// Scale factor between path units and pixels; raises the arc step count
    /// for paths that are scaled up after stroking.
    pub fn approximation_scale(mut self, s: f64) -> Self {
        self.approx_scale = s.max(1e-6);
        self
    }

    /// Append the cap at `v0` of the segment `v0`→`v1` of length `len`.
    pub fn calc_cap(&self, vc: &mut Vec<PointD>, v0: PointD, v1: PointD, len: f64, cap: LineCap) {
        let dx1 = (v1.y - v0.y) / len * self.width;
        let dy1 = (v1.x - v0.x) / len * self.width;

        vc.push(PointD::new(v0.x - dx1, v0.y + dy1));

        if cap == LineCap::Round {
            let da = (self.width / (self.width + 0.125 / self.approx_scale)).acos() * 2.0;
            let n = (PI / da) as i32;
            let da = PI / (n + 1) as f64;
            let mut a1 = dy1.atan2(-dx1) + da;
            for _ in 0..n {
                vc.push(PointD::new(
                    v0.x + a1.cos() * self.width,
                    v0.y + a1.sin() * self.width,
                ));
                a1 += da;
            }
        }

        vc.push(PointD::new(v0.x + dx1, v0.y - dy1));
    }

    /// Outline of one straight segment. Empty for zero-length segments or a
    /// pen without width.
    pub fn segment_outline(
        &self,
        p0: PointD,
        p1: PointD,
        start_cap: LineCap,
        end_cap: LineCap,
    ) -> Vec<PointD> {
        let len = p0.distance(&p1);
        if len < STROKE_DIST_EPSILON || self.width <= 0.0 || !len.is_finite() {
            return Vec::new();
        }
        let mut vc = Vec::new();
        self.calc_cap(&mut vc, p0, p1, len, start_cap);
        self.calc_cap(&mut vc, p1, p0, len, end_cap);
        vc
    }

    /// Add one stroked segment to `path`.
    pub fn stroke_segment(
        &self,
        path: &mut PathStorage,
        p0: PointD,
        p1: PointD,
        start_cap: LineCap,
        end_cap: LineCap,
    ) {
        let outline = self.segment_outline(p0, p1, start_cap, end_cap);
        path.add_contour(&outline);
    }

    /// Add a round-capped polyline as a union of segment outlines. Rasterize
    /// the result with the non-zero rule.
    pub fn stroke_polyline(&self, path: &mut PathStorage, points: &[PointD]) {
        for pair in points.windows(2) {
            self.stroke_segment(path, pair[0], pair[1], LineCap::Round, LineCap::Round);
        }
    }
}
