//! Elliptical arc flattening.
//!
//! Generates points along an elliptical arc with a step chosen so the chord
//! error stays under 1/8 unit at the given approximation scale.

use crate::basics::PointD;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    x: f64,
    y: f64,
    rx: f64,
    ry: f64,
    start: f64,
    end: f64,
    scale: f64,
}

impl Arc {
    /// Arc around (x, y) from angle `a1` to `a2` in radians. The sweep runs
    /// in whichever direction takes `a1` to `a2` numerically, so a sweep of
    /// `2π` is a full ellipse.
    pub fn new(x: f64, y: f64, rx: f64, ry: f64, a1: f64, a2: f64) -> Self {
        Self {
            x,
            y,
            rx,
            ry,
            start: a1,
            end: a2,
            scale: 1.0,
        }
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.scale = s;
    }

    pub fn approximation_scale(&self) -> f64 {
        self.scale
    }

    /// Angular step for the current radii and scale.
    fn step(&self) -> f64 {
        let ra = (self.rx.abs() + self.ry.abs()) / 2.0;
        if ra <= 0.0 || self.scale <= 0.0 {
            return std::f64::consts::PI;
        }
        (ra / (ra + 0.125 / self.scale)).acos() * 2.0
    }

    #[inline]
    fn at(&self, a: f64) -> PointD {
        PointD::new(self.x + a.cos() * self.rx, self.y + a.sin() * self.ry)
    }

    /// Points from the start angle to the end angle, both included.
    pub fn flatten(&self) -> Vec<PointD> {
        let sweep = self.end - self.start;
        let n = ((sweep.abs() / self.step()).ceil() as usize).clamp(1, 4096);
        let da = sweep / n as f64;
        (0..=n).map(|i| self.at(self.start + da * i as f64)).collect()
    }
}
