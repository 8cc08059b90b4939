//! Path storage: a vertex container holding any number of closed contours.
//!
//! Stroke outlines, dotted edges, arrow caps and glyph outlines are all
//! collected here and rasterized in one pass. `add_contour` normalizes the
//! winding of every contour to clockwise (on a y-down screen), so under the
//! non-zero rule overlapping contours union instead of cancelling.

use crate::basics::{
    signed_area2, PointD, VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO,
    PATH_CMD_STOP, PATH_FLAGS_CLOSE,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct VertexD {
    x: f64,
    y: f64,
    cmd: u32,
}

/// An ordered list of vertices with path commands.
#[derive(Debug, Clone, Default)]
pub struct PathStorage {
    vertices: Vec<VertexD>,
    iterator: usize,
}

impl PathStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.vertices.push(VertexD {
            x,
            y,
            cmd: PATH_CMD_MOVE_TO,
        });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.vertices.push(VertexD {
            x,
            y,
            cmd: PATH_CMD_LINE_TO,
        });
    }

    pub fn close_polygon(&mut self) {
        self.vertices.push(VertexD {
            x: 0.0,
            y: 0.0,
            cmd: PATH_CMD_END_POLY | PATH_FLAGS_CLOSE,
        });
    }

    /// Append a closed contour, reversed if needed so its signed area is
    /// positive. Contours with fewer than three points or no area are
    /// skipped.
    pub fn add_contour(&mut self, points: &[PointD]) {
        if points.len() < 3 {
            return;
        }
        let area = signed_area2(points);
        if area == 0.0 || !area.is_finite() {
            return;
        }

        let mut emit = |i: usize, p: &PointD| {
            if i == 0 {
                self.move_to(p.x, p.y);
            } else {
                self.line_to(p.x, p.y);
            }
        };
        if area > 0.0 {
            points.iter().enumerate().for_each(|(i, p)| emit(i, p));
        } else {
            points.iter().rev().enumerate().for_each(|(i, p)| emit(i, p));
        }
        self.close_polygon();
    }
}

impl VertexSource for PathStorage {
    fn rewind(&mut self, _path_id: u32) {
        self.iterator = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        match self.vertices.get(self.iterator) {
            Some(v) => {
                self.iterator += 1;
                *x = v.x;
                *y = v.y;
                v.cmd
            }
            None => PATH_CMD_STOP,
        }
    }
}
