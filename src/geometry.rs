//! Isometric projection of the cuboid and pyramid.
//!
//! Depths run along the two receding axes, drawn 30° above horizontal. A
//! depth `d` therefore projects to `d·sin60` horizontally and `d·sin30`
//! vertically. The base anchor is the front-bottom corner; it is placed so
//! the object's bounding box is centered in the selection, then nudged by
//! the position offset.

use crate::basics::{deg2rad, PointD};
use crate::config::{CuboidConfig, Shape};

// ============================================================================
// Projection
// ============================================================================

/// Projected extents of the two depths plus the height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Horizontal extent of the left depth.
    pub lx: f64,
    /// Vertical extent of the left depth.
    pub ly: f64,
    pub rx: f64,
    pub ry: f64,
    pub height: f64,
}

impl Projection {
    pub fn new(height: f64, left_depth: f64, right_depth: f64) -> Self {
        let sin60 = deg2rad(60.0).sin();
        let sin30 = deg2rad(30.0).sin();
        Self {
            lx: left_depth * sin60,
            ly: left_depth * sin30,
            rx: right_depth * sin60,
            ry: right_depth * sin30,
            height,
        }
    }

    pub fn from_config(config: &CuboidConfig) -> Self {
        Self::new(config.height, config.left_depth, config.right_depth)
    }

    /// Width of the object's bounding box.
    pub fn object_width(&self) -> f64 {
        self.lx + self.rx
    }

    /// Height of the object's bounding box. A pyramid is as tall as its apex
    /// or its base diamond, whichever is taller.
    pub fn object_height(&self, shape: Shape) -> f64 {
        match shape {
            Shape::Cuboid => self.ly + self.ry + self.height,
            Shape::Pyramid => self.pyramid_height(),
        }
    }

    fn pyramid_height(&self) -> f64 {
        (self.ly / 2.0 + self.ry / 2.0 + self.height).max(self.ry + self.ly)
    }

    /// Front-bottom corner for a selection of `sel_w` × `sel_h` pixels.
    ///
    /// The offset scales the anchor itself (`x + x·dx`), so a component
    /// sitting at zero does not move.
    pub fn base_anchor(&self, shape: Shape, sel_w: f64, sel_h: f64, offset: (f64, f64)) -> PointD {
        let mut x = sel_w / 2.0 - (self.rx - self.lx) / 2.0;
        let mut y = sel_h - (sel_h - self.object_height(shape)) / 2.0;
        x += x * offset.0;
        y += y * offset.1;
        PointD::new(x, y)
    }
}

// ============================================================================
// VertexSet
// ============================================================================

/// Corner points of one solid.
///
/// All eight box corners are always computed. A pyramid uses the four
/// bottom corners and `apex`; a cuboid ignores `apex`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSet {
    pub shape: Shape,
    pub projection: Projection,
    pub front_bottom: PointD,
    pub front_top: PointD,
    pub left_bottom: PointD,
    pub left_top: PointD,
    pub right_bottom: PointD,
    pub right_top: PointD,
    pub back_bottom: PointD,
    pub back_top: PointD,
    /// Center of the base diamond.
    pub base_center: PointD,
    /// Top of the pyramid, `height` above the base center.
    pub apex: PointD,
}

impl VertexSet {
    pub fn new(projection: Projection, shape: Shape, base: PointD) -> Self {
        let Projection {
            lx,
            ly,
            rx,
            ry,
            height: h,
        } = projection;
        let (bx, by) = (base.x, base.y);
        let center_x = bx - lx / 2.0 + rx / 2.0;
        let center_y = by - ly / 2.0 - ry / 2.0;
        Self {
            shape,
            projection,
            front_bottom: PointD::new(bx, by),
            front_top: PointD::new(bx, by - h),
            left_bottom: PointD::new(bx - lx, by - ly),
            left_top: PointD::new(bx - lx, by - h - ly),
            right_bottom: PointD::new(bx + rx, by - ry),
            right_top: PointD::new(bx + rx, by - h - ry),
            back_bottom: PointD::new(bx - lx + rx, by - ry - ly),
            back_top: PointD::new(bx - lx + rx, by - h - ry - ly),
            base_center: PointD::new(center_x, center_y),
            apex: PointD::new(center_x, center_y - h),
        }
    }

    /// Project `config` into a selection of `sel_w` × `sel_h` pixels.
    pub fn build(config: &CuboidConfig, sel_w: u32, sel_h: u32) -> Self {
        let projection = Projection::from_config(config);
        let base = projection.base_anchor(
            config.shape,
            sel_w as f64,
            sel_h as f64,
            (config.position_offset.dx, config.position_offset.dy),
        );
        Self::new(projection, config.shape, base)
    }

    pub fn base(&self) -> PointD {
        self.front_bottom
    }

    /// Bounding-box extents truncated toward zero, as shown on the
    /// dimension labels.
    pub fn object_size_px(&self) -> (i32, i32) {
        (
            self.projection.object_width() as i32,
            self.projection.object_height(self.shape) as i32,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
