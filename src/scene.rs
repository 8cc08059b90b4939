//! Draw list of one rendered layer.
//!
//! `Scene::build` turns a configuration into the ordered list of things to
//! draw: face fills, then solid edges, then dotted hidden edges, then the
//! optional dimension lines and labels. Nothing is rasterized here.

use crate::basics::PointD;
use crate::color::ColorRgb;
use crate::config::{CuboidConfig, Shape};
use crate::geometry::VertexSet;
use crate::shading::{face_fills, FaceFill};
use crate::text::{em_pixels, Label, LABEL_POINT_SIZE};
use crate::visibility::{EdgeStyle, PyramidVisibility};

/// Color of the dimension lines and labels.
pub const DIMENSION_COLOR: ColorRgb = ColorRgb::RED;

/// Pen width of the dimension lines.
pub const DIMENSION_PEN_WIDTH: f64 = 1.0;

/// Gap between the silhouette and a dimension line.
pub const DIMENSION_GAP: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill(FaceFill),
    /// Edge in the configured pen, from `from` to `to`.
    Edge {
        from: PointD,
        to: PointD,
        dotted: bool,
    },
    /// Red measuring line with arrowheads on both ends.
    Dimension { from: PointD, to: PointD },
    Label(Label),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub vertices: VertexSet,
    /// Present for pyramids.
    pub visibility: Option<PyramidVisibility>,
    pub ops: Vec<DrawOp>,
    pub edge_width: f64,
    pub edge_color: ColorRgb,
    /// Applies to fills and edges; dimensions are always anti-aliased.
    pub anti_alias: bool,
}

impl Scene {
    /// Lay out `config` in a selection of `sel_w` × `sel_h` pixels. The
    /// configuration is expected to be sanitized.
    pub fn build(config: &CuboidConfig, sel_w: u32, sel_h: u32) -> Self {
        let vertices = VertexSet::build(config, sel_w, sel_h);
        let visibility = match config.shape {
            Shape::Cuboid => None,
            Shape::Pyramid => Some(PyramidVisibility::new(&vertices.projection)),
        };

        let mut ops: Vec<DrawOp> = face_fills(
            &vertices,
            config.fill_style,
            config.fill_color,
            visibility.as_ref(),
        )
        .into_iter()
        .map(DrawOp::Fill)
        .collect();

        if config.draws_edges() {
            let edges = edges(&vertices, visibility.as_ref(), config.draw_hidden_edges);
            for dotted in [false, true] {
                ops.extend(
                    edges
                        .iter()
                        .filter(|(_, _, style)| (*style == EdgeStyle::Dotted) == dotted)
                        .map(|&(from, to, _)| DrawOp::Edge { from, to, dotted }),
                );
            }
        }

        if config.draw_footprint_dimensions {
            dimensions(&vertices, &mut ops);
        }

        Self {
            vertices,
            visibility,
            ops,
            edge_width: config.edge_width as f64,
            edge_color: config.edge_color,
            anti_alias: config.anti_alias,
        }
    }
}

/// Every edge of the solid with its style; omitted edges are dropped.
fn edges(
    v: &VertexSet,
    visibility: Option<&PyramidVisibility>,
    draw_hidden: bool,
) -> Vec<(PointD, PointD, EdgeStyle)> {
    let solid = |a: PointD, b: PointD| (a, b, EdgeStyle::Solid);
    let mut out = match v.shape {
        Shape::Cuboid => {
            let hidden = EdgeStyle::classify(false, draw_hidden);
            vec![
                solid(v.front_top, v.front_bottom),
                solid(v.left_top, v.front_top),
                solid(v.left_bottom, v.front_bottom),
                solid(v.left_top, v.left_bottom),
                solid(v.right_top, v.front_top),
                solid(v.right_bottom, v.front_bottom),
                solid(v.right_top, v.right_bottom),
                solid(v.back_top, v.right_top),
                solid(v.back_top, v.left_top),
                (v.back_bottom, v.right_bottom, hidden),
                (v.back_bottom, v.left_bottom, hidden),
                (v.back_bottom, v.back_top, hidden),
            ]
        }
        Shape::Pyramid => {
            let vis = visibility.copied().unwrap_or_else(|| PyramidVisibility::new(&v.projection));
            vec![
                solid(v.front_bottom, v.left_bottom),
                solid(v.front_bottom, v.right_bottom),
                solid(v.apex, v.front_bottom),
                solid(v.apex, v.left_bottom),
                solid(v.apex, v.right_bottom),
                (v.back_bottom, v.left_bottom, vis.back_left_style(draw_hidden)),
                (v.back_bottom, v.right_bottom, vis.back_right_style(draw_hidden)),
                (v.apex, v.back_bottom, vis.back_apex_style(draw_hidden)),
            ]
        }
    };
    out.retain(|(_, _, style)| *style != EdgeStyle::Omitted);
    out
}

/// Measuring lines to the left of and above the solid, with their labels.
/// Extents are truncated to whole pixels first, and the label anchors halve
/// them with integer division.
fn dimensions(v: &VertexSet, ops: &mut Vec<DrawOp>) {
    let (obj_w, obj_h) = v.object_size_px();
    let base = v.base();
    let lx = v.projection.lx;
    let rx = v.projection.rx;
    let h = obj_h as f64;

    let line_x = base.x - lx - DIMENSION_GAP;
    ops.push(DrawOp::Dimension {
        from: PointD::new(line_x, base.y - h),
        to: PointD::new(line_x, base.y),
    });
    let line_y = base.y - h - DIMENSION_GAP;
    ops.push(DrawOp::Dimension {
        from: PointD::new(base.x - lx, line_y),
        to: PointD::new(base.x + rx, line_y),
    });

    let em = em_pixels(LABEL_POINT_SIZE);
    ops.push(DrawOp::Label(Label::new(
        format!("{obj_w}px"),
        base.x - lx + (obj_w / 2) as f64,
        base.y - h - 40.0,
        em,
    )));
    ops.push(DrawOp::Label(Label::new(
        format!("{obj_h}px"),
        base.x - lx - 50.0,
        base.y - (obj_h / 2) as f64,
        em,
    )));
}

// ============================================================================
// Tests
// ============================================================================
