//! Effect configuration.
//!
//! `CuboidConfig` is rebuilt wholesale whenever the user edits a property
//! and is never mutated while a layer is being rendered. It serializes with
//! camelCase field names; missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::color::ColorRgb;

/// Largest accepted height or depth, in pixels.
pub const MAX_DIMENSION: f64 = 1000.0;

/// Largest accepted edge width, in pixels.
pub const MAX_EDGE_WIDTH: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Cuboid,
    Pyramid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStyle {
    #[default]
    None,
    Solid,
    Shaded,
}

/// Fractional offset of the base anchor, each component in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionOffset {
    pub dx: f64,
    pub dy: f64,
}

impl PositionOffset {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Colors the host environment offers as initial edge and fill colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostDefaults {
    pub primary: ColorRgb,
    pub secondary: ColorRgb,
}

impl Default for HostDefaults {
    fn default() -> Self {
        Self {
            primary: ColorRgb::BLACK,
            secondary: ColorRgb::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CuboidConfig {
    pub height: f64,
    pub left_depth: f64,
    pub right_depth: f64,
    pub shape: Shape,
    pub fill_style: FillStyle,
    pub fill_color: ColorRgb,
    /// Pen width of the edges; zero draws no edges at all.
    pub edge_width: i32,
    pub edge_color: ColorRgb,
    pub draw_hidden_edges: bool,
    pub draw_footprint_dimensions: bool,
    pub position_offset: PositionOffset,
    pub anti_alias: bool,
}

impl Default for CuboidConfig {
    fn default() -> Self {
        Self::with_host_defaults(&HostDefaults::default())
    }
}

impl CuboidConfig {
    /// Initial configuration, taking the edge color from the host's primary
    /// color and the fill color from its secondary color.
    pub fn with_host_defaults(host: &HostDefaults) -> Self {
        Self {
            height: 175.0,
            left_depth: 150.0,
            right_depth: 200.0,
            shape: Shape::Cuboid,
            fill_style: FillStyle::None,
            fill_color: host.secondary,
            edge_width: 2,
            edge_color: host.primary,
            draw_hidden_edges: false,
            draw_footprint_dimensions: false,
            position_offset: PositionOffset::default(),
            anti_alias: true,
        }
    }

    /// Copy with every value clamped into its accepted range. Non-finite
    /// numbers become zero. Each adjustment is logged.
    pub fn sanitized(&self) -> Self {
        Self {
            height: clamp_field("height", self.height, 0.0, MAX_DIMENSION),
            left_depth: clamp_field("leftDepth", self.left_depth, 0.0, MAX_DIMENSION),
            right_depth: clamp_field("rightDepth", self.right_depth, 0.0, MAX_DIMENSION),
            edge_width: {
                let w = self.edge_width.clamp(0, MAX_EDGE_WIDTH);
                if w != self.edge_width {
                    log::warn!("edgeWidth {} clamped to {}", self.edge_width, w);
                }
                w
            },
            position_offset: PositionOffset {
                dx: clamp_field("positionOffset.dx", self.position_offset.dx, -1.0, 1.0),
                dy: clamp_field("positionOffset.dy", self.position_offset.dy, -1.0, 1.0),
            },
            ..self.clone()
        }
    }

    /// Whether edges are drawn at all.
    pub fn draws_edges(&self) -> bool {
        self.edge_width != 0
    }
}

fn clamp_field(name: &str, v: f64, lo: f64, hi: f64) -> f64 {
    let out = if v.is_finite() { v.clamp(lo, hi) } else { 0.0 };
    if out != v {
        log::warn!("{name} {v} clamped to {out}");
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = CuboidConfig::default();
        assert_eq!((c.height, c.left_depth, c.right_depth), (175.0, 150.0, 200.0));
        assert_eq!(c.edge_width, 2);
        assert_eq!(c.edge_color, ColorRgb::BLACK);
        assert_eq!(c.fill_color, ColorRgb::WHITE);
        assert_eq!(c.shape, Shape::Cuboid);
        assert_eq!(c.fill_style, FillStyle::None);
        assert!(c.anti_alias);
        assert!(!c.draw_hidden_edges && !c.draw_footprint_dimensions);
    }

    #[test]
    fn test_host_colors() {
        let host = HostDefaults {
            primary: ColorRgb::new(10, 20, 30),
            secondary: ColorRgb::new(40, 50, 60),
        };
        let c = CuboidConfig::with_host_defaults(&host);
        assert_eq!(c.edge_color, host.primary);
        assert_eq!(c.fill_color, host.secondary);
    }

    #[test]
    fn test_sanitized_clamps() {
        let c = CuboidConfig {
            height: -5.0,
            left_depth: 5000.0,
            right_depth: f64::NAN,
            edge_width: 42,
            position_offset: PositionOffset::new(-3.0, f64::INFINITY),
            ..CuboidConfig::default()
        }
        .sanitized();
        assert_eq!(c.height, 0.0);
        assert_eq!(c.left_depth, MAX_DIMENSION);
        assert_eq!(c.right_depth, 0.0);
        assert_eq!(c.edge_width, MAX_EDGE_WIDTH);
        assert_eq!(c.position_offset, PositionOffset::new(-1.0, 0.0));

        let neg = CuboidConfig {
            edge_width: -1,
            ..CuboidConfig::default()
        };
        assert_eq!(neg.sanitized().edge_width, 0);
        assert!(!neg.sanitized().draws_edges());
    }

    #[test]
    fn test_sanitized_keeps_valid_values() {
        let c = CuboidConfig {
            shape: Shape::Pyramid,
            fill_style: FillStyle::Shaded,
            position_offset: PositionOffset::new(0.25, -0.5),
            ..CuboidConfig::default()
        };
        assert_eq!(c.sanitized(), c);
    }
}
