//! Face fills.
//!
//! Shaded fills derive four related colors from the configured fill color
//! by pinning saturation or value in HSV space, which approximates one
//! light from the upper left: top faces brightest, right faces darkest.

use crate::basics::PointD;
use crate::color::{ColorRgb, Hsv};
use crate::config::{FillStyle, Shape};
use crate::geometry::VertexSet;
use crate::visibility::PyramidVisibility;

/// Colors of a shaded solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Full saturation.
    pub base: ColorRgb,
    /// Full saturation, value 80.
    pub dark: ColorRgb,
    /// Saturation 66.
    pub light: ColorRgb,
    /// Saturation 33.
    pub lighter: ColorRgb,
}

impl Palette {
    pub fn from_fill(fill: ColorRgb) -> Self {
        let base = Hsv::from_rgb(fill).with_saturation(100);
        Self {
            base: base.to_rgb(),
            dark: base.with_value(80).to_rgb(),
            light: base.with_saturation(66).to_rgb(),
            lighter: base.with_saturation(33).to_rgb(),
        }
    }
}

/// One filled polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceFill {
    pub points: Vec<PointD>,
    pub color: ColorRgb,
}

impl FaceFill {
    fn new(points: &[PointD], color: ColorRgb) -> Self {
        Self {
            points: points.to_vec(),
            color,
        }
    }
}

/// Fill polygons in drawing order. `visibility` is only consulted for
/// pyramids and must be present for them.
pub fn face_fills(
    v: &VertexSet,
    style: FillStyle,
    fill: ColorRgb,
    visibility: Option<&PyramidVisibility>,
) -> Vec<FaceFill> {
    match (style, v.shape) {
        (FillStyle::None, _) => Vec::new(),
        (FillStyle::Solid, Shape::Cuboid) => vec![FaceFill::new(
            &[
                v.front_bottom,
                v.left_bottom,
                v.left_top,
                v.back_top,
                v.right_top,
                v.right_bottom,
            ],
            fill,
        )],
        (FillStyle::Shaded, Shape::Cuboid) => {
            let pal = Palette::from_fill(fill);
            vec![
                FaceFill::new(&[v.front_top, v.left_top, v.back_top, v.right_top], pal.light),
                FaceFill::new(&[v.front_bottom, v.left_bottom, v.left_top, v.front_top], pal.base),
                FaceFill::new(
                    &[v.front_bottom, v.right_bottom, v.right_top, v.front_top],
                    pal.dark,
                ),
            ]
        }
        (FillStyle::Solid, Shape::Pyramid) => {
            let (back_left, back_right) = back_faces(visibility);
            let mut out = vec![FaceFill::new(
                &[v.front_bottom, v.left_bottom, v.apex, v.right_bottom],
                fill,
            )];
            if back_left {
                out.push(FaceFill::new(&[v.left_bottom, v.apex, v.back_bottom], fill));
            }
            if back_right {
                out.push(FaceFill::new(&[v.right_bottom, v.apex, v.back_bottom], fill));
            }
            out
        }
        (FillStyle::Shaded, Shape::Pyramid) => {
            let pal = Palette::from_fill(fill);
            let (back_left, back_right) = back_faces(visibility);
            let mut out = vec![
                FaceFill::new(&[v.front_bottom, v.left_bottom, v.apex], pal.base),
                FaceFill::new(&[v.front_bottom, v.right_bottom, v.apex], pal.dark),
            ];
            if back_left {
                out.push(FaceFill::new(&[v.left_bottom, v.apex, v.back_bottom], pal.lighter));
            }
            if back_right {
                out.push(FaceFill::new(&[v.right_bottom, v.apex, v.back_bottom], pal.light));
            }
            out
        }
    }
}

fn back_faces(visibility: Option<&PyramidVisibility>) -> (bool, bool) {
    visibility.map_or((false, false), |vis| (vis.back_left, vis.back_right))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Projection;

    #[test]
    fn test_palette_pins_components() {
        let pal = Palette::from_fill(ColorRgb::new(200, 100, 50));
        let base = Hsv::from_rgb(pal.base);
        assert_eq!(base.saturation, 100);
        assert!((base.value - 78).abs() <= 1);
        let dark = Hsv::from_rgb(pal.dark);
        assert_eq!(dark.value, 80);
        assert!((dark.hue - base.hue).abs() <= 1);
        assert!(Hsv::from_rgb(pal.light).saturation >= 65);
        assert!(Hsv::from_rgb(pal.lighter).saturation >= 32);
    }

    #[test]
    fn test_palette_preserves_hue() {
        for &c in &[
            ColorRgb::new(200, 100, 50),
            ColorRgb::new(10, 200, 90),
            ColorRgb::new(30, 60, 240),
        ] {
            let hue = Hsv::from_rgb(c).hue;
            let pal = Palette::from_fill(c);
            for shade in [pal.base, pal.dark, pal.light, pal.lighter] {
                assert!((Hsv::from_rgb(shade).hue - hue).abs() <= 2, "{c:?} -> {shade:?}");
            }
        }
    }

    #[test]
    fn test_gray_fill_shades_red() {
        let pal = Palette::from_fill(ColorRgb::new(128, 128, 128));
        assert!(pal.base.r > 0 && pal.base.g == 0 && pal.base.b == 0);
    }

    fn cuboid() -> VertexSet {
        VertexSet::new(
            Projection::new(100.0, 100.0, 100.0),
            Shape::Cuboid,
            PointD::new(200.0, 300.0),
        )
    }

    fn pyramid(h: f64, l: f64, r: f64) -> (VertexSet, PyramidVisibility) {
        let p = Projection::new(h, l, r);
        (
            VertexSet::new(p, Shape::Pyramid, PointD::new(200.0, 300.0)),
            PyramidVisibility::new(&p),
        )
    }

    #[test]
    fn test_no_fill() {
        assert!(face_fills(&cuboid(), FillStyle::None, ColorRgb::WHITE, None).is_empty());
    }

    #[test]
    fn test_cuboid_fills() {
        let fill = ColorRgb::new(200, 100, 50);
        let solid = face_fills(&cuboid(), FillStyle::Solid, fill, None);
        assert_eq!(solid.len(), 1);
        assert_eq!(solid[0].points.len(), 6);
        assert_eq!(solid[0].color, fill);

        let shaded = face_fills(&cuboid(), FillStyle::Shaded, fill, None);
        let pal = Palette::from_fill(fill);
        let colors: Vec<ColorRgb> = shaded.iter().map(|f| f.color).collect();
        assert_eq!(colors, vec![pal.light, pal.base, pal.dark]);
    }

    #[test]
    fn test_pyramid_back_faces_follow_visibility() {
        let fill = ColorRgb::new(10, 200, 90);
        let (v, hidden) = pyramid(100.0, 100.0, 100.0);
        assert_eq!(face_fills(&v, FillStyle::Solid, fill, Some(&hidden)).len(), 1);
        assert_eq!(face_fills(&v, FillStyle::Shaded, fill, Some(&hidden)).len(), 2);

        let (v, open) = pyramid(0.0, 100.0, 100.0);
        let solid = face_fills(&v, FillStyle::Solid, fill, Some(&open));
        assert_eq!(solid.len(), 3);
        let shaded = face_fills(&v, FillStyle::Shaded, fill, Some(&open));
        let pal = Palette::from_fill(fill);
        let colors: Vec<ColorRgb> = shaded.iter().map(|f| f.color).collect();
        assert_eq!(colors, vec![pal.base, pal.dark, pal.lighter, pal.light]);
    }
}
