//! Hidden-edge classification for the pyramid.
//!
//! The three edges that run to the back-bottom corner may be hidden behind
//! the pyramid's front faces. Instead of a 3D visibility test, each edge is
//! judged by the angle at which the line from the apex to a base corner
//! drops below horizontal: under this fixed projection a back face is
//! visible from above exactly when that angle is under 30°.

use crate::basics::rad2deg;
use crate::geometry::Projection;

/// Angle threshold for a visible back face, in degrees.
pub const BACK_FACE_LIMIT: f64 = 30.0;

/// How an edge is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    Solid,
    Dotted,
    Omitted,
}

impl EdgeStyle {
    /// Visible edges are solid. Hidden ones are dotted when hidden edges
    /// are enabled, otherwise left out.
    pub fn classify(visible: bool, draw_hidden: bool) -> Self {
        if visible {
            EdgeStyle::Solid
        } else if draw_hidden {
            EdgeStyle::Dotted
        } else {
            EdgeStyle::Omitted
        }
    }
}

/// Drop angle in degrees of a line with offsets `(dx, dy)`. A zero-length
/// line has no angle and yields NaN.
pub fn drop_angle(dx: f64, dy: f64) -> f64 {
    rad2deg((dy / (dx * dx + dy * dy).sqrt()).asin())
}

/// The three helper angles and the horizontal offset of the back corner
/// from the apex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelperAngles {
    /// Apex to left-bottom corner.
    pub angle1: f64,
    /// Apex to right-bottom corner.
    pub angle2: f64,
    /// Apex to back-bottom corner.
    pub angle3: f64,
    pub x_dis3: f64,
}

impl HelperAngles {
    pub fn new(p: &Projection) -> Self {
        let Projection {
            lx,
            ly,
            rx,
            ry,
            height: h,
        } = *p;
        let rise = ly / 2.0 + ry / 2.0 + h;
        let x_dis = lx / 2.0 + rx / 2.0;
        let x_dis3 = rx - lx / 2.0 - rx / 2.0;
        Self {
            angle1: drop_angle(x_dis, rise - ly),
            angle2: drop_angle(x_dis, rise - ry),
            angle3: drop_angle(x_dis3, rise - ry - ly),
            x_dis3,
        }
    }
}

/// Visibility of the back faces and back edges of a pyramid. NaN angles
/// from degenerate geometry compare false, so they count as hidden.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PyramidVisibility {
    pub angles: HelperAngles,
    /// Back-left face and the back-bottom–left-bottom edge.
    pub back_left: bool,
    /// Back-right face and the back-bottom–right-bottom edge.
    pub back_right: bool,
    /// Edge from the apex to the back-bottom corner.
    pub back_apex: bool,
}

impl PyramidVisibility {
    pub fn new(p: &Projection) -> Self {
        let a = HelperAngles::new(p);
        let back_apex = (a.x_dis3 > 0.0 && a.angle3 < a.angle2)
            || (a.x_dis3 < 0.0 && a.angle3 < a.angle1);
        Self {
            angles: a,
            back_left: a.angle1 < BACK_FACE_LIMIT,
            back_right: a.angle2 < BACK_FACE_LIMIT,
            back_apex,
        }
    }

    pub fn back_left_style(&self, draw_hidden: bool) -> EdgeStyle {
        EdgeStyle::classify(self.back_left, draw_hidden)
    }

    pub fn back_right_style(&self, draw_hidden: bool) -> EdgeStyle {
        EdgeStyle::classify(self.back_right, draw_hidden)
    }

    pub fn back_apex_style(&self, draw_hidden: bool) -> EdgeStyle {
        EdgeStyle::classify(self.back_apex, draw_hidden)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_angle() {
        assert!((drop_angle(1.0, 1.0) - 45.0).abs() < 1e-9);
        assert!((drop_angle(1.0, 0.0)).abs() < 1e-9);
        assert!((drop_angle(0.0, 5.0) - 90.0).abs() < 1e-9);
        assert!((drop_angle(-1.0, -1.0) + 45.0).abs() < 1e-9);
        assert!(drop_angle(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_symmetric_flat_pyramid_shows_back_faces() {
        // With no height the apex sits on the base center and every face
        // is seen from above.
        let v = PyramidVisibility::new(&Projection::new(0.0, 100.0, 100.0));
        assert!(v.angles.angle1.abs() < 1e-9);
        assert!(v.angles.angle2.abs() < 1e-9);
        assert!(v.back_left && v.back_right);
    }

    #[test]
    fn test_symmetric_pyramid_back_edges_hidden() {
        let v = PyramidVisibility::new(&Projection::new(100.0, 100.0, 100.0));
        assert!(v.angles.angle1 > BACK_FACE_LIMIT);
        assert!(v.angles.angle2 > BACK_FACE_LIMIT);
        assert_eq!(v.back_left_style(false), EdgeStyle::Omitted);
        assert_eq!(v.back_right_style(true), EdgeStyle::Dotted);
        // Equal depths put the back corner straight below the apex.
        assert!(v.angles.x_dis3.abs() < 1e-9);
        assert!(!v.back_apex);
        assert_eq!(v.back_apex_style(true), EdgeStyle::Dotted);
    }

    #[test]
    fn test_back_faces_follow_slope() {
        // Steep apex lines hide the back faces.
        let tall = PyramidVisibility::new(&Projection::new(500.0, 100.0, 100.0));
        assert!(!tall.back_left && !tall.back_right);
        // A very flat, lopsided pyramid exposes the face on the long side.
        let flat = PyramidVisibility::new(&Projection::new(0.0, 20.0, 300.0));
        assert!(flat.angles.angle1 < BACK_FACE_LIMIT);
        assert!(flat.back_left);
        assert_eq!(flat.back_left_style(false), EdgeStyle::Solid);
    }

    #[test]
    fn test_back_apex_uses_xdis3_sign() {
        let right_heavy = PyramidVisibility::new(&Projection::new(0.0, 20.0, 300.0));
        assert!(right_heavy.angles.x_dis3 > 0.0);
        assert_eq!(
            right_heavy.back_apex,
            right_heavy.angles.angle3 < right_heavy.angles.angle2
        );
        let left_heavy = PyramidVisibility::new(&Projection::new(0.0, 300.0, 20.0));
        assert!(left_heavy.angles.x_dis3 < 0.0);
        assert_eq!(
            left_heavy.back_apex,
            left_heavy.angles.angle3 < left_heavy.angles.angle1
        );
    }

    #[test]
    fn test_degenerate_pyramid_counts_as_hidden() {
        let v = PyramidVisibility::new(&Projection::new(0.0, 0.0, 0.0));
        assert!(v.angles.angle1.is_nan());
        assert!(!v.back_left && !v.back_right && !v.back_apex);
        assert_eq!(v.back_apex_style(false), EdgeStyle::Omitted);
    }

    #[test]
    fn test_angles_in_range_for_nonnegative_rise() {
        for &(h, l, r) in &[(0.0, 10.0, 10.0), (100.0, 50.0, 200.0), (1000.0, 1.0, 1000.0)] {
            let a = HelperAngles::new(&Projection::new(h, l, r));
            for angle in [a.angle1, a.angle2] {
                assert!((0.0..=90.0).contains(&angle), "{angle}");
            }
        }
    }
}
