//! Foundation types, constants, and path command utilities.
//!
//! Everything else in the crate builds on these: fixed-point subpixel
//! constants for the rasterizer, coverage constants, points, half-open
//! rectangles, and the `VertexSource` protocol that geometry generators use
//! to feed the rasterizer.

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round to the nearest integer, halves away from zero.
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Floor toward negative infinity.
#[inline]
pub fn ifloor(v: f64) -> i32 {
    let i = v as i32;
    i - (i as f64 > v) as i32
}

// ============================================================================
// Cover (anti-aliasing) constants
// ============================================================================

/// The type used for anti-aliasing coverage values.
pub type CoverType = u8;

// ============================================================================
// Subpixel constants
// ============================================================================

/// Subpixel accuracy of the rasterizer (number of fractional bits).
/// With 8 fractional bits and 32-bit integers the coordinate range is 24 bits.
pub const POLY_SUBPIXEL_SHIFT: u32 = 8;
pub const POLY_SUBPIXEL_SCALE: u32 = 1 << POLY_SUBPIXEL_SHIFT;
pub const POLY_SUBPIXEL_MASK: u32 = POLY_SUBPIXEL_SCALE - 1;

/// Largest absolute pixel coordinate handed to the rasterizer.
pub const POLY_MAX_COORD: f64 = (1 << 22) as f64;

/// Convert a pixel coordinate to 24.8 fixed point, saturating far-away
/// coordinates so extreme offsets cannot overflow the cell engine.
#[inline]
pub fn poly_coord(v: f64) -> i32 {
    let v = if v.is_finite() { v } else { 0.0 };
    iround(v.clamp(-POLY_MAX_COORD, POLY_MAX_COORD) * POLY_SUBPIXEL_SCALE as f64)
}

// ============================================================================
// Filling rule
// ============================================================================

/// Filling rule for polygon rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillingRule {
    NonZero,
    EvenOdd,
}

// ============================================================================
// Angles
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

#[inline]
pub fn deg2rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

#[inline]
pub fn rad2deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

// ============================================================================
// Rect
// ============================================================================

/// An axis-aligned rectangle. `x1`/`y1` are inclusive, `x2`/`y2` exclusive,
/// so a tile covering pixels 0..=9 is `Rect::new(0, 0, 10, 10)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectI {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectI {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build from an origin and a size.
    pub fn from_xywh(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x.saturating_add(width as i32),
            y2: y.saturating_add(height as i32),
        }
    }

    pub fn width(&self) -> u32 {
        (self.x2 - self.x1).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y2 - self.y1).max(0) as u32
    }

    /// `true` when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Intersection of two rectangles. May be empty.
    pub fn intersect(&self, r: &RectI) -> RectI {
        RectI {
            x1: self.x1.max(r.x1),
            y1: self.y1.max(r.y1),
            x2: self.x2.min(r.x2),
            y2: self.y2.min(r.y2),
        }
    }
}

// ============================================================================
// Path commands
// ============================================================================

pub const PATH_CMD_STOP: u32 = 0;
pub const PATH_CMD_MOVE_TO: u32 = 1;
pub const PATH_CMD_LINE_TO: u32 = 2;
pub const PATH_CMD_END_POLY: u32 = 0x0F;

pub const PATH_FLAGS_CLOSE: u32 = 0x40;

#[inline]
pub fn is_vertex(c: u32) -> bool {
    (PATH_CMD_MOVE_TO..PATH_CMD_END_POLY).contains(&c)
}

#[inline]
pub fn is_stop(c: u32) -> bool {
    c == PATH_CMD_STOP
}

#[inline]
pub fn is_move_to(c: u32) -> bool {
    c == PATH_CMD_MOVE_TO
}

#[inline]
pub fn is_close(c: u32) -> bool {
    c == (PATH_CMD_END_POLY | PATH_FLAGS_CLOSE)
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point in pixel space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &PointD) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point `t` of the way from `self` to `other`.
    #[inline]
    pub fn lerp(&self, other: &PointD, t: f64) -> PointD {
        PointD {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

// ============================================================================
// VertexSource
// ============================================================================

/// A generator of path vertices.
///
/// `rewind` restarts iteration; `vertex` writes the next coordinates and
/// returns a path command, `PATH_CMD_STOP` once exhausted. Every shape the
/// layer renderer draws (polygons, stroked segments, arrow caps, glyph
/// outlines) is a vertex source handed to the scanline rasterizer.
pub trait VertexSource {
    fn rewind(&mut self, path_id: u32);
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32;
}

impl<T: VertexSource> VertexSource for &mut T {
    fn rewind(&mut self, path_id: u32) {
        (*self).rewind(path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        (*self).vertex(x, y)
    }
}

// ============================================================================
// Polygon: closed contour over a fixed point list
// ============================================================================

/// A closed polygon over an owned list of points.
///
/// Faces of the solid are convex quads and triangles listed explicitly, so
/// this is the only fill geometry the layer needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    points: Vec<PointD>,
    index: usize,
}

impl Polygon {
    pub fn new(points: Vec<PointD>) -> Self {
        Self { points, index: 0 }
    }

    pub fn points(&self) -> &[PointD] {
        &self.points
    }

    /// Twice the signed area (positive for clockwise on a y-down screen).
    pub fn signed_area2(&self) -> f64 {
        signed_area2(&self.points)
    }
}

/// Twice the signed area of a closed point list (shoelace formula).
pub fn signed_area2(points: &[PointD]) -> f64 {
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum
}

impl VertexSource for Polygon {
    fn rewind(&mut self, _path_id: u32) {
        self.index = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        let n = self.points.len();
        if n < 3 {
            return PATH_CMD_STOP;
        }
        let i = self.index;
        self.index += 1;
        if i < n {
            *x = self.points[i].x;
            *y = self.points[i].y;
            return if i == 0 {
                PATH_CMD_MOVE_TO
            } else {
                PATH_CMD_LINE_TO
            };
        }
        if i == n {
            return PATH_CMD_END_POLY | PATH_FLAGS_CLOSE;
        }
        PATH_CMD_STOP
    }
}

// ============================================================================
// Tests
// ============================================================================
