//! Dimension label text.
//!
//! Labels are laid out the way the host's text API places a single line:
//! the layout box is `1.15 em` tall with `em / 6` of padding on both sides,
//! and glyphs sit on a baseline `0.905 em` below the top of the box. A label
//! is centered horizontally on its anchor and hangs down from it.
//!
//! The default face is the built-in stroke font from `glyphs`. With the
//! `font` feature a TrueType/OpenType face can be supplied instead; its
//! outlines are flattened and filled with the non-zero rule.

use crate::basics::PointD;
use crate::glyphs::{self, STROKE_WIDTH, UNITS_PER_EM};
use crate::math_stroke::MathStroke;
use crate::path_storage::PathStorage;

/// Label size in points.
pub const LABEL_POINT_SIZE: f64 = 14.0;

/// Layout resolution in dots per inch.
pub const LABEL_DPI: f64 = 96.0;

pub const LINE_HEIGHT_EM: f64 = 1.15;
pub const BASELINE_EM: f64 = 0.905;
pub const PADDING_EM: f64 = 1.0 / 6.0;

/// Em size in pixels of a label font of `points` at `LABEL_DPI`.
pub fn em_pixels(points: f64) -> f64 {
    points * LABEL_DPI / 72.0
}

// ============================================================================
// LabelFace
// ============================================================================

/// Typeface used for dimension labels.
#[derive(Debug, Clone, Default)]
pub enum LabelFace {
    /// Built-in stroked sans-serif.
    #[default]
    Builtin,
    /// A parsed TrueType/OpenType face.
    #[cfg(feature = "font")]
    TrueType(TrueTypeFace),
}

impl LabelFace {
    /// Parse a TrueType/OpenType face from raw bytes.
    #[cfg(feature = "font")]
    pub fn from_font_data(data: Vec<u8>, face_index: u32) -> crate::error::Result<Self> {
        TrueTypeFace::from_data(data, face_index).map(LabelFace::TrueType)
    }

    /// Horizontal advance of `ch` in pixels at the given em size.
    pub fn advance(&self, ch: char, em: f64) -> f64 {
        match self {
            LabelFace::Builtin => glyphs::advance(ch) * em / UNITS_PER_EM,
            #[cfg(feature = "font")]
            LabelFace::TrueType(face) => face.advance(ch, em),
        }
    }

    /// Width of a run of text in pixels.
    pub fn text_width(&self, text: &str, em: f64) -> f64 {
        text.chars().map(|ch| self.advance(ch, em)).sum()
    }

    /// Add the outline of `ch` with its origin at (x, baseline).
    pub fn append_glyph(&self, path: &mut PathStorage, ch: char, x: f64, baseline: f64, em: f64) {
        match self {
            LabelFace::Builtin => append_stroke_glyph(path, ch, x, baseline, em),
            #[cfg(feature = "font")]
            LabelFace::TrueType(face) => face.append_glyph(path, ch, x, baseline, em),
        }
    }
}

fn append_stroke_glyph(path: &mut PathStorage, ch: char, x: f64, baseline: f64, em: f64) {
    let Some(glyph) = glyphs::glyph(ch) else {
        return;
    };
    let scale = em / UNITS_PER_EM;
    let pen = MathStroke::new(STROKE_WIDTH * scale).approximation_scale(4.0);
    for stroke in glyph.strokes {
        let points: Vec<PointD> = stroke
            .centerline(scale)
            .into_iter()
            .map(|p| PointD::new(x + p.x * scale, baseline - p.y * scale))
            .collect();
        pen.stroke_polyline(path, &points);
    }
}

// ============================================================================
// Label layout
// ============================================================================

/// A single-line label positioned in layer pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Horizontal center of the layout box.
    pub center_x: f64,
    /// Top of the layout box.
    pub top: f64,
    /// Em size in pixels.
    pub em: f64,
}

impl Label {
    pub fn new(text: impl Into<String>, center_x: f64, top: f64, em: f64) -> Self {
        Self {
            text: text.into(),
            center_x,
            top,
            em,
        }
    }

    /// Layout box as (left, top, width, height).
    pub fn layout_box(&self, face: &LabelFace) -> (f64, f64, f64, f64) {
        let width = face.text_width(&self.text, self.em) + 2.0 * PADDING_EM * self.em;
        (
            self.center_x - width / 2.0,
            self.top,
            width,
            LINE_HEIGHT_EM * self.em,
        )
    }

    pub fn baseline(&self) -> f64 {
        self.top + BASELINE_EM * self.em
    }

    /// Outlines of every glyph of the label.
    pub fn outline(&self, face: &LabelFace) -> PathStorage {
        let mut path = PathStorage::new();
        let (left, _, _, _) = self.layout_box(face);
        let baseline = self.baseline();
        let mut x = left + PADDING_EM * self.em;
        for ch in self.text.chars() {
            face.append_glyph(&mut path, ch, x, baseline, self.em);
            x += face.advance(ch, self.em);
        }
        path
    }
}

// ============================================================================
// TrueType faces
// ============================================================================

#[cfg(feature = "font")]
pub use truetype::TrueTypeFace;

#[cfg(feature = "font")]
mod truetype {
    use crate::error::{RenderError, Result};
    use crate::path_storage::PathStorage;

    /// Curves are split into this many line segments per pixel of length,
    /// within `MIN_CURVE_STEPS..=MAX_CURVE_STEPS`.
    const MIN_CURVE_STEPS: usize = 4;
    const MAX_CURVE_STEPS: usize = 64;

    /// Raw face data, validated on construction.
    #[derive(Debug, Clone)]
    pub struct TrueTypeFace {
        data: Vec<u8>,
        face_index: u32,
    }

    impl TrueTypeFace {
        pub fn from_data(data: Vec<u8>, face_index: u32) -> Result<Self> {
            ttf_parser::Face::parse(&data, face_index)
                .map_err(|e| RenderError::Font(e.to_string()))?;
            Ok(Self { data, face_index })
        }

        fn face(&self) -> Option<ttf_parser::Face<'_>> {
            ttf_parser::Face::parse(&self.data, self.face_index).ok()
        }

        pub fn advance(&self, ch: char, em: f64) -> f64 {
            let Some(face) = self.face() else {
                return 0.0;
            };
            let scale = em / face.units_per_em() as f64;
            face.glyph_index(ch)
                .and_then(|id| face.glyph_hor_advance(id))
                .map_or(em / 2.0, |a| a as f64 * scale)
        }

        pub fn append_glyph(
            &self,
            path: &mut PathStorage,
            ch: char,
            x: f64,
            baseline: f64,
            em: f64,
        ) {
            let Some(face) = self.face() else {
                return;
            };
            let Some(id) = face.glyph_index(ch) else {
                return;
            };
            let scale = em / face.units_per_em() as f64;
            let mut builder = OutlineFlattener {
                path,
                x,
                baseline,
                scale,
                last: (0.0, 0.0),
            };
            face.outline_glyph(id, &mut builder);
        }
    }

    /// Flattens glyph outlines straight into a `PathStorage`, flipping y so
    /// the outline hangs from the baseline in screen space.
    pub(super) struct OutlineFlattener<'a> {
        pub(super) path: &'a mut PathStorage,
        pub(super) x: f64,
        pub(super) baseline: f64,
        pub(super) scale: f64,
        pub(super) last: (f64, f64),
    }

    impl OutlineFlattener<'_> {
        #[inline]
        fn map(&self, x: f32, y: f32) -> (f64, f64) {
            (
                self.x + x as f64 * self.scale,
                self.baseline - y as f64 * self.scale,
            )
        }

        fn steps(&self, points: &[(f64, f64)]) -> usize {
            let mut len = 0.0;
            let mut prev = self.last;
            for &p in points {
                len += ((p.0 - prev.0).powi(2) + (p.1 - prev.1).powi(2)).sqrt();
                prev = p;
            }
            (len.ceil() as usize).clamp(MIN_CURVE_STEPS, MAX_CURVE_STEPS)
        }

        fn line(&mut self, p: (f64, f64)) {
            self.path.line_to(p.0, p.1);
            self.last = p;
        }
    }

    impl ttf_parser::OutlineBuilder for OutlineFlattener<'_> {
        fn move_to(&mut self, x: f32, y: f32) {
            let p = self.map(x, y);
            self.path.move_to(p.0, p.1);
            self.last = p;
        }

        fn line_to(&mut self, x: f32, y: f32) {
            let p = self.map(x, y);
            self.line(p);
        }

        fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
            let c = self.map(x1, y1);
            let e = self.map(x, y);
            let s = self.last;
            let n = self.steps(&[c, e]);
            for i in 1..=n {
                let t = i as f64 / n as f64;
                let mt = 1.0 - t;
                let px = mt * mt * s.0 + 2.0 * mt * t * c.0 + t * t * e.0;
                let py = mt * mt * s.1 + 2.0 * mt * t * c.1 + t * t * e.1;
                self.line((px, py));
            }
        }

        fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
            let c1 = self.map(x1, y1);
            let c2 = self.map(x2, y2);
            let e = self.map(x, y);
            let s = self.last;
            let n = self.steps(&[c1, c2, e]);
            for i in 1..=n {
                let t = i as f64 / n as f64;
                let mt = 1.0 - t;
                let a = mt * mt * mt;
                let b = 3.0 * mt * mt * t;
                let c = 3.0 * mt * t * t;
                let d = t * t * t;
                let px = a * s.0 + b * c1.0 + c * c2.0 + d * e.0;
                let py = a * s.1 + b * c1.1 + c * c2.1 + d * e.1;
                self.line((px, py));
            }
        }

        fn close(&mut self) {
            self.path.close_polygon();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
