//! Built-in stroked sans-serif glyphs for dimension labels.
//!
//! Only the characters the labels use are defined: digits, `p`, `x` and `-`.
//! Coordinates are in font units on a 1000-unit em, y up from the baseline.
//! Each glyph is a list of strokes; a stroke is either a polyline or an
//! elliptical arc, and all of them are drawn with the same round-capped pen.

use crate::arc::Arc;
use crate::basics::{deg2rad, PointD};

pub const UNITS_PER_EM: f64 = 1000.0;

/// Pen width of the stroked glyphs in font units.
pub const STROKE_WIDTH: f64 = 88.0;

/// Advance of characters the font does not define.
pub const MISSING_ADVANCE: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphStroke {
    Polyline(&'static [(f64, f64)]),
    /// Center, radii, start and end angle in degrees (counter-clockwise
    /// positive, in font space).
    Arc {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        a1: f64,
        a2: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeGlyph {
    pub advance: f64,
    pub strokes: &'static [GlyphStroke],
}

const DIGIT_ADVANCE: f64 = 556.0;

const fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> GlyphStroke {
    GlyphStroke::Arc {
        cx,
        cy,
        rx,
        ry,
        a1: 0.0,
        a2: 360.0,
    }
}

const fn arc(cx: f64, cy: f64, rx: f64, ry: f64, a1: f64, a2: f64) -> GlyphStroke {
    GlyphStroke::Arc {
        cx,
        cy,
        rx,
        ry,
        a1,
        a2,
    }
}

const fn digit(strokes: &'static [GlyphStroke]) -> StrokeGlyph {
    StrokeGlyph {
        advance: DIGIT_ADVANCE,
        strokes,
    }
}

static ZERO: StrokeGlyph = digit(&[ellipse(278.0, 358.0, 180.0, 314.0)]);

static ONE: StrokeGlyph = digit(&[GlyphStroke::Polyline(&[
    (150.0, 560.0),
    (300.0, 672.0),
    (300.0, 44.0),
])]);

static TWO: StrokeGlyph = digit(&[
    arc(278.0, 508.0, 170.0, 164.0, 160.0, -40.0),
    GlyphStroke::Polyline(&[(408.0, 403.0), (100.0, 44.0), (470.0, 44.0)]),
]);

static THREE: StrokeGlyph = digit(&[
    arc(270.0, 520.0, 160.0, 152.0, 150.0, -90.0),
    arc(270.0, 214.0, 180.0, 170.0, 90.0, -150.0),
]);

static FOUR: StrokeGlyph = digit(&[GlyphStroke::Polyline(&[
    (390.0, 44.0),
    (390.0, 672.0),
    (70.0, 210.0),
    (490.0, 210.0),
])]);

static FIVE: StrokeGlyph = digit(&[
    GlyphStroke::Polyline(&[(440.0, 672.0), (150.0, 672.0), (140.0, 380.0)]),
    arc(280.0, 240.0, 180.0, 196.0, 140.0, -150.0),
]);

static SIX: StrokeGlyph = digit(&[
    ellipse(285.0, 230.0, 180.0, 186.0),
    arc(300.0, 300.0, 190.0, 372.0, 180.0, 60.0),
]);

static SEVEN: StrokeGlyph = digit(&[GlyphStroke::Polyline(&[
    (70.0, 672.0),
    (486.0, 672.0),
    (210.0, 44.0),
])]);

static EIGHT: StrokeGlyph = digit(&[
    ellipse(278.0, 520.0, 150.0, 152.0),
    ellipse(278.0, 210.0, 180.0, 166.0),
]);

static NINE: StrokeGlyph = digit(&[
    ellipse(271.0, 486.0, 180.0, 186.0),
    arc(256.0, 416.0, 190.0, 372.0, 0.0, -120.0),
]);

static P: StrokeGlyph = StrokeGlyph {
    advance: 556.0,
    strokes: &[
        GlyphStroke::Polyline(&[(100.0, 475.0), (100.0, -200.0)]),
        ellipse(290.0, 259.0, 180.0, 215.0),
    ],
};

static X: StrokeGlyph = StrokeGlyph {
    advance: 500.0,
    strokes: &[
        GlyphStroke::Polyline(&[(60.0, 475.0), (440.0, 44.0)]),
        GlyphStroke::Polyline(&[(440.0, 475.0), (60.0, 44.0)]),
    ],
};

static HYPHEN: StrokeGlyph = StrokeGlyph {
    advance: 333.0,
    strokes: &[GlyphStroke::Polyline(&[(60.0, 250.0), (273.0, 250.0)])],
};

/// Glyph for `ch`, if the built-in font defines one.
pub fn glyph(ch: char) -> Option<&'static StrokeGlyph> {
    Some(match ch {
        '0' => &ZERO,
        '1' => &ONE,
        '2' => &TWO,
        '3' => &THREE,
        '4' => &FOUR,
        '5' => &FIVE,
        '6' => &SIX,
        '7' => &SEVEN,
        '8' => &EIGHT,
        '9' => &NINE,
        'p' => &P,
        'x' => &X,
        '-' => &HYPHEN,
        _ => return None,
    })
}

/// Horizontal advance of `ch` in font units.
pub fn advance(ch: char) -> f64 {
    glyph(ch).map_or(MISSING_ADVANCE, |g| g.advance)
}

impl GlyphStroke {
    /// Centerline of the stroke in font units. `approx_scale` is the pixel
    /// size of one font unit, so arcs get enough steps once scaled down.
    pub fn centerline(&self, approx_scale: f64) -> Vec<PointD> {
        match *self {
            GlyphStroke::Polyline(points) => {
                points.iter().map(|&(x, y)| PointD::new(x, y)).collect()
            }
            GlyphStroke::Arc {
                cx,
                cy,
                rx,
                ry,
                a1,
                a2,
            } => {
                let mut arc = Arc::new(cx, cy, rx, ry, deg2rad(a1), deg2rad(a2));
                arc.set_approximation_scale(approx_scale);
                arc.flatten()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_characters_defined() {
        for ch in "0123456789px-".chars() {
            let g = glyph(ch).unwrap_or_else(|| panic!("missing glyph {ch:?}"));
            assert!(!g.strokes.is_empty());
            assert!(g.advance > 0.0);
        }
        assert!(glyph('A').is_none());
        assert_eq!(advance('A'), MISSING_ADVANCE);
    }

    #[test]
    fn test_digits_share_advance() {
        for ch in '0'..='9' {
            assert_eq!(advance(ch), DIGIT_ADVANCE);
        }
    }

    #[test]
    fn test_strokes_inside_em_box() {
        for ch in "0123456789px-".chars() {
            for stroke in glyph(ch).map(|g| g.strokes).unwrap_or(&[]) {
                for p in stroke.centerline(0.02) {
                    assert!(p.x >= 0.0 && p.x <= advance(ch), "{ch}: x {}", p.x);
                    assert!(p.y >= -210.0 && p.y <= 716.0, "{ch}: y {}", p.y);
                }
            }
        }
    }

    #[test]
    fn test_descender_only_on_p() {
        let below = |ch: char| {
            glyph(ch)
                .map(|g| g.strokes)
                .unwrap_or(&[])
                .iter()
                .flat_map(|s| s.centerline(0.02))
                .any(|p| p.y < 0.0)
        };
        assert!(below('p'));
        assert!(!below('8'));
        assert!(!below('x'));
    }
}
