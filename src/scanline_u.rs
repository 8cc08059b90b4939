//! Unpacked scanline container.
//!
//! Keeps one coverage byte per pixel in a flat array indexed by `x - min_x`;
//! spans are runs of consecutive pixels that point into that array.

use crate::rasterizer_scanline_aa::Scanline;

/// A run of pixels within a scanline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanlineSpan {
    pub x: i32,
    pub len: i32,
    /// Index of the span's first coverage byte in `ScanlineU8::covers`.
    pub cover_offset: usize,
}

/// Scanline with per-pixel u8 coverage.
///
/// 1. `reset(min_x, max_x)` sizes the covers array for the rasterizer's x range
/// 2. the rasterizer feeds cells and spans with increasing x
/// 3. the renderer walks `begin()` and reads `span_covers()`
#[derive(Debug, Default)]
pub struct ScanlineU8 {
    min_x: i32,
    y: i32,
    covers: Vec<u8>,
    spans: Vec<ScanlineSpan>,
}

impl ScanlineU8 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare for sweeping pixels in `min_x..=max_x`.
    pub fn reset(&mut self, min_x: i32, max_x: i32) {
        let len = (max_x - min_x + 2).max(0) as usize;
        if len > self.covers.len() {
            self.covers.resize(len, 0);
        }
        self.min_x = min_x;
        self.spans.clear();
    }

    /// Spans of the current scanline, left to right.
    pub fn begin(&self) -> &[ScanlineSpan] {
        &self.spans
    }

    /// Coverage bytes of one span.
    pub fn span_covers(&self, span: &ScanlineSpan) -> &[u8] {
        &self.covers[span.cover_offset..span.cover_offset + span.len as usize]
    }

    /// Append `len` pixels at `x`, extending the last span when adjacent.
    fn push_run(&mut self, x: i32, len: i32) {
        let offset = (x - self.min_x) as usize;
        if let Some(last) = self.spans.last_mut() {
            if last.x + last.len == x {
                last.len += len;
                return;
            }
        }
        self.spans.push(ScanlineSpan {
            x,
            len,
            cover_offset: offset,
        });
    }
}

impl Scanline for ScanlineU8 {
    fn reset_spans(&mut self) {
        self.spans.clear();
    }

    fn add_cell(&mut self, x: i32, cover: u32) {
        let xi = (x - self.min_x) as usize;
        self.covers[xi] = cover as u8;
        self.push_run(x, 1);
    }

    fn add_span(&mut self, x: i32, len: u32, cover: u32) {
        let xi = (x - self.min_x) as usize;
        self.covers[xi..xi + len as usize].fill(cover as u8);
        self.push_run(x, len as i32);
    }

    fn finalize(&mut self, y: i32) {
        self.y = y;
    }

    fn num_spans(&self) -> u32 {
        self.spans.len() as u32
    }

    fn y(&self) -> i32 {
        self.y
    }
}
