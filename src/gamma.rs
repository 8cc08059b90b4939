//! Coverage transfer functions for the rasterizer's gamma table.

/// Maps a coverage fraction in 0..=1 to an output fraction in 0..=1.
pub trait GammaFunction {
    fn call(&self, x: f64) -> f64;
}

/// Identity: coverage is used as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct GammaNone;

impl GammaFunction for GammaNone {
    #[inline]
    fn call(&self, x: f64) -> f64 {
        x
    }
}

/// Returns 0 below `threshold` and 1 at or above it. Turns anti-aliased
/// coverage into hard aliased edges.
#[derive(Debug, Clone, Copy)]
pub struct GammaThreshold {
    threshold: f64,
}

impl GammaThreshold {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for GammaThreshold {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl GammaFunction for GammaThreshold {
    #[inline]
    fn call(&self, x: f64) -> f64 {
        if x < self.threshold {
            0.0
        } else {
            1.0
        }
    }
}
