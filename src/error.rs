//! Crate error type.

use thiserror::Error;

/// Errors surfaced to the host.
///
/// Bad configuration values never appear here: they are clamped by
/// `CuboidConfig::sanitized`. Degenerate geometry renders nothing.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The cancellation token fired while a tile was being composited.
    #[error("render cancelled")]
    Cancelled,

    /// A pixel vector did not match the declared surface dimensions.
    #[error("surface of {width}x{height} needs {} pixels, got {len}", pixel_count(.width, .height))]
    SurfaceSize { width: u32, height: u32, len: usize },

    /// Tiles were requested before any configuration was applied.
    #[error("no rendered layer: set_render_info must run before render")]
    LayerNotReady,

    /// A TrueType face could not be parsed.
    #[error("font error: {0}")]
    Font(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

fn pixel_count(width: &u32, height: &u32) -> usize {
    *width as usize * *height as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(RenderError::Cancelled.to_string(), "render cancelled");
        let e = RenderError::SurfaceSize {
            width: 3,
            height: 2,
            len: 5,
        };
        assert_eq!(e.to_string(), "surface of 3x2 needs 6 pixels, got 5");
        assert!(RenderError::Font("bad magic".into())
            .to_string()
            .contains("bad magic"));
    }
}
