//! # isocuboid
//!
//! Renders a parametric isometric cuboid or pyramid as an RGBA overlay and
//! composites it onto a host image, tile by tile.
//!
//! - Fixed 30°/60° isometric projection from a height and two depths
//! - Hidden-edge heuristic for pyramids (solid, dotted or omitted edges)
//! - Solid or HSV-shaded face fills
//! - Anti-aliased or hard-edged rendering with subpixel accuracy
//! - Optional dimension lines with arrowheads and pixel-size labels
//! - Bilinear sampling and normal blending onto source/destination surfaces
//!
//! ## Architecture
//!
//! Rendering follows a scanline pipeline:
//!
//! 1. **Scene**: configuration → vertices → ordered draw operations
//! 2. **Geometry**: strokes, dots, arrowheads and glyphs become closed contours
//! 3. **Scanline Rasterizer**: contours become anti-aliased coverage spans
//! 4. **Renderer**: spans are blended into the layer surface
//! 5. **Compositor**: the finished layer is sampled and blended per tile
//!
//! The layer is rebuilt once per configuration change by
//! [`IsometricCuboidEffect::set_render_info`]; tiles are composited
//! independently and may run concurrently.

// Phase 1: Foundation Types
pub mod basics;
pub mod color;
pub mod error;
pub mod gamma;

// Phase 2: Geometry Primitives
pub mod arc;
pub mod arrowhead;
pub mod glyphs;
pub mod math_stroke;
pub mod path_storage;
pub mod text;
pub mod vcgen_dash;

// Phase 3: Scanline Rasterizer
pub mod rasterizer_cells_aa;
pub mod rasterizer_scanline_aa;
pub mod rasterizer_sl_clip;
pub mod scanline_u;

// Phase 4: Pixel Surfaces & Renderers
pub mod comp_op;
pub mod pixfmt_rgba;
pub mod renderer_base;
pub mod renderer_scanline;
pub mod surface;

// Phase 5: Effect Core
pub mod cancel;
pub mod compositor;
pub mod config;
pub mod effect;
pub mod geometry;
pub mod layer;
pub mod scene;
pub mod shading;
pub mod visibility;

pub use basics::{PointD, RectI};
pub use cancel::CancelToken;
pub use color::{ColorRgb, Hsv, Rgba8};
pub use config::{CuboidConfig, FillStyle, HostDefaults, PositionOffset, Shape};
pub use effect::IsometricCuboidEffect;
pub use error::{RenderError, Result};
pub use layer::RenderedLayer;
pub use surface::{Surface, SurfaceBand, SurfaceMut};
pub use text::LabelFace;
