//! The effect instance a host drives.
//!
//! A host calls `set_render_info` whenever the configuration changes and
//! then asks for tiles with `render` or `render_tile`, possibly from many
//! threads at once. Each configuration produces a new `RenderedLayer`,
//! built completely before it is published together with its configuration
//! in one write; tile renders that already hold the previous layer finish
//! with it.

use std::sync::{Arc, PoisonError, RwLock};

use crate::basics::RectI;
use crate::cancel::CancelToken;
use crate::compositor::composite_tile;
use crate::config::CuboidConfig;
use crate::error::{RenderError, Result};
use crate::layer::RenderedLayer;
use crate::scene::Scene;
use crate::surface::{Surface, SurfaceMut};
use crate::text::LabelFace;

/// A configuration and the layer drawn from it.
#[derive(Debug, Clone)]
struct Published {
    config: CuboidConfig,
    layer: Arc<RenderedLayer>,
}

#[derive(Debug)]
pub struct IsometricCuboidEffect {
    selection: RectI,
    face: LabelFace,
    current: RwLock<Option<Published>>,
}

impl IsometricCuboidEffect {
    /// Effect over `selection`, in destination pixel coordinates.
    pub fn new(selection: RectI) -> Self {
        Self::with_label_face(selection, LabelFace::default())
    }

    pub fn with_label_face(selection: RectI, face: LabelFace) -> Self {
        Self {
            selection,
            face,
            current: RwLock::new(None),
        }
    }

    pub fn selection(&self) -> RectI {
        self.selection
    }

    fn published(&self) -> Option<Published> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The configuration of the current layer, after clamping.
    pub fn config(&self) -> Option<CuboidConfig> {
        self.published().map(|p| p.config)
    }

    /// The current layer, if a configuration has been applied.
    pub fn layer(&self) -> Option<Arc<RenderedLayer>> {
        self.published().map(|p| p.layer)
    }

    /// The current configuration and the layer drawn from it, read together.
    pub fn snapshot(&self) -> Option<(CuboidConfig, Arc<RenderedLayer>)> {
        self.published().map(|p| (p.config, p.layer))
    }

    /// Apply a new configuration: clamp it, draw a new layer and publish it.
    pub fn set_render_info(&self, config: &CuboidConfig) {
        let config = config.sanitized();
        let (w, h) = (self.selection.width(), self.selection.height());
        let scene = Scene::build(&config, w, h);
        let (obj_w, obj_h) = scene.vertices.object_size_px();
        log::debug!(
            "building {:?} layer {}x{}: base ({:.2}, {:.2}), object {}x{}, {} draw ops",
            config.shape,
            w,
            h,
            scene.vertices.base().x,
            scene.vertices.base().y,
            obj_w,
            obj_h,
            scene.ops.len()
        );
        if let Some(vis) = &scene.visibility {
            log::debug!(
                "pyramid angles {:.2}/{:.2}/{:.2}, back faces left={} right={}, back edge visible={}",
                vis.angles.angle1,
                vis.angles.angle2,
                vis.angles.angle3,
                vis.back_left,
                vis.back_right,
                vis.back_apex
            );
        }

        let layer = Arc::new(RenderedLayer::render(&scene, w, h, &self.face));
        *self.current.write().unwrap_or_else(PoisonError::into_inner) =
            Some(Published { config, layer });
    }

    /// Composite every rectangle in order. Stops at the first error.
    pub fn render<D: SurfaceMut + ?Sized>(
        &self,
        src: &Surface,
        dst: &mut D,
        rects: &[RectI],
        cancel: &CancelToken,
    ) -> Result<()> {
        if rects.is_empty() {
            return Ok(());
        }
        let layer = self.layer().ok_or(RenderError::LayerNotReady)?;
        for rect in rects {
            composite_tile(&layer, self.selection, src, dst, *rect, cancel)?;
        }
        Ok(())
    }

    /// Composite one rectangle.
    pub fn render_tile<D: SurfaceMut + ?Sized>(
        &self,
        src: &Surface,
        dst: &mut D,
        rect: RectI,
        cancel: &CancelToken,
    ) -> Result<()> {
        let layer = self.layer().ok_or(RenderError::LayerNotReady)?;
        composite_tile(&layer, self.selection, src, dst, rect, cancel)
    }
}

// ============================================================================
// Tests
// ============================================================================
