use anyhow::Context as _;

use crate::{
    foundation::error::{MeshError, MeshResult},
    foundation::math::hash_str,
    raster::surface::Surface,
};

/// Raster bridge options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterOpts {
    /// Largest accepted surface side in pixels.
    pub max_dim: u32,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self { max_dim: 16_384 }
    }
}

/// What a preview request did to the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// Markup was decoded and the surface pixels replaced.
    Drawn,
    /// Markup matched the last drawn hash; pixels untouched.
    Cached,
    /// Decode failed; the previous frame was kept.
    Failed,
}

/// Rasterizes composed markup onto a [`Surface`].
///
/// Previews are cached on the markup hash so unchanged content never redraws. Exports always
/// decode fresh and report failures to the caller.
#[derive(Clone, Debug, Default)]
pub struct RasterBridge {
    opts: RasterOpts,
}

impl RasterBridge {
    /// Bridge with explicit options.
    pub fn new(opts: RasterOpts) -> Self {
        Self { opts }
    }

    /// Options in use.
    pub fn opts(&self) -> &RasterOpts {
        &self.opts
    }

    /// Draw `markup` for on-screen preview.
    ///
    /// Never fails: decode errors are logged and the last good frame stays on the surface.
    #[tracing::instrument(skip(self, markup, surface), fields(w = surface.width, h = surface.height))]
    pub fn render_preview(&self, markup: &str, surface: &mut Surface) -> PreviewOutcome {
        let hash = hash_str(markup);
        if surface.rendered_hash == Some(hash) {
            tracing::trace!(hash, "preview cache hit");
            return PreviewOutcome::Cached;
        }
        match self.rasterize(markup, surface.width, surface.height) {
            Ok(data) => {
                surface.replace(data, hash);
                PreviewOutcome::Drawn
            }
            Err(err) => {
                tracing::warn!(error = %err, "preview decode failed, keeping previous frame");
                PreviewOutcome::Failed
            }
        }
    }

    /// Draw `markup` for export, ignoring the preview cache.
    #[tracing::instrument(skip(self, markup, surface), fields(w = surface.width, h = surface.height))]
    pub fn render_export(&self, markup: &str, surface: &mut Surface) -> MeshResult<()> {
        let data = self.rasterize(markup, surface.width, surface.height)?;
        surface.replace(data, hash_str(markup));
        Ok(())
    }

    fn rasterize(&self, markup: &str, width: u32, height: u32) -> MeshResult<Vec<u8>> {
        let max = self.opts.max_dim;
        if width > max || height > max {
            return Err(MeshError::decode(format!(
                "raster size too large: {width}x{height} (max {max}x{max})"
            )));
        }

        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_str(markup, &opts)
            .context("parse svg markup")
            .map_err(|e| MeshError::decode(format!("{e:#}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| MeshError::decode("failed to allocate pixmap"))?;

        let sx = (width as f32) / tree.size().width();
        let sy = (height as f32) / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );
        Ok(pixmap.take())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/bridge.rs"]
mod tests;
