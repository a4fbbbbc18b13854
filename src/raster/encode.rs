use std::io::Cursor;

use anyhow::Context as _;

use crate::{
    foundation::error::{MeshError, MeshResult},
    raster::surface::Surface,
};

/// Raster container for exported images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG.
    #[default]
    Png,
    /// Lossless WebP.
    WebP,
}

impl ExportFormat {
    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::WebP => image::ImageFormat::WebP,
        }
    }
}

/// Encode surface pixels into `format`, un-premultiplying first.
pub fn encode_surface(surface: &Surface, format: ExportFormat) -> MeshResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(surface.width, surface.height, surface.to_straight_rgba8())
        .ok_or_else(|| MeshError::export("invalid rgba buffer size"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), format.image_format())
        .with_context(|| format!("encode {}", format.extension()))
        .map_err(|e| MeshError::export(format!("{e:#}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/encode.rs"]
mod tests;
