use crate::foundation::{
    core::Size,
    error::{MeshError, MeshResult},
};

/// A pixel target the Raster Bridge draws into.
///
/// Pixels are RGBA8, tightly packed, row-major and **premultiplied alpha**. The surface also
/// remembers the hash of the last markup drawn into it so identical previews can be skipped.
#[derive(Clone, Debug)]
pub struct Surface {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
    pub(crate) rendered_hash: Option<u64>,
    pub(crate) draw_count: u64,
}

impl Surface {
    /// Transparent surface of the given pixel size.
    pub fn new(width: u32, height: u32) -> MeshResult<Self> {
        if width == 0 || height == 0 {
            return Err(MeshError::validation(format!(
                "surface size must be non-zero, got {width}x{height}"
            )));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| MeshError::validation("surface size overflows"))?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
            premultiplied: true,
            rendered_hash: None,
            draw_count: 0,
        })
    }

    /// Surface sized like `size`.
    pub fn with_size(size: Size) -> MeshResult<Self> {
        Self::new(size.width, size.height)
    }

    /// Pixel size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Number of times pixels were actually replaced.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    /// Hash of the markup currently shown, if any draw succeeded.
    pub fn rendered_hash(&self) -> Option<u64> {
        self.rendered_hash
    }

    /// Forget the cached markup hash so the next preview always redraws.
    pub fn invalidate(&mut self) {
        self.rendered_hash = None;
    }

    /// Premultiplied RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy of the pixels with straight (non-premultiplied) alpha.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_in_place(&mut out);
        }
        out
    }

    pub(crate) fn replace(&mut self, data: Vec<u8>, hash: u64) {
        self.data = data;
        self.premultiplied = true;
        self.rendered_hash = Some(hash);
        self.draw_count += 1;
    }
}

pub(crate) fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/surface.rs"]
mod tests;
