//! In-place mutations of a [`SceneDocument`].
//!
//! Every operation that moves points recomputes the stored centroid before returning. Operations
//! that name an unknown shape, vertex or color return an error and leave the document untouched.

use crate::{
    foundation::core::{Point, Vec2},
    foundation::error::{MeshError, MeshResult},
    foundation::rng::{RandomSource, shuffle},
    generate::generate_shapes,
    scene::color::{PaletteColor, Rgba8},
    scene::model::{MAX_BLUR, SceneDocument, Shape},
    scene::presets::DEFAULT_COLORS,
};

/// Largest shared offset applied by [`randomize_shapes`], per axis.
pub const RANDOMIZE_MAX_OFFSET: f64 = 50.0;
/// Clamp margin used by [`randomize_shapes`], as a fraction of the shorter canvas side.
pub const RANDOMIZE_MARGIN: f64 = 0.02;

impl SceneDocument {
    /// Move a shape so its centroid lands on `new_center`.
    ///
    /// Points are translated by the delta from the stored center, then the center is recomputed
    /// from the translated points. No bounds clamping.
    pub fn translate_shape_center(&mut self, shape_id: &str, new_center: Point) -> MeshResult<()> {
        ensure_finite("center", new_center).inspect_err(log_rejected)?;
        let shape = self.shape_mut(shape_id).inspect_err(log_rejected)?;
        let delta = new_center - shape.center;
        for p in &mut shape.points {
            *p += delta;
        }
        shape.recompute_center();
        Ok(())
    }

    /// Replace one outline point and recompute the centroid.
    pub fn move_vertex(
        &mut self,
        shape_id: &str,
        vertex_index: usize,
        new_position: Point,
    ) -> MeshResult<()> {
        ensure_finite("vertex position", new_position).inspect_err(log_rejected)?;
        let shape = self.shape_mut(shape_id).inspect_err(log_rejected)?;
        let len = shape.points.len();
        let Some(p) = shape.points.get_mut(vertex_index) else {
            let err = MeshError::VertexOutOfRange {
                shape: shape_id.to_string(),
                index: vertex_index,
                len,
            };
            log_rejected(&err);
            return Err(err);
        };
        *p = new_position;
        shape.recompute_center();
        Ok(())
    }

    /// Set a shape's render-time rotation, in absolute degrees.
    pub fn rotate_shape(&mut self, shape_id: &str, degrees: f64) -> MeshResult<()> {
        let shape = self.shape_mut(shape_id).inspect_err(log_rejected)?;
        shape.rotation = Some(degrees);
        Ok(())
    }

    /// Set the same absolute rotation on every shape.
    pub fn rotate_all(&mut self, degrees: f64) {
        for shape in &mut self.shapes {
            shape.rotation = Some(degrees);
        }
    }

    /// Set or clear a shape's opacity override (`0..=100`).
    pub fn set_shape_opacity(&mut self, shape_id: &str, opacity: Option<f64>) -> MeshResult<()> {
        if let Some(o) = opacity
            && !(0.0..=100.0).contains(&o)
        {
            return Err(MeshError::validation("shape opacity must be in 0..=100"));
        }
        self.shape_mut(shape_id).inspect_err(log_rejected)?.opacity = opacity;
        Ok(())
    }

    /// Set or clear a shape's blur override (`0..=256`).
    pub fn set_shape_blur(&mut self, shape_id: &str, blur: Option<f64>) -> MeshResult<()> {
        if let Some(b) = blur
            && !(0.0..=MAX_BLUR).contains(&b)
        {
            return Err(MeshError::validation("shape blur must be in 0..=256"));
        }
        self.shape_mut(shape_id).inspect_err(log_rejected)?.blur = blur;
        Ok(())
    }

    /// Append a color and return its new id.
    ///
    /// Shapes are not regenerated; call [`SceneDocument::regenerate`] afterwards.
    pub fn add_color(&mut self, value: impl Into<String>) -> MeshResult<String> {
        let value = value.into();
        Rgba8::parse(&value)?;
        let id = self.next_color_id();
        self.palette.push(PaletteColor::new(id.clone(), value));
        Ok(id)
    }

    /// Remove a color by id.
    ///
    /// Shapes keep their `fill_index`; stale indices are clamped when composing.
    pub fn remove_color(&mut self, color_id: &str) -> MeshResult<PaletteColor> {
        let Some(pos) = self.palette.iter().position(|c| c.id == color_id) else {
            let err = MeshError::UnknownColor(color_id.to_string());
            log_rejected(&err);
            return Err(err);
        };
        Ok(self.palette.remove(pos))
    }

    /// Truncate the palette, or grow it by cycling the default colors.
    pub fn set_palette_size(&mut self, n: usize) {
        if n <= self.palette.len() {
            self.palette.truncate(n);
            return;
        }
        while self.palette.len() < n {
            let value = DEFAULT_COLORS[self.palette.len() % DEFAULT_COLORS.len()];
            let id = self.next_color_id();
            self.palette.push(PaletteColor::new(id, value));
        }
    }

    /// Reorder the palette. Display-only: shapes keep their indices.
    pub fn shuffle_palette(&mut self, rng: &mut dyn RandomSource) {
        shuffle(&mut self.palette, rng);
    }

    /// Replace every shape with a freshly generated mesh for the current palette size and
    /// `filters.spread`.
    pub fn regenerate(&mut self, rng: &mut dyn RandomSource) {
        self.shapes = generate_shapes(
            self.canvas.width,
            self.canvas.height,
            self.palette.len(),
            self.filters.spread,
            rng,
        );
    }

    /// Apply [`randomize_shapes`] to this document's shapes.
    pub fn randomize(&mut self, rng: &mut dyn RandomSource) {
        randomize_shapes(
            &mut self.shapes,
            self.canvas.width,
            self.canvas.height,
            rng,
        );
    }

    fn next_color_id(&self) -> String {
        let mut n = self.palette.len();
        loop {
            let id = format!("color-{n}");
            if !self.palette.iter().any(|c| c.id == id) {
                return id;
            }
            n += 1;
        }
    }
}

/// Nudge every shape by one shared random offset in `[-50, 50]²`, clamping each point into
/// `[margin, dim - margin]` with `margin = 2%` of the shorter side, then recompute centroids.
pub fn randomize_shapes(shapes: &mut [Shape], width: u32, height: u32, rng: &mut dyn RandomSource) {
    let (w, h) = (f64::from(width), f64::from(height));
    let margin = w.min(h) * RANDOMIZE_MARGIN;
    let delta = Vec2::new(
        rng.range_f64(-RANDOMIZE_MAX_OFFSET, RANDOMIZE_MAX_OFFSET),
        rng.range_f64(-RANDOMIZE_MAX_OFFSET, RANDOMIZE_MAX_OFFSET),
    );
    for shape in shapes {
        for p in &mut shape.points {
            let moved = *p + delta;
            *p = Point::new(
                moved.x.clamp(margin, (w - margin).max(margin)),
                moved.y.clamp(margin, (h - margin).max(margin)),
            );
        }
        shape.recompute_center();
    }
}

fn ensure_finite(what: &str, p: Point) -> MeshResult<()> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(MeshError::validation(format!("{what} must be finite, got {p:?}")))
    }
}

fn log_rejected(err: &MeshError) {
    tracing::debug!(%err, "mutation rejected");
}

#[cfg(test)]
#[path = "../../tests/unit/scene/edit.rs"]
mod tests;
